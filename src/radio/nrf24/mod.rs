use embedded_hal::{delay::DelayNs, digital::OutputPin};
mod auto_ack;
pub(crate) mod bit_fields;
mod channel;
mod init;
mod constants;
mod crc_length;
mod data_rate;
mod fifo;
mod pa_level;
mod payload_length;
mod pipe;
mod power;
mod radio;
pub use constants::{commands, mnemonics, registers};
mod details;
mod status;
use super::RadioConfig;
use crate::{
    transport::{Transport, TransportError},
    types::PowerState,
    StatusFlags,
};

/// An collection of error types to describe hardware malfunctions
/// and rejected requests.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Nrf24Error<BUS, DO> {
    /// Represents a failure of the [`Transport`] bus.
    Bus(BUS),
    /// Represents a DigitalOutput error (CE or CSN pin).
    Gpo(DO),
    /// Represents a corruption of binary data (as it was transferred over the SPI bus' MISO)
    BinaryCorruption,
    /// The buffers given to a bus exchange were non-empty and of different lengths.
    TransportSizeMismatch,
    /// A pipe number outside the range [0, 5].
    InvalidPipe,
    /// An address shorter than the configured address width.
    InvalidAddressLength,
    /// The request conflicts with the radio's feature interdependencies
    /// (or its power state).
    InvalidConfig,
}

impl<BUS, DO> From<TransportError<BUS>> for Nrf24Error<BUS, DO> {
    fn from(value: TransportError<BUS>) -> Self {
        match value {
            TransportError::Bus(e) => Nrf24Error::Bus(e),
            TransportError::SizeMismatch => Nrf24Error::TransportSizeMismatch,
        }
    }
}

/// This struct implements the [`Esb*` traits](mod@crate::radio::prelude)
/// for the nRF24L01 transceiver.
///
/// Additionally, there are some functions implemented that are specific to the nRF24L01.
/// The public register level functions ([`Nrf24::read_register()`],
/// [`Nrf24::write_register()`], ...) bypass the cached configuration; using them
/// to change a setting will leave [`Nrf24::config()`] out of date.
pub struct Nrf24<BUS, DO, DELAY> {
    _bus: BUS,
    /// The CE pin for the radio.
    ///
    /// This really only exposed for advanced manipulation of active modes.
    /// It is strongly recommended to use [`EsbPower::set_active()`](fn@crate::radio::prelude::EsbPower::set_active)
    /// because it keeps track of the radio's [`PowerState`].
    pub ce_pin: DO,
    _csn_pin: DO,
    _delay_impl: DELAY,
    _status: StatusFlags,
    _config: RadioConfig,
    _power: PowerState,
    _is_plus_variant: bool,
}

type Nrf24Result<T, BUS, DO> =
    Result<T, Nrf24Error<<BUS as Transport>::Error, <DO as embedded_hal::digital::ErrorType>::Error>>;

impl<BUS, DO, DELAY> Nrf24<BUS, DO, DELAY>
where
    BUS: Transport,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Instantiate an [`Nrf24`] object for use on the specified
    /// `bus` with the given `ce_pin` and `csn_pin`.
    ///
    /// Nothing is sent to the radio until
    /// [`init()`](fn@crate::radio::prelude::EsbInit::init) or
    /// [`configure()`](fn@crate::radio::prelude::EsbInit::configure) is called.
    pub fn new(ce_pin: DO, csn_pin: DO, bus: BUS, delay_impl: DELAY) -> Nrf24<BUS, DO, DELAY> {
        Nrf24 {
            _bus: bus,
            ce_pin,
            _csn_pin: csn_pin,
            _delay_impl: delay_impl,
            _status: StatusFlags::from_bits(0),
            _config: RadioConfig::default(),
            _power: PowerState::PowerDown,
            _is_plus_variant: true,
        }
    }

    /// The configuration last written through this driver.
    ///
    /// This mirror is not read back from the radio.
    pub fn config(&self) -> &RadioConfig {
        &self._config
    }

    /// Send one command framed by the CSN pin.
    ///
    /// The `opcode` is followed by a data phase that clocks out `write` and/or
    /// fills `read` (see [`Transport::exchange()`]). The STATUS byte clocked in
    /// with the `opcode` is cached and returned.
    ///
    /// Mismatched buffers are rejected before the CSN pin is touched.
    /// The CSN pin is released even if the bus fails.
    pub fn send_command(
        &mut self,
        opcode: u8,
        write: &[u8],
        read: &mut [u8],
    ) -> Nrf24Result<StatusFlags, BUS, DO> {
        if !write.is_empty() && !read.is_empty() && write.len() != read.len() {
            return Err(Nrf24Error::TransportSizeMismatch);
        }
        self._csn_pin.set_low().map_err(Nrf24Error::Gpo)?;
        let result = self.frame(opcode, write, read);
        let released = self._csn_pin.set_high().map_err(Nrf24Error::Gpo);
        result?;
        released?;
        Ok(self._status)
    }

    fn frame(&mut self, opcode: u8, write: &[u8], read: &mut [u8]) -> Result<(), TransportError<BUS::Error>> {
        self._status = StatusFlags::from_bits(self._bus.transfer(opcode)?);
        self._bus.exchange(write, read)?;
        self._bus.flush()
    }

    /// Read `buf.len()` bytes from a register.
    pub fn read_register(&mut self, register: u8, buf: &mut [u8]) -> Nrf24Result<(), BUS, DO> {
        self.send_command(
            commands::R_REGISTER | (register & commands::REGISTER_MASK),
            &[],
            buf,
        )?;
        Ok(())
    }

    /// Read a single byte register.
    pub fn read_register_byte(&mut self, register: u8) -> Nrf24Result<u8, BUS, DO> {
        let mut buf = [0u8];
        self.read_register(register, &mut buf)?;
        Ok(buf[0])
    }

    /// Write `data` to a register.
    pub fn write_register(&mut self, register: u8, data: &[u8]) -> Nrf24Result<(), BUS, DO> {
        self.send_command(
            commands::W_REGISTER | (register & commands::REGISTER_MASK),
            data,
            &mut [],
        )?;
        Ok(())
    }

    /// Read a single byte register, clear the bits in `mask`, set the bits in `value`,
    /// and write the result back.
    ///
    /// Returns the byte that was written.
    pub fn update_register(&mut self, register: u8, value: u8, mask: u8) -> Nrf24Result<u8, BUS, DO> {
        let new_val = self.read_register_byte(register)? & !mask | value;
        self.write_register(register, &[new_val])?;
        Ok(new_val)
    }

    /// Set the bits of `mask` in a register (read-modify-write).
    pub fn set_register_bit(&mut self, register: u8, mask: u8) -> Nrf24Result<u8, BUS, DO> {
        self.update_register(register, mask, mask)
    }

    /// Clear the bits of `mask` in a register (read-modify-write).
    pub fn clear_register_bit(&mut self, register: u8, mask: u8) -> Nrf24Result<u8, BUS, DO> {
        self.update_register(register, 0, mask)
    }

    /// Read a register back and compare it to `expected`.
    ///
    /// Only the writable bits of the register are compared
    /// (see [`registers::writable_mask()`]). At most 5 bytes are compared.
    pub fn verify_register(&mut self, register: u8, expected: &[u8]) -> Nrf24Result<bool, BUS, DO> {
        let len = expected.len().min(5);
        let mut buf = [0u8; 5];
        self.read_register(register, &mut buf[..len])?;
        let mask = registers::writable_mask(register);
        Ok(buf[..len]
            .iter()
            .zip(expected)
            .all(|(actual, expected)| actual & mask == expected & mask))
    }

    /// A private function to write a special SPI command specific to older
    /// non-plus variants of the nRF24L01 radio module. It has no effect on plus variants.
    fn toggle_features(&mut self) -> Nrf24Result<(), BUS, DO> {
        self.send_command(commands::ACTIVATE, &[0x73], &mut [])?;
        Ok(())
    }

    /// Is this radio a nRF24L01+ variant?
    ///
    /// The bool that this function returns is only valid _after_ calling
    /// [`init()`](fn@crate::radio::prelude::EsbInit::init).
    pub fn is_plus_variant(&self) -> bool {
        self._is_plus_variant
    }

    /// Was a signal stronger than -64 dBm detected on the current channel?
    ///
    /// Only nRF24L01+ variants implement this (RPD register).
    pub fn rpd(&mut self) -> Nrf24Result<bool, BUS, DO> {
        Ok(self.read_register_byte(registers::RPD)? & 1 == 1)
    }

    /// Set or clear the `LNA_HCURR` bit of the RF_SETUP register.
    ///
    /// The effect of this bit differs between chips. On the nRF24L01 (non-plus)
    /// and Si24R1 clones it controls the Low Noise Amplifier gain; the nRF24L01+
    /// ignores it. Datasheets disagree on its polarity, so this only writes
    /// the raw bit.
    pub fn set_lna_bit(&mut self, value: bool) -> Nrf24Result<(), BUS, DO> {
        self.update_register(registers::RF_SETUP, value as u8, mnemonics::LNA_HCURR)?;
        self._config = self._config.with_lna_bit(value);
        Ok(())
    }
}
