use super::{mnemonics, registers};
use crate::{
    radio::{prelude::EsbCrcLength, Nrf24, Nrf24Error},
    transport::Transport,
    CrcLength,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

impl<BUS, DO, DELAY> EsbCrcLength for Nrf24<BUS, DO, DELAY>
where
    BUS: Transport,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type CrcLengthErrorType = Nrf24Error<BUS::Error, DO::Error>;

    fn get_crc_length(&mut self) -> Result<CrcLength, Self::CrcLengthErrorType> {
        let config = self.read_register_byte(registers::CONFIG)?;
        Ok(CrcLength::from_bits(config))
    }

    /// Disabling the CRC (`bytes` is `0`) requires compatibility mode
    /// and only clears the `EN_CRC` bit.
    fn set_crc_length(&mut self, bytes: u8) -> Result<(), Self::CrcLengthErrorType> {
        let length = CrcLength::from_bytes(bytes).ok_or(Nrf24Error::InvalidConfig)?;
        match length {
            CrcLength::Disabled => {
                if !self._config.compat_mode() {
                    return Err(Nrf24Error::InvalidConfig);
                }
                self.clear_register_bit(registers::CONFIG, mnemonics::EN_CRC)?;
            }
            _ => {
                self.update_register(registers::CONFIG, length.into_bits(), CrcLength::MASK)?;
            }
        }
        self._config = self._config.with_crc_length(length);
        Ok(())
    }
}
