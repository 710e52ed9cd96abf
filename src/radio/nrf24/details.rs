#![cfg_attr(
    not(any(
        all(feature = "defmt", target_os = "none"),
        all(feature = "std", not(target_os = "none"))
    )),
    allow(dead_code)
)]

use super::{bit_fields::Config, registers, Nrf24Error};
use crate::{
    radio::{
        config::PIPES,
        prelude::{EsbChannel, EsbCrcLength, EsbDataRate, EsbDetails, EsbFifo, EsbPaLevel, EsbPipe},
        Nrf24,
    },
    transport::Transport,
    CrcLength, DataRate, FifoState, PaLevel, PowerState, StatusFlags,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

#[cfg(all(feature = "std", not(target_os = "none")))]
extern crate std;

/// A snapshot of the radio's registers, as printed by
/// [`EsbDetails::print_details()`].
pub(crate) struct Details {
    pub is_plus_variant: bool,
    pub channel: u8,
    pub data_rate: DataRate,
    pub pa_level: PaLevel,
    pub lna_bit: bool,
    pub crc_length: CrcLength,
    pub address_width: u8,
    pub payload_lengths: [u8; PIPES as usize],
    pub setup_retr: u8,
    pub observe_tx: u8,
    pub reuse_tx: bool,
    pub config: Config,
    pub status: StatusFlags,
    pub feature: u8,
    pub dynpd: u8,
    pub en_aa: u8,
    pub en_rxaddr: u8,
    pub tx_fifo: FifoState,
    pub rx_fifo: FifoState,
    pub power: PowerState,
    pub tx_address: [u8; 5],
    pub rx_addresses: [[u8; 5]; PIPES as usize],
}

impl Details {
    /// Microseconds between retransmissions.
    pub fn retry_delay_us(&self) -> u16 {
        (self.setup_retr >> 4) as u16 * 250 + 250
    }

    /// An address as one number, most significant byte first.
    pub fn address_value(address: &[u8; 5]) -> u64 {
        let mut bytes = [0u8; 8];
        bytes[..5].copy_from_slice(address);
        u64::from_le_bytes(bytes)
    }
}

impl<BUS, DO, DELAY> Nrf24<BUS, DO, DELAY>
where
    BUS: Transport,
    DO: OutputPin,
    DELAY: DelayNs,
{
    pub(crate) fn read_details(&mut self) -> Result<Details, Nrf24Error<BUS::Error, DO::Error>> {
        let mut payload_lengths = [0u8; PIPES as usize];
        for (pipe, length) in payload_lengths.iter_mut().enumerate() {
            *length = self.read_register_byte(registers::RX_PW_P0 + pipe as u8)? & 0x3F;
        }
        let mut tx_address = [0u8; 5];
        self.read_register(registers::TX_ADDR, &mut tx_address)?;
        let mut rx_addresses = [[0u8; 5]; PIPES as usize];
        for pipe in 0..PIPES {
            let address = &mut rx_addresses[pipe as usize];
            let len = if pipe < 2 { 5 } else { 1 };
            self.read_register(registers::RX_ADDR_P0 + pipe, &mut address[..len])?;
        }
        // pipes 2 - 5 share all but the LSB with pipe 1
        let pipe1 = rx_addresses[1];
        for address in rx_addresses.iter_mut().skip(2) {
            address[1..].copy_from_slice(&pipe1[1..]);
        }
        let fifo_status = self.read_register_byte(registers::FIFO_STATUS)?;

        Ok(Details {
            is_plus_variant: self._is_plus_variant,
            channel: self.get_channel()?,
            data_rate: self.get_data_rate()?,
            pa_level: self.get_pa_level()?,
            lna_bit: self.read_register_byte(registers::RF_SETUP)? & 1 > 0,
            crc_length: self.get_crc_length()?,
            address_width: self.get_address_width()?,
            payload_lengths,
            setup_retr: self.read_register_byte(registers::SETUP_RETR)?,
            observe_tx: self.read_register_byte(registers::OBSERVE_TX)?,
            reuse_tx: fifo_status & 0x40 > 0,
            config: Config::from_bits(self.read_register_byte(registers::CONFIG)?),
            status: self._status,
            feature: self.read_register_byte(registers::FEATURE)?,
            dynpd: self.read_register_byte(registers::DYNPD)?,
            en_aa: self.read_register_byte(registers::EN_AA)?,
            en_rxaddr: self.read_register_byte(registers::EN_RXADDR)?,
            tx_fifo: self.get_fifo_state(true)?,
            rx_fifo: self.get_fifo_state(false)?,
            power: self._power,
            tx_address,
            rx_addresses,
        })
    }
}

impl<BUS, DO, DELAY> EsbDetails for Nrf24<BUS, DO, DELAY>
where
    BUS: Transport,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type DetailsErrorType = Nrf24Error<BUS::Error, DO::Error>;

    #[cfg(feature = "defmt")]
    #[cfg(target_os = "none")]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        let details = self.read_details()?;
        defmt::println!("Is a plus variant_________{=bool}", details.is_plus_variant);
        defmt::println!(
            "Channel___________________{=u8} ~ {=u16} MHz",
            details.channel,
            details.channel as u16 + 2400u16
        );
        defmt::println!("RF Data Rate______________{}", details.data_rate);
        defmt::println!("RF Power Amplifier________{}", details.pa_level);
        defmt::println!("RF LNA bit________________{=bool}", details.lna_bit);
        defmt::println!("CRC Length________________{}", details.crc_length);
        defmt::println!("Address width_____________{=u8} bytes", details.address_width);
        defmt::println!("Static payload lengths____{=[u8; 6]}", details.payload_lengths);
        defmt::println!(
            "Auto retry delay__________{=u16} microseconds",
            details.retry_delay_us()
        );
        defmt::println!(
            "Auto retry attempts_______{=u8} maximum",
            details.setup_retr & 0x0F
        );
        defmt::println!("Re-use TX FIFO____________{=bool}", details.reuse_tx);
        defmt::println!(
            "Packets lost\n    on current channel____{=u8}",
            details.observe_tx >> 4
        );
        defmt::println!(
            "Retry attempts made\n    for last transmission_{=u8}",
            details.observe_tx & 0xF
        );
        defmt::println!("IRQ on Data Ready_________{=bool}", details.config.rx_dr());
        defmt::println!("    Data Ready triggered__{=bool}", details.status.rx_dr());
        defmt::println!("IRQ on Data Sent__________{=bool}", details.config.tx_ds());
        defmt::println!("    Data Sent triggered___{=bool}", details.status.tx_ds());
        defmt::println!("IRQ on Data Fail__________{=bool}", details.config.tx_df());
        defmt::println!("    Data Fail triggered___{=bool}", details.status.tx_df());
        defmt::println!("TX FIFO___________________{}", details.tx_fifo);
        defmt::println!("RX FIFO___________________{}", details.rx_fifo);
        defmt::println!("Ask no ACK allowed________{=bool}", details.feature & 1 > 0);
        defmt::println!("ACK Payload enabled_______{=bool}", details.feature & 2 > 0);
        defmt::println!("Dynamic Payloads__________{=u8:#010b}", details.dynpd);
        defmt::println!("Auto Acknowledgment_______{=u8:#010b}", details.en_aa);
        let rx = defmt::intern!("R");
        let tx = defmt::intern!("T");
        defmt::println!(
            "Primary Mode______________{=istr}X",
            if details.config.is_rx() { rx } else { tx }
        );
        defmt::println!("Power state_______________{}", details.power);
        defmt::println!(
            "TX address________________{=u64:#012X}",
            Details::address_value(&details.tx_address)
        );
        let opened = defmt::intern!(" open ");
        let closed = defmt::intern!("closed");
        for (pipe, address) in details.rx_addresses.iter().enumerate() {
            defmt::println!(
                "Pipe {=usize} ({=istr}) bound to {=u64:#012X}",
                pipe,
                if details.en_rxaddr & (1 << pipe) > 0 {
                    opened
                } else {
                    closed
                },
                Details::address_value(address)
            );
        }
        Ok(())
    }

    #[cfg(not(target_os = "none"))]
    #[cfg(feature = "std")]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        let details = self.read_details()?;
        std::println!("Is a plus variant_________{}", details.is_plus_variant);
        std::println!(
            "Channel___________________{} ~ {} MHz",
            details.channel,
            details.channel as u16 + 2400u16
        );
        std::println!("RF Data Rate______________{}", details.data_rate);
        std::println!("RF Power Amplifier________{}", details.pa_level);
        std::println!("RF LNA bit________________{}", details.lna_bit);
        std::println!("CRC Length________________{}", details.crc_length);
        std::println!("Address width_____________{} bytes", details.address_width);
        std::println!("Static payload lengths____{:?}", details.payload_lengths);
        std::println!(
            "Auto retry delay__________{} microseconds",
            details.retry_delay_us()
        );
        std::println!(
            "Auto retry attempts_______{} maximum",
            details.setup_retr & 0x0F
        );
        std::println!("Re-use TX FIFO____________{}", details.reuse_tx);
        std::println!(
            "Packets lost\n    on current channel____{}",
            details.observe_tx >> 4
        );
        std::println!(
            "Retry attempts made\n    for last transmission_{}",
            details.observe_tx & 0xF
        );
        std::println!("IRQ on Data Ready_________{}", details.config.rx_dr());
        std::println!("    Data Ready triggered__{}", details.status.rx_dr());
        std::println!("IRQ on Data Sent__________{}", details.config.tx_ds());
        std::println!("    Data Sent triggered___{}", details.status.tx_ds());
        std::println!("IRQ on Data Fail__________{}", details.config.tx_df());
        std::println!("    Data Fail triggered___{}", details.status.tx_df());
        std::println!("TX FIFO___________________{}", details.tx_fifo);
        std::println!("RX FIFO___________________{}", details.rx_fifo);
        std::println!("Ask no ACK allowed________{}", details.feature & 1 > 0);
        std::println!("ACK Payload enabled_______{}", details.feature & 2 > 0);
        std::println!("Dynamic Payloads__________{:#010b}", details.dynpd);
        std::println!("Auto Acknowledgment_______{:#010b}", details.en_aa);
        std::println!(
            "Primary Mode______________{}X",
            if details.config.is_rx() { "R" } else { "T" }
        );
        std::println!("Power state_______________{}", details.power);
        std::println!(
            "TX address________________{:#012X}",
            Details::address_value(&details.tx_address)
        );
        for (pipe, address) in details.rx_addresses.iter().enumerate() {
            std::println!(
                "Pipe {pipe} ({}) bound to {:#012X}",
                if details.en_rxaddr & (1 << pipe) > 0 {
                    " open "
                } else {
                    "closed"
                },
                Details::address_value(address)
            );
        }
        Ok(())
    }

    #[cfg(not(any(
        all(feature = "defmt", target_os = "none"),
        all(feature = "std", not(target_os = "none"))
    )))]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        Ok(())
    }
}
