use super::{bit_fields::Feature, commands, registers, Nrf24Error};
use crate::{
    radio::{
        config::PIPES,
        prelude::{EsbInit, EsbPower},
        Nrf24, RadioConfig,
    },
    transport::Transport,
    PowerState, StatusFlags,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

impl<BUS, DO, DELAY> EsbInit for Nrf24<BUS, DO, DELAY>
where
    BUS: Transport,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ConfigErrorType = Nrf24Error<BUS::Error, DO::Error>;

    /// Initialize the radio's hardware using the [`Transport`] and [`OutputPin`]s given
    /// to [`Nrf24::new()`].
    fn init(&mut self) -> Result<(), Self::ConfigErrorType> {
        // Must allow the radio time to settle else configuration bits will not necessarily stick.
        // Technically we require 4.5ms + 14us as a worst case. We'll just call it 5ms.
        self._delay_impl.delay_us(5000);
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        self._csn_pin.set_high().map_err(Nrf24Error::Gpo)?;

        // detect if is a plus variant & use old toggle features command accordingly
        let before_toggle = self.read_register_byte(registers::FEATURE)?;
        self.toggle_features()?;
        let after_toggle = self.read_register_byte(registers::FEATURE)?;
        self._is_plus_variant = before_toggle == after_toggle;
        if after_toggle < before_toggle {
            // FEATURE register is disabled on non-plus variants until `toggle_features()` is used.
            // MCU may have reset without triggering a power-on-reset in radio.
            self.toggle_features()?;
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("nRF24L01 plus variant: {}", self._is_plus_variant);

        let config = RadioConfig::default();
        self.configure(&config)?;

        // verify the SPI lines are working
        let expected = config.config_reg.with_power(false).into_bits();
        if self.read_register_byte(registers::CONFIG)? != expected {
            return Err(Nrf24Error::BinaryCorruption);
        }
        self.power_up()
    }

    fn configure(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType> {
        if !config.is_consistent() {
            return Err(Nrf24Error::InvalidConfig);
        }
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;

        // Set CONFIG register:
        //      Set IRQ events on IRQ pin
        //      Set CRC length
        //      Power down
        //      Set role (PTX or PRX)
        self.write_register(
            registers::CONFIG,
            &[config.config_reg.with_power(false).into_bits()],
        )?;
        self.write_register(registers::SETUP_AW, &[config.address_width() - 2])?;
        self.write_register(registers::SETUP_RETR, &[config.auto_retries.into_bits()])?;
        self.write_register(registers::RF_SETUP, &[config.rf_setup.into_bits()])?;
        self.write_register(registers::RF_CH, &[config.channel()])?;
        self.write_register(registers::EN_AA, &[config.auto_ack()])?;
        self.write_register(registers::EN_RXADDR, &[config.rx_pipes_enabled()])?;
        self.write_register(registers::DYNPD, &[config.dynamic_payloads()])?;
        self.write_register(
            registers::FEATURE,
            &[config.feature.into_bits() & Feature::REG_MASK],
        )?;

        let width = config.address_width() as usize;
        let mut address = [0; 5];
        for pipe in 0..PIPES {
            self.write_register(registers::RX_PW_P0 + pipe, &[config.payload_length(pipe)])?;
            config.rx_address(pipe, &mut address);
            // pipes 2 - 5 share all but the LSB with pipe 1
            let len = if pipe < 2 { width } else { 1 };
            self.write_register(registers::RX_ADDR_P0 + pipe, &address[..len])?;
        }
        config.tx_address(&mut address);
        self.write_register(registers::TX_ADDR, &address[..width])?;

        self.write_register(registers::STATUS, &[StatusFlags::new().into_bits()])?;
        self.send_command(commands::FLUSH_RX, &[], &mut [])?;
        self.send_command(commands::FLUSH_TX, &[], &mut [])?;

        self._config = *config;
        self._power = PowerState::PowerDown;
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::{commands, registers, EsbInit, EsbPower};
    use crate::{
        radio::{prelude::EsbAutoAck, Nrf24Error, RadioConfig},
        sim::{SimChip, SimRadio},
        CrcLength, PowerState,
    };

    #[test]
    fn init_plus_variant() {
        let mut sim = SimRadio::new();
        sim.radio.init().unwrap();
        assert!(sim.radio.is_plus_variant());
        assert_eq!(sim.radio.power_state(), PowerState::Standby);
        assert!(!sim.chip.ce());

        assert_eq!(sim.chip.register(registers::CONFIG), 0x0E);
        assert_eq!(sim.chip.register(registers::SETUP_AW), 3);
        assert_eq!(sim.chip.register(registers::SETUP_RETR), 0x5F);
        assert_eq!(sim.chip.register(registers::RF_SETUP), 0x07);
        assert_eq!(sim.chip.register(registers::RF_CH), 76);
        assert_eq!(sim.chip.register(registers::EN_AA), 0x3F);
        assert_eq!(sim.chip.register(registers::EN_RXADDR), 0x03);
        assert_eq!(sim.chip.register(registers::DYNPD), 0);
        assert_eq!(sim.chip.register(registers::FEATURE), 0);
        assert_eq!(sim.chip.register(registers::RX_PW_P0 + 4), 32);
        assert_eq!(sim.chip.address(registers::RX_ADDR_P1), [0xC2; 5]);
        assert_eq!(sim.chip.address(registers::RX_ADDR_P0 + 5)[0], 0xC6);
        assert_eq!(sim.chip.address(registers::TX_ADDR), [0xE7; 5]);
        assert_eq!(sim.chip.count(commands::FLUSH_RX), 1);
        assert_eq!(sim.chip.count(commands::FLUSH_TX), 1);
        assert_eq!(sim.radio.config(), &RadioConfig::default());
    }

    #[test]
    fn init_legacy_variant() {
        let mut sim = SimRadio::with_chip(SimChip::new().legacy(false));
        // the FEATURE register hides a value until ACTIVATE
        sim.chip.set_register(registers::FEATURE, &[1]);
        sim.radio.init().unwrap();
        assert!(!sim.radio.is_plus_variant());
        assert_eq!(sim.chip.count(commands::ACTIVATE), 1);
        sim.radio.allow_ask_no_ack(true).unwrap();
        assert_eq!(sim.chip.register(registers::FEATURE), 1);
    }

    #[test]
    fn init_legacy_variant_without_power_on_reset() {
        let chip = SimChip::new().legacy(true);
        chip.set_register(registers::FEATURE, &[4]);
        let mut sim = SimRadio::with_chip(chip);
        sim.radio.init().unwrap();
        assert!(!sim.radio.is_plus_variant());
        // locked by the first ACTIVATE, unlocked by the second
        assert_eq!(sim.chip.count(commands::ACTIVATE), 2);
        sim.radio.allow_ask_no_ack(true).unwrap();
        assert_eq!(sim.chip.register(registers::FEATURE), 1);
    }

    #[test]
    fn init_binary_corruption() {
        let mut sim = SimRadio::new();
        sim.chip.stick_miso(0xFF);
        assert_eq!(sim.radio.init(), Err(Nrf24Error::BinaryCorruption));
        assert_eq!(sim.radio.power_state(), PowerState::PowerDown);
    }

    #[test]
    fn configure_custom() {
        let mut sim = SimRadio::new();
        let config = RadioConfig::default()
            .with_channel(42)
            .with_address_width(3)
            .with_crc_length(CrcLength::Bit8)
            .with_rx_address(2, b"xyz")
            .with_tx_address(b"abc")
            .with_dynamic_payload(1, true)
            .with_payload_length(3, 8)
            .with_rx_dr(false);
        sim.radio.configure(&config).unwrap();
        assert_eq!(sim.chip.register(registers::CONFIG), 0x48);
        assert_eq!(sim.chip.register(registers::SETUP_AW), 1);
        assert_eq!(sim.chip.register(registers::RF_CH), 42);
        assert_eq!(sim.chip.register(registers::EN_RXADDR), 0x07);
        assert_eq!(sim.chip.register(registers::DYNPD), 0x02);
        assert_eq!(sim.chip.register(registers::FEATURE), 0x04);
        assert_eq!(sim.chip.register(registers::RX_PW_P0 + 3), 8);
        assert_eq!(sim.chip.address(registers::RX_ADDR_P0 + 2)[0], b'x');
        assert_eq!(&sim.chip.address(registers::TX_ADDR)[..3], b"abc");
        assert_eq!(sim.radio.config(), &config);
        assert_eq!(sim.radio.power_state(), PowerState::PowerDown);
    }

    #[test]
    fn configure_rejects_inconsistent() {
        let mut sim = SimRadio::new();
        let config = RadioConfig::default().with_crc_length(CrcLength::Disabled);
        assert_eq!(sim.radio.configure(&config), Err(Nrf24Error::InvalidConfig));
        assert!(sim.chip.commands().is_empty());

        // fine in compatibility mode
        let config = config.with_compat_mode(true);
        sim.radio.configure(&config).unwrap();
        assert_eq!(sim.chip.register(registers::CONFIG) & 0x0C, 0);
        assert_eq!(sim.chip.register(registers::EN_AA), 0);
        assert!(sim.radio.get_compat_mode());
    }
}
