use super::{mnemonics, registers};
use crate::{
    radio::{prelude::EsbPower, Nrf24, Nrf24Error},
    transport::Transport,
    PowerState,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

impl<BUS, DO, DELAY> EsbPower for Nrf24<BUS, DO, DELAY>
where
    BUS: Transport,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PowerErrorType = Nrf24Error<BUS::Error, DO::Error>;

    /// In full power down mode (a sleep state), the radio will consume approximately
    /// 900nA (.0009mA). In standby, a non-PA/LNA radio consumes about 26uA.
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?; // Guarantee CE is low on powerDown
        self.clear_register_bit(registers::CONFIG, mnemonics::PWR_UP)?;
        self._power = PowerState::PowerDown;
        Ok(())
    }

    fn power_up(&mut self) -> Result<(), Self::PowerErrorType> {
        if self._power != PowerState::PowerDown {
            return Ok(());
        }
        self.set_register_bit(registers::CONFIG, mnemonics::PWR_UP)?;

        // There must be a delay of Tpd2standby (see Table 16.) after the nRF24L01+ leaves
        // power down mode before the CE is set high. Tpd2standby can be up to 5ms per
        // the 1.0 datasheet
        self._delay_impl.delay_us(5000);
        self._power = PowerState::Standby;
        Ok(())
    }

    fn set_active(&mut self, active: bool) -> Result<(), Self::PowerErrorType> {
        if active {
            if self._power == PowerState::PowerDown {
                return Err(Nrf24Error::InvalidConfig);
            }
            self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
            self._power = PowerState::Active;
        } else {
            self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
            if self._power == PowerState::Active {
                self._power = PowerState::Standby;
            }
        }
        Ok(())
    }

    fn power_state(&self) -> PowerState {
        self._power
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::{registers, EsbPower};
    use crate::{
        radio::{commands, Nrf24Error},
        sim::SimRadio,
        test::{mk_radio, SpiFrames},
        PowerState,
    };
    use embedded_hal_mock::eh1::digital::{State as PinState, Transaction as PinTransaction};

    #[test]
    pub fn power_up() {
        let frames = SpiFrames::new()
            .read(registers::CONFIG, &[0x0C])
            .write(registers::CONFIG | commands::W_REGISTER, &[0x0E]);
        let mut mocks = mk_radio(&[], &frames);
        mocks.0.power_up().unwrap();
        // already powered up
        mocks.0.power_up().unwrap();
        assert!(mocks.0.is_powered());
        assert_eq!(mocks.0.power_state(), PowerState::Standby);
        mocks.done();
    }

    #[test]
    pub fn power_down() {
        let frames = SpiFrames::new()
            .read(registers::CONFIG, &[0x0E])
            .write(registers::CONFIG | commands::W_REGISTER, &[0x0C]);
        let mut mocks = mk_radio(&[PinTransaction::set(PinState::Low)], &frames);
        mocks.0.power_down().unwrap();
        assert!(!mocks.0.is_powered());
        mocks.done();
    }

    #[test]
    pub fn activate_while_powered_down() {
        let mut mocks = mk_radio(&[], &SpiFrames::new());
        assert_eq!(mocks.0.set_active(true), Err(Nrf24Error::InvalidConfig));
        assert_eq!(mocks.0.power_state(), PowerState::PowerDown);
        mocks.done();
    }

    #[test]
    pub fn state_machine() {
        let mut sim = SimRadio::new();
        assert_eq!(sim.radio.power_state(), PowerState::PowerDown);
        sim.radio.power_up().unwrap();
        assert_eq!(sim.chip.register(registers::CONFIG) & 2, 2);
        assert_eq!(sim.radio.power_state(), PowerState::Standby);

        sim.radio.set_active(true).unwrap();
        assert!(sim.chip.ce());
        assert_eq!(sim.radio.power_state(), PowerState::Active);

        sim.radio.set_active(false).unwrap();
        assert!(!sim.chip.ce());
        assert_eq!(sim.radio.power_state(), PowerState::Standby);

        sim.radio.set_active(true).unwrap();
        sim.radio.power_down().unwrap();
        assert!(!sim.chip.ce());
        assert_eq!(sim.chip.register(registers::CONFIG) & 2, 0);
        assert_eq!(sim.radio.power_state(), PowerState::PowerDown);

        // deactivating while powered down stays powered down
        sim.radio.set_active(false).unwrap();
        assert_eq!(sim.radio.power_state(), PowerState::PowerDown);
    }
}
