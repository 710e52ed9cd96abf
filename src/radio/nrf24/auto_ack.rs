use super::{commands, mnemonics, registers, Nrf24Result};
use crate::{
    radio::{
        config::PIPES,
        features::{EnablePlan, EsbFeature},
        prelude::EsbAutoAck,
        Nrf24, Nrf24Error,
    },
    transport::Transport,
    CrcLength,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

impl<BUS, DO, DELAY> Nrf24<BUS, DO, DELAY>
where
    BUS: Transport,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Enable a `feature` on a `pipe` along with everything it depends on.
    ///
    /// All steps are checked before the first register is touched.
    pub(super) fn enable_feature(
        &mut self,
        feature: EsbFeature,
        pipe: u8,
    ) -> Nrf24Result<(), BUS, DO> {
        let plan = EnablePlan::new(feature, pipe);
        if plan.needs_auto_ack() && self._config.compat_mode() {
            return Err(Nrf24Error::InvalidConfig);
        }
        for &(step, pipe) in plan.steps() {
            match step {
                EsbFeature::AutoAck => {
                    self.set_register_bit(registers::EN_AA, 1 << pipe)?;
                }
                EsbFeature::DynamicPayload => {
                    self.set_register_bit(registers::FEATURE, mnemonics::EN_DPL)?;
                    self.set_register_bit(registers::DYNPD, 1 << pipe)?;
                }
                EsbFeature::AckPayload => {
                    self.set_register_bit(registers::FEATURE, mnemonics::EN_ACK_PAY)?;
                }
            }
            self._config = self._config.with_feature_step(step, pipe);
        }
        Ok(())
    }
}

impl<BUS, DO, DELAY> EsbAutoAck for Nrf24<BUS, DO, DELAY>
where
    BUS: Transport,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type AutoAckErrorType = Nrf24Error<BUS::Error, DO::Error>;

    fn set_auto_ack(&mut self, pipe: u8, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        if pipe >= PIPES {
            return Err(Nrf24Error::InvalidPipe);
        }
        if self._config.compat_mode() {
            return Err(Nrf24Error::InvalidConfig);
        }
        if enable {
            return self.enable_feature(EsbFeature::AutoAck, pipe);
        }
        // dynamic payloads need auto-ack
        if self._config.dynamic_payload_pipe(pipe) {
            return Err(Nrf24Error::InvalidConfig);
        }
        self.clear_register_bit(registers::EN_AA, 1 << pipe)?;
        self._config = self._config.with_auto_ack_pipe(pipe, false);
        Ok(())
    }

    fn get_auto_ack(&self, pipe: u8) -> bool {
        self._config.auto_ack_pipe(pipe)
    }

    fn set_ack_payload(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        if enable {
            return self.enable_feature(EsbFeature::AckPayload, 0);
        }
        self.clear_register_bit(registers::FEATURE, mnemonics::EN_ACK_PAY)?;
        self._config = self._config.with_ack_payloads(false);
        Ok(())
    }

    fn get_ack_payload(&self) -> bool {
        self._config.ack_payloads()
    }

    /// The `buf` should not exceed 32 bytes.
    fn write_ack_payload(&mut self, pipe: u8, buf: &[u8]) -> Result<(), Self::AutoAckErrorType> {
        if pipe >= PIPES {
            return Err(Nrf24Error::InvalidPipe);
        }
        self.send_command(commands::W_ACK_PAYLOAD | pipe, buf, &mut [])?;
        Ok(())
    }

    fn allow_ask_no_ack(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        self.update_register(
            registers::FEATURE,
            enable as u8 * mnemonics::EN_DYN_ACK,
            mnemonics::EN_DYN_ACK,
        )?;
        self._config = self._config.with_ask_no_ack(enable);
        Ok(())
    }

    fn set_max_retries(&mut self, count: u8) -> Result<(), Self::AutoAckErrorType> {
        let count = count.min(15);
        self.update_register(registers::SETUP_RETR, count, mnemonics::ARC)?;
        self._config = self._config.with_max_retries(count);
        Ok(())
    }

    fn set_retry_delay(&mut self, delay: u8) -> Result<(), Self::AutoAckErrorType> {
        let delay = delay.min(15);
        self.update_register(registers::SETUP_RETR, delay << 4, mnemonics::ARD)?;
        self._config = self._config.with_retry_delay(delay);
        Ok(())
    }

    fn set_compat_mode(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        if !enable {
            if self._config.crc_length() == CrcLength::Disabled {
                return Err(Nrf24Error::InvalidConfig);
            }
            self._config = self._config.with_compat_mode(false);
            return Ok(());
        }
        self.write_register(registers::EN_AA, &[0])?;
        self.write_register(registers::DYNPD, &[0])?;
        self.clear_register_bit(
            registers::FEATURE,
            mnemonics::EN_DPL | mnemonics::EN_ACK_PAY,
        )?;
        self._config = self._config.with_compat_mode(true);
        Ok(())
    }

    fn get_compat_mode(&self) -> bool {
        self._config.compat_mode()
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::{commands, registers, EsbAutoAck};
    use crate::{
        radio::{
            prelude::{EsbCrcLength, EsbPayloadLength},
            Nrf24Error,
        },
        sim::SimRadio,
        test::{mk_radio, SpiFrames},
    };

    #[test]
    fn set_auto_ack_pipe() {
        let frames = SpiFrames::new()
            .read(registers::EN_AA, &[0x3F])
            .write(registers::EN_AA | commands::W_REGISTER, &[0x3B])
            .read(registers::EN_AA, &[0x3B])
            .write(registers::EN_AA | commands::W_REGISTER, &[0x3F]);
        let mut mocks = mk_radio(&[], &frames);
        mocks.0.set_auto_ack(2, false).unwrap();
        assert!(!mocks.0.get_auto_ack(2));
        mocks.0.set_auto_ack(2, true).unwrap();
        assert!(mocks.0.get_auto_ack(2));
        mocks.done();
    }

    #[test]
    fn invalid_pipe() {
        let mut mocks = mk_radio(&[], &SpiFrames::new());
        assert_eq!(mocks.0.set_auto_ack(6, true), Err(Nrf24Error::InvalidPipe));
        assert_eq!(
            mocks.0.write_ack_payload(6, &[1]),
            Err(Nrf24Error::InvalidPipe)
        );
        mocks.done();
    }

    #[test]
    fn write_ack_payload() {
        let frames = SpiFrames::new().write(commands::W_ACK_PAYLOAD | 3, b"ack");
        let mut mocks = mk_radio(&[], &frames);
        mocks.0.write_ack_payload(3, b"ack").unwrap();
        mocks.done();
    }

    #[test]
    fn retries_use_separate_nibbles() {
        let frames = SpiFrames::new()
            .read(registers::SETUP_RETR, &[0x5F])
            .write(registers::SETUP_RETR | commands::W_REGISTER, &[0x53])
            .read(registers::SETUP_RETR, &[0x53])
            .write(registers::SETUP_RETR | commands::W_REGISTER, &[0xF3]);
        let mut mocks = mk_radio(&[], &frames);
        mocks.0.set_max_retries(3).unwrap();
        mocks.0.set_retry_delay(20).unwrap();
        assert_eq!(mocks.0.config().max_retries(), 3);
        assert_eq!(mocks.0.config().retry_delay(), 15);
        mocks.done();
    }

    #[test]
    fn ask_no_ack() {
        let frames = SpiFrames::new()
            .read(registers::FEATURE, &[0x04])
            .write(registers::FEATURE | commands::W_REGISTER, &[0x05]);
        let mut mocks = mk_radio(&[], &frames);
        mocks.0.allow_ask_no_ack(true).unwrap();
        assert!(mocks.0.config().ask_no_ack());
        mocks.done();
    }

    #[test]
    fn ack_payloads_enable_pipe0_dynamic_payloads() {
        let mut sim = SimRadio::new();
        sim.chip.set_register(registers::EN_AA, &[0]);
        sim.radio.set_ack_payload(true).unwrap();
        assert_eq!(sim.chip.register(registers::EN_AA), 1);
        assert_eq!(sim.chip.register(registers::DYNPD), 1);
        assert_eq!(sim.chip.register(registers::FEATURE), 0x06);
        assert!(sim.radio.get_ack_payload());

        sim.radio.set_ack_payload(false).unwrap();
        assert_eq!(sim.chip.register(registers::FEATURE), 0x04);
        assert_eq!(sim.chip.register(registers::DYNPD), 1);
        assert!(!sim.radio.get_ack_payload());
    }

    #[test]
    fn compat_mode() {
        let mut sim = SimRadio::new();
        sim.radio.set_ack_payload(true).unwrap();
        sim.chip.set_register(registers::FEATURE, &[0x07]);
        sim.radio.set_compat_mode(true).unwrap();
        assert_eq!(sim.chip.register(registers::EN_AA), 0);
        assert_eq!(sim.chip.register(registers::DYNPD), 0);
        // ask-no-ack is left alone
        assert_eq!(sim.chip.register(registers::FEATURE), 0x01);
        assert!(sim.radio.get_compat_mode());
        assert!(!sim.radio.get_ack_payload());

        // auto-ack can't be toggled in compatibility mode
        let commands_sent = sim.chip.commands().len();
        assert_eq!(sim.radio.set_auto_ack(1, true), Err(Nrf24Error::InvalidConfig));
        assert_eq!(sim.radio.set_auto_ack(1, false), Err(Nrf24Error::InvalidConfig));
        // neither can features that depend on it
        assert_eq!(sim.radio.set_ack_payload(true), Err(Nrf24Error::InvalidConfig));
        assert_eq!(sim.chip.commands().len(), commands_sent);

        // can't leave compatibility mode without a CRC
        sim.radio.set_crc_length(0).unwrap();
        assert_eq!(sim.radio.set_compat_mode(false), Err(Nrf24Error::InvalidConfig));
        sim.radio.set_crc_length(1).unwrap();
        sim.radio.set_compat_mode(false).unwrap();
        assert!(!sim.radio.get_compat_mode());
        // features stay off until enabled again
        assert_eq!(sim.chip.register(registers::EN_AA), 0);
        sim.radio.set_auto_ack(1, true).unwrap();
        assert_eq!(sim.chip.register(registers::EN_AA), 2);
    }

    #[test]
    fn dynamic_payload_pipe_keeps_auto_ack() {
        let mut sim = SimRadio::new();
        sim.radio.set_dynamic_payload(1, true).unwrap();
        let sent = sim.chip.commands().len();
        assert_eq!(sim.radio.set_auto_ack(1, false), Err(Nrf24Error::InvalidConfig));
        assert_eq!(sim.chip.commands().len(), sent);
        assert_eq!(sim.chip.register(registers::EN_AA), 0x3F);
        assert!(sim.radio.get_auto_ack(1));
        assert!(sim.radio.config().is_consistent());

        // other pipes are unaffected
        sim.radio.set_auto_ack(2, false).unwrap();
        assert_eq!(sim.chip.register(registers::EN_AA), 0x3B);
    }
}
