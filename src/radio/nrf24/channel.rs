use super::{mnemonics, registers};
use crate::{
    radio::{prelude::EsbChannel, Nrf24, Nrf24Error},
    transport::Transport,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

impl<BUS, DO, DELAY> EsbChannel for Nrf24<BUS, DO, DELAY>
where
    BUS: Transport,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ChannelErrorType = Nrf24Error<BUS::Error, DO::Error>;

    /// The nRF24L01 supports 126 channels. The specified `channel` is
    /// clamped to the range [0, 125].
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType> {
        let channel = channel.min(125);
        self.update_register(registers::RF_CH, channel, mnemonics::RF_CH_MASK)?;
        self._config = self._config.with_channel(channel);
        Ok(())
    }

    /// See also [`Nrf24::set_channel()`].
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType> {
        Ok(self.read_register_byte(registers::RF_CH)? & mnemonics::RF_CH_MASK)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::{registers, EsbChannel};
    use crate::{
        radio::commands,
        sim::SimRadio,
        test::{mk_radio, SpiFrames},
    };

    #[test]
    pub fn get_channel() {
        let frames = SpiFrames::new().read(registers::RF_CH, &[76]);
        let mut mocks = mk_radio(&[], &frames);
        assert_eq!(mocks.0.get_channel().unwrap(), 76u8);
        mocks.done();
    }

    #[test]
    pub fn set_channel() {
        let frames = SpiFrames::new()
            .read(registers::RF_CH, &[2])
            .write(registers::RF_CH | commands::W_REGISTER, &[42]);
        let mut mocks = mk_radio(&[], &frames);
        mocks.0.set_channel(42).unwrap();
        assert_eq!(mocks.0.config().channel(), 42);
        mocks.done();
    }

    #[test]
    fn channel_clamps() {
        let mut sim = SimRadio::new();
        sim.radio.set_channel(200).unwrap();
        assert_eq!(sim.chip.register(registers::RF_CH), 125);
        assert_eq!(sim.radio.get_channel().unwrap(), 125);
        sim.radio.set_channel(0).unwrap();
        assert_eq!(sim.radio.get_channel().unwrap(), 0);
    }
}
