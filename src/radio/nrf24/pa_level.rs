use super::registers;
use crate::{
    radio::{prelude::EsbPaLevel, Nrf24, Nrf24Error},
    transport::Transport,
    PaLevel,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

impl<BUS, DO, DELAY> EsbPaLevel for Nrf24<BUS, DO, DELAY>
where
    BUS: Transport,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PaLevelErrorType = Nrf24Error<BUS::Error, DO::Error>;

    fn get_pa_level(&mut self) -> Result<PaLevel, Self::PaLevelErrorType> {
        let rf_setup = self.read_register_byte(registers::RF_SETUP)?;
        Ok(PaLevel::from_bits(rf_setup))
    }

    fn set_pa_level(&mut self, pa_level: PaLevel) -> Result<(), Self::PaLevelErrorType> {
        self.update_register(registers::RF_SETUP, pa_level.into_bits(), PaLevel::MASK)?;
        self._config = self._config.with_pa_level(pa_level);
        Ok(())
    }
}
