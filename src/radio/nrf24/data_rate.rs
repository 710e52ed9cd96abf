use super::registers;
use crate::{
    radio::{prelude::EsbDataRate, Nrf24, Nrf24Error},
    transport::Transport,
    DataRate,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

impl<BUS, DO, DELAY> EsbDataRate for Nrf24<BUS, DO, DELAY>
where
    BUS: Transport,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type DataRateErrorType = Nrf24Error<BUS::Error, DO::Error>;

    /// Get the [`DataRate`] used by the radio.
    fn get_data_rate(&mut self) -> Result<DataRate, Self::DataRateErrorType> {
        let rf_setup = self.read_register_byte(registers::RF_SETUP)?;
        Ok(DataRate::from_bits(rf_setup))
    }

    /// Set the [`DataRate`] used by the radio.
    ///
    /// [`DataRate::Kbps250`] is only supported by nRF24L01+ variants.
    fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), Self::DataRateErrorType> {
        self.update_register(registers::RF_SETUP, data_rate.into_bits(), DataRate::MASK)?;
        self._config = self._config.with_data_rate(data_rate);
        Ok(())
    }
}
