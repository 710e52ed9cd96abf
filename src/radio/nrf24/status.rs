use super::{commands, registers};
use crate::{
    radio::{prelude::EsbStatus, Nrf24, Nrf24Error},
    transport::Transport,
    StatusFlags,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

impl<BUS, DO, DELAY> EsbStatus for Nrf24<BUS, DO, DELAY>
where
    BUS: Transport,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type StatusErrorType = Nrf24Error<BUS::Error, DO::Error>;

    fn get_status_flags(&self) -> StatusFlags {
        self._status
    }

    fn set_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        // CONFIG holds masks, so the bits are inverted
        let masks = !flags.into_bits() & StatusFlags::IRQ_MASK;
        self.update_register(registers::CONFIG, masks, StatusFlags::IRQ_MASK)?;
        self._config = self
            ._config
            .with_rx_dr(flags.rx_dr())
            .with_tx_ds(flags.tx_ds())
            .with_tx_df(flags.tx_df());
        Ok(())
    }

    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        self.write_register(registers::STATUS, &[flags.into_bits() & StatusFlags::IRQ_MASK])
    }

    fn status(&mut self) -> Result<StatusFlags, Self::StatusErrorType> {
        self.send_command(commands::NOP, &[], &mut [])
    }
}
