use super::{commands, mnemonics, registers};
use crate::{
    radio::{
        config::{MAX_PAYLOAD, PIPES},
        features::EsbFeature,
        prelude::EsbPayloadLength,
        Nrf24, Nrf24Error,
    },
    transport::Transport,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

impl<BUS, DO, DELAY> EsbPayloadLength for Nrf24<BUS, DO, DELAY>
where
    BUS: Transport,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PayloadLengthErrorType = Nrf24Error<BUS::Error, DO::Error>;

    /// Lengths above 32 are clamped. A `length` of `0` is rejected.
    fn set_payload_length(&mut self, pipe: u8, length: u8) -> Result<(), Self::PayloadLengthErrorType> {
        if pipe >= PIPES {
            return Err(Nrf24Error::InvalidPipe);
        }
        if length == 0 {
            return Err(Nrf24Error::InvalidConfig);
        }
        let length = length.min(MAX_PAYLOAD);
        self.write_register(registers::RX_PW_P0 + pipe, &[length])?;
        self._config = self._config.with_payload_length(pipe, length);
        Ok(())
    }

    fn get_payload_length(&mut self, pipe: u8) -> Result<u8, Self::PayloadLengthErrorType> {
        if pipe >= PIPES {
            return Err(Nrf24Error::InvalidPipe);
        }
        Ok(self.read_register_byte(registers::RX_PW_P0 + pipe)? & 0x3F)
    }

    /// Enabling also enables auto-ack on the `pipe`.
    ///
    /// Disabling the last pipe (as reported by the radio's DYNPD register)
    /// also disables the dynamic payloads feature and ACK payloads.
    fn set_dynamic_payload(&mut self, pipe: u8, enable: bool) -> Result<(), Self::PayloadLengthErrorType> {
        if pipe >= PIPES {
            return Err(Nrf24Error::InvalidPipe);
        }
        if enable {
            return self.enable_feature(EsbFeature::DynamicPayload, pipe);
        }
        let dynpd = self.clear_register_bit(registers::DYNPD, 1 << pipe)?;
        if dynpd & 0x3F == 0 {
            self.clear_register_bit(
                registers::FEATURE,
                mnemonics::EN_DPL | mnemonics::EN_ACK_PAY,
            )?;
        }
        self._config = self._config.with_dynamic_payload(pipe, false);
        Ok(())
    }

    fn get_dynamic_payload(&self, pipe: u8) -> bool {
        self._config.dynamic_payload_pipe(pipe)
    }

    /// The value is not validated; a width above 32 means the RX FIFO
    /// holds a corrupt payload.
    fn get_dynamic_payload_length(&mut self) -> Result<u8, Self::PayloadLengthErrorType> {
        let mut buf = [0u8];
        self.send_command(commands::R_RX_PL_WID, &[], &mut buf)?;
        Ok(buf[0])
    }
}
