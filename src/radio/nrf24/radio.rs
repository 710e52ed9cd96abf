use super::{commands, mnemonics, registers};
use crate::{
    radio::{
        config::MAX_PAYLOAD,
        prelude::{EsbFifo, EsbPayloadLength, EsbRadio, EsbStatus},
        Nrf24, Nrf24Error,
    },
    transport::Transport,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

impl<BUS, DO, DELAY> EsbRadio for Nrf24<BUS, DO, DELAY>
where
    BUS: Transport,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type RadioErrorType = Nrf24Error<BUS::Error, DO::Error>;

    fn as_rx(&mut self) -> Result<(), Self::RadioErrorType> {
        self.set_register_bit(registers::CONFIG, mnemonics::PRIM_RX)?;
        self._config = self._config.with_rx_role(true);
        Ok(())
    }

    fn as_tx(&mut self) -> Result<(), Self::RadioErrorType> {
        self.clear_register_bit(registers::CONFIG, mnemonics::PRIM_RX)?;
        self._config = self._config.with_rx_role(false);
        Ok(())
    }

    fn is_rx(&self) -> bool {
        self._config.is_rx()
    }

    fn write_payload(&mut self, buf: &[u8], ask_no_ack: bool) -> Result<(), Self::RadioErrorType> {
        let opcode = if ask_no_ack {
            commands::W_TX_PAYLOAD_NO_ACK
        } else {
            commands::W_TX_PAYLOAD
        };
        self.send_command(opcode, buf, &mut [])?;
        Ok(())
    }

    /// The payload length is taken from the cached configuration: pipes with
    /// dynamic payloads ask the radio, other pipes use their static length.
    ///
    /// A corrupt dynamic payload length (above 32) flushes the RX FIFO and
    /// reads nothing.
    fn read_payload(&mut self, buf: &mut [u8]) -> Result<(u8, u8), Self::RadioErrorType> {
        let status = self.status()?;
        let Some(pipe) = status.pending_pipe() else {
            return Ok((status.rx_pipe(), 0));
        };
        let length = if self._config.dynamic_payload_pipe(pipe) {
            let width = self.get_dynamic_payload_length()?;
            if width > MAX_PAYLOAD {
                #[cfg(feature = "defmt")]
                defmt::warn!("Discarding RX FIFO: invalid payload width {}", width);
                self.flush_rx()?;
                return Ok((pipe, 0));
            }
            width
        } else {
            self._config.payload_length(pipe)
        };
        let count = (length as usize).min(buf.len());
        if count > 0 {
            self.send_command(commands::R_RX_PAYLOAD, &[], &mut buf[..count])?;
        }
        Ok((pipe, count as u8))
    }

    fn get_last_arc(&mut self) -> Result<u8, Self::RadioErrorType> {
        Ok(self.read_register_byte(registers::OBSERVE_TX)? & 0x0F)
    }

    fn get_lost_packets(&mut self) -> Result<u8, Self::RadioErrorType> {
        Ok(self.read_register_byte(registers::OBSERVE_TX)? >> 4)
    }

    /// Writing the RF_CH register resets the lost packets counter.
    fn reset_lost_packets(&mut self) -> Result<(), Self::RadioErrorType> {
        let channel = self.read_register_byte(registers::RF_CH)?;
        self.write_register(registers::RF_CH, &[channel])
    }
}
