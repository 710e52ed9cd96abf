use super::registers;
use crate::{
    radio::{config::PIPES, prelude::EsbPipe, Nrf24, Nrf24Error},
    transport::Transport,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

impl<BUS, DO, DELAY> EsbPipe for Nrf24<BUS, DO, DELAY>
where
    BUS: Transport,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PipeErrorType = Nrf24Error<BUS::Error, DO::Error>;

    fn set_rx_address(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::PipeErrorType> {
        if pipe >= PIPES {
            return Err(Nrf24Error::InvalidPipe);
        }
        let width = self._config.address_width() as usize;
        if address.len() < width {
            return Err(Nrf24Error::InvalidAddressLength);
        }
        if pipe < 2 {
            self.write_register(registers::RX_ADDR_P0 + pipe, &address[..width])?;
        } else {
            // only the LSB is stored for pipes 2 - 5
            self.write_register(registers::RX_ADDR_P0 + pipe, &address[..1])?;
        }
        self._config = self._config.with_rx_address_stored(pipe, &address[..width]);
        Ok(())
    }

    fn set_tx_address(&mut self, address: &[u8]) -> Result<(), Self::PipeErrorType> {
        let width = self._config.address_width() as usize;
        if address.len() < width {
            return Err(Nrf24Error::InvalidAddressLength);
        }
        self.write_register(registers::TX_ADDR, &address[..width])?;
        self._config = self._config.with_tx_address(&address[..width]);
        if self._config.auto_ack_pipe(0) {
            // ACK packets are received on pipe 0
            self.write_register(registers::RX_ADDR_P0, &address[..width])?;
            self._config = self._config.with_rx_address_stored(0, &address[..width]);
        }
        Ok(())
    }

    fn open_rx_pipe(&mut self, pipe: u8) -> Result<(), Self::PipeErrorType> {
        if pipe >= PIPES {
            return Err(Nrf24Error::InvalidPipe);
        }
        self.set_register_bit(registers::EN_RXADDR, 1 << pipe)?;
        self._config = self._config.with_rx_pipe_open(pipe);
        Ok(())
    }

    fn close_rx_pipe(&mut self, pipe: u8) -> Result<(), Self::PipeErrorType> {
        if pipe >= PIPES {
            return Err(Nrf24Error::InvalidPipe);
        }
        self.clear_register_bit(registers::EN_RXADDR, 1 << pipe)?;
        self._config = self._config.close_rx_pipe(pipe);
        Ok(())
    }

    fn set_address_width(&mut self, width: u8) -> Result<(), Self::PipeErrorType> {
        let width = width.clamp(3, 5);
        self.update_register(registers::SETUP_AW, width - 2, 0x03)?;
        self._config = self._config.with_address_width(width);
        Ok(())
    }

    fn get_address_width(&mut self) -> Result<u8, Self::PipeErrorType> {
        let setup_aw = self.read_register_byte(registers::SETUP_AW)? & 0x03;
        // 0 is an illegal encoding
        Ok(setup_aw.max(1) + 2)
    }
}
