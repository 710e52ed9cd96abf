use super::{commands, registers};
use crate::{
    radio::{prelude::EsbFifo, Nrf24, Nrf24Error},
    transport::Transport,
    FifoState,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

impl<BUS, DO, DELAY> EsbFifo for Nrf24<BUS, DO, DELAY>
where
    BUS: Transport,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type FifoErrorType = Nrf24Error<BUS::Error, DO::Error>;

    /// Use this to discard all 3 layers in the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.send_command(commands::FLUSH_RX, &[], &mut [])?;
        Ok(())
    }

    /// Use this to discard all 3 layers in the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.send_command(commands::FLUSH_TX, &[], &mut [])?;
        Ok(())
    }

    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType> {
        let fifo_status = self.read_register_byte(registers::FIFO_STATUS)?;
        let offset = about_tx as u8 * 4;
        match (fifo_status >> offset) & 3 {
            1 => Ok(FifoState::Empty),
            2 => Ok(FifoState::Full),
            _ => Ok(FifoState::Occupied),
        }
    }

    fn available(&mut self) -> Result<bool, Self::FifoErrorType> {
        Ok(self.read_register_byte(registers::FIFO_STATUS)? & 1 == 0)
    }

    /// The last transmitted payload stays in the TX FIFO and is sent again
    /// every time the CE pin is pulsed, until the TX FIFO is flushed or written.
    fn reuse_tx_payload(&mut self) -> Result<(), Self::FifoErrorType> {
        self.send_command(commands::REUSE_TX_PL, &[], &mut [])?;
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::{commands, registers, EsbFifo, FifoState};
    use crate::{
        radio::prelude::{EsbAutoAck, EsbRadio},
        sim::SimRadio,
        test::{mk_radio, SpiFrames},
    };
    extern crate std;
    use std::vec;

    #[test]
    pub fn available() {
        let frames = SpiFrames::new()
            .read(registers::FIFO_STATUS, &[2])
            // empty RX FIFO
            .read(registers::FIFO_STATUS, &[1]);
        let mut mocks = mk_radio(&[], &frames);
        assert!(mocks.0.available().unwrap());
        assert!(!mocks.0.available().unwrap());
        mocks.done();
    }

    fn get_fifo_state_parametrized(raw: u8, about_tx: bool, expected: FifoState) {
        let frames = SpiFrames::new().read(registers::FIFO_STATUS, &[raw]);
        let mut mocks = mk_radio(&[], &frames);
        assert_eq!(mocks.0.get_fifo_state(about_tx).unwrap(), expected);
        mocks.done();
    }

    #[test]
    fn tx_fifo_empty() {
        get_fifo_state_parametrized(0x11, true, FifoState::Empty);
    }

    #[test]
    fn tx_fifo_full() {
        get_fifo_state_parametrized(0x21, true, FifoState::Full);
    }

    #[test]
    fn tx_fifo_occupied() {
        get_fifo_state_parametrized(0x01, true, FifoState::Occupied);
    }

    #[test]
    fn rx_fifo_full() {
        get_fifo_state_parametrized(0x12, false, FifoState::Full);
    }

    #[test]
    fn rx_fifo_occupied() {
        get_fifo_state_parametrized(0x10, false, FifoState::Occupied);
    }

    #[test]
    fn opcode_only_commands() {
        let frames = SpiFrames::new()
            .command(commands::FLUSH_RX)
            .command(commands::FLUSH_TX)
            .command(commands::REUSE_TX_PL);
        let mut mocks = mk_radio(&[], &frames);
        mocks.0.flush_rx().unwrap();
        mocks.0.flush_tx().unwrap();
        mocks.0.reuse_tx_payload().unwrap();
        mocks.done();
    }

    #[test]
    fn flush_rx_empties_fifo() {
        let mut sim = SimRadio::new();
        sim.chip.receive(1, 4, &[1, 2, 3, 4]);
        assert!(sim.radio.available().unwrap());
        sim.radio.flush_rx().unwrap();
        assert_eq!(sim.chip.count(commands::FLUSH_RX), 1);
        assert!(!sim.radio.available().unwrap());
    }

    #[test]
    fn flush_tx_drops_staged_payloads() {
        let mut sim = SimRadio::new();
        sim.radio.write_payload(b"ping", false).unwrap();
        sim.radio.write_payload(b"no ack", true).unwrap();
        sim.radio.write_ack_payload(1, &[0xA5]).unwrap();
        assert_eq!(
            sim.chip.tx_payloads(),
            vec![b"ping".to_vec(), b"no ack".to_vec(), vec![0xA5]]
        );
        sim.radio.flush_tx().unwrap();
        assert!(sim.chip.tx_payloads().is_empty());
    }
}
