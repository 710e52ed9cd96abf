//! A simulated nRF24L01 used by unit tests.
//!
//! The chip implements [`Transport`] and decodes commands the way the radio does:
//! the first byte after CSN goes low is the opcode (answered with STATUS), the
//! following bytes are the data phase. Register writes are filtered through
//! [`registers::writable_mask()`], so reading a register back shows what the
//! silicon would keep.
extern crate std;

use core::{cell::RefCell, convert::Infallible};
use std::{rc::Rc, vec::Vec};

use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_mock::eh1::delay::NoopDelay;

use crate::{
    radio::{commands, registers, Nrf24},
    transport::{Transport, TransportError},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimError;

struct ChipState {
    regs: [u8; 0x20],
    addresses: [[u8; 5]; 7],
    selected: bool,
    opcode: Option<u8>,
    index: usize,
    ce: bool,
    fail_next: bool,
    stuck_miso: Option<u8>,
    legacy: bool,
    activated: bool,
    rx_width: u8,
    rx_payload: Vec<u8>,
    tx_payloads: Vec<Vec<u8>>,
    commands: Vec<u8>,
}

impl ChipState {
    fn new() -> Self {
        let mut regs = [0u8; 0x20];
        regs[registers::CONFIG as usize] = 0x08;
        regs[registers::EN_AA as usize] = 0x3F;
        regs[registers::EN_RXADDR as usize] = 0x03;
        regs[registers::SETUP_AW as usize] = 0x03;
        regs[registers::SETUP_RETR as usize] = 0x03;
        regs[registers::RF_CH as usize] = 0x02;
        regs[registers::RF_SETUP as usize] = 0x0F;
        regs[registers::STATUS as usize] = 0x0E;
        regs[registers::FIFO_STATUS as usize] = 0x11;
        Self {
            regs,
            addresses: [
                [0xE7; 5],
                [0xC2; 5],
                [0xC3, 0, 0, 0, 0],
                [0xC4, 0, 0, 0, 0],
                [0xC5, 0, 0, 0, 0],
                [0xC6, 0, 0, 0, 0],
                [0xE7; 5],
            ],
            selected: false,
            opcode: None,
            index: 0,
            ce: false,
            fail_next: false,
            stuck_miso: None,
            legacy: false,
            activated: false,
            rx_width: 0,
            rx_payload: Vec::new(),
            tx_payloads: Vec::new(),
            commands: Vec::new(),
        }
    }

    fn address_slot(register: u8) -> Option<usize> {
        match register {
            0x0A..=0x10 => Some((register - registers::RX_ADDR_P0) as usize),
            _ => None,
        }
    }

    /// Pipes 2 - 5 only store one byte.
    fn address_len(slot: usize) -> usize {
        if (2..6).contains(&slot) {
            1
        } else {
            5
        }
    }

    /// A legacy nRF24L01 hides FEATURE and DYNPD until ACTIVATE is sent.
    fn is_locked(&self, register: u8) -> bool {
        self.legacy && !self.activated && (register == registers::FEATURE || register == registers::DYNPD)
    }

    fn read_reg(&self, register: u8, index: usize) -> u8 {
        if self.is_locked(register) {
            return 0;
        }
        match Self::address_slot(register) {
            Some(slot) if index < Self::address_len(slot) => self.addresses[slot][index],
            Some(_) => 0,
            None if index == 0 => self.regs[register as usize],
            None => 0,
        }
    }

    fn write_reg(&mut self, register: u8, index: usize, byte: u8) {
        if let Some(slot) = Self::address_slot(register) {
            if index < Self::address_len(slot) {
                self.addresses[slot][index] = byte;
            }
            return;
        }
        if index > 0 || self.is_locked(register) {
            return;
        }
        let mask = registers::writable_mask(register);
        let reg = &mut self.regs[register as usize];
        if register == registers::STATUS {
            // write 1 to clear
            *reg &= !(byte & mask);
        } else {
            *reg = *reg & !mask | (byte & mask);
        }
    }

    fn begin(&mut self, opcode: u8) -> u8 {
        self.opcode = Some(opcode);
        self.index = 0;
        self.commands.push(opcode);
        match opcode {
            commands::FLUSH_RX => {
                self.rx_payload.clear();
                self.rx_width = 0;
                self.regs[registers::FIFO_STATUS as usize] |= 1;
            }
            commands::FLUSH_TX => self.tx_payloads.clear(),
            commands::W_TX_PAYLOAD | commands::W_TX_PAYLOAD_NO_ACK => self.tx_payloads.push(Vec::new()),
            op if op & 0xF8 == commands::W_ACK_PAYLOAD => self.tx_payloads.push(Vec::new()),
            _ => (),
        }
        self.regs[registers::STATUS as usize]
    }

    fn data(&mut self, opcode: u8, byte: u8) -> u8 {
        let index = self.index;
        self.index += 1;
        match opcode {
            0x00..=0x1F => self.read_reg(opcode, index),
            0x20..=0x3F => {
                self.write_reg(opcode & commands::REGISTER_MASK, index, byte);
                0
            }
            commands::R_RX_PL_WID => self.rx_width,
            commands::ACTIVATE => {
                if byte == 0x73 && self.legacy {
                    self.activated = !self.activated;
                }
                0
            }
            commands::R_RX_PAYLOAD => self.rx_payload.get(index).copied().unwrap_or(0),
            op if op == commands::W_TX_PAYLOAD
                || op == commands::W_TX_PAYLOAD_NO_ACK
                || op & 0xF8 == commands::W_ACK_PAYLOAD =>
            {
                if let Some(payload) = self.tx_payloads.last_mut() {
                    payload.push(byte);
                }
                0
            }
            _ => 0,
        }
    }
}

/// A handle to a simulated chip. Clones share the same chip.
#[derive(Clone)]
pub struct SimChip(Rc<RefCell<ChipState>>);

impl SimChip {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(ChipState::new())))
    }

    /// Overwrite a register (bypassing the writable mask).
    pub fn set_register(&self, register: u8, value: &[u8]) {
        let mut state = self.0.borrow_mut();
        match ChipState::address_slot(register) {
            Some(slot) => state.addresses[slot][..value.len()].copy_from_slice(value),
            None => state.regs[register as usize] = value[0],
        }
    }

    pub fn register(&self, register: u8) -> u8 {
        self.0.borrow().read_reg(register, 0)
    }

    pub fn address(&self, register: u8) -> [u8; 5] {
        let state = self.0.borrow();
        let slot = ChipState::address_slot(register).expect("not an address register");
        state.addresses[slot]
    }

    /// Put a payload in the RX FIFO as received on `pipe`.
    ///
    /// `width` is what R_RX_PL_WID reports.
    pub fn receive(&self, pipe: u8, width: u8, payload: &[u8]) {
        let mut state = self.0.borrow_mut();
        state.rx_width = width;
        state.rx_payload = payload.to_vec();
        let status = state.regs[registers::STATUS as usize] & !0x0E;
        state.regs[registers::STATUS as usize] = status | 0x40 | (pipe << 1);
        state.regs[registers::FIFO_STATUS as usize] &= !1;
    }

    /// Behave like a legacy (non-plus) nRF24L01.
    pub fn legacy(self, activated: bool) -> Self {
        {
            let mut state = self.0.borrow_mut();
            state.legacy = true;
            state.activated = activated;
        }
        self
    }

    /// Make every byte clocked in read `value`, as if MISO was stuck.
    pub fn stick_miso(&self, value: u8) {
        self.0.borrow_mut().stuck_miso = Some(value);
    }

    pub fn fail_next_transfer(&self) {
        self.0.borrow_mut().fail_next = true;
    }

    pub fn is_selected(&self) -> bool {
        self.0.borrow().selected
    }

    pub fn ce(&self) -> bool {
        self.0.borrow().ce
    }

    pub fn commands(&self) -> Vec<u8> {
        self.0.borrow().commands.clone()
    }

    /// How many times a command was sent.
    pub fn count(&self, opcode: u8) -> usize {
        self.0.borrow().commands.iter().filter(|op| **op == opcode).count()
    }

    pub fn tx_payloads(&self) -> Vec<Vec<u8>> {
        self.0.borrow().tx_payloads.clone()
    }
}

impl Transport for SimChip {
    type Error = SimError;

    fn transfer(&mut self, byte: u8) -> Result<u8, TransportError<SimError>> {
        let mut state = self.0.borrow_mut();
        if state.fail_next {
            state.fail_next = false;
            return Err(TransportError::Bus(SimError));
        }
        assert!(state.selected, "transfer while CSN is high");
        let response = match state.opcode {
            None => state.begin(byte),
            Some(opcode) => state.data(opcode, byte),
        };
        Ok(state.stuck_miso.unwrap_or(response))
    }
}

enum PinRole {
    Ce,
    Csn,
}

/// The CE or CSN line of a [`SimChip`].
pub struct SimPin {
    role: PinRole,
    chip: SimChip,
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut state = self.chip.0.borrow_mut();
        match self.role {
            PinRole::Ce => state.ce = false,
            PinRole::Csn => {
                state.selected = true;
                state.opcode = None;
            }
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut state = self.chip.0.borrow_mut();
        match self.role {
            PinRole::Ce => state.ce = true,
            PinRole::Csn => {
                state.selected = false;
                state.opcode = None;
            }
        }
        Ok(())
    }
}

/// A driver wired to a [`SimChip`].
pub struct SimRadio {
    pub radio: Nrf24<SimChip, SimPin, NoopDelay>,
    pub chip: SimChip,
}

impl SimRadio {
    pub fn new() -> Self {
        Self::with_chip(SimChip::new())
    }

    pub fn with_chip(chip: SimChip) -> Self {
        let ce_pin = SimPin {
            role: PinRole::Ce,
            chip: chip.clone(),
        };
        let csn_pin = SimPin {
            role: PinRole::Csn,
            chip: chip.clone(),
        };
        let radio = Nrf24::new(ce_pin, csn_pin, chip.clone(), NoopDelay);
        Self { radio, chip }
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::SimRadio;
    use crate::radio::{commands, registers};
    use std::vec;

    #[test]
    fn status_byte_and_masks() {
        let mut sim = SimRadio::new();
        let status = sim.radio.send_command(commands::NOP, &[], &mut []).unwrap();
        assert_eq!(status.into_bits(), 0x0E);
        sim.radio.write_register(registers::RF_CH, &[0xFF]).unwrap();
        assert_eq!(sim.chip.register(registers::RF_CH), 0x7F);
        sim.chip.set_register(registers::STATUS, &[0x7E]);
        sim.radio.write_register(registers::STATUS, &[0x20]).unwrap();
        assert_eq!(sim.chip.register(registers::STATUS), 0x5E);
        assert_eq!(
            sim.chip.commands(),
            vec![commands::NOP, commands::W_REGISTER | registers::RF_CH, commands::W_REGISTER | registers::STATUS]
        );
    }

    #[test]
    fn short_addresses() {
        let mut sim = SimRadio::new();
        sim.radio.write_register(registers::RX_ADDR_P0 + 3, &[1, 2, 3]).unwrap();
        assert_eq!(sim.chip.address(registers::RX_ADDR_P0 + 3), [1, 0, 0, 0, 0]);
    }
}
