use bitfield_struct::bitfield;

use crate::{CrcLength, DataRate, PaLevel};

use super::mnemonics;

/// The CONFIG register.
///
/// The IRQ mask bits are exposed with inverted logic: `true` means the
/// event asserts the IRQ pin.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub(crate) struct Config {
    #[bits(1)]
    _padding: u8,

    #[bits(1, access = None)]
    rx_dr: bool,

    #[bits(1, access = None)]
    tx_ds: bool,

    #[bits(1, access = None)]
    tx_df: bool,

    #[bits(2, access = None, default = 3)]
    crc_length: u8,

    pub power: bool,

    pub is_rx: bool,
}

impl Config {
    pub const fn crc_length(&self) -> CrcLength {
        CrcLength::from_bits(self.into_bits())
    }

    pub fn with_crc_length(self, length: CrcLength) -> Self {
        let new_val = self.into_bits() & !CrcLength::MASK | length.into_bits();
        Self::from_bits(new_val)
    }

    const fn irq_enabled(&self, mask: u8) -> bool {
        (self.into_bits() & mask) == 0
    }

    fn with_irq(self, mask: u8, enable: bool) -> Self {
        Self::from_bits(self.into_bits() & !mask | ((!enable as u8) * mask))
    }

    pub const fn rx_dr(&self) -> bool {
        self.irq_enabled(mnemonics::MASK_RX_DR)
    }

    pub fn with_rx_dr(self, enable: bool) -> Self {
        self.with_irq(mnemonics::MASK_RX_DR, enable)
    }

    pub const fn tx_ds(&self) -> bool {
        self.irq_enabled(mnemonics::MASK_TX_DS)
    }

    pub fn with_tx_ds(self, enable: bool) -> Self {
        self.with_irq(mnemonics::MASK_TX_DS, enable)
    }

    pub const fn tx_df(&self) -> bool {
        self.irq_enabled(mnemonics::MASK_MAX_RT)
    }

    pub fn with_tx_df(self, enable: bool) -> Self {
        self.with_irq(mnemonics::MASK_MAX_RT, enable)
    }
}

/// The SETUP_RETR register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub(crate) struct SetupRetry {
    /// Auto-retransmit delay in steps of 250 microseconds (plus 250).
    #[bits(4, default = 5)]
    pub ard: u8,

    /// Auto-retransmit count.
    #[bits(4, default = 15)]
    pub arc: u8,
}

/// The RF_SETUP register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub(crate) struct RfSetup {
    /// CONT_WAVE and a reserved bit
    #[bits(2)]
    _padding: u8,

    #[bits(1, access = None)]
    rf_dr_low: bool,

    /// PLL_LOCK is a test-only bit
    #[bits(1)]
    _pll_lock: u8,

    #[bits(1, access = None)]
    rf_dr_high: bool,

    #[bits(2, access = None, default = 3)]
    pa_level: u8,

    #[bits(1, default = true)]
    pub lna_bit: bool,
}

impl RfSetup {
    pub const fn data_rate(&self) -> DataRate {
        DataRate::from_bits(self.into_bits())
    }

    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        let new_val = self.into_bits() & !DataRate::MASK;
        Self::from_bits(new_val | data_rate.into_bits())
    }

    pub const fn pa_level(&self) -> PaLevel {
        PaLevel::from_bits(self.into_bits())
    }

    pub fn with_pa_level(self, level: PaLevel) -> Self {
        let new_val = self.into_bits() & !PaLevel::MASK;
        Self::from_bits(new_val | level.into_bits())
    }
}

/// The FEATURE register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub(crate) struct Feature {
    #[bits(5)]
    _padding: u8,

    pub dynamic_payloads: bool,

    pub ack_payloads: bool,

    pub ask_no_ack: bool,
}

impl Feature {
    pub const REG_MASK: u8 = 0x07;
}
