use super::features::{EnablePlan, EsbFeature};
use crate::radio::nrf24::bit_fields::{Config, Feature, RfSetup, SetupRetry};
use crate::{CrcLength, DataRate, PaLevel};

/// The number of RX pipes on the nRF24L01.
pub(crate) const PIPES: u8 = 6;
/// The largest payload the radio's FIFOs can hold.
pub(crate) const MAX_PAYLOAD: u8 = 32;

/// A struct to contain configuration about pipe addresses.
///
/// Pipes 0 and 1 hold full addresses. Pipes 2 - 5 only hold their least
/// significant byte and borrow the upper bytes from pipe 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeAddresses {
    tx_address: [u8; 5],
    pipe0: [u8; 5],
    pipe1: [u8; 5],
    lsb: [u8; 4],
    rx_pipes_enabled: u8,
}

impl Default for PipeAddresses {
    fn default() -> Self {
        Self {
            tx_address: [0xE7; 5],
            pipe0: [0xE7; 5],
            pipe1: [0xC2; 5],
            lsb: [0xC3, 0xC4, 0xC5, 0xC6],
            rx_pipes_enabled: 3,
        }
    }
}

impl PipeAddresses {
    pub fn set_tx_address(&mut self, address: &[u8]) {
        let len = address.len().min(5);
        self.tx_address[..len].copy_from_slice(&address[..len]);
    }

    /// Store an RX `address` for the given `pipe`.
    ///
    /// Does nothing if `pipe` is out of range or `address` is empty.
    pub fn set_rx_address(&mut self, pipe: u8, address: &[u8]) {
        let len = address.len().min(5);
        if len == 0 {
            return;
        }
        match pipe {
            0 => self.pipe0[..len].copy_from_slice(&address[..len]),
            1 => self.pipe1[..len].copy_from_slice(&address[..len]),
            2..=5 => self.lsb[pipe as usize - 2] = address[0],
            _ => (),
        }
    }

    pub fn set_pipe_enabled(&mut self, pipe: u8, enable: bool) {
        if pipe < PIPES {
            self.rx_pipes_enabled = self.rx_pipes_enabled & !(1 << pipe) | ((enable as u8) << pipe);
        }
    }

    pub const fn is_pipe_enabled(&self, pipe: u8) -> bool {
        pipe < PIPES && (self.rx_pipes_enabled & (1 << pipe)) > 0
    }

    pub const fn rx_pipes_enabled(&self) -> u8 {
        self.rx_pipes_enabled
    }

    /// Copy the TX address into `address` (up to 5 bytes).
    pub fn tx_address(&self, address: &mut [u8]) {
        let len = address.len().min(5);
        address[..len].copy_from_slice(&self.tx_address[..len]);
    }

    /// Copy the full RX address of a `pipe` into `address` (up to 5 bytes).
    ///
    /// For pipes 2 - 5, the upper bytes come from pipe 1.
    pub fn rx_address(&self, pipe: u8, address: &mut [u8]) {
        let len = address.len().min(5);
        match pipe {
            0 => address[..len].copy_from_slice(&self.pipe0[..len]),
            1 => address[..len].copy_from_slice(&self.pipe1[..len]),
            2..=5 => {
                if len > 0 {
                    address[0] = self.lsb[pipe as usize - 2];
                    address[1..len].copy_from_slice(&self.pipe1[1..len]);
                }
            }
            _ => (),
        }
    }
}

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`RadioConfig::default`] constructor, then mutate the object accordingly.
/// ```
/// use nrf24::radio::RadioConfig;
/// let config = RadioConfig::default().with_channel(42).with_dynamic_payload(1, true);
/// assert_eq!(config.channel(), 42);
/// // dynamic payloads imply auto-ack on the same pipe
/// assert!(config.auto_ack_pipe(1));
/// ```
///
/// The driver also keeps one of these as a mirror of what it last wrote to the radio.
/// See [`Nrf24::config()`](fn@crate::radio::Nrf24::config).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadioConfig {
    pub(crate) config_reg: Config,
    pub(crate) auto_retries: SetupRetry,
    pub(crate) rf_setup: RfSetup,
    pub(crate) feature: Feature,
    address_width: u8,
    channel: u8,
    auto_ack: u8,
    dynamic_payloads: u8,
    payload_lengths: [u8; PIPES as usize],
    compat_mode: bool,
    pipes: PipeAddresses,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::channel()`] | `76` |
    /// | [`RadioConfig::address_width()`] | `5` |
    /// | [`RadioConfig::pa_level()`] | [`PaLevel::Max`] |
    /// | [`RadioConfig::lna_bit()`] | `true` |
    /// | [`RadioConfig::crc_length()`] | [`CrcLength::Bit16`] |
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Mbps1`] |
    /// | [`RadioConfig::payload_length()`] | `32` (all pipes) |
    /// | [`RadioConfig::dynamic_payloads()`] | `0` (disabled for all pipes) |
    /// | [`RadioConfig::auto_ack()`] | `0x3F` (enabled for pipes 0 - 5) |
    /// | [`RadioConfig::ack_payloads()`] | `false` |
    /// | [`RadioConfig::ask_no_ack()`] | `false` |
    /// | [`RadioConfig::compat_mode()`] | `false` |
    /// | [`RadioConfig::retry_delay()`] | `5` |
    /// | [`RadioConfig::max_retries()`] | `15` |
    /// | [`RadioConfig::tx_address()`] | `[0xE7; 5]` |
    /// | [`RadioConfig::rx_address()`] | pipe 0: `[0xE7; 5]`, pipe 1: `[0xC2; 5]`, pipes 2 - 5: `0xC3` - `0xC6` |
    /// | [`RadioConfig::is_rx_pipe_enabled()`] | pipes 0 and 1 |
    /// | [`RadioConfig::rx_dr()`] | `true` |
    /// | [`RadioConfig::tx_ds()`] | `true` |
    /// | [`RadioConfig::tx_df()`] | `true` |
    fn default() -> Self {
        Self {
            /*
               - all events enabled for IRQ pin
               - 16 bit CRC
               - powered down
               - TX role
            */
            config_reg: Config::default(),
            /*
               - 5 * 250 + 250 = 1500 us delay between attempts
               - 15 max attempts
            */
            auto_retries: SetupRetry::default(),
            /*
                - 1 Mbps data rate
                - Max PA level
                - LNA bit set
            */
            rf_setup: RfSetup::default(),
            feature: Feature::default(),
            address_width: 5,
            channel: 76,
            auto_ack: 0x3F,
            dynamic_payloads: 0,
            payload_lengths: [MAX_PAYLOAD; PIPES as usize],
            compat_mode: false,
            pipes: PipeAddresses::default(),
        }
    }
}

impl RadioConfig {
    /// Returns the value set by [`RadioConfig::with_crc_length()`].
    pub const fn crc_length(&self) -> CrcLength {
        self.config_reg.crc_length()
    }

    /// The Cyclical Redundancy Checksum (CRC) length.
    ///
    /// [`CrcLength::Disabled`] is only accepted by
    /// [`EsbInit::configure()`](fn@crate::radio::prelude::EsbInit::configure)
    /// together with [`RadioConfig::with_compat_mode()`].
    pub fn with_crc_length(self, length: CrcLength) -> Self {
        Self {
            config_reg: self.config_reg.with_crc_length(length),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_data_rate()`].
    pub const fn data_rate(&self) -> DataRate {
        self.rf_setup.data_rate()
    }

    /// The Data Rate (over the air).
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self {
            rf_setup: self.rf_setup.with_data_rate(data_rate),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_pa_level()`].
    pub const fn pa_level(&self) -> PaLevel {
        self.rf_setup.pa_level()
    }

    /// The Power Amplitude (PA) level.
    pub fn with_pa_level(self, level: PaLevel) -> Self {
        Self {
            rf_setup: self.rf_setup.with_pa_level(level),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_lna_bit()`].
    pub const fn lna_bit(&self) -> bool {
        self.rf_setup.lna_bit()
    }

    /// The raw `LNA_HCURR` bit of the RF_SETUP register.
    ///
    /// See [`Nrf24::set_lna_bit()`](fn@crate::radio::Nrf24::set_lna_bit)
    /// about the meaning of this bit.
    pub fn with_lna_bit(self, value: bool) -> Self {
        Self {
            rf_setup: self.rf_setup.with_lna_bit(value),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_address_width()`].
    pub const fn address_width(&self) -> u8 {
        self.address_width
    }

    /// The address width (in bytes) applied to all pipes.
    ///
    /// This value is clamped to range [3, 5].
    pub fn with_address_width(self, width: u8) -> Self {
        Self {
            address_width: width.clamp(3, 5),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Set the channel (over the air frequency).
    ///
    /// This value is clamped to range [0, 125].
    /// The radio's frequency can be determined by the following equation:
    /// ```text
    /// frequency (in MHz) = channel + 2400
    /// ```
    pub fn with_channel(self, value: u8) -> Self {
        Self {
            channel: value.min(125),
            ..self
        }
    }

    /// The auto-retry feature's delay (set via [`RadioConfig::with_retry_delay()`]).
    pub const fn retry_delay(&self) -> u8 {
        self.auto_retries.ard()
    }

    /// The auto-retry feature's delay in steps of 250 microseconds.
    ///
    /// The actual delay is `250 * delay + 250` microseconds.
    /// This value is clamped to range [0, 15].
    pub fn with_retry_delay(self, delay: u8) -> Self {
        Self {
            auto_retries: self.auto_retries.with_ard(delay.min(15)),
            ..self
        }
    }

    /// The auto-retry feature's count (set via [`RadioConfig::with_max_retries()`]).
    pub const fn max_retries(&self) -> u8 {
        self.auto_retries.arc()
    }

    /// The maximum number of retransmissions. `0` disables auto-retry.
    ///
    /// This value is clamped to range [0, 15].
    pub fn with_max_retries(self, count: u8) -> Self {
        Self {
            auto_retries: self.auto_retries.with_arc(count.min(15)),
            ..self
        }
    }

    /// Get the value set by [`RadioConfig::with_rx_dr()`].
    pub const fn rx_dr(&self) -> bool {
        self.config_reg.rx_dr()
    }

    /// Enable or disable the "RX Data Ready" event triggering the radio's IRQ.
    pub fn with_rx_dr(self, enable: bool) -> Self {
        Self {
            config_reg: self.config_reg.with_rx_dr(enable),
            ..self
        }
    }

    /// Get the value set by [`RadioConfig::with_tx_ds()`].
    pub const fn tx_ds(&self) -> bool {
        self.config_reg.tx_ds()
    }

    /// Enable or disable the "TX Data Sent" event triggering the radio's IRQ.
    pub fn with_tx_ds(self, enable: bool) -> Self {
        Self {
            config_reg: self.config_reg.with_tx_ds(enable),
            ..self
        }
    }

    /// Get the value set by [`RadioConfig::with_tx_df()`].
    pub const fn tx_df(&self) -> bool {
        self.config_reg.tx_df()
    }

    /// Enable or disable the "TX Data Failed" event triggering the radio's IRQ.
    pub fn with_tx_df(self, enable: bool) -> Self {
        Self {
            config_reg: self.config_reg.with_tx_df(enable),
            ..self
        }
    }

    /// Is the primary role RX?
    pub const fn is_rx(&self) -> bool {
        self.config_reg.is_rx()
    }

    pub(crate) fn with_rx_role(self, is_rx: bool) -> Self {
        Self {
            config_reg: self.config_reg.with_is_rx(is_rx),
            ..self
        }
    }

    /// The auto-ack feature's pipe bitmap (bit N for pipe N).
    pub const fn auto_ack(&self) -> u8 {
        self.auto_ack
    }

    /// Is the auto-ack feature enabled for the given `pipe`?
    pub const fn auto_ack_pipe(&self, pipe: u8) -> bool {
        pipe < PIPES && (self.auto_ack & (1 << pipe)) > 0
    }

    /// Set the auto-ack feature for all pipes at once (bit N for pipe N).
    ///
    /// Pipes with dynamic payloads keep their auto-ack bit.
    pub fn with_auto_ack(self, pipes: u8) -> Self {
        Self {
            auto_ack: (pipes | self.dynamic_payloads) & 0x3F,
            ..self
        }
    }

    /// Enable or disable the auto-ack feature on a single `pipe`.
    ///
    /// Out of range pipes are ignored. A pipe with dynamic payloads keeps its
    /// auto-ack bit.
    pub fn with_auto_ack_pipe(self, pipe: u8, enable: bool) -> Self {
        if pipe >= PIPES || (!enable && self.dynamic_payload_pipe(pipe)) {
            return self;
        }
        if enable {
            return self.with_feature(EsbFeature::AutoAck, pipe);
        }
        Self {
            auto_ack: self.auto_ack & !(1 << pipe),
            ..self
        }
    }

    /// The dynamic payloads feature's pipe bitmap (bit N for pipe N).
    pub const fn dynamic_payloads(&self) -> u8 {
        self.dynamic_payloads
    }

    /// Is the dynamic payloads feature enabled for the given `pipe`?
    pub const fn dynamic_payload_pipe(&self, pipe: u8) -> bool {
        pipe < PIPES && (self.dynamic_payloads & (1 << pipe)) > 0
    }

    /// Enable or disable dynamic payloads on a single `pipe`.
    ///
    /// Enabling also enables auto-ack on that `pipe`.
    /// Disabling the last pipe with dynamic payloads also disables ACK payloads.
    /// Out of range pipes are ignored.
    pub fn with_dynamic_payload(self, pipe: u8, enable: bool) -> Self {
        if pipe >= PIPES {
            return self;
        }
        if enable {
            return self.with_feature(EsbFeature::DynamicPayload, pipe);
        }
        let dynamic_payloads = self.dynamic_payloads & !(1 << pipe);
        let mut feature = self.feature;
        if dynamic_payloads == 0 {
            feature = feature.with_dynamic_payloads(false).with_ack_payloads(false);
        }
        Self {
            dynamic_payloads,
            feature,
            ..self
        }
    }

    /// Get the value set by [`RadioConfig::with_ack_payloads()`].
    pub const fn ack_payloads(&self) -> bool {
        self.feature.ack_payloads()
    }

    /// Allow ACK packets to carry payloads.
    ///
    /// Enabling also enables dynamic payloads (and auto-ack) on pipe 0.
    pub fn with_ack_payloads(self, enable: bool) -> Self {
        if enable {
            return self.with_feature(EsbFeature::AckPayload, 0);
        }
        Self {
            feature: self.feature.with_ack_payloads(false),
            ..self
        }
    }

    /// Get the value set by [`RadioConfig::with_ask_no_ack()`].
    pub const fn ask_no_ack(&self) -> bool {
        self.feature.ask_no_ack()
    }

    /// Allow transmissions to ask the receiver not to acknowledge them.
    pub fn with_ask_no_ack(self, enable: bool) -> Self {
        Self {
            feature: self.feature.with_ask_no_ack(enable),
            ..self
        }
    }

    /// Get the value set by [`RadioConfig::with_compat_mode()`].
    pub const fn compat_mode(&self) -> bool {
        self.compat_mode
    }

    /// Compatibility with the legacy nRF2401 ShockBurst protocol.
    ///
    /// Enabling disables auto-ack, dynamic payloads, and ACK payloads on all pipes.
    /// Disabling does not restore them.
    pub fn with_compat_mode(self, enable: bool) -> Self {
        if !enable {
            return Self {
                compat_mode: false,
                ..self
            };
        }
        Self {
            compat_mode: true,
            auto_ack: 0,
            dynamic_payloads: 0,
            feature: self
                .feature
                .with_dynamic_payloads(false)
                .with_ack_payloads(false),
            ..self
        }
    }

    /// The static payload length of a `pipe`.
    ///
    /// Out of range pipes yield `0`.
    pub const fn payload_length(&self, pipe: u8) -> u8 {
        if pipe < PIPES {
            self.payload_lengths[pipe as usize]
        } else {
            0
        }
    }

    /// The static payload length used by a `pipe` (when dynamic payloads are disabled).
    ///
    /// The value is clamped to range [1, 32]. Out of range pipes are ignored.
    pub fn with_payload_length(self, pipe: u8, length: u8) -> Self {
        let mut payload_lengths = self.payload_lengths;
        if pipe < PIPES {
            payload_lengths[pipe as usize] = length.clamp(1, MAX_PAYLOAD);
        }
        Self {
            payload_lengths,
            ..self
        }
    }

    /// Copy the TX address into `address` (up to 5 bytes).
    pub fn tx_address(&self, address: &mut [u8]) {
        self.pipes.tx_address(address);
    }

    /// Set the TX address (up to 5 bytes are used).
    pub fn with_tx_address(self, address: &[u8]) -> Self {
        let mut pipes = self.pipes;
        pipes.set_tx_address(address);
        Self { pipes, ..self }
    }

    /// Copy the RX address of a `pipe` into `address` (up to 5 bytes).
    ///
    /// See [`PipeAddresses::rx_address()`].
    pub fn rx_address(&self, pipe: u8, address: &mut [u8]) {
        self.pipes.rx_address(pipe, address);
    }

    /// Set the RX address of a `pipe` and open the `pipe` for receiving.
    ///
    /// Pipes 2 - 5 only use the first byte of `address`.
    pub fn with_rx_address(self, pipe: u8, address: &[u8]) -> Self {
        let mut pipes = self.pipes;
        pipes.set_rx_address(pipe, address);
        pipes.set_pipe_enabled(pipe, true);
        Self { pipes, ..self }
    }

    /// Store the RX address of a `pipe` without opening it.
    pub(crate) fn with_rx_address_stored(self, pipe: u8, address: &[u8]) -> Self {
        let mut pipes = self.pipes;
        pipes.set_rx_address(pipe, address);
        Self { pipes, ..self }
    }

    /// Is the given `pipe` open for receiving?
    pub const fn is_rx_pipe_enabled(&self, pipe: u8) -> bool {
        self.pipes.is_pipe_enabled(pipe)
    }

    pub(crate) const fn rx_pipes_enabled(&self) -> u8 {
        self.pipes.rx_pipes_enabled()
    }

    /// Open a `pipe` for receiving using its current address.
    pub fn with_rx_pipe_open(self, pipe: u8) -> Self {
        let mut pipes = self.pipes;
        pipes.set_pipe_enabled(pipe, true);
        Self { pipes, ..self }
    }

    /// Close a `pipe` so it no longer receives.
    pub fn close_rx_pipe(self, pipe: u8) -> Self {
        let mut pipes = self.pipes;
        pipes.set_pipe_enabled(pipe, false);
        Self { pipes, ..self }
    }

    /// Can this configuration be applied as a whole?
    ///
    /// Returns `false` if
    /// - CRC is disabled outside of compatibility mode
    /// - compatibility mode is combined with auto-ack, dynamic payloads, or ACK payloads
    /// - dynamic payloads are enabled on a pipe without auto-ack
    pub fn is_consistent(&self) -> bool {
        let crc_ok = self.compat_mode || self.crc_length() != CrcLength::Disabled;
        let compat_ok = !self.compat_mode
            || (self.auto_ack == 0 && self.dynamic_payloads == 0 && !self.ack_payloads());
        let dpl_ok = self.dynamic_payloads & !self.auto_ack == 0;
        crc_ok && compat_ok && dpl_ok
    }

    pub(crate) fn with_feature(self, feature: EsbFeature, pipe: u8) -> Self {
        EnablePlan::new(feature, pipe)
            .steps()
            .iter()
            .fold(self, |config, &(step, pipe)| config.with_feature_step(step, pipe))
    }

    /// Mark a single feature as enabled, without checking its prerequisites.
    pub(crate) fn with_feature_step(self, feature: EsbFeature, pipe: u8) -> Self {
        let bit = 1 << pipe;
        match feature {
            EsbFeature::AutoAck => Self {
                auto_ack: self.auto_ack | bit,
                ..self
            },
            EsbFeature::DynamicPayload => Self {
                dynamic_payloads: self.dynamic_payloads | bit,
                feature: self.feature.with_dynamic_payloads(true),
                ..self
            },
            EsbFeature::AckPayload => Self {
                feature: self.feature.with_ack_payloads(true),
                ..self
            },
        }
    }
}
