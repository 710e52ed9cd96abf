//! This module defines the generic traits that may
//! need to imported to use radio implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use nrf24::radio::prelude::*;
//! ```

use crate::types::{CrcLength, DataRate, FifoState, PaLevel, PowerState, StatusFlags};

use super::RadioConfig;

/// A trait to represent manipulation of data pipes
/// for an ESB capable transceiver.
pub trait EsbPipe {
    type PipeErrorType;

    /// Set the RX address of a specified `pipe` (in range [0, 5]).
    ///
    /// The `address` must hold at least [`EsbPipe::get_address_width()`] bytes.
    /// Pipes 0 and 1 store that many bytes. Pipes 2 - 5 only store `address[0]`
    /// and share the remaining bytes with pipe 1, e.g.
    /// ```ignore
    /// let a = ["1Node", "2Node", "3xxxx", "4xxxx"];
    /// radio.set_rx_address(1, a[1].as_bytes())?; // address used is "2Node"
    /// radio.set_rx_address(2, a[2].as_bytes())?; // address used is "3Node"
    /// radio.set_rx_address(3, a[3].as_bytes())?; // address used is "4Node"
    /// ```
    ///
    /// This does not open the pipe. See [`EsbPipe::open_rx_pipe()`].
    fn set_rx_address(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::PipeErrorType>;

    /// Set the address used for transmitting.
    ///
    /// If auto-ack is enabled on pipe 0, the same address is written to pipe 0
    /// so that ACK packets can be received.
    fn set_tx_address(&mut self, address: &[u8]) -> Result<(), Self::PipeErrorType>;

    /// Allow a `pipe` (in range [0, 5]) to receive data when the radio is in RX mode.
    fn open_rx_pipe(&mut self, pipe: u8) -> Result<(), Self::PipeErrorType>;

    /// Stop a `pipe` (in range [0, 5]) from receiving data.
    fn close_rx_pipe(&mut self, pipe: u8) -> Result<(), Self::PipeErrorType>;

    /// Set the address width (applies to all pipes).
    ///
    /// The specified width is clamped to the range [3, 5].
    /// Addresses that were already written are not adjusted.
    fn set_address_width(&mut self, width: u8) -> Result<(), Self::PipeErrorType>;

    /// Get the currently configured address width (applied to all pipes).
    fn get_address_width(&mut self) -> Result<u8, Self::PipeErrorType>;
}

/// A trait to represent manipulation of a channel (aka frequency)
/// for an ESB capable transceiver.
pub trait EsbChannel {
    type ChannelErrorType;

    /// Set the channel (over the air frequency).
    ///
    /// The specified `channel` is clamped to the range [0, 125].
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType>;

    /// Get the channel (over the air frequency).
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType>;
}

/// A trait to represent manipulation of the status byte
/// for an ESB capable transceiver.
pub trait EsbStatus {
    type StatusErrorType;

    /// Get the [`StatusFlags`] as of the last SPI transaction.
    ///
    /// No bus activity is involved. See [`EsbStatus::status()`].
    fn get_status_flags(&self) -> StatusFlags;

    /// Configure which events assert the radio's IRQ pin.
    ///
    /// A flag set to `true` enables the corresponding event.
    fn set_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Clear the IRQ events whose flags are `true`.
    ///
    /// Use [`StatusFlags::new()`] to clear all of them.
    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Fetch the status byte from the radio (using a NOP command).
    fn status(&mut self) -> Result<StatusFlags, Self::StatusErrorType>;
}

/// A trait to represent manipulation of RX and TX FIFOs
/// for an ESB capable transceiver.
pub trait EsbFifo {
    type FifoErrorType;

    /// Flush the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Flush the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Get the state of the TX FIFO (`about_tx` is `true`) or the RX FIFO.
    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType>;

    /// Is there a payload waiting in the RX FIFO?
    fn available(&mut self) -> Result<bool, Self::FifoErrorType>;

    /// Retransmit the last payload sent.
    ///
    /// The payload is kept in the TX FIFO and resent every time the CE pin is
    /// pulsed, until the TX FIFO is written to or flushed.
    fn reuse_tx_payload(&mut self) -> Result<(), Self::FifoErrorType>;
}

/// A trait to represent manipulation of payload lengths (static or dynamic)
/// for an ESB capable transceiver.
pub trait EsbPayloadLength {
    type PayloadLengthErrorType;

    /// Set the static payload `length` of a `pipe`.
    ///
    /// Lengths above 32 are clamped to 32. A `length` of `0` is rejected.
    fn set_payload_length(&mut self, pipe: u8, length: u8) -> Result<(), Self::PayloadLengthErrorType>;

    /// Get the static payload length of a `pipe`.
    fn get_payload_length(&mut self, pipe: u8) -> Result<u8, Self::PayloadLengthErrorType>;

    /// Enable or disable dynamically sized payloads on a `pipe`.
    ///
    /// Enabling also enables auto-ack on that `pipe`. Disabling leaves auto-ack as is.
    fn set_dynamic_payload(&mut self, pipe: u8, enable: bool) -> Result<(), Self::PayloadLengthErrorType>;

    /// Are dynamically sized payloads enabled on a `pipe`?
    fn get_dynamic_payload(&self, pipe: u8) -> bool;

    /// Get the length of the payload at the top of the RX FIFO.
    ///
    /// Only meaningful with dynamic payloads enabled.
    fn get_dynamic_payload_length(&mut self) -> Result<u8, Self::PayloadLengthErrorType>;
}

/// A trait to represent manipulation of the automatic acknowledgement feature
/// for an ESB capable transceiver.
pub trait EsbAutoAck: EsbPayloadLength {
    type AutoAckErrorType;

    /// Enable or disable auto-ack on a `pipe`.
    ///
    /// Fails while compatibility mode is active.
    fn set_auto_ack(&mut self, pipe: u8, enable: bool) -> Result<(), Self::AutoAckErrorType>;

    /// Is auto-ack enabled on a `pipe`?
    fn get_auto_ack(&self, pipe: u8) -> bool;

    /// Allow ACK packets to carry payloads.
    ///
    /// Enabling also enables dynamic payloads (and auto-ack) on pipe 0.
    fn set_ack_payload(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType>;

    /// Are ACK payloads enabled?
    fn get_ack_payload(&self) -> bool;

    /// Queue a payload to be attached to the next ACK packet sent from a `pipe`.
    fn write_ack_payload(&mut self, pipe: u8, buf: &[u8]) -> Result<(), Self::AutoAckErrorType>;

    /// Allow transmissions that ask the receiver not to send an ACK packet.
    fn allow_ask_no_ack(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType>;

    /// Set the maximum number of retransmissions (clamped to [0, 15]).
    ///
    /// `0` disables automatic retransmission.
    fn set_max_retries(&mut self, count: u8) -> Result<(), Self::AutoAckErrorType>;

    /// Set the delay between retransmissions (clamped to [0, 15]).
    ///
    /// The actual delay is `250 * delay + 250` microseconds.
    fn set_retry_delay(&mut self, delay: u8) -> Result<(), Self::AutoAckErrorType>;

    /// Enter or leave compatibility mode with the legacy ShockBurst protocol.
    ///
    /// Entering disables auto-ack, dynamic payloads and ACK payloads.
    /// Leaving fails while CRC is disabled and does not restore any feature.
    fn set_compat_mode(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType>;

    /// Is compatibility mode active?
    fn get_compat_mode(&self) -> bool;
}

/// A trait to represent manipulation of Power Amplitude (PA) level
/// for an ESB capable transceiver.
pub trait EsbPaLevel {
    type PaLevelErrorType;

    /// Get the radio's PA level.
    fn get_pa_level(&mut self) -> Result<PaLevel, Self::PaLevelErrorType>;

    /// Set the radio's PA level.
    fn set_pa_level(&mut self, pa_level: PaLevel) -> Result<(), Self::PaLevelErrorType>;

    /// Set the radio's PA level from a raw step in range [0, 3].
    ///
    /// Values above `3` are clamped.
    fn set_tx_power(&mut self, power: u8) -> Result<(), Self::PaLevelErrorType> {
        self.set_pa_level(PaLevel::from(power))
    }
}

/// A trait to represent manipulation of the power state
/// for an ESB capable transceiver.
pub trait EsbPower {
    type PowerErrorType;

    /// Power down the radio (and deactivate the CE pin).
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Power up the radio and wait for its oscillator to settle.
    ///
    /// Does nothing if the radio is already powered up.
    fn power_up(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Move between [`PowerState::Standby`] and [`PowerState::Active`]
    /// by driving the CE pin.
    ///
    /// Activating fails if the radio is powered down.
    fn set_active(&mut self, active: bool) -> Result<(), Self::PowerErrorType>;

    /// The power state the radio was last put in.
    fn power_state(&self) -> PowerState;

    /// Is the radio powered up?
    fn is_powered(&self) -> bool {
        self.power_state() != PowerState::PowerDown
    }
}

/// A trait to represent manipulation of Cyclical Redundancy Checksums
/// for an ESB capable transceiver.
pub trait EsbCrcLength {
    type CrcLengthErrorType;

    /// Get the current CRC length.
    fn get_crc_length(&mut self) -> Result<CrcLength, Self::CrcLengthErrorType>;

    /// Set the CRC length in bytes.
    ///
    /// | `bytes` | result |
    /// |--------:|--------|
    /// | `0` | CRC disabled (only allowed in compatibility mode) |
    /// | `1` | 8 bit CRC |
    /// | `2` | 16 bit CRC |
    /// | other | rejected |
    fn set_crc_length(&mut self, bytes: u8) -> Result<(), Self::CrcLengthErrorType>;
}

/// A trait to represent manipulation of the data rate
/// for an ESB capable transceiver.
pub trait EsbDataRate {
    type DataRateErrorType;

    /// Get the current data rate.
    fn get_data_rate(&mut self) -> Result<DataRate, Self::DataRateErrorType>;

    /// Set the data rate.
    fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), Self::DataRateErrorType>;
}

/// A trait to represent debug output
/// for an ESB capable transceiver.
pub trait EsbDetails {
    type DetailsErrorType;

    /// Print details about the radio's configuration.
    ///
    /// This function is only meant for debugging.
    /// It prints nothing unless the `defmt` or `std` feature is enabled.
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType>;
}

pub trait EsbInit {
    type ConfigErrorType;

    /// Initialize the radio's hardware.
    ///
    /// This detects the chip variant, applies [`RadioConfig::default()`],
    /// and powers up the radio.
    fn init(&mut self) -> Result<(), Self::ConfigErrorType>;

    /// Reconfigure the radio using the given `config` object.
    ///
    /// The `config` is validated before anything is written.
    /// The radio is left powered down.
    fn configure(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType>;
}

/// A trait to represent the radio's role and payload transfers
/// for an ESB capable transceiver.
pub trait EsbRadio {
    type RadioErrorType;

    /// Make the radio a primary receiver.
    ///
    /// This does not touch the CE pin. See [`EsbPower::set_active()`].
    fn as_rx(&mut self) -> Result<(), Self::RadioErrorType>;

    /// Make the radio a primary transmitter.
    ///
    /// This does not touch the CE pin. See [`EsbPower::set_active()`].
    fn as_tx(&mut self) -> Result<(), Self::RadioErrorType>;

    /// Is the radio a primary receiver?
    fn is_rx(&self) -> bool;

    /// Put a payload in the TX FIFO.
    ///
    /// Set `ask_no_ack` to request that the receiver not acknowledge this
    /// payload (see [`EsbAutoAck::allow_ask_no_ack()`]).
    /// Payloads longer than 32 bytes are not supported by the radio.
    fn write_payload(&mut self, buf: &[u8], ask_no_ack: bool) -> Result<(), Self::RadioErrorType>;

    /// Read the payload at the top of the RX FIFO into `buf`.
    ///
    /// Returns the pipe the payload came from and the number of bytes read.
    /// The byte count is `0` if nothing was waiting.
    fn read_payload(&mut self, buf: &mut [u8]) -> Result<(u8, u8), Self::RadioErrorType>;

    /// The number of retransmissions needed by the last transmission.
    fn get_last_arc(&mut self) -> Result<u8, Self::RadioErrorType>;

    /// The number of packets lost (saturating at 15) since the counter was reset.
    fn get_lost_packets(&mut self) -> Result<u8, Self::RadioErrorType>;

    /// Reset the counter of lost packets.
    fn reset_lost_packets(&mut self) -> Result<(), Self::RadioErrorType>;
}
