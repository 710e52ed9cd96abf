#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`Nrf24::new()`](fn@crate::radio::Nrf24::new)
//! - [`Nrf24::init()`](radio/struct.Nrf24.html#method.init)
//! - [`Nrf24::configure()`](radio/struct.Nrf24.html#method.configure)
//! - [`Nrf24::as_rx()`](radio/struct.Nrf24.html#method.as_rx)
//! - [`Nrf24::as_tx()`](radio/struct.Nrf24.html#method.as_tx)
//! - [`Nrf24::set_active()`](radio/struct.Nrf24.html#method.set_active)
//! - [`Nrf24::set_rx_address()`](radio/struct.Nrf24.html#method.set_rx_address)
//! - [`Nrf24::set_tx_address()`](radio/struct.Nrf24.html#method.set_tx_address)
//! - [`Nrf24::open_rx_pipe()`](radio/struct.Nrf24.html#method.open_rx_pipe)
//! - [`Nrf24::close_rx_pipe()`](radio/struct.Nrf24.html#method.close_rx_pipe)
//! - [`Nrf24::available()`](radio/struct.Nrf24.html#method.available)
//! - [`Nrf24::read_payload()`](radio/struct.Nrf24.html#method.read_payload)
//! - [`Nrf24::write_payload()`](radio/struct.Nrf24.html#method.write_payload)
//! - [`Nrf24::set_channel()`](radio/struct.Nrf24.html#method.set_channel)
//! - [`Nrf24::get_channel()`](radio/struct.Nrf24.html#method.get_channel)
//!
//! ## Advanced API
//!
//! - [`Nrf24::write_ack_payload()`](radio/struct.Nrf24.html#method.write_ack_payload)
//! - [`Nrf24::reuse_tx_payload()`](radio/struct.Nrf24.html#method.reuse_tx_payload)
//! - [`Nrf24::get_fifo_state()`](radio/struct.Nrf24.html#method.get_fifo_state)
//! - [`Nrf24::clear_status_flags()`](radio/struct.Nrf24.html#method.clear_status_flags)
//! - [`Nrf24::status()`](radio/struct.Nrf24.html#method.status)
//! - [`Nrf24::get_status_flags()`](radio/struct.Nrf24.html#method.get_status_flags)
//! - [`Nrf24::flush_rx()`](radio/struct.Nrf24.html#method.flush_rx)
//! - [`Nrf24::flush_tx()`](radio/struct.Nrf24.html#method.flush_tx)
//! - [`Nrf24::rpd()`](fn@crate::radio::Nrf24::rpd)
//! - [`Nrf24::get_last_arc()`](radio/struct.Nrf24.html#method.get_last_arc)
//! - [`Nrf24::get_lost_packets()`](radio/struct.Nrf24.html#method.get_lost_packets)
//! - [`Nrf24::reset_lost_packets()`](radio/struct.Nrf24.html#method.reset_lost_packets)
//! - [`Nrf24::get_dynamic_payload_length()`](radio/struct.Nrf24.html#method.get_dynamic_payload_length)
//! - [`Nrf24::send_command()`](fn@crate::radio::Nrf24::send_command)
//! - [`Nrf24::read_register()`](fn@crate::radio::Nrf24::read_register)
//! - [`Nrf24::write_register()`](fn@crate::radio::Nrf24::write_register)
//! - [`Nrf24::update_register()`](fn@crate::radio::Nrf24::update_register)
//! - [`Nrf24::verify_register()`](fn@crate::radio::Nrf24::verify_register)
//!
//! ## Configuration API
//!
//! - [`Nrf24::set_status_flags()`](radio/struct.Nrf24.html#method.set_status_flags)
//! - [`Nrf24::set_auto_ack()`](radio/struct.Nrf24.html#method.set_auto_ack)
//! - [`Nrf24::set_max_retries()`](radio/struct.Nrf24.html#method.set_max_retries)
//! - [`Nrf24::set_retry_delay()`](radio/struct.Nrf24.html#method.set_retry_delay)
//! - [`Nrf24::set_dynamic_payload()`](radio/struct.Nrf24.html#method.set_dynamic_payload)
//! - [`Nrf24::set_ack_payload()`](radio/struct.Nrf24.html#method.set_ack_payload)
//! - [`Nrf24::allow_ask_no_ack()`](radio/struct.Nrf24.html#method.allow_ask_no_ack)
//! - [`Nrf24::set_compat_mode()`](radio/struct.Nrf24.html#method.set_compat_mode)
//! - [`Nrf24::set_address_width()`](radio/struct.Nrf24.html#method.set_address_width)
//! - [`Nrf24::set_payload_length()`](radio/struct.Nrf24.html#method.set_payload_length)
//! - [`Nrf24::set_data_rate()`](radio/struct.Nrf24.html#method.set_data_rate)
//! - [`Nrf24::set_pa_level()`](radio/struct.Nrf24.html#method.set_pa_level)
//! - [`Nrf24::set_tx_power()`](radio/struct.Nrf24.html#method.set_tx_power)
//! - [`Nrf24::set_lna_bit()`](fn@crate::radio::Nrf24::set_lna_bit)
//! - [`Nrf24::set_crc_length()`](radio/struct.Nrf24.html#method.set_crc_length)
//! - [`Nrf24::power_up()`](radio/struct.Nrf24.html#method.power_up)
//! - [`Nrf24::power_down()`](radio/struct.Nrf24.html#method.power_down)
//! - [`Nrf24::power_state()`](radio/struct.Nrf24.html#method.power_state)
//! - [`Nrf24::is_plus_variant()`](fn@crate::radio::Nrf24::is_plus_variant)
//!
#![no_std]

mod types;
pub use types::{CrcLength, DataRate, FifoState, PaLevel, PowerState, StatusFlags};
pub mod radio;
pub mod transport;

#[cfg(test)]
mod sim;
