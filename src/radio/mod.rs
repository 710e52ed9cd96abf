//! A module to encapsulate all things related to radio operation.
pub mod prelude;

mod nrf24;
pub use nrf24::{commands, mnemonics, registers, Nrf24, Nrf24Error};

mod config;
pub use config::{PipeAddresses, RadioConfig};

mod features;
