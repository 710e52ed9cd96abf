//! A module to abstract the synchronous byte bus that carries commands to the radio.
//!
//! The radio only needs a full-duplex, byte oriented, blocking exchange.
//! [`Transport`] describes exactly that, so the driver runs the same on top of
//! a hardware SPI peripheral ([`HardwareSpi`]) or a few GPIO lines ([`BitBangSpi`]).
use embedded_hal::spi::SpiBus;

mod bitbang;
pub use bitbang::{BitBangError, BitBangSpi};

/// Errors reported by a [`Transport`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<E> {
    /// The underlying bus failed.
    Bus(E),
    /// Both buffers given to [`Transport::exchange()`] were non-empty
    /// and of different lengths.
    ///
    /// Nothing is clocked out when this is returned.
    SizeMismatch,
}

/// A blocking, full-duplex, byte-oriented bus.
///
/// Implementations are not reentrant; the caller owns the bus exclusively
/// for the duration of every call.
pub trait Transport {
    type Error;

    /// Clock out `byte` and return the byte clocked in at the same time.
    fn transfer(&mut self, byte: u8) -> Result<u8, TransportError<Self::Error>>;

    /// Exchange buffers over the bus.
    ///
    /// | `write` | `read` | behavior |
    /// |---------|--------|----------|
    /// | empty | empty | nothing is transferred |
    /// | non-empty | empty | `write` is clocked out; incoming bytes are discarded |
    /// | empty | non-empty | zeros are clocked out to fill `read` |
    /// | length N | length N | `write` is clocked out while `read` is filled |
    /// | length N | length M | [`TransportError::SizeMismatch`] |
    fn exchange(&mut self, write: &[u8], read: &mut [u8]) -> Result<(), TransportError<Self::Error>> {
        check_sizes(write, read)?;
        if read.is_empty() {
            for byte in write {
                self.transfer(*byte)?;
            }
        } else if write.is_empty() {
            for byte in read.iter_mut() {
                *byte = self.transfer(0)?;
            }
        } else {
            for (out, byte) in write.iter().zip(read.iter_mut()) {
                *byte = self.transfer(*out)?;
            }
        }
        Ok(())
    }

    /// Block until all queued transfers have left the bus.
    fn flush(&mut self) -> Result<(), TransportError<Self::Error>> {
        Ok(())
    }
}

/// Reject a pair of non-empty buffers of unequal length.
pub(crate) fn check_sizes<E>(write: &[u8], read: &[u8]) -> Result<(), TransportError<E>> {
    if !write.is_empty() && !read.is_empty() && write.len() != read.len() {
        return Err(TransportError::SizeMismatch);
    }
    Ok(())
}

/// A [`Transport`] over any hardware [`SpiBus`].
///
/// The bus must be configured for SPI mode 0 with MSB-first bit order.
/// Chip select is not handled here; the driver toggles the radio's CSN pin itself.
pub struct HardwareSpi<SPI> {
    bus: SPI,
}

impl<SPI> HardwareSpi<SPI>
where
    SPI: SpiBus<u8>,
{
    pub fn new(bus: SPI) -> Self {
        Self { bus }
    }

    /// Give back the wrapped bus.
    pub fn release(self) -> SPI {
        self.bus
    }
}

impl<SPI> Transport for HardwareSpi<SPI>
where
    SPI: SpiBus<u8>,
{
    type Error = SPI::Error;

    fn transfer(&mut self, byte: u8) -> Result<u8, TransportError<Self::Error>> {
        let mut buf = [byte];
        self.bus
            .transfer_in_place(&mut buf)
            .map_err(TransportError::Bus)?;
        Ok(buf[0])
    }

    fn exchange(&mut self, write: &[u8], read: &mut [u8]) -> Result<(), TransportError<Self::Error>> {
        check_sizes(write, read)?;
        let result = match (write.is_empty(), read.is_empty()) {
            (true, true) => Ok(()),
            (false, true) => self.bus.write(write),
            (true, false) => {
                read.fill(0);
                self.bus.transfer_in_place(read)
            }
            (false, false) => self.bus.transfer(read, write),
        };
        result.map_err(TransportError::Bus)
    }

    fn flush(&mut self) -> Result<(), TransportError<Self::Error>> {
        self.bus.flush().map_err(TransportError::Bus)
    }
}
