use core::hint::spin_loop;

use embedded_hal::digital::{Error, ErrorKind, InputPin, OutputPin};

use super::{Transport, TransportError};

/// Describes which line of a [`BitBangSpi`] failed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitBangError {
    /// The clock output failed.
    Sck(ErrorKind),
    /// The data output failed.
    Mosi(ErrorKind),
    /// The data input failed.
    Miso(ErrorKind),
}

/// A software SPI (mode 0, MSB first) driven over three GPIO lines.
///
/// Every half clock period is stretched by a busy loop of `delay` iterations.
/// The resulting clock rate depends on the CPU, so `delay` is meant to be
/// calibrated by the caller. Only the order of edges and the settle time
/// before sampling are guaranteed.
pub struct BitBangSpi<SCK, MOSI, MISO> {
    sck: SCK,
    mosi: MOSI,
    miso: MISO,
    delay: u32,
}

impl<SCK, MOSI, MISO> BitBangSpi<SCK, MOSI, MISO>
where
    SCK: OutputPin,
    MOSI: OutputPin,
    MISO: InputPin,
{
    /// Take ownership of the bus lines and drive the clock and data outputs low.
    ///
    /// A `delay` of `0` is corrected to `1`.
    pub fn new(mut sck: SCK, mut mosi: MOSI, miso: MISO, delay: u32) -> Result<Self, BitBangError> {
        sck.set_low().map_err(|e| BitBangError::Sck(e.kind()))?;
        mosi.set_low().map_err(|e| BitBangError::Mosi(e.kind()))?;
        Ok(Self {
            sck,
            mosi,
            miso,
            delay: delay.max(1),
        })
    }

    /// The number of busy loop iterations spent per half clock period.
    pub fn delay(&self) -> u32 {
        self.delay
    }

    /// Give back the bus lines.
    pub fn release(self) -> (SCK, MOSI, MISO) {
        (self.sck, self.mosi, self.miso)
    }

    fn wait(&self) {
        for _ in 0..self.delay {
            spin_loop();
        }
    }

    fn clock_bit(&mut self, bit: bool) -> Result<bool, BitBangError> {
        self.mosi
            .set_state(bit.into())
            .map_err(|e| BitBangError::Mosi(e.kind()))?;
        self.wait();
        self.sck.set_high().map_err(|e| BitBangError::Sck(e.kind()))?;
        self.wait();
        let sampled = self.miso.is_high().map_err(|e| BitBangError::Miso(e.kind()))?;
        self.sck.set_low().map_err(|e| BitBangError::Sck(e.kind()))?;
        Ok(sampled)
    }
}

impl<SCK, MOSI, MISO> Transport for BitBangSpi<SCK, MOSI, MISO>
where
    SCK: OutputPin,
    MOSI: OutputPin,
    MISO: InputPin,
{
    type Error = BitBangError;

    fn transfer(&mut self, byte: u8) -> Result<u8, TransportError<Self::Error>> {
        let mut received = 0u8;
        for bit in (0..8).rev() {
            if self
                .clock_bit(byte & (1 << bit) != 0)
                .map_err(TransportError::Bus)?
            {
                received |= 1 << bit;
            }
        }
        Ok(received)
    }
}
