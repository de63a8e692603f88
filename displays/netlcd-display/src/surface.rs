//! Character surface trait
//!
//! Defines the interface for cursor-addressed character displays.

/// Surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Communication error with the display hardware
    Communication,
    /// Cursor placed outside the grid
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Radix for numeric byte output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Radix {
    /// Base 10, no padding ("7", "192")
    Decimal,
    /// Base 16, lowercase, no padding ("7", "a0")
    Hex,
}

/// Character surface trait
///
/// Provides a hardware-agnostic interface for character displays with a
/// fixed grid and a write cursor. Writes advance the cursor one column per
/// byte; what happens past the end of a row is up to the surface, but it
/// must never touch memory outside the grid.
pub trait CharSurface {
    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);

    /// Clear the entire display and home the cursor
    fn clear(&mut self) -> Result<(), SurfaceError>;

    /// Move the write cursor
    ///
    /// - `col`: Column number (0-based)
    /// - `row`: Row number (0-based)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), SurfaceError>;

    /// Write a single character code at the cursor
    fn write_byte(&mut self, byte: u8) -> Result<(), SurfaceError>;

    /// Write a run of character codes
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SurfaceError> {
        for &b in bytes {
            self.write_byte(b)?;
        }
        Ok(())
    }

    /// Write a string
    fn write_str(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.write_bytes(text.as_bytes())
    }

    /// Write a byte as a number in the given radix, without padding
    fn write_u8(&mut self, value: u8, radix: Radix) -> Result<(), SurfaceError> {
        let mut buf = [0u8; 3];
        let digits = format_u8(value, radix, &mut buf);
        self.write_bytes(digits)
    }
}

/// Render `value` into `buf`, returning the used tail
fn format_u8(value: u8, radix: Radix, buf: &mut [u8; 3]) -> &[u8] {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    let base = match radix {
        Radix::Decimal => 10,
        Radix::Hex => 16,
    };

    let mut n = value;
    let mut start = buf.len();
    loop {
        start -= 1;
        buf[start] = DIGITS[(n % base) as usize];
        n /= base;
        if n == 0 {
            break;
        }
    }
    &buf[start..]
}

impl<T: CharSurface + ?Sized> CharSurface for &mut T {
    fn dimensions(&self) -> (u8, u8) {
        (**self).dimensions()
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        (**self).clear()
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), SurfaceError> {
        (**self).set_cursor(col, row)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), SurfaceError> {
        (**self).write_byte(byte)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SurfaceError> {
        (**self).write_bytes(bytes)
    }
}
