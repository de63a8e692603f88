//! HD44780 over a 74HC595 shift register
//!
//! Drives the LCD in 4-bit mode through three GPIOs. Every nibble is
//! shifted into the register MSB first and latched twice: once with E high
//! and once with E low, which clocks the nibble into the controller.
//!
//! Register outputs:
//!
//! ```text
//! Q7  Q6  Q5  Q4  Q3  Q2  Q1  Q0
//! BL  D7  D6  D5  D4  E   RS  -
//! ```
//!
//! ```ignore
//! let mut lcd = ShiftLcd::new(data, clock, latch, Delay, 20, 4);
//! lcd.init()?;
//! lcd.set_cursor(0, 1)?;
//! lcd.write_str("hello")?;
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use netlcd_display::{CharSurface, SurfaceError};

use super::{clamp_geometry, cmd, function_set, row_offset, CLEAR_DELAY_US, COMMAND_DELAY_US};

/// Register select bit (high = data)
pub const BIT_RS: u8 = 1 << 1;

/// Enable strobe bit
pub const BIT_E: u8 = 1 << 2;

/// Position of D4 in the register
pub const DATA_SHIFT: u8 = 3;

/// Backlight transistor bit
pub const BIT_BACKLIGHT: u8 = 1 << 7;

/// Power-on settle time before the first instruction
const POWER_ON_DELAY_MS: u32 = 50;

/// HD44780 LCD behind a 74HC595
pub struct ShiftLcd<D, C, L, T> {
    /// Serial data (SER)
    data: D,
    /// Shift clock (SRCLK)
    clock: C,
    /// Storage latch (RCLK)
    latch: L,
    delay: T,
    cols: u8,
    rows: u8,
    /// Cursor column as tracked on this side
    col: u8,
    backlight: bool,
    initialized: bool,
}

impl<D, C, L, T> ShiftLcd<D, C, L, T>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
    T: DelayNs,
{
    /// Create a new driver
    ///
    /// Nothing is sent until `init()` is called. A geometry larger than the
    /// controller can address is clamped; `dimensions()` reports the result.
    pub fn new(data: D, clock: C, latch: L, delay: T, cols: u8, rows: u8) -> Self {
        let (cols, rows) = clamp_geometry(cols, rows);
        Self {
            data,
            clock,
            latch,
            delay,
            cols,
            rows,
            col: 0,
            backlight: true,
            initialized: false,
        }
    }

    /// Run the 4-bit initialization sequence and clear the display
    pub fn init(&mut self) -> Result<(), SurfaceError> {
        self.delay.delay_ms(POWER_ON_DELAY_MS);

        // The controller may be in 8-bit mode or mid-nibble; three 0x3
        // nibbles resynchronize it before switching to 4-bit.
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(150);
        self.write_nibble(0x02, false)?;

        self.command(function_set(self.rows))?;
        self.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON)?;
        self.command(cmd::ENTRY_MODE_SET | cmd::ENTRY_INCREMENT)?;
        self.command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_us(CLEAR_DELAY_US);

        self.col = 0;
        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::debug!("HD44780 initialized ({}x{})", self.cols, self.rows);

        Ok(())
    }

    /// Switch the backlight
    ///
    /// Takes effect immediately by latching the register without a strobe.
    pub fn set_backlight(&mut self, on: bool) -> Result<(), SurfaceError> {
        self.backlight = on;
        let bits = self.backlight_bit();
        self.shift_out(bits)
    }

    /// Check if the backlight is on
    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// Check if `init()` has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Give back the pins and delay
    pub fn release(self) -> (D, C, L, T) {
        (self.data, self.clock, self.latch, self.delay)
    }

    /// Send an instruction
    fn command(&mut self, value: u8) -> Result<(), SurfaceError> {
        self.write_nibble(value >> 4, false)?;
        self.write_nibble(value & 0x0f, false)?;
        self.delay.delay_us(COMMAND_DELAY_US);
        Ok(())
    }

    /// Send a character code
    fn data(&mut self, value: u8) -> Result<(), SurfaceError> {
        self.write_nibble(value >> 4, true)?;
        self.write_nibble(value & 0x0f, true)?;
        self.delay.delay_us(COMMAND_DELAY_US);
        Ok(())
    }

    /// Clock one nibble into the controller
    fn write_nibble(&mut self, nibble: u8, rs: bool) -> Result<(), SurfaceError> {
        let mut bits = ((nibble & 0x0f) << DATA_SHIFT) | self.backlight_bit();
        if rs {
            bits |= BIT_RS;
        }

        self.shift_out(bits | BIT_E)?;
        self.delay.delay_us(1);
        self.shift_out(bits)
    }

    /// Shift a byte into the register and latch it onto the outputs
    fn shift_out(&mut self, byte: u8) -> Result<(), SurfaceError> {
        for bit in (0..8).rev() {
            let level = PinState::from(byte & (1 << bit) != 0);
            self.data.set_state(level).map_err(|_| SurfaceError::Communication)?;
            self.clock.set_high().map_err(|_| SurfaceError::Communication)?;
            self.clock.set_low().map_err(|_| SurfaceError::Communication)?;
        }
        self.latch.set_high().map_err(|_| SurfaceError::Communication)?;
        self.latch.set_low().map_err(|_| SurfaceError::Communication)
    }

    fn backlight_bit(&self) -> u8 {
        if self.backlight {
            BIT_BACKLIGHT
        } else {
            0
        }
    }

    fn ensure_initialized(&self) -> Result<(), SurfaceError> {
        if self.initialized {
            Ok(())
        } else {
            Err(SurfaceError::NotInitialized)
        }
    }
}

impl<D, C, L, T> CharSurface for ShiftLcd<D, C, L, T>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
    T: DelayNs,
{
    fn dimensions(&self) -> (u8, u8) {
        (self.cols, self.rows)
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.ensure_initialized()?;
        self.command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_us(CLEAR_DELAY_US);
        self.col = 0;
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), SurfaceError> {
        self.ensure_initialized()?;
        if col >= self.cols || row >= self.rows {
            return Err(SurfaceError::InvalidCoordinates);
        }
        self.command(cmd::SET_DDRAM_ADDR | (row_offset(row, self.cols) + col))?;
        self.col = col;
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), SurfaceError> {
        self.ensure_initialized()?;
        // Past the last column the controller would spill into another
        // row's memory
        if self.col >= self.cols {
            return Ok(());
        }
        self.data(byte)?;
        self.col += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use std::rc::Rc;

    /// Simulated 74HC595: records every byte latched onto its outputs
    #[derive(Default)]
    struct Register {
        ser: bool,
        shift: u8,
        latched: Vec<u8>,
    }

    #[derive(Clone, Copy)]
    enum Line {
        Ser,
        Clock,
        Latch,
    }

    struct SimPin {
        reg: Rc<RefCell<Register>>,
        line: Line,
    }

    impl ErrorType for SimPin {
        type Error = Infallible;
    }

    impl OutputPin for SimPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            if let Line::Ser = self.line {
                self.reg.borrow_mut().ser = false;
            }
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            let mut reg = self.reg.borrow_mut();
            match self.line {
                Line::Ser => reg.ser = true,
                // Rising edges shift and latch
                Line::Clock => reg.shift = (reg.shift << 1) | reg.ser as u8,
                Line::Latch => {
                    let value = reg.shift;
                    reg.latched.push(value);
                }
            }
            Ok(())
        }
    }

    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl OutputPin for BrokenPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    #[derive(Default)]
    struct NoDelay {
        total_ns: u64,
    }

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    type SimLcd = ShiftLcd<SimPin, SimPin, SimPin, NoDelay>;

    fn lcd(cols: u8, rows: u8) -> (SimLcd, Rc<RefCell<Register>>) {
        let reg = Rc::new(RefCell::new(Register::default()));
        let pin = |line| SimPin {
            reg: Rc::clone(&reg),
            line,
        };
        let lcd = ShiftLcd::new(
            pin(Line::Ser),
            pin(Line::Clock),
            pin(Line::Latch),
            NoDelay::default(),
            cols,
            rows,
        );
        (lcd, reg)
    }

    /// Latched bytes for one transfer: two nibbles, each strobed
    fn transfer(value: u8, rs: bool) -> [u8; 4] {
        let base = BIT_BACKLIGHT | if rs { BIT_RS } else { 0 };
        let hi = base | ((value >> 4) << DATA_SHIFT);
        let lo = base | ((value & 0x0f) << DATA_SHIFT);
        [hi | BIT_E, hi, lo | BIT_E, lo]
    }

    fn ready_lcd(cols: u8, rows: u8) -> (SimLcd, Rc<RefCell<Register>>) {
        let (mut lcd, reg) = lcd(cols, rows);
        lcd.init().unwrap();
        reg.borrow_mut().latched.clear();
        (lcd, reg)
    }

    #[test]
    fn test_writes_before_init_rejected() {
        let (mut lcd, reg) = lcd(20, 4);
        assert_eq!(lcd.clear(), Err(SurfaceError::NotInitialized));
        assert_eq!(lcd.write_byte(b'a'), Err(SurfaceError::NotInitialized));
        assert!(reg.borrow().latched.is_empty());
    }

    #[test]
    fn test_init_sequence() {
        let (mut lcd, reg) = lcd(20, 4);
        lcd.init().unwrap();
        assert!(lcd.is_initialized());

        let latched = reg.borrow().latched.clone();
        let nibble = |n: u8| BIT_BACKLIGHT | (n << DATA_SHIFT);

        // Three 0x3 resync nibbles, then 0x2 for 4-bit mode
        assert_eq!(latched[0], nibble(0x3) | BIT_E);
        assert_eq!(latched[1], nibble(0x3));
        assert_eq!(latched[4], nibble(0x3) | BIT_E);
        assert_eq!(latched[6], nibble(0x2) | BIT_E);
        assert_eq!(latched[7], nibble(0x2));

        // Function set, display on, entry mode, clear
        let mut expected = Vec::new();
        for value in [0x28, 0x0c, 0x06, 0x01] {
            expected.extend_from_slice(&transfer(value, false));
        }
        assert_eq!(&latched[8..], expected.as_slice());
    }

    #[test]
    fn test_data_sets_register_select() {
        let (mut lcd, reg) = ready_lcd(20, 4);
        lcd.write_byte(b'A').unwrap();
        assert_eq!(reg.borrow().latched, transfer(b'A', true));
    }

    #[test]
    fn test_cursor_addresses_ddram_rows() {
        let (mut lcd, reg) = ready_lcd(20, 4);
        lcd.set_cursor(3, 2).unwrap();
        assert_eq!(reg.borrow().latched, transfer(0x80 | (0x14 + 3), false));
    }

    #[test]
    fn test_cursor_out_of_bounds() {
        let (mut lcd, reg) = ready_lcd(16, 2);
        assert_eq!(lcd.set_cursor(16, 0), Err(SurfaceError::InvalidCoordinates));
        assert_eq!(lcd.set_cursor(0, 2), Err(SurfaceError::InvalidCoordinates));
        assert!(reg.borrow().latched.is_empty());
    }

    #[test]
    fn test_oversized_geometry_clamped() {
        let (mut lcd, reg) = ready_lcd(100, 4);
        assert_eq!(lcd.dimensions(), (20, 4));
        assert_eq!(lcd.set_cursor(99, 3), Err(SurfaceError::InvalidCoordinates));
        assert!(reg.borrow().latched.is_empty());

        lcd.set_cursor(19, 3).unwrap();
        assert_eq!(reg.borrow().latched, transfer(0x80 | 0x67, false));
    }

    #[test]
    fn test_overflow_dropped() {
        let (mut lcd, reg) = ready_lcd(4, 1);
        lcd.write_str("abcdef").unwrap();
        assert_eq!(reg.borrow().latched.len(), 4 * 4);

        // Repositioning re-enables output
        lcd.set_cursor(0, 0).unwrap();
        lcd.write_byte(b'z').unwrap();
        assert_eq!(reg.borrow().latched.len(), 4 * 4 + 8);
    }

    #[test]
    fn test_backlight_off_clears_bit() {
        let (mut lcd, reg) = ready_lcd(20, 4);
        lcd.set_backlight(false).unwrap();
        assert!(!lcd.backlight());
        assert_eq!(reg.borrow().latched, [0u8]);

        lcd.write_byte(b'A').unwrap();
        let latched = reg.borrow().latched.clone();
        assert!(latched[1..].iter().all(|b| b & BIT_BACKLIGHT == 0));
    }

    #[test]
    fn test_pin_failure_maps_to_communication() {
        let mut lcd = ShiftLcd::new(BrokenPin, BrokenPin, BrokenPin, NoDelay::default(), 20, 4);
        assert_eq!(lcd.init(), Err(SurfaceError::Communication));
        assert!(!lcd.is_initialized());
    }

    #[test]
    fn test_init_waits_for_power_on() {
        let (mut lcd, _reg) = lcd(20, 4);
        lcd.init().unwrap();
        let (_, _, _, delay) = lcd.release();
        assert!(delay.total_ns >= 50_000_000);
    }
}
