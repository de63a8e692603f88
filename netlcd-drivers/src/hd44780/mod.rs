//! HD44780 character LCD support
//!
//! Command set and DDRAM addressing shared by every way of wiring the
//! controller. The only transport implemented is a 74HC595 shift register
//! (three GPIOs), see [`ShiftLcd`].

pub mod shift;

pub use shift::ShiftLcd;

/// HD44780 instruction set
#[allow(dead_code)]
pub mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_CGRAM_ADDR: u8 = 0x40;
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    // Entry mode flags
    pub const ENTRY_INCREMENT: u8 = 0x02;
    pub const ENTRY_SHIFT: u8 = 0x01;

    // Display control flags
    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_ON: u8 = 0x02;
    pub const BLINK_ON: u8 = 0x01;

    // Function set flags
    pub const EIGHT_BIT: u8 = 0x10;
    pub const TWO_LINE: u8 = 0x08;
    pub const FONT_5X10: u8 = 0x04;
}

/// Execution time of most instructions, with margin
pub const COMMAND_DELAY_US: u32 = 50;

/// Execution time of clear and home
pub const CLEAR_DELAY_US: u32 = 2_000;

/// DDRAM bytes behind each of the controller's two lines
pub const DDRAM_LINE_LEN: u8 = 40;

/// Most rows any HD44780 module maps
pub const MAX_ROWS: u8 = 4;

/// Clamp a geometry to what the controller can address
///
/// Four-line modules split each DDRAM line across two rows, which halves
/// the usable width.
pub const fn clamp_geometry(cols: u8, rows: u8) -> (u8, u8) {
    let rows = if rows > MAX_ROWS { MAX_ROWS } else { rows };
    let max_cols = if rows > 2 {
        DDRAM_LINE_LEN / 2
    } else {
        DDRAM_LINE_LEN
    };
    let cols = if cols > max_cols { max_cols } else { cols };
    (cols, rows)
}

/// DDRAM address of the first cell of `row`
///
/// Rows 2 and 3 of four-line modules continue lines 0 and 1 of the
/// controller's two-line memory, right after the visible columns.
pub const fn row_offset(row: u8, cols: u8) -> u8 {
    match row {
        0 => 0x00,
        1 => 0x40,
        2 => cols,
        _ => 0x40u8.saturating_add(cols),
    }
}

/// Function set instruction for 4-bit operation
pub const fn function_set(rows: u8) -> u8 {
    if rows > 1 {
        cmd::FUNCTION_SET | cmd::TWO_LINE
    } else {
        cmd::FUNCTION_SET
    }
}
