//! In-memory character grid
//!
//! A `CharSurface` backed by a plain byte array. Used by host tests to
//! inspect rendered output and usable as a shadow buffer on hardware.

use heapless::String;

use crate::surface::{CharSurface, SurfaceError};

/// Blank cell value
const BLANK: u8 = b' ';

/// Fixed-size character grid
///
/// Cells hold raw character codes. The cursor advances one column per
/// write; bytes written past the end of a row are dropped rather than
/// wrapped, matching how HD44780 rows are addressed.
#[derive(Clone)]
pub struct CharGrid<const COLS: usize, const ROWS: usize> {
    /// Cell contents, row-major
    cells: [[u8; COLS]; ROWS],
    /// Cursor column (may equal COLS once a row is full)
    col: usize,
    /// Cursor row
    row: usize,
    /// Incremented on every mutating call
    revision: u32,
}

impl<const COLS: usize, const ROWS: usize> Default for CharGrid<COLS, ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const COLS: usize, const ROWS: usize> CharGrid<COLS, ROWS> {
    /// Create a new blank grid
    pub const fn new() -> Self {
        Self {
            cells: [[BLANK; COLS]; ROWS],
            col: 0,
            row: 0,
            revision: 0,
        }
    }

    /// Raw cells of a row
    pub fn row_bytes(&self, row: usize) -> Option<&[u8]> {
        self.cells.get(row).map(|r| r.as_slice())
    }

    /// Content of a row with trailing blanks trimmed
    ///
    /// Non-printable character codes are shown as `?`.
    pub fn line(&self, row: usize) -> String<COLS> {
        let mut line = String::new();
        let Some(cells) = self.cells.get(row) else {
            return line;
        };

        let used = cells
            .iter()
            .rposition(|&b| b != BLANK)
            .map_or(0, |i| i + 1);
        for &b in &cells[..used] {
            let ch = if b.is_ascii_graphic() || b == BLANK {
                b as char
            } else {
                '?'
            };
            // Capacity equals COLS, so this cannot overflow
            let _ = line.push(ch);
        }
        line
    }

    /// Check whether every cell is blank
    pub fn is_blank(&self) -> bool {
        self.cells.iter().flatten().all(|&b| b == BLANK)
    }

    /// Current cursor position as (column, row)
    pub fn cursor(&self) -> (usize, usize) {
        (self.col, self.row)
    }

    /// Number of mutating calls seen so far
    ///
    /// Comparing revisions across a period tells whether anything was
    /// written to the surface in between.
    pub fn revision(&self) -> u32 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<const COLS: usize, const ROWS: usize> CharSurface for CharGrid<COLS, ROWS> {
    fn dimensions(&self) -> (u8, u8) {
        (COLS.min(u8::MAX as usize) as u8, ROWS.min(u8::MAX as usize) as u8)
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        for row in &mut self.cells {
            row.fill(BLANK);
        }
        self.col = 0;
        self.row = 0;
        self.touch();
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), SurfaceError> {
        if col as usize >= COLS || row as usize >= ROWS {
            return Err(SurfaceError::InvalidCoordinates);
        }
        self.col = col as usize;
        self.row = row as usize;
        self.touch();
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), SurfaceError> {
        self.touch();
        if let Some(cell) = self
            .cells
            .get_mut(self.row)
            .and_then(|r| r.get_mut(self.col))
        {
            *cell = byte;
            self.col += 1;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl<const COLS: usize, const ROWS: usize> defmt::Format for CharGrid<COLS, ROWS> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "CharGrid[");
        for row in 0..ROWS {
            if row > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", self.line(row).as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Radix;

    #[test]
    fn test_new_grid_is_blank() {
        let grid: CharGrid<20, 4> = CharGrid::new();
        assert!(grid.is_blank());
        assert_eq!(grid.dimensions(), (20, 4));
        assert_eq!(grid.revision(), 0);
    }

    #[test]
    fn test_write_at_cursor() {
        let mut grid: CharGrid<8, 2> = CharGrid::new();
        grid.set_cursor(2, 1).unwrap();
        grid.write_str("hi").unwrap();

        assert_eq!(grid.line(0).as_str(), "");
        assert_eq!(grid.line(1).as_str(), "  hi");
        assert_eq!(grid.cursor(), (4, 1));
    }

    #[test]
    fn test_overflow_is_dropped_not_wrapped() {
        let mut grid: CharGrid<4, 2> = CharGrid::new();
        grid.write_str("abcdefgh").unwrap();

        assert_eq!(grid.line(0).as_str(), "abcd");
        assert_eq!(grid.line(1).as_str(), "");
    }

    #[test]
    fn test_cursor_out_of_bounds() {
        let mut grid: CharGrid<4, 2> = CharGrid::new();
        assert_eq!(grid.set_cursor(4, 0), Err(SurfaceError::InvalidCoordinates));
        assert_eq!(grid.set_cursor(0, 2), Err(SurfaceError::InvalidCoordinates));
        assert!(grid.set_cursor(3, 1).is_ok());
    }

    #[test]
    fn test_clear_resets_cells_and_cursor() {
        let mut grid: CharGrid<4, 2> = CharGrid::new();
        grid.set_cursor(1, 1).unwrap();
        grid.write_str("xy").unwrap();
        grid.clear().unwrap();

        assert!(grid.is_blank());
        assert_eq!(grid.cursor(), (0, 0));
    }

    #[test]
    fn test_revision_counts_mutations() {
        let mut grid: CharGrid<4, 2> = CharGrid::new();
        grid.clear().unwrap();
        grid.write_byte(b'a').unwrap();
        assert_eq!(grid.revision(), 2);

        // Reads leave the revision alone
        let _ = grid.line(0);
        let _ = grid.dimensions();
        assert_eq!(grid.revision(), 2);
    }

    #[test]
    fn test_non_printable_shown_as_placeholder() {
        let mut grid: CharGrid<4, 1> = CharGrid::new();
        grid.write_bytes(&[b'a', 0x01, b'b']).unwrap();
        assert_eq!(grid.line(0).as_str(), "a?b");
    }

    #[test]
    fn test_write_u8_through_grid() {
        let mut grid: CharGrid<8, 1> = CharGrid::new();
        grid.write_u8(192, Radix::Decimal).unwrap();
        grid.write_byte(b'.').unwrap();
        grid.write_u8(0xa0, Radix::Hex).unwrap();
        assert_eq!(grid.line(0).as_str(), "192.a0");
    }
}
