//! Text layout rules
//!
//! Buffers are treated as C-style text: a NUL byte ends the buffer even if
//! the slice continues past it.

/// Line separator in text content
pub const NEWLINE: u8 = b'\n';

/// End-of-text marker
pub const TERMINATOR: u8 = 0;

/// Prefix of `text` of at most `max` bytes, stopping at the first NUL
pub fn truncated(text: &[u8], max: usize) -> &[u8] {
    let end = text
        .iter()
        .take(max)
        .position(|&b| b == TERMINATOR)
        .unwrap_or(max.min(text.len()));
    &text[..end]
}

/// Rows of a paged text buffer
///
/// Each item is the slice shown on one display row: the start of the next
/// source line, cut at `width`. Characters of a line that do not fit are
/// dropped; the following row starts with the next line. Iteration ends
/// when the buffer is exhausted, so callers stop early on short content.
#[derive(Debug, Clone)]
pub struct TextRows<'a> {
    /// Unconsumed text
    rest: &'a [u8],
    /// Row width in characters
    width: usize,
}

impl<'a> TextRows<'a> {
    /// Lay out `text` on rows `width` characters wide
    pub fn new(text: &'a [u8], width: usize) -> Self {
        Self { rest: text, width }
    }
}

impl<'a> Iterator for TextRows<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        match self.rest.first() {
            None | Some(&TERMINATOR) => return None,
            Some(_) => {}
        }

        let line_end = self
            .rest
            .iter()
            .position(|&b| b == NEWLINE || b == TERMINATOR)
            .unwrap_or(self.rest.len());
        let row = &self.rest[..line_end.min(self.width)];

        self.rest = match self.rest.get(line_end) {
            Some(&NEWLINE) => &self.rest[line_end + 1..],
            // Terminator or end of slice
            _ => &[],
        };

        Some(row)
    }
}
