//! Dirty-tracking display controller
//!
//! Owns the character surface and the state behind each screen. Setters
//! only record values; all drawing happens in `update()`, which the main
//! loop calls periodically and which touches the surface only when the
//! active screen is stale. LCD writes are slow, so idle ticks must stay
//! free of I/O.
//!
//! ```ignore
//! let mut display = DisplayController::new(lcd);
//! display.set_mac(mac);
//! display.set_network_status(NetworkStatus::Connecting);
//!
//! // In the main loop:
//! display.update(elapsed_ms)?;
//! ```

use netlcd_display::{CharSurface, Radix, SurfaceError};

use super::layout::{truncated, TextRows};
use super::ScreenKind;
use crate::config::DisplayConfig;
use crate::network::{IpAddress, MacAddress, NetworkStatus};
use crate::traits::{Request, RequestState};

/// Label in front of the link status
const STATUS_PREFIX: &str = "Status: ";

/// Label in front of the HTTP status text
const HTTP_PREFIX: &str = "HTTP: ";

/// Network screen rows
const ROW_STATUS: u8 = 0;
const ROW_MAC: u8 = 1;
const ROW_IP: u8 = 2;
const ROW_HTTP: u8 = 3;

/// Surface view limited to the geometry in use
///
/// Bytes past `cols` on the current row are dropped, so a controller
/// configured narrower than its surface never paints outside its area.
struct Rows<'s, S> {
    surface: &'s mut S,
    cols: u8,
    rows: u8,
    /// Cells left on the current row
    left: u8,
}

impl<'s, S: CharSurface> Rows<'s, S> {
    fn new(surface: &'s mut S, cols: u8, rows: u8) -> Self {
        Self {
            surface,
            cols,
            rows,
            left: cols,
        }
    }

    /// Move to the start of `row`, or report that the row does not exist
    fn start_row(&mut self, row: u8) -> Result<bool, SurfaceError> {
        if row >= self.rows || self.cols == 0 {
            return Ok(false);
        }
        self.set_cursor(0, row)?;
        Ok(true)
    }
}

impl<S: CharSurface> CharSurface for Rows<'_, S> {
    fn dimensions(&self) -> (u8, u8) {
        (self.cols, self.rows)
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.surface.clear()?;
        self.left = self.cols;
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), SurfaceError> {
        if col >= self.cols || row >= self.rows {
            return Err(SurfaceError::InvalidCoordinates);
        }
        self.surface.set_cursor(col, row)?;
        self.left = self.cols - col;
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), SurfaceError> {
        if self.left == 0 {
            return Ok(());
        }
        self.surface.write_byte(byte)?;
        self.left -= 1;
        Ok(())
    }
}

/// Status display controller
///
/// The request and the text content are borrowed, never owned: the caller
/// keeps them alive for `'a` and the controller only reads them.
pub struct DisplayController<'a, S, R: ?Sized> {
    surface: S,
    /// Columns in use
    cols: u8,
    /// Rows in use
    rows: u8,
    /// Active screen
    screen: ScreenKind,
    /// Whether the active screen must be repainted
    dirty: bool,
    /// Link status, `None` for an unrecognized raw code
    network_status: Option<NetworkStatus>,
    mac: MacAddress,
    ip: IpAddress,
    request: Option<&'a R>,
    /// Request state seen on the last network-screen update
    prev_request_state: Option<RequestState>,
    content: Option<&'a [u8]>,
}

impl<'a, S, R> DisplayController<'a, S, R>
where
    S: CharSurface,
    R: Request + ?Sized,
{
    /// Create a controller using the full surface
    ///
    /// Starts on the network screen, disconnected, with nothing bound and a
    /// repaint pending.
    pub fn new(surface: S) -> Self {
        let (cols, rows) = surface.dimensions();
        Self::with_geometry(surface, cols, rows, ScreenKind::Network)
    }

    /// Create a controller from a display configuration
    ///
    /// The configured geometry is clamped to what the surface reports.
    pub fn with_config(surface: S, config: &DisplayConfig) -> Self {
        let (cols, rows) = surface.dimensions();
        Self::with_geometry(
            surface,
            config.cols.min(cols),
            config.rows.min(rows),
            config.initial_screen,
        )
    }

    fn with_geometry(surface: S, cols: u8, rows: u8, screen: ScreenKind) -> Self {
        Self {
            surface,
            cols,
            rows,
            screen,
            dirty: true,
            network_status: Some(NetworkStatus::Disconnected),
            mac: MacAddress::default(),
            ip: IpAddress::default(),
            request: None,
            prev_request_state: None,
            content: None,
        }
    }

    /// Periodic update
    ///
    /// `elapsed_ms` is the time since the previous call. Rendering does not
    /// depend on it; it is accepted so the display ticks like the other
    /// periodic components.
    ///
    /// Returns `Ok(true)` if the screen was repainted. If the surface fails
    /// part-way the error is returned and the screen stays dirty, so the
    /// next call repaints it from scratch.
    pub fn update(&mut self, _elapsed_ms: u32) -> Result<bool, SurfaceError> {
        if self.screen == ScreenKind::Network {
            if let Some(request) = self.request {
                let state = request.state();
                if self.prev_request_state != Some(state) {
                    self.dirty = true;
                    self.prev_request_state = Some(state);
                }
            }
        }

        if !self.dirty {
            return Ok(false);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("Redrawing {} screen", self.screen);

        match self.screen {
            ScreenKind::Network => self.draw_network()?,
            ScreenKind::Text => self.draw_text()?,
        }

        self.dirty = false;
        Ok(true)
    }

    /// Paint the network screen
    fn draw_network(&mut self) -> Result<(), SurfaceError> {
        let mut out = Rows::new(&mut self.surface, self.cols, self.rows);
        out.clear()?;

        if out.start_row(ROW_STATUS)? {
            out.write_str(STATUS_PREFIX)?;
            if let Some(status) = self.network_status {
                out.write_str(status.label())?;
            }
        }

        if out.start_row(ROW_MAC)? {
            let octets = self.mac.octets();
            for (i, &b) in octets.iter().enumerate() {
                if b < 0x10 {
                    out.write_byte(b'0')?;
                }
                out.write_u8(b, Radix::Hex)?;
                if i + 1 < octets.len() {
                    out.write_byte(b':')?;
                }
            }
        }

        if !self.network_status.is_some_and(|s| s.has_address()) {
            return Ok(());
        }

        if out.start_row(ROW_IP)? {
            let octets = self.ip.octets();
            for (i, &b) in octets.iter().enumerate() {
                out.write_u8(b, Radix::Decimal)?;
                if i + 1 < octets.len() {
                    out.write_byte(b'.')?;
                }
            }
        }

        if let Some(request) = self.request {
            if out.start_row(ROW_HTTP)? {
                let width = self.cols as usize;
                if request.failed() {
                    out.write_bytes(truncated(request.error_message().as_bytes(), width))?;
                } else {
                    out.write_str(HTTP_PREFIX)?;
                    let status = truncated(
                        request.status_string().as_bytes(),
                        width.saturating_sub(HTTP_PREFIX.len()),
                    );
                    out.write_bytes(status)?;
                }
            }
        }

        Ok(())
    }

    /// Paint the text screen
    fn draw_text(&mut self) -> Result<(), SurfaceError> {
        let mut out = Rows::new(&mut self.surface, self.cols, self.rows);
        out.clear()?;

        let Some(content) = self.content else {
            return Ok(());
        };

        let rows = TextRows::new(content, self.cols as usize).take(self.rows as usize);
        for (row, line) in rows.enumerate() {
            if !out.start_row(row as u8)? {
                break;
            }
            out.write_bytes(line)?;
        }

        Ok(())
    }

    /// Get the active screen
    pub fn screen(&self) -> ScreenKind {
        self.screen
    }

    /// Switch screens
    ///
    /// Always forces a full repaint, even when re-selecting the active
    /// screen. Fields of the inactive screen are never tracked, so this is
    /// what brings them up to date.
    pub fn set_screen(&mut self, screen: ScreenKind) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Screen {} -> {}", self.screen, screen);

        self.screen = screen;
        self.dirty = true;
    }

    /// Set the link status
    pub fn set_network_status(&mut self, status: NetworkStatus) {
        self.network_status = Some(status);
        self.touch(ScreenKind::Network);
    }

    /// Set the link status from a raw code
    ///
    /// Unknown codes are kept as "unrecognized": the status row then shows
    /// its label with nothing after it.
    pub fn set_network_status_raw(&mut self, code: u8) {
        self.network_status = NetworkStatus::from_raw(code);
        self.touch(ScreenKind::Network);
    }

    /// Set the hardware address (copied)
    pub fn set_mac(&mut self, mac: impl Into<MacAddress>) {
        self.mac = mac.into();
        self.touch(ScreenKind::Network);
    }

    /// Set the IPv4 address (copied, byte order preserved)
    pub fn set_ip(&mut self, ip: impl Into<IpAddress>) {
        self.ip = ip.into();
        self.touch(ScreenKind::Network);
    }

    /// Bind or unbind the request shown on the network screen
    pub fn set_request(&mut self, request: Option<&'a R>) {
        self.request = request;
        self.touch(ScreenKind::Network);
    }

    /// Bind or unbind the text screen content
    ///
    /// Lines are separated by `\n`; a NUL byte ends the content early.
    pub fn set_content(&mut self, content: Option<&'a [u8]>) {
        self.content = content;
        self.touch(ScreenKind::Text);
    }

    /// Bind a string as text screen content
    pub fn set_text(&mut self, text: &'a str) {
        self.set_content(Some(text.as_bytes()));
    }

    /// Mark dirty if `screen` is the one being shown
    fn touch(&mut self, screen: ScreenKind) {
        if self.screen == screen {
            self.dirty = true;
        }
    }

    /// Check if the active screen is waiting for a repaint
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force a repaint on the next update
    ///
    /// For when the surface lost its contents behind the controller's back,
    /// e.g. after an LCD power cycle.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Get the link status, `None` if unrecognized
    pub fn network_status(&self) -> Option<NetworkStatus> {
        self.network_status
    }

    /// Get the hardware address
    pub fn mac(&self) -> MacAddress {
        self.mac
    }

    /// Get the IPv4 address
    pub fn ip(&self) -> IpAddress {
        self.ip
    }

    /// Geometry in use as (columns, rows)
    pub fn dimensions(&self) -> (u8, u8) {
        (self.cols, self.rows)
    }

    /// Borrow the surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Borrow the surface mutably
    ///
    /// For surface maintenance such as re-initializing an LCD. Anything
    /// written here is unknown to the controller; call `mark_dirty()`
    /// afterwards.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give the surface back
    pub fn release(self) -> S {
        self.surface
    }
}
