//! Configuration types
//!
//! Display geometry and refresh cadence. The firmware reads these from
//! `display.toml`, which is validated when it is built.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::screen::ScreenKind;

/// Character cells an HD44780 controller can address
pub const MAX_CELLS: usize = 80;

/// Default LCD columns
pub const DEFAULT_COLS: u8 = 20;

/// Default LCD rows
pub const DEFAULT_ROWS: u8 = 4;

/// Default display refresh interval
pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 100;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Columns or rows set to zero
    ZeroDimension,
    /// Geometry exceeds what the controller can address
    TooLarge,
    /// Refresh interval set to zero
    ZeroRefresh,
}

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Character columns
    pub cols: u8,
    /// Character rows
    pub rows: u8,
    /// How often the main loop calls `update`
    pub refresh_interval_ms: u32,
    /// Screen shown after boot
    pub initial_screen: ScreenKind,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            initial_screen: ScreenKind::Network,
        }
    }
}

impl DisplayConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if self.cols as usize * self.rows as usize > MAX_CELLS {
            return Err(ConfigError::TooLarge);
        }
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::ZeroRefresh);
        }
        Ok(())
    }
}
