//! Status screens
//!
//! Exactly one screen is shown at a time. The controller repaints the
//! active screen in full whenever something it shows has changed.

pub mod controller;
pub mod layout;

pub use controller::DisplayController;
pub use layout::{truncated, TextRows};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Screen selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScreenKind {
    /// Link status, MAC, IP and HTTP request progress
    #[default]
    Network,
    /// Free-form text, one source line per row
    Text,
}
