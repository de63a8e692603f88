//! Display configuration
//!
//! `display.toml` is validated by the build script and compiled in as
//! [`DISPLAY_CONFIG`]. An invalid file fails the build, so the firmware
//! never starts with a geometry the LCD cannot show.

use netlcd_core::{DisplayConfig, ScreenKind};

include!(concat!(env!("OUT_DIR"), "/display_config.rs"));
