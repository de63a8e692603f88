//! Board-agnostic core logic for the network status display
//!
//! This crate contains everything that decides *what* appears on the
//! character LCD, independent of how characters reach the glass:
//!
//! - Network screen fields (link status, MAC, IP)
//! - The request trait used to follow an in-flight HTTP request
//! - Text paging rules for the free-form text screen
//! - The dirty-tracking `DisplayController` that ties them together
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod network;
pub mod screen;
pub mod traits;

pub use config::{ConfigError, DisplayConfig};
pub use network::{IpAddress, MacAddress, NetworkStatus};
pub use screen::{DisplayController, ScreenKind};
pub use traits::{Request, RequestState};
