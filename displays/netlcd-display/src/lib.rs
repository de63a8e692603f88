//! Character display abstraction for netlcd
//!
//! This crate provides:
//! - `CharSurface` trait for cursor-addressed character displays
//! - `SurfaceError` for the failures a surface can report
//! - `CharGrid`, an in-memory surface used for host testing and shadow buffers
//!
//! # Architecture
//!
//! The status controller in `netlcd-core` renders through `CharSurface` and
//! never touches hardware directly. Concrete surfaces live elsewhere:
//!
//! - **HD44780 LCDs** (`netlcd-drivers`): driven through a 74HC595 shift
//!   register with three GPIO lines.
//! - **CharGrid** (this crate): a plain byte grid, useful wherever the output
//!   must be inspected rather than shown.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod grid;
pub mod surface;

// Re-export key types
pub use grid::CharGrid;
pub use surface::{CharSurface, Radix, SurfaceError};
