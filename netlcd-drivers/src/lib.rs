//! Hardware driver implementations
//!
//! This crate provides concrete `CharSurface` implementations for the
//! character displays netlcd runs on:
//!
//! - HD44780-compatible LCDs in 4-bit mode behind a 74HC595 shift register

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod hd44780;

pub use hd44780::ShiftLcd;
