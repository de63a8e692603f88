//! Collaborator traits
//!
//! These traits define the interface between the display logic and the
//! objects it observes but does not own.

pub mod request;

pub use request::{Request, RequestState};
