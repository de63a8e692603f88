//! HTTP request observation trait
//!
//! The display follows a request owned by the networking code. It only ever
//! reads from it: the lifecycle state to decide whether a redraw is due,
//! and the texts to put on the status row.

/// Lifecycle of an HTTP request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestState {
    /// Created, not yet started
    #[default]
    Idle,
    /// Opening the TCP connection
    Connecting,
    /// Writing the request line, headers and body
    Sending,
    /// Reading the response
    Receiving,
    /// Response fully received
    Complete,
    /// Aborted with an error
    Failed,
}

/// Trait for requests the display can follow
///
/// All methods take `&self`: the display holds a shared borrow while the
/// request is bound, so implementations that progress while bound keep
/// their lifecycle in a `Cell` or similar.
///
/// Texts are treated as C-style strings by the renderer: anything after a
/// NUL byte is ignored.
pub trait Request {
    /// Current lifecycle state
    fn state(&self) -> RequestState;

    /// Check if the request has failed
    fn failed(&self) -> bool {
        self.state() == RequestState::Failed
    }

    /// Human-readable reason for the failure
    fn error_message(&self) -> &str;

    /// Short progress or response status (e.g. "200 OK")
    fn status_string(&self) -> &str;
}

impl<T: Request + ?Sized> Request for &T {
    fn state(&self) -> RequestState {
        (**self).state()
    }

    fn failed(&self) -> bool {
        (**self).failed()
    }

    fn error_message(&self) -> &str {
        (**self).error_message()
    }

    fn status_string(&self) -> &str {
        (**self).status_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct Fetch {
        state: Cell<RequestState>,
    }

    impl Request for Fetch {
        fn state(&self) -> RequestState {
            self.state.get()
        }

        fn error_message(&self) -> &str {
            "timeout"
        }

        fn status_string(&self) -> &str {
            "200 OK"
        }
    }

    #[test]
    fn test_failed_defaults_to_state() {
        let fetch = Fetch {
            state: Cell::new(RequestState::Receiving),
        };
        assert!(!fetch.failed());

        fetch.state.set(RequestState::Failed);
        assert!(fetch.failed());
    }

    #[test]
    fn test_reference_forwards() {
        let fetch = Fetch {
            state: Cell::new(RequestState::Complete),
        };
        let by_ref: &dyn Request = &fetch;
        assert_eq!((&by_ref).state(), RequestState::Complete);
        assert_eq!((&by_ref).status_string(), "200 OK");
    }
}
