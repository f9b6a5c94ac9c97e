//! Diagnostic hooks routed to `tracing` when the `tracing` feature is on.
//!
//! With the feature off every invocation expands to nothing, so arguments are
//! never evaluated.

macro_rules! trace_event {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)+);
    };
}

macro_rules! debug_event {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)+);
    };
}
