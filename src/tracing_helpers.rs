//! Zero-cost tracing helpers.
//!
//! With the `tracing` feature these forward to the `tracing` crate; without
//! it they expand to nothing, so the ordering operations stay a single
//! instruction (plus fences) in default builds.
//!
//! ```bash
//! RUST_LOG=wordsync::cas=trace cargo test --features tracing --test stress_tests
//! ```

#![allow(unused_macros, unused_imports)]

/// Trace-level event. No-op without the `tracing` feature.
#[cfg(feature = "tracing")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

/// Records a compare-and-swap whose comparison did not match.
macro_rules! trace_cas_mismatch {
    ($op:literal, $expected:expr, $observed:expr) => {
        if $observed != $expected {
            $crate::tracing_helpers::trace_log!(
                target: "wordsync::cas",
                op = $op,
                expected = $expected,
                observed = $observed,
                "compare did not match"
            );
        }
    };
}

pub(crate) use trace_cas_mismatch;
pub(crate) use trace_log;
