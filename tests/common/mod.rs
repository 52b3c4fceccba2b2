//! Shared test utilities: tracing setup and the backend test matrix.
//!
//! ```bash
//! RUST_LOG=debug cargo test --test stress_tests -- --nocapture
//! RUST_LOG=wordsync::cas=trace cargo test --features tracing --test stress_tests
//! ```

#![allow(dead_code, unused_macros)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Ensures tracing is only initialized once per test binary.
static INIT: Once = Once::new();

/// Installs a console subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call from every test; only the first call takes effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        // Another harness may already have installed a global subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_thread_names(true)
            .with_test_writer()
            .compact()
            .try_init();
    });
}

/// Small deterministic xorshift generator for jittering thread schedules.
///
/// Each thread seeds its own; no shared state.
#[derive(Clone, Debug)]
pub struct Jitter(u64);

impl Jitter {
    pub fn new(seed: u64) -> Self {
        Self(seed | 1)
    }

    pub fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Spins or yields for a random short while.
    pub fn pause(&mut self) {
        match self.next() % 8 {
            0 => std::thread::yield_now(),
            n => {
                for _ in 0..(n * 16) {
                    std::hint::spin_loop();
                }
            }
        }
    }
}

/// Instantiates a generic test body once per backend.
///
/// ```ignore
/// for_each_backend!(fn_name);
/// ```
/// expands to `mod native { #[test] fn fn_name() }` and the same for
/// `emulated`, each calling `super::fn_name::<Backend>()`.
macro_rules! for_each_backend {
    ($($test:ident),* $(,)?) => {
        mod native {
            $(
                #[test]
                fn $test() {
                    super::$test::<wordsync::Native>();
                }
            )*
        }

        mod emulated {
            $(
                #[test]
                fn $test() {
                    super::$test::<wordsync::Emulated>();
                }
            )*
        }
    };
}
