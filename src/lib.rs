//! # `wordsync` - Explicit-Ordering Word Access
//!
//! Load, store and compare-and-swap on a single machine word, each tagged
//! with one explicit memory-ordering strength. This is the layer a
//! concurrent runtime (a garbage collector, a scheduler) builds its locks,
//! queues and publication protocols on, so it has to say exactly what one
//! thread is guaranteed to observe of another's writes.
//!
//! ## Operations
//!
//! | Operation | Ordering |
//! |---|---|
//! | [`acquire_load`] | acquire |
//! | [`relaxed_load`] | none |
//! | [`relaxed_store`] | none |
//! | [`release_store`] | release |
//! | [`relaxed_cas`] | relaxed on success and failure |
//! | [`release_cas`] | release on success, relaxed on failure |
//! | [`acq_rel_cas`] | acquire + release on success, acquire on failure |
//!
//! Every CAS makes a single strong attempt and returns the word it read.
//! The swap happened iff that word equals the expected one; retrying is the
//! caller's business.
//!
//! ## Backends
//!
//! The same contract has two implementations behind [`WordOrdering`]:
//!
//! - [`Native`]: each operation is one hardware atomic with the matching
//!   ordering tag.
//! - [`Emulated`]: relaxed (untorn but unordered) word access plus the
//!   standalone acquire and release fences from [`platform`], and a relaxed
//!   primitive CAS.
//!
//! [`Selected`] picks one when the crate is compiled:
//!
//! | Build | Backend |
//! |---|---|
//! | `threaded` feature (default) on a target with word CAS | [`Native`] |
//! | `--no-default-features` (single-threaded runtime) | [`Emulated`] |
//! | `--features emulated` | [`Emulated`] |
//!
//! There is no runtime switch; the free functions below are
//! `#[inline(always)]` wrappers over `Selected`.
//!
//! ## Example
//!
//! ```rust
//! use wordsync::{acquire_load, relaxed_load, relaxed_store, release_store, WordCell};
//! use std::thread;
//!
//! let payload = WordCell::new(0);
//! let ready = WordCell::new(0);
//!
//! thread::scope(|s| {
//!     s.spawn(|| {
//!         relaxed_store(payload.handle(), 42);
//!         release_store(ready.handle(), 1);
//!     });
//!
//!     s.spawn(|| {
//!         while acquire_load(ready.handle()) == 0 {
//!             std::hint::spin_loop();
//!         }
//!         assert_eq!(relaxed_load(payload.handle()), 42);
//!     });
//! });
//! ```
//!
//! ## Model checking
//!
//! Built with `RUSTFLAGS="--cfg loom"`, every atomic access and fence goes
//! through [`loom`](https://docs.rs/loom), and `tests/loom.rs` explores the
//! interleavings of both backends.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::inline_always)]

mod loom_compat;
mod tracing_helpers;

pub mod ordering;
pub mod platform;
pub mod word;

pub use ordering::{BackendKind, Emulated, Native, Selected, WordOrdering, BACKEND};
pub use word::{Word, WordCell, WordRef};

use tracing_helpers::trace_cas_mismatch;

/// Returns the current word with acquire ordering.
///
/// Accesses after this call observe everything that happened-before the
/// release write of the returned word.
#[inline(always)]
pub fn acquire_load(cell: WordRef<'_>) -> Word {
    Selected::acquire_load(cell)
}

/// Returns the current word; untorn, but with no ordering.
#[inline(always)]
pub fn relaxed_load(cell: WordRef<'_>) -> Word {
    Selected::relaxed_load(cell)
}

/// Writes `value`; untorn, but with no ordering.
#[inline(always)]
pub fn relaxed_store(cell: WordRef<'_>, value: Word) {
    Selected::relaxed_store(cell, value);
}

/// Writes `value` with release ordering.
///
/// Everything this thread did before the call is visible to any thread
/// whose [`acquire_load`] returns `value`.
#[inline(always)]
pub fn release_store(cell: WordRef<'_>, value: Word) {
    Selected::release_store(cell, value);
}

/// Replaces the word with `new` if it equals `expected`; returns the word
/// read. Relaxed either way.
#[inline(always)]
pub fn relaxed_cas(cell: WordRef<'_>, expected: Word, new: Word) -> Word {
    let prev = Selected::relaxed_cas(cell, expected, new);
    trace_cas_mismatch!("relaxed_cas", expected, prev);
    prev
}

/// Replaces the word with `new` if it equals `expected`; returns the word
/// read. A successful swap is a release store.
#[inline(always)]
pub fn release_cas(cell: WordRef<'_>, expected: Word, new: Word) -> Word {
    let prev = Selected::release_cas(cell, expected, new);
    trace_cas_mismatch!("release_cas", expected, prev);
    prev
}

/// Replaces the word with `new` if it equals `expected`; returns the word
/// read. The read is an acquire load on both paths; a successful swap is
/// also a release store.
#[inline(always)]
pub fn acq_rel_cas(cell: WordRef<'_>, expected: Word, new: Word) -> Word {
    let prev = Selected::acq_rel_cas(cell, expected, new);
    trace_cas_mismatch!("acq_rel_cas", expected, prev);
    prev
}

// Compile-time layout assertions. Loom's atomics carry model state.
#[cfg(not(loom))]
const _: () = {
    use core::mem;

    // A cell must be usable wherever a raw word lives.
    assert!(mem::size_of::<WordCell>() == mem::size_of::<Word>());
    assert!(mem::align_of::<WordCell>() == mem::align_of::<Word>());

    // Handles are a single pointer and backends carry no state.
    assert!(mem::size_of::<WordRef<'static>>() == mem::size_of::<usize>());
    assert!(mem::size_of::<Native>() == 0);
    assert!(mem::size_of::<Emulated>() == 0);
};
