//! The seven ordering operations and the two backends that implement them.
//!
//! [`WordOrdering`] is the interface: four plain loads/stores and three
//! compare-and-swaps, each carrying one fixed ordering strength. [`Native`]
//! maps each operation onto the matching hardware atomic; [`Emulated`]
//! rebuilds it from unordered word access, the one-directional fences in
//! [`crate::platform`], and a relaxed primitive CAS.
//!
//! Which one the crate-root functions use is decided when the crate is
//! compiled ([`Selected`]); there is no runtime dispatch.

use core::fmt;

use crate::word::{Word, WordRef};

/// Fence-based reconstruction of the ordering operations.
pub mod emulated;
/// Direct mapping onto the platform's ordered atomics.
pub mod native;


pub use emulated::Emulated;
pub use native::Native;

/// Backend chosen for this build.
#[cfg(all(
    feature = "threaded",
    not(feature = "emulated"),
    any(loom, target_has_atomic = "ptr")
))]
pub type Selected = Native;

/// Backend chosen for this build.
#[cfg(not(all(
    feature = "threaded",
    not(feature = "emulated"),
    any(loom, target_has_atomic = "ptr")
)))]
pub type Selected = Emulated;

/// The backend the crate-root operations compile against.
pub const BACKEND: BackendKind = <Selected as WordOrdering>::KIND;

/// Names one of the two backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Ordered hardware atomics.
    Native,
    /// Unordered access plus explicit fences.
    Emulated,
}

impl BackendKind {
    /// Short lowercase name, as used in benchmark ids.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Emulated => "emulated",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load, store and compare-and-swap on a shared word, each with a fixed
/// memory-ordering strength.
///
/// Every operation is total: it never fails, blocks, or spins. A CAS whose
/// comparison does not match is an ordinary outcome, visible only through
/// the returned word.
///
/// Both implementations must be observably equivalent; the crate's test
/// suite is run against each of them.
pub trait WordOrdering {
    /// Which backend this is.
    const KIND: BackendKind;

    /// Returns the current word.
    ///
    /// Acquire: accesses after this call observe everything that
    /// happened-before the release write that produced the returned word.
    fn acquire_load(cell: WordRef<'_>) -> Word;

    /// Returns the current word. Atomic, no ordering.
    fn relaxed_load(cell: WordRef<'_>) -> Word;

    /// Writes `value`. Atomic, no ordering.
    fn relaxed_store(cell: WordRef<'_>, value: Word);

    /// Writes `value`.
    ///
    /// Release: accesses before this call are visible to any thread whose
    /// acquire load observes `value`.
    fn release_store(cell: WordRef<'_>, value: Word);

    /// If the word equals `expected`, replaces it with `new`. Returns the
    /// word read, whether or not it matched. Relaxed on both paths.
    fn relaxed_cas(cell: WordRef<'_>, expected: Word, new: Word) -> Word;

    /// As [`relaxed_cas`](Self::relaxed_cas), but a successful swap is a
    /// release store. A failed one carries no ordering.
    fn release_cas(cell: WordRef<'_>, expected: Word, new: Word) -> Word;

    /// As [`relaxed_cas`](Self::relaxed_cas), but the read is an acquire
    /// load on both paths and a successful swap is also a release store.
    fn acq_rel_cas(cell: WordRef<'_>, expected: Word, new: Word) -> Word;
}
