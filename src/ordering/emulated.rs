use super::{BackendKind, WordOrdering};
use crate::loom_compat::Ordering;
use crate::platform::{acquire_fence, cas, release_fence};
use crate::word::{Word, WordRef};

/// Ordering operations rebuilt from unordered access and explicit fences.
///
/// Every access to the word itself is relaxed, the weakest access that is
/// still untorn; all ordering comes from the standalone fences in
/// [`crate::platform`]. A release fence before a relaxed write synchronizes
/// with an acquire fence after a relaxed read that observes that write,
/// which gives the same happens-before edges as the native tagged accesses.
#[derive(Clone, Copy, Debug, Default)]
pub struct Emulated;

impl WordOrdering for Emulated {
    const KIND: BackendKind = BackendKind::Emulated;

    #[inline(always)]
    fn acquire_load(cell: WordRef<'_>) -> Word {
        let value = Self::relaxed_load(cell);
        acquire_fence();
        value
    }

    #[inline(always)]
    fn relaxed_load(cell: WordRef<'_>) -> Word {
        cell.atomic().load(Ordering::Relaxed)
    }

    #[inline(always)]
    fn relaxed_store(cell: WordRef<'_>, value: Word) {
        cell.atomic().store(value, Ordering::Relaxed);
    }

    #[inline(always)]
    fn release_store(cell: WordRef<'_>, value: Word) {
        release_fence();
        Self::relaxed_store(cell, value);
    }

    #[inline(always)]
    fn relaxed_cas(cell: WordRef<'_>, expected: Word, new: Word) -> Word {
        cas(cell, expected, new)
    }

    #[inline(always)]
    fn release_cas(cell: WordRef<'_>, expected: Word, new: Word) -> Word {
        release_fence();
        Self::relaxed_cas(cell, expected, new)
    }

    #[inline(always)]
    fn acq_rel_cas(cell: WordRef<'_>, expected: Word, new: Word) -> Word {
        release_fence();
        let prev = Self::relaxed_cas(cell, expected, new);
        // Unconditional: the returned word is acquire-visible on failure too.
        acquire_fence();
        prev
    }
}
