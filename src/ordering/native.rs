use super::{BackendKind, WordOrdering};
use crate::loom_compat::Ordering;
use crate::word::{Word, WordRef};

/// Ordering operations mapped one-to-one onto the platform's atomics.
///
/// No fences are added; the ordering tag on each access does all the work.
#[derive(Clone, Copy, Debug, Default)]
pub struct Native;

impl Native {
    #[inline(always)]
    fn cas(
        cell: WordRef<'_>,
        expected: Word,
        new: Word,
        success: Ordering,
        failure: Ordering,
    ) -> Word {
        match cell.atomic().compare_exchange(expected, new, success, failure) {
            Ok(prev) | Err(prev) => prev,
        }
    }
}

impl WordOrdering for Native {
    const KIND: BackendKind = BackendKind::Native;

    #[inline(always)]
    fn acquire_load(cell: WordRef<'_>) -> Word {
        cell.atomic().load(Ordering::Acquire)
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
        cell.atomic().store(value, Ordering::Release);
    }

    #[inline(always)]
    fn relaxed_cas(cell: WordRef<'_>, expected: Word, new: Word) -> Word {
        Self::cas(cell, expected, new, Ordering::Relaxed, Ordering::Relaxed)
    }

    #[inline(always)]
    fn release_cas(cell: WordRef<'_>, expected: Word, new: Word) -> Word {
        Self::cas(cell, expected, new, Ordering::Release, Ordering::Relaxed)
    }

    #[inline(always)]
    fn acq_rel_cas(cell: WordRef<'_>, expected: Word, new: Word) -> Word {
        Self::cas(cell, expected, new, Ordering::AcqRel, Ordering::Acquire)
    }
}
