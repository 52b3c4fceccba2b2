use core::fmt;

use super::{Word, WordRef};
use crate::loom_compat::{AtomicUsize, Ordering};

/// One machine word of shared storage.
///
/// `repr(transparent)` over the platform's word-sized atomic, so a
/// `WordCell` has exactly the size and alignment of a [`Word`]. Every access
/// through a [`WordRef`] is untorn.
#[repr(transparent)]
pub struct WordCell {
    inner: AtomicUsize,
}

impl WordCell {
    /// Creates a cell holding `value`.
    #[cfg(not(loom))]
    #[inline(always)]
    pub const fn new(value: Word) -> Self {
        Self {
            inner: AtomicUsize::new(value),
        }
    }

    /// Creates a cell holding `value`.
    #[cfg(loom)]
    pub fn new(value: Word) -> Self {
        Self {
            inner: AtomicUsize::new(value),
        }
    }

    /// Views caller-owned raw memory as a shared word cell.
    ///
    /// Runtimes use this for words that live inside larger allocations
    /// (heap object headers, scheduler queues) they manage themselves.
    ///
    /// # Safety
    /// - `ptr` must be non-null and aligned to `align_of::<Word>()`.
    /// - `ptr` must be valid for reads and writes for all of `'a`.
    /// - For the whole of `'a`, every concurrent access to the word must go
    ///   through this crate (or another atomic view of the same word).
    #[cfg(not(loom))]
    #[inline(always)]
    pub unsafe fn from_ptr<'a>(ptr: *mut Word) -> &'a Self {
        debug_assert!(!ptr.is_null(), "word cell pointer is null");
        debug_assert!(ptr.is_aligned(), "word cell pointer {ptr:p} is not word-aligned");
        // SAFETY: `WordCell` is `repr(transparent)` over `AtomicUsize`, which
        // has the same size as `usize` and alignment checked above; the
        // caller guarantees validity and atomic-only concurrent access.
        unsafe { &*ptr.cast::<Self>() }
    }

    /// Borrows a handle to this cell.
    #[inline(always)]
    pub fn handle(&self) -> WordRef<'_> {
        WordRef::new(self)
    }

    /// Returns a mutable reference to the word.
    ///
    /// The exclusive borrow proves no other thread can access the cell, so
    /// no ordering is involved.
    #[cfg(not(loom))]
    #[inline(always)]
    pub fn get_mut(&mut self) -> &mut Word {
        self.inner.get_mut()
    }

    /// Consumes the cell and returns the word.
    #[cfg(not(loom))]
    #[inline(always)]
    pub fn into_inner(self) -> Word {
        self.inner.into_inner()
    }

    #[inline(always)]
    pub(crate) fn atomic(&self) -> &AtomicUsize {
        &self.inner
    }
}

impl Default for WordCell {
    fn default() -> Self {
        Self::new(0)
    }
}

impl From<Word> for WordCell {
    fn from(value: Word) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for WordCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WordCell")
            .field(&self.inner.load(Ordering::Relaxed))
            .finish()
    }
}
