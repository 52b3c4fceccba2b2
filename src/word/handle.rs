use core::fmt;
use core::ptr;

use super::{Word, WordCell};
use crate::loom_compat::AtomicUsize;

/// A non-owning handle to a shared word.
///
/// `WordRef` is `Copy` and may be aliased across any number of threads; it
/// never owns or frees the storage it points at. The inherent methods
/// forward to the backend selected for this build (see [`crate::Selected`]);
/// use [`crate::WordOrdering`] directly to pick a backend explicitly.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct WordRef<'a> {
    cell: &'a WordCell,
}

impl<'a> WordRef<'a> {
    /// Creates a handle to `cell`.
    #[inline(always)]
    pub const fn new(cell: &'a WordCell) -> Self {
        Self { cell }
    }

    /// Returns the cell this handle refers to.
    #[inline(always)]
    pub const fn cell(self) -> &'a WordCell {
        self.cell
    }

    #[inline(always)]
    pub(crate) fn atomic(self) -> &'a AtomicUsize {
        self.cell.atomic()
    }

    /// Returns the address of the underlying word.
    #[inline(always)]
    pub fn as_ptr(self) -> *mut Word {
        ptr::from_ref(self.cell).cast_mut().cast::<Word>()
    }

    /// Returns `true` if both handles refer to the same word.
    #[inline(always)]
    pub fn ptr_eq(a: Self, b: Self) -> bool {
        ptr::eq(a.cell, b.cell)
    }

    /// Loads the word with acquire ordering.
    #[inline(always)]
    pub fn acquire_load(self) -> Word {
        crate::acquire_load(self)
    }

    /// Loads the word with no ordering guarantee.
    #[inline(always)]
    pub fn relaxed_load(self) -> Word {
        crate::relaxed_load(self)
    }

    /// Stores `value` with no ordering guarantee.
    #[inline(always)]
    pub fn relaxed_store(self, value: Word) {
        crate::relaxed_store(self, value);
    }

    /// Stores `value` with release ordering.
    #[inline(always)]
    pub fn release_store(self, value: Word) {
        crate::release_store(self, value);
    }

    /// Relaxed compare-and-swap; returns the word observed before the swap.
    #[inline(always)]
    pub fn relaxed_cas(self, expected: Word, new: Word) -> Word {
        crate::relaxed_cas(self, expected, new)
    }

    /// Release-on-success compare-and-swap; returns the previous word.
    #[inline(always)]
    pub fn release_cas(self, expected: Word, new: Word) -> Word {
        crate::release_cas(self, expected, new)
    }

    /// Acquire-release compare-and-swap; returns the previous word, which is
    /// acquire-visible whether or not the swap happened.
    #[inline(always)]
    pub fn acq_rel_cas(self, expected: Word, new: Word) -> Word {
        crate::acq_rel_cas(self, expected, new)
    }
}

impl<'a> From<&'a WordCell> for WordRef<'a> {
    #[inline(always)]
    fn from(cell: &'a WordCell) -> Self {
        Self::new(cell)
    }
}

impl fmt::Debug for WordRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordRef")
            .field("addr", &self.as_ptr())
            .field("cell", self.cell)
            .finish()
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn handles_are_send_sync_and_copy() {
        assert_send_sync::<WordRef<'static>>();
        assert_send_sync::<WordCell>();

        let cell = WordCell::new(1);
        let a = cell.handle();
        let b = a;
        a.relaxed_store(2);
        assert_eq!(b.relaxed_load(), 2);
    }

    #[test]
    fn ptr_eq_compares_identity_not_contents() {
        let x = WordCell::new(9);
        let y = WordCell::new(9);

        assert!(WordRef::ptr_eq(x.handle(), WordRef::from(&x)));
        assert!(!WordRef::ptr_eq(x.handle(), y.handle()));
        assert_eq!(x.handle().as_ptr(), ptr::from_ref(&x).cast_mut().cast::<Word>());
    }
}
