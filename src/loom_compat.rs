//! Loom compatibility shim.
//!
//! With `--cfg loom` the word cell and both fences come from loom's model
//! checker, so every interleaving of the two backends can be explored.
//! Otherwise the plain `core::sync::atomic` items are used.

#[cfg(loom)]
pub(crate) use loom::sync::atomic::{fence, AtomicUsize, Ordering};

#[cfg(not(loom))]
pub(crate) use core::sync::atomic::{fence, AtomicUsize, Ordering};
