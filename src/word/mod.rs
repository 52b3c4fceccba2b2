//! The shared word cell and the handle the ordering operations act on.
//!
//! A [`WordCell`] is one machine word of storage owned by the caller's data
//! structure. A [`WordRef`] is a `Copy`, non-owning, freely aliased handle to
//! such a cell; it is what gets passed between threads and into the
//! ordering operations.

/// Storage for one shared word.
pub mod cell;
/// Non-owning handles to shared words.
pub mod handle;

pub use cell::WordCell;
pub use handle::WordRef;

/// One machine word.
///
/// The bits carry no meaning here; callers treat them as an integer, an
/// address, or a packed flag word.
pub type Word = usize;
