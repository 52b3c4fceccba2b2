//! Platform primitives the emulated backend is built from.
//!
//! These are the three capabilities an emulated build may rely on: a
//! load-load (acquire) fence, a store (release) fence, and a word-sized
//! compare-and-swap that promises atomicity and nothing else.
//!
//! On x86/x86_64 both fences compile to a compiler barrier only; on weakly
//! ordered targets (ARM, POWER, RISC-V) they emit the matching `dmb`/`lwsync`
//! /`fence` instruction.

use crate::loom_compat::{fence, Ordering};
use crate::word::{Word, WordRef};

#[cfg(all(not(loom), not(target_has_atomic = "ptr")))]
compile_error!("wordsync needs a word-sized compare-and-swap on the target");

/// Load-load barrier.
///
/// Loads sequenced after this fence cannot be satisfied before loads
/// sequenced before it. Pairs with [`release_fence`] through any word both
/// sides touch.
#[inline(always)]
pub fn acquire_fence() {
    fence(Ordering::Acquire);
}

/// Store barrier.
///
/// Accesses sequenced before this fence become visible no later than any
/// store sequenced after it.
#[inline(always)]
pub fn release_fence() {
    fence(Ordering::Release);
}

/// Primitive compare-and-swap with no ordering guarantee.
///
/// Returns the word observed in `cell`; the swap took place iff that word
/// equals `expected`.
#[inline(always)]
pub fn cas(cell: WordRef<'_>, expected: Word, new: Word) -> Word {
    match cell.atomic().compare_exchange(expected, new, Ordering::Relaxed, Ordering::Relaxed) {
        Ok(prev) | Err(prev) => prev,
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;
    use crate::word::WordCell;

    #[test]
    fn cas_returns_observed_word() {
        let cell = WordCell::new(3);

        assert_eq!(cas(cell.handle(), 3, 4), 3);
        assert_eq!(cell.handle().relaxed_load(), 4);

        assert_eq!(cas(cell.handle(), 3, 5), 4);
        assert_eq!(cell.handle().relaxed_load(), 4);
    }

    #[test]
    fn cas_has_exactly_one_winner_under_contention() {
        const THREADS: usize = 8;

        for _ in 0..64 {
            let cell = WordCell::new(0);
            let wins = std::thread::scope(|s| {
                let racers: Vec<_> = (1..=THREADS)
                    .map(|id| {
                        let cell = &cell;
                        s.spawn(move || cas(cell.handle(), 0, id) == 0)
                    })
                    .collect();
                racers
                    .into_iter()
                    .map(|h| h.join().unwrap())
                    .filter(|&won| won)
                    .count()
            });

            assert_eq!(wins, 1);
            assert_ne!(cell.handle().relaxed_load(), 0);
        }
    }

    #[test]
    fn fences_are_callable_without_a_location() {
        release_fence();
        acquire_fence();
    }
}
