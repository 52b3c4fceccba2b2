//! Native and emulated backends driven in lockstep must agree on every
//! returned word and on the final contents of every cell.

#![cfg(not(loom))]

use proptest::prelude::*;
use wordsync::{Emulated, Native, Word, WordCell, WordOrdering};

const CELLS: usize = 3;

#[derive(Debug, Clone)]
enum Op {
    AcquireLoad(usize),
    RelaxedLoad(usize),
    RelaxedStore(usize, Word),
    ReleaseStore(usize, Word),
    RelaxedCas(usize, Word, Word),
    ReleaseCas(usize, Word, Word),
    AcqRelCas(usize, Word, Word),
}

/// Words drawn from a tiny alphabet so CAS comparisons actually hit.
fn word() -> impl Strategy<Value = Word> {
    prop_oneof![
        4 => 0usize..4,
        1 => any::<Word>(),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    let idx = 0..CELLS;
    prop_oneof![
        idx.clone().prop_map(Op::AcquireLoad),
        idx.clone().prop_map(Op::RelaxedLoad),
        (idx.clone(), word()).prop_map(|(i, v)| Op::RelaxedStore(i, v)),
        (idx.clone(), word()).prop_map(|(i, v)| Op::ReleaseStore(i, v)),
        (idx.clone(), word(), word()).prop_map(|(i, o, n)| Op::RelaxedCas(i, o, n)),
        (idx.clone(), word(), word()).prop_map(|(i, o, n)| Op::ReleaseCas(i, o, n)),
        (idx, word(), word()).prop_map(|(i, o, n)| Op::AcqRelCas(i, o, n)),
    ]
}

/// Applies `op`; returns the word it produced, if any.
fn apply<B: WordOrdering>(cells: &[WordCell; CELLS], op: &Op) -> Option<Word> {
    let at = |i: usize| cells[i].handle();
    match *op {
        Op::AcquireLoad(i) => Some(B::acquire_load(at(i))),
        Op::RelaxedLoad(i) => Some(B::relaxed_load(at(i))),
        Op::RelaxedStore(i, v) => {
            B::relaxed_store(at(i), v);
            None
        }
        Op::ReleaseStore(i, v) => {
            B::release_store(at(i), v);
            None
        }
        Op::RelaxedCas(i, o, n) => Some(B::relaxed_cas(at(i), o, n)),
        Op::ReleaseCas(i, o, n) => Some(B::release_cas(at(i), o, n)),
        Op::AcqRelCas(i, o, n) => Some(B::acq_rel_cas(at(i), o, n)),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn backends_agree_on_random_sequences(
        init in proptest::array::uniform3(word()),
        ops in proptest::collection::vec(op(), 1..200),
    ) {
        let native = init.map(WordCell::new);
        let emulated = init.map(WordCell::new);

        for (step, op) in ops.iter().enumerate() {
            let a = apply::<Native>(&native, op);
            let b = apply::<Emulated>(&emulated, op);
            prop_assert_eq!(a, b, "step {} diverged on {:?}", step, op);
        }

        for i in 0..CELLS {
            prop_assert_eq!(
                Native::relaxed_load(native[i].handle()),
                Emulated::relaxed_load(emulated[i].handle()),
                "cell {} differs after the run", i
            );
        }
    }
}
