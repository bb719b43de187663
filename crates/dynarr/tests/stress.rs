//! Stress test: large append, copy and random-access workloads.
//!
//! Pushes a few hundred thousand elements, checks that reallocations stay
//! logarithmic, that copies are deep and independent, and that pseudo-random
//! reads and writes agree with a `Vec` shadow. Also moves an array of
//! instrumented elements through worker threads and checks nothing leaks.

use std::thread;

use dynarr::{DynArray, GrowthPolicy};
use dynarr_test_utils::{Ledger, Probe};

const COUNT: usize = 300_000;

/// Deterministic xorshift index stream.
struct Xorshift(u64);

impl Xorshift {
    fn next_index(&mut self, bound: usize) -> usize {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 % bound as u64) as usize
    }
}

#[test]
fn push_copy_and_random_access() {
    let mut arr = DynArray::new();
    let mut reallocations = 0usize;
    let mut last_ptr = arr.as_ptr();
    for i in 0..COUNT as u64 {
        arr.push(i);
        if arr.as_ptr() != last_ptr {
            reallocations += 1;
            last_ptr = arr.as_ptr();
        }
    }
    assert_eq!(arr.len(), COUNT);
    // floor(log2 COUNT) + 2
    let bound = (usize::BITS - COUNT.leading_zeros() + 1) as usize;
    assert!(
        reallocations <= bound,
        "{reallocations} reallocations for {COUNT} appends (bound {bound})"
    );

    let mut copy = arr.clone();
    assert_eq!(copy, arr);
    assert_ne!(copy.as_ptr(), arr.as_ptr());

    let mut shadow: Vec<u64> = arr.iter().copied().collect();
    let mut rng = Xorshift(0x9E37_79B9_7F4A_7C15);
    for round in 0..COUNT {
        let i = rng.next_index(COUNT);
        if round % 3 == 0 {
            copy[i] = round as u64;
            shadow[i] = round as u64;
        } else {
            assert_eq!(copy.at(i), Ok(&shadow[i]));
        }
    }
    assert_eq!(copy, shadow);
    assert!(arr.iter().copied().eq(0..COUNT as u64));
}

#[test]
fn grow_and_shrink_cycles() {
    let mut arr: DynArray<String> = DynArray::with_growth(GrowthPolicy::new(3, 16).unwrap());
    for cycle in 0..20 {
        arr.resize_with(5_000, || cycle.to_string());
        assert_eq!(arr.len(), 5_000);
        arr.truncate(100);
        if cycle % 4 == 0 {
            arr.shrink_to_fit();
            assert_eq!(arr.capacity(), 100);
        }
    }
    arr.clear();
    arr.shrink_to_fit();
    assert!(!arr.is_allocated());
}

#[test]
fn instrumented_arrays_cross_threads() {
    let ledger = Ledger::new();
    let handles: Vec<_> = (0..4u64)
        .map(|worker| {
            let mut arr: DynArray<Probe> =
                DynArray::try_from_fn(1_000, |i| ledger.make(worker * 1_000 + i as u64)).unwrap();
            thread::spawn(move || {
                let copy = arr.try_clone().unwrap();
                arr.truncate(500);
                copy.iter().map(Probe::value).sum::<u64>()
            })
        })
        .collect();

    let total: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, (0..4_000u64).sum::<u64>());
    ledger.assert_balanced();
}
