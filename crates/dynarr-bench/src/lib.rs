//! Benchmark inputs for the dynarr container.
//!
//! - [`filled`]: an array of `0..len` built by repeated appends.
//! - [`access_pattern`]: deterministic pseudo-random indices via seed.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dynarr::DynArray;

/// An array holding `0..len`, grown one append at a time.
pub fn filled(len: usize) -> DynArray<u64> {
    let mut arr = DynArray::new();
    for i in 0..len as u64 {
        arr.push(i);
    }
    arr
}

/// `count` indices in `0..len`, reproducible for a given `seed`.
pub fn access_pattern(len: usize, count: usize, seed: u64) -> Vec<usize> {
    assert!(len > 0, "access pattern over an empty range");
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) % len as u64) as usize
        })
        .collect()
}
