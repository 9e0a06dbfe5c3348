//! Benchmark workloads for advec.
//!
//! Provides deterministic position sequences so every container under
//! comparison sees exactly the same inserts and erases:
//!
//! - [`insert_positions`]: one valid insertion index per step of a growing array
//! - [`erase_positions`]: one valid erase index per step of a shrinking array
//! - [`filled`]: a `GrowableArray` of `0..len`

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use advec_array::GrowableArray;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Insertion indices for growing an array from 0 to `n` elements.
///
/// Entry `i` lies in `0..=i`, valid when the array holds `i` elements.
pub fn insert_positions(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|len| (rng.next_u64() % (len as u64 + 1)) as usize)
        .collect()
}

/// Erase indices for shrinking an array of `n` elements to empty.
///
/// Entry `i` lies in `0..n - i`.
pub fn erase_positions(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|i| (rng.next_u64() % (n - i) as u64) as usize)
        .collect()
}

/// An array holding `0..len`, at capacity exactly `len`.
pub fn filled(len: usize) -> GrowableArray<u64> {
    let mut array = GrowableArray::with_capacity(len).unwrap();
    for value in 0..len as u64 {
        array.push(value).unwrap();
    }
    array
}
