//! In-place unbiased list shuffling.

use rand::Rng;

/// Shuffle `items` in place with the Fisher-Yates algorithm.
///
/// Walks from the last index down to 1, swapping each slot with a uniformly
/// chosen slot at or below it. Returns the number of exchanges made, which is
/// `len - 1` for two or more items and 0 otherwise.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) -> usize {
    let mut exchanges = 0;
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
        exchanges += 1;
    }
    exchanges
}
