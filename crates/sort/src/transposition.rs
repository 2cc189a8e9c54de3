//! Shrinking-window transposition sort.
//!
//! Alternates a forward and a backward pass of adjacent compare-exchanges over a window that
//! loses its last wire after each forward pass and its first wire after each backward pass. Every
//! pass walks the whole window whether or not anything moved, so the `n(n - 1) / 2` cost is fixed.
//! It is much slower than [`crate::network`] but simple enough to serve as its oracle.
use ocirc_primitives::{Exchange, Indexable, Oblivious, Value};

/// Calls `f(i, i + 1)` for every adjacent compare-exchange of the transposition schedule for `n`
/// elements, in order.
pub(crate) fn for_each_pair<F: FnMut(usize, usize)>(n: usize, mut f: F) {
  if n < 2 {
    return;
  }
  let mut left = 0;
  let mut right = n - 1;
  while left < right {
    for i in left..right {
      f(i, i + 1);
    }
    right -= 1;
    if right <= left {
      break;
    }
    for i in (left..right).rev() {
      f(i, i + 1);
    }
    left += 1;
  }
}

/// Sorts the given array with the transposition schedule.
/// # Arguments
/// * `arr` - A mutable reference to an array that implements the `Indexable` trait.
/// # Oblivious
/// * Data-independent memory access pattern
/// * Leaks: `arr.len()`
/// # Type Parameters
/// * `T` - The type of the elements in the array. Must implement `Value`.
/// * `C` - The type of the container. Must implement `Indexable<T>`.
pub fn transposition_sort<T, C>(arr: &mut C)
where
  T: Value,
  C: Indexable<T> + ?Sized,
{
  transposition_sort_with(arr, Oblivious);
}

/// Same as [`transposition_sort`], performing every compare-exchange through `exchange`.
pub fn transposition_sort_with<T, C, E>(arr: &mut C, mut exchange: E)
where
  T: Value,
  C: Indexable<T> + ?Sized,
  E: Exchange,
{
  let n = arr.len();
  for_each_pair(n, |i, j| exchange.exchange(arr, i, j));
}

/// Consumes `sequence` and returns it sorted.
pub fn transposition_sorted<T: Value>(mut sequence: Vec<T>) -> Vec<T> {
  transposition_sort(&mut sequence);
  sequence
}
