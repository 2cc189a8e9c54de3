//! Compare-exchange strategies.
//!
//! A compare-exchange on wires `(i, j)` with `i < j` leaves `min` at `i` and `max` at `j`. The
//! strategy decides how: [`Oblivious`] computes both outcomes and selects one with [`Cmov`], so
//! the same loads, stores and arithmetic happen whatever the values are. [`Branching`] is the
//! textbook `if a > b { swap }` and is only meant as a reference when testing.
//!
//! [`Cmov`]: crate::traits::Cmov
use crate::indexable::Indexable;
use crate::traits::{CswapIndex, Value};

/// A way of performing one compare-exchange on an indexable.
pub trait Exchange {
  /// Orders `arr[i]` and `arr[j]` so that `arr[i] <= arr[j]` afterwards.
  fn exchange<T, C>(&mut self, arr: &mut C, i: usize, j: usize)
  where
    T: Value,
    C: Indexable<T> + ?Sized;
}

impl<E: Exchange + ?Sized> Exchange for &mut E {
  #[inline]
  fn exchange<T, C>(&mut self, arr: &mut C, i: usize, j: usize)
  where
    T: Value,
    C: Indexable<T> + ?Sized,
  {
    (**self).exchange(arr, i, j);
  }
}

/// Branch-free compare-exchange. This is the default strategy.
/// # Oblivious
/// * Both positions are always read and always written.
/// * The comparison bit only feeds a masked select, never a jump.
/// * For primitive integers the comparison itself is a single flag-setting instruction. Tuples
///   and `impl_cmov_for_pod!` records are compared through their `Ord` impl; a derived
///   lexicographic `Ord` short-circuits on the first differing field, so for those types only
///   the select is branch-free and the comparison may leak which field decided the order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Oblivious;

impl Exchange for Oblivious {
  #[inline]
  fn exchange<T, C>(&mut self, arr: &mut C, i: usize, j: usize)
  where
    T: Value,
    C: Indexable<T> + ?Sized,
  {
    debug_assert!(i < j && j < arr.len());
    let choice = arr[i] > arr[j];
    arr.cswap(i, j, choice);
  }
}

/// Branching compare-exchange.
/// # Not oblivious
/// * Writes only when the pair is out of order, so timing and the store trace depend on the
///   values. Functionally equivalent to [`Oblivious`]; use it as a testing oracle only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Branching;

impl Exchange for Branching {
  #[inline]
  fn exchange<T, C>(&mut self, arr: &mut C, i: usize, j: usize)
  where
    T: Value,
    C: Indexable<T> + ?Sized,
  {
    debug_assert!(i < j && j < arr.len());
    if arr[i] > arr[j] {
      let tmp = arr[i];
      arr[i] = arr[j];
      arr[j] = tmp;
    }
  }
}

/// Counts compare-exchanges performed through an inner strategy.
///
/// Used to check that the operation count of a sort depends only on the input length.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counting<E = Oblivious> {
  inner: E,
  count: usize,
}

impl<E> Counting<E> {
  /// Wraps `inner` with a zeroed counter.
  pub const fn new(inner: E) -> Self {
    Self { inner, count: 0 }
  }

  /// Number of compare-exchanges performed so far.
  pub const fn count(&self) -> usize {
    self.count
  }

  /// Resets the counter to zero.
  pub fn reset(&mut self) {
    self.count = 0;
  }

  /// Returns the wrapped strategy.
  pub fn into_inner(self) -> E {
    self.inner
  }
}

impl<E: Exchange> Exchange for Counting<E> {
  #[inline]
  fn exchange<T, C>(&mut self, arr: &mut C, i: usize, j: usize)
  where
    T: Value,
    C: Indexable<T> + ?Sized,
  {
    self.count += 1;
    self.inner.exchange(arr, i, j);
  }
}
