//! Traits for conditional move and swap operations.
use crate::indexable::Indexable;

/// A trait for conditionally moving values with constant memory trace.
///
pub trait Cmov: Sized {
  /// Conditionally move `other` into `self` based on `choice`.
  /// @Oblivious
  fn cmov(&mut self, other: &Self, choice: bool);

  /// Conditionally exchange `other` and `self` based on `choice`.
  /// @Oblivious
  #[inline]
  fn cxchg(&mut self, other: &mut Self, choice: bool)
  where
    Self: Copy,
  {
    let tmp = *self;
    self.cmov(other, choice);
    other.cmov(&tmp, choice);
  }

  /// Conditionally set `self` to either `val_false` or `val_true` based on `choice`.
  /// @Oblivious
  #[inline]
  fn cset(&mut self, val_false: &Self, val_true: &Self, choice: bool) {
    self.cmov(val_true, choice);
    self.cmov(val_false, !choice);
  }
}

/// An orderable element that can travel through a comparator network.
///
/// Values are copied, never referenced, and carry no identity beyond their ordering.
pub trait Value: Ord + Cmov + Copy {}

impl<T> Value for T where T: Ord + Cmov + Copy {}

/// Conditionally swap two values with constant memory trace.
///
#[inline]
pub fn cswap<T: Cmov + Copy>(first: &mut T, second: &mut T, choice: bool) {
  first.cxchg(second, choice);
}

/// Returns `(min(a, b), max(a, b))` without branching on which one is larger.
/// @Oblivious
#[inline]
pub fn cminmax<T: Value>(a: T, b: T) -> (T, T) {
  let mut lo = a;
  let mut hi = b;
  let choice = a > b;
  cswap(&mut lo, &mut hi, choice);
  (lo, hi)
}

/// Adds cswap for Indexables of cswap-able types.
pub trait CswapIndex<T> {
  /// Conditionally swap the elements at `i` and `j` based on `choice`.
  /// @Oblivious
  fn cswap(&mut self, i: usize, j: usize, choice: bool);
}

impl<T, C> CswapIndex<T> for C
where
  C: Indexable<T> + ?Sized,
  T: Cmov + Copy,
{
  #[inline]
  fn cswap(&mut self, i: usize, j: usize, choice: bool) {
    let mut left = self[i];
    let mut right = self[j];
    cswap(&mut left, &mut right, choice);
    self[i] = left;
    self[j] = right;
  }
}
