//! Median and other order statistics by full oblivious sorting.
//!
//! Selection algorithms such as quickselect branch on the data, so the only strategy here is to
//! sort a copy with one of the oblivious engines and read fixed positions.
use crate::engine::SortEngine;
use num_traits::AsPrimitive;
use ocirc_primitives::{Error, Result, Value};
use tracing::trace;

/// The middle of a sorted sequence.
///
/// Odd lengths have a single middle element, kept exactly. Even lengths have two; their mean is
/// only computed on request so no precision is lost before the caller asks for a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Median<T> {
  /// The element at `(n - 1) / 2`.
  Exact(T),
  /// The elements at `floor((n - 1) / 2)` and `ceil((n - 1) / 2)`, in that order.
  Midpoint(T, T),
}

impl<T: Copy> Median<T> {
  /// Returns the exact middle element, or `None` for an even-length input.
  pub fn exact(self) -> Option<T> {
    match self {
      Self::Exact(value) => Some(value),
      Self::Midpoint(..) => None,
    }
  }
}

impl<T: AsPrimitive<f64>> Median<T> {
  /// The median as a float: the middle element, or the mean of the two middle elements.
  ///
  /// Integers wider than 53 bits may round; use [`Median::exact`] or match on the variants when
  /// the exact element matters.
  pub fn as_f64(self) -> f64 {
    match self {
      Self::Exact(value) => value.as_(),
      Self::Midpoint(lo, hi) => (lo.as_() + hi.as_()) / 2.0,
    }
  }
}

/// Returns the median of `values`, sorting a copy with the Batcher engine.
///
/// For odd `n` this is the element at `(n - 1) / 2`; for even `n` it is the pair of elements at
/// `floor((n - 1) / 2)` and `ceil((n - 1) / 2)`, whose mean is [`Median::as_f64`].
/// # Errors
/// * [`Error::EmptyInput`] if `values` is empty.
pub fn median<T: Value>(values: &[T]) -> Result<Median<T>> {
  median_with(values, SortEngine::default())
}

/// Same as [`median`], sorting with `engine`.
pub fn median_with<T: Value>(values: &[T], engine: SortEngine) -> Result<Median<T>> {
  if values.is_empty() {
    return Err(Error::EmptyInput);
  }
  let n = values.len();
  let mut sorted = values.to_vec();
  engine.sort(&mut sorted);
  trace!(n, ?engine, "median over sorted copy");

  let lo = (n - 1) / 2;
  let hi = n / 2;
  if lo == hi {
    Ok(Median::Exact(sorted[lo]))
  } else {
    Ok(Median::Midpoint(sorted[lo], sorted[hi]))
  }
}

/// Returns the `k`-th smallest element of `values` (0-based).
/// # Errors
/// * [`Error::EmptyInput`] if `values` is empty.
/// * [`Error::IndexOutOfRange`] if `k >= values.len()`.
pub fn order_statistic<T: Value>(values: &[T], k: usize, engine: SortEngine) -> Result<T> {
  if values.is_empty() {
    return Err(Error::EmptyInput);
  }
  if k >= values.len() {
    return Err(Error::IndexOutOfRange { index: k, len: values.len() });
  }
  let mut sorted = values.to_vec();
  engine.sort(&mut sorted);
  Ok(sorted[k])
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  fn float_median<T: Value + AsPrimitive<f64>>(values: &[T]) -> Result<f64> {
    median(values).map(Median::as_f64)
  }

  #[test]
  fn test_median() {
    assert_eq!(float_median(&[3i32, 1, 2]), Ok(2.0));
    assert_eq!(float_median(&[4i32, 1, 3, 2]), Ok(2.5));
    assert_eq!(float_median(&[5i32]), Ok(5.0));
    assert_eq!(median::<i32>(&[]), Err(Error::EmptyInput));
    assert_eq!(median(&[3i32, 1, 2]), Ok(Median::Exact(2)));
    assert_eq!(median(&[4i32, 1, 3, 2]), Ok(Median::Midpoint(2, 3)));
  }

  #[test]
  fn test_median_is_exact_for_wide_integers() {
    let big = (1u64 << 53) + 1;
    assert_eq!(median(&[big]).map(Median::exact), Ok(Some(big)));
    assert_eq!(median(&[u64::MAX, 0, big]), Ok(Median::Exact(big)));
    assert_eq!(median(&[i128::MIN, i128::MAX]), Ok(Median::Midpoint(i128::MIN, i128::MAX)));
    assert_eq!(median(&[1u8, 2]).map(Median::exact), Ok(None));
  }

  #[test]
  fn test_median_engines_agree() {
    let values = [9u64, 2, 7, 7, 1, 100, 3, 4];
    assert_eq!(median_with(&values, SortEngine::Batcher), Ok(Median::Midpoint(4, 7)));
    assert_eq!(median_with(&values, SortEngine::Transposition), Ok(Median::Midpoint(4, 7)));
    assert_eq!(median_with(&values, SortEngine::Batcher).map(Median::as_f64), Ok(5.5));
    assert_eq!(median_with::<u64>(&[], SortEngine::Transposition), Err(Error::EmptyInput));
  }

  #[test]
  fn test_median_signed_and_input_untouched() {
    let values = vec![-10i64, 4, -3];
    assert_eq!(median(&values), Ok(Median::Exact(-3)));
    assert_eq!(values, [-10, 4, -3]);
    assert_eq!(float_median(&[-1i8, -2]), Ok(-1.5));
  }

  #[test]
  fn test_order_statistic() {
    let values = [40u32, 10, 30, 20];
    for engine in [SortEngine::Batcher, SortEngine::Transposition] {
      assert_eq!(order_statistic(&values, 0, engine), Ok(10));
      assert_eq!(order_statistic(&values, 3, engine), Ok(40));
      assert_eq!(
        order_statistic(&values, 4, engine),
        Err(Error::IndexOutOfRange { index: 4, len: 4 })
      );
      assert_eq!(order_statistic::<u32>(&[], 0, engine), Err(Error::EmptyInput));
    }
  }

  proptest! {
    #[test]
    fn test_median_matches_std(values in prop::collection::vec(-1000i32..1000, 1..100)) {
      let mut sorted = values.clone();
      sorted.sort_unstable();
      let n = sorted.len();
      let expected = (f64::from(sorted[(n - 1) / 2]) + f64::from(sorted[n / 2])) / 2.0;
      prop_assert_eq!(float_median(&values), Ok(expected));
    }
  }
}
