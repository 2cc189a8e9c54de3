//! Balanced divide-and-conquer reduction.
use num_traits::Zero;
use ocirc_primitives::{Error, Result};
use std::ops::Add;
use tracing::trace;

/// Maps and combines `items` as a balanced binary tree.
///
/// Slices of one or two items are mapped and combined in order; longer slices are split at
/// `len / 2` and the two halves reduced independently. `None` for an empty slice.
fn balanced<T, V, M, F>(items: &[T], mapper: &M, combine: &F) -> Option<V>
where
  M: Fn(&T) -> V,
  F: Fn(V, V) -> V,
{
  match items {
    [] => None,
    [a] => Some(mapper(a)),
    [a, b] => Some(combine(mapper(a), mapper(b))),
    _ => {
      let (left, right) = items.split_at(items.len() / 2);
      let left = balanced(left, mapper, combine)?;
      let right = balanced(right, mapper, combine)?;
      Some(combine(left, right))
    }
  }
}

/// Reduces `items` to a single value through `mapper` and the associative `combine`.
///
/// The combination tree has depth [`reduction_depth`]`(items.len())`, logarithmic in the input
/// length. `combine` only needs to be associative: operands are always passed in sequence order.
/// # Errors
/// * [`Error::EmptyInput`] if `items` is empty. Use [`reduce_or`] to supply an identity.
pub fn reduce<T, V, M, F>(items: &[T], mapper: M, combine: F) -> Result<V>
where
  M: Fn(&T) -> V,
  F: Fn(V, V) -> V,
{
  trace!(n = items.len(), depth = reduction_depth(items.len()), "balanced reduction");
  balanced(items, &mapper, &combine).ok_or(Error::EmptyInput)
}

/// Same as [`reduce`], returning `identity` for an empty input.
///
/// `identity` is not mixed into non-empty reductions.
pub fn reduce_or<T, V, M, F>(items: &[T], identity: V, mapper: M, combine: F) -> V
where
  M: Fn(&T) -> V,
  F: Fn(V, V) -> V,
{
  balanced(items, &mapper, &combine).unwrap_or(identity)
}

/// Sums `mapper` over `items` with a balanced tree of additions. Zero for an empty input.
pub fn tree_sum<T, V, M>(items: &[T], mapper: M) -> V
where
  V: Zero + Add<Output = V>,
  M: Fn(&T) -> V,
{
  reduce_or(items, V::zero(), mapper, |a, b| a + b)
}

/// Depth of the combination tree [`reduce`] builds for `n` items.
///
/// `0` for `n <= 1`, `1` for `n == 2`, and `ceil(log2 n)` in general.
pub const fn reduction_depth(n: usize) -> usize {
  match n {
    0 | 1 => 0,
    2 => 1,
    _ => {
      let left = reduction_depth(n / 2);
      let right = reduction_depth(n - n / 2);
      1 + if left > right { left } else { right }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;
  use rand::Rng;

  #[test]
  fn test_small_inputs() {
    let id = |x: &i64| *x;
    let sum = |a: i64, b: i64| a + b;
    assert_eq!(reduce(&[] as &[i64], id, sum), Err(Error::EmptyInput));
    assert_eq!(reduce(&[7i64], id, sum), Ok(7));
    assert_eq!(reduce(&[7i64, 5], id, sum), Ok(12));
    assert_eq!(reduce(&[7i64, 5, -2], id, sum), Ok(10));
    assert_eq!(reduce_or(&[] as &[i64], -1, id, sum), -1);
    assert_eq!(reduce_or(&[3i64, 4], -1, id, sum), 7);
  }

  #[test]
  fn test_tree_sum() {
    assert_eq!(tree_sum(&[] as &[u32], |x| *x), 0u32);
    assert_eq!(tree_sum(&[1u32, 2, 3, 4, 5], |x| *x), 15u32);
    let words = ["a", "bb", "ccc"];
    assert_eq!(tree_sum(&words, |w| w.len()), 6usize);
    assert_eq!(tree_sum(&[0.5f64, 0.25, 0.25], |x| *x), 1.0);
  }

  #[test]
  fn test_order_is_preserved() {
    let items: Vec<u32> = (0..37).collect();
    let concatenated = reduce(
      &items,
      |x| vec![*x],
      |mut a: Vec<u32>, b: Vec<u32>| {
        a.extend(b);
        a
      },
    );
    assert_eq!(concatenated, Ok(items));
  }

  #[test]
  fn test_depth_is_logarithmic() {
    for n in 1..=1000usize {
      let items = vec![1i64; n];
      let (total, depth) = reduce(
        &items,
        |x| (*x, 0usize),
        |a: (i64, usize), b: (i64, usize)| (a.0 + b.0, a.1.max(b.1) + 1),
      )
      .unwrap();
      assert_eq!(total, n as i64);
      assert_eq!(depth, reduction_depth(n), "n = {n}");
      assert_eq!(depth, n.next_power_of_two().trailing_zeros() as usize, "n = {n}");
    }
  }

  #[test]
  fn test_matches_naive_sum() {
    let mut rng = rand::rng();
    for n in (0..=1000).step_by(7) {
      let items: Vec<i64> = (0..n).map(|_| rng.random_range(-1_000_000..1_000_000)).collect();
      assert_eq!(tree_sum(&items, |x| *x), items.iter().sum::<i64>());
    }
  }

  proptest! {
    #[test]
    fn test_reduce_equals_fold(items in prop::collection::vec(any::<u64>(), 1..1000)) {
      let expected = items.iter().fold(0u64, |acc, x| acc.wrapping_add(*x));
      prop_assert_eq!(reduce(&items, |x| *x, u64::wrapping_add), Ok(expected));
    }
  }
}
