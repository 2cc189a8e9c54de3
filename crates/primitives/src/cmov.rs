//! Portable implementations of the `Cmov` trait.
//!
//! Integers are selected with an all-ones / all-zeros mask, so the only data-dependent value is
//! the mask itself and both operands are always read.
use crate::traits::Cmov;
use std::hint::black_box;

macro_rules! impl_cmov_for_int {
  ($($ty:ty),* $(,)?) => {
    $(
      impl Cmov for $ty {
        #[inline]
        fn cmov(&mut self, other: &Self, choice: bool) {
          let mask = <$ty>::wrapping_sub(0, black_box(choice) as $ty);
          *self ^= mask & (*self ^ *other);
        }
      }
    )*
  };
}

impl_cmov_for_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Cmov for bool {
  #[inline]
  fn cmov(&mut self, other: &Self, choice: bool) {
    let mut bits = *self as u8;
    bits.cmov(&(*other as u8), choice);
    *self = bits != 0;
  }
}

impl<A: Cmov, B: Cmov> Cmov for (A, B) {
  #[inline]
  fn cmov(&mut self, other: &Self, choice: bool) {
    self.0.cmov(&other.0, choice);
    self.1.cmov(&other.1, choice);
  }
}

impl<A: Cmov, B: Cmov, C: Cmov> Cmov for (A, B, C) {
  #[inline]
  fn cmov(&mut self, other: &Self, choice: bool) {
    self.0.cmov(&other.0, choice);
    self.1.cmov(&other.1, choice);
    self.2.cmov(&other.2, choice);
  }
}

/// Conditionally copies `src` over `dst` in 8, 4, 2 and 1 byte lanes.
///
/// Used by [`impl_cmov_for_pod!`] for plain-old-data records.
#[inline]
pub fn cmov_bytes(dst: &mut [u8], src: &[u8], choice: bool) {
  debug_assert_eq!(dst.len(), src.len());
  let mut i = 0;

  while i + 8 <= dst.len() {
    let mut lane = [0u8; 8];
    let mut other = [0u8; 8];
    lane.copy_from_slice(&dst[i..i + 8]);
    other.copy_from_slice(&src[i..i + 8]);
    let mut word = u64::from_ne_bytes(lane);
    word.cmov(&u64::from_ne_bytes(other), choice);
    dst[i..i + 8].copy_from_slice(&word.to_ne_bytes());
    i += 8;
  }

  while i + 4 <= dst.len() {
    let mut lane = [0u8; 4];
    let mut other = [0u8; 4];
    lane.copy_from_slice(&dst[i..i + 4]);
    other.copy_from_slice(&src[i..i + 4]);
    let mut word = u32::from_ne_bytes(lane);
    word.cmov(&u32::from_ne_bytes(other), choice);
    dst[i..i + 4].copy_from_slice(&word.to_ne_bytes());
    i += 4;
  }

  while i + 2 <= dst.len() {
    let mut lane = [0u8; 2];
    let mut other = [0u8; 2];
    lane.copy_from_slice(&dst[i..i + 2]);
    other.copy_from_slice(&src[i..i + 2]);
    let mut word = u16::from_ne_bytes(lane);
    word.cmov(&u16::from_ne_bytes(other), choice);
    dst[i..i + 2].copy_from_slice(&word.to_ne_bytes());
    i += 2;
  }

  if i < dst.len() {
    dst[i].cmov(&src[i], choice);
  }
}

/// Automatically implement the Cmov trait for a concrete type that is a pod.
/// usage:
/// ```ignore
/// #[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
/// #[repr(C)]
/// struct Entry { key: u32, tag: u32 }
/// impl_cmov_for_pod!(Entry);
/// ```
///
#[macro_export]
macro_rules! impl_cmov_for_pod {
  ($ty:ty) => {
    impl $crate::traits::Cmov for $ty
    where
      $ty: $crate::bytemuck::Pod,
    {
      #[inline]
      fn cmov(&mut self, other: &Self, choice: bool) {
        $crate::cmov::cmov_bytes(
          $crate::bytemuck::bytes_of_mut(self),
          $crate::bytemuck::bytes_of(other),
          choice,
        );
      }
    }
  };
}

#[cfg(test)]
mod tests {
  use super::*;
  use bytemuck::{Pod, Zeroable};

  #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Pod, Zeroable)]
  #[repr(C)]
  struct Record {
    key: u64,
    tag: u32,
    flags: u16,
    kind: u8,
    pad: u8,
  }

  crate::impl_cmov_for_pod!(Record);

  static_assertions::assert_impl_all!(Record: crate::traits::Value);
  static_assertions::assert_impl_all!(i128: crate::traits::Value);
  static_assertions::assert_impl_all!((u32, i64): crate::traits::Value);

  #[test]
  fn test_cmov() {
    for choice in [false, true] {
      let mut a = 0u64;
      let b = 0x12345678u64;
      a.cmov(&b, choice);
      assert_eq!(a, if choice { b } else { 0 });

      let mut a = -5i32;
      let b = 17i32;
      a.cmov(&b, choice);
      assert_eq!(a, if choice { b } else { -5 });

      let mut a = i8::MIN;
      let b = i8::MAX;
      a.cmov(&b, choice);
      assert_eq!(a, if choice { i8::MAX } else { i8::MIN });

      let mut a = 0u128;
      let b = u128::MAX;
      a.cmov(&b, choice);
      assert_eq!(a, if choice { b } else { 0 });

      let mut a = false;
      a.cmov(&true, choice);
      assert_eq!(a, choice);
    }
  }

  #[test]
  fn test_cmov_pod() {
    let original = Record { key: 1, tag: 2, flags: 3, kind: 4, pad: 0 };
    let other = Record { key: u64::MAX, tag: 0xdead_beef, flags: 0xffff, kind: 0x7f, pad: 9 };

    let mut a = original;
    a.cmov(&other, false);
    assert_eq!(a, original);
    a.cmov(&other, true);
    assert_eq!(a, other);
  }

  #[test]
  fn test_cmov_bytes_odd_length() {
    let mut dst = [0u8; 15];
    let src: Vec<u8> = (1..=15).collect();
    cmov_bytes(&mut dst, &src, false);
    assert_eq!(dst, [0u8; 15]);
    cmov_bytes(&mut dst, &src, true);
    assert_eq!(dst.as_slice(), src.as_slice());
  }
}
