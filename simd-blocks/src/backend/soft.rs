//! Portable pure Rust vector register.

use super::Vector;
use crate::{RegisterBytes, VECTOR_SIZE};
use core::fmt::{self, Debug};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Portable 128-bit register.
///
/// Stored as its 16-byte image with the alignment of a SIMD register, so the engine's loads and
/// stores are plain copies.
#[derive(Clone, Copy, Default, Eq, PartialEq)]
#[repr(C, align(16))]
pub struct U8x16(RegisterBytes);

impl U8x16 {
    #[inline(always)]
    fn words(self) -> [u32; 4] {
        let mut words = [0u32; 4];
        for (word, chunk) in words.iter_mut().zip(self.0.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        words
    }

    #[inline(always)]
    fn from_words(words: [u32; 4]) -> Self {
        let mut bytes = RegisterBytes::default();
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Self(bytes)
    }

    #[inline(always)]
    fn map2(self, rhs: Self, f: impl Fn(u32, u32) -> u32) -> Self {
        let (a, b) = (self.words(), rhs.words());
        Self::from_words([f(a[0], b[0]), f(a[1], b[1]), f(a[2], b[2]), f(a[3], b[3])])
    }
}

impl Vector for U8x16 {
    #[inline(always)]
    fn zero() -> Self {
        Self::default()
    }

    #[inline(always)]
    fn from_bytes(bytes: &RegisterBytes) -> Self {
        Self(*bytes)
    }

    #[inline(always)]
    fn to_bytes(self) -> RegisterBytes {
        self.0
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        let x = u128::from_ne_bytes(self.0) ^ u128::from_ne_bytes(rhs.0);
        Self(x.to_ne_bytes())
    }

    #[inline(always)]
    fn add32(self, rhs: Self) -> Self {
        self.map2(rhs, u32::wrapping_add)
    }

    #[inline(always)]
    fn sub32(self, rhs: Self) -> Self {
        self.map2(rhs, u32::wrapping_sub)
    }

    #[inline(always)]
    fn rotl32(self, n: u32) -> Self {
        let w = self.words();
        Self::from_words([
            w[0].rotate_left(n),
            w[1].rotate_left(n),
            w[2].rotate_left(n),
            w[3].rotate_left(n),
        ])
    }

    #[inline(always)]
    fn splat32(word: u32) -> Self {
        Self::from_words([word; 4])
    }
}

impl From<RegisterBytes> for U8x16 {
    #[inline]
    fn from(bytes: RegisterBytes) -> Self {
        Self(bytes)
    }
}

impl From<U8x16> for RegisterBytes {
    #[inline]
    fn from(v: U8x16) -> Self {
        v.0
    }
}

impl Debug for U8x16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U8x16(")?;
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for U8x16 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

const _: () = assert!(size_of::<U8x16>() == VECTOR_SIZE);
