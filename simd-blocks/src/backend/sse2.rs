//! SSE2 registers for x86/x86_64 CPUs.
//!
//! Only built where SSE2 is statically enabled: always on x86_64, and on 32-bit x86 when the
//! target has the `sse2` feature (i686 and up). i586 targets get the portable backend only.

#![allow(unused_unsafe, clippy::cast_possible_wrap)]

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use super::Vector;
use crate::RegisterBytes;

impl Vector for __m128i {
    #[inline(always)]
    fn zero() -> Self {
        // SAFETY: SSE2 is statically enabled, see module docs
        unsafe { _mm_setzero_si128() }
    }

    #[inline(always)]
    fn from_bytes(bytes: &RegisterBytes) -> Self {
        // SAFETY: unaligned load of exactly 16 readable bytes; SSE2 is available
        unsafe { _mm_loadu_si128(bytes.as_ptr().cast()) }
    }

    #[inline(always)]
    fn to_bytes(self) -> RegisterBytes {
        let mut out = RegisterBytes::default();
        // SAFETY: unaligned store of exactly 16 writable bytes; SSE2 is available
        unsafe { _mm_storeu_si128(out.as_mut_ptr().cast(), self) };
        out
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        // SAFETY: SSE2 is available
        unsafe { _mm_xor_si128(self, rhs) }
    }

    #[inline(always)]
    fn add32(self, rhs: Self) -> Self {
        // SAFETY: SSE2 is available
        unsafe { _mm_add_epi32(self, rhs) }
    }

    #[inline(always)]
    fn sub32(self, rhs: Self) -> Self {
        // SAFETY: SSE2 is available
        unsafe { _mm_sub_epi32(self, rhs) }
    }

    #[inline(always)]
    fn rotl32(self, n: u32) -> Self {
        let n = (n % 32) as i32;
        // SAFETY: SSE2 is available. Shift counts of 32 clear the lane, so `n == 0` is the
        // identity.
        unsafe {
            let left = _mm_sll_epi32(self, _mm_cvtsi32_si128(n));
            let right = _mm_srl_epi32(self, _mm_cvtsi32_si128(32 - n));
            _mm_or_si128(left, right)
        }
    }

    #[inline(always)]
    fn splat32(word: u32) -> Self {
        // SAFETY: SSE2 is available
        unsafe { _mm_set1_epi32(word as i32) }
    }
}

#[cfg(test)]
mod tests {
    use super::__m128i;
    use crate::{U8x16, Vector};
    use hex_literal::hex;

    const A: [u8; 16] = hex!("00112233445566778899aabbccddeeff");
    const B: [u8; 16] = hex!("0f1e2d3c4b5a69788796a5b4c3d2e1f0");

    fn agree(f: impl Fn(__m128i, __m128i) -> __m128i, g: impl Fn(U8x16, U8x16) -> U8x16) {
        let simd = f(__m128i::from_bytes(&A), __m128i::from_bytes(&B)).to_bytes();
        let soft = g(U8x16::from_bytes(&A), U8x16::from_bytes(&B)).to_bytes();
        assert_eq!(simd, soft);
    }

    #[test]
    fn matches_soft() {
        agree(<__m128i as Vector>::xor, <U8x16 as Vector>::xor);
        agree(<__m128i as Vector>::add32, <U8x16 as Vector>::add32);
        agree(<__m128i as Vector>::sub32, <U8x16 as Vector>::sub32);

        for n in [0, 1, 7, 8, 25, 31, 32, 45] {
            agree(|a, _| a.rotl32(n), |a, _| a.rotl32(n));
        }

        agree(
            |_, _| __m128i::splat32(0xdead_beef),
            |_, _| U8x16::splat32(0xdead_beef),
        );
    }

    #[test]
    fn round_trip_bytes() {
        assert_eq!(__m128i::from_bytes(&A).to_bytes(), A);
        assert_eq!(__m128i::zero().to_bytes(), [0u8; 16]);
    }
}
