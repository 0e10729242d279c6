//! NEON registers for AArch64 CPUs.
//!
//! Only built for little-endian targets, where lane `i` of a `uint32x4_t` reinterpretation is
//! bytes `4*i..4*i+4` of the register image, matching the portable backend.

#![allow(unused_unsafe, clippy::cast_possible_wrap)]

use super::Vector;
use crate::RegisterBytes;
use core::arch::aarch64::*;

impl Vector for uint8x16_t {
    #[inline(always)]
    fn zero() -> Self {
        // SAFETY: NEON is part of the AArch64 baseline
        unsafe { vdupq_n_u8(0) }
    }

    #[inline(always)]
    fn from_bytes(bytes: &RegisterBytes) -> Self {
        // SAFETY: load of exactly 16 readable bytes
        unsafe { vld1q_u8(bytes.as_ptr()) }
    }

    #[inline(always)]
    fn to_bytes(self) -> RegisterBytes {
        let mut out = RegisterBytes::default();
        // SAFETY: store of exactly 16 writable bytes
        unsafe { vst1q_u8(out.as_mut_ptr(), self) };
        out
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        // SAFETY: NEON is part of the AArch64 baseline
        unsafe { veorq_u8(self, rhs) }
    }

    #[inline(always)]
    fn add32(self, rhs: Self) -> Self {
        // SAFETY: NEON is part of the AArch64 baseline
        unsafe {
            vreinterpretq_u8_u32(vaddq_u32(
                vreinterpretq_u32_u8(self),
                vreinterpretq_u32_u8(rhs),
            ))
        }
    }

    #[inline(always)]
    fn sub32(self, rhs: Self) -> Self {
        // SAFETY: NEON is part of the AArch64 baseline
        unsafe {
            vreinterpretq_u8_u32(vsubq_u32(
                vreinterpretq_u32_u8(self),
                vreinterpretq_u32_u8(rhs),
            ))
        }
    }

    #[inline(always)]
    fn rotl32(self, n: u32) -> Self {
        let n = (n % 32) as i32;
        // SAFETY: NEON is part of the AArch64 baseline. Negative counts shift right, and a right
        // shift by 32 clears the lane, so `n == 0` is the identity.
        unsafe {
            let words = vreinterpretq_u32_u8(self);
            let left = vshlq_u32(words, vdupq_n_s32(n));
            let right = vshlq_u32(words, vdupq_n_s32(n - 32));
            vreinterpretq_u8_u32(vorrq_u32(left, right))
        }
    }

    #[inline(always)]
    fn splat32(word: u32) -> Self {
        // SAFETY: NEON is part of the AArch64 baseline
        unsafe { vreinterpretq_u8_u32(vdupq_n_u32(word)) }
    }
}
