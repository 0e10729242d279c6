//! Vector register backends.

mod autodetect;
mod soft;

pub use self::soft::U8x16;

use crate::RegisterBytes;
use cfg_if::cfg_if;
use core::fmt;

cfg_if! {
    if #[cfg(all(
        any(target_arch = "x86_64", all(target_arch = "x86", target_feature = "sse2")),
        not(simd_blocks_backend = "soft")
    ))] {
        mod sse2;
    } else if #[cfg(all(
        target_arch = "aarch64",
        target_endian = "little",
        target_feature = "neon",
        not(simd_blocks_backend = "soft")
    ))] {
        mod neon;
    }
}

/// Operations the engine and batch kernels need from a 128-bit vector register.
///
/// Lane-wise 32-bit operations treat the register as four little-endian words, word `i` being
/// bytes `4*i..4*i+4` of the register image. Every implementation agrees on this, so a kernel
/// written against `Vector` produces identical bytes on every backend.
pub trait Vector: Copy {
    /// All-zero register.
    fn zero() -> Self;

    /// Load a register from its byte image.
    fn from_bytes(bytes: &RegisterBytes) -> Self;

    /// Store a register to its byte image.
    fn to_bytes(self) -> RegisterBytes;

    /// Bitwise exclusive or.
    #[must_use]
    fn xor(self, rhs: Self) -> Self;

    /// Lane-wise wrapping addition of 32-bit words.
    #[must_use]
    fn add32(self, rhs: Self) -> Self;

    /// Lane-wise wrapping subtraction of 32-bit words.
    #[must_use]
    fn sub32(self, rhs: Self) -> Self;

    /// Rotate every 32-bit word left by `n` bits (`n` is taken modulo 32).
    #[must_use]
    fn rotl32(self, n: u32) -> Self;

    /// Broadcast `word` to all four 32-bit lanes.
    fn splat32(word: u32) -> Self;
}

/// Vector instruction set an engine instantiation is built for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Backend {
    /// Portable implementation on [`U8x16`].
    Soft,

    /// x86/x86_64 SSE2 on `__m128i`.
    Sse2,

    /// AArch64 NEON on `uint8x16_t`.
    Neon,
}

impl Backend {
    /// Most capable backend supported by the running CPU.
    ///
    /// On x86 the result of the CPUID probe is cached after the first call.
    pub fn detect() -> Self {
        autodetect::detect()
    }

    /// Short lowercase name of this backend.
    pub fn name(self) -> &'static str {
        match self {
            Backend::Soft => "soft",
            Backend::Sse2 => "sse2",
            Backend::Neon => "neon",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
