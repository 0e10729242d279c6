//! Native block sizes.

use crate::VECTOR_SIZE;

mod sealed {
    pub trait Sealed {}
}

/// How cipher blocks are packed into vector registers.
///
/// This is a property of a kernel family, not of an individual call: the same kernels always see
/// the same packing.
pub trait BlockLayout: sealed::Sealed + Copy {
    /// Size of one cipher block in bytes.
    const BLOCK_SIZE: usize;

    /// Number of cipher blocks held by one vector register.
    const BLOCKS_PER_VECTOR: usize = VECTOR_SIZE / Self::BLOCK_SIZE;
}

/// 64-bit block ciphers: two blocks are packed into each 128-bit register, the block at the lower
/// address in the low half.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Block64;

/// 128-bit block ciphers: one block per register.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Block128;

impl sealed::Sealed for Block64 {}
impl sealed::Sealed for Block128 {}

impl BlockLayout for Block64 {
    const BLOCK_SIZE: usize = 8;
}

impl BlockLayout for Block128 {
    const BLOCK_SIZE: usize = 16;
}
