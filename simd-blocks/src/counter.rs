//! Big-endian counter arithmetic for CTR-like modes.
//!
//! A counter block is the big-endian integer held in one native cipher block. Increments are
//! defined on that integer value alone, independent of the byte order a backend loads registers
//! in: the carry always moves toward the first byte of the block.

use crate::{BlockLayout, RegisterBytes};

/// Add `by` to the big-endian integer stored in `counter`.
///
/// The carry propagates toward `counter[0]`; overflow of the whole slice wraps silently. Counter
/// exhaustion is the mode of operation's concern.
#[inline]
pub fn advance_counter(counter: &mut [u8], by: u64) {
    let mut carry = by;

    for byte in counter.iter_mut().rev() {
        if carry == 0 {
            break;
        }

        let sum = u64::from(*byte) + (carry & 0xff);
        *byte = sum.to_le_bytes()[0];
        carry = (carry >> 8) + (sum >> 8);
    }
}

/// Fill `registers` with consecutive counter blocks starting at the value stored in `counter`,
/// then store the next unused value back into `counter`.
///
/// Lane `j` of register `r` receives `c + r * L::BLOCKS_PER_VECTOR + j`, where `c` is the value
/// of `counter` on entry, and lanes are laid out from the low address of the register upward.
///
/// # Panics
/// If `counter` is shorter than one native block.
#[inline]
pub fn counter_batch<L: BlockLayout>(counter: &mut [u8], registers: &mut [RegisterBytes]) {
    let counter = &mut counter[..L::BLOCK_SIZE];

    for register in registers.iter_mut() {
        for lane in register.chunks_exact_mut(L::BLOCK_SIZE) {
            lane.copy_from_slice(counter);
            advance_counter(counter, 1);
        }
    }
}
