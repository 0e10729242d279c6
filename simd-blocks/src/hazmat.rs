//! Hazardous materials: functionality which can be misused and needs to be used with care.
//!
//! <div class="warning">
//! These entry points take raw pointers so a mode of operation can pass buffers that overlap in
//! ways references cannot express, e.g. CBC decryption in place with the xor mask trailing the
//! ciphertext by one block. Nothing is validated beyond debug assertions.
//! </div>

use crate::{BlockLayout, ModeFlags, SubkeyTable, Vector, engine, stream::RawStream};

/// Pointer-level form of [`engine::process_blocks`].
///
/// Processes `length` bytes and returns the number of trailing bytes that don't form a whole
/// cipher block. `xor_blocks` may be null.
///
/// # Safety
/// - `in_blocks` must be valid for reads of every block the call reads: `length` bytes, or the
///   single anchored block/register when the input doesn't advance. With
///   [`ModeFlags::IN_BLOCK_IS_COUNTER`] the counter block must also be valid for writes.
/// - `out_blocks` must be valid for writes of every block the call writes.
/// - `xor_blocks`, unless null, must be valid for reads of `length` bytes.
/// - `length` must be at least one cipher block.
///
/// The buffers may overlap: each register is read in full before the output derived from it is
/// written.
#[allow(clippy::too_many_arguments)]
pub unsafe fn process_blocks_raw<L, V, K, const N: usize, const W: usize>(
    layout: L,
    narrow: impl Fn(&mut [V; N], &K, u32),
    wide: impl Fn(&mut [V; W], &K, u32),
    subkeys: &SubkeyTable<K>,
    in_blocks: *const u8,
    xor_blocks: *const u8,
    out_blocks: *mut u8,
    length: usize,
    flags: ModeFlags,
) -> usize
where
    L: BlockLayout,
    V: Vector,
{
    let raw = RawStream {
        input: in_blocks,
        xor: xor_blocks,
        output: out_blocks,
        length,
    };

    // SAFETY: forwarded from the caller
    unsafe { engine::run2(layout, narrow, wide, subkeys, raw, flags) }
}

/// Pointer-level form of [`engine::process_blocks3`].
///
/// # Safety
/// See [`process_blocks_raw`].
#[allow(clippy::too_many_arguments)]
pub unsafe fn process_blocks3_raw<L, V, K, const N: usize, const W: usize, const X: usize>(
    layout: L,
    narrow: impl Fn(&mut [V; N], &K, u32),
    wide: impl Fn(&mut [V; W], &K, u32),
    widest: impl Fn(&mut [V; X], &K, u32),
    subkeys: &SubkeyTable<K>,
    in_blocks: *const u8,
    xor_blocks: *const u8,
    out_blocks: *mut u8,
    length: usize,
    flags: ModeFlags,
) -> usize
where
    L: BlockLayout,
    V: Vector,
{
    let raw = RawStream {
        input: in_blocks,
        xor: xor_blocks,
        output: out_blocks,
        length,
    };

    // SAFETY: forwarded from the caller
    unsafe { engine::run3(layout, narrow, wide, widest, subkeys, raw, flags) }
}
