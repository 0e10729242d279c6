//! Toy add-rotate-xor cipher used to drive the engine in tests.
//!
//! Every 32-bit little-endian word of a block is transformed independently, so the batch kernels
//! are exact for both 64-bit and 128-bit blocks and a scalar reference is easy to write.

#![allow(dead_code, unreachable_pub)]

use simd_blocks::{SubkeyTable, Vector};

pub type Keys = [u32; 4];

pub const KEYS: Keys = [0x0123_4567, 0x89ab_cdef, 0xdead_beef, 0x0bad_f00d];
pub const ROUNDS: u32 = 10;

pub fn subkeys() -> SubkeyTable<Keys> {
    SubkeyTable::new(KEYS, ROUNDS)
}

pub fn encrypt<V: Vector, const N: usize>(blocks: &mut [V; N], keys: &Keys, rounds: u32) {
    for r in 0..rounds as usize {
        let k = V::splat32(keys[r % 4] ^ r as u32);
        for block in blocks.iter_mut() {
            *block = block.add32(k).rotl32(5).xor(k);
        }
    }
}

pub fn decrypt<V: Vector, const N: usize>(blocks: &mut [V; N], keys: &Keys, rounds: u32) {
    for r in (0..rounds as usize).rev() {
        let k = V::splat32(keys[r % 4] ^ r as u32);
        for block in blocks.iter_mut() {
            *block = block.xor(k).rotl32(27).sub32(k);
        }
    }
}

fn word_encrypt(mut w: u32) -> u32 {
    for r in 0..ROUNDS as usize {
        let k = KEYS[r % 4] ^ r as u32;
        w = w.wrapping_add(k).rotate_left(5) ^ k;
    }
    w
}

fn word_decrypt(mut w: u32) -> u32 {
    for r in (0..ROUNDS as usize).rev() {
        let k = KEYS[r % 4] ^ r as u32;
        w = (w ^ k).rotate_left(27).wrapping_sub(k);
    }
    w
}

fn map_words(block: &mut [u8], f: fn(u32) -> u32) {
    for chunk in block.chunks_exact_mut(4) {
        let w = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        chunk.copy_from_slice(&f(w).to_le_bytes());
    }
}

/// Scalar reference encryption of one block of any multiple of 4 bytes.
pub fn encrypt_block(block: &mut [u8]) {
    map_words(block, word_encrypt);
}

/// Scalar reference decryption of one block of any multiple of 4 bytes.
pub fn decrypt_block(block: &mut [u8]) {
    map_words(block, word_decrypt);
}

/// Deterministic test data.
pub fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect()
}
