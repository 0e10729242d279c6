//! Property-based tests.

#![cfg(any(unix, windows))]

use proptest::prelude::*;
use simd_blocks::{Block64, Block128, BlockStream, ModeFlags, U8x16, engine};

#[path = "support/toy.rs"]
mod toy;

fn flags(parallel: bool, reverse: bool, xor_input: bool) -> ModeFlags {
    let mut flags = ModeFlags::empty();
    flags.set(ModeFlags::ALLOW_PARALLEL, parallel);
    flags.set(ModeFlags::REVERSE_DIRECTION, reverse);
    flags.set(ModeFlags::XOR_INPUT, xor_input);
    flags
}

proptest! {
    /// Masking the input of encryption and the output of decryption with the same bytes round
    /// trips, whatever the kernel shapes on either side.
    #[test]
    fn round_trip_128(
        data in proptest::collection::vec(any::<u8>(), 16..400),
        mask_seed in any::<u8>(),
        parallel in any::<bool>(),
        reverse in any::<bool>(),
    ) {
        let mask = toy::pattern(data.len(), mask_seed);
        let mode = flags(parallel, reverse, true);

        let mut ciphertext = vec![0u8; data.len()];
        let remainder = engine::process_blocks(
            Block128,
            toy::encrypt::<U8x16, 2>,
            toy::encrypt::<U8x16, 6>,
            &toy::subkeys(),
            BlockStream::new(&data, &mut ciphertext).with_xor(&mask),
            mode,
        )
        .unwrap();

        let mut plaintext = ciphertext.clone();
        engine::process_blocks3(
            Block128,
            toy::decrypt::<U8x16, 1>,
            toy::decrypt::<U8x16, 4>,
            toy::decrypt::<U8x16, 8>,
            &toy::subkeys(),
            BlockStream::in_place(&mut plaintext).with_xor(&mask),
            mode - ModeFlags::XOR_INPUT,
        )
        .unwrap();

        let done = if reverse { remainder..data.len() } else { 0..data.len() - remainder };
        prop_assert_eq!(&plaintext[done.clone()], &data[done]);
    }

    /// The batch widths only change how blocks are grouped, never the output.
    #[test]
    fn batch_invariance_64(
        data in proptest::collection::vec(any::<u8>(), 8..400),
        reverse in any::<bool>(),
    ) {
        let mode = flags(true, reverse, false);

        let mut wide = vec![0u8; data.len()];
        let wide_rem = engine::process_blocks(
            Block64,
            toy::encrypt::<U8x16, 2>,
            toy::encrypt::<U8x16, 6>,
            &toy::subkeys(),
            BlockStream::new(&data, &mut wide),
            mode,
        )
        .unwrap();

        let mut single = vec![0u8; data.len()];
        let single_rem = engine::process_blocks(
            Block64,
            toy::encrypt::<U8x16, 1>,
            toy::encrypt::<U8x16, 4>,
            &toy::subkeys(),
            BlockStream::new(&data, &mut single),
            mode - ModeFlags::ALLOW_PARALLEL,
        )
        .unwrap();

        prop_assert_eq!(wide_rem, data.len() % 8);
        prop_assert_eq!(wide_rem, single_rem);
        prop_assert_eq!(wide, single);
    }

    /// Processing in place gives the same bytes as processing into a separate buffer.
    #[test]
    fn aliasing_128(
        data in proptest::collection::vec(any::<u8>(), 16..300),
        parallel in any::<bool>(),
        reverse in any::<bool>(),
    ) {
        let mode = flags(parallel, reverse, false);

        let mut split = data.clone();
        engine::process_blocks(
            Block128,
            toy::encrypt::<U8x16, 1>,
            toy::encrypt::<U8x16, 6>,
            &toy::subkeys(),
            BlockStream::new(&data, &mut split),
            mode,
        )
        .unwrap();

        let mut in_place = data.clone();
        engine::process_blocks(
            Block128,
            toy::encrypt::<U8x16, 1>,
            toy::encrypt::<U8x16, 6>,
            &toy::subkeys(),
            BlockStream::in_place(&mut in_place),
            mode,
        )
        .unwrap();

        prop_assert_eq!(split, in_place);
    }

    /// Every block of a counter stream is the encryption of the counter advanced by its index.
    #[test]
    fn counter_stream_128(
        start in any::<u128>(),
        blocks in 1usize..20,
        parallel in any::<bool>(),
    ) {
        let mut counter = start.to_be_bytes();
        let mut output = vec![0u8; blocks * 16];
        engine::process_blocks(
            Block128,
            toy::encrypt::<U8x16, 2>,
            toy::encrypt::<U8x16, 6>,
            &toy::subkeys(),
            BlockStream::counter(&mut counter, &mut output),
            flags(parallel, false, false) | ModeFlags::IN_BLOCK_IS_COUNTER,
        )
        .unwrap();

        for (i, block) in output.chunks_exact(16).enumerate() {
            let mut expected = start.wrapping_add(i as u128).to_be_bytes();
            toy::encrypt_block(&mut expected);
            prop_assert_eq!(block, &expected[..]);
        }
        prop_assert_eq!(counter, start.wrapping_add(blocks as u128).to_be_bytes());
    }
}
