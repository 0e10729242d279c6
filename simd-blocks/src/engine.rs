//! Multi-block dispatch engine.
//!
//! The engine feeds a byte range through a block cipher's batch kernels. A *batch kernel* is a
//! round function transforming `N` vector registers of packed cipher blocks in place, given the
//! expanded key table and round count:
//!
//! ```text
//! Fn(&mut [V; N], &K, u32)
//! ```
//!
//! Kernels are handed to the engine widest first. While [`ModeFlags::ALLOW_PARALLEL`] is set, each
//! one runs for as long as a whole batch of input remains, then the next narrower one takes over.
//! The narrow kernel also runs as a parallel stage when it spans more than one register. What is
//! left after the parallel stages goes through the narrow kernel one cipher block at a time: the
//! block sits in the low bytes of the first register and every other byte is zero. For 64-bit
//! block ciphers this means the last odd block still runs through a full-register kernel, and the
//! output of the zero half is discarded.
//!
//! Around each kernel call the engine
//!
//! - loads the input registers, or synthesizes them from a big-endian counter
//!   ([`ModeFlags::IN_BLOCK_IS_COUNTER`]) and writes the next unused counter value back,
//! - xors the mask into the input ([`ModeFlags::XOR_INPUT`]) or into the kernel output,
//! - stores the result.
//!
//! Every register is read in full before the output it produces is written, so the input may be
//! the output buffer and the xor mask may overlap either of them (through the raw-pointer entry
//! points of the `hazmat` module).
//!
//! The call returns the number of bytes left over that don't make up a whole cipher block. They
//! sit at the logical end of the traversal: after the last block going forward, before the first
//! one in [`ModeFlags::REVERSE_DIRECTION`].
//!
//! The shapes used by cipher implementations are instantiations of [`process_blocks`] and
//! [`process_blocks3`]:
//!
//! | shape          | layout       | kernels              |
//! |----------------|--------------|----------------------|
//! | 64-bit, 6x2    | [`Block64`]  | narrow 2, wide 6     |
//! | 64-bit, 4x1    | [`Block64`]  | narrow 1, wide 4     |
//! | 128-bit, 6x1   | [`Block128`] | narrow 1, wide 6     |
//! | 128-bit, 4x1   | [`Block128`] | narrow 1, wide 4     |
//! | 128-bit, 6x2   | [`Block128`] | narrow 2, wide 6     |
//!
//! [`Block64`]: crate::Block64
//! [`Block128`]: crate::Block128

use crate::{
    BlockLayout, BlockStream, Error, ModeFlags, RegisterBytes, SubkeyTable, VECTOR_SIZE, Vector,
    counter, cursor::BufferCursor, stream::RawStream,
};
use core::{marker::PhantomData, ptr};

/// Process `stream` with a pair of batch kernels.
///
/// `wide` runs first (when [`ModeFlags::ALLOW_PARALLEL`] is set), `narrow` handles the rest.
/// Returns the number of trailing bytes that don't form a whole cipher block; those bytes of the
/// output are left untouched.
///
/// # Errors
/// If the buffers of `stream` don't cover what the call reads and writes, if there is less than
/// one cipher block to process, or if [`ModeFlags::IN_BLOCK_IS_COUNTER`] doesn't match the kind of
/// stream.
pub fn process_blocks<L, V, K, const N: usize, const W: usize>(
    layout: L,
    narrow: impl Fn(&mut [V; N], &K, u32),
    wide: impl Fn(&mut [V; W], &K, u32),
    subkeys: &SubkeyTable<K>,
    stream: BlockStream<'_>,
    flags: ModeFlags,
) -> Result<usize, Error>
where
    L: BlockLayout,
    V: Vector,
{
    let raw = stream.into_raw::<L>(flags)?;

    // SAFETY: `into_raw` checked that every buffer covers the region this call touches
    Ok(unsafe { run2(layout, narrow, wide, subkeys, raw, flags) })
}

/// Process `stream` with three batch kernels: `widest`, then `wide`, then `narrow`.
///
/// See [`process_blocks`].
///
/// # Errors
/// See [`process_blocks`].
pub fn process_blocks3<L, V, K, const N: usize, const W: usize, const X: usize>(
    layout: L,
    narrow: impl Fn(&mut [V; N], &K, u32),
    wide: impl Fn(&mut [V; W], &K, u32),
    widest: impl Fn(&mut [V; X], &K, u32),
    subkeys: &SubkeyTable<K>,
    stream: BlockStream<'_>,
    flags: ModeFlags,
) -> Result<usize, Error>
where
    L: BlockLayout,
    V: Vector,
{
    let raw = stream.into_raw::<L>(flags)?;

    // SAFETY: `into_raw` checked that every buffer covers the region this call touches
    Ok(unsafe { run3(layout, narrow, wide, widest, subkeys, raw, flags) })
}

/// Two-kernel engine body.
///
/// # Safety
/// Every buffer of `raw` must be valid for the reads (and, for the output and a counter input,
/// writes) the call performs.
pub(crate) unsafe fn run2<L, V, K, const N: usize, const W: usize>(
    _layout: L,
    narrow: impl Fn(&mut [V; N], &K, u32),
    wide: impl Fn(&mut [V; W], &K, u32),
    subkeys: &SubkeyTable<K>,
    raw: RawStream,
    flags: ModeFlags,
) -> usize
where
    L: BlockLayout,
    V: Vector,
{
    let mut engine = Engine::<L, K>::new(subkeys, raw, flags);

    // SAFETY: the caller guarantees `raw` covers every block the stages and the tail touch
    unsafe {
        if flags.is_parallel() {
            engine.stage::<V, W>(&wide);
            if N > 1 {
                engine.stage::<V, N>(&narrow);
            }
        }

        engine.tail::<V, N>(&narrow);
    }

    engine.remaining
}

/// Three-kernel engine body.
///
/// # Safety
/// See [`run2`].
pub(crate) unsafe fn run3<L, V, K, const N: usize, const W: usize, const X: usize>(
    _layout: L,
    narrow: impl Fn(&mut [V; N], &K, u32),
    wide: impl Fn(&mut [V; W], &K, u32),
    widest: impl Fn(&mut [V; X], &K, u32),
    subkeys: &SubkeyTable<K>,
    raw: RawStream,
    flags: ModeFlags,
) -> usize
where
    L: BlockLayout,
    V: Vector,
{
    let mut engine = Engine::<L, K>::new(subkeys, raw, flags);

    // SAFETY: the caller guarantees `raw` covers every block the stages and the tail touch
    unsafe {
        if flags.is_parallel() {
            engine.stage::<V, X>(&widest);
            engine.stage::<V, W>(&wide);
            if N > 1 {
                engine.stage::<V, N>(&narrow);
            }
        }

        engine.tail::<V, N>(&narrow);
    }

    engine.remaining
}

/// Kernel batch widths accepted by the engine.
struct Width<const N: usize>;

impl<const N: usize> Width<N> {
    const CHECK: () = assert!(N > 0 && N <= 8, "batch kernels take 1 to 8 registers");
}

/// State of one engine call.
struct Engine<'k, L, K> {
    subkeys: &'k SubkeyTable<K>,
    input: BufferCursor,
    xor: Option<BufferCursor>,
    output: BufferCursor,
    counter: bool,
    xor_input: bool,
    remaining: usize,
    layout: PhantomData<L>,
}

impl<'k, L: BlockLayout, K> Engine<'k, L, K> {
    fn new(subkeys: &'k SubkeyTable<K>, raw: RawStream, flags: ModeFlags) -> Self {
        debug_assert!(!raw.input.is_null());
        debug_assert!(!raw.output.is_null());
        debug_assert!(raw.length >= L::BLOCK_SIZE);

        let reverse = flags.is_reverse();
        let length = raw.length;

        let (advance_in, advance_out) = (flags.advances_input(), flags.advances_output());

        let input = BufferCursor::new(raw.input.cast_mut(), length, advance_in, reverse);
        let output = BufferCursor::new(raw.output, length, advance_out, reverse);
        let xor = (!raw.xor.is_null())
            .then(|| BufferCursor::new(raw.xor.cast_mut(), length, true, reverse));

        Self {
            subkeys,
            input,
            xor,
            output,
            counter: flags.is_counter(),
            xor_input: flags.contains(ModeFlags::XOR_INPUT),
            remaining: length,
            layout: PhantomData,
        }
    }

    /// Run `kernel` for as long as a whole batch of `N` registers remains.
    ///
    /// # Safety
    /// The buffers the engine was built over must be valid for the call.
    #[inline(always)]
    unsafe fn stage<V: Vector, const N: usize>(&mut self, kernel: &impl Fn(&mut [V; N], &K, u32)) {
        let () = Width::<N>::CHECK;
        let batch = N * VECTOR_SIZE;

        while self.remaining >= batch {
            let mut blocks = [V::zero(); N];

            if self.counter {
                let mut images = [RegisterBytes::default(); N];
                let fill = |ctr: &mut [u8]| counter::counter_batch::<L>(ctr, &mut images);
                // SAFETY: the counter block lies at the input anchor
                unsafe { self.with_counter(fill) };
                for (block, image) in blocks.iter_mut().zip(&images) {
                    *block = V::from_bytes(image);
                }
            } else {
                for block in blocks.iter_mut() {
                    // SAFETY: `batch <= remaining` bytes of input are left
                    let image = unsafe { load(self.input.next(VECTOR_SIZE), VECTOR_SIZE) };
                    *block = V::from_bytes(&image);
                }
            }

            if self.xor_input {
                // SAFETY: `batch <= remaining` bytes of the mask are left
                unsafe { self.apply_xor(&mut blocks, VECTOR_SIZE) };
            }

            kernel(&mut blocks, self.subkeys.table(), self.subkeys.rounds());

            if !self.xor_input {
                // SAFETY: as above
                unsafe { self.apply_xor(&mut blocks, VECTOR_SIZE) };
            }

            for block in &blocks {
                // SAFETY: `batch <= remaining` bytes of output are left
                unsafe { store(self.output.next(VECTOR_SIZE), &block.to_bytes(), VECTOR_SIZE) };
            }

            self.remaining -= batch;
        }
    }

    /// Run `kernel` on one cipher block at a time until less than a block remains.
    ///
    /// # Safety
    /// The buffers the engine was built over must be valid for the call.
    #[inline(always)]
    unsafe fn tail<V: Vector, const N: usize>(&mut self, kernel: &impl Fn(&mut [V; N], &K, u32)) {
        let () = Width::<N>::CHECK;
        let size = L::BLOCK_SIZE;

        while self.remaining >= size {
            let mut image = RegisterBytes::default();

            if self.counter {
                // SAFETY: the counter block lies at the input anchor
                unsafe {
                    self.with_counter(|ctr| {
                        image[..size].copy_from_slice(ctr);
                        counter::advance_counter(ctr, 1);
                    });
                }
            } else {
                // SAFETY: at least one block of input is left
                image = unsafe { load(self.input.next(size), size) };
            }

            let mut blocks = [V::zero(); N];
            blocks[0] = V::from_bytes(&image);

            if self.xor_input {
                // SAFETY: at least one block of the mask is left
                unsafe { self.apply_xor(&mut blocks[..1], size) };
            }

            kernel(&mut blocks, self.subkeys.table(), self.subkeys.rounds());

            if !self.xor_input {
                // SAFETY: as above
                unsafe { self.apply_xor(&mut blocks[..1], size) };
            }

            // SAFETY: at least one block of output is left
            unsafe { store(self.output.next(size), &blocks[0].to_bytes(), size) };
            self.remaining -= size;
        }
    }

    /// Xor the next `size`-byte chunk of the mask (if any) into each of `blocks`.
    ///
    /// # Safety
    /// `blocks.len() * size` bytes of the mask must be left.
    #[inline(always)]
    unsafe fn apply_xor<V: Vector>(&mut self, blocks: &mut [V], size: usize) {
        if let Some(xor) = self.xor.as_mut() {
            for block in blocks.iter_mut() {
                // SAFETY: guaranteed by the caller
                let mask = unsafe { load(xor.next(size), size) };
                *block = block.xor(V::from_bytes(&mask));
            }
        }
    }

    /// Run `f` on the counter block held at the input anchor, then write it back.
    ///
    /// # Safety
    /// The input anchor must be valid for reads and writes of one cipher block.
    #[inline(always)]
    unsafe fn with_counter(&mut self, f: impl FnOnce(&mut [u8])) {
        let size = L::BLOCK_SIZE;
        let anchor = self.input.anchor();

        // SAFETY: guaranteed by the caller
        let mut ctr = unsafe { load(anchor, size) };
        f(&mut ctr[..size]);
        // SAFETY: guaranteed by the caller
        unsafe { store(anchor, &ctr, size) };
    }
}

/// Copy `size` bytes at `src` into the low end of a zeroed register image.
///
/// # Safety
/// `src` must be valid for reads of `size <= VECTOR_SIZE` bytes.
#[inline(always)]
unsafe fn load(src: *const u8, size: usize) -> RegisterBytes {
    debug_assert!(size <= VECTOR_SIZE);
    let mut image = RegisterBytes::default();
    // SAFETY: guaranteed by the caller; `image` is a local of `VECTOR_SIZE` bytes
    unsafe { ptr::copy_nonoverlapping(src, image.as_mut_ptr(), size) };
    image
}

/// Copy the low `size` bytes of a register image to `dst`.
///
/// # Safety
/// `dst` must be valid for writes of `size <= VECTOR_SIZE` bytes.
#[inline(always)]
unsafe fn store(dst: *mut u8, image: &RegisterBytes, size: usize) {
    debug_assert!(size <= VECTOR_SIZE);
    // SAFETY: guaranteed by the caller
    unsafe { ptr::copy_nonoverlapping(image.as_ptr(), dst, size) };
}
