//! Buffers of a single engine call.

use crate::{BlockLayout, Error, ModeFlags, VECTOR_SIZE};
use core::ptr;

/// The input, optional xor mask and output of one engine call.
///
/// The number of bytes processed is the length of the output (or of the buffer, for in-place
/// streams). The engine consumes whole cipher blocks and leaves the trailing bytes that don't
/// form one untouched.
#[derive(Debug)]
pub struct BlockStream<'a> {
    buffers: Buffers<'a>,
    xor: Option<&'a [u8]>,
}

#[derive(Debug)]
enum Buffers<'a> {
    Split { input: &'a [u8], output: &'a mut [u8] },
    InPlace(&'a mut [u8]),
    Counter { counter: &'a mut [u8], output: &'a mut [u8] },
}

/// Validated pointers handed to the engine loops.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RawStream {
    pub(crate) input: *const u8,
    pub(crate) xor: *const u8,
    pub(crate) output: *mut u8,
    pub(crate) length: usize,
}

impl<'a> BlockStream<'a> {
    /// Read blocks from `input` and write the results to `output`.
    pub fn new(input: &'a [u8], output: &'a mut [u8]) -> Self {
        Self {
            buffers: Buffers::Split { input, output },
            xor: None,
        }
    }

    /// Transform `buffer` in place.
    pub fn in_place(buffer: &'a mut [u8]) -> Self {
        Self {
            buffers: Buffers::InPlace(buffer),
            xor: None,
        }
    }

    /// Encrypt consecutive values of the big-endian `counter` block into `output`.
    ///
    /// Must be combined with [`ModeFlags::IN_BLOCK_IS_COUNTER`]. On return `counter` holds the
    /// first value that wasn't used.
    ///
    /// The counter block is read from the start of `counter`, except with
    /// [`ModeFlags::REVERSE_DIRECTION`] where it sits in the last vector register of a buffer as
    /// long as `output`: at offset `output.len() - 16` (or 0 when the output is shorter than a
    /// register). A `counter` not covering that block is rejected with
    /// [`Error::InputTooShort`].
    pub fn counter(counter: &'a mut [u8], output: &'a mut [u8]) -> Self {
        Self {
            buffers: Buffers::Counter { counter, output },
            xor: None,
        }
    }

    /// Combine every block with the matching block of `mask`, before the kernel when
    /// [`ModeFlags::XOR_INPUT`] is set and after it otherwise.
    #[must_use]
    pub fn with_xor(mut self, mask: &'a [u8]) -> Self {
        self.xor = Some(mask);
        self
    }

    /// Number of bytes covered by this stream.
    pub fn len(&self) -> usize {
        match &self.buffers {
            Buffers::Split { output, .. } | Buffers::Counter { output, .. } => output.len(),
            Buffers::InPlace(buffer) => buffer.len(),
        }
    }

    /// Is the stream empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the buffers against `flags` and the block layout `L`, and lower them to pointers.
    pub(crate) fn into_raw<L: BlockLayout>(self, flags: ModeFlags) -> Result<RawStream, Error> {
        let length = self.len();
        if length < L::BLOCK_SIZE {
            return Err(Error::TooShort);
        }

        let is_counter_stream = matches!(self.buffers, Buffers::Counter { .. });
        if is_counter_stream != flags.is_counter() {
            return Err(Error::CounterMismatch);
        }

        let xor = match self.xor {
            Some(mask) if mask.len() < length => return Err(Error::XorTooShort),
            Some(mask) => mask.as_ptr(),
            None => ptr::null(),
        };

        let (input, output) = match self.buffers {
            Buffers::Split { input, output } => {
                if input.len() < input_extent::<L>(length, flags) {
                    return Err(Error::InputTooShort);
                }
                (input.as_ptr(), output.as_mut_ptr())
            }
            Buffers::InPlace(buffer) => {
                let output = buffer.as_mut_ptr();
                (output.cast_const(), output)
            }
            Buffers::Counter { counter, output } => {
                if counter.len() < input_extent::<L>(length, flags) {
                    return Err(Error::InputTooShort);
                }
                (counter.as_mut_ptr().cast_const(), output.as_mut_ptr())
            }
        };

        Ok(RawStream {
            input,
            xor,
            output,
            length,
        })
    }
}

/// Number of leading input bytes a call over `length` bytes may touch.
fn input_extent<L: BlockLayout>(length: usize, flags: ModeFlags) -> usize {
    if flags.advances_input() {
        return length;
    }

    // Stationary input: everything is read from one anchor, see `BufferCursor`.
    let anchor = if flags.is_reverse() {
        length.saturating_sub(VECTOR_SIZE)
    } else {
        0
    };

    let read = if flags.is_counter() || length < VECTOR_SIZE {
        L::BLOCK_SIZE
    } else {
        VECTOR_SIZE
    };

    anchor + read
}

#[cfg(test)]
mod tests {
    use super::{BlockStream, input_extent};
    use crate::{Block64, Block128, Error, ModeFlags};

    #[test]
    fn length_follows_output() {
        let input = [0u8; 64];
        let mut output = [0u8; 40];
        assert_eq!(BlockStream::new(&input, &mut output).len(), 40);

        let mut buffer = [0u8; 23];
        assert_eq!(BlockStream::in_place(&mut buffer).len(), 23);
    }

    #[test]
    fn rejects_short_buffers() {
        let input = [0u8; 8];
        let mut output = [0u8; 8];
        let err = BlockStream::new(&input, &mut output)
            .into_raw::<Block128>(ModeFlags::empty())
            .unwrap_err();
        assert_eq!(err, Error::TooShort);

        let input = [0u8; 16];
        let mut output = [0u8; 32];
        let err = BlockStream::new(&input, &mut output)
            .into_raw::<Block128>(ModeFlags::empty())
            .unwrap_err();
        assert_eq!(err, Error::InputTooShort);

        let mask = [0u8; 31];
        let mut buffer = [0u8; 32];
        let err = BlockStream::in_place(&mut buffer)
            .with_xor(&mask)
            .into_raw::<Block64>(ModeFlags::empty())
            .unwrap_err();
        assert_eq!(err, Error::XorTooShort);
    }

    #[test]
    fn counter_flag_must_match_stream() {
        let mut buffer = [0u8; 32];
        let err = BlockStream::in_place(&mut buffer)
            .into_raw::<Block128>(ModeFlags::IN_BLOCK_IS_COUNTER)
            .unwrap_err();
        assert_eq!(err, Error::CounterMismatch);

        let mut counter = [0u8; 16];
        let mut output = [0u8; 32];
        let err = BlockStream::counter(&mut counter, &mut output)
            .into_raw::<Block128>(ModeFlags::ALLOW_PARALLEL)
            .unwrap_err();
        assert_eq!(err, Error::CounterMismatch);
    }

    #[test]
    fn stationary_input_extent() {
        let counter = ModeFlags::IN_BLOCK_IS_COUNTER;
        assert_eq!(input_extent::<Block64>(96, counter), 8);
        assert_eq!(input_extent::<Block128>(96, counter), 16);
        assert_eq!(
            input_extent::<Block128>(96, counter | ModeFlags::REVERSE_DIRECTION),
            96
        );

        let fixed = ModeFlags::DONT_INCREMENT_IN_OUT_POINTERS;
        assert_eq!(input_extent::<Block64>(96, fixed), 16);
        assert_eq!(input_extent::<Block64>(8, fixed), 8);
        assert_eq!(input_extent::<Block64>(96, ModeFlags::empty()), 96);
    }
}
