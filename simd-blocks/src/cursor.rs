//! Position tracking over one of the engine's buffers.

use crate::VECTOR_SIZE;

/// Sign of a cursor's stride.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Direction {
    Forward,
    Backward,
    Stationary,
}

/// Pointer plus signed stride over one buffer.
///
/// Chunks are handed out in traversal order and may be of any size, so the wide loops (one
/// vector register per chunk) and the tail loop (one cipher block per chunk) share a cursor
/// without re-deriving strides when the chunk size changes.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BufferCursor {
    base: *mut u8,
    /// Forward: start of the next chunk. Backward: end of the unconsumed region.
    /// Stationary: the anchor every chunk is read from or written to.
    offset: usize,
    direction: Direction,
}

impl BufferCursor {
    /// Cursor over `length` bytes at `base`.
    ///
    /// A stationary cursor is anchored at the start of the buffer, or at its last vector
    /// register when walking in reverse.
    pub(crate) fn new(base: *mut u8, length: usize, advance: bool, reverse: bool) -> Self {
        let (offset, direction) = match (advance, reverse) {
            (true, false) => (0, Direction::Forward),
            (true, true) => (length, Direction::Backward),
            (false, false) => (0, Direction::Stationary),
            (false, true) => (length.saturating_sub(VECTOR_SIZE), Direction::Stationary),
        };

        Self {
            base,
            offset,
            direction,
        }
    }

    /// Address of the next `size`-byte chunk, moving the cursor past it.
    #[inline(always)]
    pub(crate) fn next(&mut self, size: usize) -> *mut u8 {
        let offset = match self.direction {
            Direction::Forward => {
                let offset = self.offset;
                self.offset += size;
                offset
            }
            Direction::Backward => {
                self.offset -= size;
                self.offset
            }
            Direction::Stationary => self.offset,
        };

        self.base.wrapping_add(offset)
    }

    /// Address the cursor currently rests on. Only meaningful for stationary cursors.
    #[inline(always)]
    pub(crate) fn anchor(&self) -> *mut u8 {
        debug_assert_eq!(self.direction, Direction::Stationary);
        self.base.wrapping_add(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::BufferCursor;

    fn offsets(mut cursor: BufferCursor, base: *mut u8, sizes: &[usize]) -> [usize; 4] {
        let mut out = [usize::MAX; 4];
        for (slot, &size) in out.iter_mut().zip(sizes) {
            *slot = cursor.next(size) as usize - base as usize;
        }
        out
    }

    #[test]
    fn forward() {
        let mut buf = [0u8; 40];
        let base = buf.as_mut_ptr();
        let cursor = BufferCursor::new(base, 40, true, false);
        assert_eq!(offsets(cursor, base, &[16, 16, 8]), [0, 16, 32, usize::MAX]);
    }

    #[test]
    fn backward_switches_chunk_size() {
        let mut buf = [0u8; 40];
        let base = buf.as_mut_ptr();
        let cursor = BufferCursor::new(base, 40, true, true);
        assert_eq!(offsets(cursor, base, &[16, 16, 8]), [24, 8, 0, usize::MAX]);

        // 20 bytes of 8-byte blocks backwards: the 4 leftover bytes stay at the start
        let cursor = BufferCursor::new(base, 20, true, true);
        assert_eq!(offsets(cursor, base, &[8, 8]), [12, 4, usize::MAX, usize::MAX]);
    }

    #[test]
    fn stationary() {
        let mut buf = [0u8; 48];
        let base = buf.as_mut_ptr();

        let cursor = BufferCursor::new(base, 48, false, false);
        assert_eq!(offsets(cursor, base, &[16, 16, 8, 8]), [0; 4]);

        let cursor = BufferCursor::new(base, 48, false, true);
        assert_eq!(offsets(cursor, base, &[16, 16, 8, 8]), [32; 4]);
        assert_eq!(cursor.anchor() as usize - base as usize, 32);
    }
}
