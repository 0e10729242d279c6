//! Block transformation flags.

bitflags::bitflags! {
    /// Flags describing how a mode of operation drives the engine.
    ///
    /// The bit values match the flag word used by existing mode-of-operation code so a raw word
    /// can be passed through [`ModeFlags::from_bits_truncate`].
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModeFlags: u32 {
        /// `inBlocks` holds a single big-endian counter block rather than a run of input blocks.
        ///
        /// The engine synthesizes consecutive counter values and writes the next unused value
        /// back into the counter buffer.
        const IN_BLOCK_IS_COUNTER = 1 << 0;

        /// Neither the input nor the output position advances between blocks.
        const DONT_INCREMENT_IN_OUT_POINTERS = 1 << 1;

        /// Apply the xor mask to the input before the kernel instead of to its output.
        const XOR_INPUT = 1 << 2;

        /// Walk the buffers from their high end towards their start.
        const REVERSE_DIRECTION = 1 << 3;

        /// Permit the multi-register batch kernels. Without it only the single-block path runs.
        const ALLOW_PARALLEL = 1 << 4;
    }
}

impl ModeFlags {
    /// Is the input a counter block?
    #[inline]
    pub(crate) fn is_counter(self) -> bool {
        self.contains(Self::IN_BLOCK_IS_COUNTER)
    }

    /// Does the input position advance between blocks?
    #[inline]
    pub(crate) fn advances_input(self) -> bool {
        !self.intersects(Self::IN_BLOCK_IS_COUNTER | Self::DONT_INCREMENT_IN_OUT_POINTERS)
    }

    /// Does the output position advance between blocks?
    #[inline]
    pub(crate) fn advances_output(self) -> bool {
        !self.contains(Self::DONT_INCREMENT_IN_OUT_POINTERS)
    }

    #[inline]
    pub(crate) fn is_reverse(self) -> bool {
        self.contains(Self::REVERSE_DIRECTION)
    }

    #[inline]
    pub(crate) fn is_parallel(self) -> bool {
        self.contains(Self::ALLOW_PARALLEL)
    }
}
