//! Selection among engine instantiations at runtime.

use crate::{Backend, BlockStream, Error, ModeFlags, SubkeyTable};
use core::fmt;

/// An engine instantiation with one backend's kernels bound to it.
///
/// Cipher implementations write one of these per backend, each a thin wrapper calling
/// [`engine::process_blocks`](crate::engine::process_blocks) with that backend's kernels.
pub type ProcessFn<K> =
    fn(&SubkeyTable<K>, BlockStream<'_>, ModeFlags) -> Result<usize, Error>;

/// Registry of engine instantiations for one kernel family, dispatching to the one matching the
/// CPU's capabilities.
///
/// The portable instantiation is mandatory and serves as the fallback whenever the detected
/// backend has nothing registered.
pub struct Dispatcher<K> {
    detected: Backend,
    soft: ProcessFn<K>,
    sse2: Option<ProcessFn<K>>,
    neon: Option<ProcessFn<K>>,
}

impl<K> Dispatcher<K> {
    /// Create a dispatcher for the running CPU with the portable instantiation `soft`.
    pub fn new(soft: ProcessFn<K>) -> Self {
        Self::for_backend(Backend::detect(), soft)
    }

    /// Create a dispatcher for an already-detected `backend`.
    pub fn for_backend(backend: Backend, soft: ProcessFn<K>) -> Self {
        Self {
            detected: backend,
            soft,
            sse2: None,
            neon: None,
        }
    }

    /// Register the instantiation for `backend`, replacing any earlier one.
    #[must_use]
    pub fn register(mut self, backend: Backend, process: ProcessFn<K>) -> Self {
        match backend {
            Backend::Soft => self.soft = process,
            Backend::Sse2 => self.sse2 = Some(process),
            Backend::Neon => self.neon = Some(process),
        }

        #[cfg(feature = "log")]
        if backend == self.detected {
            log::debug!(target: "simd_blocks", "dispatching to {} instantiation", backend);
        }

        self
    }

    /// Backend whose instantiation [`Dispatcher::process`] runs.
    pub fn backend(&self) -> Backend {
        self.select().0
    }

    /// Process `stream` with the selected instantiation.
    ///
    /// # Errors
    /// See [`engine::process_blocks`](crate::engine::process_blocks).
    pub fn process(
        &self,
        subkeys: &SubkeyTable<K>,
        stream: BlockStream<'_>,
        flags: ModeFlags,
    ) -> Result<usize, Error> {
        (self.select().1)(subkeys, stream, flags)
    }

    fn select(&self) -> (Backend, ProcessFn<K>) {
        let simd = match self.detected {
            Backend::Sse2 => self.sse2,
            Backend::Neon => self.neon,
            Backend::Soft => None,
        };

        match simd {
            Some(process) => (self.detected, process),
            None => (Backend::Soft, self.soft),
        }
    }
}

impl<K> Clone for Dispatcher<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Dispatcher<K> {}

impl<K> fmt::Debug for Dispatcher<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("detected", &self.detected)
            .field("sse2", &self.sse2.is_some())
            .field("neon", &self.neon.is_some())
            .finish()
    }
}
