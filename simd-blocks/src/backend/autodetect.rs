//! Runtime selection of the vector backend.

use super::Backend;
use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(all(
        any(target_arch = "x86_64", all(target_arch = "x86", target_feature = "sse2")),
        not(simd_blocks_backend = "soft")
    ))] {
        cpufeatures::new!(sse2_cpuid, "sse2");

        pub(super) fn detect() -> Backend {
            let backend = if sse2_cpuid::get() {
                Backend::Sse2
            } else {
                Backend::Soft
            };
            trace(backend)
        }
    } else if #[cfg(all(
        target_arch = "aarch64",
        target_endian = "little",
        target_feature = "neon",
        not(simd_blocks_backend = "soft")
    ))] {
        // NEON is part of the AArch64 baseline
        pub(super) fn detect() -> Backend {
            trace(Backend::Neon)
        }
    } else {
        pub(super) fn detect() -> Backend {
            trace(Backend::Soft)
        }
    }
}

#[inline]
fn trace(backend: Backend) -> Backend {
    #[cfg(feature = "log")]
    log::debug!(target: "simd_blocks", "detected {} backend", backend);
    backend
}
