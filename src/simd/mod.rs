//! Runtime SIMD capability dispatch for the channelizer's dot-product hot
//! kernel.
//!
//! A single [`DotKernel`] is resolved once per process (via
//! [`std::sync::OnceLock`], which gives idempotence and identical results
//! across calls for free) and handed to every [`crate::channelizer::Channelizer`]
//! constructed afterward. Resolution never re-runs mid-process, matching
//! the "single vtable... read-only thereafter" contract.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86;

#[cfg(target_arch = "aarch64")]
mod aarch64;

mod scalar;

use log::debug;
use std::sync::OnceLock;

/// Real dot product of two equal-length slices. Every bound implementation
/// must agree with [`scalar::dot`] within float rounding for any input.
pub type DotKernelFn = fn(&[f32], &[f32]) -> f32;

/// The resolved kernel plus metadata for logging and diagnostics.
#[derive(Clone, Copy)]
pub struct DotKernel {
    pub name: &'static str,
    pub isa: &'static str,
    dot: DotKernelFn,
}

impl DotKernel {
    #[inline]
    pub fn dot(&self, coeffs: &[f32], samples: &[f32]) -> f32 {
        (self.dot)(coeffs, samples)
    }
}

static KERNEL: OnceLock<DotKernel> = OnceLock::new();

/// Resolve (or fetch the already-resolved) dot-product kernel for this
/// process. Safe to call from any number of threads; the first call wins
/// and every subsequent call, on any thread, observes the same result.
pub fn resolve() -> DotKernel {
    *KERNEL.get_or_init(probe)
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn probe() -> DotKernel {
    if std::arch::is_x86_feature_detected!("avx512f") {
        return DotKernel {
            name: "avx512",
            isa: "x86_64+avx512f",
            // SAFETY: feature presence just confirmed.
            dot: |c, s| unsafe { x86::dot_avx512(c, s) },
        };
    }
    if std::arch::is_x86_feature_detected!("avx2") {
        if std::arch::is_x86_feature_detected!("fma") {
            return DotKernel {
                name: "avx2_fma",
                isa: "x86_64+avx2+fma",
                // SAFETY: feature presence just confirmed.
                dot: |c, s| unsafe { x86::dot_avx2_fma(c, s) },
            };
        }
        debug!("AVX2 present but FMA absent, falling back to SSE2");
    }
    DotKernel {
        name: "sse2",
        isa: "x86_64+sse2",
        dot: x86::dot_sse2,
    }
}

#[cfg(target_arch = "aarch64")]
fn probe() -> DotKernel {
    if std::arch::is_aarch64_feature_detected!("sve") {
        debug!("SVE detected but stable core::arch lacks predicated-load intrinsics, binding NEON");
    }
    DotKernel {
        name: "neon",
        isa: "aarch64+neon",
        dot: aarch64::dot_neon,
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
fn probe() -> DotKernel {
    debug!("no SIMD capability probe for this architecture, using scalar kernel");
    DotKernel {
        name: "scalar",
        isa: "generic",
        dot: scalar::dot,
    }
}
