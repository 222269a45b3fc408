//! x86-64 dot-product kernels: SSE2 baseline, AVX2+FMA, AVX-512.
//!
//! All three assume 64-byte aligned, equal-length `coeffs`/`samples`
//! slices, per the branch-coefficient and window-half alignment contract
//! in the channelizer. The scalar tail (`len % vector_width`) falls back
//! to [`super::scalar::dot`].

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::scalar;

/// SSE2 is part of the x86-64 baseline, so this variant needs no runtime
/// feature check; it's the universal fallback on this architecture.
pub fn dot_sse2(coeffs: &[f32], samples: &[f32]) -> f32 {
    debug_assert_eq!(coeffs.len(), samples.len());
    let len = coeffs.len();
    let mut i = 0usize;
    // SAFETY: SSE2 is guaranteed present on every x86_64 target; loads are
    // unaligned (`loadu`) so the alignment contract is a performance
    // assumption upheld by the caller, not a correctness requirement here.
    let mut acc = unsafe { _mm_setzero_ps() };
    while i + 4 <= len {
        unsafe {
            let c = _mm_loadu_ps(coeffs.as_ptr().add(i));
            let s = _mm_loadu_ps(samples.as_ptr().add(i));
            acc = _mm_add_ps(acc, _mm_mul_ps(c, s));
        }
        i += 4;
    }
    let mut buf = [0.0f32; 4];
    unsafe { _mm_storeu_ps(buf.as_mut_ptr(), acc) };
    let mut total = buf.iter().sum::<f32>();
    total += scalar::dot(&coeffs[i..], &samples[i..]);
    total
}

/// # Safety
/// Caller must only invoke this after confirming `avx2` and `fma` via
/// [`std::arch::is_x86_feature_detected`].
#[target_feature(enable = "avx2,fma")]
pub unsafe fn dot_avx2_fma(coeffs: &[f32], samples: &[f32]) -> f32 {
    debug_assert_eq!(coeffs.len(), samples.len());
    let len = coeffs.len();
    let mut i = 0usize;
    let mut acc = _mm256_setzero_ps();
    while i + 8 <= len {
        let c = _mm256_loadu_ps(coeffs.as_ptr().add(i));
        let s = _mm256_loadu_ps(samples.as_ptr().add(i));
        acc = _mm256_fmadd_ps(c, s, acc);
        i += 8;
    }
    let mut buf = [0.0f32; 8];
    _mm256_storeu_ps(buf.as_mut_ptr(), acc);
    let mut total = buf.iter().sum::<f32>();
    total += scalar::dot(&coeffs[i..], &samples[i..]);
    total
}

/// # Safety
/// Caller must only invoke this after confirming `avx512f` via
/// [`std::arch::is_x86_feature_detected`].
#[target_feature(enable = "avx512f")]
pub unsafe fn dot_avx512(coeffs: &[f32], samples: &[f32]) -> f32 {
    debug_assert_eq!(coeffs.len(), samples.len());
    let len = coeffs.len();
    let mut i = 0usize;
    let mut acc = _mm512_setzero_ps();
    while i + 16 <= len {
        let c = _mm512_loadu_ps(coeffs.as_ptr().add(i));
        let s = _mm512_loadu_ps(samples.as_ptr().add(i));
        acc = _mm512_fmadd_ps(c, s, acc);
        i += 16;
    }
    let total = _mm512_reduce_add_ps(acc) + scalar::dot(&coeffs[i..], &samples[i..]);
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sse2_matches_scalar_reference() {
        let coeffs: Vec<f32> = (0..37).map(|i| i as f32 * 0.1).collect();
        let samples: Vec<f32> = (0..37).map(|i| (i as f32 * 0.37).sin()).collect();
        let expected = scalar::dot(&coeffs, &samples);
        let got = dot_sse2(&coeffs, &samples);
        assert!((got - expected).abs() < 1e-3);
    }

    #[test]
    fn avx2_fma_matches_scalar_reference_when_available() {
        if !(std::arch::is_x86_feature_detected!("avx2") && std::arch::is_x86_feature_detected!("fma")) {
            return;
        }
        let coeffs: Vec<f32> = (0..48).map(|i| i as f32 * 0.1).collect();
        let samples: Vec<f32> = (0..48).map(|i| (i as f32 * 0.19).cos()).collect();
        let expected = scalar::dot(&coeffs, &samples);
        let got = unsafe { dot_avx2_fma(&coeffs, &samples) };
        assert!((got - expected).abs() < 1e-3);
    }

    #[test]
    fn avx512_matches_scalar_reference_when_available() {
        if !std::arch::is_x86_feature_detected!("avx512f") {
            return;
        }
        let coeffs: Vec<f32> = (0..64).map(|i| i as f32 * 0.05).collect();
        let samples: Vec<f32> = (0..64).map(|i| (i as f32 * 0.11).sin()).collect();
        let expected = scalar::dot(&coeffs, &samples);
        let got = unsafe { dot_avx512(&coeffs, &samples) };
        assert!((got - expected).abs() < 1e-2);
    }
}
