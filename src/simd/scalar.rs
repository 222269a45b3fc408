//! Scalar reference dot-product kernel.
//!
//! Every SIMD variant must agree with this one bit-for-bit-adjacent (within
//! float rounding) on any input; it's also the fallback when no
//! capability probe above baseline succeeds. Written so LLVM's
//! autovectorizer has a fair shot even without explicit intrinsics: equal
//! lengths asserted up front, a straight zip-sum with no branches inside
//! the loop.
#[inline]
pub fn dot(coeffs: &[f32], samples: &[f32]) -> f32 {
    debug_assert_eq!(coeffs.len(), samples.len());
    coeffs
        .iter()
        .zip(samples.iter())
        .fold(0.0f32, |acc, (&c, &s)| acc + c * s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_of_orthogonal_impulses_is_zero() {
        let coeffs = [1.0, 0.0, 0.0, 0.0];
        let samples = [0.0, 1.0, 0.0, 0.0];
        assert_eq!(dot(&coeffs, &samples), 0.0);
    }

    #[test]
    fn dot_matches_hand_computation() {
        let coeffs = [1.0, 2.0, 3.0];
        let samples = [4.0, 5.0, 6.0];
        assert_eq!(dot(&coeffs, &samples), 4.0 + 10.0 + 18.0);
    }
}
