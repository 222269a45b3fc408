//! Owning FFT plan: size validation, stage precomputation, scratch buffers.
//!
//! Construction is the only fallible, allocating step. `forward`/`inverse`
//! never allocate and never fail — a malformed size is rejected once, at
//! [`FftPlan::new`], not rediscovered on every call.

use super::kernel::{self, Stage};
use crate::error::{Error, Result};

/// Largest transform size this kernel will plan. Chosen to keep the
/// twiddle tables and scratch buffers well inside L2 for the channel
/// counts this crate targets; callers needing more should reach for a
/// general-purpose FFT library instead.
pub const MAX_FFT_SIZE: usize = 1 << 16;

/// A reusable, fixed-size complex FFT plan operating on split real/
/// imaginary buffers.
///
/// `N` must be a power of two in `[2, MAX_FFT_SIZE]`. The plan is built
/// from a cascade of radix-4 Stockham stages with a single radix-2 cleanup
/// stage appended when `log2(N)` is odd, so every size in range is
/// supported without a generic mixed-radix path.
pub struct FftPlan {
    size: usize,
    stages: Vec<Stage>,
    scratch0_re: Vec<f32>,
    scratch0_im: Vec<f32>,
    scratch1_re: Vec<f32>,
    scratch1_im: Vec<f32>,
}

impl FftPlan {
    /// Build a plan for `size` points. Returns `Err` if `size` is not a
    /// power of two, is smaller than 2, or exceeds [`MAX_FFT_SIZE`].
    pub fn new(size: usize) -> Result<Self> {
        if size < 2 || !size.is_power_of_two() {
            return Err(Error::InvalidSize("fft size must be a power of two >= 2"));
        }
        if size > MAX_FFT_SIZE {
            return Err(Error::InvalidSize("fft size exceeds MAX_FFT_SIZE"));
        }

        let log2n = size.trailing_zeros();
        let radix4_stages = log2n / 2;
        let has_tail = log2n % 2 == 1;

        let mut stages = Vec::with_capacity(radix4_stages as usize + 1);
        let mut ns = 1usize;
        for _ in 0..radix4_stages {
            stages.push(Stage::radix4(ns));
            ns *= 4;
        }
        if has_tail {
            stages.push(Stage::radix2(ns));
        }

        Ok(Self {
            size,
            stages,
            scratch0_re: vec![0.0; size],
            scratch0_im: vec![0.0; size],
            scratch1_re: vec![0.0; size],
            scratch1_im: vec![0.0; size],
        })
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Run every stage, ping-ponging between the two owned scratch buffers.
    /// Returns `true` if the final result landed in `scratch0`.
    fn run_stages(&mut self) -> bool {
        let n = self.size;
        let Self {
            stages,
            scratch0_re,
            scratch0_im,
            scratch1_re,
            scratch1_im,
            ..
        } = self;

        let mut src_is_0 = true;
        for stage in stages.iter() {
            if src_is_0 {
                kernel::apply_stage(stage, n, scratch0_re, scratch0_im, scratch1_re, scratch1_im);
            } else {
                kernel::apply_stage(stage, n, scratch1_re, scratch1_im, scratch0_re, scratch0_im);
            }
            src_is_0 = !src_is_0;
        }
        src_is_0
    }

    /// Forward transform, split real/imaginary in and out. `in_*`/`out_*`
    /// must each have length [`FftPlan::size`]; `out_*` may **not** alias
    /// `scratch0`/`scratch1` (it doesn't, since those are private), but may
    /// freely alias `in_*` is not supported — pass distinct buffers.
    pub fn forward(&mut self, in_re: &[f32], in_im: &[f32], out_re: &mut [f32], out_im: &mut [f32]) {
        debug_assert_eq!(in_re.len(), self.size);
        debug_assert_eq!(in_im.len(), self.size);
        debug_assert_eq!(out_re.len(), self.size);
        debug_assert_eq!(out_im.len(), self.size);

        self.scratch0_re.copy_from_slice(in_re);
        self.scratch0_im.copy_from_slice(in_im);
        let in_scratch0 = self.run_stages();
        if in_scratch0 {
            out_re.copy_from_slice(&self.scratch0_re);
            out_im.copy_from_slice(&self.scratch0_im);
        } else {
            out_re.copy_from_slice(&self.scratch1_re);
            out_im.copy_from_slice(&self.scratch1_im);
        }
    }

    /// Unnormalized inverse transform: `conj(forward(conj(x)))`, i.e. the
    /// caller divides by `size()` for the conventional `1/N` inverse.
    pub fn inverse(&mut self, in_re: &[f32], in_im: &[f32], out_re: &mut [f32], out_im: &mut [f32]) {
        debug_assert_eq!(in_re.len(), self.size);
        debug_assert_eq!(in_im.len(), self.size);
        debug_assert_eq!(out_re.len(), self.size);
        debug_assert_eq!(out_im.len(), self.size);

        self.scratch0_re.copy_from_slice(in_re);
        for (dst, &src) in self.scratch0_im.iter_mut().zip(in_im.iter()) {
            *dst = -src;
        }
        let in_scratch0 = self.run_stages();
        if in_scratch0 {
            out_re.copy_from_slice(&self.scratch0_re);
            for (dst, &src) in out_im.iter_mut().zip(self.scratch0_im.iter()) {
                *dst = -src;
            }
        } else {
            out_re.copy_from_slice(&self.scratch1_re);
            for (dst, &src) in out_im.iter_mut().zip(self.scratch1_im.iter()) {
                *dst = -src;
            }
        }
    }

    /// Forward transform on interleaved `[re, im, re, im, ...]` buffers of
    /// length `2*size()`, for callers that don't want to manage split
    /// buffers themselves.
    pub fn forward_interleaved(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(input.len(), 2 * self.size);
        debug_assert_eq!(output.len(), 2 * self.size);

        deinterleave(input, &mut self.scratch0_re, &mut self.scratch0_im);
        let in_scratch0 = self.run_stages();
        if in_scratch0 {
            interleave(&self.scratch0_re, &self.scratch0_im, output);
        } else {
            interleave(&self.scratch1_re, &self.scratch1_im, output);
        }
    }

    /// Unnormalized inverse transform on interleaved buffers.
    pub fn inverse_interleaved(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(input.len(), 2 * self.size);
        debug_assert_eq!(output.len(), 2 * self.size);

        deinterleave(input, &mut self.scratch0_re, &mut self.scratch0_im);
        for v in self.scratch0_im.iter_mut() {
            *v = -*v;
        }
        let in_scratch0 = self.run_stages();
        if in_scratch0 {
            for v in self.scratch0_im.iter_mut() {
                *v = -*v;
            }
            interleave(&self.scratch0_re, &self.scratch0_im, output);
        } else {
            for v in self.scratch1_im.iter_mut() {
                *v = -*v;
            }
            interleave(&self.scratch1_re, &self.scratch1_im, output);
        }
    }
}

fn deinterleave(input: &[f32], re: &mut [f32], im: &mut [f32]) {
    for (i, pair) in input.chunks_exact(2).enumerate() {
        re[i] = pair[0];
        im[i] = pair[1];
    }
}

fn interleave(re: &[f32], im: &[f32], output: &mut [f32]) {
    for (i, pair) in output.chunks_exact_mut(2).enumerate() {
        pair[0] = re[i];
        pair[1] = im[i];
    }
}
