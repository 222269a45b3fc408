//! Scalar Stockham radix-4/radix-2 butterfly kernels.
//!
//! These operate on split real/imaginary slices and never allocate; a
//! [`crate::fft::plan::FftPlan`] drives them stage by stage. SIMD dispatch
//! for the channelizer's dot product lives separately in [`crate::simd`] —
//! this kernel is the scalar reference the whole crate's FFT correctness
//! rests on, so it stays branch-free and straightforward.

use super::twiddle::TwiddleTable;

pub(crate) struct Stage {
    pub radix: u8,
    pub ns: usize,
    pub twiddle: TwiddleTable,
}

impl Stage {
    pub fn radix4(ns: usize) -> Self {
        Self {
            radix: 4,
            ns,
            twiddle: TwiddleTable::new(ns, 4 * ns),
        }
    }

    pub fn radix2(ns: usize) -> Self {
        Self {
            radix: 2,
            ns,
            twiddle: TwiddleTable::new(ns, 2 * ns),
        }
    }
}

/// Apply one stage, reading `src` and writing the ping-pong partner `dst`.
pub(crate) fn apply_stage(
    stage: &Stage,
    n: usize,
    src_re: &[f32],
    src_im: &[f32],
    dst_re: &mut [f32],
    dst_im: &mut [f32],
) {
    match stage.radix {
        4 => apply_radix4(stage.ns, n, &stage.twiddle, src_re, src_im, dst_re, dst_im),
        2 => apply_radix2(stage.ns, n, &stage.twiddle, src_re, src_im, dst_re, dst_im),
        r => unreachable!("unsupported radix {r}"),
    }
}

#[inline]
fn cmul(a_re: f32, a_im: f32, b_re: f32, b_im: f32) -> (f32, f32) {
    (a_re * b_re - a_im * b_im, a_re * b_im + a_im * b_re)
}

fn apply_radix4(
    ns: usize,
    n: usize,
    tw: &TwiddleTable,
    src_re: &[f32],
    src_im: &[f32],
    dst_re: &mut [f32],
    dst_im: &mut [f32],
) {
    let quarter = n / (4 * ns);
    let step = n / 4;

    for j2 in 0..quarter {
        for j1 in 0..ns {
            let idx0 = j2 * ns + j1;
            let idx1 = idx0 + step;
            let idx2 = idx1 + step;
            let idx3 = idx2 + step;

            let (w1_re, w1_im) = (tw.re[j1], tw.im[j1]);
            let (w2_re, w2_im) = cmul(w1_re, w1_im, w1_re, w1_im);
            let (w3_re, w3_im) = cmul(w2_re, w2_im, w1_re, w1_im);

            let (a0_re, a0_im) = (src_re[idx0], src_im[idx0]);
            let (a1_re, a1_im) = cmul(w1_re, w1_im, src_re[idx1], src_im[idx1]);
            let (a2_re, a2_im) = cmul(w2_re, w2_im, src_re[idx2], src_im[idx2]);
            let (a3_re, a3_im) = cmul(w3_re, w3_im, src_re[idx3], src_im[idx3]);

            let t0_re = a0_re + a2_re;
            let t0_im = a0_im + a2_im;
            let t1_re = a0_re - a2_re;
            let t1_im = a0_im - a2_im;
            let t2_re = a1_re + a3_re;
            let t2_im = a1_im + a3_im;
            // t3 = -i * (a1 - a3)
            let d_re = a1_re - a3_re;
            let d_im = a1_im - a3_im;
            let (t3_re, t3_im) = (d_im, -d_re);

            let out0 = j2 * (4 * ns) + j1;
            let out1 = out0 + ns;
            let out2 = out1 + ns;
            let out3 = out2 + ns;

            dst_re[out0] = t0_re + t2_re;
            dst_im[out0] = t0_im + t2_im;
            dst_re[out1] = t1_re + t3_re;
            dst_im[out1] = t1_im + t3_im;
            dst_re[out2] = t0_re - t2_re;
            dst_im[out2] = t0_im - t2_im;
            dst_re[out3] = t1_re - t3_re;
            dst_im[out3] = t1_im - t3_im;
        }
    }
}

fn apply_radix2(
    ns: usize,
    n: usize,
    tw: &TwiddleTable,
    src_re: &[f32],
    src_im: &[f32],
    dst_re: &mut [f32],
    dst_im: &mut [f32],
) {
    let half = n / (2 * ns);
    let step = n / 2;

    for j2 in 0..half {
        for j1 in 0..ns {
            let idx0 = j2 * ns + j1;
            let idx1 = idx0 + step;

            let (w_re, w_im) = (tw.re[j1], tw.im[j1]);
            let (a0_re, a0_im) = (src_re[idx0], src_im[idx0]);
            let (t_re, t_im) = cmul(w_re, w_im, src_re[idx1], src_im[idx1]);

            let out0 = j2 * (2 * ns) + j1;
            let out1 = out0 + ns;

            dst_re[out0] = a0_re + t_re;
            dst_im[out0] = a0_im + t_im;
            dst_re[out1] = a0_re - t_re;
            dst_im[out1] = a0_im - t_im;
        }
    }
}
