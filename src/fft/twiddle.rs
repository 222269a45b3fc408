//! Twiddle factor tables.
//!
//! Each stage stores only the base factor `W^k = exp(-2*pi*i*k/(radix*ns))`
//! for `k` in `0..ns`; the kernel derives `W^2k` and `W^3k` for the radix-4
//! butterfly on the fly with one complex multiply apiece rather than holding
//! three separate tables.

use std::f64::consts::PI;

/// Base twiddle table for one stage: `w_re[k] + i*w_im[k] = exp(-2*pi*i*k/denom)`.
pub struct TwiddleTable {
    pub re: Vec<f32>,
    pub im: Vec<f32>,
}

impl TwiddleTable {
    /// `ns` entries, angle denominator `denom` (`4*ns` for a radix-4 stage,
    /// `2*ns` for the radix-2 cleanup stage).
    pub fn new(ns: usize, denom: usize) -> Self {
        let mut re = Vec::with_capacity(ns);
        let mut im = Vec::with_capacity(ns);
        for k in 0..ns {
            // f64 trig here, truncated to f32 on store: this table is built
            // once at plan-construction time, never on the sample path.
            let angle = -2.0 * PI * (k as f64) / (denom as f64);
            re.push(angle.cos() as f32);
            im.push(angle.sin() as f32);
        }
        Self { re, im }
    }
}
