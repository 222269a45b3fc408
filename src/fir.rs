//! Kaiser-windowed lowpass FIR prototype designer.
//!
//! The channelizer's polyphase prototype and the resampler's per-phase
//! subfilter prototype are both instances of the same design: sample an
//! ideal sinc, multiply by a Kaiser window tuned to a target stopband
//! attenuation, optionally normalize for unity DC gain.

use crate::error::{Error, Result};
use std::f64::consts::PI;

/// Kaiser window shape parameter from the target stopband attenuation,
/// Kaiser's empirical fit (Oppenheim & Schafer, 7.81).
fn kaiser_beta(as_db: f64) -> f64 {
    if as_db > 50.0 {
        0.1102 * (as_db - 8.7)
    } else if as_db > 21.0 {
        0.5842 * (as_db - 21.0).powf(0.4) + 0.07886 * (as_db - 21.0)
    } else {
        0.0
    }
}

/// Modified Bessel function of the first kind, order 0, by series summation.
/// Converges quickly for the beta range this designer produces (beta stays
/// well under 20 for any attenuation up to ~200 dB).
fn bessel_i0(x: f64) -> f64 {
    let mut term = 1.0;
    let mut sum = 1.0;
    let half_x_sq = (x / 2.0) * (x / 2.0);
    let mut k = 1.0;
    loop {
        term *= half_x_sq / (k * k);
        sum += term;
        if term < sum * 1e-16 {
            break;
        }
        k += 1.0;
        if k > 200.0 {
            break;
        }
    }
    sum
}

/// Sample the ideal lowpass sinc windowed by a Kaiser window, without any
/// DC-gain normalization.
///
/// `length` taps, cutoff `fc` as a fraction of the sample rate (`0 < fc <
/// 0.5`), target stopband attenuation `as_db` in dB.
fn kaiser_lowpass_raw(length: usize, fc: f32, as_db: f32) -> Result<Vec<f32>> {
    if length == 0 {
        return Err(Error::InvalidArgument("fir length must be nonzero"));
    }
    if !(0.0..0.5).contains(&fc) {
        return Err(Error::InvalidArgument("cutoff must be in (0, 0.5)"));
    }

    let beta = kaiser_beta(as_db as f64);
    let i0_beta = bessel_i0(beta);
    let m = (length - 1) as f64;
    let fc = fc as f64;

    let mut h = Vec::with_capacity(length);
    for n in 0..length {
        let offset = n as f64 - m / 2.0;
        let sinc = if offset == 0.0 {
            2.0 * fc
        } else {
            (2.0 * PI * fc * offset).sin() / (PI * offset)
        };

        let t = if m > 0.0 { 2.0 * n as f64 / m - 1.0 } else { 0.0 };
        let arg = beta * (1.0 - t * t).max(0.0).sqrt();
        let window = bessel_i0(arg) / i0_beta;

        h.push((sinc * window) as f32);
    }
    Ok(h)
}

/// Design a unity-DC-gain Kaiser-windowed lowpass FIR.
///
/// Fails with [`Error::InvalidArgument`] if the raw coefficients sum to
/// within `1e-9` of zero (a degenerate cutoff/length combination that
/// cannot be normalized).
pub fn design_lowpass(length: usize, fc: f32, as_db: f32) -> Result<Vec<f32>> {
    let mut h = kaiser_lowpass_raw(length, fc, as_db)?;
    let sum: f32 = h.iter().sum();
    if sum.abs() < 1e-9 {
        return Err(Error::InvalidArgument("lowpass design has zero DC gain"));
    }
    let inv = 1.0 / sum;
    for tap in &mut h {
        *tap *= inv;
    }
    Ok(h)
}

/// Design a Kaiser-windowed lowpass FIR without DC-gain normalization, for
/// callers (the resampler's polyphase subfilter bank) that apply their own
/// gain correction after splitting the prototype into phases.
pub fn design_lowpass_unnormalized_gain(length: usize, fc: f32, as_db: f32) -> Result<Vec<f32>> {
    kaiser_lowpass_raw(length, fc, as_db)
}
