//! Per-channel rational (L/M) polyphase resampler.
//!
//! Converts one channel's sample stream from the channelizer's 2x-oversampled
//! output rate to whatever rate the downstream decoder expects. Built the
//! same way as [`crate::channelizer::Channelizer`]: a Kaiser-windowed
//! prototype subsampled into a polyphase table, and a linear sample window
//! with amortized-O(1) wraparound feeding a dot product — just with the
//! commutator replaced by a phase accumulator that can both hold (pure
//! interpolation) and skip (pure decimation) input samples between outputs.

mod phase_table;

use crate::error::{Error, Result};
use crate::fir;
use crate::window::SampleWindow;
use log::{debug, warn};
use num_complex::Complex32;
use phase_table::PhaseTable;

/// Taps per polyphase subfilter, per §4.D.
const TAPS_PER_PHASE: usize = 32;

/// Target stopband attenuation for the design Kaiser window. The spec notes
/// this design parameter measures 74-76 dB in practice despite the 60 dB
/// target — the same gap a Kaiser design always has between its nominal
/// parameter and the window's actual sidelobe floor at this tap count.
const STOPBAND_DB: f32 = 60.0;

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// A single channel's rate converter: raw input rate `r_in` to output rate
/// `r_out`, reduced to a coprime `(l, m)` pair.
///
/// `l == m == 1` puts the resampler in bypass mode (§3): `process` forwards
/// its input unchanged and no filter state is ever touched.
pub struct Resampler {
    l: usize,
    m: usize,
    bypass: bool,

    phase_table: Option<PhaseTable>,
    window: SampleWindow,

    /// Current phase `(n*m) mod l`, i.e. which polyphase branch produces
    /// the next output.
    phase: usize,
    /// New input samples still required before the next output can be
    /// produced. Zero only transiently inside `process`; reaching zero
    /// triggers an output and the next `needed` value in the same step.
    needed: usize,

    max_block: usize,
    out_buf: Vec<Complex32>,
}

impl Resampler {
    /// Construct a resampler converting `r_in_hz` to `r_out_hz`, accepting
    /// at most `max_block` input samples per [`Resampler::process`] call.
    ///
    /// Rates are rounded to the nearest integer Hz before reduction — every
    /// rate this crate deals with (channelizer output rates, decoder input
    /// rates) is an exact integer in practice, and the rational L/M
    /// machinery requires one.
    pub fn new(r_in_hz: f64, r_out_hz: f64, max_block: usize) -> Result<Self> {
        if !(r_in_hz.is_finite() && r_in_hz > 0.0) || !(r_out_hz.is_finite() && r_out_hz > 0.0) {
            warn!("resampler construction rejected: r_in_hz={r_in_hz} r_out_hz={r_out_hz} not both finite and positive");
            return Err(Error::InvalidArgument("rates must be finite and positive"));
        }
        if max_block == 0 {
            warn!("resampler construction rejected: max_block is zero");
            return Err(Error::InvalidArgument("max_block must be nonzero"));
        }

        let raw_in = r_in_hz.round() as u64;
        let raw_out = r_out_hz.round() as u64;
        if raw_in == 0 || raw_out == 0 {
            warn!("resampler construction rejected: rounded rates r_in={raw_in} r_out={raw_out} are zero");
            return Err(Error::InvalidArgument("rounded rates must be nonzero"));
        }
        let g = gcd(raw_in, raw_out);
        let l = (raw_out / g) as usize;
        let m = (raw_in / g) as usize;
        let bypass = l == 1 && m == 1;

        if bypass {
            debug!("resampler ready in bypass mode: r_in_hz={r_in_hz} r_out_hz={r_out_hz}");
        } else {
            debug!("resampler ready: l={l} m={m} (r_in_hz={r_in_hz} r_out_hz={r_out_hz}), {TAPS_PER_PHASE} taps/phase");
        }

        let (phase_table, window) = if bypass {
            (None, SampleWindow::new(TAPS_PER_PHASE)?)
        } else {
            let fc = 0.5 / (l.max(m) as f32) * 0.9;
            let prototype_len = l * TAPS_PER_PHASE;
            let prototype = fir::design_lowpass_unnormalized_gain(prototype_len, fc, STOPBAND_DB)?;
            let sum: f32 = prototype.iter().sum();
            let gain = l as f32 / sum;
            let scaled: Vec<f32> = prototype.iter().map(|&c| c * gain).collect();
            (
                Some(PhaseTable::new(&scaled, l, TAPS_PER_PHASE)?),
                SampleWindow::new(TAPS_PER_PHASE)?,
            )
        };

        let out_capacity = max_block.saturating_mul(l).div_ceil(m.max(1)) + 1;

        Ok(Self {
            l,
            m,
            bypass,
            phase_table,
            window,
            phase: 0,
            needed: 1,
            max_block,
            out_buf: Vec::with_capacity(out_capacity),
        })
    }

    #[inline]
    #[must_use]
    pub fn l(&self) -> usize {
        self.l
    }

    #[inline]
    #[must_use]
    pub fn m(&self) -> usize {
        self.m
    }

    #[inline]
    #[must_use]
    pub fn is_bypass(&self) -> bool {
        self.bypass
    }

    /// Convert `input` and return the resulting output slice. In bypass
    /// mode this is a straight copy; otherwise each input sample is pushed
    /// through the window and zero or more outputs are drawn off at the
    /// current phase before the next input is consumed.
    pub fn process(&mut self, input: &[Complex32]) -> Result<&[Complex32]> {
        if input.len() > self.max_block {
            return Err(Error::InvalidArgument(
                "input block exceeds the configured maximum",
            ));
        }

        self.out_buf.clear();

        if self.bypass {
            self.out_buf.extend_from_slice(input);
            return Ok(&self.out_buf);
        }

        let phase_table = self
            .phase_table
            .as_ref()
            .expect("non-bypass resampler always has a phase table");

        for sample in input {
            self.window.push(sample.re, sample.im);
            self.needed -= 1;
            while self.needed == 0 {
                let coeffs = phase_table.phase(self.phase);
                let re = dot(coeffs, self.window.tap_re());
                let im = dot(coeffs, self.window.tap_im());
                self.out_buf.push(Complex32::new(re, im));

                let advance = (self.phase + self.m) / self.l;
                self.phase = (self.phase + self.m) % self.l;
                self.needed = advance;
            }
        }

        Ok(&self.out_buf)
    }
}

#[inline]
fn dot(coeffs: &[f32], samples: &[f32]) -> f32 {
    coeffs.iter().zip(samples).fold(0.0, |acc, (&c, &s)| acc + c * s)
}
