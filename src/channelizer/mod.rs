//! M-branch, 2x-oversampled polyphase analysis channelizer.
//!
//! Maps one wideband complex input stream into `M` narrowband streams,
//! one per DFT bin, at a quarter of the work a bank of `M` independent
//! FIR-and-mixer chains would cost: the commutator distributes samples
//! across branches, `M` short dot products replace `M` full-rate FIR
//! filters, and a single `M`-point FFT replaces `M` independent mixers.

mod channel_plan;
mod coeffs;
mod init;

pub use channel_plan::ChannelDescriptor;

use crate::error::{Error, Result};
use crate::fft::FftPlan;
use crate::fir;
use crate::simd::{self, DotKernel};
use crate::window::SampleWindow;
use coeffs::BranchTable;
use log::{debug, warn};
use num_complex::Complex32;

/// Upper bound on channel count this constructor will plan for. Chosen
/// generously above any realistic decoder-bank fan-out while keeping the
/// branch arena and window set well inside a few hundred kilobytes.
pub const MAX_CHANNELS: usize = 1024;

/// Semi-length, in symbols, of the default prototype filter (48
/// taps/branch).
const PROTOTYPE_SEMI_LENGTH: usize = 24;

const PROTOTYPE_STOPBAND_DB: f32 = 80.0;

pub struct Channelizer {
    m_channels: usize,
    decimation: usize,
    max_input_samples: usize,

    branch_table: BranchTable,
    windows: Vec<SampleWindow>,
    filter_index: usize,

    fft_plan: FftPlan,
    fft_in_re: Vec<f32>,
    fft_in_im: Vec<f32>,
    fft_out_re: Vec<f32>,
    fft_out_im: Vec<f32>,

    channels: Vec<ChannelDescriptor>,
    output_rings: Vec<Vec<Complex32>>,
    output_index: usize,

    kernel: DotKernel,

    #[allow(dead_code)]
    bandwidth_hz: f64,
}

impl Channelizer {
    /// Construct a channelizer for `m_channels` channels (power of two,
    /// `2..=MAX_CHANNELS`) tuned to `center_freq_hz`, fed at
    /// `input_rate_hz`, sized to accept at most `max_input_samples`
    /// complex samples per [`Channelizer::process`] call.
    ///
    /// `bandwidth_hz` is informational metadata carried on the plan; it
    /// does not affect the filter design.
    pub fn new(
        m_channels: usize,
        center_freq_hz: f64,
        bandwidth_hz: f64,
        input_rate_hz: f64,
        max_input_samples: usize,
    ) -> Result<Self> {
        Self::new_with_kernel(
            m_channels,
            center_freq_hz,
            bandwidth_hz,
            input_rate_hz,
            max_input_samples,
            simd::resolve(),
        )
    }

    fn new_with_kernel(
        m_channels: usize,
        center_freq_hz: f64,
        bandwidth_hz: f64,
        input_rate_hz: f64,
        max_input_samples: usize,
        kernel: DotKernel,
    ) -> Result<Self> {
        if m_channels < 2 || m_channels > MAX_CHANNELS || !m_channels.is_power_of_two() {
            warn!("channelizer construction rejected: m_channels={m_channels} out of range or not a power of two");
            return Err(Error::InvalidArgument(
                "channel count must be a power of two in [2, MAX_CHANNELS]",
            ));
        }
        if input_rate_hz <= 0.0 {
            warn!("channelizer construction rejected: input_rate_hz={input_rate_hz} is not positive");
            return Err(Error::InvalidArgument("input rate must be nonzero"));
        }

        init::ensure_ready()?;

        let branch_len = 2 * PROTOTYPE_SEMI_LENGTH;
        let prototype_len = 2 * m_channels * PROTOTYPE_SEMI_LENGTH + 1;
        let fc = 0.9 / m_channels as f32;
        let prototype = fir::design_lowpass(prototype_len, fc, PROTOTYPE_STOPBAND_DB)?;

        let branch_table = BranchTable::new(&prototype, m_channels, branch_len)?;

        let mut windows = Vec::with_capacity(m_channels);
        for _ in 0..m_channels {
            windows.push(SampleWindow::new(branch_len)?);
        }

        let fft_plan = FftPlan::new(m_channels)?;
        let decimation = m_channels / 2;
        let ring_capacity = (max_input_samples.div_ceil(decimation.max(1)) + 1).max(2);

        let channels = channel_plan::build_channel_table(m_channels, center_freq_hz, input_rate_hz);
        let output_rings = (0..m_channels)
            .map(|_| Vec::with_capacity(ring_capacity))
            .collect();

        debug!(
            "channelizer ready: m_channels={m_channels} decimation={decimation} center_freq_hz={center_freq_hz} input_rate_hz={input_rate_hz} max_input_samples={max_input_samples}"
        );

        Ok(Self {
            m_channels,
            decimation,
            max_input_samples,
            branch_table,
            windows,
            filter_index: m_channels - 1,
            fft_plan,
            fft_in_re: vec![0.0; m_channels],
            fft_in_im: vec![0.0; m_channels],
            fft_out_re: vec![0.0; m_channels],
            fft_out_im: vec![0.0; m_channels],
            channels,
            output_rings,
            output_index: 0,
            kernel,
            bandwidth_hz,
        })
    }

    #[inline]
    #[must_use]
    pub fn num_channels(&self) -> usize {
        self.m_channels
    }

    #[inline]
    #[must_use]
    pub fn decimation(&self) -> usize {
        self.decimation
    }

    #[must_use]
    pub fn channel_freq(&self, k: usize) -> f64 {
        self.channels[k].center_freq_hz
    }

    /// The samples this channel emitted during the most recent
    /// [`Channelizer::process`] call.
    #[must_use]
    pub fn channel_output(&self, k: usize) -> &[Complex32] {
        &self.output_rings[k]
    }

    /// Process one input block. Returns the number of output samples
    /// produced per channel (`floor(input.len() / decimation())`).
    ///
    /// Never partially commits: a length error is returned before any
    /// window, commutator, or output state changes.
    pub fn process(&mut self, input: &[Complex32]) -> Result<usize> {
        if input.len() > self.max_input_samples {
            return Err(Error::InvalidArgument(
                "input block exceeds the configured maximum",
            ));
        }

        let d = self.decimation;
        let n_groups = if d == 0 { 0 } else { input.len() / d };

        for ring in &mut self.output_rings {
            ring.clear();
        }

        for g in 0..n_groups {
            let group = &input[g * d..(g + 1) * d];

            // a. commutator push
            for sample in group {
                self.windows[self.filter_index].push(sample.re, sample.im);
                self.filter_index = (self.filter_index + self.m_channels - 1) % self.m_channels;
            }

            // b. dot products
            for i in 0..self.m_channels {
                let idx = (i + self.filter_index + 1) % self.m_channels;
                let out_idx = self.m_channels - i - 1;
                let coeffs = self.branch_table.branch(i);
                let window = &self.windows[idx];
                self.fft_in_re[out_idx] = self.kernel.dot(coeffs, window.tap_re());
                self.fft_in_im[out_idx] = self.kernel.dot(coeffs, window.tap_im());
            }

            // c. M-point forward FFT
            self.fft_plan.forward(
                &self.fft_in_re,
                &self.fft_in_im,
                &mut self.fft_out_re,
                &mut self.fft_out_im,
            );

            // d. phase correction & emit
            let n_odd = self.output_index % 2 == 1;
            for c in 0..self.m_channels {
                let flip = n_odd && (c % 2 == 1);
                let sample = if flip {
                    Complex32::new(-self.fft_out_re[c], -self.fft_out_im[c])
                } else {
                    Complex32::new(self.fft_out_re[c], self.fft_out_im[c])
                };
                self.output_rings[c].push(sample);
            }
            self.output_index = self.output_index.wrapping_add(1);
        }

        Ok(n_groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn make(m: usize, max_input: usize) -> Channelizer {
        Channelizer::new(m, 0.0, 0.0, (m * 1000) as f64, max_input).unwrap()
    }

    #[test]
    fn rejects_non_power_of_two_channel_count() {
        assert!(Channelizer::new(6, 0.0, 0.0, 1.0, 64).is_err());
    }

    #[test]
    fn rejects_zero_input_rate() {
        assert!(Channelizer::new(8, 0.0, 0.0, 0.0, 64).is_err());
    }

    #[test]
    fn output_count_matches_floor_division() {
        let m = 8;
        let d = m / 2;
        let mut c = make(m, 256);
        let input = vec![Complex32::new(0.0, 0.0); d * 5 + 1];
        let n_out = c.process(&input).unwrap();
        assert_eq!(n_out, 5);
        for k in 0..m {
            assert_eq!(c.channel_output(k).len(), 5);
        }
    }

    #[test]
    fn all_zero_input_produces_all_zero_output() {
        let m = 16;
        let mut c = make(m, 256);
        let input = vec![Complex32::new(0.0, 0.0); m * 4];
        c.process(&input).unwrap();
        for k in 0..m {
            for sample in c.channel_output(k) {
                assert_eq!(sample.re, 0.0);
                assert_eq!(sample.im, 0.0);
            }
        }
    }

    #[test]
    fn rejects_oversized_block() {
        let mut c = make(8, 16);
        let input = vec![Complex32::new(1.0, 0.0); 17];
        assert!(c.process(&input).is_err());
    }

    #[test]
    fn cross_run_determinism() {
        let m = 8;
        let mut a = make(m, 512);
        let mut b = make(m, 512);
        let input: Vec<Complex32> = (0..m * 10)
            .map(|n| Complex32::new((n as f32 * 0.13).sin(), (n as f32 * 0.07).cos()))
            .collect();
        a.process(&input).unwrap();
        b.process(&input).unwrap();
        for k in 0..m {
            assert_eq!(a.channel_output(k), b.channel_output(k));
        }
    }

    #[test]
    fn tone_at_channel_center_concentrates_energy() {
        let m = 16;
        let fs = 16_000.0f64;
        let mut c = make(m, 4096);
        let target_channel = 3usize;
        let freq = target_channel as f64 * fs / m as f64;

        let n_samples = m * 64;
        let input: Vec<Complex32> = (0..n_samples)
            .map(|n| {
                let phase = 2.0 * std::f64::consts::PI * freq * (n as f64) / fs;
                Complex32::new(phase.cos() as f32, phase.sin() as f32)
            })
            .collect();
        c.process(&input).unwrap();

        let energy = |k: usize| -> f32 {
            c.channel_output(k)
                .iter()
                .skip(c.channel_output(k).len() / 2) // settle past the filter's transient
                .map(|s| s.re * s.re + s.im * s.im)
                .sum()
        };

        let target_energy = energy(target_channel);
        let adjacent_energy = energy((target_channel + 1) % m);
        let rejection_db = 10.0 * (target_energy / adjacent_energy).log10();
        assert!(
            rejection_db > 41.0,
            "expected >=41 dB adjacent-channel rejection (spec property 11), got {rejection_db} dB (target={target_energy}, adjacent={adjacent_energy})"
        );
    }
}
