//! Split real/imaginary sample window with amortized-O(1) wraparound.
//!
//! Shared by the channelizer's per-branch windows and the resampler's
//! input history: both need "the last `p` samples, oldest first" without
//! paying a shift on every push.

use crate::align::AlignedBuf;
use crate::error::Result;

/// Linear buffer of length `2p` holding the most recent `p` samples, split
/// into real and imaginary halves.
///
/// `write_pos` advances from `p` to `2p`; once it hits `2p` the trailing
/// `p` samples are copied back to `[0, p)` and the cursor resets to `p`.
/// Every read sees the contiguous slice `[write_pos - p, write_pos)`, so
/// the copy only happens once every `p` pushes.
pub struct SampleWindow {
    re: AlignedBuf,
    im: AlignedBuf,
    write_pos: usize,
    p: usize,
}

impl SampleWindow {
    pub fn new(p: usize) -> Result<Self> {
        Ok(Self {
            re: AlignedBuf::zeroed(2 * p)?,
            im: AlignedBuf::zeroed(2 * p)?,
            write_pos: p,
            p,
        })
    }

    /// Push one complex sample, handling the wraparound copy.
    pub fn push(&mut self, sample_re: f32, sample_im: f32) {
        self.re.as_mut_slice()[self.write_pos] = sample_re;
        self.im.as_mut_slice()[self.write_pos] = sample_im;
        self.write_pos += 1;
        if self.write_pos == 2 * self.p {
            let p = self.p;
            self.re.as_mut_slice().copy_within(p..2 * p, 0);
            self.im.as_mut_slice().copy_within(p..2 * p, 0);
            self.write_pos = p;
        }
    }

    /// The `p` most recent real samples, oldest first.
    #[inline]
    #[must_use]
    pub fn tap_re(&self) -> &[f32] {
        &self.re.as_slice()[self.write_pos - self.p..self.write_pos]
    }

    /// The `p` most recent imaginary samples, oldest first.
    #[inline]
    #[must_use]
    pub fn tap_im(&self) -> &[f32] {
        &self.im.as_slice()[self.write_pos - self.p..self.write_pos]
    }

    #[inline]
    #[must_use]
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_pos_stays_in_range_across_many_pushes() {
        let p = 8;
        let mut w = SampleWindow::new(p).unwrap();
        for n in 0..1000 {
            w.push(n as f32, -(n as f32));
            assert!(w.write_pos() >= p && w.write_pos() <= 2 * p);
        }
    }

    #[test]
    fn tap_returns_most_recent_p_samples_in_order() {
        let p = 4;
        let mut w = SampleWindow::new(p).unwrap();
        for n in 0..10 {
            w.push(n as f32, 0.0);
        }
        assert_eq!(w.tap_re(), &[6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn wraparound_preserves_continuity() {
        let p = 3;
        let mut w = SampleWindow::new(p).unwrap();
        let values: Vec<f32> = (0..20).map(|n| n as f32).collect();
        for &v in &values {
            w.push(v, 0.0);
            let tap = w.tap_re();
            let expected_last = values.iter().take_while(|&&x| x <= v).collect::<Vec<_>>();
            let expected: Vec<f32> = expected_last
                .iter()
                .rev()
                .take(p)
                .rev()
                .map(|&&x| x)
                .collect();
            assert_eq!(tap, expected.as_slice());
        }
    }
}
