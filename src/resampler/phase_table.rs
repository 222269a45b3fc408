//! Polyphase subfilter table for the rational resampler.
//!
//! Same subsampling idea as [`crate::channelizer::coeffs::BranchTable`]: a
//! single prototype lowpass is decomposed into `L` phases of `taps`
//! coefficients each, stored reverse-ordered so a phase's coefficients line
//! up with [`crate::window::SampleWindow::tap_re`]'s oldest-first slice for
//! a direct dot product.

use crate::align::AlignedBuf;
use crate::error::{Error, Result};

pub struct PhaseTable {
    arena: AlignedBuf,
    taps: usize,
    l: usize,
}

impl PhaseTable {
    /// `prototype` has length `l * taps` (or more; extra high-index taps are
    /// ignored). Phase `p`, tap `k` holds `prototype[p + (taps-1-k)*l]` —
    /// the standard `h_p[k] = h[k*L + p]` polyphase decomposition, reversed.
    pub fn new(prototype: &[f32], l: usize, taps: usize) -> Result<Self> {
        if l == 0 || taps == 0 {
            return Err(Error::InvalidArgument(
                "phase count and subfilter length must be nonzero",
            ));
        }

        let mut arena = AlignedBuf::zeroed(l * taps)?;
        {
            let slice = arena.as_mut_slice();
            for p in 0..l {
                for k in 0..taps {
                    let n = taps - 1 - k;
                    let proto_idx = p + n * l;
                    slice[p * taps + k] = prototype.get(proto_idx).copied().unwrap_or(0.0);
                }
            }
        }

        Ok(Self { arena, taps, l })
    }

    #[inline]
    #[must_use]
    pub fn phase(&self, p: usize) -> &[f32] {
        debug_assert!(p < self.l);
        &self.arena.as_slice()[p * self.taps..(p + 1) * self.taps]
    }

    #[inline]
    #[must_use]
    pub fn taps(&self) -> usize {
        self.taps
    }
}
