//! Polyphase branch coefficient table.
//!
//! Subsamples the prototype filter into `M` branches of `p` taps each,
//! stored reverse-ordered (chronologically oldest sample first, to line
//! up with [`super::window::BranchWindow`]'s tap order) in one contiguous
//! 64-byte aligned arena for cache locality across branches.

use crate::align::AlignedBuf;
use crate::error::{Error, Result};

pub struct BranchTable {
    arena: AlignedBuf,
    p: usize,
    m: usize,
}

impl BranchTable {
    /// `prototype` has length `2*m_channels*p/2 + 1` in the channelizer's
    /// usual 48-tap/branch configuration; any prototype of at least
    /// `m_channels*p` taps is accepted, with missing high-index taps
    /// implicitly treated as zero.
    pub fn new(prototype: &[f32], m_channels: usize, p: usize) -> Result<Self> {
        if m_channels == 0 || p == 0 {
            return Err(Error::InvalidArgument("channel count and branch length must be nonzero"));
        }

        let mut arena = AlignedBuf::zeroed(m_channels * p)?;
        {
            let slice = arena.as_mut_slice();
            for i in 0..m_channels {
                for k in 0..p {
                    // branch i, tap n = prototype[i + n*M]; stored reversed
                    // so tap index k holds n = p-1-k.
                    let n = p - 1 - k;
                    let proto_idx = i + n * m_channels;
                    slice[i * p + k] = prototype.get(proto_idx).copied().unwrap_or(0.0);
                }
            }
        }

        Ok(Self {
            arena,
            p,
            m: m_channels,
        })
    }

    #[inline]
    #[must_use]
    pub fn branch(&self, i: usize) -> &[f32] {
        debug_assert!(i < self.m);
        &self.arena.as_slice()[i * self.p..(i + 1) * self.p]
    }

    #[inline]
    #[must_use]
    pub fn branch_len(&self) -> usize {
        self.p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_subsampling_matches_definition() {
        let m = 4;
        let p = 3;
        // prototype length m*p = 12, values 0..12 so we can check indices directly.
        let prototype: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let table = BranchTable::new(&prototype, m, p).unwrap();
        for i in 0..m {
            let branch = table.branch(i);
            for k in 0..p {
                let n = p - 1 - k;
                let expected = prototype[i + n * m];
                assert_eq!(branch[k], expected, "branch {i} tap {k}");
            }
        }
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(BranchTable::new(&[1.0], 0, 4).is_err());
        assert!(BranchTable::new(&[1.0], 4, 0).is_err());
    }
}
