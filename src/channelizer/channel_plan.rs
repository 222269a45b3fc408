//! Channel-frequency map: DFT-bin ordering, channel 0 is DC.

use serde::{Deserialize, Serialize};

/// One channel's static frequency/rate record.
///
/// Serializable for callers that persist or transmit a plan descriptor
/// (not the live buffers behind it — those stay process-local and
/// unserialized).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    pub index: usize,
    pub center_freq_hz: f64,
    pub output_rate_hz: f64,
}

/// Build the channel table for `m_channels` channels tuned to
/// `center_freq_hz` over an input sample rate `input_rate_hz`.
///
/// Channel `k` in `[0, M/2]` sits at `center + k*(fs/M)`; channels in
/// `(M/2, M)` sit at `center + (k-M)*(fs/M)` — natural DFT bin ordering.
pub fn build_channel_table(
    m_channels: usize,
    center_freq_hz: f64,
    input_rate_hz: f64,
) -> Vec<ChannelDescriptor> {
    let bin_hz = input_rate_hz / m_channels as f64;
    let output_rate_hz = 2.0 * input_rate_hz / m_channels as f64;
    let half = m_channels / 2;

    (0..m_channels)
        .map(|k| {
            let offset = if k <= half {
                k as f64 * bin_hz
            } else {
                (k as i64 - m_channels as i64) as f64 * bin_hz
            };
            ChannelDescriptor {
                index: k,
                center_freq_hz: center_freq_hz + offset,
                output_rate_hz,
            }
        })
        .collect()
}
