// Enable pedantic lints globally, then allow the ones that don't pay for
// themselves in a DSP core where float casts and similar variable names
// (re/im, m/p, l/m_r) are the domain, not an oversight.
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::must_use_candidate,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::float_cmp,
    clippy::unnecessary_wraps
)]

//! Wideband receive pipeline core: a polyphase filter-bank (PFB) analysis
//! channelizer, the small-FFT kernel it's built on, and the per-channel
//! polyphase resampler that follows it.
//!
//! # Data flow
//!
//! Complex baseband samples arrive at a fixed input rate and are split by
//! [`channelizer::Channelizer`] into `M` narrowband streams, one per DFT
//! bin, at twice each channel's Nyquist rate. Each channel's stream then
//! passes through its own [`resampler::Resampler`] to convert from the
//! channelizer's 2x-oversampled output rate to whatever rate a downstream
//! decoder expects. [`fft`] is the frequency-domain kernel the channelizer
//! drives at the end of every block; [`fir`] designs the prototype lowpass
//! both the channelizer and the resampler subsample into their respective
//! polyphase branches.
//!
//! # Concurrency
//!
//! Every plan type in this crate (`FftPlan`, `Channelizer`, `Resampler`) is
//! thread-confined: construct one per thread/channel, never share a `&mut`
//! across threads. The only process-wide shared state is the one-time FFT
//! library init flag in [`channelizer`], a tri-state atomic handshake with
//! no ongoing synchronization cost on the sample path.
//!
//! # C ABI
//!
//! [`ffi`] exports the same three lifecycles (`create`/`process`/`destroy`)
//! as `extern "C"` functions over opaque pointers and interleaved `f32`
//! buffers, for callers outside the Rust ecosystem. It is a wrapper, not a
//! second implementation — every `cc_*` function is a thin safety-checked
//! shim over the types above.
//!
//! # Non-goals
//!
//! This crate does not include the SDR front-end driver, the protocol
//! decoder bank, cross-channel event deduplication, output sinks, or CLI/
//! config-file parsing. Those are external collaborators whose interfaces
//! this crate defines only at the seams (interleaved complex sample
//! buffers in, per-channel sample buffers out).

pub mod align;
pub mod channelizer;
pub mod error;
pub mod ffi;
pub mod fft;
pub mod fir;
pub mod resampler;
pub mod simd;
pub mod window;

pub use channelizer::{ChannelDescriptor, Channelizer};
pub use error::{Error, ErrorCode, Result};
pub use fft::FftPlan;
pub use resampler::Resampler;
