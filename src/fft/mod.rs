//! Fixed-size complex FFT kernel: Stockham radix-4 autosort with a radix-2
//! cleanup stage, no bit-reversal pass, ping-pong scratch buffers owned by
//! the plan.

mod kernel;
mod plan;
mod twiddle;

pub use plan::{FftPlan, MAX_FFT_SIZE};
