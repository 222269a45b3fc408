//! Process-global FFT library init flag.
//!
//! The FFT kernel in this crate is self-contained (no external library to
//! bring up), but the channelizer constructor still goes through the
//! three-state compare-and-swap handshake the concurrency model specifies,
//! since concurrent constructors in the same process must agree on
//! completion before any of them proceeds. Losers of the race spin on the
//! `IN_PROGRESS` state rather than re-attempting the swap.

use crate::error::{Error, Result};
use std::sync::atomic::{AtomicI32, Ordering};

const UNINITIALIZED: i32 = 0;
const IN_PROGRESS: i32 = 1;
const READY: i32 = 2;
const FAILED: i32 = -1;

static FFT_LIB_STATE: AtomicI32 = AtomicI32::new(UNINITIALIZED);

/// Ensure the process-global FFT state has finished initializing,
/// performing the one-time setup if this call is the winner of the race.
pub fn ensure_ready() -> Result<()> {
    loop {
        match FFT_LIB_STATE.compare_exchange(
            UNINITIALIZED,
            IN_PROGRESS,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                // Nothing external to bring up for this kernel; the swap
                // itself is the handshake other constructors wait on.
                FFT_LIB_STATE.store(READY, Ordering::Release);
                return Ok(());
            }
            Err(READY) => return Ok(()),
            Err(FAILED) => {
                return Err(Error::NoMemory("global fft state failed to initialize"));
            }
            Err(IN_PROGRESS) => {
                std::hint::spin_loop();
            }
            Err(other) => unreachable!("unexpected fft init state {other}"),
        }
    }
}
