//! Stable error taxonomy shared by every plan constructor and hot-path call.
//!
//! The four kinds mirror the C-ABI error codes of the external interface
//! (§6/§7 of the design): callers that cross the `ffi` boundary see the
//! negative numeric codes, Rust callers see this enum via `Result`.

use thiserror::Error;

/// Stable negative error code returned at the `ffi` boundary. Zero means success.
pub type ErrorCode = i32;

pub const CODE_SUCCESS: ErrorCode = 0;
pub const CODE_INVALID_ARGUMENT: ErrorCode = -1;
pub const CODE_INVALID_SIZE: ErrorCode = -2;
pub const CODE_NO_MEMORY: ErrorCode = -3;
pub const CODE_NOT_IMPLEMENTED: ErrorCode = -4;

/// Error returned by plan constructors and the sample-processing hot path.
///
/// Propagation follows §7: constructors return this via `Result`, the
/// sample path returns it only for structural faults (never a partial
/// commit), and nothing here is raised from within the per-sample inner
/// loops themselves.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Null pointer, negative count, out-of-range channel count, or a size
    /// that is not a power of two where one is required.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// FFT size outside `[2, MAX_FFT_SIZE]` or not a power of two.
    #[error("invalid size: {0}")]
    InvalidSize(&'static str),

    /// An allocation during construction failed.
    #[error("no memory: {0}")]
    NoMemory(&'static str),

    /// Reserved for future kernels; never returned by the present set.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

impl Error {
    /// Map to the stable negative code exposed at the `ffi` boundary.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Error::InvalidArgument(_) => CODE_INVALID_ARGUMENT,
            Error::InvalidSize(_) => CODE_INVALID_SIZE,
            Error::NoMemory(_) => CODE_NO_MEMORY,
            Error::NotImplemented(_) => CODE_NOT_IMPLEMENTED,
        }
    }
}

impl From<&Error> for ErrorCode {
    fn from(e: &Error) -> Self {
        e.code()
    }
}

/// Map a stable code back to its static description, for FFI consumers
/// that only carry the numeric code across the boundary.
#[must_use]
pub const fn code_to_str(code: ErrorCode) -> &'static str {
    match code {
        CODE_SUCCESS => "success",
        CODE_INVALID_ARGUMENT => "invalid argument",
        CODE_INVALID_SIZE => "invalid size",
        CODE_NO_MEMORY => "no memory",
        CODE_NOT_IMPLEMENTED => "not implemented",
        _ => "unknown error",
    }
}

pub type Result<T> = std::result::Result<T, Error>;
