//! C-ABI surface for non-Rust callers (§6 of the design).
//!
//! Every owning type above (`FftPlan`, `Channelizer`, `Resampler`) keeps its
//! safe Rust API as the primary interface; this module is a thin wrapper
//! around the same construct/process/destroy lifecycle using opaque raw
//! pointers, interleaved `f32` buffers, and the stable negative error codes
//! of [`crate::error`]. Every fallible entry point returns a code — zero for
//! success — rather than panicking or aborting, matching §7's "no internal
//! logging, no global error state; all diagnostics flow through return
//! values."
//!
//! Ownership: `cc_*_create` returns a pointer this module allocated via
//! `Box::into_raw`; the matching `cc_*_destroy` is the only valid way to
//! free it (`Box::from_raw`). Passing a pointer to any other function after
//! it has been destroyed, or destroying it twice, is undefined behavior —
//! the same contract any C library with explicit teardown carries.

use crate::channelizer::Channelizer;
use crate::error::{CODE_SUCCESS, Error, ErrorCode};
use crate::fft::FftPlan;
use crate::resampler::Resampler;
use num_complex::Complex32;
use std::os::raw::{c_char, c_double};
use std::slice;

/// Map a stable error code to a static, NUL-terminated description. The
/// returned pointer is valid for the life of the process; the caller must
/// not free it.
#[unsafe(no_mangle)]
pub extern "C" fn cc_error_str(code: ErrorCode) -> *const c_char {
    let s: &'static [u8] = match code {
        0 => b"success\0",
        -1 => b"invalid argument\0",
        -2 => b"invalid size\0",
        -3 => b"no memory\0",
        -4 => b"not implemented\0",
        _ => b"unknown error\0",
    };
    s.as_ptr().cast::<c_char>()
}

fn complexify(raw: &[f32]) -> Vec<Complex32> {
    raw.chunks_exact(2).map(|p| Complex32::new(p[0], p[1])).collect()
}

// ---------------------------------------------------------------- FFT ----

/// Create an FFT plan for `size` points. Returns null on any construction
/// error (invalid size, or allocation failure).
#[unsafe(no_mangle)]
pub extern "C" fn cc_fft_create(size: usize) -> *mut FftPlan {
    match FftPlan::new(size) {
        Ok(plan) => Box::into_raw(Box::new(plan)),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Destroy a plan created by [`cc_fft_create`]. Tolerates null.
///
/// # Safety
/// `plan` must be null or a live pointer from `cc_fft_create`, not
/// previously destroyed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cc_fft_destroy(plan: *mut FftPlan) {
    if plan.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(plan) });
}

/// # Safety
/// `plan` must be null or a live pointer from `cc_fft_create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cc_fft_size(plan: *const FftPlan) -> usize {
    unsafe { plan.as_ref() }.map_or(0, FftPlan::size)
}

/// Forward transform on an interleaved `[re,im,...]` buffer of length
/// `2*size`. Returns a stable error code; zero means success.
///
/// # Safety
/// `plan` must be a live pointer from `cc_fft_create`. `input`/`output`
/// must each point to at least `2*cc_fft_size(plan)` valid, non-overlapping
/// `f32`s.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cc_fft_forward_interleaved(
    plan: *mut FftPlan,
    input: *const f32,
    output: *mut f32,
) -> ErrorCode {
    let Some(plan) = (unsafe { plan.as_mut() }) else {
        return Error::InvalidArgument("null plan").code();
    };
    if input.is_null() || output.is_null() {
        return Error::InvalidArgument("null buffer").code();
    }
    let n = plan.size();
    let input = unsafe { slice::from_raw_parts(input, 2 * n) };
    let output = unsafe { slice::from_raw_parts_mut(output, 2 * n) };
    plan.forward_interleaved(input, output);
    CODE_SUCCESS
}

/// Unnormalized inverse transform on an interleaved buffer; same safety
/// contract as [`cc_fft_forward_interleaved`].
///
/// # Safety
/// Same as [`cc_fft_forward_interleaved`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cc_fft_inverse_interleaved(
    plan: *mut FftPlan,
    input: *const f32,
    output: *mut f32,
) -> ErrorCode {
    let Some(plan) = (unsafe { plan.as_mut() }) else {
        return Error::InvalidArgument("null plan").code();
    };
    if input.is_null() || output.is_null() {
        return Error::InvalidArgument("null buffer").code();
    }
    let n = plan.size();
    let input = unsafe { slice::from_raw_parts(input, 2 * n) };
    let output = unsafe { slice::from_raw_parts_mut(output, 2 * n) };
    plan.inverse_interleaved(input, output);
    CODE_SUCCESS
}

/// Forward transform on split real/imaginary buffers, each of length
/// `size`.
///
/// # Safety
/// `plan` must be live; all four buffers must point to at least
/// `cc_fft_size(plan)` valid `f32`s and must not alias each other.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cc_fft_forward_split(
    plan: *mut FftPlan,
    in_re: *const f32,
    in_im: *const f32,
    out_re: *mut f32,
    out_im: *mut f32,
) -> ErrorCode {
    let Some(plan) = (unsafe { plan.as_mut() }) else {
        return Error::InvalidArgument("null plan").code();
    };
    if in_re.is_null() || in_im.is_null() || out_re.is_null() || out_im.is_null() {
        return Error::InvalidArgument("null buffer").code();
    }
    let n = plan.size();
    let in_re = unsafe { slice::from_raw_parts(in_re, n) };
    let in_im = unsafe { slice::from_raw_parts(in_im, n) };
    let out_re = unsafe { slice::from_raw_parts_mut(out_re, n) };
    let out_im = unsafe { slice::from_raw_parts_mut(out_im, n) };
    plan.forward(in_re, in_im, out_re, out_im);
    CODE_SUCCESS
}

// ------------------------------------------------------------ Channelizer

/// Construct a channelizer. Returns null on any construction error.
#[unsafe(no_mangle)]
pub extern "C" fn cc_channelizer_create(
    m_channels: usize,
    center_hz: c_double,
    bandwidth_hz: c_double,
    input_rate_hz: c_double,
    max_input_samples: usize,
) -> *mut Channelizer {
    match Channelizer::new(m_channels, center_hz, bandwidth_hz, input_rate_hz, max_input_samples) {
        Ok(c) => Box::into_raw(Box::new(c)),
        Err(_) => std::ptr::null_mut(),
    }
}

/// # Safety
/// `ptr` must be null or a live pointer from `cc_channelizer_create`, not
/// previously destroyed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cc_channelizer_destroy(ptr: *mut Channelizer) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(ptr) });
}

/// # Safety
/// `ptr` must be null or a live pointer from `cc_channelizer_create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cc_channelizer_num_channels(ptr: *const Channelizer) -> usize {
    unsafe { ptr.as_ref() }.map_or(0, Channelizer::num_channels)
}

/// # Safety
/// `ptr` must be null or a live pointer from `cc_channelizer_create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cc_channelizer_channel_freq(ptr: *const Channelizer, channel: usize) -> c_double {
    match unsafe { ptr.as_ref() } {
        Some(c) if channel < c.num_channels() => c.channel_freq(channel),
        _ => 0.0,
    }
}

/// Process `n_samples` interleaved complex input samples. On success,
/// writes the number of output samples produced per channel to `*n_out`
/// and returns zero; the samples themselves are retrieved afterward, one
/// channel at a time, via [`cc_channelizer_channel_output`].
///
/// # Safety
/// `ptr` must be a live pointer from `cc_channelizer_create`. `input` must
/// point to at least `2*n_samples` valid `f32`s. `n_out` must point to a
/// valid, writable `usize`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cc_channelizer_process(
    ptr: *mut Channelizer,
    input: *const f32,
    n_samples: usize,
    n_out: *mut usize,
) -> ErrorCode {
    let Some(chan) = (unsafe { ptr.as_mut() }) else {
        return Error::InvalidArgument("null channelizer").code();
    };
    if input.is_null() || n_out.is_null() {
        return Error::InvalidArgument("null buffer").code();
    }

    let raw = unsafe { slice::from_raw_parts(input, 2 * n_samples) };
    let complex = complexify(raw);

    match chan.process(&complex) {
        Ok(count) => {
            unsafe { *n_out = count };
            CODE_SUCCESS
        }
        Err(e) => e.code(),
    }
}

/// Copy channel `channel`'s most recent output (from the prior
/// [`cc_channelizer_process`] call) into `out`, interleaved, `2*len`
/// floats where `len` is the `n_out` that call produced.
///
/// # Safety
/// `ptr` must be live. `out` must point to at least `2*len` valid,
/// writable `f32`s where `len` is the channel's current output length.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cc_channelizer_channel_output(
    ptr: *const Channelizer,
    channel: usize,
    out: *mut f32,
) -> ErrorCode {
    let Some(chan) = (unsafe { ptr.as_ref() }) else {
        return Error::InvalidArgument("null channelizer").code();
    };
    if out.is_null() {
        return Error::InvalidArgument("null buffer").code();
    }
    if channel >= chan.num_channels() {
        return Error::InvalidArgument("channel index out of range").code();
    }

    let samples = chan.channel_output(channel);
    let out_slice = unsafe { slice::from_raw_parts_mut(out, samples.len() * 2) };
    for (i, s) in samples.iter().enumerate() {
        out_slice[2 * i] = s.re;
        out_slice[2 * i + 1] = s.im;
    }
    CODE_SUCCESS
}

// -------------------------------------------------------------- Resampler

/// Construct a resampler. Returns null on any construction error.
#[unsafe(no_mangle)]
pub extern "C" fn cc_resampler_create(r_in_hz: c_double, r_out_hz: c_double, max_block: usize) -> *mut Resampler {
    match Resampler::new(r_in_hz, r_out_hz, max_block) {
        Ok(r) => Box::into_raw(Box::new(r)),
        Err(_) => std::ptr::null_mut(),
    }
}

/// # Safety
/// `ptr` must be null or a live pointer from `cc_resampler_create`, not
/// previously destroyed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cc_resampler_destroy(ptr: *mut Resampler) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(ptr) });
}

/// Process `n_samples` interleaved complex input samples into `out`
/// (interleaved, caller-allocated for at least `2*out_capacity` floats).
/// Writes the number of output samples actually produced to `*n_out`.
/// Returns an invalid-argument error, without writing `out`, if the
/// reduced L/M ratio could produce more than `out_capacity` samples for
/// this block.
///
/// # Safety
/// `ptr` must be live. `input` must point to at least `2*n_samples` valid
/// `f32`s. `out` must point to at least `2*out_capacity` valid, writable
/// `f32`s. `n_out` must point to a valid, writable `usize`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cc_resampler_process(
    ptr: *mut Resampler,
    input: *const f32,
    n_samples: usize,
    out: *mut f32,
    out_capacity: usize,
    n_out: *mut usize,
) -> ErrorCode {
    let Some(r) = (unsafe { ptr.as_mut() }) else {
        return Error::InvalidArgument("null resampler").code();
    };
    if input.is_null() || out.is_null() || n_out.is_null() {
        return Error::InvalidArgument("null buffer").code();
    }

    let raw = unsafe { slice::from_raw_parts(input, 2 * n_samples) };
    let complex = complexify(raw);

    match r.process(&complex) {
        Ok(produced) => {
            if produced.len() > out_capacity {
                return Error::InvalidArgument("output buffer too small").code();
            }
            let out_slice = unsafe { slice::from_raw_parts_mut(out, out_capacity * 2) };
            for (i, s) in produced.iter().enumerate() {
                out_slice[2 * i] = s.re;
                out_slice[2 * i + 1] = s.im;
            }
            unsafe { *n_out = produced.len() };
            CODE_SUCCESS
        }
        Err(e) => e.code(),
    }
}
