//! C ABI entry points through which an execution framework drives the process-wide profiler.
//!
//! The host loads this package as a dynamic library and calls these functions around every
//! kernel it executes. All state lives in a single process-wide [`Profiler`], created lazily
//! on first use with configuration read from the environment.
//!
//! Calls are serialized by a mutex, but there is still only one measurement slot: a host that
//! runs kernels concurrently on several threads gets interleaved begin/end pairs sharing one
//! timer.
//!
//! No panic ever unwinds into the host. Failures are logged and the call returns normally.

use std::borrow::Cow;
use std::ffi::{CStr, c_char};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{Error, Profiler, ProfilerConfig, logging};

static PROFILER: Mutex<Option<Profiler>> = Mutex::new(None);

/// Called by the host once before any kernel activity.
#[unsafe(no_mangle)]
pub extern "C" fn profiler_initialize() {
    guard("profiler_initialize", || {
        with_profiler(|profiler| profiler.initialize());
    });
}

/// Called by the host immediately before it executes a kernel.
///
/// # Safety
///
/// `name` and `space` must each be null or point to a NUL-terminated string that remains
/// valid and unmodified for the duration of the call. Null is treated as an empty string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn profiler_begin_kernel(name: *const c_char, space: *const c_char) {
    guard("profiler_begin_kernel", || {
        // SAFETY: Forwarding the guarantees the caller gave us for these pointers.
        let name = unsafe { host_string(name, "name") };
        // SAFETY: Forwarding the guarantees the caller gave us for these pointers.
        let space = unsafe { host_string(space, "space") };

        with_profiler(|profiler| profiler.begin_kernel(&name, &space));
    });
}

/// Called by the host immediately after a kernel completes, with the same name and space that
/// were passed to the matching [`profiler_begin_kernel()`].
///
/// # Safety
///
/// `name` and `space` must each be null or point to a NUL-terminated string that remains
/// valid and unmodified for the duration of the call. Null is treated as an empty string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn profiler_end_kernel(name: *const c_char, space: *const c_char) {
    guard("profiler_end_kernel", || {
        // SAFETY: Forwarding the guarantees the caller gave us for these pointers.
        let name = unsafe { host_string(name, "name") };
        // SAFETY: Forwarding the guarantees the caller gave us for these pointers.
        let space = unsafe { host_string(space, "space") };

        with_profiler(|profiler| profiler.end_kernel(&name, &space));
    });
}

/// Called by the host once at shutdown. Writes the report and releases all statistics.
///
/// Kernel activity after this call starts over with a fresh profiler. Finalizing again with no
/// activity in between writes nothing, leaving any previously written report intact.
#[unsafe(no_mangle)]
pub extern "C" fn profiler_finalize() {
    guard("profiler_finalize", || {
        let Some(mut profiler) = lock_profiler().take() else {
            tracing::debug!("no kernel activity since the last finalize, nothing to report");
            return;
        };

        if let Err(error) = profiler.finalize_to_output() {
            tracing::warn!(%error, "kernel timing report was lost");
        }
    });
}

fn lock_profiler() -> MutexGuard<'static, Option<Profiler>> {
    // Statistics stay usable after a panic in another entry point.
    PROFILER.lock().unwrap_or_else(PoisonError::into_inner)
}

fn with_profiler<R>(f: impl FnOnce(&mut Profiler) -> R) -> R {
    let mut slot = lock_profiler();
    f(slot.get_or_insert_with(create_profiler))
}

fn create_profiler() -> Profiler {
    logging::install_from_env();

    let config = ProfilerConfig::from_env().unwrap_or_else(|error| {
        tracing::warn!(%error, "using default kernel timer configuration");
        ProfilerConfig::default()
    });

    Profiler::with_config(config)
}

fn guard(entry_point: &'static str, f: impl FnOnce()) {
    if panic::catch_unwind(AssertUnwindSafe(f)).is_err() {
        tracing::error!(entry_point, "kernel timer entry point panicked");
    }
}

/// Borrows a host string, replacing invalid UTF-8 so that the kernel is still recorded.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string valid for reads for `'a`.
unsafe fn host_string<'a>(ptr: *const c_char, argument: &'static str) -> Cow<'a, str> {
    if ptr.is_null() {
        return Cow::Borrowed("");
    }

    // SAFETY: Non-null, and the caller guarantees NUL termination and validity for 'a.
    let raw = unsafe { CStr::from_ptr(ptr) };

    match raw.to_str() {
        Ok(valid) => Cow::Borrowed(valid),
        Err(source) => {
            let error = Error::InvalidKernelString { argument, source };
            tracing::debug!(%error, "replacing invalid UTF-8 in kernel string");
            raw.to_string_lossy()
        }
    }
}
