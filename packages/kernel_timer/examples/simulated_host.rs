//! Plays the role of an execution framework host driving the C ABI entry points.
//!
//! A few kernels are "executed" in two execution spaces, then the profiler is finalized and
//! prints its report to stderr (or wherever `KERNEL_TIMER_OUTPUT` points).
//!
//! Run with: `KERNEL_TIMER_LOG=kernel_timer=debug cargo run --example simulated_host`.
#![expect(
    clippy::arithmetic_side_effects,
    reason = "this is example code that does not need production-level safety"
)]

use std::ffi::CString;
use std::hint::black_box;
use std::thread;
use std::time::Duration;

use kernel_timer::ffi::{
    profiler_begin_kernel, profiler_end_kernel, profiler_finalize, profiler_initialize,
};

fn main() {
    profiler_initialize();

    for step in 0..5_u64 {
        launch("init_field", "OpenMP", || thread::sleep(Duration::from_millis(2)));
        launch("compute_flux", "Cuda", || {
            let mut sum = 0_u64;
            for i in 0..100_000 {
                sum = sum.wrapping_add(black_box(i * step));
            }
            black_box(sum);
        });
        launch("init_field", "Cuda", || thread::sleep(Duration::from_millis(1)));
    }

    profiler_finalize();
}

fn launch(name: &str, space: &str, kernel: impl FnOnce()) {
    let name = CString::new(name).expect("kernel names in this example contain no NUL");
    let space = CString::new(space).expect("space names in this example contain no NUL");

    // SAFETY: The CStrings are NUL-terminated and outlive both calls.
    unsafe {
        profiler_begin_kernel(name.as_ptr(), space.as_ptr());
    }

    kernel();

    // SAFETY: The CStrings are NUL-terminated and outlive both calls.
    unsafe {
        profiler_end_kernel(name.as_ptr(), space.as_ptr());
    }
}
