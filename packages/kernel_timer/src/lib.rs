#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Wall-clock timing of kernels launched by a parallel execution framework.
//!
//! An execution framework notifies this package immediately before and after every kernel it
//! runs. The elapsed wall-clock time of each invocation is accumulated per kernel, keyed by the
//! kernel name and the execution space it ran in. At shutdown, a report lists every kernel with
//! its invocation count, total time and average time.
//!
//! The core functionality includes:
//! - [`Profiler`] - Receives begin/end notifications and produces the final [`Report`]
//! - [`Timer`] - Measures wall-clock time since its last reset
//! - [`Registry`] - Insertion-ordered counters, one per `(name, space)` pair
//! - [`ProfilerConfig`] - Where the final report goes, read from the environment
//!
//! Hosts that load this package as a dynamic library use the C ABI entry points in [`ffi`],
//! which drive a single process-wide profiler.
//!
//! # Simple Usage
//!
//! ```
//! use kernel_timer::Profiler;
//!
//! # fn main() {
//! let mut profiler = Profiler::new();
//! profiler.initialize();
//!
//! profiler.begin_kernel("init_matrix", "OpenMP");
//! // The framework runs the kernel here.
//! profiler.end_kernel("init_matrix", "OpenMP");
//!
//! profiler.begin_kernel("init_matrix", "Cuda");
//! profiler.end_kernel("init_matrix", "Cuda");
//!
//! let report = profiler.finalize();
//! assert_eq!(report.len(), 2);
//!
//! println!("{report}");
//! # }
//! ```
//!
//! # Timing model
//!
//! Measurements use the system wall clock, so they include any scheduling or device-wait
//! time the caller observed. If the wall clock is adjusted backward during a kernel, that
//! invocation contributes a negative duration, which is reported unchanged.
//!
//! There is one measurement slot per profiler. Nested or interleaved kernels are not
//! supported: a begin always restarts the timer.
//!
//! # Configuration
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `KERNEL_TIMER_OUTPUT` | `stderr` (default), `stdout` or a file path for the report |
//! | `KERNEL_TIMER_SKIP_EMPTY` | `true` to write nothing when no kernel was recorded |
//! | `KERNEL_TIMER_LOG` | `tracing` filter directive for diagnostic logging, default `warn` |

mod config;
mod counter_entry;
mod error;
pub mod ffi;
pub mod logging;
mod pal;
mod profiler;
mod registry;
mod report;
mod timer;

pub use config::{OUTPUT_VARIABLE, OutputTarget, ProfilerConfig, SKIP_EMPTY_VARIABLE};
pub use counter_entry::CounterEntry;
pub use error::{Error, Result};
pub use profiler::{Profiler, SlotState};
pub use registry::{EntryHandle, Registry};
pub use report::{Report, ReportLine};
pub use timer::Timer;
