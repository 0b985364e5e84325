//! Ties the timer and the counter registry together under the begin/end protocol.

use crate::pal::PlatformFacade;
use crate::{ProfilerConfig, Registry, Report, Result, Timer};

/// Whether a kernel measurement is currently in flight.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "a measurement slot is either idle or timing, there is nothing else it can be"
)]
pub enum SlotState {
    /// No kernel has begun since the last end or since creation.
    Idle,

    /// A kernel has begun and its end has not yet been observed.
    Timing,
}

/// Collects wall-clock kernel timings reported by an execution framework.
///
/// The host brackets every kernel with [`begin_kernel()`](Self::begin_kernel) and
/// [`end_kernel()`](Self::end_kernel), passing the same kernel name and execution space to
/// both. Statistics accumulate per `(name, space)` pair until [`finalize()`](Self::finalize)
/// drains them into a [`Report`].
///
/// # Nesting
///
/// There is a single measurement slot. A `begin_kernel()` always restarts the timer, so a
/// second begin before the matching end discards the first measurement. An end without a
/// begin records the time since the last begin or, failing that, since the profiler was
/// created. Neither case is treated as an error.
///
/// # Examples
///
/// ```
/// use kernel_timer::Profiler;
///
/// let mut profiler = Profiler::new();
/// profiler.initialize();
///
/// for _ in 0..3 {
///     profiler.begin_kernel("axpy", "OpenMP");
///     // The host runs the kernel here.
///     profiler.end_kernel("axpy", "OpenMP");
/// }
///
/// let report = profiler.finalize();
/// assert_eq!(report.len(), 1);
/// assert_eq!(report.lines().next().unwrap().invocations(), 3);
/// ```
#[derive(Debug)]
pub struct Profiler {
    timer: Timer,
    registry: Registry,
    state: SlotState,
    config: ProfilerConfig,
}

impl Profiler {
    /// Creates a profiler with the default configuration.
    #[expect(
        clippy::new_without_default,
        reason = "creating a profiler starts its timer, which is not what a default value should do"
    )]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ProfilerConfig::default())
    }

    /// Creates a profiler that writes its final report as configured.
    #[must_use]
    pub fn with_config(config: ProfilerConfig) -> Self {
        Self::with_platform(config, PlatformFacade::real())
    }

    #[must_use]
    pub(crate) fn with_platform(config: ProfilerConfig, platform: PlatformFacade) -> Self {
        Self {
            timer: Timer::with_platform(platform),
            registry: Registry::new(),
            state: SlotState::Idle,
            config,
        }
    }

    /// Marks the start of kernel activity. Has no effect on the collected statistics.
    pub fn initialize(&self) {
        tracing::info!(
            output = %self.config.output(),
            skip_empty = self.config.skip_empty(),
            "kernel timer initialized"
        );
    }

    /// Starts timing a kernel, discarding any measurement already in flight.
    pub fn begin_kernel(&mut self, name: &str, space: &str) {
        tracing::trace!(name, space, "kernel begin");

        self.timer.reset();
        self.state = SlotState::Timing;
    }

    /// Stops timing a kernel and adds the elapsed wall-clock time to its statistics.
    pub fn end_kernel(&mut self, name: &str, space: &str) {
        let elapsed_seconds = self.timer.elapsed_seconds();

        if self.state == SlotState::Idle {
            tracing::debug!(name, space, "kernel end without matching begin");
        }
        tracing::trace!(name, space, elapsed_seconds, "kernel end");

        let handle = self.registry.find_or_append(name, space);
        self.registry.record(handle, elapsed_seconds);
        self.state = SlotState::Idle;
    }

    /// Drains all statistics into a report ordered by first appearance of each kernel.
    ///
    /// Afterwards the profiler is empty and can be reused; finalizing again yields an empty
    /// report.
    pub fn finalize(&mut self) -> Report {
        let mut report = Report::new();
        self.registry
            .drain_and_report(|name, space, invocations, total_seconds| {
                report.push(name, space, invocations, total_seconds);
            });
        self.state = SlotState::Idle;

        tracing::info!(distinct_kernels = report.len(), "kernel timer finalized");

        report
    }

    /// Drains all statistics and writes the report to the configured output.
    ///
    /// The drained report is returned even though it has already been written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReportOutput`](crate::Error::ReportOutput) if the report cannot be
    /// written. The statistics are drained regardless.
    pub fn finalize_to_output(&mut self) -> Result<Report> {
        let report = self.finalize();

        self.config
            .output()
            .write_report(&report, self.config.skip_empty())?;

        Ok(report)
    }

    /// Whether a kernel measurement is in flight.
    #[must_use]
    pub fn state(&self) -> SlotState {
        self.state
    }

    /// Number of distinct `(name, space)` pairs recorded since the last finalize.
    #[must_use]
    pub fn distinct_kernels(&self) -> usize {
        self.registry.len()
    }

    /// Read access to the statistics collected so far.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The configuration this profiler writes its report with.
    #[must_use]
    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }
}
