//! Kernel timing reports.

use std::fmt;
use std::io::{self, Write};
use std::slice;

/// Final kernel timing statistics, produced by finalizing a [`Profiler`](crate::Profiler).
///
/// Lines are kept in the order in which each `(name, space)` key was first seen. A report is
/// an owned snapshot that can be sent to other threads, written with [`Report::write_to()`]
/// or inspected programmatically.
///
/// # Examples
///
/// ```
/// use kernel_timer::Profiler;
///
/// let mut profiler = Profiler::new();
///
/// profiler.begin_kernel("fill", "Serial");
/// profiler.end_kernel("fill", "Serial");
///
/// let report = profiler.finalize();
/// for line in report.lines() {
///     println!(
///         "{} in {} ran {} times, {:.6}s on average",
///         line.name(),
///         line.space(),
///         line.invocations(),
///         line.average_seconds()
///     );
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    lines: Vec<ReportLine>,
}

/// Statistics for a single kernel in a [`Report`].
#[derive(Clone, Debug, PartialEq)]
pub struct ReportLine {
    name: String,
    space: String,
    invocations: u64,
    total_seconds: f64,
}

impl Report {
    /// Creates an empty report.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a line. Callers push lines in first-seen order.
    pub(crate) fn push(&mut self, name: &str, space: &str, invocations: u64, total_seconds: f64) {
        self.lines.push(ReportLine {
            name: name.to_owned(),
            space: space.to_owned(),
            invocations,
            total_seconds,
        });
    }

    /// Whether no kernel was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct kernels in the report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Iterates over the kernels in first-seen order.
    pub fn lines(&self) -> slice::Iter<'_, ReportLine> {
        self.lines.iter()
    }

    /// Writes the human-readable report to `writer`.
    ///
    /// With `skip_empty`, nothing at all is written for an empty report, not even a header.
    pub fn write_to(&self, writer: &mut impl Write, skip_empty: bool) -> io::Result<()> {
        if skip_empty && self.is_empty() {
            return Ok(());
        }

        write!(writer, "{self}")?;
        writer.flush()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a ReportLine;
    type IntoIter = slice::Iter<'a, ReportLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines()
    }
}

impl ReportLine {
    /// The kernel name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The execution space the kernel ran in.
    #[must_use]
    pub fn space(&self) -> &str {
        &self.space
    }

    /// How many times the kernel completed.
    #[must_use]
    pub fn invocations(&self) -> u64 {
        self.invocations
    }

    /// Sum of the wall-clock seconds of all invocations.
    #[must_use]
    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }

    /// Mean wall-clock seconds per invocation, or zero if there were no invocations.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "invocation counts beyond 2^52 are unrealistic and an approximate mean is fine"
    )]
    pub fn average_seconds(&self) -> f64 {
        if self.invocations == 0 {
            0.0
        } else {
            self.total_seconds / self.invocations as f64
        }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} invocations, {:.6}s total, {:.6}s average",
            self.name,
            self.space,
            self.invocations,
            self.total_seconds,
            self.average_seconds()
        )
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            writeln!(f, "No kernel timing statistics captured.")?;
        } else {
            writeln!(f, "Kernel timing statistics:")?;
            for line in &self.lines {
                writeln!(f, "  {line}")?;
            }
        }
        Ok(())
    }
}
