//! Profiler configuration read from the environment.

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use crate::{Error, Report, Result};

/// Selects where the final report is written.
pub const OUTPUT_VARIABLE: &str = "KERNEL_TIMER_OUTPUT";

/// Suppresses the report entirely when no kernel was recorded.
pub const SKIP_EMPTY_VARIABLE: &str = "KERNEL_TIMER_SKIP_EMPTY";

/// Destination of the final kernel timing report.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum OutputTarget {
    /// The standard error stream of the host process.
    #[default]
    Stderr,

    /// The standard output stream of the host process.
    Stdout,

    /// A file that is created, or truncated if it exists, when the report is written.
    File(PathBuf),
}

impl OutputTarget {
    /// Paths do not need to be valid Unicode.
    fn parse(value: OsString) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::InvalidConfig {
                variable: OUTPUT_VARIABLE,
                value: String::new(),
                problem: "expected 'stderr', 'stdout' or a file path",
            });
        }

        match value.to_str() {
            Some("stderr") => Ok(Self::Stderr),
            Some("stdout") => Ok(Self::Stdout),
            _ => Ok(Self::File(PathBuf::from(value))),
        }
    }

    /// Writes the report to this destination.
    ///
    /// With `skip_empty`, an empty report produces no output and, for file targets, no file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReportOutput`] if the destination cannot be opened or written.
    pub fn write_report(&self, report: &Report, skip_empty: bool) -> Result<()> {
        if skip_empty && report.is_empty() {
            return Ok(());
        }

        let outcome = match self {
            Self::Stderr => report.write_to(&mut io::stderr().lock(), skip_empty),
            Self::Stdout => report.write_to(&mut io::stdout().lock(), skip_empty),
            Self::File(path) => File::create(path)
                .and_then(|file| report.write_to(&mut BufWriter::new(file), skip_empty)),
        };

        outcome.map_err(|source| Error::ReportOutput {
            destination: self.to_string(),
            source,
        })
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stderr => write!(f, "stderr"),
            Self::Stdout => write!(f, "stdout"),
            Self::File(path) => write!(f, "file '{}'", path.display()),
        }
    }
}

/// Controls where and how the final report of a [`Profiler`](crate::Profiler) is written.
///
/// The report format itself is fixed.
///
/// # Examples
///
/// ```
/// use kernel_timer::{OutputTarget, ProfilerConfig};
///
/// let config = ProfilerConfig::default()
///     .with_output(OutputTarget::Stdout)
///     .with_skip_empty(true);
///
/// assert_eq!(config.output(), &OutputTarget::Stdout);
/// assert!(config.skip_empty());
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProfilerConfig {
    output: OutputTarget,
    skip_empty: bool,
}

impl ProfilerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Unset variables keep their defaults. The output path may be any path the operating
    /// system accepts, including one that is not valid Unicode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|variable| env::var_os(variable))
    }

    /// Reads the configuration through an arbitrary variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(OUTPUT_VARIABLE) {
            config.output = OutputTarget::parse(value)?;
        }

        if let Some(value) = lookup(SKIP_EMPTY_VARIABLE) {
            config.skip_empty = parse_bool(SKIP_EMPTY_VARIABLE, &value)?;
        }

        Ok(config)
    }

    /// Sets the report destination.
    #[must_use]
    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    /// Sets whether an empty report is suppressed entirely.
    #[must_use]
    pub fn with_skip_empty(mut self, skip_empty: bool) -> Self {
        self.skip_empty = skip_empty;
        self
    }

    /// The report destination.
    #[must_use]
    pub fn output(&self) -> &OutputTarget {
        &self.output
    }

    /// Whether an empty report is suppressed entirely.
    #[must_use]
    pub fn skip_empty(&self) -> bool {
        self.skip_empty
    }
}

fn parse_bool(variable: &'static str, value: &OsStr) -> Result<bool> {
    let Some(value) = value.to_str() else {
        return Err(Error::InvalidConfig {
            variable,
            value: value.to_string_lossy().into_owned(),
            problem: "value is not valid Unicode",
        });
    };

    if value == "1" || value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value == "0" || value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(Error::InvalidConfig {
            variable,
            value: value.to_owned(),
            problem: "expected '1', 'true', '0' or 'false'",
        })
    }
}
