use std::io;
use std::str::Utf8Error;

use thiserror::Error;

/// Errors that can occur at the edges of kernel timing: configuration and report output.
///
/// Recording kernel timings itself never fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An environment variable carried a value that cannot be interpreted.
    #[error("invalid value '{value}' for {variable}: {problem}")]
    InvalidConfig {
        /// Name of the environment variable.
        variable: &'static str,

        /// The value that was rejected.
        value: String,

        /// A human-readable description of the problem.
        problem: &'static str,
    },

    /// The timing report could not be written to its destination.
    #[error("failed to write kernel timing report to {destination}")]
    ReportOutput {
        /// Human-readable description of where the report was going.
        destination: String,

        /// The underlying I/O failure.
        source: io::Error,
    },

    /// A string received from the host was not valid UTF-8.
    #[error("kernel {argument} received from host is not valid UTF-8")]
    InvalidKernelString {
        /// Which argument of the host callback was affected.
        argument: &'static str,

        /// The underlying decoding failure.
        source: Utf8Error,
    },
}

/// A specialized `Result` type for kernel timer operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::error::Error as _;
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn invalid_config_names_variable_and_value() {
        let error = Error::InvalidConfig {
            variable: "KERNEL_TIMER_SKIP_EMPTY",
            value: "maybe".to_owned(),
            problem: "expected a boolean",
        };

        let message = error.to_string();
        assert!(message.contains("KERNEL_TIMER_SKIP_EMPTY"));
        assert!(message.contains("maybe"));
    }

    #[test]
    fn report_output_exposes_io_source() {
        let error = Error::ReportOutput {
            destination: "stdout".to_owned(),
            source: io::Error::other("pipe closed"),
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("stdout"));
    }
}
