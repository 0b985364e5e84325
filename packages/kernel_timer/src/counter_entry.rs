//! Statistics accumulated for a single kernel key.

/// Accumulated statistics for one kernel, identified by its name and execution space.
///
/// Entries are owned by a [`Registry`](crate::Registry) and can only be observed through it.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterEntry {
    name: String,
    space: String,
    invocations: u64,
    total_seconds: f64,
}

impl CounterEntry {
    /// Creates a zero-initialized entry for the given key.
    pub(crate) fn new(name: &str, space: &str) -> Self {
        Self {
            name: name.to_owned(),
            space: space.to_owned(),
            invocations: 0,
            total_seconds: 0.0,
        }
    }

    /// Whether this entry belongs to the given key.
    ///
    /// Both parts must match exactly. No case folding or trimming is applied.
    pub(crate) fn matches(&self, name: &str, space: &str) -> bool {
        self.name == name && self.space == space
    }

    /// Adds one invocation of the given duration.
    ///
    /// Negative durations (from wall clock adjustments) are accumulated unchanged.
    pub(crate) fn add_time(&mut self, seconds: f64) {
        self.invocations = self.invocations.checked_add(1).expect(
            "kernel invocation count overflows u64 - this indicates an unrealistic scenario",
        );
        self.total_seconds += seconds;
    }

    /// The kernel name as reported by the host.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The execution space the kernel ran in.
    #[must_use]
    pub fn space(&self) -> &str {
        &self.space
    }

    /// How many times the kernel has completed.
    #[must_use]
    pub fn invocations(&self) -> u64 {
        self.invocations
    }

    /// Sum of the wall-clock seconds of all completed invocations.
    #[must_use]
    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_entry_is_zeroed() {
        let entry = CounterEntry::new("axpy", "Serial");

        assert_eq!(entry.name(), "axpy");
        assert_eq!(entry.space(), "Serial");
        assert_eq!(entry.invocations(), 0);
        assert!(entry.total_seconds().abs() < f64::EPSILON);
    }

    #[test]
    fn matches_requires_exact_name_and_space() {
        let entry = CounterEntry::new("axpy", "Serial");

        assert!(entry.matches("axpy", "Serial"));
        assert!(!entry.matches("axpy", "Cuda"));
        assert!(!entry.matches("Axpy", "Serial"));
        assert!(!entry.matches("axpy ", "Serial"));
        assert!(!entry.matches("axpy", " Serial"));
    }

    #[test]
    fn add_time_accumulates() {
        let mut entry = CounterEntry::new("axpy", "Serial");

        entry.add_time(0.25);
        entry.add_time(0.5);

        assert_eq!(entry.invocations(), 2);
        assert!((entry.total_seconds() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn add_time_accepts_negative_values() {
        let mut entry = CounterEntry::new("axpy", "Serial");

        entry.add_time(0.1);
        entry.add_time(-0.3);

        assert_eq!(entry.invocations(), 2);
        assert!((entry.total_seconds() + 0.2).abs() < 1e-12);
    }
}
