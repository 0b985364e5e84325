//! Append-only registry of per-kernel counters.

use std::{mem, slice};

use crate::CounterEntry;

/// Identifies an entry in a [`Registry`].
///
/// A handle is only valid for the registry that issued it and only until that registry is
/// drained. Handles carry no borrow, so the registry can be mutated while a handle is held.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct EntryHandle {
    index: usize,
    generation: u64,
}

/// Insertion-ordered collection of kernel counters keyed by `(name, space)`.
///
/// Entries are appended when a key is first seen and are only ever released all at once, by
/// [`drain_and_report()`](Self::drain_and_report). There is at most one entry per key.
///
/// # Lookup cost
///
/// [`find_or_append()`](Self::find_or_append) is a linear scan over the distinct keys seen so
/// far, comparing name and space for exact equality. The number of distinct kernels in a
/// program is small (tens to low hundreds) compared to the number of invocations, and the scan
/// is what keeps report order identical to first-seen order. Replacing it with a hash index
/// would change the reporting order.
///
/// # Examples
///
/// ```
/// use kernel_timer::Registry;
///
/// let mut registry = Registry::new();
///
/// let axpy = registry.find_or_append("axpy", "Serial");
/// registry.record(axpy, 0.002);
/// registry.record(axpy, 0.003);
///
/// registry.drain_and_report(|name, space, invocations, total_seconds| {
///     println!("{name} ({space}): {invocations} calls, {total_seconds:.6}s");
/// });
///
/// assert!(registry.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<CounterEntry>,

    // Incremented on every drain so handles issued before the drain are recognized as stale.
    generation: u64,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle of the entry for `(name, space)`, appending a zeroed entry if the key
    /// has not been seen before.
    ///
    /// Calling this repeatedly with the same key always yields the same handle.
    pub fn find_or_append(&mut self, name: &str, space: &str) -> EntryHandle {
        let existing = self
            .entries
            .iter()
            .position(|entry| entry.matches(name, space));
        let index = existing.unwrap_or_else(|| self.append(name, space));

        EntryHandle {
            index,
            generation: self.generation,
        }
    }

    fn append(&mut self, name: &str, space: &str) -> usize {
        tracing::debug!(name, space, "registering new kernel");

        self.entries.push(CounterEntry::new(name, space));
        self.entries
            .len()
            .checked_sub(1)
            .expect("we just pushed an entry so the registry cannot be empty")
    }

    /// Adds one invocation lasting `elapsed_seconds` to the entry.
    ///
    /// Any value is accepted, including negative durations caused by wall clock adjustments.
    ///
    /// # Panics
    ///
    /// Panics if the handle was issued by a different registry or before the last drain.
    pub fn record(&mut self, handle: EntryHandle, elapsed_seconds: f64) {
        assert!(
            handle.generation == self.generation,
            "entry handle was issued before the registry was drained"
        );

        self.entries
            .get_mut(handle.index)
            .expect("entry handle does not belong to this registry")
            .add_time(elapsed_seconds);
    }

    /// Returns the entry referenced by the handle, if it is still live.
    #[must_use]
    pub fn get(&self, handle: EntryHandle) -> Option<&CounterEntry> {
        if handle.generation != self.generation {
            return None;
        }

        self.entries.get(handle.index)
    }

    /// Visits every entry once in first-seen order, then releases all of them.
    ///
    /// `emit` receives the name, space, invocation count and total seconds of each entry.
    /// Afterwards the registry is empty and all previously issued handles are stale. Draining
    /// an empty registry emits nothing.
    pub fn drain_and_report<F>(&mut self, mut emit: F)
    where
        F: FnMut(&str, &str, u64, f64),
    {
        let entries = mem::take(&mut self.entries);
        self.generation = self.generation.wrapping_add(1);

        for entry in entries {
            emit(
                entry.name(),
                entry.space(),
                entry.invocations(),
                entry.total_seconds(),
            );
        }
    }

    /// Iterates over the live entries in first-seen order.
    pub fn iter(&self) -> slice::Iter<'_, CounterEntry> {
        self.entries.iter()
    }

    /// Number of distinct keys currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key is currently tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a CounterEntry;
    type IntoIter = slice::Iter<'a, CounterEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
