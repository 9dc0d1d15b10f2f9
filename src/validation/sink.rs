//! Destinations for violation reports.

use concurrent_queue::ConcurrentQueue;

use crate::validation::violation::{Severity, Violation};

/// Receives every violation the layer finds.
///
/// Sinks are called inline on the thread that made the offending call and must therefore be
/// callable from many threads at once.
pub trait ErrorSink: Send + Sync {
    fn report(&self, violation: &Violation);
}

/// Forwards violations to the `log` crate.
pub struct LogErrorSink {
}

impl LogErrorSink {
    pub fn new() -> Self {
        Self {
        }
    }
}

impl Default for LogErrorSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorSink for LogErrorSink {
    fn report(&self, violation: &Violation) {
        match violation.severity {
            Severity::Fatal => log::error!("{}", violation),
            Severity::Warning => log::warn!("{}", violation),
        }
    }
}

/// Collects violations from any number of threads until they are drained.
pub struct QueueErrorSink {
    queue: ConcurrentQueue<Violation>,
}

impl QueueErrorSink {
    pub fn new() -> Self {
        Self {
            queue: ConcurrentQueue::unbounded(),
        }
    }

    /// Removes and returns all violations reported so far in the order they were reported.
    pub fn drain(&self) -> Vec<Violation> {
        let mut violations = Vec::with_capacity(self.queue.len());
        while let Ok(violation) = self.queue.pop() {
            violations.push(violation);
        }
        violations
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for QueueErrorSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorSink for QueueErrorSink {
    fn report(&self, violation: &Violation) {
        if self.queue.push(violation.clone()).is_err() {
            log::warn!("Dropped violation report {}", violation);
        }
    }
}

/// Discards everything.
pub struct NullErrorSink;

impl ErrorSink for NullErrorSink {
    fn report(&self, _: &Violation) {
    }
}
