use std::fmt::{Display, Formatter};

use crate::objects::{ObjectHandle, ObjectKind};
use crate::validation::location::Location;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Severity {
    Fatal,
    Warning,
}

/// A single broken object lifetime rule.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Violation {
    pub rule_id: &'static str,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
    /// The objects involved, most relevant first.
    pub objects: Vec<(ObjectKind, ObjectHandle)>,
}

impl Violation {
    pub fn new(rule_id: &'static str, location: Location, message: String) -> Self {
        Self {
            rule_id,
            severity: Severity::Fatal,
            message,
            location,
            objects: Vec::new(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_object(mut self, kind: ObjectKind, handle: ObjectHandle) -> Self {
        self.objects.push((kind, handle));
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ {} ] {} {}", self.rule_id, self.location, self.message)
    }
}
