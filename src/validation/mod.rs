//! Handle validation, violation reporting and leak sweeping.

pub mod location;
pub mod violation;
pub mod sink;
pub mod validator;
pub mod sweeper;

pub use location::Location;
pub use violation::{Severity, Violation};
pub use sink::{ErrorSink, LogErrorSink, NullErrorSink, QueueErrorSink};
pub use validator::{DestroyRules, ObjectRules, Validator};
