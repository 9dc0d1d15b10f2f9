//! Object lifetime validation for vulkan.
//!
//! Tracks every object created through intercepted vulkan entry points and checks that each handle
//! passed to a later call refers to a live object of the expected kind owned by the right parent.
//! Objects left alive when their instance or device is destroyed are reported as leaks.
//!
//! The entry point is [`ObjectLifetimes`]. Each intercepted call is described by a [`Call`] and run
//! through [`ObjectLifetimes::intercept`], or through the individual pre and post call phases when
//! embedding the layer into an existing dispatch chain.

pub mod objects;
pub mod validation;
pub mod dispatch;
pub mod config;
pub mod error;


pub use config::LayerConfig;
pub use dispatch::{Call, CallArgs, CallOutcome, ObjectLifetimes, RecordObject};
pub use error::{LayerError, SchemaError};
pub use objects::{ObjectHandle, ObjectKind};
pub use validation::{ErrorSink, Location, Severity, Violation};
