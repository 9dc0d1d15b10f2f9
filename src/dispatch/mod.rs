//! Interception of vulkan entry points.
//!
//! The [`table`] describes the handle arguments and lifetime effects of every intercepted entry
//! point using the types in [`schema`]. [`ObjectLifetimes`] interprets these descriptions for each
//! [`Call`].

pub mod args;
pub mod schema;
pub mod table;
pub mod layer;

pub use args::{CallArgs, Value};
pub use layer::{Call, CallOutcome, ObjectLifetimes, RecordObject, DEVICE_LEAK_RULE, INSTANCE_LEAK_RULE};
pub use table::lookup_entry_point;
