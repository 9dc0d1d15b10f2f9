//! Errors caused by defects of the layer itself rather than of the application.

use std::fmt::{Display, Formatter};

use crate::objects::ObjectKind;

/// An inconsistency in the static kind or entry point tables.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SchemaError {
    KindIndexMismatch { kind: ObjectKind, index: usize },
    MissingParent(ObjectKind),
    ParentScope { kind: ObjectKind, parent: ObjectKind },
    CascadeParent { kind: ObjectKind, child: ObjectKind },
    DuplicateEntryPoint(&'static str),
    /// A parameter path does not name a handle parameter of the expected kind.
    UnresolvedPath { entry_point: &'static str, path: String },
    /// An action creates or destroys an object kind in a way its lifetime does not permit.
    ActionLifetime { entry_point: &'static str, kind: ObjectKind },
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::KindIndexMismatch { kind, index } => write!(f, "{} is stored at kind table index {}", kind, index),
            SchemaError::MissingParent(kind) => write!(f, "{} has no parent kind", kind),
            SchemaError::ParentScope { kind, parent } => write!(f, "instance scoped {} has device scoped parent {}", kind, parent),
            SchemaError::CascadeParent { kind, child } => write!(f, "{} cannot implicitly destroy {}", kind, child),
            SchemaError::DuplicateEntryPoint(name) => write!(f, "entry point {} is declared more than once", name),
            SchemaError::UnresolvedPath { entry_point, path } => write!(f, "{}: parameter path {} does not name a matching handle", entry_point, path),
            SchemaError::ActionLifetime { entry_point, kind } => write!(f, "{}: action is incompatible with the lifetime of {}", entry_point, kind),
        }
    }
}

impl std::error::Error for SchemaError {
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LayerError {
    Schema(SchemaError),
    UnknownEntryPoint(String),
}

impl From<SchemaError> for LayerError {
    fn from(err: SchemaError) -> Self {
        LayerError::Schema(err)
    }
}

impl Display for LayerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerError::Schema(err) => write!(f, "invalid layer schema: {}", err),
            LayerError::UnknownEntryPoint(name) => write!(f, "no interception entry for {}", name),
        }
    }
}

impl std::error::Error for LayerError {
}
