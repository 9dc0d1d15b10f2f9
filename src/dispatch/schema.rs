//! Declarative description of the handle arguments and lifetime effects of an entry point.
//!
//! Every intercepted entry point is described by one [`EntryPoint`]. Its [`Param`] list names each
//! handle bearing argument (including handles nested in structs and arrays of structs) and its
//! [`Action`] list describes what the call does to object lifetimes. A single interpreter in
//! [`crate::dispatch::layer`] runs every entry point from these descriptions.

use std::collections::HashSet;

use crate::error::SchemaError;
use crate::objects::{Lifetime, ObjectKind, ObjectOrigin};
use crate::validation::{DestroyRules, ObjectRules};

/// Names of nested arguments starting at the top level argument, e.g. `["pAllocateInfo", "commandPool"]`.
pub type ArgPath = &'static [&'static str];

/// The parent an argument's object is expected to have.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ParentCheck {
    None,
    /// The object must belong to the instance or device the call is made on.
    Scope,
    /// The object's parent must be the handle found at this path.
    Arg(ArgPath),
}

#[derive(Copy, Clone, Debug)]
pub enum ParamType {
    Handle {
        kind: ObjectKind,
        null_allowed: bool,
        rules: ObjectRules,
        parent: ParentCheck,
    },
    /// A handle whose kind is given by the `vk::ObjectType` stored in the sibling `type_field`.
    TypedHandle {
        type_field: &'static str,
        rules: ObjectRules,
    },
    Struct(&'static [Param]),
}

/// One handle bearing argument or struct member.
#[derive(Copy, Clone, Debug)]
pub struct Param {
    pub name: &'static str,
    pub array: bool,
    pub ty: ParamType,
}

impl Param {
    pub const fn handle(name: &'static str, kind: ObjectKind, missing: &'static str) -> Self {
        Self {
            name,
            array: false,
            ty: ParamType::Handle {
                kind,
                null_allowed: false,
                rules: ObjectRules::new(missing),
                parent: ParentCheck::None,
            },
        }
    }

    pub const fn handles(name: &'static str, kind: ObjectKind, missing: &'static str) -> Self {
        let mut param = Self::handle(name, kind, missing);
        param.array = true;
        param
    }

    pub const fn typed_handle(name: &'static str, type_field: &'static str, missing: &'static str) -> Self {
        Self {
            name,
            array: false,
            ty: ParamType::TypedHandle {
                type_field,
                rules: ObjectRules::new(missing),
            },
        }
    }

    pub const fn structure(name: &'static str, fields: &'static [Param]) -> Self {
        Self {
            name,
            array: false,
            ty: ParamType::Struct(fields),
        }
    }

    pub const fn structures(name: &'static str, fields: &'static [Param]) -> Self {
        Self {
            name,
            array: true,
            ty: ParamType::Struct(fields),
        }
    }

    /// Allows the handle (or every element of a handle array) to be null.
    pub const fn optional(mut self) -> Self {
        match self.ty {
            ParamType::Handle { kind, rules, parent, .. } => {
                self.ty = ParamType::Handle { kind, null_allowed: true, rules, parent };
            }
            _ => panic!("Only handle parameters can be optional"),
        }
        self
    }

    /// Requires the object to belong to the instance or device the call is made on.
    pub const fn common_parent(self, rule: &'static str) -> Self {
        self.with_parent(ParentCheck::Scope, rule)
    }

    /// Requires the object's parent to be the handle at `path`.
    pub const fn parent(self, path: ArgPath, rule: &'static str) -> Self {
        self.with_parent(ParentCheck::Arg(path), rule)
    }

    const fn with_parent(mut self, parent: ParentCheck, rule: &'static str) -> Self {
        match self.ty {
            ParamType::Handle { kind, null_allowed, rules, .. } => {
                self.ty = ParamType::Handle { kind, null_allowed, rules: rules.with_parent(rule), parent };
            }
            ParamType::TypedHandle { type_field, rules } => {
                self.ty = ParamType::TypedHandle { type_field, rules: rules.with_parent(rule) };
            }
            ParamType::Struct(_) => panic!("Struct parameters have no parent"),
        }
        self
    }
}

/// Which results let a create action record its outputs.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ResultGate {
    Success,
    /// Enumerations may return `VK_INCOMPLETE` with a valid partial output.
    SuccessOrIncomplete,
    /// Any non error result, including `VK_PIPELINE_COMPILE_REQUIRED`. Used by batched pipeline
    /// creation which may stop part way through and leave null slots behind.
    SuccessCode,
}

/// Where a created object's parent comes from.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ParentSource {
    None,
    /// The dispatchable handle the call was made on.
    Dispatch,
    Arg(ArgPath),
}

/// Records the handle(s) written to the output argument `output` after the call.
#[derive(Copy, Clone, Debug)]
pub struct Create {
    pub output: &'static str,
    pub kind: ObjectKind,
    pub parent: ParentSource,
    pub origin: ObjectOrigin,
    pub gate: ResultGate,
}

impl Create {
    pub const fn new(output: &'static str, kind: ObjectKind) -> Self {
        Self {
            output,
            kind,
            parent: ParentSource::Dispatch,
            origin: ObjectOrigin::Created,
            gate: ResultGate::Success,
        }
    }

    pub const fn parent(mut self, parent: ParentSource) -> Self {
        self.parent = parent;
        self
    }

    pub const fn retrieved(mut self) -> Self {
        self.origin = ObjectOrigin::Retrieved;
        self
    }

    pub const fn gate(mut self, gate: ResultGate) -> Self {
        self.gate = gate;
        self
    }
}

/// Validates and untracks the handle(s) at `target` before the call.
#[derive(Copy, Clone, Debug)]
pub struct Destroy {
    pub target: ArgPath,
    pub kind: ObjectKind,
    pub rules: DestroyRules,
    pub parent: ParentCheck,
}

impl Destroy {
    pub const fn new(target: ArgPath, kind: ObjectKind, rules: DestroyRules) -> Self {
        Self {
            target,
            kind,
            rules,
            parent: ParentCheck::None,
        }
    }

    pub const fn parent(mut self, parent: ParentCheck) -> Self {
        self.parent = parent;
        self
    }
}

#[derive(Copy, Clone, Debug)]
pub enum Action {
    Create(Create),
    Destroy(Destroy),
    /// Implicitly destroys every object of `kind` whose parent is the pool at `pool`.
    Reset { pool: ArgPath, kind: ObjectKind },
    /// The handle at `target` is given back to the implementation but stays a valid argument for
    /// later calls. Nothing is removed from the registry.
    Release { target: ArgPath, kind: ObjectKind },
}

/// The complete interception contract of one entry point.
#[derive(Debug)]
pub struct EntryPoint {
    pub name: &'static str,
    /// The dispatchable handle argument selecting the instance or device. `None` only for
    /// `vkCreateInstance`.
    pub dispatch: Option<&'static str>,
    pub params: &'static [Param],
    pub actions: &'static [Action],
}

impl EntryPoint {
    pub fn creates(&self) -> impl Iterator<Item = &'static Create> {
        let actions: &'static [Action] = self.actions;
        actions.iter().filter_map(|action| match action {
            Action::Create(create) => Some(create),
            _ => None,
        })
    }

    pub fn destroys(&self) -> impl Iterator<Item = &'static Destroy> {
        let actions: &'static [Action] = self.actions;
        actions.iter().filter_map(|action| match action {
            Action::Destroy(destroy) => Some(destroy),
            _ => None,
        })
    }
}

/// Finds the handle parameter a path names. Only single structs are walked.
fn resolve_param(params: &'static [Param], path: &[&'static str]) -> Option<&'static Param> {
    let (first, rest) = path.split_first()?;
    let param = params.iter().find(|param| param.name == *first)?;
    if rest.is_empty() {
        return Some(param);
    }
    match param.ty {
        ParamType::Struct(fields) if !param.array => resolve_param(fields, rest),
        _ => None,
    }
}

fn check_path_kind(entry: &EntryPoint, path: &[&'static str], accepts: impl Fn(ObjectKind) -> bool) -> Result<(), SchemaError> {
    match resolve_param(entry.params, path).map(|param| param.ty) {
        Some(ParamType::Handle { kind, .. }) if accepts(kind) => Ok(()),
        _ => Err(SchemaError::UnresolvedPath { entry_point: entry.name, path: path.join(".") }),
    }
}

/// Whether a `parent` handle may own a `child` object.
fn is_parent_kind(parent: ObjectKind, child: ObjectKind) -> bool {
    child.get_parent() == Some(parent) || parent.info().children.contains(&child)
}

fn check_params(entry: &EntryPoint, params: &'static [Param]) -> Result<(), SchemaError> {
    for param in params {
        match param.ty {
            ParamType::Handle { kind, parent: ParentCheck::Arg(path), .. } => {
                check_path_kind(entry, path, |parent| is_parent_kind(parent, kind))?;
            }
            ParamType::Struct(fields) => check_params(entry, fields)?,
            _ => {}
        }
    }
    Ok(())
}

fn check_entry_point(entry: &EntryPoint) -> Result<(), SchemaError> {
    if let Some(dispatch) = entry.dispatch {
        let is_dispatch_target = entry.destroys().any(|destroy| destroy.target.len() == 1 && destroy.target[0] == dispatch);
        if !is_dispatch_target {
            check_path_kind(entry, &[dispatch], |kind| kind.is_dispatchable())?;
        }
    }

    check_params(entry, entry.params)?;

    for action in entry.actions {
        match action {
            Action::Create(create) => {
                let lifetime = create.kind.info().lifetime;
                if create.origin == ObjectOrigin::Created && lifetime != Lifetime::Owned {
                    return Err(SchemaError::ActionLifetime { entry_point: entry.name, kind: create.kind });
                }
                if let ParentSource::Arg(path) = create.parent {
                    check_path_kind(entry, path, |parent| is_parent_kind(parent, create.kind))?;
                }
            }
            Action::Destroy(destroy) => {
                if destroy.kind.info().lifetime != Lifetime::Owned {
                    return Err(SchemaError::ActionLifetime { entry_point: entry.name, kind: destroy.kind });
                }
                if let ParentCheck::Arg(path) = destroy.parent {
                    check_path_kind(entry, path, |parent| is_parent_kind(parent, destroy.kind))?;
                }
            }
            Action::Reset { pool, kind } => {
                check_path_kind(entry, pool, |parent| parent.info().children.contains(kind))?;
            }
            Action::Release { target, kind } => {
                if kind.info().lifetime == Lifetime::Owned {
                    return Err(SchemaError::ActionLifetime { entry_point: entry.name, kind: *kind });
                }
                check_path_kind(entry, target, |released| released == *kind)?;
            }
        }
    }

    Ok(())
}

/// Checks an entry point table for defects.
pub fn check_entry_points(entries: &[EntryPoint]) -> Result<(), SchemaError> {
    let mut names = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !names.insert(entry.name) {
            return Err(SchemaError::DuplicateEntryPoint(entry.name));
        }
        check_entry_point(entry)?;
    }
    Ok(())
}
