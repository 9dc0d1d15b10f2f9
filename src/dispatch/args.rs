//! The handle bearing arguments of one intercepted call.

use ash::vk;

use crate::objects::ObjectHandle;

/// The value of one argument or struct member.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    Handle(ObjectHandle),
    Handles(Vec<ObjectHandle>),
    Struct(CallArgs),
    Structs(Vec<CallArgs>),
    ObjectType(vk::ObjectType),
    /// Whether allocation callbacks were supplied.
    Allocator(bool),
}

/// Named argument values of a call or members of a struct argument.
///
/// Only members relevant to object tracking need to be present. Absent handles read as null and
/// absent arrays as empty.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct CallArgs {
    fields: Vec<(&'static str, Value)>,
}

impl CallArgs {
    pub const ALLOCATOR: &'static str = "pAllocator";

    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
        }
    }

    /// Sets the value of `name`, replacing any previous value.
    pub fn set(&mut self, name: &'static str, value: Value) {
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, current)) => *current = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn with(mut self, name: &'static str, value: Value) -> Self {
        self.set(name, value);
        self
    }

    pub fn handle(self, name: &'static str, handle: ObjectHandle) -> Self {
        self.with(name, Value::Handle(handle))
    }

    pub fn vk_handle<H: vk::Handle>(self, name: &'static str, handle: H) -> Self {
        self.handle(name, ObjectHandle::from_vk(handle))
    }

    pub fn handles(self, name: &'static str, handles: &[ObjectHandle]) -> Self {
        self.with(name, Value::Handles(handles.to_vec()))
    }

    pub fn structure(self, name: &'static str, value: CallArgs) -> Self {
        self.with(name, Value::Struct(value))
    }

    pub fn structures(self, name: &'static str, values: Vec<CallArgs>) -> Self {
        self.with(name, Value::Structs(values))
    }

    pub fn object_type(self, name: &'static str, object_type: vk::ObjectType) -> Self {
        self.with(name, Value::ObjectType(object_type))
    }

    pub fn allocator(self, allocator: Option<&vk::AllocationCallbacks>) -> Self {
        self.with(Self::ALLOCATOR, Value::Allocator(allocator.is_some()))
    }

    /// Marks allocation callbacks as supplied (or not) without an actual callback struct.
    pub fn custom_allocator(self, custom_allocator: bool) -> Self {
        self.with(Self::ALLOCATOR, Value::Allocator(custom_allocator))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(field, _)| *field == name).map(|(_, value)| value)
    }

    /// Follows a path of member names through single struct values.
    pub fn resolve(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let value = self.get(first)?;
        if rest.is_empty() {
            return Some(value);
        }
        match value {
            Value::Struct(inner) => inner.resolve(rest),
            _ => None,
        }
    }

    /// Returns the single handle at `path` or null if there is none.
    pub fn get_handle(&self, path: &[&str]) -> ObjectHandle {
        match self.resolve(path) {
            Some(Value::Handle(handle)) => *handle,
            _ => ObjectHandle::NULL,
        }
    }

    /// Returns all handles at `path`, treating a single handle as an array of one.
    pub fn get_handles(&self, path: &[&str]) -> Vec<ObjectHandle> {
        match self.resolve(path) {
            Some(Value::Handle(handle)) => vec![*handle],
            Some(Value::Handles(handles)) => handles.clone(),
            _ => Vec::new(),
        }
    }

    pub fn get_object_type(&self, name: &str) -> Option<vk::ObjectType> {
        match self.get(name) {
            Some(Value::ObjectType(object_type)) => Some(*object_type),
            _ => None,
        }
    }

    pub fn has_custom_allocator(&self) -> bool {
        matches!(self.get(Self::ALLOCATOR), Some(Value::Allocator(true)))
    }

    /// Stores the handle written by the implementation to the output argument `name`.
    pub fn set_output(&mut self, name: &'static str, handle: ObjectHandle) {
        self.set(name, Value::Handle(handle));
    }

    /// Stores the handles written by the implementation to the output array `name`.
    pub fn set_outputs(&mut self, name: &'static str, handles: &[ObjectHandle]) {
        self.set(name, Value::Handles(handles.to_vec()));
    }
}
