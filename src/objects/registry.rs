//! The live object registry of one instance or device.
//!
//! A registry is partitioned by [`ObjectKind`]. Every partition is an independent map from handle
//! to [`ObjectRecord`] guarded by its own reader/writer lock, so validating a buffer never waits
//! on a command buffer being allocated on another thread.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::objects::handle::ObjectHandle;
use crate::objects::kind::{ObjectKind, Scope};

/// How a tracked object entered the registry.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ObjectOrigin {
    /// Created or allocated by the application, which must eventually destroy it.
    Created,
    /// Retrieved or enumerated. The application has no obligation to destroy it.
    Retrieved,
}

/// Everything the layer knows about one live object.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ObjectRecord {
    pub handle: ObjectHandle,
    pub kind: ObjectKind,
    /// Whether allocation callbacks were supplied when the object was created.
    pub custom_allocator: bool,
    pub parent: Option<ObjectHandle>,
    pub origin: ObjectOrigin,
}

impl ObjectRecord {
    pub fn new(handle: ObjectHandle, kind: ObjectKind) -> Self {
        Self {
            handle,
            kind,
            custom_allocator: false,
            parent: None,
            origin: ObjectOrigin::Created,
        }
    }

    pub fn with_parent(mut self, parent: ObjectHandle) -> Self {
        if !parent.is_null() {
            self.parent = Some(parent);
        }
        self
    }

    pub fn with_custom_allocator(mut self, custom_allocator: bool) -> Self {
        self.custom_allocator = custom_allocator;
        self
    }

    pub fn with_origin(mut self, origin: ObjectOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Whether leaving this object alive at scope teardown is a leak.
    pub fn is_leak_tracked(&self) -> bool {
        self.origin == ObjectOrigin::Created && self.kind.info().is_leak_tracked()
    }
}

type Partition = HashMap<ObjectHandle, ObjectRecord>;

/// Live objects of one instance or device scope.
pub struct Registry {
    scope: Scope,
    owner: ObjectHandle,
    instance: Option<Arc<Registry>>,
    partitions: Box<[RwLock<Partition>]>,
}

impl Registry {
    fn new(scope: Scope, owner: ObjectHandle, instance: Option<Arc<Registry>>) -> Self {
        let partitions = ObjectKind::ALL.iter().map(|_| RwLock::new(HashMap::new())).collect();

        Self {
            scope,
            owner,
            instance,
            partitions,
        }
    }

    /// Creates the registry of an instance.
    pub fn new_instance(instance: ObjectHandle) -> Self {
        Self::new(Scope::Instance, instance, None)
    }

    /// Creates the registry of a device owned by the instance registry `instance`.
    pub fn new_device(device: ObjectHandle, instance: Arc<Registry>) -> Self {
        Self::new(Scope::Device, device, Some(instance))
    }

    pub fn get_scope(&self) -> Scope {
        self.scope
    }

    /// Returns the instance or device handle owning this registry.
    pub fn get_owner(&self) -> ObjectHandle {
        self.owner
    }

    /// Returns the instance registry owning a device registry.
    pub fn get_instance(&self) -> Option<&Arc<Registry>> {
        self.instance.as_ref()
    }

    fn read(&self, kind: ObjectKind) -> RwLockReadGuard<Partition> {
        self.partitions[kind.get_index()].read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, kind: ObjectKind) -> RwLockWriteGuard<Partition> {
        self.partitions[kind.get_index()].write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts a record, making it visible to all subsequent lookups.
    ///
    /// A still live record with the same handle is overwritten and returned.
    pub fn create_object(&self, record: ObjectRecord) -> Option<ObjectRecord> {
        log::trace!("Tracking {} {} (parent {:?})", record.kind, record.handle, record.parent);
        self.write(record.kind).insert(record.handle, record)
    }

    /// Removes a record together with every record implicitly destroyed with it.
    ///
    /// Returns all removed records, the destroyed object first. Removing an object that is not
    /// live is a no op and returns an empty list.
    pub fn destroy_object(&self, handle: ObjectHandle, kind: ObjectKind) -> Vec<ObjectRecord> {
        let record = match self.write(kind).remove(&handle) {
            Some(record) => record,
            None => return Vec::new(),
        };
        log::trace!("Untracking {} {}", kind, handle);

        let mut removed = vec![record];
        for child in kind.info().children {
            removed.extend(self.destroy_children(handle, *child));
        }
        removed
    }

    /// Removes every record of `kind` whose parent is `parent`, recursing into their own children.
    pub fn destroy_children(&self, parent: ObjectHandle, kind: ObjectKind) -> Vec<ObjectRecord> {
        let mut removed = Vec::new();
        {
            let mut guard = self.write(kind);
            guard.retain(|_, record| {
                if record.parent == Some(parent) {
                    removed.push(*record);
                    false
                } else {
                    true
                }
            });
        }

        if !removed.is_empty() {
            log::debug!("Implicitly destroyed {} {} object(s) of {}", removed.len(), kind, parent);
        }

        let mut cascaded = Vec::new();
        for record in &removed {
            for child in kind.info().children {
                cascaded.extend(self.destroy_children(record.handle, *child));
            }
        }
        removed.extend(cascaded);
        removed
    }

    pub fn lookup(&self, handle: ObjectHandle, kind: ObjectKind) -> Option<ObjectRecord> {
        self.read(kind).get(&handle).copied()
    }

    pub fn contains(&self, handle: ObjectHandle, kind: ObjectKind) -> bool {
        self.read(kind).contains_key(&handle)
    }

    /// Returns a snapshot of all live records of a kind, ordered by handle.
    pub fn all_live(&self, kind: ObjectKind) -> Vec<ObjectRecord> {
        let mut records: Vec<_> = self.read(kind).values().copied().collect();
        records.sort_by_key(|record| record.handle);
        records
    }

    /// Removes and returns all records of a kind, ordered by handle.
    pub fn clear(&self, kind: ObjectKind) -> Vec<ObjectRecord> {
        let mut records: Vec<_> = self.write(kind).drain().map(|(_, record)| record).collect();
        records.sort_by_key(|record| record.handle);
        records
    }

    /// The total number of live records across all partitions.
    pub fn live_count(&self) -> usize {
        ObjectKind::ALL.iter().map(|kind| self.read(*kind).len()).sum()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("scope", &self.scope)
            .field("owner", &self.owner)
            .field("live_count", &self.live_count())
            .finish()
    }
}
