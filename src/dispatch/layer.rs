//! The object lifetime layer.
//!
//! Every intercepted call runs through the same three phases:
//! 1. [`ObjectLifetimes::pre_call_validate`] checks every handle argument without modifying any
//!    registry. Leaks are reported here when an instance or device is destroyed.
//! 2. [`ObjectLifetimes::pre_call_record`] untracks destroyed objects (and their implicitly
//!    destroyed children) before the driver is called. Destruction cannot fail so this is safe.
//! 3. [`ObjectLifetimes::post_call_record`] tracks created objects once the driver returned and
//!    the result permits it.
//!
//! [`ObjectLifetimes::intercept`] runs all three around a driver callback. Violations never stop
//! the driver call from being made.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ash::vk;

use crate::config::LayerConfig;
use crate::dispatch::args::{CallArgs, Value};
use crate::dispatch::schema::{check_entry_points, Action, EntryPoint, ParamType, Param, ParentCheck, ParentSource, ResultGate};
use crate::dispatch::table::{lookup_entry_point, ENTRY_POINTS};
use crate::error::LayerError;
use crate::objects::kind::check_kind_table;
use crate::objects::{ObjectHandle, ObjectKind, ObjectOrigin, ObjectRecord, Registry, Scope};
use crate::validation::sweeper::{destroy_leaked, report_leaks};
use crate::validation::{ErrorSink, Location, Validator, Violation};

/// Reported for every object left alive when its instance is destroyed.
pub const INSTANCE_LEAK_RULE: &str = "VUID-vkDestroyInstance-instance-00629";

/// Reported for every object left alive when its device is destroyed.
pub const DEVICE_LEAK_RULE: &str = "VUID-vkDestroyDevice-device-05137";

/// One invocation of an intercepted entry point.
#[derive(Clone, Debug)]
pub struct Call {
    entry_point: &'static EntryPoint,
    args: CallArgs,
}

impl Call {
    pub fn new(name: &str, args: CallArgs) -> Result<Self, LayerError> {
        let entry_point = lookup_entry_point(name).ok_or_else(|| LayerError::UnknownEntryPoint(name.to_string()))?;
        Ok(Self {
            entry_point,
            args,
        })
    }

    pub fn get_name(&self) -> &'static str {
        self.entry_point.name
    }

    pub fn get_entry_point(&self) -> &'static EntryPoint {
        self.entry_point
    }

    pub fn get_args(&self) -> &CallArgs {
        &self.args
    }

    pub fn get_args_mut(&mut self) -> &mut CallArgs {
        &mut self.args
    }
}

/// The outcome of the real driver call as seen by the post call phase.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct RecordObject {
    result: Option<vk::Result>,
}

impl RecordObject {
    /// `None` is used for entry points that do not return a `VkResult`.
    pub fn new(result: Option<vk::Result>) -> Self {
        Self {
            result,
        }
    }

    pub fn get_result(&self) -> Option<vk::Result> {
        self.result
    }

    pub fn is_success(&self) -> bool {
        matches!(self.result, None | Some(vk::Result::SUCCESS))
    }

    fn passes(&self, gate: ResultGate) -> bool {
        match gate {
            ResultGate::Success => self.is_success(),
            ResultGate::SuccessOrIncomplete => self.is_success() || self.result == Some(vk::Result::INCOMPLETE),
            ResultGate::SuccessCode => self.result.map_or(true, |result| result.as_raw() >= 0),
        }
    }
}

/// What [`ObjectLifetimes::intercept`] observed.
#[derive(Clone, Debug)]
pub struct CallOutcome {
    pub result: Option<vk::Result>,
    pub violations: Vec<Violation>,
}

/// Tracks the lifetime of every object created through the intercepted entry points.
///
/// Each instance and each device owns one [`Registry`]. Dispatchable handles (instances, physical
/// devices, devices, queues and command buffers) are mapped to the owner of the registry calls
/// made on them are validated against.
pub struct ObjectLifetimes {
    config: LayerConfig,
    sink: Arc<dyn ErrorSink>,
    scopes: RwLock<HashMap<ObjectHandle, Arc<Registry>>>,
    dispatch: RwLock<HashMap<ObjectHandle, ObjectHandle>>,
}

impl ObjectLifetimes {
    /// Creates a new layer after checking the kind and entry point tables.
    pub fn new(config: LayerConfig, sink: Arc<dyn ErrorSink>) -> Result<Self, LayerError> {
        check_kind_table()?;
        check_entry_points(ENTRY_POINTS)?;

        log::info!("Creating object lifetime layer with {:?} ({} entry points)", config, ENTRY_POINTS.len());

        Ok(Self {
            config,
            sink,
            scopes: RwLock::new(HashMap::new()),
            dispatch: RwLock::new(HashMap::new()),
        })
    }

    pub fn get_config(&self) -> &LayerConfig {
        &self.config
    }

    /// Returns the registry owned by an instance or device handle.
    pub fn get_registry(&self, owner: ObjectHandle) -> Option<Arc<Registry>> {
        self.read_scopes().get(&owner).cloned()
    }

    /// Looks up an object as a call dispatched on `dispatch` would see it.
    pub fn lookup(&self, dispatch: ObjectHandle, handle: ObjectHandle, kind: ObjectKind) -> Option<ObjectRecord> {
        let registry = self.resolve_scope(dispatch)?;
        Validator::new(&registry).lookup(handle, kind)
    }

    /// The number of live instance and device scopes.
    pub fn scope_count(&self) -> usize {
        self.read_scopes().len()
    }

    /// Runs all phases of `call` around `driver`.
    ///
    /// The driver receives the call arguments and must store any handles it creates in the output
    /// arguments. It returns the `VkResult` of the call or `None` for `void` entry points.
    pub fn intercept<F>(&self, call: &mut Call, driver: F) -> CallOutcome where F: FnOnce(&mut CallArgs) -> Option<vk::Result> {
        let violations = self.pre_call_validate(call);
        self.pre_call_record(call);

        let result = driver(&mut call.args);
        self.post_call_record(call, &RecordObject::new(result));

        CallOutcome {
            result,
            violations,
        }
    }

    /// Validates every handle argument of a call and reports all violations to the sink.
    ///
    /// Does not modify any registry.
    pub fn pre_call_validate(&self, call: &Call) -> Vec<Violation> {
        let entry = call.entry_point;
        let args = &call.args;
        let location = Location::new(entry.name);
        let mut violations = Vec::new();

        let dispatch = match entry.dispatch {
            Some(dispatch) => dispatch,
            None => return violations,
        };

        let dispatch_handle = args.get_handle(&[dispatch]);
        let registry = match self.resolve_scope(dispatch_handle) {
            Some(registry) => registry,
            None => {
                report_untracked_dispatch(entry, dispatch, dispatch_handle, &location, &mut violations);
                self.report(&violations);
                return violations;
            }
        };

        let siblings = || self.all_registries();
        let validator = Validator::new(&registry).with_siblings(&siblings);
        validate_params(&validator, args, args, entry.params, &location, &mut violations);

        for destroy in entry.destroys() {
            let expected_parent = expected_parent(args, destroy.parent);
            let custom_allocator = args.has_custom_allocator();

            for (handle, location) in path_handles(args, destroy.target, &location) {
                validator.validate_destroy_object(handle, destroy.kind, custom_allocator, &destroy.rules, expected_parent, &location, &mut violations);

                if destroy.kind.opens_scope().is_some() && !handle.is_null() {
                    self.report_scope_leaks(handle, &location, &mut violations);
                }
            }
        }

        self.report(&violations);
        violations
    }

    /// Untracks every object the call destroys.
    pub fn pre_call_record(&self, call: &Call) {
        let entry = call.entry_point;
        let args = &call.args;

        let registry = match entry.dispatch.and_then(|dispatch| self.resolve_scope(args.get_handle(&[dispatch]))) {
            Some(registry) => registry,
            None => return,
        };
        let validator = Validator::new(&registry);

        for action in entry.actions {
            match action {
                Action::Destroy(destroy) => {
                    let target = match validator.registry_for(destroy.kind) {
                        Some(target) => target,
                        None => continue,
                    };

                    for handle in args.get_handles(destroy.target) {
                        if handle.is_null() {
                            continue;
                        }

                        let removed = target.destroy_object(handle, destroy.kind);
                        self.forget_dispatchable(&removed);

                        if destroy.kind.opens_scope().is_some() {
                            self.close_scope(handle);
                        }
                    }
                }
                Action::Reset { pool, kind } => {
                    let pool = args.get_handle(pool);
                    if pool.is_null() {
                        continue;
                    }
                    if let Some(target) = validator.registry_for(*kind) {
                        let removed = target.destroy_children(pool, *kind);
                        self.forget_dispatchable(&removed);
                    }
                }
                Action::Release { target, kind } => {
                    log::debug!("{}: released {} {}", entry.name, kind, args.get_handle(target));
                }
                Action::Create(_) => {}
            }
        }
    }

    /// Tracks every object the call created if the result permits it.
    pub fn post_call_record(&self, call: &Call, record: &RecordObject) {
        let entry = call.entry_point;
        let args = &call.args;

        let dispatch_handle = entry.dispatch.map(|dispatch| args.get_handle(&[dispatch]));
        let registry = match dispatch_handle {
            Some(handle) => match self.resolve_scope(handle) {
                Some(registry) => Some(registry),
                None => return,
            },
            None => None,
        };

        for create in entry.creates() {
            if !record.passes(create.gate) {
                log::trace!("{}: not recording {} after {:?}", entry.name, create.kind, record.get_result());
                continue;
            }

            let parent = match create.parent {
                ParentSource::None => ObjectHandle::NULL,
                ParentSource::Dispatch => dispatch_handle.unwrap_or(ObjectHandle::NULL),
                ParentSource::Arg(path) => args.get_handle(path),
            };
            let custom_allocator = create.origin == ObjectOrigin::Created && args.has_custom_allocator();

            for handle in args.get_handles(&[create.output]) {
                if handle.is_null() {
                    continue;
                }

                let object = ObjectRecord::new(handle, create.kind)
                    .with_parent(parent)
                    .with_custom_allocator(custom_allocator)
                    .with_origin(create.origin);
                self.record_object(entry, registry.as_ref(), object);
            }
        }
    }

    fn record_object(&self, entry: &EntryPoint, registry: Option<&Arc<Registry>>, object: ObjectRecord) {
        match object.kind {
            ObjectKind::Instance => {
                let instance = Arc::new(Registry::new_instance(object.handle));
                self.insert(entry, &instance, object);
                self.open_scope(instance);
            }
            ObjectKind::Device => {
                let instance = match registry {
                    Some(registry) => registry.get_instance().unwrap_or(registry).clone(),
                    None => return,
                };
                self.insert(entry, &instance, object);
                self.open_scope(Arc::new(Registry::new_device(object.handle, instance)));
            }
            kind => {
                let target = match registry.and_then(|registry| Validator::new(registry).registry_for(kind)) {
                    Some(target) => target,
                    None => {
                        log::warn!("{}: cannot track {} {} outside of its scope", entry.name, kind, object.handle);
                        return;
                    }
                };
                self.insert(entry, target, object);
            }
        }
    }

    fn insert(&self, entry: &EntryPoint, registry: &Registry, object: ObjectRecord) {
        let overwritten = registry.create_object(object);
        if let Some(previous) = overwritten {
            if object.origin == ObjectOrigin::Created && self.config.warns_on_overwrite() {
                log::warn!("{}: {} {} was still live and has been overwritten (previous parent {:?})", entry.name, object.kind, object.handle, previous.parent);
            }
        }

        if object.kind.is_dispatchable() && object.kind.opens_scope().is_none() {
            self.write_dispatch().insert(object.handle, registry.get_owner());
        }
    }

    fn open_scope(&self, registry: Arc<Registry>) {
        let owner = registry.get_owner();
        let scope = registry.get_scope();

        if self.write_scopes().insert(owner, registry).is_some() {
            log::warn!("Replaced the still open {:?} scope of {}", scope, owner);
        }
        self.write_dispatch().insert(owner, owner);

        log::info!("Opened {:?} scope {}", scope, owner);
    }

    /// Forcibly clears and forgets the registry owned by `owner`. Closing an instance scope also
    /// closes every device scope it still owns.
    fn close_scope(&self, owner: ObjectHandle) {
        let registry = match self.write_scopes().remove(&owner) {
            Some(registry) => registry,
            None => return,
        };

        if registry.get_scope() == Scope::Instance {
            let devices = self.child_devices(&registry);
            {
                let mut scopes = self.write_scopes();
                for device in &devices {
                    scopes.remove(&device.get_owner());
                }
            }
            for device in &devices {
                self.clear_scope(device);
            }
        }

        self.clear_scope(&registry);
        log::info!("Closed {:?} scope {}", registry.get_scope(), owner);
    }

    fn clear_scope(&self, registry: &Registry) {
        let removed = destroy_leaked(registry);
        self.forget_dispatchable(&removed);
        self.write_dispatch().remove(&registry.get_owner());
    }

    /// Reports everything still alive in the scope owned by `owner` and in any device scope it
    /// owns.
    fn report_scope_leaks(&self, owner: ObjectHandle, location: &Location, violations: &mut Vec<Violation>) {
        if !self.config.reports_leaks() {
            return;
        }

        let registry = match self.get_registry(owner) {
            Some(registry) => registry,
            None => return,
        };
        let severity = self.config.get_leak_severity();

        match registry.get_scope() {
            Scope::Device => {
                report_leaks(&registry, DEVICE_LEAK_RULE, severity, location, violations);
            }
            Scope::Instance => {
                for device in self.child_devices(&registry) {
                    report_leaks(&device, INSTANCE_LEAK_RULE, severity, location, violations);
                }
                report_leaks(&registry, INSTANCE_LEAK_RULE, severity, location, violations);
            }
        }
    }

    /// Returns the open device scopes of an instance ordered by device handle.
    fn child_devices(&self, instance: &Arc<Registry>) -> Vec<Arc<Registry>> {
        let mut devices: Vec<_> = self.read_scopes().values()
            .filter(|registry| registry.get_instance().map_or(false, |owner| Arc::ptr_eq(owner, instance)))
            .cloned()
            .collect();
        devices.sort_by_key(|device| device.get_owner());
        devices
    }

    fn forget_dispatchable(&self, removed: &[ObjectRecord]) {
        if !removed.iter().any(|record| record.kind.is_dispatchable()) {
            return;
        }

        let mut dispatch = self.write_dispatch();
        for record in removed.iter().filter(|record| record.kind.is_dispatchable()) {
            dispatch.remove(&record.handle);
        }
    }

    fn resolve_scope(&self, dispatch: ObjectHandle) -> Option<Arc<Registry>> {
        let owner = *self.read_dispatch().get(&dispatch)?;
        self.get_registry(owner)
    }

    fn all_registries(&self) -> Vec<Arc<Registry>> {
        self.read_scopes().values().cloned().collect()
    }

    fn report(&self, violations: &[Violation]) {
        for violation in violations {
            self.sink.report(violation);
        }
    }

    fn read_scopes(&self) -> RwLockReadGuard<HashMap<ObjectHandle, Arc<Registry>>> {
        self.scopes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_scopes(&self) -> RwLockWriteGuard<HashMap<ObjectHandle, Arc<Registry>>> {
        self.scopes.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_dispatch(&self) -> RwLockReadGuard<HashMap<ObjectHandle, ObjectHandle>> {
        self.dispatch.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_dispatch(&self) -> RwLockWriteGuard<HashMap<ObjectHandle, ObjectHandle>> {
        self.dispatch.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ObjectLifetimes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectLifetimes")
            .field("config", &self.config)
            .field("scopes", &self.scope_count())
            .finish()
    }
}

/// Reports a dispatchable handle that does not belong to any open scope.
///
/// Nothing else can be validated for such a call. Destroying a null instance or device is legal.
fn report_untracked_dispatch(entry: &EntryPoint, dispatch: &'static str, handle: ObjectHandle, location: &Location, violations: &mut Vec<Violation>) {
    let declared = entry.params.iter().find_map(|param| match param.ty {
        ParamType::Handle { kind, rules, .. } if param.name == dispatch => Some((kind, rules.missing)),
        _ => None,
    });
    let (kind, rule) = match declared {
        Some(declared) => declared,
        None => {
            if handle.is_null() {
                return;
            }
            match entry.destroys().find(|destroy| destroy.target.len() == 1 && destroy.target[0] == dispatch) {
                Some(destroy) => (destroy.kind, destroy.rules.object.missing),
                None => return,
            }
        }
    };

    log::warn!("{} called on untracked {} {}", entry.name, kind, handle);

    let message = if handle.is_null() {
        format!("Required {} handle is VK_NULL_HANDLE.", kind)
    } else {
        format!("Invalid {} Object {}.", kind, handle)
    };
    violations.push(Violation::new(rule, location.dot(dispatch), message).with_object(kind, handle));
}

/// Validates the handles described by `params` found in `args`.
///
/// `top` holds the arguments of the call itself and is used to resolve parent paths of nested
/// parameters.
fn validate_params(validator: &Validator, top: &CallArgs, args: &CallArgs, params: &'static [Param], location: &Location, violations: &mut Vec<Violation>) {
    for param in params {
        match param.ty {
            ParamType::Handle { kind, null_allowed, rules, parent } => {
                let expected_parent = expected_parent(top, parent);
                for (handle, location) in param_handles(args, param, location) {
                    validator.validate_object(handle, kind, null_allowed, rules, expected_parent, &location, violations);
                }
            }
            ParamType::TypedHandle { type_field, rules } => {
                let object_type = args.get_object_type(type_field);
                match object_type.and_then(ObjectKind::from_vk) {
                    Some(kind) => {
                        let handle = args.get_handle(&[param.name]);
                        validator.validate_object(handle, kind, false, rules, None, &location.dot(param.name), violations);
                    }
                    None => log::trace!("{}: skipping {} of untracked type {:?}", location, param.name, object_type),
                }
            }
            ParamType::Struct(fields) => match args.get(param.name) {
                Some(Value::Struct(inner)) => {
                    validate_params(validator, top, inner, fields, &location.dot(param.name), violations);
                }
                Some(Value::Structs(elements)) => {
                    for (index, inner) in elements.iter().enumerate() {
                        validate_params(validator, top, inner, fields, &location.dot_at(param.name, index), violations);
                    }
                }
                _ => {}
            },
        }
    }
}

/// Returns each handle of a handle parameter together with its location. An absent single handle
/// is reported as null, an absent array as empty.
fn param_handles(args: &CallArgs, param: &Param, location: &Location) -> Vec<(ObjectHandle, Location)> {
    if !param.array {
        return vec![(args.get_handle(&[param.name]), location.dot(param.name))];
    }

    args.get_handles(&[param.name]).into_iter()
        .enumerate()
        .map(|(index, handle)| (handle, location.dot_at(param.name, index)))
        .collect()
}

/// Returns each handle found at `path` together with its location.
fn path_handles(args: &CallArgs, path: &'static [&'static str], location: &Location) -> Vec<(ObjectHandle, Location)> {
    let (last, prefix) = match path.split_last() {
        Some(split) => split,
        None => return Vec::new(),
    };
    let location = prefix.iter().fold(location.clone(), |location, field| location.dot(*field));

    match args.resolve(path) {
        Some(Value::Handle(handle)) => vec![(*handle, location.dot(*last))],
        Some(Value::Handles(handles)) => handles.iter()
            .enumerate()
            .map(|(index, handle)| (*handle, location.dot_at(*last, index)))
            .collect(),
        _ => Vec::new(),
    }
}

fn expected_parent(args: &CallArgs, parent: ParentCheck) -> Option<ObjectHandle> {
    match parent {
        ParentCheck::Arg(path) => Some(args.get_handle(path)).filter(|handle| !handle.is_null()),
        ParentCheck::Scope | ParentCheck::None => None,
    }
}
