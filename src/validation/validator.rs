//! Read only handle checks.
//!
//! Nothing in here modifies a registry. The dispatch layer runs these checks in the pre call phase
//! and only then records the effects of the call.

use std::sync::Arc;

use crate::objects::{ObjectHandle, ObjectKind, ObjectOrigin, ObjectRecord, Registry, Scope};
use crate::validation::location::Location;
use crate::validation::violation::Violation;

/// Rule ids reported for one handle argument.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ObjectRules {
    /// Reported if the handle is null but must not be or if it is not a live object.
    pub missing: &'static str,
    /// Reported if the object is live but owned by the wrong parent.
    pub parent: Option<&'static str>,
}

impl ObjectRules {
    pub const fn new(missing: &'static str) -> Self {
        Self {
            missing,
            parent: None,
        }
    }

    pub const fn with_parent(mut self, parent: &'static str) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Rule ids reported for the object an explicit destroy call destroys.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct DestroyRules {
    pub object: ObjectRules,
    /// Reported if callbacks were supplied at creation but not at destruction.
    pub custom_allocator: Option<&'static str>,
    /// Reported if callbacks are supplied at destruction but were not at creation.
    pub default_allocator: Option<&'static str>,
    /// Reported if the object was retrieved rather than created.
    pub retrieved: Option<&'static str>,
}

impl DestroyRules {
    pub const fn new(object: ObjectRules) -> Self {
        Self {
            object,
            custom_allocator: None,
            default_allocator: None,
            retrieved: None,
        }
    }

    pub const fn with_allocator(mut self, custom_allocator: &'static str, default_allocator: &'static str) -> Self {
        self.custom_allocator = Some(custom_allocator);
        self.default_allocator = Some(default_allocator);
        self
    }

    pub const fn with_retrieved(mut self, retrieved: &'static str) -> Self {
        self.retrieved = Some(retrieved);
        self
    }
}

/// Validates handles against the registry of the scope a call was made in.
///
/// Instance scoped kinds used in a device level call are resolved through the device's instance
/// registry. Sibling registries are only collected and consulted when a lookup misses, to tell a
/// handle belonging to another device apart from an invalid one.
pub struct Validator<'a> {
    registry: &'a Registry,
    siblings: Option<&'a dyn Fn() -> Vec<Arc<Registry>>>,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            siblings: None,
        }
    }

    pub fn with_siblings(mut self, siblings: &'a dyn Fn() -> Vec<Arc<Registry>>) -> Self {
        self.siblings = Some(siblings);
        self
    }

    pub fn get_registry(&self) -> &'a Registry {
        self.registry
    }

    /// Returns the registry that tracks objects of `kind` for calls made in this scope.
    pub fn registry_for(&self, kind: ObjectKind) -> Option<&'a Registry> {
        match (kind.get_scope(), self.registry.get_scope()) {
            (Scope::Instance, Scope::Instance) | (Scope::Device, Scope::Device) => Some(self.registry),
            (Scope::Instance, Scope::Device) => self.registry.get_instance().map(|instance| &**instance),
            (Scope::Device, Scope::Instance) => None,
        }
    }

    pub fn lookup(&self, handle: ObjectHandle, kind: ObjectKind) -> Option<ObjectRecord> {
        self.registry_for(kind)?.lookup(handle, kind)
    }

    fn tracked_elsewhere(&self, handle: ObjectHandle, kind: ObjectKind) -> bool {
        let siblings = match self.siblings {
            Some(siblings) => siblings(),
            None => return false,
        };

        let own = self.registry_for(kind);
        siblings.iter().any(|sibling| {
            let sibling: &Registry = sibling;
            let is_own = own.map_or(false, |own| std::ptr::eq(own, sibling));
            !is_own && sibling.get_scope() == kind.get_scope() && sibling.contains(handle, kind)
        })
    }

    /// Checks a single handle argument.
    ///
    /// Returns `true` if a violation was found and appended to `violations`.
    pub fn validate_object(&self, handle: ObjectHandle, kind: ObjectKind, null_allowed: bool, rules: ObjectRules, expected_parent: Option<ObjectHandle>, location: &Location, violations: &mut Vec<Violation>) -> bool {
        if handle.is_null() {
            if null_allowed {
                return false;
            }
            violations.push(Violation::new(rules.missing, location.clone(),
                format!("Required {} handle is VK_NULL_HANDLE.", kind)
            ).with_object(kind, handle));
            return true;
        }

        let record = match self.lookup(handle, kind) {
            Some(record) => record,
            None => {
                let violation = match rules.parent {
                    Some(parent_rule) if self.tracked_elsewhere(handle, kind) => {
                        let owner = match kind.get_scope() {
                            Scope::Instance => "instance",
                            Scope::Device => "device",
                        };
                        Violation::new(parent_rule, location.clone(),
                            format!("{} {} was not created, allocated or retrieved from the correct {}.", kind, handle, owner)
                        )
                    }
                    _ => Violation::new(rules.missing, location.clone(), format!("Invalid {} Object {}.", kind, handle)),
                };
                violations.push(violation.with_object(kind, handle));
                return true;
            }
        };

        if let (Some(expected), Some(parent_rule)) = (expected_parent, rules.parent) {
            if record.parent != Some(expected) {
                let parent_kind = kind.get_parent().unwrap_or(kind);
                let actual = record.parent.unwrap_or(ObjectHandle::NULL);
                violations.push(Violation::new(parent_rule, location.clone(),
                    format!("{} {} is not a child of {} {} (its parent is {}).", kind, handle, parent_kind, expected, actual)
                ).with_object(kind, handle).with_object(parent_kind, expected));
                return true;
            }
        }

        false
    }

    /// Checks the object an explicit destroy call destroys.
    ///
    /// Destroying a null handle is always legal. For live objects the presence of allocation
    /// callbacks must agree with what was supplied at creation.
    pub fn validate_destroy_object(&self, handle: ObjectHandle, kind: ObjectKind, custom_allocator: bool, rules: &DestroyRules, expected_parent: Option<ObjectHandle>, location: &Location, violations: &mut Vec<Violation>) -> bool {
        if handle.is_null() {
            return false;
        }

        if self.validate_object(handle, kind, true, rules.object, expected_parent, location, violations) {
            return true;
        }

        let record = match self.lookup(handle, kind) {
            Some(record) => record,
            None => return false,
        };

        let mut skip = false;
        if record.origin == ObjectOrigin::Retrieved {
            if let Some(rule) = rules.retrieved {
                violations.push(Violation::new(rule, location.clone(),
                    format!("{} {} was not created by the application and must not be destroyed.", kind, handle)
                ).with_object(kind, handle));
                skip = true;
            }
        }

        if record.custom_allocator && !custom_allocator {
            if let Some(rule) = rules.custom_allocator {
                violations.push(Violation::new(rule, location.clone(),
                    format!("Custom allocator not specified while destroying {} obj {} but specified at creation.", kind, handle)
                ).with_object(kind, handle));
                skip = true;
            }
        } else if !record.custom_allocator && custom_allocator {
            if let Some(rule) = rules.default_allocator {
                violations.push(Violation::new(rule, location.clone(),
                    format!("Custom allocator specified while destroying {} obj {} but not specified at creation.", kind, handle)
                ).with_object(kind, handle));
                skip = true;
            }
        }

        skip
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::test::next_handle;

    const RULES: ObjectRules = ObjectRules::new("TEST-missing").with_parent("TEST-parent");
    const DESTROY_RULES: DestroyRules = DestroyRules::new(RULES).with_allocator("TEST-custom", "TEST-default");

    struct Scopes {
        instance: Arc<Registry>,
        device: Arc<Registry>,
        other_device: Arc<Registry>,
    }

    fn make_scopes() -> Scopes {
        let instance = Arc::new(Registry::new_instance(next_handle()));
        let device = Arc::new(Registry::new_device(next_handle(), instance.clone()));
        let other_device = Arc::new(Registry::new_device(next_handle(), instance.clone()));

        Scopes {
            instance,
            device,
            other_device,
        }
    }

    fn validate(validator: &Validator, handle: ObjectHandle, kind: ObjectKind, null_allowed: bool, parent: Option<ObjectHandle>) -> Vec<Violation> {
        let mut violations = Vec::new();
        let found = validator.validate_object(handle, kind, null_allowed, RULES, parent, &Location::new("vkTest").dot("object"), &mut violations);
        assert_eq!(found, !violations.is_empty());
        violations
    }

    #[test]
    fn null_policy() {
        let scopes = make_scopes();
        let validator = Validator::new(&scopes.device);

        for kind in ObjectKind::ALL {
            assert!(validate(&validator, ObjectHandle::NULL, *kind, true, None).is_empty());

            let violations = validate(&validator, ObjectHandle::NULL, *kind, false, None);
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].rule_id, "TEST-missing");
            assert_eq!(violations[0].location.get_field_path(), "object");
        }
    }

    #[test]
    fn unknown_handles_are_missing() {
        let scopes = make_scopes();
        let validator = Validator::new(&scopes.device);

        let violations = validate(&validator, next_handle(), ObjectKind::Semaphore, true, None);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, "TEST-missing");
    }

    #[test]
    fn handles_are_checked_against_their_kind() {
        let scopes = make_scopes();
        let buffer = next_handle();
        scopes.device.create_object(ObjectRecord::new(buffer, ObjectKind::Buffer));

        let validator = Validator::new(&scopes.device);
        assert!(validate(&validator, buffer, ObjectKind::Buffer, false, None).is_empty());
        assert_eq!(validate(&validator, buffer, ObjectKind::Image, false, None).len(), 1);
    }

    #[test]
    fn parent_enforcement() {
        let scopes = make_scopes();
        let pool = next_handle();
        let other_pool = next_handle();
        let command_buffer = next_handle();
        scopes.device.create_object(ObjectRecord::new(command_buffer, ObjectKind::CommandBuffer).with_parent(pool));

        let validator = Validator::new(&scopes.device);
        assert!(validate(&validator, command_buffer, ObjectKind::CommandBuffer, false, Some(pool)).is_empty());

        let violations = validate(&validator, command_buffer, ObjectKind::CommandBuffer, false, Some(other_pool));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, "TEST-parent");
        assert_eq!(violations[0].objects[1], (ObjectKind::CommandPool, other_pool));
    }

    #[test]
    fn instance_objects_resolve_through_the_instance() {
        let scopes = make_scopes();
        let surface = next_handle();
        scopes.instance.create_object(ObjectRecord::new(surface, ObjectKind::Surface).with_parent(scopes.instance.get_owner()));

        let validator = Validator::new(&scopes.device);
        assert!(validate(&validator, surface, ObjectKind::Surface, false, None).is_empty());

        // Device objects are never visible to instance level calls
        let buffer = next_handle();
        scopes.device.create_object(ObjectRecord::new(buffer, ObjectKind::Buffer));
        let validator = Validator::new(&scopes.instance);
        assert_eq!(validate(&validator, buffer, ObjectKind::Buffer, false, None).len(), 1);
    }

    #[test]
    fn objects_of_other_devices_report_the_parent_rule() {
        let scopes = make_scopes();
        let fence = next_handle();
        scopes.other_device.create_object(ObjectRecord::new(fence, ObjectKind::Fence));

        let siblings = || vec![scopes.device.clone(), scopes.other_device.clone()];
        let validator = Validator::new(&scopes.device).with_siblings(&siblings);

        let violations = validate(&validator, fence, ObjectKind::Fence, false, None);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, "TEST-parent");

        // Without a parent rule the handle is simply invalid here
        let mut violations = Vec::new();
        validator.validate_object(fence, ObjectKind::Fence, false, ObjectRules::new("TEST-missing"), None, &Location::new("vkTest"), &mut violations);
        assert_eq!(violations[0].rule_id, "TEST-missing");
    }

    #[test]
    fn siblings_are_only_collected_on_a_miss() {
        let scopes = make_scopes();
        let fence = next_handle();
        scopes.device.create_object(ObjectRecord::new(fence, ObjectKind::Fence));

        let collected = Cell::new(0);
        let siblings = || {
            collected.set(collected.get() + 1);
            vec![scopes.device.clone(), scopes.other_device.clone()]
        };
        let validator = Validator::new(&scopes.device).with_siblings(&siblings);

        assert!(validate(&validator, fence, ObjectKind::Fence, false, None).is_empty());
        assert_eq!(collected.get(), 0);

        assert_eq!(validate(&validator, next_handle(), ObjectKind::Fence, false, None).len(), 1);
        assert_eq!(collected.get(), 1);
    }

    #[test]
    fn allocator_symmetry() {
        for (created_with, destroyed_with) in [(false, false), (false, true), (true, false), (true, true)] {
            let scopes = make_scopes();
            let sampler = next_handle();
            scopes.device.create_object(ObjectRecord::new(sampler, ObjectKind::Sampler).with_custom_allocator(created_with));

            let validator = Validator::new(&scopes.device);
            let mut violations = Vec::new();
            let found = validator.validate_destroy_object(sampler, ObjectKind::Sampler, destroyed_with, &DESTROY_RULES, None, &Location::new("vkDestroySampler").dot("sampler"), &mut violations);

            assert_eq!(found, created_with != destroyed_with);
            match (created_with, destroyed_with) {
                (true, false) => assert_eq!(violations[0].rule_id, "TEST-custom"),
                (false, true) => assert_eq!(violations[0].rule_id, "TEST-default"),
                _ => assert!(violations.is_empty()),
            }
        }
    }

    #[test]
    fn destroying_null_is_legal() {
        let scopes = make_scopes();
        let validator = Validator::new(&scopes.device);
        let mut violations = Vec::new();

        assert!(!validator.validate_destroy_object(ObjectHandle::NULL, ObjectKind::Buffer, true, &DESTROY_RULES, None, &Location::new("vkDestroyBuffer"), &mut violations));
        assert!(violations.is_empty());
    }

    #[test]
    fn destroying_retrieved_objects() {
        let scopes = make_scopes();
        let image = next_handle();
        scopes.device.create_object(ObjectRecord::new(image, ObjectKind::Image).with_origin(ObjectOrigin::Retrieved));

        let rules = DESTROY_RULES.with_retrieved("TEST-retrieved");
        let validator = Validator::new(&scopes.device);
        let mut violations = Vec::new();
        assert!(validator.validate_destroy_object(image, ObjectKind::Image, false, &rules, None, &Location::new("vkDestroyImage"), &mut violations));
        assert_eq!(violations[0].rule_id, "TEST-retrieved");
    }
}
