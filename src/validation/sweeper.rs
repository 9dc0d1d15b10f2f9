//! Leak reporting at instance and device teardown.
//!
//! Teardown runs in two steps. [`report_leaks`] walks the registry without modifying it and emits
//! one violation per object the application failed to destroy. [`destroy_leaked`] then forcibly
//! empties the registry. [`sweep`] runs both and must be called exactly once per scope.

use crate::objects::{ObjectKind, ObjectRecord, Registry, Scope};
use crate::validation::location::Location;
use crate::validation::violation::{Severity, Violation};

/// Reports every leak tracked object of `registry`. Returns the number of leaks found.
///
/// The record owning the registry (the instance in an instance registry) is never reported.
pub fn report_leaks(registry: &Registry, rule_id: &'static str, severity: Severity, location: &Location, violations: &mut Vec<Violation>) -> usize {
    let owner = registry.get_owner();
    let owner_kind = match registry.get_scope() {
        Scope::Instance => ObjectKind::Instance,
        Scope::Device => ObjectKind::Device,
    };

    let mut count = 0usize;
    for kind in ObjectKind::ALL {
        for record in registry.all_live(*kind) {
            if !record.is_leak_tracked() || (record.kind == owner_kind && record.handle == owner) {
                continue;
            }

            violations.push(Violation::new(rule_id, location.clone(),
                format!("OBJ ERROR : For {} {}, {} {} has not been destroyed.", owner_kind, owner, record.kind, record.handle)
            ).with_severity(severity).with_object(record.kind, record.handle).with_object(owner_kind, owner));
            count += 1;
        }
    }

    count
}

/// Removes every remaining record of `registry` and returns them.
pub fn destroy_leaked(registry: &Registry) -> Vec<ObjectRecord> {
    let mut removed = Vec::new();
    for kind in ObjectKind::ALL.iter().rev() {
        removed.extend(registry.clear(*kind));
    }

    if !removed.is_empty() {
        log::debug!("Cleared {} remaining object(s) of {:?} {}", removed.len(), registry.get_scope(), registry.get_owner());
    }
    removed
}

/// Reports all leaks of `registry` and then empties it.
///
/// If `report` is false leaks are only cleared. Returns every removed record.
pub fn sweep(registry: &Registry, rule_id: &'static str, severity: Severity, report: bool, location: &Location, violations: &mut Vec<Violation>) -> Vec<ObjectRecord> {
    if report {
        let leaks = report_leaks(registry, rule_id, severity, location, violations);
        if leaks != 0 {
            log::info!("{} leaked object(s) at destruction of {:?} {}", leaks, registry.get_scope(), registry.get_owner());
        }
    }

    destroy_leaked(registry)
}
