//! Catalog Validation
//!
//! Structural checks that do not depend on response-shape resolution: unique
//! method names, injective identifiers, well-formed names, notification shape,
//! and type references that exist in the type table with the expected kind.

use std::collections::HashMap;

use codegen::utils::{canonical_identifier, is_well_formed_method_name};
use ir::{MethodDef, TypeKind, TypeRef};
use registry::TypeRegistryReader;

use crate::ResolutionError;

/// Catalog validator
pub struct IrValidator;

impl Default for IrValidator {
    fn default() -> Self { Self::new() }
}

impl IrValidator {
    /// Create a new validator
    pub fn new() -> Self { Self }
}

impl IrValidator {
    /// Run every check over the catalog
    pub fn validate(
        &self,
        methods: &[MethodDef],
        types: &dyn TypeRegistryReader,
    ) -> Vec<ResolutionError> {
        let mut errors = self.validate_catalog(methods);
        for method in methods {
            errors.extend(self.validate_method(method, types));
        }
        errors
    }

    /// Cross-definition checks: duplicate names and identifier collisions
    pub fn validate_catalog(&self, methods: &[MethodDef]) -> Vec<ResolutionError> {
        let mut errors = duplicate_names(methods);
        errors.extend(identifier_collisions(methods));
        errors
    }

    /// Checks local to one definition
    pub fn validate_method(
        &self,
        method: &MethodDef,
        types: &dyn TypeRegistryReader,
    ) -> Vec<ResolutionError> {
        let mut errors = Vec::new();

        if !is_well_formed_method_name(&method.name) {
            errors.push(ResolutionError::InvalidMethodName { method: method.name.clone() });
        }

        if method.is_notification && !method.response_types.is_empty() {
            errors.push(ResolutionError::InvalidNotificationShape {
                method: method.name.clone(),
                count: method.response_types.len(),
            });
        }

        if let Some(request_type) = &method.request_type {
            check_type_ref(method, "request type", request_type, types, &mut errors);
        }
        for (index, response) in method.response_types.iter().enumerate() {
            check_type_ref(method, &format!("response #{}", index), &response.ty, types, &mut errors);
            for mapping in &response.field_mappings {
                let context = format!("response #{} mapping `{}`", index, mapping.source_field);
                check_type_ref(
                    method,
                    &format!("{} source", context),
                    &mapping.source_type,
                    types,
                    &mut errors,
                );
                check_type_ref(
                    method,
                    &format!("{} destination", context),
                    &mapping.dest_type,
                    types,
                    &mut errors,
                );
            }
        }

        errors
    }
}

/// One error per duplicated name, listing every position it occurs at
fn duplicate_names(methods: &[MethodDef]) -> Vec<ResolutionError> {
    let mut first_seen: Vec<&str> = Vec::new();
    let mut positions: HashMap<&str, Vec<usize>> = HashMap::new();
    for (position, method) in methods.iter().enumerate() {
        let entry = positions.entry(method.name.as_str()).or_default();
        if entry.is_empty() {
            first_seen.push(method.name.as_str());
        }
        entry.push(position);
    }

    first_seen
        .into_iter()
        .filter_map(|name| {
            let occurrences = positions.remove(name)?;
            (occurrences.len() > 1).then(|| ResolutionError::DuplicateMethodName {
                method: name.to_string(),
                positions: occurrences,
            })
        })
        .collect()
}

/// One error per identifier derived from more than one distinct name
fn identifier_collisions(methods: &[MethodDef]) -> Vec<ResolutionError> {
    let mut first_seen: Vec<String> = Vec::new();
    let mut sources: HashMap<String, Vec<&str>> = HashMap::new();
    for method in methods {
        let identifier = canonical_identifier(&method.name);
        let names = sources.entry(identifier.clone()).or_default();
        if names.is_empty() {
            first_seen.push(identifier);
        }
        // Repeats of the same name are duplicates, not collisions
        if !names.contains(&method.name.as_str()) {
            names.push(method.name.as_str());
        }
    }

    first_seen
        .into_iter()
        .filter_map(|identifier| {
            let names = sources.remove(&identifier)?;
            (names.len() > 1).then(|| ResolutionError::IdentifierCollision {
                identifier,
                methods: names.into_iter().map(str::to_string).collect(),
            })
        })
        .collect()
}

fn check_type_ref(
    method: &MethodDef,
    context: &str,
    type_ref: &TypeRef,
    types: &dyn TypeRegistryReader,
    errors: &mut Vec<ResolutionError>,
) {
    let unknown = || ResolutionError::UnknownType {
        method: method.name.clone(),
        context: context.to_string(),
        name: type_ref.name.clone(),
    };

    match types.get_type(&type_ref.name) {
        None => errors.push(unknown()),
        Some(registered) if registered.kind != type_ref.kind => {
            errors.push(ResolutionError::TypeKindMismatch {
                method: method.name.clone(),
                context: context.to_string(),
                name: type_ref.name.clone(),
                expected: type_ref.kind,
                found: registered.kind,
            });
        }
        // Dangling or cyclic aliases cannot be resolved to a definition
        Some(registered) if registered.kind == TypeKind::Alias => {
            if types.resolve(&type_ref.name).is_none() {
                errors.push(unknown());
            }
        }
        Some(_) => {}
    }
}
