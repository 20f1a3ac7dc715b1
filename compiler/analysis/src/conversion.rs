//! Conversion planning
//!
//! Turns the field mappings of an alternate response shape into a checked
//! [`ConversionPlan`] that rebuilds the primary shape. Every mapping is checked
//! against the type table here, so an emitter never produces a conversion that
//! cannot compile.

use std::collections::HashSet;

use codegen::utils::converter_name;
use ir::{
    ConversionPlan, FieldCopy, FieldDef, FieldMapping, ResponseShape, ReturnType, TypeDef, TypeKind,
    TypeRef,
};
use registry::TypeRegistryReader;

use crate::ConversionFailure;

/// Plan the conversion of `alternate` into `primary`
///
/// All failures are collected rather than stopping at the first one.
pub fn plan_conversion(
    primary: &ReturnType,
    alternate: &ReturnType,
    types: &dyn TypeRegistryReader,
) -> Result<ConversionPlan, Vec<ConversionFailure>> {
    if alternate.field_mappings.is_empty() {
        return Err(vec![ConversionFailure::NoFieldMappings]);
    }

    let mut failures = Vec::new();
    if alternate.is_slice != primary.is_slice {
        failures.push(ConversionFailure::CardinalityMismatch {
            source_is_slice: alternate.is_slice,
            target_is_slice: primary.is_slice,
        });
    }

    let source = structure(types, &alternate.ty.name);
    let target = structure(types, &primary.ty.name);
    let (source, target) = match (source, target) {
        (Ok(source), Ok(target)) => (source, target),
        (source, target) => {
            failures.extend(source.err());
            failures.extend(target.err());
            return Err(failures);
        }
    };

    let mut copies = Vec::with_capacity(alternate.field_mappings.len());
    let mut mapped: HashSet<&str> = HashSet::new();
    // Destinations that will hold a value; a source that may be absent covers nothing
    let mut covered: HashSet<&str> = HashSet::new();
    for mapping in &alternate.field_mappings {
        if !mapped.insert(mapping.dest_field.as_str()) {
            failures.push(ConversionFailure::DuplicateDestination {
                field: mapping.dest_field.clone(),
            });
            continue;
        }
        match plan_copy(mapping, source, target, types) {
            Ok(copy) => {
                covered.insert(mapping.dest_field.as_str());
                copies.push(copy);
            }
            Err(mut copy_failures) => {
                let may_be_absent = copy_failures
                    .iter()
                    .any(|f| matches!(f, ConversionFailure::OptionalSourceForRequiredField { .. }));
                if !may_be_absent {
                    covered.insert(mapping.dest_field.as_str());
                }
                failures.append(&mut copy_failures);
            }
        }
    }

    let missing: Vec<String> = target
        .required_fields()
        .filter(|f| !covered.contains(f.name.as_str()))
        .map(|f| f.name.clone())
        .collect();
    if !missing.is_empty() {
        failures.push(ConversionFailure::MissingRequiredFields {
            target: target.name.clone(),
            fields: missing,
        });
    }

    if failures.is_empty() {
        let converter =
            converter_name(&alternate.ty.name, alternate.is_slice, &primary.ty.name, primary.is_slice);
        Ok(ConversionPlan { converter, target: ResponseShape::from(primary), copies })
    } else {
        Err(failures)
    }
}

/// Resolve `name` to a structure definition, following aliases
fn structure<'t>(
    types: &'t dyn TypeRegistryReader,
    name: &str,
) -> Result<&'t TypeDef, ConversionFailure> {
    match types.resolve(name) {
        Some(def) if def.kind == TypeKind::Structure => Ok(def),
        _ => Err(ConversionFailure::NotAStructure { type_name: name.to_string() }),
    }
}

fn plan_copy(
    mapping: &FieldMapping,
    source: &TypeDef,
    target: &TypeDef,
    types: &dyn TypeRegistryReader,
) -> Result<FieldCopy, Vec<ConversionFailure>> {
    let (source_field, may_be_absent) = walk_path(mapping, source, types).map_err(|f| vec![f])?;
    let dest_field = target.field(&mapping.dest_field).ok_or_else(|| {
        vec![ConversionFailure::DestinationFieldMissing {
            field: mapping.dest_field.clone(),
            target: target.name.clone(),
        }]
    })?;

    let mut failures = Vec::new();
    if may_be_absent && !dest_field.optional {
        failures.push(ConversionFailure::OptionalSourceForRequiredField {
            path: mapping.source_field.clone(),
            field: mapping.dest_field.clone(),
        });
    }
    if canonical(types, &mapping.source_type) != canonical(types, &source_field.field_type) {
        failures.push(ConversionFailure::TypeMismatch {
            field: mapping.source_field.clone(),
            stated: mapping.source_type.name.clone(),
            actual: render_field_type(source_field),
        });
    }
    if canonical(types, &mapping.dest_type) != canonical(types, &dest_field.field_type) {
        failures.push(ConversionFailure::TypeMismatch {
            field: mapping.dest_field.clone(),
            stated: mapping.dest_type.name.clone(),
            actual: render_field_type(dest_field),
        });
    }
    if canonical(types, &mapping.source_type) != canonical(types, &mapping.dest_type) {
        failures.push(ConversionFailure::TypeMismatch {
            field: mapping.dest_field.clone(),
            stated: mapping.dest_type.name.clone(),
            actual: mapping.source_type.name.clone(),
        });
    }
    if source_field.is_array != dest_field.is_array {
        failures.push(ConversionFailure::TypeMismatch {
            field: mapping.dest_field.clone(),
            stated: render_field_type(dest_field),
            actual: render_field_type(source_field),
        });
    }
    if !failures.is_empty() {
        return Err(failures);
    }

    let field_type = types
        .resolve(&dest_field.field_type.name)
        .map(|def| TypeRef::new(def.kind, def.name.clone()))
        .unwrap_or_else(|| dest_field.field_type.clone());
    Ok(FieldCopy {
        source_path: mapping.source_path().into_iter().map(str::to_string).collect(),
        dest_field: mapping.dest_field.clone(),
        field_type,
    })
}

/// Follow a dotted source path from `source` to the field it names
///
/// Every segment but the last must be a singular field whose type resolves to a
/// structure. The flag is set when any field along the path is optional.
fn walk_path<'t>(
    mapping: &FieldMapping,
    source: &'t TypeDef,
    types: &'t dyn TypeRegistryReader,
) -> Result<(&'t FieldDef, bool), ConversionFailure> {
    let unreachable = |segment: &str| ConversionFailure::SourcePathUnreachable {
        path: mapping.source_field.clone(),
        segment: segment.to_string(),
    };

    let segments = mapping.source_path();
    let (&last, intermediate) = match segments.split_last() {
        Some(split) => split,
        None => return Err(unreachable("")),
    };

    let mut current = source;
    let mut may_be_absent = false;
    for &segment in intermediate {
        let field = current.field(segment).ok_or_else(|| unreachable(segment))?;
        if field.is_array {
            return Err(unreachable(segment));
        }
        may_be_absent |= field.optional;
        current = match types.resolve(&field.field_type.name) {
            Some(def) if def.kind == TypeKind::Structure => def,
            _ => return Err(unreachable(segment)),
        };
    }
    let leaf = current.field(last).ok_or_else(|| unreachable(last))?;
    Ok((leaf, may_be_absent || leaf.optional))
}

/// Alias-resolved name used for type comparisons; unknown names compare as written
fn canonical<'t>(types: &'t dyn TypeRegistryReader, type_ref: &'t TypeRef) -> &'t str {
    types.canonical_name(&type_ref.name).unwrap_or(&type_ref.name)
}

fn render_field_type(field: &FieldDef) -> String {
    if field.is_array {
        format!("{}[]", field.field_type.name)
    } else {
        field.field_type.name.clone()
    }
}
