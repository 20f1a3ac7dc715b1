//! Descriptor Resolution
//!
//! Turns validated method definitions into [`MethodDescriptor`]s: derives the
//! identifier, picks the primary response shape, and plans a conversion for
//! every alternate that needs one. Errors are collected across the whole
//! catalog; descriptors are only handed out when there are none.

use codegen::utils::canonical_identifier;
use ir::{AlternateShape, MethodDef, MethodDescriptor, ResponseShape};
use registry::TypeRegistryReader;
use tracing::{debug, error, warn};

use crate::conversion::plan_conversion;
use crate::{IrValidator, ResolutionError, ResolutionReport};

/// Resolves method definitions against a type table
pub struct DescriptorResolver<'a> {
    types: &'a dyn TypeRegistryReader,
    validator: IrValidator,
}

impl<'a> DescriptorResolver<'a> {
    /// Create a resolver over `types`
    pub fn new(types: &'a dyn TypeRegistryReader) -> Self {
        Self { types, validator: IrValidator::new() }
    }

    /// Resolve a single definition
    ///
    /// Only checks local to the definition are run; duplicate names and
    /// identifier collisions need the whole catalog (see [`Self::resolve_all`]).
    pub fn resolve_method(
        &self,
        method: &MethodDef,
    ) -> Result<MethodDescriptor, Vec<ResolutionError>> {
        let errors = self.validator.validate_method(method, self.types);
        if !errors.is_empty() {
            return Err(errors);
        }

        let primary = method.primary_response();
        if let Some(primary) = primary {
            if primary.needs_convert {
                warn!(method = %method.name, "primary response is marked for conversion; ignoring");
            }
        }

        let mut errors = Vec::new();
        let mut alternates = Vec::with_capacity(method.alternate_responses().len());
        for (offset, alternate) in method.alternate_responses().iter().enumerate() {
            let response_index = offset + 1;
            let conversion = match (alternate.needs_convert, primary) {
                (true, Some(primary)) => {
                    match plan_conversion(primary, alternate, self.types) {
                        Ok(plan) => Some(plan),
                        Err(failures) => {
                            errors.extend(failures.into_iter().map(|reason| {
                                ResolutionError::UnresolvableConversion {
                                    method: method.name.clone(),
                                    response_index,
                                    reason,
                                }
                            }));
                            None
                        }
                    }
                }
                _ => {
                    if !alternate.field_mappings.is_empty() {
                        warn!(
                            method = %method.name,
                            response_index,
                            "field mappings given without conversion; ignoring"
                        );
                    }
                    None
                }
            };
            alternates.push(AlternateShape { shape: ResponseShape::from(alternate), conversion });
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let identifier = canonical_identifier(&method.name);
        debug!(method = %method.name, %identifier, alternates = alternates.len(), "resolved method");
        Ok(MethodDescriptor {
            method: method.name.clone(),
            identifier,
            category: method.category,
            request_type: method.request_type.clone(),
            kind: method.binding_kind(),
            primary: primary.map(ResponseShape::from),
            alternates,
        })
    }

    /// Resolve an entire catalog
    ///
    /// Catalog-wide errors are reported first, then per-method errors in
    /// catalog order. Descriptors keep the input order.
    pub fn resolve_all(
        &self,
        methods: &[MethodDef],
    ) -> Result<Vec<MethodDescriptor>, ResolutionReport> {
        let mut errors = self.validator.validate_catalog(methods);
        let mut descriptors = Vec::with_capacity(methods.len());
        for method in methods {
            match self.resolve_method(method) {
                Ok(descriptor) => descriptors.push(descriptor),
                Err(method_errors) => errors.extend(method_errors),
            }
        }

        if errors.is_empty() {
            debug!(methods = descriptors.len(), "resolved catalog");
            Ok(descriptors)
        } else {
            for e in &errors {
                error!("{}", e);
            }
            Err(ResolutionReport::new(errors))
        }
    }
}

/// Resolve `methods` against `types`
pub fn resolve_catalog(
    methods: &[MethodDef],
    types: &dyn TypeRegistryReader,
) -> Result<Vec<MethodDescriptor>, ResolutionReport> {
    DescriptorResolver::new(types).resolve_all(methods)
}

/// Summary counts over a resolved catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    /// Total descriptors
    pub methods: usize,
    /// Request bindings
    pub requests: usize,
    /// Notification bindings
    pub notifications: usize,
    /// Requests resolving to no value
    pub void: usize,
    /// Descriptors with at least one alternate shape
    pub multi_shape: usize,
    /// Alternates carrying a conversion plan
    pub conversions: usize,
}

impl ResolutionStats {
    /// Tally `descriptors`
    pub fn from_descriptors(descriptors: &[MethodDescriptor]) -> Self {
        let mut stats = Self::default();
        for d in descriptors {
            stats.methods += 1;
            if d.is_notification() {
                stats.notifications += 1;
            } else {
                stats.requests += 1;
                if d.is_void() {
                    stats.void += 1;
                }
            }
            if d.is_multi_shape() {
                stats.multi_shape += 1;
            }
            stats.conversions += d.alternates.iter().filter(|a| a.conversion.is_some()).count();
        }
        stats
    }
}
