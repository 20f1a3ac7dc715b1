use analysis::{
    plan_conversion, resolve_catalog, ConversionFailure, DescriptorResolver, ResolutionError,
    ResolutionStats,
};
use catalog::{lsp_type_registry, Catalog};
use ir::{
    BindingKind, FieldDef, FieldMapping, MethodCategory, MethodDef, ResponseShape, ReturnType,
    TypeDef, TypeKind, TypeRef,
};
use registry::TypeRegistry;

fn shipped_types() -> TypeRegistry {
    lsp_type_registry().expect("Shipped type table should build")
}

/// A small table with a flat `Flat` shape and a nested `Tree` shape
fn create_test_registry() -> TypeRegistry {
    TypeRegistry::from_types(vec![
        TypeDef::primitive("string"),
        TypeDef::primitive("integer"),
        TypeDef::structure("Span", vec![FieldDef::required("start", TypeRef::primitive("integer"))]),
        TypeDef::structure(
            "Place",
            vec![
                FieldDef::required("uri", TypeRef::primitive("string")),
                FieldDef::required("span", TypeRef::structure("Span")),
                FieldDef::optional("spans", TypeRef::structure("Span")).array(),
            ],
        ),
        TypeDef::structure(
            "Flat",
            vec![
                FieldDef::required("label", TypeRef::primitive("string")),
                FieldDef::required("place", TypeRef::structure("Place")),
                FieldDef::optional("notes", TypeRef::primitive("string")).array(),
                FieldDef::optional("summary", TypeRef::primitive("string")),
                FieldDef::optional("alt", TypeRef::structure("Place")),
            ],
        ),
        TypeDef::structure(
            "Tree",
            vec![
                FieldDef::required("label", TypeRef::primitive("string")),
                FieldDef::required("span", TypeRef::structure("Span")),
                FieldDef::optional("note", TypeRef::primitive("string")),
            ],
        ),
        TypeDef::alias("FlatAlias", "Flat"),
        TypeDef::alias("Label", "string"),
    ])
    .expect("Failed to build test registry")
}

fn string() -> TypeRef { TypeRef::primitive("string") }

fn span() -> TypeRef { TypeRef::structure("Span") }

fn create_test_mappings() -> Vec<FieldMapping> {
    vec![
        FieldMapping::new("label", "label", string(), string()),
        FieldMapping::new("place.span", "span", span(), span()),
    ]
}

fn create_test_method(alternate: ReturnType) -> MethodDef {
    MethodDef::request("custom/tree", None, MethodCategory::Workspace)
        .returns(ReturnType::slice(TypeRef::structure("Tree")))
        .returns(alternate)
}

fn conversion_failures(method: &MethodDef, registry: &TypeRegistry) -> Vec<ConversionFailure> {
    let errors = DescriptorResolver::new(registry)
        .resolve_method(method)
        .expect_err("Expected conversion to be rejected");
    errors
        .into_iter()
        .map(|e| match e {
            ResolutionError::UnresolvableConversion { response_index, reason, .. } => {
                assert_eq!(response_index, 1);
                reason
            }
            other => panic!("Expected UnresolvableConversion, got {:?}", other),
        })
        .collect()
}

#[test]
fn shipped_catalog_resolves_without_errors() {
    let catalog = Catalog::shipped();
    let registry = shipped_types();

    let descriptors = resolve_catalog(catalog.methods(), &registry)
        .unwrap_or_else(|report| panic!("Shipped catalog should resolve:\n{}", report));

    assert_eq!(descriptors.len(), 20);
    let names: Vec<&str> = descriptors.iter().map(|d| d.method.as_str()).collect();
    let expected: Vec<&str> = catalog.methods().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, expected);
    assert_eq!(descriptors[0].identifier, "Initialize");
    assert_eq!(descriptors[4].identifier, "TextDocumentDidOpen");
}

#[test]
fn shipped_catalog_stats() {
    let descriptors = resolve_catalog(Catalog::shipped().methods(), &shipped_types())
        .expect("Shipped catalog should resolve");

    let stats = ResolutionStats::from_descriptors(&descriptors);
    assert_eq!(
        stats,
        ResolutionStats {
            methods: 20,
            requests: 13,
            notifications: 7,
            void: 1,
            multi_shape: 4,
            conversions: 1,
        }
    );
}

#[test]
fn definition_prefers_single_location() {
    let descriptors = resolve_catalog(Catalog::shipped().methods(), &shipped_types())
        .expect("Shipped catalog should resolve");
    let definition = descriptors
        .iter()
        .find(|d| d.method == "textDocument/definition")
        .expect("definition should be in the catalog");

    assert_eq!(definition.identifier, "TextDocumentDefinition");
    assert_eq!(definition.kind, BindingKind::Request);
    assert_eq!(
        definition.primary,
        Some(ResponseShape::new(TypeRef::structure("Location"), false))
    );
    let alternates: Vec<&ResponseShape> = definition.alternates.iter().map(|a| &a.shape).collect();
    assert_eq!(
        alternates,
        vec![
            &ResponseShape::new(TypeRef::structure("Location"), true),
            &ResponseShape::new(TypeRef::alias("DefinitionLink"), true),
        ]
    );
    assert!(definition.alternates.iter().all(|a| a.conversion.is_none()));
    assert_eq!(definition.shapes().count(), 3);
}

#[test]
fn document_symbol_plans_conversion() {
    let descriptors = resolve_catalog(Catalog::shipped().methods(), &shipped_types())
        .expect("Shipped catalog should resolve");
    let symbols = descriptors
        .iter()
        .find(|d| d.method == "textDocument/documentSymbol")
        .expect("documentSymbol should be in the catalog");

    let plan = symbols.alternates[0].conversion.as_ref().expect("Expected a conversion plan");
    assert_eq!(plan.converter, "convertSymbolInformationSliceToDocumentSymbolSlice");
    assert_eq!(plan.target, ResponseShape::new(TypeRef::structure("DocumentSymbol"), true));
    let range = plan
        .copies
        .iter()
        .find(|c| c.dest_field == "selectionRange")
        .expect("selectionRange should be copied");
    assert_eq!(range.source_path, vec!["location".to_string(), "range".to_string()]);
    assert_eq!(range.field_type, TypeRef::structure("Range"));
}

#[test]
fn notifications_and_void_requests_have_no_primary() {
    let descriptors = resolve_catalog(Catalog::shipped().methods(), &shipped_types())
        .expect("Shipped catalog should resolve");

    for d in &descriptors {
        if d.is_notification() {
            assert!(d.primary.is_none() && d.alternates.is_empty(), "{} has responses", d.method);
        }
    }
    let shutdown = descriptors.iter().find(|d| d.method == "shutdown").expect("shutdown");
    assert!(shutdown.is_void());
    assert!(shutdown.request_type.is_none());
    assert_eq!(shutdown.kind, BindingKind::Request);
}

#[test]
fn resolution_is_deterministic() {
    let catalog = Catalog::shipped();
    let registry = shipped_types();
    let first = resolve_catalog(catalog.methods(), &registry).expect("first run");
    let second = resolve_catalog(catalog.methods(), &registry).expect("second run");
    assert_eq!(first, second);
}

#[test]
fn duplicate_hover_is_reported_once() {
    let mut methods = Catalog::shipped().into_methods();
    let hover = methods
        .iter()
        .find(|m| m.name == "textDocument/hover")
        .cloned()
        .expect("hover should be in the catalog");
    methods.push(hover);

    let report = resolve_catalog(&methods, &shipped_types())
        .expect_err("Duplicate hover should be rejected");
    assert_eq!(report.len(), 1, "Expected exactly one error, got:\n{}", report);
    assert!(matches!(
        &report.errors()[0],
        ResolutionError::DuplicateMethodName { method, .. } if method == "textDocument/hover"
    ));
}

#[test]
fn notification_with_response_blocks_resolution() {
    let mut methods = Catalog::shipped().into_methods();
    methods.push(
        MethodDef::notification("window/logMessage", None, MethodCategory::Window)
            .returns(ReturnType::single(TypeRef::primitive("string"))),
    );

    let report = resolve_catalog(&methods, &shipped_types())
        .expect_err("Notification with a response should be rejected");
    assert_eq!(
        report.errors(),
        &[ResolutionError::InvalidNotificationShape {
            method: "window/logMessage".into(),
            count: 1,
        }]
    );
}

#[test]
fn errors_are_aggregated_across_methods() {
    let registry = create_test_registry();
    let methods = vec![
        create_test_method(ReturnType::slice(TypeRef::structure("Flat")).converted(vec![])),
        MethodDef::request("custom/tree", Some(TypeRef::structure("Unknown")), MethodCategory::Workspace),
    ];

    let report = resolve_catalog(&methods, &registry).expect_err("Expected errors");
    assert_eq!(report.len(), 3, "Got:\n{}", report);
    // Catalog-wide errors come first
    assert!(matches!(report.errors()[0], ResolutionError::DuplicateMethodName { .. }));
    assert!(matches!(
        report.errors()[1],
        ResolutionError::UnresolvableConversion { reason: ConversionFailure::NoFieldMappings, .. }
    ));
    assert!(matches!(report.errors()[2], ResolutionError::UnknownType { .. }));
    assert!(report.to_string().starts_with("3 resolution error(s)"));
}

#[test]
fn converts_flat_shape_into_tree() {
    let method = create_test_method(
        ReturnType::slice(TypeRef::alias("FlatAlias")).converted(create_test_mappings()),
    );

    let descriptor = DescriptorResolver::new(&create_test_registry())
        .resolve_method(&method)
        .expect("Conversion should be planned");
    let plan = descriptor.alternates[0].conversion.as_ref().expect("Expected a conversion plan");
    assert_eq!(plan.copies.len(), 2);
    assert_eq!(plan.copies[1].source_path, vec!["place".to_string(), "span".to_string()]);
    assert_eq!(plan.copies[1].field_type.kind, TypeKind::Structure);
}

#[test]
fn conversion_without_mappings_is_unresolvable() {
    let method = create_test_method(ReturnType::slice(TypeRef::structure("Flat")).converted(vec![]));
    assert_eq!(
        conversion_failures(&method, &create_test_registry()),
        vec![ConversionFailure::NoFieldMappings]
    );
}

#[test]
fn conversion_requires_structures() {
    let method = create_test_method(
        ReturnType::slice(TypeRef::primitive("string")).converted(create_test_mappings()),
    );
    assert_eq!(
        conversion_failures(&method, &create_test_registry()),
        vec![ConversionFailure::NotAStructure { type_name: "string".into() }]
    );
}

#[test]
fn conversion_requires_matching_cardinality() {
    let method = create_test_method(
        ReturnType::single(TypeRef::structure("Flat")).converted(create_test_mappings()),
    );
    assert_eq!(
        conversion_failures(&method, &create_test_registry()),
        vec![ConversionFailure::CardinalityMismatch { source_is_slice: false, target_is_slice: true }]
    );
}

#[test]
fn conversion_rejects_unreachable_source_paths() {
    let registry = create_test_registry();
    let cases = [
        ("place.nowhere", "nowhere"),
        ("label.start", "label"),
        ("place.spans.start", "spans"),
    ];
    for (path, segment) in cases {
        let mut mappings = create_test_mappings();
        mappings[1] = FieldMapping::new(path, "span", span(), span());
        let method =
            create_test_method(ReturnType::slice(TypeRef::structure("Flat")).converted(mappings));

        assert_eq!(
            conversion_failures(&method, &registry),
            vec![ConversionFailure::SourcePathUnreachable {
                path: path.into(),
                segment: segment.into(),
            }],
            "path `{}`",
            path
        );
    }
}

#[test]
fn conversion_rejects_missing_destination() {
    let mut mappings = create_test_mappings();
    mappings.push(FieldMapping::new("label", "title", string(), string()));
    let method = create_test_method(ReturnType::slice(TypeRef::structure("Flat")).converted(mappings));

    assert_eq!(
        conversion_failures(&method, &create_test_registry()),
        vec![ConversionFailure::DestinationFieldMissing {
            field: "title".into(),
            target: "Tree".into(),
        }]
    );
}

#[test]
fn conversion_rejects_type_mismatch() {
    let mut mappings = create_test_mappings();
    mappings[0] = FieldMapping::new(
        "label",
        "label",
        TypeRef::primitive("integer"),
        TypeRef::primitive("integer"),
    );
    let method = create_test_method(ReturnType::slice(TypeRef::structure("Flat")).converted(mappings));

    let failures = conversion_failures(&method, &create_test_registry());
    assert!(!failures.is_empty());
    assert!(failures.iter().all(|f| matches!(f, ConversionFailure::TypeMismatch { .. })));
}

#[test]
fn conversion_rejects_array_into_scalar() {
    let mut mappings = create_test_mappings();
    mappings.push(FieldMapping::new("notes", "note", string(), string()));
    let method = create_test_method(ReturnType::slice(TypeRef::structure("Flat")).converted(mappings));

    assert_eq!(
        conversion_failures(&method, &create_test_registry()),
        vec![ConversionFailure::TypeMismatch {
            field: "note".into(),
            stated: "string".into(),
            actual: "string[]".into(),
        }]
    );
}

#[test]
fn conversion_compares_types_through_aliases() {
    let mut mappings = create_test_mappings();
    mappings[0] = FieldMapping::new("label", "label", TypeRef::alias("Label"), string());
    let method = create_test_method(ReturnType::slice(TypeRef::structure("Flat")).converted(mappings));

    let descriptor = DescriptorResolver::new(&create_test_registry())
        .resolve_method(&method)
        .expect("Alias and base type should compare equal");
    assert!(descriptor.alternates[0].conversion.is_some());
}

#[test]
fn conversion_rejects_duplicate_destination() {
    let mut mappings = create_test_mappings();
    mappings.push(FieldMapping::new("label", "label", string(), string()));
    let method = create_test_method(ReturnType::slice(TypeRef::structure("Flat")).converted(mappings));

    assert_eq!(
        conversion_failures(&method, &create_test_registry()),
        vec![ConversionFailure::DuplicateDestination { field: "label".into() }]
    );
}

#[test]
fn conversion_requires_every_required_field() {
    let mappings = vec![FieldMapping::new("label", "label", string(), string())];
    let method = create_test_method(ReturnType::slice(TypeRef::structure("Flat")).converted(mappings));

    assert_eq!(
        conversion_failures(&method, &create_test_registry()),
        vec![ConversionFailure::MissingRequiredFields {
            target: "Tree".into(),
            fields: vec!["span".into()],
        }]
    );
}

#[test]
fn conversion_rejects_optional_source_for_required_field() {
    let mut mappings = create_test_mappings();
    mappings[0] = FieldMapping::new("summary", "label", string(), string());
    let method = create_test_method(ReturnType::slice(TypeRef::structure("Flat")).converted(mappings));

    assert_eq!(
        conversion_failures(&method, &create_test_registry()),
        vec![
            ConversionFailure::OptionalSourceForRequiredField {
                path: "summary".into(),
                field: "label".into(),
            },
            ConversionFailure::MissingRequiredFields {
                target: "Tree".into(),
                fields: vec!["label".into()],
            },
        ]
    );
}

#[test]
fn conversion_rejects_path_through_optional_field() {
    let mut mappings = create_test_mappings();
    mappings[1] = FieldMapping::new("alt.span", "span", span(), span());
    let method = create_test_method(ReturnType::slice(TypeRef::structure("Flat")).converted(mappings));

    assert_eq!(
        conversion_failures(&method, &create_test_registry()),
        vec![
            ConversionFailure::OptionalSourceForRequiredField {
                path: "alt.span".into(),
                field: "span".into(),
            },
            ConversionFailure::MissingRequiredFields {
                target: "Tree".into(),
                fields: vec!["span".into()],
            },
        ]
    );
}

#[test]
fn optional_source_may_feed_optional_field() {
    let mut mappings = create_test_mappings();
    mappings.push(FieldMapping::new("summary", "note", string(), string()));
    let method = create_test_method(ReturnType::slice(TypeRef::structure("Flat")).converted(mappings));

    let descriptor = DescriptorResolver::new(&create_test_registry())
        .resolve_method(&method)
        .expect("Optional into optional should be planned");
    let plan = descriptor.alternates[0].conversion.as_ref().expect("Expected a conversion plan");
    assert_eq!(plan.copies.len(), 3);
}

#[test]
fn container_name_cannot_stand_in_for_symbol_name() {
    let primary = ReturnType::slice(TypeRef::structure("DocumentSymbol"));
    let range = TypeRef::structure("Range");
    let kind = TypeRef::enumeration("SymbolKind");
    let alternate = ReturnType::slice(TypeRef::structure("SymbolInformation")).converted(vec![
        FieldMapping::new("containerName", "name", string(), string()),
        FieldMapping::new("kind", "kind", kind.clone(), kind),
        FieldMapping::new("location.range", "range", range.clone(), range.clone()),
        FieldMapping::new("location.range", "selectionRange", range.clone(), range),
    ]);

    let failures = plan_conversion(&primary, &alternate, &shipped_types())
        .expect_err("An optional name source should be rejected");
    assert_eq!(
        failures,
        vec![
            ConversionFailure::OptionalSourceForRequiredField {
                path: "containerName".into(),
                field: "name".into(),
            },
            ConversionFailure::MissingRequiredFields {
                target: "DocumentSymbol".into(),
                fields: vec!["name".into()],
            },
        ]
    );
}

#[test]
fn alternates_without_conversion_keep_mappings_out_of_plan() {
    let mut alternate = ReturnType::slice(TypeRef::structure("Flat"));
    alternate.field_mappings = create_test_mappings();
    let method = create_test_method(alternate);

    let descriptor = DescriptorResolver::new(&create_test_registry())
        .resolve_method(&method)
        .expect("Ignored mappings are not an error");
    assert!(descriptor.alternates[0].conversion.is_none());
}

#[test]
fn plan_conversion_targets_primary_shape() {
    let primary = ReturnType::slice(TypeRef::structure("Tree"));
    let alternate =
        ReturnType::slice(TypeRef::structure("Flat")).converted(create_test_mappings());

    let plan = plan_conversion(&primary, &alternate, &create_test_registry())
        .expect("Conversion should be planned");
    assert_eq!(plan.target, ResponseShape::from(&primary));
    assert_eq!(plan.converter, "convertFlatSliceToTreeSlice");
    let destinations: Vec<&str> = plan.copies.iter().map(|c| c.dest_field.as_str()).collect();
    assert_eq!(destinations, vec!["label", "span"]);
}
