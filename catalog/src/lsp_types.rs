//! Known LSP types referenced by the shipped catalog
//!
//! Response types are registered with the fields conversions need. Request
//! parameter structures are registered opaquely: they are only ever passed
//! through, never converted.

use ir::{FieldDef, TypeDef, TypeRef};
use registry::TypeRegistry;

const PARAM_TYPES: &[&str] = &[
    "InitializeParams",
    "InitializedParams",
    "DidOpenTextDocumentParams",
    "DidChangeTextDocumentParams",
    "DidCloseTextDocumentParams",
    "WillSaveTextDocumentParams",
    "DidSaveTextDocumentParams",
    "CompletionParams",
    "HoverParams",
    "SignatureHelpParams",
    "DefinitionParams",
    "DeclarationParams",
    "ReferenceParams",
    "DocumentHighlightParams",
    "DocumentSymbolParams",
    "DocumentFormattingParams",
    "DocumentRangeFormattingParams",
];

fn string() -> TypeRef { TypeRef::primitive("string") }

fn uinteger() -> TypeRef { TypeRef::primitive("uinteger") }

fn range() -> TypeRef { TypeRef::structure("Range") }

/// Build the type table for the shipped catalog
///
/// Fails if a type name is defined twice.
pub fn lsp_type_registry() -> registry::Result<TypeRegistry> {
    TypeRegistry::from_types(lsp_type_definitions())
}

/// Every type definition the shipped catalog refers to
pub fn lsp_type_definitions() -> Vec<TypeDef> {
    let mut types: Vec<TypeDef> = Vec::new();

    for primitive in ["string", "integer", "uinteger", "boolean", "DocumentUri"] {
        types.push(TypeDef::primitive(primitive));
    }
    for enumeration in
        ["SymbolKind", "SymbolTag", "CompletionItemKind", "DocumentHighlightKind", "MarkupKind"]
    {
        types.push(TypeDef::enumeration(enumeration));
    }
    for params in PARAM_TYPES {
        types.push(TypeDef::structure(*params, Vec::new()));
    }

    types.extend([
        TypeDef::structure(
            "Position",
            vec![FieldDef::required("line", uinteger()), FieldDef::required("character", uinteger())],
        ),
        TypeDef::structure(
            "Range",
            vec![
                FieldDef::required("start", TypeRef::structure("Position")),
                FieldDef::required("end", TypeRef::structure("Position")),
            ],
        ),
        TypeDef::structure(
            "Location",
            vec![
                FieldDef::required("uri", TypeRef::primitive("DocumentUri")),
                FieldDef::required("range", range()),
            ],
        ),
        TypeDef::structure(
            "LocationLink",
            vec![
                FieldDef::optional("originSelectionRange", range()),
                FieldDef::required("targetUri", TypeRef::primitive("DocumentUri")),
                FieldDef::required("targetRange", range()),
                FieldDef::required("targetSelectionRange", range()),
            ],
        ),
        TypeDef::structure(
            "TextEdit",
            vec![FieldDef::required("range", range()), FieldDef::required("newText", string())],
        ),
        TypeDef::structure("ServerCapabilities", Vec::new()),
        TypeDef::structure(
            "ServerInfo",
            vec![FieldDef::required("name", string()), FieldDef::optional("version", string())],
        ),
        TypeDef::structure(
            "InitializeResult",
            vec![
                FieldDef::required("capabilities", TypeRef::structure("ServerCapabilities")),
                FieldDef::optional("serverInfo", TypeRef::structure("ServerInfo")),
            ],
        ),
        TypeDef::structure(
            "CompletionItem",
            vec![
                FieldDef::required("label", string()),
                FieldDef::optional("kind", TypeRef::enumeration("CompletionItemKind")),
                FieldDef::optional("detail", string()),
                FieldDef::optional("insertText", string()),
            ],
        ),
        TypeDef::structure(
            "CompletionList",
            vec![
                FieldDef::required("isIncomplete", TypeRef::primitive("boolean")),
                FieldDef::required("items", TypeRef::structure("CompletionItem")).array(),
            ],
        ),
        TypeDef::structure(
            "MarkupContent",
            vec![
                FieldDef::required("kind", TypeRef::enumeration("MarkupKind")),
                FieldDef::required("value", string()),
            ],
        ),
        TypeDef::structure(
            "Hover",
            vec![
                FieldDef::required("contents", TypeRef::structure("MarkupContent")),
                FieldDef::optional("range", range()),
            ],
        ),
        TypeDef::structure(
            "SignatureInformation",
            vec![
                FieldDef::required("label", string()),
                FieldDef::optional("documentation", TypeRef::structure("MarkupContent")),
            ],
        ),
        TypeDef::structure(
            "SignatureHelp",
            vec![
                FieldDef::required("signatures", TypeRef::structure("SignatureInformation"))
                    .array(),
                FieldDef::optional("activeSignature", uinteger()),
                FieldDef::optional("activeParameter", uinteger()),
            ],
        ),
        TypeDef::structure(
            "DocumentHighlight",
            vec![
                FieldDef::required("range", range()),
                FieldDef::optional("kind", TypeRef::enumeration("DocumentHighlightKind")),
            ],
        ),
        TypeDef::structure(
            "DocumentSymbol",
            vec![
                FieldDef::required("name", string()),
                FieldDef::optional("detail", string()),
                FieldDef::required("kind", TypeRef::enumeration("SymbolKind")),
                FieldDef::optional("tags", TypeRef::enumeration("SymbolTag")).array(),
                FieldDef::optional("deprecated", TypeRef::primitive("boolean")),
                FieldDef::required("range", range()),
                FieldDef::required("selectionRange", range()),
                FieldDef::optional("children", TypeRef::structure("DocumentSymbol")).array(),
            ],
        ),
        TypeDef::structure(
            "SymbolInformation",
            vec![
                FieldDef::required("name", string()),
                FieldDef::required("kind", TypeRef::enumeration("SymbolKind")),
                FieldDef::optional("tags", TypeRef::enumeration("SymbolTag")).array(),
                FieldDef::optional("deprecated", TypeRef::primitive("boolean")),
                FieldDef::required("location", TypeRef::structure("Location")),
                FieldDef::optional("containerName", string()),
            ],
        ),
        TypeDef::alias("DefinitionLink", "LocationLink"),
        TypeDef::alias("DeclarationLink", "LocationLink"),
    ]);
    types
}
