//! `textDocument/*` methods

use ir::{FieldMapping, MethodCategory, MethodDef, ReturnType, TypeRef};

fn params(name: &str) -> Option<TypeRef> { Some(TypeRef::structure(name)) }

/// Returns method definitions for textDocument/* LSP methods
pub fn text_document_methods() -> Vec<MethodDef> {
    let category = MethodCategory::TextDocument;
    let location = || TypeRef::structure("Location");
    let text_edit = || TypeRef::structure("TextEdit");

    vec![
        // Document synchronization
        MethodDef::notification(
            "textDocument/didOpen",
            params("DidOpenTextDocumentParams"),
            category,
        ),
        MethodDef::notification(
            "textDocument/didChange",
            params("DidChangeTextDocumentParams"),
            category,
        ),
        MethodDef::notification(
            "textDocument/didClose",
            params("DidCloseTextDocumentParams"),
            category,
        ),
        MethodDef::notification(
            "textDocument/willSave",
            params("WillSaveTextDocumentParams"),
            category,
        ),
        MethodDef::request(
            "textDocument/willSaveWaitUntil",
            params("WillSaveTextDocumentParams"),
            category,
        )
        .returns(ReturnType::slice(text_edit())),
        MethodDef::notification(
            "textDocument/didSave",
            params("DidSaveTextDocumentParams"),
            category,
        ),
        // Language features
        MethodDef::request("textDocument/completion", params("CompletionParams"), category)
            .returns(ReturnType::single(TypeRef::structure("CompletionList")))
            .returns(ReturnType::slice(TypeRef::structure("CompletionItem"))),
        MethodDef::request("textDocument/hover", params("HoverParams"), category)
            .returns(ReturnType::single(TypeRef::structure("Hover"))),
        MethodDef::request("textDocument/signatureHelp", params("SignatureHelpParams"), category)
            .returns(ReturnType::single(TypeRef::structure("SignatureHelp"))),
        MethodDef::request("textDocument/definition", params("DefinitionParams"), category)
            .returns(ReturnType::single(location()))
            .returns(ReturnType::slice(location()))
            .returns(ReturnType::slice(TypeRef::alias("DefinitionLink"))),
        MethodDef::request("textDocument/declaration", params("DeclarationParams"), category)
            .returns(ReturnType::single(location()))
            .returns(ReturnType::slice(location()))
            .returns(ReturnType::slice(TypeRef::alias("DeclarationLink"))),
        MethodDef::request("textDocument/references", params("ReferenceParams"), category)
            .returns(ReturnType::slice(location())),
        MethodDef::request(
            "textDocument/documentHighlight",
            params("DocumentHighlightParams"),
            category,
        )
        .returns(ReturnType::slice(TypeRef::structure("DocumentHighlight"))),
        MethodDef::request(
            "textDocument/documentSymbol",
            params("DocumentSymbolParams"),
            category,
        )
        .returns(ReturnType::slice(TypeRef::structure("DocumentSymbol")))
        .returns(
            ReturnType::slice(TypeRef::structure("SymbolInformation"))
                .converted(symbol_information_to_document_symbol()),
        ),
        MethodDef::request(
            "textDocument/formatting",
            params("DocumentFormattingParams"),
            category,
        )
        .returns(ReturnType::slice(text_edit())),
        MethodDef::request(
            "textDocument/rangeFormatting",
            params("DocumentRangeFormattingParams"),
            category,
        )
        .returns(ReturnType::slice(text_edit())),
    ]
}

/// Flat `SymbolInformation` results carry a single location; both ranges of the
/// hierarchical `DocumentSymbol` come from it.
fn symbol_information_to_document_symbol() -> Vec<FieldMapping> {
    let string = || TypeRef::primitive("string");
    let range = || TypeRef::structure("Range");
    vec![
        FieldMapping::new("name", "name", string(), string()),
        FieldMapping::new(
            "kind",
            "kind",
            TypeRef::enumeration("SymbolKind"),
            TypeRef::enumeration("SymbolKind"),
        ),
        FieldMapping::new(
            "tags",
            "tags",
            TypeRef::enumeration("SymbolTag"),
            TypeRef::enumeration("SymbolTag"),
        ),
        FieldMapping::new(
            "deprecated",
            "deprecated",
            TypeRef::primitive("boolean"),
            TypeRef::primitive("boolean"),
        ),
        FieldMapping::new("location.range", "range", range(), range()),
        FieldMapping::new("location.range", "selectionRange", range(), range()),
    ]
}
