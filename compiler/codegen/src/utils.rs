// codegen/src/utils.rs

/// Capitalize the first letter of a string, leaving the rest untouched
///
/// ASCII only: protocol method names are ASCII identifiers, so no locale or
/// Unicode case tables are involved.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
    }
}

/// Split a protocol method name into the segments that make up its identifier
///
/// Splits on `/`, then each part on `_`.
pub fn method_name_segments(method: &str) -> Vec<&str> {
    method.split('/').flat_map(|part| part.split('_')).collect()
}

/// Whether a protocol method name can be turned into an identifier unambiguously
///
/// Rejects empty names, empty segments (`"a//b"`, `"a_"`), and non-ASCII text.
pub fn is_well_formed_method_name(method: &str) -> bool {
    method.is_ascii()
        && !method.is_empty()
        && method_name_segments(method).iter().all(|segment| !segment.is_empty())
}

/// Derive the canonical identifier of a protocol method
///
/// Each `/`- and `_`-delimited segment is title-cased (first letter upper, the
/// rest unchanged so internal acronyms survive) and the segments are concatenated.
///
/// # Examples
/// ```
/// use codegen::utils::canonical_identifier;
/// assert_eq!(canonical_identifier("textDocument/didOpen"), "TextDocumentDidOpen");
/// assert_eq!(canonical_identifier("initialize"), "Initialize");
/// assert_eq!(canonical_identifier("workspace/executeCommand"), "WorkspaceExecuteCommand");
/// ```
pub fn canonical_identifier(method: &str) -> String {
    method_name_segments(method).into_iter().map(capitalize).collect()
}

/// Name of the function converting one response shape into another
///
/// Slice shapes carry a `Slice` suffix, so converting a list of
/// `SymbolInformation` into a list of `DocumentSymbol` is
/// `convertSymbolInformationSliceToDocumentSymbolSlice`.
pub fn converter_name(
    source: &str,
    source_is_slice: bool,
    target: &str,
    target_is_slice: bool,
) -> String {
    let suffix = |is_slice: bool| if is_slice { "Slice" } else { "" };
    format!(
        "convert{}{}To{}{}",
        capitalize(source),
        suffix(source_is_slice),
        capitalize(target),
        suffix(target_is_slice)
    )
}
