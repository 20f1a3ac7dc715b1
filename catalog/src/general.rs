//! General lifecycle methods

use ir::{MethodCategory, MethodDef, ReturnType, TypeRef};

/// Returns the method definitions for general LSP methods
pub fn general_methods() -> Vec<MethodDef> {
    let category = MethodCategory::General;
    vec![
        MethodDef::request("initialize", Some(TypeRef::structure("InitializeParams")), category)
            .returns(ReturnType::single(TypeRef::structure("InitializeResult"))),
        MethodDef::notification(
            "initialized",
            Some(TypeRef::structure("InitializedParams")),
            category,
        ),
        // No parameters, void result
        MethodDef::request("shutdown", None, category),
        MethodDef::notification("exit", None, category),
    ]
}
