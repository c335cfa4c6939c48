//! Syntax traversal for path-typed declarations.

use std::ops::Range;

use pathguard_types::PathKind;

use crate::ast::{Expr, Item, Module, TypeNode, VariableDeclaration};

/// A declaration opted into path checking.
#[derive(Debug, Clone, PartialEq)]
pub struct PathDeclaration<'a> {
    pub kind: PathKind,
    pub name: &'a str,
    pub value: &'a str,
    /// Span of the string literal, quotes included.
    pub span: Range<usize>,
}

/// Every path-typed declaration in `module`, at any block depth, in source
/// order.
pub fn path_declarations(module: &Module) -> Vec<PathDeclaration<'_>> {
    let mut found = Vec::new();
    visit_items(&module.items, &mut found);
    found
}

fn visit_items<'a>(items: &'a [Item], found: &mut Vec<PathDeclaration<'a>>) {
    for item in items {
        match item {
            Item::Variable(stmt) => {
                found.extend(stmt.declarations.iter().filter_map(path_declaration));
            }
            Item::Block(inner) => visit_items(inner, found),
            Item::Skipped => {}
        }
    }
}

/// A declaration qualifies when it has a string-literal initializer and an
/// explicit annotation naming one of the marker types.
fn path_declaration(decl: &VariableDeclaration) -> Option<PathDeclaration<'_>> {
    let Some(Expr::StringLiteral { value, span }) = &decl.initializer else {
        return None;
    };
    let type_name = declared_type_name(decl.type_annotation.as_ref()?)?;
    let kind = PathKind::from_marker_name(type_name)?;

    Some(PathDeclaration {
        kind,
        name: &decl.name.name,
        value,
        span: span.clone(),
    })
}

/// Simple name of the type an annotation refers to.
///
/// Walks the annotation rather than matching its text, so `ns.FilePathStr`
/// and `(FilePathStr)` resolve to `FilePathStr`. Unions, arrays and literal
/// types have no single declared name.
pub fn declared_type_name(node: &TypeNode) -> Option<&str> {
    match node {
        TypeNode::Reference { name, .. } => Some(name.simple_name()),
        TypeNode::Parenthesized(inner) => declared_type_name(inner),
        TypeNode::Array(_) | TypeNode::Union(_) | TypeNode::StringLiteral(_) => None,
    }
}
