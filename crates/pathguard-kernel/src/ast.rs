//! Syntax tree for typed declaration sources.
//!
//! Only variable statements are modelled in detail. Braced blocks are kept
//! so nested declarations stay reachable; everything else is dropped by the
//! parser.

use std::ops::Range;

/// A parsed source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Module {
    pub items: Vec<Item>,
}

/// A top-level or block-level element.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// `const a: T = x, b = y;`
    Variable(VariableStatement),
    /// `{ ... }`, including function and class bodies.
    Block(Vec<Item>),
    /// A token the parser does not model.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Const,
    Let,
    Var,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableStatement {
    pub kind: DeclarationKind,
    pub declarations: Vec<VariableDeclaration>,
    pub span: Range<usize>,
}

/// One declarator: `name (: Type)? (= initializer)?`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub name: Ident,
    pub type_annotation: Option<TypeNode>,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Range<usize>,
}

/// A type annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    /// `Name`, `ns.Name`, `Name<Args>`
    Reference {
        name: EntityName,
        type_args: Vec<TypeNode>,
    },
    /// `T[]`
    Array(Box<TypeNode>),
    /// `A | B`
    Union(Vec<TypeNode>),
    /// `(T)`
    Parenthesized(Box<TypeNode>),
    /// `"literal"`
    StringLiteral(String),
}

/// A possibly qualified name, `a.b.C` nesting to the left.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityName {
    Identifier(Ident),
    Qualified { left: Box<EntityName>, right: Ident },
}

impl EntityName {
    /// The rightmost segment: `C` for `a.b.C`.
    pub fn simple_name(&self) -> &str {
        match self {
            EntityName::Identifier(ident) => &ident.name,
            EntityName::Qualified { right, .. } => &right.name,
        }
    }
}

/// An initializer expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A complete string literal; `span` covers the quotes.
    StringLiteral { value: String, span: Range<usize> },
    /// Anything else.
    Other,
}
