//! Parser for typed declaration sources.
//!
//! Transforms the lexer's token stream into a [`Module`]. Uses chumsky
//! parser combinators. The grammar is deliberately tolerant: any token that
//! does not start a variable statement or a block is skipped, so arbitrary
//! surrounding code parses without errors and nested declarations stay
//! reachable.

use std::ops::Range;

use crate::ast::{
    DeclarationKind, EntityName, Expr, Ident, Item, Module, TypeNode, VariableDeclaration,
    VariableStatement,
};
use crate::lexer::{self, Token};
use chumsky::{input::ValueInput, prelude::*};

/// Span type used throughout the parser.
pub type Span = SimpleSpan;

type Extra<'tokens> = extra::Err<Rich<'tokens, Token, Span>>;

/// Parse error with location and context.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub span: Span,
    pub message: String,
}

impl ParseError {
    pub fn range(&self) -> Range<usize> {
        to_range(self.span)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {:?}", self.message, self.span)
    }
}

impl std::error::Error for ParseError {}

/// Parse source text, returning the module together with any errors.
///
/// Errors never discard the module: whatever could be recognized is kept.
pub fn parse(source: &str) -> (Module, Vec<ParseError>) {
    let (tokens, lex_errors) = lexer::tokenize(source);
    let mut errors: Vec<ParseError> = lex_errors
        .into_iter()
        .map(|e| ParseError {
            span: (e.span.start..e.span.end).into(),
            message: format!("lexer error: {}", e),
        })
        .collect();

    let tokens: Vec<(Token, Span)> = tokens
        .into_iter()
        .map(|spanned| (spanned.token, (spanned.span.start..spanned.span.end).into()))
        .collect();

    let end_span: Span = (source.len()..source.len()).into();

    let parser = module_parser();
    let (module, parse_errors) = parser
        .parse(tokens.as_slice().map(end_span, |(t, s)| (t, s)))
        .into_output_errors();

    errors.extend(parse_errors.into_iter().map(|e| ParseError {
        span: *e.span(),
        message: e.to_string(),
    }));

    (module.unwrap_or_default(), errors)
}

/// Parse source text, failing on any error.
pub fn parse_strict(source: &str) -> Result<Module, Vec<ParseError>> {
    let (module, errors) = parse(source);
    if errors.is_empty() {
        Ok(module)
    } else {
        Err(errors)
    }
}

fn to_range(span: Span) -> Range<usize> {
    span.start..span.end
}

fn prune(items: Vec<Item>) -> Vec<Item> {
    items
        .into_iter()
        .filter(|item| !matches!(item, Item::Skipped))
        .collect()
}

/// Tokens that end an initializer expression.
fn ends_expression(token: &Token) -> bool {
    matches!(
        token,
        Token::Semi
            | Token::Comma
            | Token::LBrace
            | Token::RBrace
            | Token::Const
            | Token::Let
            | Token::Var
    )
}

/// Tokens that, following a string literal, make it part of a larger
/// expression (`"a" + b`, `"a".trim()`, `"a" as T`).
fn continues_expression(token: &Token) -> bool {
    match token {
        Token::Dot
        | Token::LBracket
        | Token::LParen
        | Token::Lt
        | Token::Gt
        | Token::Pipe
        | Token::Eq
        | Token::Template => true,
        Token::Other(c) => matches!(c, '+' | '-' | '*' | '/' | '%' | '&' | '?' | '!' | '^'),
        Token::Ident(word) => matches!(word.as_str(), "as" | "satisfies" | "in" | "instanceof"),
        _ => false,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Parser Combinators - generic over input type
// ═══════════════════════════════════════════════════════════════════════════

/// Top-level module parser.
fn module_parser<'tokens, I>() -> impl Parser<'tokens, I, Module, Extra<'tokens>>
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    // An unbalanced `}` at the top level is skipped like any other token.
    let stray_close = just(Token::RBrace).to(Item::Skipped);

    choice((item_parser(), stray_close))
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(|items| Module {
            items: prune(items),
        })
}

/// Item parser: variable statement, block, or a skipped token.
fn item_parser<'tokens, I>() -> impl Parser<'tokens, I, Item, Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    recursive(|item| {
        let block = item
            .repeated()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LBrace), just(Token::RBrace))
            .map(|items| Item::Block(prune(items)));

        let skipped = any()
            .and_is(just(Token::RBrace).not())
            .to(Item::Skipped);

        choice((
            variable_statement_parser().map(Item::Variable),
            block,
            skipped,
        ))
        .boxed()
    })
}

/// Variable statement: `const a: T = x, b = y;`
fn variable_statement_parser<'tokens, I>(
) -> impl Parser<'tokens, I, VariableStatement, Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    let kind = select! {
        Token::Const => DeclarationKind::Const,
        Token::Let => DeclarationKind::Let,
        Token::Var => DeclarationKind::Var,
    };

    kind.then(
        declaration_parser()
            .separated_by(just(Token::Comma))
            .at_least(1)
            .collect::<Vec<_>>(),
    )
    .then_ignore(just(Token::Semi).or_not())
    .map_with(|(kind, declarations), e| VariableStatement {
        kind,
        declarations,
        span: to_range(e.span()),
    })
    .labelled("variable statement")
    .boxed()
}

/// Declarator: `name (: Type)? (= initializer)?`
fn declaration_parser<'tokens, I>(
) -> impl Parser<'tokens, I, VariableDeclaration, Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    ident_parser()
        .then(just(Token::Colon).ignore_then(type_parser()).or_not())
        .then(just(Token::Eq).ignore_then(initializer_parser()).or_not())
        .map(|((name, type_annotation), initializer)| VariableDeclaration {
            name,
            type_annotation,
            initializer,
        })
        .labelled("declaration")
}

/// Identifier with its span.
fn ident_parser<'tokens, I>() -> impl Parser<'tokens, I, Ident, Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    select! { Token::Ident(name) => name }
        .map_with(|name, e| Ident {
            name,
            span: to_range(e.span()),
        })
        .labelled("identifier")
}

/// Type annotation: references, arrays, unions, parentheses, string literals.
fn type_parser<'tokens, I>() -> impl Parser<'tokens, I, TypeNode, Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    recursive(|ty| {
        let entity_name = ident_parser().map(EntityName::Identifier).foldl(
            just(Token::Dot).ignore_then(ident_parser()).repeated(),
            |left, right| EntityName::Qualified {
                left: Box::new(left),
                right,
            },
        );

        let type_args = ty
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::Lt), just(Token::Gt));

        let reference = entity_name
            .then(type_args.or_not())
            .map(|(name, type_args)| TypeNode::Reference {
                name,
                type_args: type_args.unwrap_or_default(),
            });

        let literal = select! { Token::Str(value) => TypeNode::StringLiteral(value) };

        let parenthesized = ty
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .map(|inner| TypeNode::Parenthesized(Box::new(inner)));

        let array = choice((reference, literal, parenthesized)).foldl(
            just(Token::LBracket).then(just(Token::RBracket)).repeated(),
            |inner, _| TypeNode::Array(Box::new(inner)),
        );

        just(Token::Pipe)
            .or_not()
            .ignore_then(
                array
                    .separated_by(just(Token::Pipe))
                    .at_least(1)
                    .collect::<Vec<_>>(),
            )
            .map(|mut members| {
                if members.len() == 1 {
                    members.remove(0)
                } else {
                    TypeNode::Union(members)
                }
            })
            .boxed()
    })
    .labelled("type")
}

/// Initializer: a lone string literal, or anything else up to the end of
/// the expression.
fn initializer_parser<'tokens, I>() -> impl Parser<'tokens, I, Expr, Extra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    let literal = select! { Token::Str(value) => value }
        .map_with(|value, e| Expr::StringLiteral {
            value,
            span: to_range(e.span()),
        })
        .then_ignore(any().filter(continues_expression).not());

    let other = any()
        .filter(|t: &Token| !ends_expression(t))
        .repeated()
        .to(Expr::Other);

    choice((literal, other)).labelled("initializer")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declarations(source: &str) -> Vec<VariableDeclaration> {
        fn collect(items: &[Item], out: &mut Vec<VariableDeclaration>) {
            for item in items {
                match item {
                    Item::Variable(stmt) => out.extend(stmt.declarations.iter().cloned()),
                    Item::Block(inner) => collect(inner, out),
                    Item::Skipped => {}
                }
            }
        }
        let module = parse_strict(source).unwrap();
        let mut out = Vec::new();
        collect(&module.items, &mut out);
        out
    }

    fn literal(decl: &VariableDeclaration) -> Option<(&str, Range<usize>)> {
        match &decl.initializer {
            Some(Expr::StringLiteral { value, span }) => Some((value.as_str(), span.clone())),
            _ => None,
        }
    }

    fn type_name(decl: &VariableDeclaration) -> Option<&str> {
        match &decl.type_annotation {
            Some(TypeNode::Reference { name, .. }) => Some(name.simple_name()),
            _ => None,
        }
    }

    #[test]
    fn simple_typed_declaration() {
        let decls = declarations(r#"const p: FilePathStr = "src/a.ts";"#);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name.name, "p");
        assert_eq!(type_name(&decls[0]), Some("FilePathStr"));
        assert_eq!(literal(&decls[0]), Some(("src/a.ts", 23..33)));
    }

    #[test]
    fn qualified_type_name() {
        let decls = declarations(r#"let p: paths.types.FolderPathStr = "src";"#);
        match &decls[0].type_annotation {
            Some(TypeNode::Reference {
                name: EntityName::Qualified { left, right },
                ..
            }) => {
                assert_eq!(right.name, "FolderPathStr");
                assert!(matches!(left.as_ref(), EntityName::Qualified { .. }));
            }
            other => panic!("expected qualified reference, got {:?}", other),
        }
    }

    #[test]
    fn union_array_and_generics() {
        let decls = declarations(
            r#"
            const a: FilePathStr | null = "x";
            const b: FilePathStr[] = [];
            const c: Record<string, FilePathStr> = {};
            const d: (AnyPathStr) = "y";
            "#,
        );
        assert!(matches!(decls[0].type_annotation, Some(TypeNode::Union(_))));
        assert!(matches!(decls[1].type_annotation, Some(TypeNode::Array(_))));
        match &decls[2].type_annotation {
            Some(TypeNode::Reference { type_args, .. }) => assert_eq!(type_args.len(), 2),
            other => panic!("expected generic reference, got {:?}", other),
        }
        assert!(matches!(
            decls[3].type_annotation,
            Some(TypeNode::Parenthesized(_))
        ));
    }

    #[test]
    fn nested_blocks_are_reachable() {
        let decls = declarations(
            r#"
            export function load() {
                if (ready) {
                    const inner: FilePathStr = "deep.txt";
                }
            }
            class A { method() { let x: AnyPathStr = 'x'; } }
            "#,
        );
        let names: Vec<_> = decls.iter().map(|d| d.name.name.as_str()).collect();
        assert_eq!(names, vec!["inner", "x"]);
    }

    #[test]
    fn multiple_declarators() {
        let decls = declarations(r#"var a: FilePathStr = "a", b = 1, c: FolderPathStr = "c";"#);
        let names: Vec<_> = decls.iter().map(|d| d.name.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(literal(&decls[2]).map(|(v, _)| v), Some("c"));
    }

    #[test]
    fn statements_without_semicolons() {
        let decls = declarations(
            "const a: FilePathStr = \"a.txt\"\nconst b: FilePathStr = \"b.txt\"\nfoo()\n",
        );
        assert_eq!(decls.len(), 2);
        assert_eq!(literal(&decls[0]).map(|(v, _)| v), Some("a.txt"));
        assert_eq!(literal(&decls[1]).map(|(v, _)| v), Some("b.txt"));
    }

    #[test]
    fn compound_initializers_are_not_literals() {
        let decls = declarations(
            r#"
            const a: FilePathStr = "a" + suffix;
            const b: FilePathStr = "b".trim();
            const c: FilePathStr = "c" as FilePathStr;
            const d: FilePathStr = `d`;
            const e: FilePathStr = join("e");
            "#,
        );
        assert_eq!(decls.len(), 5);
        for decl in &decls {
            assert_eq!(decl.initializer, Some(Expr::Other), "{}", decl.name.name);
        }
    }

    #[test]
    fn declaration_without_initializer() {
        let decls = declarations("let later: FilePathStr;");
        assert_eq!(decls.len(), 1);
        assert!(decls[0].initializer.is_none());
    }

    #[test]
    fn foreign_syntax_parses_without_errors() {
        let source = r#"
            import { FilePathStr } from "pathguard";
            @decorator() class X<T> extends Y { #priv = 1; }
            const { a, b } = obj;
            type Alias = FilePathStr;
            }
            const ok: FilePathStr = "ok.txt";
        "#;
        let (module, errors) = parse(source);
        assert!(errors.is_empty(), "errors: {errors:?}");
        assert!(!module.items.is_empty());
        let decls = declarations(source);
        assert_eq!(decls.last().map(|d| d.name.name.as_str()), Some("ok"));
    }

    #[test]
    fn unbalanced_open_brace_is_tolerated() {
        let decls = declarations(r#"function f() { const p: FilePathStr = "p.txt";"#);
        assert_eq!(decls.len(), 1);
    }

    #[test]
    fn empty_source() {
        let (module, errors) = parse("");
        assert!(module.items.is_empty());
        assert!(errors.is_empty());
    }
}
