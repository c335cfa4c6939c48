//! Language services and the path-checking decorator.
//!
//! [`LanguageService`] is the capability set a host exposes: access to the
//! current program plus per-file diagnostics. [`PathCheckedService`] wraps any
//! implementation, appending the checker's findings to the semantic
//! diagnostics and delegating everything else untouched.

use pathguard_types::{Diagnostic, DiagnosticCategory, TextSpan};
use tracing::warn;

use crate::checker::PathChecker;
use crate::program::{Program, SourceProgram};

/// Code for syntax errors reported by [`SourceService`].
pub const SYNTAX_DIAGNOSTIC_CODE: u32 = 1002;

/// A diagnostics-producing service over a program.
pub trait LanguageService {
    type Program: Program;

    /// The current program, if one has been built.
    fn program(&self) -> Option<&Self::Program>;

    /// Names of the files the service knows about.
    fn file_names(&self) -> Vec<String>;

    /// Syntax errors for one file.
    fn syntactic_diagnostics(&self, file_name: &str) -> Vec<Diagnostic>;

    /// Semantic findings for one file.
    fn semantic_diagnostics(&self, file_name: &str) -> Vec<Diagnostic>;
}

/// Language service over an in-memory [`SourceProgram`].
///
/// Semantic diagnostics are empty; only the decorator adds findings.
#[derive(Debug, Clone, Default)]
pub struct SourceService {
    program: SourceProgram,
}

impl SourceService {
    pub fn new(program: SourceProgram) -> Self {
        Self { program }
    }

    /// Add or replace a file.
    pub fn update_file(&mut self, file_name: impl Into<String>, text: impl Into<String>) {
        self.program.add_file(file_name, text);
    }

    pub fn program_mut(&mut self) -> &mut SourceProgram {
        &mut self.program
    }
}

impl LanguageService for SourceService {
    type Program = SourceProgram;

    fn program(&self) -> Option<&SourceProgram> {
        Some(&self.program)
    }

    fn file_names(&self) -> Vec<String> {
        self.program
            .source_files()
            .into_iter()
            .map(|f| f.file_name().to_string())
            .collect()
    }

    fn syntactic_diagnostics(&self, file_name: &str) -> Vec<Diagnostic> {
        let Some(file) = self.program.source_file(file_name) else {
            return Vec::new();
        };
        file.parse_errors()
            .iter()
            .map(|e| Diagnostic {
                category: DiagnosticCategory::Error,
                code: SYNTAX_DIAGNOSTIC_CODE,
                message: e.message.clone(),
                file_name: Some(file_name.to_string()),
                span: Some(TextSpan::from(e.range())),
            })
            .collect()
    }

    fn semantic_diagnostics(&self, _file_name: &str) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Decorator that adds path diagnostics to a wrapped service.
///
/// `semantic_diagnostics` returns the wrapped service's diagnostics followed
/// by the checker's. Every other method forwards to the wrapped service.
#[derive(Debug, Clone)]
pub struct PathCheckedService<S> {
    inner: S,
    checker: PathChecker,
}

impl<S: LanguageService> PathCheckedService<S> {
    pub fn new(inner: S, checker: PathChecker) -> Self {
        Self { inner, checker }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    pub fn checker(&self) -> &PathChecker {
        &self.checker
    }

    fn path_diagnostics(&self, file_name: &str) -> Vec<Diagnostic> {
        let Some(program) = self.inner.program() else {
            return Vec::new();
        };
        match program.source_file(file_name) {
            Some(file) => self.checker.check_source_file(file),
            None => {
                warn!(file = file_name, "file is not part of the program");
                Vec::new()
            }
        }
    }
}

impl<S: LanguageService> LanguageService for PathCheckedService<S> {
    type Program = S::Program;

    fn program(&self) -> Option<&Self::Program> {
        self.inner.program()
    }

    fn file_names(&self) -> Vec<String> {
        self.inner.file_names()
    }

    fn syntactic_diagnostics(&self, file_name: &str) -> Vec<Diagnostic> {
        self.inner.syntactic_diagnostics(file_name)
    }

    fn semantic_diagnostics(&self, file_name: &str) -> Vec<Diagnostic> {
        let mut diagnostics = self.inner.semantic_diagnostics(file_name);
        diagnostics.extend(self.path_diagnostics(file_name));
        diagnostics
    }
}
