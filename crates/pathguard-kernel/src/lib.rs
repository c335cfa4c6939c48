//! pathguard-kernel: the core of pathguard.
//!
//! This crate provides:
//!
//! - **Root**: project-root discovery by walking up to a marker file
//! - **Validate**: runtime checks for path strings (characters, containment)
//! - **Lexer / Parser / AST**: a tolerant front end for typed declarations
//! - **Checker**: static analysis of `FilePathStr`-style declarations
//! - **Service / Plugin**: a language-service decorator that merges in
//!   the checker's diagnostics

pub mod ast;
pub mod checker;
pub mod config;
pub mod lexer;
pub mod parser;
pub mod paths;
pub mod plugin;
pub mod program;
pub mod root;
pub mod service;
pub mod validate;

pub use checker::{PathChecker, PATH_DIAGNOSTIC_CODE};
pub use config::{CheckerConfig, ConfigError};
pub use pathguard_types::{Diagnostic, DiagnosticCategory, PathKind, Severity, TextSpan};
pub use plugin::{init, PathPlugin, PluginCreateInfo, PluginError};
pub use program::{Program, SourceFile, SourceProgram};
pub use root::{get_project_root, is_project_root, resolve_project_root, RootError, PROJECT_MARKERS};
pub use service::{LanguageService, PathCheckedService, SourceService, SYNTAX_DIAGNOSTIC_CODE};
pub use validate::{validate_any, validate_file, validate_folder, PathError, PathValidator};
