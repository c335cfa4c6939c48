//! Static path checking.
//!
//! The checker walks each source file for declarations annotated with one of
//! the marker types (`FilePathStr`, `FolderPathStr`, `AnyPathStr`) and
//! initialized with a string literal. Each literal must:
//!
//! - contain none of `< > : " | ? *` and no control characters
//! - resolve inside the project root (relative literals resolve against it)
//! - exist on disk, and with `strict_kinds` be the right kind of entry
//!
//! Failures become [`Diagnostic`]s; nothing is thrown. Filesystem errors
//! count as "does not exist".
//!
//! # Example
//!
//! ```ignore
//! use pathguard_kernel::{CheckerConfig, PathChecker, SourceFile};
//!
//! let checker = PathChecker::new(CheckerConfig::default())?;
//! let file = SourceFile::parse("main.ts", r#"const p: FilePathStr = "src/missing.ts";"#);
//! for diagnostic in checker.check_source_file(&file) {
//!     println!("{diagnostic}");
//! }
//! ```

mod walker;

use std::path::{Component, Path, PathBuf};

use pathguard_types::{Diagnostic, PathKind, TextSpan};
use tracing::{debug, trace};

use crate::config::CheckerConfig;
use crate::paths::{normalize, relative_path};
use crate::program::{Program, SourceFile};
use crate::root::{get_project_root, RootError};
use crate::validate::has_invalid_characters;

pub use walker::{declared_type_name, path_declarations, PathDeclaration};

/// Code carried by every path diagnostic.
pub const PATH_DIAGNOSTIC_CODE: u32 = 9999;

/// Why a literal was rejected. Only logged; the diagnostic text is the same
/// for every reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathProblem {
    InvalidCharacters,
    EscapesRoot,
    Missing,
    WrongKind,
}

/// Checks path-typed declarations against the filesystem.
#[derive(Debug, Clone)]
pub struct PathChecker {
    config: CheckerConfig,
    root: PathBuf,
}

impl PathChecker {
    /// Create a checker rooted at the working directory's project root.
    pub fn new(config: CheckerConfig) -> Result<Self, RootError> {
        Ok(Self::with_root(config, get_project_root()?))
    }

    /// Create a checker with a known project root.
    pub fn with_root(config: CheckerConfig, root: impl Into<PathBuf>) -> Self {
        let root = normalize(&root.into());
        debug!(root = %root.display(), severity = %config.severity, "path checker ready");
        Self { config, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Diagnostics for every file of `program`, in program order.
    pub fn check_program<P: Program + ?Sized>(&self, program: &P) -> Vec<Diagnostic> {
        program
            .source_files()
            .into_iter()
            .flat_map(|file| self.check_source_file(file))
            .collect()
    }

    /// Diagnostics for one file, in source order.
    pub fn check_source_file(&self, file: &SourceFile) -> Vec<Diagnostic> {
        path_declarations(file.module())
            .into_iter()
            .filter_map(|decl| {
                let problem = self.check_path(decl.kind, decl.value).err()?;
                debug!(
                    file = file.file_name(),
                    name = decl.name,
                    value = decl.value,
                    ?problem,
                    "invalid path literal"
                );
                Some(self.diagnostic(file, &decl))
            })
            .collect()
    }

    /// Validate a single literal, returning its resolved absolute path.
    pub fn check_path(&self, kind: PathKind, value: &str) -> Result<PathBuf, PathProblem> {
        if has_invalid_characters(value) {
            return Err(PathProblem::InvalidCharacters);
        }

        let candidate = Path::new(value);
        let resolved = if candidate.is_absolute() {
            normalize(candidate)
        } else {
            normalize(&self.root.join(candidate))
        };

        let relative = relative_path(&self.root, &resolved);
        if relative.is_absolute() || relative.components().next() == Some(Component::ParentDir) {
            return Err(PathProblem::EscapesRoot);
        }

        let metadata = match std::fs::metadata(&resolved) {
            Ok(metadata) => metadata,
            Err(e) => {
                trace!(path = %resolved.display(), error = %e, "probe failed");
                return Err(PathProblem::Missing);
            }
        };

        if self.config.strict_kinds {
            let matches = match kind {
                PathKind::File => metadata.is_file(),
                PathKind::Folder => metadata.is_dir(),
                PathKind::Any => true,
            };
            if !matches {
                return Err(PathProblem::WrongKind);
            }
        }

        Ok(resolved)
    }

    fn diagnostic(&self, file: &SourceFile, decl: &PathDeclaration<'_>) -> Diagnostic {
        Diagnostic {
            category: self.config.severity.category(),
            code: PATH_DIAGNOSTIC_CODE,
            message: format!(
                "Invalid path: \"{}\" does not exist or is not accessible",
                decl.value
            ),
            file_name: Some(file.file_name().to_string()),
            span: Some(TextSpan::from(decl.span.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathguard_types::{DiagnosticCategory, Severity};
    use rstest::rstest;
    use std::fs;

    struct Fixture {
        dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::write(dir.path().join("package.json"), "{}").unwrap();
            fs::create_dir_all(dir.path().join("src/nested")).unwrap();
            fs::write(dir.path().join("src/index.ts"), "").unwrap();
            Self { dir }
        }

        fn checker(&self, config: CheckerConfig) -> PathChecker {
            PathChecker::with_root(config, self.dir.path())
        }

        fn check(&self, config: CheckerConfig, source: &str) -> Vec<Diagnostic> {
            let file = SourceFile::parse("input.ts", source);
            self.checker(config).check_source_file(&file)
        }
    }

    #[test]
    fn existing_file_is_clean() {
        let fx = Fixture::new();
        let diags = fx.check(
            CheckerConfig::default(),
            r#"const p: FilePathStr = "src/index.ts";"#,
        );
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn missing_file_is_reported() {
        let fx = Fixture::new();
        let source = r#"const p: FilePathStr = "src/does-not-exist.ts";"#;
        let diags = fx.check(CheckerConfig::default(), source);

        assert_eq!(diags.len(), 1);
        let d = &diags[0];
        assert_eq!(d.category, DiagnosticCategory::Error);
        assert_eq!(d.code, PATH_DIAGNOSTIC_CODE);
        assert_eq!(
            d.message,
            "Invalid path: \"src/does-not-exist.ts\" does not exist or is not accessible"
        );
        assert_eq!(d.file_name.as_deref(), Some("input.ts"));

        let span = d.span.unwrap();
        assert_eq!(&source[span.start..span.end()], "\"src/does-not-exist.ts\"");
    }

    #[test]
    fn folder_existing_and_missing() {
        let fx = Fixture::new();
        let clean = fx.check(
            CheckerConfig::default(),
            r#"const d: FolderPathStr = "src/nested";"#,
        );
        assert!(clean.is_empty());

        let missing = fx.check(
            CheckerConfig::default(),
            r#"const d: FolderPathStr = "src/absent";"#,
        );
        assert_eq!(missing.len(), 1);
    }

    #[test]
    fn plain_string_never_reported() {
        let fx = Fixture::new();
        let diags = fx.check(
            CheckerConfig::default(),
            r#"const p: string = "src/does-not-exist.ts";"#,
        );
        assert!(diags.is_empty());
    }

    #[rstest]
    #[case(Severity::Error, DiagnosticCategory::Error)]
    #[case(Severity::Warn, DiagnosticCategory::Warning)]
    #[case(Severity::Off, DiagnosticCategory::Message)]
    fn severity_only_changes_category(
        #[case] severity: Severity,
        #[case] category: DiagnosticCategory,
    ) {
        let fx = Fixture::new();
        let source = r#"const p: FilePathStr = "nope.ts"; const q: AnyPathStr = "nope/";"#;
        let baseline = fx.check(CheckerConfig::default(), source);
        let diags = fx.check(CheckerConfig::default().with_severity(severity), source);

        assert_eq!(diags.len(), baseline.len());
        for (d, b) in diags.iter().zip(&baseline) {
            assert_eq!(d.category, category);
            assert_eq!(d.message, b.message);
            assert_eq!(d.span, b.span);
        }
    }

    #[test]
    fn forbidden_character_is_reported() {
        let fx = Fixture::new();
        let diags = fx.check(
            CheckerConfig::default(),
            r#"const p: FilePathStr = "src/file<bad>.txt";"#,
        );
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("src/file<bad>.txt"));
        assert_eq!(
            fx.checker(CheckerConfig::default())
                .check_path(PathKind::File, "src/file<bad>.txt"),
            Err(PathProblem::InvalidCharacters)
        );
    }

    #[test]
    fn escaping_paths_are_reported() {
        let fx = Fixture::new();
        let checker = fx.checker(CheckerConfig::default());
        assert_eq!(
            checker.check_path(PathKind::Any, "../outside"),
            Err(PathProblem::EscapesRoot)
        );
        assert_eq!(
            checker.check_path(PathKind::Any, "/"),
            Err(PathProblem::EscapesRoot)
        );
    }

    #[test]
    fn absolute_path_inside_root_is_accepted() {
        let fx = Fixture::new();
        let checker = fx.checker(CheckerConfig::default());
        let absolute = fx.dir.path().join("src/index.ts");
        let resolved = checker
            .check_path(PathKind::File, &absolute.to_string_lossy())
            .unwrap();
        assert_eq!(resolved, normalize(&absolute));
    }

    #[test]
    fn root_itself_is_inside() {
        let fx = Fixture::new();
        let checker = fx.checker(CheckerConfig::default());
        assert!(checker.check_path(PathKind::Folder, ".").is_ok());
        assert!(checker.check_path(PathKind::Folder, "").is_ok());
    }

    #[test]
    fn existence_only_by_default() {
        let fx = Fixture::new();
        let diags = fx.check(
            CheckerConfig::default(),
            r#"const f: FilePathStr = "src/nested"; const d: FolderPathStr = "src/index.ts";"#,
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn strict_kinds_checks_entry_type() {
        let fx = Fixture::new();
        let checker = fx.checker(CheckerConfig::default().with_strict_kinds(true));
        assert_eq!(
            checker.check_path(PathKind::File, "src/nested"),
            Err(PathProblem::WrongKind)
        );
        assert_eq!(
            checker.check_path(PathKind::Folder, "src/index.ts"),
            Err(PathProblem::WrongKind)
        );
        assert!(checker.check_path(PathKind::File, "src/index.ts").is_ok());
        assert!(checker.check_path(PathKind::Folder, "src/nested").is_ok());
        assert!(checker.check_path(PathKind::Any, "src/nested").is_ok());
        assert!(checker.check_path(PathKind::Any, "src/index.ts").is_ok());
    }

    #[test]
    fn diagnostics_follow_source_order() {
        let fx = Fixture::new();
        let source = r#"
            const a: FilePathStr = "first-missing";
            const ok: FilePathStr = "src/index.ts";
            function f() { const b: FolderPathStr = "second-missing"; }
        "#;
        let diags = fx.check(CheckerConfig::default(), source);
        assert_eq!(diags.len(), 2);
        assert!(diags[0].message.contains("first-missing"));
        assert!(diags[1].message.contains("second-missing"));
        assert!(diags[0].span.unwrap().start < diags[1].span.unwrap().start);
    }

    #[test]
    fn check_program_covers_all_files() {
        let fx = Fixture::new();
        let mut program = crate::program::SourceProgram::new();
        program.add_file("a.ts", r#"const a: FilePathStr = "missing-a";"#);
        program.add_file("b.ts", r#"const b: FilePathStr = "src/index.ts";"#);
        program.add_file("c.ts", r#"const c: FilePathStr = "missing-c";"#);

        let diags = fx.checker(CheckerConfig::default()).check_program(&program);
        let files: Vec<_> = diags.iter().filter_map(|d| d.file_name.as_deref()).collect();
        assert_eq!(files, vec!["a.ts", "c.ts"]);
    }

    #[test]
    fn rejects_the_same_characters_as_runtime_validation() {
        let fx = Fixture::new();
        let checker = fx.checker(CheckerConfig::default());
        let validator = crate::validate::PathValidator::with_root(fx.dir.path());

        let mut rejected = 0;
        for c in '\0'..='\u{7f}' {
            let candidate = format!("a{c}b");
            let static_rejects =
                checker.check_path(PathKind::Any, &candidate) == Err(PathProblem::InvalidCharacters);
            let runtime_rejects = matches!(
                validator.any(&candidate, None),
                Err(crate::validate::PathError::InvalidCharacters { .. })
            );
            assert_eq!(static_rejects, runtime_rejects, "disagree on {c:?}");
            rejected += usize::from(static_rejects);
        }
        assert_eq!(rejected, 32 + crate::validate::INVALID_CHARACTERS.len());
    }
}
