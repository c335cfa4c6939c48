//! pathguard command-line front end.
//!
//! ```bash
//! pathguard check src/**/*.ts
//! pathguard validate file ./assets/logo.png
//! pathguard root
//! ```

use std::collections::HashMap;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use pathguard_kernel::paths::normalize;
use pathguard_kernel::{
    get_project_root, resolve_project_root, CheckerConfig, LanguageService, PathCheckedService,
    PathChecker, PathError, PathValidator, Program, SourceProgram, SourceService,
};
use pathguard_types::{Diagnostic, DiagnosticCategory, PathKind, Severity};

/// Project-root aware path checks.
#[derive(Debug, Parser)]
#[command(name = "pathguard", version, about)]
pub struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check path-typed declarations in source files.
    Check(CheckArgs),
    /// Validate a single path string.
    Validate(ValidateArgs),
    /// Print the project root.
    Root {
        /// Directory to start from (default: current directory).
        dir: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Diagnostic severity, overriding pathguard.toml.
    #[arg(long)]
    pub severity: Option<Severity>,

    /// Require files for FilePathStr and directories for FolderPathStr.
    #[arg(long)]
    pub strict_kinds: bool,

    /// Project root (default: discovered from the current directory).
    #[arg(long)]
    pub root: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Pretty)]
    pub format: Format,

    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Annotated source snippets.
    Pretty,
    /// One line per diagnostic.
    Short,
    /// A JSON array of diagnostics.
    Json,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(value_enum)]
    pub kind: KindArg,

    pub path: String,

    /// Message used in place of the default on failure.
    #[arg(long)]
    pub message: Option<String>,

    /// Project root for the containment check.
    #[arg(long)]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    File,
    Folder,
    Any,
}

impl From<KindArg> for PathKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::File => PathKind::File,
            KindArg::Folder => PathKind::Folder,
            KindArg::Any => PathKind::Any,
        }
    }
}

/// Run a parsed command line, writing results to `out`.
///
/// Returns `Ok(false)` when the command ran but found problems.
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<bool> {
    match cli.command {
        Command::Check(args) => check(args, out),
        Command::Validate(args) => validate(args, out),
        Command::Root { dir } => {
            let root = match dir {
                Some(dir) => resolve_project_root(&dir)?,
                None => get_project_root()?,
            };
            writeln!(out, "{}", root.display())?;
            Ok(true)
        }
    }
}

fn check(args: CheckArgs, out: &mut dyn Write) -> Result<bool> {
    let root = match &args.root {
        Some(root) => normalize(&std::path::absolute(root)?),
        None => get_project_root()?,
    };

    let mut config = CheckerConfig::load(&root)?;
    if let Some(severity) = args.severity {
        config.severity = severity;
    }
    if args.strict_kinds {
        config.strict_kinds = true;
    }

    let mut program = SourceProgram::new();
    for path in &args.files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        program.add_file(display_name(&root, path), text);
    }

    let service = PathCheckedService::new(
        SourceService::new(program),
        PathChecker::with_root(config, &root),
    );

    let mut diagnostics = Vec::new();
    for name in service.file_names() {
        diagnostics.extend(service.syntactic_diagnostics(&name));
        diagnostics.extend(service.semantic_diagnostics(&name));
    }

    let texts: HashMap<String, String> = service
        .inner()
        .file_names()
        .into_iter()
        .filter_map(|name| {
            let text = service.program()?.source_file(&name)?.text().to_string();
            Some((name, text))
        })
        .collect();

    match args.format {
        Format::Pretty => {
            let color = !args.no_color && std::io::stdout().is_terminal();
            for d in &diagnostics {
                let text = d
                    .file_name
                    .as_ref()
                    .and_then(|name| texts.get(name))
                    .map(String::as_str)
                    .unwrap_or("");
                render_pretty(out, d, text, color)?;
            }
        }
        Format::Short => {
            for d in &diagnostics {
                writeln!(out, "{d}")?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &diagnostics)?;
            writeln!(out)?;
        }
    }

    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    info!(
        files = args.files.len(),
        diagnostics = diagnostics.len(),
        errors,
        "check finished"
    );
    Ok(errors == 0)
}

fn validate(args: ValidateArgs, out: &mut dyn Write) -> Result<bool> {
    let validator = match &args.root {
        Some(root) => PathValidator::with_root(std::path::absolute(root)?),
        None => PathValidator::new(),
    };

    match validator.validate(args.kind.into(), &args.path, args.message.as_deref()) {
        Ok(path) => {
            writeln!(out, "{path}")?;
            Ok(true)
        }
        Err(PathError::Root(e)) => Err(e.into()),
        Err(e) => {
            writeln!(out, "{e}")?;
            Ok(false)
        }
    }
}

/// `path` relative to `root` when it lies inside, otherwise as given.
fn display_name(root: &Path, path: &Path) -> String {
    let absolute = std::path::absolute(path)
        .map(|p| normalize(&p))
        .unwrap_or_else(|_| path.to_path_buf());
    match absolute.strip_prefix(root) {
        Ok(relative) => relative.to_string_lossy().into_owned(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

fn render_pretty(out: &mut dyn Write, d: &Diagnostic, text: &str, color: bool) -> Result<()> {
    let name = d.file_name.clone().unwrap_or_else(|| "<unknown>".to_string());
    let range = d.span.map(|s| s.start..s.end()).unwrap_or(0..0);
    let kind = match d.category {
        DiagnosticCategory::Error => ReportKind::Error,
        DiagnosticCategory::Warning => ReportKind::Warning,
        DiagnosticCategory::Suggestion | DiagnosticCategory::Message => ReportKind::Advice,
    };

    Report::build(kind, (name.clone(), range.clone()))
        .with_config(
            Config::default()
                .with_color(color)
                .with_index_type(IndexType::Byte),
        )
        .with_code(d.code)
        .with_message(&d.message)
        .with_label(Label::new((name.clone(), range)))
        .finish()
        .write((name, Source::from(text)), &mut *out)?;
    Ok(())
}
