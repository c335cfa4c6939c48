//! Checker test file parser and runner.
//!
//! ```text
//! # test: missing_file
//! # fixtures: assets/logo.png, src/
//! # severity: warn
//! # strict: true
//! ---
//! const p: FilePathStr = "assets/nope.png";
//! ---
//! warning: Invalid path: "assets/nope.png" does not exist or is not accessible
//! ===
//! ```
//!
//! Fixtures ending in `/` are created as directories, everything else as
//! empty files. `severity` and `strict` are optional. The expected block
//! holds one `category: message` line per diagnostic, in order; an empty
//! block means no diagnostics.

use std::path::Path;

use pathguard_kernel::{CheckerConfig, PathChecker, Severity, SourceFile};

use crate::{TestResult, TestSummary};

/// A single checker test case.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckerTestCase {
    pub name: String,
    /// Line of the `# test:` header (1-indexed).
    pub line_number: usize,
    /// Entries to create under the project root.
    pub fixtures: Vec<String>,
    /// Raw `# severity:` value, if given.
    pub severity: Option<String>,
    pub strict_kinds: bool,
    pub input: String,
    pub expected: Vec<String>,
}

/// Parse the `*.test` format into cases.
pub fn parse_checker_tests(content: &str) -> Vec<CheckerTestCase> {
    let lines: Vec<&str> = content.lines().collect();
    let mut cases = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(name) = lines[i].trim().strip_prefix("# test:") else {
            i += 1;
            continue;
        };
        let mut case = CheckerTestCase {
            name: name.trim().to_string(),
            line_number: i + 1,
            fixtures: Vec::new(),
            severity: None,
            strict_kinds: false,
            input: String::new(),
            expected: Vec::new(),
        };
        i += 1;

        while i < lines.len() && lines[i].trim() != "---" {
            let line = lines[i].trim();
            if let Some(list) = line.strip_prefix("# fixtures:") {
                case.fixtures = list
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
            } else if let Some(severity) = line.strip_prefix("# severity:") {
                case.severity = Some(severity.trim().to_string());
            } else if let Some(strict) = line.strip_prefix("# strict:") {
                case.strict_kinds = strict.trim() == "true";
            }
            i += 1;
        }
        i += 1;

        let mut input = Vec::new();
        while i < lines.len() && lines[i].trim() != "---" {
            input.push(lines[i]);
            i += 1;
        }
        i += 1;

        while i < lines.len() && lines[i].trim() != "===" {
            let line = lines[i].trim();
            if !line.is_empty() {
                case.expected.push(line.to_string());
            }
            i += 1;
        }
        i += 1;

        case.input = input.join("\n");
        cases.push(case);
    }

    cases
}

impl CheckerTestCase {
    /// Build the fixture tree in a fresh project and check the input there.
    pub fn run(&self) -> TestResult {
        let config = match self.config() {
            Ok(config) => config,
            Err(message) => return TestResult::Error { message },
        };
        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => {
                return TestResult::Error {
                    message: format!("tempdir: {e}"),
                };
            }
        };
        if let Err(e) = self.create_fixtures(dir.path()) {
            return TestResult::Error {
                message: format!("fixtures: {e}"),
            };
        }

        let checker = PathChecker::with_root(config, dir.path());
        let file = SourceFile::parse(format!("{}.ts", self.name), self.input.as_str());
        let actual: Vec<String> = checker
            .check_source_file(&file)
            .iter()
            .map(|d| format!("{}: {}", d.category, d.message))
            .collect();

        if actual == self.expected {
            TestResult::Pass
        } else {
            TestResult::Fail {
                expected: self.expected.join("\n"),
                actual: actual.join("\n"),
            }
        }
    }

    fn config(&self) -> Result<CheckerConfig, String> {
        let severity = match &self.severity {
            Some(s) => s.parse::<Severity>().map_err(|e| e.to_string())?,
            None => Severity::default(),
        };
        Ok(CheckerConfig::default()
            .with_severity(severity)
            .with_strict_kinds(self.strict_kinds))
    }

    fn create_fixtures(&self, root: &Path) -> std::io::Result<()> {
        std::fs::write(root.join("package.json"), "{}")?;
        for fixture in &self.fixtures {
            let path = root.join(fixture);
            if fixture.ends_with('/') {
                std::fs::create_dir_all(&path)?;
            } else {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, "")?;
            }
        }
        Ok(())
    }
}

/// Run all cases and summarize.
pub fn run_checker_tests(cases: &[CheckerTestCase]) -> TestSummary {
    let mut summary = TestSummary::new();
    for case in cases {
        summary.record(&case.name, case.line_number, case.run());
    }
    summary
}
