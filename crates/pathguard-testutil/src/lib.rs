//! Test utilities for pathguard.
//!
//! Provides the parser and runner for `tests/checker/*.test`: source snippets
//! checked against a throwaway project tree, with the expected diagnostics
//! written out one per line.

pub mod checker;

use std::fmt;

/// The result of running a single test case.
#[derive(Debug, Clone)]
pub enum TestResult {
    Pass,
    /// Expected vs actual mismatch.
    Fail { expected: String, actual: String },
    /// The case could not be run at all.
    Error { message: String },
}

impl TestResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass)
    }
}

/// A single failure with the case name and the line it starts on.
#[derive(Debug, Clone)]
pub struct TestFailure {
    pub name: String,
    pub line: usize,
    pub result: TestResult,
}

/// Summary of running multiple test cases.
#[derive(Debug, Default)]
pub struct TestSummary {
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub failures: Vec<TestFailure>,
}

impl TestSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, line: usize, result: TestResult) {
        match result {
            TestResult::Pass => {
                self.passed += 1;
                return;
            }
            TestResult::Fail { .. } => self.failed += 1,
            TestResult::Error { .. } => self.errors += 1,
        }
        self.failures.push(TestFailure {
            name: name.into(),
            line,
            result,
        });
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errors
    }

    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for TestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} cases: {} passed, {} failed, {} errors",
            self.total(),
            self.passed,
            self.failed,
            self.errors
        )?;
        for failure in &self.failures {
            writeln!(f, "\n  {} (line {})", failure.name, failure.line)?;
            match &failure.result {
                TestResult::Fail { expected, actual } => {
                    writeln!(f, "    expected:")?;
                    for line in expected.lines() {
                        writeln!(f, "      {line}")?;
                    }
                    writeln!(f, "    actual:")?;
                    for line in actual.lines() {
                        writeln!(f, "      {line}")?;
                    }
                }
                TestResult::Error { message } => writeln!(f, "    error: {message}")?,
                TestResult::Pass => {}
            }
        }
        Ok(())
    }
}
