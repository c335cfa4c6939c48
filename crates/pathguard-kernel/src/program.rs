//! Programs and source files.
//!
//! [`Program`] is the seam to whatever front end supplies syntax trees. The
//! checker only needs to enumerate files and look one up by name.
//! [`SourceProgram`] is the in-memory implementation backed by this crate's
//! parser.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::ast::Module;
use crate::parser::{parse, ParseError};

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    file_name: String,
    text: String,
    module: Module,
    parse_errors: Vec<ParseError>,
}

impl SourceFile {
    /// Parse `text` as the contents of `file_name`.
    pub fn parse(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let text = text.into();
        let (module, parse_errors) = parse(&text);
        if !parse_errors.is_empty() {
            debug!(file = %file_name, errors = parse_errors.len(), "parsed with errors");
        }
        Self {
            file_name,
            text,
            module,
            parse_errors,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn parse_errors(&self) -> &[ParseError] {
        &self.parse_errors
    }
}

/// A collection of source files available for analysis.
pub trait Program {
    /// All source files, in program order.
    fn source_files(&self) -> Vec<&SourceFile>;

    /// Look up a file by name.
    fn source_file(&self, file_name: &str) -> Option<&SourceFile> {
        self.source_files()
            .into_iter()
            .find(|file| file.file_name() == file_name)
    }
}

/// In-memory program: an ordered set of parsed files, unique by name.
#[derive(Debug, Clone, Default)]
pub struct SourceProgram {
    files: Vec<SourceFile>,
}

impl SourceProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse each path. File names are the paths as given.
    pub fn load<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> io::Result<Self> {
        let mut program = Self::new();
        for path in paths {
            let path = path.as_ref();
            let text = std::fs::read_to_string(path)?;
            program.add_file(path.to_string_lossy(), text);
        }
        Ok(program)
    }

    /// Parse and add a file, replacing any file with the same name.
    pub fn add_file(&mut self, file_name: impl Into<String>, text: impl Into<String>) -> &SourceFile {
        self.add(SourceFile::parse(file_name, text))
    }

    /// Add a parsed file, replacing any file with the same name.
    pub fn add(&mut self, file: SourceFile) -> &SourceFile {
        let index = match self
            .files
            .iter()
            .position(|f| f.file_name() == file.file_name())
        {
            Some(index) => {
                self.files[index] = file;
                index
            }
            None => {
                self.files.push(file);
                self.files.len() - 1
            }
        };
        &self.files[index]
    }

    /// Remove a file by name, returning it if present.
    pub fn remove(&mut self, file_name: &str) -> Option<SourceFile> {
        let index = self.files.iter().position(|f| f.file_name() == file_name)?;
        Some(self.files.remove(index))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Program for SourceProgram {
    fn source_files(&self) -> Vec<&SourceFile> {
        self.files.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_replaces_same_name() {
        let mut program = SourceProgram::new();
        program.add_file("a.ts", "const a = 1;");
        program.add_file("b.ts", "");
        program.add_file("a.ts", "const a = 2;");

        assert_eq!(program.len(), 2);
        let names: Vec<_> = program.source_files().iter().map(|f| f.file_name()).collect();
        assert_eq!(names, vec!["a.ts", "b.ts"]);
        assert_eq!(program.source_file("a.ts").unwrap().text(), "const a = 2;");
    }

    #[test]
    fn lookup_missing_file() {
        let program = SourceProgram::new();
        assert!(program.source_file("nope.ts").is_none());
        assert!(program.is_empty());
    }

    #[test]
    fn remove_file() {
        let mut program = SourceProgram::new();
        program.add_file("a.ts", "");
        assert!(program.remove("a.ts").is_some());
        assert!(program.remove("a.ts").is_none());
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.ts");
        std::fs::write(&path, "let x: AnyPathStr = \"x\";").unwrap();

        let program = SourceProgram::load([&path]).unwrap();
        let file = program.source_file(&path.to_string_lossy()).unwrap();
        assert_eq!(file.module().items.len(), 1);
        assert!(file.parse_errors().is_empty());
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(SourceProgram::load(["/definitely/not/here.ts"]).is_err());
    }
}
