//! Supporting context of a parse call.

use std::{fs, path::Path};

use anyhow::{Context as _, Result};

use crate::{
    doc::Doc,
    error::ParseError,
    parse::{self, DirectiveTable, ParseMode},
};

/// Capability to read files referenced by a document, e.g. source snippets of
/// `.code` directives.
pub trait ReadFile: Send + Sync {
    fn read_file(&self, name: &str) -> Result<Vec<u8>>;
}

impl<F> ReadFile for F
where
    F: Fn(&str) -> Result<Vec<u8>> + Send + Sync,
{
    fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        self(name)
    }
}

/// Reads files from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl ReadFile for FsReader {
    fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let path = Path::new(name);
        fs::read(path).with_context(|| format!("unable to read {}", path.display()))
    }
}

/// Everything a parse call needs besides the input: the file reader and the
/// table of directives.
pub struct Context<'r> {
    reader: Box<dyn ReadFile + 'r>,
    directives: DirectiveTable,
}

impl<'r> Context<'r> {
    /// Context with the built-in directives.
    pub fn new(reader: impl ReadFile + 'r) -> Self {
        Self::with_directives(reader, DirectiveTable::default())
    }

    pub fn with_directives(reader: impl ReadFile + 'r, directives: DirectiveTable) -> Self {
        Self {
            reader: Box::new(reader),
            directives,
        }
    }

    pub fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        self.reader.read_file(name)
    }

    pub fn directives(&self) -> &DirectiveTable {
        &self.directives
    }

    pub fn directives_mut(&mut self) -> &mut DirectiveTable {
        &mut self.directives
    }

    /// Parses a document named `name` for error reporting and relative file
    /// resolution.
    pub fn parse(&self, input: &str, name: &str, mode: ParseMode) -> Result<Doc, ParseError> {
        parse::parse(input, name, mode, self)
    }
}

impl Default for Context<'_> {
    fn default() -> Self {
        Self::new(FsReader)
    }
}
