mod code;
mod html;
mod link;
mod media;

use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};

use crate::{context::Context, doc::Element};

/// Parses a directive line into an element. Receives the document name, the
/// 1-based line number and the whole line including the directive name.
pub type DirectiveFn = fn(&Context, &str, usize, &str) -> Result<Element>;

/// Directive parsers by name, the name being written without the leading
/// period. `.background` is handled by the section parser and cannot be
/// overridden.
#[derive(Clone)]
pub struct DirectiveTable {
    parsers: HashMap<String, DirectiveFn>,
}

impl DirectiveTable {
    /// Table without any directives.
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Adds a directive, returning the parser it replaces.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        parser: DirectiveFn,
    ) -> Option<DirectiveFn> {
        self.parsers.insert(name.into(), parser)
    }

    pub fn remove(&mut self, name: &str) -> Option<DirectiveFn> {
        self.parsers.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<DirectiveFn> {
        self.parsers.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(String::as_str)
    }
}

/// Table of the built-in directives.
impl Default for DirectiveTable {
    fn default() -> Self {
        let mut table = Self::empty();

        table.register("code", code::parse_code);
        table.register("play", code::parse_code);
        table.register("link", link::parse_link);
        table.register("iframe", media::parse_iframe);
        table.register("image", media::parse_image);
        table.register("video", media::parse_video);
        table.register("html", html::parse_html);
        table.register("caption", html::parse_caption);

        table
    }
}

impl fmt::Debug for DirectiveTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("DirectiveTable")
            .field("names", &names)
            .finish()
    }
}

/// Path of a file referenced by the document `doc_name`, relative to the
/// document directory.
fn resolve_path(doc_name: &str, file: &str) -> String {
    Path::new(doc_name)
        .parent()
        .map_or_else(|| PathBuf::from(file), |dir| dir.join(file))
        .to_string_lossy()
        .into_owned()
}

/// Whitespace separated arguments after the directive name.
fn arguments(text: &str) -> Vec<&str> {
    text.split_whitespace().skip(1).collect()
}

fn read_text(ctx: &Context, doc_name: &str, file: &str) -> Result<String> {
    let bytes = ctx.read_file(&resolve_path(doc_name, file))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(_) => bail!("{file} is not valid UTF-8"),
    }
}
