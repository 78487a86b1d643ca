//! Slide document parser.
//!
//! A document starts with a header block of title, subtitle, time, cover and
//! speaker notes, followed by free text up to the first heading and the
//! sections. Headings are asterisks followed by a space, the number of
//! asterisks being the depth of the section.

mod common;
mod directive;
mod header;
mod lines;
mod section;

pub use directive::{DirectiveFn, DirectiveTable};
use header::{parse_header, parse_misc};
use lines::Lines;
use section::parse_sections;
use tracing::instrument;

use crate::{context::Context, doc::Doc, error::ParseError};

/// How much of a document to parse.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    #[default]
    Full,
    /// Parse only the header, e.g. for listing documents by title.
    TitlesOnly,
}

/// Parses the document `input` named `name`. The name is used in error
/// messages and to resolve files referenced by directives.
#[instrument(skip(input, ctx), fields(len = input.len()))]
pub fn parse(input: &str, name: &str, mode: ParseMode, ctx: &Context) -> Result<Doc, ParseError> {
    let mut lines = Lines::new(input);
    let mut doc = Doc::default();

    parse_header(&mut doc, &mut lines)?;

    if mode == ParseMode::TitlesOnly {
        return Ok(doc);
    }

    doc.misc = parse_misc(&mut lines);
    doc.sections = parse_sections(ctx, name, &mut lines, &[])?;

    Ok(doc)
}
