//! Parser of slide documents into a tree of numbered sections.
//!
//! ```text
//! Title of the talk
//! Subtitle
//! 9:00 12 Feb 2015
//!
//! * First slide
//!
//! Some text.
//!
//! - a bullet
//! - another one
//!
//! ** A subsection
//!
//! .code hello.go /^func main/,/^}/
//! ```

mod context;
pub mod doc;
mod error;
mod parse;

pub use context::{Context, FsReader, ReadFile};
pub use doc::{Doc, Element, Section};
pub use error::ParseError;
pub use parse::{DirectiveFn, DirectiveTable, ParseMode, parse};
