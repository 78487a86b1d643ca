//! Parsed slide documents.

mod element;

use std::fmt;

use chrono::{DateTime, Utc};
use itertools::Itertools;

pub use element::{
    Caption, Code, CodeBuilder, CodeBuilderError, CodeLine, Element, Html, Iframe, Image, Link,
    List, Text, Video,
};

/// An entire document: the title header followed by numbered sections.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Doc {
    pub title: String,
    pub subtitle: String,
    pub time: Option<DateTime<Utc>>,
    pub title_notes: Vec<String>,
    pub cover: Option<String>,
    pub misc: Vec<String>,
    pub sections: Vec<Section>,
}

/// A section of a document (a presentation slide) opened by a heading line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Section {
    /// Position in the sections tree, e.g. `[2, 1]` is subsection 1 of
    /// section 2. Its length is the heading depth.
    pub number: Vec<usize>,
    pub title: String,
    pub elements: Vec<Element>,
    /// Speaker notes.
    pub notes: Vec<String>,
    pub classes: Vec<String>,
    pub styles: Vec<String>,
}

impl Section {
    /// Sections nested directly within this one.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.elements.iter().filter_map(|e| match e {
            Element::Section(section) => Some(section),
            _ => None,
        })
    }

    /// Heading level, the document title being level 1.
    pub fn level(&self) -> usize {
        self.number.len() + 1
    }

    /// Section numbers each followed by a period, e.g. `2.1.`.
    pub fn formatted_number(&self) -> String {
        self.number.iter().map(|n| format!("{n}.")).collect()
    }

    /// `class` and `style` attributes for the element wrapping the section,
    /// empty if there are none.
    pub fn html_attributes(&self) -> String {
        let class = (!self.classes.is_empty())
            .then(|| format!("class={:?}", self.classes.iter().join(" ")));
        let style = (!self.styles.is_empty())
            .then(|| format!("style={:?}", self.styles.iter().join(" ")));

        class.into_iter().chain(style).join(" ")
    }

    /// Page number of a top-level section counting from `offset`.
    pub fn page_number(&self, offset: usize) -> usize {
        self.number.first().map_or(offset, |n| n + offset)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.formatted_number(), self.title)
    }
}
