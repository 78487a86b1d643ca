use derive_builder::Builder;

use super::Section;

/// Content of a section. Every variant is rendered by the template named by
/// [`Element::template_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Text(Text),
    List(List),
    Section(Section),
    Code(Code),
    Link(Link),
    Image(Image),
    Video(Video),
    Iframe(Iframe),
    Html(Html),
    Caption(Caption),
}

impl Element {
    pub fn template_name(&self) -> &'static str {
        match self {
            Element::Text(_) => "text",
            Element::List(_) => "list",
            Element::Section(_) => "section",
            Element::Code(_) => "code",
            Element::Link(_) => "link",
            Element::Image(_) => "image",
            Element::Video(_) => "video",
            Element::Iframe(_) => "iframe",
            Element::Html(_) => "html",
            Element::Caption(_) => "caption",
        }
    }
}

/// An optionally preformatted paragraph.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Text {
    pub lines: Vec<String>,
    pub preformatted: bool,
    /// Language tag of preformatted text, set with `#lang`.
    pub language: Option<String>,
}

/// A bulleted list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct List {
    pub bullets: Vec<String>,
}

/// Source snippet read from a file by `.code` or `.play`.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(setter(into))]
pub struct Code {
    pub file_name: String,
    /// File extension including the leading period, empty if there is none.
    #[builder(default)]
    pub ext: String,
    pub lines: Vec<CodeLine>,
    #[builder(default)]
    pub play: bool,
    #[builder(default)]
    pub edit: bool,
    #[builder(default)]
    pub numbers: bool,
}

impl Code {
    /// Source text of the snippet without highlight markers.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for line in self.lines.iter() {
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
    /// 1-based line number in the source file.
    pub number: usize,
    pub text: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub label: Option<String>,
}

impl Link {
    /// Text to display for the link: the label, or the URL without its scheme.
    pub fn display_text(&self) -> &str {
        if let Some(label) = &self.label {
            return label;
        }

        match self.url.split_once("://") {
            Some((scheme, rest)) if !scheme.is_empty() && !scheme.contains('/') => rest,
            _ => self.url.strip_prefix("mailto:").unwrap_or(&self.url),
        }
    }
}

/// Dimensions are `None` when left to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub url: String,
    /// MIME type of the video source, e.g. `video/mp4`.
    pub source_type: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iframe {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// Raw HTML included verbatim from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Html {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_display_text() {
        let link = |url: &str, label: Option<&str>| Link {
            url: url.to_owned(),
            label: label.map(str::to_owned),
        };

        assert_eq!(link("https://go.dev/doc", None).display_text(), "go.dev/doc");
        assert_eq!(link("mailto:me@example.com", None).display_text(), "me@example.com");
        assert_eq!(link("/local/path", None).display_text(), "/local/path");
        assert_eq!(
            link("https://go.dev", Some("The Go site")).display_text(),
            "The Go site"
        );
    }

    #[test]
    fn code_builder_defaults() {
        let code = CodeBuilder::default()
            .file_name("hello.go")
            .lines(vec![CodeLine {
                number: 3,
                text: "func main() {}".to_owned(),
                highlighted: false,
            }])
            .build()
            .unwrap();

        assert!(!code.play && !code.edit && !code.numbers);
        assert_eq!(code.ext, "");
        assert_eq!(code.text(), "func main() {}\n");
        assert_eq!(Element::Code(code).template_name(), "code");
    }
}
