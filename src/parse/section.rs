use itertools::Itertools;
use tracing::debug;

use super::{
    common::{heading_marker, is_heading, speaker_note},
    lines::Lines,
};
use crate::{
    context::Context,
    doc::{Element, List, Section, Text},
    error::ParseError,
};

/// Parses sections of the level below `number`, an empty `number` meaning
/// top-level sections. Stops at the first non-blank line that does not open a
/// section of this level, leaving it unread.
pub(super) fn parse_sections(
    ctx: &Context,
    name: &str,
    lines: &mut Lines,
    number: &[usize],
) -> Result<Vec<Section>, ParseError> {
    let marker = heading_marker(number.len() + 1);
    let mut sections = Vec::new();

    for i in 1.. {
        let Some(text) = lines.next_non_empty() else {
            break;
        };

        let Some(title) = text
            .strip_prefix(marker.as_str())
            .and_then(|rest| rest.strip_prefix(' '))
        else {
            lines.back();
            break;
        };

        let mut section_number = number.to_vec();
        section_number.push(i);

        let mut section = Section {
            number: section_number,
            title: title.to_owned(),
            ..Default::default()
        };

        debug!(number = %section.formatted_number(), title, "parsing section");

        let mut next = lines.next_non_empty();

        while let Some(text) = next {
            if is_lesser_heading(text, &marker) {
                break;
            }

            parse_body_line(ctx, name, lines, &mut section, &marker, text)?;

            next = lines.next_non_empty();
        }

        // A sibling or a heading closing this level, left to the caller
        if next.is_some_and(is_heading) {
            lines.back();
        }

        sections.push(section);
    }

    Ok(sections)
}

/// Whether `text` is a heading of the level denoted by `marker` or above.
fn is_lesser_heading(text: &str, marker: &str) -> bool {
    is_heading(text)
        && !text
            .strip_prefix(marker)
            .is_some_and(|rest| rest.starts_with('*'))
}

fn parse_body_line(
    ctx: &Context,
    name: &str,
    lines: &mut Lines,
    section: &mut Section,
    marker: &str,
    text: &str,
) -> Result<(), ParseError> {
    if text.starts_with(char::is_whitespace) {
        if let Some(indent_len) = text.find(|c: char| !c.is_whitespace()) {
            let pre = parse_preformatted(lines, text, &text[..indent_len]);
            section.elements.push(Element::Text(pre));
        }
    } else if text.starts_with("- ") {
        let list = parse_list(lines, text);
        section.elements.push(Element::List(list));
    } else if let Some(note) = speaker_note(text) {
        section.notes.push(note.to_owned());
    } else if text
        .strip_prefix(marker)
        .is_some_and(|rest| rest.starts_with("* "))
    {
        lines.back();
        let subsections = parse_sections(ctx, name, lines, &section.number)?;
        section
            .elements
            .extend(subsections.into_iter().map(Element::Section));
    } else if text.starts_with('.') {
        let line = lines.line_number().unwrap_or_default();
        parse_directive(ctx, name, line, section, text)?;
    } else if let Some(paragraph) = parse_paragraph(lines, text) {
        section.elements.push(Element::Text(paragraph));
    }

    Ok(())
}

/// Consumes indented and blank lines, stripping `indent` from them. A leading
/// `#lang <name>` line sets the language of the block.
fn parse_preformatted(lines: &mut Lines, first: &str, indent: &str) -> Text {
    let mut block = Vec::new();
    let mut language = None;
    let mut next = Some(first);

    while let Some(text) = next.filter(|t| t.is_empty() || t.starts_with(indent)) {
        let text = text.strip_prefix(indent).unwrap_or(text);

        match text.strip_prefix("#lang ") {
            Some(lang) if block.is_empty() => language = Some(lang.to_owned()),
            _ => block.push(text),
        }

        next = lines.next();
    }

    lines.back();

    let pre = block.iter().join("\n").replace('\t', "    ");

    Text {
        lines: vec![pre.trim_end().to_owned()],
        preformatted: true,
        language,
    }
}

fn parse_list(lines: &mut Lines, first: &str) -> List {
    let mut bullets = Vec::new();
    let mut next = Some(first);

    while let Some(bullet) = next.and_then(|t| t.strip_prefix("- ")) {
        bullets.push(bullet.to_owned());
        next = lines.next();
    }

    lines.back();

    List { bullets }
}

/// Consumes lines up to a blank line. A directive line ends the paragraph and
/// is left unread, while `\.` at the start of a line escapes the period.
fn parse_paragraph(lines: &mut Lines, first: &str) -> Option<Text> {
    let mut paragraph = Vec::new();
    let mut next = Some(first);

    while let Some(text) = next.filter(|t| !t.trim().is_empty()) {
        if text.starts_with('.') {
            lines.back();
            break;
        }

        let text = text
            .strip_prefix('\\')
            .filter(|rest| rest.starts_with('.'))
            .unwrap_or(text);
        paragraph.push(text.to_owned());

        next = lines.next();
    }

    (!paragraph.is_empty()).then(|| Text {
        lines: paragraph,
        ..Default::default()
    })
}

fn parse_directive(
    ctx: &Context,
    name: &str,
    line: usize,
    section: &mut Section,
    text: &str,
) -> Result<(), ParseError> {
    let mut args = text.split_whitespace();
    let directive = args
        .next()
        .and_then(|cmd| cmd.strip_prefix('.'))
        .unwrap_or_default();

    if directive == "background" {
        let url = args.next().ok_or_else(|| ParseError::Directive {
            file: name.to_owned(),
            line,
            source: "background directive requires an image URL".into(),
        })?;

        section.classes.push("background".to_owned());
        section
            .styles
            .push(format!("background-image: url('{url}')"));

        return Ok(());
    }

    let parser = ctx
        .directives()
        .get(directive)
        .ok_or_else(|| ParseError::UnknownDirective {
            file: name.to_owned(),
            line,
            name: directive.to_owned(),
        })?;

    debug!(directive, line, "parsing directive");

    let element = parser(ctx, name, line, text).map_err(|e| ParseError::Directive {
        file: name.to_owned(),
        line,
        source: e.into(),
    })?;

    section.elements.push(element);

    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;
    use crate::{
        doc::{Caption, Doc},
        parse::{DirectiveTable, ParseMode, parse},
    };

    fn no_files(name: &str) -> Result<Vec<u8>> {
        anyhow::bail!("no file {name}")
    }

    fn parse_doc(input: &str) -> Result<Doc, ParseError> {
        parse(input, "test.slide", ParseMode::Full, &Context::new(no_files))
    }

    fn sections(body: &str) -> Vec<Section> {
        parse_doc(&format!("Title\n\n{body}"))
            .expect("valid document")
            .sections
    }

    #[test]
    fn nesting() {
        let sections = sections(
            "* A

** A.1

* B",
        );

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].number, vec![1]);
        assert_eq!(sections[0].title, "A");
        assert_eq!(sections[1].number, vec![2]);
        assert_eq!(sections[1].title, "B");

        if let [Element::Section(sub)] = sections[0].elements.as_slice() {
            assert_eq!(sub.number, vec![1, 1]);
            assert_eq!(sub.title, "A.1");
        } else {
            panic!("expected a single subsection");
        }
    }

    #[test]
    fn deep_numbering() {
        let sections = sections(
            "* One

** One.One

*** One.One.One

*** One.One.Two

** One.Two

text after subsections

* Two",
        );

        fn check(section: &Section, parent: &[usize]) {
            assert_eq!(section.number.len(), parent.len() + 1);
            assert_eq!(&section.number[..parent.len()], parent);
            for (i, sub) in section.sections().enumerate() {
                assert_eq!(*sub.number.last().unwrap(), i + 1);
                check(sub, &section.number);
            }
        }

        for (i, s) in sections.iter().enumerate() {
            assert_eq!(s.number, vec![i + 1]);
            check(s, &[]);
        }

        let one = &sections[0];
        let subs: Vec<_> = one.sections().collect();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].sections().count(), 2);
        assert_eq!(subs[1].title, "One.Two");
        assert!(matches!(
            subs[1].elements.as_slice(),
            [Element::Text(Text { lines, .. })] if lines == &["text after subsections"]
        ));
    }

    #[test]
    fn list() {
        let sections = sections("* Slide\n\n- a\n- b\n- c");

        assert_eq!(
            sections[0].elements,
            vec![Element::List(List {
                bullets: vec!["a".to_owned(), "b".to_owned(), "c".to_owned()]
            })]
        );
    }

    #[test]
    fn preformatted() {
        let sections =
            sections("* Slide\n\n\t#lang go\n\tfunc main() {\n\t\tprintln()\n\n\t}\n\n\n");

        assert_eq!(
            sections[0].elements,
            vec![Element::Text(Text {
                lines: vec!["func main() {\n    println()\n\n}".to_owned()],
                preformatted: true,
                language: Some("go".to_owned()),
            })]
        );
    }

    #[test]
    fn preformatted_ends_at_outdent() {
        let sections = sections("* Slide\n\n  code\n   more\n\nafter");

        assert_eq!(
            sections[0].elements,
            vec![
                Element::Text(Text {
                    lines: vec!["code\n more".to_owned()],
                    preformatted: true,
                    language: None,
                }),
                Element::Text(Text {
                    lines: vec!["after".to_owned()],
                    ..Default::default()
                }),
            ]
        );
    }

    #[test]
    fn notes_and_paragraphs() {
        let sections = sections(
            "* Slide

First line
second line
: a note

\\.not a directive
plain",
        );

        // Running text swallows note lines
        let s = &sections[0];
        assert!(s.notes.is_empty());
        assert_eq!(
            s.elements,
            vec![
                Element::Text(Text {
                    lines: vec![
                        "First line".to_owned(),
                        "second line".to_owned(),
                        ": a note".to_owned()
                    ],
                    ..Default::default()
                }),
                Element::Text(Text {
                    lines: vec![".not a directive".to_owned(), "plain".to_owned()],
                    ..Default::default()
                }),
            ]
        );
    }

    #[test]
    fn speaker_notes() {
        let sections = sections("* Slide\n\n: first\n\n: second\n\nbody");

        assert_eq!(sections[0].notes, vec!["first", "second"]);
        assert_eq!(sections[0].elements.len(), 1);
    }

    #[test]
    fn directive_interrupts_paragraph() {
        let sections = sections("* Slide\n\nsome text\n.caption A caption\nmore");

        assert_eq!(
            sections[0].elements,
            vec![
                Element::Text(Text {
                    lines: vec!["some text".to_owned()],
                    ..Default::default()
                }),
                Element::Caption(Caption {
                    text: "A caption".to_owned()
                }),
                Element::Text(Text {
                    lines: vec!["more".to_owned()],
                    ..Default::default()
                }),
            ]
        );
    }

    #[test]
    fn background() {
        let sections = sections("* Slide\n\n.background images/bg.png");

        assert_eq!(sections[0].classes, vec!["background"]);
        assert_eq!(
            sections[0].styles,
            vec!["background-image: url('images/bg.png')"]
        );
        assert!(sections[0].elements.is_empty());
    }

    #[test]
    fn background_without_url() {
        let err = parse_doc("Title\n\n* Slide\n\n.background").unwrap_err();

        assert!(matches!(err, ParseError::Directive { line: 5, .. }));
    }

    #[test]
    fn unknown_directive() {
        let err = parse_doc("Title\n\n* Slide\n\n.nonexistent arg").unwrap_err();

        match err {
            ParseError::UnknownDirective { file, line, name } => {
                assert_eq!(file, "test.slide");
                assert_eq!(line, 5);
                assert_eq!(name, "nonexistent");
            }
            e => panic!("unexpected error {e}"),
        }
    }

    #[test]
    fn directive_error_is_located() {
        let err = parse_doc("Title\n\n# comment\n* Slide\n\n.code missing.go").unwrap_err();

        assert_eq!(err.location(), Some(("test.slide", 6)));
        assert!(err.to_string().starts_with("test.slide:6: "));
    }

    #[test]
    fn custom_directive_table() {
        fn shout(_: &Context, _: &str, _: usize, text: &str) -> Result<Element> {
            Ok(Element::Caption(Caption {
                text: text.trim_start_matches(".shout").trim().to_uppercase(),
            }))
        }

        let mut table = DirectiveTable::empty();
        table.register("shout", shout);
        let ctx = Context::with_directives(no_files, table);

        let doc = parse(
            "Title\n\n* Slide\n\n.shout hello",
            "test.slide",
            ParseMode::Full,
            &ctx,
        )
        .unwrap();
        assert_eq!(
            doc.sections[0].elements,
            vec![Element::Caption(Caption {
                text: "HELLO".to_owned()
            })]
        );

        assert!(matches!(
            parse("Title\n\n* Slide\n\n.caption x", "test.slide", ParseMode::Full, &ctx),
            Err(ParseError::UnknownDirective { .. })
        ));
    }

    #[test]
    fn skipped_level_is_text() {
        let sections = sections("* Slide\n\n*** too deep\n\n* Next");

        assert_eq!(sections.len(), 2);
        assert_eq!(
            sections[0].elements,
            vec![Element::Text(Text {
                lines: vec!["*** too deep".to_owned()],
                ..Default::default()
            })]
        );
    }
}
