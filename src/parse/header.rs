use chrono::{DateTime, Month, NaiveDate, NaiveTime, Utc};
use tracing::warn;

use super::{
    common::{speaker_note, time_fields},
    lines::Lines,
};
use crate::{doc::Doc, error::ParseError};

const COVER_PREFIX: &str = ".cover ";

/// Parses the title block: the title line followed by notes, cover, time and
/// subtitle lines up to the first blank line.
pub(super) fn parse_header(doc: &mut Doc, lines: &mut Lines) -> Result<(), ParseError> {
    doc.title = lines
        .next_non_empty()
        .ok_or(ParseError::UnexpectedEof)?
        .to_owned();

    while let Some(text) = lines.next() {
        if text.is_empty() {
            break;
        }

        if let Some(note) = speaker_note(text) {
            doc.title_notes.push(note.to_owned());
        } else if let Some(cover) = text.strip_prefix(COVER_PREFIX) {
            if let Some(previous) = doc.cover.replace(cover.to_owned()) {
                warn!(%previous, %cover, "cover is set more than once");
            }
        } else if let Some(time) = parse_time(text) {
            doc.time = Some(time);
        } else if doc.subtitle.is_empty() {
            doc.subtitle = text.to_owned();
        } else {
            return Err(ParseError::UnexpectedHeaderLine(text.to_owned()));
        }
    }

    Ok(())
}

/// Collects lines of free text up to the first top-level heading.
pub(super) fn parse_misc(lines: &mut Lines) -> Vec<String> {
    let mut misc = Vec::new();

    while let Some(text) = lines.next_non_empty() {
        if text.starts_with("* ") {
            lines.back();
            break;
        }

        misc.push(text.to_owned());
    }

    misc
}

/// Parses `15:04 2 Jan 2006` or `2 Jan 2006` times. A bare date is taken at
/// 11:00 UTC, which falls on that date in every time zone.
fn parse_time(text: &str) -> Option<DateTime<Utc>> {
    let fields = time_fields(text)?;
    let month: Month = fields.month.parse().ok()?;
    let date = NaiveDate::from_ymd_opt(fields.year, month.number_from_month(), fields.day)?;
    let (hour, minute) = fields.clock.unwrap_or((11, 0));

    Some(date.and_time(NaiveTime::from_hms_opt(hour, minute, 0)?).and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn header(input: &str) -> Result<Doc, ParseError> {
        let mut doc = Doc::default();
        parse_header(&mut doc, &mut Lines::new(input))?;
        Ok(doc)
    }

    #[test]
    fn title_only() {
        let doc = header("\n\nTitle").unwrap();

        assert_eq!(doc.title, "Title");
        assert_eq!(doc.subtitle, "");
        assert_eq!(doc.time, None);
        assert!(doc.title_notes.is_empty());
    }

    #[test]
    fn full_header() {
        let doc = header(
            "Talk
The subtitle
: first note
9:00 12 Feb 2015
.cover images/cover.png
: second note

* Section",
        )
        .unwrap();

        assert_eq!(doc.title, "Talk");
        assert_eq!(doc.subtitle, "The subtitle");
        assert_eq!(doc.title_notes, vec!["first note", "second note"]);
        assert_eq!(doc.cover.as_deref(), Some("images/cover.png"));
        assert_eq!(
            doc.time,
            Some(Utc.with_ymd_and_hms(2015, 2, 12, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn times() {
        assert_eq!(
            parse_time("9:00 12 Feb 2015"),
            Some(Utc.with_ymd_and_hms(2015, 2, 12, 9, 0, 0).unwrap())
        );
        assert_eq!(
            parse_time("15:04 2 Jan 2006"),
            Some(Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 0).unwrap())
        );
        assert_eq!(
            parse_time("12 Feb 2015"),
            Some(Utc.with_ymd_and_hms(2015, 2, 12, 11, 0, 0).unwrap())
        );
        assert_eq!(parse_time("not a date"), None);
        assert_eq!(parse_time("12Feb2015"), None);
        assert_eq!(parse_time(" 12 Feb 2015"), None);
        assert_eq!(parse_time("9:5 12 Feb 2015"), None);
        assert_eq!(parse_time("30 Feb 2015"), None);
        assert_eq!(parse_time("24:00 12 Feb 2015"), None);
        assert_eq!(parse_time("12 Foo 2015"), None);
    }

    #[test]
    fn malformed_time_is_subtitle() {
        let doc = header("Title
9:5 12 Feb 2015").unwrap();

        assert_eq!(doc.subtitle, "9:5 12 Feb 2015");
        assert_eq!(doc.time, None);
    }

    #[test]
    fn not_a_date_is_subtitle() {
        let doc = header("Title\nnot a date").unwrap();

        assert_eq!(doc.subtitle, "not a date");
        assert_eq!(doc.time, None);
    }

    #[test]
    fn second_subtitle() {
        assert!(matches!(
            header("Title\nSubtitle\nAnother"),
            Err(ParseError::UnexpectedHeaderLine(line)) if line == "Another"
        ));
    }

    #[test]
    fn empty_input() {
        assert!(matches!(header(""), Err(ParseError::UnexpectedEof)));
        assert!(matches!(header("\n# only a comment\n"), Err(ParseError::UnexpectedEof)));
    }

    #[test]
    fn misc_stops_at_heading() {
        let mut lines = Lines::new(
            "Title\n\nauthor@example.com\n\nhttps://example.com\n** not top\n* First",
        );
        let mut doc = Doc::default();
        parse_header(&mut doc, &mut lines).unwrap();

        assert_eq!(
            parse_misc(&mut lines),
            vec!["author@example.com", "https://example.com", "** not top"]
        );
        assert_eq!(lines.next(), Some("* First"));
    }
}
