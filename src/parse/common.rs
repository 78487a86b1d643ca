use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_while_m_n, take_while1},
    character::complete::{char, u32},
    combinator::{all_consuming, map, map_res, opt, value},
    sequence::{separated_pair, terminated},
};

/// Depth of a heading line, `** Title` being a heading of depth 2.
pub(super) fn heading_depth(text: &str) -> Option<usize> {
    parse_heading_marker(text).ok().map(|(_, depth)| depth)
}

fn parse_heading_marker(input: &str) -> IResult<&str, usize> {
    map(
        (take_while1(|c: char| c == '*'), char(' ')),
        |(marker, _): (&str, char)| marker.len(),
    )
    .parse(input)
}

pub(super) fn is_heading(text: &str) -> bool {
    heading_depth(text).is_some()
}

/// Heading marker for sections of `depth`, without the trailing space.
pub(super) fn heading_marker(depth: usize) -> String {
    "*".repeat(depth)
}

pub(super) fn speaker_note(text: &str) -> Option<&str> {
    text.strip_prefix(": ")
}

/// Dimension argument of a directive, `_` leaving it unspecified.
pub(super) fn dimension(input: &str) -> IResult<&str, Option<u32>> {
    all_consuming(alt((value(None, char('_')), map(u32, Some)))).parse(input)
}

/// Fields of a `15:04 2 Jan 2006` or `2 Jan 2006` time line. Only the shape
/// is checked, not the calendar.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct TimeFields<'a> {
    pub(super) clock: Option<(u32, u32)>,
    pub(super) day: u32,
    pub(super) month: &'a str,
    pub(super) year: i32,
}

pub(super) fn time_fields(text: &str) -> Option<TimeFields<'_>> {
    all_consuming(parse_time_fields)
        .parse(text)
        .ok()
        .map(|(_, fields)| fields)
}

fn parse_time_fields(input: &str) -> IResult<&str, TimeFields<'_>> {
    map(
        (
            opt(terminated(
                separated_pair(short_number, char(':'), two_digits),
                spaces,
            )),
            terminated(short_number, spaces),
            terminated(month_abbrev, spaces),
            year,
        ),
        |(clock, day, month, year)| TimeFields {
            clock,
            day,
            month,
            year,
        },
    )
    .parse(input)
}

fn short_number(input: &str) -> IResult<&str, u32> {
    map_res(take_while_m_n(1, 2, |c: char| c.is_ascii_digit()), str::parse).parse(input)
}

fn two_digits(input: &str) -> IResult<&str, u32> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_digit()), str::parse).parse(input)
}

fn year(input: &str) -> IResult<&str, i32> {
    map_res(take_while_m_n(4, 4, |c: char| c.is_ascii_digit()), str::parse).parse(input)
}

fn month_abbrev(input: &str) -> IResult<&str, &str> {
    take_while_m_n(3, 3, |c: char| c.is_ascii_alphabetic()).parse(input)
}

fn spaces(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c == ' ').parse(input)
}
