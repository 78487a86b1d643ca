use std::{path::Path, sync::LazyLock};

use anyhow::{Context as _, Result, anyhow, bail};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_till1,
    character::complete::{alpha1, anychar, char, multispace0, multispace1, none_of, u32},
    combinator::{all_consuming, map, opt, recognize, rest, value},
    multi::many0,
    sequence::{delimited, pair, preceded},
};
use regex::Regex;

use super::read_text;
use crate::{
    context::Context,
    doc::{CodeBuilder, CodeLine, Element},
};

static HIGHLIGHT_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+) // HL(\w*)\s*$").expect("valid highlight regex"));

/// Parses `.code` and `.play` directives:
///
/// ```text
/// .code [-numbers] [-edit] <file> [address] [HL<tag>]
/// ```
///
/// The address selects a range of lines with line numbers, `$` for the last
/// line or `/regexp/` patterns, e.g. `/^func main/,/^}/`. Lines ending in
/// `OMIT` are left out.
pub(super) fn parse_code(ctx: &Context, name: &str, _line: usize, text: &str) -> Result<Element> {
    let (_, args) = parse_code_args(text)
        .map_err(|e| anyhow!("invalid code directive {text:?}: {e}"))?;

    let mut numbers = false;
    let mut edit = false;
    for flag in args.flags {
        match flag {
            "-numbers" => numbers = true,
            "-edit" => edit = true,
            _ => bail!("unknown flag {flag:?} in {text:?}"),
        }
    }

    let (address, highlight) = split_highlight(args.rest);

    let source = read_text(ctx, name, args.file)?;
    let source_lines: Vec<_> = source.lines().collect();

    let (start, end) = if address.is_empty() {
        (0, source_lines.len())
    } else {
        let (_, (from, to)) = parse_address(address)
            .map_err(|e| anyhow!("invalid address {address:?}: {e}"))?;
        let (first, last) = select_lines(&source_lines, &from, to.as_ref())
            .with_context(|| format!("{}: address {address}", args.file))?;
        (first, last + 1)
    };

    let lines = source_lines[start..end]
        .iter()
        .enumerate()
        .filter(|(_, text)| !text.trim_end().ends_with("OMIT"))
        .map(|(idx, text)| code_line(start + idx + 1, text, highlight))
        .collect::<Vec<_>>();

    let ext = Path::new(args.file)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    Ok(Element::Code(
        CodeBuilder::default()
            .file_name(args.file)
            .ext(ext)
            .lines(lines)
            .play(args.cmd == "play")
            .edit(edit)
            .numbers(numbers)
            .build()?,
    ))
}

/// Strips a `// HL<tag>` comment, highlighting the line if the tag is the
/// requested one.
fn code_line(number: usize, text: &str, highlight: Option<&str>) -> CodeLine {
    match HIGHLIGHT_COMMENT.captures(text) {
        Some(caps) => CodeLine {
            number,
            text: caps[1].to_owned(),
            highlighted: highlight.is_some_and(|tag| tag == &caps[2]),
        },
        None => CodeLine {
            number,
            text: text.to_owned(),
            highlighted: false,
        },
    }
}

#[derive(Debug, PartialEq, Eq)]
struct CodeArgs<'a> {
    cmd: &'a str,
    flags: Vec<&'a str>,
    file: &'a str,
    rest: &'a str,
}

fn parse_code_args(input: &str) -> IResult<&str, CodeArgs<'_>> {
    map(
        (
            preceded(char('.'), alpha1),
            many0(preceded(multispace1, recognize(pair(char('-'), alpha1)))),
            preceded(multispace1, take_till1(char::is_whitespace)),
            preceded(multispace0, rest),
        ),
        |(cmd, flags, file, rest): (&str, _, &str, &str)| CodeArgs {
            cmd,
            flags,
            file,
            rest: rest.trim_end(),
        },
    )
    .parse(input)
}

/// Splits a trailing `HL<tag>` argument off the address.
fn split_highlight(rest: &str) -> (&str, Option<&str>) {
    let (head, last) = rest
        .rsplit_once(char::is_whitespace)
        .unwrap_or(("", rest));

    match last.strip_prefix("HL") {
        Some(tag) => (head.trim_end(), Some(tag)),
        None => (rest, None),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Address {
    /// 1-based line number.
    Line(usize),
    Last,
    Pattern(String),
}

fn parse_address(input: &str) -> IResult<&str, (Address, Option<Address>)> {
    all_consuming((parse_simple_address, opt(preceded(char(','), parse_simple_address))))
        .parse(input)
}

fn parse_simple_address(input: &str) -> IResult<&str, Address> {
    alt((
        map(u32, |n| Address::Line(n as usize)),
        value(Address::Last, char('$')),
        map(delimited(char('/'), parse_pattern, char('/')), |p: &str| {
            Address::Pattern(p.replace("\\/", "/"))
        }),
    ))
    .parse(input)
}

fn parse_pattern(input: &str) -> IResult<&str, &str> {
    recognize(many0(alt((
        recognize(pair(char('\\'), anychar)),
        recognize(none_of("\\/")),
    ))))
    .parse(input)
}

/// Resolves an address to an inclusive range of 0-based line indexes. A
/// pattern end address is searched for after the start line.
fn select_lines(lines: &[&str], from: &Address, to: Option<&Address>) -> Result<(usize, usize)> {
    let start = find_line(lines, from, 0)?;
    let end = match to {
        Some(to) => find_line(lines, to, start + 1)?,
        None => start,
    };

    if end < start {
        bail!("address range ends before it starts");
    }

    Ok((start, end))
}

fn find_line(lines: &[&str], address: &Address, search_from: usize) -> Result<usize> {
    match address {
        Address::Line(n) if (1..=lines.len()).contains(n) => Ok(n - 1),
        Address::Line(n) => bail!("line {n} is out of range"),
        Address::Last if lines.is_empty() => bail!("file is empty"),
        Address::Last => Ok(lines.len() - 1),
        Address::Pattern(pattern) => {
            let re = Regex::new(pattern)?;
            lines[search_from.min(lines.len())..]
                .iter()
                .position(|line| re.is_match(line))
                .map(|idx| idx + search_from)
                .ok_or_else(|| anyhow!("no match for /{pattern}/"))
        }
    }
}
