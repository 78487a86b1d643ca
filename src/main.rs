mod cli;

use std::{fs, io::Write, path::Path};

use anyhow::{Context as _, Result};
use clap::Parser as _;
use cli::Args;
use present::{Context, Doc, Element, ParseMode, Section};
use tracing::{Level, info};

fn main() -> Result<()> {
    let cli = Args::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.titles_only {
        ParseMode::TitlesOnly
    } else {
        ParseMode::Full
    };
    let ctx = Context::default();
    let mut out = std::io::stdout().lock();

    for path in cli.files.iter() {
        let doc = parse_file(&ctx, path, mode)?;
        info!(path = %path.display(), sections = doc.sections.len(), "parsed");
        write_outline(&mut out, path, &doc)?;
    }

    Ok(())
}

fn parse_file(ctx: &Context, path: &Path, mode: ParseMode) -> Result<Doc> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("unable to read {}", path.display()))?;

    ctx.parse(&input, &path.to_string_lossy(), mode)
        .with_context(|| format!("could not parse {}", path.display()))
}

fn write_outline(out: &mut impl Write, path: &Path, doc: &Doc) -> Result<()> {
    writeln!(out, "{}: {}", path.display(), doc.title)?;

    if !doc.subtitle.is_empty() {
        writeln!(out, "  {}", doc.subtitle)?;
    }
    if let Some(time) = doc.time {
        writeln!(out, "  {}", time.format("%H:%M %e %b %Y"))?;
    }

    for section in doc.sections.iter() {
        write_section(out, section)?;
    }

    Ok(())
}

fn write_section(out: &mut impl Write, section: &Section) -> Result<()> {
    let indent = "  ".repeat(section.number.len());
    let elements: Vec<_> = section
        .elements
        .iter()
        .filter(|e| !matches!(e, Element::Section(_)))
        .map(Element::template_name)
        .collect();

    writeln!(out, "{indent}{section}")?;
    if !elements.is_empty() {
        writeln!(out, "{indent}  [{}]", elements.join(" "))?;
    }

    for sub in section.sections() {
        write_section(out, sub)?;
    }

    Ok(())
}
