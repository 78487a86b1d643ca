use anyhow::{Result, bail};

use super::{arguments, read_text};
use crate::{
    context::Context,
    doc::{Caption, Element, Html},
};

/// `.html <file>`, the file being included verbatim.
pub(super) fn parse_html(ctx: &Context, name: &str, _: usize, text: &str) -> Result<Element> {
    let [file] = arguments(text)[..] else {
        bail!("invalid html directive {text:?}, expected a single file");
    };

    Ok(Element::Html(Html {
        content: read_text(ctx, name, file)?,
    }))
}

/// `.caption <text>`
pub(super) fn parse_caption(_: &Context, _: &str, _: usize, text: &str) -> Result<Element> {
    Ok(Element::Caption(Caption {
        text: text.strip_prefix(".caption").unwrap_or(text).trim().to_owned(),
    }))
}
