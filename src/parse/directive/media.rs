use anyhow::{Result, anyhow, bail};

use super::arguments;
use crate::{
    context::Context,
    doc::{Element, Iframe, Image, Video},
    parse::common::dimension,
};

/// `.image <file> [height width]`
pub(super) fn parse_image(_: &Context, _: &str, _: usize, text: &str) -> Result<Element> {
    let (url, (height, width)) = match arguments(text).as_slice() {
        [url] => (url.to_string(), (None, None)),
        [url, height, width] => (url.to_string(), dimensions(height, width)?),
        _ => bail!("incorrect image invocation: {text:?}"),
    };

    Ok(Element::Image(Image { url, height, width }))
}

/// `.iframe <url> [height width]`
pub(super) fn parse_iframe(_: &Context, _: &str, _: usize, text: &str) -> Result<Element> {
    let (url, (height, width)) = match arguments(text).as_slice() {
        [url] => (url.to_string(), (None, None)),
        [url, height, width] => (url.to_string(), dimensions(height, width)?),
        _ => bail!("incorrect iframe invocation: {text:?}"),
    };

    Ok(Element::Iframe(Iframe { url, height, width }))
}

/// `.video <file> <mime-type> [height width]`
pub(super) fn parse_video(_: &Context, _: &str, _: usize, text: &str) -> Result<Element> {
    let (url, source_type, (height, width)) = match arguments(text).as_slice() {
        [url, source_type] => (url.to_string(), source_type.to_string(), (None, None)),
        [url, source_type, height, width] => (
            url.to_string(),
            source_type.to_string(),
            dimensions(height, width)?,
        ),
        _ => bail!("incorrect video invocation: {text:?}"),
    };

    Ok(Element::Video(Video {
        url,
        source_type,
        height,
        width,
    }))
}

fn dimensions(height: &str, width: &str) -> Result<(Option<u32>, Option<u32>)> {
    let parse = |arg: &str| {
        dimension(arg)
            .map(|(_, d)| d)
            .map_err(|_| anyhow!("invalid dimension {arg:?}, expected a number or _"))
    };

    Ok((parse(height)?, parse(width)?))
}
