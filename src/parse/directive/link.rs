use anyhow::{Result, bail};

use super::arguments;
use crate::{
    context::Context,
    doc::{Element, Link},
};

/// `.link <url> [label...]`
pub(super) fn parse_link(_: &Context, _: &str, _: usize, text: &str) -> Result<Element> {
    let args = arguments(text);

    let Some((url, label)) = args.split_first() else {
        bail!("link directive requires a URL");
    };

    Ok(Element::Link(Link {
        url: url.to_string(),
        label: (!label.is_empty()).then(|| label.join(" ")),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(text: &str) -> Result<Element> {
        parse_link(&Context::default(), "demo.slide", 1, text)
    }

    #[test]
    fn with_label() {
        assert_eq!(
            link(".link https://go.dev/play  The Go   Playground").unwrap(),
            Element::Link(Link {
                url: "https://go.dev/play".to_owned(),
                label: Some("The Go Playground".to_owned()),
            })
        );
    }

    #[test]
    fn without_label() {
        let Element::Link(link) = link(".link https://go.dev").unwrap() else {
            panic!("expected link");
        };

        assert_eq!(link.label, None);
        assert_eq!(link.display_text(), "go.dev");
    }

    #[test]
    fn missing_url() {
        assert!(link(".link").is_err());
    }
}
