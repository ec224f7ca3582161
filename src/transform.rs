use crate::assets::{try_replace_all, Inliner};
use crate::compose::Config;
use crate::error::{Error, Result};
use crate::pages::PageDescriptor;
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

/// Elements that may legally stay self-closing in HTML serialization.
const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "input", "meta", "link", "source"];

static SELF_CLOSING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([a-zA-Z][a-zA-Z0-9]*)([^>]*)/>").unwrap());

// The regex crate has no backreferences, so the quote style is handled by
// alternation rather than a captured delimiter.
static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"src="images/([^"]+)"|src='images/([^']+)'"#).unwrap()
});

static IMG_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"url\(images/([^)]+)\)").unwrap());

static PAGE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href="page-([0-9]+)\.xhtml(?:#[^"]*)?"|href='page-([0-9]+)\.xhtml(?:#[^']*)?'"#)
        .unwrap()
});

/// Turn one page file into an HTML fragment: extract the body, repair
/// self-closing tags, inline image references, rewrite internal links to
/// in-document anchors, and wrap the result in a labeled `.page` div.
pub fn transform(
    page: &PageDescriptor,
    package_root: &Path,
    inliner: &mut Inliner,
    config: &Config,
) -> Result<String> {
    let markup = std::fs::read_to_string(&page.path)?;
    let body = extract_body(&markup, &page.path.display().to_string())?;
    let body = fix_self_closing(&body);
    let body = inline_images(&body, package_root, inliner)?;
    let body = rewrite_links(&body);

    let mut fragment = String::new();
    if let Some(label) = config.page_label(page.index) {
        fragment.push_str(&format!(
            "<p class=\"page-label\">{}</p>\n",
            html_escape::encode_text(&label)
        ));
    }
    fragment.push_str(&format!(
        "<div class=\"page page-{n}\" id=\"page-{n}\">\n{body}\n</div>",
        n = page.index
    ));
    Ok(fragment)
}

/// The markup between the first `<body ...>` tag and its closing `</body>`.
/// Attributes on the `<body>` tag itself are discarded.
fn extract_body(markup: &str, page: &str) -> Result<String> {
    let missing = || Error::MissingBody {
        page: page.to_string(),
    };
    let open = markup.find("<body").ok_or_else(missing)?;
    let after_open = open + markup[open..].find('>').ok_or_else(missing)? + 1;
    let close = markup[after_open..].rfind("</body>").ok_or_else(missing)? + after_open;
    Ok(markup[after_open..close].trim().to_string())
}

/// Rewrite `<tag .../>` into `<tag ...></tag>` for every non-void element.
/// Void elements stay self-closing. Purely lexical; XHTML self-closing
/// syntax is regular enough that no parse tree is needed.
pub(crate) fn fix_self_closing(html: &str) -> String {
    SELF_CLOSING
        .replace_all(html, |caps: &Captures| {
            let tag = &caps[1];
            if VOID_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str()) {
                caps[0].to_string()
            } else {
                format!("<{tag}{}></{tag}>", &caps[2])
            }
        })
        .into_owned()
}

/// Replace `src="images/..."` attributes and `url(images/...)` style
/// references with data URIs. Absolute URLs and existing data URIs never
/// match the patterns, so they pass through untouched.
fn inline_images(html: &str, package_root: &Path, inliner: &mut Inliner) -> Result<String> {
    let html = try_replace_all(&IMG_SRC, html, |caps| {
        let name = first_group(caps);
        inline_one(package_root, inliner, name, caps, |uri| {
            format!("src=\"{uri}\"")
        })
    })?;
    try_replace_all(&IMG_URL, &html, |caps| {
        let name = first_group(caps);
        inline_one(package_root, inliner, name, caps, |uri| format!("url({uri})"))
    })
}

fn first_group<'a>(caps: &'a Captures) -> &'a str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .unwrap_or_default()
}

fn inline_one(
    package_root: &Path,
    inliner: &mut Inliner,
    name: &str,
    caps: &Captures,
    render: impl Fn(&str) -> String,
) -> Result<String> {
    let reference = format!("images/{name}");
    let path = package_root.join("images").join(name);
    match inliner.inline(&path, &reference)? {
        Some(uri) => Ok(render(&uri)),
        None => Ok(caps[0].to_string()),
    }
}

/// Rewrite `href="page-N.xhtml"` (with an optional fragment, which is
/// dropped) into `href="#page-N"` so internal links stay navigable once
/// every page lives in the same document.
fn rewrite_links(html: &str) -> String {
    PAGE_LINK
        .replace_all(html, |caps: &Captures| {
            format!("href=\"#page-{}\"", first_group(caps))
        })
        .into_owned()
}
