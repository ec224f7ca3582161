/// Presentation settings for the composed document.
///
/// The defaults match an A4 viewport in points (595.28 x 841.89), which is
/// what fixed-layout exports from Pages declare. Sources with a different
/// viewport override the dimensions rather than editing constants.
#[derive(Debug, Clone)]
pub struct Config {
    pub page_width: f64,
    pub page_height: f64,
    /// Label printed above each page; `{n}` is replaced by the page index.
    /// `None` disables labels entirely.
    pub label_format: Option<String>,
    pub background: String,
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_width: 595.28,
            page_height: 841.89,
            label_format: Some("Page {n}".to_string()),
            background: "#111".to_string(),
            title: "Converted EPUB".to_string(),
        }
    }
}

impl Config {
    pub fn page_label(&self, index: u32) -> Option<String> {
        self.label_format
            .as_ref()
            .map(|format| format.replace("{n}", &index.to_string()))
    }
}

/// Assemble the final HTML document: resolved book CSS plus the layout
/// overlay in the head, then every page fragment in order inside a
/// centered wrapper. Output depends only on the inputs, so identical
/// archives and config produce byte-identical documents.
pub fn compose(css: &str, fragments: &[String], config: &Config) -> String {
    let title = html_escape::encode_text(&config.title);
    let mut parts: Vec<String> = Vec::new();
    parts.push("<!DOCTYPE html>".into());
    parts.push("<html>".into());
    parts.push("<head>".into());
    parts.push("<meta charset=\"utf-8\">".into());
    parts.push(format!("<title>{title}</title>"));
    parts.push("<style>".into());
    if !css.is_empty() {
        parts.push(css.to_string());
    }
    parts.push(overlay_css(config));
    parts.push("</style>".into());
    parts.push("</head>".into());
    parts.push("<body>".into());
    parts.push("<div class=\"wrapper\">".into());
    parts.push(format!("<h1>{title}</h1>"));
    for fragment in fragments {
        parts.push(fragment.clone());
    }
    parts.push("</div>".into());
    parts.push("</body>".into());
    parts.push("</html>".into());
    parts.join("\n")
}

/// The fixed overlay stylesheet: dark backdrop, centered column, each page
/// rendered as a white sheet with a drop shadow. `overflow: hidden` keeps
/// absolutely positioned page content from bleeding between pages.
fn overlay_css(config: &Config) -> String {
    format!(
        "html, body {{ margin:0; padding:0; background:{bg}; font-family: system-ui, -apple-system, BlinkMacSystemFont, \"Segoe UI\", sans-serif; }}\n\
         body {{ position: static !important; }}\n\
         .wrapper {{ max-width: 635px; margin:0 auto; padding:2rem 0; }}\n\
         h1 {{ color:#f5f5f5; text-align:center; margin-bottom:2rem; font-size:1.5rem; font-weight:600; }}\n\
         .page-label {{ color:#ccc; text-align:center; margin:0 0 .5rem; font-size:0.85rem; letter-spacing:0.08em; text-transform:uppercase; }}\n\
         .page {{ position: relative; width: {width}px; height: {height}px; margin:0 auto 3rem; background:#fff; box-shadow:0 0 20px rgba(0,0,0,0.3); overflow:hidden; }}\n\
         .page .body {{ position: relative; }}",
        bg = config.background,
        width = config.page_width,
        height = config.page_height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_appear_in_given_order() {
        let fragments = vec!["<div id=\"page-1\">one</div>".to_string(),
                             "<div id=\"page-3\">three</div>".to_string()];
        let doc = compose("", &fragments, &Config::default());
        let first = doc.find("page-1").unwrap();
        let second = doc.find("page-3").unwrap();
        assert!(first < second);
    }

    #[test]
    fn page_dimensions_come_from_config() {
        let config = Config {
            page_width: 768.0,
            page_height: 1024.0,
            ..Config::default()
        };
        let doc = compose("", &[], &config);
        assert!(doc.contains("width: 768px"));
        assert!(doc.contains("height: 1024px"));
    }

    #[test]
    fn default_dimensions_are_a4_points() {
        let doc = compose("", &[], &Config::default());
        assert!(doc.contains("width: 595.28px"));
        assert!(doc.contains("height: 841.89px"));
    }

    #[test]
    fn resolved_css_lands_in_the_head() {
        let doc = compose(".book { color: red; }", &[], &Config::default());
        let style_start = doc.find("<style>").unwrap();
        let style_end = doc.find("</style>").unwrap();
        let head = &doc[style_start..style_end];
        assert!(head.contains(".book { color: red; }"));
        assert!(head.contains("box-shadow"));
    }

    #[test]
    fn output_is_deterministic() {
        let fragments = vec!["<div>x</div>".to_string()];
        let a = compose("p{}", &fragments, &Config::default());
        let b = compose("p{}", &fragments, &Config::default());
        assert_eq!(a, b);
    }

    #[test]
    fn title_is_escaped() {
        let config = Config {
            title: "Tom & Jerry <vol. 1>".to_string(),
            ..Config::default()
        };
        let doc = compose("", &[], &config);
        assert!(doc.contains("Tom &amp; Jerry"));
        assert!(!doc.contains("<vol. 1>"));
    }
}
