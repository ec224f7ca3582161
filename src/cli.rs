use clap::Parser;
use std::path::PathBuf;

/// Convert a fixed-layout EPUB into a single self-contained HTML document
#[derive(Parser, Debug)]
#[command(name = "epub2html", version, about)]
pub struct Cli {
    /// Path to the input EPUB file
    pub input: PathBuf,

    /// Output HTML file. Defaults to the input path with a .html extension.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Page width in pixels (the fixed-layout viewport width)
    #[arg(long, default_value_t = 595.28)]
    pub page_width: f64,

    /// Page height in pixels (the fixed-layout viewport height)
    #[arg(long, default_value_t = 841.89)]
    pub page_height: f64,

    /// Label printed above each page; {n} is replaced by the page number
    #[arg(long, default_value = "Page {n}")]
    pub label_format: String,

    /// Do not print a label above each page
    #[arg(long, default_value_t = false)]
    pub no_page_labels: bool,

    /// Background color behind the stacked pages
    #[arg(long, default_value = "#111")]
    pub background: String,

    /// Document title and heading; defaults to the input filename
    #[arg(long)]
    pub title: Option<String>,

    /// Leave missing or unsupported assets unresolved (with a warning)
    /// instead of aborting the run
    #[arg(long, default_value_t = false)]
    pub lenient: bool,
}
