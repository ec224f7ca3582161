use anyhow::Result;
use clap::Parser;
use epub2html::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    epub2html::convert(&cli)
}
