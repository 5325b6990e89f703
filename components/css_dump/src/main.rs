use std::time::Instant;

use anyhow::{bail, Context};
use css_parser::{Parser, Tokenizer};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: css_dump [--tokens] <path-to-css-file>";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut tokens_only = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        if arg == "--tokens" {
            tokens_only = true;
        } else if path.is_none() {
            path = Some(arg);
        } else {
            bail!(USAGE);
        }
    }
    let Some(path) = path else {
        bail!(USAGE);
    };

    let css = std::fs::read_to_string(&path).with_context(|| format!("failed to read '{path}'"))?;

    if tokens_only {
        dump_tokens(&path, &css)
    } else {
        dump_stylesheet(&path, &css)
    }
}

fn dump_tokens(path: &str, css: &str) -> anyhow::Result<()> {
    let tokens = Tokenizer::new(css)
        .tokenize()
        .with_context(|| format!("failed to tokenize '{path}'"))?;

    println!("---- CSS Tokens ----");
    for token in &tokens {
        println!("{token:?}");
    }
    Ok(())
}

fn dump_stylesheet(path: &str, css: &str) -> anyhow::Result<()> {
    tracing::info!("Started parsing '{}'", path);
    let before = Instant::now();
    let stylesheet = Parser::new(css)
        .parse_a_stylesheet()
        .with_context(|| format!("failed to parse '{path}'"))?;
    let time = before.elapsed();
    tracing::info!(rules = stylesheet.rules.len(), "Finished parsing stylesheet! Took {:?}!", time);

    println!("---- CSS Stylesheet ----");
    println!("{stylesheet:#?}");
    Ok(())
}
