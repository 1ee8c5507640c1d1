//! Print the Bible citations found in text as JSON.
//!
//! Usage:
//!   `find_refs [--text-order] [--compact] [--version] [PATH ...]`
//!
//! With no paths, reads stdin and prints a JSON array of references.
//! With paths, walks them (see `REFS_EXTENSIONS`) and prints one report per file.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use scripture_refs::config::Config;
use scripture_refs::corpus;
use scripture_refs::{Finder, OutputOrder};

fn main() -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;
    let mut paths: Vec<PathBuf> = Vec::new();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--text-order" => config.order = OutputOrder::Textual,
            "--compact" => config.pretty = false,
            "-h" | "--help" => {
                println!("{} {}", config.app_name(), config.app_version());
                println!("Usage: find_refs [--text-order] [--compact] [--version] [PATH ...]");
                return Ok(());
            }
            "-V" | "--version" => {
                println!("{} {}", config.app_name(), config.app_version());
                return Ok(());
            }
            flag if flag.starts_with("--") => bail!("Unknown option: {flag}"),
            path => paths.push(PathBuf::from(path)),
        }
    }

    let finder = Finder::new().with_order(config.order);

    let json = if paths.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        to_json(&finder.find(&text), config.pretty)?
    } else {
        let files = corpus::collect_files(&paths, &config)?;
        let reports = corpus::scan_files(&files, &finder)?;
        to_json(&reports, config.pretty)?
    };

    println!("{json}");
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("Failed to serialize references")
}
