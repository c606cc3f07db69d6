#![deny(
    warnings,
    missing_debug_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
//! `fsearch` - Print the first file under a directory matching a glob.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap_cargo::style::CLAP_STYLING;
use filesearch::{Finder, SearchMode, SearchOptions};
use tracing_subscriber::EnvFilter;

/// CLI arguments for `fsearch`
#[derive(Parser, Debug)]
#[command(author, version, about, styles = CLAP_STYLING)]
struct Cli {
    /// File name glob, e.g. '*.txt'
    pattern: String,

    /// Directory to search from
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Exhaust each subdirectory before moving to the next one
    #[arg(short, long)]
    depth_first: bool,

    /// Directory levels to descend below the root (0 = root only)
    #[arg(short, long, value_name = "N")]
    max_depth: Option<u32>,

    /// Match file names case-insensitively
    #[arg(short, long)]
    ignore_case: bool,

    /// Log more (-v for search decisions, -vv for every directory visited)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> SearchOptions {
        let mode = if self.depth_first { SearchMode::DepthFirst } else { SearchMode::BreadthFirst };
        SearchOptions::new()
            .mode(mode)
            .max_depth(self.max_depth)
            .case_insensitive(self.ignore_case)
    }
}

/// Install a stderr subscriber; `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match Finder::new().options(cli.options()).find(&cli.root, &cli.pattern) {
        Ok(Some(path)) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        },
        Ok(None) => {
            eprintln!("No match for '{}' under {}", cli.pattern, cli.root.display());
            ExitCode::from(1)
        },
        Err(e) => {
            eprintln!("{}", e.user_message());
            ExitCode::from(2)
        },
    }
}
