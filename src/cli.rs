// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
//   spider-web <ROOT_URL> <MAX_URLS> <TIMEOUT>
//
// All three arguments are positional and required. There are no flags, so a
// value starting with '-' is just a value: "-5" fails the range check, not
// the argument count. clap only collects the arguments as strings; the checks
// below turn them into a CrawlConfig, and each failed check has its own
// one-line message. --help and --version work only as the sole argument.
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the parsing code
// - thiserror: the #[error("...")] text IS the message printed to the user
// - Option combinators: parse().ok().filter(...) instead of nested ifs
// =============================================================================

use std::ffi::OsString;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use thiserror::Error;

use crate::crawl::CrawlConfig;

/// Upper bound for MAX_URLS
pub const MAX_URLS_LIMIT: u64 = 10_000;

/// Upper bound for TIMEOUT, in milliseconds
pub const MAX_TIMEOUT_LIMIT: u64 = 10_000;

#[derive(Parser, Debug)]
#[command(
    name = "spider-web",
    version,
    disable_help_flag = true,
    disable_version_flag = true,
    about = "Lists the links reachable from a web page, breadth-first",
    long_about = "spider-web fetches a single page and prints every link found on it, \
                  deduplicated and sorted, with query parameters one per line."
)]
pub struct Cli {
    /// Page to start from (http:// or https://)
    #[arg(allow_hyphen_values = true)]
    pub root_url: String,

    /// Maximum number of links to list (1 - 10000)
    #[arg(allow_hyphen_values = true)]
    pub max_urls: String,

    /// Fetch timeout in milliseconds (1 - 10000)
    ///
    /// A grace period of 1500 ms is added on top for connection setup
    #[arg(allow_hyphen_values = true)]
    pub timeout: String,
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("invalid number of args input")]
    ArgCount,

    #[error("invalid scheme in root url")]
    InvalidScheme,

    #[error("invalid maximum number of reachable urls, must be 1 - 10000")]
    MaxUrls,

    #[error("invalid timeout value, must be 1 - 10000")]
    Timeout,

    /// --help or --version on its own: the text to print instead of crawling
    #[error("{0}")]
    Display(String),
}

// Parses and validates the command line
//
// Parameters:
//   args: the full argument list, program name first (like std::env::args_os)
//
// Returns: a CrawlConfig ready for crawl::spider_web, or the first problem
// found. Checks run in order: argument count, scheme, max urls, timeout.
pub fn parse_args<I, T>(args: I) -> Result<CrawlConfig, InputError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    // Program name plus exactly three values
    if args.len() != 4 {
        let only = match args.as_slice() {
            [_, only] => only.to_str(),
            _ => None,
        };
        return Err(match only {
            Some("-h" | "--help") => {
                InputError::Display(Cli::command().render_long_help().to_string())
            }
            Some("-V" | "--version") => InputError::Display(Cli::command().render_version()),
            _ => InputError::ArgCount,
        });
    }

    // clap still treats a literal "--" as the end-of-options marker, which
    // leaves it one value short. The count is already right, so take the
    // values as they are.
    let cli = Cli::try_parse_from(&args).unwrap_or_else(|_| Cli {
        root_url: args[1].to_string_lossy().into_owned(),
        max_urls: args[2].to_string_lossy().into_owned(),
        timeout: args[3].to_string_lossy().into_owned(),
    });

    cli.validate()
}

impl Cli {
    pub fn validate(self) -> Result<CrawlConfig, InputError> {
        if !has_web_scheme(&self.root_url) {
            return Err(InputError::InvalidScheme);
        }

        let max_urls =
            parse_in_range(&self.max_urls, MAX_URLS_LIMIT).ok_or(InputError::MaxUrls)?;
        let timeout =
            parse_in_range(&self.timeout, MAX_TIMEOUT_LIMIT).ok_or(InputError::Timeout)?;

        Ok(CrawlConfig {
            root_url: self.root_url,
            // At most 10000, always fits
            max_urls: max_urls as usize,
            timeout: Duration::from_millis(timeout),
        })
    }
}

// "http://..." or "https://...", exactly (no "HTTP://", no "ftp://")
fn has_web_scheme(url: &str) -> bool {
    match url.split_once("://") {
        Some((scheme, _)) => scheme == "http" || scheme == "https",
        None => false,
    }
}

// Parses an integer in 1..=max; non-numbers count as out of range
fn parse_in_range(value: &str, max: u64) -> Option<u64> {
    value
        .parse::<u64>()
        .ok()
        .filter(|parsed| (1..=max).contains(parsed))
}
