// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (stderr only, see src/logging.rs)
// 2. Parse and validate the three positional arguments
// 3. Crawl the root page
// 4. Print the collected links, one entry per line (print_outcome)
//
// Exit codes:
//   0 = links printed (possibly none, e.g. after a timeout), or the input
//       was rejected with a message
//   1 = the crawl failed (DNS error, refused connection, HTTP 404, ...)
// =============================================================================

mod cli;
mod crawl;
mod error;
mod format;
mod logging;

use std::io::{self, Write};

use anyhow::Result;

use cli::InputError;
use crawl::CrawlOutcome;

// The current-thread runtime is enough: there is exactly one request to wait on
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    logging::init_logging()?;

    let config = match cli::parse_args(std::env::args_os()) {
        Ok(config) => config,
        Err(InputError::Display(text)) => {
            println!("{}", text.trim_end());
            return Ok(0);
        }
        Err(err) => {
            println!("{}", err);
            return Ok(0);
        }
    };

    let outcome = crawl::spider_web(&config).await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_outcome(&outcome, &mut out)
}

// Prints the links of a finished crawl, timed out or not
//
// Returns: the exit code, always 0 since failures never get this far
fn print_outcome<W: Write>(outcome: &CrawlOutcome, out: &mut W) -> Result<i32> {
    tracing::debug!(
        state = %outcome.state(),
        empty = outcome.links().is_empty(),
        "printing links"
    );

    outcome.links().write_to(out)?;
    out.flush()?;
    Ok(0)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is a timeout not an error?
//    - spider_web() returns Ok(CrawlOutcome::TimedOut(..)) for it
//    - Only real failures come back as Err and reach the "Error:" branch
//
// 2. What does {:#} do with an anyhow error?
//    - It prints the whole chain of causes on one line:
//      "HTTP request failed: error sending request: ..."
//
// 3. Why lock stdout?
//    - println! locks and unlocks stdout on every call
//    - Locking it once and writing all entries is faster for big lists
//
// 4. Why is print_outcome generic over Write?
//    - main passes the locked stdout, tests pass a Vec<u8>
// -----------------------------------------------------------------------------
