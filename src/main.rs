//! # wsj_feed
//!
//! Builds full-article RSS feeds from Wall Street Journal region and
//! category pages.
//!
//! ## Usage
//!
//! ```sh
//! wsj_feed en-us/opinion > opinion.xml
//! wsj_feed zh-cn --format json
//! ```
//!
//! ## Architecture
//!
//! Each run is one linear pipeline:
//! 1. **Resolving**: map language and category to a URL and cookie
//! 2. **Indexing**: fetch the section page and pull article links out of its embedded state
//! 3. **Fetching**: download every article page (10 at a time, order preserved)
//! 4. **Output**: render RSS or JSON to stdout or a file

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod error;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use scrapers::wsj::{self, article::HttpArticleResolver, page::PageFetcher, region};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(route = ?args.route, format = ?args.format, output = ?args.output, "Parsed CLI arguments");

    if args.list_categories {
        for slug in region::known_categories(args.route.language) {
            println!("{slug}");
        }
        return Ok(());
    }

    let cookie = args.cookie.as_deref().filter(|c| !c.trim().is_empty());
    let fetcher = PageFetcher::new(Duration::from_secs(args.timeout_secs))?;
    let resolver = HttpArticleResolver::new(
        fetcher.clone(),
        region::cookie_header(cookie, args.route.language),
    );

    info!(
        lang = %args.route.language,
        category = args.route.category.as_deref().unwrap_or(""),
        has_cookie = cookie.is_some(),
        "wsj_feed starting up"
    );

    let feed = match wsj::generate_feed(&fetcher, &resolver, &args.route, cookie).await {
        Ok(feed) => feed,
        Err(e) => {
            error!(error = %e, network = e.is_network(), "Feed generation failed");
            return Err(e.into());
        }
    };

    let document = outputs::render(&feed, args.format)?;
    outputs::write_output(&document, args.output.as_deref()).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        items = feed.items.len(),
        title = %feed.title,
        "Execution complete"
    );
    Ok(())
}
