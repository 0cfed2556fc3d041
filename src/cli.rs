//! Command-line interface definitions for wsj_feed.
//!
//! All options can be provided via command-line flags; the cookie and the
//! timeout also fall back to environment variables.

use crate::models::RouteRequest;
use crate::outputs::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for wsj_feed.
///
/// # Examples
///
/// ```sh
/// # Opinion section as RSS on stdout
/// wsj_feed en-us/opinion
///
/// # Simplified Chinese front page as JSON, with a logged-in cookie
/// WSJ_COOKIE='wsjsession=…;' wsj_feed zh-cn --format json -o feeds/zh-cn.json
///
/// # Category slugs for traditional Chinese
/// wsj_feed zh-tw --list-categories
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Route `lang[/category]`; lang is en-us, zh-cn or zh-tw
    pub route: RouteRequest,

    /// Base WSJ cookie; without it no cookie header is sent
    #[arg(long, env = "WSJ_COOKIE", hide_env_values = true)]
    pub cookie: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Rss)]
    pub format: OutputFormat,

    /// Write the feed to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Per-request HTTP timeout in seconds
    #[arg(long, env = "WSJ_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Print the known category slugs for the route's language and exit
    #[arg(long)]
    pub list_categories: bool,
}
