//! News site scrapers.
//!
//! | Site | Module | Method |
//! |------|--------|--------|
//! | Wall Street Journal | [`wsj`] | Embedded page state + article page scraping |
//!
//! A scraper turns a route request into a [`FeedResult`](crate::models::FeedResult):
//! it indexes the section page for article links, then fetches every article
//! concurrently with a fixed cap, keeping the section page's order.

pub mod wsj;
