//! RSS 2.0 rendering.
//!
//! ```text
//! <rss version="2.0">
//!   <channel>
//!     <title>WSJ - EN-US - opinion</title>
//!     <link>https://www.wsj.com/opinion</link>
//!     ...
//!     <item>…</item>
//!   </channel>
//! </rss>
//! ```
//!
//! Item bodies are HTML and are written as escaped text. Optional item fields
//! are left out when the article page did not provide them.

use crate::error::FeedError;
use crate::models::{ArticleItem, FeedResult};
use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;

const GENERATOR: &str = concat!("wsj_feed ", env!("CARGO_PKG_VERSION"));

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Render `feed` as an RSS 2.0 document stamped with `build_date`.
pub fn render_rss(feed: &FeedResult, build_date: DateTime<Utc>) -> Result<String, FeedError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    write(&mut writer, Event::Start(rss))?;
    write(&mut writer, Event::Start(BytesStart::new("channel")))?;

    text_element(&mut writer, "title", &feed.title)?;
    text_element(&mut writer, "link", &feed.link)?;
    text_element(&mut writer, "description", &feed.description)?;
    text_element(&mut writer, "generator", GENERATOR)?;
    text_element(&mut writer, "lastBuildDate", &build_date.to_rfc2822())?;

    for item in &feed.items {
        write_item(&mut writer, item)?;
    }

    write(&mut writer, Event::End(BytesEnd::new("channel")))?;
    write(&mut writer, Event::End(BytesEnd::new("rss")))?;

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| FeedError::Render(format!("generated RSS is not UTF-8: {e}")))
}

fn write_item(writer: &mut XmlWriter, item: &ArticleItem) -> Result<(), FeedError> {
    write(writer, Event::Start(BytesStart::new("item")))?;

    text_element(writer, "title", &item.title)?;
    text_element(writer, "link", &item.link)?;

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "true"));
    write(writer, Event::Start(guid))?;
    write(writer, Event::Text(BytesText::new(&item.link)))?;
    write(writer, Event::End(BytesEnd::new("guid")))?;

    text_element(writer, "description", &item.description)?;
    if let Some(date) = item.pub_date {
        text_element(writer, "pubDate", &date.to_rfc2822())?;
    }
    if let Some(author) = &item.author {
        text_element(writer, "author", author)?;
    }
    if let Some(category) = &item.category {
        text_element(writer, "category", category)?;
    }

    write(writer, Event::End(BytesEnd::new("item")))
}

fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<(), FeedError> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write(writer: &mut XmlWriter, event: Event<'_>) -> Result<(), FeedError> {
    writer
        .write_event(event)
        .map_err(|e| FeedError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn feed() -> FeedResult {
        FeedResult {
            title: "WSJ - EN-US - opinion".to_string(),
            link: "https://www.wsj.com/opinion".to_string(),
            description: "WSJ - EN-US - opinion".to_string(),
            items: vec![
                ArticleItem {
                    title: "Rates & Risks".to_string(),
                    link: "https://www.wsj.com/articles/rates-1".to_string(),
                    description: "<p>Body</p>".to_string(),
                    summary: None,
                    pub_date: Some(Utc.with_ymd_and_hms(2025, 3, 14, 10, 15, 0).unwrap()),
                    author: Some("Jane Reporter".to_string()),
                    category: Some("Opinion".to_string()),
                    source_key: "article_1".to_string(),
                },
                ArticleItem {
                    title: "Second".to_string(),
                    link: "https://www.wsj.com/articles/second-2".to_string(),
                    description: String::new(),
                    summary: None,
                    pub_date: None,
                    author: None,
                    category: None,
                    source_key: "article_2".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_render_rss_channel_and_items() {
        let build = Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap();
        let xml = render_rss(&feed(), build).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<rss version=\"2.0\">"));
        assert!(xml.contains("<title>WSJ - EN-US - opinion</title>"));
        assert!(xml.contains("<link>https://www.wsj.com/opinion</link>"));
        assert!(xml.contains("<lastBuildDate>Sat, 15 Mar 2025 00:00:00 +0000</lastBuildDate>"));
        assert!(xml.contains("<title>Rates &amp; Risks</title>"));
        assert!(xml.contains("<description>&lt;p&gt;Body&lt;/p&gt;</description>"));
        assert!(xml.contains("<pubDate>Fri, 14 Mar 2025 10:15:00 +0000</pubDate>"));
        assert!(xml.contains(
            "<guid isPermaLink=\"true\">https://www.wsj.com/articles/rates-1</guid>"
        ));
        assert_eq!(xml.matches("<item>").count(), 2);
    }

    #[test]
    fn test_render_rss_keeps_item_order_and_omits_missing_fields() {
        let xml = render_rss(&feed(), Utc::now()).unwrap();
        let first = xml.find("rates-1").unwrap();
        let second = xml.find("second-2").unwrap();
        assert!(first < second);
        assert_eq!(xml.matches("<pubDate>").count(), 1);
        assert_eq!(xml.matches("<author>").count(), 1);
        assert_eq!(xml.matches("<category>").count(), 1);
    }
}
