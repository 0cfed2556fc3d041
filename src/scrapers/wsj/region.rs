//! Language and category lookup tables.
//!
//! Maps a [`RouteRequest`] to the page URL, the cookie header and the
//! subtitle used in the feed title. Everything here is a pure function of
//! its inputs.

use crate::models::{Language, ResolvedTarget, RouteRequest};
use tracing::debug;

/// `cn.wsj.com/zh-hans` redirects here, so the simplified Chinese front page
/// is fetched from the root host directly.
const ZH_CN_FRONT_PAGE: &str = "https://cn.wsj.com";

/// Privacy-regulation opt-out flags appended to every configured cookie.
const COOKIE_SUFFIX: &str = "gdprApplies=false; ccpaApplies=false; vcdpaApplies=false; regulationApplies=gdpr%3Afalse%2Ccpra%3Afalse%2Cvcdpa%3Afalse0";

pub fn host(language: Language) -> &'static str {
    match language {
        Language::EnUs => "https://www.wsj.com",
        Language::ZhCn => "https://cn.wsj.com/zh-hans",
        Language::ZhTw => "https://cn.wsj.com/zh-hant",
    }
}

/// Unencoded value of the `wsjregion` cookie.
pub fn region_code(language: Language) -> &'static str {
    match language {
        Language::EnUs => "na,us",
        Language::ZhCn => "asia,cn",
        Language::ZhTw => "asia,cn_hant",
    }
}

/// Category slugs listed for each edition. Not enforced; any slug is fetched.
pub fn known_categories(language: Language) -> &'static [&'static str] {
    match language {
        Language::EnUs => &[
            "world",
            "us",
            "politics",
            "economy",
            "business",
            "technology",
            "markets",
            "opinion",
            "books-arts",
            "realestate",
            "life-work",
            "style-entertainment",
            "sports",
        ],
        Language::ZhCn | Language::ZhTw => &[
            "world",
            "china",
            "markets",
            "economy",
            "business",
            "technology",
            "life-arts",
            "opinion",
        ],
    }
}

/// Build the `Cookie` header for `language`.
///
/// Without a base cookie nothing is sent, not even the region flags.
pub fn cookie_header(base_cookie: Option<&str>, language: Language) -> String {
    match base_cookie.map(str::trim) {
        Some(base) if !base.is_empty() => format!(
            "{base} wsjregion={}; {COOKIE_SUFFIX}",
            urlencoding::encode(region_code(language))
        ),
        _ => String::new(),
    }
}

/// Resolve the page URL, cookie header and subtitle for a request.
pub fn resolve_target(request: &RouteRequest, base_cookie: Option<&str>) -> ResolvedTarget {
    let language = request.language;
    let host = host(language);
    let mut subtitle_suffix = format!(" - {}", language.as_str().to_uppercase());

    let url = match request.category.as_deref() {
        Some(category) => {
            subtitle_suffix.push_str(" - ");
            subtitle_suffix.push_str(category);
            match language {
                Language::EnUs => format!("{host}/{category}"),
                Language::ZhCn | Language::ZhTw => format!("{host}/news/{category}"),
            }
        }
        None if language == Language::ZhCn => ZH_CN_FRONT_PAGE.to_string(),
        None => host.to_string(),
    };

    let target = ResolvedTarget {
        url,
        cookie_header: cookie_header(base_cookie, language),
        subtitle_suffix,
    };
    debug!(url = %target.url, has_cookie = !target.cookie_header.is_empty(), "Resolved target");
    target
}
