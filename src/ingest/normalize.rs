// src/ingest/normalize.rs
//! Maps one raw feed item into the canonical `News` record: title cleanup,
//! image extraction, source extraction, date coercion. Heat and category are
//! left to the later pipeline stages.

use once_cell::sync::Lazy;
use regex::Regex;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::format_description::OwnedFormatItem;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::warn;

use crate::ingest::types::{Category, News, RawDate, RawFeedItem};

pub const UNKNOWN_SOURCE: &str = "Unknown Source";

static RE_IMG_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img[^>]+src="([^">]+)""#).expect("valid img regex"));

// The conversion endpoint's own date format ("2025-01-02 03:04:05", UTC).
static FMT_ENDPOINT: Lazy<OwnedFormatItem> = Lazy::new(|| {
    time::format_description::parse_owned::<2>("[year]-[month]-[day] [hour]:[minute]:[second]")
        .expect("valid endpoint date format")
});

/// Produce a canonical record from a raw item, or `None` when the item is
/// unusable (empty title after cleanup, or an unparsable publish date — a
/// record without a valid date cannot be ranked).
pub fn normalize(raw: &RawFeedItem) -> Option<News> {
    let title = clean_text(&raw.title);
    if title.is_empty() {
        return None;
    }

    let Some(pub_date) = raw.pub_date.as_ref().and_then(parse_pub_date) else {
        warn!(title = %title, date = ?raw.pub_date, "unparsable publish date, dropping item");
        return None;
    };

    let description = clean_text(&raw.description);
    let content = raw
        .content
        .clone()
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| raw.description.clone());

    Some(News {
        image: resolve_image(raw),
        source: resolve_source(raw),
        title,
        description,
        content,
        link: raw.link.clone(),
        pub_date,
        heat: 0.0,
        category: Category::General,
    })
}

/// Decode HTML entities and trim. Titles come through the conversion
/// endpoint with `&amp;`-style noise from some outlets.
fn clean_text(s: &str) -> String {
    html_escape::decode_html_entities(s).trim().to_string()
}

/// Image priority: explicit enclosure → thumbnail → first `<img>` src found
/// in the content → absent.
fn resolve_image(raw: &RawFeedItem) -> Option<String> {
    if let Some(link) = raw
        .enclosure
        .as_ref()
        .and_then(|e| e.link.as_deref())
        .filter(|l| !l.is_empty())
    {
        return Some(link.to_string());
    }
    if let Some(thumb) = raw.thumbnail.as_deref().filter(|t| !t.is_empty()) {
        return Some(thumb.to_string());
    }
    raw.content
        .as_deref()
        .and_then(find_image_in_content)
        .map(str::to_string)
}

fn find_image_in_content(content: &str) -> Option<&str> {
    RE_IMG_SRC
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Source label: author field when present, otherwise the link's first host
/// label with a leading `www.` stripped. Unparsable links default to
/// [`UNKNOWN_SOURCE`] rather than failing the record.
fn resolve_source(raw: &RawFeedItem) -> String {
    if let Some(author) = raw.author.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
        return author.to_string();
    }
    source_from_link(&raw.link).unwrap_or_else(|| UNKNOWN_SOURCE.to_string())
}

fn source_from_link(link: &str) -> Option<String> {
    let url = url::Url::parse(link).ok()?;
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    host.split('.').next().map(str::to_string)
}

/// Coerce a raw publish timestamp to epoch milliseconds. Numeric values are
/// taken as epoch seconds or milliseconds depending on magnitude; strings
/// are tried as RFC 3339, RFC 2822, then the endpoint's own format.
fn parse_pub_date(raw: &RawDate) -> Option<i64> {
    match raw {
        RawDate::Epoch(n) => {
            // Anything below ~5138 AD in seconds is taken as seconds.
            if n.abs() < 100_000_000_000 {
                Some(n * 1000)
            } else {
                Some(*n)
            }
        }
        RawDate::Text(s) => parse_date_text(s.trim()),
    }
}

fn parse_date_text(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(to_epoch_ms(dt));
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc2822) {
        return Some(to_epoch_ms(dt));
    }
    if let Ok(dt) = PrimitiveDateTime::parse(s, &*FMT_ENDPOINT) {
        return Some(to_epoch_ms(dt.assume_utc()));
    }
    None
}

fn to_epoch_ms(dt: OffsetDateTime) -> i64 {
    (dt.unix_timestamp_nanos() / 1_000_000) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::Enclosure;

    fn raw(title: &str) -> RawFeedItem {
        RawFeedItem {
            title: title.into(),
            description: "some description".into(),
            link: "https://www.example.co.uk/story".into(),
            pub_date: Some(RawDate::Text("2025-01-02 03:04:05".into())),
            ..Default::default()
        }
    }

    #[test]
    fn endpoint_date_format_parses() {
        let n = normalize(&raw("Title")).unwrap();
        // 2025-01-02T03:04:05Z
        assert_eq!(n.pub_date, 1_735_787_045_000);
    }

    #[test]
    fn rfc2822_and_rfc3339_parse() {
        assert_eq!(
            parse_date_text("Thu, 02 Jan 2025 03:04:05 GMT"),
            Some(1_735_787_045_000)
        );
        assert_eq!(
            parse_date_text("2025-01-02T03:04:05Z"),
            Some(1_735_787_045_000)
        );
    }

    #[test]
    fn numeric_dates_handle_seconds_and_millis() {
        assert_eq!(parse_pub_date(&RawDate::Epoch(1_735_787_045)), Some(1_735_787_045_000));
        assert_eq!(
            parse_pub_date(&RawDate::Epoch(1_735_787_045_000)),
            Some(1_735_787_045_000)
        );
    }

    #[test]
    fn unparsable_or_missing_date_drops_the_record() {
        let mut r = raw("Title");
        r.pub_date = Some(RawDate::Text("sometime last week".into()));
        assert!(normalize(&r).is_none());
        r.pub_date = None;
        assert!(normalize(&r).is_none());
    }

    #[test]
    fn empty_title_drops_the_record() {
        assert!(normalize(&raw("   ")).is_none());
        assert!(normalize(&raw("")).is_none());
    }

    #[test]
    fn title_entities_are_decoded() {
        let n = normalize(&raw("Profits &amp; Losses")).unwrap();
        assert_eq!(n.title, "Profits & Losses");
    }

    #[test]
    fn content_falls_back_to_description() {
        let n = normalize(&raw("Title")).unwrap();
        assert_eq!(n.content, "some description");

        let mut r = raw("Title");
        r.content = Some("<p>full body</p>".into());
        assert_eq!(normalize(&r).unwrap().content, "<p>full body</p>");
    }

    #[test]
    fn image_priority_enclosure_thumbnail_content() {
        let mut r = raw("Title");
        r.content = Some(r#"<p>x</p><img class="a" src="https://x.test/c.jpg">"#.into());
        assert_eq!(normalize(&r).unwrap().image.unwrap(), "https://x.test/c.jpg");

        r.thumbnail = Some("https://x.test/t.jpg".into());
        assert_eq!(normalize(&r).unwrap().image.unwrap(), "https://x.test/t.jpg");

        r.enclosure = Some(Enclosure {
            link: Some("https://x.test/e.jpg".into()),
        });
        assert_eq!(normalize(&r).unwrap().image.unwrap(), "https://x.test/e.jpg");
    }

    #[test]
    fn no_image_anywhere_is_none() {
        assert!(normalize(&raw("Title")).unwrap().image.is_none());
    }

    #[test]
    fn source_prefers_author_then_host_label() {
        let mut r = raw("Title");
        assert_eq!(normalize(&r).unwrap().source, "example");

        r.author = Some("Jane Doe".into());
        assert_eq!(normalize(&r).unwrap().source, "Jane Doe");
    }

    #[test]
    fn www_prefix_is_stripped_and_first_label_taken() {
        assert_eq!(source_from_link("https://www.bbc.co.uk/news").unwrap(), "bbc");
        assert_eq!(source_from_link("https://feeds.bbci.co.uk/x").unwrap(), "feeds");
    }

    #[test]
    fn unparsable_link_defaults_source() {
        let mut r = raw("Title");
        r.link = "#".into();
        assert_eq!(normalize(&r).unwrap().source, UNKNOWN_SOURCE);
    }
}
