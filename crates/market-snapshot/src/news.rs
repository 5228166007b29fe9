//! Headline extraction from loosely-typed provider payloads
//!
//! Yahoo has served news items in two shapes over time: a flat object with a
//! `title`, and a newer one nesting it under `content.title`. Anything else is
//! kept as [`NewsItem::Unrecognized`] so one odd item never sinks the batch.

use crate::error::SnapshotError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Shown when the provider answered but had no usable headline
pub const NO_NEWS_PLACEHOLDER: &str = "No recent news found.";
/// Shown when the news request itself failed
pub const NEWS_UNAVAILABLE_PLACEHOLDER: &str = "News temporarily unavailable (source error).";

/// A news item in one of the known payload shapes
///
/// Variants are tried top to bottom during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NewsItem {
    /// `{ "content": { "title": "..." } }`, possibly with a flat `title` too
    Nested {
        content: NestedContent,
        #[serde(
            default,
            deserialize_with = "string_or_none",
            skip_serializing_if = "Option::is_none"
        )]
        title: Option<String>,
    },
    /// `{ "title": "..." }`
    Flat { title: String },
    /// Any other JSON value
    Unrecognized(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedContent {
    pub title: String,
}

/// A secondary title of any other JSON type is ignored rather than
/// rejecting the whole item
fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(title) => Some(title),
        _ => None,
    })
}

type TitleStrategy = fn(&NewsItem) -> Option<&str>;

/// Extraction strategies in order of preference
const TITLE_STRATEGIES: &[TitleStrategy] = &[nested_title, flat_title];

fn nested_title(item: &NewsItem) -> Option<&str> {
    match item {
        NewsItem::Nested { content, .. } => Some(content.title.as_str()),
        NewsItem::Flat { .. } | NewsItem::Unrecognized(_) => None,
    }
}

fn flat_title(item: &NewsItem) -> Option<&str> {
    match item {
        NewsItem::Flat { title } => Some(title.as_str()),
        NewsItem::Nested { title, .. } => title.as_deref(),
        NewsItem::Unrecognized(_) => None,
    }
}

impl NewsItem {
    /// First non-blank title any strategy yields
    pub fn headline(&self) -> Option<&str> {
        TITLE_STRATEGIES
            .iter()
            .filter_map(|strategy| strategy(self))
            .map(str::trim)
            .find(|title| !title.is_empty())
    }
}

/// Headlines to display: up to `limit` titles, or exactly one placeholder
///
/// Never returns an empty list.
pub fn headlines_or_placeholder(
    fetched: std::result::Result<Vec<NewsItem>, SnapshotError>,
    limit: usize,
) -> Vec<String> {
    match fetched {
        Ok(items) => {
            let titles: Vec<String> = items
                .iter()
                .take(limit)
                .filter_map(NewsItem::headline)
                .map(str::to_string)
                .collect();
            if titles.is_empty() {
                vec![NO_NEWS_PLACEHOLDER.to_string()]
            } else {
                titles
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "News request failed, using placeholder");
            vec![NEWS_UNAVAILABLE_PLACEHOLDER.to_string()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> NewsItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parses_known_shapes() {
        assert!(matches!(
            parse(json!({ "content": { "title": "Gold hits record" } })),
            NewsItem::Nested { .. }
        ));
        assert!(matches!(
            parse(json!({ "title": "Fed holds rates", "publisher": "Reuters" })),
            NewsItem::Flat { .. }
        ));
        assert!(matches!(
            parse(json!({ "headline": "elsewhere" })),
            NewsItem::Unrecognized(_)
        ));
        assert!(matches!(parse(json!(42)), NewsItem::Unrecognized(_)));
    }

    #[test]
    fn test_nested_title_wins_over_flat() {
        let item = parse(json!({ "title": "flat", "content": { "title": "nested" } }));
        assert_eq!(item.headline(), Some("nested"));
    }

    #[test]
    fn test_non_string_flat_title_keeps_nested_headline() {
        for flat in [json!(5), json!({ "raw": "x" }), json!(["a"]), json!(null)] {
            let item = parse(json!({ "content": { "title": "Nested ok" }, "title": flat }));
            assert!(matches!(item, NewsItem::Nested { title: None, .. }));
            assert_eq!(item.headline(), Some("Nested ok"));
        }
    }

    #[test]
    fn test_falls_back_to_flat_when_nested_is_blank_or_missing() {
        let item = parse(json!({ "title": "flat", "content": { "title": "  " } }));
        assert_eq!(item.headline(), Some("flat"));

        let item = parse(json!({ "title": "flat", "content": { "summary": "x" } }));
        assert_eq!(item.headline(), Some("flat"));
    }

    #[test]
    fn test_item_without_title_yields_nothing() {
        assert_eq!(parse(json!({ "content": { "id": 1 } })).headline(), None);
        assert_eq!(parse(json!({ "title": "" })).headline(), None);
        assert_eq!(parse(json!(null)).headline(), None);
    }

    #[test]
    fn test_headlines_keep_order_and_limit() {
        let items = vec![
            parse(json!({ "title": "one" })),
            parse(json!({ "content": { "title": "two" } })),
            parse(json!({ "title": "three" })),
            parse(json!({ "title": "four" })),
        ];
        assert_eq!(
            headlines_or_placeholder(Ok(items), 3),
            vec!["one", "two", "three"]
        );
    }

    #[test]
    fn test_malformed_items_are_skipped() {
        let items = vec![
            parse(json!({ "uuid": "a" })),
            parse(json!({ "title": "kept" })),
        ];
        assert_eq!(headlines_or_placeholder(Ok(items), 3), vec!["kept"]);
    }

    #[test]
    fn test_empty_response_gives_no_news_placeholder() {
        assert_eq!(
            headlines_or_placeholder(Ok(Vec::new()), 3),
            vec![NO_NEWS_PLACEHOLDER]
        );
        let junk = vec![parse(json!({})), parse(json!([1, 2]))];
        assert_eq!(
            headlines_or_placeholder(Ok(junk), 3),
            vec![NO_NEWS_PLACEHOLDER]
        );
    }

    #[test]
    fn test_error_gives_unavailable_placeholder() {
        let err = SnapshotError::YahooFinanceError("503".to_string());
        assert_eq!(
            headlines_or_placeholder(Err(err), 3),
            vec![NEWS_UNAVAILABLE_PLACEHOLDER]
        );
    }
}
