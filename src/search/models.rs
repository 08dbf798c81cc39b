use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Normalized projection of one organic result. Serialized verbatim into the
/// prompt; fields the provider omitted are skipped rather than sent as null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultItem {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

// --- Raw provider response: tasks[0].result[0].items[] ---
// Every level is optional; a hole anywhere yields an empty item list.

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tasks: Vec<SearchTask>,
}

#[derive(Debug, Deserialize)]
pub struct SearchTask {
    #[serde(default)]
    pub result: Vec<SearchTaskResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchTaskResult {
    #[serde(default)]
    pub items: Vec<RawResultItem>,
}

#[derive(Debug, Deserialize)]
pub struct RawResultItem {
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub timestamp: Option<String>,
    pub website_name: Option<String>,
}

impl SearchResponse {
    /// Flattens tasks[0].result[0].items into normalized items.
    pub fn into_items(self) -> Vec<SearchResultItem> {
        self.tasks
            .into_iter()
            .next()
            .and_then(|task| task.result.into_iter().next())
            .map(|result| result.items.into_iter().map(normalize_item).collect())
            .unwrap_or_default()
    }
}

pub fn normalize_item(raw: RawResultItem) -> SearchResultItem {
    SearchResultItem {
        item_type: raw.item_type,
        title: raw.title,
        link: raw.url,
        snippet: raw.description,
        image: raw.image_url,
        date: raw.timestamp.as_deref().and_then(timestamp_date),
        channel: raw.website_name,
    }
}

/// Provider timestamps look like "2024-01-01 00:00:00"; only the calendar
/// date is worth embedding in the prompt.
fn timestamp_date(ts: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.date().to_string())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_keeps_date_part() {
        assert_eq!(
            timestamp_date("2024-01-01 00:00:00"),
            Some("2024-01-01".to_string())
        );
        assert_eq!(timestamp_date("not a timestamp"), None);
    }

    #[test]
    fn empty_tasks_yield_no_items() {
        let resp: SearchResponse = serde_json::from_str(r#"{"tasks": []}"#).unwrap();
        assert!(resp.into_items().is_empty());

        let resp: SearchResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(resp.into_items().is_empty());
    }

    #[test]
    fn none_fields_are_skipped_when_serialized() {
        let item = SearchResultItem {
            item_type: Some("organic".to_string()),
            title: Some("Paris Weather".to_string()),
            link: Some("https://x".to_string()),
            snippet: None,
            image: None,
            date: None,
            channel: None,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(
            json,
            r#"{"type":"organic","title":"Paris Weather","link":"https://x"}"#
        );
    }
}
