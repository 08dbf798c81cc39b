use serde_json::Value;

use crate::llm::Message;
use crate::search::SearchResultItem;

/// One usable conversation turn recovered from the caller-supplied history.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: String,
    pub content: String,
}

/// History entries arrive either flat or wrapped one level in an envelope
/// (`{"message": {...}}`). Unwraps exactly one level and keeps the entry only
/// if both `role` and `content` are strings; everything else is dropped.
pub fn flatten_turn(entry: &Value) -> Option<Turn> {
    let inner = entry.get("message").unwrap_or(entry);
    let role = inner.get("role")?.as_str()?;
    let content = inner.get("content")?.as_str()?;
    Some(Turn {
        role: role.to_string(),
        content: content.to_string(),
    })
}

pub fn flatten_history(entries: &[Value]) -> Vec<Turn> {
    entries.iter().filter_map(flatten_turn).collect()
}

/// Fixed preamble, history appended. The assistant turn carries the serialized
/// search results as tool context; an empty result set embeds as "[]". The
/// preamble comes first so fresh search context outranks prior turns.
pub fn build_prompt(
    system_prompt: &str,
    query: &str,
    results: &[SearchResultItem],
    history: &[Turn],
) -> Vec<Message> {
    let serialized = serde_json::to_string(results).unwrap_or_else(|_| "[]".to_string());

    let mut messages = vec![
        Message::new("system", system_prompt),
        Message::new("assistant", serialized),
        Message::new("user", query),
    ];
    messages.extend(
        history
            .iter()
            .map(|t| Message::new(&t.role, t.content.clone())),
    );
    messages
}
