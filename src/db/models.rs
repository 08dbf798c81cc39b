use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A persisted conversation row. Identifiers are externally supplied; this
/// service never mints them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: i64,
    pub chat_id: String,
    pub user_id: String,
    pub assistant_id: Option<String>,
    pub role: String,
    pub content: String,
    pub model: Option<String>,
    pub sequence_number: i64,
    pub image_paths: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub chat_id: String,
    pub user_id: String,
    pub assistant_id: Option<String>,
    pub role: String,
    pub content: String,
    pub model: Option<String>,
    pub sequence_number: i64,
    pub image_paths: Value,
}

/// Where (and whether) this request's turns get persisted, derived from the
/// last caller-supplied history entry. Without chat_id and user_id there is
/// no target and nothing is written.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistTarget {
    pub chat_id: String,
    pub user_id: String,
    pub assistant_id: Option<String>,
    /// Sequence cursor; the user turn lands at cursor+1, the assistant turn
    /// at cursor+2. Concurrent requests for the same chat can race here.
    pub cursor: i64,
}

impl PersistTarget {
    pub fn from_history(history: &[Value]) -> Option<Self> {
        let last = history.last()?;
        let entry = last.get("message").unwrap_or(last);

        let chat_id = entry.get("chat_id")?.as_str()?.to_string();
        let user_id = entry.get("user_id")?.as_str()?.to_string();
        let assistant_id = entry
            .get("assistant_id")
            .and_then(Value::as_str)
            .map(str::to_string);
        let cursor = entry
            .get("sequence_number")
            .and_then(Value::as_i64)
            .unwrap_or(history.len() as i64);

        Some(Self {
            chat_id,
            user_id,
            assistant_id,
            cursor,
        })
    }

    pub fn user_row(&self, content: &str, model: Option<&str>) -> NewMessage {
        self.row("user", self.cursor + 1, content, model)
    }

    pub fn assistant_row(&self, content: &str, model: Option<&str>) -> NewMessage {
        self.row("assistant", self.cursor + 2, content, model)
    }

    fn row(&self, role: &str, sequence_number: i64, content: &str, model: Option<&str>) -> NewMessage {
        NewMessage {
            chat_id: self.chat_id.clone(),
            user_id: self.user_id.clone(),
            assistant_id: self.assistant_id.clone(),
            role: role.to_string(),
            content: content.to_string(),
            model: model.map(str::to_string),
            sequence_number,
            image_paths: Value::Array(vec![]),
        }
    }
}
