use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ChatSettings {
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

/// Inbound body for the search-augmented chat endpoint. History entries stay
/// raw JSON here: they may be flat turns or one-level envelopes, and the
/// persistence identifiers ride along on them.
#[derive(Debug, Deserialize)]
pub struct SearchChatRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, rename = "chatSettings")]
    pub chat_settings: Option<ChatSettings>,
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,
}
