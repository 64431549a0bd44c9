use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const DEFAULT_CHAT_NAME: &str = "New chat";

pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

/// One entry of a chat transcript.
///
/// The backend owns the message schema. `content` is usually a string but
/// may be `null` or a list of parts; fields other than `role` and `content`
/// are kept in `extra` and sent back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<Value>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ROLE_USER, Value::String(content.into()))
    }

    /// Content as plain text, when the backend sent a string.
    pub fn text(&self) -> Option<&str> {
        self.content.as_str()
    }
}

/// Chat identifier. Chats created here use a millisecond timestamp; the
/// backend stores ids as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Millis(i64),
    Text(String),
}

impl ChatId {
    /// Creation time in milliseconds, for numeric ids and numeric strings.
    pub fn as_millis(&self) -> Option<i64> {
        match self {
            ChatId::Millis(millis) => Some(*millis),
            ChatId::Text(text) => text.parse().ok(),
        }
    }
}

impl From<i64> for ChatId {
    fn from(millis: i64) -> Self {
        ChatId::Millis(millis)
    }
}

impl From<String> for ChatId {
    fn from(text: String) -> Self {
        ChatId::Text(text)
    }
}

impl From<&str> for ChatId {
    fn from(text: &str) -> Self {
        ChatId::Text(text.to_string())
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Millis(millis) => write!(f, "{millis}"),
            ChatId::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    /// Display name; chats stored by the backend may not carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Chat {
    /// Fresh, empty chat stamped with the current time.
    ///
    /// Two chats created within the same millisecond share an id.
    pub fn new() -> Self {
        Self::with_id(Utc::now().timestamp_millis())
    }

    pub fn with_id(id: i64) -> Self {
        Self {
            id: ChatId::Millis(id),
            name: Some(DEFAULT_CHAT_NAME.to_string()),
            messages: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl Default for Chat {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_chat_uses_default_name_and_current_time() {
        let before = Utc::now().timestamp_millis();
        let chat = Chat::new();
        let after = Utc::now().timestamp_millis();

        assert_eq!(chat.name.as_deref(), Some(DEFAULT_CHAT_NAME));
        assert!(chat.messages.is_empty());
        let millis = chat.id.as_millis().expect("numeric id");
        assert!(millis >= before && millis <= after);
    }

    #[test]
    fn chat_round_trips_unknown_fields() {
        let raw = json!({
            "id": 1,
            "name": "t",
            "messages": [{"role": "assistant", "content": "hi", "files": ["a.rs"]}],
            "profile": "default"
        });

        let chat: Chat = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(chat.messages[0].extra.get("files"), Some(&json!(["a.rs"])));
        assert_eq!(serde_json::to_value(&chat).unwrap(), raw);
    }

    #[test]
    fn missing_messages_default_to_empty() {
        let chat: Chat = serde_json::from_value(json!({"id": 5, "name": "x"})).unwrap();
        assert!(chat.messages.is_empty());
        assert!(chat.last_message().is_none());
    }

    #[test]
    fn backend_chat_with_string_id_and_no_name() {
        let raw = json!({"id": "1700000000000", "messages": []});

        let chat: Chat = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(chat.id, ChatId::Text("1700000000000".to_string()));
        assert_eq!(chat.id.as_millis(), Some(1_700_000_000_000));
        assert_eq!(chat.name, None);
        assert_eq!(serde_json::to_value(&chat).unwrap(), raw);
    }

    #[test]
    fn message_content_is_not_limited_to_text() {
        let empty: Message =
            serde_json::from_value(json!({"role": "assistant", "content": null})).unwrap();
        assert_eq!(empty.content, Value::Null);
        assert_eq!(empty.text(), None);

        let parts = json!([{"type": "text", "text": "see"}, {"type": "image_url"}]);
        let multi: Message =
            serde_json::from_value(json!({"role": "user", "content": parts.clone()})).unwrap();
        assert_eq!(multi.content, parts);

        let bare: Message = serde_json::from_value(json!({"tool": "run"})).unwrap();
        assert_eq!(bare.role, "");
        assert_eq!(bare.content, Value::Null);
        assert_eq!(bare.extra.get("tool"), Some(&json!("run")));
    }
}
