use super::{reject, ApiClient, ApiError, ApiResult, RawResponse};
use crate::core::chat::{Chat, Message};
use crate::utils::url::{append_query, encode_component};
use serde_json::Value;

pub const CHATS: &str = "/api/chats";
pub const CHAT_LOAD: &str = "/api/chats/load";
pub const CHAT_MESSAGE: &str = "/api/chat";

#[derive(Clone, Copy)]
pub struct ChatsApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl ChatsApi<'_> {
    /// Saved chats, taken out of the response's `data` envelope.
    pub async fn list(self) -> ApiResult<Value> {
        let response = self.client.get(CHATS).await?;
        unwrap_envelope(CHATS, response)
    }

    pub async fn load_chat(self, name: &str) -> ApiResult<Chat> {
        let endpoint = append_query(CHAT_LOAD, "chat_name", &encode_component(name));
        let response = self.client.get(&endpoint).await?;
        let data = unwrap_envelope(CHAT_LOAD, response)?;
        serde_json::from_value(data).map_err(|source| {
            reject(CHAT_LOAD, ApiError::Decode {
                what: "chat",
                source,
            })
        })
    }

    /// Local constructor; touches neither the network nor the request counter.
    pub fn new_chat(self) -> Chat {
        Chat::new()
    }

    /// Send `chat` and append the backend's reply to it.
    ///
    /// The chat is updated in place and the same reference is handed back,
    /// so callers holding `chat` see the new message immediately. On failure
    /// the chat is left untouched.
    pub async fn message<'c>(self, chat: &'c mut Chat) -> ApiResult<&'c mut Chat> {
        let response = self.client.post(CHAT_MESSAGE, &*chat).await?;
        let reply: Message =
            serde_json::from_value(response.data).map_err(|source| {
                reject(CHAT_MESSAGE, ApiError::Decode {
                    what: "chat reply",
                    source,
                })
            })?;
        chat.messages.push(reply);
        Ok(chat)
    }

    pub async fn save(self, chat: &Chat) -> ApiResult<RawResponse> {
        self.client.put(CHATS, chat).await
    }
}

fn unwrap_envelope(endpoint: &str, response: RawResponse) -> ApiResult<Value> {
    response
        .into_envelope_data()
        .ok_or_else(|| {
            reject(endpoint, ApiError::MissingEnvelope {
                endpoint: endpoint.to_string(),
            })
        })
}
