// Messages exchanged with the content script and the background service worker
// Wire shape: { type: "COUNT", payload: { count } }

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PopupMessage {
    // Popup -> active tab content script, after every counter mutation
    Count { count: i64 },

    // Popup -> background, once on load
    Greetings { message: String },
}

impl PopupMessage {
    pub fn count(count: i64) -> Self {
        PopupMessage::Count { count }
    }

    pub fn greetings(message: impl Into<String>) -> Self {
        PopupMessage::Greetings {
            message: message.into(),
        }
    }
}

/// Acknowledgement sent back by either collaborator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
