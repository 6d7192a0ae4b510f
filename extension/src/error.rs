use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures talking to `chrome.storage`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("stored value for '{key}' is not an integer: {value}")]
    InvalidValue { key: String, value: String },

    #[error("failed to encode storage entry: {0}")]
    Encode(String),
}

/// Failures delivering a one-shot runtime or tab message.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("no active tab in the current window")]
    NoActiveTab,

    #[error("message rejected: {0}")]
    Rejected(String),

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse popup config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid popup config: {0}")]
    Invalid(String),
}

/// Render a rejected promise or thrown host value as text.
pub(crate) fn describe_js(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    js_sys::JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

impl From<JsValue> for StorageError {
    fn from(value: JsValue) -> Self {
        StorageError::Unavailable(describe_js(&value))
    }
}

impl From<JsValue> for SendError {
    fn from(value: JsValue) -> Self {
        SendError::Rejected(describe_js(&value))
    }
}
