// Chrome runtime/tabs messaging
// One-shot request/response to the active tab's content script and the background worker

use std::rc::Rc;

use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::error::SendError;
use crate::messages::{MessageResponse, PopupMessage};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
    fn tabs_query(query_info: JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = sendMessage)]
    fn tabs_send_message(tab_id: f64, message: JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime"], js_name = sendMessage)]
    fn runtime_send_message(message: JsValue) -> Result<js_sys::Promise, JsValue>;
}

/// Outbound messaging capability used by the popup.
#[async_trait(?Send)]
pub trait Messenger {
    /// Send to the content script of the active tab in the current window.
    async fn send_to_active_tab(&self, message: &PopupMessage)
        -> Result<MessageResponse, SendError>;

    /// Send to the extension's background service worker.
    async fn send_to_runtime(&self, message: &PopupMessage) -> Result<MessageResponse, SendError>;
}

#[async_trait(?Send)]
impl<T: Messenger + ?Sized> Messenger for Rc<T> {
    async fn send_to_active_tab(
        &self,
        message: &PopupMessage,
    ) -> Result<MessageResponse, SendError> {
        (**self).send_to_active_tab(message).await
    }

    async fn send_to_runtime(&self, message: &PopupMessage) -> Result<MessageResponse, SendError> {
        (**self).send_to_runtime(message).await
    }
}

/// Announce the popup to the background worker and log its reply.
pub async fn greet_background<M: Messenger + ?Sized>(
    messenger: &M,
    greeting: &str,
) -> Result<MessageResponse, SendError> {
    let response = messenger
        .send_to_runtime(&PopupMessage::greetings(greeting))
        .await?;
    log::info!("Background replied: {}", response.message);
    Ok(response)
}

#[derive(Clone, Default)]
pub struct ChromeMessenger;

impl ChromeMessenger {
    pub fn new() -> Self {
        Self
    }

    async fn active_tab_id(&self) -> Result<f64, SendError> {
        let query = js_sys::Object::new();
        js_sys::Reflect::set(&query, &"active".into(), &JsValue::TRUE)?;
        js_sys::Reflect::set(&query, &"currentWindow".into(), &JsValue::TRUE)?;

        let tabs = JsFuture::from(tabs_query(query.into())?).await?;
        let tabs = js_sys::Array::from(&tabs);

        let tab = tabs.get(0);
        if tab.is_undefined() {
            return Err(SendError::NoActiveTab);
        }

        js_sys::Reflect::get(&tab, &"id".into())?
            .as_f64()
            .ok_or(SendError::NoActiveTab)
    }
}

#[async_trait(?Send)]
impl Messenger for ChromeMessenger {
    async fn send_to_active_tab(
        &self,
        message: &PopupMessage,
    ) -> Result<MessageResponse, SendError> {
        let tab_id = self.active_tab_id().await?;
        log::debug!("Sending {:?} to tab {}", message, tab_id);

        let response = JsFuture::from(tabs_send_message(tab_id, to_js(message)?)?).await?;
        from_js(&response)
    }

    async fn send_to_runtime(&self, message: &PopupMessage) -> Result<MessageResponse, SendError> {
        log::debug!("Sending {:?} to background", message);

        let response = JsFuture::from(runtime_send_message(to_js(message)?)?).await?;
        from_js(&response)
    }
}

fn to_js(message: &PopupMessage) -> Result<JsValue, SendError> {
    let json = serde_json::to_string(message)?;
    Ok(js_sys::JSON::parse(&json)?)
}

fn from_js(response: &JsValue) -> Result<MessageResponse, SendError> {
    if response.is_undefined() || response.is_null() {
        return decode_response(None);
    }
    let json = js_sys::JSON::stringify(response)?
        .as_string()
        .ok_or_else(|| SendError::MalformedResponse("response is not serializable".into()))?;
    decode_response(Some(&json))
}

/// A listener that never calls `sendResponse` resolves to `undefined`.
fn decode_response(json: Option<&str>) -> Result<MessageResponse, SendError> {
    match json {
        None => Ok(MessageResponse::default()),
        Some(json) => serde_json::from_str(json)
            .map_err(|e| SendError::MalformedResponse(format!("{}: {}", e, json))),
    }
}
