// Chrome Storage API integration for the persisted counter

use std::rc::Rc;

use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::config::{StorageArea, StorageConfig};
use crate::error::StorageError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "sync"], js_name = get)]
    fn sync_get(keys: JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "sync"], js_name = set)]
    fn sync_set(items: JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = get)]
    fn local_get(keys: JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = set)]
    fn local_set(items: JsValue) -> Result<js_sys::Promise, JsValue>;
}

/// Largest integer a JS number holds exactly (`Number.MAX_SAFE_INTEGER`).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Persistence capability for the popup counter.
///
/// `get` yields `None` when nothing has been stored yet. Implementations
/// are single-threaded; futures need not be `Send`.
#[async_trait(?Send)]
pub trait CounterStore {
    async fn get(&self) -> Result<Option<i64>, StorageError>;

    async fn set(&self, value: i64) -> Result<(), StorageError>;
}

#[async_trait(?Send)]
impl<T: CounterStore + ?Sized> CounterStore for Rc<T> {
    async fn get(&self) -> Result<Option<i64>, StorageError> {
        (**self).get().await
    }

    async fn set(&self, value: i64) -> Result<(), StorageError> {
        (**self).set(value).await
    }
}

/// `chrome.storage.<area>` holding one integer under a fixed key.
pub struct ChromeStorage {
    area: StorageArea,
    key: String,
}

impl ChromeStorage {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            area: config.area,
            key: config.counter_key.clone(),
        }
    }

    fn get_promise(&self, keys: JsValue) -> Result<js_sys::Promise, JsValue> {
        match self.area {
            StorageArea::Sync => sync_get(keys),
            StorageArea::Local => local_get(keys),
        }
    }

    fn set_promise(&self, items: JsValue) -> Result<js_sys::Promise, JsValue> {
        match self.area {
            StorageArea::Sync => sync_set(items),
            StorageArea::Local => local_set(items),
        }
    }
}

#[async_trait(?Send)]
impl CounterStore for ChromeStorage {
    async fn get(&self) -> Result<Option<i64>, StorageError> {
        let keys = js_sys::Array::new();
        keys.push(&JsValue::from_str(&self.key));

        let result = JsFuture::from(self.get_promise(keys.into())?).await?;
        let raw = js_sys::Reflect::get(&result, &JsValue::from_str(&self.key))?;

        if raw.is_undefined() || raw.is_null() {
            log::debug!("No value stored under '{}'", self.key);
            return Ok(None);
        }

        match raw.as_f64() {
            Some(number) => count_from_number(&self.key, number).map(Some),
            None => Err(StorageError::InvalidValue {
                key: self.key.clone(),
                value: crate::error::describe_js(&raw),
            }),
        }
    }

    async fn set(&self, value: i64) -> Result<(), StorageError> {
        if value.unsigned_abs() > MAX_SAFE_INTEGER as u64 {
            return Err(StorageError::Encode(format!(
                "{} exceeds the exact integer range of a JS number",
                value
            )));
        }

        let obj = js_sys::Object::new();
        js_sys::Reflect::set(
            &obj,
            &JsValue::from_str(&self.key),
            &JsValue::from_f64(value as f64),
        )?;

        JsFuture::from(self.set_promise(obj.into())?).await?;
        log::debug!("Stored {} = {}", self.key, value);
        Ok(())
    }
}

/// Convert a stored JS number into the counter value.
fn count_from_number(key: &str, number: f64) -> Result<i64, StorageError> {
    if !number.is_finite() || number.fract() != 0.0 || number.abs() > MAX_SAFE_INTEGER {
        return Err(StorageError::InvalidValue {
            key: key.to_string(),
            value: number.to_string(),
        });
    }
    Ok(number as i64)
}
