// Popup-wide services shared through the Dioxus context API

use std::rc::Rc;

use crate::config::PopupConfig;
use crate::services::ChromeMessenger;

#[derive(Clone)]
pub struct PopupContext {
    pub config: Rc<PopupConfig>,
    pub messenger: Rc<ChromeMessenger>,
}

// Contexts don't need real equality
impl PartialEq for PopupContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
    }
}

impl PopupContext {
    pub fn new(config: PopupConfig) -> Self {
        Self {
            config: Rc::new(config),
            messenger: Rc::new(ChromeMessenger::new()),
        }
    }
}

impl Default for PopupContext {
    fn default() -> Self {
        Self::new(PopupConfig::default())
    }
}
