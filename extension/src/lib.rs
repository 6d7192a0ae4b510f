pub mod config;
pub mod consent;
pub mod counter;
pub mod dom;
pub mod error;
pub mod messages;
pub mod services;

#[cfg(feature = "dioxus")]
mod components;
#[cfg(feature = "dioxus")]
pub mod icons;
#[cfg(feature = "dioxus")]
mod popup_context;

#[cfg(test)]
mod testing;

pub use config::PopupConfig;
pub use consent::{ConsentFlag, ConsentPanel, ConsentSelection};
pub use counter::{CounterAction, CounterController, CounterDisplay, MutationPolicy};
pub use error::{ConfigError, SendError, StorageError};
pub use messages::{MessageResponse, PopupMessage};

#[cfg(feature = "dioxus")]
mod app {
    use dioxus::prelude::*;

    use crate::components::{ConsentPanelView, CounterPanel};
    use crate::config::PopupConfig;
    use crate::popup_context::PopupContext;
    use crate::services::greet_background;

    #[component]
    fn App() -> Element {
        let ctx = use_context_provider(|| PopupContext::new(PopupConfig::load_or_default()));

        // Say hello to the background worker once per popup open
        use_effect(move || {
            let ctx = ctx.clone();
            spawn(async move {
                let greeting = ctx.config.messaging.greeting.clone();
                if let Err(e) = greet_background(ctx.messenger.as_ref(), &greeting).await {
                    log::warn!("Background did not answer greeting: {}", e);
                }
            });
        });

        rsx! {
            div { class: "popup",
                CounterPanel {}
                ConsentPanelView {}
            }
        }
    }

    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub fn run() {
        console_error_panic_hook::set_once();

        // Only the log level is needed here; App loads and reports the config
        let level = PopupConfig::embedded()
            .ok()
            .and_then(|c| c.log_level().ok())
            .unwrap_or(log::Level::Info);
        wasm_logger::init(wasm_logger::Config::new(level));

        log::info!("Counter popup starting...");
        dioxus::launch(App);
    }
}
