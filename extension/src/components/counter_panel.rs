use std::rc::Rc;

use dioxus::prelude::*;

use crate::counter::{CounterAction, CounterController, CounterDisplay};
use crate::dom;
use crate::icons;
use crate::popup_context::PopupContext;
use crate::services::{ChromeMessenger, ChromeStorage};

type PopupCounter = CounterController<ChromeStorage, Rc<ChromeMessenger>, SignalDisplay>;

/// Renders the count by writing a signal.
#[derive(Clone, Copy)]
pub struct SignalDisplay(Signal<i64>);

impl CounterDisplay for SignalDisplay {
    fn render(&self, value: i64) {
        let mut signal = self.0;
        signal.set(value);
    }
}

fn spawn_action(
    controller: Rc<PopupCounter>,
    action: CounterAction,
    error: Signal<Option<String>>,
) {
    spawn(async move {
        let mut error = error;
        match controller.apply(action).await {
            Ok(_) => error.set(None),
            Err(e) => {
                log::error!("Counter {:?} failed: {}", action, e);
                error.set(Some(e.to_string()));
            }
        }
    });
}

#[component]
pub fn CounterPanel() -> Element {
    let ctx = use_context::<PopupContext>();
    let count = use_signal(|| 0i64);
    let error = use_signal(|| None::<String>);

    let controller = use_hook(|| {
        Rc::new(CounterController::from_config(
            ChromeStorage::new(&ctx.config.storage),
            ctx.messenger.clone(),
            SignalDisplay(count),
            &ctx.config,
        ))
    });

    // Restore once on mount
    let restore = controller.clone();
    use_effect(move || {
        let controller = restore.clone();
        spawn(async move {
            let mut error = error;
            if let Err(e) = controller.restore().await {
                log::error!("Failed to restore counter: {}", e);
                error.set(Some(e.to_string()));
            }
        });
    });

    let error_message = error().unwrap_or_default();
    let increment = controller.clone();
    let decrement = controller.clone();

    rsx! {
        div { class: "counter-panel",
            p { class: "counter-label", "Shared count" }
            div { id: dom::COUNTER, class: "counter-value", "{count}" }

            div { class: "counter-buttons",
                button {
                    id: dom::DECREMENT_BTN,
                    class: "button",
                    onclick: move |_| {
                        spawn_action(decrement.clone(), CounterAction::Decrement, error)
                    },
                    icons::Minus { class: Some("icon".to_string()) }
                }
                button {
                    id: dom::INCREMENT_BTN,
                    class: "button",
                    onclick: move |_| {
                        spawn_action(increment.clone(), CounterAction::Increment, error)
                    },
                    icons::Plus { class: Some("icon".to_string()) }
                }
            }

            if !error_message.is_empty() {
                p { class: "counter-error", "{error_message}" }
            }
        }
    }
}
