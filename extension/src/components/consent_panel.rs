use dioxus::prelude::*;

use crate::consent::{ConsentFlag, ConsentPanel};
use crate::dom;
use crate::icons;

fn toggle_flag(mut panel: Signal<ConsentPanel>, flag: ConsentFlag) {
    let checked = panel.read().checkbox(flag).checked;
    if !panel.write().set_flag(flag, !checked) {
        log::debug!("Ignored edit of locked {:?} checkbox", flag);
    }
}

#[component]
pub fn ConsentPanelView() -> Element {
    let mut panel = use_signal(ConsentPanel::new);

    let state = panel.read().clone();
    let marketing = state.checkbox(ConsentFlag::Marketing);
    let legal = state.checkbox(ConsentFlag::Legal);

    rsx! {
        div { class: "consent-panel",
            h2 { class: "consent-title", "Cookie settings" }

            label { class: "consent-choice",
                input {
                    r#type: "radio",
                    name: dom::CONSENT_RADIO_GROUP,
                    id: dom::ONLY_ESSENTIAL_RADIO,
                    checked: state.essential_radio_checked(),
                    onclick: move |_| panel.write().enable_essential_only(),
                }
                "Only essential cookies"
            }

            label { class: "consent-choice",
                input {
                    r#type: "radio",
                    name: dom::CONSENT_RADIO_GROUP,
                    id: dom::CUSTOM_RADIO,
                    checked: state.custom_radio_checked(),
                    onclick: move |_| panel.write().enable_custom(),
                }
                "Custom settings"
            }

            fieldset {
                class: dom::CHECKBOX_CONTAINER,
                "disabled": !state.container_enabled(),

                label {
                    input {
                        r#type: "checkbox",
                        id: dom::MARKETING_COOKIES_CHECKBOX,
                        checked: marketing.checked,
                        disabled: !marketing.enabled,
                        onclick: move |_| toggle_flag(panel, ConsentFlag::Marketing),
                    }
                    "Marketing cookies"
                }

                label {
                    input {
                        r#type: "checkbox",
                        id: dom::LEGAL_COOKIES_CHECKBOX,
                        checked: legal.checked,
                        disabled: !legal.enabled,
                        onclick: move |_| toggle_flag(panel, ConsentFlag::Legal),
                    }
                    "Legal cookies"
                }
            }

            button {
                id: dom::RESET_SETTINGS_BUTTON,
                class: "button",
                onclick: move |_| panel.write().reset_to_default(),
                icons::RotateCcw { class: Some("icon".to_string()) }
                "Reset to default"
            }
        }
    }
}
