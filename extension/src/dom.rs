// Element IDs and classes the popup page and content script rely on

pub const COUNTER: &str = "counter";
pub const INCREMENT_BTN: &str = "incrementBtn";
pub const DECREMENT_BTN: &str = "decrementBtn";

pub const RESET_SETTINGS_BUTTON: &str = "resetSettingsButton";
pub const ONLY_ESSENTIAL_RADIO: &str = "onlyEssentialRadio";
pub const CUSTOM_RADIO: &str = "customRadio";
pub const MARKETING_COOKIES_CHECKBOX: &str = "marketingCookiesCheckbox";
pub const LEGAL_COOKIES_CHECKBOX: &str = "legalCookiesCheckbox";

pub const CHECKBOX_CONTAINER: &str = "checkboxContainer";

// Radio group shared by the essential-only and custom choices
pub const CONSENT_RADIO_GROUP: &str = "cookieConsent";
