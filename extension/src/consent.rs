//! Cookie-consent settings panel state.
//!
//! The radio selection gates whether the two sub-flag checkboxes can be
//! edited. Enabled-ness of both checkboxes and their container always equals
//! `selection == ConsentSelection::Custom`.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConsentSelection {
    /// Defaults applied by the reset button. Shown with the essential-only radio checked.
    #[default]
    ResetToDefault,
    EssentialOnly,
    Custom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsentFlag {
    Marketing,
    Legal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Checkbox {
    pub checked: bool,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ConsentPanel {
    selection: ConsentSelection,
    marketing: Checkbox,
    legal: Checkbox,
    container_enabled: bool,
}

impl ConsentPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> ConsentSelection {
        self.selection
    }

    pub fn checkbox(&self, flag: ConsentFlag) -> Checkbox {
        match flag {
            ConsentFlag::Marketing => self.marketing,
            ConsentFlag::Legal => self.legal,
        }
    }

    pub fn container_enabled(&self) -> bool {
        self.container_enabled
    }

    /// The reset action targets the essential-only radio.
    pub fn essential_radio_checked(&self) -> bool {
        matches!(
            self.selection,
            ConsentSelection::ResetToDefault | ConsentSelection::EssentialOnly
        )
    }

    pub fn custom_radio_checked(&self) -> bool {
        self.selection == ConsentSelection::Custom
    }

    /// Back to defaults: essential-only radio, both flags cleared and locked.
    pub fn reset_to_default(&mut self) {
        self.selection = ConsentSelection::ResetToDefault;
        self.marketing.checked = false;
        self.legal.checked = false;
        self.set_editable(false);
        log::debug!("Consent settings reset to default");
    }

    pub fn enable_essential_only(&mut self) {
        self.selection = ConsentSelection::EssentialOnly;
        self.set_editable(false);
    }

    pub fn enable_custom(&mut self) {
        self.selection = ConsentSelection::Custom;
        self.set_editable(true);
    }

    /// Returns false when the checkbox is disabled and the change was ignored.
    pub fn set_flag(&mut self, flag: ConsentFlag, checked: bool) -> bool {
        let checkbox = match flag {
            ConsentFlag::Marketing => &mut self.marketing,
            ConsentFlag::Legal => &mut self.legal,
        };
        if !checkbox.enabled {
            return false;
        }
        checkbox.checked = checked;
        true
    }

    fn set_editable(&mut self, enabled: bool) {
        self.container_enabled = enabled;
        self.marketing.enabled = enabled;
        self.legal.enabled = enabled;
    }
}
