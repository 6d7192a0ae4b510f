mod consent_panel;
mod counter_panel;

pub use consent_panel::ConsentPanelView;
pub use counter_panel::CounterPanel;
