//! Shared wizard UI state.

use serde::{Deserialize, Serialize};

use crate::wizard::step::WizardStep;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardState {
    pub open_setting: bool,
    pub open_history: bool,
    pub open_knowledge: bool,
    pub current_wizard_step: WizardStep,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_open_setting(&mut self, visible: bool) {
        self.open_setting = visible;
    }

    pub fn set_open_history(&mut self, visible: bool) {
        self.open_history = visible;
    }

    pub fn set_open_knowledge(&mut self, visible: bool) {
        self.open_knowledge = visible;
    }

    pub fn set_current_wizard_step(&mut self, step: WizardStep) {
        self.current_wizard_step = step;
    }

    /// Advance one step; stays put on the last step.
    pub fn go_to_next_step(&mut self) -> WizardStep {
        if let Some(next) = self.current_wizard_step.next() {
            self.current_wizard_step = next;
        }
        self.current_wizard_step
    }

    /// Go back one step; stays put on the first step.
    pub fn go_to_previous_step(&mut self) -> WizardStep {
        if let Some(prev) = self.current_wizard_step.previous() {
            self.current_wizard_step = prev;
        }
        self.current_wizard_step
    }
}
