//! Wizard steps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One stage of the research wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    /// Define the research topic.
    #[default]
    Topic,
    /// Review and refine the generated research plan.
    Feedback,
    /// Gather information from search.
    Search,
    /// Read the final report.
    Report,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown wizard step '{0}'")]
pub struct UnknownStep(pub String);

impl WizardStep {
    pub const ORDER: [WizardStep; 4] = [
        WizardStep::Topic,
        WizardStep::Feedback,
        WizardStep::Search,
        WizardStep::Report,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<WizardStep> {
        Self::ORDER.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<WizardStep> {
        self.index().checked_sub(1).map(|i| Self::ORDER[i])
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::Topic => "topic",
            WizardStep::Feedback => "feedback",
            WizardStep::Search => "search",
            WizardStep::Report => "report",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WizardStep {
    type Err = UnknownStep;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ORDER
            .into_iter()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| UnknownStep(s.to_string()))
    }
}
