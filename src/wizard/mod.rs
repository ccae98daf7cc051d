//! Research wizard model.
//!
//! The research flow is a fixed, ordered walk through four steps. The
//! shared UI state tracks the current step and which side panels are open.
//!
//! ```text
//! topic → feedback → search → report
//! ```

pub mod state;
pub mod step;

pub use state::WizardState;
pub use step::{UnknownStep, WizardStep};
