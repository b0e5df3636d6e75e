//! Motor del wizard: configuración, builder/montaje y `ChallengeWizard`.

pub mod autosave;
pub mod builder;
pub mod config;
pub mod wizard;

pub use autosave::AutosaveTimer;
pub use builder::WizardBuilder;
pub use config::{BountyTableMode, WizardConfig};
pub use wizard::{ChallengeWizard, SubmitOutcome, WizardPhase};
