//! Pasos del wizard.
//!
//! El wizard tiene cinco pasos fijos. Este módulo define:
//! - `WizardStep`: el número de paso como tipo (1..=5).
//! - `StepDefinition`: interfaz de validación de un paso.
//! - `StepPlan`: la secuencia inmutable de definiciones.
//! - Reglas incluidas (`ChallengeTypeStep`, `DetailsStep`, ...).

pub mod definition;
pub mod rules;
mod wizard_step;

pub use definition::{StepContext, StepDefinition, StepPlan};
pub use rules::{BountiesStep, ChallengeTypeStep, DetailsStep, ReviewStep, StatusPriorityStep};
pub use wizard_step::WizardStep;
