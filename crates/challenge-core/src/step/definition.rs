use std::fmt::Debug;

use challenge_domain::BountyDraft;

use super::WizardStep;
use crate::bounty::BountyPolicy;
use crate::errors::{CoreWizardError, FieldError};
use crate::model::FormFields;

/// Estado visible para la validación de un paso.
///
/// La validación es pura respecto de este contexto: no toca la vista ni el
/// store.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub fields: &'a FormFields,
    pub bounties: &'a [BountyDraft],
    pub policy: &'a BountyPolicy,
}

/// Reglas que deben cumplirse para salir de un paso hacia adelante.
pub trait StepDefinition: Debug {
    /// Paso al que aplican estas reglas.
    fn step(&self) -> WizardStep;

    /// Nombre amigable (para logs y eventos).
    fn name(&self) -> &str;

    /// Campos del formulario que el paso exige.
    fn required_fields(&self) -> &'static [&'static str] {
        &[]
    }

    /// Devuelve los errores de campo; vacío si el paso es válido.
    fn validate(&self, ctx: &StepContext<'_>) -> Vec<FieldError>;
}

/// Secuencia inmutable de definiciones, una por paso y en orden 1..=5.
#[derive(Debug)]
pub struct StepPlan {
    steps: Vec<Box<dyn StepDefinition>>,
}

impl StepPlan {
    /// Plan con las reglas estándar del wizard.
    pub fn standard() -> Self {
        Self { steps: vec![Box::new(super::ChallengeTypeStep),
                           Box::new(super::DetailsStep),
                           Box::new(super::BountiesStep),
                           Box::new(super::StatusPriorityStep),
                           Box::new(super::ReviewStep)] }
    }

    /// Construye un plan propio. Debe haber exactamente una definición por
    /// paso y en el orden de `WizardStep::ALL`.
    pub fn new(steps: Vec<Box<dyn StepDefinition>>) -> Result<Self, CoreWizardError> {
        if steps.len() != WizardStep::ALL.len() {
            return Err(CoreWizardError::Config(format!("step plan needs {} definitions, got {}",
                                                       WizardStep::ALL.len(),
                                                       steps.len())));
        }
        for (def, expected) in steps.iter().zip(WizardStep::ALL) {
            if def.step() != expected {
                return Err(CoreWizardError::Config(format!("definition '{}' declared for step {} at position {}",
                                                           def.name(),
                                                           def.step(),
                                                           expected)));
            }
        }
        Ok(Self { steps })
    }

    pub fn get(&self, step: WizardStep) -> &dyn StepDefinition {
        // `new` garantiza una definición por paso en orden.
        self.steps[(step.number() - 1) as usize].as_ref()
    }

    pub fn validate(&self, step: WizardStep, ctx: &StepContext<'_>) -> Vec<FieldError> {
        self.get(step).validate(ctx)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for StepPlan {
    fn default() -> Self {
        Self::standard()
    }
}
