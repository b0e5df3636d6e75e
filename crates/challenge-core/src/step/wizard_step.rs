use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreWizardError;

/// Paso actual del wizard.
///
/// Transiciones: `next` satura en `Review`, `previous` satura en
/// `ChallengeType`. Se serializa como entero (1..=5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WizardStep {
    /// 1. Tipo de challenge / recompensa.
    ChallengeType,
    /// 2. Título y descripción.
    Details,
    /// 3. Bounties.
    Bounties,
    /// 4. Estado y prioridad.
    StatusPriority,
    /// 5. Resumen y envío.
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [Self::ChallengeType, Self::Details, Self::Bounties, Self::StatusPriority, Self::Review];
    pub const FIRST: WizardStep = WizardStep::ChallengeType;
    pub const LAST: WizardStep = WizardStep::Review;

    pub fn number(self) -> u8 {
        match self {
            Self::ChallengeType => 1,
            Self::Details => 2,
            Self::Bounties => 3,
            Self::StatusPriority => 4,
            Self::Review => 5,
        }
    }

    pub fn from_number(n: u8) -> Result<Self, CoreWizardError> {
        Self::ALL.iter()
                 .copied()
                 .find(|s| s.number() == n)
                 .ok_or(CoreWizardError::InvalidStep(n))
    }

    pub fn next(self) -> Self {
        Self::from_number(self.number() + 1).unwrap_or(Self::LAST)
    }

    pub fn previous(self) -> Self {
        match self.number() {
            0 | 1 => Self::FIRST,
            n => Self::from_number(n - 1).unwrap_or(Self::FIRST),
        }
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::FIRST
    }
}

impl From<WizardStep> for u8 {
    fn from(s: WizardStep) -> Self {
        s.number()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = CoreWizardError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::from_number(n)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_previous_saturate() {
        assert_eq!(WizardStep::Review.next(), WizardStep::Review);
        assert_eq!(WizardStep::ChallengeType.previous(), WizardStep::ChallengeType);
        assert_eq!(WizardStep::Details.next(), WizardStep::Bounties);
        assert_eq!(WizardStep::Details.previous(), WizardStep::ChallengeType);
    }

    #[test]
    fn serializes_as_number() {
        assert_eq!(serde_json::to_string(&WizardStep::Bounties).unwrap(), "3");
        let s: WizardStep = serde_json::from_str("4").unwrap();
        assert_eq!(s, WizardStep::StatusPriority);
        assert!(serde_json::from_str::<WizardStep>("9").is_err());
    }
}
