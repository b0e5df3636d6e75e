use challenge_domain::BountyDraft;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{CoreWizardError, FieldError};

/// Límites aplicados a los bounties del draft.
///
/// `permissive` no impone límites (sólo los campos requeridos del bounty);
/// `strict` replica los topes del servicio de autoría: 10 bounties, puntos
/// 1..=1000 por bounty y 1000 puntos en total.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BountyPolicy {
    pub max_bounties: Option<usize>,
    pub min_points: Option<u32>,
    pub max_points: Option<u32>,
    pub max_total_points: Option<u64>,
}

impl BountyPolicy {
    pub fn permissive() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self { max_bounties: Some(10),
               min_points: Some(1),
               max_points: Some(1000),
               max_total_points: Some(1000) }
    }

    fn check_points(&self, points: u32) -> Option<String> {
        match (self.min_points, self.max_points) {
            (Some(min), Some(max)) if points < min || points > max => {
                Some(format!("Points must be between {min} and {max}"))
            }
            (Some(min), None) if points < min => Some(format!("Points must be at least {min}")),
            (None, Some(max)) if points > max => Some(format!("Points cannot exceed {max}")),
            _ => None,
        }
    }

    fn total_message(max: u64) -> String {
        format!("Total points across all bounties cannot exceed {max}")
    }

    /// Controles sobre un bounty candidato antes de agregarlo a `existing`.
    pub fn check_new(&self, existing: &[BountyDraft], candidate: &BountyDraft) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(max) = self.max_bounties {
            if existing.len() >= max {
                errors.push(FieldError::new("bounties", format!("Maximum of {max} bounties allowed per challenge")));
            }
        }
        if let Some(msg) = self.check_points(candidate.points()) {
            errors.push(FieldError::new("points", msg));
        }
        if let Some(max) = self.max_total_points {
            let total: u64 = existing.iter().map(|b| u64::from(b.points())).sum::<u64>() + u64::from(candidate.points());
            if total > max {
                errors.push(FieldError::new("points", Self::total_message(max)));
            }
        }
        errors
    }

    /// Controles sobre la colección completa (paso 3). Los errores por
    /// bounty se prefijan con su posición 1-based.
    pub fn check_collection(&self, bounties: &[BountyDraft]) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(max) = self.max_bounties {
            if bounties.len() > max {
                errors.push(FieldError::new("bounties", format!("Maximum of {max} bounties allowed per challenge")));
            }
        }
        if let Some(max) = self.max_total_points {
            let total: u64 = bounties.iter().map(|b| u64::from(b.points())).sum();
            if total > max {
                errors.push(FieldError::new("bounties", Self::total_message(max)));
            }
        }
        for (i, b) in bounties.iter().enumerate() {
            if let Some(msg) = self.check_points(b.points()) {
                errors.push(FieldError::new("bounties", format!("Bounty {}: {msg}", i + 1)));
            }
        }
        errors
    }
}

impl FromStr for BountyPolicy {
    type Err = CoreWizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "permissive" => Ok(Self::permissive()),
            "strict" => Ok(Self::strict()),
            other => Err(CoreWizardError::Config(format!("unknown bounty policy '{other}' (expected permissive|strict)"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use challenge_domain::{ExpertiseRef, SkillRef};

    fn bounty(title: &str, points: u32) -> BountyDraft {
        BountyDraft::new(title,
                         "",
                         Some(SkillRef { id: 1, name: "Backend".into() }),
                         vec![ExpertiseRef { id: 2, name: "Rust".into() }],
                         points).unwrap()
    }

    #[test]
    fn permissive_accepts_anything() {
        let p = BountyPolicy::permissive();
        let many: Vec<_> = (0..20).map(|i| bounty(&format!("b{i}"), 5000)).collect();
        assert!(p.check_new(&many, &bounty("x", 0)).is_empty());
        assert!(p.check_collection(&many).is_empty());
    }

    #[test]
    fn strict_caps_points_and_total() {
        let p = BountyPolicy::strict();
        let errs = p.check_new(&[], &bounty("x", 0));
        assert_eq!(errs[0].message, "Points must be between 1 and 1000");

        let existing = vec![bounty("a", 900)];
        let errs = p.check_new(&existing, &bounty("b", 200));
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].message, "Total points across all bounties cannot exceed 1000");
        assert!(p.check_new(&existing, &bounty("b", 100)).is_empty());
    }

    #[test]
    fn strict_caps_count() {
        let p = BountyPolicy::strict();
        let ten: Vec<_> = (0..10).map(|i| bounty(&format!("b{i}"), 1)).collect();
        let errs = p.check_new(&ten, &bounty("extra", 1));
        assert_eq!(errs[0].message, "Maximum of 10 bounties allowed per challenge");
    }

    #[test]
    fn parse_policy_names() {
        assert_eq!("STRICT".parse::<BountyPolicy>().unwrap(), BountyPolicy::strict());
        assert_eq!("".parse::<BountyPolicy>().unwrap(), BountyPolicy::permissive());
        assert!("lenient".parse::<BountyPolicy>().is_err());
    }
}
