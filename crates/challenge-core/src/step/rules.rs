//! Reglas incluidas para los cinco pasos del wizard.
use challenge_domain::{is_valid_video_url, ChallengePriority, ChallengeStatus};

use super::{StepContext, StepDefinition, WizardStep};
use crate::constants::{MAX_SHORT_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH, MIN_DESCRIPTION_LENGTH, MIN_TITLE_LENGTH};
use crate::errors::FieldError;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Paso 1: tipo de recompensa.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChallengeTypeStep;

impl StepDefinition for ChallengeTypeStep {
    fn step(&self) -> WizardStep {
        WizardStep::ChallengeType
    }

    fn name(&self) -> &str {
        "challenge_type"
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &["reward_type"]
    }

    fn validate(&self, ctx: &StepContext<'_>) -> Vec<FieldError> {
        if ctx.fields.is_blank("reward_type") {
            return vec![FieldError::new("reward_type", "Please select a reward type")];
        }
        vec![]
    }
}

/// Paso 2: título, descripción, descripción corta y video.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailsStep;

impl StepDefinition for DetailsStep {
    fn step(&self) -> WizardStep {
        WizardStep::Details
    }

    fn name(&self) -> &str {
        "details"
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &["title", "description"]
    }

    fn validate(&self, ctx: &StepContext<'_>) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let title = ctx.fields.text("title");
        let title = title.trim();
        if title.is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        } else if char_len(title) < MIN_TITLE_LENGTH {
            errors.push(FieldError::new("title", format!("Title must be at least {MIN_TITLE_LENGTH} characters")));
        } else if char_len(title) > MAX_TITLE_LENGTH {
            errors.push(FieldError::new("title", format!("Title cannot exceed {MAX_TITLE_LENGTH} characters")));
        }

        let description = ctx.fields.text("description");
        let description = description.trim();
        if description.is_empty() {
            errors.push(FieldError::new("description", "Description is required"));
        } else if char_len(description) < MIN_DESCRIPTION_LENGTH {
            errors.push(FieldError::new("description",
                                        format!("Description must be at least {MIN_DESCRIPTION_LENGTH} characters long")));
        }

        if let Some(short) = ctx.fields.non_blank("short_description") {
            if char_len(short.trim()) > MAX_SHORT_DESCRIPTION_LENGTH {
                errors.push(FieldError::new("short_description",
                                            format!("Short description cannot exceed {MAX_SHORT_DESCRIPTION_LENGTH} characters")));
            }
        }

        if let Some(video) = ctx.fields.non_blank("video_url") {
            if !is_valid_video_url(&video) {
                errors.push(FieldError::new("video_url", "Invalid video URL format (must be YouTube or Vimeo)"));
            }
        }
        errors
    }
}

/// Paso 3: al menos un bounty y límites de la política configurada.
#[derive(Debug, Clone, Copy, Default)]
pub struct BountiesStep;

impl StepDefinition for BountiesStep {
    fn step(&self) -> WizardStep {
        WizardStep::Bounties
    }

    fn name(&self) -> &str {
        "bounties"
    }

    fn validate(&self, ctx: &StepContext<'_>) -> Vec<FieldError> {
        if ctx.bounties.is_empty() {
            return vec![FieldError::new("bounties", "At least one bounty is required")];
        }
        ctx.policy.check_collection(ctx.bounties)
    }
}

/// Paso 4: estado y prioridad dentro de los conjuntos permitidos.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusPriorityStep;

impl StepDefinition for StatusPriorityStep {
    fn step(&self) -> WizardStep {
        WizardStep::StatusPriority
    }

    fn name(&self) -> &str {
        "status_priority"
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &["status", "priority"]
    }

    fn validate(&self, ctx: &StepContext<'_>) -> Vec<FieldError> {
        let mut errors = Vec::new();
        match ctx.fields.non_blank("status") {
            None => errors.push(FieldError::new("status", "Please select a status")),
            Some(v) if v.parse::<ChallengeStatus>().is_err() => {
                let allowed: Vec<_> = ChallengeStatus::ALL.iter().map(|s| s.as_str()).collect();
                errors.push(FieldError::new("status", format!("Invalid status. Must be one of: {}", allowed.join(", "))));
            }
            Some(_) => {}
        }
        match ctx.fields.non_blank("priority") {
            None => errors.push(FieldError::new("priority", "Please select a priority")),
            Some(v) if v.parse::<ChallengePriority>().is_err() => {
                let allowed: Vec<_> = ChallengePriority::ALL.iter().map(|p| p.as_str()).collect();
                errors.push(FieldError::new("priority",
                                            format!("Invalid priority. Must be one of: {}", allowed.join(", "))));
            }
            Some(_) => {}
        }
        errors
    }
}

/// Paso 5: revisión. Último control antes del envío.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewStep;

impl StepDefinition for ReviewStep {
    fn step(&self) -> WizardStep {
        WizardStep::Review
    }

    fn name(&self) -> &str {
        "review"
    }

    fn validate(&self, ctx: &StepContext<'_>) -> Vec<FieldError> {
        if ctx.bounties.is_empty() {
            return vec![FieldError::new("bounties", "At least one bounty is required")];
        }
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounty::BountyPolicy;
    use crate::model::FormFields;
    use challenge_domain::{BountyDraft, ExpertiseRef, FieldValue, SkillRef};

    fn ctx<'a>(fields: &'a FormFields, bounties: &'a [BountyDraft], policy: &'a BountyPolicy) -> StepContext<'a> {
        StepContext { fields, bounties, policy }
    }

    fn long_description() -> String {
        "A description that is comfortably longer than fifty characters.".to_string()
    }

    #[test]
    fn details_requires_title() {
        let mut f = FormFields::new();
        f.set("description", FieldValue::text(long_description()));
        let p = BountyPolicy::permissive();
        let errs = DetailsStep.validate(&ctx(&f, &[], &p));
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].field, "title");
    }

    #[test]
    fn details_boundaries() {
        let p = BountyPolicy::permissive();
        let mut f = FormFields::new();
        f.set("title", FieldValue::text("0123456789"));
        f.set("description", FieldValue::text("x".repeat(50)));
        assert!(DetailsStep.validate(&ctx(&f, &[], &p)).is_empty());

        f.set("title", FieldValue::text("012345678"));
        f.set("description", FieldValue::text(format!("  {}  ", "x".repeat(49))));
        let errs = DetailsStep.validate(&ctx(&f, &[], &p));
        let fields: Vec<_> = errs.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "description"]);
        assert_eq!(errs[1].message, "Description must be at least 50 characters long");
    }

    #[test]
    fn details_checks_optional_fields_only_when_present() {
        let p = BountyPolicy::permissive();
        let mut f = FormFields::new();
        f.set("title", FieldValue::text("A proper title"));
        f.set("description", FieldValue::text(long_description()));
        f.set("video_url", FieldValue::text(""));
        assert!(DetailsStep.validate(&ctx(&f, &[], &p)).is_empty());

        f.set("video_url", FieldValue::text("https://example.com/v"));
        f.set("short_description", FieldValue::text("s".repeat(141)));
        let errs = DetailsStep.validate(&ctx(&f, &[], &p));
        assert_eq!(errs.len(), 2);
    }

    #[test]
    fn status_priority_allowed_sets() {
        let p = BountyPolicy::permissive();
        let mut f = FormFields::new();
        f.set("status", FieldValue::choice("ACTIVE"));
        f.set("priority", FieldValue::choice("URGENT"));
        let errs = StatusPriorityStep.validate(&ctx(&f, &[], &p));
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].message, "Invalid priority. Must be one of: HIGH, MEDIUM, LOW");
    }

    #[test]
    fn bounties_and_review_need_one_bounty() {
        let p = BountyPolicy::permissive();
        let f = FormFields::new();
        assert_eq!(BountiesStep.validate(&ctx(&f, &[], &p)).len(), 1);
        assert_eq!(ReviewStep.validate(&ctx(&f, &[], &p)).len(), 1);

        let b = BountyDraft::new("API",
                                 "",
                                 Some(SkillRef { id: 1, name: "Backend".into() }),
                                 vec![ExpertiseRef { id: 2, name: "Rust".into() }],
                                 10).unwrap();
        let list = vec![b];
        assert!(BountiesStep.validate(&ctx(&f, &list, &p)).is_empty());
        assert!(ReviewStep.validate(&ctx(&f, &list, &p)).is_empty());
    }

    #[test]
    fn reward_type_required() {
        let p = BountyPolicy::permissive();
        let mut f = FormFields::new();
        assert_eq!(ChallengeTypeStep.validate(&ctx(&f, &[], &p))[0].message, "Please select a reward type");
        f.set("reward_type", FieldValue::choice("points"));
        assert!(ChallengeTypeStep.validate(&ctx(&f, &[], &p)).is_empty());
    }
}
