// challenge-domain library entry point
pub mod bounty;
pub mod challenge;
pub mod error;
pub mod field;
pub mod skill;
pub use bounty::{BountyDraft, BountyId, ExpertiseRef, SkillRef};
pub use challenge::{is_valid_video_url, ChallengePriority, ChallengeStatus};
pub use error::DomainError;
pub use field::FieldValue;
pub use skill::{build_expertise_tree, Expertise, ExpertiseNode, Skill};
