//! challenge-core: wizard de autoría de challenges (pasos, bounties, draft
//! persistido y envío).
pub mod api;
pub mod bounty;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod lookup;
pub mod model;
pub mod persistence;
pub mod step;
pub mod store;
pub mod view;

pub use api::{ApiError, Attachment, ChallengeApi, DisplayError, SubmitPayload, SubmitResponse};
pub use bounty::{BountyCollection, BountyForm, BountyPolicy, BountyRow, BountyTable, ReviewSummary};
pub use engine::{BountyTableMode, ChallengeWizard, SubmitOutcome, WizardBuilder, WizardConfig, WizardPhase};
pub use errors::{CoreWizardError, FieldError};
pub use event::{EventStore, InMemoryEventStore, WizardEvent, WizardEventKind};
pub use model::{Draft, FormFields};
pub use persistence::{DraftEnvelope, DraftPersistence, RestoreOutcome};
pub use step::{StepContext, StepDefinition, StepPlan, WizardStep};
pub use store::{DraftStore, InMemoryDraftStore, StoreError};
pub use view::{HeadlessView, NavigationState, WizardView};
