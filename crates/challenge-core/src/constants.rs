//! Constantes del wizard de autoría de challenges.
//!
//! Agrupa valores estáticos compartidos por la validación de pasos, la
//! persistencia del draft y el armado del payload de envío. Los que forman
//! parte del envelope persistido (`DRAFT_SCHEMA_VERSION`) invalidan drafts
//! guardados si cambian.

/// Versión lógica del wizard. Se guarda en el envelope a modo informativo.
pub const WIZARD_VERSION: &str = "W1.0";

/// Versión del esquema del envelope persistido. Un envelope con otra versión
/// se descarta al restaurar.
pub const DRAFT_SCHEMA_VERSION: u32 = 1;

/// Clave fija bajo la que se guarda el draft.
pub const DRAFT_STORAGE_KEY: &str = "challengeProgress";

/// Intervalo por defecto del autosave (segundos).
pub const DEFAULT_AUTOSAVE_SECS: i64 = 30;

pub const MIN_TITLE_LENGTH: usize = 10;
pub const MAX_TITLE_LENGTH: usize = 255;
pub const MIN_DESCRIPTION_LENGTH: usize = 50;
pub const MAX_SHORT_DESCRIPTION_LENGTH: usize = 140;

/// Prefijo del formset de bounties que procesa el servidor.
pub const BOUNTY_FORMSET_PREFIX: &str = "bounty";
pub const BOUNTY_INITIAL_FORMS: usize = 0;
pub const BOUNTY_MIN_NUM_FORMS: usize = 1;
pub const BOUNTY_MAX_NUM_FORMS: usize = 10;

/// Elementos de la vista sin los cuales el wizard no se inicializa.
pub const REQUIRED_VIEW_ELEMENTS: &[&str] = &["form",
                                              "[name=\"title\"]",
                                              "[name=\"description\"]",
                                              "[name=\"status\"]",
                                              "[name=\"priority\"]",
                                              "[name=\"reward_type\"]",
                                              "#bounty_area",
                                              "#validation-errors"];

pub const FATAL_INIT_MESSAGE: &str = "Failed to initialize challenge flow. Please refresh.";
pub const TRANSPORT_ERROR_MESSAGE: &str = "Could not reach the server. Please retry, or refresh the page.";
