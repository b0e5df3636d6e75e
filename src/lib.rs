//! challengeflow
//!
//! Librería de la aplicación:
//! - `config`: carga de `AppConfig` desde el entorno (.env).
//! - `errors`: `AppError`, que agrupa los errores de los crates.
//! - `session`: arma un wizard headless contra la plataforma real.
//!
//! El motor vive en `challenge-core`; las implementaciones concretas de
//! store y API en `challenge-adapters` / `challenge-persistence`.

pub mod config;
pub mod errors;
pub mod session;

pub use config::AppConfig;
pub use errors::AppError;
pub use session::{open_store, open_wizard, status_report, AppWizard};
