//! challenge-adapters: implementaciones concretas de las fronteras del core.
//!
//! - `HttpChallengeApi`: `ChallengeApi` sobre HTTP (reqwest bloqueante,
//!   multipart para el envío).
//! - `FileDraftStore`: `DraftStore` en un directorio de archivos JSON, el
//!   equivalente de escritorio del almacenamiento local del navegador.
//! - `Endpoints`: rutas derivadas de la URL base y el slug del producto.

pub mod endpoints;
pub mod file_store;
pub mod http_api;

pub use endpoints::Endpoints;
pub use file_store::FileDraftStore;
pub use http_api::HttpChallengeApi;
