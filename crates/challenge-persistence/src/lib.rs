//! challenge-persistence
//!
//! Backend Postgres (Diesel) del `DraftStore` del core, para desplegar el
//! wizard fuera del navegador con drafts compartidos entre procesos.
//!
//! Módulos:
//! - `pg`: `PgDraftStore`, pool r2d2 y reintentos.
//! - `migrations`: runner embebido de migraciones Diesel.
//! - `config`: carga de configuración desde .env.
//! - `schema`: tablas Diesel.

pub mod config;
pub mod error;
pub mod migrations;
pub mod pg;
pub mod schema;

pub use config::{init_dotenv, DbConfig};
pub use error::PersistenceError;
pub use pg::{build_dev_pool_from_env, build_pool, ConnectionProvider, PgDraftStore, PgPool, PoolProvider};
