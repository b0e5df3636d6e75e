//! Implementación Postgres (Diesel) del `DraftStore` del core.
//!
//! - Una fila por clave de almacenamiento (`wizard_drafts.draft_key`).
//! - `put` es un upsert: reescribe payload y `saved_at`.
//! - El payload es el envelope serializado tal cual lo entrega
//!   `DraftPersistence`; este crate no lo interpreta.
//! - Errores transitorios (pool, serialización) se reintentan con backoff.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use log::{debug, warn};

use challenge_core::{DraftStore, StoreError};

use crate::error::PersistenceError;
use crate::migrations::run_pending_migrations;
use crate::schema::wizard_drafts;

/// Alias de tipo para el pool r2d2 de conexiones Postgres.
///
/// Al construirlo se corre el set de migraciones pendientes (una sola vez).
pub type PgPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Proveedor abstracto de conexiones.
///
/// Permite inyectar el pool real o uno armado a mano en tests sin acoplar
/// el store a r2d2.
pub trait ConnectionProvider: Send + Sync + 'static {
    /// Obtiene una conexión lista para ejecutar consultas Diesel.
    fn connection(&self) -> Result<r2d2::PooledConnection<ConnectionManager<PgConnection>>, PersistenceError>;
}

/// Implementación concreta de `ConnectionProvider` respaldada por un `PgPool`.
pub struct PoolProvider {
    pub pool: PgPool,
}

impl ConnectionProvider for PoolProvider {
    fn connection(&self) -> Result<r2d2::PooledConnection<ConnectionManager<PgConnection>>, PersistenceError> {
        self.pool
            .get()
            .map_err(|e| PersistenceError::TransientIo(format!("pool error: {e}")))
    }
}

/// Fila de `wizard_drafts` para lecturas de inventario.
#[derive(Debug, Clone, Queryable)]
pub struct DraftRow {
    pub draft_key: String,
    pub payload: String,
    pub saved_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = wizard_drafts)]
struct NewDraftRow<'a> {
    draft_key: &'a str,
    payload: &'a str,
}

/// Store de drafts respaldado por Postgres.
pub struct PgDraftStore<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> PgDraftStore<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Todas las filas ordenadas por clave (usado por el CLI de inventario).
    pub fn entries(&self) -> Result<Vec<DraftRow>, PersistenceError> {
        with_retry(|| {
            let mut conn = self.provider.connection()?;
            wizard_drafts::table.order(wizard_drafts::draft_key.asc())
                                .select((wizard_drafts::draft_key, wizard_drafts::payload, wizard_drafts::saved_at))
                                .load::<DraftRow>(&mut conn)
                                .map_err(PersistenceError::from)
        })
    }
}

impl PgDraftStore<PoolProvider> {
    /// Atajo: store sobre un pool ya construido.
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(PoolProvider { pool })
    }
}

fn check_key(key: &str) -> Result<(), StoreError> {
    if key.trim().is_empty() {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

impl<P: ConnectionProvider> DraftStore for PgDraftStore<P> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        check_key(key)?;
        let found = with_retry(|| {
                        let mut conn = self.provider.connection()?;
                        wizard_drafts::table.filter(wizard_drafts::draft_key.eq(key))
                                            .select(wizard_drafts::payload)
                                            .first::<String>(&mut conn)
                                            .optional()
                                            .map_err(PersistenceError::from)
                    })?;
        Ok(found)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        check_key(key)?;
        with_retry(|| {
            let mut conn = self.provider.connection()?;
            diesel::insert_into(wizard_drafts::table).values(&NewDraftRow { draft_key: key,
                                                                            payload: value })
                                                     .on_conflict(wizard_drafts::draft_key)
                                                     .do_update()
                                                     .set((wizard_drafts::payload.eq(value),
                                                           wizard_drafts::saved_at.eq(diesel::dsl::now)))
                                                     .execute(&mut conn)
                                                     .map_err(PersistenceError::from)
        })?;
        debug!("draft '{}' guardado ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        check_key(key)?;
        let deleted = with_retry(|| {
                          let mut conn = self.provider.connection()?;
                          diesel::delete(wizard_drafts::table.filter(wizard_drafts::draft_key.eq(key)))
                              .execute(&mut conn)
                              .map_err(PersistenceError::from)
                      })?;
        debug!("draft '{}' eliminado (filas={})", key, deleted);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let keys = with_retry(|| {
                       let mut conn = self.provider.connection()?;
                       wizard_drafts::table.order(wizard_drafts::draft_key.asc())
                                           .select(wizard_drafts::draft_key)
                                           .load::<String>(&mut conn)
                                           .map_err(PersistenceError::from)
                   })?;
        Ok(keys)
    }
}

/// Clasifica si un error es transitorio y conviene reintentar.
fn is_retryable(e: &PersistenceError) -> bool {
    match e {
        PersistenceError::SerializationConflict => true,
        PersistenceError::TransientIo(_) => true,
        PersistenceError::Unknown(msg) => {
            let m = msg.to_lowercase();
            m.contains("deadlock detected")
            || m.contains("could not serialize access due to concurrent update")
            || m.contains("connection closed")
            || m.contains("connection refused")
            || m.contains("timeout")
        }
        _ => false,
    }
}

/// Ejecuta `f` con hasta 3 reintentos para errores transitorios.
fn with_retry<F, T>(mut f: F) -> Result<T, PersistenceError>
    where F: FnMut() -> Result<T, PersistenceError>
{
    let mut attempts = 0;
    loop {
        match f() {
            Err(e) if is_retryable(&e) && attempts < 3 => {
                let delay_ms = 15 * ((attempts + 1) as u64);
                warn!("retryable error (attempt {}): {:?} -> sleeping {}ms",
                      attempts + 1,
                      e,
                      delay_ms);
                std::thread::sleep(std::time::Duration::from_millis(delay_ms));
                attempts += 1;
            }
            r => return r,
        }
    }
}

/// Construye un pool r2d2 y corre las migraciones pendientes.
///
/// `min_size`/`max_size` en cero se elevan a 1; si `min > max` se usa
/// `min = max`.
pub fn build_pool(database_url: &str, min_size: u32, max_size: u32) -> Result<PgPool, PersistenceError> {
    let validated_min = if min_size == 0 { 1 } else { min_size };
    let validated_max = if max_size == 0 { 1 } else { max_size };
    if validated_min > validated_max {
        warn!("min_size > max_size ({} > {}), ajustando min=max",
              validated_min, validated_max);
    }
    let final_min = validated_min.min(validated_max);
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder().min_idle(Some(final_min))
                                    .max_size(validated_max)
                                    .build(manager)
                                    .map_err(|e| PersistenceError::TransientIo(format!("pool build: {e}")))?;
    {
        let mut conn = pool.get()
                           .map_err(|e| PersistenceError::TransientIo(format!("pool get for migrations: {e}")))?;
        run_pending_migrations(&mut conn)?;
    }
    Ok(pool)
}

/// Helper de desarrollo: carga `.env`, lee `DbConfig` y construye un pool
/// ya migrado.
pub fn build_dev_pool_from_env() -> Result<PgPool, PersistenceError> {
    crate::config::init_dotenv();
    let cfg = crate::config::DbConfig::from_env()?;
    build_pool(&cfg.url, cfg.min_connections, cfg.max_connections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_classification() {
        assert!(is_retryable(&PersistenceError::SerializationConflict));
        assert!(is_retryable(&PersistenceError::TransientIo("pool".into())));
        assert!(is_retryable(&PersistenceError::Unknown("Deadlock detected".into())));
        assert!(!is_retryable(&PersistenceError::NotFound));
        assert!(!is_retryable(&PersistenceError::Config("x".into())));
    }

    #[test]
    fn with_retry_gives_up_after_three_retries() {
        let mut calls = 0;
        let r: Result<(), _> = with_retry(|| {
            calls += 1;
            Err(PersistenceError::TransientIo("down".into()))
        });
        assert!(r.is_err());
        assert_eq!(calls, 4);
    }

    #[test]
    fn with_retry_does_not_retry_permanent_errors() {
        let mut calls = 0;
        let r: Result<(), _> = with_retry(|| {
            calls += 1;
            Err(PersistenceError::CheckViolation("bad".into()))
        });
        assert!(matches!(r, Err(PersistenceError::CheckViolation(_))));
        assert_eq!(calls, 1);
    }

    #[test]
    fn persistence_errors_map_to_store_errors() {
        let e: StoreError = PersistenceError::TransientIo("x".into()).into();
        assert!(matches!(e, StoreError::Io(_)));
        let e: StoreError = PersistenceError::Unknown("y".into()).into();
        assert!(matches!(e, StoreError::Backend(_)));
    }
}
