//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y arma la `WizardConfig` del core más
//! la ubicación de los drafts.
use chrono::Duration;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

use challenge_core::constants::DEFAULT_AUTOSAVE_SECS;
use challenge_core::{BountyPolicy, BountyTableMode, WizardConfig};

use crate::errors::AppError;

static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
});

const DEFAULT_DRAFT_DIR: &str = ".challengeflow/drafts";

/// Configuración de una sesión del wizard.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// URL base de la plataforma (http/https).
    pub base_url: String,
    pub product_slug: String,
    pub csrf_token: String,
    /// Directorio del `FileDraftStore` (se ignora si hay `database_url`).
    pub draft_dir: PathBuf,
    pub autosave_secs: i64,
    pub bounty_policy: BountyPolicy,
    pub table_mode: BountyTableMode,
    pub database_url: Option<String>,
    /// Tamaños del pool Postgres (sólo con `database_url`).
    pub database_min_connections: u32,
    pub database_max_connections: u32,
}

/// Carga `.env` una sola vez. Los binarios la llaman antes de iniciar el
/// logger para que `RUST_LOG` definido en `.env` tenga efecto.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

impl AppConfig {
    /// Lee el entorno del proceso (cargando `.env` una vez).
    pub fn from_env() -> Result<Self, AppError> {
        init_dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
        where F: Fn(&str) -> Option<String>
    {
        let required = |name: &str| {
            lookup(name).filter(|v| !v.trim().is_empty())
                        .ok_or_else(|| AppError::Config(format!("{name} no definido")))
        };
        let base_url = required("CHALLENGEFLOW_BASE_URL")?;
        let product_slug = required("CHALLENGEFLOW_PRODUCT_SLUG")?;
        let csrf_token = required("CHALLENGEFLOW_CSRF_TOKEN")?;

        let draft_dir = lookup("CHALLENGEFLOW_DRAFT_DIR").unwrap_or_else(|| DEFAULT_DRAFT_DIR.to_string())
                                                         .into();
        let autosave_secs = match lookup("CHALLENGEFLOW_AUTOSAVE_SECS") {
            Some(raw) => raw.trim()
                            .parse::<i64>()
                            .ok()
                            .filter(|s| *s > 0)
                            .ok_or_else(|| AppError::Config(format!("CHALLENGEFLOW_AUTOSAVE_SECS inválido: '{raw}'")))?,
            None => DEFAULT_AUTOSAVE_SECS,
        };
        let bounty_policy = match lookup("CHALLENGEFLOW_BOUNTY_POLICY") {
            Some(raw) => raw.parse::<BountyPolicy>()?,
            None => BountyPolicy::permissive(),
        };
        let table_mode = match lookup("CHALLENGEFLOW_TABLE_MODE") {
            Some(raw) => raw.parse::<BountyTableMode>()?,
            None => BountyTableMode::default(),
        };
        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        let pool_size = |name: &str, default: u32| {
            lookup(name).and_then(|v| v.trim().parse::<u32>().ok()).unwrap_or(default)
        };
        let database_min_connections = pool_size("DATABASE_MIN_CONNECTIONS", 1);
        let database_max_connections = pool_size("DATABASE_MAX_CONNECTIONS", 4);

        Ok(Self { base_url,
                  product_slug,
                  csrf_token,
                  draft_dir,
                  autosave_secs,
                  bounty_policy,
                  table_mode,
                  database_url,
                  database_min_connections,
                  database_max_connections })
    }

    pub fn wizard_config(&self) -> WizardConfig {
        WizardConfig::new(self.product_slug.clone(), self.csrf_token.clone())
            .with_policy(self.bounty_policy.clone())
            .with_table_mode(self.table_mode)
            .with_autosave_interval(Duration::seconds(self.autosave_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn base() -> HashMap<String, String> {
        vars(&[("CHALLENGEFLOW_BASE_URL", "https://platform.test"),
               ("CHALLENGEFLOW_PRODUCT_SLUG", "acme"),
               ("CHALLENGEFLOW_CSRF_TOKEN", "tok")])
    }

    #[test]
    fn defaults_apply() {
        let env = base();
        let cfg = AppConfig::from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(cfg.autosave_secs, 30);
        assert_eq!(cfg.table_mode, BountyTableMode::ClientRendered);
        assert_eq!(cfg.bounty_policy, BountyPolicy::permissive());
        assert_eq!(cfg.draft_dir, PathBuf::from(".challengeflow/drafts"));
        assert!(cfg.database_url.is_none());
        let wc = cfg.wizard_config();
        assert_eq!(wc.autosave_interval, Duration::seconds(30));
        assert_eq!(wc.product_slug, "acme");
    }

    #[test]
    fn missing_required_is_an_error() {
        let mut env = base();
        env.remove("CHALLENGEFLOW_CSRF_TOKEN");
        let err = AppConfig::from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("CHALLENGEFLOW_CSRF_TOKEN"));
    }

    #[test]
    fn overrides_are_parsed() {
        let mut env = base();
        env.insert("CHALLENGEFLOW_AUTOSAVE_SECS".into(), "5".into());
        env.insert("CHALLENGEFLOW_BOUNTY_POLICY".into(), "strict".into());
        env.insert("CHALLENGEFLOW_TABLE_MODE".into(), "server".into());
        let cfg = AppConfig::from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(cfg.autosave_secs, 5);
        assert_eq!(cfg.bounty_policy, BountyPolicy::strict());
        assert_eq!(cfg.table_mode, BountyTableMode::ServerRendered);

        env.insert("CHALLENGEFLOW_AUTOSAVE_SECS".into(), "0".into());
        assert!(AppConfig::from_lookup(|k| env.get(k).cloned()).is_err());
    }

    #[test]
    fn database_settings_come_from_the_same_source() {
        let mut env = base();
        env.insert("DATABASE_URL".into(), "postgres://drafts@localhost/drafts".into());
        env.insert("DATABASE_MAX_CONNECTIONS".into(), "8".into());
        let cfg = AppConfig::from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://drafts@localhost/drafts"));
        assert_eq!(cfg.database_min_connections, 1);
        assert_eq!(cfg.database_max_connections, 8);
    }
}
