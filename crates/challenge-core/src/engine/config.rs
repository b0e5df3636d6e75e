use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::bounty::BountyPolicy;
use crate::constants::{DEFAULT_AUTOSAVE_SECS, DRAFT_STORAGE_KEY};
use crate::errors::CoreWizardError;

/// Quién produce el markup de la tabla de bounties. La lista siempre es la
/// del cliente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BountyTableMode {
    #[default]
    ClientRendered,
    ServerRendered,
}

impl FromStr for BountyTableMode {
    type Err = CoreWizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "client" => Ok(Self::ClientRendered),
            "server" => Ok(Self::ServerRendered),
            other => Err(CoreWizardError::Config(format!("unknown table mode '{other}' (expected client|server)"))),
        }
    }
}

/// Configuración de una instancia del wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    pub product_slug: String,
    pub csrf_token: String,
    pub storage_key: String,
    pub autosave_interval: Duration,
    pub bounty_policy: BountyPolicy,
    pub table_mode: BountyTableMode,
}

impl WizardConfig {
    pub fn new(product_slug: impl Into<String>, csrf_token: impl Into<String>) -> Self {
        Self { product_slug: product_slug.into(),
               csrf_token: csrf_token.into(),
               storage_key: DRAFT_STORAGE_KEY.to_string(),
               autosave_interval: Duration::seconds(DEFAULT_AUTOSAVE_SECS),
               bounty_policy: BountyPolicy::permissive(),
               table_mode: BountyTableMode::ClientRendered }
    }

    pub fn with_policy(mut self, policy: BountyPolicy) -> Self {
        self.bounty_policy = policy;
        self
    }

    pub fn with_table_mode(mut self, mode: BountyTableMode) -> Self {
        self.table_mode = mode;
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_autosave_interval(mut self, interval: Duration) -> Self {
        self.autosave_interval = interval;
        self
    }

    /// Sin slug de producto o token CSRF el wizard no puede enviar nada.
    pub fn validate(&self) -> Result<(), CoreWizardError> {
        if self.product_slug.trim().is_empty() {
            return Err(CoreWizardError::Config("product slug is missing".into()));
        }
        if self.csrf_token.trim().is_empty() {
            return Err(CoreWizardError::Config("CSRF token is missing".into()));
        }
        if self.storage_key.trim().is_empty() {
            return Err(CoreWizardError::Config("storage key is empty".into()));
        }
        if self.autosave_interval <= Duration::zero() {
            return Err(CoreWizardError::Config("autosave interval must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_validation() {
        let cfg = WizardConfig::new("acme", "tok");
        assert_eq!(cfg.storage_key, "challengeProgress");
        assert_eq!(cfg.autosave_interval, Duration::seconds(30));
        assert!(cfg.validate().is_ok());
        assert!(WizardConfig::new("", "tok").validate().is_err());
        assert!(WizardConfig::new("acme", " ").validate().is_err());
        assert!(cfg.with_autosave_interval(Duration::zero()).validate().is_err());
    }

    #[test]
    fn table_mode_parse() {
        assert_eq!("server".parse::<BountyTableMode>().unwrap(), BountyTableMode::ServerRendered);
        assert_eq!("Client".parse::<BountyTableMode>().unwrap(), BountyTableMode::ClientRendered);
        assert!("hybrid".parse::<BountyTableMode>().is_err());
    }
}
