use challenge_domain::{BountyDraft, BountyId};
use serde::{Deserialize, Serialize};

use super::{BountyPolicy, BountyTable};
use crate::errors::{CoreWizardError, FieldError};

/// Lista ordenada de bounties confirmados.
///
/// Es la única representación de los bounties: la tabla, el resumen y los
/// campos indexados del envío se derivan siempre de ella.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BountyCollection(Vec<BountyDraft>);

impl BountyCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agrega al final. Rechaza duplicados (mismo título y skill) y lo que
    /// la política no admita; en ese caso la lista queda intacta.
    pub fn add(&mut self, bounty: BountyDraft, policy: &BountyPolicy) -> Result<BountyId, CoreWizardError> {
        let mut errors = Vec::new();
        let key = bounty.dedup_key();
        if self.0.iter().any(|b| b.dedup_key() == key) {
            errors.push(FieldError::new("title", "A bounty with this title and skill already exists"));
        }
        errors.extend(policy.check_new(&self.0, &bounty));
        if !errors.is_empty() {
            return Err(CoreWizardError::BountyRejected { errors });
        }
        let id = bounty.id();
        self.0.push(bounty);
        Ok(id)
    }

    /// Quita por posición viva.
    pub fn remove_at(&mut self, index: usize) -> Result<BountyDraft, CoreWizardError> {
        if index >= self.0.len() {
            return Err(CoreWizardError::InvalidBountyIndex { index, len: self.0.len() });
        }
        Ok(self.0.remove(index))
    }

    /// Quita por id estable; la posición se resuelve en este momento.
    pub fn remove_by_id(&mut self, id: BountyId) -> Result<(usize, BountyDraft), CoreWizardError> {
        let index = self.position(id).ok_or(CoreWizardError::UnknownBounty(id))?;
        Ok((index, self.0.remove(index)))
    }

    pub fn position(&self, id: BountyId) -> Option<usize> {
        self.0.iter().position(|b| b.id() == id)
    }

    pub fn get(&self, index: usize) -> Option<&BountyDraft> {
        self.0.get(index)
    }

    pub fn total_points(&self) -> u64 {
        self.0.iter().map(|b| u64::from(b.points())).sum()
    }

    pub fn as_slice(&self) -> &[BountyDraft] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BountyDraft> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn table(&self) -> BountyTable {
        BountyTable::from_bounties(&self.0)
    }
}

impl From<Vec<BountyDraft>> for BountyCollection {
    fn from(v: Vec<BountyDraft>) -> Self {
        Self(v)
    }
}

impl<'a> IntoIterator for &'a BountyCollection {
    type Item = &'a BountyDraft;
    type IntoIter = std::slice::Iter<'a, BountyDraft>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
