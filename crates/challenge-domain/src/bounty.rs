// bounty.rs
use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identificador estable de un bounty dentro de un draft.
///
/// Los controles de borrado de la tabla referencian este id y no la posición
/// de la fila; la posición se resuelve en el momento del borrado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BountyId(Uuid);

impl BountyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BountyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BountyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Referencia a una skill seleccionada en el sub-formulario.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillRef {
    pub id: i64,
    pub name: String,
}

/// Referencia a una expertise (hija de una skill).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpertiseRef {
    pub id: i64,
    pub name: String,
}

/// Bounty confirmado dentro de un draft de challenge.
///
/// Sólo se construye a través de [`BountyDraft::new`], que exige título,
/// skill y al menos una expertise. No se persiste en el servidor hasta que
/// el draft completo se envía.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BountyDraft {
    id: BountyId,
    title: String,
    description: String,
    skill: SkillRef,
    expertise: Vec<ExpertiseRef>,
    points: u32,
}

impl BountyDraft {
    /// Valida los campos requeridos y crea el bounty con un id nuevo.
    ///
    /// # Errores
    /// `DomainError::MissingField` si falta el título, la skill o no hay
    /// ninguna expertise seleccionada.
    pub fn new(title: impl Into<String>,
               description: impl Into<String>,
               skill: Option<SkillRef>,
               expertise: Vec<ExpertiseRef>,
               points: u32)
               -> Result<Self, DomainError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(DomainError::MissingField { field: "title",
                                                   message: "Bounty title is required".into() });
        }
        let skill = skill.ok_or_else(|| DomainError::MissingField { field: "skill",
                                                                     message: "Please select a skill".into() })?;
        if expertise.is_empty() {
            return Err(DomainError::MissingField { field: "expertise",
                                                   message: "At least one expertise must be selected".into() });
        }
        let mut seen = std::collections::HashSet::new();
        let expertise: Vec<ExpertiseRef> = expertise.into_iter().filter(|e| seen.insert(e.id)).collect();

        Ok(Self { id: BountyId::new(),
                  title,
                  description: description.into(),
                  skill,
                  expertise,
                  points })
    }

    pub fn id(&self) -> BountyId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn skill(&self) -> &SkillRef {
        &self.skill
    }

    pub fn expertise(&self) -> &[ExpertiseRef] {
        &self.expertise
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Ids de expertise unidos por coma, el formato que espera el formset
    /// del servidor (`bounty-<i>-expertise_ids`).
    pub fn expertise_ids_csv(&self) -> String {
        self.expertise
            .iter()
            .map(|e| e.id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Clave de duplicado: (título normalizado, skill).
    pub fn dedup_key(&self) -> (String, i64) {
        (self.title.to_lowercase(), self.skill.id)
    }

    /// Devuelve una copia con otro id. Sólo para reconstrucción controlada
    /// (p. ej. import de datos antiguos sin id).
    pub fn with_id(mut self, id: BountyId) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill() -> SkillRef {
        SkillRef { id: 7, name: "Backend".into() }
    }

    fn rust() -> ExpertiseRef {
        ExpertiseRef { id: 70, name: "Rust".into() }
    }

    #[test]
    fn new_requires_title_skill_and_expertise() {
        let err = BountyDraft::new("  ", "", Some(skill()), vec![rust()], 10).unwrap_err();
        assert_eq!(err.field(), Some("title"));

        let err = BountyDraft::new("API", "", None, vec![rust()], 10).unwrap_err();
        assert_eq!(err.field(), Some("skill"));

        let err = BountyDraft::new("API", "", Some(skill()), vec![], 10).unwrap_err();
        assert_eq!(err.field(), Some("expertise"));
        assert_eq!(err.to_string(), "At least one expertise must be selected");
    }

    #[test]
    fn expertise_ids_are_deduplicated_and_joined() {
        let go = ExpertiseRef { id: 71, name: "Go".into() };
        let b = BountyDraft::new("API", "desc", Some(skill()), vec![rust(), go, rust()], 5).unwrap();
        assert_eq!(b.expertise().len(), 2);
        assert_eq!(b.expertise_ids_csv(), "70,71");
    }

    #[test]
    fn each_bounty_gets_its_own_id() {
        let a = BountyDraft::new("API", "", Some(skill()), vec![rust()], 5).unwrap();
        let b = BountyDraft::new("API", "", Some(skill()), vec![rust()], 5).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.dedup_key(), b.dedup_key());
    }
}
