use challenge_domain::{BountyDraft, DomainError, Expertise, ExpertiseRef, Skill, SkillRef};
use serde::{Deserialize, Serialize};

/// Estado del sub-formulario (modal) de bounty antes de confirmarlo.
///
/// No forma parte del draft persistido: si el usuario recarga la página el
/// modal empieza vacío.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BountyForm {
    pub title: String,
    pub description: String,
    pub skill: Option<SkillRef>,
    pub expertise: Vec<ExpertiseRef>,
    pub points: u32,
}

impl BountyForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cambiar de skill descarta las expertise elegidas: pertenecen a la
    /// skill anterior.
    pub fn select_skill(&mut self, skill: &Skill) {
        if self.skill.as_ref().map(|s| s.id) != Some(skill.id) {
            self.expertise.clear();
        }
        self.skill = Some(skill.to_ref());
    }

    /// Marca o desmarca una expertise. Devuelve `true` si quedó marcada.
    pub fn toggle_expertise(&mut self, expertise: &Expertise) -> bool {
        if let Some(pos) = self.expertise.iter().position(|e| e.id == expertise.id) {
            self.expertise.remove(pos);
            false
        } else {
            self.expertise.push(expertise.to_ref());
            true
        }
    }

    /// Valida y produce el bounty. El formulario no se modifica; el caller
    /// decide si limpiarlo.
    pub fn confirm(&self) -> Result<BountyDraft, DomainError> {
        BountyDraft::new(self.title.clone(),
                         self.description.clone(),
                         self.skill.clone(),
                         self.expertise.clone(),
                         self.points)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
