use challenge_domain::{BountyDraft, BountyId};
use serde::Serialize;

use crate::model::FormFields;

/// Fila derivada de un bounty para la tabla del paso 3 y el resumen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BountyRow {
    pub id: BountyId,
    /// Posición 0-based en la lista al momento de derivar la tabla.
    pub position: usize,
    pub title: String,
    pub description: String,
    pub skill: String,
    pub expertise: Vec<String>,
    pub points: u32,
}

/// Tabla de bounties. Derivarla dos veces de la misma lista produce el
/// mismo valor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BountyTable {
    pub rows: Vec<BountyRow>,
    pub total_points: u64,
}

impl BountyTable {
    pub fn from_bounties(bounties: &[BountyDraft]) -> Self {
        let rows: Vec<BountyRow> = bounties.iter()
                                           .enumerate()
                                           .map(|(position, b)| BountyRow { id: b.id(),
                                                                            position,
                                                                            title: b.title().to_string(),
                                                                            description: b.description().to_string(),
                                                                            skill: b.skill().name.clone(),
                                                                            expertise: b.expertise()
                                                                                        .iter()
                                                                                        .map(|e| e.name.clone())
                                                                                        .collect(),
                                                                            points: b.points() })
                                           .collect();
        let total_points = rows.iter().map(|r| u64::from(r.points)).sum();
        Self { rows, total_points }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// El área de bounties se oculta cuando no hay filas.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Resumen del paso 5, calculado sólo con el estado en memoria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub title: String,
    pub description: String,
    pub table: BountyTable,
    pub total_points: u64,
}

impl ReviewSummary {
    pub fn build(fields: &FormFields, bounties: &[BountyDraft]) -> Self {
        let table = BountyTable::from_bounties(bounties);
        Self { title: fields.text("title").trim().to_string(),
               description: fields.text("description"),
               total_points: table.total_points,
               table }
    }
}
