// skill.rs
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::{ExpertiseRef, SkillRef};

/// Skill tal como la devuelve el endpoint de listado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
}

impl Skill {
    pub fn to_ref(&self) -> SkillRef {
        SkillRef { id: self.id,
                   name: self.name.clone() }
    }
}

/// Expertise plana `{id, name, parent_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expertise {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

impl Expertise {
    pub fn to_ref(&self) -> ExpertiseRef {
        ExpertiseRef { id: self.id,
                       name: self.name.clone() }
    }
}

/// Nodo del selector jerárquico de expertise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpertiseNode {
    pub id: i64,
    pub name: String,
    pub children: Vec<ExpertiseNode>,
}

/// Arma el árbol de expertise a partir de las tuplas planas.
///
/// Los hijos se ordenan por nombre. Un `parent_id` que no existe en la lista
/// convierte al nodo en raíz. Los ciclos se cortan: cada id aparece a lo
/// sumo una vez en el árbol.
pub fn build_expertise_tree(items: &[Expertise]) -> Vec<ExpertiseNode> {
    let known: HashSet<i64> = items.iter().map(|e| e.id).collect();
    let mut by_parent: BTreeMap<Option<i64>, Vec<&Expertise>> = BTreeMap::new();
    for e in items {
        let parent = e.parent_id.filter(|p| known.contains(p) && *p != e.id);
        by_parent.entry(parent).or_default().push(e);
    }
    for children in by_parent.values_mut() {
        children.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    }

    let mut visited = HashSet::new();
    let mut roots = build_level(None, &by_parent, &mut visited);

    // Nodos en ciclo sin raíz alcanzable: se exponen como raíces.
    for e in items {
        if !visited.contains(&e.id) {
            visited.insert(e.id);
            let children = build_level(Some(e.id), &by_parent, &mut visited);
            roots.push(ExpertiseNode { id: e.id,
                                       name: e.name.clone(),
                                       children });
        }
    }
    roots
}

fn build_level(parent: Option<i64>,
               by_parent: &BTreeMap<Option<i64>, Vec<&Expertise>>,
               visited: &mut HashSet<i64>)
               -> Vec<ExpertiseNode> {
    let Some(children) = by_parent.get(&parent) else {
        return vec![];
    };
    let mut out = Vec::with_capacity(children.len());
    for e in children {
        if !visited.insert(e.id) {
            continue;
        }
        let nested = build_level(Some(e.id), by_parent, visited);
        out.push(ExpertiseNode { id: e.id,
                                 name: e.name.clone(),
                                 children: nested });
    }
    out
}
