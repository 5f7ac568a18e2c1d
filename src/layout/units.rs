//! Family units: a person, or a same-generation couple, laid out as one block.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use super::generation::Generations;
use crate::graph::RelationshipGraph;
use crate::model::PersonId;

/// Index of a unit in [`FamilyUnits::units`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct FamilyUnit {
    pub id: UnitId,
    /// One or two people, male first.
    pub members: SmallVec<[PersonId; 2]>,
    /// Union of the members' children, first-seen order.
    pub children: Vec<PersonId>,
    pub generation: i32,
}

impl FamilyUnit {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_couple(&self) -> bool {
        self.members.len() == 2
    }
}

/// All units of a graph plus the reverse person → unit map.
#[derive(Debug, Clone, Default)]
pub struct FamilyUnits {
    units: Vec<FamilyUnit>,
    unit_of: HashMap<PersonId, UnitId>,
    /// Child units at a strictly later generation, per unit.
    child_units: Vec<Vec<UnitId>>,
    /// Inverse of `child_units`.
    parent_units: Vec<Vec<UnitId>>,
}

impl FamilyUnits {
    pub fn build(graph: &RelationshipGraph, generations: &Generations) -> Self {
        let generation_of = |id: PersonId| generations.get(id).unwrap_or(0);

        let mut units: Vec<FamilyUnit> = Vec::new();
        let mut unit_of: HashMap<PersonId, UnitId> = HashMap::with_capacity(graph.len());

        for person in graph.people() {
            if unit_of.contains_key(&person.id) {
                continue;
            }
            let generation = generation_of(person.id);
            let id = UnitId(units.len());

            let mut members: SmallVec<[PersonId; 2]> = SmallVec::new();
            members.push(person.id);
            unit_of.insert(person.id, id);

            let partner = graph
                .spouses(person.id)
                .iter()
                .copied()
                .find(|s| !unit_of.contains_key(s) && generation_of(*s) == generation);
            if let Some(partner) = partner {
                members.push(partner);
                unit_of.insert(partner, id);
            }

            // Stable sort: same-rank members keep graph order.
            members.sort_by_key(|m| graph.gender(*m).unwrap_or_default().unit_rank());

            let mut seen: HashSet<PersonId> = HashSet::new();
            let children = members
                .iter()
                .flat_map(|m| graph.children(*m).iter().copied())
                .filter(|c| seen.insert(*c))
                .collect();

            units.push(FamilyUnit { id, members, children, generation });
        }

        let mut child_units: Vec<Vec<UnitId>> = vec![Vec::new(); units.len()];
        let mut parent_units: Vec<Vec<UnitId>> = vec![Vec::new(); units.len()];
        for unit in &units {
            for child in &unit.children {
                let Some(&cu) = unit_of.get(child) else { continue };
                if cu == unit.id || units[cu.0].generation <= unit.generation {
                    continue;
                }
                if !child_units[unit.id.0].contains(&cu) {
                    child_units[unit.id.0].push(cu);
                    parent_units[cu.0].push(unit.id);
                }
            }
        }

        tracing::debug!(
            units = units.len(),
            couples = units.iter().filter(|u| u.is_couple()).count(),
            "family units built"
        );

        Self { units, unit_of, child_units, parent_units }
    }

    pub fn units(&self) -> &[FamilyUnit] {
        &self.units
    }

    pub fn get(&self, id: UnitId) -> &FamilyUnit {
        &self.units[id.0]
    }

    pub fn unit_of(&self, person: PersonId) -> Option<UnitId> {
        self.unit_of.get(&person).copied()
    }

    pub fn child_units(&self, id: UnitId) -> &[UnitId] {
        &self.child_units[id.0]
    }

    pub fn parent_units(&self, id: UnitId) -> &[UnitId] {
        &self.parent_units[id.0]
    }

    pub fn ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.units.iter().map(|u| u.id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
