//! Generation assignment: BFS from the root, parents one row up, children one
//! row down, spouses and siblings on the same row.

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};

use crate::graph::RelationshipGraph;
use crate::model::{PersonId, RelationKind};

/// Generation depth per person, normalized so the topmost row is 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generations {
    root: Option<PersonId>,
    depth: HashMap<PersonId, i32>,
}

impl Generations {
    /// The root actually used (after fallback).
    pub fn root(&self) -> Option<PersonId> {
        self.root
    }

    /// Generation of a person; people outside the graph have none.
    pub fn get(&self, id: PersonId) -> Option<i32> {
        self.depth.get(&id).copied()
    }

    /// Deepest generation present.
    pub fn max(&self) -> i32 {
        self.depth.values().copied().max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }
}

/// Pick the layout root: the requested id when it exists, else the first person.
pub fn resolve_root(graph: &RelationshipGraph, requested: Option<PersonId>) -> Option<PersonId> {
    match requested {
        Some(id) if graph.contains(id) => Some(id),
        _ => graph.people().first().map(|p| p.id),
    }
}

/// Assign a generation to every person in the graph.
pub fn assign_generations(graph: &RelationshipGraph, requested: Option<PersonId>) -> Generations {
    let Some(root) = resolve_root(graph, requested) else {
        return Generations::default();
    };

    let mut depth: HashMap<PersonId, i32> = HashMap::with_capacity(graph.len());
    let mut visited: HashSet<PersonId> = HashSet::with_capacity(graph.len());
    let mut queue: VecDeque<(PersonId, i32)> = VecDeque::new();

    visited.insert(root);
    queue.push_back((root, 0));

    while let Some((id, d)) = queue.pop_front() {
        depth.insert(id, d);
        for kind in RelationKind::ALL {
            for &next in graph.neighbors(id, kind) {
                if visited.insert(next) {
                    queue.push_back((next, d + kind.generation_delta()));
                }
            }
        }
    }

    let reached = depth.len();
    for person in graph.people() {
        depth.entry(person.id).or_insert(0);
    }

    let min = depth.values().copied().min().unwrap_or(0);
    if min != 0 {
        for d in depth.values_mut() {
            *d -= min;
        }
    }

    tracing::debug!(
        root = %root,
        reached,
        unreached = graph.len() - reached,
        rows = depth.values().copied().max().unwrap_or(0) + 1,
        "generations assigned"
    );

    Generations { root: Some(root), depth }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Person, RawRelation};

    fn three_generations() -> RelationshipGraph {
        RelationshipGraph::from_raw(
            vec![
                Person::male(1, "Arjun"),
                Person::male(2, "Ramesh"),
                Person::male(3, "Hari"),
                Person::female(4, "Sita"),
            ],
            &[
                RawRelation::new(1, 2, "father"),
                RawRelation::new(2, 3, "father"),
                RawRelation::new(2, 4, "wife"),
            ],
        )
    }

    #[test]
    fn test_generations_normalized_from_root() {
        let g = assign_generations(&three_generations(), Some(PersonId(1)));
        assert_eq!(g.root(), Some(PersonId(1)));
        assert_eq!(g.get(PersonId(3)), Some(0));
        assert_eq!(g.get(PersonId(2)), Some(1));
        assert_eq!(g.get(PersonId(4)), Some(1));
        assert_eq!(g.get(PersonId(1)), Some(2));
        assert_eq!(g.max(), 2);
    }

    #[test]
    fn test_root_choice_does_not_change_relative_rows() {
        let graph = three_generations();
        assert_eq!(
            assign_generations(&graph, Some(PersonId(1))),
            Generations { root: Some(PersonId(3)), ..assign_generations(&graph, Some(PersonId(3))) }
        );
    }

    #[test]
    fn test_unknown_root_falls_back_to_first_person() {
        let g = assign_generations(&three_generations(), Some(PersonId(42)));
        assert_eq!(g.root(), Some(PersonId(1)));
    }

    #[test]
    fn test_unreached_person_gets_zero() {
        let graph = RelationshipGraph::from_raw(
            vec![Person::male(1, "A"), Person::male(2, "B"), Person::female(3, "Loner")],
            &[RawRelation::new(1, 2, "father")],
        );
        let g = assign_generations(&graph, None);
        assert_eq!(g.get(PersonId(2)), Some(0));
        assert_eq!(g.get(PersonId(1)), Some(1));
        assert_eq!(g.get(PersonId(3)), Some(0));
    }

    #[test]
    fn test_parent_cycle_terminates() {
        let graph = RelationshipGraph::from_raw(
            vec![Person::male(1, "A"), Person::male(2, "B"), Person::male(3, "C")],
            &[
                RawRelation::new(1, 2, "father"),
                RawRelation::new(2, 3, "father"),
                RawRelation::new(3, 1, "father"),
            ],
        );
        let g = assign_generations(&graph, None);
        assert_eq!(g.len(), 3);
        assert!(g.get(PersonId(1)).is_some_and(|d| d >= 0));
    }

    #[test]
    fn test_empty_graph() {
        let g = assign_generations(&RelationshipGraph::new(), None);
        assert!(g.is_empty());
        assert_eq!(g.root(), None);
    }
}
