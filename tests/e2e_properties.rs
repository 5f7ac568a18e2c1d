//! Property tests over generated family trees and random edge soups.
//!
//! Soups may contain cycles, contradictory parent edges, derived labels and
//! self-relations; every stage must still terminate with finite output.

use proptest::prelude::*;

use vriksha::layout::assign_generations;
use vriksha::{
    FamilyTree, Gender, Person, PersonId, RawRelation, RelationKind, RelationshipGraph, TreeLayout,
};

// ============================================================================
// Strategies
// ============================================================================

const LABELS: &[&str] = &[
    "father", "mother", "son", "daughter", "wife", "husband", "brother", "sister", "uncle", "step_son",
];

fn person(i: u64, male: bool) -> Person {
    let gender = if male { Gender::Male } else { Gender::Female };
    Person::new(i, format!("P{i}")).with_gender(gender)
}

/// A connected tree: person `i > 0` names one earlier person as parent.
fn family_tree() -> impl Strategy<Value = (Vec<Person>, Vec<RawRelation>)> {
    prop::collection::vec((any::<prop::sample::Index>(), any::<bool>()), 1..16).prop_map(|shape| {
        let people: Vec<Person> = shape.iter().enumerate().map(|(i, &(_, male))| person(i as u64, male)).collect();
        let relations: Vec<RawRelation> = shape
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, (parent, _))| RawRelation::new(i as u64, parent.index(i) as u64, "parent"))
            .collect();
        (people, relations)
    })
}

/// Arbitrary labelled edges between up to 12 people.
fn edge_soup() -> impl Strategy<Value = (Vec<Person>, Vec<RawRelation>)> {
    (1u64..12).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<bool>(), n as usize),
            prop::collection::vec((0..n, 0..n, prop::sample::select(LABELS)), 0..30),
        )
            .prop_map(|(genders, edges)| {
                let people: Vec<Person> = genders.iter().enumerate().map(|(i, &m)| person(i as u64, m)).collect();
                let relations: Vec<RawRelation> = edges.into_iter().map(|(a, b, label)| RawRelation::new(a, b, label)).collect();
                (people, relations)
            })
    })
}

fn assert_no_overlap(layout: &TreeLayout) -> Result<(), TestCaseError> {
    for (i, a) in layout.nodes.iter().enumerate() {
        for b in &layout.nodes[i + 1..] {
            if a.generation == b.generation {
                prop_assert!(
                    (a.x - b.x).abs() >= a.width - 1e-6,
                    "{} and {} overlap in generation {}",
                    a.person.id,
                    b.person.id,
                    a.generation
                );
            }
        }
    }
    Ok(())
}

// ============================================================================
// 1. Mirror invariant
// ============================================================================

proptest! {
    #[test]
    fn prop_every_edge_is_mirrored((people, relations) in edge_soup()) {
        let graph = RelationshipGraph::from_raw(people, &relations);
        for edge in graph.all_edges() {
            prop_assert!(graph.neighbors(edge.object, edge.kind.mirror()).contains(&edge.subject));
            prop_assert_ne!(edge.subject, edge.object);
        }
        for person in graph.people() {
            for kind in RelationKind::ALL {
                let list = graph.neighbors(person.id, kind);
                let mut sorted = list.to_vec();
                sorted.sort();
                sorted.dedup();
                prop_assert_eq!(sorted.len(), list.len());
            }
        }
    }
}

// ============================================================================
// 2. Generation monotonicity on consistent trees
// ============================================================================

proptest! {
    #[test]
    fn prop_parents_sit_one_row_up((people, relations) in family_tree(), root in any::<prop::sample::Index>()) {
        let root = PersonId(root.index(people.len()) as u64);
        let graph = RelationshipGraph::from_raw(people, &relations);
        let generations = assign_generations(&graph, Some(root));

        let min = graph.people().iter().filter_map(|p| generations.get(p.id)).min();
        prop_assert_eq!(min, Some(0));
        for edge in graph.all_edges().iter().filter(|e| e.kind == RelationKind::Parent) {
            prop_assert_eq!(
                generations.get(edge.object).map(|g| g + 1),
                generations.get(edge.subject)
            );
        }
    }
}

// ============================================================================
// 3. Layout: no overlap, finite, deterministic
// ============================================================================

proptest! {
    #[test]
    fn prop_tree_layout_has_no_overlap((people, relations) in family_tree()) {
        let tree = FamilyTree::new(people, &relations);
        let layout = tree.layout(None);
        prop_assert_eq!(layout.nodes.len(), tree.snapshot().len());
        assert_no_overlap(&layout)?;
    }

    #[test]
    fn prop_soup_layout_terminates_without_overlap((people, relations) in edge_soup()) {
        let tree = FamilyTree::new(people, &relations);
        let layout = tree.layout(None);
        prop_assert!(layout.nodes.iter().all(|n| n.x.is_finite() && n.y.is_finite()));
        prop_assert!(layout.nodes.iter().all(|n| n.x - n.width / 2.0 >= 40.0 - 1e-6));
        assert_no_overlap(&layout)?;
    }

    #[test]
    fn prop_layout_is_idempotent((people, relations) in edge_soup()) {
        let tree = FamilyTree::new(people, &relations);
        prop_assert_eq!(tree.layout(None), tree.layout(None));
    }
}

// ============================================================================
// 4. Kinship: symmetric paths, always labelled
// ============================================================================

proptest! {
    #[test]
    fn prop_reverse_path_is_mirrored(
        (people, relations) in family_tree(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>()
    ) {
        let n = people.len();
        let (a, b) = (PersonId(a.index(n) as u64), PersonId(b.index(n) as u64));
        let tree = FamilyTree::new(people, &relations);

        let forward = tree.relationship(a, b).unwrap();
        let backward = tree.relationship(b, a).unwrap();
        prop_assert_eq!(forward.is_some(), backward.is_some());

        if let (Some(f), Some(r)) = (forward, backward) {
            let mirrored: Vec<RelationKind> = r.path.steps.iter().rev().map(|s| s.kind.mirror()).collect();
            prop_assert_eq!(f.path.kinds().collect::<Vec<_>>(), mirrored);
            prop_assert_eq!(f.path.people.len(), f.path.steps.len() + 1);
            prop_assert!(f.path.len() <= 8);
            prop_assert!(!f.label.term.is_empty());
        }
    }

    #[test]
    fn prop_soup_resolution_never_panics((people, relations) in edge_soup()) {
        let tree = FamilyTree::new(people, &relations);
        let ids: Vec<PersonId> = tree.snapshot().people().iter().map(|p| p.id).collect();
        for &a in &ids {
            for &b in &ids {
                let described = tree.describe(a, b).unwrap();
                prop_assert!(!described.is_empty());
            }
        }
    }
}
