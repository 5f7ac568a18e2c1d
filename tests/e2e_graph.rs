//! End-to-end tests for record normalization, graph construction and the
//! copy-on-write `FamilyTree` handle.
//!
//! Each test goes from app-shaped records (free-text labels, JSON) to the
//! canonical graph the layout and kinship stages consume.

use pretty_assertions::assert_eq;
use vriksha::{
    EngineConfig, Error, FamilyTree, Gender, Person, PersonId, RawRelation, RelationEdge, RelationKind,
    RelationshipGraph,
};

// ============================================================================
// Helper: a small three-generation family.
//
//   Hari ── Kamla
//        │
//   Ramesh ── Sita
//        │
//      Arjun
// ============================================================================

fn people() -> Vec<Person> {
    vec![
        Person::male(1, "Hari"),
        Person::female(2, "Kamla"),
        Person::male(3, "Ramesh"),
        Person::female(4, "Sita"),
        Person::male(5, "Arjun"),
    ]
}

fn relations() -> Vec<RawRelation> {
    vec![
        RawRelation::new(1, 2, "Wife"),
        RawRelation::new(3, 1, "father"),
        RawRelation::new(3, 2, "Mother"),
        RawRelation::new(3, 4, "wife"),
        RawRelation::new(5, 3, "father"),
        RawRelation::new(5, 4, "mother"),
    ]
}

// ============================================================================
// 1. Edge direction convention
// ============================================================================

#[test]
fn test_parent_edge_means_object_is_subjects_parent() {
    let graph = RelationshipGraph::from_raw(people(), &relations());
    assert_eq!(graph.parents(PersonId(5)), &[PersonId(3), PersonId(4)]);
    assert_eq!(graph.children(PersonId(3)), &[PersonId(5)]);
    assert!(graph.children(PersonId(5)).is_empty());
}

// ============================================================================
// 2. Mirror completeness
// ============================================================================

#[test]
fn test_every_edge_has_its_mirror() {
    let graph = RelationshipGraph::from_raw(people(), &relations());
    for edge in graph.all_edges() {
        assert!(
            graph.neighbors(edge.object, edge.kind.mirror()).contains(&edge.subject),
            "missing mirror of {edge:?}"
        );
    }
    assert_eq!(graph.all_edges().len(), 12);
}

// ============================================================================
// 3. Messy input: modifiers, derived labels, unknown ids, duplicates
// ============================================================================

#[test]
fn test_messy_records_are_tolerated() {
    let graph = RelationshipGraph::from_raw(
        vec![Person::male(1, "Raja"), Person::female(2, "Rani"), Person::male(3, "Kumar"), Person::female(2, "Dup")],
        &[
            RawRelation::new(1, 2, "late wife"),
            RawRelation::new(2, 1, "husband"),
            RawRelation::new(3, 1, "step-father"),
            RawRelation::new(3, 2, "grandmother"),
            RawRelation::new(3, 42, "brother"),
            RawRelation::new(3, 3, "brother"),
        ],
    );

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.person(PersonId(2)).map(|p| p.name.as_str()), Some("Rani"));
    assert_eq!(graph.spouses(PersonId(1)), &[PersonId(2)]);
    assert_eq!(graph.parents(PersonId(3)), &[PersonId(1)]);
    assert!(graph.siblings(PersonId(3)).is_empty());
    assert_eq!(graph.all_edges().len(), 4);
}

#[test]
fn test_records_from_json() {
    let people: Vec<Person> = serde_json::from_str(
        r#"[
            {"id": 1, "name": "Ramesh", "gender": "male"},
            {"id": 2, "name": "Meera", "gender": "female", "born_on": "1990-05-01"},
            {"id": 3, "name": "Guest", "gender": "unknown"}
        ]"#,
    )
    .unwrap();
    let relations: Vec<RawRelation> = serde_json::from_str(
        r#"[{"subject": 2, "object": 1, "relationship_type": "Father"}]"#,
    )
    .unwrap();

    let graph = RelationshipGraph::from_raw(people, &relations);
    assert_eq!(graph.gender(PersonId(3)), Some(Gender::Other));
    assert_eq!(graph.children(PersonId(1)), &[PersonId(2)]);
}

// ============================================================================
// 4. Snapshot edits
// ============================================================================

#[test]
fn test_remove_person_drops_touching_edges() {
    let tree = FamilyTree::new(people(), &relations());
    let before = tree.snapshot();

    tree.remove_person(PersonId(3));

    let after = tree.snapshot();
    assert!(!after.contains(PersonId(3)));
    assert!(after.parents(PersonId(5)).iter().all(|&p| p != PersonId(3)));
    assert!(after.children(PersonId(1)).is_empty());

    // the earlier snapshot is untouched
    assert!(before.contains(PersonId(3)));
    assert_eq!(before.parents(PersonId(5)), &[PersonId(3), PersonId(4)]);
}

#[test]
fn test_add_person_and_relation() {
    let tree = FamilyTree::new(people(), &relations());
    tree.add_person(Person::female(6, "Meera"));

    assert_eq!(
        tree.add_relation(&RawRelation::new(6, 3, "daughter_of_no_one")).unwrap(),
        None
    );
    assert_eq!(
        tree.add_relation(&RawRelation::new(6, 5, "sister")).unwrap(),
        Some(RelationKind::Sibling)
    );
    assert_eq!(tree.snapshot().siblings(PersonId(5)), &[PersonId(6)]);

    assert!(matches!(
        tree.add_relation(&RawRelation::new(6, 99, "mother")),
        Err(Error::UnknownPerson(PersonId(99)))
    ));
}

#[test]
fn test_self_relation_is_not_reported_as_stored() {
    let tree = FamilyTree::new(vec![Person::male(1, "Hari")], &[]);
    assert_eq!(tree.add_relation(&RawRelation::new(1, 1, "father")).unwrap(), None);
    assert!(tree.snapshot().all_edges().is_empty());
}

#[test]
fn test_relation_to_removed_person_is_rejected() {
    let tree = FamilyTree::new(people(), &relations());
    tree.remove_person(PersonId(4));
    assert!(matches!(
        tree.add_relation(&RawRelation::new(5, 4, "mother")),
        Err(Error::UnknownPerson(PersonId(4)))
    ));
    assert!(tree.snapshot().parents(PersonId(5)).iter().all(|&p| p != PersonId(4)));
}

#[test]
fn test_from_graph_validates_config() {
    let graph = RelationshipGraph::from_raw(people(), &relations());
    let mut config = EngineConfig::default();
    config.layout.node_width = f64::NAN;
    assert!(matches!(FamilyTree::from_graph(graph.clone(), config), Err(Error::InvalidConfig(_))));

    let mut config = EngineConfig::default();
    config.kinship.max_depth = 0;
    assert!(matches!(FamilyTree::from_graph(graph.clone(), config), Err(Error::InvalidConfig(_))));

    let tree = FamilyTree::from_graph(graph, EngineConfig::default()).unwrap();
    assert_eq!(tree.snapshot().len(), 5);
}

#[test]
fn test_add_person_replaces_record_keeping_edges() {
    let tree = FamilyTree::new(people(), &relations());
    tree.add_person(Person::male(5, "Arjun Kumar").with_attribute("village", "Rampur"));

    let graph = tree.snapshot();
    let arjun = graph.person(PersonId(5)).unwrap();
    assert_eq!(arjun.name, "Arjun Kumar");
    assert_eq!(arjun.attribute("village"), Some("Rampur"));
    assert_eq!(graph.parents(PersonId(5)), &[PersonId(3), PersonId(4)]);
}

#[test]
fn test_update_with_canonical_edge() {
    let tree = FamilyTree::new(people(), &relations());
    tree.update(|g| {
        g.with_person(Person::male(6, "Mohan"))
            .with_relation(RelationEdge::new(PersonId(4), PersonId(6), RelationKind::Sibling))
    });
    assert_eq!(tree.snapshot().siblings(PersonId(6)), &[PersonId(4)]);
}

#[test]
fn test_replace_swaps_everything() {
    let tree = FamilyTree::new(people(), &relations());
    tree.replace(vec![Person::new(10, "Solo")], &[]);
    let graph = tree.snapshot();
    assert_eq!(graph.len(), 1);
    assert!(graph.all_edges().is_empty());
}
