//! Relationship graph: the immutable snapshot every computation runs on.
//!
//! People are kept in input order and each person carries four neighbour
//! lists (parents, children, spouses, siblings). Construction is a single
//! pass over the edges: every edge is inserted together with its mirror and
//! duplicates are filtered by `(subject, object, kind)`.
//!
//! ## Tolerated input defects
//!
//! - **Missing mirrors**: synthesized.
//! - **Duplicate edges**: dropped.
//! - **Unknown person ids / self-edges**: skipped with a `warn!`, never fatal.
//! - **Duplicate people**: the first record wins.
//!
//! The graph is never mutated in place. The `with_*` / `without_*` helpers
//! return a freshly built snapshot.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::model::*;
use crate::normalize;

// ============================================================================
// Adjacency
// ============================================================================

/// Neighbour lists of one person, in insertion order.
#[derive(Debug, Clone, Default)]
struct Kin {
    parents: SmallVec<[PersonId; 2]>,
    children: Vec<PersonId>,
    spouses: SmallVec<[PersonId; 1]>,
    siblings: Vec<PersonId>,
}

impl Kin {
    fn list(&self, kind: RelationKind) -> &[PersonId] {
        match kind {
            RelationKind::Parent => &self.parents,
            RelationKind::Child => &self.children,
            RelationKind::Spouse => &self.spouses,
            RelationKind::Sibling => &self.siblings,
        }
    }

    fn push(&mut self, kind: RelationKind, id: PersonId) {
        match kind {
            RelationKind::Parent => self.parents.push(id),
            RelationKind::Child => self.children.push(id),
            RelationKind::Spouse => self.spouses.push(id),
            RelationKind::Sibling => self.siblings.push(id),
        }
    }
}

// ============================================================================
// RelationshipGraph
// ============================================================================

/// Canonical, mirror-complete family graph.
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    people: Vec<Person>,
    /// person id → index into `people`
    index: HashMap<PersonId, usize>,
    kin: HashMap<PersonId, Kin>,
    /// Every stored edge, mirrors included, in insertion order.
    edges: Vec<RelationEdge>,
}

impl RelationshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from people and canonical edges.
    pub fn build(people: Vec<Person>, edges: impl IntoIterator<Item = RelationEdge>) -> Self {
        let mut graph = Self::default();

        for person in people {
            if graph.index.contains_key(&person.id) {
                tracing::warn!(person = %person.id, "duplicate person id, keeping first record");
                continue;
            }
            graph.index.insert(person.id, graph.people.len());
            graph.kin.insert(person.id, Kin::default());
            graph.people.push(person);
        }

        let mut seen: HashSet<RelationEdge> = HashSet::new();
        for edge in edges {
            if !graph.index.contains_key(&edge.subject) || !graph.index.contains_key(&edge.object) {
                tracing::warn!(
                    subject = %edge.subject,
                    object = %edge.object,
                    kind = %edge.kind,
                    "skipping relation that references an unknown person"
                );
                continue;
            }
            if edge.subject == edge.object {
                tracing::warn!(person = %edge.subject, kind = %edge.kind, "skipping self relation");
                continue;
            }
            for e in [edge, edge.mirrored()] {
                if seen.insert(e) {
                    if let Some(kin) = graph.kin.get_mut(&e.subject) {
                        kin.push(e.kind, e.object);
                    }
                    graph.edges.push(e);
                }
            }
        }

        tracing::debug!(
            people = graph.people.len(),
            edges = graph.edges.len(),
            "relationship graph built"
        );
        graph
    }

    /// Normalize raw app records, then build.
    pub fn from_raw(people: Vec<Person>, relations: &[RawRelation]) -> Self {
        Self::build(people, normalize::normalize(relations))
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Neighbours of `id` of the given kind. Unknown ids have none.
    pub fn neighbors(&self, id: PersonId, kind: RelationKind) -> &[PersonId] {
        match self.kin.get(&id) {
            Some(kin) => kin.list(kind),
            None => &[],
        }
    }

    pub fn parents(&self, id: PersonId) -> &[PersonId] {
        self.neighbors(id, RelationKind::Parent)
    }

    pub fn children(&self, id: PersonId) -> &[PersonId] {
        self.neighbors(id, RelationKind::Child)
    }

    pub fn spouses(&self, id: PersonId) -> &[PersonId] {
        self.neighbors(id, RelationKind::Spouse)
    }

    pub fn siblings(&self, id: PersonId) -> &[PersonId] {
        self.neighbors(id, RelationKind::Sibling)
    }

    /// Every stored edge including synthesized mirrors.
    pub fn all_edges(&self) -> &[RelationEdge] {
        &self.edges
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.index.get(&id).map(|&i| &self.people[i])
    }

    pub fn gender(&self, id: PersonId) -> Option<Gender> {
        self.person(id).map(|p| p.gender)
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.index.contains_key(&id)
    }

    /// People in input order.
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Position of a person in input order; used as the stable tiebreak.
    pub fn position(&self, id: PersonId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Edges as originally stated: one direction per fact, mirrors skipped.
    fn primary_edges(&self) -> impl Iterator<Item = RelationEdge> + '_ {
        let mut emitted: HashSet<RelationEdge> = HashSet::new();
        self.edges.iter().filter_map(move |e| {
            if emitted.contains(&e.mirrored()) {
                None
            } else {
                emitted.insert(*e);
                Some(*e)
            }
        })
    }

    // ========================================================================
    // Snapshot edits
    // ========================================================================

    /// A new snapshot with `person` added (or replacing the record with the same id).
    pub fn with_person(&self, person: Person) -> Self {
        let mut people = self.people.clone();
        match self.index.get(&person.id) {
            Some(&i) => people[i] = person,
            None => people.push(person),
        }
        Self::build(people, self.primary_edges().collect::<Vec<_>>())
    }

    /// A new snapshot without `id` and without any edge touching it.
    pub fn without_person(&self, id: PersonId) -> Self {
        let people = self.people.iter().filter(|p| p.id != id).cloned().collect();
        let edges: Vec<RelationEdge> = self
            .primary_edges()
            .filter(|e| e.subject != id && e.object != id)
            .collect();
        Self::build(people, edges)
    }

    /// A new snapshot with one more relation.
    pub fn with_relation(&self, edge: RelationEdge) -> Self {
        let mut edges: Vec<RelationEdge> = self.primary_edges().collect();
        edges.push(edge);
        Self::build(self.people.clone(), edges)
    }
}

// ============================================================================
// Tests
// ============================================================================
