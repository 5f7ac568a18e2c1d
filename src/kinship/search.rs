//! Bidirectional breadth-first path search.
//!
//! Both frontiers expand one full layer at a time, forward first. The first
//! layer that touches the other side's visited set yields the meeting node
//! with the smallest depth on that other side, which makes the joined path
//! shortest.

use hashbrown::HashMap;

use crate::graph::RelationshipGraph;
use crate::model::{PersonId, RelationKind, RelationStep, RelationshipPath};

#[derive(Debug, Clone, Copy)]
struct Visit {
    /// `(previous, kind)`: this person is `previous`'s `kind`.
    via: Option<(PersonId, RelationKind)>,
    depth: usize,
}

struct Frontier {
    visits: HashMap<PersonId, Visit>,
    layer: Vec<PersonId>,
    depth: usize,
}

impl Frontier {
    fn new(start: PersonId) -> Self {
        let mut visits = HashMap::new();
        visits.insert(start, Visit { via: None, depth: 0 });
        Self { visits, layer: vec![start], depth: 0 }
    }

    /// Expand one full layer; returns the newly discovered people in order.
    fn expand(&mut self, graph: &RelationshipGraph) -> &[PersonId] {
        self.depth += 1;
        let mut next = Vec::new();
        for &id in &self.layer {
            for kind in RelationKind::ALL {
                for &n in graph.neighbors(id, kind) {
                    if self.visits.contains_key(&n) {
                        continue;
                    }
                    self.visits.insert(n, Visit { via: Some((id, kind)), depth: self.depth });
                    next.push(n);
                }
            }
        }
        self.layer = next;
        &self.layer
    }

    fn depth_of(&self, id: PersonId) -> Option<usize> {
        self.visits.get(&id).map(|v| v.depth)
    }

    fn via(&self, id: PersonId) -> Option<(PersonId, RelationKind)> {
        self.visits.get(&id).and_then(|v| v.via)
    }
}

/// Shortest path of at most `max_depth` hops. Both ids must be in `graph`.
pub fn shortest_path(
    graph: &RelationshipGraph,
    source: PersonId,
    target: PersonId,
    max_depth: usize,
) -> Option<RelationshipPath> {
    if source == target {
        return Some(RelationshipPath::single(source));
    }

    let mut forward = Frontier::new(source);
    let mut backward = Frontier::new(target);
    let mut forward_turn = true;

    while forward.depth + backward.depth < max_depth {
        let (active, other) = if forward_turn {
            (&mut forward, &backward)
        } else {
            (&mut backward, &forward)
        };
        let discovered = active.expand(graph);
        if discovered.is_empty() {
            // One side's component is exhausted without meeting the other.
            return None;
        }
        let meeting = discovered
            .iter()
            .filter_map(|&id| other.depth_of(id).map(|d| (id, d)))
            .min_by_key(|&(_, d)| d);

        if let Some((meet, _)) = meeting {
            tracing::trace!(
                source = %source,
                target = %target,
                meet = %meet,
                forward_depth = forward.depth,
                backward_depth = backward.depth,
                "search frontiers met"
            );
            return Some(join(graph, &forward, &backward, source, meet));
        }
        forward_turn = !forward_turn;
    }
    None
}

/// Source → meet from the forward tree, then meet → target from the
/// backward tree with each kind mirrored.
fn join(
    graph: &RelationshipGraph,
    forward: &Frontier,
    backward: &Frontier,
    source: PersonId,
    meet: PersonId,
) -> RelationshipPath {
    let gender = |id: PersonId| graph.gender(id).unwrap_or_default();

    let mut head: Vec<(PersonId, RelationKind)> = Vec::new();
    let mut cur = meet;
    while let Some((prev, kind)) = forward.via(cur) {
        head.push((cur, kind));
        cur = prev;
    }

    let mut path = RelationshipPath::single(source);
    for (person, kind) in head.into_iter().rev() {
        path.append(RelationStep::new(kind, gender(person)), person);
    }

    let mut cur = meet;
    while let Some((next, kind)) = backward.via(cur) {
        path.append(RelationStep::new(kind.mirror(), gender(next)), next);
        cur = next;
    }
    path
}
