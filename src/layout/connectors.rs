//! Visual edges derived from final node positions.

use hashbrown::{HashMap, HashSet};

use super::types::{Connector, ConnectorKind, ConnectorStyle, LayoutNode, Point};
use super::units::{FamilyUnits, UnitId};
use crate::graph::RelationshipGraph;
use crate::model::PersonId;

/// Build spouse, parent-child and orphan-sibling connectors.
pub fn build_connectors(
    graph: &RelationshipGraph,
    units: &FamilyUnits,
    nodes: &[LayoutNode],
    unit_center: impl Fn(UnitId) -> f64,
) -> Vec<Connector> {
    let by_id: HashMap<PersonId, &LayoutNode> = nodes.iter().map(|n| (n.id(), n)).collect();
    let mut out = Vec::new();

    // --- spouse: left member's right edge to right member's left edge ---
    let mut couples: HashSet<(PersonId, PersonId)> = HashSet::new();
    for unit in units.units().iter().filter(|u| u.is_couple()) {
        let (Some(&a), Some(&b)) = (by_id.get(&unit.members[0]), by_id.get(&unit.members[1])) else {
            continue;
        };
        let (left, right) = if a.x <= b.x { (a, b) } else { (b, a) };
        if !couples.insert(sorted_pair(left.id(), right.id())) {
            continue;
        }
        out.push(Connector {
            kind: ConnectorKind::Spouse,
            source: unit.members[0],
            target: unit.members[1],
            from: Point::new(left.right(), left.y),
            to: Point::new(right.left(), right.y),
            style: ConnectorStyle::Solid,
        });
    }

    // --- parent-child: unit bottom centre to each later-generation child's top ---
    let mut drops: HashSet<(UnitId, PersonId)> = HashSet::new();
    for unit in units.units() {
        let Some(&anchor) = by_id.get(&unit.members[0]) else { continue };
        let from = Point::new(unit_center(unit.id), anchor.bottom());
        for &child in &unit.children {
            let Some(&node) = by_id.get(&child) else { continue };
            if node.generation <= unit.generation || !drops.insert((unit.id, child)) {
                continue;
            }
            out.push(Connector {
                kind: ConnectorKind::ParentChild,
                source: unit.members[0],
                target: child,
                from,
                to: Point::new(node.x, node.top()),
                style: ConnectorStyle::Solid,
            });
        }
    }

    // --- sibling: only when no bracket can show the bond ---
    let mut pairs: HashSet<(PersonId, PersonId)> = HashSet::new();
    for node in nodes {
        let id = node.id();
        if !graph.parents(id).is_empty() {
            continue;
        }
        for &sib in graph.siblings(id) {
            let Some(&other) = by_id.get(&sib) else { continue };
            if other.generation != node.generation
                || !graph.parents(sib).is_empty()
                || !pairs.insert(sorted_pair(id, sib))
            {
                continue;
            }
            let (left, right) = if node.x <= other.x { (node, other) } else { (other, node) };
            out.push(Connector {
                kind: ConnectorKind::Sibling,
                source: id,
                target: sib,
                from: Point::new(left.right(), left.y),
                to: Point::new(right.left(), right.y),
                style: ConnectorStyle::Dashed,
            });
        }
    }

    out
}

fn sorted_pair(a: PersonId, b: PersonId) -> (PersonId, PersonId) {
    if a <= b { (a, b) } else { (b, a) }
}
