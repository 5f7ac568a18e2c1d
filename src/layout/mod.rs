//! Hierarchical tree layout.
//!
//! ```text
//! RelationshipGraph
//!   → generation::assign_generations   (rows)
//!   → units::FamilyUnits               (couples as blocks)
//!   → width::SubtreeWidths             (bottom-up footprints)
//!   → position::assign_positions       (top-down centres)
//!   → connectors::build_connectors     (visual edges)
//!   → TreeLayout
//! ```
//!
//! Every call recomputes from scratch; nothing is cached between calls.

pub mod connectors;
pub mod generation;
pub mod position;
pub mod types;
pub mod units;
pub mod width;

pub use generation::{assign_generations, Generations};
pub use types::*;
pub use units::{FamilyUnit, FamilyUnits, UnitId};

use hashbrown::HashMap;

use crate::config::LayoutConfig;
use crate::graph::RelationshipGraph;
use crate::kinship::KinshipResolver;
use crate::model::PersonId;

/// Lay out the whole graph around `root` (first person when absent or unknown).
///
/// With `label_relations` on, each node runs its own root-to-node search, so
/// labelling costs O(n · (people + edges)). Turn it off for large graphs and
/// resolve the few labels a view needs on demand.
pub fn compute_layout(
    graph: &RelationshipGraph,
    root: Option<PersonId>,
    config: &LayoutConfig,
    resolver: &KinshipResolver,
) -> TreeLayout {
    if graph.is_empty() {
        return TreeLayout::default();
    }

    let generations = assign_generations(graph, root);
    let units = FamilyUnits::build(graph, &generations);
    let widths = width::SubtreeWidths::compute(&units, config);
    let root_unit = generations.root().and_then(|r| units.unit_of(r));
    let positions = position::assign_positions(&units, &widths, root_unit, config);

    // Member centres within each unit, left to right.
    let mut centers: HashMap<PersonId, (f64, i32)> = HashMap::with_capacity(graph.len());
    for unit in units.units() {
        let left = positions.center(unit.id) - widths.own(unit.id) / 2.0;
        for (i, &member) in unit.members.iter().enumerate() {
            let x = left + config.node_width / 2.0 + i as f64 * (config.node_width + config.spouse_gap);
            centers.insert(member, (x, unit.generation));
        }
    }

    let root_id = generations.root();
    let nodes: Vec<LayoutNode> = graph
        .people()
        .iter()
        .map(|person| {
            let (x, generation) = centers.get(&person.id).copied().unwrap_or((config.padding, 0));
            let y = config.padding + f64::from(generation) * config.row_height() + config.node_height / 2.0;
            let relation = match root_id {
                Some(r) if config.label_relations => resolver
                    .resolve(graph, r, person.id)
                    .ok()
                    .flatten()
                    .map(|res| res.label.to_string()),
                _ => None,
            };
            LayoutNode {
                person: person.clone(),
                generation,
                x,
                y,
                width: config.node_width,
                height: config.node_height,
                relation,
            }
        })
        .collect();

    let connectors = connectors::build_connectors(graph, &units, &nodes, |u| positions.center(u));
    let bounds = canvas_bounds(&nodes, config.padding);

    tracing::debug!(
        root = ?root_id.map(|r| r.0),
        nodes = nodes.len(),
        connectors = connectors.len(),
        width = bounds.width(),
        height = bounds.height(),
        "layout computed"
    );

    TreeLayout { root: root_id, nodes, connectors, bounds }
}

/// Canvas from the origin to the far box edges plus padding.
fn canvas_bounds(nodes: &[LayoutNode], padding: f64) -> BoundingBox {
    let max_x = nodes.iter().map(LayoutNode::right).fold(0.0, f64::max);
    let max_y = nodes.iter().map(LayoutNode::bottom).fold(0.0, f64::max);
    BoundingBox { min_x: 0.0, min_y: 0.0, max_x: max_x + padding, max_y: max_y + padding }
}
