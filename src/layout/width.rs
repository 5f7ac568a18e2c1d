//! Bottom-up subtree widths.

use hashbrown::HashSet;

use super::units::{FamilyUnits, UnitId};
use crate::config::LayoutConfig;

/// Horizontal footprint of every unit and of the subtree under it.
#[derive(Debug, Clone)]
pub struct SubtreeWidths {
    own: Vec<f64>,
    subtree: Vec<f64>,
}

impl SubtreeWidths {
    pub fn compute(units: &FamilyUnits, config: &LayoutConfig) -> Self {
        let own: Vec<f64> = units
            .units()
            .iter()
            .map(|u| config.unit_width(u.members.len()))
            .collect();

        let mut memo: Vec<Option<f64>> = vec![None; units.len()];
        let mut visiting: HashSet<UnitId> = HashSet::new();
        for id in units.ids() {
            subtree_width(id, units, config, &own, &mut memo, &mut visiting);
        }

        let subtree = memo
            .into_iter()
            .zip(&own)
            .map(|(w, own)| w.unwrap_or(*own))
            .collect();
        Self { own, subtree }
    }

    /// Width of the unit's own boxes.
    pub fn own(&self, id: UnitId) -> f64 {
        self.own[id.0]
    }

    /// Width reserved for the unit and everything below it.
    pub fn subtree(&self, id: UnitId) -> f64 {
        self.subtree[id.0]
    }
}

fn subtree_width(
    id: UnitId,
    units: &FamilyUnits,
    config: &LayoutConfig,
    own: &[f64],
    memo: &mut [Option<f64>],
    visiting: &mut HashSet<UnitId>,
) -> f64 {
    if let Some(w) = memo[id.0] {
        return w;
    }
    // Re-entered through a cycle: size it by its own boxes only.
    if !visiting.insert(id) {
        return own[id.0];
    }

    let kids = units.child_units(id);
    let width = if kids.is_empty() {
        own[id.0]
    } else {
        let total: f64 = kids
            .iter()
            .map(|&k| subtree_width(k, units, config, own, memo, visiting))
            .sum::<f64>()
            + config.sibling_gap * (kids.len() - 1) as f64;
        total.max(own[id.0])
    };

    visiting.remove(&id);
    memo[id.0] = Some(width);
    width
}
