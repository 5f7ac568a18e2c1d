//! Top-down placement of family units.
//!
//! ## Passes
//!
//! 1. **Primary roots**: the parentless ancestors of the root's unit, laid
//!    side by side, each subtree centred under its root.
//! 2. **Secondary roots**: parentless units off that lineage (in-laws,
//!    second families) are anchored beside an already placed child, then
//!    shifted right until their subtree clears every row it touches.
//! 3. **Fallback**: whatever is still unplaced goes right of everything.
//!
//! Coordinates are finally shifted so the leftmost box edge sits at `padding`.

use std::collections::BTreeMap;

use hashbrown::HashSet;

use super::units::{FamilyUnits, UnitId};
use super::width::SubtreeWidths;
use crate::config::LayoutConfig;

/// Horizontal centre of every unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitPositions {
    center: Vec<f64>,
}

impl UnitPositions {
    pub fn center(&self, id: UnitId) -> f64 {
        self.center[id.0]
    }
}

/// Place every unit; `root` is the unit holding the layout root.
pub fn assign_positions(
    units: &FamilyUnits,
    widths: &SubtreeWidths,
    root: Option<UnitId>,
    config: &LayoutConfig,
) -> UnitPositions {
    let mut placer = Placer {
        units,
        widths,
        config,
        center: vec![None; units.len()],
        rightmost: BTreeMap::new(),
    };

    if let Some(root) = root {
        placer.place_primary_roots(root);
    }
    loop {
        placer.anchor_secondary_roots();
        let next = units
            .ids()
            .find(|&u| !placer.is_placed(u) && units.parent_units(u).is_empty())
            .or_else(|| units.ids().find(|&u| !placer.is_placed(u)));
        let Some(unit) = next else { break };
        tracing::debug!(unit = unit.0, "no placed relative, falling back right of everything");
        placer.place_fallback(unit);
    }

    placer.finish()
}

// ============================================================================
// Placer
// ============================================================================

struct Placer<'a> {
    units: &'a FamilyUnits,
    widths: &'a SubtreeWidths,
    config: &'a LayoutConfig,
    center: Vec<Option<f64>>,
    /// Right edge of the rightmost placed box, per generation.
    rightmost: BTreeMap<i32, f64>,
}

/// Tentative placements of one subtree, committed together.
type Scratch = Vec<(UnitId, f64)>;

impl Placer<'_> {
    fn is_placed(&self, id: UnitId) -> bool {
        self.center[id.0].is_some()
    }

    fn generation(&self, id: UnitId) -> i32 {
        self.units.get(id).generation
    }

    fn place_primary_roots(&mut self, root: UnitId) {
        let mut roots: Vec<UnitId> = Vec::new();
        let mut seen: HashSet<UnitId> = HashSet::new();
        let mut stack = vec![root];
        while let Some(u) = stack.pop() {
            if !seen.insert(u) {
                continue;
            }
            let parents = self.units.parent_units(u);
            if parents.is_empty() {
                roots.push(u);
            }
            stack.extend(parents.iter().copied());
        }
        roots.sort();

        let mut cursor = 0.0;
        for u in roots {
            let kids = self.units.child_units(u);
            if !kids.is_empty() && kids.iter().all(|&k| self.is_placed(k)) {
                // Lineage already drawn by an earlier root: anchor like an in-law.
                continue;
            }
            let scratch = self.layout_subtree(u, cursor);
            self.commit(scratch, 0.0);
            cursor += self.widths.subtree(u) + self.config.unit_gap;
        }
    }

    fn anchor_secondary_roots(&mut self) {
        let units = self.units;
        loop {
            let mut progress = false;
            for u in units.ids() {
                if self.is_placed(u) || !units.parent_units(u).is_empty() {
                    continue;
                }
                let anchor = units.child_units(u).iter().copied().find(|&k| self.is_placed(k));
                if let Some(anchor) = anchor {
                    self.place_secondary(u, anchor);
                    progress = true;
                }
            }
            if !progress {
                break;
            }
        }
    }

    fn place_secondary(&mut self, unit: UnitId, anchor: UnitId) {
        let own = self.widths.own(unit);
        let own_left = match self.rightmost.get(&self.generation(unit)) {
            Some(right) => right + self.config.unit_gap,
            None => {
                let anchor_center = self.center[anchor.0].unwrap_or_default();
                anchor_center + self.widths.own(anchor) / 2.0 + self.config.unit_gap
            }
        };
        let own_center = own_left + own / 2.0;
        let scratch = self.layout_subtree(unit, own_center - self.widths.subtree(unit) / 2.0);
        let dx = self.clearance(&scratch);
        self.commit(scratch, dx);
    }

    fn place_fallback(&mut self, unit: UnitId) {
        let left = self
            .rightmost
            .values()
            .copied()
            .reduce(f64::max)
            .map_or(0.0, |right| right + self.config.unit_gap);
        let scratch = self.layout_subtree(unit, left);
        let dx = self.clearance(&scratch);
        self.commit(scratch, dx);
    }

    /// Centre `unit` in `[left, left + subtree)` and its unplaced child units
    /// beneath it, left to right.
    fn layout_subtree(&self, unit: UnitId, left: f64) -> Scratch {
        let mut scratch = Scratch::new();
        let mut claimed: HashSet<UnitId> = HashSet::new();
        self.layout_into(unit, left, &mut scratch, &mut claimed);
        scratch
    }

    fn layout_into(&self, unit: UnitId, left: f64, scratch: &mut Scratch, claimed: &mut HashSet<UnitId>) {
        let center = left + self.widths.subtree(unit) / 2.0;
        claimed.insert(unit);
        scratch.push((unit, center));

        let kids: Vec<UnitId> = self
            .units
            .child_units(unit)
            .iter()
            .copied()
            .filter(|&k| !self.is_placed(k) && !claimed.contains(&k))
            .collect();
        if kids.is_empty() {
            return;
        }
        claimed.extend(kids.iter().copied());

        let gap = self.config.sibling_gap;
        let total: f64 =
            kids.iter().map(|&k| self.widths.subtree(k)).sum::<f64>() + gap * (kids.len() - 1) as f64;
        let mut cursor = center - total / 2.0;
        for k in kids {
            self.layout_into(k, cursor, scratch, claimed);
            cursor += self.widths.subtree(k) + gap;
        }
    }

    /// Rightward shift that keeps every row of `scratch` clear of placed boxes.
    fn clearance(&self, scratch: &Scratch) -> f64 {
        let mut min_left: BTreeMap<i32, f64> = BTreeMap::new();
        for &(u, c) in scratch {
            let left = c - self.widths.own(u) / 2.0;
            min_left
                .entry(self.generation(u))
                .and_modify(|l| *l = l.min(left))
                .or_insert(left);
        }
        min_left
            .iter()
            .filter_map(|(g, left)| {
                self.rightmost.get(g).map(|right| right + self.config.unit_gap - left)
            })
            .fold(0.0, f64::max)
    }

    fn commit(&mut self, scratch: Scratch, dx: f64) {
        for (u, c) in scratch {
            let c = c + dx;
            self.center[u.0] = Some(c);
            let right = c + self.widths.own(u) / 2.0;
            let generation = self.generation(u);
            self.rightmost
                .entry(generation)
                .and_modify(|r| *r = r.max(right))
                .or_insert(right);
        }
    }

    fn finish(self) -> UnitPositions {
        let center: Vec<f64> = self.center.into_iter().map(Option::unwrap_or_default).collect();
        let min_left = center
            .iter()
            .enumerate()
            .map(|(i, c)| c - self.widths.own(UnitId(i)) / 2.0)
            .reduce(f64::min)
            .unwrap_or(self.config.padding);
        let dx = self.config.padding - min_left;
        UnitPositions { center: center.into_iter().map(|c| c + dx).collect() }
    }
}
