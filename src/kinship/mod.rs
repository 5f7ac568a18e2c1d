//! Kinship resolution: shortest relation path → descriptive term.
//!
//! Paths are found by [`search::shortest_path`] and named by
//! [`terms::KinshipTable`]. A found path always gets a label; patterns the
//! table does not cover fall back to a possessive chain such as
//! `"Father's Brother's Son's Daughter"`.

pub mod search;
pub mod terms;

pub use terms::{KinshipLabel, KinshipTable};

use serde::{Deserialize, Serialize};

use crate::config::KinshipConfig;
use crate::graph::RelationshipGraph;
use crate::model::{PersonId, RelationStep, RelationshipPath};
use crate::{Error, Result};

/// Text returned by [`KinshipResolver::describe`] when no path exists.
pub const NO_RELATION: &str = "No relation found";

/// A resolved relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub path: RelationshipPath,
    pub label: KinshipLabel,
}

/// Path search plus term table, configured once and reused per query.
#[derive(Debug, Clone)]
pub struct KinshipResolver {
    table: KinshipTable,
    max_depth: usize,
}

impl KinshipResolver {
    pub fn new(config: &KinshipConfig) -> Self {
        Self { table: KinshipTable::standard(), max_depth: config.max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn table(&self) -> &KinshipTable {
        &self.table
    }

    /// Shortest path between two known people, or `None` beyond the depth cap.
    pub fn find_path(
        &self,
        graph: &RelationshipGraph,
        source: PersonId,
        target: PersonId,
    ) -> Result<Option<RelationshipPath>> {
        for id in [source, target] {
            if !graph.contains(id) {
                return Err(Error::UnknownPerson(id));
            }
        }
        Ok(search::shortest_path(graph, source, target, self.max_depth))
    }

    /// Label for a step sequence; the empty sequence is `Self`.
    pub fn label(&self, steps: &[RelationStep]) -> KinshipLabel {
        self.table.label(steps)
    }

    pub fn resolve(
        &self,
        graph: &RelationshipGraph,
        source: PersonId,
        target: PersonId,
    ) -> Result<Option<Resolution>> {
        Ok(self.find_path(graph, source, target)?.map(|path| {
            let label = self.label(&path.steps);
            Resolution { path, label }
        }))
    }

    /// `"Term (Gloss)"`, the generic chain, or [`NO_RELATION`].
    pub fn describe(&self, graph: &RelationshipGraph, source: PersonId, target: PersonId) -> Result<String> {
        Ok(match self.resolve(graph, source, target)? {
            Some(res) => res.label.to_string(),
            None => NO_RELATION.to_string(),
        })
    }
}

impl Default for KinshipResolver {
    fn default() -> Self {
        Self::new(&KinshipConfig::default())
    }
}
