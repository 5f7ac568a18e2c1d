//! # vriksha: Family Relationship Graph Engine
//!
//! Turns flat member and relationship records into a canonical kinship
//! graph, lays it out as a generational tree, and names the relationship
//! between any two people.
//!
//! ## Design Principles
//!
//! 1. **Immutable snapshots**: `RelationshipGraph` is built once and never mutated
//! 2. **Closed vocabulary**: four canonical kinds; everything else is derived
//! 3. **Pure pipeline**: layout and resolution are functions of a snapshot
//! 4. **Copy-on-write handle**: `FamilyTree` owns the only mutable pointer
//!
//! ## Quick Start
//!
//! ```rust
//! use vriksha::{FamilyTree, Person, PersonId, RawRelation};
//!
//! # fn example() -> vriksha::Result<()> {
//! let tree = FamilyTree::new(
//!     vec![Person::male(1, "Ramesh"), Person::male(2, "Suresh"), Person::male(3, "Arjun")],
//!     &[
//!         RawRelation::new(3, 1, "father"),
//!         RawRelation::new(1, 2, "brother"),
//!     ],
//! );
//!
//! let layout = tree.layout(Some(PersonId(3)));
//! assert_eq!(layout.nodes.len(), 3);
//!
//! assert_eq!(tree.describe(PersonId(3), PersonId(2))?, "Chacha (Paternal Uncle)");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Normalize | [`normalize`] | `Vec<RelationEdge>` |
//! | Graph | [`graph`] | `RelationshipGraph` |
//! | Layout | [`layout`] | `TreeLayout` |
//! | Kinship | [`kinship`] | `Resolution` |

use std::sync::Arc;

use parking_lot::RwLock;

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod normalize;
pub mod graph;
pub mod config;
pub mod layout;
pub mod kinship;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Gender, LifeStatus, Person, PersonId,
    RawRelation, RelationEdge, RelationKind,
    RelationStep, RelationshipPath,
};

// ============================================================================
// Re-exports: Engine
// ============================================================================

pub use config::{EngineConfig, KinshipConfig, LayoutConfig};
pub use graph::RelationshipGraph;
pub use kinship::{KinshipLabel, KinshipResolver, Resolution};
pub use layout::{BoundingBox, Connector, ConnectorKind, ConnectorStyle, LayoutNode, Point, TreeLayout};

// ============================================================================
// Top-level FamilyTree handle
// ============================================================================

/// The primary entry point. A `FamilyTree` holds the current graph snapshot
/// and runs layout and kinship queries against it.
///
/// Queries clone the snapshot `Arc` and release the lock before computing;
/// edits build a fresh graph and swap it in.
pub struct FamilyTree {
    graph: RwLock<Arc<RelationshipGraph>>,
    config: EngineConfig,
    resolver: KinshipResolver,
}

impl FamilyTree {
    /// Build from app records with the default configuration.
    pub fn new(people: Vec<Person>, relations: &[RawRelation]) -> Self {
        Self::wrap(RelationshipGraph::from_raw(people, relations), EngineConfig::default())
    }

    /// Build from app records with a validated configuration.
    pub fn with_config(people: Vec<Person>, relations: &[RawRelation], config: EngineConfig) -> Result<Self> {
        Self::from_graph(RelationshipGraph::from_raw(people, relations), config)
    }

    /// Wrap an existing snapshot with a validated configuration.
    pub fn from_graph(graph: RelationshipGraph, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::wrap(graph, config))
    }

    fn wrap(graph: RelationshipGraph, config: EngineConfig) -> Self {
        let resolver = KinshipResolver::new(&config.kinship);
        Self { graph: RwLock::new(Arc::new(graph)), config, resolver }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current immutable snapshot.
    pub fn snapshot(&self) -> Arc<RelationshipGraph> {
        Arc::clone(&self.graph.read())
    }

    // ========================================================================
    // Edits (copy-on-write)
    // ========================================================================

    /// Replace the whole graph with freshly loaded records.
    pub fn replace(&self, people: Vec<Person>, relations: &[RawRelation]) {
        let next = RelationshipGraph::from_raw(people, relations);
        *self.graph.write() = Arc::new(next);
    }

    /// Derive a new snapshot from the current one and swap it in.
    ///
    /// The write lock is held while `edit` runs, so concurrent edits are
    /// serialized; readers keep the snapshot they already cloned.
    pub fn update(&self, edit: impl FnOnce(&RelationshipGraph) -> RelationshipGraph) {
        let mut guard = self.graph.write();
        let next = edit(&guard);
        *guard = Arc::new(next);
    }

    /// Add a person, or replace the record with the same id.
    pub fn add_person(&self, person: Person) {
        self.update(|g| g.with_person(person));
    }

    /// Remove a person and every relation touching them.
    pub fn remove_person(&self, id: PersonId) {
        self.update(|g| g.without_person(id));
    }

    /// Add one relation given by its free-text label.
    ///
    /// Returns the canonical kind once the edge is stored, or `None` when
    /// nothing is stored: the label names a derived relation, or both ends
    /// are the same person. Ids are checked against the graph under the
    /// write lock, so a concurrent removal cannot slip between check and edit.
    pub fn add_relation(&self, relation: &RawRelation) -> Result<Option<RelationKind>> {
        let mut guard = self.graph.write();
        for id in [relation.subject, relation.object] {
            if !guard.contains(id) {
                return Err(Error::UnknownPerson(id));
            }
        }
        if relation.subject == relation.object {
            tracing::debug!(person = %relation.subject, label = %relation.label, "self relation not stored");
            return Ok(None);
        }
        let Some(parsed) = normalize::parse_label(&relation.label) else {
            tracing::debug!(label = %relation.label, "relation label not stored");
            return Ok(None);
        };
        let next = guard.with_relation(RelationEdge::new(relation.subject, relation.object, parsed.kind));
        *guard = Arc::new(next);
        Ok(Some(parsed.kind))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Lay out the current snapshot around `root` (first person when absent).
    pub fn layout(&self, root: Option<PersonId>) -> TreeLayout {
        let graph = self.snapshot();
        layout::compute_layout(&graph, root, &self.config.layout, &self.resolver)
    }

    /// Shortest relationship between two people, with its kinship label.
    pub fn relationship(&self, source: PersonId, target: PersonId) -> Result<Option<Resolution>> {
        let graph = self.snapshot();
        self.resolver.resolve(&graph, source, target)
    }

    /// Human-readable relationship, or `"No relation found"`.
    pub fn describe(&self, source: PersonId, target: PersonId) -> Result<String> {
        let graph = self.snapshot();
        self.resolver.describe(&graph, source, target)
    }
}

// ============================================================================
// Error types
// ============================================================================

/// Unified error type for vriksha.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown person: {0}")]
    UnknownPerson(PersonId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
