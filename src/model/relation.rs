//! Relations (edges) in the family graph.

use serde::{Deserialize, Serialize};
use super::PersonId;

/// The only relation kinds ever stored in the graph.
///
/// Grandparents, cousins, in-laws and the rest are derived by the kinship
/// resolver from paths over these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Parent,
    Child,
    Spouse,
    Sibling,
}

impl RelationKind {
    /// Expansion order used by every traversal in the crate.
    pub const ALL: [RelationKind; 4] = [
        RelationKind::Parent,
        RelationKind::Child,
        RelationKind::Spouse,
        RelationKind::Sibling,
    ];

    /// The kind seen from the other end of the edge.
    pub fn mirror(self) -> Self {
        match self {
            RelationKind::Parent => RelationKind::Child,
            RelationKind::Child => RelationKind::Parent,
            RelationKind::Spouse => RelationKind::Spouse,
            RelationKind::Sibling => RelationKind::Sibling,
        }
    }

    /// Generation offset from subject to object.
    pub fn generation_delta(self) -> i32 {
        match self {
            RelationKind::Parent => -1,
            RelationKind::Child => 1,
            RelationKind::Spouse | RelationKind::Sibling => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::Parent => "parent",
            RelationKind::Child => "child",
            RelationKind::Spouse => "spouse",
            RelationKind::Sibling => "sibling",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical directed edge.
///
/// `(subject, object, Parent)` reads "object is subject's parent". Every edge
/// has a mirror `(object, subject, kind.mirror())` once inside a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationEdge {
    pub subject: PersonId,
    pub object: PersonId,
    pub kind: RelationKind,
}

impl RelationEdge {
    pub fn new(subject: PersonId, object: PersonId, kind: RelationKind) -> Self {
        Self { subject, object, kind }
    }

    /// The same fact stated from the object's side.
    pub fn mirrored(&self) -> Self {
        Self { subject: self.object, object: self.subject, kind: self.kind.mirror() }
    }

    /// The "other" end of the edge from the given person.
    pub fn other_person(&self, from: PersonId) -> Option<PersonId> {
        if from == self.subject { Some(self.object) }
        else if from == self.object { Some(self.subject) }
        else { None }
    }
}

/// A relationship record as stored by the app, with a free-text label
/// (`"father"`, `"late_husband"`, `"step-son"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRelation {
    pub subject: PersonId,
    pub object: PersonId,
    #[serde(alias = "relationship_type", alias = "type")]
    pub label: String,
}

impl RawRelation {
    /// Build a record from raw row ids, as the app's storage layer hands them over.
    pub fn new(subject: u64, object: u64, label: impl Into<String>) -> Self {
        Self { subject: PersonId(subject), object: PersonId(object), label: label.into() }
    }
}
