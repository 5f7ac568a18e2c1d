//! The chain of canonical steps between two people.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Gender, PersonId, RelationKind};

/// One hop: the relation taken and the gender of the person it reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationStep {
    pub kind: RelationKind,
    pub gender: Gender,
}

impl RelationStep {
    pub fn new(kind: RelationKind, gender: Gender) -> Self {
        Self { kind, gender }
    }
}

/// Inline capacity covers every pattern in the kinship table.
pub type Steps = SmallVec<[RelationStep; 4]>;

/// A path from `source` to `target`: source -[step]-> person -[step]-> ... target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipPath {
    pub source: PersonId,
    pub target: PersonId,
    /// People along the path. Always has one more element than `steps`.
    pub people: Vec<PersonId>,
    pub steps: Steps,
}

impl RelationshipPath {
    pub fn single(person: PersonId) -> Self {
        Self { source: person, target: person, people: vec![person], steps: Steps::new() }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Extend the path with a step and the person it reaches.
    pub fn append(&mut self, step: RelationStep, person: PersonId) {
        self.steps.push(step);
        self.people.push(person);
        self.target = person;
    }

    pub fn kinds(&self) -> impl Iterator<Item = RelationKind> + '_ {
        self.steps.iter().map(|s| s.kind)
    }
}
