//! # Family Graph Model
//!
//! Plain data types shared by the normalizer, the graph, the layout pipeline
//! and the kinship resolver.
//!
//! Pure data: no I/O, no state, no traversal.

pub mod person;
pub mod relation;
pub mod path;

pub use person::{Gender, LifeStatus, Person, PersonId};
pub use relation::{RawRelation, RelationEdge, RelationKind};
pub use path::{RelationStep, RelationshipPath, Steps};
