//! Layout output DTOs. Everything here serializes so the host app can ship
//! it straight to the renderer.

use serde::{Deserialize, Serialize};

use crate::model::{Person, PersonId};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A positioned person. `x`/`y` are the box centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub person: Person,
    pub generation: i32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Relation to the layout root, e.g. `Dada (Paternal Grandfather)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
}

impl LayoutNode {
    pub fn id(&self) -> PersonId {
        self.person.id
    }

    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectorKind {
    Spouse,
    ParentChild,
    Sibling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorStyle {
    Solid,
    Dashed,
}

/// A visual edge between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub kind: ConnectorKind,
    pub source: PersonId,
    pub target: PersonId,
    pub from: Point,
    pub to: Point,
    pub style: ConnectorStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// The complete result of one layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TreeLayout {
    pub root: Option<PersonId>,
    /// One node per person, in graph order.
    pub nodes: Vec<LayoutNode>,
    pub connectors: Vec<Connector>,
    pub bounds: BoundingBox,
}

impl TreeLayout {
    pub fn node(&self, id: PersonId) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.person.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn connectors_of(&self, kind: ConnectorKind) -> impl Iterator<Item = &Connector> + '_ {
        self.connectors.iter().filter(move |c| c.kind == kind)
    }
}
