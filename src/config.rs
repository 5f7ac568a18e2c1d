//! Engine configuration.
//!
//! All sections default sensibly, so a host app may pass `{}` or a partial
//! document such as `{"layout": {"node_width": 140}}`.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub layout: LayoutConfig,
    pub kinship: KinshipConfig,
}

/// Layout metrics, in the renderer's units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    /// Horizontal gap between the two members of a couple.
    pub spouse_gap: f64,
    /// Horizontal gap between sibling subtrees.
    pub sibling_gap: f64,
    /// Horizontal gap between root subtrees and anchored in-law units.
    pub unit_gap: f64,
    /// Vertical gap between generation rows.
    pub generation_gap: f64,
    /// Margin around the whole layout.
    pub padding: f64,
    /// Resolve a relation-to-root label for every node.
    pub label_relations: bool,
}

/// Kinship resolver limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinshipConfig {
    /// Maximum hops a relationship path may have.
    pub max_depth: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 100.0,
            node_height: 120.0,
            spouse_gap: 20.0,
            sibling_gap: 40.0,
            unit_gap: 60.0,
            generation_gap: 80.0,
            padding: 40.0,
            label_relations: true,
        }
    }
}

impl Default for KinshipConfig {
    fn default() -> Self {
        Self { max_depth: 8 }
    }
}

impl LayoutConfig {
    /// Width of a unit's own boxes (1 or 2 members).
    pub fn unit_width(&self, members: usize) -> f64 {
        let n = members.max(1) as f64;
        n * self.node_width + (n - 1.0) * self.spouse_gap
    }

    /// Height of one generation row including the gap below it.
    pub fn row_height(&self) -> f64 {
        self.node_height + self.generation_gap
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("node_width", self.node_width), ("node_height", self.node_height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!("{name} must be positive, got {value}")));
            }
        }
        for (name, value) in [
            ("spouse_gap", self.spouse_gap),
            ("sibling_gap", self.sibling_gap),
            ("unit_gap", self.unit_gap),
            ("generation_gap", self.generation_gap),
            ("padding", self.padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!("{name} must be non-negative, got {value}")));
            }
        }
        Ok(())
    }
}

impl KinshipConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::InvalidConfig("max_depth must be at least 1".into()));
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.kinship.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document() {
        let cfg = EngineConfig::from_json(r#"{"layout": {"node_width": 140}}"#).unwrap();
        assert_eq!(cfg.layout.node_width, 140.0);
        assert_eq!(cfg.layout.node_height, 120.0);
        assert_eq!(cfg.kinship.max_depth, 8);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EngineConfig::from_json(r#"{"layout": {"node_width": 0}}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"layout": {"sibling_gap": -5}}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"kinship": {"max_depth": 0}}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(EngineConfig::from_json("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_unit_width() {
        let cfg = LayoutConfig::default();
        assert_eq!(cfg.unit_width(1), 100.0);
        assert_eq!(cfg.unit_width(2), 220.0);
    }
}
