//! Relation label normalization.
//!
//! Maps the open vocabulary the app stores (`"Father"`, `"late husband"`,
//! `"step-son"`, `"half_sister"`) onto the four canonical [`RelationKind`]s.
//! Derived relations (grandparent, cousin, uncle, `*_in_law`) are dropped;
//! they are reconstructed by the kinship resolver, never stored.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::model::{RawRelation, RelationEdge, RelationKind};

// ============================================================================
// Lookup tables
// ============================================================================

/// The closed vocabulary of primary relation words.
const CANONICAL_LABELS: &[(&str, RelationKind)] = &[
    ("father", RelationKind::Parent),
    ("mother", RelationKind::Parent),
    ("parent", RelationKind::Parent),
    ("dad", RelationKind::Parent),
    ("mom", RelationKind::Parent),
    ("mum", RelationKind::Parent),
    ("son", RelationKind::Child),
    ("daughter", RelationKind::Child),
    ("child", RelationKind::Child),
    ("kid", RelationKind::Child),
    ("husband", RelationKind::Spouse),
    ("wife", RelationKind::Spouse),
    ("spouse", RelationKind::Spouse),
    ("partner", RelationKind::Spouse),
    ("brother", RelationKind::Sibling),
    ("sister", RelationKind::Sibling),
    ("sibling", RelationKind::Sibling),
];

/// Qualifiers that may prefix a relation word without changing its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Late,
    Ex,
    Step,
    Half,
    Adopted,
    Foster,
    Biological,
}

const MODIFIERS: &[(&str, Modifier)] = &[
    ("late", Modifier::Late),
    ("ex", Modifier::Ex),
    ("step", Modifier::Step),
    ("half", Modifier::Half),
    ("adopted", Modifier::Adopted),
    ("foster", Modifier::Foster),
    ("biological", Modifier::Biological),
];

fn canonical_kind(word: &str) -> Option<RelationKind> {
    CANONICAL_LABELS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, kind)| *kind)
}

fn modifier(token: &str) -> Option<Modifier> {
    MODIFIERS.iter().find(|(t, _)| *t == token).map(|(_, m)| *m)
}

// ============================================================================
// Parsing
// ============================================================================

/// A classified relation label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLabel {
    pub kind: RelationKind,
    pub modifiers: SmallVec<[Modifier; 2]>,
}

/// Classify a free-text label. `None` means the label is derived or unknown.
pub fn parse_label(label: &str) -> Option<ParsedLabel> {
    let cleaned: String = label
        .trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect();

    let mut tokens: Vec<&str> = cleaned.split('_').filter(|t| !t.is_empty()).collect();
    let mut modifiers: SmallVec<[Modifier; 2]> = SmallVec::new();

    // Leading modifier tokens; the last token is always the relation word.
    while tokens.len() > 1 {
        match modifier(tokens[0]) {
            Some(m) => {
                modifiers.push(m);
                tokens.remove(0);
            }
            None => break,
        }
    }

    let [word] = tokens.as_slice() else {
        return None;
    };

    if let Some(kind) = canonical_kind(word) {
        return Some(ParsedLabel { kind, modifiers });
    }

    // Glued prefix: "stepson", "halfbrother", "exwife".
    for &(prefix, m) in MODIFIERS {
        if let Some(rest) = word.strip_prefix(prefix)
            && let Some(kind) = canonical_kind(rest)
        {
            modifiers.push(m);
            return Some(ParsedLabel { kind, modifiers });
        }
    }

    None
}

/// Turn raw app records into canonical edges. Unclassifiable labels are dropped.
pub fn normalize(raw: &[RawRelation]) -> Vec<RelationEdge> {
    let mut edges = Vec::with_capacity(raw.len());
    for rel in raw {
        match parse_label(&rel.label) {
            Some(parsed) => edges.push(RelationEdge {
                subject: rel.subject,
                object: rel.object,
                kind: parsed.kind,
            }),
            None => tracing::debug!(
                subject = %rel.subject,
                object = %rel.object,
                label = %rel.label,
                "dropping derived or unknown relation label"
            ),
        }
    }
    edges
}

// ============================================================================
// Tests
// ============================================================================
