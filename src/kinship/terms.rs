//! Descriptive kinship terms.
//!
//! Each entry maps a step pattern, one `(kind, gender of the person reached)` per
//! hop, to a Hindi term with an English gloss. The gender of every pivot
//! counts: father's brother (*Chacha*) and mother's brother (*Mama*) are
//! different relatives, not one "uncle".
//!
//! `Any` in a pattern is a wildcard for pivots whose gender does not change
//! the term; it is expanded into exact keys when the table is built, so a
//! lookup is a single hash probe and an uncovered pattern is simply a missing
//! key.

use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::{Gender, RelationKind, RelationStep, Steps};

// ============================================================================
// Declarative table
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Pivot {
    Male,
    Female,
    Any,
}

impl Pivot {
    fn genders(self) -> &'static [Gender] {
        match self {
            Pivot::Male => &[Gender::Male],
            Pivot::Female => &[Gender::Female],
            Pivot::Any => &[Gender::Male, Gender::Female, Gender::Other],
        }
    }
}

struct TermEntry {
    pattern: &'static [(RelationKind, Pivot)],
    term: &'static str,
    gloss: &'static str,
}

macro_rules! terms {
    ($( [$($kind:ident $pivot:ident),+] => $term:literal, $gloss:literal; )*) => {
        &[ $( TermEntry {
            pattern: &[$((RelationKind::$kind, Pivot::$pivot)),+],
            term: $term,
            gloss: $gloss,
        } ),* ]
    };
}

const TERMS: &[TermEntry] = terms! {
    // --- one hop ---
    [Parent Male] => "Pita", "Father";
    [Parent Female] => "Mata", "Mother";
    [Child Male] => "Beta", "Son";
    [Child Female] => "Beti", "Daughter";
    [Spouse Male] => "Pati", "Husband";
    [Spouse Female] => "Patni", "Wife";
    [Sibling Male] => "Bhai", "Brother";
    [Sibling Female] => "Behen", "Sister";

    // --- two hops ---
    [Parent Male, Parent Male] => "Dada", "Paternal Grandfather";
    [Parent Male, Parent Female] => "Dadi", "Paternal Grandmother";
    [Parent Female, Parent Male] => "Nana", "Maternal Grandfather";
    [Parent Female, Parent Female] => "Nani", "Maternal Grandmother";
    [Child Male, Child Male] => "Pota", "Son's Son";
    [Child Male, Child Female] => "Poti", "Son's Daughter";
    [Child Female, Child Male] => "Nati", "Daughter's Son";
    [Child Female, Child Female] => "Natin", "Daughter's Daughter";
    [Parent Male, Sibling Male] => "Chacha", "Paternal Uncle";
    [Parent Male, Sibling Female] => "Bua", "Paternal Aunt";
    [Parent Female, Sibling Male] => "Mama", "Maternal Uncle";
    [Parent Female, Sibling Female] => "Mausi", "Maternal Aunt";
    [Sibling Male, Child Male] => "Bhatija", "Brother's Son";
    [Sibling Male, Child Female] => "Bhatiji", "Brother's Daughter";
    [Sibling Female, Child Male] => "Bhanja", "Sister's Son";
    [Sibling Female, Child Female] => "Bhanji", "Sister's Daughter";
    [Spouse Any, Parent Male] => "Sasur", "Father-in-law";
    [Spouse Any, Parent Female] => "Saas", "Mother-in-law";
    [Spouse Male, Sibling Male] => "Devar", "Husband's Brother";
    [Spouse Male, Sibling Female] => "Nanad", "Husband's Sister";
    [Spouse Female, Sibling Male] => "Saala", "Wife's Brother";
    [Spouse Female, Sibling Female] => "Saali", "Wife's Sister";
    [Child Male, Spouse Female] => "Bahu", "Daughter-in-law";
    [Child Female, Spouse Male] => "Damad", "Son-in-law";
    [Sibling Male, Spouse Female] => "Bhabhi", "Brother's Wife";
    [Sibling Female, Spouse Male] => "Jija", "Sister's Husband";
    [Parent Male, Spouse Female] => "Sauteli Maa", "Stepmother";
    [Parent Female, Spouse Male] => "Sautela Pita", "Stepfather";
    [Spouse Any, Child Male] => "Sautela Beta", "Stepson";
    [Spouse Any, Child Female] => "Sauteli Beti", "Stepdaughter";
    // sibling reached through a shared parent (no explicit sibling edge)
    [Parent Any, Child Male] => "Bhai", "Brother";
    [Parent Any, Child Female] => "Behen", "Sister";

    // --- three hops ---
    [Parent Male, Parent Any, Parent Male] => "Pardada", "Paternal Great-grandfather";
    [Parent Male, Parent Any, Parent Female] => "Pardadi", "Paternal Great-grandmother";
    [Parent Female, Parent Any, Parent Male] => "Parnana", "Maternal Great-grandfather";
    [Parent Female, Parent Any, Parent Female] => "Parnani", "Maternal Great-grandmother";
    [Child Any, Child Any, Child Male] => "Parpota", "Great-grandson";
    [Child Any, Child Any, Child Female] => "Parpoti", "Great-granddaughter";
    [Parent Male, Sibling Male, Child Male] => "Chachera Bhai", "Father's Brother's Son";
    [Parent Male, Sibling Male, Child Female] => "Chacheri Behen", "Father's Brother's Daughter";
    [Parent Male, Sibling Female, Child Male] => "Phuphera Bhai", "Father's Sister's Son";
    [Parent Male, Sibling Female, Child Female] => "Phupheri Behen", "Father's Sister's Daughter";
    [Parent Female, Sibling Male, Child Male] => "Mamera Bhai", "Mother's Brother's Son";
    [Parent Female, Sibling Male, Child Female] => "Mameri Behen", "Mother's Brother's Daughter";
    [Parent Female, Sibling Female, Child Male] => "Mausera Bhai", "Mother's Sister's Son";
    [Parent Female, Sibling Female, Child Female] => "Mauseri Behen", "Mother's Sister's Daughter";
    [Parent Male, Sibling Male, Spouse Female] => "Chachi", "Father's Brother's Wife";
    [Parent Male, Sibling Female, Spouse Male] => "Phupha", "Father's Sister's Husband";
    [Parent Female, Sibling Male, Spouse Female] => "Mami", "Mother's Brother's Wife";
    [Parent Female, Sibling Female, Spouse Male] => "Mausa", "Mother's Sister's Husband";
    [Parent Male, Parent Any, Child Male] => "Chacha", "Paternal Uncle";
    [Parent Male, Parent Any, Child Female] => "Bua", "Paternal Aunt";
    [Parent Female, Parent Any, Child Male] => "Mama", "Maternal Uncle";
    [Parent Female, Parent Any, Child Female] => "Mausi", "Maternal Aunt";
    [Parent Any, Child Male, Child Male] => "Bhatija", "Brother's Son";
    [Parent Any, Child Male, Child Female] => "Bhatiji", "Brother's Daughter";
    [Parent Any, Child Female, Child Male] => "Bhanja", "Sister's Son";
    [Parent Any, Child Female, Child Female] => "Bhanji", "Sister's Daughter";
    [Parent Any, Child Male, Spouse Female] => "Bhabhi", "Brother's Wife";
    [Parent Any, Child Female, Spouse Male] => "Jija", "Sister's Husband";
    [Spouse Male, Parent Any, Child Male] => "Devar", "Husband's Brother";
    [Spouse Male, Parent Any, Child Female] => "Nanad", "Husband's Sister";
    [Spouse Female, Parent Any, Child Male] => "Saala", "Wife's Brother";
    [Spouse Female, Parent Any, Child Female] => "Saali", "Wife's Sister";
    [Child Any, Spouse Any, Parent Male] => "Samdhi", "Co-father-in-law";
    [Child Any, Spouse Any, Parent Female] => "Samdhan", "Co-mother-in-law";
    [Child Any, Child Male, Spouse Female] => "Pota Bahu", "Granddaughter-in-law";

    // --- four hops ---
    [Parent Male, Parent Any, Child Male, Child Male] => "Chachera Bhai", "Father's Brother's Son";
    [Parent Male, Parent Any, Child Male, Child Female] => "Chacheri Behen", "Father's Brother's Daughter";
    [Parent Male, Parent Any, Child Female, Child Male] => "Phuphera Bhai", "Father's Sister's Son";
    [Parent Male, Parent Any, Child Female, Child Female] => "Phupheri Behen", "Father's Sister's Daughter";
    [Parent Female, Parent Any, Child Male, Child Male] => "Mamera Bhai", "Mother's Brother's Son";
    [Parent Female, Parent Any, Child Male, Child Female] => "Mameri Behen", "Mother's Brother's Daughter";
    [Parent Female, Parent Any, Child Female, Child Male] => "Mausera Bhai", "Mother's Sister's Son";
    [Parent Female, Parent Any, Child Female, Child Female] => "Mauseri Behen", "Mother's Sister's Daughter";
    [Parent Male, Parent Any, Child Male, Spouse Female] => "Chachi", "Father's Brother's Wife";
    [Parent Male, Parent Any, Child Female, Spouse Male] => "Phupha", "Father's Sister's Husband";
    [Parent Female, Parent Any, Child Male, Spouse Female] => "Mami", "Mother's Brother's Wife";
    [Parent Female, Parent Any, Child Female, Spouse Male] => "Mausa", "Mother's Sister's Husband";
};

// ============================================================================
// Label
// ============================================================================

/// A resolved kinship label, e.g. `Chacha (Paternal Uncle)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KinshipLabel {
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gloss: Option<String>,
}

impl KinshipLabel {
    pub fn new(term: impl Into<String>, gloss: Option<String>) -> Self {
        Self { term: term.into(), gloss }
    }

    pub fn self_label() -> Self {
        Self::new("Self", None)
    }

    /// True when the label came from the generic possessive chain.
    pub fn is_generic(&self) -> bool {
        self.gloss.is_none() && self.term != "Self"
    }
}

impl fmt::Display for KinshipLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.gloss {
            Some(gloss) => write!(f, "{} ({})", self.term, gloss),
            None => f.write_str(&self.term),
        }
    }
}

// ============================================================================
// Table
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Term {
    term: &'static str,
    gloss: &'static str,
}

/// Exact-key lookup table over step sequences of length 1–4.
#[derive(Debug, Clone)]
pub struct KinshipTable {
    terms: HashMap<Steps, Term>,
}

impl KinshipTable {
    /// The built-in descriptive (Hindi) table.
    pub fn standard() -> Self {
        let mut terms = HashMap::new();
        for entry in TERMS {
            for key in expand(entry.pattern) {
                // First entry wins on overlapping expansions.
                terms.entry(key).or_insert(Term { term: entry.term, gloss: entry.gloss });
            }
        }
        Self { terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn contains(&self, steps: &[RelationStep]) -> bool {
        self.terms.contains_key(steps)
    }

    /// Label for a non-empty step sequence; falls back to the possessive chain.
    pub fn label(&self, steps: &[RelationStep]) -> KinshipLabel {
        if steps.is_empty() {
            return KinshipLabel::self_label();
        }
        match self.terms.get(steps) {
            Some(t) => KinshipLabel::new(t.term, Some(t.gloss.to_string())),
            None => KinshipLabel::new(describe_generic(steps), None),
        }
    }
}

impl Default for KinshipTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Cartesian expansion of wildcard pivots into exact keys.
fn expand(pattern: &[(RelationKind, Pivot)]) -> Vec<Steps> {
    let mut keys: Vec<Steps> = vec![Steps::new()];
    for &(kind, pivot) in pattern {
        let mut next = Vec::with_capacity(keys.len() * pivot.genders().len());
        for key in &keys {
            for &gender in pivot.genders() {
                let mut k = key.clone();
                k.push(RelationStep::new(kind, gender));
                next.push(k);
            }
        }
        keys = next;
    }
    keys
}

/// English noun for one step: "Father", "Sister", "Spouse", ...
pub fn step_noun(step: RelationStep) -> &'static str {
    match (step.kind, step.gender) {
        (RelationKind::Parent, Gender::Male) => "Father",
        (RelationKind::Parent, Gender::Female) => "Mother",
        (RelationKind::Parent, Gender::Other) => "Parent",
        (RelationKind::Child, Gender::Male) => "Son",
        (RelationKind::Child, Gender::Female) => "Daughter",
        (RelationKind::Child, Gender::Other) => "Child",
        (RelationKind::Spouse, Gender::Male) => "Husband",
        (RelationKind::Spouse, Gender::Female) => "Wife",
        (RelationKind::Spouse, Gender::Other) => "Spouse",
        (RelationKind::Sibling, Gender::Male) => "Brother",
        (RelationKind::Sibling, Gender::Female) => "Sister",
        (RelationKind::Sibling, Gender::Other) => "Sibling",
    }
}

/// "Father's Brother's Son": each step's possessive, trailing marker trimmed.
pub fn describe_generic(steps: &[RelationStep]) -> String {
    let mut out = String::new();
    for step in steps {
        out.push_str(step_noun(*step));
        out.push_str("'s ");
    }
    let trimmed = out.trim_end();
    trimmed.strip_suffix("'s").unwrap_or(trimmed).to_string()
}
