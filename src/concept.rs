//! Ordered clause collections: a concept (required operations) and a
//! concept map (provided implementations).
//!
//! Both preserve declaration order and index clauses by key, which is the
//! shape the downstream dispatch-table builder consumes. Building fails
//! loudly on exact duplicates and on true hash collisions (equal key,
//! different signature) rather than letting a later clause shadow an
//! earlier one; see DESIGN.md for the rationale.

use std::collections::HashMap;

use anyhow::bail;

use crate::Result;
use crate::clause::{Implementation, Requirement};
use crate::fingerprint;
use crate::key::Key;

/// Named set of required operations a type must supply.
#[derive(Clone, Debug, Default)]
pub struct Concept {
    clauses: Vec<Requirement>,
    index: HashMap<Key, usize>,
}

impl Concept {
    /// Collect requirement clauses, rejecting duplicates and collisions.
    pub fn build(clauses: impl IntoIterator<Item = Requirement>) -> Result<Self> {
        let mut concept = Self::default();
        for clause in clauses {
            if let Some(&at) = concept.index.get(clause.key()) {
                let existing = &concept.clauses[at];
                if existing.signature() == clause.signature() {
                    bail!("duplicate requirement clause for key `{}`", clause.key());
                }
                bail!(
                    "signature hash collision on key `{}`: {:?} vs {:?} (fingerprints {} / {})",
                    clause.key(),
                    existing.signature().atoms(),
                    clause.signature().atoms(),
                    fingerprint::to_hex(&existing.signature().fingerprint()),
                    fingerprint::to_hex(&clause.signature().fingerprint()),
                );
            }
            concept.index.insert(clause.key().clone(), concept.clauses.len());
            concept.clauses.push(clause);
        }
        Ok(concept)
    }

    pub fn get(&self, key: &Key) -> Option<&Requirement> {
        self.index.get(key).map(|&at| &self.clauses[at])
    }

    /// Clauses in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.clauses.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.clauses.iter().map(Requirement::key)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Ordered implementation clauses for one concrete type.
#[derive(Debug, Default)]
pub struct ConceptMap {
    clauses: Vec<Implementation>,
    index: HashMap<Key, usize>,
}

impl ConceptMap {
    /// Collect implementation clauses, rejecting duplicates and collisions.
    pub fn build(clauses: impl IntoIterator<Item = Implementation>) -> Result<Self> {
        let mut map = Self::default();
        for clause in clauses {
            if let Some(&at) = map.index.get(clause.key()) {
                let existing = &map.clauses[at];
                if existing.signature() == clause.signature() {
                    bail!("duplicate implementation clause for key `{}`", clause.key());
                }
                bail!(
                    "signature hash collision on key `{}`: {:?} vs {:?} (fingerprints {} / {})",
                    clause.key(),
                    existing.signature().atoms(),
                    clause.signature().atoms(),
                    fingerprint::to_hex(&existing.signature().fingerprint()),
                    fingerprint::to_hex(&clause.signature().fingerprint()),
                );
            }
            map.index.insert(clause.key().clone(), map.clauses.len());
            map.clauses.push(clause);
        }
        Ok(map)
    }

    pub fn get(&self, key: &Key) -> Option<&Implementation> {
        self.index.get(key).map(|&at| &self.clauses[at])
    }

    /// Clauses in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Implementation> {
        self.clauses.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.clauses.iter().map(Implementation::key)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}
