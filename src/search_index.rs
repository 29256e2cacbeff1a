//! Fuzzy Name Resolution
//!
//! Maps free-text species names to the closest canonical catalog name.
//!
//! - Exact canonical names short-circuit to a score of 100
//! - Everything else is scored with the weighted fuzzy ratio against every
//!   candidate; the best score wins, ties go to the earliest candidate
//! - Scores below `MATCH_THRESHOLD` are rejected as `NotFound`
//!
//! Candidate names are normalized once when the index is built.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{AdvisorError, AdvisorResult};
use crate::utils::similarity::{full_process, weighted_ratio_processed};

/// Minimum confidence (0-100) for a fuzzy match to be accepted
pub const MATCH_THRESHOLD: u8 = 60;

/// Result of resolving a free-text name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMatch {
    pub name: String,
    pub score: u8,
}

/// Pick the best-scoring candidate; first occurrence wins ties
fn best_candidate<'a, I>(scored: I) -> Option<(&'a str, u8)>
where
    I: IntoIterator<Item = (&'a str, u8)>,
{
    let mut best: Option<(&'a str, u8)> = None;
    for (name, score) in scored {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((name, score)),
        }
    }
    best
}

fn accept(query: &str, best: Option<(&str, u8)>) -> AdvisorResult<ResolvedMatch> {
    match best {
        Some((name, score)) if score >= MATCH_THRESHOLD => Ok(ResolvedMatch {
            name: name.to_string(),
            score,
        }),
        Some((name, score)) => {
            tracing::debug!(
                "Rejected match for '{}': best '{}' scored {} (< {})",
                query,
                name,
                score,
                MATCH_THRESHOLD
            );
            Err(AdvisorError::not_found(query))
        }
        None => Err(AdvisorError::not_found(query)),
    }
}

/// Resolve `query` against an arbitrary ordered candidate list
///
/// Stateless variant of [`NameIndex::resolve`]; normalizes candidates per call.
pub fn resolve<S: AsRef<str>>(query: &str, candidates: &[S]) -> AdvisorResult<ResolvedMatch> {
    let processed_query = full_process(query);
    let scored = candidates.iter().map(|candidate| {
        let candidate = candidate.as_ref();
        (
            candidate,
            weighted_ratio_processed(&processed_query, &full_process(candidate)),
        )
    });
    accept(query, best_candidate(scored))
}

/// A canonical name with its pre-normalized form
#[derive(Debug, Clone)]
struct IndexedName {
    canonical: String,
    processed: String,
}

/// Pre-normalized name index over the catalog
#[derive(Debug)]
pub struct NameIndex {
    /// Names in catalog order (tie-break order)
    names: Vec<IndexedName>,
    /// Canonical name → slot in `names`
    exact: FxHashMap<String, usize>,
}

impl NameIndex {
    /// Build the index from the catalog at startup
    pub fn build(catalog: &Catalog) -> Self {
        let start = std::time::Instant::now();

        let names: Vec<IndexedName> = catalog
            .names()
            .map(|name| IndexedName {
                canonical: name.to_string(),
                processed: full_process(name),
            })
            .collect();

        let unsearchable = names.iter().filter(|n| n.processed.is_empty()).count();
        if unsearchable > 0 {
            tracing::warn!(
                "{} species names normalize to an empty string and can only match exactly",
                unsearchable
            );
        }

        tracing::info!(
            "Name index built in {:?} ({} names)",
            start.elapsed(),
            names.len()
        );

        let exact = names
            .iter()
            .enumerate()
            .map(|(slot, n)| (n.canonical.clone(), slot))
            .collect();

        Self { names, exact }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve a free-text name to a canonical catalog name
    pub fn resolve(&self, query: &str) -> AdvisorResult<ResolvedMatch> {
        if let Some(&slot) = self.exact.get(query) {
            return Ok(ResolvedMatch {
                name: self.names[slot].canonical.clone(),
                score: 100,
            });
        }

        let processed_query = full_process(query);
        let scored = self.names.iter().map(|n| {
            (
                n.canonical.as_str(),
                weighted_ratio_processed(&processed_query, &n.processed),
            )
        });
        accept(query, best_candidate(scored))
    }
}
