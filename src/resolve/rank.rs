// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Similarity ranking of candidate keys.

use crate::resolve::{index::NameKey, vector::vectorize};

use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Candidate key paired with its similarity to the pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Guess {
    key: NameKey,
    score: f64,
}

impl Guess {
    /// Construct new guess.
    pub fn new(key: NameKey, score: f64) -> Self {
        Self { key, score }
    }

    /// Key of the row this guess stands for.
    pub fn key(&self) -> &NameKey {
        &self.key
    }

    /// Cosine similarity to the pattern, in `[0, 1]`.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Rank order: higher score first, then ascending key.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.key.cmp(&other.key))
    }
}

/// Rank candidate keys by similarity to pattern key.
///
/// Produces one [`Guess`] per distinct candidate key, sorted by descending
/// score. Ties are broken by ascending lexical order of the key, so the
/// result never depends on the order candidates were enumerated in.
///
/// Costs O(C·L²) for C candidates of length L.
#[instrument(skip(candidates), level = "debug")]
pub fn rank<'a>(candidates: impl IntoIterator<Item = &'a NameKey>, pattern: &NameKey) -> Vec<Guess> {
    let target = vectorize(pattern.as_str());

    let mut keys: Vec<&NameKey> = candidates.into_iter().collect();
    keys.sort_unstable();
    keys.dedup();

    let mut guesses: Vec<Guess> = keys
        .into_iter()
        .map(|key| {
            let score = vectorize(key.as_str())
                .cosine_similarity(&target)
                .unwrap_or(0.0);
            Guess::new(key.clone(), score)
        })
        .collect();
    guesses.sort_by(Guess::rank_cmp);

    debug!("ranked {} candidates against {pattern}", guesses.len());

    guesses
}
