// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Suggestion selection.
//!
//! Decide how many ranked guesses are worth showing to the user. Guesses
//! below the cutoff are dropped outright. The rest fill a quota counted in
//! repository names, not guesses, since one guess stands for a whole row of
//! case-variants that are always shown together.
//!
//! # Near Ties
//!
//! Short names tend to produce clusters of almost identical scores. A hard
//! top-K cut would pick an arbitrary member of such a cluster, so selection
//! keeps going past an exhausted quota for as long as each next score stays
//! within `tie_epsilon` of the previous one.

use crate::resolve::{index::NameKey, rank::Guess};

use serde::{Deserialize, Serialize};

/// Tunables for suggestion selection.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SuggestionPolicy {
    /// Minimum similarity a guess needs to be suggested at all.
    pub cutoff: f64,

    /// Number of repository names to aim for.
    pub target_count: usize,

    /// Largest score drop still treated as a tie once quota is spent.
    pub tie_epsilon: f64,
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self {
            cutoff: 0.25,
            target_count: 4,
            tie_epsilon: 0.015,
        }
    }
}

impl SuggestionPolicy {
    /// Pick the prefix of ranked guesses to present.
    ///
    /// Expects `guesses` in rank order. The `row_len` callback reports how
    /// many names each key stands for. Rows are never split, so the returned
    /// prefix may hold more names than `target_count`.
    pub fn select<F>(&self, mut guesses: Vec<Guess>, row_len: F) -> Vec<Guess>
    where
        F: Fn(&NameKey) -> usize,
    {
        debug_assert!(self.target_count > 0, "target_count must be positive");

        // INVARIANT: Sorted input, so everything below cutoff is a suffix.
        while guesses
            .last()
            .is_some_and(|guess| guess.score() < self.cutoff)
        {
            guesses.pop();
        }

        let mut remaining = self.target_count as isize;
        let mut previous: Option<f64> = None;
        let mut keep = 0;
        for guess in &guesses {
            if remaining <= 0 {
                if let Some(previous) = previous {
                    if previous - guess.score() > self.tie_epsilon {
                        break;
                    }
                }
            }

            remaining -= row_len(guess.key()) as isize;
            previous = Some(guess.score());
            keep += 1;
        }
        guesses.truncate(keep);

        guesses
    }
}
