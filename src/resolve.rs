// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Repository name resolution.
//!
//! Users mistype repository names, or remember them with the wrong case. The
//! resolver takes whatever the user typed, and decides what to tell them:
//! an authoritative answer, a narrow set of near-certain alternatives, or a
//! ranked list of loose guesses.
//!
//! # Decision Tree
//!
//! Every request first goes through the [`CaseFoldIndex`], even when the
//! pattern looks like it matches exactly, because an exact match can still
//! collide with case-variants that the user should hear about.
//!
//! 1. No known repositories at all: [`Resolution::NoReposAtAll`].
//! 2. Pattern is a known name: [`Resolution::ExactMatch`], with every other
//!    case-variant of that name attached.
//! 3. Exactly one name folds into the pattern: [`Resolution::UniqueCaseFold`].
//! 4. Several names fold into the pattern: [`Resolution::MultipleCaseFold`].
//! 5. Nothing folds into the pattern: rank every row by substring similarity
//!    and select what is worth showing. Either [`Resolution::Suggestions`] or
//!    [`Resolution::NoSimilarMatch`] if nothing survives the cutoff.
//!
//! # See Also
//!
//! 1. [`vector`] for the similarity metric.
//! 2. [`select`] for the suggestion quota policy.

pub mod index;
pub mod rank;
pub mod select;
pub mod vector;

use crate::resolve::{
    index::{CaseFoldIndex, NameKey},
    rank::rank,
    select::SuggestionPolicy,
};

use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::{debug, instrument};

/// File name suffix of bare repositories.
pub const REPO_SUFFIX: &str = ".git";

/// User supplied repository name to resolve.
///
/// # Invariant
///
/// - Never empty.
/// - Never contains a path separator.
/// - Never ends with [`REPO_SUFFIX`] left over from the raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern(String);

impl Pattern {
    /// Construct new pattern from raw user input.
    ///
    /// Strips one trailing [`REPO_SUFFIX`] if present.
    ///
    /// # Errors
    ///
    /// - Return [`ResolveError::EmptyPattern`] if nothing is left after
    ///   stripping the suffix.
    /// - Return [`ResolveError::PathSeparator`] if input contains '/'.
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let raw = raw.as_ref();
        let name = raw.strip_suffix(REPO_SUFFIX).unwrap_or(raw);

        if name.is_empty() {
            return Err(ResolveError::EmptyPattern);
        }

        if name.contains('/') {
            return Err(ResolveError::PathSeparator(raw.to_string()));
        }

        Ok(Self(name.to_string()))
    }

    /// Treat pattern as [`str`] slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Pattern {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(self.as_str())
    }
}

/// Row of names suggested through similarity ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// Key shared by every name in the row.
    pub key: NameKey,

    /// Similarity of key to pattern.
    pub score: f64,

    /// Known names of the row in lexical order.
    pub names: Vec<String>,
}

/// Outcome of resolving one pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// No repositories are known at all.
    NoReposAtAll,

    /// Pattern names a known repository.
    ExactMatch {
        /// Matched repository name, identical to the pattern.
        name: String,

        /// Other known names that differ from the match only by case.
        variants: Vec<String>,
    },

    /// Pattern matches exactly one known name when case is ignored.
    UniqueCaseFold {
        /// Probable match.
        name: String,
    },

    /// Pattern matches several known names when case is ignored.
    MultipleCaseFold {
        /// Candidate names in lexical order.
        names: Vec<String>,
    },

    /// Nothing known is even vaguely similar to the pattern.
    NoSimilarMatch,

    /// Ranked rows of similar names, best first.
    Suggestions(Vec<Suggestion>),
}

/// Resolve user supplied names against known repository names.
///
/// Holds no state besides its suggestion policy, so one resolver can serve
/// any number of independent requests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Resolver {
    policy: SuggestionPolicy,
}

impl Resolver {
    /// Construct new resolver.
    pub fn new(policy: SuggestionPolicy) -> Self {
        Self { policy }
    }

    /// Resolve raw pattern against complete enumeration of known names.
    ///
    /// Known names must already be stripped of [`REPO_SUFFIX`]. No ordering
    /// of known names is required.
    ///
    /// # Errors
    ///
    /// - Return [`ResolveError::EmptyPattern`] or
    ///   [`ResolveError::PathSeparator`] if pattern is malformed.
    /// - Return [`ResolveError::Index`] if a known name is empty.
    #[instrument(skip(self, pattern, known), level = "debug")]
    pub fn resolve(
        &self,
        pattern: impl AsRef<str>,
        known: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Resolution> {
        let pattern = Pattern::new(pattern)?;
        let mut index = CaseFoldIndex::build(known)?;

        if index.is_empty() {
            debug!("no repositories to resolve {pattern} against");
            return Ok(Resolution::NoReposAtAll);
        }

        let key = NameKey::new(pattern.as_str());
        if let Ok(row) = index.lookup(&key) {
            return Ok(fold_match(&pattern, row));
        }

        debug!("no case-insensitive match for {pattern}, rank by similarity");
        let guesses = rank(index.rows(), &key);
        let guesses = self.policy.select(guesses, |key| index.row_len(key));
        if guesses.is_empty() {
            return Ok(Resolution::NoSimilarMatch);
        }

        let mut suggestions = Vec::with_capacity(guesses.len());
        for guess in guesses {
            let names = index.lookup(guess.key())?.to_vec();
            suggestions.push(Suggestion {
                key: guess.key().clone(),
                score: guess.score(),
                names,
            });
        }

        Ok(Resolution::Suggestions(suggestions))
    }
}

fn fold_match(pattern: &Pattern, row: &[String]) -> Resolution {
    if row.iter().any(|name| name == pattern.as_str()) {
        let variants = row
            .iter()
            .filter(|name| name.as_str() != pattern.as_str())
            .cloned()
            .collect();
        return Resolution::ExactMatch {
            name: pattern.to_string(),
            variants,
        };
    }

    match row {
        [name] => Resolution::UniqueCaseFold { name: name.clone() },
        _ => Resolution::MultipleCaseFold {
            names: row.to_vec(),
        },
    }
}

/// Name resolution error types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Pattern is empty.
    #[error("repository name cannot be empty")]
    EmptyPattern,

    /// Pattern contains path separator.
    #[error("repository name {0:?} cannot contain '/'")]
    PathSeparator(String),

    /// Case-fold index cannot be built or queried.
    #[error(transparent)]
    Index(#[from] crate::resolve::index::IndexError),
}

/// Friendly result alias :3
pub type Result<T, E = ResolveError> = std::result::Result<T, E>;
