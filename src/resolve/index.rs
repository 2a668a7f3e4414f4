// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Case-fold grouping of repository names.
//!
//! Repository names that only differ by case are distinct on a case-sensitive
//! file system, but users rarely remember which variant they meant. The
//! [`CaseFoldIndex`] groups every known name under its [`NameKey`] so that a
//! lookup by key yields the full __row__ of case-variants at once.
//!
//! # Lazy Sorting
//!
//! Rows are kept in insertion order until they are read for the first time,
//! at which point they are sorted in ascending lexical order. Most rows are
//! never read during a single request, so there is no point paying for the
//! sort up front. The order observed through [`CaseFoldIndex::lookup`] is the
//! same as if every row had been sorted eagerly.

use std::{
    collections::HashMap,
    fmt::{Display, Formatter, Result as FmtResult},
};
use unicode_casefold::UnicodeCaseFold;

/// Case-folded form of a repository name.
///
/// Only ever used as a grouping key. Never shown to the user as a repository
/// name, because the folded form may not exist on disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NameKey(String);

impl NameKey {
    /// Fold a name into its grouping key.
    ///
    /// Uses full Unicode case folding, so "STRASSE" and "straße" share a key,
    /// and so do final and non-final sigma.
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        if name.is_ascii() {
            return Self(name.to_ascii_lowercase());
        }

        Self(name.chars().case_fold().collect())
    }

    /// Treat key as [`str`] slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NameKey {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(self.as_str())
    }
}

/// All known names sharing one [`NameKey`].
///
/// # Invariant
///
/// - Never empty.
/// - No duplicate names.
#[derive(Debug, Clone)]
struct Row {
    names: Vec<String>,
    sorted: bool,
}

impl Row {
    fn new(name: String) -> Self {
        Self {
            names: vec![name],
            sorted: true,
        }
    }

    fn push(&mut self, name: String) {
        if self.names.contains(&name) {
            return;
        }

        self.names.push(name);
        self.sorted = false;
    }

    fn sorted_names(&mut self) -> &[String] {
        if !self.sorted {
            self.names.sort();
            self.sorted = true;
        }

        self.names.as_slice()
    }
}

/// Repository names grouped by case-insensitive equivalence.
#[derive(Debug, Clone, Default)]
pub struct CaseFoldIndex {
    rows: HashMap<NameKey, Row>,
}

impl CaseFoldIndex {
    /// Build index from complete enumeration of known names.
    ///
    /// Duplicate names are collapsed into one entry of their row.
    ///
    /// # Errors
    ///
    /// - Return [`IndexError::EmptyName`] if any name is empty.
    pub fn build(names: impl IntoIterator<Item = impl Into<String>>) -> Result<Self> {
        let mut rows: HashMap<NameKey, Row> = HashMap::new();
        for name in names.into_iter().map(Into::into) {
            if name.is_empty() {
                return Err(IndexError::EmptyName);
            }

            let key = NameKey::new(&name);
            match rows.get_mut(&key) {
                Some(row) => row.push(name),
                None => {
                    rows.insert(key, Row::new(name));
                }
            }
        }

        Ok(Self { rows })
    }

    /// Get row of names that fold into target key.
    ///
    /// Names are returned in ascending lexical order.
    ///
    /// # Errors
    ///
    /// - Return [`IndexError::NotFound`] if no known name folds into `key`.
    pub fn lookup(&mut self, key: &NameKey) -> Result<&[String]> {
        self.rows
            .get_mut(key)
            .map(Row::sorted_names)
            .ok_or_else(|| IndexError::NotFound(key.clone()))
    }

    /// Iterate over the key of every row.
    pub fn rows(&self) -> impl Iterator<Item = &NameKey> {
        self.rows.keys()
    }

    /// Number of names in the row of target key.
    ///
    /// Zero means that no row exists for the key.
    pub fn row_len(&self, key: &NameKey) -> usize {
        self.rows.get(key).map_or(0, |row| row.names.len())
    }

    /// Check if no names were indexed.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Case-fold index error types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// Empty name handed to index.
    #[error("repository names cannot be empty")]
    EmptyName,

    /// No known name folds into key.
    #[error("no repository name folds into {0:?}")]
    NotFound(NameKey),
}

/// Friendly result alias :3
pub type Result<T, E = IndexError> = std::result::Result<T, E>;
