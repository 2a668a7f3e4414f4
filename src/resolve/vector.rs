// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Substring frequency vectors.
//!
//! A string is turned into a sparse vector over all of its non-empty
//! contiguous substrings, where each dimension counts how many times that
//! substring occurs. Two strings that share many substrings, long ones in
//! particular, end up pointing in similar directions, which makes the cosine
//! of the angle between their vectors a decent measure of how alike two
//! repository names look.
//!
//! # Cost
//!
//! A string of L characters has L(L+1)/2 substrings, so building a vector is
//! O(L²) in both time and memory. Repository names are short, so this is
//! acceptable, but do not feed this module whole documents.

use std::collections::HashMap;

/// Multiset of substrings for one source string.
///
/// Borrows its dimensions from the source string, and is never mutated after
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyVector<'a> {
    counts: HashMap<&'a str, u64>,
}

impl<'a> FrequencyVector<'a> {
    /// Count every contiguous non-empty substring of target string.
    ///
    /// Substrings are taken on character boundaries, never in the middle of
    /// a multi-byte code point. Case is significant.
    pub fn new(source: &'a str) -> Self {
        let mut bounds: Vec<usize> = source.char_indices().map(|(idx, _)| idx).collect();
        bounds.push(source.len());

        let mut counts = HashMap::new();
        for (idx, start) in bounds.iter().enumerate() {
            for end in &bounds[idx + 1..] {
                *counts.entry(&source[*start..*end]).or_insert(0) += 1;
            }
        }

        Self { counts }
    }

    /// Occurrence count of a substring.
    pub fn count(&self, substring: &str) -> u64 {
        self.counts.get(substring).copied().unwrap_or(0)
    }

    /// Number of distinct substrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if vector has no dimensions.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Dot product with another vector.
    ///
    /// Walks the sparser vector and probes the denser one.
    pub fn dot(&self, other: &FrequencyVector<'_>) -> u64 {
        let (sparse, dense) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        sparse
            .counts
            .iter()
            .map(|(substring, count)| count * dense.count(substring))
            .sum()
    }

    /// Dot product of vector with itself.
    pub fn square_norm(&self) -> u64 {
        self.counts.values().map(|count| count * count).sum()
    }

    /// Cosine of angle between two vectors.
    ///
    /// Lies in `[0, 1]` since no count is negative. Returns `None` if either
    /// vector is empty, because the angle is undefined then.
    pub fn cosine_similarity(&self, other: &FrequencyVector<'_>) -> Option<f64> {
        if self.is_empty() || other.is_empty() {
            return None;
        }

        let norm = (self.square_norm() as f64 * other.square_norm() as f64).sqrt();
        Some(self.dot(other) as f64 / norm)
    }
}

/// Build frequency vector of target string.
pub fn vectorize(source: &str) -> FrequencyVector<'_> {
    FrequencyVector::new(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use simple_test_case::test_case;

    fn total(vector: &FrequencyVector<'_>) -> u64 {
        vector.counts.values().sum()
    }

    #[test]
    fn counts_every_substring_occurrence() {
        let vector = vectorize("abab");

        assert_eq!(total(&vector), 10);
        assert_eq!(vector.count("a"), 2);
        assert_eq!(vector.count("b"), 2);
        assert_eq!(vector.count("ab"), 2);
        assert_eq!(vector.count("ba"), 1);
        assert_eq!(vector.count("aba"), 1);
        assert_eq!(vector.count("bab"), 1);
        assert_eq!(vector.count("abab"), 1);
        assert_eq!(vector.count("bb"), 0);
        assert_eq!(vector.len(), 7);
    }

    #[test]
    fn splits_on_character_boundaries() {
        let vector = vectorize("héé");

        assert_eq!(total(&vector), 6);
        assert_eq!(vector.count("é"), 2);
        assert_eq!(vector.count("éé"), 1);
        assert_eq!(vector.count("hé"), 1);
    }

    #[test]
    fn case_is_significant() {
        let vector = vectorize("Aa");
        assert_eq!(vector.count("a"), 1);
        assert_eq!(vector.count("A"), 1);
    }

    #[test]
    fn empty_string_gives_empty_vector() {
        let vector = vectorize("");
        assert!(vector.is_empty());
        assert_eq!(vectorize("abc").cosine_similarity(&vector), None);
    }

    #[test]
    fn identical_input_gives_identical_vector() {
        assert_eq!(vectorize("gnomovision"), vectorize("gnomovision"));
    }

    #[test]
    fn dot_product_is_order_independent() {
        let short = vectorize("ab");
        let long = vectorize("abcab");

        // "a": 1 * 2, "b": 1 * 2, "ab": 1 * 2.
        assert_eq!(short.dot(&long), 6);
        assert_eq!(long.dot(&short), 6);
    }

    #[test_case("a"; "single character")]
    #[test_case("gnomovision"; "plain name")]
    #[test_case("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"; "repetitive name")]
    #[test_case("dotfiles-über"; "non ascii name")]
    #[test]
    fn self_similarity_is_one(name: &str) {
        use pretty_assertions::assert_eq;
        let vector = vectorize(name);
        assert_eq!(vector.cosine_similarity(&vector), Some(1.0));
    }

    #[test_case("gnomovision", "gnomovisoin"; "transposition")]
    #[test_case("dotfiles", "vimrc"; "unrelated")]
    #[test_case("a", "aaaaaa"; "repetition")]
    #[test_case("kernel", "kernel-tools"; "prefix")]
    #[test]
    fn similarity_is_symmetric(left: &str, right: &str) {
        use pretty_assertions::assert_eq;
        let left = vectorize(left);
        let right = vectorize(right);
        assert_eq!(left.cosine_similarity(&right), right.cosine_similarity(&left));
    }

    #[test]
    fn disjoint_strings_have_zero_similarity() {
        assert_eq!(vectorize("abc").cosine_similarity(&vectorize("xyz")), Some(0.0));
    }

    #[test]
    fn closer_names_score_higher() {
        let pattern = vectorize("gnomovision");
        let close = vectorize("gnomovisoin").cosine_similarity(&pattern);
        let far = vectorize("gnome").cosine_similarity(&pattern);

        assert!(close > far);
    }
}
