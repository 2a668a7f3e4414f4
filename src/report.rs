// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! User facing reports of name resolution.
//!
//! Turn a [`Resolution`] into what the user actually gets to see. Lines are
//! meant for standard output, so scripts can consume URLs and names directly.
//! Warnings are meant for the logging layer, so they never mix with lines.

use crate::resolve::{Resolution, REPO_SUFFIX};

/// Overall result of a resolution, as seen by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A single repository was identified.
    Found,

    /// Several candidates, none asserted.
    Ambiguous,

    /// Nothing similar exists.
    NotFound,

    /// Store has no repositories.
    Empty,
}

impl Status {
    /// Process exit code for status.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Found => 0,
            Self::Ambiguous => 1,
            Self::NotFound => 2,
            Self::Empty => 3,
        }
    }
}

/// Formatted outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Lines for standard output.
    pub lines: Vec<String>,

    /// Messages for the logging layer.
    pub warnings: Vec<String>,

    /// Overall status.
    pub status: Status,
}

impl Report {
    /// Construct new report.
    ///
    /// URLs are composed as `<url_prefix><name>.git`.
    pub fn new(resolution: &Resolution, pattern: impl AsRef<str>, url_prefix: impl AsRef<str>) -> Self {
        let pattern = pattern.as_ref();
        let url_prefix = url_prefix.as_ref();

        match resolution {
            Resolution::NoReposAtAll => Self {
                lines: Vec::new(),
                warnings: vec!["no repositories exist on this server yet".into()],
                status: Status::Empty,
            },
            Resolution::ExactMatch { name, variants } => {
                let mut warnings = Vec::new();
                if !variants.is_empty() {
                    warnings.push(format!(
                        "repositories differing from {name:?} only by case also exist: {}",
                        variants.join(", ")
                    ));
                }

                Self {
                    lines: vec![repo_url(url_prefix, name)],
                    warnings,
                    status: Status::Found,
                }
            }
            Resolution::UniqueCaseFold { name } => Self {
                lines: vec![repo_url(url_prefix, name)],
                warnings: vec![format!(
                    "no repository named {pattern:?}, assuming {name:?} instead; \
                     repository names are case-sensitive on this server"
                )],
                status: Status::Found,
            },
            Resolution::MultipleCaseFold { names } => Self {
                lines: names.clone(),
                warnings: vec![format!(
                    "no repository named {pattern:?}, but these differ from it only by case:"
                )],
                status: Status::Ambiguous,
            },
            Resolution::NoSimilarMatch => Self {
                lines: Vec::new(),
                warnings: vec![format!(
                    "no repository named {pattern:?}, and nothing even vaguely similar"
                )],
                status: Status::NotFound,
            },
            Resolution::Suggestions(suggestions) => Self {
                lines: suggestions
                    .iter()
                    .flat_map(|suggestion| suggestion.names.iter().cloned())
                    .collect(),
                warnings: vec![format!(
                    "no repository named {pattern:?}, did you mean one of these?"
                )],
                status: Status::Ambiguous,
            },
        }
    }
}

/// Compose URL of repository.
pub fn repo_url(url_prefix: impl AsRef<str>, name: impl AsRef<str>) -> String {
    format!("{}{}{REPO_SUFFIX}", url_prefix.as_ref(), name.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{index::NameKey, Suggestion};
    use pretty_assertions::assert_eq;

    const PREFIX: &str = "ssh://git.blah.org/srv/git/";

    #[test]
    fn exact_match_without_variants() {
        let resolution = Resolution::ExactMatch {
            name: "gnomovision".into(),
            variants: vec![],
        };
        let result = Report::new(&resolution, "gnomovision", PREFIX);

        let expect = Report {
            lines: vec!["ssh://git.blah.org/srv/git/gnomovision.git".into()],
            warnings: vec![],
            status: Status::Found,
        };
        assert_eq!(result, expect);
    }

    #[test]
    fn exact_match_warns_about_variants() {
        let resolution = Resolution::ExactMatch {
            name: "TestRepo".into(),
            variants: vec!["TeStRePo".into(), "testrepo".into()],
        };
        let result = Report::new(&resolution, "TestRepo", PREFIX);

        assert_eq!(result.status, Status::Found);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].ends_with("TeStRePo, testrepo"));
    }

    #[test]
    fn unique_case_fold_gives_url_and_warning() {
        let resolution = Resolution::UniqueCaseFold {
            name: "gnomovision".into(),
        };
        let result = Report::new(&resolution, "GnomoVision", "/srv/git/");

        assert_eq!(result.lines, vec!["/srv/git/gnomovision.git"]);
        assert_eq!(result.status, Status::Found);
        assert!(result.warnings[0].contains("case-sensitive"));
    }

    #[test]
    fn multiple_case_fold_asserts_no_url() {
        let resolution = Resolution::MultipleCaseFold {
            names: vec!["TeStRePo".into(), "TestRepo".into()],
        };
        let result = Report::new(&resolution, "TESTREPO", PREFIX);

        assert_eq!(result.lines, vec!["TeStRePo", "TestRepo"]);
        assert_eq!(result.status, Status::Ambiguous);
    }

    #[test]
    fn suggestions_flatten_rows_in_rank_order() {
        let resolution = Resolution::Suggestions(vec![
            Suggestion {
                key: NameKey::new("kernel"),
                score: 0.8,
                names: vec!["Kernel".into(), "kernel".into()],
            },
            Suggestion {
                key: NameKey::new("kern"),
                score: 0.5,
                names: vec!["kern".into()],
            },
        ]);
        let result = Report::new(&resolution, "kernl", PREFIX);

        assert_eq!(result.lines, vec!["Kernel", "kernel", "kern"]);
        assert_eq!(result.status, Status::Ambiguous);
    }

    #[test]
    fn statuses_map_to_distinct_exit_codes() {
        let empty = Report::new(&Resolution::NoReposAtAll, "repo", PREFIX);
        let missing = Report::new(&Resolution::NoSimilarMatch, "repo", PREFIX);

        assert_eq!(empty.status.exit_code(), 3);
        assert_eq!(missing.status.exit_code(), 2);
        assert!(empty.lines.is_empty());
        assert!(missing.lines.is_empty());
        assert_eq!(Status::Found.exit_code(), 0);
        assert_eq!(Status::Ambiguous.exit_code(), 1);
    }
}
