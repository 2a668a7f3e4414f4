// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use reposcout::{
    config::ServerConfig,
    report::{Report, Status},
    resolve::{Resolution, Resolver},
    store::RepoStore,
};

use anyhow::Result;
use git2::{Repository, RepositoryInitOptions};
use indoc::indoc;
use pretty_assertions::assert_eq;
use sealed_test::prelude::*;
use std::path::{Path, PathBuf};

pub(crate) struct StoreFixture {
    root: PathBuf,
}

impl StoreFixture {
    pub(crate) fn new(path: impl AsRef<Path>) -> Result<Self> {
        std::fs::create_dir_all(path.as_ref())?;
        Ok(Self {
            root: path.as_ref().to_path_buf(),
        })
    }

    pub(crate) fn with_repos(self, names: &[&str]) -> Result<Self> {
        for name in names {
            let mut opts = RepositoryInitOptions::new();
            opts.initial_head("main");
            opts.bare(true);
            let repo = Repository::init_opts(self.root.join(format!("{name}.git")), &opts)?;

            // INVARIANT: Always provide valid name and email.
            //   - Git will complain if this is not set in CI/CD environments.
            let mut config = repo.config()?;
            config.set_str("user.name", "John Doe")?;
            config.set_str("user.email", "john@doe.com")?;
        }

        Ok(self)
    }

    pub(crate) fn open(&self) -> Result<RepoStore> {
        Ok(RepoStore::open(self.root.clone())?)
    }
}

fn find(store: &RepoStore, config: &ServerConfig, pattern: &str) -> Result<(Resolution, Report)> {
    let resolution = Resolver::new(config.suggest).resolve(pattern, store.repo_names()?)?;
    let report = Report::new(&resolution, pattern, config.url_prefix(store.path()));
    Ok((resolution, report))
}

#[sealed_test]
fn find_exact_match_in_store() -> Result<()> {
    let store = StoreFixture::new("srv/git")?
        .with_repos(&["gnomovision", "dotfiles"])?
        .open()?;
    let config: ServerConfig = r#"host = "git.blah.org""#.parse()?;

    let (resolution, report) = find(&store, &config, "gnomovision")?;
    assert_eq!(
        resolution,
        Resolution::ExactMatch {
            name: "gnomovision".into(),
            variants: vec![],
        }
    );
    assert_eq!(report.lines, vec!["ssh://git.blah.org/srv/git/gnomovision.git"]);
    assert_eq!(report.status, Status::Found);

    Ok(())
}

#[sealed_test]
fn find_case_variants_in_store() -> Result<()> {
    let store = StoreFixture::new("store")?
        .with_repos(&["TeStRePo", "TestRepo", "testrepo"])?
        .open()?;
    let config = ServerConfig::default();

    let (resolution, report) = find(&store, &config, "TESTREPO")?;
    assert_eq!(
        resolution,
        Resolution::MultipleCaseFold {
            names: vec!["TeStRePo".into(), "TestRepo".into(), "testrepo".into()],
        }
    );
    assert_eq!(report.status, Status::Ambiguous);

    let (resolution, report) = find(&store, &config, "TestRepo.git")?;
    assert_eq!(
        resolution,
        Resolution::ExactMatch {
            name: "TestRepo".into(),
            variants: vec!["TeStRePo".into(), "testrepo".into()],
        }
    );
    assert_eq!(report.lines, vec!["store/TestRepo.git"]);
    assert_eq!(report.warnings.len(), 1);

    Ok(())
}

#[sealed_test]
fn find_suggestions_in_store() -> Result<()> {
    let store = StoreFixture::new("store")?
        .with_repos(&["gnomovision", "GnomoVisor", "kernel", "notes"])?
        .open()?;
    let config: ServerConfig = indoc! {r#"
        [suggest]
        cutoff = 0.3
        target_count = 1
        tie_epsilon = 0.0
    "#}
    .parse()?;

    let (resolution, report) = find(&store, &config, "gnomovisoin")?;
    let Resolution::Suggestions(suggestions) = resolution else {
        panic!("expected suggestions, got {resolution:?}");
    };
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].names, vec!["gnomovision"]);
    assert_eq!(report.lines, vec!["gnomovision"]);
    assert_eq!(report.status, Status::Ambiguous);

    let (resolution, report) = find(&store, &config, "zzz")?;
    assert_eq!(resolution, Resolution::NoSimilarMatch);
    assert_eq!(report.status, Status::NotFound);

    Ok(())
}

#[sealed_test]
fn find_in_empty_store() -> Result<()> {
    let store = StoreFixture::new("store")?.open()?;

    let (resolution, report) = find(&store, &ServerConfig::default(), "anything")?;
    assert_eq!(resolution, Resolution::NoReposAtAll);
    assert_eq!(report.status, Status::Empty);

    Ok(())
}

#[sealed_test]
fn created_repository_resolves() -> Result<()> {
    let store = StoreFixture::new("store")?.with_repos(&["Notes"])?.open()?;
    store.create("notes", Some("personal notes"))?;

    let (resolution, _) = find(&store, &ServerConfig::default(), "notes")?;
    assert_eq!(
        resolution,
        Resolution::ExactMatch {
            name: "notes".into(),
            variants: vec!["Notes".into()],
        }
    );

    Ok(())
}
