// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Repository store management.
//!
//! A server groups its bare repositories together into one place called the
//! __repository store__. The store houses every repository that clients can
//! clone from, and is the source of known names for name resolution.
//!
//! # Repository Store Layout
//!
//! The repository store can generally be placed anywhere on the server's
//! file system. However, the default location is
//! `$XDG_DATA_HOME/reposcout-store`. The name of a repository in the store is
//! the name of the directory that contains it, minus its ".git" extension.
//! So, `$XDG_DATA_HOME/reposcout-store/dotfiles.git` means that the store
//! contains a repository named "dotfiles".
//!
//! Only the top-level of the store is evaluated. Thus, it is not possible to
//! nest repositories inside one another, and names never contain '/'.

use crate::resolve::{Pattern, REPO_SUFFIX};

use git2::{Repository, RepositoryInitOptions};
use glob::Pattern as GlobPattern;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Directory of bare repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoStore {
    store_path: PathBuf,
}

impl RepoStore {
    /// Open repository store at target path.
    ///
    /// Creates the store directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::MakeStoreDir`] if store directory cannot be
    ///   created.
    #[instrument(skip(path), level = "debug")]
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store_path = path.into();
        debug!("open repository store at {:?}", store_path.display());
        mkdirp::mkdirp(&store_path).map_err(|err| StoreError::MakeStoreDir {
            source: err,
            store_path: store_path.clone(),
        })?;

        Ok(Self { store_path })
    }

    /// Path to repository store.
    pub fn path(&self) -> &Path {
        self.store_path.as_path()
    }

    /// Path a repository of target name lives at.
    ///
    /// Does not check if the path returned actually exists.
    pub fn repo_path(&self, name: impl AsRef<str>) -> PathBuf {
        self.store_path.join(format!("{}{REPO_SUFFIX}", name.as_ref()))
    }

    /// List names of all repositories in store.
    ///
    /// Only top-level directories ending in ".git" count. Names are returned
    /// without their ".git" extension, in no particular order. Entries whose
    /// names are not valid UTF-8 are skipped.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::Glob`] if store path cannot be turned into a
    ///   glob pattern.
    /// - Return [`StoreError::ReadEntry`] if a store entry cannot be read.
    #[instrument(skip(self), level = "debug")]
    pub fn repo_names(&self) -> Result<Vec<String>> {
        // INVARIANT: Store path is matched literally, only the entry is a glob.
        let base = GlobPattern::escape(self.store_path.to_string_lossy().as_ref());
        let pattern = format!("{base}/*{REPO_SUFFIX}");

        let mut names = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = entry?;
            if !path.is_dir() {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                warn!("skip repository with non UTF-8 name: {:?}", path.display());
                continue;
            };

            match file_name.strip_suffix(REPO_SUFFIX) {
                Some(name) if !name.is_empty() => names.push(name.to_string()),
                _ => continue,
            }
        }
        debug!("found {} repositories", names.len());

        Ok(names)
    }

    /// Create new bare repository in store.
    ///
    /// A trailing ".git" on `name` is ignored. The repository is initialized
    /// with "main" as its initial branch, and its description file is set to
    /// `description` if given.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::InvalidName`] if name is empty, contains '/',
    ///   or is a relative directory reference.
    /// - Return [`StoreError::AlreadyExists`] if repository already exists.
    /// - Return [`StoreError::Git2`] if libgit2 fails to initialize it.
    #[instrument(skip(self, name, description), level = "debug")]
    pub fn create(&self, name: impl AsRef<str>, description: Option<&str>) -> Result<PathBuf> {
        let name = validate_name(name.as_ref())?;
        let repo_path = self.repo_path(&name);
        if repo_path.exists() {
            return Err(StoreError::AlreadyExists(repo_path));
        }

        info!("create bare repository {:?}", repo_path.display());
        let mut opts = RepositoryInitOptions::new();
        opts.bare(true).no_reinit(true).initial_head("main");
        if let Some(description) = description {
            opts.description(description);
        }
        Repository::init_opts(&repo_path, &opts)?;

        Ok(repo_path)
    }
}

fn validate_name(name: &str) -> Result<String> {
    let pattern = Pattern::new(name)?;
    if matches!(pattern.as_str(), "." | "..") {
        return Err(StoreError::ReservedName(pattern.to_string()));
    }

    Ok(pattern.to_string())
}

/// All possible error types for repository store interaction.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Store directory cannot be created when missing.
    #[error("failed to create repository store at {:?}", store_path.display())]
    MakeStoreDir {
        #[source]
        source: std::io::Error,
        store_path: PathBuf,
    },

    /// Repository name is malformed.
    #[error(transparent)]
    InvalidName(#[from] crate::resolve::ResolveError),

    /// Repository name refers to a directory, not a repository.
    #[error("repository name {0:?} is reserved")]
    ReservedName(String),

    /// Repository already exists in store.
    #[error("repository already exists at {:?}", .0.display())]
    AlreadyExists(PathBuf),

    /// Store path cannot be turned into glob pattern.
    #[error(transparent)]
    Glob(#[from] glob::PatternError),

    /// Store entry cannot be read.
    #[error(transparent)]
    ReadEntry(#[from] glob::GlobError),

    /// Operations from libgit2 fail.
    #[error(transparent)]
    Git2(#[from] git2::Error),
}

/// Friendly result alias :3
pub type Result<T, E = StoreError> = std::result::Result<T, E>;
