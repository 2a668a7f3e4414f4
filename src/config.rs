// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Configuration layout.
//!
//! Specify the layout of the server configuration file to simplify the
//! process of serialization and deserialization. The configuration is handed
//! around as a plain value. Nothing in this crate keeps it in global state.

use crate::resolve::select::SuggestionPolicy;

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Error as FmtError, Formatter, Result as FmtResult},
    fs::read_to_string,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, instrument};

/// Server configuration layout.
///
/// # General Layout
///
/// ```toml
/// host = "git.example.org"
/// store = "$HOME/srv/git"
///
/// [suggest]
/// cutoff = 0.25
/// target_count = 4
/// tie_epsilon = 0.015
/// ```
///
/// Every field is optional. The host name is only used to build clone URLs
/// for display. The store path overrides the default store location. The
/// suggest table tunes how loose guesses are picked when a repository name
/// cannot be resolved directly.
#[derive(Default, Debug, PartialEq, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host name that serves the repository store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Path to repository store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StorePath>,

    /// Suggestion tunables for unresolved names.
    pub suggest: SuggestionPolicy,
}

impl ServerConfig {
    /// Load server configuration from target file.
    ///
    /// Missing configuration file is not an error, defaults are used instead.
    ///
    /// # Errors
    ///
    /// - Return [`ConfigError::Read`] if file exists but cannot be read.
    /// - Return any parse error of [`ServerConfig::from_str`].
    #[instrument(skip(path), level = "debug")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no configuration at {:?}, use defaults", path.display());
            return Ok(Self::default());
        }

        debug!("load configuration from {:?}", path.display());
        read_to_string(path)
            .map_err(|err| ConfigError::Read {
                source: err,
                path: path.to_path_buf(),
            })?
            .parse()
    }

    /// Build URL prefix that repository names are appended to.
    ///
    /// Gives `ssh://<host>/<store>/` if a host is configured, otherwise just
    /// `<store>/` for local access.
    pub fn url_prefix(&self, store_dir: impl AsRef<Path>) -> String {
        let store_dir = store_dir.as_ref().to_string_lossy();
        let store_dir = store_dir.trim_end_matches('/');
        match self.host.as_deref().map(str::trim) {
            Some(host) if !host.is_empty() => {
                format!("ssh://{host}/{}/", store_dir.trim_start_matches('/'))
            }
            _ => format!("{store_dir}/"),
        }
    }

    fn validate(&self) -> Result<()> {
        let policy = &self.suggest;
        if policy.target_count == 0 {
            return Err(ConfigError::InvalidPolicy(
                "target_count must be positive".into(),
            ));
        }

        if !(0.0..=1.0).contains(&policy.cutoff) {
            return Err(ConfigError::InvalidPolicy(format!(
                "cutoff {} must lie in [0, 1]",
                policy.cutoff
            )));
        }

        if policy.tie_epsilon.is_nan() || policy.tie_epsilon < 0.0 {
            return Err(ConfigError::InvalidPolicy(format!(
                "tie_epsilon {} cannot be negative",
                policy.tie_epsilon
            )));
        }

        Ok(())
    }
}

impl FromStr for ServerConfig {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let mut config: ServerConfig =
            toml::de::from_str(data).map_err(ConfigError::Deserialize)?;

        // INVARIANT: Perform shell expansion on store path field.
        if let Some(store) = config.store.take() {
            config.store = Some(StorePath::new(
                shellexpand::full(store.to_string().as_str())
                    .map_err(ConfigError::ShellExpansion)?
                    .into_owned(),
            ));
        }

        config.validate()?;

        Ok(config)
    }
}

impl Display for ServerConfig {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(
            toml::ser::to_string_pretty(self)
                .map_err(ConfigError::Serialize)?
                .as_str(),
        )
    }
}

/// Path of repository store.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct StorePath(PathBuf);

impl StorePath {
    /// Construct new store path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Treat store path as [`Path`] slice.
    pub fn as_path(&self) -> &Path {
        self.0.as_path()
    }
}

impl Display for StorePath {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(self.as_path().to_string_lossy().as_ref())
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read configuration at {:?}", path.display())]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Failed to deserialize configuration.
    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),

    /// Failed to serialize configuration.
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    /// Failed to perform shell expansion on configuration.
    #[error(transparent)]
    ShellExpansion(#[from] shellexpand::LookupError<std::env::VarError>),

    /// Suggestion tunables out of range.
    #[error("invalid suggestion policy: {0}")]
    InvalidPolicy(String),
}

impl From<ConfigError> for FmtError {
    fn from(_: ConfigError) -> Self {
        FmtError
    }
}

/// Friendly result alias :3
type Result<T, E = ConfigError> = std::result::Result<T, E>;
