//! Configuration types for the normalizer.
//!
//! [`NormalizeConfig`] controls the origin URLs are resolved against, how
//! failures nested inside container fragments are treated, and where
//! diagnostic artifacts land. It is cheap to clone and deserializable from
//! JSON, TOML or YAML.
//!
//! # Quick Start
//!
//! ```rust
//! use normalize::NormalizeConfig;
//!
//! let config = NormalizeConfig::default();
//! config.validate().expect("default configuration is valid");
//! ```
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Origin of the upstream service; relative URLs are resolved against it.
pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com/";

/// Directory diagnostic artifacts are written to, relative to the working directory.
pub const DEFAULT_DUMP_DIR: &str = "dumps";

/// Runtime configuration for normalization.
///
/// # Serialization
///
/// ```json
/// {
///   "base_url": "https://www.youtube.com/",
///   "nested_failures": "propagate",
///   "diagnostics": {
///     "enabled": true,
///     "dump_dir": "dumps",
///     "issues_url": null
///   }
/// }
/// ```
///
/// # Examples
///
/// ```rust
/// use normalize::{NestedFailurePolicy, NormalizeConfig};
///
/// let config = NormalizeConfig {
///     nested_failures: NestedFailurePolicy::Isolate,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Absolute http(s) origin used to absolutize every URL in a record.
    ///
    /// Default: [`DEFAULT_BASE_URL`]
    pub base_url: String,

    /// What happens when a child fragment inside a shelf fails.
    ///
    /// Default: [`NestedFailurePolicy::Propagate`]
    pub nested_failures: NestedFailurePolicy,

    /// Diagnostic artifact settings used by the fault-isolation wrapper.
    pub diagnostics: DiagnosticsConfig,
}

/// Failure handling for fragments nested inside a shelf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestedFailurePolicy {
    /// A malformed child aborts normalization of the whole shelf; the failure
    /// surfaces at the enclosing top-level wrapper call.
    #[default]
    Propagate,

    /// Each child passes through the fault-isolation wrapper on its own and
    /// degrades to absent; the rest of the shelf survives.
    Isolate,
}

/// Where and whether failing fragments are dumped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Write one artifact file per failure. The structured log is always emitted.
    ///
    /// Default: `true`
    pub enabled: bool,

    /// Directory artifacts are written into; created on first use.
    ///
    /// Default: [`DEFAULT_DUMP_DIR`]
    pub dump_dir: PathBuf,

    /// Issue tracker the failure log points users at.
    ///
    /// Default: `None`
    pub issues_url: Option<String>,
}

/// Errors that can occur when validating a [`NormalizeConfig`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// `base_url` does not parse as a URL.
    #[error("base_url {url:?} is not a valid url: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// `base_url` parses but is not an http(s) origin.
    #[error("base_url {0:?} must use the http or https scheme")]
    UnsupportedScheme(String),

    /// Diagnostics are enabled without a directory to write to.
    #[error("diagnostics.dump_dir must not be empty when diagnostics are enabled")]
    EmptyDumpDir,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            nested_failures: NestedFailurePolicy::default(),
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dump_dir: PathBuf::from(DEFAULT_DUMP_DIR),
            issues_url: None,
        }
    }
}

impl NormalizeConfig {
    /// Validates internal consistency of this configuration.
    ///
    /// Call it at start-up; [`Normalizer::new`](crate::Normalizer::new) calls
    /// it as well.
    ///
    /// ```rust
    /// use normalize::{ConfigError, NormalizeConfig};
    ///
    /// let bad = NormalizeConfig {
    ///     base_url: "ftp://example.com/".into(),
    ///     ..Default::default()
    /// };
    /// assert!(matches!(bad.validate(), Err(ConfigError::UnsupportedScheme(_))));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base_url()?;
        if self.diagnostics.enabled && self.diagnostics.dump_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDumpDir);
        }
        Ok(())
    }

    pub(crate) fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|err| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(self.base_url.clone()));
        }
        Ok(url)
    }
}
