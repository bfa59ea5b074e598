//! Configuration file parsing.
//!
//! Parses individual `.wf.toml` files into `RawConfig` structures whose fields are all optional,
//! so that partial files can be merged.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::{ConfigError, CompositionKind, RewriteSetting};

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here.
    pub root: Option<bool>,
    /// `[compiler]` section.
    pub compiler: Option<RawCompilerSettings>,
    /// `[matcher]` section.
    pub matcher: Option<RawMatcherSettings>,
}

/// Raw `[compiler]` settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawCompilerSettings {
    /// Determinization state limit.
    pub max_states: Option<usize>,
}

/// Raw `[matcher]` settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawMatcherSettings {
    /// Labels at or above this use binary search.
    pub binary_search_threshold: Option<i64>,
    /// Matcher stack to build.
    pub composition: Option<CompositionKind>,
    /// Sigma, rho or phi label.
    pub special_label: Option<i64>,
    /// Rewrite mode of the fallback combinators.
    pub rewrite: Option<RewriteSetting>,
    /// Whether a phi self-loop matches the requested label.
    pub phi_loop: Option<bool>,
    /// Non-consuming labels; a single value or a list.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub multi_eps_labels: Option<Vec<i64>>,
    /// Implicit self-loop for configured labels.
    pub multi_eps_loop: Option<bool>,
    /// `find(NO_LABEL)` enumerates configured labels.
    pub multi_eps_list: Option<bool>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string; `path` is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Whether a config file has `root = true` set. Unreadable files are not roots.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
