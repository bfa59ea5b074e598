//! Configuration for the wildcard compiler and matchers.
//!
//! Settings live in TOML files named `.wf.toml`. They are discovered by walking up from the
//! current directory, followed by `~/.wf.toml` with the lowest precedence, and merged over the
//! built-in defaults.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod validate;

use std::{
    fmt,
    path::{Path, PathBuf},
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawCompilerSettings, RawConfig, RawMatcherSettings, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use validate::ConfigWarning;
use validate::{check_config, validate_config};
use wf_fst::DEFAULT_MAX_STATES;

/// Query labels at or above this value use binary search unless configured otherwise.
pub const DEFAULT_BINARY_SEARCH_THRESHOLD: i64 = 0x80;

/// Default sigma/rho/phi label: the first value past the codepoint range.
pub const DEFAULT_SPECIAL_LABEL: i64 = 0x11_0000;

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Wildcard compiler settings.
    pub compiler: CompilerSettings,
    /// Matcher settings.
    pub matcher: MatcherSettings,
    /// Files the configuration was merged from, highest precedence first.
    pub sources: Vec<PathBuf>,
}

impl Config {
    /// Discovers and merges every `.wf.toml` relevant to `cwd`.
    ///
    /// Returns the defaults when no file is found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        Self::load_from_files(&discover_config_files(cwd))
    }

    /// Loads and merges the given files, highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Loads exactly one file, merged over the defaults.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load_from_files(&[path.to_path_buf()])
    }

    /// Rejects values no component can work with.
    pub fn check(&self) -> Result<(), ConfigError> {
        check_config(self)
    }

    /// Non-fatal issues: settings that have no effect or look unintended.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Renders the effective settings in `.wf.toml` syntax.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        #[derive(Serialize)]
        struct Effective<'a> {
            compiler: &'a CompilerSettings,
            matcher: &'a MatcherSettings,
        }

        Ok(toml::to_string_pretty(&Effective {
            compiler: &self.compiler,
            matcher: &self.matcher,
        })?)
    }
}

/// `[compiler]` settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompilerSettings {
    /// Determinization gives up beyond this many states.
    pub max_states: usize,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            max_states: DEFAULT_MAX_STATES,
        }
    }
}

/// Which matcher stack to build over the sorted-range matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionKind {
    /// The sorted-range matcher alone.
    Plain,
    /// Implicit matches hidden.
    #[default]
    Explicit,
    /// Sigma fallback.
    Sigma,
    /// Rho fallback.
    Rho,
    /// Phi failure transitions.
    Phi,
    /// Extra non-consuming labels.
    MultiEps,
}

impl CompositionKind {
    /// Whether the stack uses `special_label`.
    pub fn uses_special_label(self) -> bool {
        matches!(self, Self::Sigma | Self::Rho | Self::Phi)
    }
}

impl fmt::Display for CompositionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plain => "plain",
            Self::Explicit => "explicit",
            Self::Sigma => "sigma",
            Self::Rho => "rho",
            Self::Phi => "phi",
            Self::MultiEps => "multi_eps",
        })
    }
}

/// Which arc labels the fallback combinators rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteSetting {
    /// Both sides for acceptors, the matched side otherwise.
    #[default]
    Auto,
    /// Both sides.
    Always,
    /// The matched side only.
    Never,
}

/// `[matcher]` settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MatcherSettings {
    /// Query labels at or above this use binary search.
    pub binary_search_threshold: i64,
    /// Matcher stack.
    pub composition: CompositionKind,
    /// Sigma, rho or phi label.
    pub special_label: i64,
    /// Rewrite mode of the fallback combinators.
    pub rewrite: RewriteSetting,
    /// Whether a phi self-loop matches the requested label.
    pub phi_loop: bool,
    /// Non-consuming labels for the multi-eps stack.
    pub multi_eps_labels: Vec<i64>,
    /// Implicit self-loop for configured non-consuming labels.
    pub multi_eps_loop: bool,
    /// `find(NO_LABEL)` also enumerates configured non-consuming labels.
    pub multi_eps_list: bool,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            binary_search_threshold: DEFAULT_BINARY_SEARCH_THRESHOLD,
            composition: CompositionKind::default(),
            special_label: DEFAULT_SPECIAL_LABEL,
            rewrite: RewriteSetting::default(),
            phi_loop: true,
            multi_eps_labels: Vec::new(),
            multi_eps_loop: false,
            multi_eps_list: true,
        }
    }
}
