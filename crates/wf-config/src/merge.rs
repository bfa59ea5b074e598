//! Configuration merging.
//!
//! Merges parsed files into a single `Config` over the built-in defaults.

use std::path::PathBuf;

use crate::{
    CompilerSettings, Config, ConfigError, MatcherSettings,
    parse::{RawCompilerSettings, RawConfig, RawMatcherSettings},
};

/// A parsed config file with its source path.
#[derive(Debug, Clone)]
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges configuration files given highest precedence first.
///
/// Every setting takes the value from the highest-precedence file that defines it; lists are
/// replaced, not concatenated. The result is checked with [`Config::check`].
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let mut compiler = CompilerSettings::default();
    let mut matcher = MatcherSettings::default();

    // lowest precedence first so later files overwrite
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.compiler {
            apply_raw_compiler(&mut compiler, raw);
        }
        if let Some(ref raw) = parsed.config.matcher {
            apply_raw_matcher(&mut matcher, raw);
        }
    }

    let config = Config {
        compiler,
        matcher,
        sources: configs.iter().map(|c| c.path.clone()).collect(),
    };
    config.check()?;
    Ok(config)
}

/// Applies raw compiler settings, overwriting any present values.
fn apply_raw_compiler(result: &mut CompilerSettings, raw: &RawCompilerSettings) {
    if let Some(v) = raw.max_states {
        result.max_states = v;
    }
}

/// Applies raw matcher settings, overwriting any present values.
fn apply_raw_matcher(result: &mut MatcherSettings, raw: &RawMatcherSettings) {
    if let Some(v) = raw.binary_search_threshold {
        result.binary_search_threshold = v;
    }
    if let Some(v) = raw.composition {
        result.composition = v;
    }
    if let Some(v) = raw.special_label {
        result.special_label = v;
    }
    if let Some(v) = raw.rewrite {
        result.rewrite = v;
    }
    if let Some(v) = raw.phi_loop {
        result.phi_loop = v;
    }
    if let Some(ref v) = raw.multi_eps_labels {
        result.multi_eps_labels.clone_from(v);
    }
    if let Some(v) = raw.multi_eps_loop {
        result.multi_eps_loop = v;
    }
    if let Some(v) = raw.multi_eps_list {
        result.multi_eps_list = v;
    }
}
