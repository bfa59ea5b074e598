//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use wf_config::Config;
use wf_wildcard::CompileOptions;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (the defaults if no config files were found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    ///
    /// With `config_file` only that file is read; otherwise `.wf.toml` files are discovered from
    /// the current directory upwards.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let loaded = match config_file {
            Some(path) => Config::load_file(path),
            None => Config::load(&cwd),
        };
        let config = loaded.map_err(|e| {
            eprintln!("error: failed to load configuration: {e}");
            ExitCode::FAILURE
        })?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for commands that never consult settings, so they keep working when a config file
    /// is broken.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Compiler options from the configuration, with an optional state limit override.
    pub fn compile_options(&self, max_states: Option<usize>) -> CompileOptions {
        CompileOptions {
            max_states: max_states.unwrap_or(self.config.compiler.max_states),
        }
    }

    /// Formats `path` relative to the working directory when it lies below it.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.cwd)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_config() {
        let mut config = Config::default();
        config.compiler.max_states = 10;
        let ctx = CommandContext {
            cwd: PathBuf::from("/work"),
            config,
        };
        assert_eq!(ctx.compile_options(None).max_states, 10);
        assert_eq!(ctx.compile_options(Some(3)).max_states, 3);
    }

    #[test]
    fn paths_are_shown_relative_to_cwd() {
        let ctx = CommandContext {
            cwd: PathBuf::from("/work"),
            config: Config::default(),
        };
        assert_eq!(ctx.display_path(Path::new("/work/sub/.wf.toml")), "sub/.wf.toml");
        assert_eq!(ctx.display_path(Path::new("/home/u/.wf.toml")), "/home/u/.wf.toml");
    }
}
