//! Locating `.wf.toml` files for a working directory.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".wf.toml";

/// Discovers all configuration files relevant to `cwd`, highest precedence first.
///
/// `cwd` and each of its ancestors contribute their `.wf.toml`, closest first. A file with
/// `root = true` ends the walk and also shuts out `~/.wf.toml`, which otherwise comes last.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let (mut files, rooted) = local_config_files(cwd);
    if !rooted {
        let global = global_config_path().filter(|path| path.is_file() && !files.contains(path));
        files.extend(global);
    }
    files
}

/// Config files in `cwd` and its ancestors, plus whether a root file ended the walk.
fn local_config_files(cwd: &Path) -> (Vec<PathBuf>, bool) {
    let mut files = Vec::new();
    let candidates = cwd
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .filter(|path| path.is_file());
    for path in candidates {
        let is_root = is_root_config(&path);
        files.push(path);
        if is_root {
            return (files, true);
        }
    }
    (files, false)
}

/// Returns the path of the global configuration file (`~/.wf.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Whether `path` is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    /// Writes a config file with `content` under `dir`, creating directories.
    fn write_config(dir: &Path, content: &str) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }

    /// Discovered files that are not the global config.
    fn local(cwd: &Path) -> Vec<PathBuf> {
        discover_config_files(cwd)
            .into_iter()
            .filter(|p| !is_global_config(p))
            .collect()
    }

    #[test]
    fn closest_first() {
        let tmp = tempfile::tempdir().unwrap();
        let outer = write_config(tmp.path(), "");
        let inner = write_config(&tmp.path().join("a/b"), "");
        let cwd = tmp.path().join("a/b/c");
        fs::create_dir_all(&cwd).unwrap();

        assert_eq!(local(&cwd), vec![inner, outer]);
    }

    #[test]
    fn root_config_stops_discovery() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(tmp.path(), "");
        let root = write_config(&tmp.path().join("proj"), "root = true\n");

        assert_eq!(discover_config_files(&tmp.path().join("proj")), vec![root]);
    }

    #[test]
    fn root_marker_keeps_closer_files() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(tmp.path(), "");
        let root = write_config(&tmp.path().join("proj"), "root = true\n");
        let nested = write_config(&tmp.path().join("proj/patterns"), "[compiler]\n");

        let (files, rooted) = local_config_files(&tmp.path().join("proj/patterns"));
        assert!(rooted);
        assert_eq!(files, vec![nested, root]);
    }

    #[test]
    fn nothing_found() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(local(tmp.path()).is_empty());
    }
}
