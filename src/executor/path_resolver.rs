use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::environment::Environment;

/// Looks commands up along an ordered list of search directories.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    dirs: Vec<PathBuf>,
}

impl PathResolver {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        PathResolver { dirs }
    }

    pub fn from_env(env: &Environment) -> Self {
        PathResolver::new(env.search_path())
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Names containing a `/` are taken as paths; anything else is searched
    /// for in each directory, first hit wins.
    pub fn resolve(&self, command: &str) -> Option<PathBuf> {
        if command.is_empty() {
            return None;
        }

        if command.contains('/') {
            let path = Path::new(command);
            return is_executable(path).then(|| path.to_path_buf());
        }

        self.dirs
            .iter()
            .map(|dir| dir.join(command))
            .find(|full_path| is_executable(full_path))
    }

    /// Every non-directory entry of `dir`. Unreadable directories yield nothing.
    pub fn list_executables(dir: &Path) -> Vec<String> {
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };
        entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().map(|t| !t.is_dir()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect()
    }
}

fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
