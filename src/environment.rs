use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
struct Variable {
    value: String,
    exported: bool,
}

/// Shell-side copy of the process environment.
///
/// Launched processes receive only the exported variables, and the search
/// path used for command lookup and completion is read from `PATH` here.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    vars: HashMap<String, Variable>,
}

impl Environment {
    pub fn new() -> Self {
        let mut env = Environment::empty();

        // Import all OS environment variables when starting the process
        for (k, v) in std::env::vars() {
            env.vars.insert(
                k,
                Variable {
                    value: v,
                    exported: true,
                },
            );
        }

        env
    }

    pub fn empty() -> Self {
        Environment {
            vars: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|v| v.value.as_str())
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.vars
            .entry(key.to_string())
            .and_modify(|var| var.value = value.to_string())
            .or_insert(Variable {
                value: value.to_string(),
                exported: false,
            });
    }

    pub fn export(&mut self, key: &str) {
        if let Some(var) = self.vars.get_mut(key) {
            var.exported = true;
        }
    }

    pub fn exported_vars(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .filter(|(_, v)| v.exported)
            .map(|(k, v)| (k.clone(), v.value.clone()))
            .collect()
    }

    pub fn home(&self) -> Option<PathBuf> {
        self.get("HOME").filter(|h| !h.is_empty()).map(PathBuf::from)
    }

    /// Directories listed in `PATH`, in lookup order. Empty entries are skipped.
    pub fn search_path(&self) -> Vec<PathBuf> {
        match self.get("PATH") {
            Some(path) => std::env::split_paths(path)
                .filter(|dir| !dir.as_os_str().is_empty())
                .collect(),
            None => Vec::new(),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}
