//! Action catalog - loads roleplay actions from a directory of YAML files
//!
//! Each `<name>.yml` (or `<name>.yaml`) file describes one action. A bad file
//! is logged and skipped; it never stops the rest of the directory from
//! loading. A missing directory is fatal since no action could be served.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, error, info, warn};

use crate::application::errors::ActionError;
use crate::domain::entities::Action;

/// Recognized definition file extensions
pub const EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Reads action definitions from disk
#[derive(Debug, Clone)]
pub struct ActionLoader {
    dir: PathBuf,
    strict_gates: bool,
}

impl ActionLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            strict_gates: false,
        }
    }

    /// Reject files whose consent or denial block is malformed instead of
    /// loading the action without that gate
    pub fn with_strict_gates(mut self, strict: bool) -> Self {
        self.strict_gates = strict;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load a single action. Without `path`, reads `<dir>/<name>.yml`.
    pub fn load(&self, name: &str, path: Option<&Path>) -> Result<Action, ActionError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => self.dir.join(format!("{}.{}", name, EXTENSIONS[0])),
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ActionError::Io {
            path: path.clone(),
            source,
        })?;

        let value: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| ActionError::Decode {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        if value.is_null() {
            return Err(ActionError::Decode {
                path,
                reason: "empty document".to_string(),
            });
        }

        Action::from_yaml(name, value, self.strict_gates)
            .map_err(|source| ActionError::Schema { path, source })
    }

    /// Load every definition file in the directory.
    ///
    /// Files are read in path order. Per-file errors are logged and skipped.
    /// Only a directory that can't be read is returned as an error.
    pub fn load_all(&self) -> Result<ActionCatalog, ActionError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|source| ActionError::Directory {
            path: self.dir.clone(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(e) => Some(e.path()),
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file() && has_definition_extension(path))
            .collect();
        // directory order is platform dependent
        paths.sort();

        let mut seen = HashSet::new();
        let mut actions = Vec::new();

        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!("Skipping file with non UTF-8 name: {}", path.display());
                continue;
            };

            if !seen.insert(name.to_string()) {
                warn!("Duplicate action '{}' in {}, keeping the first one", name, path.display());
                continue;
            }

            match self.load(name, Some(&path)) {
                Ok(action) => {
                    debug!("Loaded action: {}", action.name);
                    actions.push(action);
                }
                Err(e) => error!(path = %e.path().display(), "{}", e),
            }
        }

        info!("Loaded {} actions from {}", actions.len(), self.dir.display());
        Ok(ActionCatalog::new(actions))
    }
}

fn has_definition_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Immutable set of loaded actions
#[derive(Debug, Default)]
pub struct ActionCatalog {
    actions: Vec<Action>,
    index: HashMap<String, usize>,
}

impl ActionCatalog {
    /// Build a catalog. Later actions sharing a name with an earlier one are dropped.
    pub fn new(actions: Vec<Action>) -> Self {
        let mut catalog = Self::default();
        for action in actions {
            if catalog.index.contains_key(&action.name) {
                warn!("Duplicate action '{}' ignored", action.name);
                continue;
            }
            catalog.index.insert(action.name.clone(), catalog.actions.len());
            catalog.actions.push(action);
        }
        catalog
    }

    /// Action with exactly this name
    pub fn get(&self, name: &str) -> Option<&Action> {
        let action = self.index.get(name).map(|&i| &self.actions[i]);
        if action.is_none() {
            warn!("Unable to find action \"{}\"!", name);
        }
        action
    }

    /// Action named or aliased by `input`, ignoring case
    pub fn resolve(&self, input: &str) -> Option<&Action> {
        self.index
            .get(input)
            .map(|&i| &self.actions[i])
            .or_else(|| self.actions.iter().find(|a| a.matches(input)))
    }

    /// Sorted action names
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.actions.iter().map(|a| a.name.clone()).collect();
        names.sort();
        names
    }

    /// All actions in load order
    pub fn all(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Display for ActionCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActionCatalog: {}", self.list().join(", "))
    }
}

/// Catalog shared between readers, rebuilt wholesale on reload
pub struct SharedCatalog {
    loader: ActionLoader,
    current: RwLock<Arc<ActionCatalog>>,
}

impl SharedCatalog {
    /// Load the directory once. Fails only if the directory can't be read.
    pub fn load(loader: ActionLoader) -> Result<Self, ActionError> {
        let catalog = loader.load_all()?;
        Ok(Self {
            loader,
            current: RwLock::new(Arc::new(catalog)),
        })
    }

    /// Current catalog. Stays valid even if a reload happens meanwhile.
    pub fn snapshot(&self) -> Arc<ActionCatalog> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rebuild from disk and swap the new catalog in.
    /// On failure the previous catalog stays in place.
    pub fn reload(&self) -> Result<usize, ActionError> {
        let catalog = Arc::new(self.loader.load_all()?);
        let count = catalog.len();
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = catalog;
        info!("Reloaded action catalog ({} actions)", count);
        Ok(count)
    }

    pub fn loader(&self) -> &ActionLoader {
        &self.loader
    }
}
