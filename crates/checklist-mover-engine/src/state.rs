use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::reorder::Policy;
use crate::store::HiddenStore;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to read state file at {state_path}: {source}")]
    Read {
        state_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse state file at {state_path}: {source}")]
    Parse {
        state_path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize state for {state_path}: {source}")]
    Serialize {
        state_path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write state file at {state_path}: {source}")]
    Write {
        state_path: PathBuf,
        source: std::io::Error,
    },
}

/// User-facing settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Hide completed items instead of moving them to the bottom.
    pub hide_completed: bool,
}

impl Settings {
    pub fn policy(&self) -> Policy {
        Policy {
            hide_completed: self.hide_completed,
        }
    }
}

/// Everything persisted between runs: settings plus hidden lines per document.
///
/// Missing fields fall back to their defaults so older or partial state
/// files still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoverState {
    pub settings: Settings,
    pub hidden: HiddenStore,
}

impl MoverState {
    /// Load state from a JSON file. A missing file gives the default state.
    pub fn load_from_path<P: AsRef<Path>>(state_path: P) -> Result<Self, StateError> {
        let state_path = state_path.as_ref();
        if !state_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(state_path).map_err(|source| StateError::Read {
            state_path: state_path.to_path_buf(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&content).map_err(|source| StateError::Parse {
            state_path: state_path.to_path_buf(),
            source,
        })
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, state_path: P) -> Result<(), StateError> {
        let state_path = state_path.as_ref();
        let write_err = |source| StateError::Write {
            state_path: state_path.to_path_buf(),
            source,
        };

        if let Some(parent) = state_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content =
            serde_json::to_string_pretty(self).map_err(|source| StateError::Serialize {
                state_path: state_path.to_path_buf(),
                source,
            })?;
        std::fs::write(state_path, content).map_err(write_err)
    }

    pub fn policy(&self) -> Policy {
        self.settings.policy()
    }
}
