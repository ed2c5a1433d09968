use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::graph::Persona;

/// UI state that survives restarts. Read once at startup to seed the filters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPreferences {
    #[serde(default)]
    pub persona: Persona,
    #[serde(default)]
    pub onboarding_complete: bool,
}

impl UiPreferences {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read UI state from {}", path.display()));
            }
        };

        serde_json::from_str(&raw)
            .with_context(|| format!("invalid UI state JSON in {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self).context("failed to encode UI state")?;
        fs::write(path, raw)
            .with_context(|| format!("failed to write UI state to {}", path.display()))
    }
}
