use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::section;
use crate::settings::InstallSettings;
use crate::snippet;

/// Result of patching the config file. `before`/`after` are document fingerprints.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub path: PathBuf,
    pub before: String,
    pub after: String,
    pub changed: bool,
}

/// The Codex configuration file under a home directory: `<home>/.codex/config.toml`.
#[derive(Debug, Clone)]
pub struct CodexConfig {
    path: PathBuf,
}

impl CodexConfig {
    pub fn new(home: impl AsRef<Path>) -> Self {
        Self {
            path: home.as_ref().join(".codex").join("config.toml"),
        }
    }

    pub fn from_home_dir() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(Self::new(home))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory chain and an empty file if either is missing.
    pub fn ensure_exists(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        if !self.path.exists() {
            debug!(path = %self.path.display(), "creating empty config file");
            fs::write(&self.path, "")
                .with_context(|| format!("Failed to create {}", self.path.display()))?;
        }
        Ok(())
    }

    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))
    }

    /// Computes the patched document without touching the filesystem.
    /// A missing file reads as empty.
    pub fn preview(&self, settings: &InstallSettings) -> Result<(PatchOutcome, String)> {
        let current = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };
        let updated = section::merge_section(&current, &snippet::build_snippet(settings));

        let outcome = self.outcome(&current, &updated);
        info!(
            path = %outcome.path.display(),
            before = %outcome.before,
            after = %outcome.after,
            changed = outcome.changed,
            "dry run, config not written"
        );
        Ok((outcome, updated))
    }

    fn outcome(&self, current: &str, updated: &str) -> PatchOutcome {
        PatchOutcome {
            path: self.path.clone(),
            before: section::fingerprint(current),
            after: section::fingerprint(updated),
            changed: current != updated,
        }
    }

    /// Writes the openmemory server entry into the config, replacing any previous one.
    pub fn apply(&self, settings: &InstallSettings) -> Result<PatchOutcome> {
        let block = snippet::build_snippet(settings);
        let header = section::section_header(snippet::SECTION_NAME);

        self.ensure_exists()?;
        let current = self.read()?;
        let updated = section::merge_section(&current, &block);
        debug!(section = ?section::extract_section(&updated, &header), "merged section");

        fs::write(&self.path, &updated)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        let outcome = self.outcome(&current, &updated);
        info!(
            path = %outcome.path.display(),
            before = %outcome.before,
            after = %outcome.after,
            changed = outcome.changed,
            "config updated"
        );
        Ok(outcome)
    }
}
