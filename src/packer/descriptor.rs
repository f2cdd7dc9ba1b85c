//! Project descriptor (`config.toml`) loading

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::{CexError, Result};

/// File name of the descriptor inside a project directory
pub const DESCRIPTOR_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectDescriptor {
    #[serde(default)]
    pub general: Option<General>,
}

/// The `[general]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct General {
    /// Kept loosely typed so a non-string value reports a missing field
    /// rather than a TOML error.
    #[serde(default)]
    pub entry_point: Option<toml::Value>,
}

impl ProjectDescriptor {
    /// Load `config.toml` from a project directory
    pub fn load(project_dir: &Path) -> Result<(PathBuf, Self)> {
        let path = project_dir.join(DESCRIPTOR_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CexError::MissingConfig(project_dir.to_path_buf()));
            }
            Err(e) => {
                return Err(CexError::InvalidConfig {
                    path,
                    message: e.to_string(),
                });
            }
        };

        let descriptor: Self = toml::from_str(&content).map_err(|e| CexError::InvalidConfig {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "project descriptor loaded");
        Ok((path, descriptor))
    }

    /// `general.entry_point`, when present and a string
    pub fn entry_point(&self) -> Option<&str> {
        self.general
            .as_ref()
            .and_then(|g| g.entry_point.as_ref())
            .and_then(|v| v.as_str())
    }
}

/// Load the descriptor and extract the entry point in one step
///
/// The entry point must stay inside the project directory: no root, drive
/// prefix or `..` component.
pub fn load_entry_point(project_dir: &Path) -> Result<String> {
    let (path, descriptor) = ProjectDescriptor::load(project_dir)?;
    let entry_point = descriptor
        .entry_point()
        .map(str::to_string)
        .ok_or_else(|| CexError::MissingEntryField(path.clone()))?;

    if !is_contained(Path::new(&entry_point)) {
        return Err(CexError::InvalidEntryPoint { path, entry_point });
    }
    Ok(entry_point)
}

fn is_contained(entry_point: &Path) -> bool {
    let mut components = entry_point.components().peekable();
    components.peek().is_some()
        && components.all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
