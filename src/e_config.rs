// src/e_config.rs
use crate::e_errors::PanelError;
use crate::prelude::*;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Name of the per-workspace settings file.
pub const SETTINGS_FILE: &str = ".ant-e.toml";

/// The single persisted setting: where the build file lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_file_path: Option<String>,
}

/// A project root plus the settings stored beneath it.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Workspace { root: root.into() }
    }

    /// Uses the current directory as the workspace root.
    pub fn from_current_dir() -> io::Result<Self> {
        Ok(Workspace::new(env::current_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    /// Reads the settings file. A missing file yields default settings.
    pub fn load_settings(&self) -> Result<WorkspaceSettings, PanelError> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(WorkspaceSettings::default());
        }
        let contents = fs::read_to_string(&path).map_err(|e| PanelError::Config {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| PanelError::Config {
            path,
            reason: e.message().to_string(),
        })
    }

    pub fn save_settings(&self, settings: &WorkspaceSettings) -> anyhow::Result<()> {
        let path = self.settings_path();
        let contents = toml::to_string(settings).context("serializing workspace settings")?;
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// The configured build file, or `NotConfigured` when the key is absent or blank.
    pub fn configured_build_file(&self) -> Result<String, PanelError> {
        match self.load_settings()?.build_file_path {
            Some(path) if !path.trim().is_empty() => Ok(path),
            _ => Err(PanelError::NotConfigured),
        }
    }

    /// Resolves a configured path against the workspace root unless it is absolute.
    pub fn resolve(&self, configured: &str) -> PathBuf {
        let path = Path::new(configured);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Stores `selected` as the build file, relative to the root when it lies
    /// beneath it. Returns the string that was saved.
    pub fn configure_build_file(&self, selected: &Path) -> anyhow::Result<String> {
        let to_save = self.relative_if_possible(selected);
        let mut settings = self.load_settings().unwrap_or_default();
        settings.build_file_path = Some(to_save.clone());
        self.save_settings(&settings)?;
        info!("Build file configured: {}", to_save);
        Ok(to_save)
    }

    fn relative_if_possible(&self, selected: &Path) -> String {
        let absolute = if selected.is_absolute() {
            selected.to_path_buf()
        } else {
            self.root.join(selected)
        };
        match absolute.strip_prefix(&self.root) {
            Ok(relative) => relative.to_string_lossy().to_string(),
            Err(_) => absolute.to_string_lossy().to_string(),
        }
    }
}
