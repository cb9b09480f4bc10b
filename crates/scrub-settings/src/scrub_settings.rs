//! Scrub Settings
//!
//! Settings are stored as JSON in the user config directory. A missing file
//! means defaults; unknown or missing keys fall back per field.
//! - Editor settings (code editor font and mode, banner timing, layout)
//! - Backend settings (where the rule service lives)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod settings_file;

pub use settings_file::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScrubSettings {
    pub editor: EditorSettings,
    pub backend: BackendSettings,
}

impl ScrubSettings {
    /// Load settings from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        serde_json::from_str(&content).with_context(|| "Failed to parse settings JSON")
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn settings_path() -> Result<PathBuf> {
        settings_file()
    }
}

/// Syntax mode of the raw code editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxMode {
    #[default]
    Java,
    Python,
    PlainText,
}

impl SyntaxMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Java => "Java",
            Self::Python => "Python",
            Self::PlainText => "Plain Text",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Java, Self::Python, Self::PlainText]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Code editor font size in points
    pub font_size: u16,
    pub mode: SyntaxMode,
    /// How long an info banner stays up
    pub info_dismiss_ms: u64,
    /// Space taken by the modal header, footer and body padding
    pub chrome_height: u32,
    /// Space above the code editor inside the modal body
    pub code_toolbar_height: u32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            font_size: 14,
            mode: SyntaxMode::Java,
            info_dismiss_ms: 3000,
            chrome_height: 138,
            code_toolbar_height: 100,
        }
    }
}

impl EditorSettings {
    pub fn info_dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.info_dismiss_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL of the rule service, without a trailing slash
    pub base_url: String,
    /// Project the rules belong to
    pub project: String,
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4567".to_string(),
            project: "default".to_string(),
            timeout_secs: 30,
        }
    }
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
