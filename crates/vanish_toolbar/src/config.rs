//! Toolbar configuration
//!
//! Values can be built in code or loaded from TOML:
//!
//! ```toml
//! trigger_distance = 32.0
//! toolbar_height = "44px"
//! transition = "0.3s ease-out"
//! target_tag = "ion-toolbar"
//! ```
//!
//! Missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VanishError};

/// Platform the toolbar is styled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Material Design toolbars (56px)
    #[default]
    Material,
    /// iOS toolbars (44px)
    Ios,
}

impl Platform {
    /// Expanded toolbar height for this platform
    pub fn toolbar_height(&self) -> &'static str {
        match self {
            Platform::Material => "56px",
            Platform::Ios => "44px",
        }
    }
}

/// Scroll vanish configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VanishConfig {
    /// Minimum scroll delta (exclusive) that hides or shows the toolbar
    #[serde(default = "default_trigger_distance")]
    pub trigger_distance: f32,
    /// Height restored when the toolbar is shown
    #[serde(default = "default_toolbar_height")]
    pub toolbar_height: String,
    /// Transition declaration applied once at attachment
    #[serde(default = "default_transition")]
    pub transition: String,
    /// Tag of the descendant to style instead of the host, when present
    #[serde(default = "default_target_tag")]
    pub target_tag: String,
}

fn default_trigger_distance() -> f32 {
    20.0
}

fn default_toolbar_height() -> String {
    Platform::Material.toolbar_height().to_string()
}

fn default_transition() -> String {
    "0.2s linear".to_string()
}

fn default_target_tag() -> String {
    "ion-toolbar".to_string()
}

impl Default for VanishConfig {
    fn default() -> Self {
        Self {
            trigger_distance: default_trigger_distance(),
            toolbar_height: default_toolbar_height(),
            transition: default_transition(),
            target_tag: default_target_tag(),
        }
    }
}

impl VanishConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with the platform's expanded height
    pub fn for_platform(platform: Platform) -> Self {
        Self::default().toolbar_height(platform.toolbar_height())
    }

    pub fn trigger_distance(mut self, distance: f32) -> Self {
        self.trigger_distance = distance;
        self
    }

    pub fn toolbar_height(mut self, height: impl Into<String>) -> Self {
        self.toolbar_height = height.into();
        self
    }

    pub fn transition(mut self, transition: impl Into<String>) -> Self {
        self.transition = transition.into();
        self
    }

    pub fn target_tag(mut self, tag: impl Into<String>) -> Self {
        self.target_tag = tag.into();
        self
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        if !self.trigger_distance.is_finite() || self.trigger_distance < 0.0 {
            return Err(VanishError::InvalidConfig(format!(
                "trigger_distance must be a finite, non-negative number (got {})",
                self.trigger_distance
            )));
        }
        if self.toolbar_height.trim().is_empty() {
            return Err(VanishError::InvalidConfig(
                "toolbar_height must not be empty".to_string(),
            ));
        }
        if self.target_tag.trim().is_empty() {
            return Err(VanishError::InvalidConfig(
                "target_tag must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: VanishConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| VanishError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded scroll vanish config");
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
