// File: src/config.rs
use crate::core::types::{OutputLayout, Scheme, UnconvertiblePolicy};
use crate::error::{Result, TranslitError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Byte that marks a token as unconvertible when it appears anywhere in the
/// token's UTF-8 encoding.
pub const MARKER_BYTE: u8 = 0xd9;

/// Settings as read from a JSON config file. Every field is optional so a
/// file only needs to name what it overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub scheme: Option<Scheme>,
    pub on_unconvertible: Option<UnconvertiblePolicy>,
    pub layout: Option<OutputLayout>,
    pub lenient: Option<bool>,
    pub markers: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| TranslitError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Fully resolved settings for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub scheme: Scheme,
    pub on_unconvertible: UnconvertiblePolicy,
    pub layout: OutputLayout,
    /// Skip lines with unknown symbols instead of failing the run.
    pub lenient: bool,
    pub markers: String,
}

impl DriverConfig {
    pub fn for_scheme(scheme: Scheme) -> Self {
        Self {
            scheme,
            on_unconvertible: scheme.default_unconvertible(),
            layout: scheme.default_layout(),
            lenient: false,
            markers: scheme.default_markers().to_string(),
        }
    }

    /// Builds a config from a file. An explicit `scheme` wins over the
    /// file's; the chosen scheme supplies defaults the file then overrides.
    pub fn resolve(file: &FileConfig, scheme: Option<Scheme>) -> Self {
        let mut config = Self::for_scheme(scheme.or(file.scheme).unwrap_or(Scheme::Wx));
        config.merge(file);
        config
    }

    pub fn merge(&mut self, file: &FileConfig) {
        if let Some(policy) = file.on_unconvertible {
            self.on_unconvertible = policy;
        }
        if let Some(layout) = file.layout {
            self.layout = layout;
        }
        if let Some(lenient) = file.lenient {
            self.lenient = lenient;
        }
        if let Some(markers) = &file.markers {
            self.markers = markers.clone();
        }
    }

    pub fn is_convertible(&self, token: &str) -> bool {
        !token.chars().any(|c| self.markers.contains(c)) && !token.as_bytes().contains(&MARKER_BYTE)
    }
}
