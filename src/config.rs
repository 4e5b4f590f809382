// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Grid configuration.
//!
//! Layering: built-in defaults, then an optional JSON file (`GridConfig::load`), then
//! environment overrides (`FLOWGRID_ACCESS_TOKEN`, `FLOWGRID_MAX_ZOOM`). Call `validate` after
//! the last layer.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{GeoPoint, InvalidCoordinate};
use crate::view::ViewState;

pub const ENV_ACCESS_TOKEN: &str = "FLOWGRID_ACCESS_TOKEN";
pub const ENV_MAX_ZOOM: &str = "FLOWGRID_MAX_ZOOM";

pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(-33.45, -70.66);
pub const DEFAULT_ZOOM: f64 = 10.0;
pub const DEFAULT_MAX_ZOOM: u8 = 18;
pub const DEFAULT_TILE_TEMPLATE: &str =
    "https://api.mapbox.com/styles/v1/mapbox/dark-v11/tiles/{z}/{x}/{y}?access_token={access_token}";

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([A-Za-z_]+)\}").expect("placeholder regex"))
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
    InvalidTileTemplate { template: String, reason: TemplateProblem },
    MissingAccessToken,
    InvalidZoom { zoom: f64, max_zoom: u8 },
    InvalidCenter(InvalidCoordinate),
    InvalidViewport { width: f64, height: f64 },
    InvalidEnv { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateProblem {
    MissingPlaceholder(&'static str),
    UnknownPlaceholder(String),
}

impl fmt::Display for TemplateProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPlaceholder(name) => write!(f, "missing {{{name}}} placeholder"),
            Self::UnknownPlaceholder(name) => write!(f, "unknown placeholder {{{name}}}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "invalid config json in {}: {source}", path.display())
            }
            Self::InvalidTileTemplate { template, reason } => {
                write!(f, "invalid tile url template {template:?}: {reason}")
            }
            Self::MissingAccessToken => write!(
                f,
                "tile url template needs an access token (set {ENV_ACCESS_TOKEN} or tile_source.access_token)"
            ),
            Self::InvalidZoom { zoom, max_zoom } => {
                write!(f, "initial zoom {zoom} must be within 0..={max_zoom}")
            }
            Self::InvalidCenter(source) => write!(f, "invalid initial center: {source}"),
            Self::InvalidViewport { width, height } => {
                write!(f, "viewport {width}x{height} must be positive")
            }
            Self::InvalidEnv { name, value } => write!(f, "invalid value for {name}: {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidCenter(source) => Some(source),
            _ => None,
        }
    }
}

/// Raster tile endpoint for the map views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSource {
    /// URL with `{z}`, `{x}`, `{y}` and optionally `{access_token}` placeholders.
    pub url_template: String,
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub max_zoom: u8,
}

impl Default for TileSource {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_TILE_TEMPLATE.to_owned(),
            access_token: None,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

impl TileSource {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = [false; 3];
        let mut needs_token = false;
        for caps in placeholder_regex().captures_iter(&self.url_template) {
            match &caps[1] {
                "z" => seen[0] = true,
                "x" => seen[1] = true,
                "y" => seen[2] = true,
                "access_token" => needs_token = true,
                other => {
                    return Err(ConfigError::InvalidTileTemplate {
                        template: self.url_template.clone(),
                        reason: TemplateProblem::UnknownPlaceholder(other.to_owned()),
                    })
                }
            }
        }

        for (present, name) in seen.into_iter().zip(["z", "x", "y"]) {
            if !present {
                return Err(ConfigError::InvalidTileTemplate {
                    template: self.url_template.clone(),
                    reason: TemplateProblem::MissingPlaceholder(name),
                });
            }
        }

        if needs_token && self.access_token.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingAccessToken);
        }
        Ok(())
    }

    /// Concrete tile URL. Assumes a validated template.
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        placeholder_regex()
            .replace_all(&self.url_template, |caps: &Captures<'_>| match &caps[1] {
                "z" => z.to_string(),
                "x" => x.to_string(),
                "y" => y.to_string(),
                "access_token" => self.access_token.clone().unwrap_or_default(),
                _ => caps[0].to_owned(),
            })
            .into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 256.0, height: 256.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub initial_center: GeoPoint,
    pub initial_zoom: f64,
    pub tile_source: TileSource,
    /// Pixel size of headless views.
    pub viewport: Viewport,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            initial_center: DEFAULT_CENTER,
            initial_zoom: DEFAULT_ZOOM,
            tile_source: TileSource::default(),
            viewport: Viewport::default(),
        }
    }
}

impl GridConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_owned(), source })?;
        let config = serde_json::from_str(&raw)
            .map_err(|source| ConfigError::Json { path: path.to_owned(), source })?;
        debug!(path = %path.display(), "loaded grid config");
        Ok(config)
    }

    pub fn initial_state(&self) -> ViewState {
        ViewState::new(self.initial_center, self.initial_zoom)
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(token) = lookup(ENV_ACCESS_TOKEN) {
            self.tile_source.access_token = Some(token);
        }
        if let Some(raw) = lookup(ENV_MAX_ZOOM) {
            let max_zoom = raw
                .trim()
                .parse::<u8>()
                .map_err(|_| ConfigError::InvalidEnv { name: ENV_MAX_ZOOM, value: raw.clone() })?;
            debug!(max_zoom, "max zoom overridden from environment");
            self.tile_source.max_zoom = max_zoom;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.initial_center.check().map_err(ConfigError::InvalidCenter)?;

        let max_zoom = self.tile_source.max_zoom;
        let zoom = self.initial_zoom;
        if !zoom.is_finite() || zoom < 0.0 || zoom > f64::from(max_zoom) {
            return Err(ConfigError::InvalidZoom { zoom, max_zoom });
        }

        let Viewport { width, height } = self.viewport;
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidViewport { width, height });
        }

        self.tile_source.validate()
    }
}
