//! Toolkit-wide defaults, injected into a [`Context`](crate::Context) at construction.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    geom::{Margin, Size},
};

/// Default number of vertices generated for each rounded corner.
pub const DEFAULT_ARC_RESOLUTION: u32 = 9;

/// Toolkit configuration.
///
/// Every field has a default, so a JSON document only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Border line width used when generating round-form outlines.
    pub border_width: f32,
    /// Vertices per rounded corner. Must be at least 2.
    pub arc_resolution: u32,
    /// Spacing given to new linear layouts.
    pub default_spacing: u32,
    /// Margin given to new containers.
    pub default_margin: Margin,
    /// Corner radius given to new nodes.
    pub default_radius: f32,
    /// Dimensions of each glyph atlas page.
    pub atlas_size: Size,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            border_width: 1.0,
            arc_resolution: DEFAULT_ARC_RESOLUTION,
            default_spacing: 4,
            default_margin: Margin::default(),
            default_radius: 5.0,
            atlas_size: Size::new(512, 512),
        }
    }
}

impl Config {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(src: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.arc_resolution < 2 {
            return Err(Error::Config(format!(
                "arc_resolution must be at least 2, got {}",
                self.arc_resolution
            )));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(Error::Config(format!(
                "border_width must be a non-negative number, got {}",
                self.border_width
            )));
        }
        if !self.default_radius.is_finite() || self.default_radius < 0.0 {
            return Err(Error::Config(format!(
                "default_radius must be a non-negative number, got {}",
                self.default_radius
            )));
        }
        self.atlas_size.validated("atlas_size")?;
        Ok(())
    }
}
