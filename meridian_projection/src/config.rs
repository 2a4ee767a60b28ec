// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projection configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigIssue;

/// Default scale (pixels per unit of the raw projection at zoom 1).
pub const DEFAULT_SCALE: f64 = 160.0;

/// Default resampling tolerance in pixels.
pub const DEFAULT_PRECISION: f64 = 0.1;

/// The raw projection family.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    /// John Muir's Times projection: a compromise cylindrical projection
    /// with moderate polar exaggeration.
    #[default]
    Times,
    /// Plate carrée: longitude and latitude mapped linearly.
    Equirectangular,
}

/// Parameters of a [`Projection`](crate::Projection).
///
/// Every field has a default, so partial documents deserialize:
///
/// ```rust
/// use meridian_projection::{ProjectionConfig, ProjectionKind};
///
/// let cfg: ProjectionConfig = serde_json::from_str(r#"{ "rotation": [-10, 0, 0] }"#).unwrap();
/// assert_eq!(cfg.kind, ProjectionKind::Times);
/// assert_eq!(cfg.scale, 160.0);
/// assert_eq!(cfg.rotation, [-10.0, 0.0, 0.0]);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Raw projection family.
    pub kind: ProjectionKind,
    /// Pixels per raw projection unit.
    pub scale: f64,
    /// Horizontal shift of the projection center from the viewport center, in pixels.
    pub x_offset: f64,
    /// Vertical shift of the projection center from the viewport center, in pixels.
    pub y_offset: f64,
    /// Three-axis rotation `[lambda, phi, gamma]` in degrees, applied before projecting.
    pub rotation: [f64; 3],
    /// Maximum deviation in pixels tolerated when resampling lines.
    pub precision: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            kind: ProjectionKind::Times,
            scale: DEFAULT_SCALE,
            x_offset: 0.0,
            y_offset: 0.0,
            rotation: [0.0; 3],
            precision: DEFAULT_PRECISION,
        }
    }
}

impl ProjectionConfig {
    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigIssue::Scale(self.scale));
        }
        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(ConfigIssue::Precision(self.precision));
        }
        if !(self.x_offset.is_finite() && self.y_offset.is_finite()) {
            return Err(ConfigIssue::Offset);
        }
        if !self.rotation.iter().all(|a| a.is_finite()) {
            return Err(ConfigIssue::Rotation);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_the_default() {
        let cfg: ProjectionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ProjectionConfig::default());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn kind_is_lowercase() {
        let cfg: ProjectionConfig =
            serde_json::from_str(r#"{ "kind": "equirectangular", "scale": 100 }"#).unwrap();
        assert_eq!(cfg.kind, ProjectionKind::Equirectangular);
        assert_eq!(cfg.scale, 100.0);
        assert_eq!(cfg.precision, DEFAULT_PRECISION);
    }

    #[test]
    fn rejects_unusable_parameters() {
        let bad_scale = ProjectionConfig {
            scale: 0.0,
            ..ProjectionConfig::default()
        };
        assert_eq!(bad_scale.validate(), Err(ConfigIssue::Scale(0.0)));

        let bad_precision = ProjectionConfig {
            precision: -1.0,
            ..ProjectionConfig::default()
        };
        assert_eq!(bad_precision.validate(), Err(ConfigIssue::Precision(-1.0)));

        let bad_offset = ProjectionConfig {
            y_offset: f64::INFINITY,
            ..ProjectionConfig::default()
        };
        assert_eq!(bad_offset.validate(), Err(ConfigIssue::Offset));

        let bad_rotation = ProjectionConfig {
            rotation: [0.0, f64::NAN, 0.0],
            ..ProjectionConfig::default()
        };
        assert_eq!(bad_rotation.validate(), Err(ConfigIssue::Rotation));
    }
}
