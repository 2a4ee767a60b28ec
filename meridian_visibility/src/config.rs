// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolver configuration.

use core::time::Duration;

use meridian_projection::ProjectionConfig;
use serde::{Deserialize, Serialize};

use crate::error::ResolverConfigIssue;

/// Duration of an animated move, in milliseconds.
pub const DEFAULT_MOVE_DURATION_MS: u64 = 2_000;

/// Smallest zoom accepted by default.
pub const DEFAULT_MIN_ZOOM: f64 = 1.0;

/// Largest zoom accepted by default.
pub const DEFAULT_MAX_ZOOM: f64 = 1_000.0;

/// Settings for a [`VisibilityResolver`](crate::VisibilityResolver).
///
/// All fields default, so a partial document is enough:
///
/// ```rust
/// use meridian_visibility::ResolverConfig;
///
/// let cfg: ResolverConfig = serde_json::from_str(
///     r#"{ "move_duration_ms": 500, "projection": { "scale": 200 } }"#,
/// )
/// .unwrap();
/// assert_eq!(cfg.move_duration().as_millis(), 500);
/// assert_eq!(cfg.projection.scale, 200.0);
/// assert_eq!(cfg.max_zoom, 1000.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Projection used for every update.
    pub projection: ProjectionConfig,
    /// How long a move animates; the history is trimmed this long after the
    /// last accepted change.
    pub move_duration_ms: u64,
    /// Smallest zoom accepted by `update`.
    pub min_zoom: f64,
    /// Largest zoom accepted by `update`.
    pub max_zoom: f64,
    /// Re-run the query with the settled viewport when the history is
    /// trimmed, dropping fragments only the earlier viewports needed.
    pub requery_on_trim: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionConfig::default(),
            move_duration_ms: DEFAULT_MOVE_DURATION_MS,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            requery_on_trim: false,
        }
    }
}

impl ResolverConfig {
    /// The move duration as a [`Duration`].
    pub fn move_duration(&self) -> Duration {
        Duration::from_millis(self.move_duration_ms)
    }

    /// Check every setting.
    pub fn validate(&self) -> Result<(), ResolverConfigIssue> {
        self.projection.validate()?;
        let (min, max) = (self.min_zoom, self.max_zoom);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ResolverConfigIssue::ZoomRange { min, max });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_projection::ConfigIssue;

    #[test]
    fn defaults_match_the_documented_values() {
        let cfg: ResolverConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ResolverConfig::default());
        assert_eq!(cfg.move_duration(), Duration::from_secs(2));
        assert!(!cfg.requery_on_trim);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn bad_ranges_are_rejected() {
        let inverted = ResolverConfig {
            min_zoom: 10.0,
            max_zoom: 2.0,
            ..ResolverConfig::default()
        };
        assert_eq!(
            inverted.validate(),
            Err(ResolverConfigIssue::ZoomRange {
                min: 10.0,
                max: 2.0
            })
        );
        let zero = ResolverConfig {
            min_zoom: 0.0,
            ..ResolverConfig::default()
        };
        assert!(zero.validate().is_err());
        let bad_projection = ResolverConfig {
            projection: ProjectionConfig {
                precision: 0.0,
                ..ProjectionConfig::default()
            },
            ..ResolverConfig::default()
        };
        assert_eq!(
            bad_projection.validate(),
            Err(ResolverConfigIssue::Projection(ConfigIssue::Precision(0.0)))
        );
    }
}
