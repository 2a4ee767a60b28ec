// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolver errors.

use meridian_index::IndexError;
use meridian_projection::{ConfigIssue, ProjectionError};
use thiserror::Error;

/// Why a [`ViewportState`](crate::ViewportState) was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum ViewportIssue {
    /// Width or height is zero, negative or not finite.
    #[error("viewport size must be positive and finite, got {width}x{height}")]
    Size {
        /// Viewport width in pixels.
        width: f64,
        /// Viewport height in pixels.
        height: f64,
    },
    /// The center has a non-finite coordinate.
    #[error("center must be finite")]
    Center,
    /// The pan offset has a non-finite component.
    #[error("pan offset must be finite")]
    Offset,
    /// Zoom is zero, negative or not finite.
    #[error("zoom must be positive and finite, got {0}")]
    Zoom(f64),
    /// Zoom lies outside the configured range.
    #[error("zoom {zoom} is outside the allowed range [{min}, {max}]")]
    ZoomOutOfRange {
        /// Requested zoom.
        zoom: f64,
        /// Smallest allowed zoom.
        min: f64,
        /// Largest allowed zoom.
        max: f64,
    },
}

/// A problem with a [`ResolverConfig`](crate::ResolverConfig).
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum ResolverConfigIssue {
    /// The projection parameters are unusable.
    #[error(transparent)]
    Projection(#[from] ConfigIssue),
    /// The zoom range is empty, non-positive or not finite.
    #[error("zoom range [{min}, {max}] must satisfy 0 < min <= max < inf")]
    ZoomRange {
        /// Configured minimum zoom.
        min: f64,
        /// Configured maximum zoom.
        max: f64,
    },
}

/// Errors surfaced by [`VisibilityResolver`](crate::VisibilityResolver).
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum VisibilityError {
    /// A spatial query failed.
    #[error(transparent)]
    Index(#[from] IndexError),
    /// Projecting or inverse-projecting the viewport failed.
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    /// The viewport state was rejected before any computation.
    #[error("invalid viewport state: {0}")]
    InvalidViewportState(#[from] ViewportIssue),
    /// The resolver configuration was rejected.
    #[error("invalid resolver configuration: {0}")]
    InvalidConfig(#[from] ResolverConfigIssue),
    /// The resolver has been disposed.
    #[error("resolver has been disposed")]
    Disposed,
}
