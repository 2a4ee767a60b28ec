// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projection errors.

use thiserror::Error;

/// A problem with a [`ProjectionConfig`](crate::ProjectionConfig) or the
/// viewport it is applied to.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum ConfigIssue {
    /// `scale` is zero, negative or not finite.
    #[error("scale must be positive and finite, got {0}")]
    Scale(f64),
    /// `precision` is zero, negative or not finite.
    #[error("precision must be positive and finite, got {0}")]
    Precision(f64),
    /// `x_offset` or `y_offset` is not finite.
    #[error("offsets must be finite")]
    Offset,
    /// A rotation angle is not finite.
    #[error("rotation angles must be finite")]
    Rotation,
    /// The viewport size is negative or not finite.
    #[error("viewport size must be finite and non-negative, got {width}x{height}")]
    ViewportSize {
        /// Viewport width in pixels.
        width: f64,
        /// Viewport height in pixels.
        height: f64,
    },
}

/// Errors produced by projection construction and inversion.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum ProjectionError {
    /// The planar point has no geographic preimage.
    #[error("point ({x}, {y}) cannot be inverse-projected")]
    NonInvertible {
        /// Planar x.
        x: f64,
        /// Planar y.
        y: f64,
    },
    /// The configuration cannot produce a projection.
    #[error("invalid projection configuration: {0}")]
    InvalidConfig(#[from] ConfigIssue),
}
