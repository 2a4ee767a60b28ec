// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=meridian_projection --heading-base-level=0

//! Meridian Projection: world map projections for a pannable viewport.
//!
//! A [`Projection`] maps [`GeoPoint`]s (degrees) to viewport pixels and back.
//! The pipeline is fixed:
//!
//! 1) rotate the globe (`[lambda, phi, gamma]` in degrees);
//! 2) apply the raw projection ([`Times`] by default, or [`Equirectangular`]);
//! 3) scale and translate into pixel space, centering the map in the viewport.
//!
//! [`Projection::inverse`] runs the pipeline backwards exactly and reports
//! [`ProjectionError::NonInvertible`] instead of guessing.
//! [`Projection::project_line`] adds adaptive resampling: long segments are
//! subdivided until the drawn polyline stays within `precision` pixels of the
//! projected great-circle arc.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use meridian_projection::{GeoPoint, Projection, ProjectionConfig};
//!
//! let cfg = ProjectionConfig::default();
//! let p = Projection::new(&cfg, Size::new(800.0, 600.0)).unwrap();
//!
//! let oslo = GeoPoint::new(10.75, 59.91);
//! let px = p.forward(oslo);
//! let back = p.inverse(px).unwrap();
//! assert!((back.lon - oslo.lon).abs() < cfg.precision);
//! assert!((back.lat - oslo.lat).abs() < cfg.precision);
//! ```

pub mod config;
pub mod error;
pub mod geo;
pub mod projection;
pub mod raw;
pub mod rotation;

pub use config::{DEFAULT_PRECISION, DEFAULT_SCALE, ProjectionConfig, ProjectionKind};
pub use error::{ConfigIssue, ProjectionError};
pub use geo::GeoPoint;
pub use projection::Projection;
pub use raw::{Equirectangular, RawProjection, Times};
pub use rotation::Rotation;
