// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geographic extent of a panned, zoomed viewport.
//!
//! Both functions take the zoom as a caller contract: a zero, negative or
//! NaN zoom is a bug in the caller and panics.

use kurbo::Vec2;
use meridian_index::{Aabb2D, BoundingBox};
use meridian_projection::{GeoPoint, Projection, ProjectionError};

/// The geographic point that ends up centered after panning by `offset`
/// pixels at `zoom`.
///
/// # Panics
///
/// Panics if `zoom` is not greater than zero.
pub fn zoom_center(
    center: GeoPoint,
    offset: Vec2,
    projection: &Projection,
    zoom: f64,
) -> Result<GeoPoint, ProjectionError> {
    assert!(zoom > 0.0, "zoom must be positive, got {zoom}");
    let pos = projection.forward(center);
    projection.inverse(pos + offset / zoom)
}

/// Geographic bounding box of a `width` x `height` pixel viewport centered
/// on `center` at `zoom`.
///
/// The two opposite corners are inverse-projected and normalized per axis,
/// so the result is well-ordered whatever the projection does to corner
/// order. Under a rotation, a view whose west corner comes back east of its
/// east corner straddles the antimeridian and spans every longitude.
///
/// # Panics
///
/// Panics if `zoom` is not greater than zero.
pub fn viewport_bounding_box(
    center: GeoPoint,
    width: f64,
    height: f64,
    projection: &Projection,
    zoom: f64,
) -> Result<BoundingBox, ProjectionError> {
    assert!(zoom > 0.0, "zoom must be positive, got {zoom}");
    let c = projection.forward(center);
    let half = Vec2::new((width * 0.5) / zoom, (height * 0.5) / zoom);
    let top_left = projection.inverse(c - half)?;
    let bottom_right = projection.inverse(c + half)?;
    let mut bbox = Aabb2D::from_corners(
        (top_left.lon, top_left.lat),
        (bottom_right.lon, bottom_right.lat),
    );
    // A rotated view across the antimeridian gets its corner longitudes
    // wrapped; normalizing those would select the complement of the view.
    if !projection.rotation().is_identity() && top_left.lon > bottom_right.lon {
        bbox.min_x = -180.0;
        bbox.max_x = 180.0;
    }
    Ok(bbox)
}
