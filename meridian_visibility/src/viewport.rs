// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport state and change detection.

use kurbo::{Size, Vec2};
use meridian_projection::GeoPoint;

use crate::error::ViewportIssue;

bitflags::bitflags! {
    /// Which parts of a [`ViewportState`] differ from an earlier one.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ViewportChanges: u8 {
        /// Viewport width changed.
        const WIDTH  = 0b0000_0001;
        /// Viewport height changed.
        const HEIGHT = 0b0000_0010;
        /// Geographic center changed.
        const CENTER = 0b0000_0100;
        /// Pixel pan offset changed.
        const OFFSET = 0b0000_1000;
        /// Zoom level changed.
        const ZOOM   = 0b0001_0000;
    }
}

impl ViewportChanges {
    /// Width or height changed, so the projection's translation moves.
    pub fn resized(self) -> bool {
        self.intersects(Self::WIDTH | Self::HEIGHT)
    }
}

/// What the map is asked to show.
///
/// `center` is the geographic point the map is centered on before panning;
/// `offset` is an additional pan in pixels at the current zoom.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportState {
    /// Viewport width in pixels.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
    /// Geographic center.
    pub center: GeoPoint,
    /// Pan offset in pixels.
    pub offset: Vec2,
    /// Zoom factor; 1 shows the projection at its configured scale.
    pub zoom: f64,
}

impl ViewportState {
    /// A viewport of the given size centered on (0, 0), unpanned, at zoom 1.
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            center: GeoPoint::ORIGIN,
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Replace the center.
    #[must_use]
    pub const fn with_center(mut self, center: GeoPoint) -> Self {
        self.center = center;
        self
    }

    /// Replace the pan offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Replace the zoom.
    #[must_use]
    pub const fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Viewport size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check the state before anything is computed from it.
    pub fn validate(&self, min_zoom: f64, max_zoom: f64) -> Result<(), ViewportIssue> {
        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !(size_ok(self.width) && size_ok(self.height)) {
            return Err(ViewportIssue::Size {
                width: self.width,
                height: self.height,
            });
        }
        if !self.center.is_finite() {
            return Err(ViewportIssue::Center);
        }
        if !self.offset.is_finite() {
            return Err(ViewportIssue::Offset);
        }
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(ViewportIssue::Zoom(self.zoom));
        }
        if self.zoom < min_zoom || self.zoom > max_zoom {
            return Err(ViewportIssue::ZoomOutOfRange {
                zoom: self.zoom,
                min: min_zoom,
                max: max_zoom,
            });
        }
        Ok(())
    }

    /// Fields that differ from `prev`; everything when there is no `prev`.
    pub fn changes_since(&self, prev: Option<&Self>) -> ViewportChanges {
        let Some(prev) = prev else {
            return ViewportChanges::all();
        };
        let mut changes = ViewportChanges::empty();
        changes.set(ViewportChanges::WIDTH, self.width != prev.width);
        changes.set(ViewportChanges::HEIGHT, self.height != prev.height);
        changes.set(ViewportChanges::CENTER, self.center != prev.center);
        changes.set(ViewportChanges::OFFSET, self.offset != prev.offset);
        changes.set(ViewportChanges::ZOOM, self.zoom != prev.zoom);
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_state_changes_everything() {
        let s = ViewportState::new(800.0, 600.0);
        assert_eq!(s.changes_since(None), ViewportChanges::all());
        assert!(s.changes_since(Some(&s)).is_empty());
    }

    #[test]
    fn changes_are_per_field() {
        let a = ViewportState::new(800.0, 600.0);
        let b = a.with_offset(Vec2::new(10.0, 0.0)).with_zoom(2.0);
        let c = b.changes_since(Some(&a));
        assert_eq!(c, ViewportChanges::OFFSET | ViewportChanges::ZOOM);
        assert!(!c.resized());
        let d = ViewportState { height: 500.0, ..a };
        assert!(d.changes_since(Some(&a)).resized());
    }

    #[test]
    fn validation_reports_the_first_problem() {
        let ok = ViewportState::new(800.0, 600.0);
        assert_eq!(ok.validate(1.0, 1000.0), Ok(()));
        assert!(matches!(
            ViewportState::new(0.0, 600.0).validate(1.0, 1000.0),
            Err(ViewportIssue::Size { .. })
        ));
        assert_eq!(
            ok.with_center(GeoPoint::new(f64::NAN, 0.0)).validate(1.0, 1000.0),
            Err(ViewportIssue::Center)
        );
        assert_eq!(
            ok.with_offset(Vec2::new(0.0, f64::INFINITY))
                .validate(1.0, 1000.0),
            Err(ViewportIssue::Offset)
        );
        assert_eq!(
            ok.with_zoom(-2.0).validate(1.0, 1000.0),
            Err(ViewportIssue::Zoom(-2.0))
        );
        assert!(matches!(
            ok.with_zoom(0.5).validate(1.0, 1000.0),
            Err(ViewportIssue::ZoomOutOfRange { .. })
        ));
        assert_eq!(ok.with_zoom(1000.0).validate(1.0, 1000.0), Ok(()));
    }
}
