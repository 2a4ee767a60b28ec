// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configured projections: rotation, raw projection, scale and translation.

use kurbo::{Point, Size};

use crate::config::{ProjectionConfig, ProjectionKind};
use crate::error::{ConfigIssue, ProjectionError};
use crate::geo::GeoPoint;
use crate::raw::RawProjection;
use crate::rotation::{Rotation, asin};

/// Maximum subdivision depth when resampling one segment.
const MAX_RESAMPLE_DEPTH: u32 = 16;

/// Segments spanning more than 30° of arc are always subdivided.
const COS_MIN_DISTANCE: f64 = 0.866_025_403_784_438_7;

const EPSILON: f64 = 1e-6;

/// A ready-to-use projection from geographic to viewport pixel coordinates.
///
/// The map is centered in the viewport: the translation is half the viewport
/// size plus the configured offsets. Screen `y` grows downward.
///
/// ```rust
/// use kurbo::Size;
/// use meridian_projection::{GeoPoint, Projection, ProjectionConfig};
///
/// let p = Projection::new(&ProjectionConfig::default(), Size::new(800.0, 600.0)).unwrap();
/// let center = p.forward(GeoPoint::ORIGIN);
/// assert_eq!((center.x, center.y), (400.0, 300.0));
///
/// let back = p.inverse(center).unwrap();
/// assert!(back.lon.abs() < 1e-9 && back.lat.abs() < 1e-9);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    config: ProjectionConfig,
    rotation: Rotation,
    translate: Point,
    // Squared resampling tolerance.
    delta2: f64,
}

impl Projection {
    /// Build a projection for a viewport of the given size.
    pub fn new(config: &ProjectionConfig, viewport: Size) -> Result<Self, ProjectionError> {
        config.validate()?;
        if !(viewport.width.is_finite()
            && viewport.height.is_finite()
            && viewport.width >= 0.0
            && viewport.height >= 0.0)
        {
            return Err(ConfigIssue::ViewportSize {
                width: viewport.width,
                height: viewport.height,
            }
            .into());
        }
        Ok(Self {
            config: *config,
            rotation: Rotation::from_degrees(config.rotation),
            translate: Point::new(
                config.x_offset + viewport.width / 2.0,
                config.y_offset + viewport.height / 2.0,
            ),
            delta2: config.precision * config.precision,
        })
    }

    /// The configuration this projection was built from.
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Raw projection family.
    pub fn kind(&self) -> ProjectionKind {
        self.config.kind
    }

    /// Pixels per raw projection unit.
    pub fn scale(&self) -> f64 {
        self.config.scale
    }

    /// Pixel position of the projection's origin (longitude 0, latitude 0
    /// before rotation).
    pub fn translate(&self) -> Point {
        self.translate
    }

    /// The globe rotation applied before projecting.
    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    /// Project a geographic point to viewport pixels.
    ///
    /// Total: non-finite input yields a non-finite point.
    pub fn forward(&self, geo: GeoPoint) -> Point {
        let (lambda, phi) = geo.to_radians();
        let (lambda, phi) = self.rotation.forward(lambda, phi);
        self.project_rotated(lambda, phi)
    }

    /// Recover the geographic point shown at a viewport pixel.
    ///
    /// Fails with [`ProjectionError::NonInvertible`] when the point or the
    /// result is not finite. Latitudes are not clamped to the poles.
    pub fn inverse(&self, p: Point) -> Result<GeoPoint, ProjectionError> {
        let non_invertible = ProjectionError::NonInvertible { x: p.x, y: p.y };
        if !p.is_finite() {
            return Err(non_invertible);
        }
        let k = self.config.scale;
        let raw_x = (p.x - self.translate.x) / k;
        let raw_y = (self.translate.y - p.y) / k;
        let (lambda, phi) = self.config.kind.inverse(raw_x, raw_y);
        let (lambda, phi) = self.rotation.inverse(lambda, phi);
        let geo = GeoPoint::from_radians(lambda, phi);
        if geo.is_finite() {
            Ok(geo)
        } else {
            Err(non_invertible)
        }
    }

    /// Project a polyline, inserting points so that the drawn segments stay
    /// within `precision` pixels of the projected great-circle arcs.
    ///
    /// Lines are not clipped at the antimeridian.
    pub fn project_line(&self, line: &[GeoPoint]) -> Vec<Point> {
        let mut out = Vec::with_capacity(line.len());
        let mut prev: Option<Sample> = None;
        for &geo in line {
            let s = self.sample(geo);
            if let Some(p) = &prev {
                self.resample(p, &s, MAX_RESAMPLE_DEPTH, &mut out);
            }
            out.push(s.point);
            prev = Some(s);
        }
        if out.len() > line.len() {
            tracing::trace!(
                input = line.len(),
                output = out.len(),
                "resampled projected line"
            );
        }
        out
    }

    fn project_rotated(&self, lambda: f64, phi: f64) -> Point {
        let (x, y) = self.config.kind.forward(lambda, phi);
        let k = self.config.scale;
        Point::new(self.translate.x + k * x, self.translate.y - k * y)
    }

    fn sample(&self, geo: GeoPoint) -> Sample {
        let (lambda, phi) = geo.to_radians();
        let (lambda, phi) = self.rotation.forward(lambda, phi);
        let cos_phi = phi.cos();
        Sample {
            point: self.project_rotated(lambda, phi),
            lambda,
            a: cos_phi * lambda.cos(),
            b: cos_phi * lambda.sin(),
            c: phi.sin(),
        }
    }

    /// Push the interior points between `s0` and `s1` onto `out`.
    fn resample(&self, s0: &Sample, s1: &Sample, depth: u32, out: &mut Vec<Point>) {
        let d = s1.point - s0.point;
        let d2 = d.hypot2();
        if d2 <= 4.0 * self.delta2 || depth == 0 {
            return;
        }
        let depth = depth - 1;
        let (a, b, c) = (s0.a + s1.a, s0.b + s1.b, s0.c + s1.c);
        let m = (a * a + b * b + c * c).sqrt();
        if m == 0.0 {
            // Antipodal endpoints have no unique midpoint.
            return;
        }
        let c = c / m;
        let phi2 = asin(c);
        let lambda2 = if ((c.abs() - 1.0).abs() < EPSILON) || (s0.lambda - s1.lambda).abs() < EPSILON
        {
            (s0.lambda + s1.lambda) / 2.0
        } else {
            b.atan2(a)
        };
        let mid = Sample {
            point: self.project_rotated(lambda2, phi2),
            lambda: lambda2,
            a: a / m,
            b: b / m,
            c,
        };
        let d_mid = mid.point - s0.point;
        let dz = d.y * d_mid.x - d.x * d_mid.y;
        if dz * dz / d2 > self.delta2
            || ((d.x * d_mid.x + d.y * d_mid.y) / d2 - 0.5).abs() > 0.3
            || s0.a * s1.a + s0.b * s1.b + s0.c * s1.c < COS_MIN_DISTANCE
        {
            self.resample(s0, &mid, depth, out);
            out.push(mid.point);
            self.resample(&mid, s1, depth, out);
        }
    }
}

/// A rotated point with its projection and unit-sphere position.
#[derive(Copy, Clone, Debug)]
struct Sample {
    point: Point,
    lambda: f64,
    a: f64,
    b: f64,
    c: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEW: Size = Size::new(800.0, 600.0);

    fn times() -> Projection {
        Projection::new(&ProjectionConfig::default(), VIEW).unwrap()
    }

    #[test]
    fn translation_includes_offsets() {
        let cfg = ProjectionConfig {
            x_offset: 10.0,
            y_offset: -20.0,
            ..ProjectionConfig::default()
        };
        let p = Projection::new(&cfg, VIEW).unwrap();
        assert_eq!(p.translate(), Point::new(410.0, 280.0));
        assert_eq!(p.forward(GeoPoint::ORIGIN), Point::new(410.0, 280.0));
    }

    #[test]
    fn north_is_up_and_east_is_right() {
        let p = times();
        let ne = p.forward(GeoPoint::new(30.0, 30.0));
        assert!(ne.x > 400.0, "east should be right of center");
        assert!(ne.y < 300.0, "north should be above center");
    }

    #[test]
    fn invalid_viewport_is_rejected() {
        let err = Projection::new(&ProjectionConfig::default(), Size::new(f64::NAN, 10.0));
        assert!(matches!(
            err,
            Err(ProjectionError::InvalidConfig(ConfigIssue::ViewportSize { .. }))
        ));
        let err = Projection::new(
            &ProjectionConfig {
                scale: -1.0,
                ..ProjectionConfig::default()
            },
            VIEW,
        );
        assert_eq!(
            err,
            Err(ProjectionError::InvalidConfig(ConfigIssue::Scale(-1.0)))
        );
    }

    #[test]
    fn non_finite_points_are_not_invertible() {
        let p = times();
        let err = p.inverse(Point::new(f64::INFINITY, 0.0)).unwrap_err();
        assert!(matches!(err, ProjectionError::NonInvertible { .. }));
    }

    #[test]
    fn longitudes_past_the_antimeridian_are_kept() {
        let p = times();
        let x = 400.0 + 160.0 * 200_f64.to_radians() * TIMES_X0;
        let geo = p.inverse(Point::new(x, 300.0)).unwrap();
        assert!((geo.lon - 200.0).abs() < 1e-9, "lon = {}", geo.lon);
    }

    const TIMES_X0: f64 = 0.74482;

    #[test]
    fn rotated_round_trip() {
        let cfg = ProjectionConfig {
            rotation: [-30.0, 20.0, 5.0],
            ..ProjectionConfig::default()
        };
        let p = Projection::new(&cfg, VIEW).unwrap();
        for geo in [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(45.0, 60.0),
            GeoPoint::new(-120.0, -33.0),
        ] {
            let back = p.inverse(p.forward(geo)).unwrap();
            assert!(
                (back.lon - geo.lon).abs() < 1e-6 && (back.lat - geo.lat).abs() < 1e-6,
                "{geo} came back as {back}"
            );
        }
    }

    #[test]
    fn long_segments_are_resampled() {
        let p = times();
        // The great circle bulges poleward of the parallel the endpoints share.
        let line = [GeoPoint::new(-30.0, 60.0), GeoPoint::new(30.0, 60.0)];
        let pts = p.project_line(&line);
        assert!(pts.len() > 2, "a curved arc must be subdivided");
        assert!(pts[pts.len() / 2].y < pts[0].y, "midpoints lie north of the chord");
        assert_eq!(pts[0], p.forward(line[0]));
        assert_eq!(pts[pts.len() - 1], p.forward(line[1]));
    }

    #[test]
    fn short_segments_are_kept() {
        let p = times();
        let line = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.001, 0.0)];
        assert_eq!(p.project_line(&line).len(), 2);
        assert!(p.project_line(&[]).is_empty());
    }

    #[test]
    fn loose_precision_inserts_fewer_points() {
        let line = [GeoPoint::new(-20.0, 10.0), GeoPoint::new(10.0, 50.0)];
        let fine = times().project_line(&line);
        let coarse = Projection::new(
            &ProjectionConfig {
                precision: 50.0,
                ..ProjectionConfig::default()
            },
            VIEW,
        )
        .unwrap()
        .project_line(&line);
        assert!(coarse.len() <= fine.len());
        assert!(fine.len() > 2);
    }

    proptest! {
        #[test]
        fn round_trip_within_precision(lon in -180.0_f64..180.0, lat in -89.0_f64..89.0) {
            let p = times();
            let geo = GeoPoint::new(lon, lat);
            let back = p.inverse(p.forward(geo)).unwrap();
            let tol = p.config().precision;
            prop_assert!((back.lon - lon).abs() < tol && (back.lat - lat).abs() < tol);
            prop_assert!((back.lon - lon).abs() < 1e-9 && (back.lat - lat).abs() < 1e-9);
        }

        #[test]
        fn equirectangular_round_trip(lon in -180.0_f64..180.0, lat in -90.0_f64..90.0) {
            let cfg = ProjectionConfig {
                kind: ProjectionKind::Equirectangular,
                ..ProjectionConfig::default()
            };
            let p = Projection::new(&cfg, VIEW).unwrap();
            let back = p.inverse(p.forward(GeoPoint::new(lon, lat))).unwrap();
            prop_assert!((back.lon - lon).abs() < 1e-9 && (back.lat - lat).abs() < 1e-9);
        }
    }
}
