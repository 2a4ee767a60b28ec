// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw projections: radians in, unscaled planar units out.
//!
//! Raw planar `y` grows northward; the screen transform flips it.

use core::f64::consts::FRAC_PI_4;

use crate::config::ProjectionKind;

/// A forward/inverse pair between `(lambda, phi)` in radians and raw planar
/// coordinates.
pub trait RawProjection {
    /// Project `(lambda, phi)`.
    fn forward(&self, lambda: f64, phi: f64) -> (f64, f64);

    /// Recover `(lambda, phi)` from raw planar coordinates.
    ///
    /// May return non-finite values where no preimage exists.
    fn inverse(&self, x: f64, y: f64) -> (f64, f64);
}

/// The Times projection (John Muir, 1965).
///
/// Cylindrical with meridians bent toward the poles; the inverse is exact.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Times;

const TIMES_X0: f64 = 0.74482;
const TIMES_X2: f64 = 0.34588;
const TIMES_Y: f64 = 1.70711;

impl RawProjection for Times {
    fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let t = (phi / 2.0).tan();
        let s = (FRAC_PI_4 * t).sin();
        (lambda * (TIMES_X0 - TIMES_X2 * s * s), TIMES_Y * t)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let t = y / TIMES_Y;
        let s = (FRAC_PI_4 * t).sin();
        // The divisor stays within [0.39894, 0.74482].
        (x / (TIMES_X0 - TIMES_X2 * s * s), 2.0 * t.atan())
    }
}

/// Plate carrée.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Equirectangular;

impl RawProjection for Equirectangular {
    fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        (lambda, phi)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        (x, y)
    }
}

impl RawProjection for ProjectionKind {
    fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        match self {
            Self::Times => Times.forward(lambda, phi),
            Self::Equirectangular => Equirectangular.forward(lambda, phi),
        }
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Self::Times => Times.inverse(x, y),
            Self::Equirectangular => Equirectangular.inverse(x, y),
        }
    }
}
