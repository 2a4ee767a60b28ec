// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Three-axis rotation of the globe.
//!
//! Angles follow the usual web-mapping convention: `lambda` spins the globe
//! around the polar axis (a longitude shift), then `phi` and `gamma` tilt it.
//! The longitude step wraps into `[-pi, pi]`. The identity rotation is
//! special-cased to leave coordinates untouched, unlike d3's, so longitudes
//! past the antimeridian stay put and a viewport extending beyond 180 keeps
//! a contiguous extent.

use core::f64::consts::{PI, TAU};

/// A precomputed rotation in radians.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rotation {
    delta_lambda: f64,
    tilt: Option<Tilt>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Tilt {
    cos_phi: f64,
    sin_phi: f64,
    cos_gamma: f64,
    sin_gamma: f64,
}

impl Rotation {
    /// The rotation that changes nothing.
    pub const IDENTITY: Self = Self {
        delta_lambda: 0.0,
        tilt: None,
    };

    /// Build a rotation from `[lambda, phi, gamma]` in degrees.
    pub fn from_degrees(angles: [f64; 3]) -> Self {
        let delta_lambda = angles[0].to_radians() % TAU;
        let (phi, gamma) = (angles[1].to_radians(), angles[2].to_radians());
        let tilt = (phi != 0.0 || gamma != 0.0).then(|| Tilt {
            cos_phi: phi.cos(),
            sin_phi: phi.sin(),
            cos_gamma: gamma.cos(),
            sin_gamma: gamma.sin(),
        });
        Self { delta_lambda, tilt }
    }

    /// Whether this rotation leaves every point in place.
    pub fn is_identity(&self) -> bool {
        self.delta_lambda == 0.0 && self.tilt.is_none()
    }

    /// Rotate `(lambda, phi)` in radians.
    pub fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let (mut lambda, mut phi) = (lambda, phi);
        if self.delta_lambda != 0.0 {
            lambda = wrap(lambda + self.delta_lambda);
        }
        if let Some(t) = &self.tilt {
            (lambda, phi) = t.forward(lambda, phi);
        }
        (lambda, phi)
    }

    /// Undo [`forward`](Self::forward).
    pub fn inverse(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let (mut lambda, mut phi) = (lambda, phi);
        if let Some(t) = &self.tilt {
            (lambda, phi) = t.inverse(lambda, phi);
        }
        if self.delta_lambda != 0.0 {
            lambda = wrap(lambda - self.delta_lambda);
        }
        (lambda, phi)
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Tilt {
    fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let cos_p = phi.cos();
        let x = lambda.cos() * cos_p;
        let y = lambda.sin() * cos_p;
        let z = phi.sin();
        let k = z * self.cos_phi + x * self.sin_phi;
        (
            (y * self.cos_gamma - k * self.sin_gamma).atan2(x * self.cos_phi - z * self.sin_phi),
            asin(k * self.cos_gamma + y * self.sin_gamma),
        )
    }

    fn inverse(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let cos_p = phi.cos();
        let x = lambda.cos() * cos_p;
        let y = lambda.sin() * cos_p;
        let z = phi.sin();
        let k = z * self.cos_gamma - y * self.sin_gamma;
        (
            (y * self.cos_gamma + z * self.sin_gamma).atan2(x * self.cos_phi + k * self.sin_phi),
            asin(k * self.cos_phi - x * self.sin_phi),
        )
    }
}

/// Wrap an angle into `[-pi, pi]`.
fn wrap(lambda: f64) -> f64 {
    if lambda.abs() > PI {
        lambda - (lambda / TAU).round() * TAU
    } else {
        lambda
    }
}

/// `asin` clamped against rounding just outside `[-1, 1]`.
pub(crate) fn asin(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).asin()
}
