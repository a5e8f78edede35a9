/*
    Orbital Replay, historical mission playback
    Copyright (C) 2023 Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use crate::cosmic::rotations::{inertial_to_body_fixed, sidereal_angle};
use crate::cosmic::{GeographicPoint, OrbitalPlane};
use crate::linalg::Vector3;
use crate::time::{Duration, Epoch};
use std::f64::consts::TAU;
use std::fmt;

/// Two-body propagator of the sub-satellite point on a calibrated orbital plane.
///
/// The mean anomaly is used as the true anomaly. This only holds for a single, low eccentricity pass
/// without perturbations: use a Kepler equation solver before extending this to several orbits.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KeplerPropagator {
    /// Epoch of zero anomaly, where the orbit passes over the calibration point
    pub epoch: Epoch,
    /// Propagation is only defined strictly before this duration past the epoch
    pub window: Duration,
    pub plane: OrbitalPlane,
    /// Semi-major axis in km
    pub sma_km: f64,
    pub ecc: f64,
    /// Mean motion in radians per second
    pub mean_motion: f64,
}

impl KeplerPropagator {
    /// Initializes the propagator from the periapsis and apoapsis radii (km, from the body center) and the orbital period.
    pub fn new(
        epoch: Epoch,
        window: Duration,
        plane: OrbitalPlane,
        rp_km: f64,
        ra_km: f64,
        period: Duration,
    ) -> Self {
        Self {
            epoch,
            window,
            plane,
            sma_km: (rp_km + ra_km) / 2.0,
            ecc: (ra_km - rp_km) / (ra_km + rp_km),
            mean_motion: TAU / period.to_seconds(),
        }
    }

    /// Semi parameter (semi latus rectum) in km
    pub fn semi_parameter_km(&self) -> f64 {
        self.sma_km * (1.0 - self.ecc.powi(2))
    }

    /// Anomaly `(n t) mod 2π` for a time past the epoch, in seconds
    pub fn anomaly_rad(&self, elapsed_s: f64) -> f64 {
        (self.mean_motion * elapsed_s) % TAU
    }

    /// Orbital radius in km at the provided anomaly
    pub fn radius_km(&self, anomaly_rad: f64) -> f64 {
        self.semi_parameter_km() / (1.0 + self.ecc * anomaly_rad.cos())
    }

    /// Inertial position in km, or None outside of the propagation window.
    ///
    /// Each call is computed from the absolute elapsed time since the epoch, so repeated calls never accumulate error.
    pub fn position_km(&self, epoch: Epoch) -> Option<Vector3<f64>> {
        let elapsed = epoch - self.epoch;
        if elapsed < Duration::ZERO || elapsed >= self.window {
            return None;
        }
        let nu = self.anomaly_rad(elapsed.to_seconds());
        Some(self.plane.position(self.radius_km(nu), nu))
    }

    /// Sub-satellite point at the provided epoch, or None outside of the propagation window.
    pub fn subpoint(&self, epoch: Epoch) -> Option<GeographicPoint> {
        let r_inertial = self.position_km(epoch)?;
        let r_body_fixed = inertial_to_body_fixed(&r_inertial, sidereal_angle(epoch));
        GeographicPoint::from_vector(&r_body_fixed)
    }
}

impl fmt::Display for KeplerPropagator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Kepler propagator from {} for {} (sma = {:.3} km, ecc = {:.6}, n = {:.6e} rad/s, {})",
            self.epoch, self.window, self.sma_km, self.ecc, self.mean_motion, self.plane
        )
    }
}
