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

use super::rotations::{body_fixed_to_inertial, sidereal_angle};
use super::{CalibrationError, GeographicPoint};
use crate::linalg::Vector3;
use crate::time::Epoch;
use crate::utils::angle_between;
use std::fmt;

/// Below this value of |sin(inc)|, the orbit is considered equatorial and the node undefined.
const EQUATORIAL_TOLERANCE: f64 = 1e-12;

/// An orbital plane in the inertial frame, described by its perifocal-like basis.
///
/// `p` is the direction of zero true anomaly, `q` completes the in-plane basis in the direction of motion,
/// and `w` is the plane normal (angular momentum direction). The basis is right handed and orthonormal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OrbitalPlane {
    pub p: Vector3<f64>,
    pub q: Vector3<f64>,
    pub w: Vector3<f64>,
    /// Right ascension of the ascending node, in radians
    pub raan_rad: f64,
}

impl OrbitalPlane {
    /// Calibrates the orbital plane so that it contains the sub-point `launch` at the `epoch` and has the requested inclination.
    ///
    /// With `w = (sin i cos Ω, sin i sin Ω, cos i)` and the inertial launch direction `(x, y, z)`, requiring `w · r = 0`
    /// gives `A cos(Ω - φ) = -z cot i` where `A = hypot(x, y)` and `φ = atan2(y, x)`. This has two solutions; the
    /// `Ω = φ + acos(u)` branch is always used. That choice is a modeling heuristic, not a prograde/retrograde derivation.
    ///
    /// If the launch latitude exceeds what the inclination can reach, `u` is clamped, the warning is logged, and the normal
    /// is rebuilt from the in-plane vectors so that the basis remains orthonormal (the achieved inclination then differs).
    pub fn calibrate(
        epoch: Epoch,
        inclination_rad: f64,
        launch: &GeographicPoint,
    ) -> Result<Self, CalibrationError> {
        let (sin_inc, cos_inc) = inclination_rad.sin_cos();
        if !inclination_rad.is_finite()
            || !(0.0..=std::f64::consts::PI).contains(&inclination_rad)
            || sin_inc.abs() < EQUATORIAL_TOLERANCE
        {
            return Err(CalibrationError::InvalidInclination {
                inclination_deg: inclination_rad.to_degrees(),
            });
        }

        let r = body_fixed_to_inertial(&launch.to_unit_vector(), sidereal_angle(epoch)).normalize();

        let rhs = -(cos_inc / sin_inc) * r.z;
        let a = r.x.hypot(r.y);
        let phi = r.y.atan2(r.x);

        let u_raw = rhs / if a == 0.0 { 1e-9 } else { a };
        let u = u_raw.clamp(-1.0, 1.0);
        if u != u_raw {
            warn!(
                "launch latitude {:.3} deg is not reachable with an inclination of {:.3} deg: node is approximated",
                launch.latitude_deg,
                inclination_rad.to_degrees()
            );
        }

        let raan_rad = phi + u.acos();
        let (sin_raan, cos_raan) = raan_rad.sin_cos();

        let w = Vector3::new(sin_inc * cos_raan, sin_inc * sin_raan, cos_inc).normalize();
        let p = r;
        let q = w.cross(&p).normalize();
        // Only differs from w when the node was approximated
        let w = p.cross(&q).normalize();

        let me = Self { p, q, w, raan_rad };
        debug!("calibrated {me} at {epoch} on launch point {launch}");
        Ok(me)
    }

    /// Inclination of this plane with respect to the polar axis, in radians
    pub fn inclination_rad(&self) -> f64 {
        angle_between(&self.w, &Vector3::z())
    }

    /// Position in the plane of the provided radius (km) and true anomaly (radians), in the inertial frame
    pub fn position(&self, radius_km: f64, true_anomaly_rad: f64) -> Vector3<f64> {
        let (sin_nu, cos_nu) = true_anomaly_rad.sin_cos();
        radius_km * cos_nu * self.p + radius_km * sin_nu * self.q
    }
}

impl fmt::Display for OrbitalPlane {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "orbital plane (inc = {:.3} deg, raan = {:.3} deg)",
            self.inclination_rad().to_degrees(),
            crate::utils::between_0_360(self.raan_rad.to_degrees())
        )
    }
}
