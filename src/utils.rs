/*
    Orbital Replay, historical mission playback
    Copyright (C) 2021 Christopher Rabotin <christopher.rabotin@gmail.com>

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

use crate::linalg::{Matrix3, Vector3};
use std::f64::consts::TAU;

/// Returns the DCM of a rotation of the frame about the Z axis by `angle` radians.
///
/// Multiplying a vector by this matrix expresses it in the rotated frame, i.e. the vector itself turns by `-angle`.
pub fn r3(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

/// Returns the provided angle bounded between 0.0 and 360.0
pub fn between_0_360(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Returns the provided angle bounded in the half open interval (-180.0, 180.0]
pub fn between_pm_180(angle: f64) -> f64 {
    let bounded = between_0_360(angle);
    if bounded > 180.0 {
        bounded - 360.0
    } else {
        bounded
    }
}

/// Returns the provided angle (in radians) bounded between 0.0 and 2π
pub fn between_0_tau(angle: f64) -> f64 {
    let bounded = angle.rem_euclid(TAU);
    // rem_euclid may round up to exactly TAU for tiny negative inputs
    if bounded >= TAU {
        0.0
    } else {
        bounded
    }
}

/// Returns the angle between both vectors, in radians within [0, π]. Accurate for nearly aligned vectors too.
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}
