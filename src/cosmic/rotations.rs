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

//! Rotations between the Earth-fixed frame and the (non rotating) inertial frame.
//!
//! Both frames share the polar axis, so the only rotation needed is about Z by the sidereal angle.

use super::GeographicPoint;
use crate::linalg::Vector3;
use crate::time::Epoch;
use crate::utils::{between_0_tau, r3};

/// Julian date of the J2000 reference epoch (2000 January 1.5)
pub const JD_J2000: f64 = 2_451_545.0;
/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Returns the Greenwich Mean Sidereal Time of the provided epoch, in radians within [0, 2π).
///
/// This is the IAU 1982 polynomial (Vallado, AIAA 2006-6753), with UT1 approximated by UTC.
/// The angle is a pure function of the epoch.
pub fn sidereal_angle(epoch: Epoch) -> f64 {
    let jd_ut1 = epoch.to_jde_utc_days();
    let t_ut1 = (jd_ut1 - JD_J2000) / DAYS_PER_JULIAN_CENTURY;

    // Seconds of time
    let gmst_s = -6.2e-6 * t_ut1.powi(3)
        + 0.093104 * t_ut1.powi(2)
        + (876_600.0 * 3_600.0 + 8_640_184.812_866) * t_ut1
        + 67_310.548_41;

    // One second of time is 1/240 of a degree
    between_0_tau((gmst_s / 240.0).to_radians())
}

/// Unit vector of a geographic point in the Earth-fixed frame.
pub fn geo_to_body_fixed_unit(point: &GeographicPoint) -> Vector3<f64> {
    point.to_unit_vector()
}

/// Rotates an Earth-fixed vector into the inertial frame, i.e. turns it by `+sidereal_angle` about the polar axis.
pub fn body_fixed_to_inertial(v: &Vector3<f64>, sidereal_angle: f64) -> Vector3<f64> {
    r3(-sidereal_angle) * v
}

/// Rotates an inertial vector into the Earth-fixed frame, i.e. turns it by `-sidereal_angle` about the polar axis.
pub fn inertial_to_body_fixed(v: &Vector3<f64>, sidereal_angle: f64) -> Vector3<f64> {
    r3(sidereal_angle) * v
}

/// Geographic point pointed to by the provided vector: latitude is `asin(z/|v|)`, longitude is `atan2(y, x)`.
pub fn vector_to_geo(v: &Vector3<f64>) -> Option<GeographicPoint> {
    GeographicPoint::from_vector(v)
}

/// Sub-point of an inertial vector at the provided epoch.
pub fn inertial_to_geo(v: &Vector3<f64>, epoch: Epoch) -> Option<GeographicPoint> {
    vector_to_geo(&inertial_to_body_fixed(v, sidereal_angle(epoch)))
}
