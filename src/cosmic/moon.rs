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

//! Illustrative Earth-Moon scene placement. This is not an ephemeris: the Moon moves on a circle at the sidereal month rate.

use super::rotations::sidereal_angle;
use super::SIDEREAL_MONTH_DAYS;
use crate::linalg::Vector3;
use crate::time::{Epoch, Unit, UNIX_REF_EPOCH};
use crate::utils::between_0_tau;
use std::f64::consts::TAU;

/// Angle of the Moon on its illustrative circle, in radians within [0, 2π), counted from the Unix epoch.
pub fn moon_phase_angle(epoch: Epoch) -> f64 {
    let days = (epoch - UNIX_REF_EPOCH).to_unit(Unit::Day);
    between_0_tau(days * TAU / SIDEREAL_MONTH_DAYS)
}

/// Position of the Moon in a Y-up scene, on the horizontal circle of the provided radius.
pub fn moon_scene_position(epoch: Epoch, distance: f64) -> Vector3<f64> {
    let (sin_ang, cos_ang) = moon_phase_angle(epoch).sin_cos();
    Vector3::new(cos_ang * distance, 0.0, sin_ang * distance)
}

/// Spin of the Earth mesh about the scene's vertical axis: the globe turns by `-GMST`.
pub fn earth_scene_spin(epoch: Epoch) -> f64 {
    -sidereal_angle(epoch)
}
