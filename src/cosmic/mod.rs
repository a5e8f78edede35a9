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

use snafu::Snafu;

// Re-Export geographic points
mod geo;
pub use self::geo::*;

/// Frame transformations between the Earth-fixed frame and the inertial frame.
pub mod rotations;
pub use self::rotations::{
    body_fixed_to_inertial, geo_to_body_fixed_unit, inertial_to_body_fixed, sidereal_angle,
    vector_to_geo,
};

// Re-Export the orbital plane
mod plane;
pub use self::plane::*;

/// The illustrative Moon of the Earth-Moon scene.
pub mod moon;

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CalibrationError {
    #[snafu(display(
        "cannot calibrate an orbital plane with an inclination of {inclination_deg} deg: the node is undefined"
    ))]
    InvalidInclination { inclination_deg: f64 },
}

/// Equatorial radius of the Earth in kilometers, WGS-84
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6_378.137;

/// Sidereal month, in days
pub const SIDEREAL_MONTH_DAYS: f64 = 27.321_661;
