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

use crate::linalg::Vector3;
use crate::utils::{angle_between, between_pm_180};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// A geographic point on the reference sphere, in degrees.
///
/// Latitude is within [-90, 90] and longitude within (-180, 180]. The constructor enforces both bounds,
/// deserialized points are checked with [`GeographicPoint::is_valid`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeographicPoint {
    /// Latitude in degrees, positive North
    #[serde(rename = "lat")]
    pub latitude_deg: f64,
    /// Longitude in degrees, positive East
    #[serde(rename = "lon")]
    pub longitude_deg: f64,
}

impl GeographicPoint {
    /// Builds a new point, clamping the latitude and wrapping the longitude into their bounds.
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg: latitude_deg.clamp(-90.0, 90.0),
            longitude_deg: between_pm_180(longitude_deg),
        }
    }

    /// Returns whether both coordinates are finite and within their bounds.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude_deg)
            && self.longitude_deg > -180.0
            && self.longitude_deg <= 180.0
    }

    /// Builds the sub-point of the provided vector, i.e. the direction it points to. The magnitude is irrelevant.
    ///
    /// Returns None for a null vector, which has no direction.
    pub fn from_vector(v: &Vector3<f64>) -> Option<Self> {
        let norm = v.norm();
        if norm <= f64::EPSILON || !norm.is_finite() {
            return None;
        }
        let lat = (v.z / norm).clamp(-1.0, 1.0).asin();
        let lon = v.y.atan2(v.x);
        Some(Self::new(lat.to_degrees(), lon.to_degrees()))
    }

    /// Latitude in radians
    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    /// Longitude in radians
    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    /// Unit vector of this point in the frame where it is defined: `(cos(lat)cos(lon), cos(lat)sin(lon), sin(lat))`
    pub fn to_unit_vector(&self) -> Vector3<f64> {
        let (sin_lat, cos_lat) = self.latitude_rad().sin_cos();
        let (sin_lon, cos_lon) = self.longitude_rad().sin_cos();
        Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
    }

    /// Great circle angle between both points, in radians.
    pub fn angular_separation(&self, other: &Self) -> f64 {
        angle_between(&self.to_unit_vector(), &other.to_unit_vector())
    }

    /// Position of this point on a Y-up scene sphere of the given radius.
    ///
    /// The longitude offset aligns the zero meridian with the texture seam of the rendered globe.
    pub fn to_scene_position(&self, radius: f64, lon_offset_rad: f64) -> Vector3<f64> {
        let lat = self.latitude_rad();
        let lon = self.longitude_rad() + lon_offset_rad;
        Vector3::new(
            radius * lat.cos() * lon.sin(),
            radius * lat.sin(),
            radius * lat.cos() * lon.cos(),
        )
    }
}

impl fmt::Display for GeographicPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ns = if self.latitude_deg >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude_deg >= 0.0 { 'E' } else { 'W' };
        match f.precision() {
            Some(p) => write!(
                f,
                "{:.*}°{ns} {:.*}°{ew}",
                p,
                self.latitude_deg.abs(),
                p,
                self.longitude_deg.abs()
            ),
            None => write!(
                f,
                "{:.3}°{ns} {:.3}°{ew}",
                self.latitude_deg.abs(),
                self.longitude_deg.abs()
            ),
        }
    }
}
