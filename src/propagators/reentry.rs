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

use crate::cosmic::GeographicPoint;
use crate::time::{Duration, Epoch};
use std::fmt;

/// Below this separation (radians), the hand-off and landing points are considered identical.
pub const DEGENERATE_ARC_RAD: f64 = 1e-6;

/// Great circle descent from the hand-off point (last orbital point) to the landing point,
/// spread over the window between retrofire and the end of the mission.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReentryArc {
    pub retrofire: Epoch,
    pub end: Epoch,
    pub hand_off: GeographicPoint,
    pub landing: GeographicPoint,
}

impl ReentryArc {
    pub fn new(
        retrofire: Epoch,
        end: Epoch,
        hand_off: GeographicPoint,
        landing: GeographicPoint,
    ) -> Self {
        Self {
            retrofire,
            end,
            hand_off,
            landing,
        }
    }

    /// Normalized progress along the arc, clamped to [0, 1]. A null descent window is immediately complete.
    pub fn progress(&self, epoch: Epoch) -> f64 {
        let span = self.end - self.retrofire;
        if span <= Duration::ZERO {
            return 1.0;
        }
        ((epoch - self.retrofire).to_seconds() / span.to_seconds()).clamp(0.0, 1.0)
    }

    /// Angle covered by the whole descent, in radians
    pub fn arc_angle_rad(&self) -> f64 {
        self.hand_off.angular_separation(&self.landing)
    }

    /// Point at the provided progress: the hand-off point at 0 and exactly the landing point at 1.
    pub fn interpolate(&self, u: f64) -> GeographicPoint {
        if u <= 0.0 {
            return self.hand_off;
        } else if u >= 1.0 {
            return self.landing;
        }

        let theta = self.arc_angle_rad();
        if theta < DEGENERATE_ARC_RAD {
            return self.hand_off;
        }

        let a = self.hand_off.to_unit_vector();
        let b = self.landing.to_unit_vector();
        let sin_theta = theta.sin();
        let v = ((1.0 - u) * theta).sin() / sin_theta * a + (u * theta).sin() / sin_theta * b;

        GeographicPoint::from_vector(&v).unwrap_or(self.hand_off)
    }

    /// Point at the provided epoch, or None before retrofire. Past the end, the landing point is returned.
    pub fn at(&self, epoch: Epoch) -> Option<GeographicPoint> {
        if epoch < self.retrofire {
            return None;
        }
        Some(self.interpolate(self.progress(epoch)))
    }
}

impl fmt::Display for ReentryArc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "re-entry from {} at {} to {} at {} ({:.3} deg)",
            self.hand_off,
            self.retrofire,
            self.landing,
            self.end,
            self.arc_angle_rad().to_degrees()
        )
    }
}
