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

use std::fmt;

// Re-Export
mod kepler;
pub use kepler::*;
mod reentry;
pub use reentry::*;

use crate::cosmic::{CalibrationError, GeographicPoint, OrbitalPlane};
use crate::md::MissionDefinition;
use crate::time::{Duration, Epoch};

/// The hand-off point is the orbital sub-point this long before retrofire.
pub const HAND_OFF_LEAD: Duration = Duration::from_parts(0, 1_000_000_000);

/// Flight phase of a mission at a given epoch
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlightPhase {
    /// Propagated orbit, from the start until retrofire
    Orbit,
    /// Interpolated descent, from retrofire until the end
    Descent,
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Orbit => write!(f, "orbit"),
            Self::Descent => write!(f, "descent"),
        }
    }
}

/// Ground track model of a whole mission: the calibrated orbit until retrofire, and the re-entry arc afterwards.
///
/// Built once per mission run and never mutated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GroundTrackModel {
    pub start: Epoch,
    pub end: Epoch,
    pub orbit: KeplerPropagator,
    pub reentry: ReentryArc,
}

impl GroundTrackModel {
    /// Calibrates the orbit of this mission on its launch point and builds the descent arc.
    pub fn from_mission(mission: &MissionDefinition) -> Result<Self, CalibrationError> {
        let plane = OrbitalPlane::calibrate(
            mission.start,
            mission.orbit.inclination_rad(),
            &mission.launch,
        )?;

        let orbit = KeplerPropagator::new(
            mission.start,
            mission.retrofire - mission.start,
            plane,
            mission.orbit.perigee_radius_km(),
            mission.orbit.apogee_radius_km(),
            mission.orbit.period,
        );

        // Without any orbital point before retrofire, the descent collapses onto the landing point.
        let hand_off = orbit
            .subpoint(mission.retrofire - HAND_OFF_LEAD)
            .unwrap_or(mission.landing);

        let reentry = ReentryArc::new(mission.retrofire, mission.end, hand_off, mission.landing);

        debug!("{}: {orbit}", mission.id);
        debug!("{}: {reentry}", mission.id);

        Ok(Self {
            start: mission.start,
            end: mission.end,
            orbit,
            reentry,
        })
    }

    /// Phase of flight at this epoch, None before the start of the mission.
    pub fn phase(&self, epoch: Epoch) -> Option<FlightPhase> {
        if epoch < self.start {
            None
        } else if epoch < self.reentry.retrofire {
            Some(FlightPhase::Orbit)
        } else {
            Some(FlightPhase::Descent)
        }
    }

    /// Sub-point of the spacecraft at this epoch.
    ///
    /// Returns None before the start of the mission. Epochs past the end of the mission yield the landing point.
    pub fn subpoint(&self, epoch: Epoch) -> Option<GeographicPoint> {
        match self.phase(epoch)? {
            FlightPhase::Orbit => self.orbit.subpoint(epoch),
            FlightPhase::Descent => self.reentry.at(epoch),
        }
    }

    /// Duration of the whole mission
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns whether this epoch is within the mission bounds (inclusive)
    pub fn contains(&self, epoch: Epoch) -> bool {
        epoch >= self.start && epoch <= self.end
    }

    /// Sub-points every `step` from the start of the mission until the end, both included.
    pub fn every(&self, step: Duration) -> Vec<(Epoch, GeographicPoint)> {
        if step <= Duration::ZERO {
            return Vec::new();
        }
        crate::time::TimeSeries::inclusive(self.start, self.end, step)
            .filter_map(|epoch| self.subpoint(epoch).map(|pt| (epoch, pt)))
            .collect()
    }
}
