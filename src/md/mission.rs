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

use super::MissionError;
use crate::cosmic::{GeographicPoint, EARTH_EQUATORIAL_RADIUS_KM};
use crate::io::{duration_from_str, duration_to_str, epoch_from_str, epoch_to_str, ConfigRepr};
use crate::time::{Duration, Epoch, Unit};
use serde_derive::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use typed_builder::TypedBuilder;

/// Orbital parameters of a mission, as published.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct OrbitSpec {
    /// Perigee altitude above the reference body radius, in km
    pub perigee_altitude_km: f64,
    /// Apogee altitude above the reference body radius, in km
    pub apogee_altitude_km: f64,
    /// Inclination in degrees
    pub inclination_deg: f64,
    #[serde(
        serialize_with = "duration_to_str",
        deserialize_with = "duration_from_str"
    )]
    pub period: Duration,
    /// Radius of the reference body in km
    #[builder(default = EARTH_EQUATORIAL_RADIUS_KM)]
    #[serde(default = "default_body_radius_km")]
    pub body_radius_km: f64,
}

fn default_body_radius_km() -> f64 {
    EARTH_EQUATORIAL_RADIUS_KM
}

impl OrbitSpec {
    pub fn perigee_radius_km(&self) -> f64 {
        self.body_radius_km + self.perigee_altitude_km
    }

    pub fn apogee_radius_km(&self) -> f64 {
        self.body_radius_km + self.apogee_altitude_km
    }

    pub fn inclination_rad(&self) -> f64 {
        self.inclination_deg.to_radians()
    }
}

/// How the ground track is sampled
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct TrackSpec {
    /// Minimum simulated time between two retained track samples
    #[serde(
        serialize_with = "duration_to_str",
        deserialize_with = "duration_from_str"
    )]
    pub sample_interval: Duration,
}

impl Default for TrackSpec {
    fn default() -> Self {
        Self {
            sample_interval: 10 * Unit::Second,
        }
    }
}

/// A named checkpoint of a mission, used for seeking and for the subtitles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Unique key used to seek to this chapter
    pub key: String,
    /// Short label, e.g. for a button
    pub label: String,
    #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
    pub epoch: Epoch,
    /// Descriptive text shown while this chapter is active
    pub subtitle: String,
}

impl Chapter {
    pub fn new(key: &str, label: &str, epoch: Epoch, subtitle: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            epoch,
            subtitle: subtitle.to_string(),
        }
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {} @ {}", self.key, self.label, self.epoch)
    }
}

/// Immutable definition of a historical mission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct MissionDefinition {
    #[builder(setter(into))]
    pub id: String,
    #[builder(setter(into))]
    pub name: String,
    #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
    pub start: Epoch,
    #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
    pub end: Epoch,
    /// Start of the descent phase: the orbit is propagated before it, and interpolated after it.
    #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
    pub retrofire: Epoch,
    pub launch: GeographicPoint,
    pub landing: GeographicPoint,
    pub orbit: OrbitSpec,
    #[builder(default)]
    #[serde(default)]
    pub track: TrackSpec,
    /// Chapters, in chronological order
    #[builder(default)]
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl MissionDefinition {
    /// Vostok 1, April 12th 1961, as published (the retrofire time is approximate).
    pub fn vostok1() -> Self {
        let at = |h: u8, m: u8| Epoch::from_gregorian_utc_hms(1961, 4, 12, h, m, 0);

        Self {
            id: "vostok1".to_string(),
            name: "Vostok 1".to_string(),
            start: at(6, 7),
            end: at(7, 55),
            retrofire: at(7, 25),
            // Baikonur
            launch: GeographicPoint::new(45.964, 63.305),
            // Near Saratov
            landing: GeographicPoint::new(51.27, 45.99),
            orbit: OrbitSpec {
                perigee_altitude_km: 169.0,
                apogee_altitude_km: 315.0,
                inclination_deg: 64.95,
                // 89.1 min
                period: 5_346 * Unit::Second,
                body_radius_km: EARTH_EQUATORIAL_RADIUS_KM,
            },
            track: TrackSpec::default(),
            chapters: vec![
                Chapter::new("launch", "Launch", at(6, 7), "Launch (06:07 UTC) from Baikonur"),
                Chapter::new("orbitin", "Orbit insertion", at(6, 17), "Orbit insertion (~06:17 UTC)"),
                Chapter::new("orbit", "In orbit", at(6, 45), "Orbital phase"),
                Chapter::new("retro", "Retrofire", at(7, 25), "Retrofire (~07:25 UTC)"),
                Chapter::new("reentry", "Re-entry", at(7, 35), "Re-entry (~07:35 UTC)"),
                Chapter::new("land", "Landing", at(7, 55), "Landing (~07:55 UTC) near Saratov"),
            ],
        }
    }

    /// Duration of the whole mission
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks the invariants of this definition.
    pub fn validate(&self) -> Result<(), MissionError> {
        if !(self.start < self.end && self.start <= self.retrofire && self.retrofire <= self.end) {
            return Err(MissionError::InvalidTimeline {
                start: self.start,
                retrofire: self.retrofire,
                end: self.end,
            });
        }

        if self.track.sample_interval <= Duration::ZERO {
            return Err(MissionError::InvalidSampleInterval {
                interval: self.track.sample_interval,
            });
        }

        for (which, point) in [("launch", &self.launch), ("landing", &self.landing)] {
            if !point.is_valid() {
                return Err(MissionError::InvalidPoint {
                    which: which.to_string(),
                    point: *point,
                });
            }
        }

        let orbit = &self.orbit;
        if !(orbit.perigee_altitude_km.is_finite()
            && orbit.apogee_altitude_km.is_finite()
            && orbit.inclination_deg.is_finite())
            || orbit.body_radius_km <= 0.0
            || orbit.perigee_radius_km() <= 0.0
            || orbit.perigee_altitude_km > orbit.apogee_altitude_km
            || orbit.period <= Duration::ZERO
        {
            return Err(MissionError::InvalidOrbit {
                msg: format!("{orbit:?}"),
            });
        }

        if self.chapters.is_empty() {
            return Err(MissionError::NoChapters);
        }

        let mut keys = HashSet::new();
        for (i, chapter) in self.chapters.iter().enumerate() {
            if !keys.insert(chapter.key.as_str()) {
                return Err(MissionError::DuplicateChapter {
                    key: chapter.key.clone(),
                });
            }
            if i > 0 && chapter.epoch < self.chapters[i - 1].epoch {
                return Err(MissionError::ChaptersOutOfOrder {
                    key: chapter.key.clone(),
                });
            }
        }

        Ok(())
    }

    /// Returns the chapter with this key
    pub fn chapter(&self, key: &str) -> Result<&Chapter, MissionError> {
        self.chapters
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| MissionError::UnknownChapter {
                key: key.to_string(),
            })
    }

    /// The active chapter at this epoch: the last one which has started, or the first chapter if none has started yet.
    pub fn active_chapter(&self, epoch: Epoch) -> Option<&Chapter> {
        self.chapters
            .iter()
            .take_while(|c| c.epoch <= epoch)
            .last()
            .or_else(|| self.chapters.first())
    }
}

impl ConfigRepr for MissionDefinition {}

impl fmt::Display for MissionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} -> {} (retrofire {}), {} chapters",
            self.name,
            self.id,
            self.start,
            self.end,
            self.retrofire,
            self.chapters.len()
        )
    }
}
