/*
    Orbital Replay, historical mission playback
    Copyright (C) 2022 Christopher Rabotin <christopher.rabotin@gmail.com>

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

use crate::cosmic::{CalibrationError, GeographicPoint};
use crate::io::{ConfigError, ConfigRepr, InvalidConfigSnafu};
use crate::time::{Duration, Epoch};
use serde_derive::Serialize;
use snafu::prelude::*;
use std::fs::File;
use std::path::Path;

mod mission;
pub use mission::*;

pub mod playback;
pub use playback::{PlaybackController, PlaybackError, PlaybackMode, PlaybackSpeed};

pub mod track;
pub use track::{GroundTrack, TrackSample};

mod runtime;
pub use runtime::*;

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum MissionError {
    #[snafu(display(
        "mission timeline must satisfy start <= retrofire <= end with start < end, got {start}, {retrofire}, {end}"
    ))]
    InvalidTimeline {
        start: Epoch,
        retrofire: Epoch,
        end: Epoch,
    },
    #[snafu(display("track sample interval must be strictly positive, got {interval}"))]
    InvalidSampleInterval { interval: Duration },
    #[snafu(display("invalid orbit: {msg}"))]
    InvalidOrbit { msg: String },
    #[snafu(display(
        "{which} point ({}, {}) is outside of [-90, 90] x (-180, 180]",
        point.latitude_deg,
        point.longitude_deg
    ))]
    InvalidPoint {
        which: String,
        point: GeographicPoint,
    },
    #[snafu(display("a mission needs at least one chapter"))]
    NoChapters,
    #[snafu(display("chapter `{key}` starts before the previous chapter"))]
    ChaptersOutOfOrder { key: String },
    #[snafu(display("chapter `{key}` is defined more than once"))]
    DuplicateChapter { key: String },
    #[snafu(display("no chapter `{key}` in this mission"))]
    UnknownChapter { key: String },
    #[snafu(display("mission activation failed: {source}"))]
    Calibration { source: CalibrationError },
    #[snafu(display("playback command rejected: {source}"))]
    Playback { source: PlaybackError },
}

impl MissionDefinition {
    /// Loads a mission from a YAML file and validates it.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mission = Self::load(path)?;
        mission.validate().context(InvalidConfigSnafu)?;
        Ok(mission)
    }
}

/// A handler of the frames of a mission run, e.g. a renderer.
pub trait FrameHdlr {
    fn handle(&mut self, frame: &MissionFrame);
}

#[derive(Serialize)]
struct FrameRow<'a> {
    epoch: String,
    mode: String,
    latitude_deg: Option<f64>,
    longitude_deg: Option<f64>,
    track_samples: usize,
    chapter: Option<&'a str>,
}

/// Writes one CSV row per frame
pub struct FrameCsvOutput {
    csv_out: csv::Writer<File>,
    rows: usize,
}

impl FrameCsvOutput {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, csv::Error> {
        let csv_out = csv::Writer::from_path(path.as_ref())?;
        info!("Saving frames to {}", path.as_ref().display());
        Ok(Self { csv_out, rows: 0 })
    }

    /// Number of rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn flush(&mut self) -> Result<(), csv::Error> {
        self.csv_out.flush()?;
        Ok(())
    }
}

impl FrameHdlr for FrameCsvOutput {
    fn handle(&mut self, frame: &MissionFrame) {
        let row = FrameRow {
            epoch: format!("{}", frame.epoch),
            mode: format!("{}", frame.mode),
            latitude_deg: frame.marker.map(|p| p.latitude_deg),
            longitude_deg: frame.marker.map(|p| p.longitude_deg),
            track_samples: frame.track.len(),
            chapter: frame.chapter.map(|c| c.key.as_str()),
        };
        match self.csv_out.serialize(row) {
            Ok(()) => self.rows += 1,
            Err(e) => error!("could not write frame at {}: {e}", frame.epoch),
        }
    }
}
