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

use super::playback::{PlaybackController, PlaybackMode, PlaybackSpeed};
use super::track::{GroundTrack, TrackSample};
use super::{CalibrationSnafu, Chapter, MissionDefinition, MissionError, PlaybackSnafu};
use crate::cosmic::GeographicPoint;
use crate::propagators::{FlightPhase, GroundTrackModel};
use crate::time::{Duration, Epoch};
use snafu::ResultExt;
use std::fmt;
use std::sync::Arc;

/// The simulated clock shared with the user interface.
///
/// Setting the clock is expected to notify whoever displays it.
pub trait SimClock {
    fn get(&self) -> Epoch;
    fn set(&mut self, epoch: Epoch);
}

/// A clock which only changes when told to, and counts how many times it was set.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ManualClock {
    current: Epoch,
    changes: usize,
}

impl ManualClock {
    pub fn new(epoch: Epoch) -> Self {
        Self {
            current: epoch,
            changes: 0,
        }
    }

    /// Number of times this clock was set
    pub fn changes(&self) -> usize {
        self.changes
    }
}

impl SimClock for ManualClock {
    fn get(&self) -> Epoch {
        self.current
    }

    fn set(&mut self, epoch: Epoch) {
        self.current = epoch;
        self.changes += 1;
    }
}

/// What the rendering and user interface layers need to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct MissionFrame<'a> {
    pub epoch: Epoch,
    pub mode: PlaybackMode,
    pub phase: Option<FlightPhase>,
    /// Continuous position of the spacecraft
    pub marker: Option<GeographicPoint>,
    /// Retained samples of the ground track polyline
    pub track: &'a [TrackSample],
    pub chapter: Option<&'a Chapter>,
    pub speed_label: String,
}

impl<'a> MissionFrame<'a> {
    /// Subtitle of the active chapter, empty if the mission has none
    pub fn subtitle(&self) -> &str {
        self.chapter.map(|c| c.subtitle.as_str()).unwrap_or("")
    }
}

impl<'a> fmt::Display for MissionFrame<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]", self.epoch, self.mode)?;
        if let Some(marker) = self.marker {
            write!(f, " {marker}")?;
        }
        write!(f, " ({} track samples) {}", self.track.len(), self.subtitle())
    }
}

/// A run of a mission: owns the playback state, the ground track, and the calibrated model.
///
/// The user interface calls the command methods, and the frame loop calls `tick` once per frame.
#[derive(Clone, Debug)]
pub struct MissionRun {
    mission: Arc<MissionDefinition>,
    model: GroundTrackModel,
    playback: PlaybackController,
    track: GroundTrack,
}

impl MissionRun {
    /// Validates the mission and calibrates its orbit. Nothing is built if either fails.
    pub fn new(mission: Arc<MissionDefinition>) -> Result<Self, MissionError> {
        mission.validate()?;
        let model = GroundTrackModel::from_mission(&mission).context(CalibrationSnafu)?;

        Ok(Self {
            playback: PlaybackController::new(mission.start, mission.end),
            track: GroundTrack::new(mission.track.sample_interval),
            model,
            mission,
        })
    }

    pub fn mission(&self) -> &MissionDefinition {
        &self.mission
    }

    pub fn model(&self) -> &GroundTrackModel {
        &self.model
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn track(&self) -> &GroundTrack {
        &self.track
    }

    pub fn mode(&self) -> PlaybackMode {
        self.playback.mode()
    }

    pub fn is_active(&self) -> bool {
        self.playback.is_active()
    }

    /// Activates the mission: stopped at its start, with a fresh track.
    pub fn activate<C: SimClock + ?Sized>(&mut self, clock: &mut C) {
        self.playback.activate();
        self.reset_track_to(self.mission.start);
        clock.set(self.playback.current());
        info!(
            "{} activated, calibrated on {}",
            self.mission.name, self.mission.launch
        );
    }

    /// Deactivates the mission and drops its track.
    pub fn clear(&mut self) {
        self.playback.deactivate();
        self.track.clear();
        info!("{} cleared", self.mission.name);
    }

    /// Plays at the normal rate
    pub fn play(&mut self) -> Result<(), MissionError> {
        self.playback.play_normal().context(PlaybackSnafu)
    }

    /// Plays at a custom rate (simulated time per real time)
    pub fn play_at(&mut self, rate: f64) -> Result<(), MissionError> {
        self.playback
            .play(PlaybackSpeed::Custom { rate })
            .context(PlaybackSnafu)
    }

    /// Plays the whole mission in the provided wall clock duration
    pub fn fast_forward(&mut self, target: Duration) -> Result<(), MissionError> {
        self.playback.fast_forward(target).context(PlaybackSnafu)
    }

    /// Play/pause
    pub fn toggle(&mut self) -> Result<(), MissionError> {
        self.playback.toggle().context(PlaybackSnafu)
    }

    pub fn stop(&mut self) {
        self.playback.stop();
    }

    /// Stops and goes back to the start of the mission, rebuilding the track.
    pub fn restart<C: SimClock + ?Sized>(&mut self, clock: &mut C) {
        self.playback.restart();
        self.reset_track_to(self.mission.start);
        clock.set(self.playback.current());
        info!("{} restarted", self.mission.name);
    }

    /// Stops and goes to the chapter with this key, rebuilding the track up to it.
    pub fn seek_chapter<C: SimClock + ?Sized>(
        &mut self,
        key: &str,
        clock: &mut C,
    ) -> Result<(), MissionError> {
        let epoch = self.mission.chapter(key)?.epoch;
        self.playback.jump_to(epoch);
        self.reset_track_to(epoch);
        clock.set(epoch);
        info!("{}: seeked to chapter `{key}` at {epoch}", self.mission.name);
        Ok(())
    }

    /// Stops and moves to an arbitrary epoch (e.g. "now"), rebuilding the track up to it.
    ///
    /// Epochs outside of the mission only move the clock: the mission time is held where it was.
    pub fn jump_to<C: SimClock + ?Sized>(&mut self, epoch: Epoch, clock: &mut C) {
        if self.is_active() {
            if self.model.contains(epoch) {
                self.playback.jump_to(epoch);
                self.reset_track_to(epoch);
            } else {
                debug!("{epoch} is outside of {}, holding mission time", self.mission.name);
                self.playback.stop();
            }
        }
        clock.set(epoch);
    }

    /// Advances the simulated time for this frame, then updates the marker and the track at the new epoch.
    ///
    /// `now` is a monotonic wall clock timestamp. If the clock was changed since the previous frame,
    /// the change is applied as a jump (which stops the playback). A clock moved outside of the mission
    /// is left alone until the playback moves the mission time again. Returns None if the mission is not active.
    pub fn tick<C: SimClock + ?Sized>(
        &mut self,
        now: Duration,
        clock: &mut C,
    ) -> Option<MissionFrame<'_>> {
        if !self.is_active() {
            return None;
        }

        let external = clock.get();
        if external != self.playback.current() && self.model.contains(external) {
            debug!("clock changed externally to {external}");
            self.jump_to(external, clock);
        }

        let before = self.playback.current();
        let epoch = self.playback.advance(now);
        if epoch != before {
            clock.set(epoch);
        }

        self.update_at(epoch, false);
        self.frame()
    }

    /// The frame at the current simulated time, without advancing it. None if the mission is not active.
    pub fn frame(&self) -> Option<MissionFrame<'_>> {
        if !self.is_active() {
            return None;
        }
        let epoch = self.playback.current();
        Some(MissionFrame {
            epoch,
            mode: self.playback.mode(),
            phase: self.model.phase(epoch),
            marker: self.track.marker(),
            track: self.track.samples(),
            chapter: self.mission.active_chapter(epoch),
            speed_label: self.playback.speed_label(),
        })
    }

    /// Moves the marker at this epoch and samples the track if due. Epochs outside of the mission are ignored.
    fn update_at(&mut self, epoch: Epoch, force: bool) {
        if !self.is_active() || !self.model.contains(epoch) {
            return;
        }

        if matches!(self.track.last_sample_epoch(), Some(last) if epoch < last) {
            self.reset_track_to(epoch);
            return;
        }

        if let Some(point) = self.model.subpoint(epoch) {
            self.track.sample_if_due(epoch, point, force);
        }
    }

    /// Rebuilds the track up to this epoch and forces a sample on it.
    fn reset_track_to(&mut self, epoch: Epoch) {
        let model = &self.model;
        self.track
            .rebuild_up_to(model.start, model.end, epoch, |e| model.subpoint(e));
        self.update_at(epoch, true);
    }
}

impl fmt::Display for MissionRun {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} [{}] @ {} ({} track samples)",
            self.mission.name,
            self.playback.mode(),
            self.playback.current(),
            self.track.len()
        )
    }
}
