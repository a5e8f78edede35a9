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

use crate::time::{Duration, Epoch, Unit};
use snafu::prelude::*;
use std::fmt;

/// Rate of the "normal" playback, in simulated milliseconds per real millisecond
pub const NORMAL_RATE: f64 = 60.0;

/// Default wall clock duration of a fast forward of the whole mission
pub const FAST_FORWARD_TARGET: Duration = Duration::from_parts(0, 10_000_000_000);

#[derive(Copy, Clone, Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PlaybackError {
    #[snafu(display("no mission is active"))]
    Inactive,
    #[snafu(display("playback rate must be finite and strictly positive, got {rate}"))]
    InvalidRate { rate: f64 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackMode {
    /// No mission loaded
    Inactive,
    /// Mission loaded, simulated time is held
    Stopped,
    /// Mission loaded, simulated time advances with the wall clock
    Playing,
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Inactive => write!(f, "inactive"),
            Self::Stopped => write!(f, "stopped"),
            Self::Playing => write!(f, "playing"),
        }
    }
}

/// How fast the playback runs
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PlaybackSpeed {
    /// The fixed "normal" rate
    Normal,
    /// The whole mission compressed into a wall clock duration
    Fast { rate: f64 },
    Custom { rate: f64 },
}

impl PlaybackSpeed {
    /// Simulated time per real time
    pub fn rate(&self) -> f64 {
        match *self {
            Self::Normal => NORMAL_RATE,
            Self::Fast { rate } | Self::Custom { rate } => rate,
        }
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "x{NORMAL_RATE}"),
            Self::Fast { .. } => write!(f, "FAST"),
            Self::Custom { rate } => write!(f, "x{rate}"),
        }
    }
}

/// Finite state machine driving the simulated time of a mission, independently of the frame rate.
///
/// The simulated time is clamped to the end of the mission, where playback stops by itself.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackController {
    start: Epoch,
    end: Epoch,
    current: Epoch,
    mode: PlaybackMode,
    speed: PlaybackSpeed,
    last_wall_clock: Option<Duration>,
}

impl PlaybackController {
    /// Initializes an inactive controller for a mission spanning from `start` to `end`.
    pub fn new(start: Epoch, end: Epoch) -> Self {
        Self {
            start,
            end,
            current: start,
            mode: PlaybackMode::Inactive,
            speed: PlaybackSpeed::Normal,
            last_wall_clock: None,
        }
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn current(&self) -> Epoch {
        self.current
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn is_active(&self) -> bool {
        self.mode != PlaybackMode::Inactive
    }

    pub fn is_playing(&self) -> bool {
        self.mode == PlaybackMode::Playing
    }

    /// Label of the current speed, or an em dash when time is not advancing
    pub fn speed_label(&self) -> String {
        if self.is_playing() {
            format!("{}", self.speed)
        } else {
            "—".to_string()
        }
    }

    /// Inactive to Stopped, at the start of the mission.
    pub fn activate(&mut self) {
        self.mode = PlaybackMode::Stopped;
        self.current = self.start;
        self.last_wall_clock = None;
    }

    /// Back to Inactive, from any state.
    pub fn deactivate(&mut self) {
        self.mode = PlaybackMode::Inactive;
        self.current = self.start;
        self.last_wall_clock = None;
    }

    /// Starts (or continues) advancing at the provided speed. The next advance only records the wall clock.
    pub fn play(&mut self, speed: PlaybackSpeed) -> Result<(), PlaybackError> {
        ensure!(self.is_active(), InactiveSnafu);
        let rate = speed.rate();
        ensure!(rate.is_finite() && rate > 0.0, InvalidRateSnafu { rate });

        self.speed = speed;
        self.mode = PlaybackMode::Playing;
        self.last_wall_clock = None;
        debug!("playing at {speed} from {}", self.current);
        Ok(())
    }

    /// Plays at the normal rate
    pub fn play_normal(&mut self) -> Result<(), PlaybackError> {
        self.play(PlaybackSpeed::Normal)
    }

    /// Plays at the rate which compresses the whole mission into the provided wall clock duration
    pub fn fast_forward(&mut self, target: Duration) -> Result<(), PlaybackError> {
        let rate = (self.end - self.start).to_seconds() / target.to_seconds();
        self.play(PlaybackSpeed::Fast { rate })
    }

    /// Stops if playing, or starts playing at the normal rate if stopped.
    pub fn toggle(&mut self) -> Result<(), PlaybackError> {
        if self.is_playing() {
            self.stop();
            Ok(())
        } else {
            self.play_normal()
        }
    }

    /// Playing to Stopped. Simulated time stays where it is. No-op in other states.
    pub fn stop(&mut self) {
        if self.is_playing() {
            self.mode = PlaybackMode::Stopped;
        }
        self.last_wall_clock = None;
    }

    /// Same as stop
    pub fn pause(&mut self) {
        self.stop()
    }

    /// Any state to Stopped, at the start of the mission.
    pub fn restart(&mut self) {
        self.jump_to(self.start);
    }

    /// Any state to Stopped, at the provided epoch. Used for chapter seeks and external clock changes.
    pub fn jump_to(&mut self, epoch: Epoch) {
        self.mode = PlaybackMode::Stopped;
        self.current = epoch;
        self.last_wall_clock = None;
    }

    /// Advances the simulated time by the wall clock time elapsed since the previous call, times the rate.
    ///
    /// The first call after starting to play only records the wall clock. Reaching the end of the mission clamps
    /// the simulated time to it and stops. Returns the simulated time after this call.
    pub fn advance(&mut self, now: Duration) -> Epoch {
        if !self.is_playing() {
            self.last_wall_clock = None;
            return self.current;
        }

        let prev = match self.last_wall_clock.replace(now) {
            Some(prev) => prev,
            None => return self.current,
        };

        let mut delta_real = now - prev;
        if delta_real < Duration::ZERO {
            warn!("wall clock went backward by {}", -delta_real);
            delta_real = Duration::ZERO;
        }

        let next = self.current + (delta_real.to_seconds() * self.speed.rate()) * Unit::Second;
        trace!("advanced by {delta_real} to {next}");

        if next >= self.end {
            self.current = self.end;
            self.mode = PlaybackMode::Stopped;
            self.last_wall_clock = None;
            info!("reached the end of the mission at {}", self.end);
        } else {
            self.current = next;
        }

        self.current
    }
}
