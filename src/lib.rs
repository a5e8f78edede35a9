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

/*! # orbital-replay

Replays historical orbital missions (Vostok 1 to begin with) over a user controlled simulated clock.

The orbit is a Keplerian two-body orbit calibrated to pass over the launch site at the start of the mission,
the descent is a great circle arc to the landing site, and the playback advances simulated time at a rate
independent of the frame rate. Rendering and widgets are left to the caller: each frame yields the marker
position, the retained ground track and the active chapter.
*/

/// Provides the Kepler sub-point propagator and the re-entry interpolation.
pub mod propagators;

/// Provides the geographic points, the Earth-fixed / inertial frame transformations, and the orbital plane calibration.
pub mod cosmic;

/// Utility functions shared by different modules.
pub mod utils;

/// Loading of mission definitions from YAML files.
pub mod io;

/// Mission definitions, ground track sampling, and mission playback.
pub mod md;

#[macro_use]
extern crate log;
extern crate hifitime;
extern crate nalgebra as na;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}

/// Re-export some useful things
pub use self::cosmic::{GeographicPoint, OrbitalPlane};
pub use self::md::{MissionDefinition, MissionRun};
