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
use crate::time::{Duration, Epoch, TimeSeries};
use serde_derive::Serialize;
use std::fs::File;
use std::path::Path;

/// A retained point of the ground track
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrackSample {
    pub epoch: Epoch,
    pub point: GeographicPoint,
}

#[derive(Serialize)]
struct TrackRow {
    epoch: String,
    latitude_deg: f64,
    longitude_deg: f64,
}

/// Ground track of a mission run: the continuously updated marker and the polyline of retained samples.
///
/// The samples are strictly increasing in time. The marker follows every update, whereas a sample is only
/// retained once the sample interval has elapsed since the previous one (or when forced).
#[derive(Clone, Debug, PartialEq)]
pub struct GroundTrack {
    /// Minimum simulated time between two retained samples
    pub interval: Duration,
    samples: Vec<TrackSample>,
    marker: Option<GeographicPoint>,
}

impl GroundTrack {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            samples: Vec::new(),
            marker: None,
        }
    }

    /// Moves the marker to this point and appends it to the track if the sample is due (or forced).
    ///
    /// Samples which are not strictly after the last retained one are never appended. Returns whether the point was retained.
    pub fn sample_if_due(&mut self, epoch: Epoch, point: GeographicPoint, force: bool) -> bool {
        self.marker = Some(point);

        let due = match self.last_sample_epoch() {
            None => true,
            Some(last) if epoch <= last => false,
            Some(last) => force || epoch - last >= self.interval,
        };

        if due {
            self.samples.push(TrackSample { epoch, point });
        }
        due
    }

    /// Replaces the whole track by the samples every interval from `start` until `target` (capped to `end`), both included.
    ///
    /// The marker is left on the last replayed point.
    pub fn rebuild_up_to<F>(&mut self, start: Epoch, end: Epoch, target: Epoch, mut subpoint: F)
    where
        F: FnMut(Epoch) -> Option<GeographicPoint>,
    {
        self.clear();

        let stop = if target < end { target } else { end };
        if stop < start || self.interval <= Duration::ZERO {
            return;
        }

        for epoch in TimeSeries::inclusive(start, stop, self.interval) {
            if let Some(point) = subpoint(epoch) {
                self.sample_if_due(epoch, point, true);
            }
        }

        debug!(
            "track rebuilt from {start} to {stop}: {} samples",
            self.samples.len()
        );
    }

    /// Removes all samples and the marker
    pub fn clear(&mut self) {
        self.samples.clear();
        self.marker = None;
    }

    pub fn samples(&self) -> &[TrackSample] {
        &self.samples
    }

    /// Retained points only, in order
    pub fn points(&self) -> Vec<GeographicPoint> {
        self.samples.iter().map(|s| s.point).collect()
    }

    pub fn marker(&self) -> Option<GeographicPoint> {
        self.marker
    }

    pub fn last_sample_epoch(&self) -> Option<Epoch> {
        self.samples.last().map(|s| s.epoch)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Writes the retained samples to a CSV file
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(File::create(path.as_ref())?);
        for sample in &self.samples {
            wtr.serialize(TrackRow {
                epoch: format!("{}", sample.epoch),
                latitude_deg: sample.point.latitude_deg,
                longitude_deg: sample.point.longitude_deg,
            })?;
        }
        wtr.flush()?;
        info!(
            "Saved {} track samples to {}",
            self.samples.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}
