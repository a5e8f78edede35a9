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

extern crate clap;
extern crate log;
extern crate orbital_replay as orb;
extern crate pretty_env_logger;

use clap::Parser;
use log::{error, info, warn};
use orb::md::{FrameCsvOutput, FrameHdlr, ManualClock, PlaybackMode};
use orb::time::{Duration, Unit};
use orb::{MissionDefinition, MissionRun};
use std::env::{set_var, var};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

const LOG_VAR: &str = "ORBSIM_LOG";

/// Upper bound on the number of frames, in case the playback never reaches the end
const MAX_FRAMES: usize = 10_000_000;

/// Headless replay of a historical mission.
#[derive(Parser, Debug)]
#[command(name = "orbsim", version, about)]
struct Args {
    /// Mission definition (YAML). Defaults to the built-in Vostok 1 mission.
    mission: Option<PathBuf>,
    /// Custom playback rate, in simulated seconds per real second
    #[arg(long, conflicts_with = "fast")]
    rate: Option<f64>,
    /// Play the whole mission in this many real seconds
    #[arg(long)]
    fast: Option<f64>,
    /// Frames per second of the synthetic wall clock
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Seek to this chapter before playing
    #[arg(long)]
    chapter: Option<String>,
    /// Write one CSV row per frame to this file
    #[arg(long)]
    frames_csv: Option<PathBuf>,
    /// Write the final ground track to this CSV file
    #[arg(long)]
    track_csv: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if var(LOG_VAR).is_err() {
        set_var(LOG_VAR, "INFO");
    }

    if pretty_env_logger::try_init_custom_env(LOG_VAR).is_err() {
        println!("could not init logger");
    }

    let mission = match &args.mission {
        Some(path) => {
            let mission = MissionDefinition::from_yaml(path)?;
            info!("Loaded mission from `{}`", path.display());
            mission
        }
        None => MissionDefinition::vostok1(),
    };
    info!("{mission}");

    let mut run = match MissionRun::new(Arc::new(mission)) {
        Ok(run) => run,
        Err(e) => {
            error!("{e}");
            return Err(e.into());
        }
    };

    let mut clock = ManualClock::new(run.mission().start);
    run.activate(&mut clock);

    if let Some(key) = &args.chapter {
        run.seek_chapter(key, &mut clock)?;
    }

    match (args.rate, args.fast) {
        (Some(rate), _) => run.play_at(rate)?,
        (None, Some(seconds)) => run.fast_forward(seconds * Unit::Second)?,
        (None, None) => run.play()?,
    }

    let mut hdlrs: Vec<Box<dyn FrameHdlr>> = Vec::new();
    if let Some(path) = &args.frames_csv {
        hdlrs.push(Box::new(FrameCsvOutput::new(path)?));
    }

    let frame_step: Duration = Unit::Second * (1.0 / f64::from(args.fps.max(1)));
    let mut now = Duration::ZERO;
    let mut chapter_key: Option<String> = None;
    let mut frames = 0;

    while run.mode() == PlaybackMode::Playing {
        if frames >= MAX_FRAMES {
            warn!("stopping after {MAX_FRAMES} frames");
            run.stop();
            break;
        }

        if let Some(frame) = run.tick(now, &mut clock) {
            let key = frame.chapter.map(|c| c.key.clone());
            if key != chapter_key {
                info!("{} -- {}", frame.epoch, frame.subtitle());
                chapter_key = key;
            }
            for hdlr in hdlrs.iter_mut() {
                hdlr.handle(&frame);
            }
        }

        now += frame_step;
        frames += 1;
    }

    info!("{run} after {frames} frames ({now} of wall clock)");
    if let Some(marker) = run.track().marker() {
        info!("final position: {marker}");
    }

    if let Some(path) = &args.track_csv {
        run.track().export_csv(path)?;
    }

    Ok(())
}
