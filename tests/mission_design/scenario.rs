extern crate orbital_replay as orb;

use approx::assert_abs_diff_eq;
use orb::md::playback::FAST_FORWARD_TARGET;
use orb::cosmic::GeographicPoint;
use orb::md::{ManualClock, MissionError, OrbitSpec, PlaybackMode, SimClock};
use orb::propagators::FlightPhase;
use orb::time::{Duration, Unit};
use orb::{MissionDefinition, MissionRun};
use rstest::*;
use std::sync::Arc;

#[fixture]
fn run() -> MissionRun {
    MissionRun::new(crate::test_mission_arcd()).unwrap()
}

fn assert_track_increasing(run: &MissionRun) {
    for pair in run.track().samples().windows(2) {
        assert!(pair[0].epoch < pair[1].epoch, "track not strictly increasing");
    }
}

#[rstest]
fn activation(mut run: MissionRun) {
    let start = run.mission().start;
    let mut clock = ManualClock::new(start + 3 * Unit::Hour);
    run.activate(&mut clock);

    assert_eq!(clock.get(), start);
    let frame = run.frame().unwrap();
    assert_eq!(frame.mode, PlaybackMode::Stopped);
    assert_eq!(frame.phase, Some(FlightPhase::Orbit));
    assert_eq!(frame.track.len(), 1);
    assert_eq!(frame.chapter.unwrap().key, "launch");
    assert!(frame.subtitle().contains("Baikonur"));

    let marker = frame.marker.unwrap();
    assert_abs_diff_eq!(marker.latitude_deg, 45.964, epsilon = 1e-9);
    assert_abs_diff_eq!(marker.longitude_deg, 63.305, epsilon = 1e-9);
}

/// Vostok in fast forward at about 60 frames per second: the whole flight is replayed in ten seconds.
#[rstest]
fn fast_forward_vostok(mut run: MissionRun) {
    if pretty_env_logger::try_init().is_err() {
        println!("could not init env_logger");
    }
    let mut clock = ManualClock::new(run.mission().start);
    run.activate(&mut clock);
    run.fast_forward(FAST_FORWARD_TARGET).unwrap();

    let frame_step = 16 * Unit::Millisecond;
    let mut now = Duration::ZERO;
    let mut stopped_at = None;
    let mut chapters: Vec<String> = Vec::new();
    let mut prev_epoch = run.mission().start;

    for _ in 0..1_000 {
        let frame = run.tick(now, &mut clock).unwrap();
        assert!(frame.epoch >= prev_epoch);
        prev_epoch = frame.epoch;

        let key = frame.chapter.unwrap().key.clone();
        if chapters.last() != Some(&key) {
            chapters.push(key);
        }

        if frame.mode == PlaybackMode::Stopped {
            stopped_at = Some(now);
            break;
        }
        now += frame_step;
    }

    let stopped_at = stopped_at.expect("fast forward never stopped");
    assert!(
        (stopped_at.to_seconds() - 10.0).abs() <= frame_step.to_seconds() + 1e-9,
        "stopped after {stopped_at}"
    );

    let mission = run.mission();
    assert_eq!(clock.get(), mission.end);
    assert_eq!(run.playback().current(), mission.end);
    assert_eq!(run.track().marker(), Some(mission.landing));
    assert_eq!(
        chapters,
        vec!["launch", "orbitin", "orbit", "retro", "reentry", "land"]
    );
    assert_track_increasing(&run);
}

#[rstest]
fn seek_chapters(mut run: MissionRun) {
    let mut clock = ManualClock::new(run.mission().start);
    run.activate(&mut clock);
    run.play().unwrap();

    run.seek_chapter("orbit", &mut clock).unwrap();
    let orbit_start = run.mission().chapter("orbit").unwrap().epoch;
    assert_eq!(run.mode(), PlaybackMode::Stopped);
    assert_eq!(clock.get(), orbit_start);
    // 38 minutes of 10 second samples, both ends included
    assert_eq!(run.track().len(), 229);
    assert_eq!(run.track().last_sample_epoch(), Some(orbit_start));
    assert_track_increasing(&run);

    // Seeking is idempotent
    let first = run.track().clone();
    run.seek_chapter("orbit", &mut clock).unwrap();
    assert_eq!(run.track(), &first);

    // Backward seek drops the later samples
    run.seek_chapter("orbitin", &mut clock).unwrap();
    assert_eq!(run.track().len(), 61);
    assert_eq!(run.frame().unwrap().chapter.unwrap().key, "orbitin");

    assert!(matches!(
        run.seek_chapter("docking", &mut clock),
        Err(MissionError::UnknownChapter { .. })
    ));
    assert_eq!(clock.get(), run.mission().chapter("orbitin").unwrap().epoch);
}

#[rstest]
fn restart(mut run: MissionRun) {
    let mut clock = ManualClock::new(run.mission().start);
    run.activate(&mut clock);
    run.seek_chapter("reentry", &mut clock).unwrap();
    assert_eq!(run.frame().unwrap().phase, Some(FlightPhase::Descent));

    run.restart(&mut clock);
    assert_eq!(run.mode(), PlaybackMode::Stopped);
    assert_eq!(clock.get(), run.mission().start);
    assert_eq!(run.track().len(), 1);
}

#[rstest]
fn external_clock_changes(mut run: MissionRun) {
    let start = run.mission().start;
    let mut clock = ManualClock::new(start);
    run.activate(&mut clock);
    run.play().unwrap();
    run.tick(Duration::ZERO, &mut clock);
    run.tick(1 * Unit::Second, &mut clock);
    assert_eq!(clock.get(), start + 1 * Unit::Minute);

    // Moving the clock within the mission is a jump
    clock.set(start + 30 * Unit::Minute);
    let frame = run.tick(2 * Unit::Second, &mut clock).unwrap();
    assert_eq!(frame.epoch, start + 30 * Unit::Minute);
    assert_eq!(frame.mode, PlaybackMode::Stopped);
    assert_eq!(frame.track.len(), 181);

    clock.set(start + 5 * Unit::Minute);
    let frame = run.tick(3 * Unit::Second, &mut clock).unwrap();
    assert_eq!(frame.track.len(), 31);
    assert_eq!(frame.track.last().unwrap().epoch, start + 5 * Unit::Minute);

    // Outside of the mission, nothing moves
    let outside = start + 1 * Unit::Day;
    clock.set(outside);
    let frame = run.tick(4 * Unit::Second, &mut clock).unwrap();
    assert_eq!(frame.epoch, start + 5 * Unit::Minute);
    assert_eq!(frame.track.len(), 31);
    assert_eq!(clock.get(), outside);

    run.jump_to(start - 1 * Unit::Day, &mut clock);
    assert_eq!(run.playback().current(), start + 5 * Unit::Minute);
    assert_eq!(clock.get(), start - 1 * Unit::Day);
}

#[test]
fn equatorial_mission_is_rejected() {
    let vostok = MissionDefinition::vostok1();
    let mission = MissionDefinition::builder()
        .id("kourou")
        .name("Equatorial test")
        .start(vostok.start)
        .end(vostok.end)
        .retrofire(vostok.retrofire)
        .launch(GeographicPoint::new(5.236, -52.769))
        .landing(GeographicPoint::new(0.0, -20.0))
        .orbit(
            OrbitSpec::builder()
                .perigee_altitude_km(200.0)
                .apogee_altitude_km(250.0)
                .inclination_deg(0.0)
                .period(88 * Unit::Minute)
                .build(),
        )
        .chapters(vostok.chapters.clone())
        .build();
    mission.validate().unwrap();

    assert!(matches!(
        MissionRun::new(Arc::new(mission)),
        Err(MissionError::Calibration { .. })
    ));
}
