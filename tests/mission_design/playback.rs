extern crate orbital_replay as orb;

use orb::md::playback::FAST_FORWARD_TARGET;
use orb::md::{ManualClock, MissionError, PlaybackError, PlaybackMode, SimClock};
use orb::time::{Duration, Unit};
use orb::MissionRun;
use rstest::*;

#[fixture]
fn run() -> MissionRun {
    MissionRun::new(crate::test_mission_arcd()).unwrap()
}

#[rstest]
fn commands_need_an_active_mission(mut run: MissionRun) {
    assert_eq!(run.mode(), PlaybackMode::Inactive);
    assert_eq!(
        run.play(),
        Err(MissionError::Playback {
            source: PlaybackError::Inactive
        })
    );
    assert!(run.toggle().is_err());

    let mut clock = ManualClock::new(run.mission().start);
    assert!(run.tick(Duration::ZERO, &mut clock).is_none());
    assert!(run.frame().is_none());
}

#[rstest]
fn speed_labels(mut run: MissionRun) {
    let mut clock = ManualClock::new(run.mission().start);
    run.activate(&mut clock);
    assert_eq!(run.frame().unwrap().speed_label, "—");

    run.play().unwrap();
    assert_eq!(run.frame().unwrap().speed_label, "x60");

    run.fast_forward(FAST_FORWARD_TARGET).unwrap();
    assert_eq!(run.frame().unwrap().speed_label, "FAST");
    // 108 minutes in 10 seconds
    assert_eq!(run.playback().speed().rate(), 648.0);

    run.play_at(2.0).unwrap();
    assert_eq!(run.frame().unwrap().speed_label, "x2");

    run.toggle().unwrap();
    assert_eq!(run.mode(), PlaybackMode::Stopped);
    assert_eq!(run.frame().unwrap().speed_label, "—");
}

#[rstest]
fn rate_independent_of_frames(mut run: MissionRun) {
    let mut clock = ManualClock::new(run.mission().start);
    run.activate(&mut clock);
    let start = run.mission().start;

    run.play_at(2.0).unwrap();
    // The first frame only records the wall clock
    assert_eq!(run.tick(100 * Unit::Second, &mut clock).unwrap().epoch, start);
    assert_eq!(
        run.tick(110 * Unit::Second, &mut clock).unwrap().epoch,
        start + 20 * Unit::Second
    );
    assert_eq!(clock.get(), start + 20 * Unit::Second);

    // Many small frames reach the same simulated time as one large frame
    for ms in 110_001..=120_000_i64 {
        run.tick(ms * Unit::Millisecond, &mut clock);
    }
    let elapsed = (run.playback().current() - start).to_seconds();
    assert!((elapsed - 40.0).abs() < 1e-3, "elapsed {elapsed} s");
}

#[rstest]
#[case(1.0)]
#[case(648.0)]
#[case(1e9)]
fn clamped_at_the_end(mut run: MissionRun, #[case] rate: f64) {
    let mut clock = ManualClock::new(run.mission().start);
    run.activate(&mut clock);
    run.seek_chapter("land", &mut clock).unwrap();
    run.jump_to(run.mission().end - 1 * Unit::Second, &mut clock);
    run.play_at(rate).unwrap();

    let end = run.mission().end;
    let landing = run.mission().landing;

    run.tick(Duration::ZERO, &mut clock);
    let frame = run.tick(1 * Unit::Hour, &mut clock).unwrap();
    assert_eq!(frame.epoch, end);
    assert_eq!(frame.mode, PlaybackMode::Stopped);
    assert_eq!(frame.marker, Some(landing));
    assert_eq!(clock.get(), end);

    // Stays there
    let frame = run.tick(2 * Unit::Hour, &mut clock).unwrap();
    assert_eq!(frame.epoch, end);
}

#[rstest]
fn backward_wall_clock_holds_time(mut run: MissionRun) {
    let mut clock = ManualClock::new(run.mission().start);
    run.activate(&mut clock);
    run.play().unwrap();
    run.tick(10 * Unit::Second, &mut clock);
    let t = run.tick(11 * Unit::Second, &mut clock).unwrap().epoch;
    assert_eq!(t, run.mission().start + 60 * Unit::Second);
    assert_eq!(run.tick(5 * Unit::Second, &mut clock).unwrap().epoch, t);
    assert_eq!(run.mode(), PlaybackMode::Playing);
}

#[rstest]
fn stop_and_clear(mut run: MissionRun) {
    let mut clock = ManualClock::new(run.mission().start);
    run.activate(&mut clock);
    run.play().unwrap();
    run.tick(Duration::ZERO, &mut clock);
    let t = run.tick(30 * Unit::Second, &mut clock).unwrap().epoch;

    run.stop();
    assert_eq!(run.tick(90 * Unit::Second, &mut clock).unwrap().epoch, t);

    run.clear();
    assert_eq!(run.mode(), PlaybackMode::Inactive);
    assert!(run.track().is_empty());
    assert!(run.track().marker().is_none());
    assert!(run.tick(100 * Unit::Second, &mut clock).is_none());
}
