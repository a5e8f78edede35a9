extern crate orbital_replay as orb;

use approx::assert_abs_diff_eq;
use orb::propagators::{FlightPhase, GroundTrackModel, HAND_OFF_LEAD};
use orb::time::{TimeSeries, Unit};
use orb::MissionDefinition;
use rstest::*;

#[fixture]
fn mission() -> MissionDefinition {
    crate::test_mission()
}

#[fixture]
fn model(mission: MissionDefinition) -> GroundTrackModel {
    GroundTrackModel::from_mission(&mission).unwrap()
}

#[rstest]
fn starts_over_the_launch_site(mission: MissionDefinition, model: GroundTrackModel) {
    let first = model.subpoint(mission.start).unwrap();
    assert_abs_diff_eq!(first.latitude_deg, 45.964, epsilon = 1e-9);
    assert_abs_diff_eq!(first.longitude_deg, 63.305, epsilon = 1e-9);

    assert_eq!(model.subpoint(mission.start - 1 * Unit::Second), None);
    assert_eq!(model.phase(mission.start - 1 * Unit::Second), None);
    assert_eq!(model.phase(mission.start), Some(FlightPhase::Orbit));
}

#[rstest]
fn latitude_bounded_by_inclination(mission: MissionDefinition, model: GroundTrackModel) {
    let mut lat_min = f64::MAX;
    let mut lat_max = f64::MIN;
    for epoch in TimeSeries::exclusive(mission.start, mission.retrofire, 10 * Unit::Second) {
        let pt = model.subpoint(epoch).unwrap();
        assert!(
            pt.latitude_deg.abs() <= mission.orbit.inclination_deg + 1e-9,
            "{pt} at {epoch} beyond the inclination"
        );
        lat_min = lat_min.min(pt.latitude_deg);
        lat_max = lat_max.max(pt.latitude_deg);
    }
    // 78 minutes of an 89.1 minute orbit always cover the southernmost point
    assert!(lat_min < -64.0, "min latitude {lat_min}");
    assert!(lat_max >= 45.96, "max latitude {lat_max}");
}

#[rstest]
fn descent_starts_at_hand_off(mission: MissionDefinition, model: GroundTrackModel) {
    let hand_off = model.orbit.subpoint(mission.retrofire - HAND_OFF_LEAD).unwrap();
    assert_eq!(model.reentry.hand_off, hand_off);
    assert_eq!(model.phase(mission.retrofire), Some(FlightPhase::Descent));
    assert_eq!(model.subpoint(mission.retrofire), Some(hand_off));

    // The orbit is not propagated past retrofire
    assert_eq!(model.orbit.subpoint(mission.retrofire), None);
}

#[rstest]
fn lands_exactly(mission: MissionDefinition, model: GroundTrackModel) {
    assert_eq!(model.subpoint(mission.end), Some(mission.landing));
    assert_eq!(
        model.subpoint(mission.end + 3 * Unit::Hour),
        Some(mission.landing)
    );
}

#[rstest]
fn track_is_continuous(mission: MissionDefinition, model: GroundTrackModel) {
    let points = model.every(10 * Unit::Second);
    assert_eq!(points.len(), 649);
    assert_eq!(points.first().unwrap().0, mission.start);
    assert_eq!(points.last().unwrap().0, mission.end);

    for pair in points.windows(2) {
        let hop = pair[0].1.angular_separation(&pair[1].1).to_degrees();
        assert!(hop < 1.5, "jump of {hop:.3} deg at {}", pair[1].0);
    }
}

#[rstest]
fn descent_is_monotonic(mission: MissionDefinition, model: GroundTrackModel) {
    // Along the great circle, the distance to the landing site only decreases
    let mut prev = f64::MAX;
    for epoch in TimeSeries::inclusive(mission.retrofire, mission.end, 1 * Unit::Minute) {
        let left = model
            .subpoint(epoch)
            .unwrap()
            .angular_separation(&mission.landing);
        assert!(left <= prev + 1e-12);
        prev = left;
    }
    assert_abs_diff_eq!(prev, 0.0, epsilon = 1e-12);
}
