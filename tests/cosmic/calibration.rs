extern crate orbital_replay as orb;

use approx::assert_abs_diff_eq;
use orb::cosmic::{
    body_fixed_to_inertial, sidereal_angle, CalibrationError, GeographicPoint, OrbitalPlane,
};
use orb::time::{Epoch, Unit};
use rstest::*;

#[fixture]
fn launch_epoch() -> Epoch {
    Epoch::from_gregorian_utc_hms(1961, 4, 12, 6, 7, 0)
}

#[fixture]
fn baikonur() -> GeographicPoint {
    GeographicPoint::new(45.964, 63.305)
}

#[rstest]
fn reachable_inclinations(launch_epoch: Epoch, baikonur: GeographicPoint) {
    let launch_inertial = body_fixed_to_inertial(
        &baikonur.to_unit_vector(),
        sidereal_angle(launch_epoch),
    );

    // Every inclination which can reach the launch latitude, prograde and retrograde
    for inc_deg in 46..=134 {
        let inc = f64::from(inc_deg).to_radians();
        let plane = OrbitalPlane::calibrate(launch_epoch, inc, &baikonur).unwrap();

        assert_abs_diff_eq!(plane.inclination_rad(), inc, epsilon = 1e-9);
        assert_abs_diff_eq!(plane.w.dot(&launch_inertial), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(plane.p.dot(&plane.q), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(plane.w.norm(), 1.0, epsilon = 1e-12);
        // Zero anomaly is over the launch site
        assert_abs_diff_eq!((plane.p - launch_inertial).norm(), 0.0, epsilon = 1e-12);
    }
}

#[rstest]
#[case(0.0)]
#[case(180.0)]
#[case(-10.0)]
#[case(f64::NAN)]
fn undefined_node(launch_epoch: Epoch, baikonur: GeographicPoint, #[case] inc_deg: f64) {
    let err = OrbitalPlane::calibrate(launch_epoch, inc_deg.to_radians(), &baikonur);
    assert!(
        matches!(err, Err(CalibrationError::InvalidInclination { .. })),
        "{inc_deg} deg should be rejected"
    );
}

#[rstest]
fn unreachable_latitude_stays_orthonormal(launch_epoch: Epoch) {
    if pretty_env_logger::try_init().is_err() {
        println!("could not init env_logger");
    }
    let north = GeographicPoint::new(80.0, 10.0);
    let plane = OrbitalPlane::calibrate(launch_epoch, 30_f64.to_radians(), &north).unwrap();

    let launch_inertial =
        body_fixed_to_inertial(&north.to_unit_vector(), sidereal_angle(launch_epoch));
    assert_abs_diff_eq!(plane.w.dot(&launch_inertial), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(plane.w.dot(&plane.q), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(plane.p.cross(&plane.q).dot(&plane.w), 1.0, epsilon = 1e-12);
}

#[rstest]
fn calibration_follows_the_sky(launch_epoch: Epoch, baikonur: GeographicPoint) {
    let inc = 64.95_f64.to_radians();
    let now = OrbitalPlane::calibrate(launch_epoch, inc, &baikonur).unwrap();
    let later = OrbitalPlane::calibrate(launch_epoch + 1 * Unit::Hour, inc, &baikonur).unwrap();

    // One hour later, the Earth turned by about 15 degrees and the node with it
    let delta = (later.raan_rad - now.raan_rad).to_degrees().rem_euclid(360.0);
    assert_abs_diff_eq!(delta, 15.041, epsilon = 1e-2);
}
