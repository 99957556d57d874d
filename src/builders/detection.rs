//! DetectionReport message content.
//!
//! Converts one radar track into a report: geographic position when the
//! track carries a fix, radar-relative range/bearing otherwise, velocity
//! transformed from the radar's NWU frame into ENU, plus classification,
//! behaviour and the supplementary object attributes declared at
//! registration. Values outside their declared ranges are omitted rather
//! than clamped, except velocity, which the ICD bounds to ±100 m/s.

use super::{horizontal_error_deg, normalize_azimuth};
use crate::proto::detection_report::{
    Behaviour, Classification, ObjectInfo, Position, SubClass,
};
use crate::proto::{
    DetectionReport, EnuVelocity, Location, LocationCoordinateSystem, LocationDatum, RangeBearing,
    RangeBearingCoordinateSystem, RangeBearingDatum,
};
use crate::radar::RadarTrackItem;

const AZIMUTH_LIMIT: f32 = 60.0;
const ELEVATION_LIMIT: f32 = 40.0;
const RANGE_LIMIT: f32 = 6000.0;
const RADIAL_VELOCITY_LIMIT: f32 = 50.0;
const ABS_VELOCITY_LIMIT: f32 = 100.0;
const RCS_LIMIT: f32 = 100.0;
const TRACK_DURATION_LIMIT: f32 = 10_000.0;
const ALTITUDE_LIMIT: f32 = 10_000.0;

/// Component speed above which a target counts as moving.
const ACTIVE_SPEED_THRESHOLD: f32 = 0.5;

pub(crate) fn build(
    track: &RadarTrackItem,
    radar_heading: f64,
    object_id: String,
    task_id: Option<String>,
    report_id: String,
) -> DetectionReport {
    DetectionReport {
        report_id,
        object_id,
        task_id,
        state: Some("detected".to_string()),
        position: Some(position_of(track, radar_heading)),
        detection_confidence: Some(unit_confidence(track.existing_prob)),
        enu_velocity: enu_velocity_of(track),
        object_info: object_info_of(track),
        classification: vec![classification_of(track)],
        behaviour: vec![behaviour_of(track)],
        id: Some(format!("track_{}", track.id)),
    }
}

/// Geographic position when the track has a fix, radar-relative polar
/// otherwise.
fn position_of(track: &RadarTrackItem, radar_heading: f64) -> Position {
    if track.longitude != 0.0 || track.latitude != 0.0 {
        let error_deg = horizontal_error_deg();
        Position::Location(Location {
            x: track.longitude as f64,
            y: track.latitude as f64,
            z: (track.altitude.abs() <= ALTITUDE_LIMIT).then_some(track.altitude as f64),
            x_error: Some(error_deg),
            y_error: Some(error_deg),
            z_error: None,
            coordinate_system: LocationCoordinateSystem::LatLngDegM as i32,
            datum: LocationDatum::Wgs84G as i32,
        })
    } else {
        let mut rb = RangeBearing {
            coordinate_system: RangeBearingCoordinateSystem::DegreesM as i32,
            datum: RangeBearingDatum::True as i32,
            ..Default::default()
        };

        if track.azimuth.abs() <= AZIMUTH_LIMIT {
            // Track azimuth is radar-relative; the report wants true north.
            rb.azimuth = Some(normalize_azimuth(track.azimuth as f64 + radar_heading));
            rb.azimuth_error = Some(1.0);
        }
        if track.elevation.abs() <= ELEVATION_LIMIT {
            rb.elevation = Some(track.elevation as f64);
            rb.elevation_error = Some(1.0);
        }
        if track.range > 0.0 && track.range <= RANGE_LIMIT {
            rb.range = Some(track.range as f64);
            rb.range_error = Some(10.0);
        }

        Position::RangeBearing(rb)
    }
}

/// Probability percentage to a confidence in [0, 1].
fn unit_confidence(percent: u32) -> f32 {
    (percent as f32 / 100.0).clamp(0.0, 1.0)
}

fn enu_velocity_of(track: &RadarTrackItem) -> Option<EnuVelocity> {
    if track.vx == 0.0 && track.vy == 0.0 && track.vz == 0.0 {
        return None;
    }

    // Radar frame is NWU (vx=north, vy=west, vz=up); ENU wants
    // east = -west, north = north, up = up.
    let mut east_rate = -track.vy as f64;
    let mut north_rate = track.vx as f64;
    let mut up_rate = track.vz as f64;

    east_rate = east_rate.clamp(-100.0, 100.0);
    north_rate = north_rate.clamp(-100.0, 100.0);
    up_rate = up_rate.clamp(-100.0, 100.0);

    // Near-zero horizontal rates round to a token value so the field is
    // never encoded as absent.
    if east_rate.abs() < 1e-4 {
        east_rate = 0.001;
    }
    if north_rate.abs() < 1e-4 {
        north_rate = 0.001;
    }

    let error = f64::from(track.vx_variance).sqrt().max(0.5);

    Some(EnuVelocity {
        east_rate,
        north_rate,
        up_rate: Some(up_rate),
        east_rate_error: Some(error),
        north_rate_error: Some(error),
        up_rate_error: Some(error),
    })
}

fn object_info_of(track: &RadarTrackItem) -> Vec<ObjectInfo> {
    let mut info = Vec::new();
    let mut add = |r#type: &str, value: String| {
        info.push(ObjectInfo {
            r#type: r#type.to_string(),
            value,
        });
    };

    if track.range > 0.0 && track.range <= RANGE_LIMIT {
        add("range", format!("{:.2}m", track.range));
    }
    if track.azimuth.abs() <= AZIMUTH_LIMIT {
        add("azimuth", format!("{:.2}°", track.azimuth));
    }
    if track.elevation.abs() <= ELEVATION_LIMIT {
        add("elevation", format!("{:.2}°", track.elevation));
    }
    if track.velocity.abs() <= RADIAL_VELOCITY_LIMIT {
        add("velocity", format!("{:.2}m/s", track.velocity));
    }
    if track.abs_vel >= 0.0 && track.abs_vel <= ABS_VELOCITY_LIMIT {
        add("absVel", format!("{:.2}m/s", track.abs_vel));
    }
    if track.rcs.is_finite() && track.rcs.abs() <= RCS_LIMIT {
        add("RCS", format!("{:.2}dBsm", track.rcs));
    }
    add(
        "trackType",
        if track.tws_tas_flag == 0 { "TWS" } else { "TAS" }.to_string(),
    );
    if track.state_type <= 1 {
        add(
            "trackState",
            if track.state_type == 1 {
                "Confirmed"
            } else {
                "Tentative"
            }
            .to_string(),
        );
    }
    if (0.0..=360.0).contains(&track.orientation_angle) {
        add("heading", format!("{:.2}°", track.orientation_angle));
    }
    if (0.0..=TRACK_DURATION_LIMIT).contains(&track.alive) {
        add("trackDuration", format!("{:.1}s", track.alive));
    }

    info
}

/// Map the radar's classification code onto the registered taxonomy.
///
/// Codes: 0 unknown, 1 UAV, 2 person, 3 vehicle, 4 bird; anything else is
/// reported as Other.
fn classification_of(track: &RadarTrackItem) -> Classification {
    let confidence = unit_confidence(track.classify_prob);

    let (class_type, sub_type) = match track.classification {
        0x00 => ("Unknown", None),
        0x01 => ("Air vehicle", Some("UAV rotary wing")),
        0x02 => ("Human", None),
        0x03 => ("Land vehicle", None),
        0x04 => ("Animal", Some("Bird")),
        _ => ("Other", None),
    };

    Classification {
        r#type: class_type.to_string(),
        confidence: Some(confidence),
        sub_class: sub_type
            .map(|sub| SubClass {
                r#type: sub.to_string(),
                level: 1,
                confidence: Some(confidence),
            })
            .into_iter()
            .collect(),
    }
}

/// Behaviour from the motion-type code, with a speed-based fallback when the
/// code is unknown (some data paths never populate it).
fn behaviour_of(track: &RadarTrackItem) -> Behaviour {
    let behaviour_type = match track.motion_type {
        1 => "Passive",
        2..=4 => "Active",
        _ => {
            let component_speed = track.vx.abs() + track.vy.abs() + track.vz.abs();
            if track.abs_vel.abs() > ACTIVE_SPEED_THRESHOLD
                || track.velocity.abs() > ACTIVE_SPEED_THRESHOLD
                || component_speed > ACTIVE_SPEED_THRESHOLD
            {
                "Active"
            } else {
                "Passive"
            }
        }
    };

    // The radar protocol has no confidence for motion type.
    Behaviour {
        r#type: behaviour_type.to_string(),
        confidence: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_track() -> RadarTrackItem {
        RadarTrackItem {
            id: 17,
            azimuth: 12.5,
            elevation: 3.0,
            range: 850.0,
            velocity: -4.2,
            abs_vel: 6.1,
            rcs: -21.0,
            vx: 1.0,
            vy: 2.0,
            vz: -0.5,
            vx_variance: 0.04,
            existing_prob: 90,
            classify_prob: 80,
            classification: 1,
            motion_type: 3,
            tws_tas_flag: 0,
            state_type: 1,
            orientation_angle: 134.0,
            alive: 12.3,
            ..Default::default()
        }
    }

    fn build_report(track: &RadarTrackItem, heading: f64) -> DetectionReport {
        build(
            track,
            heading,
            "01OBJECT00000000000000AAAA".to_string(),
            None,
            "01REPORT00000000000000AAAA".to_string(),
        )
    }

    fn info_value<'a>(report: &'a DetectionReport, r#type: &str) -> Option<&'a str> {
        report
            .object_info
            .iter()
            .find(|i| i.r#type == r#type)
            .map(|i| i.value.as_str())
    }

    #[test]
    fn nwu_to_enu_conversion() {
        let track = RadarTrackItem {
            vx: 1.0,
            vy: 1.0,
            vz: 1.0,
            ..base_track()
        };
        let velocity = enu_velocity_of(&track).unwrap();
        assert_eq!(velocity.east_rate, -1.0);
        assert_eq!(velocity.north_rate, 1.0);
        assert_eq!(velocity.up_rate, Some(1.0));
    }

    #[test]
    fn velocity_clamped_and_zero_padded() {
        let track = RadarTrackItem {
            vx: 250.0,
            vy: -250.0,
            vz: 0.0,
            ..base_track()
        };
        let velocity = enu_velocity_of(&track).unwrap();
        assert_eq!(velocity.east_rate, 100.0);
        assert_eq!(velocity.north_rate, 100.0);
        assert_eq!(velocity.up_rate, Some(0.0));

        // Near-zero horizontal rates become the token 1 mm/s.
        let track = RadarTrackItem {
            vx: 0.0,
            vy: 0.00005,
            vz: 2.0,
            ..base_track()
        };
        let velocity = enu_velocity_of(&track).unwrap();
        assert_eq!(velocity.east_rate, 0.001);
        assert_eq!(velocity.north_rate, 0.001);
    }

    #[test]
    fn velocity_error_floor() {
        let velocity = enu_velocity_of(&base_track()).unwrap();
        // sqrt(0.04) = 0.2, floored to 0.5.
        assert_eq!(velocity.east_rate_error, Some(0.5));

        let track = RadarTrackItem {
            vx_variance: 4.0,
            ..base_track()
        };
        let velocity = enu_velocity_of(&track).unwrap();
        assert_eq!(velocity.east_rate_error, Some(2.0));
    }

    #[test]
    fn all_zero_velocity_omitted() {
        let track = RadarTrackItem {
            vx: 0.0,
            vy: 0.0,
            vz: 0.0,
            ..base_track()
        };
        assert!(enu_velocity_of(&track).is_none());
    }

    #[test]
    fn azimuth_rotated_to_true_north() {
        let mut track = base_track();
        track.azimuth = -30.0;
        let report = build_report(&track, 350.0);
        let rb = match report.position.unwrap() {
            Position::RangeBearing(rb) => rb,
            Position::Location(_) => panic!("expected range-bearing"),
        };
        assert_eq!(rb.azimuth, Some(320.0));

        track.azimuth = 50.0;
        let report = build_report(&track, 350.0);
        let rb = match report.position.unwrap() {
            Position::RangeBearing(rb) => rb,
            Position::Location(_) => panic!("expected range-bearing"),
        };
        assert_eq!(rb.azimuth, Some(40.0));
        assert_eq!(rb.azimuth_error, Some(1.0));
        assert_eq!(rb.range, Some(850.0));
        assert_eq!(rb.range_error, Some(10.0));
    }

    #[test]
    fn out_of_gate_polar_fields_omitted() {
        let track = RadarTrackItem {
            azimuth: 75.0,
            elevation: 55.0,
            range: 9000.0,
            ..base_track()
        };
        let report = build_report(&track, 0.0);
        let rb = match report.position.clone().unwrap() {
            Position::RangeBearing(rb) => rb,
            Position::Location(_) => panic!("expected range-bearing"),
        };
        assert!(rb.azimuth.is_none());
        assert!(rb.elevation.is_none());
        assert!(rb.range.is_none());

        assert!(info_value(&report, "range").is_none());
        assert!(info_value(&report, "azimuth").is_none());
        assert!(info_value(&report, "elevation").is_none());
    }

    #[test]
    fn geographic_fix_takes_precedence() {
        let track = RadarTrackItem {
            longitude: 114.06,
            latitude: 22.54,
            altitude: 120.0,
            ..base_track()
        };
        let report = build_report(&track, 90.0);
        let location = match report.position.unwrap() {
            Position::Location(l) => l,
            Position::RangeBearing(_) => panic!("expected location"),
        };
        assert!((location.x - 114.06).abs() < 1e-4);
        assert!((location.y - 22.54).abs() < 1e-4);
        assert_eq!(location.z, Some(120.0));
        assert_eq!(location.datum, LocationDatum::Wgs84G as i32);

        // Implausible altitude is dropped, the fix kept.
        let track = RadarTrackItem {
            longitude: 114.06,
            latitude: 22.54,
            altitude: 25_000.0,
            ..base_track()
        };
        let report = build_report(&track, 0.0);
        let location = match report.position.unwrap() {
            Position::Location(l) => l,
            Position::RangeBearing(_) => panic!("expected location"),
        };
        assert!(location.z.is_none());
    }

    #[test]
    fn confidence_is_clamped_unit_interval() {
        assert_eq!(unit_confidence(90), 0.9);
        assert_eq!(unit_confidence(250), 1.0);
        assert_eq!(unit_confidence(0), 0.0);
    }

    #[test]
    fn classification_mapping() {
        let report = build_report(&base_track(), 0.0);
        let class = &report.classification[0];
        assert_eq!(class.r#type, "Air vehicle");
        assert_eq!(class.confidence, Some(0.8));
        assert_eq!(class.sub_class[0].r#type, "UAV rotary wing");
        assert_eq!(class.sub_class[0].level, 1);

        let cases = [
            (0x00u8, "Unknown", None),
            (0x02, "Human", None),
            (0x03, "Land vehicle", None),
            (0x04, "Animal", Some("Bird")),
            (0x09, "Other", None),
        ];
        for (code, expected, sub) in cases {
            let track = RadarTrackItem {
                classification: code,
                ..base_track()
            };
            let class = classification_of(&track);
            assert_eq!(class.r#type, expected);
            assert_eq!(
                class.sub_class.first().map(|s| s.r#type.as_str()),
                sub
            );
        }
    }

    #[test]
    fn behaviour_from_motion_type() {
        for (motion, expected) in [(1u8, "Passive"), (2, "Active"), (3, "Active"), (4, "Active")] {
            let track = RadarTrackItem {
                motion_type: motion,
                ..base_track()
            };
            assert_eq!(behaviour_of(&track).r#type, expected);
        }
    }

    #[test]
    fn behaviour_speed_fallback() {
        // Unknown motion type, fast target: active.
        let track = RadarTrackItem {
            motion_type: 0,
            abs_vel: 3.0,
            velocity: 0.0,
            vx: 0.0,
            vy: 0.0,
            vz: 0.0,
            ..base_track()
        };
        assert_eq!(behaviour_of(&track).r#type, "Active");

        // Unknown motion type, nearly still: passive.
        let track = RadarTrackItem {
            motion_type: 0,
            abs_vel: 0.1,
            velocity: 0.2,
            vx: 0.1,
            vy: 0.1,
            vz: 0.0,
            ..base_track()
        };
        assert_eq!(behaviour_of(&track).r#type, "Passive");

        // Component speeds alone can trip the threshold.
        let track = RadarTrackItem {
            motion_type: 0,
            abs_vel: 0.0,
            velocity: 0.0,
            vx: 0.3,
            vy: 0.3,
            vz: 0.0,
            ..base_track()
        };
        assert_eq!(behaviour_of(&track).r#type, "Active");
    }

    #[test]
    fn object_info_entries() {
        let report = build_report(&base_track(), 0.0);
        assert_eq!(info_value(&report, "range"), Some("850.00m"));
        assert_eq!(info_value(&report, "azimuth"), Some("12.50°"));
        assert_eq!(info_value(&report, "velocity"), Some("-4.20m/s"));
        assert_eq!(info_value(&report, "absVel"), Some("6.10m/s"));
        assert_eq!(info_value(&report, "RCS"), Some("-21.00dBsm"));
        assert_eq!(info_value(&report, "trackType"), Some("TWS"));
        assert_eq!(info_value(&report, "trackState"), Some("Confirmed"));
        assert_eq!(info_value(&report, "heading"), Some("134.00°"));
        assert_eq!(info_value(&report, "trackDuration"), Some("12.3s"));
    }

    #[test]
    fn nonfinite_rcs_omitted() {
        let track = RadarTrackItem {
            rcs: f32::NAN,
            ..base_track()
        };
        let report = build_report(&track, 0.0);
        assert!(info_value(&report, "RCS").is_none());

        let track = RadarTrackItem {
            rcs: -180.0,
            ..base_track()
        };
        let report = build_report(&track, 0.0);
        assert!(info_value(&report, "RCS").is_none());
    }

    #[test]
    fn report_identity_fields() {
        let track = base_track();
        let report = build(
            &track,
            0.0,
            "object-ulid".to_string(),
            Some("task-3".to_string()),
            "report-ulid".to_string(),
        );
        assert_eq!(report.state.as_deref(), Some("detected"));
        assert_eq!(report.id.as_deref(), Some("track_17"));
        assert_eq!(report.object_id, "object-ulid");
        assert_eq!(report.task_id.as_deref(), Some("task-3"));
        assert_eq!(report.detection_confidence, Some(0.9));
    }
}
