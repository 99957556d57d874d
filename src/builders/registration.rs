//! Registration message content.
//!
//! Declares the node's capabilities, status cadence, operating modes,
//! detection taxonomy and config data to the DMM. The declared values mirror
//! the SDH100 product datasheet; a DetectionReport field not declared here
//! may be dropped or degraded by the peer.

use crate::proto::registration::{
    BehaviourDefinition, Capability, ClassDefinition, CommandDefinition, CommandType,
    ConfidenceDefinition, ConfigData, DetectionClassDefinition, DetectionDefinition,
    DetectionReportCategory, DetectionReportDefinition, Duration, EnuVelocityUnits,
    GeometricError, ModeDefinition, ModeType, NodeDefinition, NodeType, RegionDefinition,
    RegionType, ScanType, StatusDefinition, StatusReportCategory, StatusReportDefinition,
    SubClassDefinition, TaskDefinition, TimeUnits, TrackingType, VelocityType,
};
use crate::proto::{
    LocationCoordinateSystem, LocationDatum, LocationType, Registration, SpeedUnits,
};

pub(crate) const ICD_VERSION: &str = "BSI Flex 335 v2.0";
pub(crate) const MANUFACTURER: &str = "Skyfend";
pub(crate) const SHORT_NAME: &str = "SDH100";
pub(crate) const DISPLAY_NAME: &str = "Skyfend SDH100";
const HARDWARE_VERSION: &str = "1.0.0.0";
const DEFAULT_SOFTWARE_VERSION: &str = "1.0.0.0";

pub(crate) fn build(serial_number: &str, software_version: Option<&str>) -> Registration {
    Registration {
        node_definition: vec![NodeDefinition {
            node_type: NodeType::Radar as i32,
            node_sub_type: Vec::new(),
        }],
        icd_version: ICD_VERSION.to_string(),
        name: DISPLAY_NAME.to_string(),
        short_name: SHORT_NAME.to_string(),
        capabilities: capability_table(),
        status_definition: Some(status_definition()),
        mode_definition: vec![standby_mode(), normal_detection_mode()],
        config_data: vec![config_data(serial_number, software_version)],
    }
}

fn capability_table() -> Vec<Capability> {
    fn cap(category: &str, r#type: &str, value: &str, units: Option<&str>) -> Capability {
        Capability {
            category: category.to_string(),
            r#type: r#type.to_string(),
            value: value.to_string(),
            units: units.map(str::to_string),
        }
    }

    vec![
        cap("Platform", "Type", "Installation", None),
        cap("Radar", "Technology", "AESA_FMCW", None),
        cap("Radar", "MinFrequency", "24050", Some("MHz")),
        cap("Radar", "MaxFrequency", "24250", Some("MHz")),
        cap("Radar", "Bandwidth", "50", Some("MHz")),
        cap("Radar", "MaxRange", "4000", Some("m")),
        cap("Radar", "AzimuthFOV", "100", Some("deg")),
        cap("Radar", "ElevationFOV", "45", Some("deg")),
        cap("Radar", "MaxTargets", "200", None),
    ]
}

fn wgs84_location_type() -> LocationType {
    LocationType {
        location_units: LocationCoordinateSystem::LatLngDegM as i32,
        location_datum: LocationDatum::Wgs84G as i32,
        zone: None,
    }
}

fn duration(units: TimeUnits, value: f64) -> Duration {
    Duration {
        units: units as i32,
        value,
    }
}

fn status_definition() -> StatusDefinition {
    fn status_report_def(r#type: &str) -> StatusReportDefinition {
        StatusReportDefinition {
            category: StatusReportCategory::Status as i32,
            r#type: r#type.to_string(),
            units: None,
            on_change: false,
        }
    }

    StatusDefinition {
        status_interval: Some(duration(TimeUnits::Seconds, 5.0)),
        location_definition: Some(wgs84_location_type()),
        field_of_view_definition: Some(wgs84_location_type()),
        status_report: vec![
            status_report_def("MOTION_SENSITIVITY"),
            status_report_def("CLUTTER"),
            status_report_def("INTERNAL_FAULT"),
        ],
    }
}

/// Task envelope shared by both modes; only the mode-change target differs.
fn task_definition(mode_change_target: &str) -> TaskDefinition {
    TaskDefinition {
        concurrent_tasks: 10,
        region_definition: Some(RegionDefinition {
            region_type: vec![RegionType::AreaOfInterest as i32],
            region_area: vec![wgs84_location_type()],
        }),
        command: vec![CommandDefinition {
            units: mode_change_target.to_string(),
            completion_time: Some(duration(TimeUnits::Seconds, 1.0)),
            r#type: CommandType::ModeChange as i32,
        }],
    }
}

fn standby_mode() -> ModeDefinition {
    ModeDefinition {
        mode_name: "Standby".to_string(),
        mode_type: ModeType::Default as i32,
        mode_description: Some("The node is available for tasking".to_string()),
        settle_time: Some(duration(TimeUnits::Milliseconds, 1000.0)),
        maximum_latency: None,
        scan_type: None,
        tracking_type: None,
        detection_definition: Vec::new(),
        task: Some(task_definition("Normal_Detection")),
    }
}

fn normal_detection_mode() -> ModeDefinition {
    ModeDefinition {
        mode_name: "Normal_Detection".to_string(),
        mode_type: ModeType::Default as i32,
        mode_description: None,
        settle_time: Some(duration(TimeUnits::Milliseconds, 1000.0)),
        maximum_latency: Some(duration(TimeUnits::Milliseconds, 3000.0)),
        scan_type: Some(ScanType::Fixed as i32),
        tracking_type: Some(TrackingType::Track as i32),
        detection_definition: vec![detection_definition()],
        task: Some(task_definition("Standby")),
    }
}

fn detection_definition() -> DetectionDefinition {
    // Extra object_info fields reported alongside the standard ones. Only
    // supplementary attributes are declared; standard fields carry no entry.
    fn object_info_def(r#type: &str, units: &str) -> DetectionReportDefinition {
        DetectionReportDefinition {
            category: DetectionReportCategory::Object as i32,
            r#type: r#type.to_string(),
            units: Some(units.to_string()),
        }
    }

    DetectionDefinition {
        location_type: Some(wgs84_location_type()),
        detection_report: vec![
            object_info_def("RCS", "dBsm"),
            object_info_def("absVel", "m/s"),
            object_info_def("heading", "deg"),
            object_info_def("trackDuration", "s"),
            // For enumerated attributes, units carries the allowed values.
            object_info_def("trackType", "TWS, TAS"),
            object_info_def("trackState", "Confirmed, Tentative"),
        ],
        detection_class_definition: vec![class_taxonomy()],
        behaviour_definition: vec![
            BehaviourDefinition {
                r#type: "Active".to_string(),
            },
            BehaviourDefinition {
                r#type: "Passive".to_string(),
            },
        ],
        velocity_type: Some(VelocityType {
            enu_velocity_units: Some(EnuVelocityUnits {
                east_north_rate_units: SpeedUnits::Ms as i32,
                up_rate_units: SpeedUnits::Ms as i32,
            }),
            location_datum: LocationDatum::Wgs84G as i32,
        }),
        geometric_error: Some(GeometricError {
            r#type: "Standard Deviation".to_string(),
            units: "meters".to_string(),
            variation_type: "Linear with range".to_string(),
        }),
    }
}

/// Classification taxonomy per BSI Flex 335 v2.0 Table 96.
fn class_taxonomy() -> DetectionClassDefinition {
    fn class(r#type: &str) -> ClassDefinition {
        ClassDefinition {
            r#type: r#type.to_string(),
            sub_class: Vec::new(),
        }
    }

    fn class_with_sub(r#type: &str, sub: &str) -> ClassDefinition {
        ClassDefinition {
            r#type: r#type.to_string(),
            sub_class: vec![SubClassDefinition {
                r#type: sub.to_string(),
                level: 1,
            }],
        }
    }

    DetectionClassDefinition {
        confidence_definition: ConfidenceDefinition::SingleClass as i32,
        class_definition: vec![
            class_with_sub("Air vehicle", "UAV rotary wing"),
            class("Human"),
            class("Land vehicle"),
            class_with_sub("Animal", "Bird"),
            class("Unknown"),
            class("Other"),
        ],
    }
}

fn config_data(serial_number: &str, software_version: Option<&str>) -> ConfigData {
    let software = software_version
        .and_then(extract_version_number)
        .unwrap_or_else(|| {
            log::warn!("Could not extract software version, using default");
            DEFAULT_SOFTWARE_VERSION.to_string()
        });

    ConfigData {
        manufacturer: MANUFACTURER.to_string(),
        model: SHORT_NAME.to_string(),
        serial_number: serial_number.to_string(),
        hardware_version: HARDWARE_VERSION.to_string(),
        software_version: software,
    }
}

/// Extract the numeric version run from a free-form firmware string.
///
/// Handles the common factory formats:
/// `"SDH100-GE-FW-V10.01.05.34-STD"` → `"10.01.05.34"`,
/// `"SFL100_GE_FW_V10.01.06.02_STD"` → `"10.01.06.02"`,
/// `"ACUR101-V10.01.05.34"` → `"10.01.05.34"`.
/// Returns `None` when no `V`-marked digits-and-dots run exists.
pub(crate) fn extract_version_number(full_version: &str) -> Option<String> {
    let start = full_version
        .find("_V")
        .or_else(|| full_version.find("-V"))
        .map(|p| p + 2)
        .or_else(|| full_version.find('V').map(|p| p + 1))?;

    let rest = &full_version[start..];
    let end = rest
        .find(['_', '-'])
        .unwrap_or(rest.len());
    let version = &rest[..end];

    if !version.is_empty() && version.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        Some(version.to_string())
    } else {
        None
    }
}
