//! StatusReport message content.
//!
//! The report carries the node position, power, field of view and a list of
//! status entries. `info` distinguishes a changed report (`INFO_NEW`) from a
//! repeat (`INFO_UNCHANGED`): the builder keeps a snapshot of the
//! change-relevant fields and compares with tolerances so sensor noise does
//! not flag every report as new.

use super::{horizontal_error_deg, normalize_azimuth};
use crate::proto::location_or_range_bearing::Coverage;
use crate::proto::status_report::{
    Info, Power, PowerSource, PowerStatus, Status, StatusLevel, StatusType, System,
};
use crate::proto::{
    Location, LocationCoordinateSystem, LocationDatum, LocationOrRangeBearing, RangeBearingCone,
    RangeBearingCoordinateSystem, RangeBearingDatum, StatusReport,
};
use crate::radar::{attitude_source_bits, platform_type_bits, power_source_bits};
use crate::radar::{ClutterStatus, RadarState};
use parking_lot::Mutex;

/// Change-relevant subset of the node state.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatusSnapshot {
    pub sys_status: u32,
    pub fault_count: u32,
    pub max_fault_level: u8,
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
    pub heading: f64,
    pub pitching: f64,
    pub rolling: f64,
    pub track_enabled: bool,
    pub otm_mode: bool,
    pub filter_level: u32,
    pub weather_clutter_filter: bool,
    pub temperature: f32,
}

/// ~1 m at the equator.
const POSITION_EPSILON: f64 = 1e-5;
const ANGLE_EPSILON: f64 = 0.1;
/// Wide tolerance so ordinary thermal drift does not mark reports as new.
const TEMP_EPSILON: f32 = 5.0;

impl StatusSnapshot {
    fn approx_eq(&self, other: &Self) -> bool {
        self.sys_status == other.sys_status
            && self.fault_count == other.fault_count
            && self.max_fault_level == other.max_fault_level
            && (self.longitude - other.longitude).abs() < POSITION_EPSILON
            && (self.latitude - other.latitude).abs() < POSITION_EPSILON
            && (self.altitude - other.altitude).abs() < POSITION_EPSILON
            && (self.heading - other.heading).abs() < ANGLE_EPSILON
            && (self.pitching - other.pitching).abs() < ANGLE_EPSILON
            && (self.rolling - other.rolling).abs() < ANGLE_EPSILON
            && self.track_enabled == other.track_enabled
            && self.otm_mode == other.otm_mode
            && self.filter_level == other.filter_level
            && self.weather_clutter_filter == other.weather_clutter_filter
            && (self.temperature - other.temperature).abs() < TEMP_EPSILON
    }
}

/// Everything a status report is built from.
pub(crate) struct StatusInputs {
    pub state: RadarState,
    pub track_enabled: bool,
    pub otm_mode: bool,
    pub clutter: ClutterStatus,
    pub temperature: f32,
    pub active_task_id: Option<String>,
    pub report_id: String,
}

pub(crate) fn build(
    inputs: StatusInputs,
    last_snapshot: &Mutex<Option<StatusSnapshot>>,
) -> StatusReport {
    let state = &inputs.state;
    let max_fault_level = state.max_fault_level();
    let attitude = state.attitude.unwrap_or_default();

    let current = StatusSnapshot {
        sys_status: state.sys_status.unwrap_or(0),
        fault_count: state.faults.len() as u32,
        max_fault_level,
        longitude: state.lla.map(|l| l.longitude).unwrap_or(0.0),
        latitude: state.lla.map(|l| l.latitude).unwrap_or(0.0),
        altitude: state.lla.map(|l| l.altitude).unwrap_or(0.0),
        heading: attitude.heading.unwrap_or(0.0),
        pitching: attitude.pitching.unwrap_or(0.0),
        rolling: attitude.rolling.unwrap_or(0.0),
        track_enabled: inputs.track_enabled,
        otm_mode: inputs.otm_mode,
        filter_level: inputs.clutter.filter_level,
        weather_clutter_filter: inputs.clutter.weather_filter,
        temperature: inputs.temperature,
    };

    let info = {
        let mut last = last_snapshot.lock();
        match last.as_ref() {
            Some(prev) if prev.approx_eq(&current) => Info::Unchanged,
            _ => {
                *last = Some(current);
                Info::New
            }
        }
    };

    let system = system_of(state, max_fault_level);
    let mode = mode_of(state.sys_status);
    let power = power_of(state);
    let node_location = node_location_of(state);
    let field_of_view = field_of_view_of(state);
    let status = status_entries(&inputs);

    StatusReport {
        report_id: inputs.report_id,
        info: info as i32,
        system: system as i32,
        active_task_id: inputs.active_task_id,
        mode: Some(mode.to_string()),
        power: Some(power),
        node_location,
        field_of_view,
        status,
    }
}

/// Overall health: any unusable fault wins, degraded/advisory faults warn,
/// an operational system state is OK, anything else is unspecified
/// (initializing, self-check, ...).
fn system_of(state: &RadarState, max_fault_level: u8) -> System {
    match max_fault_level {
        0x03 => System::Error,
        0x01 | 0x02 => System::Warning,
        _ => match state.sys_status {
            Some(3..=5) => System::Ok,
            _ => System::Unspecified,
        },
    }
}

fn mode_of(sys_status: Option<u32>) -> &'static str {
    match sys_status {
        Some(0) => "default",
        Some(1) => "initializing",
        Some(2) => "self_checking",
        Some(3) => "standby",
        Some(4) => "normal_detection",
        Some(5) => "search_mode",
        Some(6) => "fire_control",
        Some(11) => "test_mode",
        Some(22) => "factory_mode",
        Some(33) => "mesh_network",
        Some(99) => "error",
        _ => "unknown",
    }
}

fn node_location_of(state: &RadarState) -> Option<Location> {
    let lla = state.lla?;
    // (0, 0) means no fix yet; better to omit than report the gulf of Guinea.
    if lla.longitude == 0.0 && lla.latitude == 0.0 {
        return None;
    }
    let error_deg = horizontal_error_deg();
    Some(Location {
        x: lla.longitude,
        y: lla.latitude,
        z: Some(lla.altitude),
        x_error: Some(error_deg),
        y_error: Some(error_deg),
        z_error: None,
        coordinate_system: LocationCoordinateSystem::LatLngDegM as i32,
        datum: LocationDatum::Wgs84G as i32,
    })
}

fn power_of(state: &RadarState) -> Power {
    let source_bits = state.status_bits.map(power_source_bits);
    let source = match source_bits {
        Some(0x00) | None => PowerSource::Mains,
        Some(0x01) => PowerSource::InternalBattery,
        Some(_) => PowerSource::Unspecified,
    };

    let on_battery = source_bits == Some(0x01);
    let (status, level) = match (on_battery, state.electricity) {
        (true, Some(charge)) => {
            let status = if charge > 20 {
                PowerStatus::Ok
            } else {
                PowerStatus::Fault
            };
            (status, Some(charge as i32))
        }
        _ => (PowerStatus::Ok, None),
    };

    Power {
        source: source as i32,
        status: status as i32,
        level,
    }
}

fn field_of_view_of(state: &RadarState) -> Option<LocationOrRangeBearing> {
    let azi_center = state.azi_scan_center?;
    let azi_scope = state.azi_scan_scope?;
    let ele_center = state.ele_scan_center?;
    let ele_scope = state.ele_scan_scope?;
    let radius = state.radar_scan_radius?;

    let attitude = state.attitude.unwrap_or_default();
    let heading = attitude.heading.unwrap_or(0.0);
    let pitching = attitude.pitching.unwrap_or(0.0);

    Some(LocationOrRangeBearing {
        coverage: Some(Coverage::RangeBearing(RangeBearingCone {
            // Beam center relative to true north.
            azimuth: normalize_azimuth(azi_center + heading),
            // Beam center relative to the horizontal plane.
            elevation: Some(ele_center + pitching),
            range: Some(radius),
            horizontal_extent: Some(azi_scope),
            vertical_extent: Some(ele_scope),
            coordinate_system: RangeBearingCoordinateSystem::DegreesM as i32,
            datum: RangeBearingDatum::True as i32,
        })),
    })
}

fn status_entries(inputs: &StatusInputs) -> Vec<Status> {
    let mut entries = Vec::new();
    let mut add = |level: StatusLevel, r#type: StatusType, value: String| {
        entries.push(Status {
            status_level: level as i32,
            status_type: r#type as i32,
            status_value: value,
        });
    };

    if let Some(bits) = inputs.state.status_bits {
        let platform = match platform_type_bits(bits) {
            0x00 => "Fixed",
            0x01 => "Fixed_Turntable",
            0x02 => "Vehicle_Mounted",
            0x03 => "Airborne",
            _ => "Unknown",
        };
        add(
            StatusLevel::InformationStatus,
            StatusType::Platform,
            platform.to_string(),
        );

        let attitude_source = match attitude_source_bits(bits) {
            0x00 => "Radar_Attitude_System",
            0x01 => "Radar_Attitude_System_Calibrated",
            0x02 => "External_Attitude_Input",
            _ => "Unknown",
        };
        add(
            StatusLevel::InformationStatus,
            StatusType::Platform,
            attitude_source.to_string(),
        );
    }

    let otm = if inputs.otm_mode {
        "OTM_Mode_Enabled"
    } else {
        "OTM_Mode_Disabled"
    };
    add(
        StatusLevel::InformationStatus,
        StatusType::MotionSensitivity,
        otm.to_string(),
    );

    add(
        StatusLevel::InformationStatus,
        StatusType::Clutter,
        format!("Filter_Level={}", inputs.clutter.filter_level),
    );
    let weather = if inputs.clutter.weather_filter {
        "Weather_Clutter_Filter=Enabled"
    } else {
        "Weather_Clutter_Filter=Disabled"
    };
    add(
        StatusLevel::InformationStatus,
        StatusType::Clutter,
        weather.to_string(),
    );

    // Temperature reads 0 until the sensor has reported.
    if inputs.temperature > 0.0 {
        let level = if inputs.temperature > 80.0 {
            StatusLevel::ErrorStatus
        } else if inputs.temperature > 70.0 {
            StatusLevel::WarningStatus
        } else {
            StatusLevel::InformationStatus
        };
        add(
            level,
            StatusType::Other,
            format!("Temperature={:.1}°C", inputs.temperature),
        );
    }

    for fault in &inputs.state.faults {
        let level = match fault.level {
            0x03 => StatusLevel::ErrorStatus,
            0x01 | 0x02 => StatusLevel::WarningStatus,
            _ => StatusLevel::InformationStatus,
        };
        add(
            level,
            StatusType::InternalFault,
            format!("Fault_Code=0x{:04X}, Level=0x{:02X}", fault.code, fault.level),
        );
    }

    entries
}
