//! Message bindings for the BSI Flex 335 v2.0 schema.
//!
//! The schema itself is an external artifact owned by the ICD; this module
//! carries checked-in prost bindings for the subset of messages and fields
//! this client populates and parses, in the shape `prost-build` emits.
//! Keeping the bindings in-tree avoids a `protoc` requirement on build
//! machines for a schema that is frozen by the published ICD.
//!
//! Every message also derives `serde::Serialize` so outbound traffic can be
//! rendered as JSON for debug logging.

use serde::Serialize;

/// Top-level wrapper carried in every frame.
///
/// Exactly one `content` variant is set per message.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct SapientMessage {
    #[prost(message, optional, tag = "1")]
    pub timestamp: Option<Timestamp>,
    #[prost(string, tag = "2")]
    pub node_id: String,
    #[prost(
        oneof = "sapient_message::Content",
        tags = "3, 4, 5, 6, 7, 8, 9"
    )]
    pub content: Option<sapient_message::Content>,
}

pub mod sapient_message {
    use serde::Serialize;

    #[derive(Clone, PartialEq, ::prost::Oneof, Serialize)]
    pub enum Content {
        #[prost(message, tag = "3")]
        Registration(super::Registration),
        #[prost(message, tag = "4")]
        RegistrationAck(super::RegistrationAck),
        #[prost(message, tag = "5")]
        StatusReport(super::StatusReport),
        #[prost(message, tag = "6")]
        DetectionReport(super::DetectionReport),
        #[prost(message, tag = "7")]
        Task(super::Task),
        #[prost(message, tag = "8")]
        TaskAck(super::TaskAck),
        #[prost(message, tag = "9")]
        Alert(super::Alert),
    }
}

/// UTC instant as seconds + nanoseconds since the Unix epoch
/// (wire-compatible with `google.protobuf.Timestamp`).
#[derive(Clone, Copy, PartialEq, ::prost::Message, Serialize)]
pub struct Timestamp {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    #[prost(int32, tag = "2")]
    pub nanos: i32,
}

// ============================================================================
// Shared location / kinematics types
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
#[repr(i32)]
pub enum LocationCoordinateSystem {
    Unspecified = 0,
    LatLngDegM = 1,
    LatLngRadM = 2,
    UtmM = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
#[repr(i32)]
pub enum LocationDatum {
    Unspecified = 0,
    Wgs84E = 1,
    Wgs84G = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
#[repr(i32)]
pub enum RangeBearingCoordinateSystem {
    Unspecified = 0,
    DegreesM = 1,
    RadiansM = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
#[repr(i32)]
pub enum RangeBearingDatum {
    Unspecified = 0,
    True = 1,
    Magnetic = 2,
    Grid = 3,
    Platform = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
#[repr(i32)]
pub enum SpeedUnits {
    Unspecified = 0,
    Ms = 1,
    Kph = 2,
    Mph = 3,
}

/// Geographic point, axes per `coordinate_system` (x=lon, y=lat, z=alt for
/// LAT_LNG_DEG_M).
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Location {
    #[prost(double, tag = "1")]
    pub x: f64,
    #[prost(double, tag = "2")]
    pub y: f64,
    #[prost(double, optional, tag = "3")]
    pub z: Option<f64>,
    #[prost(double, optional, tag = "4")]
    pub x_error: Option<f64>,
    #[prost(double, optional, tag = "5")]
    pub y_error: Option<f64>,
    #[prost(double, optional, tag = "6")]
    pub z_error: Option<f64>,
    #[prost(enumeration = "LocationCoordinateSystem", tag = "7")]
    pub coordinate_system: i32,
    #[prost(enumeration = "LocationDatum", tag = "8")]
    pub datum: i32,
}

/// Sensor-relative polar position.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct RangeBearing {
    #[prost(double, optional, tag = "1")]
    pub azimuth: Option<f64>,
    #[prost(double, optional, tag = "2")]
    pub elevation: Option<f64>,
    #[prost(double, optional, tag = "3")]
    pub range: Option<f64>,
    #[prost(double, optional, tag = "4")]
    pub azimuth_error: Option<f64>,
    #[prost(double, optional, tag = "5")]
    pub elevation_error: Option<f64>,
    #[prost(double, optional, tag = "6")]
    pub range_error: Option<f64>,
    #[prost(enumeration = "RangeBearingCoordinateSystem", tag = "7")]
    pub coordinate_system: i32,
    #[prost(enumeration = "RangeBearingDatum", tag = "8")]
    pub datum: i32,
}

/// Cone-shaped coverage volume (used for field of view).
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct RangeBearingCone {
    #[prost(double, tag = "1")]
    pub azimuth: f64,
    #[prost(double, optional, tag = "2")]
    pub elevation: Option<f64>,
    #[prost(double, optional, tag = "3")]
    pub range: Option<f64>,
    #[prost(double, optional, tag = "4")]
    pub horizontal_extent: Option<f64>,
    #[prost(double, optional, tag = "5")]
    pub vertical_extent: Option<f64>,
    #[prost(enumeration = "RangeBearingCoordinateSystem", tag = "6")]
    pub coordinate_system: i32,
    #[prost(enumeration = "RangeBearingDatum", tag = "7")]
    pub datum: i32,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct LocationOrRangeBearing {
    #[prost(oneof = "location_or_range_bearing::Coverage", tags = "1, 2")]
    pub coverage: Option<location_or_range_bearing::Coverage>,
}

pub mod location_or_range_bearing {
    use serde::Serialize;

    #[derive(Clone, PartialEq, ::prost::Oneof, Serialize)]
    pub enum Coverage {
        #[prost(message, tag = "1")]
        RangeBearing(super::RangeBearingCone),
        #[prost(message, tag = "2")]
        Location(super::Location),
    }
}

/// East-North-Up velocity in m/s.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct EnuVelocity {
    #[prost(double, tag = "1")]
    pub east_rate: f64,
    #[prost(double, tag = "2")]
    pub north_rate: f64,
    #[prost(double, optional, tag = "3")]
    pub up_rate: Option<f64>,
    #[prost(double, optional, tag = "4")]
    pub east_rate_error: Option<f64>,
    #[prost(double, optional, tag = "5")]
    pub north_rate_error: Option<f64>,
    #[prost(double, optional, tag = "6")]
    pub up_rate_error: Option<f64>,
}

/// Coordinate system / datum declaration used throughout Registration.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct LocationType {
    #[prost(enumeration = "LocationCoordinateSystem", tag = "1")]
    pub location_units: i32,
    #[prost(enumeration = "LocationDatum", tag = "2")]
    pub location_datum: i32,
    #[prost(string, optional, tag = "3")]
    pub zone: Option<String>,
}

// ============================================================================
// Registration
// ============================================================================

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Registration {
    #[prost(message, repeated, tag = "1")]
    pub node_definition: Vec<registration::NodeDefinition>,
    #[prost(string, tag = "2")]
    pub icd_version: String,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(string, tag = "4")]
    pub short_name: String,
    #[prost(message, repeated, tag = "5")]
    pub capabilities: Vec<registration::Capability>,
    #[prost(message, optional, tag = "6")]
    pub status_definition: Option<registration::StatusDefinition>,
    #[prost(message, repeated, tag = "7")]
    pub mode_definition: Vec<registration::ModeDefinition>,
    #[prost(message, repeated, tag = "8")]
    pub config_data: Vec<registration::ConfigData>,
}

pub mod registration {
    use serde::Serialize;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum NodeType {
        Unspecified = 0,
        Radar = 1,
        Camera = 2,
        Acoustic = 3,
        Other = 4,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum TimeUnits {
        Unspecified = 0,
        Nanoseconds = 1,
        Microseconds = 2,
        Milliseconds = 3,
        Seconds = 4,
        Minutes = 5,
        Hours = 6,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum ModeType {
        Unspecified = 0,
        Default = 1,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum ScanType {
        Unspecified = 0,
        Fixed = 1,
        Scanning = 2,
        Steerable = 3,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum TrackingType {
        Unspecified = 0,
        None = 1,
        Tracklet = 2,
        Track = 3,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum CommandType {
        Unspecified = 0,
        Request = 1,
        ModeChange = 2,
        LookAt = 3,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum RegionType {
        Unspecified = 0,
        AreaOfInterest = 1,
        Ignore = 2,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum StatusReportCategory {
        Unspecified = 0,
        Sensor = 1,
        Status = 2,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum DetectionReportCategory {
        Unspecified = 0,
        Detection = 1,
        Track = 2,
        Object = 3,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum ConfidenceDefinition {
        Unspecified = 0,
        SingleClass = 1,
        MultiClass = 2,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct NodeDefinition {
        #[prost(enumeration = "NodeType", tag = "1")]
        pub node_type: i32,
        #[prost(string, repeated, tag = "2")]
        pub node_sub_type: Vec<String>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct Capability {
        #[prost(string, tag = "1")]
        pub category: String,
        #[prost(string, tag = "2")]
        pub r#type: String,
        #[prost(string, tag = "3")]
        pub value: String,
        #[prost(string, optional, tag = "4")]
        pub units: Option<String>,
    }

    /// Scalar with declared time units.
    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct Duration {
        #[prost(enumeration = "TimeUnits", tag = "1")]
        pub units: i32,
        #[prost(double, tag = "2")]
        pub value: f64,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct StatusDefinition {
        #[prost(message, optional, tag = "1")]
        pub status_interval: Option<Duration>,
        #[prost(message, optional, tag = "2")]
        pub location_definition: Option<super::LocationType>,
        #[prost(message, optional, tag = "3")]
        pub field_of_view_definition: Option<super::LocationType>,
        #[prost(message, repeated, tag = "4")]
        pub status_report: Vec<StatusReportDefinition>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct StatusReportDefinition {
        #[prost(enumeration = "StatusReportCategory", tag = "1")]
        pub category: i32,
        #[prost(string, tag = "2")]
        pub r#type: String,
        #[prost(string, optional, tag = "3")]
        pub units: Option<String>,
        #[prost(bool, tag = "4")]
        pub on_change: bool,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct ModeDefinition {
        #[prost(string, tag = "1")]
        pub mode_name: String,
        #[prost(enumeration = "ModeType", tag = "2")]
        pub mode_type: i32,
        #[prost(string, optional, tag = "3")]
        pub mode_description: Option<String>,
        #[prost(message, optional, tag = "4")]
        pub settle_time: Option<Duration>,
        #[prost(message, optional, tag = "5")]
        pub maximum_latency: Option<Duration>,
        #[prost(enumeration = "ScanType", optional, tag = "6")]
        pub scan_type: Option<i32>,
        #[prost(enumeration = "TrackingType", optional, tag = "7")]
        pub tracking_type: Option<i32>,
        #[prost(message, repeated, tag = "8")]
        pub detection_definition: Vec<DetectionDefinition>,
        #[prost(message, optional, tag = "9")]
        pub task: Option<TaskDefinition>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct DetectionDefinition {
        #[prost(message, optional, tag = "1")]
        pub location_type: Option<super::LocationType>,
        #[prost(message, repeated, tag = "2")]
        pub detection_report: Vec<DetectionReportDefinition>,
        #[prost(message, repeated, tag = "3")]
        pub detection_class_definition: Vec<DetectionClassDefinition>,
        #[prost(message, repeated, tag = "4")]
        pub behaviour_definition: Vec<BehaviourDefinition>,
        #[prost(message, optional, tag = "5")]
        pub velocity_type: Option<VelocityType>,
        #[prost(message, optional, tag = "6")]
        pub geometric_error: Option<GeometricError>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct DetectionReportDefinition {
        #[prost(enumeration = "DetectionReportCategory", tag = "1")]
        pub category: i32,
        #[prost(string, tag = "2")]
        pub r#type: String,
        #[prost(string, optional, tag = "3")]
        pub units: Option<String>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct DetectionClassDefinition {
        #[prost(enumeration = "ConfidenceDefinition", tag = "1")]
        pub confidence_definition: i32,
        #[prost(message, repeated, tag = "2")]
        pub class_definition: Vec<ClassDefinition>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct ClassDefinition {
        #[prost(string, tag = "1")]
        pub r#type: String,
        #[prost(message, repeated, tag = "2")]
        pub sub_class: Vec<SubClassDefinition>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct SubClassDefinition {
        #[prost(string, tag = "1")]
        pub r#type: String,
        #[prost(int32, tag = "2")]
        pub level: i32,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct BehaviourDefinition {
        #[prost(string, tag = "1")]
        pub r#type: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct VelocityType {
        #[prost(message, optional, tag = "1")]
        pub enu_velocity_units: Option<EnuVelocityUnits>,
        #[prost(enumeration = "super::LocationDatum", tag = "2")]
        pub location_datum: i32,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct EnuVelocityUnits {
        #[prost(enumeration = "super::SpeedUnits", tag = "1")]
        pub east_north_rate_units: i32,
        #[prost(enumeration = "super::SpeedUnits", tag = "2")]
        pub up_rate_units: i32,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct GeometricError {
        #[prost(string, tag = "1")]
        pub r#type: String,
        #[prost(string, tag = "2")]
        pub units: String,
        #[prost(string, tag = "3")]
        pub variation_type: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct TaskDefinition {
        #[prost(int32, tag = "1")]
        pub concurrent_tasks: i32,
        #[prost(message, optional, tag = "2")]
        pub region_definition: Option<RegionDefinition>,
        #[prost(message, repeated, tag = "3")]
        pub command: Vec<CommandDefinition>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct RegionDefinition {
        #[prost(enumeration = "RegionType", repeated, tag = "1")]
        pub region_type: Vec<i32>,
        #[prost(message, repeated, tag = "2")]
        pub region_area: Vec<super::LocationType>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct CommandDefinition {
        #[prost(string, tag = "1")]
        pub units: String,
        #[prost(message, optional, tag = "2")]
        pub completion_time: Option<Duration>,
        #[prost(enumeration = "CommandType", tag = "3")]
        pub r#type: i32,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct ConfigData {
        #[prost(string, tag = "1")]
        pub manufacturer: String,
        #[prost(string, tag = "2")]
        pub model: String,
        #[prost(string, tag = "3")]
        pub serial_number: String,
        #[prost(string, tag = "4")]
        pub hardware_version: String,
        #[prost(string, tag = "5")]
        pub software_version: String,
    }
}

/// Acknowledgement of a Registration; the client only observes its arrival.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct RegistrationAck {
    #[prost(bool, optional, tag = "1")]
    pub accepted: Option<bool>,
    #[prost(string, repeated, tag = "2")]
    pub ack_response_reason: Vec<String>,
}

// ============================================================================
// StatusReport
// ============================================================================

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct StatusReport {
    #[prost(string, tag = "1")]
    pub report_id: String,
    #[prost(enumeration = "status_report::Info", tag = "2")]
    pub info: i32,
    #[prost(enumeration = "status_report::System", tag = "3")]
    pub system: i32,
    #[prost(string, optional, tag = "4")]
    pub active_task_id: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub mode: Option<String>,
    #[prost(message, optional, tag = "6")]
    pub power: Option<status_report::Power>,
    #[prost(message, optional, tag = "7")]
    pub node_location: Option<Location>,
    #[prost(message, optional, tag = "8")]
    pub field_of_view: Option<LocationOrRangeBearing>,
    #[prost(message, repeated, tag = "9")]
    pub status: Vec<status_report::Status>,
}

pub mod status_report {
    use serde::Serialize;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum Info {
        Unspecified = 0,
        New = 1,
        Unchanged = 2,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum System {
        Unspecified = 0,
        Ok = 1,
        Warning = 2,
        Error = 3,
        Tamper = 4,
        Goodbye = 5,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum PowerSource {
        Unspecified = 0,
        Other = 1,
        Mains = 2,
        InternalBattery = 3,
        ExternalBattery = 4,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum PowerStatus {
        Unspecified = 0,
        Ok = 1,
        Fault = 2,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum StatusLevel {
        Unspecified = 0,
        SensorStatus = 1,
        InformationStatus = 2,
        WarningStatus = 3,
        ErrorStatus = 4,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum StatusType {
        Unspecified = 0,
        Platform = 1,
        MotionSensitivity = 2,
        Clutter = 3,
        InternalFault = 4,
        NotDetecting = 5,
        Other = 6,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct Power {
        #[prost(enumeration = "PowerSource", tag = "1")]
        pub source: i32,
        #[prost(enumeration = "PowerStatus", tag = "2")]
        pub status: i32,
        #[prost(int32, optional, tag = "3")]
        pub level: Option<i32>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct Status {
        #[prost(enumeration = "StatusLevel", tag = "1")]
        pub status_level: i32,
        #[prost(enumeration = "StatusType", tag = "2")]
        pub status_type: i32,
        #[prost(string, tag = "3")]
        pub status_value: String,
    }
}

// ============================================================================
// DetectionReport
// ============================================================================

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct DetectionReport {
    #[prost(string, tag = "1")]
    pub report_id: String,
    #[prost(string, tag = "2")]
    pub object_id: String,
    #[prost(string, optional, tag = "3")]
    pub task_id: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub state: Option<String>,
    #[prost(oneof = "detection_report::Position", tags = "5, 6")]
    pub position: Option<detection_report::Position>,
    #[prost(float, optional, tag = "7")]
    pub detection_confidence: Option<f32>,
    #[prost(message, optional, tag = "8")]
    pub enu_velocity: Option<EnuVelocity>,
    #[prost(message, repeated, tag = "9")]
    pub object_info: Vec<detection_report::ObjectInfo>,
    #[prost(message, repeated, tag = "10")]
    pub classification: Vec<detection_report::Classification>,
    #[prost(message, repeated, tag = "11")]
    pub behaviour: Vec<detection_report::Behaviour>,
    #[prost(string, optional, tag = "12")]
    pub id: Option<String>,
}

pub mod detection_report {
    use serde::Serialize;

    #[derive(Clone, PartialEq, ::prost::Oneof, Serialize)]
    pub enum Position {
        #[prost(message, tag = "5")]
        Location(super::Location),
        #[prost(message, tag = "6")]
        RangeBearing(super::RangeBearing),
    }

    /// Extra object attribute declared in the Registration detection
    /// definitions.
    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct ObjectInfo {
        #[prost(string, tag = "1")]
        pub r#type: String,
        #[prost(string, tag = "2")]
        pub value: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct Classification {
        #[prost(string, tag = "1")]
        pub r#type: String,
        #[prost(float, optional, tag = "2")]
        pub confidence: Option<f32>,
        #[prost(message, repeated, tag = "3")]
        pub sub_class: Vec<SubClass>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct SubClass {
        #[prost(string, tag = "1")]
        pub r#type: String,
        #[prost(int32, tag = "2")]
        pub level: i32,
        #[prost(float, optional, tag = "3")]
        pub confidence: Option<f32>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct Behaviour {
        #[prost(string, tag = "1")]
        pub r#type: String,
        #[prost(float, optional, tag = "2")]
        pub confidence: Option<f32>,
    }
}

// ============================================================================
// Task / TaskAck
// ============================================================================

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Task {
    #[prost(string, optional, tag = "1")]
    pub task_id: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub task_name: Option<String>,
    #[prost(enumeration = "task::Control", optional, tag = "3")]
    pub control: Option<i32>,
    #[prost(message, optional, tag = "4")]
    pub command: Option<task::Command>,
    #[prost(message, repeated, tag = "5")]
    pub region: Vec<task::Region>,
}

pub mod task {
    use serde::Serialize;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum Control {
        Unspecified = 0,
        Start = 1,
        Stop = 2,
        Pause = 3,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct Command {
        #[prost(string, optional, tag = "1")]
        pub request: Option<String>,
        #[prost(string, optional, tag = "2")]
        pub mode_change: Option<String>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct Region {
        #[prost(string, optional, tag = "1")]
        pub region_id: Option<String>,
        #[prost(string, optional, tag = "2")]
        pub region_name: Option<String>,
    }
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct TaskAck {
    #[prost(string, optional, tag = "1")]
    pub task_id: Option<String>,
    #[prost(enumeration = "task_ack::TaskStatus", tag = "2")]
    pub task_status: i32,
    #[prost(string, repeated, tag = "3")]
    pub reason: Vec<String>,
}

pub mod task_ack {
    use serde::Serialize;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum TaskStatus {
        Unspecified = 0,
        Accepted = 1,
        Rejected = 2,
    }
}

// ============================================================================
// Alert
// ============================================================================

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Alert {
    #[prost(string, tag = "1")]
    pub alert_id: String,
    #[prost(enumeration = "alert::AlertType", optional, tag = "2")]
    pub alert_type: Option<i32>,
    #[prost(enumeration = "alert::AlertStatus", optional, tag = "3")]
    pub status: Option<i32>,
    #[prost(string, optional, tag = "4")]
    pub description: Option<String>,
}

pub mod alert {
    use serde::Serialize;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum AlertType {
        Unspecified = 0,
        Information = 1,
        Warning = 2,
        Critical = 3,
        Error = 4,
        Fatal = 5,
        ModeChange = 6,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration, Serialize)]
    #[repr(i32)]
    pub enum AlertStatus {
        Unspecified = 0,
        Active = 1,
        Acknowledge = 2,
        Reject = 3,
        Clear = 4,
    }
}
