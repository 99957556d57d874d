//! Radar domain types and the seams to the surrounding system.
//!
//! The client does not talk to the radar itself; it consumes fused snapshots
//! and track items produced elsewhere. [`RadarDataSource`] and
//! [`DeviceIdentity`] are the two seams. [`RadarStateCache`] is the stock
//! source implementation: the track/attitude pipeline pushes each fused
//! snapshot into it just before publication, and the client reads the latest
//! copy when building reports.

use parking_lot::Mutex;
use std::sync::Arc;

/// Geodetic position of the radar platform (WGS84 degrees / metres).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Lla {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
}

/// Platform attitude in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Attitude {
    pub heading: Option<f64>,
    pub pitching: Option<f64>,
    pub rolling: Option<f64>,
}

/// One reported hardware fault.
///
/// Levels: 0x01 advisory, 0x02 degraded, 0x03 unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault {
    pub code: u16,
    pub level: u8,
}

/// Latest fused radar snapshot.
///
/// `status_bits` packs hardware flags:
/// B0..B2 motion state, B3..B5 platform type, B6..B8 detection mode,
/// B9..B10 power source, B11..B12 network speed, B13..B14 power mode,
/// B15..B16 attitude source.
#[derive(Debug, Clone, Default)]
pub struct RadarState {
    pub sys_status: Option<u32>,
    pub status_bits: Option<u32>,
    /// Battery charge percentage, when battery-powered.
    pub electricity: Option<u8>,
    pub lla: Option<Lla>,
    pub attitude: Option<Attitude>,
    pub faults: Vec<Fault>,
    /// Beam scan geometry, degrees / metres.
    pub azi_scan_center: Option<f64>,
    pub azi_scan_scope: Option<f64>,
    pub ele_scan_center: Option<f64>,
    pub ele_scan_scope: Option<f64>,
    pub radar_scan_radius: Option<f64>,
    /// Device serial number as reported by the radar itself.
    pub serial_number: Option<String>,
}

impl RadarState {
    /// Highest fault level present, 0 when fault-free.
    pub fn max_fault_level(&self) -> u8 {
        self.faults.iter().map(|f| f.level).max().unwrap_or(0)
    }

    /// Platform heading, defaulting to north-facing when attitude is absent.
    pub fn heading_or_default(&self) -> f64 {
        self.attitude.and_then(|a| a.heading).unwrap_or(0.0)
    }
}

/// One tracked target.
///
/// Angles are radar-relative degrees, velocities are m/s in the radar's NWU
/// frame (`vx`=north, `vy`=west, `vz`=up), probabilities are percentages.
#[derive(Debug, Clone, Default)]
pub struct RadarTrackItem {
    pub id: u32,
    /// Radar-relative azimuth, valid -60..60.
    pub azimuth: f32,
    /// Elevation, valid -40..40.
    pub elevation: f32,
    /// Slant range in metres, valid 0..6000.
    pub range: f32,
    /// Radial velocity, m/s.
    pub velocity: f32,
    /// Ground speed, m/s.
    pub abs_vel: f32,
    /// Radar cross-section, dBsm.
    pub rcs: f32,
    pub longitude: f32,
    pub latitude: f32,
    pub altitude: f32,
    pub vx: f32,
    pub vy: f32,
    pub vz: f32,
    pub vx_variance: f32,
    /// Target existence probability, 0..100.
    pub existing_prob: u32,
    /// Classification confidence, 0..100.
    pub classify_prob: u32,
    /// 0 unknown, 1 UAV, 2 person, 3 vehicle, 4 bird, other reserved.
    pub classification: u8,
    /// 0 unknown, 1 stationary, 2 hovering, 3 approaching, 4 departing.
    pub motion_type: u8,
    /// 0 = track-while-scan, nonzero = track-and-scan.
    pub tws_tas_flag: u8,
    /// 1 = confirmed track, 0 = tentative.
    pub state_type: u8,
    /// Course over ground, degrees 0..360.
    pub orientation_angle: f32,
    /// Track age in seconds.
    pub alive: f32,
}

/// Clutter filter settings as currently applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClutterStatus {
    pub filter_level: u32,
    pub weather_filter: bool,
}

/// Source of fused radar data and derived runtime flags.
pub trait RadarDataSource: Send + Sync {
    /// Latest fused snapshot, `None` until the first capture.
    fn radar_state(&self) -> Option<RadarState>;

    /// Hottest board temperature in °C; 0.0 when no sensor has reported.
    fn temperature(&self) -> f32;

    fn clutter_status(&self) -> ClutterStatus;

    /// Whether detection is switched on.
    fn track_enabled(&self) -> bool;

    /// On-the-move motion-sensitivity mode flag.
    fn otm_mode(&self) -> bool;
}

/// Device identity accessor backed by persistent storage.
pub trait DeviceIdentity: Send + Sync {
    fn serial_number(&self) -> Option<String>;

    /// Free-form firmware version string, e.g. `"SDH100-GE-FW-V10.01.05.34-STD"`.
    fn software_version(&self) -> Option<String>;
}

/// Thread-safe holder for the latest fused snapshot.
///
/// Builders copy on read; the producer side overwrites in place.
#[derive(Default)]
pub struct RadarStateCache {
    latest: Mutex<Option<RadarState>>,
}

impl RadarStateCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Store a fused snapshot; called from the data path before publication.
    pub fn capture(&self, state: RadarState) {
        *self.latest.lock() = Some(state);
    }

    pub fn latest(&self) -> Option<RadarState> {
        self.latest.lock().clone()
    }
}

/// Decoded power-source bits (B9..B10 of `status_bits`).
pub(crate) fn power_source_bits(status_bits: u32) -> u8 {
    ((status_bits >> 9) & 0x03) as u8
}

/// Decoded platform-type bits (B3..B5).
pub(crate) fn platform_type_bits(status_bits: u32) -> u8 {
    ((status_bits >> 3) & 0x07) as u8
}

/// Decoded attitude-source bits (B15..B16).
pub(crate) fn attitude_source_bits(status_bits: u32) -> u8 {
    ((status_bits >> 15) & 0x03) as u8
}
