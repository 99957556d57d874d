//! Outbound message construction.
//!
//! [`MessageFactory`] assembles complete wrapper messages: it owns the node
//! identity, the per-track object-id table, the active-task-id slot and the
//! status change-detection snapshot, pulls live data from the radar source,
//! and serializes each message to wire bytes plus a JSON rendering for debug
//! logs.

mod alert;
mod detection;
mod registration;
mod status;
mod task_ack;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::identity::{ulid, NodeIdentity, ObjectIdTable};
use crate::proto::sapient_message::Content;
use crate::proto::{SapientMessage, Timestamp};
use crate::radar::{DeviceIdentity, RadarDataSource};
use crate::radar::RadarTrackItem;
use crate::task::ActiveTaskId;
use crate::wire::Serializer;
use parking_lot::Mutex;
use status::StatusSnapshot;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// A serialized outbound message.
pub struct BuiltMessage {
    /// Wire payload (wrapper message, not yet framed).
    pub bytes: Vec<u8>,
    /// Pretty JSON rendering for logs.
    pub json: String,
}

pub struct MessageFactory {
    identity: NodeIdentity,
    radar: Arc<dyn RadarDataSource>,
    device: Arc<dyn DeviceIdentity>,
    object_ids: ObjectIdTable,
    active_task: ActiveTaskId,
    last_snapshot: Mutex<Option<StatusSnapshot>>,
    serializer: Serializer,
}

impl MessageFactory {
    pub fn new(
        config: &ClientConfig,
        radar: Arc<dyn RadarDataSource>,
        device: Arc<dyn DeviceIdentity>,
    ) -> Self {
        Self {
            identity: NodeIdentity::new(&config.node_id_path),
            radar,
            device,
            object_ids: ObjectIdTable::new(),
            active_task: ActiveTaskId::new(),
            last_snapshot: Mutex::new(None),
            serializer: Serializer::new(),
        }
    }

    pub fn active_task(&self) -> &ActiveTaskId {
        &self.active_task
    }

    pub fn node_id(&self) -> String {
        self.identity.node_id()
    }

    /// Build a Registration message.
    pub fn registration(&self) -> Result<BuiltMessage> {
        let serial = self.resolve_serial();
        let software_version = self.device.software_version();
        let content = registration::build(&serial, software_version.as_deref());
        self.finish(Content::Registration(content))
    }

    /// Build a StatusReport, running change detection against the previous
    /// snapshot.
    pub fn status_report(&self) -> Result<BuiltMessage> {
        let inputs = status::StatusInputs {
            state: self.radar.radar_state().unwrap_or_default(),
            track_enabled: self.radar.track_enabled(),
            otm_mode: self.radar.otm_mode(),
            clutter: self.radar.clutter_status(),
            temperature: self.radar.temperature(),
            active_task_id: self.active_task.get(),
            report_id: ulid::generate(),
        };
        let content = status::build(inputs, &self.last_snapshot);
        self.finish(Content::StatusReport(content))
    }

    /// Build a DetectionReport from one radar track.
    pub fn detection_report(&self, track: &RadarTrackItem) -> Result<BuiltMessage> {
        let radar_heading = self
            .radar
            .radar_state()
            .map(|s| s.heading_or_default())
            .unwrap_or(0.0);
        let content = detection::build(
            track,
            radar_heading,
            self.object_ids.id_for(track.id),
            self.active_task.get(),
            ulid::generate(),
        );
        self.finish(Content::DetectionReport(content))
    }

    /// Build an Alert. Out-of-range type/status values fall back to their
    /// defaults.
    pub fn alert(&self, description: &str, alert_type: i32, status: i32) -> Result<BuiltMessage> {
        let content = alert::build(description, alert_type, status);
        self.finish(Content::Alert(content))
    }

    /// Build a TaskAck answering the given task.
    pub fn task_ack(
        &self,
        task_id: Option<&str>,
        accepted: bool,
        reason: &str,
    ) -> Result<BuiltMessage> {
        let content = task_ack::build(task_id, accepted, reason);
        self.finish(Content::TaskAck(content))
    }

    /// Serial number resolution: the radar's own report wins, persistent
    /// storage is the fallback.
    fn resolve_serial(&self) -> String {
        if let Some(state) = self.radar.radar_state() {
            if let Some(sn) = state.serial_number {
                if !sn.is_empty() {
                    return sn;
                }
            }
        }
        self.device.serial_number().unwrap_or_default()
    }

    fn finish(&self, content: Content) -> Result<BuiltMessage> {
        let msg = SapientMessage {
            timestamp: Some(now_timestamp()),
            node_id: self.identity.node_id(),
            content: Some(content),
        };
        let bytes = self.serializer.encode(&msg)?;
        let json =
            serde_json::to_string_pretty(&msg).map_err(|e| Error::Serialize(e.to_string()))?;
        Ok(BuiltMessage { bytes, json })
    }

    #[cfg(test)]
    pub(crate) fn object_ids(&self) -> &ObjectIdTable {
        &self.object_ids
    }
}

fn now_timestamp() -> Timestamp {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    Timestamp {
        seconds: now.as_secs() as i64,
        nanos: now.subsec_nanos() as i32,
    }
}

/// Normalize an azimuth in degrees to `[0, 360)`.
pub(crate) fn normalize_azimuth(deg: f64) -> f64 {
    let n = deg.rem_euclid(360.0);
    if n >= 360.0 {
        0.0
    } else {
        n
    }
}

/// Horizontal position error in degrees for a ~6 m accuracy figure, rounded
/// to five decimal places.
pub(crate) fn horizontal_error_deg() -> f64 {
    const METERS_PER_DEGREE: f64 = 111_000.0;
    const ERROR_METERS: f64 = 6.0;
    ((ERROR_METERS / METERS_PER_DEGREE) * 100_000.0).round() / 100_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientConfig, Endpoint};
    use crate::proto::sapient_message::Content;
    use crate::radar::{ClutterStatus, RadarState, RadarStateCache};
    use prost::Message;

    pub(crate) struct TestRadarSource {
        pub cache: Arc<RadarStateCache>,
        pub track_enabled: bool,
        pub otm_mode: bool,
        pub clutter: ClutterStatus,
        pub temperature: f32,
    }

    impl Default for TestRadarSource {
        fn default() -> Self {
            Self {
                cache: RadarStateCache::new(),
                track_enabled: true,
                otm_mode: false,
                clutter: ClutterStatus {
                    filter_level: 2,
                    weather_filter: true,
                },
                temperature: 41.5,
            }
        }
    }

    impl RadarDataSource for TestRadarSource {
        fn radar_state(&self) -> Option<RadarState> {
            self.cache.latest()
        }
        fn temperature(&self) -> f32 {
            self.temperature
        }
        fn clutter_status(&self) -> ClutterStatus {
            self.clutter
        }
        fn track_enabled(&self) -> bool {
            self.track_enabled
        }
        fn otm_mode(&self) -> bool {
            self.otm_mode
        }
    }

    pub(crate) struct TestDevice;

    impl DeviceIdentity for TestDevice {
        fn serial_number(&self) -> Option<String> {
            Some("SN-TEST-001".to_string())
        }
        fn software_version(&self) -> Option<String> {
            Some("SDH100-GE-FW-V10.01.05.34-STD".to_string())
        }
    }

    pub(crate) fn test_factory() -> (MessageFactory, Arc<RadarStateCache>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ClientConfig::new(Endpoint {
            host: "127.0.0.1".to_string(),
            port: 55000,
            enabled: true,
        });
        config.node_id_path = dir.path().join("node_id.txt");

        let source = TestRadarSource::default();
        let cache = Arc::clone(&source.cache);
        let factory = MessageFactory::new(&config, Arc::new(source), Arc::new(TestDevice));
        (factory, cache, dir)
    }

    #[test]
    fn wrapper_carries_timestamp_and_node_id() {
        let (factory, _cache, _dir) = test_factory();
        let built = factory.registration().unwrap();

        let msg = SapientMessage::decode(built.bytes.as_slice()).unwrap();
        assert_eq!(msg.node_id, factory.node_id());
        let ts = msg.timestamp.unwrap();
        assert!(ts.seconds > 1_700_000_000);
        assert!(matches!(msg.content, Some(Content::Registration(_))));
        assert!(built.json.contains("Registration"));
    }

    #[test]
    fn azimuth_normalization() {
        assert_eq!(normalize_azimuth(-40.0), 320.0);
        assert_eq!(normalize_azimuth(400.0), 40.0);
        assert_eq!(normalize_azimuth(0.0), 0.0);
        assert_eq!(normalize_azimuth(359.5), 359.5);
    }

    #[test]
    fn detection_reports_reuse_object_ids() {
        let (factory, _cache, _dir) = test_factory();
        let track = RadarTrackItem {
            id: 5,
            ..Default::default()
        };

        let object_id_of = |built: &BuiltMessage| {
            let msg = SapientMessage::decode(built.bytes.as_slice()).unwrap();
            match msg.content {
                Some(Content::DetectionReport(report)) => report.object_id,
                _ => panic!("expected a detection report"),
            }
        };

        let first = factory.detection_report(&track).unwrap();
        let second = factory.detection_report(&track).unwrap();
        assert_eq!(object_id_of(&first), object_id_of(&second));
        assert_eq!(factory.object_ids().len(), 1);

        let other = factory
            .detection_report(&RadarTrackItem {
                id: 6,
                ..Default::default()
            })
            .unwrap();
        assert_ne!(object_id_of(&first), object_id_of(&other));
    }

    #[test]
    fn status_report_carries_active_task_id() {
        let (factory, _cache, _dir) = test_factory();
        factory.active_task().set("task-7");

        let built = factory.status_report().unwrap();
        let msg = SapientMessage::decode(built.bytes.as_slice()).unwrap();
        match msg.content {
            Some(Content::StatusReport(report)) => {
                assert_eq!(report.active_task_id.as_deref(), Some("task-7"));
            }
            _ => panic!("expected a status report"),
        }

        factory.active_task().clear();
        let built = factory.status_report().unwrap();
        let msg = SapientMessage::decode(built.bytes.as_slice()).unwrap();
        match msg.content {
            Some(Content::StatusReport(report)) => {
                assert!(report.active_task_id.is_none());
            }
            _ => panic!("expected a status report"),
        }
    }

    #[test]
    fn serial_prefers_radar_state() {
        let (factory, cache, _dir) = test_factory();
        assert_eq!(factory.resolve_serial(), "SN-TEST-001");

        cache.capture(RadarState {
            serial_number: Some("SN-FROM-RADAR".to_string()),
            ..Default::default()
        });
        assert_eq!(factory.resolve_serial(), "SN-FROM-RADAR");
    }
}
