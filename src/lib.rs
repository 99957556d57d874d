//! SAPIENT (BSI Flex 335 v2.0) protocol client for a radar tracking node.
//!
//! The client connects to a Data & Message Manager over framed TCP,
//! registers the node's capabilities, reports status on a fixed cadence,
//! streams detection reports derived from radar tracks, raises alerts, and
//! answers management Tasks.
//!
//! ## Usage
//!
//! ```no_run
//! use sapient_client::{RadarStateCache, SapientClient};
//! use std::sync::Arc;
//!
//! # struct MyRadarSource { cache: Arc<RadarStateCache> }
//! # impl sapient_client::RadarDataSource for MyRadarSource {
//! #     fn radar_state(&self) -> Option<sapient_client::RadarState> { self.cache.latest() }
//! #     fn temperature(&self) -> f32 { 0.0 }
//! #     fn clutter_status(&self) -> sapient_client::ClutterStatus { Default::default() }
//! #     fn track_enabled(&self) -> bool { true }
//! #     fn otm_mode(&self) -> bool { false }
//! # }
//! # struct MyDevice;
//! # impl sapient_client::DeviceIdentity for MyDevice {
//! #     fn serial_number(&self) -> Option<String> { None }
//! #     fn software_version(&self) -> Option<String> { None }
//! # }
//! # fn main() -> Result<(), sapient_client::Error> {
//! let cache = RadarStateCache::new();
//! let radar = Arc::new(MyRadarSource { cache: Arc::clone(&cache) });
//!
//! let Some(client) =
//!     SapientClient::init_from_file("/etc/sapient_config.json", radar, Arc::new(MyDevice))?
//! else {
//!     return Ok(()); // not configured
//! };
//!
//! // The track pipeline feeds detections as they arrive:
//! // client.send_detection_report(&track)?;
//! client.shutdown();
//! # Ok(())
//! # }
//! ```

pub mod builders;
pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod identity;
pub mod proto;
pub mod radar;
mod shutdown;
pub mod task;
pub mod transport;
pub mod wire;

pub use client::SapientClient;
pub use config::{ClientConfig, Endpoint, Timing};
pub use connection::ConnectionState;
pub use error::{Error, Result};
pub use radar::{
    Attitude, ClutterStatus, DeviceIdentity, Fault, Lla, RadarDataSource, RadarState,
    RadarStateCache, RadarTrackItem,
};
