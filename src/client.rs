//! Client orchestration.
//!
//! [`SapientClient::init`] wires the transport, connection manager and
//! message factory together, performs the initial attach, and starts the
//! long-lived workers:
//!
//! - **receive worker** — reads frames with a bounded timeout, dispatches by
//!   content variant, polices the registration-ack deadline, and detects
//!   connection loss from consecutive receive errors;
//! - **status worker** — periodic status reports, suppressed while a
//!   disconnect is inside the session-alive window;
//! - **reconnect worker** — spawned only when the initial attach failed;
//!   runs one reconnect cycle (which retries internally on the fixed
//!   cadence) and exits once the link is up.
//!
//! Foreign threads call the `send_*` methods at any time; frame atomicity is
//! the transport's send lock. Shutdown is cooperative and bounded: signaling
//! the token wakes every worker out of its current wait, and joins are given
//! a deadline rather than blocking cleanup forever.

use crate::builders::MessageFactory;
use crate::config::{ClientConfig, Endpoint, Timing};
use crate::connection::{ConnectionManager, ConnectionState};
use crate::error::{Error, Result};
use crate::proto::sapient_message::Content;
use crate::proto::Task;
use crate::radar::{DeviceIdentity, RadarDataSource, RadarTrackItem};
use crate::shutdown::{self, ShutdownHandle, ShutdownToken};
use crate::task::{self, TaskAction};
use crate::transport::TcpTransport;
use crate::wire::Serializer;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Loss is declared after this many receive errors in a row, so one bout of
/// network jitter does not bounce the session.
const MAX_CONSECUTIVE_RECV_ERRORS: u32 = 3;
/// Pause after a below-threshold receive error.
const RECV_ERROR_PAUSE: Duration = Duration::from_millis(100);

/// One live client per process; a second `init` while one exists is a
/// configuration error.
static CLIENT_ACTIVE: AtomicBool = AtomicBool::new(false);

struct Worker {
    name: &'static str,
    handle: JoinHandle<()>,
    join_bound: Duration,
}

struct ClientInner {
    manager: Arc<ConnectionManager>,
    transport: Arc<TcpTransport>,
    factory: Arc<MessageFactory>,
    timing: Timing,
    shutdown: ShutdownToken,
    serializer: Serializer,
}

/// Handle to a running SAPIENT client.
///
/// Created by [`init`](Self::init); dropping it (or calling
/// [`shutdown`](Self::shutdown)) stops the workers and closes the link.
pub struct SapientClient {
    inner: Arc<ClientInner>,
    shutdown_handle: Option<ShutdownHandle>,
    workers: Vec<Worker>,
}

impl SapientClient {
    /// Load the endpoint from a config file and start the client.
    ///
    /// `Ok(None)` means the module is not configured (or disabled) and
    /// nothing was started.
    pub fn init_from_file<P: AsRef<Path>>(
        config_path: P,
        radar: Arc<dyn RadarDataSource>,
        device: Arc<dyn DeviceIdentity>,
    ) -> Result<Option<SapientClient>> {
        match Endpoint::load(config_path)? {
            Some(endpoint) => Self::init(ClientConfig::new(endpoint), radar, device),
            None => Ok(None),
        }
    }

    /// Start the client: initial attach, then workers.
    ///
    /// Returns `Ok(None)` when the endpoint is disabled. The initial attach
    /// makes a bounded number of connection attempts; if all fail, the
    /// background reconnect worker keeps trying on the fixed cadence and
    /// `init` still succeeds.
    pub fn init(
        config: ClientConfig,
        radar: Arc<dyn RadarDataSource>,
        device: Arc<dyn DeviceIdentity>,
    ) -> Result<Option<SapientClient>> {
        if !config.endpoint.enabled {
            log::info!("SAPIENT endpoint disabled, not starting");
            return Ok(None);
        }
        config.endpoint.validate()?;

        if CLIENT_ACTIVE
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::Config(
                "a SAPIENT client is already active in this process".to_string(),
            ));
        }

        log::info!(
            "Starting SAPIENT client for {}:{}",
            config.endpoint.host,
            config.endpoint.port
        );

        let factory = Arc::new(MessageFactory::new(&config, radar, device));
        let transport = Arc::new(TcpTransport::new());
        let (shutdown_handle, shutdown_token) = shutdown::channel();
        let manager = Arc::new(ConnectionManager::new(
            config.endpoint.clone(),
            config.timing.clone(),
            Arc::clone(&transport),
            Arc::clone(&factory),
            shutdown_token.clone(),
        ));

        let inner = Arc::new(ClientInner {
            manager,
            transport,
            factory,
            timing: config.timing,
            shutdown: shutdown_token,
            serializer: Serializer::new(),
        });

        let attached = inner.manager.initial_attach();
        if !attached {
            log::warn!("Initial attach failed, background reconnect takes over");
        }

        let mut client = SapientClient {
            inner,
            shutdown_handle: Some(shutdown_handle),
            workers: Vec::new(),
        };
        client.spawn_worker("sapient-recv", Duration::from_secs(2), receive_worker)?;
        client.spawn_worker("sapient-status", Duration::from_secs(2), status_worker)?;
        if !attached {
            client.spawn_worker("sapient-reconnect", Duration::from_secs(1), reconnect_worker)?;
        }

        log::info!("SAPIENT client started");
        Ok(Some(client))
    }

    fn spawn_worker(
        &mut self,
        name: &'static str,
        join_bound: Duration,
        body: fn(Arc<ClientInner>),
    ) -> Result<()> {
        let inner = Arc::clone(&self.inner);
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || body(inner))
            .map_err(|e| Error::Config(format!("failed to spawn {name}: {e}")))?;
        self.workers.push(Worker {
            name,
            handle,
            join_bound,
        });
        Ok(())
    }

    /// Send a detection report for one track.
    pub fn send_detection_report(&self, track: &RadarTrackItem) -> Result<()> {
        let built = self.inner.factory.detection_report(track)?;
        log::debug!("DetectionReport:\n{}", built.json);
        self.inner.transport.send_frame(&built.bytes)
    }

    /// Send a status report immediately, outside the periodic cadence.
    pub fn send_status_report(&self) -> Result<()> {
        self.inner.send_status()
    }

    /// Send an alert. Out-of-range type/status codes fall back to
    /// INFORMATION / ACTIVE.
    pub fn send_alert(&self, description: &str, alert_type: i32, status: i32) -> Result<()> {
        let built = self.inner.factory.alert(description, alert_type, status)?;
        log::debug!("Alert:\n{}", built.json);
        self.inner.transport.send_frame(&built.bytes)
    }

    pub fn is_online(&self) -> bool {
        self.inner.manager.is_online()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.inner.manager.state()
    }

    /// Stop workers and close the connection. Also runs on drop.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let Some(handle) = self.shutdown_handle.take() else {
            return;
        };
        log::info!("Stopping SAPIENT client");
        handle.signal();

        for worker in self.workers.drain(..) {
            join_bounded(worker);
        }
        self.inner.transport.close();
        CLIENT_ACTIVE.store(false, Ordering::SeqCst);
        log::info!("SAPIENT client stopped");
    }
}

impl Drop for SapientClient {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Join a worker with a deadline; a thread stuck past its bound is left
/// detached rather than hanging cleanup.
fn join_bounded(worker: Worker) {
    let deadline = Instant::now() + worker.join_bound;
    while !worker.handle.is_finished() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(20));
    }
    if worker.handle.is_finished() {
        let _ = worker.handle.join();
    } else {
        log::warn!("Worker {} did not stop in time, detaching", worker.name);
    }
}

impl ClientInner {
    fn send_status(&self) -> Result<()> {
        let built = self.factory.status_report()?;
        log::debug!("StatusReport:\n{}", built.json);
        self.transport.send_frame(&built.bytes)
    }

    /// Typed dispatch over the wrapper's content variant.
    fn dispatch(&self, body: &[u8]) {
        let msg = match self.serializer.decode(body) {
            Ok(msg) => msg,
            Err(e) => {
                // Malformed wrapper: discard, the connection stays up.
                log::error!("Failed to parse inbound message: {}", e);
                return;
            }
        };

        match msg.content {
            Some(Content::Task(task)) => self.handle_task(task),
            Some(Content::RegistrationAck(_)) => {
                log::info!("RegistrationAck received");
                self.manager.registration_ack_received();
                // The initial status report is due right after the ack.
                if let Err(e) = self.send_status() {
                    log::error!("Failed to send initial status report: {}", e);
                }
            }
            Some(Content::StatusReport(_)) => {
                log::info!("Received StatusReport (informational)");
            }
            Some(Content::DetectionReport(_)) => {
                log::info!("Received DetectionReport (informational)");
            }
            Some(Content::Alert(_)) => {
                log::info!("Received Alert (not handled)");
            }
            Some(_) => {
                log::info!("Received unhandled message type, ignoring");
            }
            None => {
                log::warn!("Received message with no content");
            }
        }
    }

    fn handle_task(&self, task: Task) {
        let decision = task::evaluate(&task);
        let task_id = task.task_id.clone();

        if decision.accepted {
            if let Some(id) = task_id.as_deref() {
                self.factory.active_task().set(id);
            }
        }

        match self
            .factory
            .task_ack(task_id.as_deref(), decision.accepted, &decision.reason)
        {
            Ok(built) => {
                log::info!("Sending TaskAck:\n{}", built.json);
                if let Err(e) = self.transport.send_frame(&built.bytes) {
                    log::error!("Failed to send TaskAck: {}", e);
                }
            }
            Err(e) => log::error!("Failed to build TaskAck: {}", e),
        }

        // One-shot follow-ups clear the active task once done.
        match decision.action {
            TaskAction::SendRegistration => {
                log::info!("Task requested Registration");
                if let Err(e) = self.manager.send_registration() {
                    log::error!("Task-driven registration failed: {}", e);
                }
                self.factory.active_task().clear();
            }
            TaskAction::SendStatus => {
                log::info!("Task requested Status");
                if let Err(e) = self.send_status() {
                    log::error!("Task-driven status report failed: {}", e);
                }
                self.factory.active_task().clear();
            }
            TaskAction::None => {}
        }
    }
}

fn receive_worker(inner: Arc<ClientInner>) {
    log::debug!("Receive worker started");
    let mut consecutive_errors = 0u32;

    while !inner.shutdown.is_signaled() {
        // The ack deadline is checked every iteration so a silent peer is
        // caught even while frames keep timing out.
        if inner.manager.registration_ack_timed_out() {
            match inner.manager.handle_ack_timeout() {
                Ok(()) => consecutive_errors = 0,
                Err(Error::Shutdown) => break,
                Err(e) => {
                    log::error!("Reconnect after ack timeout failed: {}", e);
                    if inner.shutdown.wait(Duration::from_secs(5)) {
                        break;
                    }
                }
            }
            continue;
        }

        match inner.transport.recv_frame(inner.timing.recv_timeout) {
            Ok(Some(body)) => {
                consecutive_errors = 0;
                inner.dispatch(&body);
            }
            Ok(None) => {
                // Idle tick.
                consecutive_errors = 0;
            }
            Err(e) => {
                consecutive_errors += 1;
                if consecutive_errors >= MAX_CONSECUTIVE_RECV_ERRORS {
                    log::info!("Connection lost ({}), reconnecting", e);
                    inner.manager.connection_lost();
                    match inner.manager.reconnect(false) {
                        Ok(()) => consecutive_errors = 0,
                        Err(Error::Shutdown) => break,
                        Err(e) => {
                            log::error!("Reconnect failed: {}", e);
                            if inner.shutdown.wait(Duration::from_secs(5)) {
                                break;
                            }
                        }
                    }
                } else if inner.shutdown.wait(RECV_ERROR_PAUSE) {
                    break;
                }
            }
        }
    }
    log::debug!("Receive worker exiting");
}

fn status_worker(inner: Arc<ClientInner>) {
    log::debug!("Status worker started");
    // Give the initial attach time to finish registration.
    if inner.shutdown.wait(inner.timing.status_startup_delay) {
        return;
    }

    loop {
        let elapsed = inner.manager.disconnect_elapsed();
        match elapsed {
            Some(e) if e < inner.timing.disconnect_threshold => {
                // Session-alive window: the peer would discard the report.
                log::debug!(
                    "Disconnect {:.0?} inside suppression window, skipping status report",
                    e
                );
            }
            _ => match inner.send_status() {
                Ok(()) => {
                    if elapsed.is_some() {
                        inner.manager.clear_disconnect_time();
                        log::info!("Suppression window over, status reporting resumed");
                    }
                }
                Err(e) => log::warn!("Periodic status report failed: {}", e),
            },
        }

        if inner.shutdown.wait(inner.timing.status_interval) {
            break;
        }
    }
    log::debug!("Status worker exiting");
}

/// Runs only when the initial attach failed; one reconnect cycle (internally
/// retrying on the fixed cadence), then exit.
fn reconnect_worker(inner: Arc<ClientInner>) {
    log::info!("Background reconnect worker started");
    match inner.manager.reconnect(false) {
        Ok(()) => log::info!("Background reconnect restored the connection"),
        Err(_) => log::debug!("Background reconnect aborted by shutdown"),
    }
}
