//! Connection lifecycle management.
//!
//! The manager owns every state transition of the single DMM link:
//!
//! ```text
//!  Disconnected ──connect──▶ Connecting ──ok──▶ AwaitingRegistrationAck ──ack──▶ Online
//!       ▲                        │                      │                          │
//!       │                      fail                timeout (30 s)                loss
//!       │                        ▼                      ▼                          ▼
//!       └───────────────── Reconnecting ◀───────────────────────────────────────────
//! ```
//!
//! Policies owned here:
//! - reconnect attempts run at a fixed cadence (a protocol requirement, no
//!   exponential backoff), serialized by an internal lock so concurrent
//!   callers all land on the same new socket;
//! - the disconnect timestamp records the *earliest* loss of the current
//!   outage and is only cleared by the status worker once it has emitted a
//!   post-threshold report;
//! - re-registration on reconnect happens only when the outage lasted past
//!   the session-alive window, or unconditionally after a registration-ack
//!   timeout;
//! - the Registration frame for a reconnect is written to the new stream
//!   before the stream is installed into the transport, so it can never
//!   interleave with foreign senders (they are still blocked on the
//!   reconnect lock and the old, closed socket).

use crate::builders::MessageFactory;
use crate::config::{Endpoint, Timing};
use crate::error::{Error, Result};
use crate::shutdown::ShutdownToken;
use crate::transport::TcpTransport;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    AwaitingRegistrationAck,
    Online,
    Reconnecting,
}

#[derive(Default)]
struct RegistrationTiming {
    sent_at: Option<Instant>,
    awaiting_ack: bool,
}

pub struct ConnectionManager {
    endpoint: Endpoint,
    timing: Timing,
    transport: Arc<TcpTransport>,
    factory: Arc<MessageFactory>,
    state: Mutex<ConnectionState>,
    disconnect_time: Mutex<Option<Instant>>,
    registration: Mutex<RegistrationTiming>,
    reconnect_lock: Mutex<()>,
    shutdown: ShutdownToken,
}

impl ConnectionManager {
    pub fn new(
        endpoint: Endpoint,
        timing: Timing,
        transport: Arc<TcpTransport>,
        factory: Arc<MessageFactory>,
        shutdown: ShutdownToken,
    ) -> Self {
        Self {
            endpoint,
            timing,
            transport,
            factory,
            state: Mutex::new(ConnectionState::Disconnected),
            disconnect_time: Mutex::new(None),
            registration: Mutex::new(RegistrationTiming::default()),
            reconnect_lock: Mutex::new(()),
            shutdown,
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.lock()
    }

    fn set_state(&self, state: ConnectionState) {
        *self.state.lock() = state;
    }

    pub fn is_online(&self) -> bool {
        self.transport.is_connected()
    }

    /// Initial attach: a bounded number of attempts before the caller falls
    /// back to the background reconnect worker. Returns whether a connection
    /// was established.
    pub fn initial_attach(&self) -> bool {
        let _guard = self.reconnect_lock.lock();

        for attempt in 1..=self.timing.initial_attempts {
            log::info!(
                "Connect attempt {}/{} to {}:{}",
                attempt,
                self.timing.initial_attempts,
                self.endpoint.host,
                self.endpoint.port
            );

            match self.connect_cycle(true) {
                Ok(()) => return true,
                Err(e) => log::warn!("Connect attempt {} failed: {}", attempt, e),
            }

            if attempt < self.timing.initial_attempts
                && self.shutdown.wait(self.timing.initial_retry_delay)
            {
                break;
            }
        }

        self.set_state(ConnectionState::Disconnected);
        false
    }

    /// Re-establish the connection, retrying on the fixed cadence until it
    /// succeeds or shutdown is signaled.
    ///
    /// `force_registration` re-sends the Registration regardless of outage
    /// length (used after a registration-ack timeout); otherwise the
    /// session-alive window decides.
    pub fn reconnect(&self, force_registration: bool) -> Result<()> {
        let _guard = self.reconnect_lock.lock();

        // Another caller may have restored the link while we waited on the
        // lock; a forced reconnect must still tear it down.
        if !force_registration && self.transport.is_connected() {
            return Ok(());
        }

        self.note_disconnected();
        self.transport.close();
        self.set_state(ConnectionState::Reconnecting);

        let mut attempt = 0u32;
        loop {
            if self.shutdown.is_signaled() {
                return Err(Error::Shutdown);
            }

            attempt += 1;
            let need_registration = force_registration || self.registration_required();
            log::info!(
                "Reconnect attempt {} (registration={})",
                attempt,
                need_registration
            );

            match self.connect_cycle(need_registration) {
                Ok(()) => {
                    log::info!("Reconnected after {} attempts", attempt);
                    // The disconnect timestamp stays put: the status worker
                    // clears it once the suppression window has run out.
                    return Ok(());
                }
                Err(e) => log::warn!("Reconnect attempt {} failed: {}", attempt, e),
            }

            if self.shutdown.wait(self.timing.reconnect_interval) {
                return Err(Error::Shutdown);
            }
        }
    }

    /// One connect attempt, optionally sending the Registration on the fresh
    /// stream before it becomes visible to other senders.
    fn connect_cycle(&self, send_registration: bool) -> Result<()> {
        self.set_state(ConnectionState::Connecting);

        let result = (|| {
            let mut stream = TcpTransport::connect(
                &self.endpoint.host,
                self.endpoint.port,
                self.timing.connect_timeout,
            )?;

            if send_registration {
                let built = self.factory.registration()?;
                self.mark_registration_sent();
                TcpTransport::send_frame_on(&mut stream, &built.bytes)?;
                log::info!(
                    "Registration sent ({} bytes), awaiting RegistrationAck",
                    built.bytes.len()
                );
                self.transport.install(stream);
                self.set_state(ConnectionState::AwaitingRegistrationAck);
            } else {
                log::info!("Reconnected within session-alive window, registration skipped");
                self.transport.install(stream);
                self.set_state(ConnectionState::Online);
            }
            Ok(())
        })();

        if result.is_err() {
            self.set_state(ConnectionState::Disconnected);
        }
        result
    }

    /// Whether the current outage is old enough to require re-registration.
    ///
    /// The skip rule only exists because the peer may still hold the session
    /// from an earlier Registration; with none ever sent there is nothing to
    /// resume and registration is always required.
    fn registration_required(&self) -> bool {
        if self.registration.lock().sent_at.is_none() {
            return true;
        }
        match *self.disconnect_time.lock() {
            Some(since) => {
                let elapsed = since.elapsed();
                let required = elapsed >= self.timing.disconnect_threshold;
                if required {
                    log::info!(
                        "Outage of {:.0?} exceeds session-alive window, registration required",
                        elapsed
                    );
                }
                required
            }
            None => true,
        }
    }

    /// Send a Registration over the live link (task-driven re-registration).
    pub fn send_registration(&self) -> Result<()> {
        let built = self.factory.registration()?;
        self.mark_registration_sent();
        self.transport.send_frame(&built.bytes)?;
        log::info!("Registration sent, awaiting RegistrationAck");
        Ok(())
    }

    fn mark_registration_sent(&self) {
        let mut reg = self.registration.lock();
        reg.sent_at = Some(Instant::now());
        reg.awaiting_ack = true;
    }

    /// Called by the receive worker when a RegistrationAck arrives.
    pub fn registration_ack_received(&self) {
        let mut reg = self.registration.lock();
        if reg.awaiting_ack {
            reg.awaiting_ack = false;
            if let Some(sent) = reg.sent_at {
                log::info!("RegistrationAck received after {:?}", sent.elapsed());
            }
        }
        drop(reg);
        self.set_state(ConnectionState::Online);
    }

    /// True once the ack deadline for an outstanding Registration has passed.
    pub fn registration_ack_timed_out(&self) -> bool {
        let reg = self.registration.lock();
        reg.awaiting_ack
            && reg
                .sent_at
                .is_some_and(|sent| sent.elapsed() >= self.timing.registration_ack_timeout)
    }

    /// Registration-ack timeout handling: drop the session and reconnect with
    /// an unconditional re-registration.
    pub fn handle_ack_timeout(&self) -> Result<()> {
        log::error!("RegistrationAck timeout, reconnecting");
        self.registration.lock().awaiting_ack = false;
        self.transport.mark_disconnected();
        self.reconnect(true)
    }

    /// Declare the link dead: flag the transport so the reconnect
    /// double-check does not mistake the stale socket for a live one, and
    /// start the outage clock.
    pub fn connection_lost(&self) {
        self.transport.mark_disconnected();
        self.note_disconnected();
    }

    /// Record the start of an outage. The earliest timestamp wins; a repeat
    /// loss during an ongoing outage must not shorten the window.
    pub fn note_disconnected(&self) {
        let mut time = self.disconnect_time.lock();
        if time.is_none() {
            *time = Some(Instant::now());
        }
    }

    /// Time since the outage began, `None` when no outage is pending.
    pub fn disconnect_elapsed(&self) -> Option<Duration> {
        self.disconnect_time.lock().map(|since| since.elapsed())
    }

    /// Called by the status worker after its first post-threshold report.
    pub fn clear_disconnect_time(&self) {
        *self.disconnect_time.lock() = None;
    }
}
