//! Cooperative shutdown signaling.
//!
//! A [`ShutdownToken`] is a cloneable cancellation token built on a
//! crossbeam channel: workers park on `wait` instead of sleeping, so they
//! observe shutdown immediately instead of at the end of a sleep. The signal
//! is the sender side being dropped, which every clone of the receiver sees
//! at once.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// Held by the owner; dropping (or calling [`signal`](Self::signal)) shuts
/// everything down.
pub(crate) struct ShutdownHandle {
    _tx: Sender<()>,
}

impl ShutdownHandle {
    pub fn signal(self) {}
}

#[derive(Clone)]
pub(crate) struct ShutdownToken {
    rx: Receiver<()>,
}

pub(crate) fn channel() -> (ShutdownHandle, ShutdownToken) {
    let (tx, rx) = bounded(0);
    (ShutdownHandle { _tx: tx }, ShutdownToken { rx })
}

impl ShutdownToken {
    /// Park for up to `timeout`; returns true when shutdown was signaled.
    pub fn wait(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => false,
        }
    }

    pub fn is_signaled(&self) -> bool {
        matches!(self.rx.try_recv(), Ok(()) | Err(TryRecvError::Disconnected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn wait_times_out_while_running() {
        let (handle, token) = channel();
        assert!(!token.wait(Duration::from_millis(20)));
        assert!(!token.is_signaled());
        drop(handle);
    }

    #[test]
    fn signal_wakes_all_clones_immediately() {
        let (handle, token) = channel();
        let clones: Vec<ShutdownToken> = (0..4).map(|_| token.clone()).collect();

        let waiters: Vec<_> = clones
            .into_iter()
            .map(|t| {
                thread::spawn(move || {
                    let start = Instant::now();
                    assert!(t.wait(Duration::from_secs(10)));
                    start.elapsed()
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(30));
        handle.signal();

        for waiter in waiters {
            let waited = waiter.join().unwrap();
            assert!(waited < Duration::from_secs(2));
        }
        assert!(token.is_signaled());
    }
}
