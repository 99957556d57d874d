//! Blocking TCP transport with framed send/receive
//!
//! One socket at a time. Senders on any thread go through [`TcpTransport::send_frame`],
//! which serializes the length-prefix + body write behind a send lock — two
//! concurrent writers must never interleave bytes, or the peer's framer
//! desynchronises permanently. The receive worker reads through
//! [`TcpTransport::recv_frame`] with a bounded timeout so shutdown stays
//! responsive.

use crate::error::{Error, Result};
use crate::wire::{self, FRAME_HEADER_LEN};
use parking_lot::{Mutex, RwLock};
use socket2::{SockRef, TcpKeepalive};
use std::io::{ErrorKind, Read, Write};
use std::net::{Ipv4Addr, Shutdown, SocketAddr, SocketAddrV4, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Idle time before the first keepalive probe.
const KEEPALIVE_IDLE: Duration = Duration::from_secs(10);
/// Interval between keepalive probes.
const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(5);
/// Failed probes before the kernel declares the peer dead (~20 s total).
#[cfg(unix)]
const KEEPALIVE_RETRIES: u32 = 3;

/// Shared TCP transport.
///
/// The stream slot is the single owner of the socket. Readers of the slot
/// (send and receive paths) use `&TcpStream`; installing or closing a socket
/// takes the write lock.
pub struct TcpTransport {
    stream: RwLock<Option<TcpStream>>,
    send_lock: Mutex<()>,
    connected: AtomicBool,
}

impl TcpTransport {
    pub fn new() -> Self {
        Self {
            stream: RwLock::new(None),
            send_lock: Mutex::new(()),
            connected: AtomicBool::new(false),
        }
    }

    /// Open a connection to `host:port` with a bounded connect timeout.
    ///
    /// Validates the host as dotted IPv4, then applies TCP_NODELAY and the
    /// keepalive profile. The stream is returned, not installed — the
    /// connection manager decides when it becomes visible to senders.
    pub fn connect(host: &str, port: u16, timeout: Duration) -> Result<TcpStream> {
        let ip: Ipv4Addr = host
            .parse()
            .map_err(|_| Error::Config(format!("invalid IPv4 address: {host}")))?;
        let addr = SocketAddr::V4(SocketAddrV4::new(ip, port));

        let stream = TcpStream::connect_timeout(&addr, timeout)
            .map_err(|e| Error::Connect(format!("{addr}: {e}")))?;

        if let Err(e) = stream.set_nodelay(true) {
            log::warn!("Failed to set TCP_NODELAY: {}", e);
        }
        Self::configure_keepalive(&stream);

        Ok(stream)
    }

    /// Apply the keepalive profile so a dead peer is noticed within ~20 s.
    fn configure_keepalive(stream: &TcpStream) {
        let sock = SockRef::from(stream);
        let keepalive = TcpKeepalive::new()
            .with_time(KEEPALIVE_IDLE)
            .with_interval(KEEPALIVE_INTERVAL);
        #[cfg(unix)]
        let keepalive = keepalive.with_retries(KEEPALIVE_RETRIES);

        if let Err(e) = sock.set_tcp_keepalive(&keepalive) {
            log::warn!("Failed to set TCP keepalive: {}", e);
        }
    }

    /// Make a stream the live socket. Any previous socket is closed.
    pub fn install(&self, stream: TcpStream) {
        let mut slot = self.stream.write();
        if let Some(old) = slot.take() {
            let _ = old.shutdown(Shutdown::Both);
        }
        *slot = Some(stream);
        self.connected.store(true, Ordering::SeqCst);
    }

    /// Close the live socket. Idempotent.
    pub fn close(&self) {
        self.connected.store(false, Ordering::SeqCst);
        let mut slot = self.stream.write();
        if let Some(stream) = slot.take() {
            let _ = stream.shutdown(Shutdown::Both);
        }
    }

    /// Fast connection-state check (no syscall).
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Mark the connection lost without closing the slot; the connection
    /// manager owns the actual teardown.
    pub fn mark_disconnected(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    /// Grab a second handle to the live socket. Blocking I/O runs on the
    /// clone so the slot lock is never held across it; `close()` shuts the
    /// shared socket down, which aborts any read or write in flight on a
    /// clone.
    fn clone_stream(&self) -> Option<TcpStream> {
        let slot = self.stream.read();
        slot.as_ref().and_then(|s| s.try_clone().ok())
    }

    /// Send one framed message.
    ///
    /// Holds the send lock across the length-prefix and body writes so frames
    /// from concurrent callers are totally ordered on the wire. Write errors
    /// indicating a dead peer mark the connection lost; the receive worker
    /// picks that up and drives the reconnect.
    pub fn send_frame(&self, body: &[u8]) -> Result<()> {
        let frame = wire::encode_frame(body)?;

        let _guard = self.send_lock.lock();
        let mut stream = match self.clone_stream() {
            Some(s) => s,
            None => return Err(Error::Send("not connected".to_string())),
        };

        if let Err(e) = stream.write_all(&frame) {
            if matches!(
                e.kind(),
                ErrorKind::BrokenPipe | ErrorKind::ConnectionReset | ErrorKind::NotConnected
            ) {
                self.mark_disconnected();
            }
            return Err(Error::Send(e.to_string()));
        }
        Ok(())
    }

    /// Write one framed message to a stream that is not yet installed.
    ///
    /// Used by the reconnect path to send the Registration before the new
    /// socket becomes visible to other senders; nothing else can be writing
    /// to it, so the send lock is not needed.
    pub fn send_frame_on(stream: &mut TcpStream, body: &[u8]) -> Result<()> {
        let frame = wire::encode_frame(body)?;
        stream
            .write_all(&frame)
            .map_err(|e| Error::Send(e.to_string()))
    }

    /// Receive one framed message, waiting at most `timeout`.
    ///
    /// Returns `Ok(None)` on timeout (a normal idle tick), the payload bytes
    /// on success, or an error on EOF / socket failure / invalid frame length.
    pub fn recv_frame(&self, timeout: Duration) -> Result<Option<Vec<u8>>> {
        let mut stream = match self.clone_stream() {
            Some(s) => s,
            None => return Err(Error::Recv("not connected".to_string())),
        };

        if let Err(e) = stream.set_read_timeout(Some(timeout)) {
            return Err(Error::Recv(e.to_string()));
        }

        let mut header = [0u8; FRAME_HEADER_LEN];
        match stream.read_exact(&mut header) {
            Ok(()) => {}
            Err(e) if is_timeout(&e) => return Ok(None),
            Err(e) => return Err(Error::Recv(e.to_string())),
        }

        let len = wire::decode_frame_len(header)?;

        // The header arrived; the body must follow. Keep reading through
        // timeouts so a slow sender does not desynchronise the framer.
        let mut body = vec![0u8; len];
        let mut read = 0;
        while read < len {
            match stream.read(&mut body[read..]) {
                Ok(0) => return Err(Error::Recv("connection closed mid-frame".to_string())),
                Ok(n) => read += n,
                Err(e) if is_timeout(&e) => continue,
                Err(e) => return Err(Error::Recv(e.to_string())),
            }
        }

        Ok(Some(body))
    }
}

impl Default for TcpTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn is_timeout(e: &std::io::Error) -> bool {
    matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire;
    use std::io::Read;
    use std::net::TcpListener;
    use std::sync::Arc;
    use std::thread;

    fn loopback_pair() -> (TcpTransport, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpTransport::connect("127.0.0.1", addr.port(), Duration::from_secs(5))
            .unwrap();
        let (server, _) = listener.accept().unwrap();
        let transport = TcpTransport::new();
        transport.install(client);
        (transport, server)
    }

    fn read_frame(stream: &mut TcpStream) -> Vec<u8> {
        let mut header = [0u8; FRAME_HEADER_LEN];
        stream.read_exact(&mut header).unwrap();
        let len = wire::decode_frame_len(header).unwrap();
        let mut body = vec![0u8; len];
        stream.read_exact(&mut body).unwrap();
        body
    }

    #[test]
    fn connect_rejects_bad_host() {
        let err = TcpTransport::connect("not-an-ip", 5000, Duration::from_secs(1));
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn connect_times_out_on_dead_port() {
        // 203.0.113.0/24 is TEST-NET-3, guaranteed unroutable.
        let start = std::time::Instant::now();
        let err = TcpTransport::connect("203.0.113.1", 9, Duration::from_millis(300));
        assert!(matches!(err, Err(Error::Connect(_))));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn send_and_receive_roundtrip() {
        let (transport, mut server) = loopback_pair();

        transport.send_frame(b"hello sapient").unwrap();
        assert_eq!(read_frame(&mut server), b"hello sapient");

        let body = wire::encode_frame(b"reply").unwrap();
        server.write_all(&body).unwrap();
        let got = transport.recv_frame(Duration::from_secs(2)).unwrap();
        assert_eq!(got.as_deref(), Some(&b"reply"[..]));
    }

    #[test]
    fn recv_times_out_quietly() {
        let (transport, _server) = loopback_pair();
        let got = transport.recv_frame(Duration::from_millis(100)).unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn recv_fails_on_peer_close() {
        let (transport, server) = loopback_pair();
        drop(server);
        let err = transport.recv_frame(Duration::from_secs(1));
        assert!(matches!(err, Err(Error::Recv(_))));
    }

    #[test]
    fn close_is_idempotent() {
        let (transport, _server) = loopback_pair();
        transport.close();
        transport.close();
        assert!(!transport.is_connected());
        assert!(transport.send_frame(b"x").is_err());
    }

    /// Concurrent writers must produce a clean sequence of frames: every
    /// frame read back has the length its prefix declares and carries one
    /// writer's payload intact.
    #[test]
    fn concurrent_senders_never_interleave() {
        const WRITERS: usize = 8;
        const FRAMES_PER_WRITER: usize = 50;

        let (transport, mut server) = loopback_pair();
        let transport = Arc::new(transport);

        let mut handles = Vec::new();
        for w in 0..WRITERS {
            let t = Arc::clone(&transport);
            handles.push(thread::spawn(move || {
                for i in 0..FRAMES_PER_WRITER {
                    // Varying sizes shake out partial-write interleaving.
                    let mut body = vec![w as u8; 1 + (i * 37) % 4096];
                    body[0] = w as u8;
                    t.send_frame(&body).unwrap();
                }
            }));
        }

        let reader = thread::spawn(move || {
            let mut counts = [0usize; WRITERS];
            for _ in 0..WRITERS * FRAMES_PER_WRITER {
                let body = read_frame(&mut server);
                let writer = body[0] as usize;
                // A frame mixing bytes from two writers would fail here.
                assert!(body.iter().all(|&b| b == body[0]));
                counts[writer] += 1;
            }
            counts
        });

        for h in handles {
            h.join().unwrap();
        }
        let counts = reader.join().unwrap();
        assert!(counts.iter().all(|&c| c == FRAMES_PER_WRITER));
    }
}
