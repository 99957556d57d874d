//! Error types for the SAPIENT client
//!
//! # Error Recovery Strategies
//!
//! ## Recovered internally (never surfaced beyond a per-call failure)
//!
//! - **`Connect`**: connect timed out or was refused. The connection manager
//!   keeps retrying on its fixed cadence; callers of `init` only see this when
//!   every initial attempt failed *and* the background reconnect worker could
//!   not be spawned.
//!
//! - **`Send`** / **`Recv`**: the socket died mid-transfer. The transport
//!   marks the connection lost; the receive worker detects the loss and drives
//!   a reconnect. The failing call returns the error and nothing else changes.
//!
//! - **`Frame`**: a length prefix of zero or beyond the 32 MiB cap. The frame
//!   stream is unrecoverable at that point, so this is treated like a
//!   connection loss.
//!
//! ## Log and continue
//!
//! - **`Protocol`**: inbound bytes did not decode as a wrapper message. The
//!   message is discarded; the connection remains usable.
//!
//! - **`Serialize`**: an outbound message failed to encode. Log and skip that
//!   specific message.
//!
//! ## Fix and restart
//!
//! - **`Config`**: invalid endpoint address or port, or a second client
//!   instance. Fix the configuration and re-run `init`.
//!
//! ## Expected during teardown
//!
//! - **`Shutdown`**: the operation was interrupted by client shutdown.
//! - **`Timeout`**: a bounded wait elapsed; the receive loop treats this as a
//!   normal idle tick.

use thiserror::Error;

/// Errors that can occur in the SAPIENT client
///
/// See module-level documentation for recovery strategies.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Connect error: {0}")]
    Connect(String),

    #[error("Send error: {0}")]
    Send(String),

    #[error("Receive error: {0}")]
    Recv(String),

    #[error("Invalid frame length: {0} bytes")]
    Frame(u32),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Timed out")]
    Timeout,

    #[error("Client is shutting down")]
    Shutdown,
}

impl From<prost::DecodeError> for Error {
    fn from(e: prost::DecodeError) -> Self {
        Error::Protocol(e.to_string())
    }
}

impl From<prost::EncodeError> for Error {
    fn from(e: prost::EncodeError) -> Self {
        Error::Serialize(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
