use std::fmt;
use std::io;

/// Endpoint construction and lifecycle failures.
///
/// Only socket problems live here. Negotiation problems (missing or
/// malformed answers) are not errors: they leave a receive-only endpoint.
#[derive(Debug)]
pub enum MediaError {
    /// The worker could not bind its UDP socket; carries the OS error text.
    Bind(String),
    /// The worker thread could not be spawned at all.
    Spawn(io::Error),
    /// The worker died without completing the handshake.
    WorkerGone,
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use MediaError::*;
        match self {
            Bind(desc) => write!(f, "{desc}"),
            Spawn(e) => write!(f, "cannot spawn media worker: {e}"),
            WorkerGone => write!(f, "media worker exited before completing the handshake"),
        }
    }
}

impl std::error::Error for MediaError {}
