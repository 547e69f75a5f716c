use super::events::{ControlCommand, WorkerReply};
use super::media_error::MediaError;
use super::media_worker::MediaWorker;
use crate::log::log_sink::LogSink;
use crate::media_source::{CodecDescriptor, PayloadSource, PlaceholderSource};
use crate::sdp::{build_media_offer, scan_remote_address};
use crate::sink_warn;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Controller side of one media leg.
///
/// Creation spawns the worker that owns the UDP socket; the worker is the
/// only thing that ever touches the socket or the stream cursor. This side
/// holds the negotiated addressing and the codec list, builds the local
/// offer, consumes the remote answer and drives the lifecycle. The only
/// blocking calls are `create` (bind handshake) and `wait` (shutdown ack).
///
/// Tear-down is `stop()` then `wait()`; dropping the endpoint without them
/// also terminates the worker, since the command channel closing is treated
/// as a stop.
pub struct MediaEndpoint {
    local_ip: IpAddr,
    local_port: u16,
    remote_ip: Option<IpAddr>,
    remote_port: Option<u16>,
    owner: String,
    codecs: Vec<CodecDescriptor>,
    transmitting: bool,
    tx_cmd: Sender<ControlCommand>,
    rx_reply: Receiver<WorkerReply>,
    worker: Option<JoinHandle<()>>,
    log_sink: Arc<dyn LogSink>,
}

impl MediaEndpoint {
    /// Spawns the worker and blocks until its socket is bound.
    ///
    /// `requested_port` 0 asks the OS for any free port; the assigned port is
    /// available from [`local_port`](Self::local_port) afterwards. Without a
    /// `source` the endpoint is receive-only and advertises the full static
    /// codec table. `owner` goes into the SDP origin line, `"0.0.0.0"` when
    /// absent.
    ///
    /// # Errors
    ///
    /// [`MediaError::Bind`] with the OS error text when the socket cannot be
    /// bound; no endpoint exists in that case.
    pub fn create(
        local_ip: IpAddr,
        requested_port: u16,
        source: Option<Box<dyn PayloadSource + Send>>,
        owner: Option<&str>,
        log_sink: Arc<dyn LogSink>,
    ) -> Result<Self, MediaError> {
        let source = source.unwrap_or_else(|| Box::new(PlaceholderSource::new()));
        let codecs = source.codecs();
        let owner = owner.unwrap_or("0.0.0.0").to_string();

        let (tx_cmd, rx_cmd) = mpsc::channel();
        let (tx_reply, rx_reply) = mpsc::channel();
        let worker = MediaWorker::new(
            local_ip,
            requested_port,
            source,
            rx_cmd,
            tx_reply,
            log_sink.clone(),
        );
        let handle = thread::Builder::new()
            .name("media-worker".into())
            .spawn(move || worker.run())
            .map_err(MediaError::Spawn)?;

        match rx_reply.recv() {
            Ok(WorkerReply::Ready(port)) => Ok(Self {
                local_ip,
                local_port: port,
                remote_ip: None,
                remote_port: None,
                owner,
                codecs,
                transmitting: false,
                tx_cmd,
                rx_reply,
                worker: Some(handle),
                log_sink,
            }),
            Ok(WorkerReply::BindError(desc)) => {
                let _ = handle.join();
                Err(MediaError::Bind(desc))
            }
            Ok(WorkerReply::Done) | Err(_) => {
                let _ = handle.join();
                Err(MediaError::WorkerGone)
            }
        }
    }

    /// The local SDP offer for this leg. Random session id aside, this is a
    /// pure function of the endpoint's address and codec list.
    #[must_use]
    pub fn local_offer(&self) -> String {
        build_media_offer(&self.owner, self.local_ip, self.local_port, &self.codecs)
    }

    /// Takes the remote address out of an SDP answer. Does nothing once
    /// transmission has started; malformed text leaves the remote address
    /// unset rather than failing.
    pub fn apply_remote_offer(&mut self, sdp: &str) {
        if self.transmitting {
            return;
        }
        let (ip, port) = scan_remote_address(sdp);
        if ip.is_some() {
            self.remote_ip = ip;
        }
        if port.is_some() {
            self.remote_port = port;
        }
    }

    /// Releases the worker's send loop towards the negotiated remote
    /// address. Idempotent. Without a remote address this logs a warning and
    /// leaves a receive-only leg; no error is returned to the caller.
    pub fn start_transmit(&mut self) {
        if self.transmitting {
            return;
        }
        self.transmitting = true;
        match (self.remote_ip, self.remote_port) {
            (Some(ip), Some(port)) => {
                let _ = self
                    .tx_cmd
                    .send(ControlCommand::RemoteAddress(SocketAddr::new(ip, port)));
            }
            _ => sink_warn!(self.log_sink, "{} missing remote media offer", self),
        }
    }

    /// Asks the worker to shut down. Never blocks; pair with
    /// [`wait`](Self::wait).
    pub fn stop(&self) {
        let _ = self.tx_cmd.send(ControlCommand::Stop);
    }

    /// Blocks until the worker acknowledges shutdown, then reaps its thread.
    pub fn wait(&mut self) {
        loop {
            match self.rx_reply.recv() {
                Ok(WorkerReply::Done) | Err(_) => break,
                Ok(_) => {}
            }
        }
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    #[must_use]
    pub fn local_port(&self) -> u16 {
        self.local_port
    }

    /// The negotiated remote address, once both a `c=` and an `m=` line have
    /// been seen.
    #[must_use]
    pub fn remote_address(&self) -> Option<SocketAddr> {
        match (self.remote_ip, self.remote_port) {
            (Some(ip), Some(port)) => Some(SocketAddr::new(ip, port)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_transmitting(&self) -> bool {
        self.transmitting
    }

    #[must_use]
    pub fn codecs(&self) -> &[CodecDescriptor] {
        &self.codecs
    }
}

impl fmt::Display for MediaEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.local_ip, self.local_port)
    }
}
