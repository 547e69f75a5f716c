use super::events::{ControlCommand, WorkerReply};
use crate::log::log_sink::LogSink;
use crate::media_source::PayloadSource;
use crate::rtp::RtpPacket;
use crate::{sink_error, sink_info, sink_warn};
use socket2::{Domain, Protocol, Socket, Type};
use std::io::{self, ErrorKind};
use std::net::{IpAddr, SocketAddr, UdpSocket};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Upper bound on one multiplexed wait, so a `Stop` on the control channel
/// is noticed within this interval even while blocked on the socket.
const CONTROL_POLL: Duration = Duration::from_millis(50);

/// One inbound datagram buffer; larger datagrams are truncated by the OS.
const RECV_BUF_LEN: usize = 64 * 1024;

/// Owns the UDP socket and the payload source for one endpoint.
///
/// Runs `BINDING -> WAITING_REMOTE -> RUNNING -> STOPPED` on its own thread
/// (`BIND_FAILED` is the alternate terminal). All state is exclusively
/// worker-owned; the controller only ever talks over the two channels.
pub(crate) struct MediaWorker {
    local_ip: IpAddr,
    requested_port: u16,
    source: Box<dyn PayloadSource + Send>,
    rx_cmd: Receiver<ControlCommand>,
    tx_reply: Sender<WorkerReply>,
    log_sink: Arc<dyn LogSink>,
}

impl MediaWorker {
    pub(crate) fn new(
        local_ip: IpAddr,
        requested_port: u16,
        source: Box<dyn PayloadSource + Send>,
        rx_cmd: Receiver<ControlCommand>,
        tx_reply: Sender<WorkerReply>,
        log_sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            local_ip,
            requested_port,
            source,
            rx_cmd,
            tx_reply,
            log_sink,
        }
    }

    pub(crate) fn run(mut self) {
        // BINDING
        let sock = match self.bind() {
            Ok(s) => s,
            Err(desc) => {
                let _ = self.tx_reply.send(WorkerReply::BindError(desc));
                return;
            }
        };
        let local = sock
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| format!("{}:{}", self.local_ip, self.requested_port));
        let port = sock.local_addr().map(|a| a.port()).unwrap_or(0);
        let _ = self.tx_reply.send(WorkerReply::Ready(port));

        // WAITING_REMOTE: parked until the controller decides; only an
        // explicit stop (or a dropped controller) gets us out early.
        let remote = match self.rx_cmd.recv() {
            Ok(ControlCommand::RemoteAddress(addr)) => addr,
            Ok(ControlCommand::Stop) | Err(_) => {
                let _ = self.tx_reply.send(WorkerReply::Done);
                return;
            }
        };

        sink_info!(self.log_sink, "{local} starting media flow to {remote}");
        self.media_loop(&sock, remote, &local);
        let _ = self.tx_reply.send(WorkerReply::Done);
        sink_info!(self.log_sink, "{local} stopped");
    }

    fn bind(&self) -> Result<UdpSocket, String> {
        let addr = SocketAddr::new(self.local_ip, self.requested_port);
        self.bind_socket(addr)
            .map_err(|e| format!("cannot bind UDP socket to {addr}: {e}"))
    }

    fn bind_socket(&self, addr: SocketAddr) -> io::Result<UdpSocket> {
        let sock = Socket::new(Domain::for_address(addr), Type::DGRAM, Some(Protocol::UDP))?;
        sock.set_reuse_address(true)?;
        sock.bind(&addr.into())?;
        Ok(sock.into())
    }

    /// RUNNING: pace packets out of the source and drain whatever arrives,
    /// until a stop command.
    fn media_loop(&mut self, sock: &UdpSocket, remote: SocketAddr, local: &str) {
        let mut buf = vec![0u8; RECV_BUF_LEN];
        // Accumulative schedule: advanced by each packet's duration, never
        // reset from the current time, so processing cost cannot drift it.
        let mut wakeup = Instant::now();
        let mut send_failed = false;

        loop {
            let eligible = !send_failed && !self.source.eof();
            let wait = if eligible {
                wakeup.saturating_duration_since(Instant::now()).min(CONTROL_POLL)
            } else {
                CONTROL_POLL
            };

            if !wait.is_zero() {
                if sock.set_read_timeout(Some(wait)).is_err() {
                    thread::sleep(wait);
                } else {
                    match sock.recv_from(&mut buf) {
                        Ok((len, _from)) => {
                            // Pure drain: decoded for observability, then
                            // discarded. No jitter buffer, no playback.
                            let rtp = RtpPacket::decode(&buf[..len]);
                            sink_info!(self.log_sink, "{local} <-- {rtp}");
                            continue;
                        }
                        Err(e)
                            if e.kind() == ErrorKind::WouldBlock
                                || e.kind() == ErrorKind::TimedOut => {}
                        Err(e) => {
                            // e.g. ICMP port unreachable surfacing on Linux
                            sink_warn!(self.log_sink, "{local} recv error: {e}");
                        }
                    }
                }
            }

            match self.rx_cmd.try_recv() {
                Ok(ControlCommand::Stop) | Err(TryRecvError::Disconnected) => return,
                // the remote address is fixed once running
                Ok(ControlCommand::RemoteAddress(_)) | Err(TryRecvError::Empty) => {}
            }

            if eligible && Instant::now() >= wakeup {
                match self.source.next_packet() {
                    Ok((packet, duration)) => {
                        if let Err(e) = sock.send_to(&packet.encode(), remote) {
                            sink_warn!(self.log_sink, "{local} send error: {e}");
                        } else {
                            sink_info!(self.log_sink, "{local} --> {packet}");
                        }
                        wakeup += duration;
                    }
                    Err(e) => {
                        sink_error!(self.log_sink, "{local} media source failed: {e}");
                        send_failed = true;
                    }
                }
            }
        }
    }
}
