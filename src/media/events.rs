use std::net::SocketAddr;

/// Controller-to-worker messages. `RemoteAddress` unblocks the send loop;
/// `Stop` is valid in any state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    RemoteAddress(SocketAddr),
    Stop,
}

/// Worker-to-controller messages. Exactly one `Ready` or `BindError` is sent
/// as the bind handshake, and exactly one `Done` after a processed `Stop`.
/// Nothing else ever flows over the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerReply {
    Ready(u16),
    BindError(String),
    Done,
}
