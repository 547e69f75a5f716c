pub mod rtp_header;
pub mod rtp_packet;

pub use rtp_header::RtpHeader;
pub use rtp_packet::RtpPacket;

/// Protocol version carried in the two top bits of every packet.
pub const RTP_VERSION: u8 = 2;

/// Fixed header length in bytes; CSRC entries and extensions follow it on the
/// wire but are not modeled by this crate.
pub const RTP_HEADER_LEN: usize = 12;
