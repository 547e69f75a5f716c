//! Minimal RTP packet model + encode/decode per RFC 3550.
//! This module has **no** session logic (no pacing, no jitter calc); it
//! focuses on the packet struct and its wire serialization.

use super::{RTP_HEADER_LEN, rtp_header::RtpHeader};
use byteorder::{BigEndian, ByteOrder};
use std::fmt;

/// Complete RTP packet (header + opaque payload).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpPacket {
    pub header: RtpHeader,
    pub payload: Vec<u8>,
}

impl RtpPacket {
    pub fn new(header: RtpHeader, payload: Vec<u8>) -> Self {
        Self { header, payload }
    }

    /// Convenience constructor for an outbound packet.
    pub fn outbound(payload_type: u8, seq: u16, ts: u32, ssrc: u32, payload: Vec<u8>) -> Self {
        Self::new(RtpHeader::new(payload_type, seq, ts, ssrc), payload)
    }

    /// Decodes a datagram, tolerantly: a buffer shorter than the fixed header
    /// is treated as if zero-padded to 12 bytes, so this never fails. The
    /// CSRC list and any extension header are left inside the payload.
    #[must_use]
    pub fn decode(buf: &[u8]) -> Self {
        let mut hdr = [0u8; RTP_HEADER_LEN];
        let n = buf.len().min(RTP_HEADER_LEN);
        hdr[..n].copy_from_slice(&buf[..n]);

        let header = RtpHeader {
            version: hdr[0] >> 6,
            padding: (hdr[0] >> 5) & 0b1 == 1,
            extension: (hdr[0] >> 4) & 0b1 == 1,
            csrc_count: hdr[0] & 0b1111,
            marker: hdr[1] >> 7 == 1,
            payload_type: hdr[1] & 0b0111_1111,
            sequence_number: BigEndian::read_u16(&hdr[2..4]),
            timestamp: BigEndian::read_u32(&hdr[4..8]),
            ssrc: BigEndian::read_u32(&hdr[8..12]),
        };
        let payload = buf.get(RTP_HEADER_LEN..).unwrap_or_default().to_vec();
        Self { header, payload }
    }

    /// Packs the fixed 12-byte header followed by the raw payload. Field
    /// widths are the caller's responsibility; values are masked into their
    /// bit positions without range checks.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let h = &self.header;
        let mut hdr = [0u8; RTP_HEADER_LEN];
        hdr[0] = h.version << 6
            | u8::from(h.padding) << 5
            | u8::from(h.extension) << 4
            | h.csrc_count;
        hdr[1] = u8::from(h.marker) << 7 | h.payload_type;
        BigEndian::write_u16(&mut hdr[2..4], h.sequence_number);
        BigEndian::write_u32(&mut hdr[4..8], h.timestamp);
        BigEndian::write_u32(&mut hdr[8..12], h.ssrc);

        let mut out = Vec::with_capacity(RTP_HEADER_LEN + self.payload.len());
        out.extend_from_slice(&hdr);
        out.extend_from_slice(&self.payload);
        out
    }
}

impl fmt::Display for RtpPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.header;
        write!(
            f,
            "PT={} seq={:#x} TS={:#x} SSRC={:#x} + {}bytes",
            h.payload_type,
            h.sequence_number,
            h.timestamp,
            h.ssrc,
            self.payload.len()
        )
    }
}
