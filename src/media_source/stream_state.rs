use super::{codec_descriptor::CodecDescriptor, source_error::MediaSourceError, value::Value};
use crate::rtp::RtpPacket;
use rand::{RngCore, rngs::OsRng};
use std::collections::HashMap;
use std::time::Duration;

/// Default gap between packets when no directive or codec says otherwise.
pub(crate) const DEFAULT_PERIOD: Duration = Duration::from_millis(20);

/// The cursor of one outbound stream: codec, sequence, timestamp, SSRC and
/// pacing parameters. Owned by exactly one payload source, which is itself
/// owned by exactly one worker; never shared, never locked.
#[derive(Debug)]
pub(crate) struct StreamState {
    /// Unset until a payload type is established; a stream cannot emit
    /// packets before that.
    pub(crate) codec: Option<CodecDescriptor>,
    pub(crate) seq: u16,
    pub(crate) timestamp: u32,
    pub(crate) ssrc: u32,
    pub(crate) period: Duration,
    /// Timestamp units added per packet; derived lazily from the codec's
    /// sampling rate when no directive supplies it.
    pub(crate) numsamples: Option<u32>,
    /// Directive keys this crate does not interpret, kept verbatim.
    pub(crate) extras: HashMap<String, Value>,
}

impl StreamState {
    /// Fresh state with randomized sequence, timestamp and SSRC.
    pub(crate) fn new() -> Self {
        let mut rng = OsRng;
        Self {
            codec: None,
            seq: rng.next_u32() as u16,
            timestamp: rng.next_u32(),
            ssrc: rng.next_u32(),
            period: DEFAULT_PERIOD,
            numsamples: None,
            extras: HashMap::new(),
        }
    }

    /// Switches the payload type, resetting name and format from the static
    /// default table (dynamic types come back nameless).
    pub(crate) fn set_payload_type(&mut self, payload_type: u8) {
        self.codec = Some(CodecDescriptor::from_payload_type(payload_type));
    }

    /// The timestamp step, deriving and caching `sampling rate x period`
    /// when no directive has set it.
    ///
    /// # Errors
    ///
    /// [`MediaSourceError::MissingTimestampBasis`] when neither a step nor a
    /// rate-bearing codec name is available.
    pub(crate) fn resolve_numsamples(&mut self) -> Result<u32, MediaSourceError> {
        if let Some(n) = self.numsamples {
            return Ok(n);
        }
        let rate = self
            .codec
            .as_ref()
            .and_then(CodecDescriptor::clock_rate)
            .ok_or(MediaSourceError::MissingTimestampBasis)?;
        let n = (f64::from(rate) * self.period.as_secs_f64()) as u32;
        self.numsamples = Some(n);
        Ok(n)
    }

    /// Default per-packet advance: sequence + 1 mod 2^16, timestamp +
    /// numsamples mod 2^32.
    pub(crate) fn advance_default(&mut self) -> Result<(), MediaSourceError> {
        let step = self.resolve_numsamples()?;
        self.seq = self.seq.wrapping_add(1);
        self.timestamp = self.timestamp.wrapping_add(step);
        Ok(())
    }

    /// Builds a packet for the current cursor position.
    pub(crate) fn packet(&self, payload: Vec<u8>) -> Result<RtpPacket, MediaSourceError> {
        let codec = self
            .codec
            .as_ref()
            .ok_or(MediaSourceError::MissingPayloadType)?;
        Ok(RtpPacket::outbound(
            codec.payload_type,
            self.seq,
            self.timestamp,
            self.ssrc,
            payload,
        ))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    fn pcmu_state() -> StreamState {
        let mut st = StreamState::new();
        st.set_payload_type(0);
        st
    }

    #[test]
    fn sequence_returns_to_start_after_full_wrap() {
        let mut st = pcmu_state();
        let start_seq = st.seq;
        for _ in 0..65536u32 {
            st.advance_default().unwrap();
        }
        assert_eq!(st.seq, start_seq);
    }

    #[test]
    fn timestamp_wraps_mod_2_pow_32() {
        let mut st = pcmu_state();
        st.numsamples = Some(1 << 30);
        let start_ts = st.timestamp;
        for _ in 0..4 {
            st.advance_default().unwrap();
        }
        assert_eq!(st.timestamp, start_ts);
    }

    #[test]
    fn numsamples_derives_from_rate_and_period() {
        let mut st = pcmu_state();
        // PCMU/8000 at the 20 ms default: 160 samples per packet.
        assert_eq!(st.resolve_numsamples().unwrap(), 160);

        let mut l16 = StreamState::new();
        l16.set_payload_type(10); // L16/44100/2
        assert_eq!(l16.resolve_numsamples().unwrap(), 882);
    }

    #[test]
    fn nameless_codec_cannot_resolve_a_step() {
        let mut st = StreamState::new();
        st.set_payload_type(96);
        assert!(matches!(
            st.resolve_numsamples(),
            Err(MediaSourceError::MissingTimestampBasis)
        ));
        assert!(matches!(
            StreamState::new().packet(Vec::new()),
            Err(MediaSourceError::MissingPayloadType)
        ));
    }
}
