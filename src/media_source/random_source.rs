use super::{
    CodecDescriptor, MediaSourceError, PayloadSource, stream_state::StreamState,
};
use crate::rtp::RtpPacket;
use rand::{RngCore, rngs::OsRng};
use std::time::Duration;

/// Unbounded synthetic traffic generator: every packet carries a fixed-size
/// uniformly random payload. Useful for soak tests and for exercising a peer
/// without any media material at hand.
pub struct RandomSource {
    state: StreamState,
    payload_len: usize,
}

impl RandomSource {
    /// Creates a generator for a static payload type.
    ///
    /// # Errors
    ///
    /// [`MediaSourceError::MissingCodecName`] for a payload type outside the
    /// static table (use [`with_codec`](Self::with_codec) for those), or
    /// [`MediaSourceError::MissingTimestampBasis`] when the codec name
    /// carries no sampling rate.
    pub fn new(payload_type: u8, payload_len: usize) -> Result<Self, MediaSourceError> {
        let mut state = StreamState::new();
        state.set_payload_type(payload_type);
        Self::finish(state, payload_len)
    }

    /// Creates a generator for an explicit codec descriptor, e.g. a dynamic
    /// payload type with its own name.
    pub fn with_codec(codec: CodecDescriptor, payload_len: usize) -> Result<Self, MediaSourceError> {
        let mut state = StreamState::new();
        state.codec = Some(codec);
        Self::finish(state, payload_len)
    }

    fn finish(mut state: StreamState, payload_len: usize) -> Result<Self, MediaSourceError> {
        match &state.codec {
            Some(c) if c.name.is_none() => {
                return Err(MediaSourceError::MissingCodecName {
                    payload_type: c.payload_type,
                });
            }
            Some(_) => {}
            None => return Err(MediaSourceError::MissingPayloadType),
        }
        state.resolve_numsamples()?;
        Ok(Self { state, payload_len })
    }
}

impl PayloadSource for RandomSource {
    fn codecs(&self) -> Vec<CodecDescriptor> {
        self.state.codec.clone().into_iter().collect()
    }

    fn eof(&self) -> bool {
        false
    }

    fn next_packet(&mut self) -> Result<(RtpPacket, Duration), MediaSourceError> {
        let mut payload = vec![0u8; self.payload_len];
        OsRng.fill_bytes(&mut payload);
        let packet = self.state.packet(payload)?;
        self.state.advance_default()?;
        Ok((packet, self.state.period))
    }
}
