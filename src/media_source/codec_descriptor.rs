use super::codec_table::default_codec_name;

/// Describes one codec for network negotiation: the RTP payload type number,
/// the `rtpmap` name (e.g. `"PCMU/8000"`) and optional `fmtp` parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecDescriptor {
    pub payload_type: u8,
    pub name: Option<String>,
    pub format: Option<String>,
}

impl CodecDescriptor {
    pub fn new(payload_type: u8, name: Option<String>, format: Option<String>) -> Self {
        Self {
            payload_type,
            name,
            format,
        }
    }

    /// Resolves a payload type against the static default table. Dynamic
    /// types come back nameless and must be named before they can stream.
    #[must_use]
    pub fn from_payload_type(payload_type: u8) -> Self {
        Self::new(
            payload_type,
            default_codec_name(payload_type).map(str::to_string),
            None,
        )
    }

    /// Sampling rate taken from the codec name: the token after the first
    /// `/`. For `"L16/44100/2"` that is 44100; the trailing `2` is the
    /// channel count, not the rate.
    #[must_use]
    pub fn clock_rate(&self) -> Option<u32> {
        self.name
            .as_deref()
            .and_then(|n| n.split('/').nth(1))
            .and_then(|tok| tok.parse().ok())
    }
}
