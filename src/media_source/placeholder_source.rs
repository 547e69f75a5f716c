use super::{
    CodecDescriptor, MediaSourceError, PayloadSource, codec_table::default_codec_table,
};
use crate::rtp::RtpPacket;
use std::time::Duration;

/// Stands in when no media stream is attached yet: produces no traffic but
/// advertises the full static codec table so an offer can still be built.
/// An endpoint carrying this source is receive-only until replaced.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderSource;

impl PlaceholderSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PayloadSource for PlaceholderSource {
    fn codecs(&self) -> Vec<CodecDescriptor> {
        default_codec_table()
    }

    /// Permanently true; the worker never asks this source for a packet.
    fn eof(&self) -> bool {
        true
    }

    fn next_packet(&mut self) -> Result<(RtpPacket, Duration), MediaSourceError> {
        Err(MediaSourceError::MissingPayloadType)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn advertises_the_whole_table_but_never_streams() {
        let mut src = PlaceholderSource::new();
        assert!(src.eof());
        assert_eq!(src.codecs().len(), 17);
        assert!(src.next_packet().is_err());
    }
}
