pub mod codec_descriptor;
pub mod codec_table;
pub mod file_source;
pub mod placeholder_source;
pub mod random_source;
pub mod source_error;
pub(crate) mod stream_state;
pub mod value;

pub use codec_descriptor::CodecDescriptor;
pub use codec_table::default_codec_table;
pub use file_source::FileReplaySource;
pub use placeholder_source::PlaceholderSource;
pub use random_source::RandomSource;
pub use source_error::MediaSourceError;
pub use value::Value;

use crate::rtp::RtpPacket;
use std::time::Duration;

/// Producer of timestamped media payloads for one outbound stream.
///
/// A source owns the stream cursor (sequence, timestamp, SSRC, codec) and
/// yields ready-to-send packets together with the pacing gap to the next one.
/// It is moved into the media worker at endpoint creation and never shared.
pub trait PayloadSource: Send {
    /// Codec descriptors to advertise in an offer, in preference order.
    fn codecs(&self) -> Vec<CodecDescriptor>;

    /// True once the source will never produce another payload. The worker
    /// keeps draining inbound traffic after this; it just stops sending.
    fn eof(&self) -> bool;

    /// Builds the next packet and returns it with the time to wait before
    /// the one after it.
    ///
    /// # Errors
    ///
    /// A source that can no longer compute its stream parameters (unknown
    /// codec, no timestamp basis, I/O failure) returns a
    /// [`MediaSourceError`]; the stream is then unusable for sending.
    fn next_packet(&mut self) -> Result<(RtpPacket, Duration), MediaSourceError>;
}
