use std::fmt;
use std::io;

/// Failures that make a payload source unable to produce packets.
///
/// Malformed directive lines are never errors (they are skipped one by one);
/// these variants cover the cases where the stream genuinely cannot go on.
#[derive(Debug)]
pub enum MediaSourceError {
    /// No payload type was ever established for the stream.
    MissingPayloadType,
    /// The payload type has no codec name (dynamic type without `codecname`),
    /// so `rtpmap` and the sampling rate cannot be derived.
    MissingCodecName { payload_type: u8 },
    /// No explicit timestamp, no `numsamples` and no sampling rate in the
    /// codec name: the timestamp advance cannot be computed and pacing
    /// cannot proceed.
    MissingTimestampBasis,
    Io(io::Error),
}

impl fmt::Display for MediaSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use MediaSourceError::*;
        match self {
            MissingPayloadType => write!(f, "missing payload type for stream"),
            MissingCodecName { payload_type } => {
                write!(f, "missing codec name for payload type {payload_type}")
            }
            MissingTimestampBasis => write!(
                f,
                "cannot compute timestamp advance: no explicit timestamp, numsamples or sampling rate"
            ),
            Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl From<io::Error> for MediaSourceError {
    fn from(e: io::Error) -> Self {
        MediaSourceError::Io(e)
    }
}
