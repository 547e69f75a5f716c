use super::{
    CodecDescriptor, MediaSourceError, PayloadSource, stream_state::StreamState, value::Value,
};
use crate::log::log_sink::LogSink;
use crate::rtp::RtpPacket;
use crate::sink_debug;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Terminates a parameter block.
const PARAM_MARK: &[u8; 4] = b"<<<<";
/// Terminates a payload block.
const PAYLOAD_MARK: &[u8; 4] = b">>>>";

/// Replays a captured media stream from a private container format:
/// alternating parameter blocks (ending in `<<<<`) and raw payload blocks
/// (ending in `>>>>`).
///
/// A parameter block holds `key=value` directive lines steering the stream
/// cursor: `seq`/`dseq`, `PT`, `codecname`/`codecformat`, `period`,
/// `TS`/`timestamp`, `numsamples`, `SSRC`. Blank lines and `#` comments are
/// ignored and a malformed line is skipped on its own; keys this crate does
/// not interpret are merged into the stream state verbatim. Hitting end of
/// input while searching for either marker ends the stream.
pub struct FileReplaySource<R: Read> {
    reader: R,
    state: StreamState,
    eof: bool,
    log_sink: Arc<dyn LogSink>,
}

impl FileReplaySource<BufReader<File>> {
    /// Opens a replay file. The first parameter block is read and applied
    /// here, so a file that never establishes a payload type fails early.
    ///
    /// # Errors
    ///
    /// I/O failures, or a first block that leaves the stream without a
    /// payload type, codec name or timestamp basis.
    pub fn open<P: AsRef<Path>>(
        path: P,
        log_sink: Arc<dyn LogSink>,
    ) -> Result<Self, MediaSourceError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), log_sink)
    }
}

impl<R: Read> FileReplaySource<R> {
    /// Wraps any byte stream in the replay container format.
    ///
    /// # Errors
    ///
    /// Same contract as [`open`](FileReplaySource::open).
    pub fn from_reader(reader: R, log_sink: Arc<dyn LogSink>) -> Result<Self, MediaSourceError> {
        let mut src = Self {
            reader,
            state: StreamState::new(),
            eof: false,
            log_sink,
        };
        if let Some(block) = src.read_until_marker(PARAM_MARK)? {
            src.apply_block(&block)?;
        }
        if src.state.codec.is_none() {
            return Err(MediaSourceError::MissingPayloadType);
        }
        Ok(src)
    }

    /// Reads up to and including `marker`, returning the bytes before it.
    /// `Ok(None)` means the input ran out mid-search; the stream is then
    /// permanently at end of file.
    fn read_until_marker(&mut self, marker: &[u8; 4]) -> Result<Option<Vec<u8>>, MediaSourceError> {
        let mut buf = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(None);
                }
                Ok(_) => {
                    buf.push(byte[0]);
                    if buf.ends_with(marker) {
                        buf.truncate(buf.len() - marker.len());
                        return Ok(Some(buf));
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Applies one parameter block to the stream cursor.
    fn apply_block(&mut self, block: &[u8]) -> Result<(), MediaSourceError> {
        let mut params: HashMap<String, Value> = HashMap::new();
        for raw in block.split(|&b| b == b'\n') {
            let line = String::from_utf8_lossy(raw);
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            // directive line is <key>=<value>; anything else is skipped alone
            let Some((key, text)) = line.split_once('=') else {
                continue;
            };
            match Value::parse(text) {
                Some(value) => {
                    params.insert(key.trim().to_string(), value);
                }
                None => {
                    sink_debug!(self.log_sink, "skipping replay directive {line:?}");
                }
            }
        }
        if !params.is_empty() {
            sink_debug!(self.log_sink, "replay directives: {params:?}");
        }

        // sequence: explicit wins, else advance by dseq (default 1)
        let dseq = params.remove("dseq").and_then(|v| v.as_i64()).unwrap_or(1);
        match params.remove("seq").and_then(|v| v.as_i64()) {
            Some(seq) => self.state.seq = seq as u16,
            None => self.state.seq = self.state.seq.wrapping_add(dseq as u16),
        }

        if let Some(pt) = params.remove("PT").and_then(|v| v.as_u8()) {
            self.state.set_payload_type(pt);
        }
        if let Some(name) = params.remove("codecname").and_then(Value::into_str) {
            if let Some(codec) = &mut self.state.codec {
                codec.name = Some(name);
            }
        }
        if let Some(format) = params.remove("codecformat").and_then(Value::into_str) {
            if let Some(codec) = &mut self.state.codec {
                codec.format = Some(format);
            }
        }
        let Some(codec) = &self.state.codec else {
            return Err(MediaSourceError::MissingPayloadType);
        };
        if codec.name.is_none() {
            return Err(MediaSourceError::MissingCodecName {
                payload_type: codec.payload_type,
            });
        }

        if let Some(period) = params.remove("period").and_then(|v| v.as_f64()) {
            if period.is_finite() && period > 0.0 {
                self.state.period = Duration::from_secs_f64(period);
            }
        }

        // timestamp: explicit wins, else advance by numsamples (directive,
        // cached, or derived from the codec's sampling rate)
        match params
            .remove("TS")
            .or_else(|| params.remove("timestamp"))
            .and_then(|v| v.as_i64())
        {
            Some(ts) => self.state.timestamp = ts as u32,
            None => {
                if let Some(n) = params.remove("numsamples").and_then(|v| v.as_i64()) {
                    self.state.numsamples = Some(n as u32);
                }
                let step = self.state.resolve_numsamples()?;
                self.state.timestamp = self.state.timestamp.wrapping_add(step);
            }
        }

        if let Some(ssrc) = params.remove("SSRC").and_then(|v| v.as_i64()) {
            self.state.ssrc = ssrc as u32;
        }

        self.state.extras.extend(params);
        Ok(())
    }
}

impl<R: Read + Send> PayloadSource for FileReplaySource<R> {
    fn codecs(&self) -> Vec<CodecDescriptor> {
        self.state.codec.clone().into_iter().collect()
    }

    fn eof(&self) -> bool {
        self.eof
    }

    fn next_packet(&mut self) -> Result<(RtpPacket, Duration), MediaSourceError> {
        let payload = self.read_until_marker(PAYLOAD_MARK)?.unwrap_or_default();
        let packet = self.state.packet(payload)?;
        if !self.eof {
            if let Some(block) = self.read_until_marker(PARAM_MARK)? {
                self.apply_block(&block)?;
            }
        }
        Ok((packet, self.state.period))
    }
}
