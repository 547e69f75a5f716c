//! RustyMedia is the real-time media transport endpoint of a telephony stack.
//!
//! For one call leg it owns a UDP socket, paces and sends timestamped RTP
//! packets, drains inbound traffic, and negotiates addressing through an
//! SDP offer/answer text exchange. The signaling layer (SIP parsing,
//! transactions, call control) lives outside this crate: it supplies the
//! local address, an optional payload source and the remote answer, and it
//! drives the endpoint lifecycle with `start_transmit`/`stop`/`wait`.
//!
//! The crate is structured into several modules, each responsible for a
//! specific aspect of the media path.

/// Handles configuration loading and management.
pub mod config;
/// Logging utilities for the crate and its binaries.
pub mod log;
/// Media endpoint controller, its worker and the control channel between them.
pub mod media;
/// Payload sources feeding the media worker (random, file replay, placeholder).
pub mod media_source;
/// RTP (Real-time Transport Protocol) packet parsing and building.
pub mod rtp;
/// SDP (Session Description Protocol) offer building and answer scanning.
pub mod sdp;
