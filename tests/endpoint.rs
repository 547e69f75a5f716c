//! End-to-end exercises over real loopback sockets: bind handshake,
//! offer/answer negotiation, paced transmission and teardown.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use rustymedia::log::NoopLogSink;
use rustymedia::log::log_sink::LogSink;
use rustymedia::media::{MediaEndpoint, MediaError};
use rustymedia::media_source::{FileReplaySource, PayloadSource, RandomSource};
use rustymedia::rtp::RtpPacket;
use std::io::Cursor;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use std::sync::Arc;
use std::time::{Duration, Instant};

const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

fn sink() -> Arc<dyn LogSink> {
    Arc::new(NoopLogSink)
}

fn answer_for(port: u16) -> String {
    format!("c=IN IP4 127.0.0.1\r\nm=audio {port} RTP/AVP 0\r\n")
}

#[test]
fn create_binds_an_ephemeral_port_and_stops_cleanly() {
    let mut ep = MediaEndpoint::create(LOCALHOST, 0, None, None, sink()).unwrap();
    assert_ne!(ep.local_port(), 0);
    assert!(!ep.is_transmitting());
    assert_eq!(ep.remote_address(), None);

    // Stop while the worker is still parked waiting for a remote address.
    ep.stop();
    ep.wait();
}

#[test]
fn create_fails_when_the_port_is_taken() {
    // A plain socket without SO_REUSEADDR occupies the port exclusively.
    let taken = UdpSocket::bind((LOCALHOST, 0)).unwrap();
    let port = taken.local_addr().unwrap().port();

    match MediaEndpoint::create(LOCALHOST, port, None, None, sink()) {
        Err(MediaError::Bind(desc)) => {
            assert!(desc.contains(&port.to_string()), "got: {desc}");
        }
        other => panic!("expected a bind error, got {other:?}", other = other.err()),
    }
}

#[test]
fn offer_advertises_the_bound_port() {
    let mut ep = MediaEndpoint::create(LOCALHOST, 0, None, None, sink()).unwrap();
    let offer = ep.local_offer();
    assert!(offer.contains(&format!("m=audio {} RTP/AVP 0 3 4", ep.local_port())));
    assert!(offer.contains("c=IN IP4 127.0.0.1\r\n"));
    assert!(offer.contains("a=sendrecv\r\n"));
    ep.stop();
    ep.wait();
}

#[test]
fn transmit_delivers_paced_packets_with_consecutive_sequences() {
    let receiver = UdpSocket::bind((LOCALHOST, 0)).unwrap();
    receiver
        .set_read_timeout(Some(Duration::from_secs(2)))
        .unwrap();
    let remote_port = receiver.local_addr().unwrap().port();

    let source = RandomSource::new(0, 40).unwrap();
    let mut ep =
        MediaEndpoint::create(LOCALHOST, 0, Some(Box::new(source)), None, sink()).unwrap();
    ep.apply_remote_offer(&answer_for(remote_port));
    assert_eq!(
        ep.remote_address().map(|a| a.port()),
        Some(remote_port)
    );
    ep.start_transmit();

    let mut buf = [0u8; 2048];
    let mut packets = Vec::new();
    let started = Instant::now();
    for _ in 0..5 {
        let (len, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(len, 12 + 40);
        packets.push(RtpPacket::decode(&buf[..len]));
    }
    let elapsed = started.elapsed();

    // Five packets at a 20 ms period span four gaps; allow generous slack
    // below but make sure pacing actually happened.
    assert!(
        elapsed >= Duration::from_millis(60),
        "sent too fast: {elapsed:?}"
    );

    let first = &packets[0].header;
    for (i, pkt) in packets.iter().enumerate() {
        assert_eq!(pkt.header.payload_type, 0);
        assert_eq!(pkt.header.ssrc, first.ssrc);
        assert_eq!(
            pkt.header.sequence_number,
            first.sequence_number.wrapping_add(i as u16)
        );
    }

    ep.stop();
    ep.wait();
}

#[test]
fn file_replay_sends_the_capture_then_keeps_draining() {
    let receiver = UdpSocket::bind((LOCALHOST, 0)).unwrap();
    receiver
        .set_read_timeout(Some(Duration::from_secs(2)))
        .unwrap();
    let remote_port = receiver.local_addr().unwrap().port();

    let capture: &[u8] =
        b"PT=0\nseq=0x100\nperiod=0.01\n<<<<0123>>>>\n<<<<4567>>>>\ndseq=2\n<<<<abc>>>>\n<<<<def>>>>\n";
    let source: Box<dyn PayloadSource + Send> = Box::new(
        FileReplaySource::from_reader(Cursor::new(capture.to_vec()), sink()).unwrap(),
    );

    let mut ep = MediaEndpoint::create(LOCALHOST, 0, Some(source), None, sink()).unwrap();
    ep.apply_remote_offer(&answer_for(remote_port));
    ep.start_transmit();

    let mut buf = [0u8; 2048];
    let mut seqs = Vec::new();
    let mut payloads = Vec::new();
    for _ in 0..4 {
        let (len, _) = receiver.recv_from(&mut buf).unwrap();
        let pkt = RtpPacket::decode(&buf[..len]);
        seqs.push(pkt.header.sequence_number);
        payloads.push(pkt.payload);
    }
    assert_eq!(seqs, vec![0x100, 0x101, 0x103, 0x104]);
    assert_eq!(
        payloads,
        vec![
            b"0123".to_vec(),
            b"4567".to_vec(),
            b"abc".to_vec(),
            b"def".to_vec()
        ]
    );

    // The capture is exhausted: nothing else arrives, but the endpoint is
    // still alive and only an explicit stop ends it.
    receiver
        .set_read_timeout(Some(Duration::from_millis(100)))
        .unwrap();
    assert!(receiver.recv_from(&mut buf).is_err());

    ep.stop();
    ep.wait();
}

#[test]
fn start_transmit_is_idempotent_and_freezes_negotiation() {
    let receiver = UdpSocket::bind((LOCALHOST, 0)).unwrap();
    let remote_port = receiver.local_addr().unwrap().port();

    let mut ep = MediaEndpoint::create(LOCALHOST, 0, None, None, sink()).unwrap();
    ep.apply_remote_offer(&answer_for(remote_port));
    let negotiated = ep.remote_address();
    assert!(negotiated.is_some());

    ep.start_transmit();
    ep.start_transmit(); // second call must change nothing
    assert!(ep.is_transmitting());

    // A late answer must not alter the remote address anymore.
    ep.apply_remote_offer("c=IN IP4 10.9.8.7\r\nm=audio 9999 RTP/AVP 0\r\n");
    assert_eq!(ep.remote_address(), negotiated);

    ep.stop();
    ep.wait();
}

#[test]
fn transmit_without_an_answer_degrades_to_receive_only() {
    let mut ep = MediaEndpoint::create(LOCALHOST, 0, None, None, sink()).unwrap();
    ep.start_transmit(); // logs a warning, no remote address to send to
    assert!(ep.is_transmitting());
    assert_eq!(ep.remote_address(), None);

    // The flag flipped, so negotiation is frozen even though nothing flows.
    ep.apply_remote_offer(&answer_for(4000));
    assert_eq!(ep.remote_address(), None);

    ep.stop();
    ep.wait();
}
