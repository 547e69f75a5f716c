//! Replays a captured media stream to a peer: binds a local endpoint, prints
//! its SDP offer, synthesizes an answer for the configured remote address and
//! transmits until the configured duration elapses.

use rustymedia::config::Config;
use rustymedia::log::log_sink::LogSink;
use rustymedia::log::logger::Logger;
use rustymedia::media::MediaEndpoint;
use rustymedia::media_source::{FileReplaySource, PayloadSource};
use std::env;
use std::net::IpAddr;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() {
    let args: Vec<String> = env::args().collect();

    let config = match args.get(1) {
        Some(path) => Config::load(path),
        None => Config::load("rtpreplay.conf"),
    }
    .unwrap_or_else(|e| {
        eprintln!("rtpreplay: {e}. Using empty config.");
        Config::empty()
    });

    if let Err(e) = run(&config) {
        eprintln!("rtpreplay: {e}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), String> {
    let logger = Logger::start_from_config("rtpreplay", 4096, config);
    println!("logging to {}", logger.file_path().display());
    let sink: Arc<dyn LogSink> = Arc::new(logger.handle());

    let local_ip: IpAddr = config
        .get_or_default("media", "local_ip", "127.0.0.1")
        .parse()
        .map_err(|e| format!("bad local_ip: {e}"))?;
    let local_port = config.get_u16("media", "local_port", 0);
    let owner = config.get("media", "owner");

    let file = config
        .get_non_empty("replay", "file")
        .ok_or("missing [replay] file")?;
    let remote_ip = config
        .get_non_empty("replay", "remote_ip")
        .ok_or("missing [replay] remote_ip")?;
    let remote_port = config.get_u16("replay", "remote_port", 0);
    if remote_port == 0 {
        return Err("missing [replay] remote_port".into());
    }
    let duration = config.get_duration_ms("replay", "duration_ms", Duration::from_secs(5));

    let source: Box<dyn PayloadSource + Send> = Box::new(
        FileReplaySource::open(file, sink.clone()).map_err(|e| format!("cannot open {file}: {e}"))?,
    );

    let mut endpoint = MediaEndpoint::create(local_ip, local_port, Some(source), owner, sink)
        .map_err(|e| e.to_string())?;
    print!("{}", endpoint.local_offer());

    // The signaling layer would hand us the peer's answer; synthesize the
    // two lines this tool needs from its configuration.
    endpoint.apply_remote_offer(&format!(
        "c=IN IP4 {remote_ip}\r\nm=audio {remote_port} RTP/AVP 0\r\n"
    ));
    endpoint.start_transmit();

    thread::sleep(duration);

    endpoint.stop();
    endpoint.wait();
    Ok(())
}
