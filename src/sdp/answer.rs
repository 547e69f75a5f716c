use std::net::IpAddr;

/// Pulls the remote media address out of an SDP answer.
///
/// Deliberately permissive, the exact opposite of a validating parser: the
/// text is scanned line by line, a `c=` line contributes its third
/// whitespace token as the IP and an `m=` line its second token as the port.
/// Anything malformed is ignored and the corresponding field simply stays
/// `None`; later lines overwrite earlier ones.
#[must_use]
pub fn scan_remote_address(sdp: &str) -> (Option<IpAddr>, Option<u16>) {
    let mut ip = None;
    let mut port = None;
    for raw in sdp.lines() {
        let line = raw.trim_end_matches('\r');
        if line.starts_with("c=") {
            if let Some(parsed) = line.split_whitespace().nth(2).and_then(|t| t.parse().ok()) {
                ip = Some(parsed);
            }
        }
        if line.starts_with("m=") {
            if let Some(parsed) = line.split_whitespace().nth(1).and_then(|t| t.parse().ok()) {
                port = Some(parsed);
            }
        }
    }
    (ip, port)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    const ANSWER: &str = "v=0\r\n\
        o=- 123 123 IN IP4 peer\r\n\
        s=-\r\n\
        m=audio 12345 RTP/AVP 116\r\n\
        c=IN IP4 127.0.0.1\r\n\
        a=rtpmap:116 AMR-WB/16000/1\r\n";

    #[test]
    fn extracts_ip_and_port_regardless_of_line_order() {
        let (ip, port) = scan_remote_address(ANSWER);
        assert_eq!(ip, Some(IpAddr::V4(Ipv4Addr::LOCALHOST)));
        assert_eq!(port, Some(12345));
    }

    #[test]
    fn malformed_lines_leave_fields_unset() {
        assert_eq!(scan_remote_address(""), (None, None));
        assert_eq!(scan_remote_address("c=IN IP4\r\nm=audio\r\n"), (None, None));
        assert_eq!(
            scan_remote_address("c=IN IP4 not-an-ip\r\nm=audio zz RTP/AVP 0\r\n"),
            (None, None)
        );
        // a bad c= does not poison a good m=
        assert_eq!(
            scan_remote_address("c=bogus\r\nm=audio 4000 RTP/AVP 0\r\n"),
            (None, Some(4000))
        );
    }

    #[test]
    fn later_lines_overwrite_earlier_ones() {
        let sdp = "c=IN IP4 10.0.0.1\r\nm=audio 1000 RTP/AVP 0\r\n\
                   c=IN IP4 10.0.0.2\r\nm=audio 2000 RTP/AVP 0\r\n";
        let (ip, port) = scan_remote_address(sdp);
        assert_eq!(ip, Some("10.0.0.2".parse().unwrap()));
        assert_eq!(port, Some(2000));
    }

    #[test]
    fn plain_newlines_work_too() {
        let (ip, port) = scan_remote_address("c=IN IP4 192.0.2.7\nm=audio 9 RTP/AVP 8\n");
        assert_eq!(ip, Some("192.0.2.7".parse().unwrap()));
        assert_eq!(port, Some(9));
    }
}
