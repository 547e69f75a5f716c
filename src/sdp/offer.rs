use crate::media_source::CodecDescriptor;
use rand::{RngCore, rngs::OsRng};
use std::net::IpAddr;

/// Builds the CRLF-joined local media offer for one audio leg.
///
/// The line set is fixed: `v=`/`o=`/`s=`/`c=`/`t=`, one `m=audio` line
/// carrying the payload types in codec order, a `sendrecv` attribute, then
/// one `a=rtpmap:` per named codec and one `a=fmtp:` per codec with format
/// parameters. Deterministic for given inputs except the random session id.
#[must_use]
pub fn build_media_offer(
    owner: &str,
    local_ip: IpAddr,
    local_port: u16,
    codecs: &[CodecDescriptor],
) -> String {
    let mut out = String::new();
    macro_rules! pushln {
        ($s:expr) => {{
            out.push_str($s);
            out.push_str("\r\n");
        }};
    }

    let session_id = OsRng.next_u32();
    let fmts = codecs
        .iter()
        .map(|c| c.payload_type.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    pushln!("v=0");
    pushln!(&format!("o=- {session_id} {session_id} IN IP4 {owner}"));
    pushln!("s=-");
    pushln!(&format!("c=IN IP4 {local_ip}"));
    pushln!("t=0 0");
    pushln!(&format!("m=audio {local_port} RTP/AVP {fmts}"));
    pushln!("a=sendrecv");
    for c in codecs {
        if let Some(name) = &c.name {
            pushln!(&format!("a=rtpmap:{} {}", c.payload_type, name));
        }
    }
    for c in codecs {
        if let Some(format) = &c.format {
            pushln!(&format!("a=fmtp:{} {}", c.payload_type, format));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::media_source::default_codec_table;

    #[test]
    fn offer_carries_the_mandated_lines_in_order() {
        let codecs = default_codec_table();
        let offer = build_media_offer(
            "10.0.0.1",
            "192.168.1.20".parse().unwrap(),
            49170,
            &codecs,
        );

        let lines: Vec<&str> = offer.split("\r\n").collect();
        assert_eq!(lines[0], "v=0");
        assert!(lines[1].starts_with("o=- "));
        assert!(lines[1].ends_with(" IN IP4 10.0.0.1"));
        assert_eq!(lines[2], "s=-");
        assert_eq!(lines[3], "c=IN IP4 192.168.1.20");
        assert_eq!(lines[4], "t=0 0");
        assert_eq!(
            lines[5],
            "m=audio 49170 RTP/AVP 0 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18"
        );
        assert_eq!(lines[6], "a=sendrecv");
        assert_eq!(lines[7], "a=rtpmap:0 PCMU/8000");
        // every table codec is named, so one rtpmap each plus the final CRLF
        assert_eq!(lines.len(), 7 + codecs.len() + 1);
        assert_eq!(*lines.last().unwrap(), "");
    }

    #[test]
    fn session_id_and_version_are_the_same_random_number() {
        let offer = build_media_offer("o", "127.0.0.1".parse().unwrap(), 0, &[]);
        let origin = offer
            .split("\r\n")
            .find(|l| l.starts_with("o="))
            .unwrap()
            .to_string();
        let toks: Vec<&str> = origin.split_whitespace().collect();
        assert_eq!(toks[1], toks[2]);
        toks[1].parse::<u32>().expect("session id is a u32");
    }

    #[test]
    fn unnamed_codecs_get_no_rtpmap_and_formats_get_fmtp() {
        let codecs = vec![
            CodecDescriptor::new(96, None, None),
            CodecDescriptor::new(
                97,
                Some("iLBC/8000".into()),
                Some("mode=30".into()),
            ),
        ];
        let offer = build_media_offer("o", "127.0.0.1".parse().unwrap(), 4000, &codecs);
        assert!(offer.contains("m=audio 4000 RTP/AVP 96 97\r\n"));
        assert!(!offer.contains("a=rtpmap:96"));
        assert!(offer.contains("a=rtpmap:97 iLBC/8000\r\n"));
        assert!(offer.contains("a=fmtp:97 mode=30\r\n"));
        assert!(!offer.contains("a=fmtp:96"));
    }
}
