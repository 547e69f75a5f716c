use super::codec_descriptor::CodecDescriptor;

/// Static audio payload type assignments (RFC 3551 section 6), as
/// `<pt, encoding-name/clock-rate[/channels]>`. Process-wide, immutable,
/// consulted whenever a payload type needs a default codec name.
static DEFAULT_CODECS: &[(u8, &str)] = &[
    (0, "PCMU/8000"),
    (3, "GSM/8000"),
    (4, "G723/8000"),
    (5, "DVI4/8000"),
    (6, "DVI4/16000"),
    (7, "LPC/8000"),
    (8, "PCMA/8000"),
    (9, "G722/8000"),
    (10, "L16/44100/2"),
    (11, "L16/44100/1"),
    (12, "QCELP/8000"),
    (13, "CN/8000"),
    (14, "MPA/90000"),
    (15, "G728/8000"),
    (16, "DVI4/11025"),
    (17, "DVI4/22050"),
    (18, "G729/8000"),
];

/// Default codec name for a static payload type, `None` for dynamic or
/// unassigned types.
#[must_use]
pub fn default_codec_name(payload_type: u8) -> Option<&'static str> {
    DEFAULT_CODECS
        .iter()
        .find(|(pt, _)| *pt == payload_type)
        .map(|(_, name)| *name)
}

/// The whole static table as descriptors, in payload type order. Used to
/// build an offer when no concrete stream is attached yet.
#[must_use]
pub fn default_codec_table() -> Vec<CodecDescriptor> {
    DEFAULT_CODECS
        .iter()
        .map(|(pt, name)| CodecDescriptor::new(*pt, Some((*name).to_string()), None))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn static_types_resolve_and_dynamic_types_do_not() {
        assert_eq!(default_codec_name(0), Some("PCMU/8000"));
        assert_eq!(default_codec_name(8), Some("PCMA/8000"));
        assert_eq!(default_codec_name(96), None);
        assert_eq!(default_codec_name(1), None); // reserved, not assigned
    }

    #[test]
    fn table_is_ordered_and_complete() {
        let table = default_codec_table();
        assert_eq!(table.len(), 17);
        assert_eq!(table[0].payload_type, 0);
        assert_eq!(table.last().unwrap().payload_type, 18);
        assert!(table.windows(2).all(|w| w[0].payload_type < w[1].payload_type));
        assert!(table.iter().all(|c| c.name.is_some() && c.format.is_none()));
    }
}
