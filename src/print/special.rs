//! Special-case tag formatting.
//!
//! A closed dispatch table consulted before the generic renderer. Each
//! handler fully owns its tag's phrasing and answers with an explicit
//! outcome: [`Special::Handled`] when it emitted the line, or
//! [`Special::Declined`] when the field's type or count is not what it
//! expects, in which case the orchestrator falls through to the generic
//! renderer. The outcome is an enum rather than a zero-length sentinel so
//! that a legitimately empty rendering could never read as a decline.

use crate::fields::FieldInfo;
use crate::tags::{tag, value::INKSET_CMYK, FieldType};
use crate::value::TagValue;

use super::buffer::SatWriter;

/// Outcome of offering a field to the special-case table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Special {
    /// The handler emitted the whole line for this tag.
    Handled,
    /// No handler, or the field did not match; render generically.
    Declined,
}

type SpecialFn = fn(&FieldInfo, u32, &TagValue, &mut SatWriter<'_>) -> Special;

/// Dispatch table, keyed by tag id, evaluated in declaration order.
const SPECIAL_FORMATTERS: &[(u16, SpecialFn)] = &[
    (tag::INK_SET, ink_set),
    (tag::DOT_RANGE, dot_range),
    (tag::WHITE_POINT, white_point),
    (tag::XML_PACKET, xml_packet),
    (tag::RICH_TIFF_IPTC, rich_tiff_iptc),
    (tag::PHOTOSHOP, photoshop),
    (tag::ICC_PROFILE, icc_profile),
    (tag::STONITS, stonits),
];

/// Offer a field to the special-case table.
pub(crate) fn try_special(
    fi: &FieldInfo,
    count: u32,
    value: &TagValue,
    out: &mut SatWriter<'_>,
) -> Special {
    for &(tag_id, handler) in SPECIAL_FORMATTERS {
        if tag_id == fi.tag {
            return handler(fi, count, value, out);
        }
    }
    Special::Declined
}

fn ink_set(fi: &FieldInfo, count: u32, value: &TagValue, out: &mut SatWriter<'_>) -> Special {
    if count != 2 || fi.field_type != Some(FieldType::Short) {
        return Special::Declined;
    }
    let Some(code) = value.as_u16() else {
        return Special::Declined;
    };
    match code {
        INKSET_CMYK => write!(out, "  Ink Set: CMYK\n"),
        _ => write!(out, "  Ink Set: {} (0x{:x})\n", code, code),
    }
    Special::Handled
}

fn dot_range(fi: &FieldInfo, count: u32, value: &TagValue, out: &mut SatWriter<'_>) -> Special {
    if count != 2 || fi.field_type != Some(FieldType::Short) {
        return Special::Declined;
    }
    let Some((lo, hi)) = value.u16_pair() else {
        return Special::Declined;
    };
    write!(out, "  Dot Range: {}-{}\n", lo, hi);
    Special::Handled
}

fn white_point(fi: &FieldInfo, count: u32, value: &TagValue, out: &mut SatWriter<'_>) -> Special {
    if count != 2 || fi.field_type != Some(FieldType::Rational) {
        return Special::Declined;
    }
    let Some(points) = value.floats().filter(|v| v.len() >= 2) else {
        return Special::Declined;
    };
    write!(out, "  White Point: {}-{}\n", points[0], points[1]);
    Special::Handled
}

fn xml_packet(_fi: &FieldInfo, count: u32, value: &TagValue, out: &mut SatWriter<'_>) -> Special {
    out.push_bytes(b"  XMLPacket (XMP Metadata):\n");
    if let Some(bytes) = value.bytes() {
        let n = (count as usize).min(bytes.len());
        out.push_bytes(&bytes[..n]);
    }
    out.push_byte(b'\n');
    Special::Handled
}

fn rich_tiff_iptc(
    _fi: &FieldInfo,
    count: u32,
    _value: &TagValue,
    out: &mut SatWriter<'_>,
) -> Special {
    // The tag is registered as an array of LONG values, so the byte count
    // is four per declared value.
    write!(
        out,
        "  RichTIFFIPTC Data: <present>, {} bytes\n",
        count.saturating_mul(4)
    );
    Special::Handled
}

fn photoshop(_fi: &FieldInfo, count: u32, _value: &TagValue, out: &mut SatWriter<'_>) -> Special {
    write!(out, "  Photoshop Data: <present>, {} bytes\n", count);
    Special::Handled
}

fn icc_profile(_fi: &FieldInfo, count: u32, _value: &TagValue, out: &mut SatWriter<'_>) -> Special {
    write!(out, "  ICC Profile: <present>, {} bytes\n", count);
    Special::Handled
}

fn stonits(fi: &FieldInfo, count: u32, value: &TagValue, out: &mut SatWriter<'_>) -> Special {
    if count != 1 || fi.field_type != Some(FieldType::Double) {
        return Special::Declined;
    }
    let Some(factor) = value.as_f64() else {
        return Special::Declined;
    };
    write!(out, "  Sample to Nits conversion factor: {:.4e}\n", factor);
    Special::Handled
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::field_def;
    use bytes::Bytes;

    fn special_to_string(tag_id: u16, count: u32, value: &TagValue) -> (Special, String) {
        let fi = field_def(tag_id).unwrap().info();
        let mut buf = [0u8; 512];
        let (outcome, n) = {
            let mut out = SatWriter::new(&mut buf);
            let outcome = try_special(&fi, count, value, &mut out);
            (outcome, out.used())
        };
        (outcome, String::from_utf8(buf[..n].to_vec()).unwrap())
    }

    #[test]
    fn test_ink_set_known_code() {
        let (outcome, text) = special_to_string(tag::INK_SET, 2, &TagValue::Short(vec![1, 0]));
        assert_eq!(outcome, Special::Handled);
        assert_eq!(text, "  Ink Set: CMYK\n");
    }

    #[test]
    fn test_ink_set_unknown_code_dual_fallback() {
        let (outcome, text) = special_to_string(tag::INK_SET, 2, &TagValue::Short(vec![42, 0]));
        assert_eq!(outcome, Special::Handled);
        assert_eq!(text, "  Ink Set: 42 (0x2a)\n");
    }

    #[test]
    fn test_ink_set_declines_on_count_mismatch() {
        let (outcome, text) = special_to_string(tag::INK_SET, 1, &TagValue::Short(vec![1]));
        assert_eq!(outcome, Special::Declined);
        assert_eq!(text, "", "a declining handler must emit nothing");
    }

    #[test]
    fn test_dot_range() {
        let (outcome, text) = special_to_string(tag::DOT_RANGE, 2, &TagValue::Short(vec![0, 255]));
        assert_eq!(outcome, Special::Handled);
        assert_eq!(text, "  Dot Range: 0-255\n");
    }

    #[test]
    fn test_white_point() {
        let (outcome, text) = special_to_string(
            tag::WHITE_POINT,
            2,
            &TagValue::RationalF32(vec![0.3127, 0.329]),
        );
        assert_eq!(outcome, Special::Handled);
        assert_eq!(text, "  White Point: 0.3127-0.329\n");
    }

    #[test]
    fn test_white_point_declines_on_type() {
        let (outcome, _) = special_to_string(tag::WHITE_POINT, 2, &TagValue::Short(vec![1, 2]));
        assert_eq!(outcome, Special::Declined);
    }

    #[test]
    fn test_xml_packet_dumped_verbatim() {
        let packet = Bytes::from_static(b"<x:xmpmeta/>");
        let (outcome, text) = special_to_string(
            tag::XML_PACKET,
            packet.len() as u32,
            &TagValue::Byte(packet.to_vec()),
        );
        assert_eq!(outcome, Special::Handled);
        assert_eq!(text, "  XMLPacket (XMP Metadata):\n<x:xmpmeta/>\n");
    }

    #[test]
    fn test_blob_tags_render_presence_only() {
        let blob = TagValue::Byte(vec![0u8; 16]);
        let (_, text) = special_to_string(tag::PHOTOSHOP, 16, &blob);
        assert_eq!(text, "  Photoshop Data: <present>, 16 bytes\n");

        let profile = TagValue::Undefined(Bytes::from_static(&[0u8; 8]));
        let (_, text) = special_to_string(tag::ICC_PROFILE, 8, &profile);
        assert_eq!(text, "  ICC Profile: <present>, 8 bytes\n");

        let iptc = TagValue::Long(vec![0; 3]);
        let (_, text) = special_to_string(tag::RICH_TIFF_IPTC, 3, &iptc);
        assert_eq!(text, "  RichTIFFIPTC Data: <present>, 12 bytes\n");
    }

    #[test]
    fn test_stonits() {
        let (outcome, text) =
            special_to_string(tag::STONITS, 1, &TagValue::Double(vec![179.0]));
        assert_eq!(outcome, Special::Handled);
        assert_eq!(text, format!("  Sample to Nits conversion factor: {:.4e}\n", 179.0));
    }

    #[test]
    fn test_unlisted_tag_declines() {
        let fi = field_def(tag::SOFTWARE).unwrap().info();
        let mut buf = [0u8; 64];
        let mut out = SatWriter::new(&mut buf);
        let outcome = try_special(
            &fi,
            1,
            &TagValue::Ascii(Bytes::from_static(b"x\0")),
            &mut out,
        );
        assert_eq!(outcome, Special::Declined);
        assert_eq!(out.used(), 0);
    }
}
