//! Generic type-directed value rendering.
//!
//! One line per field: the display name, a colon, the values joined by
//! single commas, and a trailing newline. Dispatch is by datatype:
//! integers print in their natural signed or unsigned decimal form, opaque
//! and IFD-offset types print as `0x` hex, rationals print as single- or
//! double-precision decimal text depending on their decoded storage width,
//! and ASCII payloads print as one NUL-terminated string that ends the
//! field regardless of the declared count.

use crate::fields::FieldInfo;
use crate::value::TagValue;

use super::buffer::SatWriter;

/// Marker emitted for a datatype outside the recognized enumeration.
pub(crate) const UNSUPPORTED_TYPE_MARKER: &str = "<unsupported data type in TIFFPrint>";

/// Render one field line: `  Name: v1,v2,...\n`.
///
/// `count` is the effective value count the orchestrator derived from the
/// field's arity classifier; it is clamped to what the value actually
/// holds so a lying provider cannot push the renderer out of bounds.
pub(crate) fn render_field(
    out: &mut SatWriter<'_>,
    fi: &FieldInfo,
    count: u32,
    value: &TagValue,
) {
    write!(out, "  {}: ", fi.name);

    if fi.field_type.is_none() {
        out.push_bytes(UNSUPPORTED_TYPE_MARKER.as_bytes());
        out.push_byte(b'\n');
        return;
    }

    let n = count as usize;
    match value {
        TagValue::Ascii(b) => {
            // One string, ends the field early: no comma-joined values follow.
            let end = b.iter().position(|&c| c == 0).unwrap_or(b.len());
            out.push_bytes(&b[..end]);
        }
        TagValue::Byte(v) => join(out, n, v, |out, x| write!(out, "{}", x)),
        TagValue::SByte(v) => join(out, n, v, |out, x| write!(out, "{}", x)),
        TagValue::Undefined(b) => join(out, n, b, |out, x| write!(out, "0x{:x}", x)),
        TagValue::Short(v) => join(out, n, v, |out, x| write!(out, "{}", x)),
        TagValue::SShort(v) => join(out, n, v, |out, x| write!(out, "{}", x)),
        TagValue::Long(v) => join(out, n, v, |out, x| write!(out, "{}", x)),
        TagValue::SLong(v) => join(out, n, v, |out, x| write!(out, "{}", x)),
        TagValue::Long8(v) => join(out, n, v, |out, x| write!(out, "{}", x)),
        TagValue::SLong8(v) => join(out, n, v, |out, x| write!(out, "{}", x)),
        TagValue::Float(v) => join(out, n, v, |out, x| write!(out, "{}", x)),
        TagValue::Double(v) => join(out, n, v, |out, x| write!(out, "{}", x)),
        TagValue::RationalF32(v) => join(out, n, v, |out, x| write!(out, "{}", x)),
        TagValue::RationalF64(v) => join(out, n, v, |out, x| write!(out, "{}", x)),
        TagValue::Ifd(v) => join(out, n, v, |out, x| write!(out, "0x{:x}", x)),
        TagValue::Ifd8(v) => join(out, n, v, |out, x| write!(out, "0x{:x}", x)),
    }

    out.push_byte(b'\n');
}

fn join<T>(
    out: &mut SatWriter<'_>,
    count: usize,
    values: &[T],
    mut render: impl FnMut(&mut SatWriter<'_>, &T),
) {
    for (j, v) in values.iter().take(count).enumerate() {
        if j > 0 {
            out.push_byte(b',');
        }
        render(out, v);
    }
}

// =============================================================================
// Tests
// =============================================================================
