//! Directory printing orchestration.
//!
//! A single sequential pass over one decoded directory:
//!
//! 1. a header line with the directory's byte offset, hex and decimal;
//! 2. a fixed canonical sequence of well-known tags, each with bespoke
//!    phrasing and named-enum tables;
//! 3. the provider's dynamic custom-tag list, each tag offered to the
//!    special-case table and otherwise rendered generically;
//! 4. an optional strip/tile offset table.
//!
//! Nothing here can fail: missing tags are skipped, unknown datatypes
//! degrade to an inline marker, and the returned logical length may exceed
//! the buffer capacity to signal truncation. Every unrecognized enumerated
//! code prints with the uniform `<decimal> (0x<hex>)` fallback.

use std::ops::BitOr;

use tracing::{debug, trace};

use crate::fields::ReadCount;
use crate::provider::DirectoryMetadata;
use crate::tags::{tag, value::*};
use crate::value::{Real, TagValue};

use super::buffer::SatWriter;
use super::escape::escape_into;
use super::render::render_field;
use super::special::{try_special, Special};

// =============================================================================
// PrintFlags
// =============================================================================

/// Bit-flag set selecting optional output sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintFlags(u32);

impl PrintFlags {
    /// No optional sections.
    pub const NONE: PrintFlags = PrintFlags(0);
    /// Append the strip/tile offset table.
    pub const STRIPS: PrintFlags = PrintFlags(0x1);
    /// Dump transfer-function curves in full instead of `(present)`.
    pub const CURVES: PrintFlags = PrintFlags(0x2);
    /// Dump the color map in full instead of `(present)`.
    pub const COLORMAP: PrintFlags = PrintFlags(0x4);

    /// Whether all bits of `other` are set.
    #[inline]
    pub fn contains(self, other: PrintFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for PrintFlags {
    type Output = PrintFlags;

    fn bitor(self, rhs: PrintFlags) -> PrintFlags {
        PrintFlags(self.0 | rhs.0)
    }
}

// =============================================================================
// Canonical tag set
// =============================================================================

/// Tags consumed by the canonical printing sequence (and the strip table).
/// A provider's custom-tag list must not include these. Sorted.
const CANONICAL_TAGS: &[u16] = &[
    tag::SUBFILE_TYPE,
    tag::IMAGE_WIDTH,
    tag::IMAGE_LENGTH,
    tag::BITS_PER_SAMPLE,
    tag::COMPRESSION,
    tag::PHOTOMETRIC,
    tag::THRESHHOLDING,
    tag::FILL_ORDER,
    tag::STRIP_OFFSETS,
    tag::ORIENTATION,
    tag::SAMPLES_PER_PIXEL,
    tag::ROWS_PER_STRIP,
    tag::STRIP_BYTE_COUNTS,
    tag::MIN_SAMPLE_VALUE,
    tag::MAX_SAMPLE_VALUE,
    tag::X_RESOLUTION,
    tag::Y_RESOLUTION,
    tag::PLANAR_CONFIG,
    tag::X_POSITION,
    tag::Y_POSITION,
    tag::RESOLUTION_UNIT,
    tag::PAGE_NUMBER,
    tag::TRANSFER_FUNCTION,
    tag::COLOR_MAP,
    tag::HALFTONE_HINTS,
    tag::TILE_WIDTH,
    tag::TILE_LENGTH,
    tag::TILE_OFFSETS,
    tag::TILE_BYTE_COUNTS,
    tag::SUB_IFD,
    tag::INK_NAMES,
    tag::EXTRA_SAMPLES,
    tag::SAMPLE_FORMAT,
    tag::SMIN_SAMPLE_VALUE,
    tag::SMAX_SAMPLE_VALUE,
    tag::YCBCR_SUBSAMPLING,
    tag::YCBCR_POSITIONING,
    tag::REFERENCE_BLACK_WHITE,
    tag::IMAGE_DEPTH,
    tag::TILE_DEPTH,
];

/// Whether a tag belongs to the canonical printing sequence.
pub(crate) fn is_canonical_tag(tag_id: u16) -> bool {
    CANONICAL_TAGS.binary_search(&tag_id).is_ok()
}

// =============================================================================
// Enum name tables
// =============================================================================

const PHOTO_NAMES: &[&str] = &[
    "min-is-white",
    "min-is-black",
    "RGB color",
    "palette color (RGB from colormap)",
    "transparency mask",
    "separated",
    "YCbCr",
    "7 (0x7)",
    "CIE L*a*b*",
    "ICC L*a*b*",
    "ITU L*a*b*",
];

const ORIENT_NAMES: &[&str] = &[
    "0 (0x0)",
    "row 0 top, col 0 lhs",
    "row 0 top, col 0 rhs",
    "row 0 bottom, col 0 rhs",
    "row 0 bottom, col 0 lhs",
    "row 0 lhs, col 0 top",
    "row 0 rhs, col 0 top",
    "row 0 rhs, col 0 bottom",
    "row 0 lhs, col 0 bottom",
];

// =============================================================================
// Entry points
// =============================================================================

/// Print one directory into `buf`, returning the logical text length.
///
/// At most `buf.len() - 1` content bytes are written and the buffer stays
/// NUL-terminated; the returned length may exceed the capacity, which is
/// how callers detect truncation. Passing an empty buffer is the
/// documented way to measure the required size before allocating.
pub fn print_directory(buf: &mut [u8], dir: &dyn DirectoryMetadata, flags: PrintFlags) -> usize {
    let mut out = SatWriter::new(buf);

    let offset = dir.directory_offset();
    write!(out, "TIFF Directory at offset 0x{:x} ({})\n", offset, offset);

    // Sample-count context consumed by several later fields.
    let (extrasamples, sampleinfo) = match dir.value_with_count(tag::EXTRA_SAMPLES) {
        Some((n, v)) => (n.min(u16::MAX as u32) as u16, Some(v)),
        None => (0, None),
    };
    let samplesperpixel = get_u16(dir, tag::SAMPLES_PER_PIXEL).unwrap_or(0);
    let bitspersample = get_u16(dir, tag::BITS_PER_SAMPLE);

    if let Some(subfiletype) = get_u32(dir, tag::SUBFILE_TYPE) {
        out.push_bytes(b"  Subfile Type:");
        let mut sep = " ";
        for (bit, name) in [
            (FILETYPE_REDUCED_IMAGE, "reduced-resolution image"),
            (FILETYPE_PAGE, "multi-page document"),
            (FILETYPE_MASK, "transparency mask"),
        ] {
            if subfiletype & bit != 0 {
                write!(out, "{}{}", sep, name);
                sep = "/";
            }
        }
        write!(out, " ({} = 0x{:x})\n", subfiletype, subfiletype);
    }

    if let (Some(length), Some(width)) = (
        get_u32(dir, tag::IMAGE_LENGTH),
        get_u32(dir, tag::IMAGE_WIDTH),
    ) {
        write!(out, "  Image Width: {} Image Length: {}", width, length);
        if let Some(depth) = get_u32(dir, tag::IMAGE_DEPTH) {
            write!(out, " Image Depth: {}", depth);
        }
        out.push_byte(b'\n');
    }

    if let (Some(length), Some(width)) = (
        get_u32(dir, tag::TILE_LENGTH),
        get_u32(dir, tag::TILE_WIDTH),
    ) {
        write!(out, "  Tile Width: {} Tile Length: {}", width, length);
        if let Some(depth) = get_u32(dir, tag::TILE_DEPTH) {
            write!(out, " Tile Depth: {}", depth);
        }
        out.push_byte(b'\n');
    }

    if let (Some(xres), Some(yres)) = (
        get_real(dir, tag::X_RESOLUTION),
        get_real(dir, tag::Y_RESOLUTION),
    ) {
        write!(out, "  Resolution: {}, {}", xres, yres);
        if let Some(unit) = get_u16(dir, tag::RESOLUTION_UNIT) {
            match unit {
                RESUNIT_NONE => out.push_bytes(b" (unitless)"),
                RESUNIT_INCH => out.push_bytes(b" pixels/inch"),
                RESUNIT_CENTIMETER => out.push_bytes(b" pixels/cm"),
                _ => write!(out, " (unit {} = 0x{:x})", unit, unit),
            }
        }
        out.push_byte(b'\n');
    }

    if let (Some(xpos), Some(ypos)) = (
        get_real(dir, tag::X_POSITION),
        get_real(dir, tag::Y_POSITION),
    ) {
        write!(out, "  Position: {}, {}\n", xpos, ypos);
    }

    if let Some(bits) = bitspersample {
        write!(out, "  Bits/Sample: {}\n", bits);
    }

    if let Some(format) = get_u16(dir, tag::SAMPLE_FORMAT) {
        out.push_bytes(b"  Sample Format: ");
        match format {
            SAMPLEFORMAT_VOID => out.push_bytes(b"void\n"),
            SAMPLEFORMAT_INT => out.push_bytes(b"signed integer\n"),
            SAMPLEFORMAT_UINT => out.push_bytes(b"unsigned integer\n"),
            SAMPLEFORMAT_IEEEFP => out.push_bytes(b"IEEE floating point\n"),
            SAMPLEFORMAT_COMPLEXINT => out.push_bytes(b"complex signed integer\n"),
            SAMPLEFORMAT_COMPLEXIEEEFP => out.push_bytes(b"complex IEEE floating point\n"),
            _ => write!(out, "{} (0x{:x})\n", format, format),
        }
    }

    if let Some(compression) = get_u16(dir, tag::COMPRESSION) {
        out.push_bytes(b"  Compression Scheme: ");
        match dir.codec_name(compression) {
            Some(name) => write!(out, "{}\n", name),
            None => write!(out, "{} (0x{:x})\n", compression, compression),
        }
    }

    if let Some(photometric) = get_u16(dir, tag::PHOTOMETRIC) {
        out.push_bytes(b"  Photometric Interpretation: ");
        if let Some(name) = PHOTO_NAMES.get(photometric as usize) {
            write!(out, "{}\n", name);
        } else {
            match photometric {
                PHOTOMETRIC_LOGL => out.push_bytes(b"CIE Log2(L)\n"),
                PHOTOMETRIC_LOGLUV => out.push_bytes(b"CIE Log2(L) (u',v')\n"),
                _ => write!(out, "{} (0x{:x})\n", photometric, photometric),
            }
        }
    }

    if extrasamples > 0 {
        write!(out, "  Extra Samples: {}<", extrasamples);
        let info = sampleinfo.as_ref().and_then(TagValue::shorts).unwrap_or(&[]);
        let mut sep = "";
        for &code in info.iter().take(extrasamples as usize) {
            match code {
                EXTRASAMPLE_UNSPECIFIED => write!(out, "{}unspecified", sep),
                EXTRASAMPLE_ASSOCALPHA => write!(out, "{}assoc-alpha", sep),
                EXTRASAMPLE_UNASSALPHA => write!(out, "{}unassoc-alpha", sep),
                _ => write!(out, "{}{} (0x{:x})", sep, code, code),
            }
            sep = ", ";
        }
        out.push_bytes(b">\n");
    }

    let inknames = dir.try_get(tag::INK_NAMES);
    if let Some(names) = inknames.as_ref().and_then(TagValue::bytes) {
        if samplesperpixel > 0 {
            out.push_bytes(b"  Ink Names: ");
            let mut sep: &[u8] = b"";
            let mut pos = 0;
            for _ in 0..samplesperpixel {
                if pos >= names.len() {
                    break;
                }
                out.push_bytes(sep);
                let segment = &names[pos..];
                escape_into(&mut out, segment, segment.len());
                pos += segment
                    .iter()
                    .position(|&c| c == 0)
                    .map_or(segment.len(), |i| i + 1);
                sep = b", ";
            }
            out.push_byte(b'\n');
        }
    }

    if let Some(thresholding) = get_u16(dir, tag::THRESHHOLDING) {
        out.push_bytes(b"  Thresholding: ");
        match thresholding {
            THRESHHOLD_BILEVEL => out.push_bytes(b"bilevel art scan\n"),
            THRESHHOLD_HALFTONE => out.push_bytes(b"halftone or dithered scan\n"),
            THRESHHOLD_ERRORDIFFUSE => out.push_bytes(b"error diffused\n"),
            _ => write!(out, "{} (0x{:x})\n", thresholding, thresholding),
        }
    }

    if let Some(fillorder) = get_u16(dir, tag::FILL_ORDER) {
        out.push_bytes(b"  FillOrder: ");
        match fillorder {
            FILLORDER_MSB2LSB => out.push_bytes(b"msb-to-lsb\n"),
            FILLORDER_LSB2MSB => out.push_bytes(b"lsb-to-msb\n"),
            _ => write!(out, "{} (0x{:x})\n", fillorder, fillorder),
        }
    }

    if let Some((h, v)) = dir
        .try_get(tag::YCBCR_SUBSAMPLING)
        .and_then(|x| x.u16_pair())
    {
        write!(out, "  YCbCr Subsampling: {}, {}\n", h, v);
    }

    if let Some(positioning) = get_u16(dir, tag::YCBCR_POSITIONING) {
        out.push_bytes(b"  YCbCr Positioning: ");
        match positioning {
            YCBCRPOSITION_CENTERED => out.push_bytes(b"centered\n"),
            YCBCRPOSITION_COSITED => out.push_bytes(b"cosited\n"),
            _ => write!(out, "{} (0x{:x})\n", positioning, positioning),
        }
    }

    if let Some((light, dark)) = dir.try_get(tag::HALFTONE_HINTS).and_then(|x| x.u16_pair()) {
        write!(out, "  Halftone Hints: light {} dark {}\n", light, dark);
    }

    if let Some(orientation) = get_u16(dir, tag::ORIENTATION) {
        out.push_bytes(b"  Orientation: ");
        match ORIENT_NAMES.get(orientation as usize) {
            Some(name) => write!(out, "{}\n", name),
            None => write!(out, "{} (0x{:x})\n", orientation, orientation),
        }
    }

    if samplesperpixel > 0 {
        write!(out, "  Samples/Pixel: {}\n", samplesperpixel);
    }

    if let Some(rows) = get_u32(dir, tag::ROWS_PER_STRIP) {
        out.push_bytes(b"  Rows/Strip: ");
        if rows == u32::MAX {
            out.push_bytes(b"(infinite)\n");
        } else {
            write!(out, "{}\n", rows);
        }
    }

    if let Some(min) = get_u16(dir, tag::MIN_SAMPLE_VALUE) {
        write!(out, "  Min Sample Value: {}\n", min);
    }
    if let Some(max) = get_u16(dir, tag::MAX_SAMPLE_VALUE) {
        write!(out, "  Max Sample Value: {}\n", max);
    }
    if let Some(smin) = get_real(dir, tag::SMIN_SAMPLE_VALUE) {
        write!(out, "  SMin Sample Value: {}\n", smin);
    }
    if let Some(smax) = get_real(dir, tag::SMAX_SAMPLE_VALUE) {
        write!(out, "  SMax Sample Value: {}\n", smax);
    }

    if let Some(config) = get_u16(dir, tag::PLANAR_CONFIG) {
        out.push_bytes(b"  Planar Configuration: ");
        match config {
            PLANARCONFIG_CONTIG => out.push_bytes(b"single image plane\n"),
            PLANARCONFIG_SEPARATE => out.push_bytes(b"separate image planes\n"),
            _ => write!(out, "{} (0x{:x})\n", config, config),
        }
    }

    if let Some((page, total)) = dir.try_get(tag::PAGE_NUMBER).and_then(|x| x.u16_pair()) {
        write!(out, "  Page Number: {}-{}\n", page, total);
    }

    let colormap = dir.try_get(tag::COLOR_MAP);
    if let Some(map) = colormap.as_ref().and_then(TagValue::shorts) {
        out.push_bytes(b"  Color Map: ");
        if flags.contains(PrintFlags::COLORMAP) {
            out.push_byte(b'\n');
            let n = table_len(bitspersample);
            for l in 0..n {
                write!(
                    out,
                    "   {:5}: {:5} {:5} {:5}\n",
                    l,
                    plane_entry(map, n, 0, l),
                    plane_entry(map, n, 1, l),
                    plane_entry(map, n, 2, l),
                );
            }
        } else {
            out.push_bytes(b"(present)\n");
        }
    }

    let refbw = dir.try_get(tag::REFERENCE_BLACK_WHITE);
    if let Some(refbw) = refbw.as_ref() {
        out.push_bytes(b"  Reference Black/White:\n");
        for i in 0..3usize {
            write!(
                out,
                "    {:2}: {:5} {:5}\n",
                i,
                refbw.real_at(2 * i).unwrap_or(Real::F32(0.0)),
                refbw.real_at(2 * i + 1).unwrap_or(Real::F32(0.0)),
            );
        }
    }

    let transfer = dir.try_get(tag::TRANSFER_FUNCTION);
    if let Some(table) = transfer.as_ref().and_then(TagValue::shorts) {
        out.push_bytes(b"  Transfer Function: ");
        if flags.contains(PrintFlags::CURVES) {
            out.push_byte(b'\n');
            let n = table_len(bitspersample);
            let columns = usize::from(samplesperpixel.saturating_sub(extrasamples)).min(3);
            for l in 0..n {
                write!(out, "    {:2}: {:5}", l, plane_entry(table, n, 0, l));
                for i in 1..columns {
                    write!(out, " {:5}", plane_entry(table, n, i, l));
                }
                out.push_byte(b'\n');
            }
        } else {
            out.push_bytes(b"(present)\n");
        }
    }

    if let Some((nsubifd, subifd)) = dir.value_with_count(tag::SUB_IFD) {
        out.push_bytes(b"  SubIFD Offsets:");
        for i in 0..nsubifd as usize {
            write!(out, " {:5}", subifd.u64_at(i).unwrap_or(0));
        }
        out.push_byte(b'\n');
    }

    print_custom_tags(&mut out, dir, samplesperpixel);

    if flags.contains(PrintFlags::STRIPS) {
        let offsets = dir.try_get(tag::STRIP_OFFSETS);
        let bytecounts = dir.try_get(tag::STRIP_BYTE_COUNTS);
        if let (Some(offsets), Some(bytecounts)) = (offsets, bytecounts) {
            let n = dir.strip_count();
            write!(
                out,
                "  {} {}:\n",
                n,
                if dir.is_tiled() { "Tiles" } else { "Strips" }
            );
            for s in 0..n as usize {
                write!(
                    out,
                    "    {:3}: [{:8}, {:8}]\n",
                    s,
                    offsets.u64_at(s).unwrap_or(0),
                    bytecounts.u64_at(s).unwrap_or(0),
                );
            }
        }
    }

    out.used()
}

/// Two-pass convenience: measure, allocate, print.
pub fn format_directory(dir: &dyn DirectoryMetadata, flags: PrintFlags) -> String {
    let length = print_directory(&mut [], dir, flags);
    let mut buf = vec![0u8; length + 1];
    let written = print_directory(&mut buf, dir, flags).min(length);
    buf.truncate(written);
    String::from_utf8_lossy(&buf).into_owned()
}

// =============================================================================
// Custom tag walk
// =============================================================================

fn print_custom_tags(out: &mut SatWriter<'_>, dir: &dyn DirectoryMetadata, spp: u16) {
    for tag_id in dir.custom_tags() {
        let Some(fi) = dir.field_info(tag_id) else {
            trace!(tag = tag_id, "no field descriptor, skipping tag");
            continue;
        };

        let (count, value) = if fi.pass_count {
            match fi.read_count {
                ReadCount::Variable2 => {
                    let Some((count, value)) = dir.value_with_count(tag_id) else {
                        trace!(tag = tag_id, name = fi.name, "fetch failed, skipping tag");
                        continue;
                    };
                    (count, value)
                }
                ReadCount::Variable => {
                    let Some((count, value)) = dir.value_with_count(tag_id) else {
                        trace!(tag = tag_id, name = fi.name, "fetch failed, skipping tag");
                        continue;
                    };
                    // Narrow count field.
                    (count.min(u32::from(u16::MAX)), value)
                }
                _ => {
                    debug!(
                        tag = tag_id,
                        name = fi.name,
                        "pass-count field with fixed read count, skipping tag"
                    );
                    continue;
                }
            }
        } else {
            let count = match fi.read_count {
                ReadCount::Variable | ReadCount::Variable2 => 1,
                ReadCount::PerSample => u32::from(spp),
                ReadCount::Fixed(n) => n,
            };
            if fi.tag == tag::DOT_RANGE && fi.name == "DotRange" {
                // Historically misdeclared as two separate SHORT values
                // rather than one two-valued field; collect the pair by hand.
                let Some((lo, hi)) = dir.dot_range() else {
                    continue;
                };
                (count, TagValue::Short(vec![lo, hi]))
            } else {
                // The fetched value is owned scratch for exactly this
                // iteration and is dropped before the next tag.
                let Some(value) = dir.try_get(tag_id) else {
                    trace!(tag = tag_id, name = fi.name, "fetch failed, skipping tag");
                    continue;
                };
                (count, value)
            }
        };

        if try_special(&fi, count, &value, out) == Special::Declined {
            render_field(out, &fi, count, &value);
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn get_u16(dir: &dyn DirectoryMetadata, tag_id: u16) -> Option<u16> {
    dir.try_get(tag_id).and_then(|v| v.as_u16())
}

fn get_u32(dir: &dyn DirectoryMetadata, tag_id: u16) -> Option<u32> {
    dir.try_get(tag_id).and_then(|v| v.as_u32())
}

fn get_real(dir: &dyn DirectoryMetadata, tag_id: u16) -> Option<Real> {
    dir.try_get(tag_id).and_then(|v| v.real_at(0))
}

/// Table length for per-sample-value dumps: one entry per sample value.
fn table_len(bitspersample: Option<u16>) -> usize {
    match bitspersample {
        Some(bits) if bits <= 24 => 1usize << bits,
        _ => 0,
    }
}

fn plane_entry(table: &[u16], plane_len: usize, plane: usize, index: usize) -> u16 {
    table.get(plane * plane_len + index).copied().unwrap_or(0)
}
