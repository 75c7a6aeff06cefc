//! End-to-end printer tests.
//!
//! These tests verify the full directory printout through `MemoryDirectory`:
//! - The saturating contract across capacities (dry run, exact fit, tight fit)
//! - Determinism of repeated prints
//! - Canonical tag phrasing and the unknown-enum fallback
//! - Custom tag dispatch through the special-case table and generic renderer
//! - Optional sections (strips/tiles, color map, transfer function)
//! - ASCII escape round-trip

use std::sync::Once;

use bytes::Bytes;
use tiff_dirprint::{
    format_directory, print_ascii, print_directory, tag, DirectoryMetadata, FieldInfo,
    MemoryDirectory, PrintFlags, ReadCount, TagValue,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "tiff_dirprint=trace".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .init();
    });
}

fn print_to_string(dir: &dyn DirectoryMetadata, flags: PrintFlags) -> String {
    init_tracing();
    format_directory(dir, flags)
}

fn basic_directory() -> MemoryDirectory {
    MemoryDirectory::builder()
        .offset(4096)
        .set(tag::SUBFILE_TYPE, TagValue::Long(vec![2]))
        .unwrap()
        .set(tag::IMAGE_WIDTH, TagValue::Long(vec![512]))
        .unwrap()
        .set(tag::IMAGE_LENGTH, TagValue::Long(vec![256]))
        .unwrap()
        .set(tag::X_RESOLUTION, TagValue::RationalF32(vec![300.0]))
        .unwrap()
        .set(tag::Y_RESOLUTION, TagValue::RationalF32(vec![300.0]))
        .unwrap()
        .set(tag::RESOLUTION_UNIT, TagValue::Short(vec![2]))
        .unwrap()
        .set(tag::BITS_PER_SAMPLE, TagValue::Short(vec![8]))
        .unwrap()
        .set(tag::COMPRESSION, TagValue::Short(vec![5]))
        .unwrap()
        .set(tag::PHOTOMETRIC, TagValue::Short(vec![2]))
        .unwrap()
        .set(tag::ORIENTATION, TagValue::Short(vec![1]))
        .unwrap()
        .set(tag::SAMPLES_PER_PIXEL, TagValue::Short(vec![3]))
        .unwrap()
        .set(tag::ROWS_PER_STRIP, TagValue::Long(vec![64]))
        .unwrap()
        .set(tag::PLANAR_CONFIG, TagValue::Short(vec![1]))
        .unwrap()
        .set(tag::PAGE_NUMBER, TagValue::Short(vec![1, 10]))
        .unwrap()
        .set(
            tag::SOFTWARE,
            TagValue::Ascii(Bytes::from_static(b"tiffmaker 2.1\0")),
        )
        .unwrap()
        .set(tag::STRIP_OFFSETS, TagValue::Long(vec![8, 5008]))
        .unwrap()
        .set(tag::STRIP_BYTE_COUNTS, TagValue::Long(vec![5000, 4999]))
        .unwrap()
        .build()
}

// -----------------------------------------------------------------------------
// Full printout
// -----------------------------------------------------------------------------

#[test]
fn test_basic_directory_full_text() {
    let text = print_to_string(&basic_directory(), PrintFlags::STRIPS);
    let expected = "\
TIFF Directory at offset 0x1000 (4096)
  Subfile Type: multi-page document (2 = 0x2)
  Image Width: 512 Image Length: 256
  Resolution: 300, 300 pixels/inch
  Bits/Sample: 8
  Compression Scheme: LZW
  Photometric Interpretation: RGB color
  Orientation: row 0 top, col 0 lhs
  Samples/Pixel: 3
  Rows/Strip: 64
  Planar Configuration: single image plane
  Page Number: 1-10
  Software: tiffmaker 2.1
  2 Strips:
      0: [       8,     5000]
      1: [    5008,     4999]
";
    assert_eq!(text, expected);
}

#[test]
fn test_width_length_only_scenario() {
    let dir = MemoryDirectory::builder()
        .set(tag::IMAGE_WIDTH, TagValue::Long(vec![100]))
        .unwrap()
        .set(tag::IMAGE_LENGTH, TagValue::Long(vec![50]))
        .unwrap()
        .build();
    let text = print_to_string(&dir, PrintFlags::NONE);
    assert_eq!(
        text,
        "TIFF Directory at offset 0x0 (0)\n  Image Width: 100 Image Length: 50\n"
    );
}

// -----------------------------------------------------------------------------
// Saturation contract
// -----------------------------------------------------------------------------

#[test]
fn test_dry_run_then_fill() {
    let dir = basic_directory();
    let length = print_directory(&mut [], &dir, PrintFlags::STRIPS);
    assert!(length > 0);

    // Capacity equal to the length: the last content byte gives way to the
    // NUL terminator, the reported length is unchanged.
    let mut exact = vec![0xAAu8; length];
    assert_eq!(print_directory(&mut exact, &dir, PrintFlags::STRIPS), length);
    assert_eq!(exact[length - 1], 0);

    // One byte more: the full text fits.
    let mut roomy = vec![0xAAu8; length + 1];
    assert_eq!(print_directory(&mut roomy, &dir, PrintFlags::STRIPS), length);
    assert_eq!(roomy[length], 0);
    assert_eq!(&exact[..length - 1], &roomy[..length - 1]);
}

#[test]
fn test_every_capacity_is_a_prefix_of_unbounded() {
    let dir = basic_directory();
    let length = print_directory(&mut [], &dir, PrintFlags::STRIPS);
    let mut full = vec![0u8; length + 1];
    print_directory(&mut full, &dir, PrintFlags::STRIPS);

    for cap in [1usize, 2, 7, 16, 63, 128, length / 2, length] {
        let mut buf = vec![0xAAu8; cap];
        let reported = print_directory(&mut buf, &dir, PrintFlags::STRIPS);
        assert_eq!(reported, length, "length must not depend on capacity");
        let content = cap - 1;
        assert_eq!(
            &buf[..content.min(length)],
            &full[..content.min(length)],
            "capacity {} must yield a prefix",
            cap
        );
        assert_eq!(buf[content.min(length)], 0);
    }
}

#[test]
fn test_repeated_prints_are_identical() {
    let dir = basic_directory();
    let first = print_to_string(&dir, PrintFlags::STRIPS);
    let second = print_to_string(&dir, PrintFlags::STRIPS);
    assert_eq!(first, second);
}

// -----------------------------------------------------------------------------
// Enum phrasing
// -----------------------------------------------------------------------------

#[test]
fn test_unknown_enum_codes_fall_back_to_decimal_hex() {
    let dir = MemoryDirectory::builder()
        .set(tag::ORIENTATION, TagValue::Short(vec![9]))
        .unwrap()
        .set(tag::COMPRESSION, TagValue::Short(vec![60000]))
        .unwrap()
        .set(tag::RESOLUTION_UNIT, TagValue::Short(vec![7]))
        .unwrap()
        .set(tag::X_RESOLUTION, TagValue::RationalF32(vec![72.0]))
        .unwrap()
        .set(tag::Y_RESOLUTION, TagValue::RationalF32(vec![72.0]))
        .unwrap()
        .build();
    let text = print_to_string(&dir, PrintFlags::NONE);
    assert!(text.contains("  Orientation: 9 (0x9)\n"), "{}", text);
    assert!(text.contains("  Compression Scheme: 60000 (0xea60)\n"), "{}", text);
    assert!(text.contains("  Resolution: 72, 72 (unit 7 = 0x7)\n"), "{}", text);
}

#[test]
fn test_rows_per_strip_infinite() {
    let dir = MemoryDirectory::builder()
        .set(tag::ROWS_PER_STRIP, TagValue::Long(vec![u32::MAX]))
        .unwrap()
        .build();
    let text = print_to_string(&dir, PrintFlags::NONE);
    assert!(text.contains("  Rows/Strip: (infinite)\n"));
}

#[test]
fn test_extra_samples_and_sample_format() {
    let dir = MemoryDirectory::builder()
        .set(tag::EXTRA_SAMPLES, TagValue::Short(vec![1, 5]))
        .unwrap()
        .set(tag::SAMPLE_FORMAT, TagValue::Short(vec![3]))
        .unwrap()
        .build();
    let text = print_to_string(&dir, PrintFlags::NONE);
    assert!(text.contains("  Sample Format: IEEE floating point\n"), "{}", text);
    assert!(
        text.contains("  Extra Samples: 2<assoc-alpha, 5 (0x5)>\n"),
        "{}",
        text
    );
}

#[test]
fn test_ink_names_escaped_and_joined() {
    let dir = MemoryDirectory::builder()
        .set(tag::SAMPLES_PER_PIXEL, TagValue::Short(vec![3]))
        .unwrap()
        .set(
            tag::INK_NAMES,
            TagValue::Ascii(Bytes::from_static(b"Cyan\0Magenta\0Yel\x01low\0")),
        )
        .unwrap()
        .build();
    let text = print_to_string(&dir, PrintFlags::NONE);
    assert!(
        text.contains("  Ink Names: Cyan, Magenta, Yel\\001low\n"),
        "{}",
        text
    );
}

// -----------------------------------------------------------------------------
// Custom tag dispatch
// -----------------------------------------------------------------------------

#[test]
fn test_custom_tags_special_and_generic() {
    let dir = MemoryDirectory::builder()
        .set(tag::WHITE_POINT, TagValue::RationalF32(vec![0.3127, 0.329]))
        .unwrap()
        .set(tag::INK_SET, TagValue::Short(vec![1]))
        .unwrap()
        .set(tag::DOT_RANGE, TagValue::Short(vec![0, 255]))
        .unwrap()
        .set(
            tag::XML_PACKET,
            TagValue::Byte(b"<x:xmpmeta/>".to_vec()),
        )
        .unwrap()
        .set(
            tag::ICC_PROFILE,
            TagValue::Undefined(Bytes::from_static(&[0u8; 128])),
        )
        .unwrap()
        .build();
    let text = print_to_string(&dir, PrintFlags::NONE);

    // Special-case handlers own their lines.
    assert!(text.contains("  White Point: 0.3127-0.329\n"), "{}", text);
    assert!(text.contains("  Dot Range: 0-255\n"), "{}", text);
    assert!(
        text.contains("  XMLPacket (XMP Metadata):\n<x:xmpmeta/>\n"),
        "{}",
        text
    );
    assert!(text.contains("  ICC Profile: <present>, 128 bytes\n"), "{}", text);

    // InkSet declares a single value, so its handler declines and the
    // generic renderer picks it up.
    assert!(text.contains("  InkSet: 1\n"), "{}", text);
}

#[test]
fn test_generic_multi_value_custom_tag() {
    // Paired SHORT tags phrase both values on one line.
    let dir = MemoryDirectory::builder()
        .set(tag::HALFTONE_HINTS, TagValue::Short(vec![10, 245]))
        .unwrap()
        .set(tag::YCBCR_SUBSAMPLING, TagValue::Short(vec![2, 2]))
        .unwrap()
        .build();
    let text = print_to_string(&dir, PrintFlags::NONE);
    assert!(text.contains("  YCbCr Subsampling: 2, 2\n"), "{}", text);
    assert!(text.contains("  Halftone Hints: light 10 dark 245\n"), "{}", text);
}

#[test]
fn test_unknown_datatype_renders_marker() {
    // A provider that declares a field whose raw type code is outside the
    // recognized enumeration.
    struct OddProvider;

    impl DirectoryMetadata for OddProvider {
        fn directory_offset(&self) -> u64 {
            0
        }
        fn field_info(&self, tag_id: u16) -> Option<FieldInfo> {
            (tag_id == 50_000).then(|| FieldInfo {
                tag: 50_000,
                name: "VendorSecret",
                field_type: None,
                field_type_raw: 14,
                read_count: ReadCount::Fixed(1),
                pass_count: false,
            })
        }
        fn try_get(&self, tag_id: u16) -> Option<TagValue> {
            (tag_id == 50_000).then(|| TagValue::Long(vec![7]))
        }
        fn value_with_count(&self, _tag_id: u16) -> Option<(u32, TagValue)> {
            None
        }
        fn custom_tags(&self) -> Vec<u16> {
            vec![50_000]
        }
        fn strip_count(&self) -> u32 {
            0
        }
    }

    let text = print_to_string(&OddProvider, PrintFlags::NONE);
    assert!(
        text.contains("  VendorSecret: <unsupported data type in TIFFPrint>\n"),
        "{}",
        text
    );
}

#[test]
fn test_descriptorless_custom_tag_is_skipped() {
    struct BareProvider;

    impl DirectoryMetadata for BareProvider {
        fn directory_offset(&self) -> u64 {
            0
        }
        fn field_info(&self, _tag_id: u16) -> Option<FieldInfo> {
            None
        }
        fn try_get(&self, _tag_id: u16) -> Option<TagValue> {
            None
        }
        fn value_with_count(&self, _tag_id: u16) -> Option<(u32, TagValue)> {
            None
        }
        fn custom_tags(&self) -> Vec<u16> {
            vec![50_001, 50_002]
        }
        fn strip_count(&self) -> u32 {
            0
        }
    }

    let text = print_to_string(&BareProvider, PrintFlags::NONE);
    assert_eq!(text, "TIFF Directory at offset 0x0 (0)\n");
}

// -----------------------------------------------------------------------------
// Optional sections
// -----------------------------------------------------------------------------

#[test]
fn test_strip_table_requires_flag() {
    let dir = basic_directory();
    let without = print_to_string(&dir, PrintFlags::NONE);
    assert!(!without.contains("Strips:"), "{}", without);

    let with = print_to_string(&dir, PrintFlags::STRIPS);
    assert!(with.contains("  2 Strips:\n"), "{}", with);
}

#[test]
fn test_tiled_directory_prints_tiles() {
    let dir = MemoryDirectory::builder()
        .tiled(true)
        .set(tag::TILE_WIDTH, TagValue::Long(vec![256]))
        .unwrap()
        .set(tag::TILE_LENGTH, TagValue::Long(vec![256]))
        .unwrap()
        .set(tag::TILE_OFFSETS, TagValue::Long(vec![1024, 9216]))
        .unwrap()
        .set(tag::TILE_BYTE_COUNTS, TagValue::Long(vec![8192, 8000]))
        .unwrap()
        .build();
    let text = print_to_string(&dir, PrintFlags::STRIPS);
    assert!(text.contains("  Tile Width: 256 Tile Length: 256\n"), "{}", text);
    assert!(text.contains("  2 Tiles:\n"), "{}", text);
    assert!(text.contains("      0: [    1024,     8192]\n"), "{}", text);
}

#[test]
fn test_color_map_presence_and_dump() {
    // 1 bit/sample keeps the dump small: two entries per plane.
    let dir = MemoryDirectory::builder()
        .set(tag::BITS_PER_SAMPLE, TagValue::Short(vec![1]))
        .unwrap()
        .set(
            tag::COLOR_MAP,
            TagValue::Short(vec![0, 65535, 0, 32768, 0, 16384]),
        )
        .unwrap()
        .build();

    let summary = print_to_string(&dir, PrintFlags::NONE);
    assert!(summary.contains("  Color Map: (present)\n"), "{}", summary);

    let dump = print_to_string(&dir, PrintFlags::COLORMAP);
    assert!(dump.contains("  Color Map: \n"), "{}", dump);
    assert!(dump.contains("       0:     0     0     0\n"), "{}", dump);
    assert!(dump.contains("       1: 65535 32768 16384\n"), "{}", dump);
}

#[test]
fn test_transfer_function_presence_and_dump() {
    let dir = MemoryDirectory::builder()
        .set(tag::BITS_PER_SAMPLE, TagValue::Short(vec![1]))
        .unwrap()
        .set(tag::SAMPLES_PER_PIXEL, TagValue::Short(vec![1]))
        .unwrap()
        .set(tag::TRANSFER_FUNCTION, TagValue::Short(vec![0, 65535]))
        .unwrap()
        .build();

    let summary = print_to_string(&dir, PrintFlags::NONE);
    assert!(
        summary.contains("  Transfer Function: (present)\n"),
        "{}",
        summary
    );

    let dump = print_to_string(&dir, PrintFlags::CURVES);
    assert!(dump.contains("     0:     0\n"), "{}", dump);
    assert!(dump.contains("     1: 65535\n"), "{}", dump);
}

#[test]
fn test_sub_ifd_offsets() {
    let dir = MemoryDirectory::builder()
        .set(tag::SUB_IFD, TagValue::Ifd8(vec![4096, 8192]))
        .unwrap()
        .build();
    let text = print_to_string(&dir, PrintFlags::NONE);
    assert!(text.contains("  SubIFD Offsets:  4096  8192\n"), "{}", text);
}

// -----------------------------------------------------------------------------
// ASCII escaping round-trip
// -----------------------------------------------------------------------------

/// Undo the escaper's output; the inverse lives only in the test harness.
fn unescape(text: &str) -> Vec<u8> {
    let mut bytes = text.bytes().peekable();
    let mut result = Vec::new();
    while let Some(b) = bytes.next() {
        if b != b'\\' {
            result.push(b);
            continue;
        }
        match bytes.next() {
            Some(b't') => result.push(b'\t'),
            Some(b'b') => result.push(0x08),
            Some(b'r') => result.push(b'\r'),
            Some(b'n') => result.push(b'\n'),
            Some(b'v') => result.push(0x0B),
            Some(d) => {
                let mut value = (d - b'0') as u32;
                for _ in 0..2 {
                    let d = bytes.next().unwrap();
                    value = value * 8 + (d - b'0') as u32;
                }
                result.push(value as u8);
            }
            None => unreachable!("dangling backslash"),
        }
    }
    result
}

#[test]
fn test_escape_round_trip() {
    // Printable subset passes through untouched.
    let printable: Vec<u8> = (0x20u8..=0x7E).filter(|&b| b != b'\\').collect();
    let mut buf = vec![0u8; 1024];
    let n = print_ascii(&mut buf, &printable);
    assert_eq!(&buf[..n], &printable[..]);
    assert_eq!(unescape(std::str::from_utf8(&buf[..n]).unwrap()), printable);

    // Control and high bytes round-trip through their escapes.
    let controls: Vec<u8> = vec![0x01, 0x08, b'\t', b'\n', 0x0B, b'\r', 0x1F, 0x7F, 0xFF];
    let n = print_ascii(&mut buf, &controls);
    assert_eq!(unescape(std::str::from_utf8(&buf[..n]).unwrap()), controls);
}
