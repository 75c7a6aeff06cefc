//! Static field descriptors.
//!
//! Every tag the printer understands has a [`FieldDef`] here: display name,
//! datatype, count-arity classifier, and whether values travel with an
//! explicit count (the pass-count calling convention). Providers answer
//! descriptor queries from this registry; a provider backed by a real file
//! may extend it with its own codec- or vendor-specific fields by
//! constructing [`FieldInfo`] values directly.

use crate::tags::{tag, FieldType};

// =============================================================================
// Count arity
// =============================================================================

/// How a field's value count is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadCount {
    /// The count is a literal known up front.
    Fixed(u32),
    /// The count equals the image's samples-per-pixel.
    PerSample,
    /// The count travels with the value in a narrow (16-bit) count field.
    Variable,
    /// The count travels with the value in a wide (32-bit) count field.
    Variable2,
}

// =============================================================================
// Field descriptors
// =============================================================================

/// Descriptor for one tag, as handed to the printer by a provider.
///
/// `field_type` is `None` when the raw type code is outside the recognized
/// enumeration; the renderer degrades such fields to an inline marker.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    /// Numeric tag id
    pub tag: u16,
    /// Display name used as the line prefix
    pub name: &'static str,
    /// Recognized datatype, if any
    pub field_type: Option<FieldType>,
    /// Raw datatype code as declared
    pub field_type_raw: u16,
    /// Count-arity classifier
    pub read_count: ReadCount,
    /// Whether values are fetched together with an explicit count
    pub pass_count: bool,
}

/// Registry entry backing [`FieldInfo`] for a well-known tag.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub tag: u16,
    pub name: &'static str,
    pub field_type: FieldType,
    pub read_count: ReadCount,
    pub pass_count: bool,
}

impl FieldDef {
    /// Build the descriptor the printer consumes.
    pub fn info(&self) -> FieldInfo {
        FieldInfo {
            tag: self.tag,
            name: self.name,
            field_type: Some(self.field_type),
            field_type_raw: self.field_type.as_u16(),
            read_count: self.read_count,
            pass_count: self.pass_count,
        }
    }
}

/// Well-known field registry, sorted by tag id.
///
/// Names and conventions follow the TIFF 6.0 and BigTIFF registries.
/// DotRange is deliberately declared `Fixed(2)` even though it is fetched
/// as two separate scalars; see `DirectoryMetadata::dot_range`.
pub(crate) const FIELD_REGISTRY: &[FieldDef] = &[
    def(tag::SUBFILE_TYPE, "SubfileType", FieldType::Long, ReadCount::Fixed(1), false),
    def(tag::IMAGE_WIDTH, "ImageWidth", FieldType::Long, ReadCount::Fixed(1), false),
    def(tag::IMAGE_LENGTH, "ImageLength", FieldType::Long, ReadCount::Fixed(1), false),
    def(tag::BITS_PER_SAMPLE, "BitsPerSample", FieldType::Short, ReadCount::PerSample, false),
    def(tag::COMPRESSION, "Compression", FieldType::Short, ReadCount::Fixed(1), false),
    def(tag::PHOTOMETRIC, "PhotometricInterpretation", FieldType::Short, ReadCount::Fixed(1), false),
    def(tag::THRESHHOLDING, "Threshholding", FieldType::Short, ReadCount::Fixed(1), false),
    def(tag::FILL_ORDER, "FillOrder", FieldType::Short, ReadCount::Fixed(1), false),
    def(tag::IMAGE_DESCRIPTION, "ImageDescription", FieldType::Ascii, ReadCount::Variable, false),
    def(tag::MAKE, "Make", FieldType::Ascii, ReadCount::Variable, false),
    def(tag::MODEL, "Model", FieldType::Ascii, ReadCount::Variable, false),
    def(tag::STRIP_OFFSETS, "StripOffsets", FieldType::Long8, ReadCount::Variable, false),
    def(tag::ORIENTATION, "Orientation", FieldType::Short, ReadCount::Fixed(1), false),
    def(tag::SAMPLES_PER_PIXEL, "SamplesPerPixel", FieldType::Short, ReadCount::Fixed(1), false),
    def(tag::ROWS_PER_STRIP, "RowsPerStrip", FieldType::Long, ReadCount::Fixed(1), false),
    def(tag::STRIP_BYTE_COUNTS, "StripByteCounts", FieldType::Long8, ReadCount::Variable, false),
    def(tag::MIN_SAMPLE_VALUE, "MinSampleValue", FieldType::Short, ReadCount::Fixed(1), false),
    def(tag::MAX_SAMPLE_VALUE, "MaxSampleValue", FieldType::Short, ReadCount::Fixed(1), false),
    def(tag::X_RESOLUTION, "XResolution", FieldType::Rational, ReadCount::Fixed(1), false),
    def(tag::Y_RESOLUTION, "YResolution", FieldType::Rational, ReadCount::Fixed(1), false),
    def(tag::PLANAR_CONFIG, "PlanarConfiguration", FieldType::Short, ReadCount::Fixed(1), false),
    def(tag::PAGE_NAME, "PageName", FieldType::Ascii, ReadCount::Variable, false),
    def(tag::X_POSITION, "XPosition", FieldType::Rational, ReadCount::Fixed(1), false),
    def(tag::Y_POSITION, "YPosition", FieldType::Rational, ReadCount::Fixed(1), false),
    def(tag::RESOLUTION_UNIT, "ResolutionUnit", FieldType::Short, ReadCount::Fixed(1), false),
    def(tag::PAGE_NUMBER, "PageNumber", FieldType::Short, ReadCount::Fixed(2), false),
    def(tag::TRANSFER_FUNCTION, "TransferFunction", FieldType::Short, ReadCount::Variable, false),
    def(tag::SOFTWARE, "Software", FieldType::Ascii, ReadCount::Variable, false),
    def(tag::DATE_TIME, "DateTime", FieldType::Ascii, ReadCount::Fixed(20), false),
    def(tag::ARTIST, "Artist", FieldType::Ascii, ReadCount::Variable, false),
    def(tag::HOST_COMPUTER, "HostComputer", FieldType::Ascii, ReadCount::Variable, false),
    def(tag::WHITE_POINT, "WhitePoint", FieldType::Rational, ReadCount::Fixed(2), false),
    def(tag::PRIMARY_CHROMATICITIES, "PrimaryChromaticities", FieldType::Rational, ReadCount::Fixed(6), false),
    def(tag::COLOR_MAP, "ColorMap", FieldType::Short, ReadCount::Variable, false),
    def(tag::HALFTONE_HINTS, "HalftoneHints", FieldType::Short, ReadCount::Fixed(2), false),
    def(tag::TILE_WIDTH, "TileWidth", FieldType::Long, ReadCount::Fixed(1), false),
    def(tag::TILE_LENGTH, "TileLength", FieldType::Long, ReadCount::Fixed(1), false),
    def(tag::TILE_OFFSETS, "TileOffsets", FieldType::Long8, ReadCount::Variable, false),
    def(tag::TILE_BYTE_COUNTS, "TileByteCounts", FieldType::Long8, ReadCount::Variable, false),
    def(tag::SUB_IFD, "SubIFD", FieldType::Ifd8, ReadCount::Variable, true),
    def(tag::INK_SET, "InkSet", FieldType::Short, ReadCount::Fixed(1), false),
    def(tag::INK_NAMES, "InkNames", FieldType::Ascii, ReadCount::Variable, false),
    def(tag::DOT_RANGE, "DotRange", FieldType::Short, ReadCount::Fixed(2), false),
    def(tag::EXTRA_SAMPLES, "ExtraSamples", FieldType::Short, ReadCount::Variable, true),
    def(tag::SAMPLE_FORMAT, "SampleFormat", FieldType::Short, ReadCount::Fixed(1), false),
    def(tag::SMIN_SAMPLE_VALUE, "SMinSampleValue", FieldType::Double, ReadCount::Fixed(1), false),
    def(tag::SMAX_SAMPLE_VALUE, "SMaxSampleValue", FieldType::Double, ReadCount::Fixed(1), false),
    def(tag::YCBCR_SUBSAMPLING, "YCbCrSubsampling", FieldType::Short, ReadCount::Fixed(2), false),
    def(tag::YCBCR_POSITIONING, "YCbCrPositioning", FieldType::Short, ReadCount::Fixed(1), false),
    def(tag::REFERENCE_BLACK_WHITE, "ReferenceBlackWhite", FieldType::Rational, ReadCount::Fixed(6), false),
    def(tag::XML_PACKET, "XMLPacket", FieldType::Byte, ReadCount::Variable2, true),
    def(tag::IMAGE_DEPTH, "ImageDepth", FieldType::Long, ReadCount::Fixed(1), false),
    def(tag::TILE_DEPTH, "TileDepth", FieldType::Long, ReadCount::Fixed(1), false),
    def(tag::COPYRIGHT, "Copyright", FieldType::Ascii, ReadCount::Variable, false),
    def(tag::RICH_TIFF_IPTC, "RichTIFFIPTC", FieldType::Long, ReadCount::Variable2, true),
    def(tag::PHOTOSHOP, "Photoshop", FieldType::Byte, ReadCount::Variable2, true),
    def(tag::ICC_PROFILE, "ICC Profile", FieldType::Undefined, ReadCount::Variable2, true),
    def(tag::STONITS, "StoNits", FieldType::Double, ReadCount::Fixed(1), false),
];

const fn def(
    tag: u16,
    name: &'static str,
    field_type: FieldType,
    read_count: ReadCount,
    pass_count: bool,
) -> FieldDef {
    FieldDef {
        tag,
        name,
        field_type,
        read_count,
        pass_count,
    }
}

/// Look up the registry entry for a tag id.
pub fn field_def(tag_id: u16) -> Option<&'static FieldDef> {
    FIELD_REGISTRY
        .binary_search_by_key(&tag_id, |d| d.tag)
        .ok()
        .map(|i| &FIELD_REGISTRY[i])
}
