//! TIFF tag, field type, and coded-value definitions.
//!
//! This module defines the vocabulary for directory printing:
//! - Tag IDs for every field the printer knows how to phrase
//! - Field types (the closed TIFF datatype enumeration)
//! - Coded values for enumerated fields (photometric, orientation, ...)
//! - Compression scheme names
//!
//! The definitions cover both classic TIFF and BigTIFF datatypes.

// =============================================================================
// Tag IDs
// =============================================================================

/// Well-known TIFF tag IDs.
///
/// Tags are 16-bit identifiers for metadata fields. The printer phrases the
/// tags listed here specially; any other tag present in a directory is
/// rendered generically from its field descriptor.
pub mod tag {
    /// Subfile type bit mask (reduced-resolution / page / mask)
    pub const SUBFILE_TYPE: u16 = 254;
    /// Image width in pixels
    pub const IMAGE_WIDTH: u16 = 256;
    /// Image height (length) in pixels
    pub const IMAGE_LENGTH: u16 = 257;
    /// Bits per sample
    pub const BITS_PER_SAMPLE: u16 = 258;
    /// Compression scheme
    pub const COMPRESSION: u16 = 259;
    /// Photometric interpretation
    pub const PHOTOMETRIC: u16 = 262;
    /// Thresholding applied to bilevel data
    pub const THRESHHOLDING: u16 = 263;
    /// Bit fill order within a byte
    pub const FILL_ORDER: u16 = 266;
    /// Description string
    pub const IMAGE_DESCRIPTION: u16 = 270;
    /// Scanner manufacturer
    pub const MAKE: u16 = 271;
    /// Scanner model
    pub const MODEL: u16 = 272;
    /// Byte offsets of strips
    pub const STRIP_OFFSETS: u16 = 273;
    /// Image orientation
    pub const ORIENTATION: u16 = 274;
    /// Components per pixel
    pub const SAMPLES_PER_PIXEL: u16 = 277;
    /// Rows per strip
    pub const ROWS_PER_STRIP: u16 = 278;
    /// Byte counts of strips
    pub const STRIP_BYTE_COUNTS: u16 = 279;
    /// Minimum sample value
    pub const MIN_SAMPLE_VALUE: u16 = 280;
    /// Maximum sample value
    pub const MAX_SAMPLE_VALUE: u16 = 281;
    /// Pixels per unit in X
    pub const X_RESOLUTION: u16 = 282;
    /// Pixels per unit in Y
    pub const Y_RESOLUTION: u16 = 283;
    /// Chunky vs planar component layout
    pub const PLANAR_CONFIG: u16 = 284;
    /// Page name
    pub const PAGE_NAME: u16 = 285;
    /// X offset of the image
    pub const X_POSITION: u16 = 286;
    /// Y offset of the image
    pub const Y_POSITION: u16 = 287;
    /// Unit of resolution
    pub const RESOLUTION_UNIT: u16 = 296;
    /// Page number within a document
    pub const PAGE_NUMBER: u16 = 297;
    /// Transfer function tables
    pub const TRANSFER_FUNCTION: u16 = 301;
    /// Producing software
    pub const SOFTWARE: u16 = 305;
    /// Creation date/time
    pub const DATE_TIME: u16 = 306;
    /// Artist
    pub const ARTIST: u16 = 315;
    /// Host computer
    pub const HOST_COMPUTER: u16 = 316;
    /// White point chromaticity
    pub const WHITE_POINT: u16 = 318;
    /// Primary chromaticities
    pub const PRIMARY_CHROMATICITIES: u16 = 319;
    /// RGB color map for palette images
    pub const COLOR_MAP: u16 = 320;
    /// Highlight/shadow halftone hints
    pub const HALFTONE_HINTS: u16 = 321;
    /// Tile width in pixels
    pub const TILE_WIDTH: u16 = 322;
    /// Tile height (length) in pixels
    pub const TILE_LENGTH: u16 = 323;
    /// Byte offsets of tiles
    pub const TILE_OFFSETS: u16 = 324;
    /// Byte counts of tiles
    pub const TILE_BYTE_COUNTS: u16 = 325;
    /// Child IFD offsets
    pub const SUB_IFD: u16 = 330;
    /// Ink set for separated images
    pub const INK_SET: u16 = 332;
    /// NUL-separated ink names
    pub const INK_NAMES: u16 = 333;
    /// Dot range endpoints
    pub const DOT_RANGE: u16 = 336;
    /// Meaning of extra components
    pub const EXTRA_SAMPLES: u16 = 338;
    /// Numeric interpretation of samples
    pub const SAMPLE_FORMAT: u16 = 339;
    /// Minimum sample value (any format)
    pub const SMIN_SAMPLE_VALUE: u16 = 340;
    /// Maximum sample value (any format)
    pub const SMAX_SAMPLE_VALUE: u16 = 341;
    /// YCbCr chroma subsampling factors
    pub const YCBCR_SUBSAMPLING: u16 = 530;
    /// YCbCr sample positioning
    pub const YCBCR_POSITIONING: u16 = 531;
    /// Reference black/white pairs
    pub const REFERENCE_BLACK_WHITE: u16 = 532;
    /// Embedded XMP metadata packet
    pub const XML_PACKET: u16 = 700;
    /// Z dimension of the image
    pub const IMAGE_DEPTH: u16 = 32997;
    /// Z dimension of a tile
    pub const TILE_DEPTH: u16 = 32998;
    /// Copyright notice
    pub const COPYRIGHT: u16 = 33432;
    /// IPTC/NAA press metadata blob
    pub const RICH_TIFF_IPTC: u16 = 33723;
    /// Photoshop image resource blob
    pub const PHOTOSHOP: u16 = 34377;
    /// Embedded ICC color profile
    pub const ICC_PROFILE: u16 = 34675;
    /// Sample value to Nits conversion factor
    pub const STONITS: u16 = 37439;
}

/// Coded values for enumerated fields.
///
/// Each group mirrors the constants registered for its tag. Codes outside
/// these sets are printed with the uniform `<decimal> (0x<hex>)` fallback.
pub mod value {
    /// Subfile type bit: reduced-resolution version of another image
    pub const FILETYPE_REDUCED_IMAGE: u32 = 0x1;
    /// Subfile type bit: single page of a multi-page document
    pub const FILETYPE_PAGE: u32 = 0x2;
    /// Subfile type bit: transparency mask
    pub const FILETYPE_MASK: u32 = 0x4;

    /// Resolution unit: unitless
    pub const RESUNIT_NONE: u16 = 1;
    /// Resolution unit: pixels per inch
    pub const RESUNIT_INCH: u16 = 2;
    /// Resolution unit: pixels per centimeter
    pub const RESUNIT_CENTIMETER: u16 = 3;

    /// Sample format: unsigned integer
    pub const SAMPLEFORMAT_UINT: u16 = 1;
    /// Sample format: signed integer
    pub const SAMPLEFORMAT_INT: u16 = 2;
    /// Sample format: IEEE floating point
    pub const SAMPLEFORMAT_IEEEFP: u16 = 3;
    /// Sample format: untyped
    pub const SAMPLEFORMAT_VOID: u16 = 4;
    /// Sample format: complex signed integer
    pub const SAMPLEFORMAT_COMPLEXINT: u16 = 5;
    /// Sample format: complex IEEE floating point
    pub const SAMPLEFORMAT_COMPLEXIEEEFP: u16 = 6;

    /// Photometric: CIE Log2(L) grayscale
    pub const PHOTOMETRIC_LOGL: u16 = 32844;
    /// Photometric: CIE Log2(L) (u',v') color
    pub const PHOTOMETRIC_LOGLUV: u16 = 32845;

    /// Extra sample: unspecified meaning
    pub const EXTRASAMPLE_UNSPECIFIED: u16 = 0;
    /// Extra sample: associated (premultiplied) alpha
    pub const EXTRASAMPLE_ASSOCALPHA: u16 = 1;
    /// Extra sample: unassociated alpha
    pub const EXTRASAMPLE_UNASSALPHA: u16 = 2;

    /// Thresholding: bilevel art scan
    pub const THRESHHOLD_BILEVEL: u16 = 1;
    /// Thresholding: halftone or dithered scan
    pub const THRESHHOLD_HALFTONE: u16 = 2;
    /// Thresholding: error diffused
    pub const THRESHHOLD_ERRORDIFFUSE: u16 = 3;

    /// Fill order: most significant bit first
    pub const FILLORDER_MSB2LSB: u16 = 1;
    /// Fill order: least significant bit first
    pub const FILLORDER_LSB2MSB: u16 = 2;

    /// YCbCr positioning: centered
    pub const YCBCRPOSITION_CENTERED: u16 = 1;
    /// YCbCr positioning: cosited
    pub const YCBCRPOSITION_COSITED: u16 = 2;

    /// Planar configuration: single image plane
    pub const PLANARCONFIG_CONTIG: u16 = 1;
    /// Planar configuration: separate image planes
    pub const PLANARCONFIG_SEPARATE: u16 = 2;

    /// Ink set: CMYK
    pub const INKSET_CMYK: u16 = 1;
}

// =============================================================================
// Field Types
// =============================================================================

/// TIFF field types that determine how tag values are encoded.
///
/// This is the closed datatype enumeration from the TIFF and BigTIFF
/// specifications. Values whose raw type code falls outside this set are
/// printed with an unsupported-type marker rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer
    Byte = 1,
    /// 8-bit ASCII character, NUL-terminated as a field
    Ascii = 2,
    /// Unsigned 16-bit integer
    Short = 3,
    /// Unsigned 32-bit integer
    Long = 4,
    /// Unsigned rational (two LONGs on disk)
    Rational = 5,
    /// Signed 8-bit integer
    SByte = 6,
    /// Undefined byte data
    Undefined = 7,
    /// Signed 16-bit integer
    SShort = 8,
    /// Signed 32-bit integer
    SLong = 9,
    /// Signed rational (two SLONGs on disk)
    SRational = 10,
    /// IEEE single-precision float
    Float = 11,
    /// IEEE double-precision float
    Double = 12,
    /// 32-bit IFD offset
    Ifd = 13,
    /// Unsigned 64-bit integer (BigTIFF)
    Long8 = 16,
    /// Signed 64-bit integer (BigTIFF)
    SLong8 = 17,
    /// 64-bit IFD offset (BigTIFF)
    Ifd8 = 18,
}

impl FieldType {
    /// Create a FieldType from its raw type code.
    ///
    /// Returns `None` for unknown codes. Unknown types are not an error;
    /// the renderer degrades to an inline marker for them.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            6 => Some(FieldType::SByte),
            7 => Some(FieldType::Undefined),
            8 => Some(FieldType::SShort),
            9 => Some(FieldType::SLong),
            10 => Some(FieldType::SRational),
            11 => Some(FieldType::Float),
            12 => Some(FieldType::Double),
            13 => Some(FieldType::Ifd),
            16 => Some(FieldType::Long8),
            17 => Some(FieldType::SLong8),
            18 => Some(FieldType::Ifd8),
            _ => None,
        }
    }

    /// In-memory size of a single value of this type in bytes.
    ///
    /// Rationals are held as single-precision floats once decoded, so they
    /// report 4 bytes here; a provider that stores them at double precision
    /// signals that through the value itself.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte
            | FieldType::Ascii
            | FieldType::SByte
            | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long
            | FieldType::SLong
            | FieldType::Float
            | FieldType::Ifd
            | FieldType::Rational
            | FieldType::SRational => 4,
            FieldType::Double | FieldType::Long8 | FieldType::SLong8 | FieldType::Ifd8 => 8,
        }
    }

    /// Get the raw type code.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// Compression Values
// =============================================================================

/// TIFF compression scheme identifiers with their registered codec names.
///
/// The printer only needs the names; decoding any of these schemes is out
/// of scope. Unregistered schemes fall back to the numeric phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Compression {
    /// No compression
    None = 1,
    /// CCITT modified Huffman RLE
    CcittRle = 2,
    /// CCITT Group 3 fax
    CcittFax3 = 3,
    /// CCITT Group 4 fax
    CcittFax4 = 4,
    /// LZW compression
    Lzw = 5,
    /// "Old-style" JPEG
    OldJpeg = 6,
    /// JPEG compression
    Jpeg = 7,
    /// Deflate/zlib compression
    Deflate = 8,
    /// NeXT 2-bit RLE
    Next = 32766,
    /// Macintosh PackBits RLE
    PackBits = 32773,
    /// ThunderScan 4-bit RLE
    ThunderScan = 32809,
    /// Adobe deflate
    AdobeDeflate = 32946,
    /// JBIG
    Jbig = 34661,
    /// SGI Log luminance RLE
    SgiLog = 34676,
    /// SGI Log 24-bit packed
    SgiLog24 = 34677,
    /// LZMA2
    Lzma = 34925,
    /// Zstandard
    Zstd = 50000,
    /// WebP
    Webp = 50001,
}

impl Compression {
    /// Create a Compression from its numeric value.
    ///
    /// Returns `None` for unrecognized compression values.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Compression::None),
            2 => Some(Compression::CcittRle),
            3 => Some(Compression::CcittFax3),
            4 => Some(Compression::CcittFax4),
            5 => Some(Compression::Lzw),
            6 => Some(Compression::OldJpeg),
            7 => Some(Compression::Jpeg),
            8 => Some(Compression::Deflate),
            32766 => Some(Compression::Next),
            32773 => Some(Compression::PackBits),
            32809 => Some(Compression::ThunderScan),
            32946 => Some(Compression::AdobeDeflate),
            34661 => Some(Compression::Jbig),
            34676 => Some(Compression::SgiLog),
            34677 => Some(Compression::SgiLog24),
            34925 => Some(Compression::Lzma),
            50000 => Some(Compression::Zstd),
            50001 => Some(Compression::Webp),
            _ => None,
        }
    }

    /// Get the registered codec name for the compression scheme.
    pub const fn name(self) -> &'static str {
        match self {
            Compression::None => "None",
            Compression::CcittRle => "CCITT RLE",
            Compression::CcittFax3 => "CCITT Group 3",
            Compression::CcittFax4 => "CCITT Group 4",
            Compression::Lzw => "LZW",
            Compression::OldJpeg => "Old-style JPEG",
            Compression::Jpeg => "JPEG",
            Compression::Deflate => "Deflate",
            Compression::Next => "NeXT",
            Compression::PackBits => "PackBits",
            Compression::ThunderScan => "ThunderScan",
            Compression::AdobeDeflate => "AdobeDeflate",
            Compression::Jbig => "JBIG",
            Compression::SgiLog => "SGILog",
            Compression::SgiLog24 => "SGILog24",
            Compression::Lzma => "LZMA",
            Compression::Zstd => "ZSTD",
            Compression::Webp => "WEBP",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_from_u16() {
        assert_eq!(FieldType::from_u16(1), Some(FieldType::Byte));
        assert_eq!(FieldType::from_u16(2), Some(FieldType::Ascii));
        assert_eq!(FieldType::from_u16(5), Some(FieldType::Rational));
        assert_eq!(FieldType::from_u16(12), Some(FieldType::Double));
        assert_eq!(FieldType::from_u16(13), Some(FieldType::Ifd));
        assert_eq!(FieldType::from_u16(18), Some(FieldType::Ifd8));
        // Gap between Ifd (13) and Long8 (16), and anything unknown
        assert_eq!(FieldType::from_u16(14), None);
        assert_eq!(FieldType::from_u16(15), None);
        assert_eq!(FieldType::from_u16(0), None);
        assert_eq!(FieldType::from_u16(99), None);
    }

    #[test]
    fn test_field_type_sizes() {
        assert_eq!(FieldType::Byte.size_in_bytes(), 1);
        assert_eq!(FieldType::Ascii.size_in_bytes(), 1);
        assert_eq!(FieldType::Short.size_in_bytes(), 2);
        assert_eq!(FieldType::SLong.size_in_bytes(), 4);
        assert_eq!(FieldType::Rational.size_in_bytes(), 4);
        assert_eq!(FieldType::Double.size_in_bytes(), 8);
        assert_eq!(FieldType::Ifd8.size_in_bytes(), 8);
    }

    #[test]
    fn test_compression_names() {
        assert_eq!(Compression::from_u16(1).map(Compression::name), Some("None"));
        assert_eq!(Compression::from_u16(5).map(Compression::name), Some("LZW"));
        assert_eq!(Compression::from_u16(7).map(Compression::name), Some("JPEG"));
        assert_eq!(
            Compression::from_u16(32773).map(Compression::name),
            Some("PackBits")
        );
        assert_eq!(Compression::from_u16(50000).map(Compression::name), Some("ZSTD"));
        assert_eq!(Compression::from_u16(60000), None);
    }
}
