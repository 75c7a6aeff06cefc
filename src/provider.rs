//! Metadata Provider interface and the in-memory reference provider.
//!
//! The printer never touches files. It asks a [`DirectoryMetadata`]
//! collaborator for field descriptors and values, one tag at a time, and
//! skips anything the provider cannot produce. [`MemoryDirectory`] is the
//! bundled provider: a registry-validated map of tag values, convenient for
//! tests and for callers that decode directories themselves.

use std::collections::BTreeMap;

use crate::error::DirectoryError;
use crate::fields::{field_def, FieldInfo};
use crate::print::is_canonical_tag;
use crate::tags::{tag, Compression, FieldType};
use crate::value::TagValue;

// =============================================================================
// DirectoryMetadata
// =============================================================================

/// Source of tag descriptors and values for one decoded directory.
///
/// All queries are optional-by-design: a missing tag answers `None` and the
/// printer silently moves on. Implementations hand out owned [`TagValue`]s;
/// the printer drops each value before querying the next tag, so providers
/// never need to keep value storage stable across calls.
pub trait DirectoryMetadata {
    /// Byte offset of this directory within its container.
    fn directory_offset(&self) -> u64;

    /// Field descriptor for a tag id, or `None` if the tag is unknown.
    fn field_info(&self, tag_id: u16) -> Option<FieldInfo>;

    /// Fetch a tag's value under the fixed-count convention.
    fn try_get(&self, tag_id: u16) -> Option<TagValue>;

    /// Fetch a tag's value together with its count (pass-count convention).
    ///
    /// Used for `Variable`/`Variable2` fields where the count is only known
    /// at read time. For `Variable` fields the count fits the narrow 16-bit
    /// count field; callers clamp accordingly.
    fn value_with_count(&self, tag_id: u16) -> Option<(u32, TagValue)>;

    /// Tag ids present in this directory that are not part of the canonical
    /// printing sequence, in ascending order.
    fn custom_tags(&self) -> Vec<u16>;

    /// The DotRange fetch, kept as a named exception: the tag is historically
    /// declared as two separate fixed SHORT values rather than one two-valued
    /// field, so its value is collected as an explicit pair.
    fn dot_range(&self) -> Option<(u16, u16)> {
        self.try_get(tag::DOT_RANGE).and_then(|v| v.u16_pair())
    }

    /// Registered codec name for a compression scheme id.
    fn codec_name(&self, compression: u16) -> Option<&'static str> {
        Compression::from_u16(compression).map(Compression::name)
    }

    /// Number of strips (or tiles, for tiled layouts) in the directory.
    fn strip_count(&self) -> u32;

    /// Whether image data is organized as tiles rather than strips.
    fn is_tiled(&self) -> bool {
        false
    }
}

// =============================================================================
// MemoryDirectory
// =============================================================================

/// In-memory directory provider backed by the field registry.
///
/// Values are validated against the registry at build time, so anything the
/// printer later fetches is already consistent with its descriptor. Strip
/// and tile offset arrays share one lookup: a tiled directory answers
/// strip-offset queries from its tile arrays, mirroring the single
/// offset/byte-count array of the underlying directory structure.
#[derive(Debug, Clone)]
pub struct MemoryDirectory {
    offset: u64,
    tiled: bool,
    entries: BTreeMap<u16, TagValue>,
}

impl MemoryDirectory {
    /// Start building a directory.
    pub fn builder() -> DirectoryBuilder {
        DirectoryBuilder {
            offset: 0,
            tiled: false,
            entries: BTreeMap::new(),
        }
    }

    fn lookup(&self, tag_id: u16) -> Option<&TagValue> {
        if let Some(v) = self.entries.get(&tag_id) {
            return Some(v);
        }
        // Strip queries fall through to the tile arrays on tiled layouts.
        match tag_id {
            tag::STRIP_OFFSETS => self.entries.get(&tag::TILE_OFFSETS),
            tag::STRIP_BYTE_COUNTS => self.entries.get(&tag::TILE_BYTE_COUNTS),
            _ => None,
        }
    }
}

impl DirectoryMetadata for MemoryDirectory {
    fn directory_offset(&self) -> u64 {
        self.offset
    }

    fn field_info(&self, tag_id: u16) -> Option<FieldInfo> {
        field_def(tag_id).map(|d| d.info())
    }

    fn try_get(&self, tag_id: u16) -> Option<TagValue> {
        self.lookup(tag_id).cloned()
    }

    fn value_with_count(&self, tag_id: u16) -> Option<(u32, TagValue)> {
        let value = self.try_get(tag_id)?;
        let count = u32::try_from(value.len()).unwrap_or(u32::MAX);
        Some((count, value))
    }

    fn custom_tags(&self) -> Vec<u16> {
        self.entries
            .keys()
            .copied()
            .filter(|&t| !is_canonical_tag(t))
            .collect()
    }

    fn strip_count(&self) -> u32 {
        self.lookup(tag::STRIP_BYTE_COUNTS)
            .map(|v| u32::try_from(v.len()).unwrap_or(u32::MAX))
            .unwrap_or(0)
    }

    fn is_tiled(&self) -> bool {
        self.tiled
    }
}

// =============================================================================
// DirectoryBuilder
// =============================================================================

/// Builder for [`MemoryDirectory`] with registry validation.
#[derive(Debug, Clone)]
pub struct DirectoryBuilder {
    offset: u64,
    tiled: bool,
    entries: BTreeMap<u16, TagValue>,
}

impl DirectoryBuilder {
    /// Byte offset of the directory within its container.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Mark the directory as tiled rather than stripped.
    pub fn tiled(mut self, tiled: bool) -> Self {
        self.tiled = tiled;
        self
    }

    /// Set a tag value, validating it against the field registry.
    pub fn set(mut self, tag_id: u16, value: TagValue) -> Result<Self, DirectoryError> {
        let def = field_def(tag_id).ok_or(DirectoryError::UnknownTag(tag_id))?;

        let actual = value.field_type();
        if !type_compatible(def.field_type, actual) {
            return Err(DirectoryError::TypeMismatch {
                tag: tag_id,
                name: def.name,
                expected: def.field_type,
                actual,
            });
        }

        if let crate::fields::ReadCount::Fixed(expected) = def.read_count {
            // ASCII counts include the NUL and vary in practice; the renderer
            // treats the payload as one string regardless.
            if def.field_type != FieldType::Ascii && value.len() != expected as usize {
                return Err(DirectoryError::CountMismatch {
                    tag: tag_id,
                    name: def.name,
                    expected,
                    actual: value.len(),
                });
            }
        }

        self.entries.insert(tag_id, value);
        Ok(self)
    }

    /// Finish building.
    pub fn build(self) -> MemoryDirectory {
        MemoryDirectory {
            offset: self.offset,
            tiled: self.tiled,
            entries: self.entries,
        }
    }
}

/// Whether a value variant satisfies a declared field type.
///
/// LONG values satisfy LONG8 fields (the directory structure widens them on
/// read), and BYTE/UNDEFINED payloads are interchangeable opaque bytes.
fn type_compatible(expected: FieldType, actual: FieldType) -> bool {
    expected == actual
        || matches!(
            (expected, actual),
            (FieldType::Long8, FieldType::Long)
                | (FieldType::Ifd8, FieldType::Ifd)
                | (FieldType::Byte, FieldType::Undefined)
                | (FieldType::Undefined, FieldType::Byte)
        )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_builder_validates_type() {
        let err = MemoryDirectory::builder()
            .set(tag::IMAGE_WIDTH, TagValue::Double(vec![1.0]))
            .unwrap_err();
        assert!(matches!(err, DirectoryError::TypeMismatch { tag: 256, .. }));
    }

    #[test]
    fn test_builder_validates_fixed_count() {
        let err = MemoryDirectory::builder()
            .set(tag::PAGE_NUMBER, TagValue::Short(vec![1]))
            .unwrap_err();
        assert!(matches!(
            err,
            DirectoryError::CountMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_builder_rejects_unknown_tag() {
        let err = MemoryDirectory::builder()
            .set(9999, TagValue::Short(vec![1]))
            .unwrap_err();
        assert!(matches!(err, DirectoryError::UnknownTag(9999)));
    }

    #[test]
    fn test_builder_accepts_long_for_long8() {
        // Offset arrays are declared LONG8 but classic TIFF stores LONG
        MemoryDirectory::builder()
            .set(tag::STRIP_OFFSETS, TagValue::Long(vec![8, 100]))
            .unwrap();
    }

    #[test]
    fn test_ascii_count_not_enforced() {
        // DateTime declares a fixed count of 20 but ASCII lengths vary
        MemoryDirectory::builder()
            .set(tag::DATE_TIME, TagValue::Ascii(Bytes::from_static(b"2024\0")))
            .unwrap();
    }

    #[test]
    fn test_custom_tags_excludes_canonical() {
        let dir = MemoryDirectory::builder()
            .set(tag::IMAGE_WIDTH, TagValue::Long(vec![100]))
            .unwrap()
            .set(tag::SOFTWARE, TagValue::Ascii(Bytes::from_static(b"x\0")))
            .unwrap()
            .build();
        assert_eq!(dir.custom_tags(), vec![tag::SOFTWARE]);
    }

    #[test]
    fn test_tiled_directory_answers_strip_queries() {
        let dir = MemoryDirectory::builder()
            .tiled(true)
            .set(tag::TILE_OFFSETS, TagValue::Long(vec![512, 4096]))
            .unwrap()
            .set(tag::TILE_BYTE_COUNTS, TagValue::Long(vec![100, 200]))
            .unwrap()
            .build();
        assert!(dir.is_tiled());
        assert_eq!(dir.strip_count(), 2);
        assert_eq!(
            dir.try_get(tag::STRIP_OFFSETS).unwrap().u64_at(1),
            Some(4096)
        );
    }

    #[test]
    fn test_dot_range_pair() {
        let dir = MemoryDirectory::builder()
            .set(tag::DOT_RANGE, TagValue::Short(vec![0, 255]))
            .unwrap()
            .build();
        assert_eq!(dir.dot_range(), Some((0, 255)));
    }

    #[test]
    fn test_default_codec_name() {
        let dir = MemoryDirectory::builder().build();
        assert_eq!(dir.codec_name(5), Some("LZW"));
        assert_eq!(dir.codec_name(60000), None);
    }
}
