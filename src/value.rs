//! Owned typed tag values.
//!
//! A [`TagValue`] is the decoded raw-value array for one directory entry,
//! owned by whoever fetched it. The printer holds a value only for the
//! duration of formatting a single tag; providers hand out fresh copies so
//! nothing dangles into provider-internal storage.
//!
//! Rationals keep their decoded storage width: a provider that decodes
//! rationals at single precision hands out [`TagValue::RationalF32`] and the
//! value prints with single-precision text, while double-precision storage
//! prints as double-precision text.

use std::fmt;

use bytes::Bytes;

use crate::tags::FieldType;

/// A real value carrying its decoded storage width.
///
/// Display formatting delegates to the underlying `f32` or `f64`, so
/// single-precision storage prints single-precision text and width or
/// precision flags pass through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Real {
    /// Single-precision storage
    F32(f32),
    /// Double-precision storage
    F64(f64),
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Real::F32(x) => fmt::Display::fmt(x, f),
            Real::F64(x) => fmt::Display::fmt(x, f),
        }
    }
}

/// A decoded tag value: one variant per TIFF datatype.
///
/// Multi-valued entries hold all values in storage order. ASCII and
/// undefined payloads travel as [`Bytes`] since they are opaque byte runs,
/// not guaranteed to be UTF-8.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// BYTE values
    Byte(Vec<u8>),
    /// SBYTE values
    SByte(Vec<i8>),
    /// ASCII payload, conventionally NUL-terminated
    Ascii(Bytes),
    /// UNDEFINED opaque payload
    Undefined(Bytes),
    /// SHORT values
    Short(Vec<u16>),
    /// SSHORT values
    SShort(Vec<i16>),
    /// LONG values
    Long(Vec<u32>),
    /// SLONG values
    SLong(Vec<i32>),
    /// LONG8 values
    Long8(Vec<u64>),
    /// SLONG8 values
    SLong8(Vec<i64>),
    /// FLOAT values
    Float(Vec<f32>),
    /// DOUBLE values
    Double(Vec<f64>),
    /// RATIONAL/SRATIONAL decoded at single precision
    RationalF32(Vec<f32>),
    /// RATIONAL/SRATIONAL decoded at double precision
    RationalF64(Vec<f64>),
    /// IFD offsets (32-bit)
    Ifd(Vec<u32>),
    /// IFD8 offsets (64-bit)
    Ifd8(Vec<u64>),
}

impl TagValue {
    /// Number of values held.
    ///
    /// For ASCII and undefined payloads this is the byte count.
    pub fn len(&self) -> usize {
        match self {
            TagValue::Byte(v) => v.len(),
            TagValue::SByte(v) => v.len(),
            TagValue::Ascii(b) | TagValue::Undefined(b) => b.len(),
            TagValue::Short(v) => v.len(),
            TagValue::SShort(v) => v.len(),
            TagValue::Long(v) => v.len(),
            TagValue::SLong(v) => v.len(),
            TagValue::Long8(v) => v.len(),
            TagValue::SLong8(v) => v.len(),
            TagValue::Float(v) => v.len(),
            TagValue::Double(v) => v.len(),
            TagValue::RationalF32(v) => v.len(),
            TagValue::RationalF64(v) => v.len(),
            TagValue::Ifd(v) => v.len(),
            TagValue::Ifd8(v) => v.len(),
        }
    }

    /// Whether the value holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The field type this variant corresponds to.
    pub fn field_type(&self) -> FieldType {
        match self {
            TagValue::Byte(_) => FieldType::Byte,
            TagValue::SByte(_) => FieldType::SByte,
            TagValue::Ascii(_) => FieldType::Ascii,
            TagValue::Undefined(_) => FieldType::Undefined,
            TagValue::Short(_) => FieldType::Short,
            TagValue::SShort(_) => FieldType::SShort,
            TagValue::Long(_) => FieldType::Long,
            TagValue::SLong(_) => FieldType::SLong,
            TagValue::Long8(_) => FieldType::Long8,
            TagValue::SLong8(_) => FieldType::SLong8,
            TagValue::Float(_) => FieldType::Float,
            TagValue::Double(_) => FieldType::Double,
            TagValue::RationalF32(_) | TagValue::RationalF64(_) => FieldType::Rational,
            TagValue::Ifd(_) => FieldType::Ifd,
            TagValue::Ifd8(_) => FieldType::Ifd8,
        }
    }

    /// First value as u16, for single-valued SHORT fields.
    pub fn as_u16(&self) -> Option<u16> {
        match self {
            TagValue::Short(v) => v.first().copied(),
            _ => None,
        }
    }

    /// First value as u32, widening SHORT as needed.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            TagValue::Short(v) => v.first().map(|&x| x as u32),
            TagValue::Long(v) => v.first().copied(),
            _ => None,
        }
    }

    /// First value as f32, for RATIONAL and FLOAT fields.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            TagValue::Float(v) | TagValue::RationalF32(v) => v.first().copied(),
            _ => None,
        }
    }

    /// First value as f64, widening single-precision storage as needed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TagValue::Double(v) | TagValue::RationalF64(v) => v.first().copied(),
            TagValue::Float(v) | TagValue::RationalF32(v) => v.first().map(|&x| x as f64),
            _ => None,
        }
    }

    /// Borrow SHORT values.
    pub fn shorts(&self) -> Option<&[u16]> {
        match self {
            TagValue::Short(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow single-precision RATIONAL or FLOAT values.
    pub fn floats(&self) -> Option<&[f32]> {
        match self {
            TagValue::Float(v) | TagValue::RationalF32(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow ASCII, UNDEFINED, or BYTE payload bytes.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            TagValue::Ascii(b) | TagValue::Undefined(b) => Some(b),
            TagValue::Byte(v) => Some(v),
            _ => None,
        }
    }

    /// Value at index `i` widened to u64, for offset/count style arrays
    /// that may be stored as SHORT, LONG, LONG8, or IFD offsets.
    pub fn u64_at(&self, i: usize) -> Option<u64> {
        match self {
            TagValue::Short(v) => v.get(i).map(|&x| x as u64),
            TagValue::Long(v) | TagValue::Ifd(v) => v.get(i).map(|&x| x as u64),
            TagValue::Long8(v) | TagValue::Ifd8(v) => v.get(i).copied(),
            _ => None,
        }
    }

    /// Real value at index `i`, keeping its storage width.
    pub fn real_at(&self, i: usize) -> Option<Real> {
        match self {
            TagValue::Float(v) | TagValue::RationalF32(v) => v.get(i).map(|&x| Real::F32(x)),
            TagValue::Double(v) | TagValue::RationalF64(v) => v.get(i).map(|&x| Real::F64(x)),
            _ => None,
        }
    }

    /// First pair of SHORT values, for two-valued fields like PageNumber.
    pub fn u16_pair(&self) -> Option<(u16, u16)> {
        match self {
            TagValue::Short(v) if v.len() >= 2 => Some((v[0], v[1])),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_per_variant() {
        assert_eq!(TagValue::Short(vec![1, 2, 3]).len(), 3);
        assert_eq!(TagValue::Ascii(Bytes::from_static(b"abc\0")).len(), 4);
        assert_eq!(TagValue::Double(vec![]).len(), 0);
        assert!(TagValue::Long(vec![]).is_empty());
    }

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(TagValue::Short(vec![7]).as_u16(), Some(7));
        assert_eq!(TagValue::Short(vec![7]).as_u32(), Some(7));
        assert_eq!(TagValue::Long(vec![70000]).as_u32(), Some(70000));
        assert_eq!(TagValue::Long(vec![70000]).as_u16(), None);
        assert_eq!(TagValue::RationalF32(vec![0.5]).as_f32(), Some(0.5));
        assert_eq!(TagValue::Double(vec![2.5]).as_f64(), Some(2.5));
        assert_eq!(TagValue::Float(vec![1.5]).as_f64(), Some(1.5));
    }

    #[test]
    fn test_u64_at_widening() {
        assert_eq!(TagValue::Short(vec![10, 20]).u64_at(1), Some(20));
        assert_eq!(TagValue::Long(vec![1000]).u64_at(0), Some(1000));
        assert_eq!(TagValue::Long8(vec![1 << 40]).u64_at(0), Some(1 << 40));
        assert_eq!(TagValue::Long8(vec![1]).u64_at(1), None);
        assert_eq!(TagValue::Double(vec![1.0]).u64_at(0), None);
    }

    #[test]
    fn test_rational_storage_width() {
        assert_eq!(
            TagValue::RationalF32(vec![1.0]).field_type(),
            FieldType::Rational
        );
        assert_eq!(
            TagValue::RationalF64(vec![1.0]).field_type(),
            FieldType::Rational
        );
    }
}
