use thiserror::Error;

use crate::tags::FieldType;

/// Errors raised while assembling an in-memory directory.
///
/// The print path itself has no fatal errors: printing always returns a
/// logical length, and the only caller-visible "failure" is truncation.
/// Errors can only arise earlier, when a directory is populated with values
/// that contradict the field registry.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// Tag is not in the field registry, so the printer has no descriptor for it
    #[error("unknown tag {0}: no field descriptor registered")]
    UnknownTag(u16),

    /// Value variant does not match the field's declared datatype
    #[error("type mismatch for {name} (tag {tag}): field declares {expected:?}, value is {actual:?}")]
    TypeMismatch {
        tag: u16,
        name: &'static str,
        expected: FieldType,
        actual: FieldType,
    },

    /// Value length contradicts the field's fixed count
    #[error("count mismatch for {name} (tag {tag}): field declares {expected} values, got {actual}")]
    CountMismatch {
        tag: u16,
        name: &'static str,
        expected: u32,
        actual: usize,
    },
}
