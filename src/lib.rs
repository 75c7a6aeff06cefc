//! # tiff-dirprint
//!
//! Render the metadata directory of a TIFF-style image record as
//! human-readable text, writing into a caller-supplied fixed-capacity
//! buffer that is never overrun while still reporting the full logical
//! length of the text (the classic saturating `snprintf` contract).
//!
//! The crate does not parse files. A [`DirectoryMetadata`] provider hands
//! it already-decoded tag/value pairs one tag at a time; the bundled
//! [`MemoryDirectory`] is a registry-validated in-memory provider for
//! callers that decode directories themselves.
//!
//! ## Features
//!
//! - **Bounded output**: at most `capacity - 1` content bytes plus a NUL
//!   terminator are written; the returned length signals truncation
//! - **Length-only dry runs**: call with an empty buffer to size an
//!   allocation, then call again to fill it
//! - **Canonical phrasing**: ~30 well-known tags print with the familiar
//!   named-enum phrasing, unknown codes as `<decimal> (0x<hex>)`
//! - **Custom tag walk**: remaining tags render through a special-case
//!   table or a generic type-directed renderer
//! - **Optional sections**: strip/tile tables, color-map and
//!   transfer-function dumps behind [`PrintFlags`]
//!
//! ## Example
//!
//! ```rust
//! use tiff_dirprint::{print_directory, MemoryDirectory, PrintFlags, TagValue, tag};
//!
//! let dir = MemoryDirectory::builder()
//!     .offset(8)
//!     .set(tag::IMAGE_WIDTH, TagValue::Long(vec![100]))
//!     .unwrap()
//!     .set(tag::IMAGE_LENGTH, TagValue::Long(vec![50]))
//!     .unwrap()
//!     .build();
//!
//! // Measure, then fill.
//! let needed = print_directory(&mut [], &dir, PrintFlags::NONE);
//! let mut buf = vec![0u8; needed + 1];
//! let written = print_directory(&mut buf, &dir, PrintFlags::NONE);
//! assert_eq!(written, needed);
//! ```

pub mod error;
pub mod fields;
pub mod print;
pub mod provider;
pub mod tags;
pub mod value;

// Re-export commonly used types
pub use error::DirectoryError;
pub use fields::{field_def, FieldDef, FieldInfo, ReadCount};
pub use print::{format_directory, print_ascii, print_ascii_tag, print_directory, PrintFlags};
pub use provider::{DirectoryBuilder, DirectoryMetadata, MemoryDirectory};
pub use tags::{tag, Compression, FieldType};
pub use value::{Real, TagValue};
