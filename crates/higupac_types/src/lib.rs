//! This crate provides file format support for the `higupac` project.
//!
//! # File Formats
//!
//! - **PAC**: Count-prefixed archive containers holding named, offset-addressed entries
//! - **BMZ**: Zlib-compressed bitmaps (`ZLC3` magic + uncompressed size + stream)
//! - **TTP**: Frame-based animation scripts with Shift-JIS resource names
//!
//! Entry payloads carry no type byte; the kind is inferred from content
//! shape (BMZ magic first, then a structural TTP parse, then opaque
//! passthrough). Each payload converts to an editable representation —
//! decompressed bitmap bytes or a pretty JSON document — and back.
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use higupac_types::prelude::*;
//!
//! # fn main() -> Result<(), PacError> {
//! // Inspect an archive
//! let archive = PacFile::open("omake.pac")?;
//! for entry in archive.entries() {
//! 	println!("{}: {}", entry.name, entry.payload.summary());
//! }
//!
//! // Rebuild one from converted files
//! let mut builder = PacFileBuilder::new();
//! let bitmap = std::fs::read("rika.bmp")?;
//! builder.add_entry("rika.bmz", Payload::from_editable(&bitmap, PayloadKind::Bmz)?)?;
//! builder.save("omake.pac")?;
//! # Ok(())
//! # }
//! ```

pub mod file;

/// `use higupac_types::prelude::*;` to import commonly used items.
pub mod prelude;
