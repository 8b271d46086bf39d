//! File type support for the `higupac` project.

mod error;

pub mod bmz;
pub mod pac;
pub mod res_name;
pub mod ttp;

/// Size of the fixed name field in a PAC entry header (56 bytes,
/// NUL-padded, leaving 55 usable bytes)
pub const ENTRY_NAME_SIZE: usize = 56;

// Re-export unified error type
pub use error::PacError;

// Re-export main file types
pub use bmz::File as BmzFile;
pub use pac::{
	Entry, File as PacFile, FileBuilder as PacFileBuilder, Layout, Payload, PayloadKind,
	PlannedEntry,
};
pub use res_name::ResName;
pub use ttp::{File as TtpFile, TtpFrame};
