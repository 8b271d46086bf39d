//! Prelude module for `higupac_types`.
//!
//! This module provides a convenient way to import commonly used types and constants.
//!
//! # Examples
//!
//! ```no_run
//! use higupac_types::prelude::*;
//!
//! // Now you can use all common types directly
//! let archive = PacFile::open("omake.pac");
//! let builder = PacFileBuilder::new();
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Constants
	ENTRY_NAME_SIZE,

	// BMZ types
	BmzFile,

	// PAC types
	Entry,
	PacError,
	PacFile,
	PacFileBuilder,
	Payload,
	PayloadKind,

	// TTP types
	ResName,
	TtpFile,
	TtpFrame,
};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
