//! # Profilegen
//!
//! Deterministic Rust source generation from tabular protocol profiles.
//!
//! A profile is authored as a spreadsheet with three sheets: the types
//! table, the messages table and the message-number index. Profilegen reads
//! the sheets, normalizes names, resolves every type reference and renders
//! four artifacts: type declarations, message declarations, a message
//! registry and a listing of enumerated types.
//!
//! ## Features
//!
//! - **Deterministic output** - Same input bytes and options, same bytes out
//! - **Pluggable input** - Any [`schema::TableReader`], XML workbooks by default
//! - **Precise errors** - Every failure names the stage, table, row or field
//! - **Orphan reporting** - Index entries with no message are listed, not fatal
//!
//! ## Quick Start
//!
//! ```ignore
//! use profilegen::prelude::*;
//!
//! let bytes = std::fs::read("profile.xml")?;
//! let profile = Generator::new("profile.xml", &bytes, GenerationOptions::new())
//!     .generate_profile()?;
//!
//! profile.write_to(std::fs::File::create("profile.rs.txt")?)?;
//! for orphan in profile.orphans() {
//!     eprintln!("message number {orphan} has no message");
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Raw tables, the XML reader, normalization and resolution
//! - [`codegen`] - Emission, the generation pipeline and the profile result

pub mod prelude;

/// Raw tables, normalization and reference resolution.
pub mod schema {
    pub use profilegen_schema::*;
}

/// Source emission and the generation pipeline.
pub mod codegen {
    pub use profilegen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use profilegen_codegen::{
    CodegenError, GenerationOptions, Generator, Profile, Stage, generate, generate_from_tables,
};
pub use profilegen_schema::{RawTable, SchemaError, TableReader};
