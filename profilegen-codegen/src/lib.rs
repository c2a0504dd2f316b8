//! # Profilegen Codegen
//!
//! Rust source generation from tabular protocol profiles.
//!
//! This crate provides:
//! - Type, message and registry generation
//! - The enumerated type listing
//! - The generation pipeline and its options
//! - The [`Profile`] result with its rendering and fingerprint

pub mod emitter;
pub mod error;
pub mod generator;
pub mod options;
pub mod profile;
pub mod rust;

pub use emitter::{EmittedArtifacts, emit};
pub use error::{CodegenError, Stage};
pub use generator::{Generator, GeneratorState};
pub use options::{Clock, FixedClock, GenerationOptions, SystemClock};
pub use profile::{Profile, fingerprint_bytes};

use profilegen_schema::RawTable;

/// Source path reported for in-memory input.
pub const MEMORY_PATH: &str = "<memory>";

/// Generates a profile from XML workbook bytes.
///
/// # Arguments
/// * `bytes` - Specification document content
/// * `options` - Generation options
///
/// # Returns
/// The generated profile.
///
/// # Errors
/// Returns `CodegenError` if parsing, normalization or resolution fails.
pub fn generate(bytes: &[u8], options: GenerationOptions) -> Result<Profile, CodegenError> {
    Generator::new(MEMORY_PATH, bytes, options).generate_profile()
}

/// Generates a profile from tables that were already read.
///
/// # Errors
/// Returns `CodegenError` if normalization or resolution fails.
pub fn generate_from_tables(
    tables: Vec<RawTable>,
    options: GenerationOptions,
) -> Result<Profile, CodegenError> {
    Generator::new(MEMORY_PATH, &[], options).run(GeneratorState::Parsed(tables))
}
