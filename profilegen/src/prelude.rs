//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use profilegen::prelude::*;
//! ```

// Input
pub use profilegen_schema::{RawRow, RawTable, TableReader, XmlWorkbookReader};

// Model
pub use profilegen_schema::{
    BaseKind, MesgNumIndexEntry, ResolvedMessage, ResolvedModel, SchemaError, TypeDef,
};

// Generation
pub use profilegen_codegen::{
    Clock, CodegenError, EmittedArtifacts, FixedClock, GenerationOptions, Generator,
    GeneratorState, Profile, Stage, SystemClock, generate, generate_from_tables,
};
