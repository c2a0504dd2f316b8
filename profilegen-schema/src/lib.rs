//! # Profilegen Schema
//!
//! Tabular protocol profile model.
//!
//! This crate provides:
//! - The raw table boundary and a default XML workbook reader
//! - Identifier normalization
//! - Type and message definitions
//! - The normalizer turning raw rows into a canonical model
//! - The resolver linking fields to types and index entries to messages

pub mod error;
pub mod ir;
pub mod messages;
pub mod naming;
pub mod normalize;
pub mod reader;
pub mod resolve;
pub mod table;
pub mod types;

pub use error::{ReadError, SchemaError};
pub use ir::{
    MesgNumIndexEntry, NormalizedModel, ResolvedField, ResolvedMessage, ResolvedModel,
    ResolvedSubField, TypeRef,
};
pub use messages::{ArrayKind, FieldDef, FieldMeta, MessageDef, SubFieldDef};
pub use normalize::{normalize, normalize_with};
pub use reader::{XmlWorkbookReader, read_workbook};
pub use resolve::resolve;
pub use table::{RawRow, RawTable, TableReader};
pub use types::{BaseKind, TypeDef, TypeValue};
