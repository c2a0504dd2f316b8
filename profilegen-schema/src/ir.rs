//! Intermediate representations.
//!
//! [`NormalizedModel`] is what the normalizer builds from raw tables;
//! [`ResolvedModel`] is the same model with every type reference linked,
//! ready for code generation. Both keep table order everywhere.

use crate::messages::{ArrayKind, FieldMeta, MessageDef};
use crate::types::{BaseKind, TypeDef};

/// Normalized, not yet cross-checked, profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedModel {
    /// Declared types in first-appearance order.
    pub types: Vec<TypeDef>,
    /// Declared messages in table order.
    pub messages: Vec<MessageDef>,
    /// Message-number index entries in table order.
    pub index: Vec<MesgNumIndexEntry>,
}

/// Entry of the message-number index table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MesgNumIndexEntry {
    /// Identifier exactly as written in the index table.
    pub raw: String,
    /// Parsed number, if the raw text is a valid message number.
    pub number: Option<u16>,
    /// Optional label from the index table.
    pub label: Option<String>,
}

/// Profile with every reference resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    /// Declared types in first-appearance order.
    pub types: Vec<TypeDef>,
    /// Messages in table order.
    pub messages: Vec<ResolvedMessage>,
    /// Number of index entries that matched a message.
    pub indexed_messages: usize,
}

impl ResolvedModel {
    /// Returns the enumerated types, in declaration order.
    pub fn enumerated_types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.iter().filter(|t| t.is_enumerated())
    }

    /// Looks up a message by number.
    #[must_use]
    pub fn get_message(&self, number: u16) -> Option<&ResolvedMessage> {
        self.messages.iter().find(|m| m.number == number)
    }
}

/// Message with resolved fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMessage {
    /// Normalized name.
    pub name: String,
    /// Message number.
    pub number: u16,
    /// Resolved fields in declaration order.
    pub fields: Vec<ResolvedField>,
    /// Comment.
    pub comment: Option<String>,
}

impl ResolvedMessage {
    /// Returns the generated struct name.
    #[must_use]
    pub fn struct_name(&self) -> String {
        format!("{}Msg", self.name)
    }

    /// Returns true if any field declares subfields.
    #[must_use]
    pub fn has_subfields(&self) -> bool {
        self.fields.iter().any(|f| !f.subfields.is_empty())
    }
}

/// Field with a resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Normalized name.
    pub name: String,
    /// Field number.
    pub number: u8,
    /// Resolved type.
    pub ty: TypeRef,
    /// Array marker.
    pub array: Option<ArrayKind>,
    /// Pass-through metadata.
    pub meta: FieldMeta,
    /// Resolved subfields in declaration order.
    pub subfields: Vec<ResolvedSubField>,
}

impl ResolvedField {
    /// Returns the Rust type of the generated struct member.
    #[must_use]
    pub fn rust_type(&self) -> String {
        match self.array {
            Some(_) => format!("Vec<{}>", self.ty.rust_name()),
            None => self.ty.rust_name().to_string(),
        }
    }
}

/// Subfield with a resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSubField {
    /// Normalized name.
    pub name: String,
    /// Resolved type.
    pub ty: TypeRef,
    /// Selecting (field name, value) pairs.
    pub ref_fields: Vec<(String, String)>,
    /// Pass-through metadata.
    pub meta: FieldMeta,
}

/// Target of a field's type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A declared type.
    Declared {
        /// Position in [`ResolvedModel::types`].
        index: usize,
        /// Normalized type name.
        name: String,
    },
    /// A base kind used directly.
    Base(BaseKind),
}

impl TypeRef {
    /// Returns the name generated code uses for this type.
    #[must_use]
    pub fn rust_name(&self) -> &str {
        match self {
            Self::Declared { name, .. } => name,
            Self::Base(kind) => kind.rust_type(),
        }
    }
}
