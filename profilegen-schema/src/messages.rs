//! Message definitions.
//!
//! This module contains the data structures for declared messages, their
//! fields and the dynamic subfields declared under a field.

/// Message definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDef {
    /// Normalized name.
    pub name: String,
    /// Label as written in the messages table.
    pub raw_name: String,
    /// Message number.
    pub number: u16,
    /// Fields in declaration order.
    pub fields: Vec<FieldDef>,
    /// Comment.
    pub comment: Option<String>,
}

impl MessageDef {
    /// Creates a message definition without fields.
    #[must_use]
    pub fn new(name: String, raw_name: String, number: u16) -> Self {
        Self {
            name,
            raw_name,
            number,
            fields: Vec::new(),
            comment: None,
        }
    }

    /// Looks up a field by normalized name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Field definition within a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Normalized name.
    pub name: String,
    /// Label as written in the messages table.
    pub raw_name: String,
    /// Field number, unique within the message.
    pub number: u8,
    /// Type token as written; resolved later.
    pub type_token: String,
    /// Array marker.
    pub array: Option<ArrayKind>,
    /// Pass-through metadata.
    pub meta: FieldMeta,
    /// Dynamic subfields in declaration order.
    pub subfields: Vec<SubFieldDef>,
}

/// Dynamic subfield: an alternate interpretation of its parent field,
/// selected by the value of other fields of the same message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubFieldDef {
    /// Normalized name.
    pub name: String,
    /// Label as written in the messages table.
    pub raw_name: String,
    /// Type token as written; resolved later.
    pub type_token: String,
    /// Selecting (field name, value) pairs.
    pub ref_fields: Vec<(String, String)>,
    /// Pass-through metadata.
    pub meta: FieldMeta,
}

/// Array marker of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayKind {
    /// `[N]`: any number of elements.
    Dynamic,
    /// `[n]`: exactly `n` elements.
    Fixed(usize),
}

impl ArrayKind {
    /// Parses an array marker.
    ///
    /// Returns `None` for anything other than `[N]` or `[<digits>]`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let inner = s.trim().strip_prefix('[')?.strip_suffix(']')?.trim();
        if inner.eq_ignore_ascii_case("n") {
            return Some(Self::Dynamic);
        }
        inner.parse().ok().map(Self::Fixed)
    }
}

/// Opaque metadata carried from the messages table into generated code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMeta {
    /// Component expansion.
    pub components: Option<String>,
    /// Scale.
    pub scale: Option<String>,
    /// Offset.
    pub offset: Option<String>,
    /// Units.
    pub units: Option<String>,
    /// Component bit widths.
    pub bits: Option<String>,
    /// Accumulation flags.
    pub accumulate: Option<String>,
    /// Comment.
    pub comment: Option<String>,
}

impl FieldMeta {
    /// Returns the present entries as (label, value) pairs in a fixed order.
    ///
    /// The comment is not included.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("components", &self.components),
            ("scale", &self.scale),
            ("offset", &self.offset),
            ("units", &self.units),
            ("bits", &self.bits),
            ("accumulate", &self.accumulate),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect()
    }
}
