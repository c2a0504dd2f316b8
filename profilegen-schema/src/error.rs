//! Error types for reading, normalizing and resolving profiles.

use thiserror::Error;

/// Error type for the default workbook reader.
#[derive(Debug, Error)]
pub enum ReadError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Entity reference that is neither predefined nor a character reference.
    #[error("unknown entity reference '&{name};'")]
    UnknownEntity {
        /// Entity name without the delimiters.
        name: String,
    },

    /// Invalid workbook structure.
    #[error("invalid workbook structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },
}

/// Error type for schema normalization and reference resolution.
///
/// Every variant is fatal: a run that hits one produces no output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A required table or column is missing, or rows are laid out wrongly.
    #[error("schema structure error: {message}")]
    SchemaStructure {
        /// Error message.
        message: String,
    },

    /// Two raw labels normalize to the same identifier.
    #[error("{kind} name collision: '{first}' and '{second}' both normalize to '{name}'")]
    NameCollision {
        /// What was being named (type, value, message, field, subfield).
        kind: String,
        /// Normalized identifier.
        name: String,
        /// Raw label seen first.
        first: String,
        /// Raw label seen second.
        second: String,
    },

    /// A cell holds text that cannot be interpreted for its column.
    #[error("invalid {column} '{value}' in table '{table}' row {row}")]
    InvalidCell {
        /// Table name.
        table: String,
        /// 1-based row number, header included.
        row: usize,
        /// Column label.
        column: String,
        /// Offending cell text.
        value: String,
    },

    /// Two fields of one message declare the same field number.
    #[error("duplicate field number {number} in message '{message}'")]
    DuplicateFieldNumber {
        /// Message name.
        message: String,
        /// Field number.
        number: u8,
    },

    /// A field's type token names neither a declared type nor a base kind.
    #[error("unresolved type '{token}' for field '{field}' in message '{message}'")]
    UnresolvedType {
        /// Owning message name.
        message: String,
        /// Field name (`field.subfield` for subfields).
        field: String,
        /// Raw type token.
        token: String,
    },

    /// A subfield selects on a field its message does not declare.
    #[error(
        "subfield '{subfield}' of field '{field}' in message '{message}' references unknown field '{ref_field}'"
    )]
    UnresolvedRefField {
        /// Owning message name.
        message: String,
        /// Parent field name.
        field: String,
        /// Subfield name.
        subfield: String,
        /// Referenced field name.
        ref_field: String,
    },

    /// Two messages declare the same message number.
    #[error("duplicate message number {number}: '{first}' and '{second}'")]
    DuplicateMessageNumber {
        /// Message number.
        number: u16,
        /// Message declared first.
        first: String,
        /// Message declared second.
        second: String,
    },
}

impl ReadError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

impl SchemaError {
    /// Creates a schema structure error.
    pub fn structure(message: impl Into<String>) -> Self {
        Self::SchemaStructure {
            message: message.into(),
        }
    }

    /// Creates a name collision error.
    pub fn collision(
        kind: impl Into<String>,
        name: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::NameCollision {
            kind: kind.into(),
            name: name.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Creates an invalid cell error.
    pub fn invalid_cell(
        table: impl Into<String>,
        row: usize,
        column: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidCell {
            table: table.into(),
            row,
            column: column.into(),
            value: value.into(),
        }
    }
}
