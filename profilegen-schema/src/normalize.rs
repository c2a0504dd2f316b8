//! Schema normalization.
//!
//! Turns raw tables into a [`NormalizedModel`]. Types and messages are laid
//! out as blocks of rows: a header row naming the type or message followed
//! by continuation rows carrying its values or fields. Each table is walked
//! by a small state machine, `AwaitingHeader → Accumulating(current)`.

use crate::error::SchemaError;
use crate::ir::{MesgNumIndexEntry, NormalizedModel};
use crate::messages::{ArrayKind, FieldDef, FieldMeta, MessageDef, SubFieldDef};
use crate::naming::{to_pascal_case, to_snake_case};
use crate::table::{RawRow, RawTable};
use crate::types::{BaseKind, TypeDef, TypeValue};
use std::collections::{HashMap, HashSet};

/// Column labels recognized in profile tables.
pub mod columns {
    /// Types table: type name, blank on value rows.
    pub const TYPE_NAME: &str = "Type Name";
    /// Types table: base kind.
    pub const BASE_TYPE: &str = "Base Type";
    /// Types table: value name.
    pub const VALUE_NAME: &str = "Value Name";
    /// Types table: value literal.
    pub const VALUE: &str = "Value";
    /// Any table: free-form comment.
    pub const COMMENT: &str = "Comment";
    /// Messages and index tables: message name.
    pub const MESSAGE_NAME: &str = "Message Name";
    /// Messages and index tables: message number.
    pub const MESSAGE_NUMBER: &str = "Message Number";
    /// Messages table: field number.
    pub const FIELD_NUMBER: &str = "Field Def #";
    /// Messages table: field name.
    pub const FIELD_NAME: &str = "Field Name";
    /// Messages table: field type token.
    pub const FIELD_TYPE: &str = "Field Type";
    /// Messages table: array marker.
    pub const ARRAY: &str = "Array";
    /// Messages table: component expansion.
    pub const COMPONENTS: &str = "Components";
    /// Messages table: scale.
    pub const SCALE: &str = "Scale";
    /// Messages table: offset.
    pub const OFFSET: &str = "Offset";
    /// Messages table: units.
    pub const UNITS: &str = "Units";
    /// Messages table: component bit widths.
    pub const BITS: &str = "Bits";
    /// Messages table: accumulation flags.
    pub const ACCUMULATE: &str = "Accumulate";
    /// Messages table: subfield selector field names.
    pub const REF_FIELD_NAME: &str = "Ref Field Name";
    /// Messages table: subfield selector values.
    pub const REF_FIELD_VALUE: &str = "Ref Field Value";
}

use columns::*;

/// Sheet names of the types table.
pub const TYPES_SHEET: &[&str] = &["Types"];
/// Sheet names of the messages table.
pub const MESSAGES_SHEET: &[&str] = &["Messages"];
/// Sheet names of the message-number index table.
pub const INDEX_SHEET: &[&str] = &["MesgNums", "Message Numbers"];

/// Type names the generated code already uses.
const RESERVED_TYPE_NAMES: &[&str] = &["Message", "Option", "String", "Vec"];

/// Normalizes raw tables into a model, sequentially.
///
/// # Errors
/// Returns `SchemaError` if a table is missing or malformed, or names collide.
pub fn normalize(tables: &[RawTable]) -> Result<NormalizedModel, SchemaError> {
    normalize_with(tables, false)
}

/// Normalizes raw tables into a model.
///
/// With `parallel` set, the types table is normalized on a scoped worker
/// thread while the messages table is normalized on the caller's thread.
/// Results are merged in table order either way, so the output and the
/// reported error are the same.
///
/// # Errors
/// Returns `SchemaError` if a table is missing or malformed, or names collide.
pub fn normalize_with(tables: &[RawTable], parallel: bool) -> Result<NormalizedModel, SchemaError> {
    let types_table = locate(tables, TYPES_SHEET, &[TYPE_NAME, BASE_TYPE, VALUE_NAME, VALUE])?;
    let messages_table = locate(
        tables,
        MESSAGES_SHEET,
        &[MESSAGE_NAME, MESSAGE_NUMBER, FIELD_NUMBER, FIELD_NAME, FIELD_TYPE],
    )?;
    let index_table = locate(tables, INDEX_SHEET, &[MESSAGE_NUMBER])?;

    let (types, messages) = if parallel {
        std::thread::scope(|s| {
            let types = s.spawn(|| normalize_types(types_table));
            let messages = normalize_messages(messages_table);
            let types = types
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
            (types, messages)
        })
    } else {
        (normalize_types(types_table), normalize_messages(messages_table))
    };

    let model = NormalizedModel {
        types: types?,
        messages: messages?,
        index: normalize_index(index_table)?,
    };

    tracing::debug!(
        "Normalized {} types, {} messages, {} index entries",
        model.types.len(),
        model.messages.len(),
        model.index.len()
    );

    Ok(model)
}

/// Parses a decimal or `0x` hexadecimal number.
#[must_use]
pub fn parse_number(s: &str) -> Option<u64> {
    let s = s.trim();
    match s.strip_prefix("0x").or(s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// Finds exactly one table with the given identity and required columns.
fn locate<'a>(
    tables: &'a [RawTable],
    identities: &[&str],
    required: &[&str],
) -> Result<&'a RawTable, SchemaError> {
    let mut found = tables.iter().filter(|t| t.is_named(identities));
    let table = found.next().ok_or_else(|| {
        SchemaError::structure(format!(
            "missing required table '{}'",
            identities.join("' or '")
        ))
    })?;
    if let Some(duplicate) = found.next() {
        return Err(SchemaError::structure(format!(
            "table '{}' appears more than once",
            duplicate.name
        )));
    }
    if let Some(column) = required.iter().find(|c| !table.has_column(c)) {
        return Err(SchemaError::structure(format!(
            "table '{}' has no '{}' column",
            table.name, column
        )));
    }
    Ok(table)
}

/// Normalized names claimed within one scope.
struct NameScope {
    kind: String,
    seen: HashMap<String, String>,
}

impl NameScope {
    fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            seen: HashMap::new(),
        }
    }

    fn with_reserved(kind: impl Into<String>, reserved: &[&str]) -> Self {
        let mut scope = Self::new(kind);
        for name in reserved {
            scope
                .seen
                .insert((*name).to_string(), "(generated code)".to_string());
        }
        scope
    }

    fn claim(&mut self, name: &str, raw: &str) -> Result<(), SchemaError> {
        if let Some(first) = self.seen.get(name) {
            return Err(SchemaError::collision(&self.kind, name, first, raw));
        }
        self.seen.insert(name.to_string(), raw.to_string());
        Ok(())
    }
}

fn invalid(table: &RawTable, row: &RawRow, column: &str) -> SchemaError {
    SchemaError::invalid_cell(&table.name, row.number(), column, row.text(column))
}

fn misplaced(table: &RawTable, row: &RawRow, what: &str) -> SchemaError {
    SchemaError::structure(format!(
        "table '{}' row {}: {}",
        table.name,
        row.number(),
        what
    ))
}

enum TypeRows {
    AwaitingHeader,
    AccumulatingValues { def: TypeDef, value_names: NameScope },
}

fn normalize_types(table: &RawTable) -> Result<Vec<TypeDef>, SchemaError> {
    let mut types = Vec::new();
    let mut type_names = NameScope::with_reserved("type", RESERVED_TYPE_NAMES);
    let mut state = TypeRows::AwaitingHeader;

    for row in table.rows() {
        if row.is_blank() {
            continue;
        }
        let raw_name = row.text(TYPE_NAME);
        let raw_value_name = row.text(VALUE_NAME);

        state = if !raw_name.is_empty() {
            if let TypeRows::AccumulatingValues { def, .. } = state {
                types.push(def);
            }
            let name = to_pascal_case(raw_name);
            type_names.claim(&name, raw_name)?;
            let base = BaseKind::parse(row.text(BASE_TYPE))
                .ok_or_else(|| invalid(table, row, BASE_TYPE))?;
            let mut def = TypeDef::new(name, raw_name.to_string(), base);
            def.comment = row.optional(COMMENT);
            let value_names = NameScope::new(format!("{} value", def.name));
            TypeRows::AccumulatingValues { def, value_names }
        } else if !raw_value_name.is_empty() {
            let TypeRows::AccumulatingValues {
                mut def,
                mut value_names,
            } = state
            else {
                return Err(misplaced(table, row, "value row before any type"));
            };
            let name = to_pascal_case(raw_value_name);
            value_names.claim(&name, raw_value_name)?;
            let value = row.text(VALUE);
            if value.is_empty() {
                return Err(invalid(table, row, VALUE));
            }
            def.values.push(TypeValue {
                name,
                raw_name: raw_value_name.to_string(),
                value: value.to_string(),
                comment: row.optional(COMMENT),
            });
            TypeRows::AccumulatingValues { def, value_names }
        } else if !row.text(BASE_TYPE).is_empty() || !row.text(VALUE).is_empty() {
            return Err(misplaced(table, row, "type data without type or value name"));
        } else {
            state
        };
    }

    if let TypeRows::AccumulatingValues { def, .. } = state {
        types.push(def);
    }
    Ok(types)
}

struct MessageBuilder {
    def: MessageDef,
    field_names: NameScope,
    field_numbers: HashSet<u8>,
    subfield_names: NameScope,
}

enum MessageRows {
    AwaitingHeader,
    AccumulatingFields(MessageBuilder),
}

fn normalize_messages(table: &RawTable) -> Result<Vec<MessageDef>, SchemaError> {
    let mut messages = Vec::new();
    let mut message_names = NameScope::new("message");
    let mut state = MessageRows::AwaitingHeader;

    for row in table.rows() {
        if row.is_blank() {
            continue;
        }
        let raw_name = row.text(MESSAGE_NAME);
        let field_number = row.text(FIELD_NUMBER);
        let field_name = row.text(FIELD_NAME);

        state = if !raw_name.is_empty() {
            if let MessageRows::AccumulatingFields(builder) = state {
                messages.push(builder.def);
            }
            let name = to_pascal_case(raw_name);
            message_names.claim(&name, raw_name)?;
            let number = parse_number(row.text(MESSAGE_NUMBER))
                .and_then(|n| u16::try_from(n).ok())
                .ok_or_else(|| invalid(table, row, MESSAGE_NUMBER))?;
            let mut def = MessageDef::new(name, raw_name.to_string(), number);
            def.comment = row.optional(COMMENT);
            MessageRows::AccumulatingFields(MessageBuilder {
                field_names: NameScope::new(format!("{} field", def.name)),
                field_numbers: HashSet::new(),
                subfield_names: NameScope::new("subfield"),
                def,
            })
        } else if !field_number.is_empty() {
            let MessageRows::AccumulatingFields(mut builder) = state else {
                return Err(misplaced(table, row, "field row before any message"));
            };
            let number = parse_number(field_number)
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| invalid(table, row, FIELD_NUMBER))?;
            if !builder.field_numbers.insert(number) {
                return Err(SchemaError::DuplicateFieldNumber {
                    message: builder.def.name,
                    number,
                });
            }
            if field_name.is_empty() {
                return Err(invalid(table, row, FIELD_NAME));
            }
            let name = to_snake_case(field_name);
            builder.field_names.claim(&name, field_name)?;
            builder.subfield_names = NameScope::new(format!("{}.{} subfield", builder.def.name, name));
            let field = FieldDef {
                name,
                raw_name: field_name.to_string(),
                number,
                type_token: type_token(table, row)?,
                array: array_kind(table, row)?,
                meta: field_meta(row),
                subfields: Vec::new(),
            };
            builder.def.fields.push(field);
            MessageRows::AccumulatingFields(builder)
        } else if !field_name.is_empty() {
            let MessageRows::AccumulatingFields(mut builder) = state else {
                return Err(misplaced(table, row, "subfield row before any message"));
            };
            let name = to_snake_case(field_name);
            builder.subfield_names.claim(&name, field_name)?;
            let subfield = SubFieldDef {
                name,
                raw_name: field_name.to_string(),
                type_token: type_token(table, row)?,
                ref_fields: ref_fields(table, row)?,
                meta: field_meta(row),
            };
            let Some(parent) = builder.def.fields.last_mut() else {
                return Err(misplaced(table, row, "subfield row before any field"));
            };
            parent.subfields.push(subfield);
            MessageRows::AccumulatingFields(builder)
        } else {
            state
        };
    }

    if let MessageRows::AccumulatingFields(builder) = state {
        messages.push(builder.def);
    }
    Ok(messages)
}

fn normalize_index(table: &RawTable) -> Result<Vec<MesgNumIndexEntry>, SchemaError> {
    let mut entries = Vec::new();
    for row in table.rows() {
        if row.is_blank() {
            continue;
        }
        let raw = row.text(MESSAGE_NUMBER);
        if raw.is_empty() {
            return Err(invalid(table, row, MESSAGE_NUMBER));
        }
        entries.push(MesgNumIndexEntry {
            raw: raw.to_string(),
            number: parse_number(raw).and_then(|n| u16::try_from(n).ok()),
            label: row.optional(MESSAGE_NAME),
        });
    }
    Ok(entries)
}

fn type_token(table: &RawTable, row: &RawRow) -> Result<String, SchemaError> {
    row.optional(FIELD_TYPE)
        .ok_or_else(|| invalid(table, row, FIELD_TYPE))
}

fn array_kind(table: &RawTable, row: &RawRow) -> Result<Option<ArrayKind>, SchemaError> {
    match row.text(ARRAY) {
        "" => Ok(None),
        text => ArrayKind::parse(text)
            .map(Some)
            .ok_or_else(|| invalid(table, row, ARRAY)),
    }
}

fn field_meta(row: &RawRow) -> FieldMeta {
    FieldMeta {
        components: row.optional(COMPONENTS),
        scale: row.optional(SCALE),
        offset: row.optional(OFFSET),
        units: row.optional(UNITS),
        bits: row.optional(BITS),
        accumulate: row.optional(ACCUMULATE),
        comment: row.optional(COMMENT),
    }
}

fn ref_fields(table: &RawTable, row: &RawRow) -> Result<Vec<(String, String)>, SchemaError> {
    let names = split_list(row.text(REF_FIELD_NAME));
    let values = split_list(row.text(REF_FIELD_VALUE));
    if names.len() != values.len() {
        return Err(invalid(table, row, REF_FIELD_VALUE));
    }
    Ok(names
        .into_iter()
        .map(to_snake_case)
        .zip(values.into_iter().map(str::to_string))
        .collect())
}

fn split_list(s: &str) -> Vec<&str> {
    s.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}
