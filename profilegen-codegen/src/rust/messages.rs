//! Message code generation.

use super::{GENERATED_HEADER, comment_lines};
use profilegen_schema::ir::{ResolvedField, ResolvedMessage, ResolvedModel, ResolvedSubField};
use profilegen_schema::messages::{ArrayKind, FieldMeta};

/// Generator for message definitions.
pub struct MessageGenerator<'a> {
    ir: &'a ResolvedModel,
}

impl<'a> MessageGenerator<'a> {
    /// Creates a new message generator.
    #[must_use]
    pub fn new(ir: &'a ResolvedModel) -> Self {
        Self { ir }
    }

    /// Generates all message definitions, in table order.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::from(GENERATED_HEADER);

        for msg in &self.ir.messages {
            output.push('\n');
            output.push_str(&self.generate_message(msg));
        }

        output
    }

    /// Generates a single message struct and its metadata block.
    fn generate_message(&self, msg: &ResolvedMessage) -> String {
        let mut output = String::new();
        let struct_name = msg.struct_name();

        if let Some(comment) = &msg.comment {
            output.push_str(&comment_lines("", "///", comment));
        }
        output.push_str(&format!("/// Message {}.\n", msg.number));
        output.push_str("#[derive(Debug, Clone, PartialEq, Default)]\n");
        output.push_str(&format!("pub struct {} {{\n", struct_name));
        for field in &msg.fields {
            output.push_str(&generate_field(field));
        }
        output.push_str("}\n\n");

        output.push_str(&format!("impl {} {{\n", struct_name));
        output.push_str("    /// Message number.\n");
        output.push_str(&format!("    pub const NUMBER: u16 = {};\n", msg.number));
        output.push('\n');
        output.push_str("    /// Field numbers and names, in declaration order.\n");
        if msg.fields.is_empty() {
            output.push_str("    pub const FIELDS: &'static [(u8, &'static str)] = &[];\n");
        } else {
            output.push_str("    pub const FIELDS: &'static [(u8, &'static str)] = &[\n");
            for field in &msg.fields {
                output.push_str(&format!("        ({}, {:?}),\n", field.number, field.name));
            }
            output.push_str("    ];\n");
        }

        if msg.has_subfields() {
            output.push('\n');
            output.push_str(
                "    /// Dynamic subfields: parent field, name, type and selecting (field, value) pairs.\n",
            );
            output.push_str(
                "    pub const SUBFIELDS: &'static [(u8, &'static str, &'static str, &'static [(&'static str, &'static str)])] = &[\n",
            );
            for field in &msg.fields {
                for sub in &field.subfields {
                    output.push_str(&generate_subfield(field.number, sub));
                }
            }
            output.push_str("    ];\n");
        }
        output.push_str("}\n");

        output
    }
}

/// Generates one struct member with its doc lines.
fn generate_field(field: &ResolvedField) -> String {
    let mut output = String::new();

    if let Some(comment) = &field.meta.comment {
        output.push_str(&comment_lines("    ", "///", comment));
    }
    output.push_str(&comment_lines(
        "    ",
        "///",
        &field_doc(field.number, field.array, &field.meta),
    ));
    output.push_str(&format!("    pub {}: {},\n", field.name, field.rust_type()));

    output
}

/// Generates one `SUBFIELDS` row, preceded by its comment and metadata.
fn generate_subfield(parent: u8, sub: &ResolvedSubField) -> String {
    let mut output = String::new();

    if let Some(comment) = &sub.meta.comment {
        output.push_str(&comment_lines("        ", "//", comment));
    }
    let entries = sub.meta.entries();
    if !entries.is_empty() {
        let meta: Vec<String> = entries
            .iter()
            .map(|(label, value)| format!("{} {}", label, value))
            .collect();
        output.push_str(&comment_lines(
            "        ",
            "//",
            &format!("{}: {}.", sub.name, meta.join(", ")),
        ));
    }
    let selectors: Vec<String> = sub
        .ref_fields
        .iter()
        .map(|(field, value)| format!("({:?}, {:?})", field, value))
        .collect();
    output.push_str(&format!(
        "        ({}, {:?}, {:?}, &[{}]),\n",
        parent,
        sub.name,
        sub.ty.rust_name(),
        selectors.join(", ")
    ));

    output
}

/// Builds the one-line field summary, e.g. `Field 3, array of 4, units m.`
fn field_doc(number: u8, array: Option<ArrayKind>, meta: &FieldMeta) -> String {
    let mut doc = format!("Field {}", number);
    match array {
        Some(ArrayKind::Dynamic) => doc.push_str(", array"),
        Some(ArrayKind::Fixed(n)) => doc.push_str(&format!(", array of {}", n)),
        None => {}
    }
    for (label, value) in meta.entries() {
        doc.push_str(&format!(", {} {}", label, value));
    }
    doc.push('.');
    doc
}
