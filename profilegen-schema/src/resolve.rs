//! Reference resolution.
//!
//! Links every field to its type and every index entry to its message.
//! Lookups built here are consulted for membership only; all output is
//! produced by walking the ordered input sequences.

use crate::error::SchemaError;
use crate::ir::{
    MesgNumIndexEntry, NormalizedModel, ResolvedField, ResolvedMessage, ResolvedModel,
    ResolvedSubField, TypeRef,
};
use crate::messages::{FieldDef, MessageDef};
use crate::naming::to_pascal_case;
use crate::types::{BaseKind, TypeDef};
use std::collections::HashMap;

/// Resolves a normalized model.
///
/// Returns the resolved model together with the index entries that name no
/// message, in index order. Orphans are not an error.
///
/// # Errors
/// Returns `SchemaError` for an unresolved type or reference field, or for
/// two messages sharing a number.
pub fn resolve(
    model: NormalizedModel,
) -> Result<(ResolvedModel, Vec<MesgNumIndexEntry>), SchemaError> {
    let NormalizedModel {
        types,
        messages,
        index,
    } = model;

    let type_lookup: HashMap<&str, usize> = types
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.as_str(), i))
        .collect();

    let resolved_messages = messages
        .iter()
        .map(|msg| resolve_message(msg, &types, &type_lookup))
        .collect::<Result<Vec<_>, _>>()?;

    let mut number_lookup: HashMap<u16, &str> = HashMap::new();
    for msg in &messages {
        if let Some(first) = number_lookup.insert(msg.number, &msg.name) {
            return Err(SchemaError::DuplicateMessageNumber {
                number: msg.number,
                first: first.to_string(),
                second: msg.name.clone(),
            });
        }
    }

    let total = index.len();
    let orphans: Vec<MesgNumIndexEntry> = index
        .into_iter()
        .filter(|entry| {
            !entry
                .number
                .is_some_and(|number| number_lookup.contains_key(&number))
        })
        .collect();

    if !orphans.is_empty() {
        tracing::warn!(
            "{} of {} message-number index entries have no message",
            orphans.len(),
            total
        );
    }

    let resolved = ResolvedModel {
        types,
        messages: resolved_messages,
        indexed_messages: total - orphans.len(),
    };

    tracing::debug!(
        "Resolved {} types and {} messages",
        resolved.types.len(),
        resolved.messages.len()
    );

    Ok((resolved, orphans))
}

/// Resolves a type token against declared types, then base kinds.
fn resolve_type(
    token: &str,
    types: &[TypeDef],
    lookup: &HashMap<&str, usize>,
) -> Option<TypeRef> {
    if let Some(&index) = lookup.get(to_pascal_case(token).as_str()) {
        return Some(TypeRef::Declared {
            index,
            name: types[index].name.clone(),
        });
    }
    BaseKind::parse(token).map(TypeRef::Base)
}

fn resolve_message(
    msg: &MessageDef,
    types: &[TypeDef],
    lookup: &HashMap<&str, usize>,
) -> Result<ResolvedMessage, SchemaError> {
    let fields = msg
        .fields
        .iter()
        .map(|field| resolve_field(msg, field, types, lookup))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResolvedMessage {
        name: msg.name.clone(),
        number: msg.number,
        fields,
        comment: msg.comment.clone(),
    })
}

fn resolve_field(
    msg: &MessageDef,
    field: &FieldDef,
    types: &[TypeDef],
    lookup: &HashMap<&str, usize>,
) -> Result<ResolvedField, SchemaError> {
    let ty = resolve_type(&field.type_token, types, lookup).ok_or_else(|| {
        SchemaError::UnresolvedType {
            message: msg.name.clone(),
            field: field.name.clone(),
            token: field.type_token.clone(),
        }
    })?;

    let mut subfields = Vec::with_capacity(field.subfields.len());
    for sub in &field.subfields {
        let sub_ty = resolve_type(&sub.type_token, types, lookup).ok_or_else(|| {
            SchemaError::UnresolvedType {
                message: msg.name.clone(),
                field: format!("{}.{}", field.name, sub.name),
                token: sub.type_token.clone(),
            }
        })?;
        if let Some((ref_field, _)) = sub
            .ref_fields
            .iter()
            .find(|(name, _)| msg.get_field(name).is_none())
        {
            return Err(SchemaError::UnresolvedRefField {
                message: msg.name.clone(),
                field: field.name.clone(),
                subfield: sub.name.clone(),
                ref_field: ref_field.clone(),
            });
        }
        subfields.push(ResolvedSubField {
            name: sub.name.clone(),
            ty: sub_ty,
            ref_fields: sub.ref_fields.clone(),
            meta: sub.meta.clone(),
        });
    }

    Ok(ResolvedField {
        name: field.name.clone(),
        number: field.number,
        ty,
        array: field.array,
        meta: field.meta.clone(),
        subfields,
    })
}
