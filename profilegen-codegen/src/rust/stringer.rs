//! Enumerated type name listing.
//!
//! The listing feeds external tooling that derives display names for
//! enumerated types; it is plain text, one type name per line.

use profilegen_schema::ir::ResolvedModel;

/// Generator for the enumerated type name listing.
pub struct StringerGenerator<'a> {
    ir: &'a ResolvedModel,
}

impl<'a> StringerGenerator<'a> {
    /// Creates a new listing generator.
    #[must_use]
    pub fn new(ir: &'a ResolvedModel) -> Self {
        Self { ir }
    }

    /// Generates the listing in type declaration order.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        for type_def in self.ir.enumerated_types() {
            output.push_str(&type_def.name);
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profilegen_schema::types::{BaseKind, TypeDef, TypeValue};

    fn enumerated(name: &str) -> TypeDef {
        let mut type_def = TypeDef::new(name.into(), name.to_lowercase(), BaseKind::Enum);
        type_def.values.push(TypeValue {
            name: "A".into(),
            raw_name: "a".into(),
            value: "0".into(),
            comment: None,
        });
        type_def
    }

    #[test]
    fn test_lists_only_enumerated_types_in_order() {
        let ir = ResolvedModel {
            types: vec![
                enumerated("Zeta"),
                TypeDef::new("DateTime".into(), "date_time".into(), BaseKind::Uint32),
                enumerated("Alpha"),
            ],
            messages: Vec::new(),
            indexed_messages: 0,
        };

        assert_eq!(StringerGenerator::new(&ir).generate(), "Zeta\nAlpha\n");
    }
}
