//! Type code generation.
//!
//! Every declared type becomes a newtype over its storage type. Values of
//! enumerated types become associated constants, which keeps aliased and
//! out-of-range values representable.

use super::{GENERATED_HEADER, comment_lines};
use profilegen_schema::ir::ResolvedModel;
use profilegen_schema::types::{BaseKind, TypeDef};

/// Generator for type definitions.
pub struct TypeGenerator<'a> {
    ir: &'a ResolvedModel,
}

impl<'a> TypeGenerator<'a> {
    /// Creates a new type generator.
    #[must_use]
    pub fn new(ir: &'a ResolvedModel) -> Self {
        Self { ir }
    }

    /// Generates all type definitions, in declaration order.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::from(GENERATED_HEADER);

        for type_def in &self.ir.types {
            output.push('\n');
            output.push_str(&self.generate_type(type_def));
        }

        output
    }

    /// Generates one type definition.
    fn generate_type(&self, type_def: &TypeDef) -> String {
        let mut output = String::new();
        let name = &type_def.name;

        match &type_def.comment {
            Some(comment) => output.push_str(&comment_lines("", "///", comment)),
            None => output.push_str(&comment_lines(
                "",
                "///",
                &format!("{} ({}).", type_def.raw_name, type_def.base),
            )),
        }
        output.push_str(&format!("#[derive({})]\n", derives(type_def.base)));
        output.push_str(&format!(
            "pub struct {}(pub {});\n",
            name,
            type_def.base.rust_type()
        ));

        if !type_def.is_enumerated() {
            return output;
        }

        output.push('\n');
        output.push_str("#[allow(non_upper_case_globals)]\n");
        output.push_str(&format!("impl {} {{\n", name));
        for value in &type_def.values {
            if let Some(comment) = &value.comment {
                output.push_str(&comment_lines("    ", "///", comment));
            }
            if type_def.base == BaseKind::String {
                output.push_str(&format!(
                    "    pub const {}: &'static str = {:?};\n",
                    value.name, value.value
                ));
            } else {
                output.push_str(&format!(
                    "    pub const {}: Self = Self({});\n",
                    value.name, value.value
                ));
            }
        }
        output.push_str("}\n");

        output
    }
}

/// Derive list for a newtype over the given base kind.
fn derives(base: BaseKind) -> &'static str {
    if base.is_float() {
        "Debug, Clone, Copy, PartialEq, Default"
    } else if base.is_copy() {
        "Debug, Clone, Copy, PartialEq, Eq, Hash, Default"
    } else {
        "Debug, Clone, PartialEq, Eq, Hash, Default"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profilegen_schema::types::TypeValue;

    fn value(name: &str, literal: &str) -> TypeValue {
        TypeValue {
            name: name.into(),
            raw_name: name.to_lowercase(),
            value: literal.into(),
            comment: None,
        }
    }

    fn ir(types: Vec<TypeDef>) -> ResolvedModel {
        ResolvedModel {
            types,
            messages: Vec::new(),
            indexed_messages: 0,
        }
    }

    #[test]
    fn test_generate_enumerated_type() {
        let mut kind = TypeDef::new("Kind".into(), "kind".into(), BaseKind::Enum);
        kind.values = vec![value("A", "0"), value("B", "1")];
        let ir = ir(vec![kind]);
        let output = TypeGenerator::new(&ir).generate();

        assert!(output.starts_with(GENERATED_HEADER));
        assert!(output.contains("pub struct Kind(pub u8);"));
        let a = output.find("pub const A: Self = Self(0);").expect("A missing");
        let b = output.find("pub const B: Self = Self(1);").expect("B missing");
        assert!(a < b);
    }

    #[test]
    fn test_generate_plain_type() {
        let ir = ir(vec![TypeDef::new(
            "DateTime".into(),
            "date_time".into(),
            BaseKind::Uint32,
        )]);
        let output = TypeGenerator::new(&ir).generate();

        assert!(output.contains("/// date_time (uint32).\n"));
        assert!(output.contains("pub struct DateTime(pub u32);\n"));
        assert!(!output.contains("impl DateTime"));
    }

    #[test]
    fn test_types_keep_declaration_order() {
        let ir = ir(vec![
            TypeDef::new("Zeta".into(), "zeta".into(), BaseKind::Uint8),
            TypeDef::new("Alpha".into(), "alpha".into(), BaseKind::Uint8),
        ]);
        let output = TypeGenerator::new(&ir).generate();

        let zeta = output.find("struct Zeta").expect("Zeta missing");
        let alpha = output.find("struct Alpha").expect("Alpha missing");
        assert!(zeta < alpha);
    }

    #[test]
    fn test_float_and_string_derives() {
        let mut label = TypeDef::new("Label".into(), "label".into(), BaseKind::String);
        label.values = vec![value("Default", "none \"set\"")];
        let ir = ir(vec![
            TypeDef::new("Ratio".into(), "ratio".into(), BaseKind::Float32),
            label,
        ]);
        let output = TypeGenerator::new(&ir).generate();

        assert!(output.contains("#[derive(Debug, Clone, Copy, PartialEq, Default)]\npub struct Ratio"));
        assert!(output.contains("#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]\npub struct Label"));
        assert!(output.contains(r#"pub const Default: &'static str = "none \"set\"";"#));
    }

    #[test]
    fn test_comments_become_docs() {
        let mut kind = TypeDef::new("Kind".into(), "kind".into(), BaseKind::Enum);
        kind.comment = Some("Kind of ping.".into());
        let mut fast = value("Fast", "0");
        fast.comment = Some("Low latency.".into());
        kind.values = vec![fast];
        let ir = ir(vec![kind]);
        let output = TypeGenerator::new(&ir).generate();

        assert!(output.contains("/// Kind of ping.\n"));
        assert!(output.contains("    /// Low latency.\n    pub const Fast"));
    }
}
