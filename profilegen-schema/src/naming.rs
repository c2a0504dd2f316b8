//! Identifier normalization.
//!
//! Raw labels are split into words at every character that is not an ASCII
//! letter or digit. Both conversions are total: any input yields a valid
//! Rust identifier.

/// Words that cannot be used as plain identifiers.
const KEYWORDS: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Converts a raw label to PascalCase.
///
/// The first letter of each word is upper-cased and the rest is kept, so
/// `file_id` becomes `FileId` and `HRV` stays `HRV`.
#[must_use]
pub fn to_pascal_case(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    for word in words(raw) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.push(first.to_ascii_uppercase());
            result.push_str(chars.as_str());
        }
    }
    finish(result, "Unnamed")
}

/// Converts a raw label to snake_case.
///
/// Words are lower-cased and joined with `_`; a lower-case letter or digit
/// followed by an upper-case letter also starts a new word.
#[must_use]
pub fn to_snake_case(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len() + 4);
    for word in words(raw) {
        if !result.is_empty() {
            result.push('_');
        }
        let mut prev_lower = false;
        for c in word.chars() {
            if c.is_ascii_uppercase() && prev_lower {
                result.push('_');
            }
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
            result.push(c.to_ascii_lowercase());
        }
    }
    finish(result, "unnamed")
}

fn words(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
}

fn finish(mut ident: String, fallback: &str) -> String {
    if ident.is_empty() {
        return fallback.to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("file_id"), "FileId");
        assert_eq!(to_pascal_case("kind"), "Kind");
        assert_eq!(to_pascal_case("order-type"), "OrderType");
        assert_eq!(to_pascal_case("HRV"), "HRV");
        assert_eq!(to_pascal_case(" mesg num "), "MesgNum");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("clOrdId"), "cl_ord_id");
        assert_eq!(to_snake_case("heart_rate"), "heart_rate");
        assert_eq!(to_snake_case("HeartRate"), "heart_rate");
        assert_eq!(to_snake_case("Kind"), "kind");
        assert_eq!(to_snake_case("field2Name"), "field2_name");
    }

    #[test]
    fn test_disallowed_characters_are_stripped() {
        assert_eq!(to_pascal_case("power (W)"), "PowerW");
        assert_eq!(to_snake_case("power (W)"), "power_w");
        assert_eq!(to_snake_case("café"), "caf");
    }

    #[test]
    fn test_identifiers_are_always_valid() {
        assert_eq!(to_pascal_case("3d"), "_3d");
        assert_eq!(to_snake_case("3d_mode"), "_3d_mode");
        assert_eq!(to_snake_case("type"), "type_");
        assert_eq!(to_pascal_case("self"), "Self_");
        assert_eq!(to_pascal_case("---"), "Unnamed");
        assert_eq!(to_snake_case(""), "unnamed");
    }
}
