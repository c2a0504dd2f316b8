//! Rust code generation modules.

pub mod messages;
pub mod registry;
pub mod stringer;
pub mod types;

pub use messages::MessageGenerator;
pub use registry::RegistryGenerator;
pub use stringer::StringerGenerator;
pub use types::TypeGenerator;

/// First line of every generated source artifact.
pub const GENERATED_HEADER: &str = "// Code generated by profilegen. DO NOT EDIT.\n";

/// Renders free text as comment lines, one `marker` line per text line.
///
/// Text taken from table cells may span several lines; every line gets its
/// own marker so none of it leaks into the generated code.
#[must_use]
pub fn comment_lines(indent: &str, marker: &str, text: &str) -> String {
    let mut output = String::new();
    let text = text.replace("\r\n", "\n");
    for line in text.trim_end_matches(['\n', '\r']).split(['\n', '\r']) {
        let line = line.trim_end();
        if line.is_empty() {
            output.push_str(&format!("{indent}{marker}\n"));
        } else {
            output.push_str(&format!("{indent}{marker} {line}\n"));
        }
    }
    output
}
