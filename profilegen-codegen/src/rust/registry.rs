//! Profile registry code generation.
//!
//! The registry ties message numbers to the generated message structs:
//! a `Message` enum, a `MESSAGES` table and a `new_message` constructor.

use super::{GENERATED_HEADER, comment_lines};
use chrono::{DateTime, Utc};
use profilegen_schema::ir::ResolvedModel;

/// Generator for the profile registry.
pub struct RegistryGenerator<'a> {
    ir: &'a ResolvedModel,
    generated_at: Option<DateTime<Utc>>,
    sdk_version: Option<&'a str>,
}

impl<'a> RegistryGenerator<'a> {
    /// Creates a registry generator without timestamp or version stamp.
    #[must_use]
    pub fn new(ir: &'a ResolvedModel) -> Self {
        Self {
            ir,
            generated_at: None,
            sdk_version: None,
        }
    }

    /// Stamps the registry with a generation time.
    #[must_use]
    pub fn with_generated_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.generated_at = at;
        self
    }

    /// Embeds a profile version constant.
    #[must_use]
    pub fn with_sdk_version(mut self, version: Option<&'a str>) -> Self {
        self.sdk_version = version;
        self
    }

    /// Generates the registry source.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::from(GENERATED_HEADER);

        if let Some(at) = self.generated_at {
            output.push_str(&format!(
                "// Generated at {}.\n",
                at.format("%Y-%m-%dT%H:%M:%SZ")
            ));
        }
        if let Some(version) = self.sdk_version {
            output.push_str(&comment_lines(
                "",
                "//",
                &format!("Profile version {}.", version),
            ));
            output.push('\n');
            output.push_str("/// Version of the profile this code was generated from.\n");
            output.push_str(&format!(
                "pub const PROFILE_VERSION: &str = {:?};\n",
                version
            ));
        }

        output.push('\n');
        output.push_str(&self.generate_enum());
        output.push('\n');
        output.push_str(&self.generate_table());
        output.push('\n');
        output.push_str(&self.generate_constructor());

        output
    }

    fn generate_enum(&self) -> String {
        let mut output = String::new();

        output.push_str("/// Any profile message.\n");
        output.push_str("#[derive(Debug, Clone, PartialEq)]\n");
        output.push_str("pub enum Message {\n");
        for msg in &self.ir.messages {
            output.push_str(&format!("    /// Message {}.\n", msg.number));
            output.push_str(&format!("    {}({}),\n", msg.name, msg.struct_name()));
        }
        output.push_str("}\n\n");

        output.push_str("impl Message {\n");
        output.push_str("    /// Returns the message number.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub const fn number(&self) -> u16 {\n");
        if self.ir.messages.is_empty() {
            output.push_str("        match *self {}\n");
        } else {
            output.push_str("        match *self {\n");
            for msg in &self.ir.messages {
                output.push_str(&format!(
                    "            Self::{}(_) => {}::NUMBER,\n",
                    msg.name,
                    msg.struct_name()
                ));
            }
            output.push_str("        }\n");
        }
        output.push_str("    }\n");
        output.push_str("}\n");

        output
    }

    fn generate_table(&self) -> String {
        let mut output = String::new();

        output.push_str("/// Message numbers and names, in profile order.\n");
        if self.ir.messages.is_empty() {
            output.push_str("pub const MESSAGES: &[(u16, &str)] = &[];\n");
            return output;
        }
        output.push_str("pub const MESSAGES: &[(u16, &str)] = &[\n");
        for msg in &self.ir.messages {
            output.push_str(&format!("    ({}, {:?}),\n", msg.number, msg.name));
        }
        output.push_str("];\n");

        output
    }

    fn generate_constructor(&self) -> String {
        let mut output = String::new();

        output.push_str("/// Creates an empty message for a message number.\n");
        output.push_str("#[must_use]\n");
        output.push_str("pub fn new_message(number: u16) -> Option<Message> {\n");
        output.push_str("    match number {\n");
        for msg in &self.ir.messages {
            output.push_str(&format!(
                "        {} => Some(Message::{}({}::default())),\n",
                msg.number,
                msg.name,
                msg.struct_name()
            ));
        }
        output.push_str("        _ => None,\n");
        output.push_str("    }\n");
        output.push_str("}\n");

        output
    }
}
