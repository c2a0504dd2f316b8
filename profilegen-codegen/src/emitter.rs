//! Source emission.
//!
//! Renders a resolved model into the four generated artifacts.

use crate::options::{Clock, GenerationOptions};
use crate::rust::{MessageGenerator, RegistryGenerator, StringerGenerator, TypeGenerator};
use profilegen_schema::ir::ResolvedModel;

/// The four generated text artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedArtifacts {
    /// Type declarations.
    pub types_source: String,
    /// Message declarations.
    pub messages_source: String,
    /// Profile registry.
    pub profile_source: String,
    /// Enumerated type name listing.
    pub stringer_input: String,
}

/// Renders all artifacts for a resolved model.
///
/// The clock is only consulted when the generation timestamp is enabled,
/// so with default options the output depends on the model alone.
#[must_use]
pub fn emit(model: &ResolvedModel, options: &GenerationOptions, clock: &dyn Clock) -> EmittedArtifacts {
    let generated_at = options
        .include_generation_timestamp
        .then(|| clock.now());

    let artifacts = EmittedArtifacts {
        types_source: TypeGenerator::new(model).generate(),
        messages_source: MessageGenerator::new(model).generate(),
        profile_source: RegistryGenerator::new(model)
            .with_generated_at(generated_at)
            .with_sdk_version(options.sdk_version.as_deref())
            .generate(),
        stringer_input: StringerGenerator::new(model).generate(),
    };

    tracing::debug!(
        "Emitted {} bytes of types, {} bytes of messages, {} bytes of profile",
        artifacts.types_source.len(),
        artifacts.messages_source.len(),
        artifacts.profile_source.len()
    );

    artifacts
}
