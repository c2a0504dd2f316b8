//! Generated profile.

use crate::emitter::EmittedArtifacts;
use profilegen_schema::{MesgNumIndexEntry, ResolvedMessage, ResolvedModel, TypeDef};
use std::io::{self, Write};
use xxhash_rust::xxh3::Xxh3;

/// Section marker preceding the types artifact.
pub const TYPES_MARKER: &str = "// TYPES\n";
/// Section marker preceding the messages artifact.
pub const MESSAGES_MARKER: &str = "// MESSAGES\n";
/// Section marker preceding the profile artifact.
pub const PROFILE_MARKER: &str = "// PROFILE\n";
/// Section marker preceding the enumerated type listing.
pub const STRINGER_MARKER: &str = "// STRINGER TYPE INPUT\n";
/// Section marker preceding the orphan identifiers.
pub const ORPHANS_MARKER: &str = "// MESSAGE NUMS WITHOUT MESSAGE\n";

/// Result of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    model: ResolvedModel,
    artifacts: EmittedArtifacts,
    orphans: Vec<String>,
}

impl Profile {
    /// Creates a profile from the resolved model, its artifacts and the
    /// orphaned index entries.
    #[must_use]
    pub fn new(
        model: ResolvedModel,
        artifacts: EmittedArtifacts,
        orphans: &[MesgNumIndexEntry],
    ) -> Self {
        Self {
            model,
            artifacts,
            orphans: orphans.iter().map(|entry| entry.raw.clone()).collect(),
        }
    }

    /// Returns the declared types, in declaration order.
    #[must_use]
    pub fn types(&self) -> &[TypeDef] {
        &self.model.types
    }

    /// Returns the resolved messages, in table order.
    #[must_use]
    pub fn messages(&self) -> &[ResolvedMessage] {
        &self.model.messages
    }

    /// Returns the resolved model the artifacts were rendered from.
    #[must_use]
    pub fn model(&self) -> &ResolvedModel {
        &self.model
    }

    /// Returns the type declarations.
    #[must_use]
    pub fn types_source(&self) -> &str {
        &self.artifacts.types_source
    }

    /// Returns the message declarations.
    #[must_use]
    pub fn messages_source(&self) -> &str {
        &self.artifacts.messages_source
    }

    /// Returns the profile registry.
    #[must_use]
    pub fn profile_source(&self) -> &str {
        &self.artifacts.profile_source
    }

    /// Returns the enumerated type name listing.
    #[must_use]
    pub fn stringer_input(&self) -> &str {
        &self.artifacts.stringer_input
    }

    /// Returns index identifiers with no message, as written, in index order.
    #[must_use]
    pub fn orphans(&self) -> &[String] {
        &self.orphans
    }

    /// Returns all artifacts.
    #[must_use]
    pub fn artifacts(&self) -> &EmittedArtifacts {
        &self.artifacts
    }

    /// Writes every artifact and the orphan list, each behind a section marker.
    ///
    /// # Errors
    /// Returns any error from the writer.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        w.write_all(TYPES_MARKER.as_bytes())?;
        w.write_all(self.artifacts.types_source.as_bytes())?;
        w.write_all(MESSAGES_MARKER.as_bytes())?;
        w.write_all(self.artifacts.messages_source.as_bytes())?;
        w.write_all(PROFILE_MARKER.as_bytes())?;
        w.write_all(self.artifacts.profile_source.as_bytes())?;
        w.write_all(STRINGER_MARKER.as_bytes())?;
        w.write_all(self.artifacts.stringer_input.as_bytes())?;
        w.write_all(ORPHANS_MARKER.as_bytes())?;
        for orphan in &self.orphans {
            w.write_all(orphan.as_bytes())?;
            w.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Returns the `write_to` rendering as a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Returns the XXH3-64 checksum of the `write_to` rendering.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = HashWriter(Xxh3::new());
        let _ = self.write_to(&mut hasher);
        hasher.0.digest()
    }
}

/// Checksums bytes the same way [`Profile::fingerprint`] does.
#[must_use]
pub fn fingerprint_bytes(bytes: &[u8]) -> u64 {
    xxhash_rust::xxh3::xxh3_64(bytes)
}

struct HashWriter(Xxh3);

impl Write for HashWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
