//! Error types for code generation.

use profilegen_schema::{ReadError, SchemaError};
use std::fmt;
use thiserror::Error;

/// Pipeline stage a generation run failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Reading raw tables from the profile document.
    Parse,
    /// Building the normalized model.
    Normalize,
    /// Resolving references.
    Resolve,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Parse => "parse",
            Self::Normalize => "normalize",
            Self::Resolve => "resolve",
        })
    }
}

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The profile document could not be read as tables.
    #[error("{path}: parse stage failed: {source}")]
    Read {
        /// Source path of the profile document.
        path: String,
        /// Underlying reader error.
        #[source]
        source: ReadError,
    },

    /// The tables do not form a valid profile.
    #[error("{path}: {stage} stage failed: {source}")]
    Schema {
        /// Source path of the profile document.
        path: String,
        /// Stage that detected the problem.
        stage: Stage,
        /// Underlying schema error.
        #[source]
        source: SchemaError,
    },
}

impl CodegenError {
    /// Creates a schema error for the given stage.
    pub fn schema(path: impl Into<String>, stage: Stage, source: SchemaError) -> Self {
        Self::Schema {
            path: path.into(),
            stage,
            source,
        }
    }

    /// Returns the stage the run failed in.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Read { .. } => Stage::Parse,
            Self::Schema { stage, .. } => *stage,
        }
    }

    /// Returns the source path of the profile document.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Read { path, .. } | Self::Schema { path, .. } => path,
        }
    }

    /// Returns the schema error, if the run got past reading.
    #[must_use]
    pub const fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            Self::Read { .. } => None,
            Self::Schema { source, .. } => Some(source),
        }
    }
}
