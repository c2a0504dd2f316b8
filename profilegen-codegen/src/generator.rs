//! Generation pipeline.
//!
//! A run moves through `Created → Parsed → Normalized → Resolved → Emitted`.
//! Each transition is one call to [`Generator::step`]; a failing transition
//! reports the stage it belongs to and the source path.

use crate::emitter::emit;
use crate::error::{CodegenError, Stage};
use crate::options::{Clock, GenerationOptions, SystemClock};
use crate::profile::Profile;
use profilegen_schema::{
    MesgNumIndexEntry, NormalizedModel, RawTable, ResolvedModel, TableReader, XmlWorkbookReader,
    normalize_with, resolve,
};
use std::sync::Arc;

/// State of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorState {
    /// Nothing done yet.
    Created,
    /// Raw tables read from the profile document.
    Parsed(Vec<RawTable>),
    /// Tables normalized into a model.
    Normalized(NormalizedModel),
    /// References resolved; orphaned index entries set aside.
    Resolved(ResolvedModel, Vec<MesgNumIndexEntry>),
    /// Artifacts rendered.
    Emitted(Profile),
}

impl GeneratorState {
    /// Returns the stage the next transition runs, if any.
    #[must_use]
    pub const fn next_stage(&self) -> Option<Stage> {
        match self {
            Self::Created => Some(Stage::Parse),
            Self::Parsed(_) => Some(Stage::Normalize),
            Self::Normalized(_) => Some(Stage::Resolve),
            Self::Resolved(..) | Self::Emitted(_) => None,
        }
    }
}

/// Generator turning one profile document into a [`Profile`].
pub struct Generator<'a, R: TableReader = XmlWorkbookReader> {
    path: String,
    data: &'a [u8],
    options: GenerationOptions,
    reader: R,
    clock: Arc<dyn Clock>,
}

impl<'a> Generator<'a> {
    /// Creates a generator reading XML workbooks with the system clock.
    ///
    /// `path` is only used in error messages.
    #[must_use]
    pub fn new(path: impl Into<String>, data: &'a [u8], options: GenerationOptions) -> Self {
        Self {
            path: path.into(),
            data,
            options,
            reader: XmlWorkbookReader,
            clock: Arc::new(SystemClock),
        }
    }
}

impl<'a, R: TableReader> Generator<'a, R> {
    /// Replaces the table reader.
    #[must_use]
    pub fn with_reader<T: TableReader>(self, reader: T) -> Generator<'a, T> {
        Generator {
            path: self.path,
            data: self.data,
            options: self.options,
            reader,
            clock: self.clock,
        }
    }

    /// Replaces the clock used for generation timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the source path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the options of this run.
    #[must_use]
    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Performs one transition.
    ///
    /// An `Emitted` state is returned unchanged.
    ///
    /// # Errors
    /// Returns `CodegenError` carrying the failed stage and the source path.
    pub fn step(&self, state: GeneratorState) -> Result<GeneratorState, CodegenError> {
        match state {
            GeneratorState::Created => {
                let tables = self.reader.read_tables(self.data).map_err(|source| {
                    CodegenError::Read {
                        path: self.path.clone(),
                        source,
                    }
                })?;
                tracing::debug!("{}: read {} tables", self.path, tables.len());
                Ok(GeneratorState::Parsed(tables))
            }
            GeneratorState::Parsed(tables) => {
                let model = normalize_with(&tables, self.options.parallel_normalize)
                    .map_err(|e| CodegenError::schema(&self.path, Stage::Normalize, e))?;
                Ok(GeneratorState::Normalized(model))
            }
            GeneratorState::Normalized(model) => {
                let (resolved, orphans) = resolve(model)
                    .map_err(|e| CodegenError::schema(&self.path, Stage::Resolve, e))?;
                Ok(GeneratorState::Resolved(resolved, orphans))
            }
            GeneratorState::Resolved(model, orphans) => {
                let artifacts = emit(&model, &self.options, self.clock.as_ref());
                Ok(GeneratorState::Emitted(Profile::new(model, artifacts, &orphans)))
            }
            emitted @ GeneratorState::Emitted(_) => Ok(emitted),
        }
    }

    /// Runs the remaining transitions from `state`.
    ///
    /// # Errors
    /// Returns `CodegenError` from the first failing transition.
    pub fn run(&self, mut state: GeneratorState) -> Result<Profile, CodegenError> {
        loop {
            state = match self.step(state)? {
                GeneratorState::Emitted(profile) => {
                    tracing::info!(
                        "{}: generated profile with {} orphaned message numbers",
                        self.path,
                        profile.orphans().len()
                    );
                    return Ok(profile);
                }
                next => next,
            };
        }
    }

    /// Runs the whole pipeline.
    ///
    /// # Errors
    /// Returns `CodegenError` if parsing, normalization or resolution fails.
    pub fn generate_profile(&self) -> Result<Profile, CodegenError> {
        self.run(GeneratorState::Created)
    }
}
