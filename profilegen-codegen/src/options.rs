//! Generation options and clocks.

use chrono::{DateTime, Utc};

/// Options for one generation run.
///
/// Every option defaults to the choice that keeps output a pure function
/// of the input bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Stamp the profile artifact with the generation time.
    pub include_generation_timestamp: bool,
    /// Profile version to embed in the profile artifact.
    pub sdk_version: Option<String>,
    /// Normalize the types and messages tables on separate threads.
    pub parallel_normalize: bool,
}

impl GenerationOptions {
    /// Creates the default, deterministic options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the profile artifact carries a generation timestamp.
    #[must_use]
    pub fn with_generation_timestamp(mut self, include: bool) -> Self {
        self.include_generation_timestamp = include;
        self
    }

    /// Sets the profile version embedded in the profile artifact.
    #[must_use]
    pub fn with_sdk_version(mut self, version: impl Into<String>) -> Self {
        self.sdk_version = Some(version.into());
        self
    }

    /// Sets whether tables are normalized in parallel.
    #[must_use]
    pub fn with_parallel_normalize(mut self, parallel: bool) -> Self {
        self.parallel_normalize = parallel;
        self
    }
}

/// Source of wall-clock time for generation timestamps.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock reading the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
