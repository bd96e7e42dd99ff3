//! Progress reporting for catalog reads and writes

/// Progress update sent while a library is read or written
#[derive(Debug, Clone)]
pub struct RecordProgress {
    /// Current operation phase
    pub phase: RecordPhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items in this phase
    pub total: usize,
    /// Entry or item being processed (if applicable)
    pub current_file: Option<String>,
}

impl RecordProgress {
    #[must_use]
    pub fn new(phase: RecordPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    #[must_use]
    pub fn with_file(
        phase: RecordPhase,
        current: usize,
        total: usize,
        file: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }

    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Phase of a catalog operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPhase {
    /// Reading the default catalog
    ReadingCatalog,
    /// Reading locale overlays
    ReadingLocales,
    /// Choosing entry names for item resources
    ResolvingContents,
    /// Writing catalog `.properties` entries
    WritingCatalog,
    /// Copying resources into the archive or the resources directory
    CopyingResources,
    /// Operation complete
    Complete,
}

impl RecordPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadingCatalog => "Reading catalog",
            Self::ReadingLocales => "Reading translations",
            Self::ResolvingContents => "Resolving resources",
            Self::WritingCatalog => "Writing catalog",
            Self::CopyingResources => "Copying resources",
            Self::Complete => "Complete",
        }
    }
}

/// Progress callback type
pub type ProgressCallback<'a> = &'a (dyn Fn(&RecordProgress) + Sync + Send);

/// Callback that ignores every update
pub fn no_progress(_: &RecordProgress) {}
