//! Progress notifications emitted while a run proceeds.

/// Something that happened during a run, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Started a package.
    PackageStarted {
        /// Package name.
        package: String,
    },
    /// Started a version of the current package.
    VersionStarted {
        /// Version.
        version: String,
    },
    /// An archive was synced.
    ArtifactSynced {
        /// Destination bucket.
        bucket: String,
        /// Destination key.
        key: String,
        /// Fingerprint recorded for it.
        fingerprint: String,
        /// Whether it was written.
        copied: bool,
    },
    /// A version document was written.
    VersionDocumentWritten {
        /// Destination bucket.
        bucket: String,
        /// Document key.
        key: String,
    },
    /// All versions of the current package are done.
    PackageFinished {
        /// Archives processed for the package.
        archives: usize,
    },
    /// The index document was written.
    IndexDocumentWritten {
        /// Destination bucket.
        bucket: String,
        /// Document key.
        key: String,
    },
}

/// Receives [`ProgressEvent`]s. `()` discards them.
pub trait Progress: Send {
    /// Handle one event.
    fn on_event(&mut self, event: &ProgressEvent);
}

impl Progress for () {
    fn on_event(&mut self, _event: &ProgressEvent) {}
}
