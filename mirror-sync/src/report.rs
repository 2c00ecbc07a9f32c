//! Summary of a completed run.

/// One archive's outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactReport {
    /// Archive file name.
    pub file_name: String,
    /// Destination key.
    pub key: String,
    /// Recorded fingerprint.
    pub fingerprint: String,
    /// Whether it was written.
    pub copied: bool,
}

/// One version's outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionReport {
    /// Version.
    pub version: String,
    /// Key of the version document.
    pub document_key: String,
    /// Archives in processing order.
    pub artifacts: Vec<ArtifactReport>,
}

/// One package's outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageReport {
    /// Package name.
    pub package: String,
    /// Key of the index document.
    pub index_key: String,
    /// Versions in processing order.
    pub versions: Vec<VersionReport>,
}

/// Everything a run did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Packages in processing order.
    pub packages: Vec<PackageReport>,
}

impl SyncReport {
    fn artifacts(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.packages
            .iter()
            .flat_map(|p| p.versions.iter())
            .flat_map(|v| v.artifacts.iter())
    }

    /// Archives processed.
    pub fn artifact_count(&self) -> usize {
        self.artifacts().count()
    }

    /// Archives written.
    pub fn copied(&self) -> usize {
        self.artifacts().filter(|a| a.copied).count()
    }

    /// Archives already current.
    pub fn skipped(&self) -> usize {
        self.artifacts().filter(|a| !a.copied).count()
    }

    /// Version and index documents written.
    pub fn documents_written(&self) -> usize {
        self.packages.iter().map(|p| p.versions.len() + 1).sum()
    }

    /// Check if the run found nothing to mirror.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
