//! Version and index document assembly.
//!
//! Documents are rebuilt from scratch every run from what was observed in
//! that run. Nothing is merged with what the mirror held before.

use mirror_types::{ArchiveEntry, ArtifactIdentifier, IndexDocument, VersionDocument, VersionEntry};

use crate::layout::MirrorLayout;

/// Accumulates archive entries for one version.
#[derive(Debug)]
pub struct VersionDocumentBuilder {
    layout: MirrorLayout,
    document: VersionDocument,
    added: usize,
}

impl VersionDocumentBuilder {
    /// Start an empty version document for the given layout.
    pub fn new(layout: MirrorLayout) -> Self {
        Self {
            layout,
            document: VersionDocument::default(),
            added: 0,
        }
    }

    /// Record an archive and its fingerprint.
    ///
    /// A second archive with the same `{platform}_{arch}` replaces the first;
    /// the replaced entry is returned.
    pub fn add(&mut self, artifact: &ArtifactIdentifier, fingerprint: &str) -> Option<ArchiveEntry> {
        self.added += 1;
        self.document.archives.insert(
            artifact.platform_key(),
            ArchiveEntry {
                hashes: vec![fingerprint.to_string()],
                url: self.layout.artifact_path(artifact),
            },
        )
    }

    /// Number of `add` calls, including ones that replaced an entry.
    pub fn added(&self) -> usize {
        self.added
    }

    /// Finish and return the document.
    pub fn finish(self) -> VersionDocument {
        self.document
    }
}

/// Accumulates the versions of one package.
#[derive(Debug, Default)]
pub struct IndexDocumentBuilder {
    document: IndexDocument,
}

impl IndexDocumentBuilder {
    /// Start an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a version.
    pub fn add_version(&mut self, version: &str) {
        self.document
            .versions
            .insert(version.to_string(), VersionEntry {});
    }

    /// Finish and return the document.
    pub fn finish(self) -> IndexDocument {
        self.document
    }
}
