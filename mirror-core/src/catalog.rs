//! Grouping of discovered archives by package and version.

use std::collections::{BTreeMap, BTreeSet};

use mirror_types::{ArtifactIdentifier, ArtifactSource};

use crate::identifier::parse_identifier;

/// Archives of one package, keyed by version.
pub type VersionGroups = BTreeMap<String, BTreeSet<ArtifactIdentifier>>;

/// Every archive of a run, grouped by package then version.
///
/// Both levels iterate in lexicographic order, and archives within a version
/// in [`ArtifactIdentifier`] order, regardless of the order sources were
/// discovered in.
#[derive(Clone, Debug, Default)]
pub struct ArtifactCatalog {
    packages: BTreeMap<String, VersionGroups>,
    ignored: usize,
}

impl ArtifactCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every source, keeping the ones that name an archive.
    pub fn from_sources<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = ArtifactSource>,
    {
        let mut catalog = Self::new();
        for source in sources {
            catalog.add_source(source);
        }
        catalog
    }

    /// Parse and add one source. Returns `false` if it was not an archive.
    pub fn add_source(&mut self, source: ArtifactSource) -> bool {
        match parse_identifier(source) {
            Some(artifact) => {
                self.insert(artifact);
                true
            }
            None => {
                self.ignored += 1;
                false
            }
        }
    }

    /// Add an already parsed archive. Returns `false` if it was already present.
    pub fn insert(&mut self, artifact: ArtifactIdentifier) -> bool {
        self.packages
            .entry(artifact.package.clone())
            .or_default()
            .entry(artifact.version.clone())
            .or_default()
            .insert(artifact)
    }

    /// Packages in lexicographic order.
    pub fn packages(&self) -> impl Iterator<Item = (&str, &VersionGroups)> {
        self.packages.iter().map(|(p, v)| (p.as_str(), v))
    }

    /// Number of packages.
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Total number of archives across all packages and versions.
    pub fn artifact_count(&self) -> usize {
        self.packages
            .values()
            .flat_map(|versions| versions.values())
            .map(|archives| archives.len())
            .sum()
    }

    /// Number of sources that were not archives.
    pub fn ignored(&self) -> usize {
        self.ignored
    }

    /// Check if no archives were found.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Split a version's archives into the ones to mirror and the ones they
/// supersede.
///
/// Archives sharing a `{platform}_{arch}` also share a destination, so only
/// one of them can be mirrored. The last one in identifier order wins.
pub fn resolve_platforms(
    archives: &BTreeSet<ArtifactIdentifier>,
) -> (Vec<&ArtifactIdentifier>, Vec<&ArtifactIdentifier>) {
    let mut selected = Vec::new();
    let mut superseded = Vec::new();
    let mut iter = archives.iter().peekable();
    while let Some(artifact) = iter.next() {
        match iter.peek() {
            Some(next) if next.platform_key() == artifact.platform_key() => superseded.push(artifact),
            _ => selected.push(artifact),
        }
    }
    (selected, superseded)
}
