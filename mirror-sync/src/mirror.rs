//! Mirror - drives a complete run.
//!
//! ```text
//! for package in catalog:              (lexicographic)
//!     for version in package:          (lexicographic)
//!         for archive in version:      (identifier order)
//!             sync archive
//!         put {version}.json
//!     put index.json
//! ```
//!
//! Documents are written unconditionally, archives only when stale. Nothing
//! runs concurrently and nothing is rolled back.

use std::path::PathBuf;

use mirror_core::{
    index_document_key, resolve_platforms, version_document_key, ArtifactCatalog,
    IndexDocumentBuilder, MirrorLayout, VersionDocumentBuilder, VersionGroups,
};
use mirror_store::{Metadata, ObjectStore};
use mirror_types::{ArtifactIdentifier, ArtifactSource, ObjectLocation, JSON_CONTENT_TYPE};

use crate::error::MirrorError;
use crate::executor::ArtifactSyncer;
use crate::fingerprint::Fingerprinter;
use crate::progress::{Progress, ProgressEvent};
use crate::report::{ArtifactReport, PackageReport, SyncReport, VersionReport};

/// Where and how a run writes the mirror.
#[derive(Clone, Debug)]
pub struct MirrorConfig {
    /// Destination bucket and prefix (`registry/namespace/type/`).
    pub destination: ObjectLocation,
    /// Archive placement.
    pub layout: MirrorLayout,
}

/// Syncs provider archives into a network mirror.
pub struct Mirror<S, F> {
    store: S,
    fingerprinter: F,
    config: MirrorConfig,
}

impl<S: ObjectStore, F: Fingerprinter> Mirror<S, F> {
    /// Create a mirror over a store and fingerprint procedure.
    pub fn new(store: S, fingerprinter: F, config: MirrorConfig) -> Self {
        Self {
            store,
            fingerprinter,
            config,
        }
    }

    /// The configuration.
    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check that a bucket is accessible, as a configuration error if not.
    pub async fn check_access(&self, bucket: &str) -> Result<(), MirrorError> {
        self.store
            .head_bucket(bucket)
            .await
            .map_err(|source| MirrorError::Configuration {
                bucket: bucket.to_string(),
                source,
            })
    }

    /// Mirror local archive files.
    ///
    /// Paths that are not `{package}_{version}_{platform}_{arch}.zip` are
    /// ignored.
    pub async fn mirror_local<I, P, R>(
        &self,
        paths: I,
        progress: &mut R,
    ) -> Result<SyncReport, MirrorError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
        R: Progress,
    {
        self.check_access(&self.config.destination.bucket).await?;

        let catalog =
            ArtifactCatalog::from_sources(paths.into_iter().map(|p| ArtifactSource::Local(p.into())));
        self.run(&catalog, progress).await
    }

    /// Mirror every archive under a source bucket prefix.
    ///
    /// The source prefix is matched as given, without adding a `/`.
    pub async fn mirror_remote<R: Progress>(
        &self,
        source: &ObjectLocation,
        progress: &mut R,
    ) -> Result<SyncReport, MirrorError> {
        self.check_access(&source.bucket).await?;
        self.check_access(&self.config.destination.bucket).await?;

        let keys = self.store.list_objects(&source.bucket, &source.prefix).await?;
        tracing::info!("listed {} objects under {}", keys.len(), source);

        let catalog = ArtifactCatalog::from_sources(keys.into_iter().map(|key| ArtifactSource::Remote {
            bucket: source.bucket.clone(),
            key,
        }));
        self.run(&catalog, progress).await
    }

    /// Pick the archives of each version that will be mirrored.
    ///
    /// One archive per platform survives, and archives whose path cannot be
    /// laid out are skipped. Versions left empty are dropped.
    fn plan_versions<'c>(
        &self,
        versions: &'c VersionGroups,
    ) -> Vec<(&'c str, Vec<&'c ArtifactIdentifier>)> {
        let mut plan = Vec::new();
        for (version, archives) in versions {
            let (selected, superseded) = resolve_platforms(archives);
            for artifact in superseded {
                tracing::warn!(
                    "{} is superseded by another {} archive for {}",
                    artifact.source,
                    artifact.platform_key(),
                    version
                );
            }

            let selected: Vec<_> = selected
                .into_iter()
                .filter(|artifact| {
                    let addressable = self.config.layout.is_addressable(artifact);
                    if !addressable {
                        tracing::warn!(
                            "skipping {}: version {:?} cannot be a {} path",
                            artifact.source,
                            artifact.version,
                            self.config.layout
                        );
                    }
                    addressable
                })
                .collect();
            if !selected.is_empty() {
                plan.push((version.as_str(), selected));
            }
        }
        plan
    }

    /// Sync every archive in `catalog` and write the documents.
    pub async fn run<R: Progress>(
        &self,
        catalog: &ArtifactCatalog,
        progress: &mut R,
    ) -> Result<SyncReport, MirrorError> {
        let destination = &self.config.destination;
        let bucket = destination.bucket.as_str();
        let syncer = ArtifactSyncer::new(&self.store, &self.fingerprinter);

        tracing::info!(
            "mirroring {} archives in {} packages to {} ({} layout, {} ignored)",
            catalog.artifact_count(),
            catalog.package_count(),
            destination,
            self.config.layout,
            catalog.ignored()
        );
        if catalog.package_count() > 1 {
            tracing::warn!(
                "{} packages share one prefix; each overwrites {}",
                catalog.package_count(),
                index_document_key(destination)
            );
        }

        let mut report = SyncReport::default();
        for (package, versions) in catalog.packages() {
            let plan = self.plan_versions(versions);
            if plan.is_empty() {
                tracing::warn!("nothing to mirror for {}", package);
                continue;
            }

            progress.on_event(&ProgressEvent::PackageStarted {
                package: package.to_string(),
            });

            let mut index = IndexDocumentBuilder::new();
            let mut package_report = PackageReport {
                package: package.to_string(),
                index_key: index_document_key(destination),
                versions: Vec::new(),
            };
            let mut archives = 0;

            for (version, artifacts) in plan {
                progress.on_event(&ProgressEvent::VersionStarted {
                    version: version.to_string(),
                });

                let mut builder = VersionDocumentBuilder::new(self.config.layout);
                let mut version_report = VersionReport {
                    version: version.to_string(),
                    document_key: version_document_key(destination, version),
                    artifacts: Vec::new(),
                };

                for artifact in artifacts {
                    let key = self.config.layout.artifact_key(destination, artifact);
                    let outcome = syncer.sync(artifact, bucket, &key).await?;
                    progress.on_event(&ProgressEvent::ArtifactSynced {
                        bucket: bucket.to_string(),
                        key: key.clone(),
                        fingerprint: outcome.fingerprint.clone(),
                        copied: outcome.copied,
                    });

                    builder.add(artifact, &outcome.fingerprint);
                    version_report.artifacts.push(ArtifactReport {
                        file_name: artifact.file_name.clone(),
                        key,
                        fingerprint: outcome.fingerprint,
                        copied: outcome.copied,
                    });
                    archives += 1;
                }

                let body = builder.finish().to_bytes()?;
                self.store
                    .put_object(bucket, &version_report.document_key, body, JSON_CONTENT_TYPE, Metadata::new())
                    .await?;
                progress.on_event(&ProgressEvent::VersionDocumentWritten {
                    bucket: bucket.to_string(),
                    key: version_report.document_key.clone(),
                });

                index.add_version(version);
                package_report.versions.push(version_report);
            }

            let body = index.finish().to_bytes()?;
            self.store
                .put_object(bucket, &package_report.index_key, body, JSON_CONTENT_TYPE, Metadata::new())
                .await?;
            progress.on_event(&ProgressEvent::PackageFinished { archives });
            progress.on_event(&ProgressEvent::IndexDocumentWritten {
                bucket: bucket.to_string(),
                key: package_report.index_key.clone(),
            });

            report.packages.push(package_report);
        }

        tracing::info!(
            "done: {} copied, {} current, {} documents written",
            report.copied(),
            report.skipped(),
            report.documents_written()
        );
        Ok(report)
    }
}
