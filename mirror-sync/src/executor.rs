//! Per-archive copy decisions and writes.

use std::path::Path;

use mirror_store::{Metadata, MetadataDirective, ObjectStore};
use mirror_types::{ArtifactIdentifier, ArtifactSource, ARCHIVE_CONTENT_TYPE, FINGERPRINT_METADATA_KEY};

use crate::cache;
use crate::error::MirrorError;
use crate::fingerprint::Fingerprinter;

/// Result of syncing one archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Fingerprint now recorded on the mirror object.
    pub fingerprint: String,
    /// Whether the archive was written (`false`: mirror object already current).
    pub copied: bool,
}

/// Copies archives into the mirror, skipping ones that are already current.
pub struct ArtifactSyncer<'a, S, F> {
    store: &'a S,
    fingerprinter: &'a F,
}

impl<'a, S: ObjectStore, F: Fingerprinter> ArtifactSyncer<'a, S, F> {
    /// Create a syncer over a store and fingerprint procedure.
    pub fn new(store: &'a S, fingerprinter: &'a F) -> Self {
        Self {
            store,
            fingerprinter,
        }
    }

    /// Sync `artifact` to `bucket`/`key`.
    ///
    /// Does not touch the destination when it is already current.
    pub async fn sync(
        &self,
        artifact: &ArtifactIdentifier,
        bucket: &str,
        key: &str,
    ) -> Result<SyncOutcome, MirrorError> {
        match &artifact.source {
            ArtifactSource::Local(path) => self.sync_local(path, bucket, key).await,
            ArtifactSource::Remote {
                bucket: src_bucket,
                key: src_key,
            } => self.sync_remote(src_bucket, src_key, bucket, key).await,
        }
    }

    async fn sync_local(&self, path: &Path, bucket: &str, key: &str) -> Result<SyncOutcome, MirrorError> {
        let fingerprint = self.fingerprinter.fingerprint(path).await?;

        let head = self.store.try_head_object(bucket, key).await?;
        if cache::is_current(head.as_ref(), &fingerprint) {
            tracing::debug!("{}/{} is current", bucket, key);
            return Ok(SyncOutcome {
                fingerprint,
                copied: false,
            });
        }

        let mut metadata = Metadata::new();
        metadata.insert(FINGERPRINT_METADATA_KEY.to_string(), fingerprint.clone());
        self.store
            .upload_file(bucket, key, path, ARCHIVE_CONTENT_TYPE, metadata)
            .await?;
        tracing::info!("uploaded {} to {}/{}", path.display(), bucket, key);

        Ok(SyncOutcome {
            fingerprint,
            copied: true,
        })
    }

    async fn sync_remote(
        &self,
        src_bucket: &str,
        src_key: &str,
        bucket: &str,
        key: &str,
    ) -> Result<SyncOutcome, MirrorError> {
        let head = self.store.try_head_object(bucket, key).await?;
        if let Some(fingerprint) = cache::trusted_fingerprint(head.as_ref()) {
            tracing::debug!("{}/{} has a fingerprint, not recomputing", bucket, key);
            return Ok(SyncOutcome {
                fingerprint,
                copied: false,
            });
        }

        let source = self.store.head_object(src_bucket, src_key).await?;
        let fingerprint = {
            let temp = self.store.download_to_temp_file(src_bucket, src_key).await?;
            self.fingerprinter.fingerprint(&temp).await?
        };

        let mut metadata = source.metadata;
        metadata.insert(FINGERPRINT_METADATA_KEY.to_string(), fingerprint.clone());
        self.store
            .copy_object(src_bucket, src_key, bucket, key, metadata, MetadataDirective::Replace)
            .await?;
        tracing::info!("copied {}/{} to {}/{}", src_bucket, src_key, bucket, key);

        Ok(SyncOutcome {
            fingerprint,
            copied: true,
        })
    }
}
