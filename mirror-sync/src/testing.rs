//! Test doubles shared by the unit tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mirror_core::parse_identifier;
use mirror_store::{MemoryStore, Metadata, MetadataDirective, ObjectHead, ObjectStore, StoreError, TempPath};
use mirror_types::{ArtifactIdentifier, ArtifactSource};

use crate::fingerprint::{FingerprintError, Fingerprinter};
use crate::progress::{Progress, ProgressEvent};

/// Fingerprints a file as `h1:` followed by its contents.
#[derive(Clone, Default)]
pub struct ContentFingerprinter {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl ContentFingerprinter {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fingerprinter for ContentFingerprinter {
    async fn fingerprint(&self, path: &Path) -> Result<String, FingerprintError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(FingerprintError::Failed {
                program: "dirhasher".into(),
                code: Some(1),
            });
        }
        let bytes = tokio::fs::read(path).await.map_err(|source| FingerprintError::Spawn {
            program: "dirhasher".into(),
            source,
        })?;
        Ok(format!("h1:{}", String::from_utf8_lossy(&bytes)))
    }
}

/// Write a local archive and parse it.
pub fn local_archive(dir: &Path, name: &str, body: &[u8]) -> ArtifactIdentifier {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    parse_identifier(ArtifactSource::Local(path)).unwrap()
}

/// Seed a remote archive and parse it.
pub fn remote_archive(store: &MemoryStore, bucket: &str, key: &str, body: &[u8]) -> ArtifactIdentifier {
    store.seed(bucket, key, body, Metadata::new());
    parse_identifier(ArtifactSource::Remote {
        bucket: bucket.into(),
        key: key.into(),
    })
    .unwrap()
}

/// Collects progress events.
#[derive(Clone, Default)]
pub struct RecordingProgress {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Progress for RecordingProgress {
    fn on_event(&mut self, event: &ProgressEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// A [`MemoryStore`] whose object lookups fail with a backend error.
#[derive(Clone, Default)]
pub struct BrokenHeadStore {
    pub inner: MemoryStore,
}

#[async_trait]
impl ObjectStore for BrokenHeadStore {
    async fn head_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        self.inner.head_bucket(bucket).await
    }

    async fn head_object(&self, _bucket: &str, _key: &str) -> Result<ObjectHead, StoreError> {
        Err(StoreError::Backend("access denied".into()))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
        metadata: Metadata,
    ) -> Result<(), StoreError> {
        self.inner.put_object(bucket, key, body, content_type, metadata).await
    }

    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
        metadata: Metadata,
    ) -> Result<(), StoreError> {
        self.inner.upload_file(bucket, key, path, content_type, metadata).await
    }

    async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dst_bucket: &str,
        dst_key: &str,
        metadata: Metadata,
        directive: MetadataDirective,
    ) -> Result<(), StoreError> {
        self.inner
            .copy_object(src_bucket, src_key, dst_bucket, dst_key, metadata, directive)
            .await
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, StoreError> {
        self.inner.list_objects(bucket, prefix).await
    }

    async fn download_to_temp_file(&self, bucket: &str, key: &str) -> Result<TempPath, StoreError> {
        self.inner.download_to_temp_file(bucket, key).await
    }
}
