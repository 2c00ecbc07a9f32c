//! In-memory object store.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempPath;

use crate::error::StoreError;
use crate::store::{Metadata, MetadataDirective, ObjectHead, ObjectStore};

/// An object held by [`MemoryStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    /// Object body.
    pub body: Vec<u8>,
    /// Content type.
    pub content_type: Option<String>,
    /// Custom metadata.
    pub metadata: Metadata,
}

/// A mutating call made against a [`MemoryStore`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WriteOp {
    /// `put_object`.
    Put {
        /// Destination bucket.
        bucket: String,
        /// Destination key.
        key: String,
    },
    /// `upload_file`.
    Upload {
        /// Destination bucket.
        bucket: String,
        /// Destination key.
        key: String,
    },
    /// `copy_object`.
    Copy {
        /// Source bucket.
        src_bucket: String,
        /// Source key.
        src_key: String,
        /// Destination bucket.
        bucket: String,
        /// Destination key.
        key: String,
    },
}

impl WriteOp {
    /// Destination key of the write.
    pub fn key(&self) -> &str {
        match self {
            WriteOp::Put { key, .. } | WriteOp::Upload { key, .. } | WriteOp::Copy { key, .. } => key,
        }
    }
}

#[derive(Default)]
struct Inner {
    buckets: BTreeSet<String>,
    objects: BTreeMap<(String, String), StoredObject>,
    writes: Vec<WriteOp>,
}

/// In-memory object store for testing.
///
/// Clones share the same contents. Every write through the [`ObjectStore`]
/// trait is appended to a log readable with [`MemoryStore::writes`];
/// objects placed with [`MemoryStore::seed`] are not logged.
#[derive(Default, Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Create a new empty memory store with no buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryStore::create_bucket`].
    pub fn with_bucket(self, bucket: &str) -> Self {
        self.create_bucket(bucket);
        self
    }

    /// Create a bucket. Creating an existing bucket is a no-op.
    pub fn create_bucket(&self, bucket: &str) {
        self.inner.lock().unwrap().buckets.insert(bucket.to_string());
    }

    /// Place an object directly, bypassing the write log.
    ///
    /// The bucket is created if needed.
    pub fn seed(&self, bucket: &str, key: &str, body: &[u8], metadata: Metadata) {
        let mut inner = self.inner.lock().unwrap();
        inner.buckets.insert(bucket.to_string());
        inner.objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body: body.to_vec(),
                content_type: None,
                metadata,
            },
        );
    }

    /// Get a copy of an object.
    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.inner
            .lock()
            .unwrap()
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Keys in a bucket, in order.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .objects
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect()
    }

    /// Every write made so far, in call order.
    pub fn writes(&self) -> Vec<WriteOp> {
        self.inner.lock().unwrap().writes.clone()
    }

    /// Forget the write log, keeping the objects.
    pub fn clear_writes(&self) {
        self.inner.lock().unwrap().writes.clear();
    }

    /// Get the number of objects across all buckets.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().objects.len()
    }

    /// Check if the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().objects.is_empty()
    }

    fn require_bucket(inner: &Inner, bucket: &str) -> Result<(), StoreError> {
        if inner.buckets.contains(bucket) {
            Ok(())
        } else {
            Err(StoreError::BucketInaccessible {
                bucket: bucket.to_string(),
                reason: "no such bucket".to_string(),
            })
        }
    }

    fn write(&self, bucket: &str, key: &str, object: StoredObject, op: WriteOp) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::require_bucket(&inner, bucket)?;
        inner
            .objects
            .insert((bucket.to_string(), key.to_string()), object);
        inner.writes.push(op);
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn head_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        Self::require_bucket(&self.inner.lock().unwrap(), bucket)
    }

    async fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectHead, StoreError> {
        self.object(bucket, key)
            .map(|o| ObjectHead {
                size: o.body.len() as u64,
                metadata: o.metadata,
                content_type: o.content_type,
            })
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
        metadata: Metadata,
    ) -> Result<(), StoreError> {
        let object = StoredObject {
            body,
            content_type: Some(content_type.to_string()),
            metadata,
        };
        let op = WriteOp::Put {
            bucket: bucket.to_string(),
            key: key.to_string(),
        };
        self.write(bucket, key, object, op)
    }

    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
        metadata: Metadata,
    ) -> Result<(), StoreError> {
        let body = tokio::fs::read(path).await?;
        let object = StoredObject {
            body,
            content_type: Some(content_type.to_string()),
            metadata,
        };
        let op = WriteOp::Upload {
            bucket: bucket.to_string(),
            key: key.to_string(),
        };
        self.write(bucket, key, object, op)
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
        let source = self
            .object(src_bucket, src_key)
            .ok_or_else(|| StoreError::NotFound {
                bucket: src_bucket.to_string(),
                key: src_key.to_string(),
            })?;
        let object = StoredObject {
            metadata: match directive {
                MetadataDirective::Copy => source.metadata,
                MetadataDirective::Replace => metadata,
            },
            ..source
        };
        let op = WriteOp::Copy {
            src_bucket: src_bucket.to_string(),
            src_key: src_key.to_string(),
            bucket: dst_bucket.to_string(),
            key: dst_key.to_string(),
        };
        self.write(dst_bucket, dst_key, object, op)
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Self::require_bucket(&inner, bucket)?;
        Ok(inner
            .objects
            .keys()
            .filter(|(b, k)| b == bucket && k.starts_with(prefix))
            .map(|(_, k)| k.clone())
            .collect())
    }

    async fn download_to_temp_file(&self, bucket: &str, key: &str) -> Result<TempPath, StoreError> {
        let object = self.object(bucket, key).ok_or_else(|| StoreError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })?;
        let path = tempfile::NamedTempFile::new()?.into_temp_path();
        tokio::fs::write(&path, &object.body).await?;
        Ok(path)
    }
}
