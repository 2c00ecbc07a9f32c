//! The object store capability used by the mirror.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use tempfile::TempPath;

use crate::error::StoreError;

/// Custom metadata attached to an object.
pub type Metadata = BTreeMap<String, String>;

/// What a head request returns for an existing object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectHead {
    /// Custom metadata.
    pub metadata: Metadata,
    /// Content type, if one was recorded.
    pub content_type: Option<String>,
    /// Size in bytes.
    pub size: u64,
}

/// How a copy treats metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetadataDirective {
    /// Keep the source object's metadata; the supplied map is ignored.
    Copy,
    /// Replace the metadata with the supplied map.
    Replace,
}

/// Trait for object storage backends.
///
/// Objects are addressed by bucket and key. There is no locking: concurrent
/// writers to one key race and the last write wins.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Check that a bucket exists and is accessible.
    ///
    /// Returns `BucketInaccessible` otherwise.
    async fn head_bucket(&self, bucket: &str) -> Result<(), StoreError>;

    /// Fetch an object's metadata without its body.
    ///
    /// Returns `NotFound` if the key does not exist.
    async fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectHead, StoreError>;

    /// Write an object from memory, replacing any existing one.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
        metadata: Metadata,
    ) -> Result<(), StoreError>;

    /// Write an object from a local file, replacing any existing one.
    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
        metadata: Metadata,
    ) -> Result<(), StoreError>;

    /// Copy an object within or across buckets.
    async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dst_bucket: &str,
        dst_key: &str,
        metadata: Metadata,
        directive: MetadataDirective,
    ) -> Result<(), StoreError>;

    /// List every key in a bucket starting with `prefix`, in key order.
    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, StoreError>;

    /// Download an object into a temporary file.
    ///
    /// The file is deleted when the returned [`TempPath`] is dropped.
    async fn download_to_temp_file(&self, bucket: &str, key: &str) -> Result<TempPath, StoreError>;

    /// Head an object, mapping `NotFound` to `None`.
    ///
    /// Every other error is passed through.
    async fn try_head_object(&self, bucket: &str, key: &str) -> Result<Option<ObjectHead>, StoreError> {
        match self.head_object(bucket, key).await {
            Ok(head) => Ok(Some(head)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Check if an object exists.
    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, StoreError> {
        Ok(self.try_head_object(bucket, key).await?.is_some())
    }

    /// Fetch an object's custom metadata.
    async fn get_metadata(&self, bucket: &str, key: &str) -> Result<Metadata, StoreError> {
        Ok(self.head_object(bucket, key).await?.metadata)
    }
}
