//! Filesystem-backed object store.
//!
//! ```text
//! {root}/{bucket}/{key}                                   object body
//! {root}/{bucket}/.provider-mirror/meta/{key}.json        content type + metadata
//! ```
//!
//! Every bucket is a directory under the root, so a bucket can be handed to
//! a static file server directly. The sidecar tree is skipped by listings
//! and cannot be written through object keys.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tempfile::TempPath;

use crate::error::StoreError;
use crate::store::{Metadata, MetadataDirective, ObjectHead, ObjectStore};

const SIDECAR_DIR: &str = ".provider-mirror";

#[derive(Debug, Default, Serialize, Deserialize)]
struct Sidecar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    #[serde(default)]
    metadata: Metadata,
}

/// Object store rooted at a local directory.
#[derive(Clone, Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`. Buckets are its subdirectories.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn bucket_dir(&self, bucket: &str) -> Result<PathBuf, StoreError> {
        if bucket.is_empty() || bucket.contains('/') || bucket.contains('\\') || bucket == ".." || bucket == "." {
            return Err(StoreError::BucketInaccessible {
                bucket: bucket.to_string(),
                reason: "invalid bucket name".to_string(),
            });
        }
        Ok(self.root.join(bucket))
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.bucket_dir(bucket)?.join(key))
    }

    fn sidecar_path(&self, bucket: &str, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self
            .bucket_dir(bucket)?
            .join(SIDECAR_DIR)
            .join("meta")
            .join(format!("{}.json", key)))
    }

    async fn require_bucket(&self, bucket: &str) -> Result<PathBuf, StoreError> {
        let dir = self.bucket_dir(bucket)?;
        match tokio::fs::metadata(&dir).await {
            Ok(m) if m.is_dir() => Ok(dir),
            Ok(_) => Err(StoreError::BucketInaccessible {
                bucket: bucket.to_string(),
                reason: "not a directory".to_string(),
            }),
            Err(e) => Err(StoreError::BucketInaccessible {
                bucket: bucket.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    async fn read_sidecar(&self, bucket: &str, key: &str) -> Result<Sidecar, StoreError> {
        let path = self.sidecar_path(bucket, key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Metadata {
                key: key.to_string(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Sidecar::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_sidecar(&self, bucket: &str, key: &str, sidecar: &Sidecar) -> Result<(), StoreError> {
        let path = self.sidecar_path(bucket, key)?;
        create_parent(&path).await?;
        let bytes = serde_json::to_vec_pretty(sidecar).map_err(|source| StoreError::Metadata {
            key: key.to_string(),
            source,
        })?;
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }

    /// Resolve an existing object's path, or `NotFound`.
    async fn existing_object(&self, bucket: &str, key: &str) -> Result<(PathBuf, u64), StoreError> {
        let path = self.object_path(bucket, key)?;
        match tokio::fs::metadata(&path).await {
            Ok(m) if m.is_file() => Ok((path, m.len())),
            Ok(_) => Err(not_found(bucket, key)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found(bucket, key)),
            Err(e) => Err(e.into()),
        }
    }
}

fn not_found(bucket: &str, key: &str) -> StoreError {
    StoreError::NotFound {
        bucket: bucket.to_string(),
        key: key.to_string(),
    }
}

/// Keys must be relative, must not climb out of the bucket, and must not
/// touch the sidecar tree.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let path = Path::new(key);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));
    let reserved = path
        .components()
        .next()
        .is_some_and(|c| c.as_os_str() == SIDECAR_DIR);
    if key.is_empty() || key.ends_with('/') || escapes || reserved {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

async fn create_parent(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}

/// Whether both paths name the same existing file. Copying a file onto
/// itself truncates it.
async fn same_file(a: &Path, b: &Path) -> bool {
    match (tokio::fs::canonicalize(a).await, tokio::fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn list_keys(bucket_dir: &Path, prefix: &str) -> Result<Vec<String>, StoreError> {
    let mut keys = Vec::new();
    let walker = walkdir::WalkDir::new(bucket_dir)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !(e.depth() == 1 && e.file_name() == SIDECAR_DIR));
    for entry in walker {
        let entry = entry.map_err(|e| StoreError::Backend(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(bucket_dir) else {
            continue;
        };
        let key = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if key.starts_with(prefix) {
            keys.push(key);
        }
    }
    keys.sort();
    Ok(keys)
}

#[async_trait]
impl ObjectStore for FsStore {
    async fn head_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        self.require_bucket(bucket).await.map(|_| ())
    }

    async fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectHead, StoreError> {
        let (_, size) = self.existing_object(bucket, key).await?;
        let sidecar = self.read_sidecar(bucket, key).await?;
        Ok(ObjectHead {
            metadata: sidecar.metadata,
            content_type: sidecar.content_type,
            size,
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
        self.require_bucket(bucket).await?;
        let path = self.object_path(bucket, key)?;
        create_parent(&path).await?;
        tokio::fs::write(&path, &body).await?;
        self.write_sidecar(
            bucket,
            key,
            &Sidecar {
                content_type: Some(content_type.to_string()),
                metadata,
            },
        )
        .await?;
        tracing::debug!("put {}/{} ({} bytes)", bucket, key, body.len());
        Ok(())
    }

    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
        metadata: Metadata,
    ) -> Result<(), StoreError> {
        self.require_bucket(bucket).await?;
        let dest = self.object_path(bucket, key)?;
        create_parent(&dest).await?;
        let size = if same_file(path, &dest).await {
            tokio::fs::metadata(&dest).await?.len()
        } else {
            tokio::fs::copy(path, &dest).await?
        };
        self.write_sidecar(
            bucket,
            key,
            &Sidecar {
                content_type: Some(content_type.to_string()),
                metadata,
            },
        )
        .await?;
        tracing::debug!("uploaded {} to {}/{} ({} bytes)", path.display(), bucket, key, size);
        Ok(())
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
        let (src_path, _) = self.existing_object(src_bucket, src_key).await?;
        let source = self.read_sidecar(src_bucket, src_key).await?;
        self.require_bucket(dst_bucket).await?;

        let dest = self.object_path(dst_bucket, dst_key)?;
        create_parent(&dest).await?;
        if !same_file(&src_path, &dest).await {
            tokio::fs::copy(&src_path, &dest).await?;
        }

        let sidecar = Sidecar {
            content_type: source.content_type,
            metadata: match directive {
                MetadataDirective::Copy => source.metadata,
                MetadataDirective::Replace => metadata,
            },
        };
        self.write_sidecar(dst_bucket, dst_key, &sidecar).await?;
        tracing::debug!("copied {}/{} to {}/{}", src_bucket, src_key, dst_bucket, dst_key);
        Ok(())
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, StoreError> {
        let dir = self.require_bucket(bucket).await?;
        let prefix = prefix.to_string();
        tokio::task::spawn_blocking(move || list_keys(&dir, &prefix))
            .await
            .map_err(|e| StoreError::Backend(format!("listing task failed: {}", e)))?
    }

    async fn download_to_temp_file(&self, bucket: &str, key: &str) -> Result<TempPath, StoreError> {
        let (src_path, _) = self.existing_object(bucket, key).await?;
        let temp = tempfile::NamedTempFile::new()?.into_temp_path();
        tokio::fs::copy(&src_path, &temp).await?;
        Ok(temp)
    }
}
