//! # mirror-sync
//!
//! Synchronizes provider release archives into a network mirror.
//!
//! ## Pipeline
//!
//! ```text
//! sources → parse → ArtifactCatalog (package → version → archive)
//!                        ↓
//!          per archive:  cache lookup (dirhash metadata on the mirror object)
//!                        ↓ miss
//!                        fingerprint → upload / copy with dirhash attached
//!                        ↓
//!          per version:  {version}.json
//!          per package:  index.json
//! ```
//!
//! Everything runs sequentially. A failure stops the run where it is; what
//! was already written stays, and a rerun skips it.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mirror_sync::{CommandFingerprinter, Mirror, MirrorConfig};
//! use mirror_store::FsStore;
//! use mirror_core::MirrorLayout;
//! use mirror_types::ObjectLocation;
//!
//! let config = MirrorConfig {
//!     destination: ObjectLocation::parse("mirror/registry.terraform.io/hashicorp/aws/")?,
//!     layout: MirrorLayout::Flat,
//! };
//! let mirror = Mirror::new(FsStore::new("/srv"), CommandFingerprinter::default(), config);
//! let report = mirror.mirror_local(paths, &mut ()).await?;
//! println!("{} copied, {} current", report.copied(), report.skipped());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod error;
pub mod executor;
pub mod fingerprint;
pub mod mirror;
pub mod progress;
pub mod report;

#[cfg(test)]
pub(crate) mod testing;

pub use error::MirrorError;
pub use executor::{ArtifactSyncer, SyncOutcome};
pub use fingerprint::{CommandFingerprinter, FingerprintError, Fingerprinter, DEFAULT_FINGERPRINT_PROGRAM};
pub use mirror::{Mirror, MirrorConfig};
pub use progress::{Progress, ProgressEvent};
pub use report::{ArtifactReport, PackageReport, SyncReport, VersionReport};
