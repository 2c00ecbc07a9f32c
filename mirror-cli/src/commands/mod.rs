//! CLI command implementations.

pub mod local;
pub mod remote;

use mirror_core::MirrorLayout;
use mirror_store::FsStore;
use mirror_sync::{CommandFingerprinter, Mirror, MirrorConfig, SyncReport};
use mirror_types::ObjectLocation;

use crate::config::Config;

/// Build a mirror over the configured store and fingerprint program.
///
/// `default_layout` applies when the config names none.
pub fn build_mirror(
    config: &Config,
    destination: ObjectLocation,
    default_layout: MirrorLayout,
) -> Mirror<FsStore, CommandFingerprinter> {
    let layout = config.mirror.layout.unwrap_or(default_layout);
    let fingerprinter =
        CommandFingerprinter::new(&config.fingerprint.program).with_args(&config.fingerprint.args);

    tracing::debug!(
        "store root {}, fingerprint program {}, {} layout",
        config.store.root.display(),
        config.fingerprint.program,
        layout
    );

    Mirror::new(
        FsStore::new(&config.store.root),
        fingerprinter,
        MirrorConfig {
            destination,
            layout,
        },
    )
}

/// Log the run summary.
pub fn summarize(report: &SyncReport) {
    if report.is_empty() {
        tracing::warn!("no provider archives found");
    } else {
        tracing::info!(
            "{} archives ({} copied, {} current), {} documents",
            report.artifact_count(),
            report.copied(),
            report.skipped(),
            report.documents_written()
        );
    }
}
