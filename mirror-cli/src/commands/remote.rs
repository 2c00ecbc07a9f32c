//! Mirror archives from another bucket.

use anyhow::Result;
use mirror_core::MirrorLayout;
use mirror_types::ObjectLocation;

use crate::commands::{build_mirror, summarize};
use crate::config::Config;
use crate::console::ConsoleProgress;

/// Run the remote command.
pub async fn run(config: &Config, source: ObjectLocation, destination: ObjectLocation) -> Result<()> {
    let mirror = build_mirror(config, destination, MirrorLayout::PerVersion);
    let report = mirror
        .mirror_remote(&source, &mut ConsoleProgress::stdout())
        .await?;
    summarize(&report);
    Ok(())
}
