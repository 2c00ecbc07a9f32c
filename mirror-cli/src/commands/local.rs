//! Mirror archives from the local filesystem.

use anyhow::Result;
use mirror_core::MirrorLayout;
use mirror_types::ObjectLocation;
use std::path::PathBuf;

use crate::commands::{build_mirror, summarize};
use crate::config::Config;
use crate::console::ConsoleProgress;

/// Run the local command.
pub async fn run(config: &Config, destination: ObjectLocation, archives: Vec<PathBuf>) -> Result<()> {
    let mirror = build_mirror(config, destination, MirrorLayout::Flat);
    let report = mirror
        .mirror_local(archives, &mut ConsoleProgress::stdout())
        .await?;
    summarize(&report);
    Ok(())
}
