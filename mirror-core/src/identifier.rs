//! Archive name parsing.
//!
//! Release archives are named `{package}_{version}_{platform}_{arch}.zip`.
//! Anything that does not fit is not an error: it is simply not an archive
//! we mirror, so a mixed directory or bucket can be fed in as-is.

use mirror_types::{ArtifactIdentifier, ArtifactSource, ARCHIVE_EXTENSION};

/// The four components of an archive name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameParts<'a> {
    /// Package name.
    pub package: &'a str,
    /// Version.
    pub version: &'a str,
    /// Platform (OS).
    pub platform: &'a str,
    /// Architecture. May contain underscores (`x86_64`).
    pub arch: &'a str,
}

/// Split an archive file name into its four components.
///
/// Returns `None` unless the name ends in `.zip` and the remainder splits on
/// `_` into four non-empty parts. Only the first three underscores separate;
/// the rest belong to the architecture.
pub fn parse_file_name(file_name: &str) -> Option<NameParts<'_>> {
    let stem = file_name.strip_suffix(ARCHIVE_EXTENSION)?;
    let mut parts = stem.splitn(4, '_');
    let package = parts.next()?;
    let version = parts.next()?;
    let platform = parts.next()?;
    let arch = parts.next()?;

    if [package, version, platform, arch].iter().any(|p| p.is_empty()) {
        return None;
    }

    Some(NameParts {
        package,
        version,
        platform,
        arch,
    })
}

/// Parse an archive source into an identifier, or `None` if it is not one.
pub fn parse_identifier(source: ArtifactSource) -> Option<ArtifactIdentifier> {
    let file_name = match &source {
        ArtifactSource::Local(path) => path.file_name()?.to_str()?.to_string(),
        ArtifactSource::Remote { key, .. } => key.rsplit('/').next()?.to_string(),
    };

    let parts = parse_file_name(&file_name)?;
    Some(ArtifactIdentifier {
        package: parts.package.to_string(),
        version: parts.version.to_string(),
        platform: parts.platform.to_string(),
        arch: parts.arch.to_string(),
        file_name,
        source,
    })
}
