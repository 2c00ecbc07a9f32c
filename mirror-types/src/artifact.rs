//! Release archive identity.

use std::fmt;
use std::path::PathBuf;

/// Where a release archive is read from.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactSource {
    /// A file on the local filesystem.
    Local(PathBuf),
    /// An object in the store.
    Remote {
        /// Bucket holding the object.
        bucket: String,
        /// Full object key.
        key: String,
    },
}

impl fmt::Display for ArtifactSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactSource::Local(path) => write!(f, "{}", path.display()),
            ArtifactSource::Remote { bucket, key } => write!(f, "{}/{}", bucket, key),
        }
    }
}

/// A parsed `{package}_{version}_{platform}_{arch}.zip` release archive.
///
/// Field order matters: the derived ordering compares package, version,
/// platform and architecture first, then file name and source so that two
/// archives with the same tuple still sort deterministically.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactIdentifier {
    /// Package (provider) name, e.g. `terraform-provider-aws`.
    pub package: String,
    /// Version string. Not validated as semver.
    pub version: String,
    /// Operating system, e.g. `linux`.
    pub platform: String,
    /// Architecture, e.g. `amd64` or `x86_64`.
    pub arch: String,
    /// Final path segment of the source, including the extension.
    pub file_name: String,
    /// Where the archive is read from.
    pub source: ArtifactSource,
}

impl ArtifactIdentifier {
    /// The `{platform}_{arch}` key used in version documents.
    pub fn platform_key(&self) -> String {
        format!("{}_{}", self.platform, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(version: &str, platform: &str, source: &str) -> ArtifactIdentifier {
        ArtifactIdentifier {
            package: "pkg".into(),
            version: version.into(),
            platform: platform.into(),
            arch: "amd64".into(),
            file_name: format!("pkg_{}_{}_amd64.zip", version, platform),
            source: ArtifactSource::Local(PathBuf::from(source)),
        }
    }

    #[test]
    fn platform_key_joins_with_underscore() {
        let a = ident("1.0.0", "linux", "a");
        assert_eq!(a.platform_key(), "linux_amd64");
    }

    #[test]
    fn ordering_is_tuple_then_source() {
        let mut v = vec![
            ident("1.0.0", "linux", "b"),
            ident("1.0.0", "darwin", "z"),
            ident("0.9.0", "windows", "a"),
            ident("1.0.0", "linux", "a"),
        ];
        v.sort();
        let order: Vec<(String, String, String)> = v
            .iter()
            .map(|a| (a.version.clone(), a.platform.clone(), a.source.to_string()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("0.9.0".into(), "windows".into(), "a".into()),
                ("1.0.0".into(), "darwin".into(), "z".into()),
                ("1.0.0".into(), "linux".into(), "a".into()),
                ("1.0.0".into(), "linux".into(), "b".into()),
            ]
        );
    }

    #[test]
    fn remote_source_display() {
        let src = ArtifactSource::Remote {
            bucket: "releases".into(),
            key: "aws/3.55.0/x.zip".into(),
        };
        assert_eq!(src.to_string(), "releases/aws/3.55.0/x.zip");
    }
}
