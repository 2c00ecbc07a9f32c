//! Object store locations.

use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// A bucket plus a key prefix inside it.
///
/// Parsed from the `bucket[/prefix]` form used on the command line: the first
/// `/` separates the bucket from the prefix, which may itself contain slashes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectLocation {
    /// Bucket name.
    pub bucket: String,
    /// Raw prefix as given (may be empty, may lack a trailing slash).
    pub prefix: String,
}

impl ObjectLocation {
    /// Create a location from its parts.
    pub fn new(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    /// Parse a `bucket[/prefix]` string.
    pub fn parse(value: &str) -> Result<Self, TypesError> {
        let (bucket, prefix) = match value.split_once('/') {
            Some((bucket, prefix)) => (bucket, prefix),
            None => (value, ""),
        };
        if bucket.is_empty() {
            return Err(TypesError::InvalidLocation(value.to_string()));
        }
        Ok(Self::new(bucket, prefix))
    }

    /// The prefix as a directory: empty, or ending in exactly one `/`.
    pub fn key_prefix(&self) -> String {
        if self.prefix.is_empty() || self.prefix.ends_with('/') {
            self.prefix.clone()
        } else {
            format!("{}/", self.prefix)
        }
    }

    /// Full key for a path relative to this location's prefix.
    pub fn key(&self, relative: &str) -> String {
        format!("{}{}", self.key_prefix(), relative)
    }
}

impl FromStr for ObjectLocation {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            write!(f, "{}", self.bucket)
        } else {
            write!(f, "{}/{}", self.bucket, self.prefix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bucket_and_prefix() {
        let loc = ObjectLocation::parse("my-mirror/registry.terraform.io/hashicorp/aws/").unwrap();
        assert_eq!(loc.bucket, "my-mirror");
        assert_eq!(loc.prefix, "registry.terraform.io/hashicorp/aws/");
    }

    #[test]
    fn parse_bucket_only() {
        let loc = ObjectLocation::parse("releases").unwrap();
        assert_eq!(loc.bucket, "releases");
        assert_eq!(loc.prefix, "");
        assert_eq!(loc.key("index.json"), "index.json");
    }

    #[test]
    fn parse_empty_bucket_fails() {
        assert!(ObjectLocation::parse("").is_err());
        assert!(ObjectLocation::parse("/prefix").is_err());
    }

    #[test]
    fn key_prefix_gets_trailing_slash() {
        let loc = ObjectLocation::parse("b/registry.terraform.io/hashicorp/aws").unwrap();
        assert_eq!(loc.key_prefix(), "registry.terraform.io/hashicorp/aws/");
        assert_eq!(
            loc.key("3.55.0.json"),
            "registry.terraform.io/hashicorp/aws/3.55.0.json"
        );
    }

    #[test]
    fn display_roundtrips_input() {
        let loc: ObjectLocation = "b/some/prefix".parse().unwrap();
        assert_eq!(loc.to_string(), "b/some/prefix");
        let loc: ObjectLocation = "b".parse().unwrap();
        assert_eq!(loc.to_string(), "b");
    }
}
