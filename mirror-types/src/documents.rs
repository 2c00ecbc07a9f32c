//! Provider network mirror protocol documents.
//!
//! Both documents use `BTreeMap`s so object keys are always emitted in sorted
//! order, and are encoded with two-space indentation. Anything outside
//! printable ASCII is written as a `\uXXXX` escape, so the output is pure
//! ASCII. Encoding the same document twice yields the same bytes.

use std::collections::BTreeMap;
use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};

use crate::error::TypesError;

/// One platform's entry in a version document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Fingerprints of the archive. Always exactly one entry when written by us.
    pub hashes: Vec<String>,
    /// Archive URL, relative to the version document.
    pub url: String,
}

/// `{version}.json`: every platform archive available for one version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDocument {
    /// Archives keyed by `{platform}_{arch}`.
    pub archives: BTreeMap<String, ArchiveEntry>,
}

/// Per-version placeholder in the index document. Always `{}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {}

/// `index.json`: every version available for a package.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    /// Known versions.
    pub versions: BTreeMap<String, VersionEntry>,
}

impl VersionDocument {
    /// Encode as sorted, two-space indented, ASCII-only JSON.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TypesError> {
        encode(self)
    }
}

impl IndexDocument {
    /// Encode as sorted, two-space indented, ASCII-only JSON.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TypesError> {
        encode(self)
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, TypesError> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, AsciiFormatter::default());
    value.serialize(&mut serializer)?;
    Ok(out)
}

/// Pretty printer that escapes every character above `~` as UTF-16 `\uXXXX`.
#[derive(Default)]
struct AsciiFormatter {
    pretty: PrettyFormatter<'static>,
}

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if c <= '~' {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }
}
