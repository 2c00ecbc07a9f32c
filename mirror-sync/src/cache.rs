//! Fingerprint cache lookup.
//!
//! The `dirhash` metadata on a mirror object is the cache. Two rules apply,
//! depending on where the archive comes from:
//!
//! - local archives are always fingerprinted (that is cheap), and the copy
//!   is skipped only when the mirror object carries the same fingerprint;
//! - remote archives would have to be downloaded to be fingerprinted, so
//!   any fingerprint already on the mirror object is trusted as-is. If a
//!   release archive is replaced in place, its mirror copy must be deleted
//!   by hand for the change to be picked up.

use mirror_store::ObjectHead;
use mirror_types::FINGERPRINT_METADATA_KEY;

/// The fingerprint recorded on a mirror object, if any.
///
/// An empty value counts as absent.
pub fn cached_fingerprint(head: Option<&ObjectHead>) -> Option<&str> {
    head?
        .metadata
        .get(FINGERPRINT_METADATA_KEY)
        .map(String::as_str)
        .filter(|fp| !fp.is_empty())
}

/// Local rule: the mirror object is current only if it exists and its
/// fingerprint equals the freshly computed one.
pub fn is_current(head: Option<&ObjectHead>, fingerprint: &str) -> bool {
    cached_fingerprint(head) == Some(fingerprint)
}

/// Remote rule: any recorded fingerprint is trusted without recomputation.
pub fn trusted_fingerprint(head: Option<&ObjectHead>) -> Option<String> {
    cached_fingerprint(head).map(str::to_string)
}
