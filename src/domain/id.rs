//! Deterministic identifiers for sources and items.
//!
//! Every id is a plain string composition around [`hash`], so re-ingesting
//! the same feed always reproduces the same ids.

use sha2::{Digest, Sha256};

use crate::domain::SourceType;

/// Stable hex digest of `input`.
pub fn hash(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// `<type>-<user_id>-<column_id>-<hash(link)>`
pub fn source_id(source_type: SourceType, user_id: &str, column_id: &str, link: &str) -> String {
    format!("{}-{}-{}-{}", source_type, user_id, column_id, hash(link))
}

/// `<source_id>-<hash(identifier)>`, where the identifier is the entry's
/// native id or its primary link.
pub fn item_id(source_id: &str, identifier: &str) -> String {
    format!("{}-{}", source_id, hash(identifier))
}
