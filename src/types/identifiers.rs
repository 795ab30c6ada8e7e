use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Reference to an icon, usually a `platform:/plugin/...` URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(String);

impl IconRef {
    pub fn new(uri: impl Into<String>) -> Self {
        IconRef(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque handle to a compiled visibility predicate.
/// The core only stores it; the renderer evaluates it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredicateRef(String);

impl PredicateRef {
    pub fn new(handle: impl Into<String>) -> Self {
        PredicateRef(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Content hash of a descriptor subtree, used as identity when the
/// descriptor carries no id of its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptorFingerprint(String);

impl DescriptorFingerprint {
    pub fn from_digest(hasher: Sha256) -> Self {
        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        DescriptorFingerprint(format!("sha256:{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identity of one merged descriptor subtree: descriptor id (or its
/// fingerprint) plus the raw location it was declared at.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OriginKey {
    pub id: String,
    pub location: String,
}

impl OriginKey {
    pub fn new(id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
        }
    }
}

impl fmt::Display for OriginKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.location)
    }
}
