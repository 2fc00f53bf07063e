//! Ordered payment parameters and their canonical byte encoding.
//!
//! The canonical stream is the exact input of the signature, so encoding
//! must be deterministic: input order is preserved, nothing is escaped,
//! sorted, trimmed or deduplicated, and empty values are skipped.

use crate::domain::constants::{CANONICAL_KEY_VALUE_SEPARATOR, CANONICAL_LINE_TERMINATOR};
use std::fmt;

/// Ordered sequence of `(name, value)` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<(String, String)>,
}

impl ParameterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair; the value is coerced to its string form here.
    pub fn push(&mut self, name: impl Into<String>, value: impl ToString) {
        self.entries.push((name.into(), value.to_string()));
    }

    /// Builder-style [`push`](Self::push)
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.push(name, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as `name=value\n` per pair with a non-empty value.
    #[must_use]
    pub fn to_canonical_bytes(&self) -> CanonicalBytes {
        let mut out = String::new();
        for (name, value) in self.iter().filter(|(_, value)| !value.is_empty()) {
            out.push_str(name);
            out.push(CANONICAL_KEY_VALUE_SEPARATOR);
            out.push_str(value);
            out.push(CANONICAL_LINE_TERMINATOR);
        }
        CanonicalBytes(out.into_bytes())
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (name, value) in iter {
            set.push(name, value);
        }
        set
    }
}

/// The byte stream that gets signed
#[derive(Clone, PartialEq, Eq)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Payment parameters may carry customer data
impl fmt::Debug for CanonicalBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalBytes(len={})", self.0.len())
    }
}
