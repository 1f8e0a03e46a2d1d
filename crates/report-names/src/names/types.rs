use std::borrow::Cow;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::policy::UnknownKeyPolicy;
use crate::error::NameError;

/// Which identifier space a table covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Model,
    Task,
}

impl Namespace {
    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Model => "model",
            Namespace::Task => "task",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable identifier -> display name table.
///
/// Entries are kept in declaration order; lookups scan linearly, which is
/// cheaper than hashing for tables of this size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameTable {
    namespace: Namespace,
    entries: &'static [(&'static str, &'static str)],
}

impl NameTable {
    pub const fn new(
        namespace: Namespace,
        entries: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self { namespace, entries }
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact-key lookup. Keys are case-sensitive.
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(id, _)| *id == key)
            .map(|(_, name)| *name)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Like [`get`](Self::get), but a miss is an [`NameError::UnknownIdentifier`].
    pub fn lookup(&self, key: &str) -> Result<&'static str, NameError> {
        self.get(key).ok_or_else(|| NameError::UnknownIdentifier {
            namespace: self.namespace,
            key: key.to_string(),
        })
    }

    /// Resolve a label for display, applying `policy` when `key` is unmapped.
    pub fn display<'a>(
        &self,
        key: &'a str,
        policy: &'a UnknownKeyPolicy,
    ) -> Result<Cow<'a, str>, NameError> {
        if let Some(name) = self.get(key) {
            return Ok(Cow::Borrowed(name));
        }
        match policy {
            UnknownKeyPolicy::PassThrough => {
                tracing::debug!(namespace = %self.namespace, key, "no display name; using identifier");
                Ok(Cow::Borrowed(key))
            }
            UnknownKeyPolicy::Fallback(label) => {
                tracing::debug!(namespace = %self.namespace, key, label = %label, "no display name; using placeholder");
                Ok(Cow::Borrowed(label.as_str()))
            }
            UnknownKeyPolicy::Error => self.lookup(key).map(Cow::Borrowed),
        }
    }

    /// Identifiers in declaration order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = &'static str> + use<> {
        let entries = self.entries;
        entries.iter().map(|(id, _)| *id)
    }

    /// `(identifier, display name)` pairs in declaration order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = (&'static str, &'static str)> + use<> {
        let entries = self.entries;
        entries.iter().copied()
    }
}

/// Serializes as an ordered `{ identifier: display_name }` map.
impl Serialize for NameTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (id, name) in self.entries() {
            map.serialize_entry(id, name)?;
        }
        map.end()
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Const check for table literals: non-empty keys and labels, no repeated key.
pub(crate) const fn entries_are_valid(entries: &[(&str, &str)]) -> bool {
    let mut i = 0;
    while i < entries.len() {
        let (key, name) = entries[i];
        if key.is_empty() || name.is_empty() {
            return false;
        }
        let mut j = i + 1;
        while j < entries.len() {
            if str_eq(key, entries[j].0) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}
