//! Ordered, case-insensitive HTTP header container.
//!
//! [`HeaderMap`] keeps every header field exactly as it appeared on the
//! wire — original-case name, original order, duplicates included — while
//! indexing values by lowercase name for case-insensitive access.
//!
//! The entry vector is the source of truth; the index maps each lowercase
//! name to the positions of the entries that carry it. Every entry is
//! reachable from exactly one index list, and iteration always yields
//! entries in insertion order.

use std::borrow::Cow;
use std::collections::HashMap;

/// A single header field: original-case name plus value.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderEntry {
    name: String,
    value: String,
}

/// Ordered multi-map of HTTP headers.
///
/// Lookup is case-insensitive; `set` replaces every entry sharing the
/// lowercase key while `append` adds a sibling entry without touching the
/// others.
///
/// # Example
///
/// ```
/// use wireline_core::HeaderMap;
///
/// let mut headers = HeaderMap::new();
/// headers.append("Set-Cookie", "a=1");
/// headers.append("Set-Cookie", "b=2");
///
/// assert_eq!(headers.get("set-cookie").as_deref(), Some("a=1, b=2"));
/// assert_eq!(headers.get_all("SET-COOKIE"), vec!["a=1", "b=2"]);
/// assert_eq!(headers.len(), 1);
/// assert_eq!(headers.total_entries(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    entries: Vec<HeaderEntry>,
    index: HashMap<String, Vec<usize>>,
}

impl HeaderMap {
    /// Create an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header field, preserving the original-case name.
    ///
    /// A repeated name creates a sibling entry under the same lowercase
    /// key; existing entries are untouched.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let key = name.to_ascii_lowercase();
        self.entries.push(HeaderEntry {
            name,
            value: value.into(),
        });
        self.index
            .entry(key)
            .or_default()
            .push(self.entries.len() - 1);
    }

    /// Replace every entry sharing the lowercase key with one new entry.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.remove(&name);
        self.append(name, value);
    }

    /// Remove all entries sharing the lowercase key.
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let key = name.to_ascii_lowercase();
        if !self.index.contains_key(&key) {
            return false;
        }
        self.entries
            .retain(|entry| entry.name.to_ascii_lowercase() != key);
        self.rebuild_index();
        true
    }

    /// Comma-joined values of all entries with this name, in insertion order.
    ///
    /// Returns a borrowed value when the name maps to a single entry.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        let positions = self.index.get(&name.to_ascii_lowercase())?;
        match positions.as_slice() {
            [] => None,
            [single] => Some(Cow::Borrowed(self.entries[*single].value.as_str())),
            many => {
                let joined = many
                    .iter()
                    .map(|&i| self.entries[i].value.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(Cow::Owned(joined))
            }
        }
    }

    /// Per-entry values for this name, in insertion order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.index
            .get(&name.to_ascii_lowercase())
            .map(|positions| {
                positions
                    .iter()
                    .map(|&i| self.entries[i].value.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check whether any entry carries this name (case-insensitive).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&name.to_ascii_lowercase())
    }

    /// Distinct original-case names, in insertion order of first occurrence.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.entries
            .iter()
            .filter(|entry| seen.insert(entry.name.to_ascii_lowercase()))
            .map(|entry| entry.name.as_str())
            .collect()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.value.as_str()))
    }

    /// Mapping from lowercase name to comma-joined values.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.index
            .keys()
            .map(|key| {
                let joined = self.get(key).unwrap_or(Cow::Borrowed("")).into_owned();
                (key.clone(), joined)
            })
            .collect()
    }

    /// Serialise every entry as `Name: Value\r\n` in insertion order,
    /// terminated by an empty line.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.entries.len() * 32 + 2);
        for entry in &self.entries {
            out.extend_from_slice(entry.name.as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(entry.value.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(b"\r\n");
        out
    }

    /// Number of distinct lowercase names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Total number of entries, duplicates included.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (i, entry) in self.entries.iter().enumerate() {
            self.index
                .entry(entry.name.to_ascii_lowercase())
                .or_default()
                .push(i);
        }
    }
}

impl PartialEq for HeaderMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for HeaderMap {}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for HeaderMap {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}
