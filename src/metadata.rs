use crate::error::ParseError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The recognized metadata keys. Anything else found next to a
/// discriminator is dropped while parsing.
///
/// Declaration order is the order keys are written back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetadataKey {
    Wikidata,
    Comment,
    Latex,
    Documentation,
    SourceUrl,
}

impl MetadataKey {
    pub const ALL: [MetadataKey; 5] = [
        MetadataKey::Wikidata,
        MetadataKey::Comment,
        MetadataKey::Latex,
        MetadataKey::Documentation,
        MetadataKey::SourceUrl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKey::Wikidata => "wikidata",
            MetadataKey::Comment => "comment",
            MetadataKey::Latex => "latex",
            MetadataKey::Documentation => "documentation",
            MetadataKey::SourceUrl => "sourceUrl",
        }
    }
}

impl FromStr for MetadataKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetadataKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseError::new(format!("Unrecognized metadata key: {}", s), None))
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata attached to an expression node.
///
/// Never empty: every constructor returns `None` instead of an empty map,
/// so "no metadata" has exactly one representation (`Option::None`).
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    entries: BTreeMap<MetadataKey, Value>,
}

impl Metadata {
    pub fn from_entries<I>(entries: I) -> Option<Self>
    where
        I: IntoIterator<Item = (MetadataKey, Value)>,
    {
        let entries: BTreeMap<_, _> = entries.into_iter().collect();
        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    pub fn single(key: MetadataKey, value: impl Into<Value>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key, value.into());
        Self { entries }
    }

    /// Collect the recognized keys of a JSON object, ignoring everything else.
    pub fn from_json_object(object: &Map<String, Value>) -> Option<Self> {
        Self::from_entries(
            MetadataKey::ALL
                .iter()
                .filter_map(|key| object.get(key.as_str()).map(|v| (*key, v.clone()))),
        )
    }

    pub fn get(&self, key: MetadataKey) -> Option<&Value> {
        self.entries.get(&key)
    }

    pub fn contains_key(&self, key: MetadataKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetadataKey, &Value)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// A copy of this map with `key` set to `value`; `self` is left as is.
    pub fn with(&self, key: MetadataKey, value: impl Into<Value>) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(key, value.into());
        Self { entries }
    }

    pub(crate) fn write_into(&self, object: &mut Map<String, Value>) {
        for (key, value) in &self.entries {
            object.insert(key.as_str().to_string(), value.clone());
        }
    }
}
