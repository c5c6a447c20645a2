use ahash::AHashMap;
use serde_json::Value;

use crate::{config::MapConfig, unit::UnitKey};

/// Loosely-typed metadata attached to a boundary feature.
pub type Properties = serde_json::Map<String, Value>;

/// Outcome of resolving a raw label to a unit key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The label matched an alias or a known key.
    Canonical(UnitKey),
    /// Nothing matched; carries the raw label verbatim.
    Unresolved(String),
}

impl Resolution {
    #[inline] pub fn is_resolved(&self) -> bool { matches!(self, Self::Canonical(_)) }

    /// The canonical key, if the label resolved.
    pub fn key(&self) -> Option<&UnitKey> {
        match self {
            Self::Canonical(key) => Some(key),
            Self::Unresolved(_) => None,
        }
    }

    /// A key to index or display by. Unresolved labels become a key of their
    /// own raw text so they still show up as "unmapped" units.
    pub fn into_key(self) -> UnitKey {
        match self {
            Self::Canonical(key) => key,
            Self::Unresolved(raw) => UnitKey::from(raw),
        }
    }
}

/// One short form that may appear inside a raw label.
#[derive(Debug, Clone)]
struct Alias {
    folded: String, // lowercase short form, for substring matching
    key: UnitKey,
}

/// Maps raw labels and property bags to canonical unit keys.
///
/// Resolution order, first match wins:
/// 1. the trimmed label equals an alias short form or a known key;
/// 2. the lowercased label contains an alias short form (or a known key),
///    tried longest short form first, ties in configuration order;
/// 3. otherwise the label is returned as [`Resolution::Unresolved`].
///
/// Known keys act as aliases of themselves. Trying longer short forms first
/// keeps `"Purok 1"` from capturing a label such as `"Purok 10"`.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    exact: AHashMap<String, UnitKey>,
    fuzzy: Vec<Alias>,
    label_fields: Vec<String>,
}

impl Resolver {
    /// Build a resolver from `(short form, canonical key)` pairs and the set
    /// of known keys. Earlier pairs take precedence over later duplicates.
    pub fn new<A, K>(aliases: A, known_keys: K) -> Self
    where
        A: IntoIterator<Item = (String, UnitKey)>,
        K: IntoIterator<Item = UnitKey>,
    {
        let mut exact = AHashMap::new();
        let mut fuzzy = Vec::new();

        let pairs = known_keys.into_iter()
            .map(|key| (key.as_str().to_owned(), key))
            .collect::<Vec<_>>();

        // Aliases first so configuration order is preserved among them; known
        // keys are appended and only fill gaps.
        for (short, key) in aliases.into_iter().chain(pairs) {
            let short = short.trim().to_owned();
            if short.is_empty() || exact.contains_key(&short) { continue }
            fuzzy.push(Alias { folded: short.to_lowercase(), key: key.clone() });
            exact.insert(short, key);
        }

        // Stable sort: longest short form first, configuration order otherwise.
        fuzzy.sort_by(|a, b| b.folded.len().cmp(&a.folded.len()));

        Self { exact, fuzzy, label_fields: Vec::new() }
    }

    /// Build a resolver from the unit enumeration and label fields of a config.
    pub fn from_config(config: &MapConfig) -> Self {
        let aliases = config.units.iter()
            .flat_map(|unit| unit.aliases.iter().map(|alias| (alias.clone(), unit.key.clone())))
            .collect::<Vec<_>>();
        let known = config.units.iter().map(|unit| unit.key.clone());

        Self::new(aliases, known).with_label_fields(config.label_fields.iter().cloned())
    }

    /// Set the property names consulted by [`Resolver::label_for`], in priority order.
    pub fn with_label_fields(mut self, fields: impl IntoIterator<Item = String>) -> Self {
        self.label_fields = fields.into_iter().collect();
        self
    }

    #[inline] pub fn label_fields(&self) -> &[String] { &self.label_fields }

    /// Resolve a raw label. Never fails; see the type-level docs for the order.
    pub fn resolve(&self, raw: &str) -> Resolution {
        let trimmed = raw.trim();
        if let Some(key) = self.exact.get(trimmed) {
            return Resolution::Canonical(key.clone())
        }

        if !trimmed.is_empty() {
            let folded = trimmed.to_lowercase();
            if let Some(alias) = self.fuzzy.iter().find(|alias| folded.contains(&alias.folded)) {
                return Resolution::Canonical(alias.key.clone())
            }
        }

        Resolution::Unresolved(raw.to_owned())
    }

    /// Pick the label out of a property bag: the first candidate field holding
    /// a non-empty string or a number.
    pub fn label_for(&self, properties: &Properties) -> Option<String> {
        self.label_fields.iter()
            .filter_map(|field| properties.get(field))
            .find_map(|value| match value {
                Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    /// Resolve the label found in a property bag, or `None` when no candidate
    /// field carries one.
    pub fn resolve_properties(&self, properties: &Properties) -> Option<Resolution> {
        self.label_for(properties).map(|label| self.resolve(&label))
    }
}
