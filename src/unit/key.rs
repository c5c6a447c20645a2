use std::{borrow::Borrow, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// Canonical identity of a sub-barangay unit, e.g. `"Purok 5, Upper Jasaan"`.
///
/// Keys are compared by exact string equality. The text is shared, so clones
/// are cheap and keys can be handed to every marker of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitKey(Arc<str>);

impl UnitKey {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Build a key from the purok and barangay stored on an address record.
    pub fn from_parts(purok: &str, barangay: &str) -> Self {
        Self::new(format!("{}, {}", purok.trim(), barangay.trim()))
    }

    #[inline] pub fn as_str(&self) -> &str { &self.0 }

    #[inline] pub fn is_empty(&self) -> bool { self.0.trim().is_empty() }
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for UnitKey {
    fn borrow(&self) -> &str { &self.0 }
}

impl From<&str> for UnitKey {
    fn from(key: &str) -> Self { Self::new(key) }
}

impl From<String> for UnitKey {
    fn from(key: String) -> Self { Self::new(key) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_joins_purok_and_barangay() {
        let key = UnitKey::from_parts(" Purok 5 ", "Upper Jasaan ");
        assert_eq!(key.as_str(), "Purok 5, Upper Jasaan");
    }

    #[test]
    fn equality_is_exact() {
        assert_eq!(UnitKey::from("Purok 1, Lower Jasaan"), UnitKey::from("Purok 1, Lower Jasaan"));
        assert_ne!(UnitKey::from("Purok 1, Lower Jasaan"), UnitKey::from("purok 1, lower jasaan"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let key = UnitKey::from("Purok 2, Upper Jasaan");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"Purok 2, Upper Jasaan\"");
        let back: UnitKey = serde_json::from_str("\"Purok 2, Upper Jasaan\"").unwrap();
        assert_eq!(back, key);
    }
}
