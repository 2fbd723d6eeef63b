//! Raw request parameters
//!
//! The routing layer hands the engine a flat map of optional string values.
//! Blank values are indistinguishable from omitted ones.

use std::collections::{BTreeMap, HashMap};

/// Flat map of raw, untrusted request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    values: BTreeMap<String, String>,
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Parse a `key=value` pair, as accepted on the command line
    pub fn parse_pair(pair: &str) -> Option<(String, String)> {
        let (key, value) = pair.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), value.trim().to_string()))
    }

    /// Trimmed value, or `None` when absent or blank
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Integer value; unparseable input counts as absent
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.trim().is_empty())
    }
}

impl From<HashMap<String, String>> for RawParams {
    fn from(map: HashMap<String, String>) -> Self {
        Self {
            values: map.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_absent() {
        let params = RawParams::new().with("store_id", "  ").with("channel_id", "");
        assert_eq!(params.get("store_id"), None);
        assert_eq!(params.get("channel_id"), None);
        assert!(params.is_empty());
    }

    #[test]
    fn test_unparseable_integer_is_absent() {
        let params = RawParams::new().with("store_id", "abc").with("channel_id", " 7 ");
        assert_eq!(params.get_i64("store_id"), None);
        assert_eq!(params.get_i64("channel_id"), Some(7));
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            RawParams::parse_pair("start_date=2024-01-01"),
            Some(("start_date".to_string(), "2024-01-01".to_string()))
        );
        assert_eq!(
            RawParams::parse_pair("status="),
            Some(("status".to_string(), String::new()))
        );
        assert_eq!(RawParams::parse_pair("=1"), None);
        assert_eq!(RawParams::parse_pair("novalue"), None);
    }
}
