//! State → district lookup table.

use indexmap::IndexMap;
use serde_json::Value;

static BUILTIN_REGIONS_JSON: &str = include_str!("../regions/india.json");

#[derive(Debug, thiserror::Error)]
pub enum RegionMapError {
    #[error("region map is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("region map must be an object of state name to list of district names: {0}")]
    InvalidShape(#[source] serde_json::Error),
}

/// Ordered mapping from state name to its districts.
///
/// Both levels keep the order of the source document; that order is the
/// order options are shown in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionMap {
    states: IndexMap<String, Vec<String>>,
}

impl RegionMap {
    /// The map embedded at build time from `regions/india.json`.
    pub fn builtin() -> Self {
        match Self::from_json(BUILTIN_REGIONS_JSON) {
            Ok(map) => map,
            Err(error) => {
                log::error!("built-in region map is broken: {error}");
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, RegionMapError> {
        let value: Value = serde_json::from_str(json).map_err(RegionMapError::InvalidJson)?;
        Self::from_value(value)
    }

    /// Key order of `value` becomes state order. Relies on serde_json's
    /// `preserve_order` feature.
    pub fn from_value(value: Value) -> Result<Self, RegionMapError> {
        let states = serde_json::from_value(value).map_err(RegionMapError::InvalidShape)?;
        Ok(Self { states })
    }

    /// Districts of `state`, empty when the state is unknown.
    pub fn districts(&self, state: &str) -> &[String] {
        self.states.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for RegionMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_map_keeps_document_order() {
        let map = RegionMap::builtin();
        let states: Vec<_> = map.states().collect();
        assert_eq!(
            states,
            [
                "Andhra Pradesh",
                "Karnataka",
                "Jharkhand",
                "Maharashtra",
                "Tamil Nadu",
                "Uttar Pradesh",
                "Delhi",
            ]
        );
        let delhi = map.districts("Delhi");
        assert_eq!(delhi.len(), 11);
        assert_eq!(delhi.first().map(String::as_str), Some("Central Delhi"));
        assert_eq!(delhi.last().map(String::as_str), Some("West Delhi"));
        assert_eq!(map.districts("Uttar Pradesh").len(), 74);
    }

    #[test]
    fn test_unknown_state_has_no_districts() {
        let map = RegionMap::builtin();
        assert!(map.districts("Atlantis").is_empty());
        assert!(map.districts("").is_empty());
    }

    #[test]
    fn test_from_json_preserves_order() {
        let map = RegionMap::from_json(r#"{"Zeta": ["b", "a"], "Alpha": []}"#).unwrap();
        assert_eq!(map.states().collect::<Vec<_>>(), ["Zeta", "Alpha"]);
        assert_eq!(map.districts("Zeta"), ["b", "a"]);
        assert!(map.districts("Alpha").is_empty());
    }

    #[test]
    fn test_from_value_preserves_order() {
        let value = serde_json::json!({"Zeta": ["b"], "Mid": ["x", "a"], "Alpha": []});
        let map = RegionMap::from_value(value).unwrap();
        assert_eq!(map.states().collect::<Vec<_>>(), ["Zeta", "Mid", "Alpha"]);
        assert_eq!(map.districts("Mid"), ["x", "a"]);
    }

    #[test]
    fn test_parsed_value_preserves_order() {
        let value: Value = serde_json::from_str(r#"{"Zeta": ["b"], "Alpha": []}"#).unwrap();
        let map = RegionMap::from_value(value).unwrap();
        assert_eq!(map.states().collect::<Vec<_>>(), ["Zeta", "Alpha"]);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            RegionMap::from_json("{not json"),
            Err(RegionMapError::InvalidJson(_))
        ));
        assert!(matches!(
            RegionMap::from_json(r#"{"Goa": "Panaji"}"#),
            Err(RegionMapError::InvalidShape(_))
        ));
        assert!(matches!(
            RegionMap::from_json("[]"),
            Err(RegionMapError::InvalidShape(_))
        ));
    }
}
