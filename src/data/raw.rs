//! # Raw Payload Schema
//!
//! Country records arrive in one of two shapes:
//!
//! ```text
//! API-shaped (REST Countries v3)        legacy-shaped (flat data.json)
//! ├── name.common / name.nativeName     ├── name: "France"
//! ├── cca3                              ├── alpha3Code
//! ├── capital: ["Paris"]                ├── capital: "Paris"
//! ├── currencies: { EUR: {name} }       ├── currencies: [{name}]
//! ├── languages: { fra: "French" }      ├── languages: [{name}] | ["French"]
//! └── flags: { png, alt }               └── flags.png | flag
//! ```
//!
//! Every field here is optional and decoded leniently: a field holding an
//! unexpected JSON type decodes as absent instead of failing the record.
//! The shape is decided once by [`SourceShape::detect`]; nothing past the
//! normalizer looks at these types.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Which raw schema a record follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceShape {
    Api,
    Legacy,
}

impl SourceShape {
    /// API-shaped iff `name.common` is a non-empty string.
    pub fn detect(value: &Value) -> Self {
        match value.pointer("/name/common").and_then(Value::as_str) {
            Some(common) if !common.is_empty() => SourceShape::Api,
            _ => SourceShape::Legacy,
        }
    }
}

/// A raw record tagged with the shape it was decoded as.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCountry {
    Api(ApiCountry),
    Legacy(LegacyCountry),
}

impl RawCountry {
    /// Decodes a raw JSON record. `null` yields `None`; anything else
    /// yields a record, with non-objects decoding as an empty legacy record.
    pub fn from_value(value: Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }
        let raw = match SourceShape::detect(&value) {
            SourceShape::Api => RawCountry::Api(serde_json::from_value(value).unwrap_or_default()),
            SourceShape::Legacy => {
                RawCountry::Legacy(serde_json::from_value(value).unwrap_or_default())
            }
        };
        Some(raw)
    }
}

// ============================================================================
// API-shaped records
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiCountry {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<ApiName>,
    #[serde(deserialize_with = "lenient")]
    pub cca3: Option<String>,
    pub population: Population,
    #[serde(deserialize_with = "lenient")]
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub subregion: Option<String>,
    pub capital: StringList,
    pub tld: StringList,
    pub currencies: Pairs<ApiCurrency>,
    pub languages: Pairs<String>,
    pub borders: StringList,
    #[serde(deserialize_with = "lenient")]
    pub flags: Option<Flags>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiName {
    #[serde(deserialize_with = "lenient")]
    pub common: Option<String>,
    pub native_name: Pairs<NativeName>,
}

/// One `nativeName` entry. Never fails to decode: a malformed entry is
/// empty but still holds its place in the map, so "first" stays the
/// first key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeName {
    pub common: Option<String>,
    pub official: Option<String>,
}

impl<'de> Deserialize<'de> for NativeName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);
        Ok(NativeName {
            common: field("common"),
            official: field("official"),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiCurrency {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Flags {
    #[serde(deserialize_with = "lenient")]
    pub png: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub alt: Option<String>,
}

// ============================================================================
// Legacy-shaped records
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyCountry {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub alpha3_code: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub native_name: Option<String>,
    pub population: Population,
    #[serde(deserialize_with = "lenient")]
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub subregion: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub capital: Option<String>,
    pub top_level_domain: StringList,
    pub currencies: List<LegacyCurrency>,
    pub languages: List<LegacyLanguage>,
    pub borders: StringList,
    #[serde(deserialize_with = "lenient")]
    pub flags: Option<Flags>,
    #[serde(deserialize_with = "lenient")]
    pub flag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LegacyCurrency {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// Legacy language entries are either `{ "name": ... }` objects or bare
/// strings. Anything else decodes as [`LegacyLanguage::Other`].
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyLanguage {
    Named(Option<String>),
    Bare(String),
    Other,
}

impl<'de> Deserialize<'de> for LegacyLanguage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let language = match Value::deserialize(deserializer)? {
            Value::String(s) => LegacyLanguage::Bare(s),
            Value::Object(map) => {
                LegacyLanguage::Named(map.get("name").and_then(Value::as_str).map(str::to_owned))
            }
            _ => LegacyLanguage::Other,
        };
        Ok(language)
    }
}

// ============================================================================
// Shared building blocks
// ============================================================================

/// Decodes `T`, falling back to `T::default()` when the JSON value has the
/// wrong type. Missing fields are covered by `#[serde(default)]`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// A JSON object decoded as key/value pairs in source order.
///
/// Entries whose value does not decode as `T` are skipped, so a `T` that
/// must keep every key has to decode infallibly. A non-object decodes as
/// empty. Order survives the trip through [`Value`] because
/// `serde_json` is built with `preserve_order`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pairs<T>(pub Vec<(String, T)>);

impl<T> Default for Pairs<T> {
    fn default() -> Self {
        Pairs(Vec::new())
    }
}

impl<T> Pairs<T> {
    pub fn first(&self) -> Option<&T> {
        self.0.first().map(|(_, v)| v)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter().map(|(_, v)| v)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Pairs<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = match Value::deserialize(deserializer)? {
            Value::Object(map) => map
                .into_iter()
                .filter_map(|(key, value)| serde_json::from_value(value).ok().map(|v| (key, v)))
                .collect(),
            _ => Vec::new(),
        };
        Ok(Pairs(pairs))
    }
}

/// A JSON array decoded element by element. Entries that do not decode as
/// `T` are skipped; a non-array decodes as empty.
#[derive(Debug, Clone, PartialEq)]
pub struct List<T>(pub Vec<T>);

/// The common case: an array of strings (`capital`, `tld`, `borders`).
pub type StringList = List<String>;

impl<T> Default for List<T> {
    fn default() -> Self {
        List(Vec::new())
    }
}

impl<T> List<T> {
    pub fn first(&self) -> Option<&T> {
        self.0.first()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for List<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|value| serde_json::from_value(value).ok())
                .collect(),
            _ => Vec::new(),
        };
        Ok(List(items))
    }
}

/// Population as a non-negative integer. Negative, non-numeric and absent
/// values decode as 0; fractions truncate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Population(pub u64);

impl<'de> Deserialize<'de> for Population {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let count = match value.as_u64() {
            Some(n) => n,
            None => value
                .as_f64()
                .filter(|n| n.is_finite() && *n > 0.0)
                .map(|n| n.trunc() as u64)
                .unwrap_or(0),
        };
        Ok(Population(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_api_shape() {
        let value = json!({"name": {"common": "France"}});
        assert_eq!(SourceShape::detect(&value), SourceShape::Api);
    }

    #[test]
    fn test_detect_legacy_shape() {
        assert_eq!(SourceShape::detect(&json!({"name": "France"})), SourceShape::Legacy);
        assert_eq!(SourceShape::detect(&json!({"name": {"official": "X"}})), SourceShape::Legacy);
        assert_eq!(SourceShape::detect(&json!(42)), SourceShape::Legacy);
    }

    #[test]
    fn test_empty_common_name_is_legacy() {
        let value = json!({"name": {"common": ""}, "alpha3Code": "ABC"});
        assert_eq!(SourceShape::detect(&value), SourceShape::Legacy);
    }

    #[test]
    fn test_from_value_null_is_none() {
        assert!(RawCountry::from_value(Value::Null).is_none());
    }

    #[test]
    fn test_non_object_decodes_as_empty_legacy() {
        let raw = RawCountry::from_value(json!("just a string")).unwrap();
        assert_eq!(raw, RawCountry::Legacy(LegacyCountry::default()));
    }

    #[test]
    fn test_pairs_preserve_source_order() {
        let value = json!({"zul": "Zulu", "afr": "Afrikaans", "eng": "English"});
        let pairs: Pairs<String> = serde_json::from_value(value).unwrap();
        let keys: Vec<&str> = pairs.0.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zul", "afr", "eng"]);
    }

    #[test]
    fn test_pairs_skip_entries_of_wrong_type() {
        let value = json!({"a": "Alpha", "b": 7, "c": "Gamma"});
        let pairs: Pairs<String> = serde_json::from_value(value).unwrap();
        let values: Vec<&String> = pairs.values().collect();
        assert_eq!(values, vec!["Alpha", "Gamma"]);
    }

    #[test]
    fn test_malformed_native_name_keeps_its_position() {
        let value = json!({"aaa": "bogus", "bbb": {"common": "Second"}});
        let pairs: Pairs<NativeName> = serde_json::from_value(value).unwrap();
        assert_eq!(pairs.0.len(), 2);
        assert_eq!(pairs.first(), Some(&NativeName::default()));
    }

    #[test]
    fn test_list_skips_undecodable_entries() {
        let currencies: List<LegacyCurrency> =
            serde_json::from_value(json!([{"name": "Euro"}, "EUR", {"code": "USD"}])).unwrap();
        assert_eq!(currencies.0.len(), 2);
        assert_eq!(currencies.0[0].name.as_deref(), Some("Euro"));
        assert_eq!(currencies.0[1].name, None);
    }

    #[test]
    fn test_string_list_skips_non_strings() {
        let list: StringList = serde_json::from_value(json!(["FRA", 3, null, "ESP"])).unwrap();
        assert_eq!(list.0, vec!["FRA", "ESP"]);
    }

    #[test]
    fn test_string_list_from_non_array_is_empty() {
        let list: StringList = serde_json::from_value(json!("FRA")).unwrap();
        assert!(list.0.is_empty());
    }

    #[test]
    fn test_population_edge_values() {
        let decode = |v: Value| serde_json::from_value::<Population>(v).unwrap().0;
        assert_eq!(decode(json!(67_391_582)), 67_391_582);
        assert_eq!(decode(json!(-5)), 0);
        assert_eq!(decode(json!(12.9)), 12);
        assert_eq!(decode(json!("many")), 0);
        assert_eq!(decode(Value::Null), 0);
    }

    #[test]
    fn test_wrong_field_type_does_not_fail_record() {
        let value = json!({
            "name": {"common": "Testland"},
            "cca3": 12,
            "region": ["not", "a", "string"],
            "flags": "nope"
        });
        let Some(RawCountry::Api(api)) = RawCountry::from_value(value) else {
            panic!("expected an API-shaped record");
        };
        assert_eq!(api.cca3, None);
        assert_eq!(api.region, None);
        assert_eq!(api.flags, None);
        assert_eq!(api.name.and_then(|n| n.common).as_deref(), Some("Testland"));
    }

    #[test]
    fn test_legacy_language_variants() {
        let langs: Vec<LegacyLanguage> =
            serde_json::from_value(json!([{"name": "French"}, "Breton", 5, {"iso": "x"}])).unwrap();
        assert_eq!(
            langs,
            vec![
                LegacyLanguage::Named(Some("French".to_string())),
                LegacyLanguage::Bare("Breton".to_string()),
                LegacyLanguage::Other,
                LegacyLanguage::Named(None),
            ]
        );
    }
}
