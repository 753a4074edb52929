//! # Normalizer
//!
//! Turns a raw record of either source shape into a canonical [`Country`].
//!
//! ```text
//! Value ──▶ RawCountry::from_value ──┬─▶ Api(ApiCountry)       ──▶ from_api    ──┐
//!                                    └─▶ Legacy(LegacyCountry) ──▶ from_legacy ──┴─▶ Country
//! ```
//!
//! Both mapping functions are total; `null` is the only input that yields
//! no country.

use serde_json::Value;

use crate::core::country::Country;
use crate::data::raw::{ApiCountry, LegacyCountry, LegacyLanguage, RawCountry};

/// Normalizes one raw record. Returns `None` only for `null`.
pub fn normalize(raw: Value) -> Option<Country> {
    RawCountry::from_value(raw).map(normalize_raw)
}

/// Normalizes a whole payload, dropping `null` records and keeping order.
pub fn normalize_all(records: Vec<Value>) -> Vec<Country> {
    records.into_iter().filter_map(normalize).collect()
}

pub fn normalize_raw(raw: RawCountry) -> Country {
    match raw {
        RawCountry::Api(api) => from_api(api),
        RawCountry::Legacy(legacy) => from_legacy(legacy),
    }
}

fn from_api(raw: ApiCountry) -> Country {
    let name = raw.name.unwrap_or_default();
    let native_name = name
        .native_name
        .first()
        .and_then(|native| {
            non_empty(native.common.clone()).or_else(|| non_empty(native.official.clone()))
        })
        .unwrap_or_default();
    let flags = raw.flags.unwrap_or_default();

    Country {
        code: raw.cca3.unwrap_or_default(),
        name: name.common.unwrap_or_default(),
        native_name,
        population: raw.population.0,
        region: raw.region.unwrap_or_default(),
        subregion: raw.subregion.unwrap_or_default(),
        capital: raw.capital.first().cloned().unwrap_or_default(),
        tld: raw.tld.into_vec(),
        currencies: raw
            .currencies
            .values()
            .filter_map(|currency| non_empty(currency.name.clone()))
            .collect(),
        languages: raw
            .languages
            .values()
            .filter(|language| !language.is_empty())
            .cloned()
            .collect(),
        borders: raw.borders.into_vec(),
        flag: flags.png.unwrap_or_default(),
        flag_alt: flags.alt.unwrap_or_default(),
    }
}

fn from_legacy(raw: LegacyCountry) -> Country {
    let flag = raw
        .flags
        .and_then(|flags| non_empty(flags.png))
        .or_else(|| non_empty(raw.flag))
        .unwrap_or_default();

    Country {
        code: raw.alpha3_code.unwrap_or_default(),
        name: raw.name.unwrap_or_default(),
        native_name: raw.native_name.unwrap_or_default(),
        population: raw.population.0,
        region: raw.region.unwrap_or_default(),
        subregion: raw.subregion.unwrap_or_default(),
        capital: raw.capital.unwrap_or_default(),
        tld: raw.top_level_domain.into_vec(),
        currencies: raw
            .currencies
            .into_vec()
            .into_iter()
            .filter_map(|currency| non_empty(currency.name))
            .collect(),
        languages: raw
            .languages
            .into_vec()
            .into_iter()
            .filter_map(|language| match language {
                LegacyLanguage::Named(name) => non_empty(name),
                LegacyLanguage::Bare(name) => non_empty(Some(name)),
                LegacyLanguage::Other => None,
            })
            .collect(),
        borders: raw.borders.into_vec(),
        flag,
        flag_alt: String::new(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
