//! # Canonical Country Record
//!
//! The one shape every component past the normalizer works with. Scalars
//! default to empty strings or zero and sequences to empty `Vec`s, so
//! nothing downstream null-checks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// 3-letter code, stored as given. Compare with [`Country::has_code`].
    pub code: String,
    pub name: String,
    pub native_name: String,
    pub population: u64,
    pub region: String,
    pub subregion: String,
    pub capital: String,
    pub tld: Vec<String>,
    pub currencies: Vec<String>,
    pub languages: Vec<String>,
    pub borders: Vec<String>,
    pub flag: String,
    pub flag_alt: String,
}

impl Country {
    /// Case-insensitive code match. A country without a code matches nothing.
    pub fn has_code(&self, code: &str) -> bool {
        !self.code.is_empty() && self.code.eq_ignore_ascii_case(code)
    }
}

/// A border code paired with the name to display for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderLink {
    pub code: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_code_ignores_case() {
        let country = Country {
            code: "USA".to_string(),
            ..Default::default()
        };
        assert!(country.has_code("usa"));
        assert!(country.has_code("UsA"));
        assert!(!country.has_code("US"));
    }

    #[test]
    fn test_empty_code_never_matches() {
        let country = Country::default();
        assert!(!country.has_code(""));
        assert!(!country.has_code("FRA"));
    }
}
