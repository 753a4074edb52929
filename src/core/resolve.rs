//! # Selection Resolver
//!
//! Maps country codes back to canonical records. All comparisons go
//! through [`Country::has_code`], so they are case-insensitive and never
//! match a country without a code.

use crate::core::country::{BorderLink, Country};

/// Finds the country with `code`. `None` for an empty code or no match.
pub fn resolve_by_code<'a>(countries: &'a [Country], code: &str) -> Option<&'a Country> {
    if code.is_empty() {
        return None;
    }
    countries.iter().find(|c| c.has_code(code))
}

/// Pairs each border code with a display name, in input order.
///
/// Codes that resolve to nothing are labelled with the code itself so they
/// still render as a link. Duplicates are kept.
pub fn resolve_borders(countries: &[Country], border_codes: &[String]) -> Vec<BorderLink> {
    border_codes
        .iter()
        .map(|code| BorderLink {
            code: code.clone(),
            name: resolve_by_code(countries, code)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| code.clone()),
        })
        .collect()
}
