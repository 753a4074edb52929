//! # Filter Engine
//!
//! Produces the visible subset of the canonical list for a search term and
//! an optional region.
//!
//! A [`Query`] can only be built from a term that passes validation, so a
//! too-long search never reaches the matching stage: callers get
//! [`FilterError::TermTooLong`] and keep whatever they rendered last.

use std::fmt;

use crate::core::country::Country;

/// Longest accepted search term, in characters, after trimming.
pub const MAX_TERM_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    TermTooLong { len: usize },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::TermTooLong { .. } => write!(f, "Search is too long."),
        }
    }
}

impl std::error::Error for FilterError {}

/// A validated search: lower-cased, trimmed term plus an exact region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    term: String,
    region: String,
}

impl Query {
    /// Prepares raw search input. An empty `region` means all regions.
    pub fn new(input: &str, region: &str) -> Result<Self, FilterError> {
        let term = input.trim().to_lowercase();
        let len = term.chars().count();
        if len > MAX_TERM_LEN {
            return Err(FilterError::TermTooLong { len });
        }
        Ok(Self {
            term,
            region: region.to_string(),
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn matches(&self, country: &Country) -> bool {
        let name_matches = country.name.to_lowercase().contains(&self.term);
        let region_matches = self.region.is_empty() || country.region == self.region;
        name_matches && region_matches
    }
}

/// Stable filter: the result is a subsequence of `countries`.
pub fn filter<'a>(countries: &'a [Country], query: &Query) -> Vec<&'a Country> {
    countries.iter().filter(|c| query.matches(c)).collect()
}

/// Validates `input` and filters with [`Query::matches`].
pub fn search<'a>(
    countries: &'a [Country],
    input: &str,
    region: &str,
) -> Result<Vec<&'a Country>, FilterError> {
    search_with(countries, input, region, Query::matches)
}

/// Validates `input`, then keeps the countries `predicate` accepts.
/// The predicate is never called when validation fails.
pub fn search_with<'a, F>(
    countries: &'a [Country],
    input: &str,
    region: &str,
    mut predicate: F,
) -> Result<Vec<&'a Country>, FilterError>
where
    F: FnMut(&Query, &Country) -> bool,
{
    let query = Query::new(input, region)?;
    Ok(countries.iter().filter(|c| predicate(&query, *c)).collect())
}
