//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::Theme;
use crate::core::country::Country;
use crate::core::state::App;
use crate::data::{CountrySource, SourceError};

/// A minimal country with a code, name and region.
pub fn country(code: &str, name: &str, region: &str) -> Country {
    Country {
        code: code.to_string(),
        name: name.to_string(),
        region: region.to_string(),
        ..Default::default()
    }
}

/// Five countries across three regions, with a few border links.
pub fn sample_countries() -> Vec<Country> {
    let mut germany = country("DEU", "Germany", "Europe");
    germany.population = 83_240_525;
    germany.capital = "Berlin".to_string();
    germany.borders = vec!["FRA".to_string(), "POL".to_string()];

    let mut france = country("FRA", "France", "Europe");
    france.population = 67_391_582;
    france.capital = "Paris".to_string();
    france.borders = vec!["DEU".to_string(), "ESP".to_string()];

    let mut japan = country("JPN", "Japan", "Asia");
    japan.population = 125_836_021;
    japan.capital = "Tokyo".to_string();

    let mut spain = country("ESP", "Spain", "Europe");
    spain.population = 47_351_567;
    spain.capital = "Madrid".to_string();
    spain.borders = vec!["FRA".to_string(), "PRT".to_string()];

    let mut brazil = country("BRA", "Brazil", "Americas");
    brazil.population = 212_559_409;
    brazil.capital = "Brasília".to_string();

    vec![germany, france, japan, spain, brazil]
}

/// Creates a test App holding [`sample_countries`].
pub fn test_app() -> App {
    let mut app = App::new(Theme::Dark);
    app.set_countries(sample_countries());
    app
}

/// A fresh, empty directory under the system temp dir.
pub fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("terra-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// A source that returns a fixed result without any I/O.
pub struct StaticSource {
    result: Result<Vec<Value>, SourceError>,
}

impl StaticSource {
    pub fn ok(records: Vec<Value>) -> Self {
        Self { result: Ok(records) }
    }

    pub fn failing(error: SourceError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl CountrySource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> Result<Vec<Value>, SourceError> {
        self.result.clone()
    }
}
