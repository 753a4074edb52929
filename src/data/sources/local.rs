//! Bundled local data file.
//!
//! The file may hold API-shaped or legacy-shaped records; shape detection
//! is per record, so this source never looks inside them.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use log::{debug, info};
use serde_json::Value;

use crate::data::source::{CountrySource, SourceError, parse_records};

pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CountrySource for LocalFileSource {
    fn name(&self) -> &str {
        "local"
    }

    async fn fetch(&self) -> Result<Vec<Value>, SourceError> {
        info!("Reading local country data from {}", self.path.display());

        let body = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SourceError::Missing(self.path.display().to_string())
            } else {
                SourceError::Io(e.to_string())
            }
        })?;

        let records = parse_records(&body)?;
        debug!("Local data file holds {} records", records.len());
        Ok(records)
    }
}
