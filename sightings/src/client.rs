use std::env;

use geobox::BoundingBox;
use tracing::debug;

use crate::{FilterExpression, ResultTable, SightingsError};

/// Something that can answer an occurrence query for a bounding box and a
/// set of conjunctive filters. The wire protocol is the implementor's
/// business; the caller only sees a [`ResultTable`].
pub trait OccurrenceSource {
    fn fetch(
        &self,
        filters: &[FilterExpression],
        bbox: &BoundingBox,
    ) -> Result<ResultTable, SightingsError>;
}

#[derive(Debug, Clone)]
pub struct AtlasConfig {
    pub base_url: String,
    /// Contact email the service requires with every query.
    pub email: String,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        AtlasConfig {
            base_url: "https://api.ala.org.au/occurrences".into(),
            email: String::new(),
        }
    }
}

impl AtlasConfig {
    /// Reads `ATLAS_BASE_URL` and `ATLAS_EMAIL`, falling back to defaults.
    pub fn from_env() -> AtlasConfig {
        let defaults = AtlasConfig::default();
        AtlasConfig {
            base_url: env::var("ATLAS_BASE_URL").unwrap_or(defaults.base_url),
            email: env::var("ATLAS_EMAIL").unwrap_or(defaults.email),
        }
    }
}

/// Blocking HTTP client for the occurrence data service. Single-shot: no
/// retry, no backoff, no caching.
pub struct AtlasClient {
    http: reqwest::blocking::Client,
    config: AtlasConfig,
}

impl AtlasClient {
    pub fn new(config: AtlasConfig) -> Result<AtlasClient, SightingsError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent("animal-lookup")
            .build()?;
        Ok(AtlasClient { http, config })
    }
}

impl OccurrenceSource for AtlasClient {
    fn fetch(
        &self,
        filters: &[FilterExpression],
        bbox: &BoundingBox,
    ) -> Result<ResultTable, SightingsError> {
        let url = format!("{}/species.csv", self.config.base_url.trim_end_matches('/'));

        let mut params: Vec<(&str, String)> = filters
            .iter()
            .map(|f| ("fq", f.as_str().to_owned()))
            .collect();
        params.push(("xmin", bbox.xmin.to_string()));
        params.push(("ymin", bbox.ymin.to_string()));
        params.push(("xmax", bbox.xmax.to_string()));
        params.push(("ymax", bbox.ymax.to_string()));
        if !self.config.email.is_empty() {
            params.push(("email", self.config.email.clone()));
        }

        debug!(%url, filters = filters.len(), "querying occurrence service");
        let response = self.http.get(&url).query(&params).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SightingsError::Status(status));
        }

        let table = ResultTable::from_reader(response)?;
        debug!(rows = table.len(), "occurrence service answered");
        Ok(table)
    }
}
