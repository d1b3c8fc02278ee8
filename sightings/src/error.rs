use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SightingsError {
    #[error("bounding box error: {0}")]
    Geo(#[from] geobox::GeoError),

    #[error("occurrence service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("occurrence service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed tabular response: {0}")]
    Csv(#[from] csv::Error),

    #[error("expected column {0:?} not found in result")]
    MissingColumn(String),
}
