use geobox::{BoundingBox, Coordinate};
use tracing::debug;

use crate::{FilterExpression, OccurrenceSource, ResultTable, SightingsError};

/// Builds the year filters and the bounding box, then delegates a single
/// blocking call to the source. Errors propagate verbatim; the raw table is
/// returned unmodified and column validation is left to the presenter.
pub fn run_query(
    source: &impl OccurrenceSource,
    center: Coordinate,
    radius_meters: f64,
    year_start: i32,
    year_end: i32,
) -> Result<ResultTable, SightingsError> {
    let filters = [
        FilterExpression::year_at_least(year_start),
        FilterExpression::year_at_most(year_end),
    ];
    let bbox = BoundingBox::around(center, radius_meters)?;
    debug!(%center, radius_meters, ?bbox, "running occurrence query");
    source.fetch(&filters, &bbox)
}
