#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use geobox::{BoundingBox, Coordinate};
    use geocoding::{GeocodeError, GeocodeSource, resolve_address};
    use sightings::*;

    const BRISBANE: (f64, f64) = (152.93173217773438, -27.10943603515625);

    const SERVED_CSV: &str = "Vernacular Name,Species\n\
        Laughing Kookaburra,https://id.example.org/kookaburra\n\
        Koala,https://id.example.org/koala-2014\n\
        Koala,https://id.example.org/koala-2023\n";

    /// Occurrence source that records what it was asked and serves a canned
    /// CSV table.
    struct MockAtlas {
        served: &'static str,
        captured: RefCell<Option<(Vec<String>, BoundingBox)>>,
    }

    impl MockAtlas {
        fn new(served: &'static str) -> MockAtlas {
            MockAtlas {
                served,
                captured: RefCell::new(None),
            }
        }
    }

    impl OccurrenceSource for MockAtlas {
        fn fetch(
            &self,
            filters: &[FilterExpression],
            bbox: &BoundingBox,
        ) -> Result<ResultTable, SightingsError> {
            let filters = filters.iter().map(|f| f.as_str().to_owned()).collect();
            *self.captured.borrow_mut() = Some((filters, *bbox));
            Ok(ResultTable::from_reader(self.served.as_bytes())?)
        }
    }

    fn brisbane() -> Coordinate {
        Coordinate::new(BRISBANE.0, BRISBANE.1).expect("in range")
    }

    #[test]
    fn orchestrator_builds_filters_and_box() {
        let atlas = MockAtlas::new(SERVED_CSV);
        let table = run_query(&atlas, brisbane(), 500.0, 2010, 2024).expect("mock query");

        let captured = atlas.captured.borrow().clone();
        let (mut filters, bbox) = captured.expect("fetch was called");
        filters.sort();
        assert_eq!(filters, ["year<=2024", "year>=2010"]);

        let (cx, cy) = bbox.center();
        assert!((cx - BRISBANE.0).abs() < 1e-9);
        assert!((cy - BRISBANE.1).abs() < 1e-9);
        assert!((bbox.height() - 0.009_009_009).abs() < 1e-6);

        // the raw table comes back unmodified
        assert_eq!(table.columns, ["Vernacular Name", "Species"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn search_rebuilds_directory_with_last_write_wins() {
        let atlas = MockAtlas::new(SERVED_CSV);
        let table = run_query(&atlas, brisbane(), 500.0, 2010, 2024).expect("mock query");
        let directory = AnimalDirectory::from_table(&table).expect("expected columns present");

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.url("Koala"), Some("https://id.example.org/koala-2023"));
        assert_eq!(
            directory.names().collect::<Vec<_>>(),
            ["Koala", "Laughing Kookaburra"]
        );
    }

    #[test]
    fn script_output_roundtrips_the_served_table() {
        let atlas = MockAtlas::new(SERVED_CSV);
        let table = run_query(&atlas, brisbane(), 500.0, 2010, 2024).expect("mock query");

        let mut out = Vec::new();
        table.write_csv(&mut out).expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), SERVED_CSV);
    }

    #[test]
    fn polar_center_fails_before_the_service_is_called() {
        let atlas = MockAtlas::new(SERVED_CSV);
        let center = Coordinate::new(0.0, 90.0).expect("valid coordinate");
        let res = run_query(&atlas, center, 500.0, 2010, 2024);
        assert!(matches!(res, Err(SightingsError::Geo(_))));
        assert!(atlas.captured.borrow().is_none());
    }

    #[test]
    fn malformed_service_response_propagates() {
        let atlas = MockAtlas::new("Vernacular Name,Species\nragged-row\n\"");
        let res = run_query(&atlas, brisbane(), 500.0, 2010, 2024);
        assert!(matches!(res, Err(SightingsError::Csv(_))));
    }

    #[test]
    fn schema_drift_is_a_validation_error() {
        let atlas = MockAtlas::new("Scientific Name,Guid\nPhascolarctos cinereus,u-1\n");
        let table = run_query(&atlas, brisbane(), 500.0, 2010, 2024).expect("mock query");
        let res = AnimalDirectory::from_table(&table);
        assert!(matches!(res, Err(SightingsError::MissingColumn(_))));
    }

    /// Geocoder that answers a fixed coordinate for any address.
    struct FixedGeocoder(Coordinate);

    impl GeocodeSource for FixedGeocoder {
        fn resolve(&self, _address: &str) -> Result<Option<Coordinate>, GeocodeError> {
            Ok(Some(self.0))
        }
    }

    #[test]
    fn geocode_result_feeds_the_query() {
        let geocoder = FixedGeocoder(brisbane());
        let atlas = MockAtlas::new(SERVED_CSV);

        let coord = resolve_address(&geocoder, "1 Main St", "Brisbane", "QLD", "Australia")
            .expect("mock never fails")
            .expect("always a match");
        let table = run_query(&atlas, coord, 250.0, 2015, 2020).expect("mock query");
        assert_eq!(table.len(), 3);
    }
}
