use geo_types::{Coord, Point, Rect};
use thiserror::Error;

/// Approximate length of one degree of latitude in meters.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeoError {
    #[error("longitude {0}° is outside [-180°, 180°]")]
    LongitudeOutOfRange(f64),

    #[error("latitude {0}° is outside [-90°, 90°]")]
    LatitudeOutOfRange(f64),

    #[error("latitude {0}° is too close to a pole for a flat-earth bounding box")]
    PolarLatitude(f64),

    #[error("radius must be non-negative, got {0} m")]
    NegativeRadius(f64),
}

/// A (longitude, latitude) pair in decimal degrees. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lon: f64,
    lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Result<Coordinate, GeoError> {
        if !(-180.0..=180.0).contains(&lon) {
            return Err(GeoError::LongitudeOutOfRange(lon));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::LatitudeOutOfRange(lat));
        }
        Ok(Coordinate { lon, lat })
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}

/// Axis-aligned rectangle in unprojected longitude/latitude degrees,
/// with xmin <= xmax and ymin <= ymax. Created fresh per query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    /// Box of `radius_meters` around `center`, using the local flat-earth
    /// approximation (not valid for large spans or pole-adjacent centers).
    ///
    /// One degree of latitude is taken as 111 000 m; one degree of longitude
    /// as 111 000 m scaled by the cosine of the center latitude. A radius of
    /// zero collapses the box to a single point, which is valid.
    pub fn around(center: Coordinate, radius_meters: f64) -> Result<BoundingBox, GeoError> {
        if radius_meters < 0.0 || radius_meters.is_nan() {
            return Err(GeoError::NegativeRadius(radius_meters));
        }
        // cos(±90°) would put a zero in the denominator below
        if center.lat().abs() >= 90.0 {
            return Err(GeoError::PolarLatitude(center.lat()));
        }

        let dlat = radius_meters / METERS_PER_DEGREE;
        let meters_per_degree_lon = METERS_PER_DEGREE * center.lat().to_radians().cos();
        let dlon = radius_meters / meters_per_degree_lon;

        Ok(BoundingBox {
            xmin: center.lon() - dlon,
            ymin: center.lat() - dlat,
            xmax: center.lon() + dlon,
            ymax: center.lat() + dlat,
        })
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.xmin + self.xmax) / 2.0, (self.ymin + self.ymax) / 2.0)
    }

    pub fn rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.xmin,
                y: self.ymin,
            },
            Coord {
                x: self.xmax,
                y: self.ymax,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn coordinate(lon: f64, lat: f64) -> Coordinate {
        Coordinate::new(lon, lat).expect("valid coordinate")
    }

    #[test]
    fn coordinate_rejects_out_of_range() {
        assert!(matches!(
            Coordinate::new(181.0, 0.0),
            Err(GeoError::LongitudeOutOfRange(_))
        ));
        assert!(matches!(
            Coordinate::new(0.0, -90.5),
            Err(GeoError::LatitudeOutOfRange(_))
        ));
        assert!(Coordinate::new(180.0, 90.0).is_ok());
    }

    #[test]
    fn box_is_centered_and_ordered() {
        for &(lon, lat, radius) in &[
            (0.0, 0.0, 0.0),
            (10.25, 55.5, 250.0),
            (-122.4, 37.77, 1_000.0),
            (152.9, -27.1, 500.0),
            (179.0, 89.0, 100.0),
        ] {
            let bbox = BoundingBox::around(coordinate(lon, lat), radius).expect("valid input");
            assert!(bbox.xmin <= bbox.xmax);
            assert!(bbox.ymin <= bbox.ymax);
            let (cx, cy) = bbox.center();
            assert!((cx - lon).abs() < EPS, "lon midpoint off at ({lon}, {lat})");
            assert!((cy - lat).abs() < EPS, "lat midpoint off at ({lon}, {lat})");
        }
    }

    #[test]
    fn equator_is_isotropic() {
        let bbox = BoundingBox::around(coordinate(0.0, 0.0), METERS_PER_DEGREE).expect("valid");
        assert!((bbox.height() / 2.0 - 1.0).abs() < EPS);
        assert!((bbox.width() / 2.0 - 1.0).abs() < EPS);
    }

    #[test]
    fn longitude_delta_doubles_at_sixty_degrees() {
        let bbox = BoundingBox::around(coordinate(0.0, 60.0), METERS_PER_DEGREE).expect("valid");
        // cos(60°) = 0.5 halves the denominator
        assert!((bbox.width() / 2.0 - 2.0).abs() < 1e-9);
        assert!((bbox.height() / 2.0 - 1.0).abs() < EPS);
    }

    #[test]
    fn poles_are_rejected() {
        for lat in [90.0, -90.0] {
            let res = BoundingBox::around(coordinate(0.0, lat), 100.0);
            assert!(matches!(res, Err(GeoError::PolarLatitude(_))));
        }
    }

    #[test]
    fn negative_radius_is_rejected() {
        let res = BoundingBox::around(coordinate(0.0, 0.0), -1.0);
        assert!(matches!(res, Err(GeoError::NegativeRadius(_))));
    }

    #[test]
    fn zero_radius_degenerates_to_a_point() {
        let bbox = BoundingBox::around(coordinate(12.5, -33.0), 0.0).expect("valid");
        assert_eq!(bbox.xmin, bbox.xmax);
        assert_eq!(bbox.ymin, bbox.ymax);
        assert_eq!(bbox.center(), (12.5, -33.0));
    }

    #[test]
    fn box_grows_with_radius() {
        let center = coordinate(152.9, -27.1);
        let mut last = 0.0;
        for radius in [0.0, 10.0, 100.0, 500.0, 5_000.0] {
            let bbox = BoundingBox::around(center, radius).expect("valid");
            assert!(bbox.width() >= last);
            last = bbox.width();
        }
    }

    #[test]
    fn brisbane_scenario() {
        let center = coordinate(152.93173217773438, -27.10943603515625);
        let bbox = BoundingBox::around(center, 500.0).expect("valid");
        // 500 m / 111 000 m ≈ 0.0045° half-height; cos(-27.109°) ≈ 0.89
        assert!((bbox.height() - 0.009_009_009).abs() < 1e-6);
        assert!((bbox.width() - 0.010_122_5).abs() < 1e-5);
        let (cx, cy) = bbox.center();
        assert!((cx - 152.93173217773438).abs() < EPS);
        assert!((cy - -27.10943603515625).abs() < EPS);
    }
}
