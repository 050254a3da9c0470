// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};

/// Earth radius used for every distance shown to the user.
pub const EARTH_RADIUS_NM: f64 = 3440.0;

/// Map-ready framing: the contiguous United States.
pub const CONTINENTAL_US: BoundingBox = BoundingBox {
    min_lat: 24.396308,
    max_lat: 49.3457868,
    min_lon: -125.0,
    max_lon: -66.93457,
};

/// Geographic center of the contiguous US, (lat, lon).
pub const DEFAULT_CENTER: (f64, f64) = (39.8283, -98.5795);
pub const DEFAULT_ZOOM: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance in nautical miles (haversine).
pub fn distance_nm(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lon1 = a.longitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let lon2 = b.longitude.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_NM * c
}

/// Points along the great circle from `a` to `b`, endpoints included.
///
/// Used to draw a geodesic route line; a straight segment on a Mercator map
/// would misrepresent long routes. Coincident or antipodal endpoints have no
/// unique great circle, so only the endpoints are returned.
pub fn great_circle_path(a: Coordinate, b: Coordinate, segments: usize) -> Vec<Coordinate> {
    let segments = segments.max(1);
    let lat1 = a.latitude.to_radians();
    let lon1 = a.longitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let lon2 = b.longitude.to_radians();

    let angle = distance_nm(a, b) / EARTH_RADIUS_NM;
    let sin_angle = angle.sin();
    if sin_angle.abs() < 1e-9 {
        return vec![a, b];
    }

    let mut path = Vec::with_capacity(segments + 1);
    path.push(a);
    for i in 1..segments {
        let f = i as f64 / segments as f64;
        let wa = ((1.0 - f) * angle).sin() / sin_angle;
        let wb = (f * angle).sin() / sin_angle;

        let x = wa * lat1.cos() * lon1.cos() + wb * lat2.cos() * lon2.cos();
        let y = wa * lat1.cos() * lon1.sin() + wb * lat2.cos() * lon2.sin();
        let z = wa * lat1.sin() + wb * lat2.sin();

        path.push(Coordinate::new(
            z.atan2((x * x + y * y).sqrt()).to_degrees(),
            y.atan2(x).to_degrees(),
        ));
    }
    path.push(b);
    path
}

/// Lat/lon rectangle. Does not wrap the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Smallest box containing both points.
    pub fn from_points(a: Coordinate, b: Coordinate) -> Self {
        Self {
            min_lat: a.latitude.min(b.latitude),
            max_lat: a.latitude.max(b.latitude),
            min_lon: a.longitude.min(b.longitude),
            max_lon: a.longitude.max(b.longitude),
        }
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JFK: Coordinate = Coordinate::new(40.6413, -73.7781);
    const LAX: Coordinate = Coordinate::new(33.9416, -118.4085);

    #[test]
    fn test_jfk_lax_known_distance() {
        let d = distance_nm(JFK, LAX);
        assert!(d > 2143.0 && d < 2146.0, "JFK-LAX was {}", d);
    }

    #[test]
    fn test_distance_symmetric_and_zero() {
        let pairs = [
            (JFK, LAX),
            (Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 179.9)),
            (Coordinate::new(-89.5, 10.0), Coordinate::new(89.5, -170.0)),
            (Coordinate::new(61.17, -149.99), Coordinate::new(21.32, -157.92)),
        ];
        for (a, b) in pairs {
            assert_eq!(distance_nm(a, b), distance_nm(b, a));
            assert_eq!(distance_nm(a, a), 0.0);
            assert_eq!(distance_nm(b, b), 0.0);
        }
    }

    #[test]
    fn test_great_circle_path_endpoints() {
        let path = great_circle_path(JFK, LAX, 16);
        assert_eq!(path.len(), 17);
        assert_eq!(path[0], JFK);
        assert_eq!(path[16], LAX);

        // Segment lengths should be even along a great circle
        let total = distance_nm(JFK, LAX);
        for pair in path.windows(2) {
            let seg = distance_nm(pair[0], pair[1]);
            assert!((seg - total / 16.0).abs() < 0.01);
        }

        // A geodesic between two northern-hemisphere points bulges poleward
        assert!(path[8].latitude > (JFK.latitude + LAX.latitude) / 2.0);
    }

    #[test]
    fn test_great_circle_path_degenerate() {
        assert_eq!(great_circle_path(JFK, JFK, 8), vec![JFK, JFK]);
    }

    #[test]
    fn test_bounding_box_from_points() {
        let b = BoundingBox::from_points(JFK, LAX);
        assert_eq!(b.min_lat, 33.9416);
        assert_eq!(b.max_lat, 40.6413);
        assert_eq!(b.min_lon, -118.4085);
        assert_eq!(b.max_lon, -73.7781);
        assert!(b.contains(JFK.latitude, JFK.longitude));
        assert!(b.contains(LAX.latitude, LAX.longitude));
        assert!(!b.contains(45.0, -100.0));
        assert_eq!(BoundingBox::from_points(LAX, JFK), b);
    }

    #[test]
    fn test_continental_default_contains_center() {
        assert!(CONTINENTAL_US.contains(DEFAULT_CENTER.0, DEFAULT_CENTER.1));
    }
}
