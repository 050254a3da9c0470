// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::geo::Coordinate;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AirportError {
    #[error("Invalid IATA code: {0:?}")]
    InvalidIata(String),
    #[error("Latitude out of range: {0}")]
    LatitudeOutOfRange(f64),
    #[error("Longitude out of range: {0}")]
    LongitudeOutOfRange(f64),
}

/// A resolved airport. Fields are private so every instance has passed
/// validation, which keeps `coordinate()` finite and in range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    id: String,
    name: String,
    iata: String,
    latitude: f64,
    longitude: f64,
}

impl Airport {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        iata: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, AirportError> {
        let iata = iata.into();
        let iata_ok = iata.len() == 3 && iata.chars().all(|c| c.is_ascii_uppercase());
        if !iata_ok {
            return Err(AirportError::InvalidIata(iata));
        }
        // Range checks also reject NaN
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(AirportError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(AirportError::LongitudeOutOfRange(longitude));
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            iata,
            latitude,
            longitude,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn iata(&self) -> &str {
        &self.iata
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Option label shown in search suggestions, e.g. "Los Angeles International Airport (LAX)".
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.iata)
    }

    /// Option identity: two records are the same airport when their IATA codes match.
    pub fn same_airport(&self, other: &Airport) -> bool {
        self.iata == other.iata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_airport() {
        let jfk = Airport::new(
            "JFK",
            "John F. Kennedy International Airport",
            "JFK",
            40.6413,
            -73.7781,
        )
        .unwrap();
        assert_eq!(jfk.label(), "John F. Kennedy International Airport (JFK)");
        assert_eq!(jfk.coordinate(), Coordinate::new(40.6413, -73.7781));
    }

    #[test]
    fn test_rejects_bad_iata() {
        assert_eq!(
            Airport::new("jfk", "x", "jfk", 0.0, 0.0),
            Err(AirportError::InvalidIata("jfk".to_string()))
        );
        assert!(Airport::new("KJFK", "x", "KJFK", 0.0, 0.0).is_err());
        assert!(Airport::new("J1K", "x", "J1K", 0.0, 0.0).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_and_nan() {
        assert!(matches!(
            Airport::new("AAA", "x", "AAA", 91.0, 0.0),
            Err(AirportError::LatitudeOutOfRange(_))
        ));
        assert!(matches!(
            Airport::new("AAA", "x", "AAA", 0.0, -180.5),
            Err(AirportError::LongitudeOutOfRange(_))
        ));
        assert!(Airport::new("AAA", "x", "AAA", f64::NAN, 0.0).is_err());
        assert!(Airport::new("AAA", "x", "AAA", 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_same_airport_by_iata() {
        let a = Airport::new("LAX", "Los Angeles", "LAX", 33.9416, -118.4085).unwrap();
        let b = Airport::new("LAX", "LAX renamed", "LAX", 33.94, -118.40).unwrap();
        assert!(a.same_airport(&b));
        assert_ne!(a, b);
    }
}
