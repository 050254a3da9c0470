// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Client for the remote location-search endpoint.
//!
//! The endpoint answers a substring query with an ordered list of location
//! records. Nothing here filters or validates records; that is the
//! resolver's job.

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::Settings;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Malformed lookup response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupRequest {
    pub term: String,
    pub locale: String,
    pub location_types: String,
    pub limit: u32,
}

/// One location as reported by the endpoint. Fields the endpoint omitted are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub id: String,
    pub name: String,
    pub country_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Issue one lookup request and return the records in endpoint order.
    async fn lookup(&self, request: &LookupRequest) -> Result<Vec<LocationRecord>, LookupError>;
}

// Wire format
#[derive(Debug, Deserialize)]
struct LocationsResponse {
    locations: Vec<WireLocation>,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    city: Option<WireCity>,
    #[serde(default)]
    location: Option<WirePoint>,
}

#[derive(Debug, Deserialize)]
struct WireCity {
    #[serde(default)]
    country: Option<WireCountry>,
}

#[derive(Debug, Deserialize)]
struct WireCountry {
    id: String,
}

#[derive(Debug, Deserialize)]
struct WirePoint {
    lat: f64,
    lon: f64,
}

/// Decodes a `/locations` response body.
pub fn parse_locations(body: &str) -> Result<Vec<LocationRecord>, LookupError> {
    let response: LocationsResponse = serde_json::from_str(body)?;
    Ok(response
        .locations
        .into_iter()
        .map(|loc| LocationRecord {
            id: loc.id,
            name: loc.name,
            country_code: loc.city.and_then(|c| c.country).map(|c| c.id),
            latitude: loc.location.as_ref().map(|p| p.lat),
            longitude: loc.location.as_ref().map(|p| p.lon),
        })
        .collect())
}

pub struct HttpLocationSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpLocationSource {
    pub fn new(settings: &Settings) -> Result<Self, LookupError> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            "AirDist/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: settings.endpoint.clone(),
        })
    }
}

#[async_trait]
impl LocationSource for HttpLocationSource {
    async fn lookup(&self, request: &LookupRequest) -> Result<Vec<LocationRecord>, LookupError> {
        let limit = request.limit.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("term", request.term.as_str()),
                ("locale", request.locale.as_str()),
                ("location_types", request.location_types.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        debug!(
            "Location lookup answered; term={:?} body_bytes={}",
            request.term,
            body.len()
        );
        parse_locations(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "locations": [
            {
                "id": "JFK",
                "name": "John F. Kennedy International Airport",
                "city": { "name": "New York", "country": { "id": "US", "name": "United States" } },
                "location": { "lat": 40.6413, "lon": -73.7781 },
                "type": "airport"
            },
            {
                "id": "YYZ",
                "name": "Toronto Pearson International Airport",
                "city": { "country": { "id": "CA" } },
                "location": { "lat": 43.6777, "lon": -79.6248 }
            },
            { "id": "XXX", "name": "No city or location" }
        ],
        "meta": { "locale": { "code": "en-US" } }
    }"#;

    #[test]
    fn test_parse_locations() {
        let records = parse_locations(SAMPLE).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].id, "JFK");
        assert_eq!(records[0].name, "John F. Kennedy International Airport");
        assert_eq!(records[0].country_code.as_deref(), Some("US"));
        assert_eq!(records[0].latitude, Some(40.6413));
        assert_eq!(records[0].longitude, Some(-73.7781));

        assert_eq!(records[1].country_code.as_deref(), Some("CA"));

        assert_eq!(records[2].country_code, None);
        assert_eq!(records[2].latitude, None);
    }

    #[test]
    fn test_parse_locations_malformed() {
        assert!(matches!(
            parse_locations("<html>502 Bad Gateway</html>"),
            Err(LookupError::Decode(_))
        ));
        assert!(matches!(
            parse_locations(r#"{"results": []}"#),
            Err(LookupError::Decode(_))
        ));
    }

    #[test]
    fn test_http_source_builds_from_defaults() {
        let source = HttpLocationSource::new(&Settings::default()).unwrap();
        assert_eq!(source.endpoint, Settings::default().endpoint);
    }
}
