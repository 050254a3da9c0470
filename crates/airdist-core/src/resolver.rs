// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use log::{debug, error};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::airport::Airport;
use crate::config::Settings;
use crate::lookup::{LocationRecord, LocationSource, LookupRequest};

/// Finite sequence of airports matching one query, in endpoint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidates {
    query: String,
    airports: Vec<Airport>,
}

impl Candidates {
    pub fn new(query: impl Into<String>, airports: Vec<Airport>) -> Self {
        Self {
            query: query.into(),
            airports,
        }
    }

    pub fn empty(query: impl Into<String>) -> Self {
        Self::new(query, Vec::new())
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Airport> {
        self.airports.iter()
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Airport> {
        self.airports.get(index)
    }

    /// Case-insensitive IATA lookup among the candidates.
    pub fn find_iata(&self, code: &str) -> Option<&Airport> {
        self.airports
            .iter()
            .find(|a| a.iata().eq_ignore_ascii_case(code.trim()))
    }
}

impl IntoIterator for Candidates {
    type Item = Airport;
    type IntoIter = std::vec::IntoIter<Airport>;

    fn into_iter(self) -> Self::IntoIter {
        self.airports.into_iter()
    }
}

impl<'a> IntoIterator for &'a Candidates {
    type Item = &'a Airport;
    type IntoIter = std::slice::Iter<'a, Airport>;

    fn into_iter(self) -> Self::IntoIter {
        self.airports.iter()
    }
}

/// Turns search text into candidate airports from one country.
pub struct AirportResolver<S> {
    source: S,
    locale: String,
    location_types: String,
    result_limit: u32,
    country: String,
    min_query_len: usize,
}

impl<S: LocationSource> AirportResolver<S> {
    pub fn new(source: S, settings: &Settings) -> Self {
        Self {
            source,
            locale: settings.locale.clone(),
            location_types: settings.location_types.clone(),
            result_limit: settings.result_limit,
            country: settings.country.clone(),
            min_query_len: settings.min_query_len,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// True when `query` is long enough to be sent to the endpoint.
    pub fn should_query(&self, query: &str) -> bool {
        query.chars().count() > self.min_query_len
    }

    /// Runs one lookup for `query`.
    ///
    /// Never fails: short queries, transport errors and malformed responses
    /// all produce an empty sequence. Errors are logged.
    pub async fn search(&self, query: &str) -> Candidates {
        if !self.should_query(query) {
            return Candidates::empty(query);
        }

        let request = LookupRequest {
            term: query.to_string(),
            locale: self.locale.clone(),
            location_types: self.location_types.clone(),
            limit: self.result_limit,
        };

        match self.source.lookup(&request).await {
            Ok(records) => {
                let candidates = Candidates::new(query, self.accept(records));
                debug!(
                    "Airport search resolved; term={:?} candidates={}",
                    query,
                    candidates.len()
                );
                candidates
            }
            Err(e) => {
                error!("Error fetching airport data; term={:?} error={}", query, e);
                Candidates::empty(query)
            }
        }
    }

    /// Keeps records from the configured country that form a valid airport.
    fn accept(&self, records: Vec<LocationRecord>) -> Vec<Airport> {
        records
            .into_iter()
            .filter(|r| r.country_code.as_deref() == Some(self.country.as_str()))
            .filter_map(|r| {
                let (lat, lon) = r.latitude.zip(r.longitude)?;
                // The endpoint's location id is the IATA code
                match Airport::new(r.id.clone(), r.name, r.id, lat, lon) {
                    Ok(airport) => Some(airport),
                    Err(e) => {
                        debug!("Dropping unusable location record; error={}", e);
                        None
                    }
                }
            })
            .collect()
    }
}

/// Marks one issued query. Only the most recently issued ticket of a
/// [`SearchBox`] may change what the box displays.
#[derive(Debug, Clone)]
pub struct QueryTicket {
    seq: u64,
    latest: Arc<AtomicU64>,
}

impl QueryTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// False once a newer query has been issued on the same box.
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::Acquire) == self.seq
    }
}

/// Search-as-you-type state for one input: the text, the visible
/// candidates and the issuance counter that orders responses.
#[derive(Debug, Default)]
pub struct SearchBox {
    text: String,
    latest: Arc<AtomicU64>,
    candidates: Candidates,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn candidates(&self) -> &Candidates {
        &self.candidates
    }

    /// Records a keystroke and returns the ticket its response must carry.
    pub fn issue(&mut self, text: impl Into<String>) -> QueryTicket {
        self.text = text.into();
        let seq = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        QueryTicket {
            seq,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Shows `candidates` if `ticket` is still the latest one issued by this
    /// box. Returns whether they were applied.
    pub fn apply(&mut self, ticket: &QueryTicket, candidates: Candidates) -> bool {
        if !Arc::ptr_eq(&ticket.latest, &self.latest) || !ticket.is_current() {
            debug!(
                "Discarding stale search response; seq={} latest={} query={:?}",
                ticket.seq,
                self.latest.load(Ordering::Acquire),
                candidates.query()
            );
            return false;
        }
        self.candidates = candidates;
        true
    }

    /// Replaces the text without querying (e.g. after a pick). Suggestions
    /// are dropped and any in-flight query is invalidated.
    pub fn settle(&mut self, text: impl Into<String>) {
        self.issue(text);
        self.candidates = Candidates::default();
    }

    pub fn clear(&mut self) {
        self.settle(String::new());
    }
}
