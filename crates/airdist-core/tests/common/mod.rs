// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz
//
// Shared fakes for the integration tests: a map that records what it was
// asked to do, and lookup sources that answer from fixtures.

#![allow(dead_code)]

use airdist_core::geo::BoundingBox;
use airdist_core::lookup::{LocationRecord, LocationSource, LookupError, LookupRequest};
use airdist_core::viewport::{MapSurface, RouteScene};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

#[derive(Debug, Default)]
pub struct RecordingMap {
    pub fits: Vec<BoundingBox>,
    pub scenes: Vec<RouteScene>,
}

impl MapSurface for RecordingMap {
    fn fit_bounds(&mut self, bounds: &BoundingBox) {
        self.fits.push(*bounds);
    }

    fn redraw(&mut self, scene: &RouteScene) {
        self.scenes.push(*scene);
    }
}

pub fn record(id: &str, name: &str, country: &str, lat: f64, lon: f64) -> LocationRecord {
    LocationRecord {
        id: id.to_string(),
        name: name.to_string(),
        country_code: Some(country.to_string()),
        latitude: Some(lat),
        longitude: Some(lon),
    }
}

/// Answers immediately from a term -> records table and counts requests.
pub struct ScriptedSource {
    pub calls: Arc<AtomicUsize>,
    pub requests: Mutex<Vec<LookupRequest>>,
    table: HashMap<String, Vec<LocationRecord>>,
}

impl ScriptedSource {
    pub fn new(table: Vec<(&str, Vec<LocationRecord>)>) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Mutex::new(Vec::new()),
            table: table
                .into_iter()
                .map(|(term, records)| (term.to_string(), records))
                .collect(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationSource for ScriptedSource {
    async fn lookup(&self, request: &LookupRequest) -> Result<Vec<LocationRecord>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.table.get(&request.term).cloned().unwrap_or_default())
    }
}

/// Holds each answer until the test releases it through a oneshot sender,
/// so tests decide the order in which responses arrive.
pub struct GatedSource {
    gates: Mutex<HashMap<String, oneshot::Receiver<Vec<LocationRecord>>>>,
}

impl GatedSource {
    pub fn new() -> Self {
        Self {
            gates: Mutex::new(HashMap::new()),
        }
    }

    pub fn gate(&self, term: &str) -> oneshot::Sender<Vec<LocationRecord>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(term.to_string(), rx);
        tx
    }
}

#[async_trait]
impl LocationSource for GatedSource {
    async fn lookup(&self, request: &LookupRequest) -> Result<Vec<LocationRecord>, LookupError> {
        let gate = self.gates.lock().unwrap().remove(&request.term);
        match gate {
            Some(rx) => Ok(rx.await.unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }
}
