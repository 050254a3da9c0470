// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use log::debug;
use serde::Serialize;
use std::fmt;

use crate::airport::Airport;
use crate::geo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Slot {
    From,
    To,
}

impl Slot {
    pub fn label(self) -> &'static str {
        match self {
            Slot::From => "From",
            Slot::To => "To",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Answer of one explicit calculation, tied to the pair it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub from: Airport,
    pub to: Airport,
    pub distance_nm: f64,
    pub visible: bool,
}

impl CalculationResult {
    pub fn result_line(&self) -> String {
        format!(
            "{} and {} are {:.2} NM away!",
            self.from.label(),
            self.to.label(),
            self.distance_nm
        )
    }
}

/// The two airport slots and the last explicit answer.
///
/// Any slot change drops the answer. Nothing is recomputed until
/// [`SelectionState::calculate`] is called again.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    from: Option<Airport>,
    to: Option<Airport>,
    result: Option<CalculationResult>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, slot: Slot) -> Option<&Airport> {
        match slot {
            Slot::From => self.from.as_ref(),
            Slot::To => self.to.as_ref(),
        }
    }

    pub fn set_slot(&mut self, slot: Slot, airport: Option<Airport>) {
        debug!(
            "Slot changed; slot={} airport={:?}",
            slot,
            airport.as_ref().map(|a| a.iata())
        );
        match slot {
            Slot::From => self.from = airport,
            Slot::To => self.to = airport,
        }
        self.result = None;
    }

    /// Computes the distance when both slots are filled, otherwise clears the
    /// result. Returns the visible result, if any.
    pub fn calculate(&mut self) -> Option<&CalculationResult> {
        self.result = match (&self.from, &self.to) {
            (Some(from), Some(to)) => Some(CalculationResult {
                distance_nm: geo::distance_nm(from.coordinate(), to.coordinate()),
                from: from.clone(),
                to: to.clone(),
                visible: true,
            }),
            _ => None,
        };
        self.visible_result()
    }

    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    pub fn visible_result(&self) -> Option<&CalculationResult> {
        self.result.as_ref().filter(|r| r.visible)
    }

    pub fn is_visible(&self) -> bool {
        self.visible_result().is_some()
    }

    pub fn result_line(&self) -> Option<String> {
        self.visible_result().map(CalculationResult::result_line)
    }
}
