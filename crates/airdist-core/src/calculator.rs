// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use log::{debug, info};

use crate::airport::Airport;
use crate::geo::CONTINENTAL_US;
use crate::resolver::{Candidates, QueryTicket, SearchBox};
use crate::selection::{CalculationResult, SelectionState, Slot};
use crate::viewport::{self, MapSurface, RouteScene};

/// The calculator screen: two search boxes, the selection, and the map it drives.
pub struct DistanceCalculator<M> {
    map: M,
    selection: SelectionState,
    from_box: SearchBox,
    to_box: SearchBox,
    scene: RouteScene,
}

impl<M: MapSurface> DistanceCalculator<M> {
    pub fn new(map: M) -> Self {
        Self {
            map,
            selection: SelectionState::new(),
            from_box: SearchBox::new(),
            to_box: SearchBox::new(),
            scene: RouteScene::default(),
        }
    }

    /// Frames the default region once the map has loaded.
    pub fn map_ready(&mut self) {
        debug!("Map ready; fitting default region");
        self.map.fit_bounds(&CONTINENTAL_US);
    }

    pub fn search_box(&self, slot: Slot) -> &SearchBox {
        match slot {
            Slot::From => &self.from_box,
            Slot::To => &self.to_box,
        }
    }

    fn search_box_mut(&mut self, slot: Slot) -> &mut SearchBox {
        match slot {
            Slot::From => &mut self.from_box,
            Slot::To => &mut self.to_box,
        }
    }

    pub fn candidates(&self, slot: Slot) -> &Candidates {
        self.search_box(slot).candidates()
    }

    /// Records new text in a search box; the returned ticket must accompany
    /// the resolver's answer to [`Self::finish_search`].
    pub fn begin_search(&mut self, slot: Slot, text: impl Into<String>) -> QueryTicket {
        self.search_box_mut(slot).issue(text)
    }

    /// Handles an edit of a search box. Emptying the box clears its slot and
    /// returns `None`; any other text issues a query ticket.
    pub fn edit_search(&mut self, slot: Slot, text: impl Into<String>) -> Option<QueryTicket> {
        let text = text.into();
        if text.is_empty() {
            self.clear_slot(slot);
            None
        } else {
            Some(self.begin_search(slot, text))
        }
    }

    /// Applies a resolver answer unless a newer query was issued since.
    pub fn finish_search(
        &mut self,
        slot: Slot,
        ticket: &QueryTicket,
        candidates: Candidates,
    ) -> bool {
        self.search_box_mut(slot).apply(ticket, candidates)
    }

    /// Assigns (or clears) a slot. Any shown distance is withdrawn.
    pub fn pick(&mut self, slot: Slot, airport: Option<Airport>) {
        self.selection.set_slot(slot, airport);
        self.push_scene(false);
    }

    /// Picks the `index`-th visible candidate of a search box. The box then
    /// shows the airport's label and its suggestion list closes.
    pub fn pick_candidate(&mut self, slot: Slot, index: usize) -> bool {
        match self.candidates(slot).get(index).cloned() {
            Some(airport) => {
                self.search_box_mut(slot).settle(airport.label());
                self.pick(slot, Some(airport));
                true
            }
            None => false,
        }
    }

    /// Empties a search box and its slot.
    pub fn clear_slot(&mut self, slot: Slot) {
        self.search_box_mut(slot).clear();
        self.pick(slot, None);
    }

    /// Handles the "Calculate Distance" trigger.
    pub fn calculate(&mut self) -> Option<&CalculationResult> {
        let visible = match self.selection.calculate() {
            Some(result) => {
                info!(
                    "Distance calculated; from={} to={} distance_nm={:.2}",
                    result.from.iata(),
                    result.to.iata(),
                    result.distance_nm
                );
                true
            }
            None => {
                debug!("Calculate requested with an empty slot; nothing to show");
                false
            }
        };

        if visible {
            let from = self.selection.slot(Slot::From).map(Airport::coordinate);
            let to = self.selection.slot(Slot::To).map(Airport::coordinate);
            if let Some(bounds) = viewport::frame(from, to) {
                self.map.fit_bounds(&bounds);
            }
        }
        self.push_scene(visible);
        self.selection.visible_result()
    }

    /// Replaces the scene with a fresh generation and hands it to the map.
    fn push_scene(&mut self, show_route: bool) {
        self.scene = RouteScene {
            generation: self.scene.generation + 1,
            from: self.selection.slot(Slot::From).map(Airport::coordinate),
            to: self.selection.slot(Slot::To).map(Airport::coordinate),
            show_route,
        };
        self.map.redraw(&self.scene);
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn result_line(&self) -> Option<String> {
        self.selection.result_line()
    }

    pub fn scene(&self) -> &RouteScene {
        &self.scene
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }
}
