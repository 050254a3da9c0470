// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::geo::{BoundingBox, Coordinate};

/// What the map should draw. A new `generation` means "discard whatever
/// markers and route you drew before and draw this from scratch".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RouteScene {
    pub generation: u64,
    pub from: Option<Coordinate>,
    pub to: Option<Coordinate>,
    pub show_route: bool,
}

impl RouteScene {
    /// Endpoints to draw, only when the route is shown and both ends exist.
    pub fn endpoints(&self) -> Option<(Coordinate, Coordinate)> {
        if self.show_route {
            self.from.zip(self.to)
        } else {
            None
        }
    }
}

/// The map collaborator. Implementations own panning, zooming and drawing.
pub trait MapSurface {
    /// One-shot camera request: make `bounds` fill the view.
    fn fit_bounds(&mut self, bounds: &BoundingBox);

    fn redraw(&mut self, scene: &RouteScene);
}

/// Region framing both points, or `None` when either is missing.
pub fn frame(from: Option<Coordinate>, to: Option<Coordinate>) -> Option<BoundingBox> {
    let (a, b) = from.zip(to)?;
    Some(BoundingBox::from_points(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_needs_both_points() {
        let a = Coordinate::new(40.6413, -73.7781);
        let b = Coordinate::new(33.9416, -118.4085);

        assert_eq!(frame(None, None), None);
        assert_eq!(frame(Some(a), None), None);
        assert_eq!(frame(None, Some(b)), None);

        let bounds = frame(Some(a), Some(b)).unwrap();
        assert_eq!(bounds, BoundingBox::new(33.9416, 40.6413, -118.4085, -73.7781));
    }

    #[test]
    fn test_scene_endpoints_hidden() {
        let scene = RouteScene {
            generation: 3,
            from: Some(Coordinate::new(1.0, 2.0)),
            to: Some(Coordinate::new(3.0, 4.0)),
            show_route: false,
        };
        assert!(scene.endpoints().is_none());

        let shown = RouteScene {
            show_route: true,
            ..scene
        };
        assert_eq!(
            shown.endpoints(),
            Some((Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0)))
        );
    }
}
