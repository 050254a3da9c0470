// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::style::palette;
use crate::Message;
use airdist_core::geo::{self, BoundingBox, Coordinate};
use airdist_core::{MapSurface, RouteScene, Slot};
use iced::advanced::{self, layout, renderer, widget, Layout, Widget};
use iced::widget::image;
use iced::{mouse, Border, Color, Element, Event, Length, Radians, Rectangle};
use log::{debug, warn};
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

// --- Slippy Map / Mercator Math ---
pub const TILE_SIZE: f64 = 256.0;
pub const MAX_ZOOM: f64 = 19.0;
/// Closest zoom a camera fit may choose, so two nearby airports stay in context.
pub const MAX_FIT_ZOOM: f64 = 12.0;
/// Screen pixels kept clear around a fitted region.
pub const FIT_PADDING: f64 = 40.0;
/// Click radius around a marker, in screen pixels.
const MARKER_HIT_RADIUS: f64 = 10.0;
const ROUTE_SEGMENTS: usize = 64;
/// Screen pixels between route dots.
const ROUTE_DOT_SPACING: f64 = 2.0;

pub fn lon_to_x(lon: f64, zoom: f64) -> f64 {
    ((lon + 180.0) / 360.0) * 2.0f64.powf(zoom) * TILE_SIZE
}

pub fn lat_to_y(lat: f64, zoom: f64) -> f64 {
    let lat_rad = lat.to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0
        * 2.0f64.powf(zoom)
        * TILE_SIZE
}

pub fn x_to_lon(x: f64, zoom: f64) -> f64 {
    (x / (TILE_SIZE * 2.0f64.powf(zoom))) * 360.0 - 180.0
}

pub fn y_to_lat(y: f64, zoom: f64) -> f64 {
    let n = std::f64::consts::PI - 2.0 * std::f64::consts::PI * y / (TILE_SIZE * 2.0f64.powf(zoom));
    (0.5 * (n.exp() - (-n).exp())).atan().to_degrees()
}

/// Camera (center, zoom) that shows `bounds` inside a `width` x `height` view.
pub fn fit_camera(bounds: &BoundingBox, width: f32, height: f32) -> ((f64, f64), f64) {
    let x1 = lon_to_x(bounds.min_lon, 0.0);
    let x2 = lon_to_x(bounds.max_lon, 0.0);
    let y1 = lat_to_y(bounds.max_lat, 0.0);
    let y2 = lat_to_y(bounds.min_lat, 0.0);

    let center = (y_to_lat((y1 + y2) / 2.0, 0.0), x_to_lon((x1 + x2) / 2.0, 0.0));

    let usable_w = (width as f64 - 2.0 * FIT_PADDING).max(1.0);
    let usable_h = (height as f64 - 2.0 * FIT_PADDING).max(1.0);
    let zoom_for = |usable: f64, span: f64| {
        if span > 0.0 {
            (usable / span).log2()
        } else {
            f64::INFINITY
        }
    };
    let zoom = zoom_for(usable_w, x2 - x1)
        .min(zoom_for(usable_h, y2 - y1))
        .clamp(0.0, MAX_FIT_ZOOM);

    (center, zoom)
}

// --- Tile Management ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoords {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl TileCoords {
    pub fn url(&self) -> String {
        format!(
            "https://tile.openstreetmap.org/{}/{}/{}.png",
            self.z, self.x, self.y
        )
    }
}

pub struct TileManager {
    tiles: Arc<Mutex<LruCache<TileCoords, image::Handle>>>,
    pending: Arc<Mutex<HashSet<TileCoords>>>,
}

impl Default for TileManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TileManager {
    pub fn new() -> Self {
        let capacity = NonZeroUsize::new(300).unwrap_or(NonZeroUsize::MIN);
        Self {
            tiles: Arc::new(Mutex::new(LruCache::new(capacity))),
            pending: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn get_tile(&self, coords: TileCoords) -> Option<image::Handle> {
        let mut tiles = self.tiles.lock().ok()?;
        tiles.get(&coords).cloned()
    }

    /// True while tile downloads are in flight.
    pub fn has_pending(&self) -> bool {
        self.pending.lock().map(|p| !p.is_empty()).unwrap_or(false)
    }

    /// Starts downloads for every tile the camera currently shows.
    pub fn request_visible(&self, camera: &MapCamera) {
        let world = (
            lon_to_x(camera.center.1, 0.0),
            lat_to_y(camera.center.0, 0.0),
        );
        for coords in visible_tiles(world, camera.zoom, camera.viewport.0, camera.viewport.1) {
            self.request_tile(coords);
        }
    }

    pub fn request_tile(&self, coords: TileCoords) {
        {
            let (Ok(mut pending), Ok(tiles)) = (self.pending.lock(), self.tiles.lock()) else {
                return;
            };
            if pending.contains(&coords) || tiles.contains(&coords) {
                return;
            }
            pending.insert(coords);
        }

        let tiles_arc = Arc::clone(&self.tiles);
        let pending_arc = Arc::clone(&self.pending);

        // Simple background fetcher using std::thread
        std::thread::spawn(move || {
            let resp = ureq::get(&coords.url())
                .set("User-Agent", concat!("AirDist/", env!("CARGO_PKG_VERSION")))
                .timeout(std::time::Duration::from_secs(10))
                .call();

            match resp {
                Ok(response) => {
                    let mut bytes = Vec::new();
                    if std::io::Read::read_to_end(&mut response.into_reader(), &mut bytes).is_ok() {
                        if let Ok(mut tiles) = tiles_arc.lock() {
                            tiles.put(coords, image::Handle::from_bytes(bytes));
                        }
                    }
                }
                Err(e) => {
                    warn!("Failed to fetch map tile; tile={:?} error={}", coords, e);
                }
            }
            if let Ok(mut pending) = pending_arc.lock() {
                pending.remove(&coords);
            }
        });
    }
}

/// The GUI's map collaborator: camera position plus the scene to draw.
#[derive(Debug, Clone)]
pub struct MapCamera {
    pub center: (f64, f64), // (lat, lon)
    pub zoom: f64,
    pub viewport: (f32, f32),
    pub scene: RouteScene,
    /// Marker whose caption is open; closed whenever a new scene arrives.
    pub active_marker: Option<Slot>,
    last_fit: Option<BoundingBox>,
    user_moved: bool,
}

impl Default for MapCamera {
    fn default() -> Self {
        Self {
            center: geo::DEFAULT_CENTER,
            zoom: geo::DEFAULT_ZOOM,
            viewport: (1024.0, 600.0),
            scene: RouteScene::default(),
            active_marker: None,
            last_fit: None,
            user_moved: false,
        }
    }
}

impl MapCamera {
    /// Manual pan/zoom. Stops later resizes from re-applying the last fit.
    pub fn set_view(&mut self, center: (f64, f64), zoom: f64) {
        self.center = center;
        self.zoom = zoom;
        self.user_moved = true;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if self.viewport == (width, height) {
            return;
        }
        self.viewport = (width, height);
        if !self.user_moved {
            if let Some(bounds) = self.last_fit {
                self.apply_fit(&bounds);
            }
        }
    }

    /// Shows a marker's caption. Clicking the open marker again keeps it open.
    pub fn open_caption(&mut self, slot: Slot) {
        self.active_marker = Some(slot);
    }

    pub fn close_caption(&mut self) {
        self.active_marker = None;
    }

    fn apply_fit(&mut self, bounds: &BoundingBox) {
        let (center, zoom) = fit_camera(bounds, self.viewport.0, self.viewport.1);
        self.center = center;
        self.zoom = zoom;
    }
}

impl MapSurface for MapCamera {
    fn fit_bounds(&mut self, bounds: &BoundingBox) {
        self.last_fit = Some(*bounds);
        self.user_moved = false;
        self.apply_fit(bounds);
        debug!(
            "Camera fitted; bounds={:?} center={:?} zoom={:.2}",
            bounds, self.center, self.zoom
        );
    }

    fn redraw(&mut self, scene: &RouteScene) {
        self.scene = *scene;
        self.active_marker = None;
    }
}

pub struct RouteMap<'a> {
    pub camera: &'a MapCamera,
    pub tile_manager: &'a TileManager,
}

#[derive(Debug, Clone, Copy, Default)]
struct MapState {
    is_dragging: bool,
    press_position: Option<iced::Point>,
    last_cursor: Option<iced::Point>,
    // Track values between prop updates to handle multiple events per frame
    current_center: (f64, f64), // (lat, lon)
    current_zoom: f64,
    last_prop_center: Option<(f64, f64)>,
    last_prop_zoom: Option<f64>,
    last_size: Option<iced::Size>,
    generation: u64,
}

/// World pixels (zoom 0) to screen position inside `bounds`.
fn to_screen(bounds: Rectangle, camera: (f64, f64), scale: f64, world: (f64, f64)) -> (f32, f32) {
    (
        bounds.x + (bounds.width / 2.0) + ((world.0 - camera.0) * scale) as f32,
        bounds.y + (bounds.height / 2.0) + ((world.1 - camera.1) * scale) as f32,
    )
}

fn world(c: Coordinate) -> (f64, f64) {
    (lon_to_x(c.longitude, 0.0), lat_to_y(c.latitude, 0.0))
}

/// World pixels (zoom 0) to a position relative to the top-left corner of a
/// `size` view, kept in f64 so far off-screen points stay exact.
fn screen_offset(camera: (f64, f64), scale: f64, size: (f64, f64), world: (f64, f64)) -> (f64, f64) {
    (
        size.0 / 2.0 + (world.0 - camera.0) * scale,
        size.1 / 2.0 + (world.1 - camera.1) * scale,
    )
}

/// Tiles covering a `width` x `height` view centred on `camera` (world pixels at zoom 0).
pub fn visible_tiles(camera: (f64, f64), zoom: f64, width: f32, height: f32) -> Vec<TileCoords> {
    let z = zoom.floor().clamp(0.0, MAX_ZOOM) as u32;
    let num_tiles = 2i64.pow(z);
    let tile_size_z0 = TILE_SIZE / 2.0f64.powf(z as f64);
    let scale = 2.0f64.powf(zoom);

    let half_w = (width as f64 / 2.0) / scale;
    let half_h = (height as f64 / 2.0) / scale;

    let min_tx = (((camera.0 - half_w) / tile_size_z0).floor() as i64).max(0);
    let max_tx = (((camera.0 + half_w) / tile_size_z0).ceil() as i64).min(num_tiles - 1);
    let min_ty = (((camera.1 - half_h) / tile_size_z0).floor() as i64).max(0);
    let max_ty = (((camera.1 + half_h) / tile_size_z0).ceil() as i64).min(num_tiles - 1);

    let mut tiles = Vec::new();
    for x in min_tx..=max_tx {
        for y in min_ty..=max_ty {
            tiles.push(TileCoords {
                x: x as u32,
                y: y as u32,
                z,
            });
        }
    }
    tiles
}

/// Parameter range of the segment `a -> b` inside `[0, width] x [0, height]`
/// (Liang-Barsky clipping).
fn clip_segment(a: (f64, f64), b: (f64, f64), width: f64, height: f64) -> Option<(f64, f64)> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    for (p, q) in [(-dx, a.0), (dx, width - a.0), (-dy, a.1), (dy, height - a.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }

    (t0 <= t1).then_some((t0, t1))
}

/// Dots along a screen-space polyline, one every [`ROUTE_DOT_SPACING`] pixels,
/// restricted to the parts visible in a `width` x `height` view.
pub fn route_dots(path: &[(f64, f64)], width: f64, height: f64) -> Vec<(f32, f32)> {
    let mut dots = Vec::new();
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let Some((t0, t1)) = clip_segment(a, b, width, height) else {
            continue;
        };
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let visible = (dx * dx + dy * dy).sqrt() * (t1 - t0);
        let steps = (visible / ROUTE_DOT_SPACING).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = t0 + (t1 - t0) * i as f64 / steps as f64;
            dots.push(((a.0 + dx * t) as f32, (a.1 + dy * t) as f32));
        }
    }
    dots
}

impl<'a> RouteMap<'a> {
    /// Marker under a world-space point, if the route is shown.
    fn marker_at(&self, point: (f64, f64), scale: f64) -> Option<Slot> {
        let (from, to) = self.camera.scene.endpoints()?;
        let hit = |c: Coordinate| {
            let (wx, wy) = world(c);
            (wx - point.0).powi(2) + (wy - point.1).powi(2) < (MARKER_HIT_RADIUS / scale).powi(2)
        };
        // To is drawn on top, so it wins overlapping clicks
        if hit(to) {
            Some(Slot::To)
        } else if hit(from) {
            Some(Slot::From)
        } else {
            None
        }
    }
}

impl<'a, Theme, Renderer> Widget<Message, Theme, Renderer> for RouteMap<'a>
where
    Renderer: renderer::Renderer + advanced::image::Renderer<Handle = image::Handle>,
{
    fn size(&self) -> iced::Size<Length> {
        iced::Size {
            width: Length::Fill,
            height: Length::Fill,
        }
    }

    fn tag(&self) -> widget::tree::Tag {
        widget::tree::Tag::of::<MapState>()
    }

    fn state(&self) -> widget::tree::State {
        widget::tree::State::new(MapState::default())
    }

    fn layout(
        &self,
        _tree: &mut widget::Tree,
        _renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        layout::Node::new(limits.max())
    }

    fn draw(
        &self,
        tree: &widget::Tree,
        renderer: &mut Renderer,
        _theme: &Theme,
        _style: &renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let state = tree.state.downcast_ref::<MapState>();
        let bounds = layout.bounds();

        // Prefer internal state for zero-latency feedback during interactions
        let zoom = if state.last_prop_zoom == Some(self.camera.zoom) {
            state.current_zoom
        } else {
            self.camera.zoom
        };
        let (center_lat, center_lon) = if state.last_prop_center == Some(self.camera.center) {
            state.current_center
        } else {
            self.camera.center
        };

        let zoom_scale = 2.0f64.powf(zoom);
        let camera = (lon_to_x(center_lon, 0.0), lat_to_y(center_lat, 0.0));

        renderer.with_layer(bounds, |renderer| {
            renderer.fill_quad(
                renderer::Quad {
                    bounds,
                    border: Border::default(),
                    ..Default::default()
                },
                Color::from_rgb(0.05, 0.05, 0.05),
            );

            // --- Tile Layer ---
            let tiles = visible_tiles(camera, zoom, bounds.width, bounds.height);
            for coords in tiles {
                let tile_size_z0 = TILE_SIZE / 2.0f64.powf(coords.z as f64);
                let (screen_x, screen_y) = to_screen(
                    bounds,
                    camera,
                    zoom_scale,
                    (coords.x as f64 * tile_size_z0, coords.y as f64 * tile_size_z0),
                );
                let current_tile_size = (tile_size_z0 * zoom_scale) as f32;
                let tile_rect = Rectangle {
                    x: screen_x,
                    y: screen_y,
                    width: current_tile_size,
                    height: current_tile_size,
                };

                if let Some(handle) = self.tile_manager.get_tile(coords) {
                    renderer.draw_image(
                        advanced::image::Image {
                            handle,
                            filter_method: image::FilterMethod::Linear,
                            rotation: Radians(0.0),
                            opacity: 1.0,
                            snap: false,
                        },
                        tile_rect,
                    );
                } else {
                    renderer.fill_quad(
                        renderer::Quad {
                            bounds: tile_rect,
                            ..Default::default()
                        },
                        Color::from_rgb(0.1, 0.1, 0.1),
                    );
                    self.tile_manager.request_tile(coords);
                }
            }
        });

        // --- Route Layer ---
        let Some((from, to)) = self.camera.scene.endpoints() else {
            return;
        };

        renderer.with_layer(bounds, |renderer| {
            let size = (bounds.width as f64, bounds.height as f64);
            let path: Vec<(f64, f64)> = geo::great_circle_path(from, to, ROUTE_SEGMENTS)
                .into_iter()
                .map(|c| screen_offset(camera, zoom_scale, size, world(c)))
                .collect();

            for (x, y) in route_dots(&path, size.0, size.1) {
                renderer.fill_quad(
                    renderer::Quad {
                        bounds: Rectangle {
                            x: bounds.x + x - 1.0,
                            y: bounds.y + y - 1.0,
                            width: 2.0,
                            height: 2.0,
                        },
                        ..Default::default()
                    },
                    palette::ROUTE,
                );
            }

            // Markers go on top of the line
            let dot_size = 12.0;
            for (slot, coord, color) in [
                (Slot::From, from, palette::MARKER_FROM),
                (Slot::To, to, palette::MARKER_TO),
            ] {
                let (sx, sy) = to_screen(bounds, camera, zoom_scale, world(coord));
                let is_active = self.camera.active_marker == Some(slot);
                renderer.fill_quad(
                    renderer::Quad {
                        bounds: Rectangle {
                            x: sx - dot_size / 2.0,
                            y: sy - dot_size / 2.0,
                            width: dot_size,
                            height: dot_size,
                        },
                        border: Border {
                            color: if is_active {
                                palette::MARKER_ACTIVE
                            } else {
                                Color::BLACK
                            },
                            width: if is_active { 3.0 } else { 1.0 },
                            radius: (dot_size / 2.0).into(),
                        },
                        ..Default::default()
                    },
                    color,
                );
            }
        });
    }

    fn on_event(
        &mut self,
        tree: &mut widget::Tree,
        event: Event,
        layout: iced::advanced::Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn advanced::Clipboard,
        shell: &mut advanced::Shell<'_, Message>,
        _viewport: &Rectangle,
    ) -> advanced::graphics::core::event::Status {
        let state = tree.state.downcast_mut::<MapState>();
        let bounds = layout.bounds();
        let zoom_prop = self.camera.zoom;
        let center_prop = self.camera.center;

        // A new scene generation starts from a clean interaction state
        if state.generation != self.camera.scene.generation {
            state.generation = self.camera.scene.generation;
            state.is_dragging = false;
            state.press_position = None;
            state.last_cursor = None;
        }

        if state.last_size != Some(bounds.size()) {
            state.last_size = Some(bounds.size());
            shell.publish(Message::MapResized {
                width: bounds.width,
                height: bounds.height,
            });
        }

        // Initialize or sync internal state from props if props changed externally
        if state.last_prop_center != Some(center_prop) || state.last_prop_zoom != Some(zoom_prop) {
            state.current_center = center_prop;
            state.current_zoom = zoom_prop;
            state.last_prop_center = Some(center_prop);
            state.last_prop_zoom = Some(zoom_prop);
        }

        let current_zoom = state.current_zoom;
        let (center_lat, center_lon) = state.current_center;

        let camera_x = lon_to_x(center_lon, 0.0);
        let camera_y = lat_to_y(center_lat, 0.0);
        let scale = 2.0f64.powf(current_zoom);

        let cursor_point = cursor.position_in(bounds);
        let mouse_z0 = cursor_point.map(|p| {
            let rx = (p.x as f64) - (bounds.width as f64 / 2.0);
            let ry = (p.y as f64) - (bounds.height as f64 / 2.0);
            (camera_x + rx / scale, camera_y + ry / scale)
        });

        match event {
            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if let Some(p) = cursor_point {
                    let d = match delta {
                        mouse::ScrollDelta::Lines { y, .. } => y as f64,
                        mouse::ScrollDelta::Pixels { y, .. } => (y as f64) / 100.0,
                    };
                    let min_zoom = (bounds.width as f64 / TILE_SIZE).log2().max(0.0);
                    let new_zoom = (current_zoom + d * 0.2).clamp(min_zoom, MAX_ZOOM);

                    if (new_zoom - current_zoom).abs() > 0.001 {
                        let new_scale = 2.0f64.powf(new_zoom);

                        // Keep the point under the cursor fixed
                        let mx = (p.x as f64) - (bounds.width as f64 / 2.0);
                        let my = (p.y as f64) - (bounds.height as f64 / 2.0);
                        let new_camera_x = camera_x + mx / scale - mx / new_scale;
                        let new_camera_y = camera_y + my / scale - my / new_scale;

                        let new_half_w = (bounds.width as f64 / 2.0) / new_scale;
                        let new_camera_x_clamped = if new_half_w * 2.0 >= TILE_SIZE {
                            TILE_SIZE / 2.0
                        } else {
                            new_camera_x.clamp(new_half_w, TILE_SIZE - new_half_w)
                        };
                        let new_camera_y_clamped = new_camera_y.clamp(0.0, TILE_SIZE);

                        let new_center = (
                            y_to_lat(new_camera_y_clamped, 0.0),
                            x_to_lon(new_camera_x_clamped, 0.0),
                        );

                        // Update internal state immediately for next event in same frame
                        state.current_center = new_center;
                        state.current_zoom = new_zoom;

                        shell.publish(Message::MapZoom {
                            new_center,
                            new_zoom,
                        });
                        return advanced::graphics::core::event::Status::Captured;
                    }
                }
            }
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if cursor.is_over(bounds) {
                    if let Some(position) = cursor.position() {
                        state.is_dragging = true;
                        state.press_position = Some(position);
                        state.last_cursor = Some(position);
                        return advanced::graphics::core::event::Status::Captured;
                    }
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                let was_dragging = state.is_dragging;
                let press_pos = state.press_position;
                let release_pos = cursor.position();

                state.is_dragging = false;
                state.press_position = None;
                state.last_cursor = None;

                if was_dragging {
                    // Minimal movement counts as a click
                    if let (Some(p1), Some(p2), Some(point)) = (press_pos, release_pos, mouse_z0) {
                        if (p1.x - p2.x).hypot(p1.y - p2.y) < 5.0 {
                            match self.marker_at(point, scale) {
                                Some(slot) => shell.publish(Message::MarkerClicked(slot)),
                                None if self.camera.active_marker.is_some() => {
                                    shell.publish(Message::MarkerDismissed)
                                }
                                None => {}
                            }
                        }
                    }
                    return advanced::graphics::core::event::Status::Captured;
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if state.is_dragging {
                    if let Some(last_pos) = state.last_cursor {
                        let delta = position - last_pos;
                        state.last_cursor = Some(position);

                        let new_wx = camera_x - delta.x as f64 / scale;
                        let new_wy = camera_y - delta.y as f64 / scale;

                        let half_vw = (bounds.width as f64 / 2.0) / scale;
                        let half_vh = (bounds.height as f64 / 2.0) / scale;

                        let clamped_wx = if half_vw * 2.0 >= TILE_SIZE {
                            TILE_SIZE / 2.0 // Center if viewport >= world
                        } else {
                            new_wx.clamp(half_vw, TILE_SIZE - half_vw)
                        };
                        let clamped_wy = if half_vh * 2.0 >= TILE_SIZE {
                            TILE_SIZE / 2.0
                        } else {
                            new_wy.clamp(half_vh, TILE_SIZE - half_vh)
                        };

                        let new_center = (y_to_lat(clamped_wy, 0.0), x_to_lon(clamped_wx, 0.0));
                        state.current_center = new_center;

                        shell.publish(Message::MapZoom {
                            new_center,
                            new_zoom: current_zoom,
                        });
                        return advanced::graphics::core::event::Status::Captured;
                    }
                }
            }
            _ => {}
        }

        advanced::graphics::core::event::Status::Ignored
    }

    fn mouse_interaction(
        &self,
        tree: &widget::Tree,
        layout: iced::advanced::Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        let state = tree.state.downcast_ref::<MapState>();
        if state.is_dragging {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(layout.bounds()) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

impl<'a, Theme, Renderer> From<RouteMap<'a>> for Element<'a, Message, Theme, Renderer>
where
    Theme: 'a,
    Renderer: 'a + renderer::Renderer + advanced::image::Renderer<Handle = image::Handle>,
{
    fn from(map: RouteMap<'a>) -> Self {
        Self::new(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mercator_round_trip_at_airports() {
        for (lat, lon) in [(40.6413, -73.7781), (33.9416, -118.4085), (61.17, -149.99)] {
            let x = lon_to_x(lon, 3.0);
            let y = lat_to_y(lat, 3.0);
            assert!((x_to_lon(x, 3.0) - lon).abs() < 1e-9);
            assert!((y_to_lat(y, 3.0) - lat).abs() < 1e-9);
        }
    }

    #[test]
    fn test_fit_camera_frames_both_points() {
        let bounds = BoundingBox::new(33.9416, 40.6413, -118.4085, -73.7781);
        let (width, height) = (1024.0f32, 600.0f32);
        let ((lat, lon), zoom) = fit_camera(&bounds, width, height);

        assert!(bounds.contains(lat, lon));
        assert!(zoom > 0.0 && zoom <= MAX_FIT_ZOOM);

        // Both corners land inside the padded viewport
        let scale = 2.0f64.powf(zoom);
        let cx = lon_to_x(lon, 0.0);
        let cy = lat_to_y(lat, 0.0);
        for (plat, plon) in [(40.6413, -73.7781), (33.9416, -118.4085)] {
            let dx = (lon_to_x(plon, 0.0) - cx) * scale;
            let dy = (lat_to_y(plat, 0.0) - cy) * scale;
            assert!(dx.abs() <= width as f64 / 2.0 - FIT_PADDING + 1e-6);
            assert!(dy.abs() <= height as f64 / 2.0 - FIT_PADDING + 1e-6);
        }
    }

    #[test]
    fn test_fit_camera_single_point_caps_zoom() {
        let bounds = BoundingBox::new(40.6413, 40.6413, -73.7781, -73.7781);
        let ((lat, lon), zoom) = fit_camera(&bounds, 800.0, 600.0);
        assert_eq!(zoom, MAX_FIT_ZOOM);
        assert!((lat - 40.6413).abs() < 1e-9);
        assert!((lon + 73.7781).abs() < 1e-9);
    }

    #[test]
    fn test_camera_redraw_closes_caption() {
        let mut camera = MapCamera::default();
        camera.active_marker = Some(Slot::From);
        camera.redraw(&RouteScene {
            generation: 7,
            ..RouteScene::default()
        });
        assert_eq!(camera.active_marker, None);
        assert_eq!(camera.scene.generation, 7);
    }

    #[test]
    fn test_caption_stays_open_on_repeat_click() {
        let mut camera = MapCamera::default();
        camera.open_caption(Slot::To);
        camera.open_caption(Slot::To);
        assert_eq!(camera.active_marker, Some(Slot::To));

        camera.open_caption(Slot::From);
        assert_eq!(camera.active_marker, Some(Slot::From));

        camera.close_caption();
        assert_eq!(camera.active_marker, None);
    }

    #[test]
    fn test_resize_refits_until_user_moves() {
        let mut camera = MapCamera::default();
        camera.fit_bounds(&geo::CONTINENTAL_US);
        let first = camera.zoom;

        camera.resize(2048.0, 1200.0);
        assert!(camera.zoom > first);

        camera.set_view((10.0, 10.0), 5.0);
        camera.resize(800.0, 600.0);
        assert_eq!(camera.center, (10.0, 10.0));
        assert_eq!(camera.zoom, 5.0);
    }

    const JFK: Coordinate = Coordinate::new(40.6413, -73.7781);
    const LAX: Coordinate = Coordinate::new(33.9416, -118.4085);
    const VIEW: (f64, f64) = (1024.0, 600.0);

    fn route_on_screen(center: Coordinate, zoom: f64) -> Vec<(f64, f64)> {
        let scale = 2.0f64.powf(zoom);
        geo::great_circle_path(JFK, LAX, ROUTE_SEGMENTS)
            .into_iter()
            .map(|c| screen_offset(world(center), scale, VIEW, world(c)))
            .collect()
    }

    fn inside_view(dots: &[(f32, f32)]) -> bool {
        dots.iter().all(|&(x, y)| {
            (-0.5..=VIEW.0 as f32 + 0.5).contains(&x) && (-0.5..=VIEW.1 as f32 + 0.5).contains(&y)
        })
    }

    #[test]
    fn test_route_dots_bounded_at_max_zoom() {
        let path = route_on_screen(JFK, MAX_ZOOM);
        let dots = route_dots(&path, VIEW.0, VIEW.1);

        // Only the stretch leaving JFK is on screen
        assert!(!dots.is_empty());
        assert!(dots.len() < 2000, "{} dots", dots.len());
        assert!(inside_view(&dots));
    }

    #[test]
    fn test_route_dots_empty_when_route_off_screen() {
        let path = route_on_screen(Coordinate::new(0.0, 0.0), 10.0);
        assert!(route_dots(&path, VIEW.0, VIEW.1).is_empty());
    }

    #[test]
    fn test_route_dots_cover_fitted_route() {
        let bounds = BoundingBox::from_points(JFK, LAX);
        let ((lat, lon), zoom) = fit_camera(&bounds, VIEW.0 as f32, VIEW.1 as f32);
        let path = route_on_screen(Coordinate::new(lat, lon), zoom);
        let dots = route_dots(&path, VIEW.0, VIEW.1);

        assert!(inside_view(&dots));
        let first = dots[0];
        let last = dots[dots.len() - 1];
        assert!((first.0 as f64 - path[0].0).abs() < 0.01);
        assert!((first.1 as f64 - path[0].1).abs() < 0.01);
        assert!((last.0 as f64 - path[path.len() - 1].0).abs() < 0.01);
        assert!((last.1 as f64 - path[path.len() - 1].1).abs() < 0.01);
    }

    #[test]
    fn test_visible_tiles() {
        let world_center = (TILE_SIZE / 2.0, TILE_SIZE / 2.0);
        assert_eq!(
            visible_tiles(world_center, 0.0, 1024.0, 600.0),
            vec![TileCoords { x: 0, y: 0, z: 0 }]
        );

        let us = world(Coordinate::new(geo::DEFAULT_CENTER.0, geo::DEFAULT_CENTER.1));
        let tiles = visible_tiles(us, 3.5, 1024.0, 600.0);
        assert!(!tiles.is_empty() && tiles.len() <= 30);
        assert!(tiles.iter().all(|t| t.z == 3 && t.x < 8 && t.y < 8));
    }
}
