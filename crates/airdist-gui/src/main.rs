// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use airdist_core::lookup::HttpLocationSource;
use airdist_core::{
    AirportResolver, Candidates, DistanceCalculator, QueryTicket, Settings, Slot,
};
use iced::widget::{button, column, container, row, text, text_input, Column};
use iced::{Element, Length, Subscription, Task, Theme};
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

mod map;
mod style;
use map::{MapCamera, RouteMap, TileManager};

const MAP_HEIGHT: f32 = 600.0;

fn main() -> anyhow::Result<()> {
    init_logging();

    let settings = Settings::load();
    let source = HttpLocationSource::new(&settings)?;
    info!(
        "Starting AirDist; endpoint={} country={}",
        settings.endpoint, settings.country
    );

    iced::application("AirDist", App::update, App::view)
        .theme(|_| Theme::Dark)
        .subscription(App::subscription)
        .run_with(move || App::new(settings, source))?;
    Ok(())
}

/// Terminal plus `airdist.log` in the config root; terminal only if the file can't be created.
fn init_logging() {
    use simplelog::{
        ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger,
    };

    let term = TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let root = airdist_core::get_config_root();
    let file = std::fs::create_dir_all(&root)
        .and_then(|_| std::fs::File::create(root.join("airdist.log")));

    let result = match file {
        Ok(file) => CombinedLogger::init(vec![
            term,
            WriteLogger::new(LevelFilter::Debug, Config::default(), file),
        ]),
        Err(_) => CombinedLogger::init(vec![term]),
    };
    if let Err(e) = result {
        eprintln!("Logger already initialised: {}", e);
    }
}

#[derive(Debug, Clone)]
enum Message {
    // Search boxes
    SearchChanged(Slot, String),
    SearchResolved(Slot, QueryTicket, Candidates),
    PickCandidate(Slot, usize),
    ClearSlot(Slot),

    Calculate,

    // Map
    MapZoom {
        new_center: (f64, f64),
        new_zoom: f64,
    },
    MapResized {
        width: f32,
        height: f32,
    },
    MarkerClicked(Slot),
    MarkerDismissed,
    TilesTick,
}

struct App {
    calculator: DistanceCalculator<MapCamera>,
    resolver: Arc<AirportResolver<HttpLocationSource>>,
    debounce: Duration,
    tile_manager: TileManager,
}

impl App {
    fn new(settings: Settings, source: HttpLocationSource) -> (Self, Task<Message>) {
        let mut calculator = DistanceCalculator::new(MapCamera::default());
        calculator.map_ready();

        let app = Self {
            calculator,
            resolver: Arc::new(AirportResolver::new(source, &settings)),
            debounce: Duration::from_millis(settings.debounce_ms),
            tile_manager: TileManager::new(),
        };
        app.tile_manager.request_visible(app.calculator.map());
        (app, Task::none())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let task = self.handle(message);
        // Fetch tiles for wherever the camera ended up
        self.tile_manager.request_visible(self.calculator.map());
        task
    }

    fn handle(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SearchChanged(slot, value) => {
                let Some(ticket) = self.calculator.edit_search(slot, value.clone()) else {
                    return Task::none();
                };
                if !self.resolver.should_query(&value) {
                    self.calculator
                        .finish_search(slot, &ticket, Candidates::empty(value));
                    return Task::none();
                }

                let resolver = Arc::clone(&self.resolver);
                let debounce = self.debounce;
                Task::perform(
                    async move {
                        tokio::time::sleep(debounce).await;
                        // Typing continued during the pause; skip the request
                        let candidates = if ticket.is_current() {
                            resolver.search(&value).await
                        } else {
                            Candidates::empty(value)
                        };
                        (ticket, candidates)
                    },
                    move |(ticket, candidates)| Message::SearchResolved(slot, ticket, candidates),
                )
            }
            Message::SearchResolved(slot, ticket, candidates) => {
                if !self.calculator.finish_search(slot, &ticket, candidates) {
                    debug!("Dropped superseded suggestions; slot={} seq={}", slot, ticket.seq());
                }
                Task::none()
            }
            Message::PickCandidate(slot, index) => {
                self.calculator.pick_candidate(slot, index);
                Task::none()
            }
            Message::ClearSlot(slot) => {
                self.calculator.clear_slot(slot);
                Task::none()
            }
            Message::Calculate => {
                self.calculator.calculate();
                Task::none()
            }
            Message::MapZoom {
                new_center,
                new_zoom,
            } => {
                self.calculator.map_mut().set_view(new_center, new_zoom);
                Task::none()
            }
            Message::MapResized { width, height } => {
                self.calculator.map_mut().resize(width, height);
                Task::none()
            }
            Message::MarkerClicked(slot) => {
                self.calculator.map_mut().open_caption(slot);
                Task::none()
            }
            Message::MarkerDismissed => {
                self.calculator.map_mut().close_caption();
                Task::none()
            }
            Message::TilesTick => Task::none(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        // Redraw while map tiles stream in
        if self.tile_manager.has_pending() {
            iced::time::every(Duration::from_millis(250)).map(|_| Message::TilesTick)
        } else {
            Subscription::none()
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let header = text("U.S. Airport Distance Calculator in Nautical Miles (NM)")
            .size(24)
            .color(style::palette::TEXT_PRIMARY);

        let inputs = row![
            self.view_search(Slot::From),
            self.view_search(Slot::To)
        ]
        .spacing(20);

        let calculate = button(text("Calculate Distance"))
            .on_press(Message::Calculate)
            .padding([8, 16])
            .style(style::button_primary);

        let mut content = column![header, inputs, calculate].spacing(16);

        if let Some(line) = self.calculator.result_line() {
            content = content.push(
                container(text(line).size(18))
                    .padding(12)
                    .width(Length::Fill)
                    .style(style::container_result),
            );
        }

        let map = container(RouteMap {
            camera: self.calculator.map(),
            tile_manager: &self.tile_manager,
        })
        .width(Length::Fill)
        .height(Length::Fixed(MAP_HEIGHT))
        .style(style::container_card);
        content = content.push(map);

        if let Some(caption) = self.marker_caption() {
            content = content.push(text(caption).color(style::palette::TEXT_SECONDARY));
        }

        container(content)
            .padding(20)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(style::container_panel)
            .into()
    }

    fn view_search(&self, slot: Slot) -> Element<'_, Message> {
        let search = self.calculator.search_box(slot);
        let placeholder = match slot {
            Slot::From => "Search departure airport...",
            Slot::To => "Search arrival airport...",
        };

        let input = row![
            text_input(placeholder, search.text())
                .on_input(move |value| Message::SearchChanged(slot, value))
                .padding(8),
            button(text("Clear"))
                .on_press(Message::ClearSlot(slot))
                .padding(8)
                .style(style::button_secondary),
        ]
        .spacing(8);

        let selected = match self.calculator.selection().slot(slot) {
            Some(airport) => text(format!("{}: {}", slot, airport.label())),
            None => text(format!("{}: none selected", slot)),
        }
        .color(style::palette::TEXT_SECONDARY);

        let suggestions = search.candidates().iter().enumerate().fold(
            Column::new().spacing(2),
            |col, (index, airport)| {
                col.push(
                    button(text(airport.label()).size(14))
                        .on_press(Message::PickCandidate(slot, index))
                        .width(Length::Fill)
                        .style(style::button_suggestion),
                )
            },
        );

        column![text(slot.label()).size(16), input, selected, suggestions]
            .spacing(6)
            .width(Length::FillPortion(1))
            .into()
    }

    /// Info-window text for the clicked marker.
    fn marker_caption(&self) -> Option<String> {
        let slot = self.calculator.map().active_marker?;
        let airport = self.calculator.selection().slot(slot)?;
        Some(format!("{} Airport: {}", slot, airport.label()))
    }
}
