// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use airdist_core::lookup::HttpLocationSource;
use airdist_core::{
    AirportResolver, BoundingBox, DistanceCalculator, MapSurface, RouteScene, Settings, Slot,
};
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::debug;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Location lookup endpoint
    #[arg(long, env = "AIRDIST_ENDPOINT")]
    endpoint: Option<String>,

    /// Country code candidates must belong to
    #[arg(long, env = "AIRDIST_COUNTRY")]
    country: Option<String>,

    /// Maximum records requested per lookup
    #[arg(long)]
    limit: Option<u32>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List airports matching a query
    Search { query: String },
    /// Great-circle distance between two airports
    Distance { from: String, to: String },
}

/// Prints the camera requests a map would receive.
#[derive(Default)]
struct ConsoleMap {
    framed: Option<BoundingBox>,
}

impl MapSurface for ConsoleMap {
    fn fit_bounds(&mut self, bounds: &BoundingBox) {
        self.framed = Some(*bounds);
    }

    fn redraw(&mut self, scene: &RouteScene) {
        debug!(
            "Scene redraw; generation={} show_route={}",
            scene.generation, scene.show_route
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Warn
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let mut settings = Settings::load();
    if let Some(endpoint) = cli.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(country) = cli.country {
        settings.country = country;
    }
    if let Some(limit) = cli.limit {
        settings.result_limit = limit;
    }

    let resolver = AirportResolver::new(HttpLocationSource::new(&settings)?, &settings);

    match &cli.command {
        Commands::Search { query } => {
            let found = resolver.search(query).await;
            if found.is_empty() {
                println!("No airports found matching '{}'", query);
            }
            for airport in &found {
                println!(
                    "{}  {:<50} {:>9.4} {:>10.4}",
                    airport.iata(),
                    airport.name(),
                    airport.latitude(),
                    airport.longitude()
                );
            }
        }
        Commands::Distance { from, to } => {
            let mut calc = DistanceCalculator::new(ConsoleMap::default());

            for (slot, query) in [(Slot::From, from), (Slot::To, to)] {
                let ticket = calc.begin_search(slot, query.as_str());
                let found = resolver.search(query).await;
                // Exact IATA code first, otherwise the endpoint's best match
                let index = found
                    .find_iata(query)
                    .and_then(|hit| found.iter().position(|a| a.same_airport(hit)))
                    .unwrap_or(0);
                calc.finish_search(slot, &ticket, found);
                if !calc.pick_candidate(slot, index) {
                    bail!("No airport found for {} '{}'", slot, query);
                }
            }

            let Some(line) = calc.calculate().map(|r| r.result_line()) else {
                bail!("Distance could not be calculated");
            };
            println!("{}", line);
            if let Some(b) = calc.map().framed {
                println!(
                    "Bounds: lat {:.4}..{:.4}, lon {:.4}..{:.4}",
                    b.min_lat, b.max_lat, b.min_lon, b.max_lon
                );
            }
        }
    }

    Ok(())
}
