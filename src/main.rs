use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use rotaflex::api::AppState;
use rotaflex::{
    Coordinate, GeocodeClient, ReqwestTransport, RotaflexConfig, RotaflexError, RouteClient,
    logging, web,
};

#[derive(Parser, Debug)]
#[command(name = "rotaflex")]
#[command(version, about = "Address lookup and driving routes")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Autocomplete an address
    Suggest { query: String },
    /// Resolve an address to `lon,lat`
    Geocode { address: String },
    /// Driving route between two addresses
    Route {
        origin: String,
        destination: String,
        /// Routing service API key
        #[arg(long, env = "ORS_API_KEY")]
        api_key: Option<String>,
        /// Print the raw route geometry as JSON
        #[arg(long)]
        geometry: bool,
    },
    /// Driving route between two `lon,lat` coordinates
    Directions {
        #[arg(value_parser = Coordinate::parse, allow_hyphen_values = true)]
        origin: Coordinate,
        #[arg(value_parser = Coordinate::parse, allow_hyphen_values = true)]
        destination: Coordinate,
        /// Routing service API key
        #[arg(long, env = "ORS_API_KEY")]
        api_key: Option<String>,
        /// Print the raw route geometry as JSON
        #[arg(long)]
        geometry: bool,
    },
    /// Serve the JSON API
    Serve {
        /// Listen address
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<RotaflexError>() {
                Some(error) => eprintln!("Error: {}", error.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = RotaflexConfig::load_from_path(cli.config)?;
    logging::init(&config.logging, cli.verbose)?;

    let transport = Arc::new(ReqwestTransport::new(&config.http)?);

    match cli.command {
        Command::Suggest { query } => {
            let geocoder = GeocodeClient::new(transport, &config.geocoding);
            for suggestion in geocoder.suggest(&query).await? {
                println!("{}  ({}, {})", suggestion.display_name, suggestion.lon, suggestion.lat);
            }
        }
        Command::Geocode { address } => {
            let routes = RouteClient::new(transport, &config.geocoding, &config.routing);
            println!("{}", routes.geocode(&address).await?);
        }
        Command::Route {
            origin,
            destination,
            api_key,
            geometry,
        } => {
            let api_key = resolve_api_key(api_key, &config)?;
            let routes = RouteClient::new(transport, &config.geocoding, &config.routing);
            let plan = routes.plan(&origin, &destination, &api_key).await?;

            println!("From:     {origin} ({})", plan.origin);
            println!("To:       {destination} ({})", plan.destination);
            println!("Distance: {}", plan.route.format_distance());
            println!("Duration: {}", plan.route.format_duration());
            if geometry {
                println!("{}", serde_json::to_string_pretty(&plan.route.geometry)?);
            }
        }
        Command::Directions {
            origin,
            destination,
            api_key,
            geometry,
        } => {
            let api_key = resolve_api_key(api_key, &config)?;
            let routes = RouteClient::new(transport, &config.geocoding, &config.routing);
            let route = routes.compute_route(origin, destination, &api_key).await?;

            println!("Distance: {}", route.format_distance());
            println!("Duration: {}", route.format_duration());
            if geometry {
                println!("{}", serde_json::to_string_pretty(&route.geometry)?);
            }
        }
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            web::run(AppState::new(transport, &config), &bind).await?;
        }
    }

    Ok(())
}

/// Flag or `ORS_API_KEY` first, then `routing.api_key`
fn resolve_api_key(flag: Option<String>, config: &RotaflexConfig) -> Result<String> {
    flag.filter(|key| !key.is_empty())
        .or_else(|| config.routing.api_key.clone())
        .ok_or_else(|| RotaflexError::invalid_input("Missing routing API key").into())
}
