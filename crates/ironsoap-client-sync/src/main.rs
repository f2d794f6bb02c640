mod config;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Parser;
use ironsoap_client_sync::UreqHttpClient;
use ironsoap_services::{ferry::ScheduleSoap, weather::WeatherWebServiceSoap};
use tracing::{error, info, instrument};

use config::{client_config, init_logging, Args, Command, FerryCommand, TripDateArg, WeatherCommand};

#[instrument(name = "main", level = "info")]
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Without logging there is nowhere to report, so print and exit.
    if let Err(e) = init_logging(args.verbose, args.log_file.as_ref()) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run_app(&args) {
        error!("Application failed to run: {:?}", e);
        return Err(e);
    }

    Ok(())
}

fn run_app(args: &Args) -> anyhow::Result<()> {
    let config = client_config(args)?;
    let http = UreqHttpClient::new(&config).context("Failed to set up HTTP client")?;

    match &args.command {
        Command::Ferry(command) => run_ferry(command, ScheduleSoap::new(config, http)?),
        Command::Weather(command) => run_weather(command, WeatherWebServiceSoap::new(config, http)?),
    }
}

fn run_ferry(command: &FerryCommand, service: ScheduleSoap<UreqHttpClient>) -> anyhow::Result<()> {
    info!(endpoint = %service.client().endpoint(), "calling ferry schedule service");

    match command {
        FerryCommand::Seasons => {
            for season in service.get_active_scheduled_seasons()?.seasons {
                let season_name = season
                    .schedule_season
                    .map_or_else(String::new, |s| format!("{s:?}"));
                println!(
                    "{:>5}  {:<24} {:<7} {} .. {}",
                    season.schedule_id,
                    season.schedule_name,
                    season_name,
                    format_date(season.schedule_start),
                    format_date(season.schedule_end),
                );
            }
        }
        FerryCommand::Routes(date) => {
            for route in service.get_all_routes(trip_date(date))?.routes {
                println!("{:>4}  {:<10} {}", route.route_id, route.route_abbrev, route.description);
            }
        }
        FerryCommand::RouteDetails(date) => {
            for route in service.get_all_route_details(trip_date(date))?.routes {
                println!(
                    "{:>4}  {:<10} {:<40} crossing {} min{}",
                    route.route_id,
                    route.route_abbrev,
                    route.description,
                    route.crossing_time,
                    if route.reservation_flag { ", reservations" } else { "" },
                );
            }
        }
        FerryCommand::DateRange => {
            let range = service.get_valid_date_range()?;
            println!("{} .. {}", format_date(range.date_from), format_date(range.date_thru));
        }
    }

    Ok(())
}

fn run_weather(command: &WeatherCommand, service: WeatherWebServiceSoap<UreqHttpClient>) -> anyhow::Result<()> {
    info!(endpoint = %service.client().endpoint(), "calling weather service");

    let lines = match command {
        WeatherCommand::Provinces => service.get_support_province()?,
        WeatherCommand::Cities { province } => service.get_support_city(province)?,
        WeatherCommand::City { name } => service.get_weather_by_city_name(name)?,
    };

    for line in lines {
        println!("{line}");
    }

    Ok(())
}

fn trip_date(arg: &TripDateArg) -> DateTime<Utc> {
    let date: NaiveDate = arg.date.unwrap_or_else(|| Utc::now().date_naive());
    date.and_time(NaiveTime::MIN).and_utc()
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(|| "?".to_owned(), |d| d.format("%Y-%m-%d").to_string())
}
