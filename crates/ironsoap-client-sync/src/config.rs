use std::{path::PathBuf, sync::OnceLock, time::Duration};

use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use ironsoap_client_core::{BasicAuth, ClientConfig, TlsVerification};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, prelude::*, registry::Registry, EnvFilter};

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Sets up a panic hook so a panic is recorded in the log before exit.
fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!("A panic occurred: {}", panic_info);
    }));
}

/// Command line client for the ferry schedule and weather SOAP services
#[derive(Parser)]
#[command(name = "ironsoap", version, about, long_about = None)]
pub struct Args {
    /// Service URL; each service has a published default
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// DANGEROUS: accept any TLS certificate for any host name.
    /// Only for test rigs; the exchange can be read and altered in transit!
    #[arg(
        long,
        global = true,
        help = "DANGEROUS: skip TLS certificate and hostname verification"
    )]
    pub insecure: bool,

    /// Login for HTTP Basic authentication
    #[arg(long, global = true, env = "IRONSOAP_LOGIN")]
    pub login: Option<String>,

    /// Password for HTTP Basic authentication
    #[arg(long, global = true, env = "IRONSOAP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Bound on each whole exchange, in seconds
    #[arg(long, global = true)]
    pub deadline_secs: Option<u64>,

    /// Verbose logging (can be repeated for more verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Washington State Ferries schedule service
    #[command(subcommand)]
    Ferry(FerryCommand),

    /// WebXml.com.cn weather service
    #[command(subcommand)]
    Weather(WeatherCommand),
}

#[derive(Subcommand)]
pub enum FerryCommand {
    /// Scheduled seasons currently active or available
    Seasons,

    /// Routes sailing on a date
    Routes(TripDateArg),

    /// Routes sailing on a date, with notes and flags
    RouteDetails(TripDateArg),

    /// Dates schedule data is available for
    DateRange,
}

#[derive(ClapArgs)]
pub struct TripDateArg {
    /// Trip date as YYYY-MM-DD; today (UTC) when omitted
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum WeatherCommand {
    /// Supported provinces
    Provinces,

    /// Supported cities of a province
    Cities {
        #[arg(long)]
        province: String,
    },

    /// Weather report for a city
    City { name: String },
}

/// Initialize logging, to `log_file` when given and stderr otherwise.
pub fn init_logging(verbose_level: u8, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    setup_panic_hook();

    // Bridge logs from the `log` crate (ureq, native-tls) to `tracing`
    LogTracer::init().ok();

    let (nb_writer, guard) = match log_file {
        Some(path) => tracing_appender::non_blocking(std::fs::File::create(path)?),
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    // Keep the guard for the whole program so buffered lines get flushed.
    if LOG_GUARD.set(guard).is_err() {
        tracing::warn!("LOG_GUARD was already set. This may indicate a problem in initialization.");
    }

    let filter_str = match verbose_level {
        0 => "warn,ureq=error",
        1 => "info,ureq=warn",
        2 => "debug,ureq=info",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    let subscriber = Registry::default().with(env_filter).with(
        fmt::layer()
            .with_writer(nb_writer)
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .with_ansi(log_file.is_none())
            .compact(),
    );

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!("Logging system initialized.");

    Ok(())
}

/// Maps the global flags onto a client configuration.
pub fn client_config(args: &Args) -> anyhow::Result<ClientConfig> {
    let credentials = match (&args.login, &args.password) {
        (Some(login), password) => Some(BasicAuth::new(login, password.clone().unwrap_or_default())),
        (None, Some(_)) => anyhow::bail!("--password given without --login"),
        (None, None) => None,
    };

    let tls = if args.insecure {
        tracing::warn!("TLS verification disabled - this is INSECURE!");
        TlsVerification::DangerAcceptInvalidCerts
    } else {
        TlsVerification::Verify
    };

    let config = ClientConfig::builder()
        .endpoint(args.endpoint.clone().unwrap_or_default())
        .tls(tls)
        .build();

    Ok(ClientConfig {
        credentials,
        deadline: args.deadline_secs.map(Duration::from_secs),
        ..config
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_config() {
        let args = Args::try_parse_from([
            "ironsoap",
            "--insecure",
            "--login",
            "admin",
            "--password",
            "1234",
            "--deadline-secs",
            "5",
            "weather",
            "city",
            "北京",
        ])
        .unwrap();

        let config = client_config(&args).unwrap();

        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalidCerts);
        assert_eq!(config.deadline, Some(Duration::from_secs(5)));
        assert_eq!(config.credentials.as_ref().map(BasicAuth::login), Some("admin"));
        assert!(config.endpoint.is_empty());
        assert!(matches!(
            args.command,
            Command::Weather(WeatherCommand::City { ref name }) if name == "北京"
        ));
    }

    #[test]
    fn trip_date_is_parsed() {
        let args = Args::try_parse_from(["ironsoap", "ferry", "routes", "--date", "2024-05-01"]).unwrap();

        let Command::Ferry(FerryCommand::Routes(trip)) = args.command else {
            panic!("expected ferry routes");
        };
        assert_eq!(trip.date, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn password_requires_login() {
        let args = Args::try_parse_from(["ironsoap", "--password", "x", "ferry", "seasons"]).unwrap();
        assert!(client_config(&args).is_err());
    }
}
