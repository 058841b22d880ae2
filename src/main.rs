use aqrab::report::{build_report, render_report};
use aqrab::resolution::PolarCircleResolution;
use aqrab::solar::HorizonScan;
use aqrab::{server, Coordinates};
use chrono::{NaiveDate, Utc};
use clap::Parser;

/// Aqrab: polar circle resolution for prayer-time astronomy.
///
/// Where a calendar date has no sunrise or no sunset, searches for a
/// nearby day (aqrab-yaum) or a latitude closer to the equator
/// (aqrab-balad) that restores both events, and reports the solar times
/// for the date and the day after.
///
/// Examples:
///   aqrab --lat 78.2232 --lon 15.6267 --date 2025-12-21 -r aqrab-balad
///   aqrab --lat 69.6492 --lon 18.9553 -r aqrab-yaum
///   aqrab --serve --port 8080
#[derive(Parser)]
#[command(name = "aqrab", version, about, long_about = None)]
struct Cli {
    /// Latitude (-90 to 90).
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude (-180 to 180).
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Date (YYYY-MM-DD). Defaults to today (UTC).
    #[arg(long, short = 'd')]
    date: Option<String>,

    /// Resolution strategy: "aqrab-yaum" (nearest day), "aqrab-balad"
    /// (nearest latitude), or "unresolved" (report raw values).
    #[arg(long, short = 'r', default_value = "unresolved", value_parser = parse_resolution)]
    resolution: PolarCircleResolution,

    /// Run the HTTP API instead of a one-shot computation.
    #[arg(long)]
    serve: bool,

    /// Bind host for --serve.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bind port for --serve.
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn parse_resolution(s: &str) -> Result<PolarCircleResolution, String> {
    s.parse()
}

fn main() {
    let cli = Cli::parse();

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("Error: Cannot start async runtime: {}", e);
            std::process::exit(1);
        });
        runtime.block_on(server::start(&cli.host, cli.port, cli.resolution));
        return;
    }

    // ── Validate coordinates ────────────────────────────────────

    let (lat, lon) = match (cli.lat, cli.lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            eprintln!("Error: No location specified.");
            eprintln!();
            eprintln!("Usage:");
            eprintln!("  aqrab --lat 78.2232 --lon 15.6267 --date 2025-12-21 -r aqrab-balad");
            eprintln!("  aqrab --serve");
            std::process::exit(1);
        }
    };
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        eprintln!("Error: Invalid coordinates. Lat: -90..90, Lon: -180..180");
        std::process::exit(1);
    }

    // ── Parse date ──────────────────────────────────────────────

    let date = match &cli.date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap_or_else(|e| {
            eprintln!("Error: Invalid date '{}': {}", d, e);
            std::process::exit(1);
        }),
        None => Utc::now().naive_utc().date(),
    };

    // ── Resolve ─────────────────────────────────────────────────

    let coordinates = Coordinates::new(lat, lon);
    let report = build_report(&HorizonScan, cli.resolution, date, &coordinates);

    // Summary to stderr, JSON to stdout
    eprint!("{}", render_report(&report));
    println!("{}", serde_json::to_string_pretty(&report).unwrap());
}
