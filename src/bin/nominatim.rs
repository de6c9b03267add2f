use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use restaurant_geocoder::{
    cli,
    nominatim::{COUNTRY, COUNTRY_CODE, ENDPOINT, USER_AGENT},
    run, NominatimConfig, NominatimResolver,
};

/// Geocode restaurants from their postal address with Nominatim
/// (OpenStreetMap), one request at a time.
#[derive(Debug, Parser)]
struct Cli {
    #[command(flatten)]
    paths: cli::PathArgs,
    #[arg(long, env = "NOMINATIM_ENDPOINT", default_value = ENDPOINT)]
    endpoint: String,
    #[arg(long, env = "NOMINATIM_USER_AGENT", default_value = USER_AGENT)]
    user_agent: String,
    /// Country name appended to every query
    #[arg(long, default_value = COUNTRY)]
    country: String,
    /// Restrict results to this country
    #[arg(long, default_value = COUNTRY_CODE)]
    country_code: String,
    /// Minimum delay between requests, Nominatim allows one per second
    #[arg(long, default_value_t = 1100)]
    delay_ms: u64,
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

fn main() -> Result<()> {
    cli::init_logging();
    let cli = Cli::parse();

    let mut resolver = NominatimResolver::new(NominatimConfig {
        endpoint: cli.endpoint,
        user_agent: cli.user_agent,
        country: cli.country,
        country_code: cli.country_code,
        delay: Duration::from_millis(cli.delay_ms),
        timeout: Duration::from_secs(cli.timeout_secs),
    });
    run(&cli.paths.config(), &mut resolver)?;

    Ok(())
}
