use std::{
    thread::sleep,
    time::{Duration, Instant},
};

use geo::Point;
use itertools::Itertools;
use log::{debug, info};
use serde::Deserialize;
use ureq::{Agent, AgentBuilder};

use crate::{Resolver, Restaurant, Unresolved};

pub const ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
// Nominatim's usage policy blocks clients without an identifying user agent
pub const USER_AGENT: &str = "ChooseThere/1.0 (iOS App Development; contact@example.com)";
pub const COUNTRY: &str = "Brasil";
pub const COUNTRY_CODE: &str = "br";
pub const DELAY: Duration = Duration::from_millis(1100);
pub const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct NominatimConfig {
    pub endpoint: String,
    pub user_agent: String,
    /// Appended to every query.
    pub country: String,
    /// Passed as `countrycodes`.
    pub country_code: String,
    /// Minimum time between two requests.
    pub delay: Duration,
    pub timeout: Duration,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            endpoint: ENDPOINT.to_string(),
            user_agent: USER_AGENT.to_string(),
            country: COUNTRY.to_string(),
            country_code: COUNTRY_CODE.to_string(),
            delay: DELAY,
            timeout: TIMEOUT,
        }
    }
}

/// Free-text search query built from the postal address only. Without a
/// street address the query falls back to city and state, and without a
/// city there is nothing to search for.
pub fn build_query(restaurant: &Restaurant, country: &str) -> Option<String> {
    let address = restaurant.address();
    let city = restaurant.city();
    let state = restaurant.state();

    if address.is_empty() && city.is_empty() {
        return None;
    }

    Some(
        [address, city, state, country]
            .iter()
            .filter(|x| !x.is_empty())
            .join(", "),
    )
}

/// Enforces a minimum interval between consecutive calls. The first call
/// never waits.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                sleep(self.interval - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

pub struct NominatimResolver {
    agent: Agent,
    config: NominatimConfig,
    throttle: Throttle,
}

impl NominatimResolver {
    pub fn new(config: NominatimConfig) -> Self {
        let agent = AgentBuilder::new()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build();
        let throttle = Throttle::new(config.delay);
        Self {
            agent,
            config,
            throttle,
        }
    }

    pub fn search(&mut self, query: &str) -> Result<Point, Unresolved> {
        self.throttle.wait();

        debug!("GET {} q={query:?}", self.config.endpoint);
        let response = self
            .agent
            .get(&self.config.endpoint)
            .query("q", query)
            .query("format", "json")
            .query("limit", "1")
            .query("addressdetails", "1")
            .query("countrycodes", &self.config.country_code)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => Unresolved::Http(code),
                ureq::Error::Transport(x) => Unresolved::Transport(x.to_string()),
            })?;

        let places: Vec<Place> = response
            .into_json()
            .map_err(|e| Unresolved::Malformed(e.to_string()))?;
        places
            .into_iter()
            .next()
            .ok_or(Unresolved::ZeroResults)?
            .point()
    }
}

impl Resolver for NominatimResolver {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    fn resolve(&mut self, restaurant: &Restaurant) -> Result<Point, Unresolved> {
        if let Some(x) = restaurant.coordinates() {
            return Ok(x);
        }

        let query = build_query(restaurant, &self.config.country).ok_or(Unresolved::NoAddress)?;
        info!("Query: {query}");
        self.search(&query)
    }
}

// other fields (display_name, address, ...) are ignored
#[derive(Debug, Deserialize)]
struct Place {
    lat: Degrees,
    lon: Degrees,
}

impl Place {
    fn point(self) -> Result<Point, Unresolved> {
        Ok(Point::new(self.lat.parse()?, self.lon.parse()?))
    }
}

/// Nominatim sends coordinates as strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Text(String),
    Number(f64),
}

impl Degrees {
    fn parse(self) -> Result<f64, Unresolved> {
        let x = match &self {
            Self::Number(x) => Some(*x),
            Self::Text(x) => x.trim().parse().ok(),
        };
        // "NaN" and "inf" parse fine but can't be stored as JSON numbers
        x.filter(|x: &f64| x.is_finite())
            .ok_or_else(|| Unresolved::Malformed(format!("invalid coordinate {self:?}")))
    }
}
