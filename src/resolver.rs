use geo::Point;
use thiserror::Error;

use crate::Restaurant;

/// Why a restaurant could not be given coordinates. None of these abort a
/// run, the record is just left as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Unresolved {
    #[error("NO_LOCALITY")]
    NoLocality,
    #[error("NO_ADDRESS")]
    NoAddress,
    #[error("ZERO_RESULTS")]
    ZeroResults,
    #[error("HTTP_ERROR: {0}")]
    Http(u16),
    #[error("ERROR: {0}")]
    Transport(String),
    #[error("ERROR: malformed response: {0}")]
    Malformed(String),
}

pub trait Resolver {
    fn name(&self) -> &'static str;

    /// Coordinates as `(lat, lng)`. Restaurants that already have both
    /// coordinates get them back unchanged.
    fn resolve(&mut self, restaurant: &Restaurant) -> Result<Point, Unresolved>;
}
