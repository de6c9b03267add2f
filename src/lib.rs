pub mod cli;
pub mod dataset;
pub mod nominatim;
pub mod resolver;
pub mod runner;
pub mod table;
pub mod utils;

pub use dataset::{Dataset, Restaurant};
pub use nominatim::{NominatimConfig, NominatimResolver, Throttle};
pub use resolver::{Resolver, Unresolved};
pub use runner::{run, Config, Summary};
pub use table::{Locality, LocationTable, TableResolver};
