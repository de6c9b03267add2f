use std::{
    fmt,
    path::{Path, PathBuf},
};

use anyhow::Result;
use log::{info, warn};

use crate::{utils::progress_bar, Dataset, Resolver};

pub const DEFAULT_PATH: &str = "Restaurants.json";

#[derive(Clone, Debug)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Config {
    pub fn in_place(path: impl AsRef<Path>) -> Self {
        Self {
            input: path.as_ref().to_path_buf(),
            output: path.as_ref().to_path_buf(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::in_place(DEFAULT_PATH)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Geocoded: {}/{}", self.updated, self.total)?;
        writeln!(f, "Already had coordinates: {}", self.skipped)?;
        write!(f, "Failed: {}", self.failed)
    }
}

/// Resolves every restaurant that lacks coordinates, then rewrites the
/// dataset once at the end. Nothing is written if loading fails.
pub fn run(config: &Config, resolver: &mut impl Resolver) -> Result<Summary> {
    println!("Input: {}", config.input.display());
    println!("Output: {}", config.output.display());

    let mut dataset = Dataset::load(&config.input)?;
    let restaurants = dataset.restaurants_mut();
    let total = restaurants.len();
    println!("Loaded {total} restaurants");
    info!("Resolving coordinates with {}", resolver.name());

    let mut summary = Summary {
        total,
        ..Default::default()
    };

    let pb = progress_bar(total as u64);
    for (idx, restaurant) in restaurants.iter_mut().enumerate() {
        pb.inc(1);
        if restaurant.is_resolved() {
            summary.skipped += 1;
            continue;
        }

        let name = restaurant.name().to_string();
        match resolver.resolve(restaurant) {
            Ok(point) => {
                restaurant.set_coordinates(point);
                summary.updated += 1;

                let (lat, lng) = point.x_y();
                pb.suspend(|| {
                    println!("[{}/{total}] {name}: lat={lat:.6}, lng={lng:.6}", idx + 1)
                });
            }
            Err(e) => {
                summary.failed += 1;
                warn!("{name} left unresolved: {e}");
                pb.suspend(|| println!("[{}/{total}] {name}: {e}", idx + 1));
            }
        }
    }
    pb.finish_and_clear();

    dataset.save(&config.output)?;

    println!();
    println!("{summary}");
    println!("Saved to {}", config.output.display());

    Ok(summary)
}
