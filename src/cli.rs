use std::path::PathBuf;

use clap::Args;
use env_logger::Env;

use crate::{runner::DEFAULT_PATH, Config};

#[derive(Debug, Args)]
pub struct PathArgs {
    /// Restaurants file to read
    #[arg(long, env = "GEOCODE_INPUT", default_value = DEFAULT_PATH)]
    pub input: PathBuf,
    /// Where to write the result, defaults to rewriting the input in place
    #[arg(long, env = "GEOCODE_OUTPUT")]
    pub output: Option<PathBuf>,
}

impl PathArgs {
    pub fn config(self) -> Config {
        Config {
            output: self.output.unwrap_or_else(|| self.input.clone()),
            input: self.input,
        }
    }
}

/// Logs go to stderr, `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        paths: PathArgs,
    }

    #[test]
    fn defaults_to_in_place() {
        let config = Cli::parse_from(["test"]).paths.config();
        assert_eq!(config.input, PathBuf::from("Restaurants.json"));
        assert_eq!(config.output, config.input);

        let config = Cli::parse_from(["test", "--input", "a.json", "--output", "b.json"])
            .paths
            .config();
        assert_eq!(config.input, PathBuf::from("a.json"));
        assert_eq!(config.output, PathBuf::from("b.json"));
    }
}
