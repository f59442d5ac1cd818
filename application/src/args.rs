//! [`Args`] definitions.

use clap::Parser;

/// Booking server of the Plumeria Retreat resort.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    ///
    /// A missing file is fine: defaults and `CONF.`-prefixed environment
    /// variables are used then.
    #[arg(short, long, env = "PLUMERIA_CONFIG", default_value = "config.toml")]
    pub config: String,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use super::Args;

    #[test]
    fn reads_config_path() {
        let args = Args::try_parse_from(["plumeria", "-c", "prod.toml"]);
        assert_eq!(args.unwrap().config, "prod.toml");

        assert!(Args::try_parse_from(["plumeria", "--unknown"]).is_err());
    }
}
