use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::FuelType;

#[non_exhaustive]
#[derive(Parser)]
#[command(author, version, about)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
    #[arg(short, long, value_enum, help = "Fuel type to rank by")]
    pub fuel: Option<FuelArg>,
    #[arg(
        short,
        long,
        help = "Search radius in kilometers for coordinate queries"
    )]
    pub radius: Option<f64>,
    #[arg(long, help = "Use the built-in offline station list")]
    pub offline: bool,
    #[arg(long, help = "Ignore the cached snapshot and refetch")]
    pub refresh: bool,
    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,
    #[arg(short, long, help = "Custom config file path", value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[arg(
        help = "City name or `lat lon` pair (optional, reads from stdin if `-`, no query starts interactive mode)"
    )]
    pub query: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FuelArg {
    #[clap(name = "95")]
    Gasoline95,
    #[clap(name = "98")]
    Gasoline98,
    #[clap(name = "diesel")]
    DieselA,
    #[clap(name = "diesel-premium")]
    DieselPremium,
}

impl From<FuelArg> for FuelType {
    #[inline]
    fn from(arg: FuelArg) -> Self {
        match arg {
            FuelArg::Gasoline95 => Self::Gasoline95,
            FuelArg::Gasoline98 => Self::Gasoline98,
            FuelArg::DieselA => Self::DieselA,
            FuelArg::DieselPremium => Self::DieselPremium,
        }
    }
}

#[non_exhaustive]
#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Create a default configuration file")]
    Init,
}
