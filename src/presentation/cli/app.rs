use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// fleetwatch: simulated device fleet monitor
///
/// Simulates a fleet of servers, routers, databases and IoT devices, and
/// raises alerts when CPU or RAM stay above their thresholds.
#[derive(Parser, Debug)]
#[command(name = "fleetwatch")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Per-run overrides of the configuration file.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct FleetOverrides {
    /// Number of simulated devices
    #[arg(short = 'n', long)]
    pub devices: Option<usize>,

    /// CPU alert threshold in percent
    #[arg(long)]
    pub cpu: Option<f64>,

    /// RAM alert threshold in percent
    #[arg(long)]
    pub ram: Option<f64>,

    /// Seconds a metric must stay above its threshold
    #[arg(long, allow_negative_numbers = true)]
    pub sustain: Option<i64>,

    /// Seed for a reproducible simulation
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the monitoring loop
    #[command(alias = "r")]
    Run {
        #[command(flatten)]
        overrides: FleetOverrides,
    },

    /// Run a fixed number of ticks offline and print the result
    #[command(alias = "sim")]
    Simulate {
        /// Number of ticks to run
        #[arg(short, long, default_value = "20")]
        ticks: u64,

        /// Output the final snapshot as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: FleetOverrides,
    },

    /// Open the interactive dashboard
    #[command(alias = "w")]
    Watch {
        #[command(flatten)]
        overrides: FleetOverrides,
    },

    /// Print the effective configuration
    Config,
}

impl Commands {
    /// Overrides carried by the command, if it takes any.
    #[must_use]
    pub const fn overrides(&self) -> Option<&FleetOverrides> {
        match self {
            Self::Run { overrides }
            | Self::Simulate { overrides, .. }
            | Self::Watch { overrides } => Some(overrides),
            Self::Config => None,
        }
    }
}
