//! Clap derive structures for the `fleetdesk` CLI.
//!
//! Defines the command tree, global flags, and shared field groups.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fleetdesk -- manage trucks, drivers, and assignments from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "fleetdesk",
    version,
    about = "Manage a truck fleet from the command line",
    long_about = "A console for a fleet management backend.\n\n\
        Lists, creates, updates, and deletes trucks and drivers, and assigns\n\
        available drivers to trucks over the backend's REST API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "FLEETDESK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL, including the API prefix (overrides profile)
    #[arg(long, short = 'u', env = "FLEETDESK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token (overrides profile, keyring, and token_env)
    #[arg(long, env = "FLEETDESK_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FLEETDESK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "FLEETDESK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "FLEETDESK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage trucks and driver assignments
    #[command(alias = "t")]
    Trucks(TrucksArgs),

    /// Manage drivers
    #[command(alias = "d")]
    Drivers(DriversArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TRUCKS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TrucksArgs {
    #[command(subcommand)]
    pub command: TrucksCommand,
}

#[derive(Debug, Subcommand)]
pub enum TrucksCommand {
    /// List all trucks
    #[command(alias = "ls")]
    List,

    /// Show one truck
    Get {
        /// Truck ID
        id: String,
    },

    /// Create a truck
    Create(TruckFields),

    /// Update a truck (unspecified fields keep their current values)
    Update {
        /// Truck ID
        id: String,

        #[command(flatten)]
        fields: TruckFields,
    },

    /// Delete a truck
    #[command(alias = "rm")]
    Delete {
        /// Truck ID
        id: String,
    },

    /// Assign an available driver to a truck
    Assign {
        /// Truck ID
        truck: String,

        /// Driver ID (must currently be Available)
        driver: String,
    },
}

/// Truck attributes accepted by create and update.
#[derive(Debug, Default, Args)]
pub struct TruckFields {
    /// Read the truck as JSON from a file; flags given alongside override it
    #[arg(long, short = 'F')]
    pub from_file: Option<PathBuf>,

    /// License plate
    #[arg(long)]
    pub license_plate: Option<String>,

    /// Body color
    #[arg(long = "body-color", id = "body_color")]
    pub color: Option<String>,

    /// Maximum load capacity (must be greater than 0)
    #[arg(long)]
    pub max_load_capacity: Option<f64>,

    /// Current load
    #[arg(long)]
    pub current_load: Option<f64>,

    /// Truck type: Flatbed, Box, Refrigerated, Tanker, Dump, Tractor
    #[arg(long)]
    pub truck_type: Option<String>,

    /// Fuel type
    #[arg(long)]
    pub fuel_type: Option<String>,

    /// Fuel capacity
    #[arg(long)]
    pub fuel_capacity: Option<f64>,

    /// Current fuel level
    #[arg(long)]
    pub current_fuel_level: Option<f64>,

    /// Cargo length
    #[arg(long)]
    pub length: Option<f64>,

    /// Cargo width
    #[arg(long)]
    pub width: Option<f64>,

    /// Cargo height
    #[arg(long)]
    pub height: Option<f64>,

    /// Registration date (YYYY-MM-DD)
    #[arg(long)]
    pub registration_date: Option<String>,

    /// Next maintenance date (YYYY-MM-DD)
    #[arg(long)]
    pub next_maintenance_date: Option<String>,

    /// Status: Available, In Use, Maintenance, Out of Service
    #[arg(long)]
    pub status: Option<String>,

    /// Odometer reading
    #[arg(long)]
    pub odometer_reading: Option<f64>,

    /// Current location
    #[arg(long)]
    pub location: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DRIVERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DriversArgs {
    #[command(subcommand)]
    pub command: DriversCommand,
}

#[derive(Debug, Subcommand)]
pub enum DriversCommand {
    /// List all drivers
    #[command(alias = "ls")]
    List,

    /// Show one driver
    Get {
        /// Driver ID
        id: String,
    },

    /// Create a driver
    Create(DriverFields),

    /// Update a driver (unspecified fields keep their current values)
    Update {
        /// Driver ID
        id: String,

        #[command(flatten)]
        fields: DriverFields,
    },

    /// Delete a driver
    #[command(alias = "rm")]
    Delete {
        /// Driver ID
        id: String,
    },

    /// List drivers that can be assigned to a truck
    Available,
}

/// Driver attributes accepted by create and update.
#[derive(Debug, Default, Args)]
pub struct DriverFields {
    /// Read the driver as JSON from a file; flags given alongside override it
    #[arg(long, short = 'F')]
    pub from_file: Option<PathBuf>,

    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Driving license number
    #[arg(long)]
    pub license_number: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone_number: Option<String>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub date_of_birth: Option<String>,

    /// Status (defaults to Available)
    #[arg(long)]
    pub status: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create a profile with guided setup
    Init,

    /// Display the current configuration (secrets masked)
    Show,

    /// Print the config file location
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a bearer token for the active profile in the system keyring
    SetToken,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
