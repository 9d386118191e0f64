//! CLI argument definitions and command dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Display CLI - browse and configure displays through a BetterDisplay-style tool.
///
/// Robot Mode: Use --robot or --format=json for machine-parseable output optimized for AI agents.
#[derive(Parser, Debug)]
#[command(name = "dctl", version, about, long_about = None)]
#[command(propagate_version = true)]
#[allow(clippy::struct_excessive_bools)] // CLI flags naturally use multiple bools
pub struct Cli {
    /// Output format (text for humans, json for agents/scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "DCTL_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json (optimized for AI agents)
    #[arg(long, global = true)]
    pub robot: bool,

    /// Verbose output (repeat for more detail)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Path to the external display management binary
    #[arg(long, global = true, env = "DCTL_TOOL", value_name = "PATH")]
    pub tool: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts and agents
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Display Discovery ===
    /// List connected displays with their connection status
    List(ListArgs),

    // === Connection Control ===
    /// Toggle a display's connect state
    Toggle(ToggleArgs),

    /// Toggle picture-in-picture for a display
    Pip(PipArgs),

    // === Resolution Control ===
    /// List the selectable resolution modes of a display
    Modes(ModesArgs),

    /// Apply a resolution mode by its mode number
    SetMode(SetModeArgs),

    // === Picture Control ===
    /// Get, set, or step display brightness
    Brightness(BrightnessArgs),

    /// Get, set, or step display contrast
    Contrast(ContrastArgs),

    // === Configuration ===
    /// Show the effective configuration
    Config(ConfigArgs),

    // === Utilities ===
    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Display category filter for the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CategoryFilter {
    /// All connected devices
    #[default]
    All,
    /// Physical displays only
    Displays,
    /// Virtual screens only
    VirtualScreens,
}

// === Argument Structs ===

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Restrict the listing to one device category
    #[arg(long, default_value = "all")]
    pub filter: CategoryFilter,

    /// Show extended information (tag and category per display)
    #[arg(long, short = 'l')]
    pub long: bool,
}

#[derive(Parser, Debug)]
pub struct ToggleArgs {
    /// Display tag (see `dctl list --long`)
    pub tag: String,
}

#[derive(Parser, Debug)]
pub struct PipArgs {
    /// Display tag
    pub tag: String,
}

#[derive(Parser, Debug)]
pub struct ModesArgs {
    /// Display tag
    pub tag: String,
}

#[derive(Parser, Debug)]
pub struct SetModeArgs {
    /// Display tag
    pub tag: String,

    /// Mode number from `dctl modes`
    pub mode: String,
}

#[derive(Parser, Debug)]
pub struct BrightnessArgs {
    /// Display tag
    pub tag: String,

    /// Brightness to apply (clamped to 0..=1); omit to read the current value
    #[arg(conflicts_with_all = ["up", "down"])]
    pub value: Option<f64>,

    /// Step brightness up by the configured increment
    #[arg(long, conflicts_with = "down")]
    pub up: bool,

    /// Step brightness down by the configured increment
    #[arg(long)]
    pub down: bool,
}

#[derive(Parser, Debug)]
pub struct ContrastArgs {
    /// Display tag
    pub tag: String,

    /// Contrast to apply (clamped to -0.9..=0.9); omit to read the current value
    #[arg(conflicts_with_all = ["up", "down"], allow_negative_numbers = true)]
    pub value: Option<f64>,

    /// Step contrast up by the configured increment
    #[arg(long, conflicts_with = "down")]
    pub up: bool,

    /// Step contrast down by the configured increment
    #[arg(long)]
    pub down: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show the configuration file path only
    #[arg(long)]
    pub path: bool,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
