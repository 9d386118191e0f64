//! Display CLI - browse and configure displays through an external tool.
//!
//! Provides both human-friendly and agent-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use std::io::{self, IsTerminal};

use clap::Parser;
use console::style;
use serde::Serialize;

use dctl::cli::{self, CategoryFilter, Cli, Commands};
use dctl::config::Settings;
use dctl::display::{self, DeviceCategory, Display, Overview};
use dctl::error::{DctlError, Result};
use dctl::gateway::Gateway;
use dctl::logging;
use dctl::modes::{self, ModeOption};
use dctl::tool::{self, CliTool};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle no-color flag or non-TTY
    if cli.no_color || !io::stdout().is_terminal() {
        console::set_colors_enabled(false);
    }

    logging::init_logging(cli.use_json(), cli.verbose, cli.quiet);

    if let Err(e) = run(&cli).await {
        output_error(&cli, &e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        None => print_quick_start(cli),
        Some(Commands::List(args)) => cmd_list(cli, args).await,
        Some(Commands::Toggle(args)) => cmd_toggle(cli, args).await,
        Some(Commands::Pip(args)) => cmd_pip(cli, args).await,
        Some(Commands::Modes(args)) => cmd_modes(cli, args).await,
        Some(Commands::SetMode(args)) => cmd_set_mode(cli, args).await,
        Some(Commands::Brightness(args)) => cmd_brightness(cli, args).await,
        Some(Commands::Contrast(args)) => cmd_contrast(cli, args).await,
        Some(Commands::Config(args)) => cmd_config(cli, args),
        Some(Commands::Version) => cmd_version(cli),
        Some(Commands::Completions(args)) => cmd_completions(args),
    }
}

/// Load settings and wire a gateway over the located external binary.
fn open_gateway(cli: &Cli) -> Result<(Gateway<CliTool>, Settings)> {
    let settings = Settings::load()?;
    let program = tool::locate(cli.tool.as_deref(), &settings)?;
    Ok((Gateway::new(CliTool::new(program)), settings))
}

// === Quick Start (Robot Mode Optimized) ===

/// Prints quick-start help optimized for both humans and AI agents.
#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn print_quick_start(cli: &Cli) -> Result<()> {
    if cli.use_json() {
        print_robot_quick_start(cli);
    } else {
        print_human_quick_start();
    }
    Ok(())
}

fn print_robot_quick_start(cli: &Cli) {
    output_json(
        cli,
        &serde_json::json!({
            "tool": "dctl",
            "version": VERSION,
            "description": "Display CLI with robot mode for AI agents",
            "discovery": {
                "list_displays": "dctl list --robot",
                "list_modes": "dctl modes <TAG> --robot",
            },
            "control": {
                "toggle_display": "dctl toggle <TAG>",
                "toggle_pip": "dctl pip <TAG>",
                "set_mode": "dctl set-mode <TAG> <MODE>",
                "brightness": "dctl brightness <TAG> [0..1 | --up | --down]",
                "contrast": "dctl contrast <TAG> [-0.9..0.9 | --up | --down]",
            },
            "output_modes": {
                "human": "--format=text (default)",
                "robot": "--robot or --format=json",
                "compact": "--format=json-compact",
            },
            "external_tool": "Override with --tool <PATH> or DCTL_TOOL",
        }),
    );
}

fn print_human_quick_start() {
    println!("{} {} - Display CLI\n", style("dctl").bold().cyan(), VERSION);

    println!("{}", style("QUICK START").bold().underlined());
    println!();
    println!("  {}  List displays with status", style("dctl list").green());
    println!("  {}  Toggle a display", style("dctl toggle <TAG>").green());
    println!("  {}  Toggle picture-in-picture", style("dctl pip <TAG>").green());
    println!("  {}  List resolution modes", style("dctl modes <TAG>").green());
    println!("  {}  Apply a mode", style("dctl set-mode <TAG> <MODE>").green());
    println!("  {}  Step brightness", style("dctl brightness <TAG> --up").green());
    println!("  {}  Step contrast", style("dctl contrast <TAG> --down").green());
    println!();

    println!("{}", style("ROBOT MODE (for AI agents)").bold().underlined());
    println!();
    println!("  {}  JSON output", style("dctl --robot <command>").cyan());
    println!();

    println!("Run {} for full help", style("dctl --help").yellow());
}

// === Command Implementations ===

/// Per-display record for robot-mode listing.
#[derive(Serialize)]
struct DisplayRecord<'a> {
    #[serde(rename = "tagID")]
    tag_id: &'a str,
    name: &'a str,
    #[serde(rename = "deviceType")]
    category: DeviceCategory,
    status: Option<&'a str>,
    resolution: Option<&'a str>,
}

async fn cmd_list(cli: &Cli, args: &cli::ListArgs) -> Result<()> {
    let (gateway, _settings) = open_gateway(cli)?;
    let displays = display::discover(&gateway).await?;
    let overview = Overview::load(&gateway, &displays).await;

    if cli.use_json() {
        let records: Vec<DisplayRecord<'_>> = displays
            .iter()
            .filter(|d| category_matches(args.filter, d.category))
            .map(|d| DisplayRecord {
                tag_id: &d.tag_id,
                name: &d.name,
                category: d.category,
                status: overview.status(&d.tag_id),
                resolution: overview.resolution(&d.tag_id),
            })
            .collect();
        output_json(cli, &records);
        return Ok(());
    }

    if displays.is_empty() {
        println!("{}", style("No displays reported by the external tool").yellow());
        return Ok(());
    }

    for category in [
        DeviceCategory::Display,
        DeviceCategory::VirtualScreen,
        DeviceCategory::Unknown,
    ] {
        if !category_matches(args.filter, category) {
            continue;
        }
        let members: Vec<&Display> = displays.iter().filter(|d| d.category == category).collect();
        if members.is_empty() {
            continue;
        }

        println!("{}", style(category.section_title()).bold().underlined());
        for d in members {
            print_display_row(args, d, &overview);
        }
        println!();
    }
    Ok(())
}

fn category_matches(filter: CategoryFilter, category: DeviceCategory) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Displays => category == DeviceCategory::Display,
        CategoryFilter::VirtualScreens => category == DeviceCategory::VirtualScreen,
    }
}

fn print_display_row(args: &cli::ListArgs, d: &Display, overview: &Overview) {
    let status_tag = match overview.status(&d.tag_id) {
        Some(s) if overview.is_on(&d.tag_id) => style(s.to_string()).green(),
        Some(s) => style(s.to_string()).red(),
        None => style("unknown".to_string()).yellow().dim(),
    };

    let mut line = format!("  {} [{}]", d.name, status_tag);
    if let Some(res) = overview.resolution(&d.tag_id) {
        line.push_str(&format!(" {}", style(res).cyan()));
    }
    if args.long {
        line.push_str(&format!("  tag={}", style(&d.tag_id).dim()));
    }
    println!("{line}");
}

async fn cmd_toggle(cli: &Cli, args: &cli::ToggleArgs) -> Result<()> {
    let (gateway, _settings) = open_gateway(cli)?;
    let reply = gateway.toggle_connected(&args.tag).await?;

    if cli.use_json() {
        output_json(
            cli,
            &serde_json::json!({
                "tagID": args.tag,
                "feature": "connected",
                "ok": true,
                "output": reply,
            }),
        );
    } else if !cli.quiet {
        if reply.is_empty() {
            println!("Display {} toggled", args.tag);
        } else {
            println!("{reply}");
        }
    }
    Ok(())
}

async fn cmd_pip(cli: &Cli, args: &cli::PipArgs) -> Result<()> {
    let (gateway, _settings) = open_gateway(cli)?;
    let reply = gateway.toggle_pip(&args.tag).await?;

    if cli.use_json() {
        output_json(
            cli,
            &serde_json::json!({
                "tagID": args.tag,
                "feature": "pip",
                "ok": true,
                "output": reply,
            }),
        );
    } else if !cli.quiet {
        if reply.is_empty() {
            println!("PIP toggled for display {}", args.tag);
        } else {
            println!("{reply}");
        }
    }
    Ok(())
}

async fn cmd_modes(cli: &Cli, args: &cli::ModesArgs) -> Result<()> {
    let (gateway, _settings) = open_gateway(cli)?;
    let listing = gateway.mode_list(&args.tag).await?;
    let options = modes::parse_mode_list(&listing);

    if cli.use_json() {
        output_json(
            cli,
            &serde_json::json!({
                "tagID": args.tag,
                "options": options,
            }),
        );
        return Ok(());
    }

    if options.is_empty() {
        println!("{}", style("No selectable modes reported").yellow());
        return Ok(());
    }

    // Safe first, then unsafe; original order within each partition.
    let safe: Vec<&ModeOption> = options.iter().filter(|o| !o.is_unsafe).collect();
    let unsafe_modes: Vec<&ModeOption> = options.iter().filter(|o| o.is_unsafe).collect();

    let had_safe = !safe.is_empty();
    if had_safe {
        println!("{}", style("Safe Resolutions").bold().underlined());
        for opt in safe {
            let number = format!("{:>4}", opt.value);
            println!("  {} {}  {}", opt.marker(), style(number).green(), opt.title);
        }
    }
    if !unsafe_modes.is_empty() {
        if had_safe {
            println!();
        }
        println!("{}", style("Unsafe Resolutions").bold().underlined());
        for opt in unsafe_modes {
            let number = format!("{:>4}", opt.value);
            println!("  {} {}  {}", opt.marker(), style(number).red(), opt.title);
        }
    }
    Ok(())
}

async fn cmd_set_mode(cli: &Cli, args: &cli::SetModeArgs) -> Result<()> {
    let (gateway, _settings) = open_gateway(cli)?;
    let reply = gateway.set_mode(&args.tag, &args.mode).await?;

    if cli.use_json() {
        output_json(
            cli,
            &serde_json::json!({
                "tagID": args.tag,
                "mode": args.mode,
                "ok": true,
                "output": reply,
            }),
        );
    } else if !cli.quiet {
        println!("Display mode changed to option {}", args.mode);
        if !reply.is_empty() {
            println!("{reply}");
        }
    }
    Ok(())
}

async fn cmd_brightness(cli: &Cli, args: &cli::BrightnessArgs) -> Result<()> {
    let (gateway, settings) = open_gateway(cli)?;

    if args.up || args.down {
        let step = settings.brightness_increment();
        let delta = if args.up { step } else { -step };
        let adj = gateway.adjust_brightness(&args.tag, delta).await?;

        if cli.use_json() {
            output_json(
                cli,
                &serde_json::json!({
                    "tagID": args.tag,
                    "brightness": adj.applied,
                    "previous": adj.previous,
                    "ok": true,
                }),
            );
        } else if !cli.quiet {
            println!(
                "Brightness set to {:.2} (was {:.2})",
                adj.applied, adj.previous
            );
        }
    } else if let Some(value) = args.value {
        let applied = gateway.set_brightness(&args.tag, value).await?;

        if cli.use_json() {
            output_json(
                cli,
                &serde_json::json!({ "tagID": args.tag, "brightness": applied, "ok": true }),
            );
        } else if !cli.quiet {
            println!("Brightness set to {applied:.2}");
        }
    } else {
        let value = gateway.brightness(&args.tag).await?;

        if cli.use_json() {
            output_json(cli, &serde_json::json!({ "tagID": args.tag, "brightness": value }));
        } else {
            println!("Brightness: {value:.2}");
        }
    }
    Ok(())
}

async fn cmd_contrast(cli: &Cli, args: &cli::ContrastArgs) -> Result<()> {
    let (gateway, settings) = open_gateway(cli)?;

    if args.up || args.down {
        let step = settings.contrast_increment();
        let delta = if args.up { step } else { -step };
        let adj = gateway.adjust_contrast(&args.tag, delta).await?;

        if cli.use_json() {
            output_json(
                cli,
                &serde_json::json!({
                    "tagID": args.tag,
                    "contrast": adj.applied,
                    "previous": adj.previous,
                    "ok": true,
                }),
            );
        } else if !cli.quiet {
            println!(
                "Contrast set to {:.2} (was {:.2})",
                adj.applied, adj.previous
            );
        }
    } else if let Some(value) = args.value {
        let applied = gateway.set_contrast(&args.tag, value).await?;

        if cli.use_json() {
            output_json(
                cli,
                &serde_json::json!({ "tagID": args.tag, "contrast": applied, "ok": true }),
            );
        } else if !cli.quiet {
            println!("Contrast set to {applied:.2}");
        }
    } else {
        let value = gateway.contrast(&args.tag).await?;

        if cli.use_json() {
            output_json(cli, &serde_json::json!({ "tagID": args.tag, "contrast": value }));
        } else {
            println!("Contrast: {value:.2}");
        }
    }
    Ok(())
}

fn cmd_config(cli: &Cli, args: &cli::ConfigArgs) -> Result<()> {
    let config_path = Settings::config_path();

    if args.path {
        match &config_path {
            Some(p) => println!("{}", p.display()),
            None => println!("(no config directory on this system)"),
        }
        return Ok(());
    }

    let settings = Settings::load()?;
    let located = tool::locate(cli.tool.as_deref(), &settings);

    if cli.use_json() {
        output_json(
            cli,
            &serde_json::json!({
                "config_path": config_path.as_ref().map(|p| p.display().to_string()),
                "tool": located.as_ref().ok().map(|p| p.display().to_string()),
                "brightness_increment": settings.brightness_increment(),
                "contrast_increment": settings.contrast_increment(),
            }),
        );
        return Ok(());
    }

    let path_text = config_path
        .as_ref()
        .map_or_else(|| "(none)".to_string(), |p| p.display().to_string());
    println!("{}: {}", style("Config file").bold(), path_text);

    match located {
        Ok(p) => println!("{}: {}", style("Tool").bold(), p.display()),
        Err(e) => println!("{}: {}", style("Tool").bold(), style(e.to_string()).red()),
    }

    println!(
        "{}: {}",
        style("Brightness increment").bold(),
        settings.brightness_increment()
    );
    println!(
        "{}: {}",
        style("Contrast increment").bold(),
        settings.contrast_increment()
    );
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_version(cli: &Cli) -> Result<()> {
    if cli.use_json() {
        output_json(cli, &serde_json::json!({ "version": VERSION }));
    } else {
        println!("dctl {VERSION}");
    }
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_completions(args: &cli::CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "dctl", &mut io::stdout());
    Ok(())
}

// === Utility Functions ===

fn output_json<T: Serialize>(cli: &Cli, data: &T) {
    let json = if cli.use_compact_json() {
        serde_json::to_string(data).unwrap()
    } else {
        serde_json::to_string_pretty(data).unwrap()
    };
    println!("{json}");
}

fn output_error(cli: &Cli, error: &DctlError) {
    if cli.use_json() {
        let json = serde_json::json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        });
        eprintln!("{}", serde_json::to_string_pretty(&json).unwrap());
    } else {
        eprintln!("{}: {}", style("Error").red().bold(), error);
        if let Some(suggestion) = error.suggestion() {
            eprintln!("{}: {}", style("Hint").yellow(), suggestion);
        }
    }
}
