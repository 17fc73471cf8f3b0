//! recipe-viz: render crafting recipe trees
//!
//! Draws the recipe trees produced by an element-combination search as a
//! tidy top-down diagram, to SVG/HTML/JSON or in an interactive terminal
//! viewer.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use recipe_viz::{
    cli::{self, RenderOptions, ViewOptions},
    config::{
        AppConfig, CONFIG_FILE_NAMES, Validatable, config_search_dirs, discover_config_file,
        generate_full_example_config, generate_json_schema, load_or_default,
    },
    error::RecipeVizError,
    pipeline::exit_codes,
    render::{OutputFormat, ZoomTransform},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nInput:",
        "\n  {targetElement, algorithm, trees: [...]}, a bare array of trees, or one tree",
        "\n\nOutput Formats:",
        "\n  svg, html, json, summary (render); terminal canvas (view)"
    )
}

#[derive(Parser)]
#[command(name = "recipe-viz")]
#[command(version, long_version = build_long_version())]
#[command(about = "Render crafting recipe trees", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  A tree was rendered
    1  Nothing rendered (no trees, or index out of range)
    3  Error occurred

EXAMPLES:
    # Summary on the terminal, SVG when piped
    recipe-viz render trees.json

    # Second alternative as a standalone HTML page
    recipe-viz render trees.json --index 1 -O steam.html

    # Browse all alternatives interactively
    recipe-viz view trees.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by `render` and `view`
#[derive(Args)]
struct InputArgs {
    /// Recipe JSON file (`-` reads stdin for `render`)
    input: PathBuf,

    /// Which alternative tree to show (0-based)
    #[arg(short, long, default_value_t = 0)]
    index: usize,

    /// Override the target element label
    #[arg(long)]
    target: Option<String>,

    /// Override the algorithm label
    #[arg(long)]
    algorithm: Option<String>,

    /// Container width in pixels
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<f64>,

    /// Collapse subtrees below this depth
    #[arg(long)]
    max_depth: Option<usize>,
}

/// Arguments for the `render` subcommand
#[derive(Args)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Initial zoom factor
    #[arg(long, default_value_t = 1.0)]
    zoom: f64,

    /// Initial horizontal pan in pixels
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_x: f64,

    /// Initial vertical pan in pixels
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_y: f64,
}

/// Arguments for the `view` subcommand
#[derive(Args)]
struct ViewArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Viewer theme (dark, light)
    #[arg(long)]
    theme: Option<String>,

    /// Disable mouse zoom and drag
    #[arg(long)]
    no_mouse: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one tree as SVG, HTML, JSON or a text summary
    Render(RenderArgs),

    /// Browse the trees in an interactive terminal viewer
    View(ViewArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .recipe-viz.yaml in the current directory
    Init,
}

/// Fold command-line overrides into the file/default configuration.
fn apply_input_overrides(config: &mut AppConfig, args: &InputArgs) {
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(depth) = args.max_depth {
        config.render.max_visible_depth = depth;
    }
}

/// Load the config for a rendering command and reject invalid values.
fn effective_config(cli_config: Option<&std::path::Path>, args: &InputArgs) -> Result<AppConfig> {
    let (mut config, _) = load_or_default(cli_config);
    apply_input_overrides(&mut config, args);

    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(RecipeVizError::validation(details.join("; ")).into());
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Render(args) => {
            let config = effective_config(cli.config.as_deref(), &args.input)?;
            let options = RenderOptions {
                input: args.input.input,
                index: args.input.index,
                format: args.output,
                output: args.output_file,
                target: args.input.target,
                algorithm: args.input.algorithm,
                transform: ZoomTransform::new(args.zoom, args.pan_x, args.pan_y),
                quiet: cli.quiet,
            };
            cli::run_render(options, &config)
        }

        Commands::View(args) => {
            let mut config = effective_config(cli.config.as_deref(), &args.input)?;
            if let Some(theme) = args.theme {
                config.tui.theme = theme;
            }
            if args.no_mouse {
                config.tui.mouse_enabled = false;
            }
            let options = ViewOptions {
                input: args.input.input,
                index: args.input.index,
                target: args.input.target,
                algorithm: args.input.algorithm,
            };
            cli::run_view(options, &config)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "recipe-viz", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                eprintln!("Config file search paths (in order):");
                if let Some(path) = &cli.config {
                    eprintln!("  {} (--config)", path.display());
                }
                for dir in config_search_dirs() {
                    eprintln!("  {}", dir.display());
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".recipe-viz.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, generate_full_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}
