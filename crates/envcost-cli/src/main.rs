mod display;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use envcost_core::config::{self, CostConfig};
use envcost_core::report::build_report;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "envcost",
    version,
    about = "envcost — DevSecOps Cost Comparator",
    long_about = "Estimate and compare CI/CD service costs across deployment environments.\n\nPipelines, builds, artifacts, and fixed tooling licenses — one comparison table, per environment."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare costs across environments
    Compare {
        /// Path to the configuration file (built-in defaults if omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Environment to include (repeatable; defaults to all configured)
        #[arg(short, long = "env")]
        envs: Vec<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the line-item breakdown for a single environment
    Breakdown {
        /// Environment name
        env: String,

        /// Path to the configuration file (built-in defaults if omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print the pricing formulas with the effective rates
    Formulas {
        /// Path to the configuration file (built-in defaults if omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a starter configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "envcost.toml")]
        output: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            config,
            envs,
            format,
        } => cmd_compare(config.as_deref(), &envs, &format),
        Commands::Breakdown {
            env,
            config,
            format,
        } => cmd_breakdown(config.as_deref(), &env, &format),
        Commands::Formulas { config } => cmd_formulas(config.as_deref()),
        Commands::Init { output } => cmd_init(&output),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "envcost", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn load_or_default(path: Option<&Path>) -> Result<CostConfig> {
    match path {
        Some(p) => config::load_config(p),
        None => Ok(CostConfig::default()),
    }
}

fn cmd_compare(config_path: Option<&Path>, envs: &[String], format: &str) -> Result<()> {
    let config = load_or_default(config_path)?;

    let selected = if envs.is_empty() {
        config.environment_names()
    } else {
        envs.to_vec()
    };

    let report = build_report(&config, &selected).context("Failed to build comparison")?;

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
        _ => {
            display::print_comparison(&report);
        }
    }

    Ok(())
}

fn cmd_breakdown(config_path: Option<&Path>, env: &str, format: &str) -> Result<()> {
    let config = load_or_default(config_path)?;
    let report = build_report(&config, &[env.to_string()])
        .with_context(|| format!("Failed to compute breakdown for '{}'", env))?;

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&report.breakdowns[env])?;
            println!("{}", json);
        }
        _ => {
            display::print_breakdown(env, &report);
        }
    }

    Ok(())
}

fn cmd_formulas(config_path: Option<&Path>) -> Result<()> {
    let config = load_or_default(config_path)?;
    display::print_formulas(&config);
    Ok(())
}

fn cmd_init(output: &Path) -> Result<()> {
    if output.exists() {
        anyhow::bail!(
            "'{}' already exists. Remove it first or pass a different --output path.",
            output.display()
        );
    }

    std::fs::write(output, config::generate_default_config())
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    println!("Starter config written to {}", output.display());
    println!("Run 'envcost compare --config {}' to use it.", output.display());

    Ok(())
}
