use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fastrace::collector::{Config as TraceConfig, ConsoleReporter};
use fastrace::prelude::*;
use roster_config::{get_config_path, Config};
use roster_output::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod scenario;

static PROFILING_ENABLED: AtomicBool = AtomicBool::new(false);

fn profile_start(name: &str) -> (Instant, &str) {
    (Instant::now(), name)
}

fn profile_end((start, name): (Instant, &str)) {
    if PROFILING_ENABLED.load(Ordering::Relaxed) {
        let elapsed = start.elapsed();
        eprintln!(
            "[profile] {:>8.2}ms  {}",
            elapsed.as_secs_f64() * 1000.0,
            name
        );
    }
}

const MAIN_HELP: &str = r#"Roster is a small in-memory user registry. It builds users and
administrators, keeps them in a bounded container and queries them by role.

`roster demo` runs the full walkthrough: it registers a few users, lists
them, counts administrators, looks a user up through a weak handle and
validates email addresses.

`roster check-email` runs the (deliberately weak) email check on its
arguments. Invalid addresses are reported on stderr; the command still
succeeds."#;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = MAIN_HELP)]
#[command(version)]
struct Cli {
    #[arg(long, global = true, help = "Output as JSON")]
    json: bool,

    #[arg(long, global = true, help = "Print timing information for profiling")]
    profile: bool,

    #[arg(
        long,
        global = true,
        help = "Config file (default: $ROSTER_CONFIG or ~/.config/roster/config.toml)"
    )]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the registry walkthrough.")]
    Demo {
        #[arg(long, help = "Container capacity (default: from config)")]
        capacity: Option<usize>,
        #[arg(short = 'e', long, action = clap::ArgAction::Append, help = "Additional email to validate")]
        email: Vec<String>,
    },

    #[command(about = "Validate email addresses.")]
    CheckEmail {
        #[arg(required = true, help = "Addresses to check")]
        emails: Vec<String>,
    },

    #[command(about = "Print config file location and contents.")]
    Config,
}

fn main() -> Result<()> {
    let total_start = profile_start("total");
    let cli = Cli::parse();

    if cli.profile {
        PROFILING_ENABLED.store(true, Ordering::Relaxed);
        fastrace::set_reporter(ConsoleReporter, TraceConfig::default());
    }

    let config_path = cli.config.clone().unwrap_or_else(get_config_path);
    let config = Config::load_from(&config_path)?;
    init_logging(&config);
    debug!(path = %config_path.display(), "loaded config");

    let result = {
        let root = Span::root("roster", SpanContext::random());
        let _guard = root.set_local_parent();

        match cli.command {
            Commands::Demo { capacity, email } => handle_demo(&config, cli.json, capacity, &email),
            Commands::CheckEmail { emails } => handle_check_email(cli.json, &emails),
            Commands::Config => handle_config(&config_path),
        }
    };

    fastrace::flush();
    profile_end(total_start);
    result
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn handle_demo(
    config: &Config,
    json_output: bool,
    capacity: Option<usize>,
    emails: &[String],
) -> Result<()> {
    let capacity = capacity.unwrap_or(config.registry.capacity);
    let report = scenario::run(capacity, &config.registry.default_name, emails);

    for error in &report.errors {
        eprintln!("Error: {}", error);
    }

    if json_output {
        println!("{}", format_json(&report)?);
    } else {
        println!("{}", format_roster_report(&report));
    }
    Ok(())
}

fn handle_check_email(json_output: bool, emails: &[String]) -> Result<()> {
    let checks = scenario::check_emails(emails);

    for error in checks.iter().filter_map(|c| c.error.as_deref()) {
        eprintln!("Error: {}", error);
    }

    if json_output {
        println!("{}", format_json(&checks)?);
    } else {
        println!("{}", format_email_checks(&checks));
    }
    Ok(())
}

fn handle_config(config_path: &Path) -> Result<()> {
    println!("Config file: {}", config_path.display());
    println!();

    if config_path.exists() {
        println!("{}", std::fs::read_to_string(config_path)?);
    } else {
        println!("(file does not exist, using defaults)");
    }
    Ok(())
}
