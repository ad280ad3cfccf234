// src/main.rs - Desktop entry point and command line tools

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use hopewell_portal::config::PortalConfig;
use hopewell_portal::error::Result;
use hopewell_portal::logging::{init_logging, LoggingGuard};
use hopewell_portal::utils::time::{Clock, Greeting, SystemClock};
use hopewell_portal::validation::{validate, FormFields, ValidationReport};

#[derive(Parser)]
#[command(
    name = "hopewell-portal",
    version = hopewell_portal::VERSION,
    about = "Hopewell Hospital portal login form",
    long_about = None
)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Log at trace level
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the login form in a desktop window
    Run,
    /// Check a username and password against the form's rules
    Validate {
        #[arg(short, long, default_value = "")]
        username: String,
        #[arg(short, long, default_value = "")]
        password: String,
    },
    /// Print the welcome toast text
    Greeting {
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
        hour: Option<u32>,
    },
    /// Validate configuration
    ValidateConfig {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Every requested check passed
const EXIT_OK: i32 = 0;
/// Configuration or runtime failure
const EXIT_FAILURE: i32 = 1;
/// `validate` rejected the username or password
const EXIT_INVALID: i32 = 2;

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in &e.causes {
                eprintln!("  caused by: {}", cause);
            }
            EXIT_FAILURE
        }
    };

    if code != EXIT_OK {
        process::exit(code);
    }
}

/// Runs the selected command and returns the process exit code
fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Some(Commands::ValidateConfig { config }) => {
            validate_config(config.clone().or_else(|| cli.config.clone()))?;
            Ok(EXIT_OK)
        }
        Some(Commands::Validate { username, password }) => Ok(validate_command(username, password)),
        Some(Commands::Greeting { hour }) => {
            let config = load_config(&cli)?;
            let greeting = match hour {
                Some(hour) => Greeting::from_hour(*hour),
                None => Greeting::from_clock(&SystemClock),
            };
            println!("{}", greeting.welcome_message(&config.portal.hospital_name));
            Ok(EXIT_OK)
        }
        Some(Commands::Run) | None => {
            let config = load_config(&cli)?;
            let _guard = setup_logging(&cli, &config)?;
            run_desktop(config)?;
            Ok(EXIT_OK)
        }
    }
}

fn validate_command(username: &str, password: &str) -> i32 {
    let report = validate(&FormFields::new(username, password));
    print!("{}", render_report(&report));
    if report.is_valid() {
        EXIT_OK
    } else {
        EXIT_INVALID
    }
}

fn load_config(cli: &Cli) -> Result<PortalConfig> {
    let config = match &cli.config {
        Some(path) => PortalConfig::load(path)?,
        None => PortalConfig::from_env(),
    };
    config.ensure_valid()?;
    Ok(config)
}

/// `--debug` turns on trace output, `--verbose` debug output
fn effective_log_level(cli: &Cli, configured: &str) -> String {
    if cli.debug {
        "trace".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        configured.to_string()
    }
}

fn setup_logging(cli: &Cli, config: &PortalConfig) -> Result<LoggingGuard> {
    let mut logging = config.logging.clone();
    logging.level = effective_log_level(cli, &logging.level);
    init_logging(&logging)
}

fn run_desktop(config: PortalConfig) -> Result<()> {
    use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
    use hopewell_portal::ui::{desktop_css, App};

    tracing::info!(
        version = hopewell_portal::VERSION,
        hospital = %config.portal.hospital_name,
        year = SystemClock.year(),
        "Starting portal"
    );

    let window_title = format!("{} Portal", config.portal.hospital_name);
    let desktop = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title(window_title)
                .with_resizable(true)
                .with_inner_size(LogicalSize::new(1200.0, 800.0)),
        )
        .with_custom_head(desktop_css::custom_head());

    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop)
        .with_context(config)
        .launch(App);

    Ok(())
}

fn validate_config(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = match config_path {
        Some(path) => PortalConfig::load(path)?,
        None => PortalConfig::from_env(),
    };

    let errors = config.validate();
    if errors.is_empty() {
        println!("✅ Configuration is valid");
        println!("   Hospital: {}", config.portal.hospital_name);
        println!("   Toast delay: {} ms", config.toast.delay_ms);
        println!("   Version: {}", hopewell_portal::VERSION);
        return Ok(());
    }

    for error in &errors {
        println!("❌ {}", error);
    }
    config.ensure_valid()
}

fn render_report(report: &ValidationReport) -> String {
    if report.is_valid() {
        return "✅ Username and password are valid\n".to_string();
    }

    let errors = report.errors();
    let mut output = String::new();
    for (field, message) in [("username", errors.username_error), ("password", errors.password_error)] {
        if let Some(message) = message {
            output.push_str(&format!("❌ {}: {}\n", field, message));
        }
    }
    output
}
