// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::Path;
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use catnav::app_config::{self, Config};
use catnav::app_controller::Controller;
use catnav::language_utils::Locale;
use catnav::routes::RouteParams;
use catnav::search::SearchResults;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the destination of a back action taken on PATH
    Resolve {
        /// Current route path, e.g. /ar/equipment/drum-lifting-beam
        #[arg(value_name = "PATH")]
        path: String,

        /// Route parameter as key=value (repeatable)
        #[arg(short = 'P', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },

    /// Search services and products in both locales
    Search {
        /// Free-text query
        #[arg(value_name = "QUERY")]
        query: String,

        /// UI locale used as display tiebreak (e.g. 'en', 'ar')
        #[arg(short = 'L', long)]
        locale: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the catalog tree
    Catalog,

    /// Run a transitioned back action and print where it navigated
    Back {
        /// Current route path
        #[arg(value_name = "PATH")]
        path: String,

        /// Route parameter as key=value (repeatable)
        #[arg(short = 'P', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },

    /// Generate shell completions for catnav
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// catnav - catalog navigation and bilingual search
///
/// Resolves back-navigation targets for deep links into the product catalog
/// and searches the catalog in English and Arabic.
#[derive(Parser, Debug)]
#[command(name = "catnav")]
#[command(version)]
#[command(about = "Catalog navigation and bilingual search")]
#[command(long_about = "catnav resolves back-navigation targets for catalog pages and searches the catalog in English and Arabic.

EXAMPLES:
    catnav resolve /equipment/drum-lifting-beam         # Parent of a product page
    catnav resolve /ar/equipment/x -P slug=Drum-Lifting-Beam-2
    catnav search chlorine                              # English query
    catnav search كلور --json                           # Arabic query, JSON output
    catnav back /admin/submissions/42                   # Full transitioned back action
    catnav completions bash > catnav.bash               # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn decoration_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::decoration_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept everything here; the effective level is set via max_level below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "catnav", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(cmd_log_level) = &cli.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config = load_or_create_config(&cli)?;
    config.validate()
        .context("Configuration validation failed")?;

    if cli.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Resolve { path, params } => {
            let params: RouteParams = params.into_iter().collect();
            println!("{}", controller.resolve(&path, &params));
        }
        Commands::Search { query, locale, json } => {
            let locale = locale
                .as_deref()
                .map(Locale::from_code)
                .transpose()?;
            let results = controller.search(&query, locale);
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_results(&results);
            }
        }
        Commands::Catalog => print_catalog(&controller),
        Commands::Back { path, params } => {
            let params: RouteParams = params.into_iter().collect();
            let destination = controller.run_back(&path, &params).await?;
            println!("{}", destination);
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

fn load_or_create_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = Path::new(&cli.config_path);

    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", cli.config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

fn print_results(results: &SearchResults) {
    if results.is_empty() {
        info!("No results");
        return;
    }

    for service in &results.services {
        println!("[service] {} ({}) -> {}", service.title, service.display_locale, service.target.path);
    }
    for product in &results.products {
        let anchor = product
            .target
            .anchor
            .as_deref()
            .map(|a| format!("#{}", a))
            .unwrap_or_default();
        println!(
            "[product] {} ({}) -> {}{}",
            product.title, product.display_locale, product.target.path, anchor
        );
    }
}

fn print_catalog(controller: &Controller) {
    let locale = controller.ui_context().locale;
    let catalog = controller.catalog();

    for service in catalog.services() {
        println!("{} [{}]", service.title.get(locale), service.slug);
        for child in &service.children {
            println!("  - {} [{}]", child.title.get(locale), child.slug);
        }
        for location in &service.locations {
            println!("  @ {} ({} images)", location.name.get(locale), location.images.len());
        }
    }

    if catalog.is_empty() {
        warn!("Catalog is empty");
    }
}
