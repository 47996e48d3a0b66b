//! Beacon - native integration registry for cross-platform analytics
//!
//! Command-line host that plays the application shell: it registers the
//! built-in integration factories through the bridge, sets up the client
//! and reports what was created.

mod demo;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use beacon_bridge::AnalyticsBridge;
use beacon_config::{Config, ConfigLoader, ConfigValidator, LogFormat};
use beacon_core::AnalyticsClient;
use beacon_protocols::integration::{Integration, IntegrationSettings};

/// Beacon CLI.
#[derive(Parser)]
#[command(name = "beacon")]
#[command(about = "Native integration registry for cross-platform analytics")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register integrations, set up the client and list what was created
    List {
        /// Extra integration keys to register after the built-in ones
        #[arg(long = "integration")]
        integrations: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Set up the client and flush every created integration
    Flush {
        /// Extra integration keys to register after the built-in ones
        #[arg(long = "integration")]
        integrations: Vec<String>,
    },

    /// Load and validate the configuration file given with `--config`
    Validate,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Initialize tracing with console output.
fn init_tracing(level: &str, format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

/// Resolve the configuration: explicit path, then the default location,
/// then a built-in demo configuration.
fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    if path.is_some() {
        return load_explicit_config(path);
    }

    if let Some(default) = ConfigLoader::default_path().filter(|p| p.exists()) {
        return Ok(ConfigLoader::load(&default)?);
    }

    Ok(demo_config())
}

/// Load only the file named on the command line, with no fallback.
fn load_explicit_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = path.ok_or("validate requires --config PATH")?;
    let expanded = ConfigLoader::expand_path(&path.to_string_lossy());
    Ok(ConfigLoader::load(Path::new(&expanded))?)
}

fn demo_config() -> Config {
    let mut config = Config::default();
    config.client.write_key = "demo".to_string();
    for key in demo::DEMO_INTEGRATIONS {
        config
            .integrations
            .insert(key.to_string(), IntegrationSettings::enabled());
    }

    let mut amplitude = serde_json::Map::new();
    amplitude.insert("api_key".to_string(), serde_json::Value::from("demo"));
    config.integrations.insert(
        "Amplitude".to_string(),
        IntegrationSettings::with_options(amplitude),
    );
    config
}

/// Register the built-in factories plus `extra`, then set up the client.
fn start_client(
    config: Config,
    extra: &[String],
) -> Result<(AnalyticsBridge, Arc<AnalyticsClient>), Box<dyn std::error::Error>> {
    let bridge = AnalyticsBridge::new();

    for factory in demo::demo_factories(extra) {
        bridge.add_integration(factory)?;
    }
    bridge.add_on_ready_callback("Adjust", |integration: &dyn Integration| {
        info!("{} integration ready", integration.key());
    })?;

    let client = bridge.setup(config)?;
    Ok((bridge, client))
}

fn print_client(client: &AnalyticsClient, format: OutputFormat) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Text => {
            for (index, key) in client.integration_keys().iter().enumerate() {
                println!("{:>3}. {}", index + 1, key);
            }
            for key in client.skipped() {
                println!("  -  {} (not enabled)", key);
            }
            for failure in client.failed() {
                println!("  !  {} ({})", failure.key, failure.reason);
            }
        }
        OutputFormat::Json => {
            let failed: Vec<_> = client
                .failed()
                .iter()
                .map(|f| serde_json::json!({ "key": f.key, "reason": f.reason }))
                .collect();
            let output = serde_json::json!({
                "integrations": client.integration_keys(),
                "skipped": client.skipped(),
                "failed": failed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match cli.command {
        Commands::Validate => load_explicit_config(cli.config.as_deref())?,
        Commands::List { .. } | Commands::Flush { .. } => load_config(cli.config.as_deref())?,
    };

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    init_tracing(&level, config.logging.format);

    match cli.command {
        Commands::List {
            integrations,
            format,
        } => {
            let (_bridge, client) = start_client(config, &integrations)?;
            print_client(&client, format)?;
        }
        Commands::Flush { integrations } => {
            let (bridge, _client) = start_client(config, &integrations)?;
            let report = bridge.flush().await?;
            for failure in &report.failures {
                warn!("Flush failed for {}: {}", failure.key, failure.reason);
            }
            println!(
                "Flushed {} integrations ({} failed)",
                report.attempted,
                report.failures.len()
            );
        }
        Commands::Validate => {
            let result = ConfigValidator::validate(&config);
            for warning in &result.warnings {
                println!("warning: {}: {}", warning.path, warning.message);
            }
            for error in &result.errors {
                println!("error: {}: {}", error.path, error.message);
            }
            if !result.is_valid() {
                return Err(format!("{} configuration errors", result.errors.len()).into());
            }
            println!("Configuration is valid");
        }
    }

    Ok(())
}
