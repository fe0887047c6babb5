//! Vet Clinic service
//!
//! REST API for owners, pets and visits, with visit price quotes.
//!
//! ```sh
//! # Run with default config (~/.config/vet-clinic/config.toml)
//! vet-clinic
//!
//! # Custom config path
//! vet-clinic --config /etc/vet-clinic/config.toml
//!
//! # Override the port
//! vet-clinic --api-port 9090
//!
//! # Validate config without starting
//! vet-clinic --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use vet_clinic::config::{default_config_path, AppConfig};
use vet_clinic::server::{init_tracing, ServerHandle};

/// Vet clinic REST service with visit pricing.
#[derive(Parser, Debug)]
#[command(
    name = "vet-clinic",
    version,
    about = "Pet clinic registry and visit pricing service",
    long_about = "Vet Clinic: REST API for owners, pets and visits, \
                  with price quotes from configurable calculators.\n\n\
                  Default config: ~/.config/vet-clinic/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "VET_CLINIC_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(default_config_path);

    let loaded = AppConfig::load(&config_path);
    if cli.check {
        return match loaded {
            Ok(config) => {
                println!("Configuration is valid");
                println!("   Config file : {}", config_path.display());
                println!("   API address : {}", config.server.address());
                println!("   Calculator  : {}", config.pricing.calculator);
                println!(
                    "   Rates       : base {} / per pet {}",
                    config.pricing.base_charge, config.pricing.price_per_pet
                );
                println!("   Pet cache   : {}s TTL", config.cache.pet_ttl_seconds);
                println!("   Log level   : {}", config.logging.level);
                Ok(())
            }
            Err(e) => {
                eprintln!("Invalid configuration in {}: {}", config_path.display(), e);
                Err(e.into())
            }
        };
    }

    let mut config = match loaded {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let mut cfg = AppConfig::default();
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            cfg
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(config).await?;
    handle.install_signal_handler();

    info!("Press Ctrl+C to shut down gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
