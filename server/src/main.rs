//! HTTP server for the README generator.
//!
//! Serves repository analysis and README generation as a JSON API.

use clap::Parser;
use readme_generator::{load_config, AppState, ServiceConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// README Generator - Analyze GitHub repositories and generate README files over HTTP.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Address to listen on. Overrides `server.bind`.
    #[arg(long)]
    bind: Option<String>,

    /// GitHub Personal Access Token. Overrides `github.token`.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    install_crypto_provider();

    match run(args).await {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Installs aws-lc-rs as the process-wide rustls provider.
///
/// Returns false if a provider was already installed.
fn install_crypto_provider() -> bool {
    let installed = rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_ok();
    if !installed {
        debug!("rustls crypto provider already installed, keeping it");
    }
    installed
}

/// Loads configuration, applies CLI overrides and serves until shutdown.
async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(&args.config)?;
    apply_overrides(&mut config, args.bind, args.github_token);
    config.validate(&args.config)?;

    let state = AppState::from_config(&config)?;
    if !state.generator().is_configured() {
        info!("Serving analysis only until a generation backend is configured");
    }

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    readme_generator::serve(listener, state).await?;
    info!("Server stopped");
    Ok(())
}

/// Applies command-line values over the loaded config.
fn apply_overrides(config: &mut ServiceConfig, bind: Option<String>, token: Option<String>) {
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    if let Some(token) = token.filter(|token| !token.trim().is_empty()) {
        config.github.token = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let mut config = ServiceConfig::default();
        apply_overrides(
            &mut config,
            Some("0.0.0.0:8080".to_string()),
            Some("ghp_cli".to_string()),
        );
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.github.token.as_deref(), Some("ghp_cli"));
    }

    #[test]
    fn blank_token_keeps_configured_value() {
        let mut config = ServiceConfig::default();
        config.github.token = Some("ghp_file".to_string());
        apply_overrides(&mut config, None, Some("  ".to_string()));
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.github.token.as_deref(), Some("ghp_file"));
    }

    #[test]
    fn crypto_provider_installs_once() {
        install_crypto_provider();
        assert!(!install_crypto_provider());
        assert!(rustls::crypto::CryptoProvider::get_default().is_some());
    }

    #[test]
    fn parses_arguments() {
        let args = Args::try_parse_from(["readme-generator-server", "--bind", "127.0.0.1:9000"])
            .unwrap();
        assert_eq!(args.config, PathBuf::from("config.toml"));
        assert_eq!(args.bind.as_deref(), Some("127.0.0.1:9000"));
    }
}
