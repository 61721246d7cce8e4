//! certbot manual-auth hook for bunny.net DNS
//!
//! ```bash
//! certbot certonly --manual --preferred-challenges dns \
//!     --manual-auth-hook "bunny-dns-hook auth" \
//!     --manual-cleanup-hook "bunny-dns-hook cleanup" \
//!     -d example.com -d '*.example.com'
//! ```
//!
//! Logs go to stderr. Exit status is non-zero on any failure.

mod cli;
mod commands;
mod config;

use std::process::ExitCode;

use anyhow::Context;
use bunny_dns_provider::{Authenticator, create_provider, mask_secret};
use clap::Parser;
use cli::{Cli, Command};
use config::HookConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = HookConfig::load(cli.config.as_deref()).context("loading configuration")?;
    config.apply(cli.overrides());
    let settings = config.into_settings()?;

    tracing::debug!(
        "Using access key {} against {}",
        mask_secret(&settings.credentials.access_key),
        settings.credentials.api_base
    );

    let provider =
        create_provider(settings.credentials).context("initializing bunny.net client")?;

    match cli.command {
        Command::Auth(args) => {
            let authenticator = Authenticator::new(settings.authenticator, provider);
            commands::auth(&authenticator, &args.challenge.challenge(), settings.propagation)
                .await
        }
        Command::Cleanup(args) => {
            let authenticator = Authenticator::new(settings.authenticator, provider);
            commands::cleanup(&authenticator, &args.challenge())
                .await
                .map(|_| ())
        }
        Command::Check => {
            let zones = commands::check(provider.as_ref()).await?;
            tracing::info!("Access key accepted, {zones} zone(s) visible");
            Ok(())
        }
    }
}
