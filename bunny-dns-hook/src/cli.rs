//! Command-line interface
//!
//! `auth` and `cleanup` follow certbot's manual hook contract: the domain and
//! token arrive in `CERTBOT_DOMAIN` / `CERTBOT_VALIDATION` when not passed as
//! flags.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{CONFIG_PATH_ENV, ConfigOverrides};

/// Label prepended to the domain to form the validation hostname.
const CHALLENGE_LABEL: &str = "_acme-challenge";

#[derive(Parser)]
#[command(name = "bunny-dns-hook", version)]
#[command(about = "Publish and remove ACME DNS-01 challenges on bunny.net")]
pub struct Cli {
    /// Config file (default: <config dir>/bunny-dns/config.toml)
    #[arg(long, global = true, env = CONFIG_PATH_ENV)]
    pub config: Option<PathBuf>,

    /// bunny.net account API key
    #[arg(long, global = true, env = "BUNNY_ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,

    /// API endpoint override
    #[arg(long, global = true, env = "BUNNY_API_BASE")]
    pub api_base: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Publish the challenge TXT record, then wait for propagation
    Auth(AuthArgs),
    /// Remove the challenge TXT record
    Cleanup(ChallengeArgs),
    /// Verify the access key by listing zones
    Check,
}

#[derive(Args)]
pub struct ChallengeArgs {
    /// Domain being certified
    #[arg(long, env = "CERTBOT_DOMAIN")]
    pub domain: String,

    /// Validation hostname (default: _acme-challenge.<domain>)
    #[arg(long)]
    pub validation_name: Option<String>,

    /// Challenge token to publish or remove
    #[arg(long, env = "CERTBOT_VALIDATION", hide_env_values = true)]
    pub validation: String,
}

#[derive(Args)]
pub struct AuthArgs {
    #[command(flatten)]
    pub challenge: ChallengeArgs,

    /// Seconds to wait after publishing (0 disables the wait)
    #[arg(long, env = "BUNNY_PROPAGATION_SECONDS")]
    pub propagation_seconds: Option<u64>,

    /// TTL of the published record
    #[arg(long, env = "BUNNY_TTL")]
    pub ttl: Option<u32>,
}

/// One challenge, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub domain: String,
    pub validation_name: String,
    pub value: String,
}

impl ChallengeArgs {
    pub fn challenge(&self) -> Challenge {
        let domain = self
            .domain
            .strip_prefix("*.")
            .unwrap_or(&self.domain)
            .to_string();
        let validation_name = self
            .validation_name
            .clone()
            .unwrap_or_else(|| format!("{CHALLENGE_LABEL}.{domain}"));

        Challenge {
            domain,
            validation_name,
            value: self.validation.clone(),
        }
    }
}

impl Cli {
    /// Flag and environment values that override the config file.
    pub fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides {
            access_key: self.access_key.clone(),
            api_base: self.api_base.clone(),
            ..ConfigOverrides::default()
        };
        if let Command::Auth(args) = &self.command {
            overrides.propagation_seconds = args.propagation_seconds;
            overrides.ttl = args.ttl;
        }
        overrides
    }
}
