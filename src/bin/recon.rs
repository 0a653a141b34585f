//! Command-line companion for subdomain-recon.
//!
//! Runs discovery locally and provisions API tokens for the HTTP service.
//!
//! # Usage
//!
//! ```bash
//! # Discover subdomains without going through the HTTP API
//! cargo run --bin recon -- discover https://example.com
//! cargo run --bin recon -- discover https://example.com --json
//!
//! # Create a new API token and print its API_TOKENS entry
//! cargo run --bin recon -- token create --name ci
//!
//! # Hash an existing token
//! cargo run --bin recon -- token hash rcn_...
//! ```
//!
//! # Environment Variables
//!
//! - `TOKEN_SIGNING_SECRET` (required for `token`): HMAC key shared with the server

use subdomain_recon::application::services::DiscoverySettings;
use subdomain_recon::application::services::auth_service::hash_token;
use subdomain_recon::domain::entities::DiscoveryReport;
use subdomain_recon::infrastructure::sources::SourceTimeouts;
use subdomain_recon::server::build_discovery_service;

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use rand::Rng;
use std::time::Duration;
use url::Url;

const TOKEN_PREFIX: &str = "rcn_";
const TOKEN_BYTES: usize = 32;

/// CLI tool for subdomain-recon.
#[derive(Parser)]
#[command(name = "recon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a discovery pass locally
    Discover {
        /// Absolute URL whose domain should be scanned
        url: String,

        /// Print the JSON report instead of a table
        #[arg(long)]
        json: bool,

        /// Overall deadline in seconds
        #[arg(long, default_value_t = 120)]
        deadline: u64,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Generate a new API token
    Create {
        /// Identity the token authenticates as (e.g., "ci", "alice")
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print the HMAC digest of an existing token
    Hash {
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Discover {
            url,
            json,
            deadline,
        } => discover(&url, json, Duration::from_secs(deadline)).await,
        Commands::Token { action } => {
            let secret = signing_secret()?;
            match action {
                TokenAction::Create { name, yes } => create_token(&secret, name, yes),
                TokenAction::Hash { token } => {
                    println!("{}", hash_token(&secret, &token));
                    Ok(())
                }
            }
        }
    }
}

fn signing_secret() -> Result<String> {
    let secret = std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;
    if secret.is_empty() {
        bail!("TOKEN_SIGNING_SECRET must not be empty");
    }
    Ok(secret)
}

/// Runs the pipeline with default limits and prints the report.
async fn discover(raw_url: &str, json: bool, deadline: Duration) -> Result<()> {
    let url = Url::parse(raw_url).with_context(|| format!("'{}' is not an absolute URL", raw_url))?;
    let Some(host) = url.host_str() else {
        bail!("'{}' has no host", raw_url);
    };

    let settings = DiscoverySettings {
        request_timeout: deadline,
        ..DiscoverySettings::default()
    };
    let service = build_discovery_service(settings, SourceTimeouts::default(), Duration::from_secs(5))?;

    if !json {
        println!("{} {}", "🔎 Discovering subdomains for".bright_blue().bold(), host.cyan());
    }

    let report = service
        .discover(host)
        .await
        .map_err(|e| anyhow::anyhow!("Discovery failed: {}", e))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &DiscoveryReport) {
    println!();
    println!(
        "{} {}  ({} found, {} reachable, {} ms)",
        "Domain:".bright_white().bold(),
        report.domain.cyan(),
        report.total,
        report.reachable.to_string().green(),
        report.duration_ms
    );
    println!();

    let width = report
        .subdomains
        .iter()
        .map(|s| s.subdomain.len())
        .max()
        .unwrap_or(0)
        .max(9);

    println!(
        "  {:<width$}  {:>6}  {}",
        "SUBDOMAIN".bold(),
        "STATUS".bold(),
        "SOURCES".bold(),
        width = width
    );

    for entry in &report.subdomains {
        let status = match entry.status_code {
            Some(code) => code.to_string(),
            None => "-".to_string(),
        };
        let sources = entry
            .sources
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let name = format!("{:<width$}", entry.subdomain, width = width);

        if entry.reachable {
            println!("  {}  {:>6}  {}", name.green(), status.green(), sources.dimmed());
        } else {
            println!("  {}  {:>6}  {}", name.dimmed(), status.dimmed(), sources.dimmed());
        }
    }

    println!();
    println!("{}", "Source counts:".bright_white().bold());
    println!("  crt.sh:           {}", report.sources.crt_sh);
    println!("  hackertarget:     {}", report.sources.hacker_target);
    println!("  subdomain.center: {}", report.sources.subdomain_center);
    println!("  rapiddns:         {}", report.sources.rapid_dns);
    println!("  brute-force:      {}", report.sources.brute_force);
}

/// Generates a token, shows it once and prints the matching `API_TOKENS` entry.
///
/// Only the HMAC digest belongs in server configuration; the raw token is not
/// recoverable after this command exits.
fn create_token(secret: &str, name: Option<String>, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let identity = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Identity")
            .with_initial_text("ci")
            .interact_text()?,
    };

    if identity.is_empty() || identity.contains([':', ',']) {
        bail!("Identity must be non-empty and must not contain ':' or ','");
    }

    let token = generate_token();
    let digest = hash_token(secret, &token);

    println!("{}", "Token details:".bright_white().bold());
    println!("  Identity: {}", identity.cyan());
    println!("  Token:    {}", token.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Print the API_TOKENS entry for this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    println!("{}", "Add this entry to API_TOKENS (comma separated):".bright_white());
    println!("  {}", format!("{}:{}", identity, digest).bright_green());
    println!();
    println!("{}", "Then call the API with:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token.bright_yellow()
    );

    Ok(())
}

/// 256 random bits, URL-safe base64 with a recognizable prefix.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill(&mut bytes);
    format!("{}{}", TOKEN_PREFIX, URL_SAFE_NO_PAD.encode(bytes))
}
