//! # Ferrous WHOIS
//!
//! Command-line WHOIS client: resolves the TLD's registry server through the
//! root directory, queries it and optionally follows the registrar referral.

mod bootstrap;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use ferrous_whois_domain::{split_tld, CliOverrides, RecordLookup, Referral};
use ferrous_whois_infrastructure::whois::WhoisLookupBuilder;
use serde_json::json;
use std::net::SocketAddr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Only resolve the TLD's registry WHOIS server
    Tld,
    /// Query the registry server
    Registry,
    /// Query the registry, then the registrar it refers to
    Registrar,
    /// Registry and registrar records side by side
    Full,
}

#[derive(Parser)]
#[command(name = "ferrous-whois")]
#[command(version = "0.1.0")]
#[command(about = "🦀 WHOIS client with registry and registrar lookups")]
struct Cli {
    /// Domain name to look up (a bare TLD in `tld` mode)
    domain: String,

    /// Lookup mode
    #[arg(short, long, value_enum, default_value = "registrar")]
    mode: Mode,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Per-query timeout in milliseconds
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    /// Local address to bind outgoing connections to (e.g. 192.0.2.10:0)
    #[arg(short, long)]
    local_addr: Option<SocketAddr>,

    /// Root directory server as host:port
    #[arg(short, long)]
    root_server: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the raw server response instead of JSON
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        timeout_ms: cli.timeout_ms,
        local_addr: cli.local_addr,
        root_server: cli.root_server.clone(),
        log_level: cli.log_level.clone(),
    };
    let config = bootstrap::load_config(cli.config.as_deref(), overrides)
        .context("invalid configuration")?;
    bootstrap::init_logging(&config);
    bootstrap::log_config(cli.config.as_deref(), &config);

    let lookup = WhoisLookupBuilder::new(config.whois).build();

    match cli.mode {
        Mode::Tld => {
            let tld = split_tld(&cli.domain).unwrap_or_else(|_| cli.domain.trim_matches('.'));
            let server = lookup.get_tld_whois_server(tld).await?;
            if cli.raw {
                println!("{}", server);
            } else {
                print_json(&json!({ "tld": tld, "whois_server": server }))?;
            }
        }
        Mode::Registry => {
            let record = lookup.get_registry_whois(&cli.domain).await?;
            print_record(&record, cli.raw)?;
        }
        Mode::Registrar => {
            let record = lookup.get_registrar_whois(&cli.domain).await?;
            if let Some(soft) = record.soft_error() {
                warn!(domain = %cli.domain, server = %record.server, "{}", soft);
            }
            print_record(&record, cli.raw)?;
        }
        Mode::Full => {
            let result = lookup.get_whois(&cli.domain).await?;
            if let Some(soft) = result.soft_error() {
                warn!(domain = %cli.domain, "{}", soft);
            }
            if cli.raw {
                print!("{}", result.registry_whois_raw);
                if let Some(raw) = &result.registrar_whois_raw {
                    println!();
                    print!("{}", raw);
                }
            } else {
                print_json(&result)?;
            }
        }
    }

    Ok(())
}

fn print_record(record: &RecordLookup, raw: bool) -> anyhow::Result<()> {
    if raw {
        print!("{}", record.raw);
        return Ok(());
    }

    let referral = match &record.referral {
        Referral::NotRequested => json!(null),
        Referral::Followed(host) => json!({ "followed": host }),
        Referral::Missing => json!("missing"),
    };
    print_json(&json!({
        "server": record.server,
        "referral": referral,
        "record": record.info,
    }))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
