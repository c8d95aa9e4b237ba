use ferrous_whois_domain::{CliOverrides, Config};
use tracing::debug;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Called once logging is up, since the level itself comes from the config.
pub fn log_config(config_path: Option<&str>, config: &Config) {
    debug!(
        config_file = config_path.unwrap_or("default"),
        root_server = %config.whois.whois_tld_server,
        whois_port = config.whois.whois_port,
        timeout_ms = config.whois.default_timeout_ms,
        cache_ms = config.whois.root_cache_duration_ms,
        local_addr = ?config.whois.local_addr,
        "Configuration loaded"
    );
}
