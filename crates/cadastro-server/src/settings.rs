// File: src/settings.rs
// Purpose: Load cadastro.toml and apply environment overrides

use anyhow::{Context, Result};
use cadastro::Config;
use tracing::warn;

pub const ENDPOINT_URL_VAR: &str = "CADASTRO_ENDPOINT_URL";
pub const PORT_VAR: &str = "CADASTRO_PORT";

/// Load ./cadastro.toml (defaults on failure), then the environment.
pub fn load() -> Result<Config> {
    let mut config = Config::load_default().unwrap_or_else(|e| {
        warn!("Failed to load config: {:#}, using defaults", e);
        Config::default()
    });

    apply_overrides(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

pub fn apply_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) -> Result<()> {
    if let Some(url) = var(ENDPOINT_URL_VAR) {
        config.endpoint.url = url;
    }

    if let Some(port) = var(PORT_VAR) {
        config.server.port = port
            .parse()
            .with_context(|| format!("{} is not a valid port: {:?}", PORT_VAR, port))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_no_overrides() {
        let mut config = Config::default();
        apply_overrides(&mut config, env(&[])).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.endpoint.url, Config::default().endpoint.url);
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = Config::default();
        apply_overrides(
            &mut config,
            env(&[
                (ENDPOINT_URL_VAR, "https://api.example.com/Person/Person"),
                (PORT_VAR, "8081"),
            ]),
        )
        .unwrap();
        assert_eq!(config.endpoint.url, "https://api.example.com/Person/Person");
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_bad_port_is_an_error() {
        let mut config = Config::default();
        let err = apply_overrides(&mut config, env(&[(PORT_VAR, "eighty")])).unwrap_err();
        assert!(err.to_string().contains(PORT_VAR));
    }
}
