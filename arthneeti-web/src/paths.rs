//! Build-time deployment settings.
//!
//! `PUBLIC_URL` sets the router base when the app is hosted under a
//! subdirectory. `ARTHNEETI_API_URL` points the client at the game API and
//! `ARTHNEETI_LOG` picks the console log level.
use arthneeti_client::{AuthScheme, ClientConfig};
use log::LevelFilter;

/// Base path for the router (e.g., `/play` when hosted under a subdirectory).
///
/// Returns `None` when no base path is configured so the router falls back to root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Client configuration baked in at compile time.
#[must_use]
pub fn client_config() -> ClientConfig {
    config_with(
        option_env!("ARTHNEETI_API_URL"),
        option_env!("ARTHNEETI_AUTH_SCHEME"),
    )
}

#[must_use]
pub fn log_level() -> LevelFilter {
    option_env!("ARTHNEETI_LOG")
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim_end_matches('/').trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

fn config_with(api_url: Option<&str>, scheme: Option<&str>) -> ClientConfig {
    let mut config = ClientConfig::default();
    if let Some(url) = api_url.map(str::trim).filter(|url| !url.is_empty()) {
        config = config.with_base_url(url.trim_end_matches('/'));
    }
    if let Some(scheme) = scheme.and_then(AuthScheme::parse) {
        config = config.with_auth_scheme(scheme);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::{config_with, router_base_with_base};
    use arthneeti_client::{AuthScheme, ClientConfig};

    #[test]
    fn router_base_is_none_when_blank() {
        assert_eq!(router_base_with_base(""), None);
        assert_eq!(router_base_with_base("/"), None);
    }

    #[test]
    fn router_base_returns_trimmed_value() {
        assert_eq!(router_base_with_base("/play/"), Some(String::from("/play")));
    }

    #[test]
    fn api_url_overrides_default_base() {
        let config = config_with(Some("https://arthneeti.example/api/"), None);
        assert_eq!(config.api_base_url, "https://arthneeti.example/api");
        assert_eq!(config.url("start-game/"), "https://arthneeti.example/api/start-game/");
    }

    #[test]
    fn blank_or_unknown_values_keep_defaults() {
        let config = config_with(Some("  "), Some("basic"));
        assert_eq!(config, ClientConfig::default());

        let bearer = config_with(None, Some("Bearer"));
        assert_eq!(bearer.auth_scheme, AuthScheme::Bearer);
    }
}
