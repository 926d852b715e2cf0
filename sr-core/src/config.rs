//! Externally supplied settings: backend URL and third-party map credentials.

/// Backend used when no URL is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

pub const API_URL_VAR: &str = "SAFETY_ROUTER_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub google_api_key: Option<String>,
    pub mapbox_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            google_api_key: None,
            mapbox_token: None,
        }
    }
}

impl AppConfig {
    /// Settings baked in when the WASM bundle was built.
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("SAFETY_ROUTER_API_URL"),
            option_env!("SAFETY_ROUTER_GOOGLE_API_KEY"),
            option_env!("SAFETY_ROUTER_MAPBOX_TOKEN"),
        )
    }

    pub fn from_values(api: Option<&str>, google: Option<&str>, mapbox: Option<&str>) -> Self {
        let non_empty = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            api_base_url: non_empty(api).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            google_api_key: non_empty(google),
            mapbox_token: non_empty(mapbox),
        }
    }

}

pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_fall_back_to_localhost_only() {
        let config = AppConfig::from_values(None, Some("  "), None);
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.google_api_key, None);
        assert_eq!(config.mapbox_token, None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn supplied_values_are_kept() {
        let config = AppConfig::from_values(
            Some("https://api.example.org/"),
            Some("gkey"),
            Some("pk.token"),
        );
        assert_eq!(config.google_api_key.as_deref(), Some("gkey"));
        assert_eq!(config.mapbox_token.as_deref(), Some("pk.token"));
        assert_eq!(
            join_url(&config.api_base_url, "/score-routes"),
            "https://api.example.org/score-routes"
        );
    }

    #[test]
    fn join_url_handles_slashes() {
        assert_eq!(join_url("http://localhost:5000", "accidents/cluster"), "http://localhost:5000/accidents/cluster");
        assert_eq!(join_url("http://localhost:5000/", "/accidents/cluster"), "http://localhost:5000/accidents/cluster");
    }
}
