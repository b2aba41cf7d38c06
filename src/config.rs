pub const DEFAULT_API_BASE: &str = "https://estampakits.com/gen/api";
pub const DEFAULT_ASSET_BASE: &str = "https://estampakits.com/gen/";

#[derive(Debug, Clone)]
pub struct LabConfig {
    pub api_base: String,
    pub asset_base: String,
    pub port: u16,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self { api_base: DEFAULT_API_BASE.to_string(), asset_base: DEFAULT_ASSET_BASE.to_string(), port: 8080 }
    }
}

impl LabConfig {
    /// Reads `LAB_API_BASE`, `LAB_ASSET_BASE` and `PORT`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let api_base = lookup("LAB_API_BASE")
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base);
        let asset_base = lookup("LAB_ASSET_BASE").filter(|v| !v.trim().is_empty()).unwrap_or(defaults.asset_base);
        let port = lookup("PORT").and_then(|v| v.parse().ok()).unwrap_or(defaults.port);
        Self { api_base, asset_base, port }
    }
}
