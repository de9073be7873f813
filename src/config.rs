/// Application-level constants
pub const APP_NAME: &str = "Pharmadash";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Inventory API the dashboard talks to when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

/// Page the edit action navigates to (receives `?id=`).
pub const DEFAULT_UPDATE_PAGE: &str = "update_medicine.html";

const ENV_API_BASE: &str = "PHARMADASH_API_BASE";
const ENV_UPDATE_PAGE: &str = "PHARMADASH_UPDATE_PAGE";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "pharmadash=info,pharmadash_lib=info,warn"
}

/// Where the dashboard fetches from and where edits navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub api_base: String,
    pub update_page: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            update_page: DEFAULT_UPDATE_PAGE.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by `PHARMADASH_API_BASE` / `PHARMADASH_UPDATE_PAGE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(base) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            config.api_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(page) = lookup(ENV_UPDATE_PAGE).filter(|v| !v.trim().is_empty()) {
            config.update_page = page.trim().to_string();
        }
        config
    }

    /// Apply a CLI override for the API base, if given.
    pub fn with_api_base(mut self, api_base: Option<String>) -> Self {
        if let Some(base) = api_base {
            self.api_base = base.trim_end_matches('/').to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_pharmadash() {
        assert_eq!(APP_NAME, "Pharmadash");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let config = DashboardConfig::default();
        assert_eq!(config.api_base, "http://127.0.0.1:5000");
        assert_eq!(config.update_page, "update_medicine.html");
    }

    #[test]
    fn env_overrides_trim_trailing_slash() {
        let config = DashboardConfig::from_lookup(|key| match key {
            "PHARMADASH_API_BASE" => Some("http://inventory.local:8000/".into()),
            _ => None,
        });
        assert_eq!(config.api_base, "http://inventory.local:8000");
        assert_eq!(config.update_page, DEFAULT_UPDATE_PAGE);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let config = DashboardConfig::from_lookup(|_| Some("   ".into()));
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn cli_override_wins() {
        let config = DashboardConfig::default().with_api_base(Some("http://x:1/".into()));
        assert_eq!(config.api_base, "http://x:1");
        let untouched = DashboardConfig::default().with_api_base(None);
        assert_eq!(untouched.api_base, DEFAULT_API_BASE);
    }
}
