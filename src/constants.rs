//! Central Configuration Constants
//!
//! Single source of truth for env variable names and defaults.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "MailShield";

/// Default log filter when neither `RUST_LOG` nor `MAILSHIELD_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "info";

pub const ENV_CONFIG_PATH: &str = "MAILSHIELD_CONFIG";
pub const ENV_MODEL_PATH: &str = "MAILSHIELD_MODEL_PATH";
pub const ENV_LOG_FILTER: &str = "MAILSHIELD_LOG";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Detector config file, if one is configured
pub fn get_config_path() -> Option<String> {
    non_empty_var(ENV_CONFIG_PATH)
}

/// Linear model file; overrides `model_path` from the config file
pub fn get_model_path() -> Option<String> {
    non_empty_var(ENV_MODEL_PATH)
}

/// Log filter used when `RUST_LOG` is unset
pub fn get_log_filter() -> String {
    non_empty_var(ENV_LOG_FILTER).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_var_is_none() {
        assert_eq!(non_empty_var("MAILSHIELD_TEST_SURELY_UNSET_VAR"), None);
    }

    #[test]
    fn test_app_version_matches_package() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
