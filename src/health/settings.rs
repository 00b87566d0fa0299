//! Environment-derived report settings.
//!
//! Version and environment name are resolved on every evaluation through a
//! fixed fallback table, so nothing about them is cached between probes.

use crate::config::{
    DEFAULT_ENVIRONMENT, DEFAULT_VERSION, ENVIRONMENT_ENV_VAR, LEGACY_ENVIRONMENT_ENV_VAR,
    LEGACY_VERSION_ENV_VAR, VERSION_ENV_VAR,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Version = 0,
    Environment = 1,
}

/// Fallback table, indexed by `Setting`: (variables in lookup order, default).
const FALLBACKS: [(&[&str], &str); 2] = [
    (&[VERSION_ENV_VAR, LEGACY_VERSION_ENV_VAR], DEFAULT_VERSION),
    (&[ENVIRONMENT_ENV_VAR, LEGACY_ENVIRONMENT_ENV_VAR], DEFAULT_ENVIRONMENT),
];

impl Setting {
    fn fallback(self) -> (&'static [&'static str], &'static str) {
        FALLBACKS[self as usize]
    }
}

/// Variable lookup used to resolve settings.
pub type Lookup = fn(&str) -> Option<String>;

/// Reads from the process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Resolve `setting` through `lookup`, trying each variable in order.
/// Unset or empty values fall through to the next, then to the default.
pub fn resolve(setting: Setting, lookup: Lookup) -> String {
    let (keys, default) = setting.fallback();
    keys.iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty(_: &str) -> Option<String> {
        None
    }

    fn blank(_: &str) -> Option<String> {
        Some(String::new())
    }

    fn staged(key: &str) -> Option<String> {
        match key {
            "APP_VERSION" => Some("2.4.1".to_string()),
            "APP_ENV" => Some("staging".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(resolve(Setting::Version, empty), "1.0.0");
        assert_eq!(resolve(Setting::Environment, empty), "development");
    }

    #[test]
    fn test_empty_value_falls_back() {
        assert_eq!(resolve(Setting::Version, blank), "1.0.0");
        assert_eq!(resolve(Setting::Environment, blank), "development");
    }

    #[test]
    fn test_values_from_lookup() {
        assert_eq!(resolve(Setting::Version, staged), "2.4.1");
        assert_eq!(resolve(Setting::Environment, staged), "staging");
    }

    fn legacy_only(key: &str) -> Option<String> {
        match key {
            "NEXT_PUBLIC_APP_VERSION" => Some("0.9.3".to_string()),
            "NEXT_PUBLIC_APP_ENV" => Some("production".to_string()),
            _ => None,
        }
    }

    fn both(key: &str) -> Option<String> {
        match key {
            "APP_VERSION" => Some("2.0.0".to_string()),
            "APP_ENV" => Some(String::new()),
            "NEXT_PUBLIC_APP_VERSION" => Some("0.9.3".to_string()),
            "NEXT_PUBLIC_APP_ENV" => Some("production".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_legacy_names_are_read() {
        assert_eq!(resolve(Setting::Version, legacy_only), "0.9.3");
        assert_eq!(resolve(Setting::Environment, legacy_only), "production");
    }

    #[test]
    fn test_primary_name_wins_unless_empty() {
        assert_eq!(resolve(Setting::Version, both), "2.0.0");
        assert_eq!(resolve(Setting::Environment, both), "production");
    }

    #[test]
    fn test_fallback_table_order() {
        assert_eq!(Setting::Version.fallback().0[0], "APP_VERSION");
        assert_eq!(Setting::Environment.fallback().0[0], "APP_ENV");
    }
}
