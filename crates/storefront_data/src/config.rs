//! Backend connection settings.

use serde::Deserialize;

use crate::error::DataResult;

/// Environment variable holding the backend base URL.
pub const BACKEND_URL_VAR: &str = "MEDUSA_BACKEND_URL";
/// Environment variable holding the publishable API key.
pub const PUBLISHABLE_KEY_VAR: &str = "NEXT_PUBLIC_MEDUSA_PUBLISHABLE_KEY";
/// Backend used when nothing is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:9000";

/// Where the store API lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL of the commerce backend.
    pub backend_url: String,
    /// Publishable key sent with store requests. Empty when unset.
    pub publishable_key: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_owned(),
            publishable_key: String::new(),
        }
    }
}

impl BackendSettings {
    /// Reads settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Self {
            backend_url: read(BACKEND_URL_VAR).unwrap_or_else(|| DEFAULT_BACKEND_URL.to_owned()),
            publishable_key: read(PUBLISHABLE_KEY_VAR).unwrap_or_default(),
        }
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this type.
    pub fn from_toml_str(text: &str) -> DataResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Returns true if a publishable key is configured.
    #[must_use]
    pub fn publishable_key_set(&self) -> bool {
        !self.publishable_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let settings = BackendSettings::from_lookup(|_| None);

        assert_eq!(settings.backend_url, DEFAULT_BACKEND_URL);
        assert!(!settings.publishable_key_set());
    }

    #[test]
    fn test_lookup_overrides_and_ignores_empty() {
        let vars: HashMap<&str, &str> = [
            (BACKEND_URL_VAR, ""),
            (PUBLISHABLE_KEY_VAR, "pk_123"),
        ]
        .into_iter()
        .collect();
        let settings = BackendSettings::from_lookup(|key| vars.get(key).map(|v| (*v).to_owned()));

        assert_eq!(settings.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(settings.publishable_key, "pk_123");
        assert!(settings.publishable_key_set());
    }

    #[test]
    fn test_toml_settings() {
        let settings =
            BackendSettings::from_toml_str(r#"backend_url = "https://api.example.no""#).unwrap();

        assert_eq!(settings.backend_url, "https://api.example.no");
        assert!(settings.publishable_key.is_empty());
    }
}
