use crate::error::GenerateError;
use proc_macro2::TokenStream;
use quote::quote;
use serde::Deserialize;
use std::path::Path;

/// Environment variable overriding the runtime crate path in generated code.
pub const RUNTIME_CRATE_ENV: &str = "FRAMEGEN_RUNTIME_CRATE";

///
/// BuildConfig
///
/// Generator settings, usually left at their defaults. The runtime crate path
/// is what generated code uses to reach `Reader`, `Writer` and friends, so
/// consumers that re-export the runtime can point it elsewhere.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct BuildConfig {
    pub runtime_crate: String,
    pub artifact_prefix: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            runtime_crate: "::framegen_runtime".to_string(),
            artifact_prefix: "framing_amqp".to_string(),
        }
    }
}

impl BuildConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, GenerateError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GenerateError> {
        let s = std::fs::read_to_string(path)?;

        Self::from_toml_str(&s)
    }

    /// Apply `FRAMEGEN_RUNTIME_CRATE` if it is set and non-empty.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(runtime) = std::env::var(RUNTIME_CRATE_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
        {
            self.runtime_crate = runtime;
        }

        self
    }

    pub(crate) fn runtime_path(&self) -> Result<TokenStream, GenerateError> {
        let path: syn::Path = syn::parse_str(self.runtime_crate.trim())
            .map_err(|_| GenerateError::RuntimePath(self.runtime_crate.clone()))?;

        Ok(quote!(#path))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, sync::Mutex};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct TempEnv {
        key: &'static str,
        prev: Option<String>,
    }

    impl TempEnv {
        fn set(key: &'static str, value: Option<&str>) -> Self {
            let prev = env::var(key).ok();
            unsafe {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
            Self { key, prev }
        }
    }

    impl Drop for TempEnv {
        fn drop(&mut self) {
            unsafe {
                match &self.prev {
                    Some(value) => env::set_var(self.key, value),
                    None => env::remove_var(self.key),
                }
            }
        }
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = BuildConfig::from_toml_str("").unwrap();

        assert_eq!(config, BuildConfig::default());
    }

    #[test]
    fn toml_overrides_individual_keys() {
        let config = BuildConfig::from_toml_str(r#"runtime-crate = "crate::rt""#).unwrap();

        assert_eq!(config.runtime_crate, "crate::rt");
        assert_eq!(config.artifact_prefix, "framing_amqp");
        assert_eq!(
            config.runtime_path().unwrap().to_string(),
            quote!(crate::rt).to_string()
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = BuildConfig::from_toml_str("runtime = 1").unwrap_err();

        assert!(matches!(err, GenerateError::Config(_)));
    }

    #[test]
    fn invalid_runtime_path_is_rejected() {
        let config = BuildConfig {
            runtime_crate: "not a path".to_string(),
            ..BuildConfig::default()
        };

        assert!(matches!(
            config.runtime_path(),
            Err(GenerateError::RuntimePath(path)) if path == "not a path"
        ));
    }

    #[test]
    fn env_override_wins_over_config() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _runtime = TempEnv::set(RUNTIME_CRATE_ENV, Some("  ::my_app::framing  "));

        let config = BuildConfig::default().with_env_overrides();

        assert_eq!(config.runtime_crate, "::my_app::framing");
    }

    #[test]
    fn blank_env_override_is_ignored() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _runtime = TempEnv::set(RUNTIME_CRATE_ENV, Some("   "));

        let config = BuildConfig::default().with_env_overrides();

        assert_eq!(config.runtime_crate, "::framegen_runtime");
    }
}
