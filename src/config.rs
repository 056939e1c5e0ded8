use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use crate::error::{GiftError, Result};

// ==================== DEFAULTS ====================

pub const DEFAULT_API_BASE: &str = "https://api.mercadolibre.com";
/// Argentina.
pub const DEFAULT_SITE: &str = "MLA";

const ENV_API_BASE: &str = "GIFT_FINDER_API_BASE";
const ENV_SITE: &str = "GIFT_FINDER_SITE";
const ENV_TIMEOUT_SECS: &str = "GIFT_FINDER_TIMEOUT_SECS";
const ENV_EMPTY_POLICY: &str = "GIFT_FINDER_EMPTY_POLICY";

lazy_static! {
    static ref SITE_ID: Regex = Regex::new(r"^[A-Z]{3}$").unwrap();
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

// ==================== POLICY ====================

/// What a re-roll shows when the filtered result set is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyResultPolicy {
    /// Replace whatever was on screen with an explicit "no gifts found".
    #[default]
    ShowNoMatches,
    /// Leave the previously displayed product in place.
    KeepPrevious,
}

impl EmptyResultPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "show_no_matches" | "no_matches" => Some(Self::ShowNoMatches),
            "keep_previous" | "keep" => Some(Self::KeepPrevious),
            _ => None,
        }
    }
}

// ==================== CONFIG ====================

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub site: String,
    /// `None` leaves the platform default in charge.
    pub request_timeout: Option<Duration>,
    /// Send requests with a Chrome TLS/header fingerprint.
    pub browser_emulation: bool,
    pub empty_result_policy: EmptyResultPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            site: DEFAULT_SITE.to_string(),
            request_timeout: None,
            browser_emulation: false,
            empty_result_policy: EmptyResultPolicy::default(),
        }
    }
}

impl Config {
    /// Defaults overridden by `GIFT_FINDER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(base) = env_var(ENV_API_BASE) {
            config.api_base = base;
        }
        if let Some(site) = env_var(ENV_SITE) {
            config.site = site;
        }
        if let Some(raw) = env_var(ENV_TIMEOUT_SECS) {
            let secs: f64 = raw
                .parse()
                .map_err(|_| GiftError::Config(format!("{ENV_TIMEOUT_SECS}={raw} is not a number")))?;
            config.request_timeout = Some(timeout_from_secs(secs)?);
        }
        if let Some(raw) = env_var(ENV_EMPTY_POLICY) {
            config.empty_result_policy = EmptyResultPolicy::parse(&raw)
                .ok_or_else(|| GiftError::Config(format!("unknown {ENV_EMPTY_POLICY}={raw}")))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !SITE_ID.is_match(&self.site) {
            return Err(GiftError::Config(format!(
                "site id must be three uppercase letters (got {:?})",
                self.site
            )));
        }
        let base = Url::parse(&self.api_base)?;
        if base.cannot_be_a_base() {
            return Err(GiftError::Config(format!(
                "api base {} cannot carry a path",
                self.api_base
            )));
        }
        Ok(())
    }
}

pub fn timeout_from_secs(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(GiftError::Config(format!(
            "timeout must be a positive number of seconds (got {secs})"
        )));
    }
    Ok(Duration::from_secs_f64(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, MutexGuard, OnceLock};

    fn env_lock() -> MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    struct EnvVarGuard {
        key: &'static str,
        original: Option<String>,
    }

    impl EnvVarGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            match &self.original {
                Some(value) => env::set_var(self.key, value),
                None => env::remove_var(self.key),
            }
        }
    }

    /// Runs `action` with every `GIFT_FINDER_*` variable set; `""` means unset.
    fn with_env<T>(
        base: &str,
        site: &str,
        timeout: &str,
        policy: &str,
        action: impl FnOnce() -> T,
    ) -> T {
        let _lock = env_lock();
        let _base = EnvVarGuard::set(ENV_API_BASE, base);
        let _site = EnvVarGuard::set(ENV_SITE, site);
        let _timeout = EnvVarGuard::set(ENV_TIMEOUT_SECS, timeout);
        let _policy = EnvVarGuard::set(ENV_EMPTY_POLICY, policy);
        action()
    }

    #[test]
    fn env_overrides_every_setting() {
        let config = with_env(
            "http://127.0.0.1:9000",
            "MLB",
            "4.5",
            "keep_previous",
            Config::from_env,
        )
        .expect("config");
        assert_eq!(config.api_base, "http://127.0.0.1:9000");
        assert_eq!(config.site, "MLB");
        assert_eq!(config.request_timeout, Some(Duration::from_millis(4500)));
        assert_eq!(config.empty_result_policy, EmptyResultPolicy::KeepPrevious);
    }

    #[test]
    fn empty_env_values_keep_defaults() {
        let config = with_env("", "", "", "", Config::from_env).expect("config");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn env_rejects_non_numeric_timeout() {
        let result = with_env("", "", "soon", "", Config::from_env);
        assert!(matches!(result, Err(GiftError::Config(_))));
    }

    #[test]
    fn env_rejects_unknown_policy() {
        let result = with_env("", "", "", "sometimes", Config::from_env);
        assert!(matches!(result, Err(GiftError::Config(_))));
    }

    #[test]
    fn env_site_is_validated() {
        let result = with_env("", "brasil", "", "", Config::from_env);
        assert!(matches!(result, Err(GiftError::Config(_))));
    }

    #[test]
    fn defaults_point_at_argentina() {
        let config = Config::default();
        assert_eq!(config.api_base, "https://api.mercadolibre.com");
        assert_eq!(config.site, "MLA");
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.empty_result_policy, EmptyResultPolicy::ShowNoMatches);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_site_ids() {
        for site in ["", "mla", "MLAX", "M1A"] {
            let config = Config::default().with_site(site);
            assert!(
                matches!(config.validate(), Err(GiftError::Config(_))),
                "site {site:?} should be rejected"
            );
        }
        assert!(Config::default().with_site("MLB").validate().is_ok());
    }

    #[test]
    fn rejects_unparseable_base() {
        let config = Config {
            api_base: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(GiftError::Url(_))));
    }

    #[test]
    fn parses_empty_policy_names() {
        assert_eq!(
            EmptyResultPolicy::parse("keep_previous"),
            Some(EmptyResultPolicy::KeepPrevious)
        );
        assert_eq!(
            EmptyResultPolicy::parse(" Show_No_Matches "),
            Some(EmptyResultPolicy::ShowNoMatches)
        );
        assert_eq!(EmptyResultPolicy::parse("sometimes"), None);
    }

    #[test]
    fn timeout_must_be_positive() {
        assert!(timeout_from_secs(0.0).is_err());
        assert!(timeout_from_secs(-1.0).is_err());
        assert!(timeout_from_secs(f64::NAN).is_err());
        assert_eq!(timeout_from_secs(2.5).unwrap(), Duration::from_millis(2500));
    }
}
