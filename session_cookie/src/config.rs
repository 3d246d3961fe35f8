//! Cookie options loaded from the environment.
//!
//! Every value is validated once at startup through [`init`]. A bad value
//! stops initialization with a [`CookieError`] instead of surfacing later on
//! a live request.

use std::env;
use std::sync::OnceLock;

use chrono::Duration;

use crate::errors::CookieError;
use crate::same_site::{SameSite, parse_same_site};

pub const DEFAULT_COOKIE_NAME: &str = "_oauth2_proxy";
pub const DEFAULT_COOKIE_PATH: &str = "/";
/// 168 hours
pub const DEFAULT_COOKIE_EXPIRE_SECS: i64 = 7 * 24 * 60 * 60;
/// 400 days, the longest lifetime browsers keep a cookie for
pub const MAX_COOKIE_EXPIRE_SECS: i64 = 400 * 24 * 60 * 60;

// "__Host-" cookies must be host-only, Secure and scoped to "/"
const HOST_PREFIX: &str = "__Host-";

static COOKIE_OPTIONS: OnceLock<CookieOptions> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub name: String,
    pub path: String,
    /// Candidate domains, most specific first
    pub domains: Vec<String>,
    pub secure: bool,
    pub http_only: bool,
    pub expire: Duration,
    pub same_site: SameSite,
    /// Trust `X-Forwarded-Host` when resolving the request host
    pub reverse_proxy: bool,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.to_string(),
            path: DEFAULT_COOKIE_PATH.to_string(),
            domains: Vec::new(),
            secure: true,
            http_only: true,
            expire: Duration::seconds(DEFAULT_COOKIE_EXPIRE_SECS),
            same_site: SameSite::Default,
            reverse_proxy: false,
        }
    }
}

impl CookieOptions {
    /// Reads and validates the options from process environment variables
    pub fn from_env() -> Result<Self, CookieError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads and validates the options through `lookup`, which returns the
    /// raw value of a variable or `None` when it is unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CookieError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let options = Self {
            name: lookup("COOKIE_NAME").unwrap_or(defaults.name),
            path: lookup("COOKIE_PATH").unwrap_or(defaults.path),
            domains: lookup("COOKIE_DOMAINS")
                .map(|value| parse_domains(&value))
                .unwrap_or(defaults.domains),
            secure: parse_bool("COOKIE_SECURE", lookup("COOKIE_SECURE"), defaults.secure)?,
            http_only: parse_bool(
                "COOKIE_HTTPONLY",
                lookup("COOKIE_HTTPONLY"),
                defaults.http_only,
            )?,
            expire: parse_expire(lookup("COOKIE_EXPIRE"), defaults.expire)?,
            same_site: parse_same_site(lookup("COOKIE_SAMESITE").as_deref().unwrap_or(""))?,
            reverse_proxy: parse_bool(
                "REVERSE_PROXY",
                lookup("REVERSE_PROXY"),
                defaults.reverse_proxy,
            )?,
        };

        options.validate()?;
        Ok(options)
    }

    /// Checks the combination of values for consistency
    pub fn validate(&self) -> Result<(), CookieError> {
        if self.name.is_empty() {
            return Err(CookieError::Config(
                "COOKIE_NAME must not be empty".to_string(),
            ));
        }

        if self.name.starts_with(HOST_PREFIX) {
            if !self.domains.is_empty() {
                return Err(CookieError::Config(format!(
                    "cookie {:?} uses the {HOST_PREFIX} prefix and cannot set COOKIE_DOMAINS",
                    self.name
                )));
            }
            if self.path != "/" {
                return Err(CookieError::Config(format!(
                    "cookie {:?} uses the {HOST_PREFIX} prefix and requires COOKIE_PATH=/",
                    self.name
                )));
            }
            if !self.secure {
                return Err(CookieError::Config(format!(
                    "cookie {:?} uses the {HOST_PREFIX} prefix and requires COOKIE_SECURE=true",
                    self.name
                )));
            }
        }

        if self.same_site == SameSite::None && !self.secure {
            tracing::warn!(
                "COOKIE_SAMESITE=none without COOKIE_SECURE=true, browsers will reject cookie {:?}",
                self.name
            );
        }

        Ok(())
    }
}

fn parse_domains(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_bool(key: &str, value: Option<String>, default: bool) -> Result<bool, CookieError> {
    let Some(value) = value else {
        return Ok(default);
    };

    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(CookieError::Config(format!(
            "{key} must be true or false, got {value:?}"
        ))),
    }
}

fn parse_expire(value: Option<String>, default: Duration) -> Result<Duration, CookieError> {
    let Some(value) = value else {
        return Ok(default);
    };

    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|secs| (0..=MAX_COOKIE_EXPIRE_SECS).contains(secs))
        .and_then(Duration::try_seconds)
        .ok_or_else(|| {
            CookieError::Config(format!(
                "COOKIE_EXPIRE must be between 0 and {MAX_COOKIE_EXPIRE_SECS} seconds, got {value:?}"
            ))
        })
}

/// Loads the cookie options from the environment and keeps them for
/// [`cookie_options`]. Calling it again after a success is a no-op.
pub fn init() -> Result<(), CookieError> {
    if COOKIE_OPTIONS.get().is_some() {
        return Ok(());
    }

    let options = CookieOptions::from_env()?;
    tracing::debug!("Cookie options: {options:?}");

    // First write wins if two callers race
    let _ = COOKIE_OPTIONS.set(options);
    Ok(())
}

/// Options stored by [`init`]
pub fn cookie_options() -> Result<&'static CookieOptions, CookieError> {
    COOKIE_OPTIONS.get().ok_or(CookieError::NotInitialized)
}
