use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use http::header::{HeaderMap, HeaderValue, SET_COOKIE};
use serde::Serialize;

use crate::config::CookieOptions;
use crate::diagnostics::{DiagnosticsSink, TracingDiagnostics};
use crate::domain::{resolve_cookie_domain, validate_cookie_domain};
use crate::errors::CookieError;
use crate::platform::{PlatformParser, UserAgentPlatformParser};
use crate::request::RequestContext;
use crate::same_site::{SameSite, adapt_same_site};

/// How far in the past a cleared cookie expires
const CLEAR_COOKIE_AGE_HOURS: i64 = 1;

/// Fully resolved cookie, ready to be written as a `Set-Cookie` header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: String,
    /// Empty means host-only
    pub domain: String,
    pub http_only: bool,
    pub secure: bool,
    pub expires: DateTime<Utc>,
    pub same_site: SameSite,
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        if !self.path.is_empty() {
            write!(f, "; Path={}", self.path)?;
        }
        if !self.domain.is_empty() {
            write!(f, "; Domain={}", self.domain)?;
        }
        write!(
            f,
            "; Expires={}",
            self.expires.format("%a, %d %b %Y %H:%M:%S GMT")
        )?;
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        if let Some(same_site) = self.same_site.attribute_value() {
            write!(f, "; SameSite={same_site}")?;
        }
        Ok(())
    }
}

// RFC 6265 token characters allowed in a cookie name
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

// RFC 6265 cookie-octet: no whitespace, DQUOTE, comma, semicolon or backslash
fn is_value_byte(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}

// Path and Domain attribute values end at the next ';'
fn is_attribute_byte(b: u8) -> bool {
    (0x21..=0x7E).contains(&b) && b != b';'
}

fn check_field(
    cookie: &str,
    field: &str,
    value: &str,
    allowed: fn(u8) -> bool,
) -> Result<(), CookieError> {
    if let Some(b) = value.bytes().find(|b| !allowed(*b)) {
        return Err(CookieError::Header(format!(
            "Invalid byte {b:#04x} in {field} of cookie {cookie:?}"
        )));
    }
    Ok(())
}

impl Cookie {
    /// Checks every field against the characters RFC 6265 allows there, so
    /// no field can end early and smuggle in extra attributes
    pub fn validate(&self) -> Result<(), CookieError> {
        if self.name.is_empty() {
            return Err(CookieError::Header("Cookie name is empty".to_string()));
        }
        check_field(&self.name, "name", &self.name, is_name_byte)?;
        check_field(&self.name, "value", &self.value, is_value_byte)?;
        check_field(&self.name, "path", &self.path, is_attribute_byte)?;
        check_field(&self.name, "domain", &self.domain, is_attribute_byte)?;
        Ok(())
    }

    pub fn to_header_value(&self) -> Result<HeaderValue, CookieError> {
        self.validate()?;
        HeaderValue::from_str(&self.to_string())
            .map_err(|e| CookieError::Header(format!("Invalid cookie {:?}: {e}", self.name)))
    }
}

/// Appends `cookie` to `headers` as a `Set-Cookie` header
pub fn header_set_cookie<'a>(
    headers: &'a mut HeaderMap,
    cookie: &Cookie,
) -> Result<&'a HeaderMap, CookieError> {
    headers.append(SET_COOKIE, cookie.to_header_value()?);
    Ok(headers)
}

/// `now + expiration`, clamped to the representable date range
fn expires_at(now: DateTime<Utc>, expiration: Duration) -> DateTime<Utc> {
    now.checked_add_signed(expiration).unwrap_or_else(|| {
        tracing::warn!("Cookie expiry {expiration} from {now} is out of range, clamping");
        if expiration < Duration::zero() {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        }
    })
}

/// Builds session cookies for incoming requests.
///
/// Holds the collaborators that cookie construction consults: where
/// warnings go and how User-Agents are classified. It is cheap to clone and
/// can be shared between request handlers.
#[derive(Clone)]
pub struct CookieIssuer {
    diagnostics: Arc<dyn DiagnosticsSink>,
    platform: Arc<dyn PlatformParser>,
}

impl Default for CookieIssuer {
    fn default() -> Self {
        Self {
            diagnostics: Arc::new(TracingDiagnostics),
            platform: Arc::new(UserAgentPlatformParser),
        }
    }
}

impl fmt::Debug for CookieIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieIssuer").finish_non_exhaustive()
    }
}

impl CookieIssuer {
    pub fn new(diagnostics: Arc<dyn DiagnosticsSink>, platform: Arc<dyn PlatformParser>) -> Self {
        Self {
            diagnostics,
            platform,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_platform_parser(mut self, platform: Arc<dyn PlatformParser>) -> Self {
        self.platform = platform;
        self
    }

    /// Builds a cookie with an explicit domain.
    ///
    /// A non-empty `domain` that is not a suffix of the request host only
    /// produces a warning. `SameSite=None` may be downgraded for clients that
    /// cannot handle it.
    #[allow(clippy::too_many_arguments)]
    pub fn make_cookie(
        &self,
        request: &RequestContext,
        name: &str,
        value: &str,
        path: &str,
        domain: &str,
        http_only: bool,
        secure: bool,
        expiration: Duration,
        now: DateTime<Utc>,
        same_site: SameSite,
    ) -> Cookie {
        validate_cookie_domain(&request.host, domain, self.diagnostics.as_ref());

        let same_site = adapt_same_site(same_site, &request.user_agent, self.platform.as_ref());

        Cookie {
            name: name.to_string(),
            value: value.to_string(),
            path: path.to_string(),
            domain: domain.to_string(),
            http_only,
            secure,
            expires: expires_at(now, expiration),
            same_site,
        }
    }

    /// Builds a cookie from the configured options.
    ///
    /// The domain is the first configured candidate matching the request
    /// host, or the last candidate when none does.
    #[tracing::instrument(skip(self, value, options))]
    pub fn make_cookie_from_options(
        &self,
        request: &RequestContext,
        name: &str,
        value: &str,
        options: &CookieOptions,
        expiration: Duration,
        now: DateTime<Utc>,
    ) -> Cookie {
        let domain =
            resolve_cookie_domain(&request.host, &options.domains, self.diagnostics.as_ref());

        let cookie = self.make_cookie(
            request,
            name,
            value,
            &options.path,
            &domain,
            options.http_only,
            options.secure,
            expiration,
            now,
            options.same_site,
        );

        tracing::debug!(
            "Issuing cookie {:?} for domain {:?} with SameSite={}",
            cookie.name,
            cookie.domain,
            cookie.same_site
        );
        cookie
    }

    /// Session cookie with the configured name and lifetime
    pub fn make_session_cookie(
        &self,
        request: &RequestContext,
        value: &str,
        options: &CookieOptions,
        now: DateTime<Utc>,
    ) -> Cookie {
        self.make_cookie_from_options(request, &options.name, value, options, options.expire, now)
    }

    /// Expired, empty counterpart of the session cookie.
    ///
    /// Domain and path are chosen exactly as for the session cookie so the
    /// browser replaces it instead of storing a second cookie.
    #[tracing::instrument(skip(self, options))]
    pub fn clear_cookie_from_options(
        &self,
        request: &RequestContext,
        options: &CookieOptions,
        now: DateTime<Utc>,
    ) -> Cookie {
        self.make_cookie_from_options(
            request,
            &options.name,
            "",
            options,
            Duration::hours(-CLEAR_COOKIE_AGE_HOURS),
            now,
        )
    }
}
