//! session-cookie - Session cookie attributes for authentication gateways
//!
//! An auth gateway in front of several backend hosts has to decide, per
//! request, which `Domain` to put on its session cookie and whether the
//! configured `SameSite` policy is safe for the requesting browser. This
//! crate makes those two decisions and assembles the resulting cookie.

mod config;
mod cookie;
mod diagnostics;
mod domain;
mod errors;
mod platform;
mod request;
mod same_site;

pub use config::{
    CookieOptions, DEFAULT_COOKIE_EXPIRE_SECS, DEFAULT_COOKIE_NAME, DEFAULT_COOKIE_PATH,
    MAX_COOKIE_EXPIRE_SECS, cookie_options, init,
};
pub use cookie::{Cookie, CookieIssuer, header_set_cookie};
pub use diagnostics::{DiagnosticsSink, TracingDiagnostics};
pub use domain::{get_cookie_domain, resolve_cookie_domain, strip_port, validate_cookie_domain};
pub use errors::CookieError;
pub use platform::{OsFamily, PlatformParser, PlatformSignature, UserAgentPlatformParser, Version};
pub use request::{RequestContext, get_request_host};
pub use same_site::{SameSite, adapt_same_site, parse_same_site};
