use http::HeaderMap;
use http::header::{HOST, USER_AGENT};

const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// The parts of an incoming request that cookie construction looks at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Host the client addressed, possibly with a `:port` suffix
    pub host: String,
    pub user_agent: String,
}

impl RequestContext {
    pub fn new(host: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Builds the context from request headers.
    ///
    /// With `reverse_proxy` set, the first `X-Forwarded-Host` entry takes
    /// precedence over `Host`. Only enable it behind a proxy that overwrites
    /// the header, otherwise clients choose the host themselves.
    pub fn from_headers(headers: &HeaderMap, reverse_proxy: bool) -> Self {
        Self {
            host: get_request_host(headers, reverse_proxy),
            user_agent: header_str(headers, USER_AGENT.as_str())
                .unwrap_or_default()
                .to_string(),
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Effective host of the request, empty when no usable header is present
pub fn get_request_host(headers: &HeaderMap, reverse_proxy: bool) -> String {
    if reverse_proxy {
        let forwarded = header_str(headers, X_FORWARDED_HOST)
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty());
        if let Some(host) = forwarded {
            return host.to_string();
        }
    }

    header_str(headers, HOST.as_str())
        .unwrap_or_default()
        .to_string()
}
