//! Cookie domain selection.
//!
//! Matching is a plain byte-wise suffix test. Hosts are not lowercased and
//! trailing dots are not trimmed, so `Example.com` never matches a candidate
//! of `example.com`. Operators have to configure domains in the exact form
//! their clients send in the `Host` header.

use crate::diagnostics::DiagnosticsSink;

/// Removes a trailing `:port` from `host`.
///
/// Bracketed IPv6 literals (`[::1]:8080`) lose both the port and the
/// brackets. A bare IPv6 address or a host without a port is returned as is.
pub fn strip_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        return match rest.split_once(']') {
            Some((addr, tail)) if tail.starts_with(':') && !tail[1..].contains(':') => addr,
            _ => host,
        };
    }

    match host.split_once(':') {
        Some((name, port)) if !port.contains(':') => name,
        _ => host,
    }
}

/// Returns the first candidate that is a suffix of the effective host.
///
/// `None` means no candidate applies, either because the list is empty or
/// because nothing matched. The cookie is then left without a `Domain`
/// attribute unless the caller applies a fallback, see
/// [`resolve_cookie_domain`].
pub fn get_cookie_domain<'a>(host: &str, candidates: &'a [String]) -> Option<&'a str> {
    let host = strip_port(host);
    candidates
        .iter()
        .map(String::as_str)
        .find(|domain| host.ends_with(domain))
}

/// Picks the cookie domain for `host`, falling back to the last candidate.
///
/// The candidate list is ordered from most to least specific, so the last
/// entry is the broadest domain the operator accepts. Falling back to it is
/// reported through `diagnostics`. An empty list yields an empty domain.
pub fn resolve_cookie_domain(
    host: &str,
    candidates: &[String],
    diagnostics: &dyn DiagnosticsSink,
) -> String {
    if let Some(domain) = get_cookie_domain(host, candidates) {
        tracing::debug!("Cookie domain {domain:?} matches request host {host:?}");
        return domain.to_string();
    }

    let Some(fallback) = candidates.last() else {
        return String::new();
    };

    diagnostics.warn(&format!(
        "Warning: request host {:?} did not match any of the specific cookie domains of {:?}",
        host,
        candidates.join(",")
    ));
    fallback.clone()
}

/// Checks an explicitly configured domain against the request host.
///
/// A mismatch is not an error: the cookie is still issued with `domain`.
/// The emitted warning is also returned so callers can surface it elsewhere.
pub fn validate_cookie_domain(
    host: &str,
    domain: &str,
    diagnostics: &dyn DiagnosticsSink,
) -> Option<String> {
    if domain.is_empty() {
        return None;
    }

    let host = strip_port(host);
    if host.ends_with(domain) {
        return None;
    }

    let message = format!(
        "Warning: request host is {host:?} but using configured cookie domain of {domain:?}"
    );
    diagnostics.warn(&message);
    Some(message)
}
