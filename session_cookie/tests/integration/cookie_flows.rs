use chrono::{DateTime, Duration, TimeZone, Utc};
use http::header::{HOST, SET_COOKIE, USER_AGENT};
use http::{HeaderMap, HeaderValue};

use session_cookie::{CookieOptions, RequestContext, SameSite, header_set_cookie};

use crate::common::recording_issuer;
use crate::common::user_agents::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 8, 30, 0).unwrap()
}

fn request_headers(host: &str, forwarded_host: Option<&str>, user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(HOST, HeaderValue::from_str(host).unwrap());
    headers.insert(USER_AGENT, HeaderValue::from_str(user_agent).unwrap());
    if let Some(forwarded) = forwarded_host {
        headers.insert("x-forwarded-host", HeaderValue::from_str(forwarded).unwrap());
    }
    headers
}

fn options(domains: &[&str], same_site: SameSite, reverse_proxy: bool) -> CookieOptions {
    CookieOptions {
        domains: domains.iter().map(|s| s.to_string()).collect(),
        same_site,
        reverse_proxy,
        ..CookieOptions::default()
    }
}

#[test]
fn test_matching_candidate_is_used() {
    let (issuer, recorder) = recording_issuer();
    let options = options(&["example.com", "other.com"], SameSite::Lax, false);
    let request = RequestContext::from_headers(
        &request_headers("login.example.com", None, CHROME_WINDOWS),
        options.reverse_proxy,
    );

    let cookie = issuer.make_session_cookie(&request, "token", &options, now());

    assert_eq!(cookie.domain, "example.com");
    assert_eq!(cookie.same_site, SameSite::Lax);
    assert_eq!(cookie.expires, now() + options.expire);
    assert!(recorder.messages().is_empty());
}

#[test]
fn test_unmatched_host_falls_back_with_warning() {
    let (issuer, recorder) = recording_issuer();
    let options = options(&["nomatch.com"], SameSite::Lax, false);
    let request = RequestContext::new("login.example.com", CHROME_WINDOWS);

    let cookie = issuer.make_session_cookie(&request, "token", &options, now());

    assert_eq!(cookie.domain, "nomatch.com");
    let messages = recorder.messages();
    assert!(!messages.is_empty());
    assert!(
        messages
            .iter()
            .any(|m| m.contains("login.example.com") && m.contains("nomatch.com"))
    );
}

#[test]
fn test_forwarded_host_drives_domain_selection_behind_proxy() {
    let (issuer, recorder) = recording_issuer();
    let options = options(&["example.com", "example.org"], SameSite::Strict, true);
    let headers = request_headers("oauth2-proxy:4180", Some("app.example.org"), CHROME_WINDOWS);
    let request = RequestContext::from_headers(&headers, options.reverse_proxy);

    let cookie = issuer.make_session_cookie(&request, "token", &options, now());

    assert_eq!(request.host, "app.example.org");
    assert_eq!(cookie.domain, "example.org");
    assert!(recorder.messages().is_empty());
}

#[test]
fn test_forwarded_host_ignored_without_reverse_proxy() {
    let (issuer, _) = recording_issuer();
    let options = options(&["example.com", "example.org"], SameSite::Strict, false);
    let headers = request_headers("auth.example.com:4180", Some("app.example.org"), "");
    let request = RequestContext::from_headers(&headers, options.reverse_proxy);

    let cookie = issuer.make_session_cookie(&request, "token", &options, now());

    assert_eq!(cookie.domain, "example.com");
}

#[test]
fn test_same_site_none_per_client() {
    let options = options(&["example.com"], SameSite::None, false);
    let cases = [
        (SAFARI_MACOS_10_12, SameSite::Lax),
        (SAFARI_MACOS_10_14, SameSite::None),
        (SAFARI_IOS_13, SameSite::Lax),
        (SAFARI_IOS_14, SameSite::None),
        (CHROME_WINDOWS, SameSite::None),
        ("unrecognizable garbage UA", SameSite::None),
    ];

    for (user_agent, expected) in cases {
        let (issuer, _) = recording_issuer();
        let request = RequestContext::new("login.example.com", user_agent);
        let cookie = issuer.make_session_cookie(&request, "token", &options, now());
        assert_eq!(cookie.same_site, expected, "{user_agent}");
    }
}

#[test]
fn test_set_cookie_headers_for_login_and_logout() {
    let (issuer, _) = recording_issuer();
    let options = CookieOptions {
        expire: Duration::hours(2),
        ..options(&["example.com"], SameSite::None, false)
    };
    let request = RequestContext::new("login.example.com", SAFARI_IOS_13);

    let login = issuer.make_session_cookie(&request, "token", &options, now());
    let logout = issuer.clear_cookie_from_options(&request, &options, now());

    let mut headers = HeaderMap::new();
    header_set_cookie(&mut headers, &login).unwrap();
    header_set_cookie(&mut headers, &logout).unwrap();

    let values: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();

    assert_eq!(
        values,
        vec![
            "_oauth2_proxy=token; Path=/; Domain=example.com; Expires=Wed, 15 Jan 2025 10:30:00 GMT; HttpOnly; Secure; SameSite=Lax",
            "_oauth2_proxy=; Path=/; Domain=example.com; Expires=Wed, 15 Jan 2025 07:30:00 GMT; HttpOnly; Secure; SameSite=Lax",
        ]
    );
}
