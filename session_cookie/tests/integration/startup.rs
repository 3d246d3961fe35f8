use std::env;

use serial_test::serial;

use session_cookie::{CookieError, SameSite, cookie_options, init};

const VARS: [&str; 3] = ["COOKIE_NAME", "COOKIE_DOMAINS", "COOKIE_SAMESITE"];

/// Runs `test` with the given cookie variables set, restoring the previous
/// environment afterwards
fn with_cookie_env<R>(values: &[(&str, &str)], test: impl FnOnce() -> R) -> R {
    let original: Vec<_> = VARS.iter().map(|key| (*key, env::var(key).ok())).collect();

    unsafe {
        for key in VARS {
            env::remove_var(key);
        }
        for (key, value) in values {
            env::set_var(key, value);
        }
    }

    let result = test();

    unsafe {
        for (key, value) in original {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }

    result
}

#[test]
#[serial]
fn test_startup_rejects_invalid_same_site_then_accepts_fixed_config() {
    // A rejected configuration must leave nothing behind
    let result = with_cookie_env(&[("COOKIE_SAMESITE", "sometimes")], init);
    assert_eq!(
        result,
        Err(CookieError::InvalidSameSite("sometimes".to_string()))
    );
    assert_eq!(cookie_options(), Err(CookieError::NotInitialized));

    let result = with_cookie_env(
        &[
            ("COOKIE_NAME", "_gateway"),
            ("COOKIE_DOMAINS", "login.example.com,example.com"),
            ("COOKIE_SAMESITE", "none"),
        ],
        init,
    );
    assert_eq!(result, Ok(()));

    let options = cookie_options().unwrap();
    assert_eq!(options.name, "_gateway");
    assert_eq!(options.domains, vec!["login.example.com", "example.com"]);
    assert_eq!(options.same_site, SameSite::None);

    // Later calls keep the first successful configuration
    assert_eq!(with_cookie_env(&[("COOKIE_NAME", "_other")], init), Ok(()));
    assert_eq!(cookie_options().unwrap().name, "_gateway");
}
