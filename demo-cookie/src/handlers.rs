use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Html,
};
use chrono::Utc;
use serde::Deserialize;

use session_cookie::{Cookie, CookieIssuer, CookieOptions, RequestContext, header_set_cookie};

use crate::error::IntoResponseError;

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    pub(crate) issuer: CookieIssuer,
    pub(crate) options: Arc<CookieOptions>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginParams {
    value: Option<String>,
}

pub(crate) async fn index() -> Html<&'static str> {
    Html(
        r#"<h1>Session cookie demo</h1>
<ul>
  <li><a href="/login">/login</a> issues the session cookie</li>
  <li><a href="/logout">/logout</a> clears it</li>
</ul>"#,
    )
}

pub(crate) async fn login(
    State(state): State<AppState>,
    Query(params): Query<LoginParams>,
    headers: HeaderMap,
) -> Result<(HeaderMap, Json<Cookie>), (StatusCode, String)> {
    let request = RequestContext::from_headers(&headers, state.options.reverse_proxy);
    let now = Utc::now();
    let value = params
        .value
        .unwrap_or_else(|| format!("demo-{}", now.timestamp()));

    let cookie = state
        .issuer
        .make_session_cookie(&request, &value, &state.options, now);

    let mut response_headers = HeaderMap::new();
    header_set_cookie(&mut response_headers, &cookie).into_response_error()?;
    Ok((response_headers, Json(cookie)))
}

pub(crate) async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(HeaderMap, Json<Cookie>), (StatusCode, String)> {
    let request = RequestContext::from_headers(&headers, state.options.reverse_proxy);

    let cookie = state
        .issuer
        .clear_cookie_from_options(&request, &state.options, Utc::now());

    let mut response_headers = HeaderMap::new();
    header_set_cookie(&mut response_headers, &cookie).into_response_error()?;
    Ok((response_headers, Json(cookie)))
}
