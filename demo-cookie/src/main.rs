use std::sync::Arc;

use axum::{Router, routing::get};

use session_cookie::{CookieIssuer, cookie_options};

mod error;
mod handlers;
mod server;

use crate::{
    handlers::{AppState, index, login, logout},
    server::{init_tracing, spawn_http_server},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing(env!("CARGO_CRATE_NAME"));

    // Refuse to start with an invalid cookie configuration
    session_cookie::init()?;

    let state = AppState {
        issuer: CookieIssuer::default(),
        options: Arc::new(cookie_options()?.clone()),
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/login", get(login))
        .route("/logout", get(logout))
        .with_state(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3001);

    spawn_http_server(port, app).await??;
    Ok(())
}
