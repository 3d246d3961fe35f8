use http::StatusCode;
use session_cookie::CookieError;

/// Helper trait for converting errors to a standard response error format
pub(crate) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

impl<T> IntoResponseError<T> for Result<T, CookieError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match e {
                CookieError::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
                CookieError::Header(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::error!("Cookie error: {e}");
            (status, e.to_string())
        })
    }
}
