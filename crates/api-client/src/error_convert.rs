use shared_types::AppError;

/// Convert a reqwest::Error into an AppError.
///
/// Only failures that never produced an HTTP status land here; non-2xx
/// responses are mapped from their body by [`AppError::from_response`].
pub fn reqwest_to_app_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        return AppError::transport("Request timed out");
    }
    if err.is_decode() {
        return AppError::decode(format!("Unexpected response body: {err}"));
    }
    #[cfg(not(target_arch = "wasm32"))]
    if err.is_connect() {
        return AppError::transport("Could not reach the server");
    }
    AppError::transport(err.to_string())
}

/// Convert a serde_json::Error raised while decoding a response body.
pub fn json_to_app_error(err: serde_json::Error) -> AppError {
    AppError::decode(format!("Unexpected response body: {err}"))
}

/// Extension trait providing `.into_app_error()` on reqwest::Error.
pub trait ReqwestErrorExt {
    fn into_app_error(self) -> AppError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_app_error(self) -> AppError {
        reqwest_to_app_error(self)
    }
}

/// Extension trait providing `.into_app_error()` on serde_json::Error.
pub trait JsonErrorExt {
    fn into_app_error(self) -> AppError;
}

impl JsonErrorExt for serde_json::Error {
    fn into_app_error(self) -> AppError {
        json_to_app_error(self)
    }
}
