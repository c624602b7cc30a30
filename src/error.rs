//! Error code surface shared by every fallible layer.

/// Grepable error code and retryable flag for structured error responses.
///
/// `error_code` is the stable machine-readable kind surfaced to callers;
/// `retryable` hints whether a caller should try again shortly (transient
/// upstream trouble) or rephrase the request (model drift).
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
