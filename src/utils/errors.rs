use thiserror::Error;

/// Errors surfaced by the API gateway.
///
/// Each variant maps to exactly one user-visible notification class; the
/// gateway reports the notification and re-raises the error unchanged.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Your request took too long. Please try again later.")]
    RequestTimeout,

    #[error("Unable to connect to the server. Please check your internet connection and try again.")]
    NetworkUnreachable,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation failed: {0:?}")]
    ValidationFailure(Vec<String>),

    #[error("Something went wrong with the server. Please try again later.")]
    ServerFailure,

    #[error("Horse not found, redirecting to Horses list...")]
    NotFound,
}
