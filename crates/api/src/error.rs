use thiserror::Error;

/// The error taxonomy exposed to the surrounding API layer. Delivery
/// channel failures never surface here, they are handled inside the
/// delivery dispatcher.
#[derive(Error, Debug)]
pub enum NudgeError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("There was a conflict with the request. Error message: `{0}`")]
    Conflict(String),
    #[error("Unauthorized request. Error message: `{0}`")]
    Unauthorized(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
}

impl NudgeError {
    /// The HTTP status code equivalent a transport layer should translate
    /// this error into
    pub fn status_code(&self) -> u16 {
        match *self {
            Self::InternalError => 500,
            Self::BadClientData(_) => 400,
            Self::Conflict(_) => 409,
            Self::Unauthorized(_) => 403,
            Self::NotFound(_) => 404,
        }
    }
}
