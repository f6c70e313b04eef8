use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse a UUID from a stored string.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to parse UUID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: uuid::Error,
    },

    /// A row vanished between being written and being read back.
    #[error("{entity} {id} missing after write")]
    MissingAfterWrite { entity: &'static str, id: uuid::Uuid },

    /// The rate limiter rejected its own quota settings.
    #[error("Invalid rate limiter configuration")]
    RateLimiterConfig,
}
