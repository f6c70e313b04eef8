use thiserror::Error;

/// Failures talking to the identity provider's admin API.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// The invited email already has an account.
    #[error("A user with this email address has already been registered")]
    AlreadyRegistered,

    /// The identity provider answered with a non-success status.
    #[error("Identity provider returned {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The request could not be sent or the response could not be decoded.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}
