use sea_orm::DbErr;
use time::OffsetDateTime;
use tokio::runtime::TryCurrentError;
use tower_sessions::session_store;

/// Errors returned by [`PostgresStore`](crate::PostgresStore).
///
/// A missing or expired session is never an error: lookups report it as
/// `None`, and deleting an unknown token succeeds.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The database driver rejected or failed a statement. The underlying
    /// error is passed through untouched; nothing is retried.
    #[error("session query failed: {0}")]
    Database(#[from] DbErr),
    /// A configured table or column name is not a plain SQL identifier.
    #[error("invalid {kind} name `{name}`")]
    InvalidIdentifier { kind: &'static str, name: String },
    /// The expiry cannot be represented as a database timestamp.
    #[error("session expiry {0} is out of range")]
    ExpiryOutOfRange(OffsetDateTime),
    /// Background cleanup was requested outside of a Tokio runtime.
    #[error("background cleanup requires a Tokio runtime")]
    NoRuntime(#[from] TryCurrentError),
}

/// Result alias for store operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for session_store::Error {
    fn from(err: Error) -> Self {
        session_store::Error::Backend(err.to_string())
    }
}
