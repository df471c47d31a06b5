use std::time::Duration;

use crate::error::{Error, Result};

/// Longest identifier Postgres keeps without truncation (`NAMEDATALEN - 1`).
const MAX_IDENTIFIER_LEN: usize = 63;

/// Table layout and cleanup schedule for a [`PostgresStore`](crate::PostgresStore).
///
/// The names are spliced into statement text rather than bound as
/// parameters, so they are checked once when the store is built. The table
/// name may carry a schema prefix (`auth.sessions`).
///
/// ```
/// use std::time::Duration;
/// use seaorm_session_store::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_table_name("auth.user_sessions")
///     .with_cleanup_interval(Duration::from_secs(60));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub(crate) table_name: String,
    pub(crate) token_column: String,
    pub(crate) data_column: String,
    pub(crate) expiry_column: String,
    pub(crate) cleanup_interval: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table_name: "sessions".to_string(),
            token_column: "token".to_string(),
            data_column: "data".to_string(),
            expiry_column: "expiry".to_string(),
            cleanup_interval: Duration::from_secs(5 * 60),
        }
    }
}

impl StoreConfig {
    /// Sets the session table, optionally schema-qualified.
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Sets the primary-key column holding the session token.
    pub fn with_token_column(mut self, column: impl Into<String>) -> Self {
        self.token_column = column.into();
        self
    }

    /// Sets the binary column holding the session payload.
    pub fn with_data_column(mut self, column: impl Into<String>) -> Self {
        self.data_column = column.into();
        self
    }

    /// Sets the timestamp column holding the session expiry.
    pub fn with_expiry_column(mut self, column: impl Into<String>) -> Self {
        self.expiry_column = column.into();
        self
    }

    /// Sets how often expired rows are swept. `Duration::ZERO` disables the
    /// background sweep entirely; expired rows are then still hidden from
    /// reads but stay in the table until [`delete_expired`] is called.
    ///
    /// [`delete_expired`]: crate::PostgresStore::delete_expired
    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn token_column(&self) -> &str {
        &self.token_column
    }

    pub fn data_column(&self) -> &str {
        &self.data_column
    }

    pub fn expiry_column(&self) -> &str {
        &self.expiry_column
    }

    pub fn cleanup_interval(&self) -> Duration {
        self.cleanup_interval
    }

    /// Checks every configured name against plain identifier syntax.
    pub fn validate(&self) -> Result<()> {
        for part in self.table_name.split('.') {
            check_identifier("table", part, &self.table_name)?;
        }
        check_identifier("token column", &self.token_column, &self.token_column)?;
        check_identifier("data column", &self.data_column, &self.data_column)?;
        check_identifier("expiry column", &self.expiry_column, &self.expiry_column)?;
        Ok(())
    }
}

fn check_identifier(kind: &'static str, ident: &str, full: &str) -> Result<()> {
    let mut chars = ident.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                && ident.len() <= MAX_IDENTIFIER_LEN
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier {
            kind,
            name: full.to_string(),
        })
    }
}
