//! Statement text for the session table.
//!
//! Identifiers come from a validated [`StoreConfig`]; every value is bound
//! through a `$n` placeholder.

use crate::config::StoreConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Statements {
    pub(crate) token_column: String,
    pub(crate) data_column: String,
    pub(crate) find: String,
    pub(crate) all: String,
    pub(crate) commit: String,
    pub(crate) delete: String,
    pub(crate) delete_expired: String,
}

impl Statements {
    pub(crate) fn new(config: &StoreConfig) -> Self {
        let StoreConfig {
            table_name: table,
            token_column: token,
            data_column: data,
            expiry_column: expiry,
            ..
        } = config;

        Self {
            token_column: token.clone(),
            data_column: data.clone(),
            find: format!(
                "SELECT {data} FROM {table} WHERE {token} = $1 AND current_timestamp < {expiry}"
            ),
            all: format!(
                "SELECT {token}, {data} FROM {table} WHERE current_timestamp < {expiry}"
            ),
            commit: format!(
                "INSERT INTO {table} ({token}, {data}, {expiry}) VALUES ($1, $2, $3) \
                 ON CONFLICT ({token}) DO UPDATE SET {data} = EXCLUDED.{data}, {expiry} = EXCLUDED.{expiry}"
            ),
            delete: format!("DELETE FROM {table} WHERE {token} = $1"),
            delete_expired: format!("DELETE FROM {table} WHERE {expiry} < current_timestamp"),
        }
    }
}
