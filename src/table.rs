use std::collections::HashMap;
use std::sync::Arc;

use chrono::DateTime;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement, Value};
use time::OffsetDateTime;

use crate::error::{Error, Result};
use crate::sql::Statements;

/// Connection plus prepared statement text for one session table.
///
/// Cheap to clone; the cleanup task holds its own copy.
#[derive(Debug, Clone)]
pub(crate) struct Table {
    conn: Arc<DatabaseConnection>,
    sql: Arc<Statements>,
}

impl Table {
    pub(crate) fn new(conn: Arc<DatabaseConnection>, sql: Statements) -> Self {
        Self {
            conn,
            sql: Arc::new(sql),
        }
    }

    fn statement<I>(&self, sql: &str, values: I) -> Statement
    where
        I: IntoIterator<Item = Value>,
    {
        Statement::from_sql_and_values(self.conn.get_database_backend(), sql, values)
    }

    pub(crate) async fn find(&self, token: &str) -> Result<Option<Vec<u8>>> {
        let row = self
            .conn
            .query_one(self.statement(&self.sql.find, [token.into()]))
            .await?;

        match row {
            Some(row) => Ok(Some(row.try_get::<Vec<u8>>("", &self.sql.data_column)?)),
            None => Ok(None),
        }
    }

    pub(crate) async fn commit(
        &self,
        token: &str,
        data: &[u8],
        expiry: OffsetDateTime,
    ) -> Result<()> {
        let expiry = to_db_timestamp(expiry)?;
        self.conn
            .execute(self.statement(
                &self.sql.commit,
                [token.into(), data.to_vec().into(), expiry.into()],
            ))
            .await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, token: &str) -> Result<()> {
        self.conn
            .execute(self.statement(&self.sql.delete, [token.into()]))
            .await?;
        Ok(())
    }

    pub(crate) async fn all(&self) -> Result<HashMap<String, Vec<u8>>> {
        let rows = self
            .conn
            .query_all(Statement::from_string(
                self.conn.get_database_backend(),
                &self.sql.all,
            ))
            .await?;

        let mut sessions = HashMap::with_capacity(rows.len());
        for row in rows {
            let token: String = row.try_get("", &self.sql.token_column)?;
            let data: Vec<u8> = row.try_get("", &self.sql.data_column)?;
            sessions.insert(token, data);
        }
        Ok(sessions)
    }

    pub(crate) async fn delete_expired(&self) -> Result<u64> {
        let result = self
            .conn
            .execute(Statement::from_string(
                self.conn.get_database_backend(),
                &self.sql.delete_expired,
            ))
            .await?;
        Ok(result.rows_affected())
    }
}

/// Converts a `time` timestamp into the chrono type sea-orm binds for `TIMESTAMPTZ`.
pub(crate) fn to_db_timestamp(expiry: OffsetDateTime) -> Result<DateTimeWithTimeZone> {
    DateTime::from_timestamp(expiry.unix_timestamp(), expiry.nanosecond())
        .map(|utc| utc.fixed_offset())
        .ok_or(Error::ExpiryOutOfRange(expiry))
}
