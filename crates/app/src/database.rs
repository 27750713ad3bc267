//! Database connection management

use std::fmt::{Display, Formatter, Result as FmtResult};

use sqlx::PgPool;
use thiserror::Error;

const MAX_IDENTIFIER_LEN: usize = 63;

const RESERVED_WORDS: [&str; 15] = [
    "user", "table", "select", "insert", "update", "delete", "drop", "create", "alter", "index",
    "database", "schema", "role", "grant", "revoke",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidTableName {
    #[error("table name must be 1-63 characters long")]
    Length,

    #[error("table name must start with a letter or underscore")]
    Start,

    #[error("table name can only contain letters, digits and underscores")]
    Characters,

    #[error("table name '{0}' is a reserved word")]
    Reserved(String),
}

/// A table name that is safe to interpolate into SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    /// Validate a table name.
    ///
    /// # Errors
    ///
    /// Returns an error when the name is empty or too long, does not start with
    /// a letter or underscore, contains anything other than ASCII letters,
    /// digits and underscores, or is a reserved word.
    pub fn parse(name: &str) -> Result<Self, InvalidTableName> {
        if name.is_empty() || name.len() > MAX_IDENTIFIER_LEN {
            return Err(InvalidTableName::Length);
        }

        if !name
            .chars()
            .next()
            .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        {
            return Err(InvalidTableName::Start);
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(InvalidTableName::Characters);
        }

        if RESERVED_WORDS
            .iter()
            .any(|word| name.eq_ignore_ascii_case(word))
        {
            return Err(InvalidTableName::Reserved(name.to_string()));
        }

        Ok(Self(name.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}
