//! Datastore Config

use std::time::Duration;

use clap::{Args, ValueEnum};

/// Storage engine holding cart records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DatastoreKind {
    /// `PostgreSQL` key-value table.
    Postgres,

    /// Amazon `DynamoDB` table.
    #[value(name = "dynamodb")]
    DynamoDb,

    /// Process memory; contents are lost on restart.
    Memory,
}

/// Datastore settings.
#[derive(Clone, Debug, Args)]
pub struct DatastoreConfig {
    /// Storage engine (postgres, dynamodb, memory)
    #[arg(long, env = "DATASTORE", value_enum, default_value_t = DatastoreKind::Postgres)]
    pub datastore: DatastoreKind,

    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Table holding cart records
    #[arg(long, env = "TABLE", default_value = "carts")]
    pub table: String,

    /// AWS region for `DynamoDB`
    #[arg(long, env = "REGION")]
    pub region: Option<String>,

    /// `DynamoDB` endpoint override, e.g. for `DynamoDB` Local
    #[arg(long, env = "DYNAMO_URL")]
    pub dynamo_url: Option<String>,

    /// Deadline for a single storage round trip, in milliseconds
    #[arg(long, env = "DATASTORE_TIMEOUT_MS", default_value_t = 10_000)]
    pub timeout_ms: u64,
}

impl DatastoreConfig {
    /// Deadline for a single storage round trip.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
