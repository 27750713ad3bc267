//! Cart Record Repositories
//!
//! Every backend stores one record per user under the same two-part key: a
//! constant record-type partition ([`CART_PARTITION`]) and the user id as the
//! sort key. Listing all carts is then a single-partition query on every
//! backend.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::domain::carts::models::UserId;

mod dynamodb;
mod memory;
mod pg;

pub(crate) use dynamodb::DynamoCartRecordsRepository;
pub(crate) use memory::MemoryCartRecordsRepository;
pub(crate) use pg::PgCartRecordsRepository;

/// Partition value shared by all cart records.
pub const CART_PARTITION: &str = "CART";

#[derive(Debug, Error)]
pub enum RecordsRepositoryError {
    #[error("{0}")]
    Sql(#[from] sqlx::Error),

    #[error("{0}")]
    DynamoDb(#[from] aws_sdk_dynamodb::Error),
}

/// Address of a single cart record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct RecordKey {
    pub(crate) partition: &'static str,
    pub(crate) sort: String,
}

impl RecordKey {
    pub(crate) fn cart(user: &UserId) -> Self {
        Self {
            partition: CART_PARTITION,
            sort: user.as_str().to_owned(),
        }
    }
}

/// A stored cart record with its payload still encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRecord {
    pub user_id: UserId,
    pub payload: String,
}

/// Raw cart record storage.
///
/// Implementations only move encoded payloads in and out of a backend; all
/// cart semantics live in the manager.
#[automock]
#[async_trait]
pub trait CartRecordsRepository: Send + Sync {
    /// Fetch the payload stored for a user, if any.
    async fn get_payload(&self, user: &UserId) -> Result<Option<String>, RecordsRepositoryError>;

    /// Create or overwrite the payload stored for a user.
    async fn put_payload(&self, user: &UserId, payload: String)
    -> Result<(), RecordsRepositoryError>;

    /// List every record in the cart partition.
    async fn list_records(&self) -> Result<Vec<CartRecord>, RecordsRepositoryError>;
}
