//! PostgreSQL Cart Records Repository

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::TableName,
    domain::carts::{
        models::UserId,
        repositories::{
            CART_PARTITION, CartRecord, CartRecordsRepository, RecordKey, RecordsRepositoryError,
        },
    },
};

const CREATE_TABLE_SQL: &str = include_str!("sql/create_table.sql");
const GET_PAYLOAD_SQL: &str = include_str!("sql/get_payload.sql");
const PUT_PAYLOAD_SQL: &str = include_str!("sql/put_payload.sql");
const LIST_RECORDS_SQL: &str = include_str!("sql/list_records.sql");

const TABLE_PLACEHOLDER: &str = "{table}";

#[derive(Debug)]
struct Statements {
    create_table: String,
    get_payload: String,
    put_payload: String,
    list_records: String,
}

impl Statements {
    fn for_table(table: &TableName) -> Self {
        let render = |sql: &str| sql.replace(TABLE_PLACEHOLDER, table.as_str());

        Self {
            create_table: render(CREATE_TABLE_SQL),
            get_payload: render(GET_PAYLOAD_SQL),
            put_payload: render(PUT_PAYLOAD_SQL),
            list_records: render(LIST_RECORDS_SQL),
        }
    }
}

/// Cart records in a `PostgreSQL` key-value table (`pk`, `sk`, `payload`).
#[derive(Debug, Clone)]
pub(crate) struct PgCartRecordsRepository {
    pool: PgPool,
    statements: Arc<Statements>,
}

impl PgCartRecordsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool, table: &TableName) -> Self {
        Self {
            pool,
            statements: Arc::new(Statements::for_table(table)),
        }
    }

    /// Create the records table when it does not exist yet.
    pub(crate) async fn ensure_table(&self) -> Result<(), sqlx::Error> {
        query(&self.statements.create_table)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl CartRecordsRepository for PgCartRecordsRepository {
    async fn get_payload(&self, user: &UserId) -> Result<Option<String>, RecordsRepositoryError> {
        let key = RecordKey::cart(user);

        let payload = query_scalar::<Postgres, String>(&self.statements.get_payload)
            .bind(key.partition)
            .bind(key.sort)
            .fetch_optional(&self.pool)
            .await?;

        Ok(payload)
    }

    async fn put_payload(
        &self,
        user: &UserId,
        payload: String,
    ) -> Result<(), RecordsRepositoryError> {
        let key = RecordKey::cart(user);

        query(&self.statements.put_payload)
            .bind(key.partition)
            .bind(key.sort)
            .bind(payload)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<CartRecord>, RecordsRepositoryError> {
        let records = query_as::<Postgres, CartRecord>(&self.statements.list_records)
            .bind(CART_PARTITION)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_id: UserId::new(row.try_get::<String, _>("sk")?),
            payload: row.try_get("payload")?,
        })
    }
}
