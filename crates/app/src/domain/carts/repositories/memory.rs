//! In-process Cart Records Repository

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::carts::{
    models::UserId,
    repositories::{
        CART_PARTITION, CartRecord, CartRecordsRepository, RecordKey, RecordsRepositoryError,
    },
};

/// Cart records held in process memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub(crate) struct MemoryCartRecordsRepository {
    records: RwLock<BTreeMap<RecordKey, String>>,
}

impl MemoryCartRecordsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRecordsRepository for MemoryCartRecordsRepository {
    async fn get_payload(&self, user: &UserId) -> Result<Option<String>, RecordsRepositoryError> {
        Ok(self.records.read().await.get(&RecordKey::cart(user)).cloned())
    }

    async fn put_payload(
        &self,
        user: &UserId,
        payload: String,
    ) -> Result<(), RecordsRepositoryError> {
        self.records
            .write()
            .await
            .insert(RecordKey::cart(user), payload);

        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<CartRecord>, RecordsRepositoryError> {
        let records = self.records.read().await;

        Ok(records
            .iter()
            .filter(|(key, _)| key.partition == CART_PARTITION)
            .map(|(key, payload)| CartRecord {
                user_id: UserId::new(key.sort.clone()),
                payload: payload.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn missing_record_returns_none() -> TestResult {
        let repository = MemoryCartRecordsRepository::new();

        assert_eq!(repository.get_payload(&UserId::from("nobody")).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn put_overwrites_existing_payload() -> TestResult {
        let repository = MemoryCartRecordsRepository::new();
        let user = UserId::from("alice");

        repository.put_payload(&user, "[1]".to_string()).await?;
        repository.put_payload(&user, "[2]".to_string()).await?;

        assert_eq!(repository.get_payload(&user).await?.as_deref(), Some("[2]"));
        assert_eq!(repository.list_records().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn list_returns_records_ordered_by_user() -> TestResult {
        let repository = MemoryCartRecordsRepository::new();

        repository
            .put_payload(&UserId::from("bob"), "[]".to_string())
            .await?;
        repository
            .put_payload(&UserId::from("alice"), "[]".to_string())
            .await?;

        let users: Vec<String> = repository
            .list_records()
            .await?
            .into_iter()
            .map(|record| record.user_id.into_string())
            .collect();

        assert_eq!(users, vec!["alice".to_string(), "bob".to_string()]);

        Ok(())
    }
}
