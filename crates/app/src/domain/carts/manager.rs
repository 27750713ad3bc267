//! Carts manager.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    future::Future,
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::carts::{
    codec::CLEARED_PAYLOAD,
    errors::CartsManagerError,
    models::{Cart, Carts, Item, Items, UserId},
    repositories::{CartRecordsRepository, RecordsRepositoryError},
};

/// Carts backed by a key-value record store, one record per user.
///
/// Every storage round trip is bounded by `timeout`.
pub struct KvCartsManager {
    records: Arc<dyn CartRecordsRepository>,
    timeout: Duration,
}

impl Debug for KvCartsManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("KvCartsManager")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl KvCartsManager {
    #[must_use]
    pub(crate) fn new(records: Arc<dyn CartRecordsRepository>, timeout: Duration) -> Self {
        Self { records, timeout }
    }

    async fn within_deadline<T>(
        &self,
        operation: impl Future<Output = Result<T, RecordsRepositoryError>> + Send,
    ) -> Result<T, CartsManagerError> {
        timeout(self.timeout, operation)
            .await
            .map_err(|_elapsed| CartsManagerError::Timeout(self.timeout))?
            .map_err(CartsManagerError::from)
    }

    async fn load(&self, user: &UserId) -> Result<Items, CartsManagerError> {
        let Some(payload) = self.within_deadline(self.records.get_payload(user)).await? else {
            return Ok(Items::new());
        };

        Ok(Items::from_payload(&payload)?)
    }

    async fn persist(&self, user: &UserId, items: &Items) -> Result<(), CartsManagerError> {
        let payload = items.to_payload().map_err(CartsManagerError::Encode)?;

        self.within_deadline(self.records.put_payload(user, payload))
            .await
    }
}

#[async_trait]
impl CartsManager for KvCartsManager {
    async fn get_items(&self, user: UserId) -> Result<Items, CartsManagerError> {
        self.load(&user).await
    }

    async fn add_item(&self, user: UserId, item: Item) -> Result<(), CartsManagerError> {
        let mut items = self.load(&user).await?;

        items.push(item);

        self.persist(&user, &items).await
    }

    async fn store_items(&self, user: UserId, items: Items) -> Result<(), CartsManagerError> {
        self.persist(&user, &items).await
    }

    async fn clear_cart(&self, user: UserId) -> Result<(), CartsManagerError> {
        self.within_deadline(self.records.put_payload(&user, CLEARED_PAYLOAD.to_string()))
            .await
    }

    async fn items_in_cart(&self, user: UserId) -> Result<u64, CartsManagerError> {
        Ok(self.load(&user).await?.total_quantity())
    }

    async fn value_in_cart(&self, user: UserId) -> Result<Decimal, CartsManagerError> {
        Ok(self.load(&user).await?.total_value())
    }

    async fn all_carts(&self) -> Result<Carts, CartsManagerError> {
        let records = self.within_deadline(self.records.list_records()).await?;

        if records.is_empty() {
            return Err(CartsManagerError::NotFound);
        }

        let carts: Carts = records
            .into_iter()
            .filter_map(|record| match Items::from_payload(&record.payload) {
                Ok(items) => Some(Cart {
                    user_id: record.user_id,
                    items,
                }),
                Err(error) => {
                    warn!(user_id = %record.user_id, %error, "skipping undecodable cart record");

                    None
                }
            })
            .collect();

        debug!(count = carts.len(), "listed carts");

        Ok(carts)
    }
}

/// Replace every item in the user's cart whose id matches `item`, then store
/// the cart.
///
/// Returns the number of items replaced. When nothing matches, the cart is
/// stored unchanged and `item` is discarded.
///
/// # Errors
///
/// Returns an error when loading or storing the cart fails.
pub async fn modify_item(
    manager: &dyn CartsManager,
    user: UserId,
    item: Item,
) -> Result<usize, CartsManagerError> {
    let mut items = manager.get_items(user.clone()).await?;

    let replaced = items.replace_matching(&item);

    if replaced == 0 {
        debug!(%user, item_id = %item.id, "no cart item matched replacement");
    }

    manager.store_items(user, items).await?;

    Ok(replaced)
}

#[automock]
#[async_trait]
pub trait CartsManager: Send + Sync {
    /// Items in the user's cart, or an empty list when no cart is stored.
    async fn get_items(&self, user: UserId) -> Result<Items, CartsManagerError>;

    /// Append an item to the user's cart. Items with duplicate ids are kept.
    async fn add_item(&self, user: UserId, item: Item) -> Result<(), CartsManagerError>;

    /// Overwrite the user's cart.
    async fn store_items(&self, user: UserId, items: Items) -> Result<(), CartsManagerError>;

    /// Empty the user's cart, keeping its record.
    async fn clear_cart(&self, user: UserId) -> Result<(), CartsManagerError>;

    /// Sum of item quantities in the user's cart.
    async fn items_in_cart(&self, user: UserId) -> Result<u64, CartsManagerError>;

    /// Sum of `quantity * price` over the user's cart.
    async fn value_in_cart(&self, user: UserId) -> Result<Decimal, CartsManagerError>;

    /// Every stored cart. Records that fail to decode are skipped.
    async fn all_carts(&self) -> Result<Carts, CartsManagerError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::carts::repositories::{
        CartRecord, MemoryCartRecordsRepository, MockCartRecordsRepository,
    };

    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);

    fn memory_manager() -> (Arc<MemoryCartRecordsRepository>, KvCartsManager) {
        let records = Arc::new(MemoryCartRecordsRepository::new());
        let manager = KvCartsManager::new(records.clone(), TIMEOUT);

        (records, manager)
    }

    fn price(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    fn item(id: &str, unit_price: Decimal, quantity: u64) -> Item {
        Item {
            id: id.to_string(),
            name: format!("{id} name"),
            description: String::new(),
            unit_price,
            quantity,
        }
    }

    #[tokio::test]
    async fn get_items_for_unknown_user_is_empty() -> TestResult {
        let (_, manager) = memory_manager();

        let items = manager.get_items(UserId::from("nobody")).await?;

        assert!(items.is_empty());
        assert_eq!(manager.items_in_cart(UserId::from("nobody")).await?, 0);
        assert_eq!(
            manager.value_in_cart(UserId::from("nobody")).await?,
            Decimal::ZERO
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_then_totals() -> TestResult {
        let (_, manager) = memory_manager();
        let alice = UserId::from("alice");
        let shoe = item("sku1", price(999), 2);

        manager.add_item(alice.clone(), shoe.clone()).await?;

        assert_eq!(
            manager.get_items(alice.clone()).await?,
            Items::from(vec![shoe])
        );
        assert_eq!(manager.items_in_cart(alice.clone()).await?, 2);
        assert_eq!(manager.value_in_cart(alice).await?, price(1998));

        Ok(())
    }

    #[tokio::test]
    async fn add_item_appends_duplicates() -> TestResult {
        let (_, manager) = memory_manager();
        let bob = UserId::from("bob");
        let first = item("sku1", price(150), 1);
        let second = item("sku1", price(200), 3);

        manager.add_item(bob.clone(), first.clone()).await?;
        manager.add_item(bob.clone(), second.clone()).await?;

        assert_eq!(
            manager.get_items(bob.clone()).await?,
            Items::from(vec![first, second])
        );
        assert_eq!(manager.items_in_cart(bob.clone()).await?, 4);
        assert_eq!(manager.value_in_cart(bob).await?, price(750));

        Ok(())
    }

    #[tokio::test]
    async fn store_items_overwrites_in_order() -> TestResult {
        let (_, manager) = memory_manager();
        let carol = UserId::from("carol");

        manager
            .add_item(carol.clone(), item("old", price(100), 1))
            .await?;

        let replacement = Items::from(vec![item("b", price(200), 1), item("a", price(300), 2)]);

        manager
            .store_items(carol.clone(), replacement.clone())
            .await?;

        assert_eq!(manager.get_items(carol).await?, replacement);

        Ok(())
    }

    #[tokio::test]
    async fn clear_cart_empties_but_keeps_record() -> TestResult {
        let (records, manager) = memory_manager();
        let dave = UserId::from("dave");

        manager.add_item(dave.clone(), item("x", price(500), 3)).await?;
        manager.clear_cart(dave.clone()).await?;

        assert!(manager.get_items(dave.clone()).await?.is_empty());
        assert_eq!(manager.items_in_cart(dave.clone()).await?, 0);
        assert_eq!(
            records.get_payload(&dave).await?.as_deref(),
            Some(CLEARED_PAYLOAD)
        );

        Ok(())
    }

    #[tokio::test]
    async fn legacy_cleared_payload_reads_as_empty() -> TestResult {
        for payload in ["", "{}", "null"] {
            let (records, manager) = memory_manager();
            let erin = UserId::from("erin");

            records.put_payload(&erin, payload.to_string()).await?;

            assert!(
                manager.get_items(erin.clone()).await?.is_empty(),
                "expected {payload:?} to read as an empty cart"
            );
            assert_eq!(manager.items_in_cart(erin.clone()).await?, 0);

            manager
                .add_item(erin.clone(), item("sku1", price(100), 1))
                .await?;

            assert_eq!(manager.items_in_cart(erin).await?, 1);
        }

        Ok(())
    }

    #[tokio::test]
    async fn corrupt_payload_is_a_decode_error() -> TestResult {
        let (records, manager) = memory_manager();
        let frank = UserId::from("frank");

        records.put_payload(&frank, "not json".to_string()).await?;

        let result = manager.get_items(frank).await;

        assert!(
            matches!(result, Err(CartsManagerError::Decode(_))),
            "expected decode error, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn all_carts_skips_undecodable_records() -> TestResult {
        let (records, manager) = memory_manager();

        manager
            .add_item(UserId::from("alice"), item("sku1", price(999), 2))
            .await?;
        records
            .put_payload(&UserId::from("bob"), "{broken".to_string())
            .await?;
        manager.clear_cart(UserId::from("carol")).await?;

        let carts = manager.all_carts().await?;

        let users: Vec<&str> = carts.iter().map(|cart| cart.user_id.as_str()).collect();

        assert_eq!(users, vec!["alice", "carol"]);

        Ok(())
    }

    #[tokio::test]
    async fn all_carts_without_records_is_not_found() {
        let (_, manager) = memory_manager();

        let result = manager.all_carts().await;

        assert!(
            matches!(result, Err(CartsManagerError::NotFound)),
            "expected not found, got {result:?}"
        );
    }

    #[tokio::test]
    async fn modify_item_replaces_every_match() -> TestResult {
        let (_, manager) = memory_manager();
        let gina = UserId::from("gina");

        manager
            .store_items(
                gina.clone(),
                Items::from(vec![
                    item("a", price(100), 1),
                    item("b", price(100), 1),
                    item("a", price(100), 1),
                ]),
            )
            .await?;

        let replacement = item("a", price(400), 5);

        let replaced = modify_item(&manager, gina.clone(), replacement.clone()).await?;

        assert_eq!(replaced, 2);
        assert_eq!(
            manager.get_items(gina).await?,
            Items::from(vec![
                replacement.clone(),
                item("b", price(100), 1),
                replacement,
            ])
        );

        Ok(())
    }

    #[tokio::test]
    async fn modify_item_without_match_leaves_cart_unchanged() -> TestResult {
        let (_, manager) = memory_manager();
        let hank = UserId::from("hank");
        let existing = Items::from(vec![item("a", price(100), 1)]);

        manager.store_items(hank.clone(), existing.clone()).await?;

        let replaced = modify_item(&manager, hank.clone(), item("zzz", price(900), 9)).await?;

        assert_eq!(replaced, 0);
        assert_eq!(manager.get_items(hank).await?, existing);

        Ok(())
    }

    #[tokio::test]
    async fn storage_failures_surface_as_storage_errors() {
        let mut records = MockCartRecordsRepository::new();

        records
            .expect_get_payload()
            .times(1)
            .return_once(|_| Err(RecordsRepositoryError::Sql(sqlx::Error::PoolTimedOut)));

        let manager = KvCartsManager::new(Arc::new(records), TIMEOUT);

        let result = manager.items_in_cart(UserId::from("ivy")).await;

        assert!(
            matches!(result, Err(CartsManagerError::Storage(_))),
            "expected storage error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn failed_load_does_not_write() {
        let mut records = MockCartRecordsRepository::new();

        records
            .expect_get_payload()
            .times(1)
            .return_once(|_| Err(RecordsRepositoryError::Sql(sqlx::Error::PoolClosed)));
        records.expect_put_payload().never();

        let manager = KvCartsManager::new(Arc::new(records), TIMEOUT);

        let result = manager
            .add_item(UserId::from("jo"), item("a", price(100), 1))
            .await;

        assert!(result.is_err(), "add_item should fail when load fails");
    }

    struct SlowRecords;

    #[async_trait]
    impl CartRecordsRepository for SlowRecords {
        async fn get_payload(
            &self,
            _user: &UserId,
        ) -> Result<Option<String>, RecordsRepositoryError> {
            tokio::time::sleep(Duration::from_secs(60)).await;

            Ok(None)
        }

        async fn put_payload(
            &self,
            _user: &UserId,
            _payload: String,
        ) -> Result<(), RecordsRepositoryError> {
            Ok(())
        }

        async fn list_records(&self) -> Result<Vec<CartRecord>, RecordsRepositoryError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_storage_times_out() {
        let manager = KvCartsManager::new(Arc::new(SlowRecords), Duration::from_millis(250));

        let result = manager.get_items(UserId::from("kim")).await;

        assert!(
            matches!(result, Err(CartsManagerError::Timeout(limit)) if limit.as_millis() == 250),
            "expected timeout, got {result:?}"
        );
    }

    mod postgres {
        use testresult::TestResult;

        use crate::test::TestContext;

        use super::*;

        #[tokio::test]
        async fn alice_scenario_against_postgres() -> TestResult {
            let ctx = TestContext::new().await;
            let alice = UserId::from("alice");
            let shoe = item("sku1", price(999), 2);

            ctx.carts.add_item(alice.clone(), shoe.clone()).await?;

            assert_eq!(
                ctx.carts.get_items(alice.clone()).await?,
                Items::from(vec![shoe])
            );
            assert_eq!(ctx.carts.items_in_cart(alice.clone()).await?, 2);
            assert_eq!(ctx.carts.value_in_cart(alice).await?, price(1998));

            Ok(())
        }

        #[tokio::test]
        async fn all_carts_against_postgres() -> TestResult {
            let ctx = TestContext::new().await;

            let result = ctx.carts.all_carts().await;

            assert!(
                matches!(result, Err(CartsManagerError::NotFound)),
                "empty table should be not found, got {result:?}"
            );

            ctx.carts
                .add_item(UserId::from("bob"), item("sku2", price(250), 1))
                .await?;
            ctx.carts
                .add_item(UserId::from("alice"), item("sku1", price(999), 2))
                .await?;
            ctx.carts.clear_cart(UserId::from("bob")).await?;

            let stored: String = sqlx::query_scalar(&format!(
                "SELECT payload FROM {} WHERE pk = 'CART' AND sk = 'bob'",
                ctx.db.table()
            ))
            .fetch_one(ctx.db.pool())
            .await?;

            assert_eq!(stored, CLEARED_PAYLOAD);

            let carts = ctx.carts.all_carts().await?;

            assert_eq!(
                carts,
                vec![
                    Cart {
                        user_id: UserId::from("alice"),
                        items: Items::from(vec![item("sku1", price(999), 2)]),
                    },
                    Cart {
                        user_id: UserId::from("bob"),
                        items: Items::new(),
                    },
                ]
            );

            Ok(())
        }
    }
}
