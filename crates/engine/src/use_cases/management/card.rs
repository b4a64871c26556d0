//! Card CRUD operations.

use std::future::Future;
use std::sync::Arc;

use cardbattle_domain::{Card, CardId, CardType, GameEntity, Rarity, Validate};

use super::views::{self, CachedView, ViewCache};
use super::ManagementError;
use crate::infrastructure::ports::{CardRepo, RepoError};

pub struct CardCrud {
    repo: Arc<dyn CardRepo>,
    cache: Arc<ViewCache>,
}

impl CardCrud {
    pub fn new(repo: Arc<dyn CardRepo>, cache: Arc<ViewCache>) -> Self {
        Self { repo, cache }
    }

    pub async fn create(&self, card: Card) -> Result<Card, ManagementError> {
        card.validate()?;
        let card = self.repo.create(card).await?;
        self.invalidate().await;
        tracing::info!(card = %card.basic_info(), "Card created");
        Ok(card)
    }

    pub async fn list(&self) -> Result<Vec<Card>, ManagementError> {
        self.read_through(views::ALL_CARDS.to_string(), || self.repo.get_all())
            .await
    }

    pub async fn get(&self, id: CardId) -> Result<Card, ManagementError> {
        Ok(self.repo.get_by_id(id).await?)
    }

    /// Replace the card stored under `id`. Returns the card carrying `id`.
    pub async fn update(&self, id: CardId, card: Card) -> Result<Card, ManagementError> {
        card.validate()?;
        self.repo.update(id, &card).await?;
        self.invalidate().await;
        tracing::info!(card_id = %id, "Card updated");
        Ok(card.with_id(id))
    }

    pub async fn delete(&self, id: CardId) -> Result<(), ManagementError> {
        self.repo.delete(id).await?;
        self.invalidate().await;
        tracing::info!(card_id = %id, "Card deleted");
        Ok(())
    }

    /// Raise the stored card's level by one.
    ///
    /// The card is re-read right before the change; a concurrent writer
    /// between that read and the update is overwritten.
    pub async fn upgrade(&self, id: CardId) -> Result<Card, ManagementError> {
        let mut card = self.repo.get_by_id(id).await?;
        if let Err(e) = card.upgrade() {
            tracing::warn!(card_id = %id, level = card.level(), "Upgrade rejected at max level");
            return Err(e.into());
        }
        card.validate()?;
        self.repo.update(id, &card).await?;
        self.invalidate().await;
        tracing::info!(card_id = %id, level = card.level(), "Card upgraded");
        Ok(card)
    }

    /// Cards of one type. Unknown type names are rejected before the store is
    /// consulted.
    pub async fn list_by_type(&self, card_type: &str) -> Result<Vec<Card>, ManagementError> {
        let card_type: CardType = card_type.parse()?;
        self.read_through(views::cards_by_type(card_type), || {
            self.repo.get_by_type(card_type)
        })
        .await
    }

    pub async fn list_by_rarity(&self, rarity: &str) -> Result<Vec<Card>, ManagementError> {
        let rarity: Rarity = rarity.parse()?;
        self.read_through(views::cards_by_rarity(rarity), || {
            self.repo.get_by_rarity(rarity)
        })
        .await
    }

    pub async fn count(&self) -> Result<u64, ManagementError> {
        if let Some(CachedView::Count(count)) = self.cache.get(views::CARD_COUNT).await {
            return Ok(count);
        }
        let generation = self.cache.generation().await;
        let count = self.repo.count().await?;
        self.cache
            .put_if_generation(views::CARD_COUNT, CachedView::Count(count), generation)
            .await;
        Ok(count)
    }

    async fn read_through<F, Fut>(&self, key: String, load: F) -> Result<Vec<Card>, ManagementError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Card>, RepoError>>,
    {
        if let Some(CachedView::Cards(cards)) = self.cache.get(&key).await {
            return Ok(cards);
        }
        let generation = self.cache.generation().await;
        let cards = load().await?;
        self.cache
            .put_if_generation(key, CachedView::Cards(cards.clone()), generation)
            .await;
        Ok(cards)
    }

    async fn invalidate(&self) {
        self.cache.clear_prefix(views::CARDS_NAMESPACE).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockCardRepo;
    use cardbattle_domain::{CardKind, MAX_CARD_LEVEL};
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Notify;

    fn knight() -> Card {
        Card::warrior("Knight", "COMMON", 3, 1, 600, 75)
    }

    fn crud(repo: MockCardRepo) -> (CardCrud, Arc<ViewCache>) {
        let cache = Arc::new(ViewCache::new());
        (CardCrud::new(Arc::new(repo), cache.clone()), cache)
    }

    #[tokio::test]
    async fn invalid_card_never_reaches_store() {
        let mut repo = MockCardRepo::new();
        repo.expect_create().times(0);
        let (crud, cache) = crud(repo);
        cache.put(views::ALL_CARDS, CachedView::Cards(vec![])).await;

        for card in [
            Card::warrior("Knight", "COMMON", 0, 1, 600, 75),
            Card::warrior("Knight", "COMMON", 3, 17, 600, 75),
            Card::warrior("", "COMMON", 3, 1, 600, 75),
        ] {
            let err = crud.create(card).await.expect_err("invalid");
            assert!(matches!(err, ManagementError::InvalidInput(_)));
        }
        assert!(cache.contains(views::ALL_CARDS).await);
    }

    #[tokio::test]
    async fn create_invalidates_card_views() {
        let mut repo = MockCardRepo::new();
        repo.expect_create()
            .times(1)
            .returning(|card| Ok(card.with_id(CardId::new(1))));
        let (crud, cache) = crud(repo);
        cache.put(views::ALL_CARDS, CachedView::Cards(vec![])).await;
        cache.put(views::CARD_COUNT, CachedView::Count(0)).await;
        cache.put(views::ALL_PLAYERS, CachedView::Players(vec![])).await;

        let card = crud.create(knight()).await.expect("create");

        assert_eq!(card.id(), Some(CardId::new(1)));
        assert!(!cache.contains(views::ALL_CARDS).await);
        assert!(!cache.contains(views::CARD_COUNT).await);
        assert!(cache.contains(views::ALL_PLAYERS).await);
    }

    #[tokio::test]
    async fn failed_store_write_keeps_cache() {
        let mut repo = MockCardRepo::new();
        repo.expect_update()
            .returning(|id, _| Err(RepoError::not_found("Card", id)));
        repo.expect_delete()
            .returning(|_| Err(RepoError::database("card_delete", "locked")));
        let (crud, cache) = crud(repo);
        cache.put(views::ALL_CARDS, CachedView::Cards(vec![])).await;

        let err = crud
            .update(CardId::new(5), knight())
            .await
            .expect_err("missing");
        assert!(matches!(err, ManagementError::NotFound { .. }));

        let err = crud.delete(CardId::new(5)).await.expect_err("storage");
        assert!(matches!(err, ManagementError::Storage(_)));

        assert!(cache.contains(views::ALL_CARDS).await);
    }

    #[tokio::test]
    async fn list_hits_store_once_then_cache() {
        let mut repo = MockCardRepo::new();
        repo.expect_get_all()
            .times(1)
            .returning(|| Ok(vec![knight().with_id(CardId::new(1))]));
        let (crud, cache) = crud(repo);

        let first = crud.list().await.expect("miss");
        let second = crud.list().await.expect("hit");

        assert_eq!(first, second);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[tokio::test]
    async fn list_after_delete_goes_back_to_store() {
        let mut repo = MockCardRepo::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_get_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![knight().with_id(CardId::new(1))]));
        repo.expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        repo.expect_get_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![]));
        let (crud, _cache) = crud(repo);

        assert_eq!(crud.list().await.expect("list").len(), 1);
        crud.delete(CardId::new(1)).await.expect("delete");
        assert!(crud.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn upgrade_persists_next_level() {
        let mut repo = MockCardRepo::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(knight().with_id(id)));
        repo.expect_update()
            .withf(|id, card| *id == CardId::new(1) && card.level() == 2)
            .times(1)
            .returning(|_, _| Ok(()));
        let (crud, _cache) = crud(repo);

        let card = crud.upgrade(CardId::new(1)).await.expect("upgrade");
        assert_eq!(card.level(), 2);
    }

    #[tokio::test]
    async fn upgrade_revalidates_before_writing() {
        let mut repo = MockCardRepo::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Card::warrior("Knight", "COMMON", 42, 3, 600, 75).with_id(id)));
        repo.expect_update().times(0);
        let (crud, cache) = crud(repo);
        cache.put(views::ALL_CARDS, CachedView::Cards(vec![])).await;

        let err = crud.upgrade(CardId::new(1)).await.expect_err("bad stored row");
        assert!(matches!(err, ManagementError::InvalidInput(msg) if msg.contains("Elixir cost")));
        assert!(cache.contains(views::ALL_CARDS).await);
    }

    /// Store whose first `get_all` parks after taking its snapshot until
    /// released, so a write can commit in between.
    struct ParkingCardRepo {
        cards: std::sync::Mutex<Vec<Card>>,
        park_next_list: AtomicBool,
        snapshot_taken: Notify,
        release: Notify,
    }

    impl ParkingCardRepo {
        fn new() -> Self {
            Self {
                cards: std::sync::Mutex::new(Vec::new()),
                park_next_list: AtomicBool::new(true),
                snapshot_taken: Notify::new(),
                release: Notify::new(),
            }
        }
    }

    #[async_trait::async_trait]
    impl CardRepo for ParkingCardRepo {
        async fn create(&self, card: Card) -> Result<Card, RepoError> {
            let mut cards = self.cards.lock().expect("lock");
            let card = card.with_id(CardId::new(cards.len() as i64 + 1));
            cards.push(card.clone());
            Ok(card)
        }

        async fn get_all(&self) -> Result<Vec<Card>, RepoError> {
            let snapshot = self.cards.lock().expect("lock").clone();
            if self.park_next_list.swap(false, Ordering::SeqCst) {
                self.snapshot_taken.notify_one();
                self.release.notified().await;
            }
            Ok(snapshot)
        }

        async fn get_by_id(&self, id: CardId) -> Result<Card, RepoError> {
            Err(RepoError::not_found("Card", id))
        }

        async fn update(&self, id: CardId, _card: &Card) -> Result<(), RepoError> {
            Err(RepoError::not_found("Card", id))
        }

        async fn delete(&self, id: CardId) -> Result<(), RepoError> {
            Err(RepoError::not_found("Card", id))
        }

        async fn get_by_type(&self, _card_type: CardType) -> Result<Vec<Card>, RepoError> {
            Ok(Vec::new())
        }

        async fn get_by_rarity(&self, _rarity: Rarity) -> Result<Vec<Card>, RepoError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn list_racing_a_create_does_not_cache_the_old_snapshot() {
        let repo = Arc::new(ParkingCardRepo::new());
        let crud = CardCrud::new(repo.clone(), Arc::new(ViewCache::new()));

        let writer = async {
            repo.snapshot_taken.notified().await;
            crud.create(knight()).await.expect("create");
            repo.release.notify_one();
        };
        let (listed, ()) = tokio::join!(crud.list(), writer);

        // the in-flight read may still return what it saw
        assert!(listed.expect("list").is_empty());
        assert_eq!(crud.list().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn upgrade_at_max_level_is_invalid_input() {
        let mut repo = MockCardRepo::new();
        repo.expect_get_by_id().returning(|id| {
            Ok(Card::warrior("Knight", "COMMON", 3, MAX_CARD_LEVEL, 600, 75).with_id(id))
        });
        repo.expect_update().times(0);
        let (crud, _cache) = crud(repo);

        let err = crud.upgrade(CardId::new(1)).await.expect_err("at ceiling");
        assert!(matches!(err, ManagementError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn unknown_filter_values_skip_the_store() {
        let mut repo = MockCardRepo::new();
        repo.expect_get_by_type().times(0);
        repo.expect_get_by_rarity().times(0);
        let (crud, _cache) = crud(repo);

        assert!(matches!(
            crud.list_by_type("DRAGON").await,
            Err(ManagementError::InvalidInput(_))
        ));
        assert!(matches!(
            crud.list_by_rarity("MYTHIC").await,
            Err(ManagementError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn filters_are_cached_per_value() {
        let mut repo = MockCardRepo::new();
        repo.expect_get_by_type()
            .withf(|t| *t == CardType::Warrior)
            .times(1)
            .returning(|_| Ok(vec![knight()]));
        let (crud, cache) = crud(repo);

        crud.list_by_type("warrior").await.expect("miss");
        crud.list_by_type("WARRIOR").await.expect("hit");
        assert!(cache.contains("cards:type:WARRIOR").await);
    }

    #[tokio::test]
    async fn count_is_cached_until_mutation() {
        let mut repo = MockCardRepo::new();
        repo.expect_count().times(2).returning(|| Ok(3));
        repo.expect_create()
            .returning(|card| Ok(card.with_id(CardId::new(4))));
        let (crud, _cache) = crud(repo);

        assert_eq!(crud.count().await.expect("count"), 3);
        assert_eq!(crud.count().await.expect("cached"), 3);
        crud.create(knight()).await.expect("create");
        assert_eq!(crud.count().await.expect("reloaded"), 3);
    }

    #[tokio::test]
    async fn knight_scenario() {
        let stored = Arc::new(std::sync::Mutex::new(None::<Card>));
        let mut repo = MockCardRepo::new();

        let s = stored.clone();
        repo.expect_create().returning(move |card| {
            let card = card.with_id(CardId::new(1));
            *s.lock().expect("lock") = Some(card.clone());
            Ok(card)
        });
        let s = stored.clone();
        repo.expect_get_by_id().returning(move |id| {
            s.lock()
                .expect("lock")
                .clone()
                .ok_or_else(|| RepoError::not_found("Card", id))
        });
        let s = stored.clone();
        repo.expect_update().returning(move |id, card| {
            *s.lock().expect("lock") = Some(card.clone().with_id(id));
            Ok(())
        });
        let s = stored.clone();
        repo.expect_get_by_type().returning(move |t| {
            Ok(s.lock()
                .expect("lock")
                .iter()
                .filter(|c| c.card_type() == t)
                .cloned()
                .collect())
        });
        let (crud, _cache) = crud(repo);

        // warm the filter cache so the upgrade has something to invalidate
        assert!(crud.list_by_type("WARRIOR").await.expect("empty").is_empty());

        let created = crud.create(knight()).await.expect("create");
        assert_eq!(created.id(), Some(CardId::new(1)));

        let loaded = crud.get(CardId::new(1)).await.expect("get");
        assert_eq!(loaded.kind(), &CardKind::Warrior { hp: 600, damage: 75 });

        let upgraded = crud.upgrade(CardId::new(1)).await.expect("upgrade");
        assert_eq!(upgraded.level(), 2);

        let warriors = crud.list_by_type("WARRIOR").await.expect("list");
        assert_eq!(warriors.len(), 1);
        assert_eq!(warriors[0].id(), Some(CardId::new(1)));
        assert_eq!(warriors[0].level(), 2);
    }
}
