//! Player CRUD operations.

use std::sync::Arc;

use cardbattle_domain::{GameEntity, Player, PlayerId, Validate};

use super::views::{self, CachedView, ViewCache};
use super::ManagementError;
use crate::infrastructure::ports::PlayerRepo;

pub struct PlayerCrud {
    repo: Arc<dyn PlayerRepo>,
    cache: Arc<ViewCache>,
}

impl PlayerCrud {
    pub fn new(repo: Arc<dyn PlayerRepo>, cache: Arc<ViewCache>) -> Self {
        Self { repo, cache }
    }

    pub async fn create(&self, player: Player) -> Result<Player, ManagementError> {
        player.validate()?;
        let player = self.repo.create(player).await?;
        self.invalidate().await;
        tracing::info!(player = %player.basic_info(), "Player created");
        Ok(player)
    }

    pub async fn list(&self) -> Result<Vec<Player>, ManagementError> {
        if let Some(CachedView::Players(players)) = self.cache.get(views::ALL_PLAYERS).await {
            return Ok(players);
        }
        let generation = self.cache.generation().await;
        let players = self.repo.get_all().await?;
        self.cache
            .put_if_generation(
                views::ALL_PLAYERS,
                CachedView::Players(players.clone()),
                generation,
            )
            .await;
        Ok(players)
    }

    pub async fn get(&self, id: PlayerId) -> Result<Player, ManagementError> {
        Ok(self.repo.get_by_id(id).await?)
    }

    pub async fn update(&self, id: PlayerId, player: Player) -> Result<Player, ManagementError> {
        player.validate()?;
        self.repo.update(id, &player).await?;
        self.invalidate().await;
        tracing::info!(player_id = %id, "Player updated");
        Ok(player.with_id(id))
    }

    pub async fn delete(&self, id: PlayerId) -> Result<(), ManagementError> {
        self.repo.delete(id).await?;
        self.invalidate().await;
        tracing::info!(player_id = %id, "Player deleted");
        Ok(())
    }

    /// Add `amount` trophies to the stored player. Negative amounts are
    /// rejected without touching the store.
    pub async fn add_trophies(&self, id: PlayerId, amount: i32) -> Result<Player, ManagementError> {
        if amount < 0 {
            return Err(ManagementError::InvalidInput(
                "Cannot add negative trophies".to_string(),
            ));
        }
        let mut player = self.repo.get_by_id(id).await?;
        player.add_trophies(amount)?;
        self.repo.update(id, &player).await?;
        self.invalidate().await;
        tracing::info!(player_id = %id, amount, trophies = player.trophies(), "Trophies added");
        Ok(player)
    }

    async fn invalidate(&self) {
        self.cache.clear_prefix(views::PLAYERS_NAMESPACE).await;
    }
}
