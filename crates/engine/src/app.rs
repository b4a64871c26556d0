//! Application state and composition.

use std::sync::Arc;

use cardbattle_domain::CardFactory;

use crate::infrastructure::{
    ports::{CardRepo, PlayerRepo},
    sqlite::SqliteRepositories,
};
use crate::use_cases::management::{CardCrud, PlayerCrud, ViewCache};
use crate::use_cases::ManagementUseCases;

/// Main application state.
///
/// Holds the use cases, the query cache they share and the card factory.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    pub cache: Arc<ViewCache>,
    pub card_factory: CardFactory,
}

/// Container for all use cases.
pub struct UseCases {
    pub management: ManagementUseCases,
}

impl App {
    /// Create a new App wired to the SQLite stores.
    pub fn new(repos: SqliteRepositories) -> Self {
        Self::from_ports(repos.card, repos.player)
    }

    /// Create an App over arbitrary port implementations.
    pub fn from_ports(card: Arc<dyn CardRepo>, player: Arc<dyn PlayerRepo>) -> Self {
        let cache = Arc::new(ViewCache::new());

        let management = ManagementUseCases::new(
            CardCrud::new(card, cache.clone()),
            PlayerCrud::new(player, cache.clone()),
        );

        Self {
            use_cases: UseCases { management },
            cache,
            card_factory: CardFactory::new(),
        }
    }
}
