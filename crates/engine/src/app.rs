//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::infrastructure::{
    clock::SystemClock,
    ports::{
        BotRepo, ClockPort, FightRepo, ItemRepo, LocationRepo, MovementRepo, PlayerRepo, StorePort,
    },
    sqlite::{
        SqliteBotRepo, SqliteFightRepo, SqliteItemRepo, SqliteLocationRepo, SqliteMovementRepo,
        SqlitePlayerRepo, SqliteStore,
    },
};
use crate::use_cases::{
    AttackBot, BuyItem, CreatePlayer, GetCurrentFight, GetPlayer, ListInventory, ListLocationBots,
    LocationGraph, MoveToLocation, MovementSessions, SellItem, TakeOffItem, TakeOnItem,
    TravelToCell,
};

/// Main application state.
///
/// Holds the repository ports, the wired use cases, the shared world map,
/// and the movement session manager.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub movement: Arc<MovementSessions>,
    pub graph: Arc<LocationGraph>,
}

/// Container for all repository ports.
pub struct Repositories {
    pub players: Arc<dyn PlayerRepo>,
    pub items: Arc<dyn ItemRepo>,
    pub locations: Arc<dyn LocationRepo>,
    pub bots: Arc<dyn BotRepo>,
    pub fights: Arc<dyn FightRepo>,
    pub movements: Arc<dyn MovementRepo>,
    pub store: Arc<dyn StorePort>,
}

/// Container for all use cases.
pub struct UseCases {
    pub create_player: CreatePlayer,
    pub get_player: GetPlayer,
    pub buy_item: BuyItem,
    pub sell_item: SellItem,
    pub take_on: TakeOnItem,
    pub take_off: TakeOffItem,
    pub inventory: ListInventory,
    pub move_to_location: MoveToLocation,
    pub travel_to_cell: TravelToCell,
    pub attack_bot: AttackBot,
    pub current_fight: GetCurrentFight,
    pub location_bots: ListLocationBots,
}

impl App {
    /// Create a new App with all dependencies wired up.
    ///
    /// The location graph is loaded separately before construction so the
    /// caller can reuse the same snapshot elsewhere.
    pub fn new(pool: SqlitePool, graph: Arc<LocationGraph>, movement_tick: Duration) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

        let players: Arc<dyn PlayerRepo> =
            Arc::new(SqlitePlayerRepo::new(pool.clone(), Arc::clone(&clock)));
        let items: Arc<dyn ItemRepo> = Arc::new(SqliteItemRepo::new(pool.clone()));
        let locations: Arc<dyn LocationRepo> = Arc::new(SqliteLocationRepo::new(pool.clone()));
        let bots: Arc<dyn BotRepo> = Arc::new(SqliteBotRepo::new(pool.clone()));
        let fights: Arc<dyn FightRepo> = Arc::new(SqliteFightRepo::new(pool.clone()));
        let movements: Arc<dyn MovementRepo> = Arc::new(SqliteMovementRepo::new(pool.clone()));
        let store: Arc<dyn StorePort> = Arc::new(SqliteStore::new(pool, Arc::clone(&clock)));

        let movement = Arc::new(MovementSessions::new(
            Arc::clone(&players),
            Arc::clone(&locations),
            Arc::clone(&movements),
            Arc::clone(&clock),
            movement_tick,
        ));

        let use_cases = UseCases {
            create_player: CreatePlayer::new(Arc::clone(&players), Arc::clone(&locations)),
            get_player: GetPlayer::new(Arc::clone(&players)),
            buy_item: BuyItem::new(Arc::clone(&store)),
            sell_item: SellItem::new(Arc::clone(&store)),
            take_on: TakeOnItem::new(Arc::clone(&store)),
            take_off: TakeOffItem::new(Arc::clone(&store)),
            inventory: ListInventory::new(Arc::clone(&players), Arc::clone(&items)),
            move_to_location: MoveToLocation::new(Arc::clone(&players), Arc::clone(&locations)),
            travel_to_cell: TravelToCell::new(
                Arc::clone(&players),
                Arc::clone(&graph),
                Arc::clone(&movement),
            ),
            attack_bot: AttackBot::new(
                Arc::clone(&players),
                Arc::clone(&bots),
                Arc::clone(&locations),
                Arc::clone(&fights),
                Arc::clone(&store),
                Arc::clone(&clock),
            ),
            current_fight: GetCurrentFight::new(
                Arc::clone(&players),
                Arc::clone(&fights),
                Arc::clone(&bots),
            ),
            location_bots: ListLocationBots::new(Arc::clone(&locations), Arc::clone(&bots)),
        };

        Self {
            repositories: Repositories {
                players,
                items,
                locations,
                bots,
                fights,
                movements,
                store,
            },
            use_cases,
            movement,
            graph,
        }
    }
}
