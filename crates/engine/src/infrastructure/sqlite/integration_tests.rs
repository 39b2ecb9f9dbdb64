use std::sync::Arc;

use chrono::{TimeZone, Utc};
use sqlx::SqlitePool;
use tempfile::TempDir;

use mirefell_domain::entities::{
    Bot, EquipSlot, EquipmentCategory, EquipmentItem, Fight, FightStatus, Location,
    MovementSession, MovementStatus, MovementStep, Player, SlotKind,
};
use mirefell_domain::PlayerId;

use crate::infrastructure::clock::{FixedClock, SystemClock};
use crate::infrastructure::ports::{
    BotRepo, ClockPort, FightRepo, ItemRepo, LocationRepo, MovementRepo, PlayerRepo, StorePort,
};

use super::{
    connect, ensure_schema, seed_if_empty, SqliteBotRepo, SqliteFightRepo, SqliteItemRepo,
    SqliteLocationRepo, SqliteMovementRepo, SqlitePlayerRepo, SqliteStore,
};

async fn setup() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("engine.db").to_string_lossy().to_string();
    let pool = connect(&db_path).await.expect("connect");
    ensure_schema(&pool).await.expect("schema");
    (dir, pool)
}

fn system_clock() -> Arc<dyn ClockPort> {
    Arc::new(SystemClock)
}

#[tokio::test]
async fn connect_creates_the_database_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("fresh.db");
    let pool = connect(&db_path.to_string_lossy()).await.expect("connect");
    ensure_schema(&pool).await.expect("schema");

    assert!(db_path.exists());
}

#[tokio::test]
async fn player_round_trip_preserves_every_column() {
    let (_dir, pool) = setup().await;
    let players = SqlitePlayerRepo::new(pool.clone(), system_clock());
    let store = SqliteStore::new(pool.clone(), system_clock());

    let location = Location::new("Mirefell", "mirefell");
    SqliteLocationRepo::new(pool.clone())
        .create(&location)
        .await
        .expect("create location");

    let mut player = Player::new("astrid");
    player.location_id = Some(location.id);
    players.create(&player).await.expect("create player");

    let category = EquipmentCategory::new("Swords", SlotKind::Weapon);
    let sword = EquipmentItem::new("Iron Sword", "iron-sword", category.id);
    let items = SqliteItemRepo::new(pool.clone());
    items.create_category(&category).await.expect("create category");
    items.create(&sword).await.expect("create item");

    let mut tx = store.begin().await.expect("begin");
    tx.set_equipment_slot(player.id, EquipSlot::Weapon, Some(sword.id))
        .await
        .expect("set slot");
    tx.set_gold(player.id, 75).await.expect("set gold");
    tx.commit().await.expect("commit");

    let loaded = players
        .get(player.id)
        .await
        .expect("get player")
        .expect("player exists");
    assert_eq!(loaded.username, "astrid");
    assert_eq!(loaded.level, 1);
    assert_eq!(loaded.free_stat_points, 10);
    assert_eq!(loaded.gold, 75);
    assert_eq!(loaded.location_id, Some(location.id));
    assert_eq!(loaded.slots.weapon, Some(sword.id));
    assert_eq!(loaded.slots.shield, None);
    assert_eq!(loaded.base_stats, player.base_stats);

    let by_name = players
        .find_by_username("astrid")
        .await
        .expect("find by username")
        .expect("player exists");
    assert_eq!(by_name.id, player.id);
    assert!(players
        .find_by_username("nobody")
        .await
        .expect("find by username")
        .is_none());
}

#[tokio::test]
async fn dropping_a_transaction_rolls_back() {
    let (_dir, pool) = setup().await;
    let players = SqlitePlayerRepo::new(pool.clone(), system_clock());
    let store = SqliteStore::new(pool.clone(), system_clock());

    let player = Player::new("astrid");
    players.create(&player).await.expect("create player");

    {
        let mut tx = store.begin().await.expect("begin");
        tx.set_gold(player.id, 500).await.expect("set gold");
        // No commit; the drop at the end of this scope rolls back.
    }

    let loaded = players
        .get(player.id)
        .await
        .expect("get player")
        .expect("player exists");
    assert_eq!(loaded.gold, 0);
}

#[tokio::test]
async fn a_committed_transaction_cannot_be_reused() {
    let (_dir, pool) = setup().await;
    let players = SqlitePlayerRepo::new(pool.clone(), system_clock());
    let store = SqliteStore::new(pool.clone(), system_clock());

    let player = Player::new("astrid");
    players.create(&player).await.expect("create player");

    let mut tx = store.begin().await.expect("begin");
    tx.set_gold(player.id, 120).await.expect("set gold");
    tx.commit().await.expect("commit");

    let loaded = players
        .get(player.id)
        .await
        .expect("get player")
        .expect("player exists");
    assert_eq!(loaded.gold, 120);

    assert!(tx.commit().await.is_err());
    assert!(tx.set_gold(player.id, 999).await.is_err());
}

#[tokio::test]
async fn duplicate_inventory_entries_are_removed_one_at_a_time() {
    let (_dir, pool) = setup().await;
    let players = SqlitePlayerRepo::new(pool.clone(), system_clock());
    let items = SqliteItemRepo::new(pool.clone());
    let store = SqliteStore::new(pool.clone(), system_clock());

    let player = Player::new("astrid");
    players.create(&player).await.expect("create player");
    let category = EquipmentCategory::new("Rings", SlotKind::Ring);
    let ring = EquipmentItem::new("Copper Ring", "copper-ring", category.id);
    items.create_category(&category).await.expect("create category");
    items.create(&ring).await.expect("create item");

    let mut tx = store.begin().await.expect("begin");
    tx.insert_inventory_entry(player.id, ring.id)
        .await
        .expect("first entry");
    tx.insert_inventory_entry(player.id, ring.id)
        .await
        .expect("second entry");
    tx.remove_inventory_entry(player.id, ring.id)
        .await
        .expect("remove one");
    let still_owned = tx.owns_item(player.id, ring.id).await.expect("owns");
    tx.remove_inventory_entry(player.id, ring.id)
        .await
        .expect("remove the other");
    let owned_after = tx.owns_item(player.id, ring.id).await.expect("owns");
    tx.commit().await.expect("commit");

    assert!(still_owned);
    assert!(!owned_after);
}

#[tokio::test]
async fn regeneration_heals_by_percent_with_floor_and_cap() {
    let (_dir, pool) = setup().await;
    let players = SqlitePlayerRepo::new(pool.clone(), system_clock());

    // (username, max hp, current hp)
    let cases = [
        ("floor", 10, 5),    // 5% of 10 rounds to 0; the floor heals 1
        ("normal", 100, 50), // straight 5% heal
        ("capped", 100, 98), // heal would pass max; clamps to max
        ("full", 20, 20),    // untouched
    ];
    let mut ids = Vec::new();
    for (username, hp, current) in cases {
        let player = Player::new(username);
        players.create(&player).await.expect("create player");
        sqlx::query("UPDATE players SET hp = ?, current_hp = ? WHERE id = ?")
            .bind(hp)
            .bind(current)
            .bind(player.id.to_string())
            .execute(&pool)
            .await
            .expect("arrange hp");
        ids.push(player.id);
    }

    let healed = players.regenerate_health(5).await.expect("regenerate");
    assert_eq!(healed, 3);

    let expectations = [6, 55, 100, 20];
    for (id, want) in ids.iter().zip(expectations) {
        let current = players
            .get(*id)
            .await
            .expect("get player")
            .expect("player exists")
            .current_hp;
        assert_eq!(current, want);
    }
}

#[tokio::test]
async fn active_fight_lookup_returns_the_newest_in_progress() {
    let (_dir, pool) = setup().await;
    let players = SqlitePlayerRepo::new(pool.clone(), system_clock());
    let bots = SqliteBotRepo::new(pool.clone());
    let fights = SqliteFightRepo::new(pool.clone());
    let clock = FixedClock(Utc.timestamp_opt(1_700_000_000, 0).unwrap());
    let store = SqliteStore::new(pool.clone(), Arc::new(clock));

    let player = Player::new("astrid");
    players.create(&player).await.expect("create player");
    let bot = Bot::new("Bog Rat", "bog-rat");
    bots.create(&bot).await.expect("create bot");

    let older = Fight::new(player.id, bot.id, Utc.timestamp_opt(1_700_000_000, 0).unwrap());
    let newer = Fight::new(player.id, bot.id, Utc.timestamp_opt(1_700_000_100, 0).unwrap());
    let mut tx = store.begin().await.expect("begin");
    tx.insert_fight(&older).await.expect("insert older");
    tx.insert_fight(&newer).await.expect("insert newer");
    tx.commit().await.expect("commit");

    let active = fights
        .find_active_by_player(player.id)
        .await
        .expect("find active")
        .expect("fight exists");
    assert_eq!(active.id, newer.id);
    assert_eq!(active.status, FightStatus::InProgress);

    // Once the newest is finished, the older open fight is the active one.
    sqlx::query("UPDATE fights SET status = ? WHERE id = ?")
        .bind(FightStatus::Finished.as_str())
        .bind(newer.id.to_string())
        .execute(&pool)
        .await
        .expect("finish fight");

    let active = fights
        .find_active_by_player(player.id)
        .await
        .expect("find active")
        .expect("fight exists");
    assert_eq!(active.id, older.id);
}

#[tokio::test]
async fn recording_a_step_moves_the_player_with_it() {
    let (_dir, pool) = setup().await;
    let players = SqlitePlayerRepo::new(pool.clone(), system_clock());
    let locations = SqliteLocationRepo::new(pool.clone());
    let movements = SqliteMovementRepo::new(pool.clone());

    let from = Location::cell("Cell A", "cell-a");
    let to = Location::cell("Cell B", "cell-b");
    locations.create(&from).await.expect("create from");
    locations.create(&to).await.expect("create to");

    let mut player = Player::new("walker");
    player.location_id = Some(from.id);
    players.create(&player).await.expect("create player");

    let session = MovementSession::new(player.id, Utc::now());
    movements.create_session(&session).await.expect("session");

    let step = MovementStep {
        movement_id: session.id,
        from_location_id: from.id,
        to_location_id: to.id,
        created_at: Utc::now(),
    };
    movements.record_step(&step, player.id).await.expect("step");

    let moved = players
        .get(player.id)
        .await
        .expect("get player")
        .expect("player exists");
    assert_eq!(moved.location_id, Some(to.id));

    let stored = movements
        .get_session(session.id)
        .await
        .expect("get session")
        .expect("session exists");
    assert_eq!(stored.status, MovementStatus::Active);

    movements.finish_session(session.id).await.expect("finish");
    let finished = movements
        .get_session(session.id)
        .await
        .expect("get session")
        .expect("session exists");
    assert_eq!(finished.status, MovementStatus::Finished);
}

#[tokio::test]
async fn links_are_symmetric_regardless_of_stored_direction() {
    let (_dir, pool) = setup().await;
    let locations = SqliteLocationRepo::new(pool.clone());

    let town = Location::new("Mirefell", "mirefell");
    let market = Location::new("Market Row", "market-row");
    let island = Location::new("Gull Rock", "gull-rock");
    for location in [&town, &market, &island] {
        locations.create(location).await.expect("create location");
    }
    locations.link(town.id, market.id).await.expect("link");

    assert!(locations.are_linked(town.id, market.id).await.expect("linked"));
    assert!(locations.are_linked(market.id, town.id).await.expect("linked"));
    assert!(!locations.are_linked(town.id, island.id).await.expect("linked"));
}

#[tokio::test]
async fn seeding_populates_an_empty_world_once() {
    let (_dir, pool) = setup().await;
    let locations = SqliteLocationRepo::new(pool.clone());
    let items = SqliteItemRepo::new(pool.clone());
    let bots = SqliteBotRepo::new(pool.clone());

    let first = seed_if_empty(&locations, &items, &bots)
        .await
        .expect("first seed");
    assert!(first);

    let second = seed_if_empty(&locations, &items, &bots)
        .await
        .expect("second seed");
    assert!(!second);

    let world = locations.list_active().await.expect("list locations");
    assert!(!world.is_empty());
    let town = locations
        .find_by_slug("mirefell")
        .await
        .expect("find town")
        .expect("town exists");
    assert!(!town.is_cell);

    let sword = items
        .find_by_slug("rusty-sword")
        .await
        .expect("find sword")
        .expect("sword exists");
    assert!(sword.price > 0);

    let rat = bots
        .find_by_slug("bog-rat")
        .await
        .expect("find bot")
        .expect("bot exists");
    let road = locations
        .find_by_slug("mire-road")
        .await
        .expect("find road")
        .expect("road exists");
    let present = locations
        .has_bot(road.id, rat.id)
        .await
        .expect("has bot");
    assert!(present);
}

#[tokio::test]
async fn inventory_listing_skips_other_players() {
    let (_dir, pool) = setup().await;
    let players = SqlitePlayerRepo::new(pool.clone(), system_clock());
    let items = SqliteItemRepo::new(pool.clone());
    let store = SqliteStore::new(pool.clone(), system_clock());

    let astrid = Player::new("astrid");
    let bjorn = Player::new("bjorn");
    players.create(&astrid).await.expect("create astrid");
    players.create(&bjorn).await.expect("create bjorn");

    let category = EquipmentCategory::new("Swords", SlotKind::Weapon);
    let sword = EquipmentItem::new("Iron Sword", "iron-sword", category.id);
    let axe = EquipmentItem::new("Bearded Axe", "bearded-axe", category.id);
    items.create_category(&category).await.expect("create category");
    items.create(&sword).await.expect("create sword");
    items.create(&axe).await.expect("create axe");

    let mut tx = store.begin().await.expect("begin");
    tx.insert_inventory_entry(astrid.id, sword.id)
        .await
        .expect("astrid sword");
    tx.insert_inventory_entry(bjorn.id, axe.id)
        .await
        .expect("bjorn axe");
    tx.commit().await.expect("commit");

    let inventory = items.list_inventory(astrid.id).await.expect("list");
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0].id, sword.id);
}

#[tokio::test]
async fn unknown_ids_read_back_as_none() {
    let (_dir, pool) = setup().await;
    let players = SqlitePlayerRepo::new(pool.clone(), system_clock());
    let fights = SqliteFightRepo::new(pool.clone());

    assert!(players
        .get(PlayerId::new())
        .await
        .expect("get player")
        .is_none());
    assert!(fights
        .find_active_by_player(PlayerId::new())
        .await
        .expect("find active")
        .is_none());
}
