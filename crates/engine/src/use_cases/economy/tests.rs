use std::sync::Arc;

use sqlx::SqlitePool;
use tempfile::TempDir;

use mirefell_domain::entities::{EquipSlot, EquipmentCategory, EquipmentItem, Player, SlotKind};
use mirefell_domain::{CombatStats, PlayerId};

use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::ports::{ClockPort, ItemRepo, PlayerRepo, StorePort};
use crate::infrastructure::sqlite::{
    connect, ensure_schema, SqliteItemRepo, SqlitePlayerRepo, SqliteStore,
};

use super::{BuyItem, EconomyError, ListInventory, SellItem, TakeOffItem, TakeOnItem};

struct Harness {
    buy: BuyItem,
    sell: SellItem,
    take_on: TakeOnItem,
    take_off: TakeOffItem,
    list: ListInventory,
    _dir: TempDir,
    pool: SqlitePool,
    players: Arc<SqlitePlayerRepo>,
    items: Arc<SqliteItemRepo>,
}

async fn harness() -> Harness {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("economy.db").to_string_lossy().to_string();
    let pool = connect(&db_path).await.expect("connect");
    ensure_schema(&pool).await.expect("schema");

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let players = Arc::new(SqlitePlayerRepo::new(pool.clone(), Arc::clone(&clock)));
    let items = Arc::new(SqliteItemRepo::new(pool.clone()));
    let store: Arc<dyn StorePort> = Arc::new(SqliteStore::new(pool.clone(), clock));

    Harness {
        buy: BuyItem::new(Arc::clone(&store)),
        sell: SellItem::new(Arc::clone(&store)),
        take_on: TakeOnItem::new(Arc::clone(&store)),
        take_off: TakeOffItem::new(Arc::clone(&store)),
        list: ListInventory::new(players.clone(), items.clone()),
        _dir: dir,
        pool,
        players,
        items,
    }
}

struct Catalog {
    sword: EquipmentItem,
    fine_sword: EquipmentItem,
    jerkin: EquipmentItem,
    greataxe: EquipmentItem,
    rings: Vec<EquipmentItem>,
}

async fn seeded_catalog(items: &SqliteItemRepo) -> Catalog {
    let weapons = EquipmentCategory::new("Swords", SlotKind::Weapon);
    let chests = EquipmentCategory::new("Chest Armour", SlotKind::Chest);
    let bands = EquipmentCategory::new("Rings", SlotKind::Ring);
    for category in [&weapons, &chests, &bands] {
        items.create_category(category).await.expect("create category");
    }

    let mut sword = EquipmentItem::new("Iron Sword", "iron-sword", weapons.id);
    sword.attack = 10;
    sword.defense = 5;
    sword.hp = 20;
    sword.price = 50;

    let mut fine_sword = EquipmentItem::new("Fine Sword", "fine-sword", weapons.id);
    fine_sword.attack = 15;
    fine_sword.defense = 8;
    fine_sword.hp = 25;
    fine_sword.price = 80;

    let mut jerkin = EquipmentItem::new("Studded Jerkin", "studded-jerkin", chests.id);
    jerkin.defense = 10;
    jerkin.hp = 10;
    jerkin.price = 30;

    let mut greataxe = EquipmentItem::new("Greataxe", "greataxe", weapons.id);
    greataxe.attack = 20;
    greataxe.required_level = 5;
    greataxe.price = 60;

    let mut rings = Vec::new();
    for n in 1..=5_i64 {
        let mut ring = EquipmentItem::new(format!("Band {n}"), format!("band-{n}"), bands.id);
        ring.hp = n;
        ring.price = 5;
        rings.push(ring);
    }

    for item in [&sword, &fine_sword, &jerkin, &greataxe]
        .into_iter()
        .chain(rings.iter())
    {
        items.create(item).await.expect("create item");
    }

    Catalog {
        sword,
        fine_sword,
        jerkin,
        greataxe,
        rings,
    }
}

async fn new_player(harness: &Harness, gold: i64) -> Player {
    let player = Player::new("merchant");
    harness.players.create(&player).await.expect("create player");
    sqlx::query("UPDATE players SET gold = ? WHERE id = ?")
        .bind(gold)
        .bind(player.id.to_string())
        .execute(&harness.pool)
        .await
        .expect("grant gold");
    reload(harness, player.id).await
}

async fn reload(harness: &Harness, id: PlayerId) -> Player {
    harness
        .players
        .get(id)
        .await
        .expect("get player")
        .expect("player exists")
}

#[tokio::test]
async fn buying_moves_gold_and_grants_the_item() {
    let harness = harness().await;
    let catalog = seeded_catalog(&harness.items).await;
    let player = new_player(&harness, 100).await;

    let bought = harness
        .buy
        .execute(player.id, "iron-sword")
        .await
        .expect("buy sword");
    assert_eq!(bought.id, catalog.sword.id);

    let after = reload(&harness, player.id).await;
    assert_eq!(after.gold, 50);

    let inventory = harness.list.execute(player.id).await.expect("list");
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0].slug, "iron-sword");
}

#[tokio::test]
async fn buying_without_enough_gold_changes_nothing() {
    let harness = harness().await;
    seeded_catalog(&harness.items).await;
    let player = new_player(&harness, 10).await;

    let result = harness.buy.execute(player.id, "iron-sword").await;
    assert!(matches!(result, Err(EconomyError::InsufficientGold)));

    let after = reload(&harness, player.id).await;
    assert_eq!(after.gold, 10);
    assert!(harness.list.execute(player.id).await.expect("list").is_empty());
}

#[tokio::test]
async fn buying_the_same_item_twice_is_rejected() {
    let harness = harness().await;
    seeded_catalog(&harness.items).await;
    let player = new_player(&harness, 200).await;

    harness
        .buy
        .execute(player.id, "iron-sword")
        .await
        .expect("first purchase");
    let result = harness.buy.execute(player.id, "iron-sword").await;
    assert!(matches!(result, Err(EconomyError::ItemAlreadyOwned)));

    let after = reload(&harness, player.id).await;
    assert_eq!(after.gold, 150);
}

#[tokio::test]
async fn unknown_item_slug_is_rejected() {
    let harness = harness().await;
    seeded_catalog(&harness.items).await;
    let player = new_player(&harness, 100).await;

    let result = harness.buy.execute(player.id, "club-of-legends").await;
    assert!(matches!(result, Err(EconomyError::ItemNotFound(slug)) if slug == "club-of-legends"));
}

#[tokio::test]
async fn selling_returns_gold_and_removes_the_item() {
    let harness = harness().await;
    seeded_catalog(&harness.items).await;
    let player = new_player(&harness, 100).await;
    harness
        .buy
        .execute(player.id, "iron-sword")
        .await
        .expect("buy sword");

    let sold = harness
        .sell
        .execute(player.id, "iron-sword")
        .await
        .expect("sell sword");
    assert_eq!(sold.slug, "iron-sword");

    let after = reload(&harness, player.id).await;
    assert_eq!(after.gold, 100);
    assert!(harness.list.execute(player.id).await.expect("list").is_empty());
}

#[tokio::test]
async fn selling_an_item_the_player_does_not_hold_is_rejected() {
    let harness = harness().await;
    seeded_catalog(&harness.items).await;
    let player = new_player(&harness, 100).await;

    let result = harness.sell.execute(player.id, "iron-sword").await;
    assert!(matches!(result, Err(EconomyError::ItemNotOwned)));
}

#[tokio::test]
async fn equipping_fills_the_slot_and_recomputes_stats() {
    let harness = harness().await;
    let catalog = seeded_catalog(&harness.items).await;
    let player = new_player(&harness, 100).await;
    harness
        .buy
        .execute(player.id, "iron-sword")
        .await
        .expect("buy sword");

    let slot = harness
        .take_on
        .execute(player.id, catalog.sword.id)
        .await
        .expect("equip sword");
    assert_eq!(slot, EquipSlot::Weapon);

    let after = reload(&harness, player.id).await;
    assert_eq!(after.slots.weapon, Some(catalog.sword.id));
    assert_eq!(after.stats, CombatStats::new(11, 6, 40));
    // Wearing hp gear raises the maximum only; healing is regen's job.
    assert_eq!(after.current_hp, 20);
    assert!(harness.list.execute(player.id).await.expect("list").is_empty());
}

#[tokio::test]
async fn equipping_over_an_occupied_slot_displaces_the_occupant() {
    let harness = harness().await;
    let catalog = seeded_catalog(&harness.items).await;
    let player = new_player(&harness, 200).await;
    harness
        .buy
        .execute(player.id, "iron-sword")
        .await
        .expect("buy sword");
    harness
        .buy
        .execute(player.id, "fine-sword")
        .await
        .expect("buy fine sword");

    harness
        .take_on
        .execute(player.id, catalog.sword.id)
        .await
        .expect("equip sword");
    harness
        .take_on
        .execute(player.id, catalog.fine_sword.id)
        .await
        .expect("equip fine sword");

    let after = reload(&harness, player.id).await;
    assert_eq!(after.slots.weapon, Some(catalog.fine_sword.id));
    assert_eq!(after.stats, CombatStats::new(16, 9, 45));

    let inventory = harness.list.execute(player.id).await.expect("list");
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0].id, catalog.sword.id);
}

#[tokio::test]
async fn contributions_from_different_slots_stack() {
    let harness = harness().await;
    let catalog = seeded_catalog(&harness.items).await;
    let player = new_player(&harness, 100).await;
    harness
        .buy
        .execute(player.id, "iron-sword")
        .await
        .expect("buy sword");
    harness
        .buy
        .execute(player.id, "studded-jerkin")
        .await
        .expect("buy jerkin");

    harness
        .take_on
        .execute(player.id, catalog.sword.id)
        .await
        .expect("equip sword");
    let slot = harness
        .take_on
        .execute(player.id, catalog.jerkin.id)
        .await
        .expect("equip jerkin");
    assert_eq!(slot, EquipSlot::Chest);

    let after = reload(&harness, player.id).await;
    assert_eq!(after.stats, CombatStats::new(11, 16, 50));
}

#[tokio::test]
async fn level_requirement_blocks_equipping() {
    let harness = harness().await;
    let catalog = seeded_catalog(&harness.items).await;
    let player = new_player(&harness, 100).await;
    harness
        .buy
        .execute(player.id, "greataxe")
        .await
        .expect("buy greataxe");

    let result = harness.take_on.execute(player.id, catalog.greataxe.id).await;
    assert!(matches!(result, Err(EconomyError::InsufficientLevel)));

    let after = reload(&harness, player.id).await;
    assert_eq!(after.slots.weapon, None);
    assert_eq!(harness.list.execute(player.id).await.expect("list").len(), 1);
}

#[tokio::test]
async fn equipping_an_item_not_in_the_inventory_is_rejected() {
    let harness = harness().await;
    let catalog = seeded_catalog(&harness.items).await;
    let player = new_player(&harness, 100).await;

    let result = harness.take_on.execute(player.id, catalog.sword.id).await;
    assert!(matches!(result, Err(EconomyError::ItemNotInInventory)));
}

#[tokio::test]
async fn rings_fill_their_slots_in_order_then_displace_the_first() {
    let harness = harness().await;
    let catalog = seeded_catalog(&harness.items).await;
    let player = new_player(&harness, 100).await;
    for ring in &catalog.rings {
        harness
            .buy
            .execute(player.id, &ring.slug)
            .await
            .expect("buy ring");
    }

    let expected = [
        EquipSlot::Ring1,
        EquipSlot::Ring2,
        EquipSlot::Ring3,
        EquipSlot::Ring4,
    ];
    for (ring, want) in catalog.rings.iter().take(4).zip(expected) {
        let slot = harness
            .take_on
            .execute(player.id, ring.id)
            .await
            .expect("equip ring");
        assert_eq!(slot, want);
    }

    // A fifth ring lands in ring1 and sends its occupant back.
    let fifth = &catalog.rings[4];
    let slot = harness
        .take_on
        .execute(player.id, fifth.id)
        .await
        .expect("equip fifth ring");
    assert_eq!(slot, EquipSlot::Ring1);

    let after = reload(&harness, player.id).await;
    assert_eq!(after.slots.ring1, Some(fifth.id));
    assert_eq!(after.slots.ring2, Some(catalog.rings[1].id));

    let inventory = harness.list.execute(player.id).await.expect("list");
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0].id, catalog.rings[0].id);
}

#[tokio::test]
async fn taking_off_returns_the_item_and_restores_stats() {
    let harness = harness().await;
    let catalog = seeded_catalog(&harness.items).await;
    let player = new_player(&harness, 100).await;
    harness
        .buy
        .execute(player.id, "iron-sword")
        .await
        .expect("buy sword");
    harness
        .take_on
        .execute(player.id, catalog.sword.id)
        .await
        .expect("equip sword");

    let removed = harness
        .take_off
        .execute(player.id, "weapon")
        .await
        .expect("take off weapon");
    assert_eq!(removed.id, catalog.sword.id);

    let after = reload(&harness, player.id).await;
    assert_eq!(after.slots.weapon, None);
    assert_eq!(after.stats, CombatStats::BASE);

    let inventory = harness.list.execute(player.id).await.expect("list");
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0].id, catalog.sword.id);
}

#[tokio::test]
async fn taking_off_an_empty_slot_is_rejected() {
    let harness = harness().await;
    seeded_catalog(&harness.items).await;
    let player = new_player(&harness, 100).await;

    let result = harness.take_off.execute(player.id, "weapon").await;
    assert!(matches!(result, Err(EconomyError::NoItemEquipped)));
}

#[tokio::test]
async fn unknown_slot_name_is_rejected() {
    let harness = harness().await;
    seeded_catalog(&harness.items).await;
    let player = new_player(&harness, 100).await;

    let result = harness.take_off.execute(player.id, "tail").await;
    assert!(matches!(result, Err(EconomyError::InvalidEquipmentSlot(name)) if name == "tail"));
}

#[tokio::test]
async fn listing_inventory_for_an_unknown_player_is_rejected() {
    let harness = harness().await;

    let result = harness.list.execute(PlayerId::new()).await;
    assert!(matches!(result, Err(EconomyError::PlayerNotFound)));
}
