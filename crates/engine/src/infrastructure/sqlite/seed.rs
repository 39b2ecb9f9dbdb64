//! First-boot world content.
//!
//! Gives a fresh database a starting town, a short chain of open-world
//! cells, a shop catalog, and one bot to pick a fight with. Skipped
//! entirely once any location exists.

use mirefell_domain::{Bot, EquipmentCategory, EquipmentItem, Location, SlotKind};

use crate::infrastructure::ports::{BotRepo, ItemRepo, LocationRepo, RepoError};

/// Seed the starter world unless one is already present. Returns whether
/// anything was written.
pub async fn seed_if_empty(
    locations: &dyn LocationRepo,
    items: &dyn ItemRepo,
    bots: &dyn BotRepo,
) -> Result<bool, RepoError> {
    if !locations.list_active().await?.is_empty() {
        return Ok(false);
    }

    let town = Location::new("Mirefell", "mirefell");
    let market = Location::new("Market Row", "market-row");
    let gate = Location::cell("North Gate", "north-gate");
    let road = Location::cell("Mire Road", "mire-road");
    let quarry = Location::cell("Old Quarry", "old-quarry");

    for location in [&town, &market, &gate, &road, &quarry] {
        locations.create(location).await?;
    }

    // Edges are persisted in both directions.
    for (a, b) in [
        (&town, &market),
        (&town, &gate),
        (&gate, &road),
        (&road, &quarry),
    ] {
        locations.link(a.id, b.id).await?;
        locations.link(b.id, a.id).await?;
    }

    let categories = [
        ("Swords", SlotKind::Weapon),
        ("Shields", SlotKind::Shield),
        ("Chestplates", SlotKind::Chest),
        ("Belts", SlotKind::Belt),
        ("Helmets", SlotKind::Head),
        ("Amulets", SlotKind::Neck),
        ("Greaves", SlotKind::Legs),
        ("Boots", SlotKind::Feet),
        ("Bracers", SlotKind::Arms),
        ("Gauntlets", SlotKind::Hands),
        ("Rings", SlotKind::Ring),
    ];

    let mut weapon_category = None;
    let mut chest_category = None;
    let mut ring_category = None;
    for (name, kind) in categories {
        let category = EquipmentCategory::new(name, kind);
        match kind {
            SlotKind::Weapon => weapon_category = Some(category.id),
            SlotKind::Chest => chest_category = Some(category.id),
            SlotKind::Ring => ring_category = Some(category.id),
            _ => {}
        }
        items.create_category(&category).await?;
    }

    // The loop above always fills these three.
    let (Some(weapon_category), Some(chest_category), Some(ring_category)) =
        (weapon_category, chest_category, ring_category)
    else {
        return Err(RepoError::constraint("starter categories missing"));
    };

    let mut sword = EquipmentItem::new("Rusty Sword", "rusty-sword", weapon_category);
    sword.attack = 3;
    sword.price = 25;

    let mut jerkin = EquipmentItem::new("Leather Jerkin", "leather-jerkin", chest_category);
    jerkin.defense = 2;
    jerkin.hp = 5;
    jerkin.price = 20;

    let mut ring = EquipmentItem::new("Copper Ring", "copper-ring", ring_category);
    ring.hp = 2;
    ring.price = 15;

    for item in [&sword, &jerkin, &ring] {
        items.create(item).await?;
    }

    let mut rat = Bot::new("Bog Rat", "bog-rat");
    rat.hp = 8;
    bots.create(&rat).await?;
    locations.place_bot(road.id, rat.id).await?;

    tracing::info!(
        locations = 5,
        items = 3,
        bots = 1,
        "seeded starter world"
    );

    Ok(true)
}
