//! Equipment scenario tests
//!
//! Packing, swapping gear and the inventory invariants under random play

use std::collections::HashSet;

use knave::equipment::{EquipmentError, UseOutcome};
use knave::living::Entity;
use knave::objects::{Item, ItemId, WieldLocation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::equipped_player;

fn assert_unique(entity: &Entity) {
    let mut seen = HashSet::new();
    for (item, _) in entity.equipment().list_all() {
        assert!(seen.insert(item.id), "{} appears twice", item.name);
    }
    assert!(entity.equipment().validate().is_ok());
}

/// Test: swapping between sword-and-board and a two-handed weapon
#[test]
fn test_weapon_swap_cycle() {
    let sword = Item::weapon("sword").with_size(2);
    let shield = Item::shield("shield").with_size(2);
    let mut player = equipped_player("Hero", vec![sword.clone(), shield.clone()]);
    let maul = Item::two_handed_weapon("maul").with_size(3);

    let mut equipment = player.entity.equipment_mut();
    equipment.add_to_backpack(maul.clone()).unwrap();
    assert_eq!(equipment.display_slot_usage(), "7/11");

    let outcome = equipment.equip(maul.id).unwrap();
    assert_eq!(outcome.displaced, vec![sword.id, shield.id]);
    let backpack: Vec<ItemId> = equipment.backpack().iter().map(|i| i.id).collect();
    assert_eq!(backpack, vec![sword.id, shield.id]);
    assert_eq!(equipment.current_armor_bonus(), 1);

    // Back to sword and shield, one piece at a time
    let outcome = equipment.equip(shield.id).unwrap();
    assert_eq!(outcome.displaced, vec![maul.id]);
    equipment.equip(sword.id).unwrap();
    assert_eq!(equipment.current_weapon().id, sword.id);
    assert_eq!(equipment.current_armor_bonus(), 2);
    assert_eq!(equipment.display_slot_usage(), "7/11");

    assert_unique(&player.entity);
}

/// Test: a full pack refuses more, and frees up after dropping things
#[test]
fn test_full_pack() {
    let mut player = equipped_player("Hero", vec![Item::armor("chain").with_size(3)]);
    let mut equipment = player.entity.equipment_mut();

    let mut stones = Vec::new();
    for _ in 0..8 {
        let stone = Item::new("stone");
        stones.push(stone.id);
        equipment.add_to_backpack(stone).unwrap();
    }

    let anvil = Item::new("anvil").with_size(2);
    assert_eq!(
        equipment.add_to_backpack(anvil.clone()),
        Err(EquipmentError::CapacityExceeded {
            remaining: 0,
            needed: 2
        })
    );

    equipment.remove_from_backpack(stones[0]).unwrap();
    equipment.remove_from_backpack(stones[1]).unwrap();
    equipment.add_to_backpack(anvil).unwrap();
    assert_eq!(equipment.slot_usage(), (11, 11));
}

/// Test: losing endurance shrinks capacity immediately
#[test]
fn test_capacity_tracks_endurance() {
    let mut player = equipped_player("Hero", vec![]);
    player.entity.abilities.endurance = 3;
    for _ in 0..12 {
        player
            .entity
            .equipment_mut()
            .add_to_backpack(Item::new("stone"))
            .unwrap();
    }

    player.entity.abilities.endurance = 1;
    assert!(matches!(
        player.entity.equipment_mut().add_to_backpack(Item::new("feather").with_size(1)),
        Err(EquipmentError::CapacityExceeded { remaining: -1, .. })
    ));
}

/// Test: drinking potions until they are gone
#[test]
fn test_consumables_run_out() {
    let mut player = equipped_player("Hero", vec![]);
    let potion = Item::consumable("healing potion").with_uses(2);
    let mut equipment = player.entity.equipment_mut();
    equipment.add_to_backpack(potion.clone()).unwrap();

    assert_eq!(equipment.usables().len(), 1);
    assert_eq!(
        equipment.use_item(potion.id),
        Ok(UseOutcome::Used { remaining: 1 })
    );
    assert!(matches!(
        equipment.use_item(potion.id),
        Ok(UseOutcome::UsedUp(_))
    ));
    assert!(equipment.usables().is_empty());
    assert_eq!(equipment.used_slots(), 0);
}

/// Test: readouts for the presentation layer
#[test]
fn test_readouts() {
    let helmet = Item::helmet("Iron Helmet");
    let player = equipped_player("Hero", vec![helmet.clone()]);
    let equipment = player.entity.equipment();

    assert_eq!(equipment.describe_loadout(), "head : Iron Helmet");
    assert_eq!(equipment.describe_backpack(), "Your backpack is empty.");

    let stats = helmet.stats(equipment.locate(helmet.id));
    assert!(stats.contains("Worn: [head]"));
}

/// Test: capacity and uniqueness hold over random sequences of operations
#[test]
fn test_invariants_under_random_play() {
    let templates: Vec<fn(&str) -> Item> = vec![
        Item::new,
        Item::weapon,
        Item::two_handed_weapon,
        Item::rune_stone,
        Item::armor,
        Item::shield,
        Item::helmet,
        Item::consumable,
    ];

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut entity = Entity::new("Hoarder");
        entity.abilities.endurance = rng.random_range(0..4);

        for _ in 0..200 {
            let carried: Vec<ItemId> = entity
                .equipment()
                .list_all()
                .iter()
                .map(|(item, _)| item.id)
                .collect();
            let mut equipment = entity.equipment_mut();

            match rng.random_range(0..6) {
                0 | 1 => {
                    let template = templates[rng.random_range(0..templates.len())];
                    let item = template("thing").with_size(rng.random_range(0..4));
                    let _ = equipment.add_to_backpack(item);
                }
                2 if !carried.is_empty() => {
                    let id = carried[rng.random_range(0..carried.len())];
                    let _ = equipment.equip(id);
                }
                3 => {
                    let location = WieldLocation::SLOTS[rng.random_range(0..5)];
                    let _ = equipment.unequip_to_backpack(location);
                }
                4 if !carried.is_empty() => {
                    let id = carried[rng.random_range(0..carried.len())];
                    let _ = equipment.remove_from_backpack(id);
                }
                5 if !carried.is_empty() => {
                    let id = carried[rng.random_range(0..carried.len())];
                    // Re-adding something already carried must always fail
                    if let Some(item) = equipment.get(id).cloned() {
                        assert_eq!(
                            equipment.add_to_backpack(item),
                            Err(EquipmentError::DuplicateItem(id))
                        );
                    }
                }
                _ => {}
            }

            let (used, max) = entity.equipment_mut().slot_usage();
            assert!(used <= max, "seed {}: {} > {}", seed, used, max);
            assert_unique(&entity);
        }
    }
}
