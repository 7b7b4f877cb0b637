//! Shared fixtures for the scenario tests

#![allow(dead_code)]

use knave::living::{Creature, Player};
use knave::objects::Item;

/// A player holding `items`, each added to the backpack and then equipped
pub fn equipped_player(name: &str, items: Vec<Item>) -> Player {
    let mut player = Player::new(name);
    let mut equipment = player.entity.equipment_mut();
    for item in items {
        let id = item.id;
        equipment.add_to_backpack(item).expect("item should fit");
        equipment.equip(id).expect("item should equip");
    }
    player
}

/// A hostile goblin with a few coins
pub fn goblin(coins: i64) -> Creature {
    let mut goblin = Creature::new("Goblin");
    goblin.entity.coins = coins;
    goblin
}
