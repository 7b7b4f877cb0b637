//! Combat scenario tests
//!
//! Fights to the finish, advantage, and looting the loser

use knave::combat::{attack, loot_defeated};
use knave::living::{DefeatOutcome, Lethality, Living, Notice};
use knave::objects::Item;
use knave::rules::{RollEngine, SaveQuality};

use crate::common::{equipped_player, goblin};

/// Test: a scripted duel ending in a dead goblin and a richer hero
#[test]
fn test_duel_to_the_death() {
    let mut hero = equipped_player("Hero", vec![Item::weapon("sword")]);
    let mut goblin = goblin(15);

    let mut engine = RollEngine::scripted([
        // Hero hits for 5
        16, 5,
        // Goblin misses with bare hands
        3,
        // Hero hits again for 4
        12, 4,
        // Loot 1d10
        9,
    ]);

    let first = attack(&mut engine, &mut hero, &mut goblin, Lethality::Lethal, false, false).unwrap();
    assert!(first.hit());
    assert_eq!(goblin.entity.hp, 3);

    let reply = attack(&mut engine, &mut goblin, &mut hero, Lethality::Lethal, false, false).unwrap();
    assert!(!reply.hit());
    assert_eq!(reply.weapon, "Empty Hands");

    let second = attack(&mut engine, &mut hero, &mut goblin, Lethality::Lethal, false, false).unwrap();
    assert_eq!(second.defeat, Some(DefeatOutcome::Died));

    let stolen = loot_defeated(&mut engine, &mut hero, &mut goblin).unwrap();
    assert_eq!(stolen, Some(9));
    assert_eq!(hero.entity.coins, 9);
    assert_eq!(goblin.entity.coins, 6);
    assert!(hero
        .entity
        .drain_notices()
        .contains(&Notice::Looted {
            from: "Goblin".to_string(),
            amount: 9
        }));
}

/// Test: advantage keeps the better die, and a kept 20 doubles damage
#[test]
fn test_advantage_critical() {
    let mut hero = equipped_player("Hero", vec![Item::two_handed_weapon("maul")]);
    let mut goblin = goblin(0);

    let mut engine = RollEngine::scripted([4, 20, 3]);
    let report = attack(&mut engine, &mut hero, &mut goblin, Lethality::Lethal, true, false).unwrap();

    assert_eq!(report.throw.roll, 20);
    assert_eq!(report.throw.quality, SaveQuality::CriticalSuccess);
    assert_eq!(report.damage.map(|d| d.final_damage), Some(6));
    assert_eq!(goblin.entity.hp, 2);
}

/// Test: armor raises the number an attacker has to beat
#[test]
fn test_armor_raises_target() {
    let mut knight = equipped_player(
        "Knight",
        vec![
            Item::armor("plate").with_armor(4),
            Item::shield("shield"),
            Item::helmet("helmet"),
        ],
    );
    let mut goblin = goblin(0);

    let mut engine = RollEngine::scripted([15]);
    let report = attack(&mut engine, &mut goblin, &mut knight, Lethality::Lethal, false, false).unwrap();
    assert_eq!(report.throw.target, 16);
    assert!(!report.hit());
    assert_eq!(knight.entity().hp, 8);
}

/// Test: looting a creature still on its feet does nothing
#[test]
fn test_no_looting_the_living() {
    let mut hero = equipped_player("Hero", vec![]);
    let mut goblin = goblin(30);
    let mut engine = RollEngine::scripted([]);

    assert_eq!(loot_defeated(&mut engine, &mut hero, &mut goblin), Ok(None));
    assert_eq!(goblin.entity.coins, 30);
}
