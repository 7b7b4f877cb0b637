//! Death scenario tests
//!
//! Defeat handling for players and creatures, lethal and not

use knave::combat::apply_damage;
use knave::living::{DefeatOutcome, Lethality, Living, Notice, Player, Vitality};
use knave::rules::{Ability, DeathOutcome, RollEngine};

use crate::common::goblin;

/// Test: surviving the death table, as narrated
#[test]
fn test_survive_and_narrate() {
    let mut player = Player::new("Hero");
    player.entity.abilities.endurance = 5;

    // Damage, then death table row 3 (endurance), loss 2, heal 4
    let mut engine = RollEngine::scripted([3, 2, 4]);
    let outcome = apply_damage(&mut engine, &mut player, 9, None, Lethality::Lethal);

    assert_eq!(
        outcome,
        Some(DefeatOutcome::DeathRoll(DeathOutcome::Survived {
            ability: Ability::Endurance,
            loss: 2,
            healed: 4
        }))
    );
    assert_eq!(player.entity.abilities.endurance, 3);
    assert_eq!(player.entity.hp, 3);

    let narration: Vec<String> = player
        .entity
        .drain_notices()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        narration,
        vec![
            "You take 9 damage.",
            "You heal for 4 HP.",
            "You survive your brush with death, but lose 2 endurance permanently.",
        ]
    );
}

/// Test: the dead rows leave the corpse untouched
#[test]
fn test_dead_row() {
    let mut player = Player::new("Hero");
    let mut engine = RollEngine::scripted([1]);
    let outcome = apply_damage(&mut engine, &mut player, 10, None, Lethality::Lethal);

    assert_eq!(outcome, Some(DefeatOutcome::DeathRoll(DeathOutcome::Dead)));
    assert_eq!(player.entity.vitality, Vitality::Dead);
    assert_eq!(player.entity.hp, -2);
    assert_eq!(player.entity.abilities.strength, 1);
    assert!(player.entity.drain_notices().contains(&Notice::Died));
}

/// Test: a crippled character dies when an ability would fall below -10
#[test]
fn test_maimed_to_death() {
    let mut player = Player::new("Hero");
    player.entity.abilities.perception = -9;
    player.entity.hp = 0;

    let mut engine = RollEngine::scripted([7, 2]);
    let outcome = player.defeat(&mut engine, Lethality::Lethal);

    assert_eq!(
        outcome,
        DefeatOutcome::DeathRoll(DeathOutcome::Died {
            ability: Ability::Perception,
            loss: 2
        })
    );
    assert!(outcome.is_fatal());
    assert_eq!(player.entity.abilities.perception, -9);
}

/// Test: the arena does not kill players, but still kills monsters
#[test]
fn test_nonlethal_arena() {
    let mut engine = RollEngine::scripted([]);

    let mut player = Player::new("Hero");
    let outcome = apply_damage(&mut engine, &mut player, 20, None, Lethality::NonLethal);
    assert_eq!(outcome, Some(DefeatOutcome::Beaten { healed: 20 }));
    assert_eq!(player.entity.hp, player.entity.hp_max);
    assert!(player.entity.is_alive());

    let mut goblin = goblin(0);
    let outcome = apply_damage(&mut engine, &mut goblin, 20, None, Lethality::NonLethal);
    assert_eq!(outcome, Some(DefeatOutcome::Died));
    assert!(!goblin.entity.is_alive());
}

/// Test: repeated brushes with death wear a character down
#[test]
fn test_repeated_death_rolls() {
    let mut player = Player::new("Hero");
    player.entity.abilities.willpower = -4;

    // Three rounds of (row 8 = willpower, loss 3, heal 1); the third loss is fatal
    let mut engine = RollEngine::scripted([8, 3, 1, 8, 3, 1, 8, 3]);
    for _ in 0..2 {
        player.entity.hp = 0;
        let outcome = player.defeat(&mut engine, Lethality::Lethal);
        assert!(!outcome.is_fatal());
    }
    assert_eq!(player.entity.abilities.willpower, -10);

    player.entity.hp = 0;
    let outcome = player.defeat(&mut engine, Lethality::Lethal);
    assert!(outcome.is_fatal());
    assert_eq!(player.entity.vitality, Vitality::Dead);
}
