//! Character generation scenario tests
//!
//! From a rolled sheet to a character ready for the dungeon

use knave::chargen::{CharacterSheet, ChargenError};
use knave::living::Living;
use knave::objects::WieldLocation;
use knave::rules::{Ability, RollEngine};

/// Test: generate, customize, apply and rest
#[test]
fn test_new_character_flow() {
    let mut engine = RollEngine::seeded(2024);
    let mut sheet = CharacterSheet::generate(&mut engine).unwrap();

    sheet.rename("grimwald").unwrap();
    let (str_before, wil_before) = (sheet.abilities.strength, sheet.abilities.willpower);
    sheet.swap_abilities("STR", "WIL").unwrap();
    assert_eq!(
        sheet.swap_abilities("DEX", "INT"),
        Err(ChargenError::SwapAlreadyUsed)
    );

    let mut player = sheet.apply().unwrap();
    assert!(player.is_player());
    assert_eq!(player.entity().name, "Grimwald");
    assert_eq!(player.entity.abilities.get(Ability::Strength), wil_before);
    assert_eq!(player.entity.abilities.get(Ability::Willpower), str_before);

    let equipment = player.entity.equipment();
    assert!(equipment.used_slots() <= player.entity.max_slots());
    assert!(equipment.validate().is_ok());

    player.entity.hp = 1;
    let healed = player.entity.rest(&mut engine);
    assert!(healed >= 1);
    assert!(player.entity.hp <= player.entity.hp_max);
}

/// Test: the sheet survives a JSON round trip, as the chargen command prints it
#[test]
fn test_sheet_json() {
    let mut engine = RollEngine::seeded(5);
    let sheet = CharacterSheet::generate(&mut engine).unwrap();
    let json = serde_json::to_string(&sheet).unwrap();
    let restored: CharacterSheet = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, sheet);
}

/// Test: a rolled two-handed weapon stays in hand when a shield is also rolled
#[test]
fn test_two_handed_weapon_with_shield() {
    // Name, three d6 per ability, traits, health, no armor, shield only,
    // battle axe, then gear
    let mut draws = vec![1];
    draws.extend([3; 18]);
    draws.extend([1; 11]);
    draws.extend([6, 1, 17, 13, 1, 1, 1, 1]);
    let mut engine = RollEngine::scripted(draws);

    let sheet = CharacterSheet::generate(&mut engine).unwrap();
    assert_eq!(sheet.weapon, "battle axe");
    assert!(sheet.shield && !sheet.helmet);
    assert_eq!(sheet.armor, None);

    let player = sheet.apply().unwrap();
    let equipment = player.entity.equipment();
    assert_eq!(equipment.current_weapon().name, "battle axe");
    assert!(equipment.slot(WieldLocation::ShieldHand).is_none());
    assert_eq!(
        equipment
            .backpack()
            .iter()
            .find(|item| item.name == "shield")
            .map(|item| item.slot),
        Some(WieldLocation::ShieldHand)
    );
    assert!(equipment.validate().is_ok());
}
