//! Applying duplicate and upgrade choices

use super::test_utils::*;
use crate::error::GameError;
use crate::game::choice::Choice;
use crate::game::player::Player;
use crate::game::tier::TierTable;

#[test]
fn duplicate_adds_one_copy_of_the_chosen_die() {
    let tiers = TierTable::default();
    let mut player = player_with("Ann", &[8, 4], false);
    player.select_die(4).unwrap();

    assert_eq!(player.apply_choice(Choice::Duplicate, &tiers), Ok(4));
    assert_eq!(player.dice, [8, 4, 4]);
    assert!(player.made_first_choice);
}

#[test]
fn upgrade_replaces_exactly_one_entry() {
    let tiers = TierTable::default();
    let mut player = player_with("Ann", &[6, 6, 4], true);
    player.select_die(6).unwrap();

    assert_eq!(player.apply_choice(Choice::Upgrade, &tiers), Ok(6));
    assert_eq!(player.dice, [8, 6, 4]);
}

#[test]
fn dice_are_resorted_after_a_choice() {
    let tiers = TierTable::default();
    let mut player = player_with("Ann", &[10, 4], true);
    player.select_die(4).unwrap();
    player.apply_choice(Choice::Upgrade, &tiers).unwrap();
    assert_eq!(player.dice, [10, 6]);

    player.select_die(6).unwrap();
    player.apply_choice(Choice::Duplicate, &tiers).unwrap();
    assert_eq!(player.dice, [10, 6, 6]);

    player.select_die(10).unwrap();
    player.apply_choice(Choice::Duplicate, &tiers).unwrap();
    assert_eq!(player.dice, [10, 10, 6, 6]);
}

#[test]
fn upgrade_at_terminal_tier_is_rejected() {
    let tiers = TierTable::default();
    let mut player = player_with("Ann", &[100, 4], false);
    player.select_die(100).unwrap();

    assert_eq!(
        player.apply_choice(Choice::Upgrade, &tiers),
        Err(GameError::InvalidChoicePhase)
    );
    assert_eq!(player.dice, [100, 4]);
    assert!(player.is_protected());

    assert_eq!(player.apply_choice(Choice::Duplicate, &tiers), Ok(100));
    assert_eq!(player.dice, [100, 100, 4]);
}

#[test]
fn any_choice_ends_protection() {
    let tiers = TierTable::default();
    let mut player = Player::new("Ann".to_string(), true, 4);
    player.apply_choice(Choice::Duplicate, &tiers).unwrap();
    assert!(!player.is_protected());
    assert_eq!(player.dice, [4, 4]);

    let mut dice = ScriptedDice::new().picks([0]);
    assert_eq!(player.lose_random_die(4, &mut dice), Some(4));
    assert_eq!(player.dice, [4]);
    assert_eq!(player.lose_random_die(4, &mut dice), None);
    assert!(!player.eliminated);
}

#[test]
fn climbing_the_whole_ladder() {
    let tiers = TierTable::default();
    let mut player = Player::new("Ann".to_string(), true, 4);
    let mut seen = vec![];
    while !tiers.is_terminal(player.chosen_die) {
        player.apply_choice(Choice::Upgrade, &tiers).unwrap();
        player.chosen_die = player.dice[0];
        seen.push(player.chosen_die);
        assert_eq!(player.dice.len(), 1);
    }
    assert_eq!(seen, [6, 8, 10, 12, 20, 100]);
}

#[test]
fn custom_ladders_are_respected() {
    let tiers = TierTable::new(vec![2, 3, 5]).unwrap();
    let mut player = Player::new("Ann".to_string(), true, 2);
    player.apply_choice(Choice::Upgrade, &tiers).unwrap();
    assert_eq!(player.dice, [3]);
    player.chosen_die = 3;
    player.apply_choice(Choice::Upgrade, &tiers).unwrap();
    assert_eq!(player.dice, [5]);
    player.chosen_die = 5;
    assert_eq!(
        player.apply_choice(Choice::Upgrade, &tiers),
        Err(GameError::InvalidChoicePhase)
    );
}
