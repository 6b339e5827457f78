use super::tier::TierTable;
use serde::{Deserialize, Serialize};

/// What a round winner does with the die they rolled.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Choice {
    /// Gain another die of the same size.
    Duplicate,
    /// Swap the die for the next size up.
    Upgrade,
}

impl ToString for Choice {
    fn to_string(&self) -> String {
        match self {
            Choice::Duplicate => "Duplicate",
            Choice::Upgrade => "Upgrade",
        }
        .to_string()
    }
}

/// The record of a winner's choice, for reporting to the players.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct AppliedChoice {
    pub player: usize,
    pub choice: Choice,
    /// The die that was rolled, before the choice was applied.
    pub die: u32,
    /// The die that was gained or upgraded into.
    pub result: u32,
}

/// The choices a winner holding `die` may make.
pub fn available_choices(tiers: &TierTable, die: u32) -> Vec<Choice> {
    if tiers.is_terminal(die) {
        vec![Choice::Duplicate]
    } else {
        vec![Choice::Upgrade, Choice::Duplicate]
    }
}

/// Computer players always climb the ladder, and only duplicate once they reach the top.
pub fn opponent_choice(tiers: &TierTable, die: u32) -> Choice {
    if tiers.is_terminal(die) {
        Choice::Duplicate
    } else {
        Choice::Upgrade
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponents_upgrade_until_terminal() {
        let tiers = TierTable::default();
        for die in [4, 6, 8, 10, 12, 20] {
            assert_eq!(opponent_choice(&tiers, die), Choice::Upgrade);
        }
        assert_eq!(opponent_choice(&tiers, 100), Choice::Duplicate);
    }

    #[test]
    fn upgrade_is_not_offered_at_terminal() {
        let tiers = TierTable::default();
        assert_eq!(available_choices(&tiers, 100), vec![Choice::Duplicate]);
        assert_eq!(
            available_choices(&tiers, 20),
            vec![Choice::Upgrade, Choice::Duplicate]
        );
    }
}
