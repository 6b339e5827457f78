use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// The standard polyhedral dice, smallest first.
pub const STANDARD_TIERS: [u32; 7] = [4, 6, 8, 10, 12, 20, 100];

/// The largest die a ladder may hold. A round rolls every face, so the total stays within `u32`.
pub const MAX_SIDES: u32 = 10_000;

/// The ordered ladder of die sizes a player climbs by upgrading.
///
/// Each tier is identified by its number of sides. The first entry is the
/// starting die, the last entry is the terminal ("best") die.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct TierTable {
    tiers: Vec<u32>,
}

impl TierTable {
    /// Creates a tier table, which must be non-empty and strictly increasing, with every die
    /// between 1 and [MAX_SIDES] sides.
    pub fn new(tiers: Vec<u32>) -> Result<Self, GameError> {
        let valid = !tiers.is_empty()
            && tiers[0] >= 1
            && tiers[tiers.len() - 1] <= MAX_SIDES
            && tiers.windows(2).all(|pair| pair[0] < pair[1]);
        if !valid {
            return Err(GameError::InvalidGameOptions);
        }
        Ok(Self { tiers })
    }

    /// The die every player starts with.
    pub fn lowest(&self) -> u32 {
        self.tiers[0]
    }

    /// The die that counts towards victory.
    pub fn terminal(&self) -> u32 {
        self.tiers[self.tiers.len() - 1]
    }

    pub fn is_terminal(&self, sides: u32) -> bool {
        sides == self.terminal()
    }

    pub fn contains(&self, sides: u32) -> bool {
        self.tiers.contains(&sides)
    }

    /// Gets the next die up the ladder, or `None` for the terminal die or an unknown die.
    pub fn successor(&self, sides: u32) -> Option<u32> {
        let idx = self.tiers.iter().position(|t| *t == sides)?;
        self.tiers.get(idx + 1).copied()
    }

    pub fn tiers(&self) -> &[u32] {
        &self.tiers
    }
}

impl TryFrom<Vec<u32>> for TierTable {
    type Error = GameError;

    fn try_from(tiers: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<TierTable> for Vec<u32> {
    fn from(table: TierTable) -> Self {
        table.tiers
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            tiers: STANDARD_TIERS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::dice::DiceSource;
    use crate::game::player::Player;

    #[test]
    fn standard_ladder() {
        let table = TierTable::default();
        assert_eq!(table.lowest(), 4);
        assert_eq!(table.terminal(), 100);
        assert_eq!(table.successor(4), Some(6));
        assert_eq!(table.successor(12), Some(20));
        assert_eq!(table.successor(20), Some(100));
        assert_eq!(table.successor(100), None);
        assert_eq!(table.successor(7), None);
        assert!(table.is_terminal(100));
        assert!(!table.is_terminal(20));
    }

    #[test]
    fn rejects_bad_ladders() {
        assert_eq!(TierTable::new(vec![]), Err(GameError::InvalidGameOptions));
        assert_eq!(TierTable::new(vec![6, 4]), Err(GameError::InvalidGameOptions));
        assert_eq!(TierTable::new(vec![4, 4, 6]), Err(GameError::InvalidGameOptions));
        assert_eq!(TierTable::new(vec![0, 2]), Err(GameError::InvalidGameOptions));
        assert!(TierTable::new(vec![2]).is_ok());
    }

    #[test]
    fn rejects_dice_too_large_to_total() {
        assert_eq!(
            TierTable::new(vec![4, 70_000]),
            Err(GameError::InvalidGameOptions)
        );
        assert_eq!(
            TierTable::new(vec![4, MAX_SIDES + 1]),
            Err(GameError::InvalidGameOptions)
        );
        assert!(TierTable::new(vec![4, MAX_SIDES]).is_ok());
    }

    #[test]
    fn largest_die_totals_without_overflow() {
        let tiers = TierTable::new(vec![4, MAX_SIDES]).unwrap();
        let mut player = Player::new("Ann".to_string(), false, tiers.lowest());
        player.dice = vec![tiers.terminal()];
        player.chosen_die = tiers.terminal();

        let mut dice = MaxFaces;
        assert_eq!(player.roll_for_round(&mut dice), Ok(MAX_SIDES * MAX_SIDES));
        assert_eq!(player.round_rolls.len(), MAX_SIDES as usize);
    }

    #[test]
    fn deserializing_validates_the_ladder() {
        let table: TierTable = serde_json::from_str("[4, 8, 20]").unwrap();
        assert_eq!(table.tiers(), [4, 8, 20]);
        assert_eq!(serde_json::to_value(&table).unwrap(), serde_json::json!([4, 8, 20]));

        assert!(serde_json::from_str::<TierTable>("[]").is_err());
        assert!(serde_json::from_str::<TierTable>("[8, 4]").is_err());
        assert!(serde_json::from_str::<TierTable>("[4, 70000]").is_err());
    }

    struct MaxFaces;

    impl DiceSource for MaxFaces {
        fn roll(&mut self, sides: u32) -> u32 {
            sides
        }

        fn pick(&mut self, _len: usize) -> usize {
            0
        }
    }
}
