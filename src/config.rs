use crate::game::tier::TierTable;
use crate::game::{Difficulty, GameOptions, MAX_OPPONENTS};
use crate::session::Pacing;
use anyhow::{bail, Context};
use std::time::Duration;

const DEFAULT_OPPONENTS: usize = 3;
const DEFAULT_PACE_MS: u64 = 600;

/// Settings for a play-through, read from the environment (and `.env`).
#[derive(Clone, Debug)]
pub struct Config {
    pub options: GameOptions,
    pub opponent_names: Vec<String>,
    /// Seed for the dice; random when unspecified.
    pub seed: Option<u64>,
    pub pace: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let difficulty = match lookup("DICE_DIFFICULTY") {
            Some(difficulty) => difficulty.parse::<Difficulty>().with_context(|| {
                format!("DICE_DIFFICULTY must be easy, normal or hard, got {difficulty:?}")
            })?,
            None => Difficulty::default(),
        };
        let mut options = GameOptions::with_difficulty(difficulty);

        if let Some(name) = lookup("DICE_PLAYER_NAME") {
            options.human_name = name.trim().to_string();
        }
        if let Some(tiers) = lookup("DICE_TIERS") {
            options.tiers = parse_tiers(&tiers)
                .with_context(|| format!("DICE_TIERS is not a valid ladder of dice: {tiers:?}"))?;
        }

        let opponents = match lookup("DICE_OPPONENTS") {
            Some(n) => n
                .trim()
                .parse::<usize>()
                .with_context(|| format!("DICE_OPPONENTS is not a number: {n:?}"))?,
            None => DEFAULT_OPPONENTS,
        };
        if !(1..=MAX_OPPONENTS).contains(&opponents) {
            bail!("DICE_OPPONENTS must be between 1 and {MAX_OPPONENTS}, got {opponents}");
        }

        let mut opponent_names = lookup("DICE_OPPONENT_NAMES")
            .map(|names| {
                names
                    .split(',')
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        opponent_names.truncate(opponents);
        for i in opponent_names.len()..opponents {
            opponent_names.push(format!("Computer {}", i + 1));
        }

        let seed = lookup("DICE_SEED")
            .map(|s| s.trim().parse::<u64>())
            .transpose()
            .context("DICE_SEED is not a number")?;

        let pace = lookup("DICE_PACE_MS")
            .map(|s| s.trim().parse::<u64>())
            .transpose()
            .context("DICE_PACE_MS is not a number")?
            .unwrap_or(DEFAULT_PACE_MS);

        Ok(Self {
            options,
            opponent_names,
            seed,
            pace: Duration::from_millis(pace),
        })
    }

    /// The delays between the steps of a round. A zero pace plays rounds instantly.
    pub fn pacing(&self) -> Pacing {
        if self.pace.is_zero() {
            Pacing::none()
        } else {
            Pacing::uniform(self.pace)
        }
    }
}

/// Parses a comma separated ladder such as `d4, d6, d8` or `4,6,8`.
fn parse_tiers(tiers: &str) -> anyhow::Result<TierTable> {
    let sides = tiers
        .split(',')
        .map(|t| {
            let t = t.trim();
            t.strip_prefix(['d', 'D']).unwrap_or(t).parse::<u32>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TierTable::new(sides)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.options.difficulty, Difficulty::Normal);
        assert_eq!(config.options.human_name, "You");
        assert_eq!(config.opponent_names, ["Computer 1", "Computer 2", "Computer 3"]);
        assert_eq!(config.seed, None);
        assert_eq!(config.pace, Duration::from_millis(600));
        assert_eq!(config.pacing(), Pacing::uniform(Duration::from_millis(600)));
        assert_eq!(config.options.tiers, TierTable::default());
    }

    #[test]
    fn reads_every_setting() {
        let config = config(&[
            ("DICE_PLAYER_NAME", "Robin"),
            ("DICE_DIFFICULTY", "Hard"),
            ("DICE_OPPONENTS", "2"),
            ("DICE_OPPONENT_NAMES", "Ann, Bea, Cid"),
            ("DICE_SEED", "42"),
            ("DICE_PACE_MS", "0"),
        ])
        .unwrap();
        assert_eq!(config.options.human_name, "Robin");
        assert_eq!(config.options.difficulty, Difficulty::Hard);
        assert_eq!(config.opponent_names, ["Ann", "Bea"]);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.pace, Duration::ZERO);
        assert_eq!(config.pacing(), Pacing::none());
    }

    #[test]
    fn reads_a_custom_ladder() {
        let small = config(&[("DICE_TIERS", "d2, d3, D6")]).unwrap();
        assert_eq!(small.options.tiers.tiers(), [2, 3, 6]);
        assert_eq!(small.options.tiers.terminal(), 6);

        let bare = config(&[("DICE_TIERS", "4,6,8")]).unwrap();
        assert_eq!(bare.options.tiers.lowest(), 4);
    }

    #[test]
    fn fills_missing_opponent_names() {
        let config = config(&[("DICE_OPPONENTS", "3"), ("DICE_OPPONENT_NAMES", "Ann")]).unwrap();
        assert_eq!(config.opponent_names, ["Ann", "Computer 2", "Computer 3"]);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config(&[("DICE_DIFFICULTY", "nightmare")]).is_err());
        assert!(config(&[("DICE_OPPONENTS", "0")]).is_err());
        assert!(config(&[("DICE_OPPONENTS", "8")]).is_err());
        assert!(config(&[("DICE_OPPONENTS", "many")]).is_err());
        assert!(config(&[("DICE_SEED", "-1")]).is_err());
        assert!(config(&[("DICE_TIERS", "")]).is_err());
        assert!(config(&[("DICE_TIERS", "d6, d4")]).is_err());
        assert!(config(&[("DICE_TIERS", "d4, d70000")]).is_err());
        assert!(config(&[("DICE_TIERS", "d4, dx")]).is_err());
    }
}
