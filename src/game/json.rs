use super::outcome::WinState;
use super::round::RoundOutcome;
use super::Game;
use serde_json::{json, Value};

impl<R> Game<R> {
    pub fn get_board_json(&self) -> Value {
        json!({
            "round": self.round,
            "players": self.get_players_json(),
            "state": self.state,
            "pool": self.pool,
            "target": self.opts.target(),
            "tiers": self.opts.tiers.tiers(),
            "lastRound": self.last_round.as_ref().map(|r| self.get_round_json(r)),
        })
    }

    pub fn get_round_json(&self, outcome: &RoundOutcome) -> Value {
        let name = |idx: usize| self.players[idx].name.clone();
        json!({
            "round": outcome.round,
            "winner": name(outcome.winner),
            "tieBreak": outcome.tie_break,
            "rolls": outcome.rolls.iter().map(|r| json!({
                "name": name(r.player),
                "die": r.die,
                "rolls": r.rolls,
                "score": r.score
            })).collect::<Value>(),
            "losses": outcome.losses.iter().map(|l| json!({
                "name": name(l.player),
                "lost": l.lost,
                "eliminated": l.eliminated
            })).collect::<Value>(),
            "autoChoice": outcome.auto_choice.map(|c| json!({
                "name": name(c.player),
                "choice": c.choice,
                "die": c.die,
                "result": c.result
            })),
        })
    }

    pub fn get_outcome_json(&self) -> Value {
        match self.evaluate_win() {
            WinState::Continue => Value::Null,
            WinState::Winner { player, condition } => json!({
                "winner": self.players[player].name,
                "condition": condition.to_string(),
                "rounds": self.round
            }),
            WinState::NoWinner => json!({
                "winner": Value::Null,
                "rounds": self.round
            }),
        }
    }

    fn get_players_json(&self) -> Value {
        let terminal = self.opts.tiers.terminal();
        self.players
            .iter()
            .map(|player| {
                json!({
                    "name": player.name,
                    "isHuman": player.is_human,
                    "dice": player.dice,
                    "isProtected": player.is_protected(),
                    "isEliminated": player.eliminated,
                    "chosenDie": player.is_active().then_some(player.chosen_die),
                    "terminalDice": player.count_of(terminal)
                })
            })
            .collect()
    }
}
