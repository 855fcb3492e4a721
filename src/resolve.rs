//! Match outcome resolution
//!
//! Compares the player's finished pass against the opponent's rolled score,
//! breaks ties with a rock-paper-scissors throw-off, and writes the decided
//! result back into the progression store.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::progression::ProgressionStore;
use crate::roster;

/// Primary comparison of the two scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchOutcome {
    Win,
    Loss,
    /// Needs the throw-off before a final result is known
    Tie,
}

/// Compare scores. A missing opponent score is treated as 0 by the caller.
pub fn resolve(player_score: u32, opponent_score: u32) -> MatchOutcome {
    match player_score.cmp(&opponent_score) {
        std::cmp::Ordering::Greater => MatchOutcome::Win,
        std::cmp::Ordering::Less => MatchOutcome::Loss,
        std::cmp::Ordering::Equal => MatchOutcome::Tie,
    }
}

/// A throw in the tie-break
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpsChoice {
    Rock,
    Paper,
    Scissors,
}

impl RpsChoice {
    pub const ALL: [RpsChoice; 3] = [RpsChoice::Rock, RpsChoice::Paper, RpsChoice::Scissors];

    /// Standard beats-relation: rock > scissors > paper > rock
    pub fn beats(&self, other: RpsChoice) -> bool {
        matches!(
            (self, other),
            (RpsChoice::Rock, RpsChoice::Scissors)
                | (RpsChoice::Scissors, RpsChoice::Paper)
                | (RpsChoice::Paper, RpsChoice::Rock)
        )
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "rock" => Some(RpsChoice::Rock),
            "paper" => Some(RpsChoice::Paper),
            "scissors" => Some(RpsChoice::Scissors),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RpsChoice::Rock => "rock",
            RpsChoice::Paper => "paper",
            RpsChoice::Scissors => "scissors",
        }
    }
}

/// One round of the throw-off. `decision` is `None` when both sides threw
/// the same and the round must repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RpsRound {
    pub player: RpsChoice,
    pub cpu: RpsChoice,
    /// `Some(true)` player won, `Some(false)` player lost
    pub decision: Option<bool>,
}

/// Play one throw-off round against a uniform random cpu choice
pub fn rps_round<R: Rng>(player: RpsChoice, rng: &mut R) -> RpsRound {
    let cpu = RpsChoice::ALL[rng.random_range(0..RpsChoice::ALL.len())];
    let decision = if cpu == player {
        None
    } else {
        Some(player.beats(cpu))
    };
    RpsRound { player, cpu, decision }
}

/// How a match was set up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    /// One-off bout against a rolled opponent
    Quick,
    /// Career bout against a league opponent
    Career,
    /// Debug bout; opponent score comes straight from the handoff
    Debug,
}

/// Cross-screen handoff describing the bout about to run. The core does not
/// own the transport; it only consumes these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSetup {
    pub match_type: MatchType,
    /// Opponent score rolled before the pass; missing means 0
    #[serde(default)]
    pub opponent_score: Option<u32>,
    #[serde(default)]
    pub opponent_id: Option<String>,
    pub player_skin_id: String,
    pub opponent_skin_id: String,
    pub opponent_lance_id: String,
}

impl MatchSetup {
    /// The score to beat; an absent roll counts as 0
    pub fn effective_opponent_score(&self) -> u32 {
        self.opponent_score.unwrap_or(0)
    }
}

/// Commit a decided match: generic stats always, career bookkeeping (defeat
/// counter, overshoot-adjusted payout) only for career bouts, then refresh
/// league access in case the new win count crossed a rank threshold.
pub fn settle(store: &mut ProgressionStore, setup: &MatchSetup, player_score: u32, won: bool) {
    store.record_match_result(player_score, won);

    if setup.match_type == MatchType::Career {
        if let Some(enemy_id) = &setup.opponent_id {
            let enemy = roster::enemy(enemy_id);
            store.record_career_defeat(enemy.id, won, enemy.reward_for(player_score));
        }
    }

    store.refresh_league_access();
}
