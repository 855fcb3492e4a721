//! Enemy and league catalog
//!
//! The scripted career opposition: three leagues of increasing difficulty,
//! each with an ordered lineup. Static data plus pure lookups; defeat
//! records live in the player profile.

use rand::Rng;

/// League every fresh profile starts with
pub const STARTER_LEAGUE_ID: &str = "rookie";

/// A career league: an ordered lineup gated by rank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct League {
    pub id: &'static str,
    pub name: &'static str,
    /// Member enemy ids, in fight order
    pub enemies: &'static [&'static str],
    /// Index into the rank tier table required to enter
    pub min_rank_index: usize,
}

/// A scripted opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    pub id: &'static str,
    pub name: &'static str,
    /// Difficulty tier, mirrors the league ordering
    pub tier: u8,
    pub skin_id: &'static str,
    pub lance_id: &'static str,
    /// Inclusive score range this opponent rolls in
    pub min_score: u32,
    pub max_score: u32,
    /// Currency paid out for defeating them
    pub base_reward: u32,
    pub league_id: &'static str,
}

impl Enemy {
    /// Roll this opponent's score for one match, uniform over the closed range
    pub fn roll_score<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.random_range(self.min_score..=self.max_score)
    }

    /// Payout for beating this opponent: 1.5x (floored) when the player
    /// outscored even the opponent's best possible roll
    pub fn reward_for(&self, player_score: u32) -> u32 {
        if player_score > self.max_score {
            self.base_reward + self.base_reward / 2
        } else {
            self.base_reward
        }
    }
}

pub const LEAGUES: &[League] = &[
    League {
        id: "rookie",
        name: "Rookie League",
        enemies: &["ewan", "barnaby", "shear_khan"],
        min_rank_index: 0,
    },
    League {
        id: "amateur",
        name: "Amateur League",
        enemies: &["woolhelm", "baroness", "ramston"],
        min_rank_index: 1,
    },
    League {
        id: "pro",
        name: "Pro League",
        enemies: &["sir_bleatsalot", "mutton_knight", "golden_ram"],
        min_rank_index: 2,
    },
];

pub const ENEMIES: &[Enemy] = &[
    Enemy {
        id: "ewan",
        name: "Ewan the Eager",
        tier: 1,
        skin_id: "classic_fleece",
        lance_id: "training_lance",
        min_score: 3,
        max_score: 10,
        base_reward: 30,
        league_id: "rookie",
    },
    Enemy {
        id: "barnaby",
        name: "Barnaby Bleats",
        tier: 1,
        skin_id: "classic_fleece",
        lance_id: "oak_lance",
        min_score: 5,
        max_score: 13,
        base_reward: 35,
        league_id: "rookie",
    },
    Enemy {
        id: "shear_khan",
        name: "Shear Khan",
        tier: 1,
        skin_id: "midnight_ram",
        lance_id: "oak_lance",
        min_score: 8,
        max_score: 16,
        base_reward: 45,
        league_id: "rookie",
    },
    Enemy {
        id: "woolhelm",
        name: "Woolhelm the Stout",
        tier: 2,
        skin_id: "iron_fleece",
        lance_id: "steel_lance",
        min_score: 12,
        max_score: 20,
        base_reward: 60,
        league_id: "amateur",
    },
    Enemy {
        id: "baroness",
        name: "The Baroness",
        tier: 2,
        skin_id: "royal_wool",
        lance_id: "steel_lance",
        min_score: 15,
        max_score: 24,
        base_reward: 70,
        league_id: "amateur",
    },
    Enemy {
        id: "ramston",
        name: "Ramston Ironhoof",
        tier: 2,
        skin_id: "iron_fleece",
        lance_id: "tournament_lance",
        min_score: 18,
        max_score: 28,
        base_reward: 80,
        league_id: "amateur",
    },
    Enemy {
        id: "sir_bleatsalot",
        name: "Sir Bleats-a-Lot",
        tier: 3,
        skin_id: "royal_wool",
        lance_id: "tournament_lance",
        min_score: 24,
        max_score: 34,
        base_reward: 100,
        league_id: "pro",
    },
    Enemy {
        id: "mutton_knight",
        name: "The Mutton Knight",
        tier: 3,
        skin_id: "midnight_ram",
        lance_id: "golden_lance",
        min_score: 28,
        max_score: 38,
        base_reward: 115,
        league_id: "pro",
    },
    Enemy {
        id: "golden_ram",
        name: "The Golden Ram",
        tier: 3,
        skin_id: "golden_fleece",
        lance_id: "golden_lance",
        min_score: 32,
        max_score: 45,
        base_reward: 140,
        league_id: "pro",
    },
];

/// Look up an enemy by id, falling back to the first rookie opponent
pub fn enemy(id: &str) -> &'static Enemy {
    ENEMIES.iter().find(|e| e.id == id).unwrap_or(&ENEMIES[0])
}

/// Look up a league by id, falling back to the starter league (first entry)
pub fn league(id: &str) -> &'static League {
    LEAGUES.iter().find(|l| l.id == id).unwrap_or(&LEAGUES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_roll_score_stays_in_range() {
        let mut rng = Pcg32::seed_from_u64(42);
        for e in ENEMIES {
            for _ in 0..200 {
                let score = e.roll_score(&mut rng);
                assert!(score >= e.min_score && score <= e.max_score, "{}", e.id);
            }
        }
    }

    #[test]
    fn test_roll_score_reaches_both_ends() {
        // Uniform over the closed range: both endpoints must be reachable
        let mut rng = Pcg32::seed_from_u64(7);
        let e = enemy("ewan");
        let rolls: Vec<u32> = (0..500).map(|_| e.roll_score(&mut rng)).collect();
        assert!(rolls.contains(&e.min_score));
        assert!(rolls.contains(&e.max_score));
    }

    #[test]
    fn test_league_membership_is_consistent() {
        for league in LEAGUES {
            for id in league.enemies {
                let e = enemy(id);
                assert_eq!(e.id, *id, "lineup references unknown enemy {id}");
                assert_eq!(e.league_id, league.id);
            }
        }
    }

    #[test]
    fn test_overshoot_reward() {
        let e = enemy("ewan");
        assert_eq!(e.reward_for(e.max_score), e.base_reward);
        assert_eq!(e.reward_for(e.max_score + 1), 45); // 30 * 1.5
        let odd = enemy("shear_khan");
        assert_eq!(odd.reward_for(100), 67); // floor(45 * 1.5)
    }

    #[test]
    fn test_unknown_enemy_falls_back() {
        assert_eq!(enemy("wolf_in_sheeps_clothing").id, "ewan");
        assert_eq!(league("galactic").id, STARTER_LEAGUE_ID);
    }
}
