//! Player profile and progression rules
//!
//! The single authoritative copy of everything the player has earned:
//! currency, match stats, gear, career record, league access. Persisted to
//! LocalStorage as one JSON document; a corrupt or missing document falls
//! back to a fresh profile rather than ever blocking gameplay.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::gear::{LANCES, SKINS, STARTER_LANCE_ID, STARTER_SKIN_ID};
use crate::roster::{self, LEAGUES, STARTER_LEAGUE_ID};

/// One rung of the rank ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankTier {
    pub name: &'static str,
    /// Banner color for the profile screen
    pub color: &'static str,
    pub min_wins: u32,
}

/// Rank ladder, ordered by wins required
pub const RANK_TIERS: &[RankTier] = &[
    RankTier { name: "Novice", color: "#b0bec5", min_wins: 0 },
    RankTier { name: "Squire", color: "#8d6e63", min_wins: 3 },
    RankTier { name: "Knight", color: "#90caf9", min_wins: 7 },
    RankTier { name: "Veteran", color: "#ce93d8", min_wins: 12 },
    RankTier { name: "Champion", color: "#ffb74d", min_wins: 18 },
    RankTier { name: "Master", color: "#ef5350", min_wins: 25 },
    RankTier { name: "Legendary", color: "#ffd54f", min_wins: 35 },
];

/// Derived rank view for the profile screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankInfo {
    pub name: &'static str,
    pub color: &'static str,
    pub wins: u32,
    /// Floored percent toward the next tier; 100 at the top of the ladder
    pub progress_percent: u32,
    pub next_rank_name: Option<&'static str>,
    pub wins_to_next: u32,
}

/// Match result parked for the results screen; consumed exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMatch {
    pub score: u32,
    pub won: bool,
}

/// Which shop shelf an item sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Skin,
    Lance,
}

/// Shop failures the host must be able to tell apart
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShopError {
    #[error("insufficient funds: costs {price}, have {currency}")]
    InsufficientFunds { price: u32, currency: u32 },
}

/// One shop row: catalog data joined with the profile's ownership record.
/// Derived on demand; the profile stays the only mutable copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopListing {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u32,
    pub owned: bool,
    pub equipped: bool,
}

/// Lifetime match statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub wins: u32,
    pub losses: u32,
    pub highest_score: u32,
}

/// The persisted profile document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub currency: u32,
    #[serde(default)]
    pub stats: MatchStats,
    pub current_lance_id: String,
    pub owned_lance_ids: Vec<String>,
    pub current_skin_id: String,
    pub owned_skin_ids: Vec<String>,
    /// Per-enemy career win counts
    #[serde(default)]
    pub defeated_enemies: BTreeMap<String, u32>,
    pub current_league_id: String,
    #[serde(default)]
    pub league_win_tally: u32,
    pub unlocked_league_ids: Vec<String>,
    #[serde(default)]
    pub pending_match_result: Option<PendingMatch>,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            currency: STARTING_CURRENCY,
            stats: MatchStats::default(),
            current_lance_id: STARTER_LANCE_ID.to_string(),
            owned_lance_ids: vec![STARTER_LANCE_ID.to_string()],
            current_skin_id: STARTER_SKIN_ID.to_string(),
            owned_skin_ids: vec![STARTER_SKIN_ID.to_string()],
            defeated_enemies: BTreeMap::new(),
            current_league_id: STARTER_LEAGUE_ID.to_string(),
            league_win_tally: 0,
            unlocked_league_ids: vec![STARTER_LEAGUE_ID.to_string()],
            pending_match_result: None,
        }
    }
}

impl PlayerProfile {
    /// Repair invariants after deserializing data we don't fully trust:
    /// starters stay owned, equipped ids stay inside the owned sets, and the
    /// starter league stays unlocked.
    fn sanitize(&mut self) {
        push_unique(&mut self.owned_lance_ids, STARTER_LANCE_ID);
        push_unique(&mut self.owned_skin_ids, STARTER_SKIN_ID);
        push_unique(&mut self.unlocked_league_ids, STARTER_LEAGUE_ID);

        if !self.owned_lance_ids.contains(&self.current_lance_id) {
            log::warn!(
                "equipped lance '{}' not owned, reverting to starter",
                self.current_lance_id
            );
            self.current_lance_id = STARTER_LANCE_ID.to_string();
        }
        if !self.owned_skin_ids.contains(&self.current_skin_id) {
            log::warn!(
                "equipped skin '{}' not owned, reverting to starter",
                self.current_skin_id
            );
            self.current_skin_id = STARTER_SKIN_ID.to_string();
        }
        if !self.unlocked_league_ids.contains(&self.current_league_id) {
            self.current_league_id = STARTER_LEAGUE_ID.to_string();
        }
    }
}

fn push_unique(ids: &mut Vec<String>, id: &str) {
    if !ids.iter().any(|i| i == id) {
        ids.push(id.to_string());
    }
}

/// Owner of the profile. Constructed explicitly and passed down to whatever
/// needs it; commits a snapshot to storage after every committing mutation.
#[derive(Debug, Clone, Default)]
pub struct ProgressionStore {
    profile: PlayerProfile,
}

impl ProgressionStore {
    /// Fresh store with a brand-new profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing profile (repairs invariants first)
    pub fn from_profile(mut profile: PlayerProfile) -> Self {
        profile.sanitize();
        Self { profile }
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn currency(&self) -> u32 {
        self.profile.currency
    }

    // === Match results ===

    /// Record a finished match: stats, flat currency reward, and the pending
    /// result for the results screen (last write wins, at most one
    /// outstanding).
    pub fn record_match_result(&mut self, score: u32, won: bool) {
        if won {
            self.profile.stats.wins += 1;
            self.profile.currency += WIN_REWARD;
        } else {
            self.profile.stats.losses += 1;
            self.profile.currency += LOSS_REWARD;
        }
        self.profile.stats.highest_score = self.profile.stats.highest_score.max(score);
        self.profile.pending_match_result = Some(PendingMatch { score, won });
        self.save();
    }

    /// Take the parked match result; `None` once consumed
    pub fn consume_pending_match_result(&mut self) -> Option<PendingMatch> {
        let result = self.profile.pending_match_result.take();
        if result.is_some() {
            self.save();
        }
        result
    }

    // === Rank ===

    /// Current rank: the highest tier whose threshold the win count clears
    pub fn rank(&self) -> RankInfo {
        let wins = self.profile.stats.wins;
        let idx = RANK_TIERS
            .iter()
            .rposition(|t| t.min_wins <= wins)
            .unwrap_or(0);
        let tier = &RANK_TIERS[idx];
        let next = RANK_TIERS.get(idx + 1);

        let (progress_percent, wins_to_next) = match next {
            Some(next) => {
                let span = next.min_wins - tier.min_wins;
                let into = wins - tier.min_wins;
                (into * 100 / span, next.min_wins - wins)
            }
            None => (100, 0),
        };

        RankInfo {
            name: tier.name,
            color: tier.color,
            wins,
            progress_percent,
            next_rank_name: next.map(|t| t.name),
            wins_to_next,
        }
    }

    fn rank_index(&self) -> usize {
        RANK_TIERS
            .iter()
            .rposition(|t| t.min_wins <= self.profile.stats.wins)
            .unwrap_or(0)
    }

    // === Leagues ===

    /// Union the leagues the current rank grants into the unlocked set.
    /// Access is never revoked, even if the grant table changes.
    pub fn refresh_league_access(&mut self) {
        // Novice sees the first league, Squire the first two, Knight and up
        // see all of them
        let granted = (self.rank_index() + 1).min(LEAGUES.len());
        let mut changed = false;
        for league in &LEAGUES[..granted] {
            if !self.profile.unlocked_league_ids.iter().any(|i| i == league.id) {
                self.profile.unlocked_league_ids.push(league.id.to_string());
                log::info!("league unlocked: {}", league.id);
                changed = true;
            }
        }
        if changed {
            self.save();
        }
    }

    pub fn is_league_unlocked(&self, league_id: &str) -> bool {
        self.profile.unlocked_league_ids.iter().any(|i| i == league_id)
    }

    /// Switch the active career league; ignored unless unlocked
    pub fn set_current_league(&mut self, league_id: &str) -> bool {
        if !self.is_league_unlocked(league_id) {
            return false;
        }
        self.profile.current_league_id = league_id.to_string();
        self.save();
        true
    }

    // === Career ===

    /// Record a career bout. A win bumps the defeat counter and the league
    /// tally and pays the reward; a loss leaves the career record untouched
    /// (only the generic match stats move).
    pub fn record_career_defeat(&mut self, enemy_id: &str, won: bool, money_reward: u32) {
        if !won {
            return;
        }
        *self
            .profile
            .defeated_enemies
            .entry(enemy_id.to_string())
            .or_insert(0) += 1;
        self.profile.league_win_tally += 1;
        self.profile.currency += money_reward;
        self.save();
    }

    /// Career wins against one opponent
    pub fn defeat_count(&self, enemy_id: &str) -> u32 {
        self.profile
            .defeated_enemies
            .get(enemy_id)
            .copied()
            .unwrap_or(0)
    }

    /// Defeat counts for a league's lineup, in fight order
    pub fn league_lineup_progress(&self, league_id: &str) -> Vec<(&'static str, u32)> {
        roster::league(league_id)
            .enemies
            .iter()
            .map(|id| (*id, self.defeat_count(id)))
            .collect()
    }

    // === Shop ===

    /// Buy an item. Hard rejection when funds are short - the balance is
    /// never touched on failure. Buying does not equip.
    pub fn purchase(&mut self, item_id: &str, price: u32, kind: ItemKind) -> Result<(), ShopError> {
        if self.profile.currency < price {
            return Err(ShopError::InsufficientFunds {
                price,
                currency: self.profile.currency,
            });
        }
        self.profile.currency -= price;
        push_unique(self.owned_mut(kind), item_id);
        self.save();
        Ok(())
    }

    /// Equip an owned item; unknown or unowned ids are ignored
    pub fn equip(&mut self, item_id: &str, kind: ItemKind) {
        if !self.owns(item_id, kind) {
            log::debug!("equip ignored, '{item_id}' not owned");
            return;
        }
        match kind {
            ItemKind::Skin => self.profile.current_skin_id = item_id.to_string(),
            ItemKind::Lance => self.profile.current_lance_id = item_id.to_string(),
        }
        self.save();
    }

    /// Debug path: grant an item without charging
    pub fn unlock_item(&mut self, item_id: &str, kind: ItemKind) {
        push_unique(self.owned_mut(kind), item_id);
        self.save();
    }

    pub fn owns(&self, item_id: &str, kind: ItemKind) -> bool {
        let owned = match kind {
            ItemKind::Skin => &self.profile.owned_skin_ids,
            ItemKind::Lance => &self.profile.owned_lance_ids,
        };
        owned.iter().any(|i| i == item_id)
    }

    fn owned_mut(&mut self, kind: ItemKind) -> &mut Vec<String> {
        match kind {
            ItemKind::Skin => &mut self.profile.owned_skin_ids,
            ItemKind::Lance => &mut self.profile.owned_lance_ids,
        }
    }

    /// Lance shelf joined with ownership, in catalog order
    pub fn lance_listings(&self) -> Vec<ShopListing> {
        LANCES
            .iter()
            .map(|l| ShopListing {
                id: l.id,
                name: l.name,
                price: l.price,
                owned: self.owns(l.id, ItemKind::Lance),
                equipped: self.profile.current_lance_id == l.id,
            })
            .collect()
    }

    /// Skin shelf joined with ownership, in catalog order
    pub fn skin_listings(&self) -> Vec<ShopListing> {
        SKINS
            .iter()
            .map(|s| ShopListing {
                id: s.id,
                name: s.name,
                price: s.price,
                owned: self.owns(s.id, ItemKind::Skin),
                equipped: self.profile.current_skin_id == s.id,
            })
            .collect()
    }

    // === Persistence ===

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "baalance_profile";

    /// Load the profile from LocalStorage (WASM only). Corrupt or missing
    /// documents fall back to a fresh profile.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<PlayerProfile>(&json) {
                    Ok(profile) => {
                        log::info!("Loaded profile from LocalStorage");
                        return Self::from_profile(profile);
                    }
                    Err(err) => {
                        log::warn!("Profile corrupt ({err}), starting fresh");
                    }
                }
            }
        }

        log::info!("Using fresh profile");
        Self::new()
    }

    /// Snapshot the profile to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(&self.profile) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
