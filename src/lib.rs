//! BaaLance - a sheep-jousting arcade game core
//!
//! Core modules:
//! - `qte`: Deterministic timing minigame (indicator, target zones, scoring)
//! - `progression`: Persistent player profile (currency, ranks, leagues, gear)
//! - `roster`: Static enemy/league catalog
//! - `gear`: Static lance/skin catalog and QTE difficulty parameters
//! - `resolve`: Match outcome resolution and rock-paper-scissors tie-break
//! - `settings`: Audio preferences (the only other durable state)
//! - `app`: Host boundary - tick/input intake and wasm exports

pub mod app;
pub mod gear;
pub mod progression;
pub mod qte;
pub mod resolve;
pub mod roster;
pub mod settings;

pub use progression::{ProgressionStore, RankInfo};
pub use qte::{QteEvent, QteParams, QteSession};
pub use resolve::{MatchOutcome, MatchSetup, MatchType};
pub use settings::AudioSettings;

/// Game configuration constants
pub mod consts {
    /// Indicator travel per tick before the lance speed modifier (px)
    pub const BASE_INDICATOR_SPEED: f32 = 2.0;
    /// Half-width of the indicator needle; travel range is inset by this (px)
    pub const INDICATOR_HALF_WIDTH: f32 = 4.0;

    /// Distance from target center that still counts as a perfect strike (px)
    pub const PERFECT_THRESHOLD: f32 = 10.0;
    /// Distance from target center that still counts as a hit at all (px)
    pub const HIT_THRESHOLD: f32 = 20.0;
    /// Half-width of the drawn target zone; spawn buffer is twice this (px)
    pub const TARGET_HALF_WIDTH: f32 = 20.0;

    /// Points for a perfect strike
    pub const PERFECT_POINTS: u32 = 3;
    /// Points for a good strike
    pub const GOOD_POINTS: u32 = 1;

    /// Pause between a round resolving and the next round arming (ms)
    pub const ROUND_RESPAWN_DELAY_MS: f64 = 400.0;
    /// Length of one jousting pass (ms)
    pub const MATCH_DURATION_MS: f64 = 30_000.0;

    /// Currency granted for winning a match
    pub const WIN_REWARD: u32 = 50;
    /// Consolation currency for losing a match
    pub const LOSS_REWARD: u32 = 20;
    /// Currency a fresh profile starts with
    pub const STARTING_CURRENCY: u32 = 100;
}
