//! Deterministic jousting minigame
//!
//! The quick-time-event core: an indicator oscillates across a meter, the
//! player tries to strike inside a randomly placed target zone with the
//! round's armed button. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Advanced solely by host-supplied clock ticks and discrete inputs
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{HitJudgment, JoustButton, QteEvent, QteParams, QtePhase, QteSession};
pub use tick::{register_input, tick};
