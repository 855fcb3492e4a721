//! QTE session state and round bookkeeping
//!
//! A session lives for exactly one jousting pass. It is created when the
//! match starts, driven by `tick`/`register_input`, and dropped when the
//! match ends or the player walks away - it is never persisted.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::*;

/// Difficulty parameters carried by the equipped lance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QteParams {
    /// Multiplier on the base indicator speed
    pub speed_modifier: f32,
    /// Width of the timing meter (px)
    pub meter_width: f32,
    /// Size of the button alphabet the round generator may arm (2-4)
    pub active_buttons: usize,
}

impl Default for QteParams {
    fn default() -> Self {
        Self {
            speed_modifier: 1.0,
            meter_width: 400.0,
            active_buttons: 2,
        }
    }
}

/// Attack stances the player can be prompted to strike with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JoustButton {
    High,
    Mid,
    Low,
    Feint,
}

impl JoustButton {
    /// Fixed ordering; a lance's `active_buttons` takes a prefix of this
    pub const ALL: [JoustButton; 4] = [
        JoustButton::High,
        JoustButton::Mid,
        JoustButton::Low,
        JoustButton::Feint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JoustButton::High => "high",
            JoustButton::Mid => "mid",
            JoustButton::Low => "low",
            JoustButton::Feint => "feint",
        }
    }

    /// Parse a host-side button id; ids come from loosely-validated input
    /// wiring, so unknown strings are simply `None`
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "high" => Some(JoustButton::High),
            "mid" => Some(JoustButton::Mid),
            "low" => Some(JoustButton::Low),
            "feint" => Some(JoustButton::Feint),
            _ => None,
        }
    }
}

/// Phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QtePhase {
    /// Created but not started
    Idle,
    /// A round is live and waiting for input
    Armed,
    /// Round resolved, waiting out the respawn delay
    Resolving,
    /// Duration elapsed; final score reported
    Finished,
}

/// How a single round resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HitJudgment {
    Perfect,
    Good,
    BadTiming,
    WrongButton,
}

impl HitJudgment {
    pub fn points(&self) -> u32 {
        match self {
            HitJudgment::Perfect => PERFECT_POINTS,
            HitJudgment::Good => GOOD_POINTS,
            HitJudgment::BadTiming | HitJudgment::WrongButton => 0,
        }
    }

    /// Banner text for the presentation layer
    pub fn label(&self) -> &'static str {
        match self {
            HitJudgment::Perfect => "PERFECT",
            HitJudgment::Good => "GOOD",
            HitJudgment::BadTiming => "BAD TIMING",
            HitJudgment::WrongButton => "WRONG BUTTON",
        }
    }
}

/// Events queued for the host, drained after each tick or input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QteEvent {
    /// A fresh round armed: show the target zone and the button prompt
    RoundArmed {
        target_center: f32,
        button: JoustButton,
    },
    /// A round resolved (hit or miss)
    Strike { judgment: HitJudgment, points: u32 },
    /// Session over; emitted exactly once per session
    Finished { final_score: u32 },
}

/// Live minigame session
#[derive(Debug, Clone)]
pub struct QteSession {
    pub(crate) params: QteParams,
    pub(crate) duration_ms: f64,
    pub(crate) elapsed_ms: f64,
    pub(crate) phase: QtePhase,
    /// Indicator center position along the meter
    pub(crate) indicator_pos: f32,
    /// Travel direction, +1 or -1
    pub(crate) direction: f32,
    /// Indicator travel per tick (px); reset every round so drift from
    /// mid-round parameter changes can't accumulate
    pub(crate) speed: f32,
    pub(crate) target_center: f32,
    pub(crate) armed_button: JoustButton,
    pub(crate) score: u32,
    /// Deadline (session clock, ms) for arming the next round
    pub(crate) respawn_at_ms: Option<f64>,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<QteEvent>,
}

impl QteSession {
    /// Create an idle session with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            params: QteParams::default(),
            duration_ms: 0.0,
            elapsed_ms: 0.0,
            phase: QtePhase::Idle,
            indicator_pos: INDICATOR_HALF_WIDTH,
            direction: 1.0,
            speed: BASE_INDICATOR_SPEED,
            target_center: 0.0,
            armed_button: JoustButton::High,
            score: 0,
            respawn_at_ms: None,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Begin a pass: reset the score, adopt the lance parameters and arm the
    /// first round. Silently ignored if a pass is already running.
    pub fn start(&mut self, duration_ms: f64, params: QteParams) {
        if self.is_active() {
            return;
        }
        self.params = QteParams {
            active_buttons: params.active_buttons.clamp(2, JoustButton::ALL.len()),
            ..params
        };
        self.duration_ms = duration_ms;
        self.elapsed_ms = 0.0;
        self.score = 0;
        self.indicator_pos = INDICATOR_HALF_WIDTH;
        self.direction = 1.0;
        self.events.clear();
        self.spawn_round();
    }

    /// Arm a fresh round: new target, new button, speed reset
    pub(crate) fn spawn_round(&mut self) {
        let buffer = 2.0 * TARGET_HALF_WIDTH;
        self.target_center = self
            .rng
            .random_range(buffer..=self.params.meter_width - buffer);
        let idx = self.rng.random_range(0..self.params.active_buttons);
        self.armed_button = JoustButton::ALL[idx];
        self.speed = BASE_INDICATOR_SPEED * self.params.speed_modifier;
        self.respawn_at_ms = None;
        self.phase = QtePhase::Armed;
        self.events.push(QteEvent::RoundArmed {
            target_center: self.target_center,
            button: self.armed_button,
        });
    }

    /// Abandon the pass (player left the match screen). Outstanding respawn
    /// deadlines die with it; nothing is scored or reported.
    pub fn abandon(&mut self) {
        self.phase = QtePhase::Idle;
        self.respawn_at_ms = None;
        self.events.clear();
    }

    /// Whether a pass is running (armed or between rounds)
    pub fn is_active(&self) -> bool {
        matches!(self.phase, QtePhase::Armed | QtePhase::Resolving)
    }

    pub fn phase(&self) -> QtePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn indicator_pos(&self) -> f32 {
        self.indicator_pos
    }

    pub fn target_center(&self) -> f32 {
        self.target_center
    }

    pub fn armed_button(&self) -> JoustButton {
        self.armed_button
    }

    pub fn meter_width(&self) -> f32 {
        self.params.meter_width
    }

    /// Take all queued events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<QteEvent> {
        std::mem::take(&mut self.events)
    }
}
