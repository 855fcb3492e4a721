//! Host boundary
//!
//! Owns the progression store, the live QTE session and the cross-screen
//! match handoff, and turns host ticks and button presses into core calls.
//! The wasm exports at the bottom are a thin shell over [`Game`]; native
//! builds drive [`Game`] directly in tests.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::gear;
use crate::progression::{ItemKind, ProgressionStore};
use crate::qte::{self, JoustButton, QteEvent, QteSession};
use crate::resolve::{self, MatchOutcome, MatchSetup, MatchType, RpsChoice, RpsRound};
use crate::roster;
use crate::settings::AudioSettings;

/// Game instance holding all state the host needs between frames
pub struct Game {
    store: ProgressionStore,
    settings: AudioSettings,
    /// Rolls opponent scores and tie-break throws
    rng: Pcg32,
    session: QteSession,
    /// Handoff for the bout in flight; taken when the bout settles
    setup: Option<MatchSetup>,
    /// Scores frozen at session end, awaiting the throw-off
    tie: Option<(u32, u32)>,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self {
            store: ProgressionStore::load(),
            settings: AudioSettings::load(),
            rng: Pcg32::seed_from_u64(seed),
            session: QteSession::new(seed.wrapping_add(1)),
            setup: None,
            tie: None,
        }
    }

    /// Begin the bout described by the handoff. Ignored while a pass is
    /// already running. Non-debug setups without a pre-rolled opponent score
    /// roll one here from the opponent's catalog range.
    pub fn start_match(&mut self, mut setup: MatchSetup) {
        if self.session.is_active() {
            return;
        }
        self.tie = None;

        if setup.opponent_score.is_none() && setup.match_type != MatchType::Debug {
            let enemy = roster::enemy(setup.opponent_id.as_deref().unwrap_or(""));
            setup.opponent_score = Some(enemy.roll_score(&mut self.rng));
        }

        let lance = gear::lance(&self.store.profile().current_lance_id);
        self.session.start(MATCH_DURATION_MS, lance.qte_params());
        self.setup = Some(setup);
    }

    /// Convenience for career mode: build the handoff from the catalogs and
    /// the equipped skin
    pub fn start_career_match(&mut self, enemy_id: &str) {
        let enemy = roster::enemy(enemy_id);
        let setup = MatchSetup {
            match_type: MatchType::Career,
            opponent_score: None,
            opponent_id: Some(enemy.id.to_string()),
            player_skin_id: self.store.profile().current_skin_id.clone(),
            opponent_skin_id: enemy.skin_id.to_string(),
            opponent_lance_id: enemy.lance_id.to_string(),
        };
        self.start_match(setup);
    }

    /// Advance one frame and return the events the host should present.
    /// When the pass finishes, the result is resolved here: decisive
    /// outcomes settle into the store immediately, ties park until the
    /// throw-off.
    pub fn tick(&mut self, elapsed_ms: f64, delta_ms: f64) -> Vec<QteEvent> {
        qte::tick(&mut self.session, elapsed_ms, delta_ms);
        let events = self.session.drain_events();
        for event in &events {
            if let QteEvent::Finished { final_score } = event {
                self.finish_pass(*final_score);
            }
        }
        events
    }

    /// Forward a discrete button press to the live round
    pub fn press(&mut self, button: JoustButton) {
        qte::register_input(&mut self.session, button);
    }

    /// Play one tie-break round. `None` when no tie is pending. A decisive
    /// round settles the bout with the frozen scores; an equal throw leaves
    /// the tie pending for another try.
    pub fn throw_tiebreak(&mut self, choice: RpsChoice) -> Option<RpsRound> {
        let (player_score, _) = self.tie?;
        let round = resolve::rps_round(choice, &mut self.rng);
        if let Some(won) = round.decision {
            if let Some(setup) = self.setup.take() {
                resolve::settle(&mut self.store, &setup, player_score, won);
            }
            self.tie = None;
        }
        Some(round)
    }

    /// Walk away from the bout: nothing is scored, no result is parked, and
    /// any scheduled round respawn dies with the session
    pub fn abandon_match(&mut self) {
        self.session.abandon();
        self.setup = None;
        self.tie = None;
    }

    fn finish_pass(&mut self, final_score: u32) {
        let Some(setup) = self.setup.take() else {
            return;
        };
        let opponent_score = setup.effective_opponent_score();
        match resolve::resolve(final_score, opponent_score) {
            MatchOutcome::Win => resolve::settle(&mut self.store, &setup, final_score, true),
            MatchOutcome::Loss => resolve::settle(&mut self.store, &setup, final_score, false),
            MatchOutcome::Tie => {
                self.tie = Some((final_score, opponent_score));
                self.setup = Some(setup);
            }
        }
    }

    /// Scores on display during the throw-off, `(player, opponent)`
    pub fn tie_scores(&self) -> Option<(u32, u32)> {
        self.tie
    }

    pub fn session(&self) -> &QteSession {
        &self.session
    }

    pub fn store(&self) -> &ProgressionStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProgressionStore {
        &mut self.store
    }

    pub fn audio(&self) -> &AudioSettings {
        &self.settings
    }

    /// Replace the audio preferences (clamped) and persist them
    pub fn set_audio(&mut self, settings: AudioSettings) {
        self.settings = settings.clamped();
        self.settings.save();
    }

    /// Buy a catalog item at its listed price
    pub fn buy(&mut self, item_id: &str, kind: ItemKind) -> bool {
        let price = match kind {
            ItemKind::Lance => gear::lance(item_id).price,
            ItemKind::Skin => gear::skin(item_id).price,
        };
        match self.store.purchase(item_id, price, kind) {
            Ok(()) => true,
            Err(err) => {
                log::info!("purchase of '{item_id}' rejected: {err}");
                false
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use super::Game;
    use crate::progression::ItemKind;
    use crate::qte::JoustButton;
    use crate::resolve::{MatchSetup, MatchType, RpsChoice};

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }

    /// JS-facing shell over [`Game`]; structured values cross as JSON
    #[wasm_bindgen]
    pub struct BaaLance {
        inner: Game,
    }

    #[wasm_bindgen]
    impl BaaLance {
        #[wasm_bindgen(constructor)]
        pub fn new() -> BaaLance {
            let seed = js_sys::Date::now() as u64;
            BaaLance {
                inner: Game::new(seed),
            }
        }

        pub fn start_career_match(&mut self, enemy_id: &str) {
            self.inner.start_career_match(enemy_id);
        }

        pub fn start_quick_match(&mut self, opponent_id: &str) {
            let profile = self.inner.store().profile();
            let enemy = crate::roster::enemy(opponent_id);
            let setup = MatchSetup {
                match_type: MatchType::Quick,
                opponent_score: None,
                opponent_id: Some(enemy.id.to_string()),
                player_skin_id: profile.current_skin_id.clone(),
                opponent_skin_id: enemy.skin_id.to_string(),
                opponent_lance_id: enemy.lance_id.to_string(),
            };
            self.inner.start_match(setup);
        }

        pub fn abandon_match(&mut self) {
            self.inner.abandon_match();
        }

        /// Advance one frame; returns the queued events as a JSON array
        pub fn tick(&mut self, elapsed_ms: f64, delta_ms: f64) -> String {
            let events = self.inner.tick(elapsed_ms, delta_ms);
            serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
        }

        pub fn press(&mut self, button_id: &str) {
            if let Some(button) = JoustButton::from_str(button_id) {
                self.inner.press(button);
            }
        }

        /// Play one tie-break round; returns the round as JSON, or "null"
        /// when no tie is pending
        pub fn throw_tiebreak(&mut self, choice: &str) -> String {
            let round = RpsChoice::from_str(choice)
                .and_then(|c| self.inner.throw_tiebreak(c));
            serde_json::to_string(&round).unwrap_or_else(|_| "null".to_string())
        }

        pub fn indicator_pos(&self) -> f32 {
            self.inner.session().indicator_pos()
        }

        pub fn target_center(&self) -> f32 {
            self.inner.session().target_center()
        }

        pub fn meter_width(&self) -> f32 {
            self.inner.session().meter_width()
        }

        pub fn armed_button(&self) -> String {
            self.inner.session().armed_button().as_str().to_string()
        }

        pub fn score(&self) -> u32 {
            self.inner.session().score()
        }

        pub fn currency(&self) -> u32 {
            self.inner.store().currency()
        }

        pub fn rank(&self) -> String {
            serde_json::to_string(&self.inner.store().rank()).unwrap_or_default()
        }

        /// Take the parked match result as JSON; "null" once consumed
        pub fn consume_match_result(&mut self) -> String {
            let result = self.inner.store_mut().consume_pending_match_result();
            serde_json::to_string(&result).unwrap_or_else(|_| "null".to_string())
        }

        pub fn buy_lance(&mut self, id: &str) -> bool {
            self.inner.buy(id, ItemKind::Lance)
        }

        pub fn buy_skin(&mut self, id: &str) -> bool {
            self.inner.buy(id, ItemKind::Skin)
        }

        pub fn equip_lance(&mut self, id: &str) {
            self.inner.store_mut().equip(id, ItemKind::Lance);
        }

        pub fn equip_skin(&mut self, id: &str) {
            self.inner.store_mut().equip(id, ItemKind::Skin);
        }
    }
}
