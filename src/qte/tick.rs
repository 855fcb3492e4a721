//! Session advancement and input resolution
//!
//! The host calls `tick` once per rendered frame and `register_input` once
//! per discrete button press. Both are no-ops outside the phases where they
//! mean something - spurious input must never crash or double-score.

use super::state::{HitJudgment, JoustButton, QteEvent, QtePhase, QteSession};
use crate::consts::*;

/// Advance the session by one frame.
///
/// The indicator moves a fixed distance per call (scaled by the lance's
/// speed modifier) and reverses at the meter edges. A tick that crosses the
/// session duration finishes the pass immediately - before any respawn is
/// processed - so session end always wins races with late input.
pub fn tick(session: &mut QteSession, elapsed_ms: f64, _delta_ms: f64) {
    match session.phase {
        QtePhase::Idle | QtePhase::Finished => return,
        _ => {}
    }

    session.elapsed_ms = elapsed_ms;

    if elapsed_ms >= session.duration_ms {
        session.phase = QtePhase::Finished;
        session.respawn_at_ms = None;
        session.events.push(QteEvent::Finished {
            final_score: session.score,
        });
        return;
    }

    // Between rounds: arm the next one once the delay has run out
    if session.phase == QtePhase::Resolving
        && session.respawn_at_ms.is_some_and(|at| elapsed_ms >= at)
    {
        session.spawn_round();
    }

    // The needle keeps sweeping even between rounds
    let min = INDICATOR_HALF_WIDTH;
    let max = session.params.meter_width - INDICATOR_HALF_WIDTH;
    session.indicator_pos += session.speed * session.direction;
    if session.indicator_pos >= max {
        session.indicator_pos = max;
        session.direction = -1.0;
    } else if session.indicator_pos <= min {
        session.indicator_pos = min;
        session.direction = 1.0;
    }
}

/// Resolve a button press against the current round.
///
/// Only the first press per round counts; anything outside `Armed` (already
/// resolved, not started, finished) is ignored.
pub fn register_input(session: &mut QteSession, button: JoustButton) {
    if session.phase != QtePhase::Armed {
        return;
    }

    let judgment = judge(
        button,
        session.armed_button,
        session.indicator_pos,
        session.target_center,
    );
    let points = judgment.points();
    session.score += points;
    session.phase = QtePhase::Resolving;
    session.respawn_at_ms = Some(session.elapsed_ms + ROUND_RESPAWN_DELAY_MS);
    session.events.push(QteEvent::Strike { judgment, points });
}

/// Pure scoring rule: wrong button misses outright, otherwise the distance
/// from the target center picks the tier
pub fn judge(
    pressed: JoustButton,
    armed: JoustButton,
    indicator_pos: f32,
    target_center: f32,
) -> HitJudgment {
    if pressed != armed {
        return HitJudgment::WrongButton;
    }
    let d = (indicator_pos - target_center).abs();
    if d <= PERFECT_THRESHOLD {
        HitJudgment::Perfect
    } else if d <= HIT_THRESHOLD {
        HitJudgment::Good
    } else {
        HitJudgment::BadTiming
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qte::QteParams;
    use proptest::prelude::*;

    fn started(seed: u64) -> QteSession {
        let mut session = QteSession::new(seed);
        session.start(30_000.0, QteParams::default());
        session
    }

    #[test]
    fn test_start_arms_first_round() {
        let mut session = started(7);
        assert_eq!(session.phase(), QtePhase::Armed);
        let events = session.drain_events();
        assert!(matches!(events[0], QteEvent::RoundArmed { .. }));

        // Target must respect the edge buffer
        let buffer = 2.0 * TARGET_HALF_WIDTH;
        assert!(session.target_center() >= buffer);
        assert!(session.target_center() <= session.meter_width() - buffer);
    }

    #[test]
    fn test_double_start_is_ignored() {
        let mut session = started(7);
        let target = session.target_center();
        session.start(5_000.0, QteParams::default());
        assert_eq!(session.target_center(), target);
        assert_eq!(session.duration_ms, 30_000.0);
    }

    #[test]
    fn test_judge_tiers() {
        let armed = JoustButton::High;
        // Concrete scenario: target 200, indicator 205 -> GOOD
        assert_eq!(judge(armed, armed, 205.0, 200.0), HitJudgment::Good);
        assert_eq!(judge(armed, armed, 200.0, 200.0), HitJudgment::Perfect);
        // Boundary values belong to the better tier
        assert_eq!(judge(armed, armed, 210.0, 200.0), HitJudgment::Perfect);
        assert_eq!(judge(armed, armed, 220.0, 200.0), HitJudgment::Good);
        assert_eq!(judge(armed, armed, 221.0, 200.0), HitJudgment::BadTiming);
        // Wrong button misses no matter how close the needle is
        assert_eq!(
            judge(JoustButton::Feint, armed, 200.0, 200.0),
            HitJudgment::WrongButton
        );
    }

    #[test]
    fn test_input_scores_and_debounces() {
        let mut session = started(11);
        session.indicator_pos = session.target_center();
        let armed = session.armed_button();
        register_input(&mut session, armed);
        assert_eq!(session.score(), PERFECT_POINTS);
        assert_eq!(session.phase(), QtePhase::Resolving);

        // Second press in the same round is ignored
        register_input(&mut session, armed);
        assert_eq!(session.score(), PERFECT_POINTS);
        let strikes = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, QteEvent::Strike { .. }))
            .count();
        assert_eq!(strikes, 1);
    }

    #[test]
    fn test_respawn_waits_for_deadline() {
        let mut session = started(11);
        session.elapsed_ms = 1_000.0;
        let armed = session.armed_button();
        register_input(&mut session, armed);
        assert_eq!(session.phase(), QtePhase::Resolving);

        // Before the deadline: still resolving
        tick(&mut session, 1_000.0 + ROUND_RESPAWN_DELAY_MS - 1.0, 16.0);
        assert_eq!(session.phase(), QtePhase::Resolving);

        // At the deadline: a fresh round is armed
        tick(&mut session, 1_000.0 + ROUND_RESPAWN_DELAY_MS, 16.0);
        assert_eq!(session.phase(), QtePhase::Armed);
    }

    #[test]
    fn test_indicator_reverses_at_edges() {
        let mut session = started(3);
        let max = session.meter_width() - INDICATOR_HALF_WIDTH;
        session.indicator_pos = max - 1.0;
        session.direction = 1.0;
        tick(&mut session, 10.0, 16.0);
        assert_eq!(session.indicator_pos(), max);
        assert_eq!(session.direction, -1.0);

        session.indicator_pos = INDICATOR_HALF_WIDTH + 1.0;
        session.direction = -1.0;
        tick(&mut session, 20.0, 16.0);
        assert_eq!(session.indicator_pos(), INDICATOR_HALF_WIDTH);
        assert_eq!(session.direction, 1.0);
    }

    #[test]
    fn test_session_end_wins_over_late_input() {
        let mut session = started(5);
        session.indicator_pos = session.target_center();
        let armed = session.armed_button();

        tick(&mut session, 30_000.0, 16.0);
        assert_eq!(session.phase(), QtePhase::Finished);
        let events = session.drain_events();
        assert!(
            events
                .iter()
                .any(|e| matches!(e, QteEvent::Finished { final_score: 0 }))
        );

        // Input after the boundary tick is dead
        register_input(&mut session, armed);
        assert_eq!(session.score(), 0);
        assert!(session.drain_events().is_empty());

        // And so are further ticks: Finished is emitted exactly once
        tick(&mut session, 31_000.0, 16.0);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_abandon_cancels_pending_respawn() {
        let mut session = started(13);
        let armed = session.armed_button();
        register_input(&mut session, armed);
        assert!(session.respawn_at_ms.is_some());

        session.abandon();
        assert_eq!(session.phase(), QtePhase::Idle);
        assert!(session.respawn_at_ms.is_none());

        // A dead session never arms another round
        tick(&mut session, 10_000.0, 16.0);
        assert_eq!(session.phase(), QtePhase::Idle);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_determinism_same_seed() {
        let mut a = started(99);
        let mut b = started(99);

        for frame in 1..200u32 {
            let t = frame as f64 * 16.0;
            tick(&mut a, t, 16.0);
            tick(&mut b, t, 16.0);
            if frame % 30 == 0 {
                let button = a.armed_button();
                register_input(&mut a, button);
                register_input(&mut b, button);
            }
        }

        assert_eq!(a.score(), b.score());
        assert_eq!(a.drain_events(), b.drain_events());
        assert_eq!(a.indicator_pos(), b.indicator_pos());
    }

    proptest! {
        #[test]
        fn prop_tiering_matches_distance(indicator in 0.0f32..400.0, target in 0.0f32..400.0) {
            let armed = JoustButton::Mid;
            let d = (indicator - target).abs();
            let judgment = judge(armed, armed, indicator, target);
            match judgment {
                HitJudgment::Perfect => prop_assert!(d <= PERFECT_THRESHOLD),
                HitJudgment::Good => prop_assert!(d > PERFECT_THRESHOLD && d <= HIT_THRESHOLD),
                HitJudgment::BadTiming => prop_assert!(d > HIT_THRESHOLD),
                HitJudgment::WrongButton => prop_assert!(false, "armed button never judged wrong"),
            }
        }

        #[test]
        fn prop_indicator_stays_in_meter(seed in 0u64..1000, frames in 1usize..500) {
            let mut session = QteSession::new(seed);
            session.start(1_000_000.0, QteParams { speed_modifier: 2.5, ..Default::default() });
            for frame in 0..frames {
                tick(&mut session, frame as f64 * 16.0, 16.0);
                prop_assert!(session.indicator_pos() >= INDICATOR_HALF_WIDTH);
                prop_assert!(session.indicator_pos() <= session.meter_width() - INDICATOR_HALF_WIDTH);
            }
        }
    }
}
