/// Input-state types and the double-tap debounce machine.
///
/// The simulation core never touches the keyboard: the frontend samples
/// whatever input device it has into a `MatchInput` once per frame and the
/// core reads only these booleans.

/// Two jump presses closer together than this trigger flight.
pub const DOUBLE_TAP_WINDOW: f32 = 0.3;

/// Held-key predicates for one player, sampled once per simulation step.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub down: bool,
    pub shoot: bool,
    /// One-shot flight trigger from the double-tap detector.  Consumed by
    /// the first simulation step that sees it.
    pub fly_trigger: bool,
}

/// Input for the whole match, parallel to `GameState::players`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchInput {
    pub players: [PlayerInput; 2],
}

impl MatchInput {
    /// Clear the one-shot flight triggers; the fixed-step drain calls this
    /// after the first step so a single double-tap fires exactly once.
    pub fn consume_triggers(&mut self) {
        for p in &mut self.players {
            p.fly_trigger = false;
        }
    }
}

// ── Double-tap detection ──────────────────────────────────────────────────────

/// Per-player debounce machine for the double-tap flight trigger.
///
/// Time is a caller-supplied monotonic clock in seconds, so tests drive it
/// with plain numbers instead of wall-clock sampling.
#[derive(Clone, Copy, Debug, Default)]
pub struct DoubleTap {
    last_press: Option<f32>,
}

impl DoubleTap {
    pub fn new() -> Self {
        DoubleTap { last_press: None }
    }

    /// Record a jump press at time `now`.  Returns `true` when this press
    /// completes a double-tap; the machine then re-arms so a third press
    /// starts a fresh pair rather than chaining triggers.
    pub fn press(&mut self, now: f32) -> bool {
        let tapped = matches!(self.last_press, Some(t) if now - t < DOUBLE_TAP_WINDOW);
        if tapped {
            self.last_press = None;
        } else {
            self.last_press = Some(now);
        }
        tapped
    }
}
