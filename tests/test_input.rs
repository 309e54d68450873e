use platform_duel::input::{DoubleTap, MatchInput, DOUBLE_TAP_WINDOW};

#[test]
fn two_quick_presses_trigger() {
    let mut tap = DoubleTap::new();
    assert!(!tap.press(0.0));
    assert!(tap.press(0.2));
}

#[test]
fn trigger_rearms_the_machine() {
    let mut tap = DoubleTap::new();
    assert!(!tap.press(0.0));
    assert!(tap.press(0.2));
    // The pair is consumed: the third press starts fresh...
    assert!(!tap.press(0.35));
    // ...and a quick fourth press completes a new pair.
    assert!(tap.press(0.5));
}

#[test]
fn slow_presses_never_trigger() {
    let mut tap = DoubleTap::new();
    assert!(!tap.press(0.0));
    assert!(!tap.press(1.0));
    assert!(!tap.press(2.0));
}

#[test]
fn window_boundary_is_exclusive() {
    let mut tap = DoubleTap::new();
    assert!(!tap.press(1.0));
    // Exactly the window apart is too slow (strict less-than).
    assert!(!tap.press(1.0 + DOUBLE_TAP_WINDOW));
}

#[test]
fn consume_triggers_clears_fly_only() {
    let mut input = MatchInput::default();
    input.players[0].fly_trigger = true;
    input.players[0].jump = true;
    input.players[1].fly_trigger = true;

    input.consume_triggers();

    assert!(!input.players[0].fly_trigger);
    assert!(!input.players[1].fly_trigger);
    // Held keys survive; only the one-shot triggers are cleared.
    assert!(input.players[0].jump);
}

#[test]
fn default_input_is_all_released() {
    let input = MatchInput::default();
    for p in &input.players {
        assert!(!p.left && !p.right && !p.jump && !p.down && !p.shoot && !p.fly_trigger);
    }
}
