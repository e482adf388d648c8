// Native tests for the frame-driven cosmetic oscillators. Deltas are fed in
// manually; no browser clock involved.

use std::f64::consts::TAU;

use neon_snake::effects::{EAT_BURST_MS, EffectState};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn glow_is_a_reflecting_triangle_wave() {
    let mut fx = EffectState::new();
    assert!(close(fx.glow, 0.0));

    // Climb: 0.003 per ms.
    fx.advance(200.0);
    assert!(close(fx.glow, 0.6));

    // Overshoot clamps at the upper bound and reverses.
    fx.advance(200.0);
    assert!(close(fx.glow, 1.0));
    fx.advance(100.0);
    assert!(close(fx.glow, 0.7));

    // Undershoot clamps at the lower bound and reverses again.
    fx.advance(100.0);
    assert!(close(fx.glow, 0.5));
    fx.advance(50.0);
    assert!(close(fx.glow, 0.65));

    // Once inside the band it never leaves it.
    for _ in 0..1000 {
        fx.advance(16.7);
        assert!(fx.glow >= 0.5 && fx.glow <= 1.0);
    }
}

#[test]
fn food_pulse_wraps_after_a_full_cycle() {
    let mut fx = EffectState::new();
    fx.advance(1000.0);
    assert!(close(fx.food_pulse, 5.0));
    // 5.0 + 1.5 exceeds 2π and wraps.
    fx.advance(300.0);
    assert!(close(fx.food_pulse, 0.0));
    assert!(fx.food_pulse <= TAU);
}

#[test]
fn food_pulse_scale_stays_in_band() {
    let mut fx = EffectState::new();
    for _ in 0..2000 {
        fx.advance(7.3);
        let scale = fx.food_pulse_scale();
        assert!((0.7..=1.0).contains(&scale), "scale out of band: {scale}");
    }
}

#[test]
fn eat_burst_expires_after_its_duration() {
    let mut fx = EffectState::new();
    assert_eq!(fx.eat_burst_progress(), None);

    fx.trigger_eat_burst(120.0, 80.0);
    assert!(fx.eat.active);
    assert!(close(fx.eat_burst_progress().unwrap(), 0.0));
    assert!(close(fx.eat.x, 120.0));
    assert!(close(fx.eat.y, 80.0));

    fx.advance(EAT_BURST_MS / 2.0);
    assert!(close(fx.eat_burst_progress().unwrap(), 0.5));

    fx.advance(EAT_BURST_MS / 2.0 + 1.0);
    assert_eq!(fx.eat_burst_progress(), None);
    assert!(!fx.eat.active);
}

#[test]
fn retrigger_resets_the_burst_clock() {
    let mut fx = EffectState::new();
    fx.trigger_eat_burst(10.0, 10.0);
    fx.advance(200.0);
    fx.trigger_eat_burst(30.0, 40.0);
    assert!(close(fx.eat_burst_progress().unwrap(), 0.0));
    assert!(close(fx.eat.x, 30.0));
    assert!(close(fx.eat.y, 40.0));
}

#[test]
fn zero_delta_first_frame_advances_no_timers() {
    let mut fx = EffectState::new();
    fx.trigger_eat_burst(1.0, 2.0);
    fx.advance(0.0);
    // The glow snaps up into its operating band on the very first advance;
    // the time-based phases stay put.
    assert!(close(fx.glow, 0.5));
    assert!(close(fx.food_pulse, 0.0));
    assert!(close(fx.eat.elapsed_ms, 0.0));
    assert!(fx.eat.active);
}
