// Frame-level behaviour of the background state machine.

use glam::Vec2;
use reel_core::field::{render_rgba8, shade_pixel};
use reel_core::*;

fn speed_patch(speed: f32, duration: f32) -> ParamPatch {
    ParamPatch {
        speed: Some(speed),
        transition_duration: Some(duration),
        ..Default::default()
    }
}

#[test]
fn transition_stays_between_endpoints_and_lands_exactly() {
    let mut state = BackgroundState::new(&BackgroundConfig::default());
    state.set_params(&speed_patch(1.3, 1.0));
    assert!(state.is_transitioning());

    let mut last = state.params().speed;
    for _ in 0..25 {
        state.tick(0.05);
        let s = state.params().speed;
        assert!((0.3..=1.3).contains(&s), "speed {s} left the range");
        assert!(s >= last);
        last = s;
    }
    assert_eq!(state.params().speed, 1.3);
    assert!(!state.is_transitioning());
}

#[test]
fn first_frame_of_transition_starts_at_current_value() {
    let mut state = BackgroundState::new(&BackgroundConfig::default());
    state.set_params(&speed_patch(2.0, 1.0));
    let u = state.tick(0.0);
    assert_eq!(u.speed, 0.3);
}

#[test]
fn retarget_mid_transition_starts_from_interpolated_value() {
    let mut state = BackgroundState::new(&BackgroundConfig::default());
    state.set_params(&speed_patch(1.3, 1.0));
    for _ in 0..8 {
        state.tick(0.05);
    }
    let mid = state.params().speed;
    assert!(mid > 0.3 && mid < 1.3);

    state.set_params(&speed_patch(0.0, 1.0));
    let tr = state.transition().unwrap();
    assert_eq!(tr.start().speed, mid);
    assert_eq!(tr.end().speed, 0.0);

    // no jump on the next frame
    state.tick(0.016);
    assert!((state.params().speed - mid).abs() < 0.01);
}

#[test]
fn untouched_fields_hold_their_value_during_transition() {
    let mut state = BackgroundState::new(&BackgroundConfig::default());
    state.set_params(&speed_patch(1.0, 0.5));
    state.tick(0.05);
    assert_eq!(state.params().scale, 1.2);
    assert_eq!(state.params().vignette, 0.75);
}

#[test]
fn zero_duration_applies_immediately() {
    let mut state = BackgroundState::new(&BackgroundConfig::default());
    let patch = ParamPatch::from_json(r#"{"noise": 0.5, "transitionDuration": 0}"#).unwrap();
    state.set_params(&patch);
    assert!(!state.is_transitioning());
    assert_eq!(state.params().noise, 0.5);
}

#[test]
fn long_frames_are_clamped() {
    let mut state = BackgroundState::new(&BackgroundConfig::default());
    state.tick(10.0);
    assert!((state.elapsed() - 0.05).abs() < 1e-6);
    state.tick(-1.0);
    state.tick(f32::NAN);
    assert!((state.elapsed() - 0.05).abs() < 1e-6);
}

#[test]
fn pointer_converges_monotonically() {
    let mut state = BackgroundState::new(&BackgroundConfig::default());
    let target = Vec2::new(1.0, -1.0);
    state.set_pointer_target(target);

    let mut dist = target.length();
    for _ in 0..120 {
        state.tick(1.0 / 60.0);
        let d = (state.pointer().current() - target).length();
        assert!(d <= dist + 1e-6);
        dist = d;
    }
    assert!(dist < 1e-3, "pointer still {dist} away");
}

#[test]
fn auto_rotation_advances_with_time() {
    let cfg = BackgroundConfig {
        rotation: 0.0,
        auto_rotate: 90.0,
        ..Default::default()
    };
    let mut state = BackgroundState::new(&cfg);
    for _ in 0..20 {
        state.tick(0.05);
    }
    assert!((state.rotation() - std::f32::consts::FRAC_PI_2).abs() < 1e-3);
}

#[test]
fn procedural_mode_yields_finite_unit_colours() {
    let cfg = BackgroundConfig {
        colors: Vec::new(),
        warp_strength: 1.0,
        ..Default::default()
    };
    let mut state = BackgroundState::new(&cfg);
    state.resize(64, 48);
    let u = state.uniforms();
    assert_eq!(u.color_count, 0);
    assert_eq!(u.time, 0.0);

    for y in 0..12 {
        for x in 0..16 {
            let uv = Vec2::new((x as f32 + 0.5) / 16.0, (y as f32 + 0.5) / 12.0);
            let px = shade_pixel(&u, uv, uv * Vec2::new(64.0, 48.0));
            for c in px.to_array() {
                assert!(c.is_finite());
                assert!((0.0..=1.0).contains(&c), "channel {c} out of range");
            }
            // premultiplied output never exceeds its alpha
            assert!(px.x <= px.w + 1e-6 && px.y <= px.w + 1e-6 && px.z <= px.w + 1e-6);
        }
    }
}

#[test]
fn opaque_mode_has_full_alpha() {
    let cfg = BackgroundConfig {
        transparent: false,
        ..Default::default()
    };
    let mut state = BackgroundState::new(&cfg);
    state.resize(8, 8);
    let u = state.tick(0.016);
    let mut buf = vec![0u8; 8 * 8 * 4];
    render_rgba8(&u, 8, 8, &mut buf);
    assert!(buf.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn resize_reaches_the_next_frame() {
    let mut state = BackgroundState::new(&BackgroundConfig::default());
    // container laid out while hidden
    state.resize(0, 0);
    assert_eq!(state.tick(0.016).canvas, [1.0, 1.0]);

    state.resize(1280, 720);
    let u = state.tick(0.016);
    assert_eq!(u.canvas, [1280.0, 720.0]);
    assert!((u.canvas[0] / u.canvas[1] - 16.0 / 9.0).abs() < 1e-6);
}

#[test]
fn palette_is_capped_at_eight() {
    let colors: Vec<String> = (0..12).map(|i| format!("#{:02x}0000", i * 16)).collect();
    let cfg = BackgroundConfig {
        colors,
        ..Default::default()
    };
    let state = BackgroundState::new(&cfg);
    assert_eq!(state.palette().len(), 8);
    assert_eq!(state.uniforms().color_count, 8);
}

#[test]
fn frame_clock_feeds_deltas() {
    use std::time::Duration;
    let mut clock = FrameClock::new();
    let t0 = instant::Instant::now();
    assert_eq!(clock.tick(t0).delta, 0.0);
    let tick = clock.tick(t0 + Duration::from_millis(20));
    assert!((tick.delta - 0.02).abs() < 1e-4);
    assert!((tick.elapsed - 0.02).abs() < 1e-4);
}
