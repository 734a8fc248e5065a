//! A full scripted session through every narrative section.

use marionette_core::engine::{EngineEvent, InputEvent, SceneEngine};
use marionette_core::expression::Expression;
use marionette_core::pointer::{HitTarget, HoverState, Viewport};
use marionette_core::stage::{Section, StageEvent};
use marionette_core::{Catalog, Tuning};

const DT: f32 = 1.0 / 60.0;

fn run(e: &mut SceneEngine, seconds: f32) {
    let frames = (seconds / DT).round() as usize;
    for _ in 0..frames {
        e.tick(DT);
    }
}

#[test]
fn test_full_session() {
    let mut e = SceneEngine::new(
        Tuning::default(),
        Catalog::default(),
        Viewport::new(1920.0, 1080.0),
    );
    let mut events: Vec<EngineEvent> = Vec::new();

    // --- Hero: pointer-follow and a welcome spin ---
    e.handle_input(InputEvent::PointerMove {
        x: 1440.0,
        y: 270.0,
        target: HitTarget::MascotHead,
    });
    assert_eq!(e.rig().hover, HoverState::MascotHead);
    assert!(e.rig().follow_mouse);

    e.handle_input(InputEvent::Click {
        target: HitTarget::MascotHead,
    });
    run(&mut e, 2.0);
    events.extend(e.drain_events());
    assert!(events.contains(&EngineEvent::SpinCompleted));

    // Head has been chasing the upper-right pointer
    let rot = e.rig().rotation_rad;
    assert!(rot.y > 0.0);
    assert!(rot.x > 0.0);

    // --- Skills: shake the whole game to completion ---
    e.enter_section(Section::Skills);
    assert_eq!(e.rig().expression, Expression::Sad);

    let mut flip = false;
    e.handle_input(InputEvent::PointerMove {
        x: 0.0,
        y: 0.0,
        target: HitTarget::None,
    });
    run(&mut e, 0.15);
    for _ in 0..24 {
        flip = !flip;
        e.handle_input(InputEvent::PointerMove {
            x: if flip { 60.0 } else { 0.0 },
            y: 0.0,
            target: HitTarget::None,
        });
        run(&mut e, 0.15);
    }
    events.extend(e.drain_events());

    let completions = events
        .iter()
        .filter(|ev| matches!(ev, EngineEvent::Stage(StageEvent::SectionComplete)))
        .count();
    assert_eq!(completions, 1);
    assert_eq!(e.rig().expression, Expression::Happy);
    assert!(e.stage().skills().all_popped());

    // --- Gallery: drag the track, head pinned to progress rotation ---
    e.enter_section(Section::Gallery);
    e.handle_input(InputEvent::DragStart);
    e.handle_input(InputEvent::DragDelta { delta: 700.0 });
    e.handle_input(InputEvent::DragEnd);
    run(&mut e, 2.0);

    let rig = e.rig();
    assert!(rig.progress > 0.9);
    assert!(rig.track_offset < 0.0);
    assert!(!rig.follow_mouse);
    assert!(rig.rotation_angle_deg > 600.0);

    // --- Teardown: nothing pending survives ---
    e.teardown();
    assert_eq!(e.pending_timers(), 0);
    run(&mut e, 2.0);
    assert!(e.drain_events().is_empty());
}
