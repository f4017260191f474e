use approx::assert_relative_eq;
use modal_param_editor::app::ApplyStage;
use modal_param_editor::sandbox::{ModifierRef, ObjectKind, PropertyValue, SandboxScene};
use modal_param_editor::tools::bevel::BEVEL_KIND;
use modal_param_editor::tools::{BevelTool, SimpleDeformTool};
use modal_param_editor::{
    EngineError, EngineOptions, HandleOutcome, KeyCode, MouseButton, RawEventKind, RawInputEvent,
    Session, SessionState,
};

fn scene_with_cube() -> SandboxScene {
    let mut scene = SandboxScene::new();
    scene.add_object("Cube", ObjectKind::Mesh);
    scene.select_only(&["Cube"]);
    scene
}

fn press(key: KeyCode) -> RawInputEvent {
    RawInputEvent::key_press(key)
}

fn feed(
    session: &mut Session<BevelTool>,
    scene: &mut SandboxScene,
    events: &[RawInputEvent],
) -> HandleOutcome {
    let mut outcome = HandleOutcome::Continue;
    for event in events {
        outcome = session
            .handle(scene, event)
            .expect("Event sollte ohne Fehler verarbeitet werden");
    }
    outcome
}

fn bevel_width(scene: &SandboxScene) -> f64 {
    scene
        .object("Cube")
        .and_then(|o| o.last_modifier_of_kind(BEVEL_KIND))
        .and_then(|m| m.float("width"))
        .expect("Bevel mit Breite erwartet")
}

#[test]
fn test_typed_width_suppresses_steps_until_entry_is_cleared() {
    let mut scene = scene_with_cube();
    let mut session = Session::start(BevelTool::new(), &mut scene, EngineOptions::default())
        .expect("Bevel sollte starten");
    assert!(!session.is_resumed());

    feed(
        &mut session,
        &mut scene,
        &[
            press(KeyCode::Digit(2)),
            press(KeyCode::Period),
            press(KeyCode::Digit(5)),
        ],
    );
    assert_relative_eq!(session.parameters().value("width").unwrap(), 2.5);
    assert_relative_eq!(bevel_width(&scene), 2.5);

    // Rad während der Eingabe: kein Effekt
    feed(&mut session, &mut scene, &[RawInputEvent::new(RawEventKind::WheelUp)]);
    assert_relative_eq!(session.parameters().value("width").unwrap(), 2.5);

    let backspace = press(KeyCode::BackSpace);
    feed(&mut session, &mut scene, &[backspace, backspace, backspace]);
    let width = session.parameters().parameter("width").unwrap();
    assert!(!width.has_entry());
    assert_relative_eq!(width.value(), 0.0);

    feed(&mut session, &mut scene, &[RawInputEvent::new(RawEventKind::WheelUp)]);
    assert_relative_eq!(session.parameters().value("width").unwrap(), 0.1, epsilon = 1e-12);
    assert_relative_eq!(bevel_width(&scene), 0.1, epsilon = 1e-12);

    let outcome = feed(
        &mut session,
        &mut scene,
        &[RawInputEvent::button_release(MouseButton::Left)],
    );
    assert_eq!(outcome, HandleOutcome::Finished);
    assert_eq!(session.state(), SessionState::Committed);
}

#[test]
fn test_resumed_segments_survive_immediate_cancel() {
    let mut scene = scene_with_cube();
    let existing = scene
        .add_modifier("Cube", BEVEL_KIND, "Bevel")
        .expect("Modifier sollte angelegt werden");
    {
        let modifier = scene.modifier_mut(&existing).unwrap();
        modifier.set("width", PropertyValue::Float(0.2)).unwrap();
        modifier.set("segments", PropertyValue::Int(4)).unwrap();
        modifier.set("profile", PropertyValue::Float(0.5)).unwrap();
        modifier
            .set("angle_limit", PropertyValue::Float(30f64.to_radians()))
            .unwrap();
        for flag in ["harden_normals", "clamp_overlap", "loop_slide"] {
            modifier.set(flag, PropertyValue::Bool(false)).unwrap();
        }
    }

    let mut session = Session::start(BevelTool::new(), &mut scene, EngineOptions::default())
        .expect("Bevel sollte fortgesetzt werden");
    assert!(session.is_resumed());
    assert_eq!(session.binding(), Some(&existing));
    let segments = session.parameters().parameter("segments").unwrap();
    assert_relative_eq!(segments.previous_value(), 4.0);

    let outcome = feed(&mut session, &mut scene, &[press(KeyCode::Escape)]);
    assert_eq!(outcome, HandleOutcome::Cancelled);
    assert_eq!(session.state(), SessionState::RolledBack);

    let modifier = scene
        .modifier(&existing)
        .expect("Fortgesetzter Bevel darf nicht gelöscht werden");
    assert_eq!(modifier.int("segments"), Some(4));
}

#[test]
fn test_rejected_value_rolls_back_fresh_binding() {
    let mut scene = scene_with_cube();
    let mut session = Session::start(BevelTool::new(), &mut scene, EngineOptions::default())
        .expect("Bevel sollte starten");
    let binding: ModifierRef = session.binding().cloned().unwrap();
    scene
        .modifier_mut(&binding)
        .unwrap()
        .set_limit("width", 0.0, 1.0);

    let result = session.handle(&mut scene, &press(KeyCode::Digit(5)));
    match result {
        Err(EngineError::ApplyFailure { stage, .. }) => assert_eq!(stage, ApplyStage::Apply),
        other => panic!("ApplyFailure erwartet, erhalten: {other:?}"),
    }
    assert_eq!(session.state(), SessionState::RolledBack);
    assert!(scene.modifier(&binding).is_err());

    assert!(matches!(
        session.handle(&mut scene, &press(KeyCode::Digit(1))),
        Err(EngineError::NotActive { .. })
    ));
}

#[test]
fn test_step_and_drag_stay_within_bounds() {
    let mut scene = scene_with_cube();
    let mut session = Session::start(BevelTool::new(), &mut scene, EngineOptions::default())
        .expect("Bevel sollte starten");

    let ctrl = |e: RawInputEvent| e.with_modifiers(true, false, false);
    let alt = |e: RawInputEvent| e.with_modifiers(false, true, false);
    let mut events = Vec::new();
    for i in 0..60 {
        let dx = if i % 3 == 0 { -250.0 } else { 400.0 };
        events.push(RawInputEvent::mouse_move(dx));
        events.push(ctrl(RawInputEvent::new(RawEventKind::WheelUp)));
        events.push(ctrl(RawInputEvent::mouse_move(dx)));
        events.push(alt(RawInputEvent::new(RawEventKind::WheelDown)));
        events.push(alt(RawInputEvent::mouse_move(-dx)));
    }

    for event in &events {
        session.handle(&mut scene, event).unwrap();
        for parameter in session.parameters().parameters() {
            let spec = parameter.spec();
            assert!(
                parameter.value() >= spec.min && parameter.value() <= spec.max,
                "{} = {} verlässt [{}, {}]",
                parameter.name(),
                parameter.value(),
                spec.min,
                spec.max
            );
        }
    }
    session.rollback(&mut scene).unwrap();
}

#[test]
fn test_mode_cycle_wraps_through_raw_keys() {
    let mut scene = scene_with_cube();
    let mut session = Session::start(SimpleDeformTool::new(), &mut scene, EngineOptions::default())
        .expect("Simple Deform sollte starten");
    let method = |s: &Session<SimpleDeformTool>| {
        s.parameters().mode("method").map(|m| m.current_index())
    };
    let start = method(&session);

    for _ in 0..4 {
        session
            .handle(&mut scene, &press(KeyCode::letter('m')))
            .unwrap();
    }
    assert_eq!(method(&session), start);
    session.rollback(&mut scene).unwrap();
    assert!(scene.object("Cube").unwrap().modifiers.is_empty());
}

#[test]
fn test_pause_hands_events_to_host() {
    let mut scene = scene_with_cube();
    let mut session = Session::start(BevelTool::new(), &mut scene, EngineOptions::default())
        .expect("Bevel sollte starten");

    let pause = press(KeyCode::BackSlash);
    assert_eq!(feed(&mut session, &mut scene, &[pause]), HandleOutcome::Continue);
    assert!(session.is_paused());
    assert_eq!(
        feed(&mut session, &mut scene, &[press(KeyCode::Escape)]),
        HandleOutcome::PassThrough
    );
    assert_eq!(session.state(), SessionState::Active);

    feed(&mut session, &mut scene, &[pause]);
    assert_eq!(
        feed(&mut session, &mut scene, &[press(KeyCode::Return)]),
        HandleOutcome::Finished
    );
}

#[test]
fn test_unavailable_selection_fails_precondition() {
    let mut scene = scene_with_cube();
    scene.add_object("Sun", ObjectKind::Light);
    scene.select_only(&["Sun"]);

    let result = Session::start(BevelTool::new(), &mut scene, EngineOptions::default());
    assert!(matches!(result, Err(EngineError::PreconditionFailed { .. })));
    assert!(scene.object("Sun").unwrap().modifiers.is_empty());
}
