//! Modal Param Editor Demo.
//!
//! Spielt skriptgesteuerte Eingaben gegen die Sandbox-Szene ab und gibt
//! die Overlay-Snapshots als JSON aus.

use modal_param_editor::sandbox::{ObjectKind, SandboxScene};
use modal_param_editor::tools::{BevelTool, SimpleDeformTool};
use modal_param_editor::{
    EngineOptions, HandleOutcome, KeyCode, MouseButton, RawEventKind, RawInputEvent, Session,
    ToolAdapter,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Modal Param Editor Demo v{} startet...", env!("CARGO_PKG_VERSION"));

    let options = EngineOptions::load_from_file(&EngineOptions::config_path());

    let mut scene = SandboxScene::new();
    scene.add_object("Cube", ObjectKind::Mesh);
    scene.add_object("Light", ObjectKind::Light);
    scene.select_only(&["Cube"]);

    run_bevel(&mut scene, &options)?;
    run_bevel_recall(&mut scene, &options)?;
    run_deform_with_rejected_value(&mut scene, &options)?;

    let cube = scene
        .object("Cube")
        .ok_or_else(|| anyhow::anyhow!("Cube fehlt in der Szene"))?;
    let stack: Vec<_> = cube.modifiers.iter().map(|m| m.name.as_str()).collect();
    log::info!("Modifier-Stapel von Cube: {:?}", stack);
    Ok(())
}

/// Neuer Bevel: Breite ziehen, Segmente per Rad, Profil tippen, bestätigen.
fn run_bevel(scene: &mut SandboxScene, options: &EngineOptions) -> anyhow::Result<()> {
    let mut session = Session::start(BevelTool::new(), scene, options.clone())?;

    let alt = |event: RawInputEvent| event.with_modifiers(false, true, false);
    let ctrl = |event: RawInputEvent| event.with_modifiers(true, false, false);
    let events = [
        RawInputEvent::mouse_move(40.0),
        RawInputEvent::mouse_move(40.0),
        alt(RawInputEvent::new(RawEventKind::WheelUp)),
        alt(RawInputEvent::new(RawEventKind::WheelUp)),
        ctrl(RawInputEvent::key_press(KeyCode::Digit(7))),
        RawInputEvent::key_press(KeyCode::letter('h')),
        // Mittlere Maustaste gehört der Kamera
        RawInputEvent::button_press(MouseButton::Middle),
    ];
    drive(&mut session, scene, &events)?;
    println!("{}", session.presentation().to_json()?);

    let outcome = drive(
        &mut session,
        scene,
        &[RawInputEvent::key_press(KeyCode::Return)],
    )?;
    log::info!("Bevel beendet: {:?}", outcome);
    Ok(())
}

/// Bestehenden Bevel fortsetzen, ändern und verwerfen.
fn run_bevel_recall(scene: &mut SandboxScene, options: &EngineOptions) -> anyhow::Result<()> {
    let mut session = Session::start(BevelTool::new(), scene, options.clone())?;
    let events = [
        RawInputEvent::key_press(KeyCode::Digit(2)),
        RawInputEvent::key_press(KeyCode::Period),
        RawInputEvent::key_press(KeyCode::Digit(5)),
    ];
    drive(&mut session, scene, &events)?;
    println!("{}", session.presentation().to_json()?);

    let outcome = drive(
        &mut session,
        scene,
        &[RawInputEvent::key_press(KeyCode::Escape)],
    )?;
    log::info!(
        "Fortgesetzter Bevel {:?}, Breite wieder {:?}",
        outcome,
        session.parameters().value("width")
    );
    Ok(())
}

/// Simple Deform, dessen Faktor der Host oberhalb von 1 ablehnt.
fn run_deform_with_rejected_value(
    scene: &mut SandboxScene,
    options: &EngineOptions,
) -> anyhow::Result<()> {
    let mut session = Session::start(SimpleDeformTool::new(), scene, options.clone())?;
    if let Some(binding) = session.binding().cloned() {
        scene.modifier_mut(&binding)?.set_limit("factor", -1.0, 1.0);
    }

    let m = RawInputEvent::key_press(KeyCode::letter('m'));
    drive(&mut session, scene, &[m, m])?;

    match session.handle(scene, &RawInputEvent::key_press(KeyCode::Digit(5))) {
        Ok(outcome) => log::info!("Faktor übernommen: {:?}", outcome),
        Err(e) => log::warn!("Eingabe abgelehnt ({}), Session {:?}", e, session.state()),
    }
    if session.is_active() {
        session.rollback(scene)?;
    }
    Ok(())
}

/// Spielt Events ab, bis die Session endet oder die Liste leer ist.
fn drive<A: ToolAdapter>(
    session: &mut Session<A>,
    host: &mut A::Host,
    events: &[RawInputEvent],
) -> anyhow::Result<HandleOutcome> {
    let mut outcome = HandleOutcome::Continue;
    for event in events {
        outcome = session.handle(host, event)?;
        log::debug!("{:?} → {:?}", event.kind, outcome);
        if matches!(outcome, HandleOutcome::Finished | HandleOutcome::Cancelled) {
            break;
        }
    }
    Ok(outcome)
}
