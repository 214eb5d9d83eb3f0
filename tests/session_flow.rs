use hudkit::app::Session;
use hudkit::input::{CaptureStatus, KeyboardState, RawKeyEvent};
use hudkit::protocol::broadcast;
use hudkit::ui::{Click, ObjectiveTrigger, Page, ViewerEvent};
use hudkit::{HudConfig, InputAction, KeyCode, MemorySettings, Participant};

fn config() -> HudConfig {
    HudConfig::from_toml_str(
        r#"
[overlay]
fade_time = 1.0
hold_time = 0.5
initial_objective = "Find the documentary crew"

[rebind]
frame_limit = 120

[viewer]
close_prompt = "Press [INTERACT] to put it down"
"#,
    )
    .expect("valid config")
}

#[test]
fn rebinding_interact_changes_the_document_prompt() {
    let config = config();
    let mut session = Session::new(MemorySettings::new(), &config);
    let mut keyboard = KeyboardState::new();

    session.begin_rebind(InputAction::Interact).expect("remappable");
    keyboard.frame([RawKeyEvent::Down(KeyCode::RightArrow)]);
    session.frame(&keyboard, None, 0.0);
    keyboard.frame([RawKeyEvent::Up(KeyCode::RightArrow)]);
    let report = session.frame(&keyboard, None, 0.016);
    assert_eq!(report.rebind, Some(CaptureStatus::Bound(KeyCode::RightArrow)));

    let document = session
        .document("map", vec![Page::new(1000, 700)])
        .expect("non-empty document");
    session.open_document(document);

    keyboard.begin_frame();
    let report = session.frame(&keyboard, None, 0.032);
    let viewer = report.viewer.expect("document open");
    assert_eq!(viewer.close_prompt, "Press Right to put it down");

    // The old key no longer closes it; the new one does.
    keyboard.frame([RawKeyEvent::Down(KeyCode::E)]);
    let report = session.frame(&keyboard, None, 0.048);
    assert_eq!(report.viewer.expect("still open").event, ViewerEvent::Idle);

    keyboard.frame([RawKeyEvent::Down(KeyCode::RightArrow)]);
    let report = session.frame(&keyboard, None, 0.064);
    assert_eq!(report.viewer.expect("closing frame").event, ViewerEvent::Closed);
}

#[test]
fn objective_trigger_mirrors_to_both_players() {
    let config = config();
    let mut host = Session::new(MemorySettings::new(), &config);
    let mut guest = Session::new(MemorySettings::new(), &config);
    let idle = KeyboardState::new();

    let mut trigger = ObjectiveTrigger::new("Restore the generator", 1);
    let message = trigger.fire().expect("first contact");
    broadcast(&mut [&mut host, &mut guest], &message, 0.0);
    assert!(trigger.fire().is_none());

    guest.apply(&hudkit::SyncMessage::ShowPartnerUpdate, 0.0);

    let host_overlay = host.frame(&idle, None, 0.5).overlay.expect("fading in");
    let guest_overlay = guest.frame(&idle, None, 0.5).overlay.expect("fading in");
    assert_eq!(host_overlay.text, "Restore the generator");
    assert_eq!(guest_overlay.text, "Restore the generator");
    assert_eq!(host_overlay.partner_banner, None);
    assert!(guest_overlay.partner_banner.is_some());
}

#[test]
fn document_pages_follow_clicks() {
    let config = config();
    let mut session = Session::new(MemorySettings::new(), &config);
    let idle = KeyboardState::new();

    let document = session
        .document("journal", vec![Page::new(800, 900); 3])
        .expect("non-empty document");
    session.open_document(document);

    let right = Some(Click { x: 1700.0, y: 700.0 });
    let left = Some(Click { x: 100.0, y: 700.0 });
    let top = Some(Click { x: 960.0, y: 20.0 });

    assert_eq!(
        session.frame(&idle, right, 0.0).viewer.map(|v| v.page),
        Some(1)
    );
    assert_eq!(
        session.frame(&idle, right, 0.1).viewer.map(|v| v.page),
        Some(2)
    );
    assert_eq!(
        session.frame(&idle, left, 0.2).viewer.map(|v| v.page),
        Some(1)
    );
    let closing = session.frame(&idle, top, 0.3).viewer.expect("closing frame");
    assert_eq!(closing.event, ViewerEvent::Closed);
    assert_eq!(closing.page, 0);
    assert!(!session.viewer().expect("kept after close").is_inspecting());
}
