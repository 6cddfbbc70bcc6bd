use transit_speak::{AnnouncementGate, AnnouncementState};

#[test]
fn test_first_text_is_announced() {
    let mut gate = AnnouncementGate::new();
    assert_eq!(gate.state().last(), None);
    assert!(gate.should_announce("Автобус\nА123ВС"));
    assert_eq!(gate.state().last(), Some("Автобус\nА123ВС"));
}

#[test]
fn test_repeat_is_suppressed() {
    let mut gate = AnnouncementGate::new();
    assert!(gate.should_announce("Tram\nAB"));
    assert!(!gate.should_announce("Tram\nAB"));
    assert!(!gate.should_announce("Tram\nAB"));
}

#[test]
fn test_repeat_after_different_text() {
    let mut gate = AnnouncementGate::new();
    assert!(gate.should_announce("Tram\nAB"));
    assert!(gate.should_announce("Bus\nAB"));
    assert!(gate.should_announce("Tram\nAB"));
    assert_eq!(gate.state().last(), Some("Tram\nAB"));
}

#[test]
fn test_empty_text_is_a_text() {
    let mut gate = AnnouncementGate::new();
    assert!(gate.should_announce(""));
    assert!(!gate.should_announce(""));
}

#[test]
fn test_resume_from_state() {
    let mut gate = AnnouncementGate::new();
    gate.should_announce("Bus\n");
    let saved: AnnouncementState = gate.state().clone();

    let mut resumed = AnnouncementGate::with_state(saved);
    assert!(!resumed.should_announce("Bus\n"));
}
