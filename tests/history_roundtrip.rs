use egui::Color32;
use pixel_canvas::{CanvasConfig, EditSession, StrokeKind};

// Helper to create a session over a small blank canvas
fn create_session(max_history: usize) -> EditSession {
    let config = CanvasConfig {
        max_history,
        brush: "#E63946".to_owned(),
        ..CanvasConfig::blank(8)
    };
    EditSession::new(&config).unwrap()
}

fn dot(session: &mut EditSession, x: i32, y: i32) {
    session.press(x, y);
    session.release();
}

#[test]
fn test_undo_redo_restores_exact_grid() {
    let mut session = create_session(10);
    session.press(0, 0);
    session.move_to(7, 5);
    session.move_to(2, 7);
    session.release();
    session.set_brush(Color32::BLUE);
    session.press(7, 0);
    session.move_to(0, 7);
    session.release();

    let after_commit = session.grid().clone();
    session.undo().unwrap();
    assert_ne!(session.grid(), &after_commit);
    session.redo().unwrap();
    assert_eq!(session.grid(), &after_commit);
}

#[test]
fn test_undo_all_returns_to_blank() {
    let mut session = create_session(10);
    let blank = session.grid().clone();
    for i in 0..5 {
        dot(&mut session, i, i);
    }
    while session.undo().is_some() {}
    assert_eq!(session.grid(), &blank);
    assert!(!session.can_undo());
    assert!(session.can_redo());
}

#[test]
fn test_history_cap_drops_oldest() {
    let mut session = create_session(3);
    for x in 0..4 {
        dot(&mut session, x, 0);
    }
    assert_eq!(session.history().undo_len(), 3);

    let mut undone = 0;
    while session.undo().is_some() {
        undone += 1;
    }
    assert_eq!(undone, 3);
    // The first dot was evicted and stays painted
    assert_ne!(session.grid().get(0, 0).unwrap(), session.grid().background());
    assert_eq!(session.grid().get(1, 0).unwrap(), session.grid().background());
}

#[test]
fn test_new_commit_clears_redo() {
    let mut session = create_session(10);
    dot(&mut session, 0, 0);
    dot(&mut session, 1, 0);
    session.undo().unwrap();
    dot(&mut session, 2, 0);

    assert!(!session.can_redo());
    assert!(session.redo().is_none());
}

#[test]
fn test_empty_history_is_a_no_op() {
    let mut session = create_session(10);
    let before = session.grid().clone();
    assert!(session.undo().is_none());
    assert!(session.redo().is_none());
    assert_eq!(session.grid(), &before);
}

#[test]
fn test_clear_all_is_undoable() {
    let mut session = create_session(10);
    dot(&mut session, 3, 3);
    dot(&mut session, 4, 4);
    let drawn = session.grid().clone();

    assert!(session.clear_all());
    let background = session.grid().background();
    assert!(session.grid().cells().all(|(_, color)| color == background));

    let stroke = session.history().undo_stack().last().unwrap();
    assert_eq!(stroke.kind(), StrokeKind::Clear);
    assert_eq!(stroke.len(), 2);

    session.undo().unwrap();
    assert_eq!(session.grid(), &drawn);
    session.redo().unwrap();
    assert!(session.grid().cells().all(|(_, color)| color == background));
}

#[test]
fn test_clear_all_on_blank_canvas_records_nothing() {
    let mut session = create_session(10);
    assert!(!session.clear_all());
    assert!(!session.can_undo());
}

#[test]
fn test_clear_all_keeps_template_cells() {
    let mut session = EditSession::new(&CanvasConfig::default()).unwrap();
    let template = session.grid().get(10, 31).unwrap();
    session.press(0, 0);
    session.move_to(31, 31);
    session.release();

    session.clear_all();
    assert_eq!(session.grid().get(10, 31), Ok(template));
    assert!(session.grid().is_reserved(16, 31));
    assert_eq!(session.grid().get(0, 0), Ok(session.grid().background()));
}
