use plume_editor::{Editor, EditorConfig, RawEvent, TimerPurpose};
use plume_surface::{Document, Node, Point, Selection, Surface};
use plume_toolbar::Toolbar;

fn two_block_doc() -> Document {
    Document {
        children: vec![
            Node::paragraph("Hi"),
            Node::element("h2", vec![Node::text("Title")]),
        ],
    }
}

/// Boots an editor over ready content and drives it through the first poll,
/// leaving it ready at tick 20 with the breadcrumb freshly written.
fn boot(doc: Document) -> Editor {
    let mut editor = Editor::new(
        Surface::with_ready_content(doc),
        Toolbar::standard(),
        EditorConfig::default(),
        0,
    );
    let fired = editor.run_due(20);
    assert!(fired.contains(&TimerPurpose::ReadyPoll));
    assert!(editor.is_ready());
    editor
}

#[test]
fn rapid_changes_collapse_to_one_breadcrumb_write_with_latest_data() {
    let mut editor = boot(two_block_doc());
    assert_eq!(editor.breadcrumb(), ["body"]);

    editor
        .surface_mut()
        .set_selection(Selection::collapsed(Point::new(vec![0, 0], 1)));
    editor.handle_event(RawEvent::Click, 21);

    editor
        .surface_mut()
        .set_selection(Selection::collapsed(Point::new(vec![1, 0], 2)));
    editor.handle_event(RawEvent::Click, 22);

    // Both changes landed inside the threshold window: nothing written yet.
    assert_eq!(editor.breadcrumb(), ["body"]);
    let fired = editor.run_due(22);
    assert!(!fired.contains(&TimerPurpose::PathWrite));
    assert_eq!(editor.breadcrumb(), ["body"]);

    // The deferred write fires once, carrying the second change's path.
    let fired = editor.run_due(23);
    assert_eq!(
        fired.iter().filter(|p| **p == TimerPurpose::PathWrite).count(),
        1
    );
    assert_eq!(editor.breadcrumb(), ["body", "h2"]);
    assert!(!editor.timers().is_scheduled(TimerPurpose::PathWrite));
}

#[test]
fn force_bypasses_the_debounce_threshold() {
    let mut editor = boot(two_block_doc());

    editor
        .surface_mut()
        .set_selection(Selection::collapsed(Point::new(vec![1, 0], 0)));
    editor.node_change(true, 21);

    assert_eq!(editor.breadcrumb(), ["body", "h2"]);
    assert!(!editor.timers().is_scheduled(TimerPurpose::PathWrite));
}

#[test]
fn controls_reconcile_immediately_even_when_the_breadcrumb_is_deferred() {
    let mut editor = boot(two_block_doc());

    editor
        .surface_mut()
        .set_selection(Selection::collapsed(Point::new(vec![1, 0], 0)));
    editor.handle_event(RawEvent::Click, 21);

    // Breadcrumb still debounced, but the toolbar already reflects the h2.
    assert_eq!(editor.breadcrumb(), ["body"]);
    let heading = editor.get_button_by_value("heading").unwrap();
    assert_eq!(heading.current_label(), "Header 2");
}

#[test]
fn cleanup_runs_on_a_zero_delay_timer() {
    let doc = Document {
        children: vec![Node::Element(plume_surface::ElementNode {
            tag: "p".to_string(),
            style: plume_surface::InlineStyle::default(),
            attrs: plume_surface::Attrs::default(),
            children: vec![
                Node::text("He"),
                Node::element("b", vec![Node::text("")]),
                Node::text("llo"),
            ],
        })],
    };
    let mut editor = boot(doc);

    editor
        .surface_mut()
        .set_selection(Selection::collapsed(Point::new(vec![0, 0], 1)));
    editor.handle_event(RawEvent::Click, 25);

    let fired = editor.run_due(25);
    assert!(fired.contains(&TimerPurpose::Cleanup));

    let Node::Element(p) = &editor.surface().doc().children[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(p.children, vec![Node::text("Hello")]);
}

#[test]
fn only_selection_moving_events_trigger_a_node_change() {
    use plume_editor::KeyCode;

    let mut editor = boot(two_block_doc());
    editor
        .surface_mut()
        .set_selection(Selection::collapsed(Point::new(vec![1, 0], 0)));

    // Keypresses and mouse-downs do not retarget the node.
    editor.handle_event(RawEvent::KeyPress(KeyCode::Char('x')), 30);
    editor.handle_event(RawEvent::MouseDown, 31);
    assert_eq!(editor.breadcrumb(), ["body"]);

    // A cursor-moving keydown does.
    editor.handle_event(RawEvent::KeyDown(KeyCode::ArrowRight), 32);
    assert_eq!(editor.breadcrumb(), ["body", "h2"]);
}
