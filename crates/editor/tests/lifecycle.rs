use plume_editor::{Editor, EditorConfig, RawEvent, TimerPurpose};
use plume_surface::{Document, Node, Point, Selection, Surface};
use plume_toolbar::Toolbar;

#[test]
fn ready_poll_initializes_once_content_arrives() {
    let doc = Document {
        children: vec![Node::paragraph("Hi")],
    };
    let mut editor = Editor::new(Surface::new(doc), Toolbar::standard(), EditorConfig::default(), 0);
    assert!(!editor.is_ready());

    // Content is not in place yet: the poll keeps rescheduling itself.
    editor.run_due(20);
    editor.run_due(40);
    assert!(!editor.is_ready());
    assert!(editor.timers().is_scheduled(TimerPurpose::ReadyPoll));

    editor.surface_mut().mark_content_ready();
    let fired = editor.run_due(60);

    assert!(fired.contains(&TimerPurpose::ReadyPoll));
    assert!(editor.is_ready());
    // Becoming ready forces an initial node change.
    assert_eq!(editor.breadcrumb(), ["body"]);
    assert!(editor.context().is_some());
}

#[test]
fn ready_poll_gives_up_silently_after_its_retry_limit() {
    let doc = Document {
        children: vec![Node::paragraph("Hi")],
    };
    let config = EditorConfig {
        ready_poll_interval: 5,
        ready_poll_retries: 2,
        ..EditorConfig::default()
    };
    let mut editor = Editor::new(Surface::new(doc), Toolbar::standard(), config, 0);

    editor.run_due(5);
    assert!(editor.timers().is_scheduled(TimerPurpose::ReadyPoll));
    editor.run_due(10);

    // Retries exhausted: no further polls, no error, just not ready.
    assert!(!editor.timers().is_scheduled(TimerPurpose::ReadyPoll));
    assert!(!editor.is_ready());

    editor.surface_mut().mark_content_ready();
    assert!(editor.run_due(50).is_empty());
    assert!(!editor.is_ready());
}

#[test]
fn events_are_dropped_until_the_editor_is_ready() {
    let doc = Document {
        children: vec![Node::paragraph("Hi")],
    };
    let mut editor = Editor::new(Surface::new(doc), Toolbar::standard(), EditorConfig::default(), 0);

    editor
        .surface_mut()
        .set_selection(Selection::collapsed(Point::new(vec![0, 0], 0)));
    editor.handle_event(RawEvent::Click, 1);

    assert!(editor.context().is_none());
    assert!(editor.breadcrumb().is_empty());
}

fn booted(doc: Document) -> Editor {
    let mut editor = Editor::new(
        Surface::with_ready_content(doc),
        Toolbar::standard(),
        EditorConfig::default(),
        0,
    );
    editor.run_due(20);
    assert!(editor.is_ready());
    editor
}

#[test]
fn exec_command_selects_the_acting_control_and_rederives() {
    let mut editor = booted(Document {
        children: vec![Node::paragraph("Hi")],
    });
    editor.surface_mut().set_selection(Selection {
        anchor: Point::new(vec![0, 0], 0),
        focus: Point::new(vec![0, 0], 2),
    });

    editor.exec_command("bold", None, 25).unwrap();

    assert!(editor.get_button_by_value("bold").unwrap().is_selected());
    assert!(!editor.get_button_by_value("italic").unwrap().is_selected());
    assert_eq!(
        editor.get_button_by_value("heading").unwrap().current_label(),
        "Normal"
    );
    // The command forced an immediate re-derivation.
    assert_eq!(editor.breadcrumb(), ["body", "p", "b"]);
    assert!(editor.context().unwrap().is_active("bold"));
}

#[test]
fn heading_selection_updates_label_menu_and_breadcrumb() {
    let mut editor = booted(Document {
        children: vec![Node::element("h2", vec![Node::text("Title")])],
    });
    editor
        .surface_mut()
        .set_selection(Selection::collapsed(Point::new(vec![0, 0], 3)));

    editor.handle_event(RawEvent::Click, 30);

    let heading = editor.get_button_by_value("heading").unwrap();
    assert_eq!(heading.current_label(), "Header 2");
    for entry in heading.menu_entries() {
        assert_eq!(entry.checked, entry.value == "h2", "entry {}", entry.value);
    }
    assert_eq!(editor.breadcrumb(), ["body", "h2"]);
}

#[test]
fn no_selection_leaves_only_always_enabled_controls_usable() {
    let mut editor = booted(Document {
        children: vec![Node::paragraph("plain body text")],
    });
    editor.surface_mut().clear_selection();

    editor.node_change(true, 25);

    for command in ["forecolor", "backcolor", "fontname", "fontsize", "createlink"] {
        let control = editor.get_button_by_value(command).unwrap();
        assert!(!control.is_enabled(), "{command} should be disabled");
    }
    assert!(
        editor
            .get_button_by_value("hiddenelements")
            .unwrap()
            .is_enabled()
    );
}

#[test]
fn unknown_command_surfaces_an_error_and_changes_nothing() {
    let mut editor = booted(Document {
        children: vec![Node::paragraph("Hi")],
    });
    let before = editor.surface().doc().clone();

    let err = editor.exec_command("sparkle", None, 25).unwrap_err();

    assert!(err.message().contains("Unknown command"));
    assert_eq!(editor.surface().doc(), &before);
}

#[test]
fn direct_button_mutation_is_available_for_initialization() {
    let mut editor = booted(Document {
        children: vec![Node::paragraph("Hi")],
    });

    assert!(editor.disable_button("bold"));
    assert!(!editor.get_button_by_value("bold").unwrap().is_enabled());

    assert!(editor.enable_button("bold"));
    assert!(editor.select_button("bold"));
    assert!(editor.get_button_by_value("bold").unwrap().is_selected());
    assert!(editor.deselect_button("bold"));
    assert!(!editor.get_button_by_value("bold").unwrap().is_selected());

    assert!(!editor.select_button("no-such-command"));
}
