use plume_surface::{BlockTag, FormattingContext};
use plume_toolbar::{
    ControlState, ReconcilePolicy, Reconciler, Toolbar, ToolbarControl, standard_controls,
};

fn context_with(active: &[&str], has_selection: bool) -> FormattingContext {
    let mut ctx = FormattingContext {
        has_selection,
        path: vec!["body".to_string()],
        ..FormattingContext::default()
    };
    for command in active {
        ctx.active.insert((*command).to_string());
    }
    ctx
}

#[test]
fn second_run_with_unchanged_context_writes_nothing() {
    let mut toolbar = Toolbar::standard();
    let reconciler = Reconciler::standard();
    let ctx = context_with(&["bold", "italic"], true);

    let first = reconciler.reconcile(&mut toolbar, &ctx, None);
    assert!(first > 0);

    let second = reconciler.reconcile(&mut toolbar, &ctx, None);
    assert_eq!(second, 0);
}

#[test]
fn active_command_anywhere_in_the_path_selects_its_control() {
    let mut toolbar = Toolbar::standard();
    let ctx = context_with(&["bold"], false);

    Reconciler::standard().reconcile(&mut toolbar, &ctx, None);

    assert!(toolbar.get_button_by_value("bold").unwrap().is_selected());
    assert!(!toolbar.get_button_by_value("italic").unwrap().is_selected());
}

#[test]
fn empty_selection_disables_everything_except_always_enabled() {
    let mut toolbar = Toolbar::standard();
    let ctx = context_with(&[], false);

    Reconciler::standard().reconcile(&mut toolbar, &ctx, None);

    for command in ["forecolor", "backcolor", "fontname", "fontsize", "createlink"] {
        let control = toolbar.get_button_by_value(command).unwrap();
        assert!(!control.is_enabled(), "{command} should be disabled");
    }
    assert!(toolbar.get_button_by_value("hiddenelements").unwrap().is_enabled());
}

#[test]
fn nonempty_selection_enables_selection_dependent_controls() {
    let mut toolbar = Toolbar::standard();
    let ctx = context_with(&[], true);

    Reconciler::standard().reconcile(&mut toolbar, &ctx, None);

    assert!(toolbar.get_button_by_value("bold").unwrap().is_enabled());
    assert!(!toolbar.get_button_by_value("bold").unwrap().is_selected());
}

#[test]
fn active_command_without_a_bound_control_is_skipped() {
    let mut toolbar = Toolbar::new(vec![ToolbarControl::new("bold")]);
    let ctx = context_with(&["bold", "italic"], true);

    Reconciler::standard().reconcile(&mut toolbar, &ctx, None);

    assert!(toolbar.get_button_by_value("bold").unwrap().is_selected());
    assert!(toolbar.get_button_by_value("italic").is_none());
}

#[test]
fn triggering_control_is_exempt_from_reset() {
    let mut toolbar = Toolbar::standard();
    let reconciler = Reconciler::standard();

    reconciler.reconcile(&mut toolbar, &context_with(&["bold"], true), None);
    assert!(toolbar.get_button_by_value("bold").unwrap().is_selected());

    // Bold was just toggled off by its own control: the context no longer
    // reports it, but the acting control must not flicker.
    reconciler.reconcile(&mut toolbar, &context_with(&[], true), Some("bold"));
    assert!(toolbar.get_button_by_value("bold").unwrap().is_selected());

    // The next ordinary change reconciles it like any other control.
    reconciler.reconcile(&mut toolbar, &context_with(&[], true), None);
    assert!(!toolbar.get_button_by_value("bold").unwrap().is_selected());
}

#[test]
fn heading_label_and_menu_track_the_block() {
    let mut toolbar = Toolbar::standard();
    let reconciler = Reconciler::standard();

    let mut ctx = context_with(&["heading"], false);
    ctx.block = BlockTag::Heading { level: 2 };
    reconciler.reconcile(&mut toolbar, &ctx, None);

    let heading = toolbar.get_button_by_value("heading").unwrap();
    assert_eq!(heading.current_label(), "Header 2");
    for entry in heading.menu_entries() {
        assert_eq!(entry.checked, entry.value == "h2", "entry {}", entry.value);
    }

    // Back in a paragraph the label resets to its configured default.
    let ctx = context_with(&[], false);
    reconciler.reconcile(&mut toolbar, &ctx, None);

    let heading = toolbar.get_button_by_value("heading").unwrap();
    assert_eq!(heading.current_label(), "Normal");
    assert!(
        heading
            .menu_entries()
            .iter()
            .all(|entry| entry.checked == (entry.value == "none"))
    );
}

#[test]
fn font_labels_track_context_values_and_reset() {
    let mut toolbar = Toolbar::standard();
    let reconciler = Reconciler::standard();

    let mut ctx = context_with(&[], true);
    ctx.font_family = Some("Georgia".to_string());
    ctx.font_size = Some("24".to_string());
    reconciler.reconcile(&mut toolbar, &ctx, None);

    assert_eq!(
        toolbar.get_button_by_value("fontname").unwrap().current_label(),
        "Georgia"
    );
    assert_eq!(toolbar.get_button_by_value("fontsize").unwrap().current_label(), "24");

    reconciler.reconcile(&mut toolbar, &context_with(&[], true), None);

    assert_eq!(toolbar.get_button_by_value("fontname").unwrap().current_label(), "Arial");
    assert_eq!(toolbar.get_button_by_value("fontsize").unwrap().current_label(), "13");
}

#[test]
fn always_disabled_commands_stay_inert() {
    let policy = ReconcilePolicy::standard().always_disabled(["insertimage"]);
    let mut toolbar = Toolbar::standard();
    let ctx = context_with(&["insertimage"], true);

    Reconciler::new(policy).reconcile(&mut toolbar, &ctx, Some("insertimage"));

    let control = toolbar.get_button_by_value("insertimage").unwrap();
    assert!(!control.is_enabled());
    assert!(!control.is_selected());
}

#[test]
fn direct_mutators_bypass_the_reconciler() {
    let mut toolbar = Toolbar::new(standard_controls());

    assert!(toolbar.disable_button("bold"));
    assert_eq!(
        toolbar.get_button_by_value("bold").unwrap().state(),
        ControlState::Disabled
    );

    assert!(toolbar.enable_button("bold"));
    assert!(toolbar.get_button_by_value("bold").unwrap().is_enabled());

    assert!(toolbar.select_button("bold"));
    assert!(toolbar.get_button_by_value("bold").unwrap().is_selected());

    assert!(toolbar.deselect_button("bold"));
    assert!(!toolbar.get_button_by_value("bold").unwrap().is_selected());
    assert!(toolbar.get_button_by_value("bold").unwrap().is_enabled());

    assert!(!toolbar.enable_button("no-such-command"));
    assert!(toolbar.get_button_by_value("no-such-command").is_none());
}
