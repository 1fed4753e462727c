use std::collections::BTreeSet;

use plume_surface::FormattingContext;

use crate::control::ControlState;
use crate::toolbar::Toolbar;

/// Override tables for the reconciler: always-enabled commands ignore the
/// has-selection gate; always-disabled commands are inert regardless of
/// context. Immutable once constructed.
#[derive(Debug, Clone, Default)]
pub struct ReconcilePolicy {
    always_enabled: BTreeSet<String>,
    always_disabled: BTreeSet<String>,
}

impl ReconcilePolicy {
    pub fn standard() -> Self {
        Self::default().always_enabled(["hiddenelements"])
    }

    pub fn always_enabled<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.always_enabled
            .extend(commands.into_iter().map(Into::into));
        self
    }

    pub fn always_disabled<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.always_disabled
            .extend(commands.into_iter().map(Into::into));
        self
    }

    pub fn is_always_enabled(&self, command: &str) -> bool {
        self.always_enabled.contains(command)
    }

    pub fn is_always_disabled(&self, command: &str) -> bool {
        self.always_disabled.contains(command)
    }
}

pub struct Reconciler {
    policy: ReconcilePolicy,
}

impl Reconciler {
    pub fn new(policy: ReconcilePolicy) -> Self {
        Self { policy }
    }

    pub fn standard() -> Self {
        Self::new(ReconcilePolicy::standard())
    }

    pub fn policy(&self) -> &ReconcilePolicy {
        &self.policy
    }

    /// Updates every bound control to match the context. `triggering` names
    /// the control whose command caused this change; it is exempt from the
    /// reset pass so the control the user is acting on does not flicker.
    ///
    /// Returns the number of state writes performed. Comparing current state
    /// against target before each write makes the pass idempotent: a second
    /// run with an unchanged context returns zero.
    pub fn reconcile(
        &self,
        toolbar: &mut Toolbar,
        context: &FormattingContext,
        triggering: Option<&str>,
    ) -> usize {
        let mut writes = 0;

        // Reset and enable collapsed into one target resolution per control,
        // written only when it differs from the current state. The reset
        // baseline is disabled-and-deselected; active commands lift their
        // control to selected, a non-empty selection lifts the rest to
        // enabled, and the override tables pin their entries.
        for control in toolbar.controls_mut() {
            let command = control.command();
            let mut target = if self.policy.is_always_disabled(command) {
                ControlState::Disabled
            } else if context.active.contains(command) {
                ControlState::Selected
            } else if self.policy.is_always_enabled(command) || context.has_selection {
                ControlState::Enabled
            } else {
                ControlState::Disabled
            };

            // The control being acted on is exempt from reset: never knock
            // its state down mid-use.
            if triggering == Some(command) && !self.policy.is_always_disabled(command) {
                target = target.max(control.state());
            }

            writes += control.set_state(target) as usize;
        }

        for command in &context.active {
            if toolbar.get_button_by_value(command).is_none() {
                log::trace!("no control bound for active command {command:?}; skipped");
            }
        }

        // Label pass: value-labelled controls track the resolved value and
        // fall back to their configured default.
        if let Some(control) = toolbar.get_mut("fontname") {
            let target = context
                .font_family
                .clone()
                .unwrap_or_else(|| control.default_label().to_string());
            writes += control.set_label(&target) as usize;
        }
        if let Some(control) = toolbar.get_mut("fontsize") {
            let target = context
                .font_size
                .clone()
                .unwrap_or_else(|| control.default_label().to_string());
            writes += control.set_label(&target) as usize;
        }
        if let Some(control) = toolbar.get_mut("heading") {
            let resolved = match context.block.heading_level() {
                Some(level) => format!("h{level}"),
                None => "none".to_string(),
            };
            let target = control
                .menu_entries()
                .iter()
                .find(|entry| entry.value == resolved)
                .map(|entry| entry.label.clone())
                .unwrap_or_else(|| control.default_label().to_string());
            writes += control.set_label(&target) as usize;
            writes += control.set_menu_checked(&resolved);
        }

        log::debug!(
            "reconciled toolbar against context at {:?}: {writes} writes",
            context.path
        );
        writes
    }
}
