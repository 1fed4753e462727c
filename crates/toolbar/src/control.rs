/// Control lifecycle. Outside the initialization-only direct mutators, every
/// transition is driven by the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ControlState {
    Disabled,
    Enabled,
    Selected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

impl MenuEntry {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            checked: false,
        }
    }
}

/// A headless toolbar control bound to one formatting command. Created once
/// at toolbar construction and mutated in place until teardown.
#[derive(Debug, Clone)]
pub struct ToolbarControl {
    command: String,
    label: String,
    default_label: String,
    state: ControlState,
    menu: Vec<MenuEntry>,
}

impl ToolbarControl {
    pub fn new(command: impl Into<String>) -> Self {
        let command = command.into();
        Self {
            label: command.clone(),
            default_label: command.clone(),
            command,
            state: ControlState::Enabled,
            menu: Vec::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.label = label.clone();
        self.default_label = label;
        self
    }

    pub fn menu(mut self, entries: Vec<MenuEntry>) -> Self {
        self.menu = entries;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state != ControlState::Disabled
    }

    pub fn is_selected(&self) -> bool {
        self.state == ControlState::Selected
    }

    pub fn current_label(&self) -> &str {
        &self.label
    }

    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    pub fn menu_entries(&self) -> &[MenuEntry] {
        &self.menu
    }

    pub(crate) fn set_state(&mut self, state: ControlState) -> bool {
        if self.state == state {
            return false;
        }
        self.state = state;
        true
    }

    pub(crate) fn set_label(&mut self, label: &str) -> bool {
        if self.label == label {
            return false;
        }
        self.label = label.to_string();
        true
    }

    pub(crate) fn set_menu_checked(&mut self, value: &str) -> usize {
        let mut writes = 0;
        for entry in &mut self.menu {
            let checked = entry.value == value;
            if entry.checked != checked {
                entry.checked = checked;
                writes += 1;
            }
        }
        writes
    }
}
