use crate::control::{ControlState, MenuEntry, ToolbarControl};

/// Ordered set of controls, looked up by command id. Toolbars may carry any
/// subset of commands; lookups for unbound commands simply miss.
pub struct Toolbar {
    controls: Vec<ToolbarControl>,
}

impl Toolbar {
    pub fn new(controls: Vec<ToolbarControl>) -> Self {
        Self { controls }
    }

    pub fn standard() -> Self {
        Self::new(standard_controls())
    }

    pub fn controls(&self) -> &[ToolbarControl] {
        &self.controls
    }

    pub fn get_button_by_value(&self, command: &str) -> Option<&ToolbarControl> {
        self.controls.iter().find(|c| c.command() == command)
    }

    pub(crate) fn get_mut(&mut self, command: &str) -> Option<&mut ToolbarControl> {
        self.controls.iter_mut().find(|c| c.command() == command)
    }

    pub(crate) fn controls_mut(&mut self) -> impl Iterator<Item = &mut ToolbarControl> {
        self.controls.iter_mut()
    }

    // Direct state mutation, bypassing the reconciler. Intended for toolbar
    // initialization; anything later belongs to the reconciliation path.

    pub fn enable_button(&mut self, command: &str) -> bool {
        let Some(control) = self.get_mut(command) else {
            return false;
        };
        if control.state() == ControlState::Disabled {
            control.set_state(ControlState::Enabled);
        }
        true
    }

    pub fn disable_button(&mut self, command: &str) -> bool {
        let Some(control) = self.get_mut(command) else {
            return false;
        };
        control.set_state(ControlState::Disabled);
        true
    }

    pub fn select_button(&mut self, command: &str) -> bool {
        let Some(control) = self.get_mut(command) else {
            return false;
        };
        control.set_state(ControlState::Selected);
        true
    }

    pub fn deselect_button(&mut self, command: &str) -> bool {
        let Some(control) = self.get_mut(command) else {
            return false;
        };
        if control.state() == ControlState::Selected {
            control.set_state(ControlState::Enabled);
        }
        true
    }
}

fn heading_menu() -> Vec<MenuEntry> {
    vec![
        MenuEntry::new("none", "Normal"),
        MenuEntry::new("h1", "Header 1"),
        MenuEntry::new("h2", "Header 2"),
        MenuEntry::new("h3", "Header 3"),
        MenuEntry::new("h4", "Header 4"),
        MenuEntry::new("h5", "Header 5"),
        MenuEntry::new("h6", "Header 6"),
    ]
}

/// The default control set for a full formatting toolbar.
pub fn standard_controls() -> Vec<ToolbarControl> {
    vec![
        ToolbarControl::new("bold"),
        ToolbarControl::new("italic"),
        ToolbarControl::new("underline"),
        ToolbarControl::new("superscript"),
        ToolbarControl::new("subscript"),
        ToolbarControl::new("forecolor"),
        ToolbarControl::new("backcolor"),
        ToolbarControl::new("fontname").label("Arial"),
        ToolbarControl::new("fontsize").label("13"),
        ToolbarControl::new("heading").label("Normal").menu(heading_menu()),
        ToolbarControl::new("createlink"),
        ToolbarControl::new("insertimage"),
        ToolbarControl::new("insertunorderedlist"),
        ToolbarControl::new("insertorderedlist"),
        ToolbarControl::new("justifyleft"),
        ToolbarControl::new("justifycenter"),
        ToolbarControl::new("justifyright"),
        ToolbarControl::new("justifyfull"),
        ToolbarControl::new("hiddenelements"),
    ]
}
