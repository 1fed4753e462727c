#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Backspace,
    Delete,
    Char(char),
}

impl KeyCode {
    pub fn moves_cursor(self) -> bool {
        matches!(
            self,
            Self::ArrowLeft
                | Self::ArrowRight
                | Self::ArrowUp
                | Self::ArrowDown
                | Self::Home
                | Self::End
                | Self::PageUp
                | Self::PageDown
        )
    }
}

/// Raw input events the embedding host forwards to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    Click,
    MouseDown,
    MouseUp,
    DblClick,
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    KeyPress(KeyCode),
}

impl RawEvent {
    /// Whether this event can move the selection and therefore warrants a
    /// node change: clicks, mouse releases, key releases, and presses of
    /// cursor-moving keys.
    pub fn triggers_node_change(self) -> bool {
        match self {
            Self::Click | Self::DblClick | Self::MouseUp => true,
            Self::KeyUp(_) => true,
            Self::KeyDown(key) => key.moves_cursor(),
            Self::MouseDown | Self::KeyPress(_) => false,
        }
    }
}
