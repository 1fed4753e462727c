mod config;
mod editor;
mod events;
mod timers;

pub use crate::config::*;
pub use crate::editor::*;
pub use crate::events::*;
pub use crate::timers::*;
