mod control;
mod reconcile;
mod toolbar;

pub use crate::control::*;
pub use crate::reconcile::*;
pub use crate::toolbar::*;
