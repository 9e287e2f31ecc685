//! Static wall cell

use serde::{Deserialize, Serialize};

use super::actor::Behavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Wall {
    /// Marked breakable by the level; nothing breaks it yet
    pub breakable: bool,
}

impl Wall {
    pub fn new(breakable: bool) -> Self {
        Self { breakable }
    }
}

impl Behavior for Wall {}
