//! Per-frame input handed from the front end to the simulation.

use glam::Vec2;

use crate::entities::{Level, Upgrade};

/// Snapshot of the controls for one frame.
///
/// Movement, dash and fire are *held* states. `confirm`, `cancel`, `upgrade`
/// and `level` are one-shot presses seen this frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub dash: bool,
    pub fire: bool,
    /// Aim point in world coordinates.
    pub cursor: Vec2,
    pub confirm: bool,
    pub cancel: bool,
    pub upgrade: Option<Upgrade>,
    pub level: Option<Level>,
}

impl FrameInput {
    /// Unnormalized movement direction from the four direction keys.
    pub fn movement(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }

    /// Record a menu/shop digit. Whichever meaning does not fit the current
    /// state is ignored by the simulation.
    pub fn choose(&mut self, choice: u8) {
        self.upgrade = Upgrade::from_choice(choice);
        self.level = Level::from_choice(choice);
    }
}
