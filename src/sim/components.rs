use bitflags::bitflags;
use glam::Vec2;

/// World-space position in cell units.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// Health and the alive flag. Dead entities stay in the world but are no
/// longer drawn or targeted.
#[derive(Debug, Clone, Copy)]
pub struct Vitals {
    pub health: i32,
    pub alive: bool,
}

impl Vitals {
    pub fn new(health: i32) -> Self {
        Self {
            health,
            alive: health > 0,
        }
    }

    /// Subtract `amount`; returns `true` if this blow was lethal.
    pub fn damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.alive = false;
            return true;
        }
        false
    }
}

/// Frames left in the "just hit" flicker.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitFlash(pub u32);

/// Tag for hostile billboards.
#[derive(Debug, Clone, Copy)]
pub struct Enemy;

bitflags! {
    /// Per-frame player intents, collected by the front-end.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Intent: u8 {
        const FORWARD      = 0x01;
        const BACKWARD     = 0x02;
        const ROTATE_LEFT  = 0x04;
        const ROTATE_RIGHT = 0x08;
        /// Edge-triggered: set only on the frame the button went down.
        const FIRE         = 0x10;
    }
}
