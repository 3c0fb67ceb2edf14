mod combat;
mod components;
mod mob;
mod systems;

pub use combat::{Combat, CombatConfig};
pub use components::{Enemy, HitFlash, Intent, Position, Vitals};
pub use mob::spawn_enemy;
pub use systems::{Rates, hit_flash, player_input};
