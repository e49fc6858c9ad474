//! Weapon domain - агрегат одного оружия и per-frame update
//!
//! Flow одного frame:
//! 1. Muzzle light: погасить, если deadline прошёл
//! 2. Paused → cooldown сбрасывается в "готово"; иначе input → `request_fire`
//! 3. Recoil `decay(dt)` → `compute_transform()` → local pose оружия
//!
//! `request_fire` (при Fired): HitResolver → RecoilModel::kick → EffectDispatcher

pub mod input;
pub mod weapon;

#[cfg(test)]
mod weapon_tests;

pub use input::*;
pub use weapon::*;
